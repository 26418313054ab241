use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyBoard {
    pub central_banks: Vec<CentralBank>,
    pub upcoming_meetings: Vec<PolicyMeeting>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentralBank {
    pub bank: String,
    pub country: String,
    pub policy_rate: f64,
    #[serde(default)]
    pub stance: Option<PolicyStance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyStance {
    Hawkish,
    Neutral,
    Dovish,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyMeeting {
    pub bank: String,
    pub date: NaiveDate,
}

impl PolicyBoard {
    pub fn bank(&self, name: &str) -> Option<&CentralBank> {
        self.central_banks.iter().find(|b| b.bank == name)
    }

    pub fn next_meeting(&self) -> Option<&PolicyMeeting> {
        self.upcoming_meetings.iter().min_by_key(|m| m.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_meeting_is_the_earliest_one() {
        let board = PolicyBoard {
            central_banks: Vec::new(),
            upcoming_meetings: vec![
                PolicyMeeting {
                    bank: "ECB".to_string(),
                    date: NaiveDate::from_ymd_opt(2026, 9, 10).unwrap(),
                },
                PolicyMeeting {
                    bank: "Federal Reserve".to_string(),
                    date: NaiveDate::from_ymd_opt(2026, 8, 19).unwrap(),
                },
            ],
        };
        assert_eq!(
            board.next_meeting().map(|m| m.bank.as_str()),
            Some("Federal Reserve")
        );
    }

    #[test]
    fn empty_board_has_no_next_meeting() {
        let board = PolicyBoard {
            central_banks: Vec::new(),
            upcoming_meetings: Vec::new(),
        };
        assert!(board.next_meeting().is_none());
    }
}
