use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryBoard {
    pub countries: Vec<CountryMetrics>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryMetrics {
    pub code: String,
    pub name: String,
    pub scores: BTreeMap<String, f64>,
    pub overall_score: f64,
}

impl CountryBoard {
    pub fn country(&self, code: &str) -> Option<&CountryMetrics> {
        self.countries.iter().find(|c| c.code == code)
    }
}

impl CountryMetrics {
    pub fn grade(&self) -> Grade {
        Grade::for_score(self.overall_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    /// Lower-inclusive bands: a score of exactly 80 is an A-.
    pub fn for_score(score: f64) -> Grade {
        if score >= 90.0 {
            Grade::APlus
        } else if score >= 85.0 {
            Grade::A
        } else if score >= 80.0 {
            Grade::AMinus
        } else if score >= 75.0 {
            Grade::BPlus
        } else if score >= 70.0 {
            Grade::B
        } else if score >= 65.0 {
            Grade::BMinus
        } else if score >= 60.0 {
            Grade::CPlus
        } else if score >= 55.0 {
            Grade::C
        } else if score >= 50.0 {
            Grade::CMinus
        } else if score >= 45.0 {
            Grade::DPlus
        } else if score >= 40.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_of_exactly_eighty_is_a_minus() {
        assert_eq!(Grade::for_score(80.0), Grade::AMinus);
    }

    #[test]
    fn every_band_boundary_is_lower_inclusive() {
        let table = [
            (90.0, Grade::APlus),
            (85.0, Grade::A),
            (80.0, Grade::AMinus),
            (75.0, Grade::BPlus),
            (70.0, Grade::B),
            (65.0, Grade::BMinus),
            (60.0, Grade::CPlus),
            (55.0, Grade::C),
            (50.0, Grade::CMinus),
            (45.0, Grade::DPlus),
            (40.0, Grade::D),
        ];

        for (i, (boundary, grade)) in table.iter().enumerate() {
            assert_eq!(Grade::for_score(*boundary), *grade, "at {boundary}");
            // Just below a boundary falls into the next band down, with no
            // gaps or overlaps between adjacent bands.
            let below = boundary - 0.01;
            let expected_below = table.get(i + 1).map_or(Grade::F, |(_, g)| *g);
            assert_eq!(Grade::for_score(below), expected_below, "below {boundary}");
        }
    }

    #[test]
    fn extremes_map_to_top_and_bottom_grades() {
        assert_eq!(Grade::for_score(100.0), Grade::APlus);
        assert_eq!(Grade::for_score(0.0), Grade::F);
        assert_eq!(Grade::for_score(39.99), Grade::F);
    }

    #[test]
    fn grade_serializes_as_its_display_string() {
        let v = serde_json::to_value(Grade::AMinus).unwrap();
        assert_eq!(v, serde_json::json!("A-"));
    }
}
