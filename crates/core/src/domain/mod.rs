pub mod bond;
pub mod country;
pub mod economy;
pub mod equity;
pub mod fx;
pub mod history;
pub mod policy;
pub mod whale;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One dashboard data domain. The string form doubles as the backend path
/// segment and the analysis topic id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Bond,
    Fx,
    Equity,
    Policy,
    Country,
    Economy,
    History,
    Whale,
}

impl Domain {
    pub const ALL: [Domain; 8] = [
        Domain::Bond,
        Domain::Fx,
        Domain::Equity,
        Domain::Policy,
        Domain::Country,
        Domain::Economy,
        Domain::History,
        Domain::Whale,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Bond => "bond",
            Domain::Fx => "fx",
            Domain::Equity => "equity",
            Domain::Policy => "policy",
            Domain::Country => "country",
            Domain::Economy => "economy",
            Domain::History => "history",
            Domain::Whale => "whale",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct UnknownDomain(pub String);

impl fmt::Display for UnknownDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown dashboard domain: {}", self.0)
    }
}

impl std::error::Error for UnknownDomain {}

impl FromStr for Domain {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bond" => Ok(Domain::Bond),
            "fx" => Ok(Domain::Fx),
            "equity" => Ok(Domain::Equity),
            "policy" => Ok(Domain::Policy),
            "country" => Ok(Domain::Country),
            "economy" => Ok(Domain::Economy),
            "history" => Ok(Domain::History),
            "whale" => Ok(Domain::Whale),
            other => Err(UnknownDomain(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_domain_string() {
        for d in Domain::ALL {
            assert_eq!(d.as_str().parse::<Domain>().unwrap(), d);
        }
    }

    #[test]
    fn rejects_unknown_domain() {
        assert!("crypto".parse::<Domain>().is_err());
    }

    #[test]
    fn serializes_as_snake_case_string() {
        let v = serde_json::to_value(Domain::Bond).unwrap();
        assert_eq!(v, serde_json::json!("bond"));
    }
}
