use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Australian state or territory a property is purchased in.
///
/// Every jurisdiction has its own duty schedule, grant and registration fees.
/// Unknown codes resolve to [`StateCode::Nsw`] instead of failing, both when
/// parsing and when deserializing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StateCode {
    #[default]
    Nsw,
    Vic,
    Qld,
    Sa,
    Wa,
    Tas,
    Nt,
    Act,
}

impl StateCode {
    pub const ALL: [StateCode; 8] = [
        StateCode::Nsw,
        StateCode::Vic,
        StateCode::Qld,
        StateCode::Sa,
        StateCode::Wa,
        StateCode::Tas,
        StateCode::Nt,
        StateCode::Act,
    ];

    pub fn code(self) -> &'static str {
        match self {
            StateCode::Nsw => "NSW",
            StateCode::Vic => "VIC",
            StateCode::Qld => "QLD",
            StateCode::Sa => "SA",
            StateCode::Wa => "WA",
            StateCode::Tas => "TAS",
            StateCode::Nt => "NT",
            StateCode::Act => "ACT",
        }
    }

    /// Parses a state code, falling back to NSW for anything unrecognised.
    pub fn parse_or_default(s: &str) -> StateCode {
        s.parse().unwrap_or_default()
    }
}

/// Returned by [`StateCode::from_str`] for codes outside the eight jurisdictions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown state code: {0}")]
pub struct UnknownStateCode(pub String);

impl FromStr for StateCode {
    type Err = UnknownStateCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NSW" => Ok(StateCode::Nsw),
            "VIC" => Ok(StateCode::Vic),
            "QLD" => Ok(StateCode::Qld),
            "SA" => Ok(StateCode::Sa),
            "WA" => Ok(StateCode::Wa),
            "TAS" => Ok(StateCode::Tas),
            "NT" => Ok(StateCode::Nt),
            "ACT" => Ok(StateCode::Act),
            _ => Err(UnknownStateCode(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for StateCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(StateCode::parse_or_default(&code))
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
