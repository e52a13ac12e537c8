use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A government authority, as referenced by `authority` triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authority {
    Democratic,
    Oligarchic,
    Dictatorial,
    Imperial,
    Corporate,
    HiveMind,
    MachineIntelligence,
}

impl Authority {
    pub const ALL: [Authority; 7] = [
        Self::Democratic,
        Self::Oligarchic,
        Self::Dictatorial,
        Self::Imperial,
        Self::Corporate,
        Self::HiveMind,
        Self::MachineIntelligence,
    ];

    pub fn as_script(self) -> &'static str {
        match self {
            Self::Democratic => "auth_democratic",
            Self::Oligarchic => "auth_oligarchic",
            Self::Dictatorial => "auth_dictatorial",
            Self::Imperial => "auth_imperial",
            Self::Corporate => "auth_corporate",
            Self::HiveMind => "auth_hive_mind",
            Self::MachineIntelligence => "auth_machine_intelligence",
        }
    }

    /// Gestalt authorities have no ethics other than the gestalt one.
    pub fn is_gestalt(self) -> bool {
        matches!(self, Self::HiveMind | Self::MachineIntelligence)
    }
}

impl FromStr for Authority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_script() == s)
            .ok_or_else(|| format!("unknown authority '{s}'"))
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_script())
    }
}
