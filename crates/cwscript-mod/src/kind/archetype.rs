use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Species archetype a trait may be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpeciesArchetype {
    Biological,
    Lithoid,
    Machine,
    Robot,
    Presapient,
    Other,
}

impl SpeciesArchetype {
    pub const ALL: [SpeciesArchetype; 6] = [
        Self::Biological,
        Self::Lithoid,
        Self::Machine,
        Self::Robot,
        Self::Presapient,
        Self::Other,
    ];

    pub fn as_script(self) -> &'static str {
        match self {
            Self::Biological => "BIOLOGICAL",
            Self::Lithoid => "LITHOID",
            Self::Machine => "MACHINE",
            Self::Robot => "ROBOT",
            Self::Presapient => "PRESAPIENT",
            Self::Other => "OTHER",
        }
    }
}

impl FromStr for SpeciesArchetype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_script() == s)
            .ok_or_else(|| format!("unknown species archetype '{s}'"))
    }
}

impl fmt::Display for SpeciesArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_script())
    }
}
