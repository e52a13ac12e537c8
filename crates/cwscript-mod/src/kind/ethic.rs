use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An empire ethic, as referenced by `has_ethic` triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ethic {
    Authoritarian,
    FanaticAuthoritarian,
    Egalitarian,
    FanaticEgalitarian,
    Xenophobe,
    FanaticXenophobe,
    Xenophile,
    FanaticXenophile,
    Militarist,
    FanaticMilitarist,
    Pacifist,
    FanaticPacifist,
    Materialist,
    FanaticMaterialist,
    Spiritualist,
    FanaticSpiritualist,
    GestaltConsciousness,
}

impl Ethic {
    pub const ALL: [Ethic; 17] = [
        Self::Authoritarian,
        Self::FanaticAuthoritarian,
        Self::Egalitarian,
        Self::FanaticEgalitarian,
        Self::Xenophobe,
        Self::FanaticXenophobe,
        Self::Xenophile,
        Self::FanaticXenophile,
        Self::Militarist,
        Self::FanaticMilitarist,
        Self::Pacifist,
        Self::FanaticPacifist,
        Self::Materialist,
        Self::FanaticMaterialist,
        Self::Spiritualist,
        Self::FanaticSpiritualist,
        Self::GestaltConsciousness,
    ];

    /// Game identifier, e.g. `ethic_fanatic_pacifist`.
    pub fn as_script(self) -> &'static str {
        match self {
            Self::Authoritarian => "ethic_authoritarian",
            Self::FanaticAuthoritarian => "ethic_fanatic_authoritarian",
            Self::Egalitarian => "ethic_egalitarian",
            Self::FanaticEgalitarian => "ethic_fanatic_egalitarian",
            Self::Xenophobe => "ethic_xenophobe",
            Self::FanaticXenophobe => "ethic_fanatic_xenophobe",
            Self::Xenophile => "ethic_xenophile",
            Self::FanaticXenophile => "ethic_fanatic_xenophile",
            Self::Militarist => "ethic_militarist",
            Self::FanaticMilitarist => "ethic_fanatic_militarist",
            Self::Pacifist => "ethic_pacifist",
            Self::FanaticPacifist => "ethic_fanatic_pacifist",
            Self::Materialist => "ethic_materialist",
            Self::FanaticMaterialist => "ethic_fanatic_materialist",
            Self::Spiritualist => "ethic_spiritualist",
            Self::FanaticSpiritualist => "ethic_fanatic_spiritualist",
            Self::GestaltConsciousness => "ethic_gestalt_consciousness",
        }
    }

    pub fn is_fanatic(self) -> bool {
        self.as_script().starts_with("ethic_fanatic_")
    }
}

impl FromStr for Ethic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_script() == s)
            .ok_or_else(|| format!("unknown ethic '{s}'"))
    }
}

impl fmt::Display for Ethic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_script())
    }
}
