use cwscript_core::types::{Block, Property, Scalar};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entity::{invalid, list_block, list_section, loose_scalars, ScriptEntity};
use crate::error::ModError;
use crate::kind::SpeciesArchetype;

const NAME: &str = "name";
const DESCRIPTION: &str = "description";
const COST: &str = "cost";
const ALLOWED_ARCHETYPES: &str = "allowed_archetypes";
const PREREQUISITES: &str = "prerequisites";
const OPPOSITES: &str = "opposites";

/// A species trait.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesTrait {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Trait points; negative for drawbacks.
    #[serde(default)]
    pub cost: i64,
    #[serde(default)]
    pub modifiers: IndexMap<String, Scalar>,
    #[serde(default)]
    pub allowed_archetypes: Vec<SpeciesArchetype>,
    /// Traits (usually technologies) that must be present first.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Traits this one cannot be combined with.
    #[serde(default)]
    pub opposites: Vec<String>,
}

impl SpeciesTrait {
    pub fn new(id: impl Into<String>, cost: i64) -> Self {
        Self {
            id: id.into(),
            cost,
            ..Self::default()
        }
    }

    pub fn with_modifier(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.modifiers.insert(key.into(), value.into());
        self
    }
}

impl ScriptEntity for SpeciesTrait {
    const KIND: &'static str = "trait";

    fn id(&self) -> &str {
        &self.id
    }

    fn to_block(&self) -> Block {
        let mut block = Block::anonymous();
        if let Some(name) = &self.name {
            block.push(Property::new(NAME, Scalar::string(name)));
        }
        if let Some(description) = &self.description {
            block.push(Property::new(DESCRIPTION, Scalar::string(description)));
        }
        block.push(Property::new(COST, Scalar::number(self.cost)));
        for (key, value) in &self.modifiers {
            block.push(Property::new(key.as_str(), value.clone()));
        }
        if !self.allowed_archetypes.is_empty() {
            let archetypes = self
                .allowed_archetypes
                .iter()
                .map(|a| Scalar::identifier(a.as_script()));
            block.push(Property::new(ALLOWED_ARCHETYPES, list_block(archetypes)));
        }
        if !self.prerequisites.is_empty() {
            let ids = self.prerequisites.iter().map(Scalar::string);
            block.push(Property::new(PREREQUISITES, list_block(ids)));
        }
        if !self.opposites.is_empty() {
            let ids = self.opposites.iter().map(Scalar::string);
            block.push(Property::new(OPPOSITES, list_block(ids)));
        }
        block
    }

    fn from_block(id: &str, block: &Block) -> Result<Self, ModError> {
        let cost = match block.scalar(COST) {
            Some(cost) => cost.as_i64().ok_or_else(|| {
                invalid::<Self>(id, format!("cost must be an integer, got {cost}"))
            })?,
            None => 0,
        };
        let allowed_archetypes = list_section(block, ALLOWED_ARCHETYPES)
            .iter()
            .map(|a| a.parse().map_err(|e| invalid::<Self>(id, e)))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            id: id.to_string(),
            name: block.scalar(NAME).map(|s| s.text().into_owned()),
            description: block.scalar(DESCRIPTION).map(|s| s.text().into_owned()),
            cost,
            modifiers: loose_scalars(block, &[NAME, DESCRIPTION, COST]),
            allowed_archetypes,
            prerequisites: list_section(block, PREREQUISITES),
            opposites: list_section(block, OPPOSITES),
        })
    }
}
