use cwscript_core::types::{Block, Combinator, Condition, Property, Scalar};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entity::{invalid, loose_scalars, ScriptEntity};
use crate::error::ModError;
use crate::kind::{Authority, Ethic};

const NAME: &str = "name";
const DESCRIPTION: &str = "description";
const CORPORATE: &str = "corporate";
const HAS_ETHIC: &str = "has_ethic";
const AUTHORITY: &str = "authority";
const HAS_CIVIC: &str = "has_civic";

/// A government civic.
///
/// Requirements render as combinator blocks:
///
/// ```text
/// civic_example = {
///     name = "Example"
///     OR = { has_ethic = ethic_materialist }
///     OR = { authority = auth_democratic }
///     AND = { has_civic = civic_technocracy }
///     NOR = { has_civic = civic_fanatic_purifiers }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Civic {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub corporate: bool,
    /// Any one of these ethics qualifies.
    #[serde(default)]
    pub required_ethics: Vec<Ethic>,
    /// Any one of these authorities qualifies.
    #[serde(default)]
    pub required_authorities: Vec<Authority>,
    #[serde(default)]
    pub modifiers: IndexMap<String, Scalar>,
    /// All of these civics must be taken.
    #[serde(default)]
    pub required_civics: Vec<String>,
    /// None of these civics may be taken.
    #[serde(default)]
    pub excluded_civics: Vec<String>,
}

impl Civic {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_modifier(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.modifiers.insert(key.into(), value.into());
        self
    }
}

fn requirement<I, S>(combinator: Combinator, key: &str, ids: I) -> Condition
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter().fold(Condition::assigned(combinator), |c, id| {
        c.with(Property::new(key, Scalar::identifier(id.as_ref())))
    })
}

impl ScriptEntity for Civic {
    const KIND: &'static str = "civic";

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
        if self.corporate {
            block.push(Property::new(CORPORATE, Scalar::yes_no(true)));
        }
        if !self.required_ethics.is_empty() {
            let ids = self.required_ethics.iter().map(|e| e.as_script());
            block.push(requirement(Combinator::Or, HAS_ETHIC, ids));
        }
        if !self.required_authorities.is_empty() {
            let ids = self.required_authorities.iter().map(|a| a.as_script());
            block.push(requirement(Combinator::Or, AUTHORITY, ids));
        }
        for (key, value) in &self.modifiers {
            block.push(Property::new(key.as_str(), value.clone()));
        }
        if !self.required_civics.is_empty() {
            block.push(requirement(Combinator::And, HAS_CIVIC, &self.required_civics));
        }
        if !self.excluded_civics.is_empty() {
            block.push(requirement(Combinator::Nor, HAS_CIVIC, &self.excluded_civics));
        }
        block
    }

    fn from_block(id: &str, block: &Block) -> Result<Self, ModError> {
        let mut civic = Civic::new(id);
        civic.name = block.scalar(NAME).map(|s| s.text().into_owned());
        civic.description = block.scalar(DESCRIPTION).map(|s| s.text().into_owned());
        if let Some(flag) = block.scalar(CORPORATE) {
            civic.corporate = flag.as_bool().ok_or_else(|| {
                invalid::<Self>(id, format!("corporate must be yes or no, got {flag}"))
            })?;
        }
        civic.modifiers = loose_scalars(block, &[NAME, DESCRIPTION, CORPORATE]);

        for condition in block.conditions() {
            match condition.combinator {
                Combinator::Or => {
                    for ethic in condition.scalars_for(HAS_ETHIC) {
                        let ethic = ethic.text().parse().map_err(|e| invalid::<Self>(id, e))?;
                        civic.required_ethics.push(ethic);
                    }
                    for authority in condition.scalars_for(AUTHORITY) {
                        let authority = authority
                            .text()
                            .parse()
                            .map_err(|e| invalid::<Self>(id, e))?;
                        civic.required_authorities.push(authority);
                    }
                }
                Combinator::And => civic.required_civics.extend(
                    condition.scalars_for(HAS_CIVIC).map(|s| s.text().into_owned()),
                ),
                Combinator::Nor => civic.excluded_civics.extend(
                    condition.scalars_for(HAS_CIVIC).map(|s| s.text().into_owned()),
                ),
                Combinator::Not => {}
            }
        }
        Ok(civic)
    }
}
