//! Mod files on disk and the game entities written into them.
//!
//! A [`ModWorkspace`] holds script documents and localisation tables keyed
//! by their path inside the mod. Entities such as [`Civic`] and
//! [`SpeciesTrait`] map to and from definition blocks through
//! [`ScriptEntity`].

pub mod category;
pub mod civic;
pub mod entity;
pub mod error;
pub mod kind;
pub mod layout;
pub mod localisation;
pub mod species_trait;
pub mod workspace;

pub use civic::Civic;
pub use entity::{definitions, read_all, ScriptEntity};
pub use error::ModError;
pub use kind::{Authority, Ethic, SpeciesArchetype};
pub use layout::ModLayout;
pub use localisation::Localisation;
pub use species_trait::SpeciesTrait;
pub use workspace::{ModWorkspace, MAX_TAGS};
