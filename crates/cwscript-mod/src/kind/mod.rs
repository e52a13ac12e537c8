//! Closed sets of game identifiers used by entities.

mod archetype;
mod authority;
mod ethic;

pub use archetype::SpeciesArchetype;
pub use authority::Authority;
pub use ethic::Ethic;
