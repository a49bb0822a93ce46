// linkshelf shared type definitions
// Each submodule defines plain records used across the crate.

pub mod backup;
pub mod errors;
pub mod group;
pub mod link;
pub mod settings;
