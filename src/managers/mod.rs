// linkshelf state managers
// Managers own mutable state: the link/group collection and the current selection.

pub mod collection_store;
pub mod selection;
