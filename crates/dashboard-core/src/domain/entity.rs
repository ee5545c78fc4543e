//! Domain Layer - Core Record Trait
//!
//! Every item held by a record store is identified by a server-assigned id.

/// Core trait for all dashboard records
pub trait Record: Sized + Send + Sync + Clone {
    /// The type of the record's unique identifier
    type Id: Clone + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync;

    /// Returns the record's unique identifier
    fn id(&self) -> Self::Id;
}

/// Records whose fields can be changed through a detail editor
pub trait Editable: Record {
    /// One field assignment
    type Edit;

    /// Applies a single field edit in place
    fn apply_edit(&mut self, edit: Self::Edit);
}
