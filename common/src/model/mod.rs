pub mod feedback;
pub mod newsletter;
pub mod story;
pub mod student;

/// A record that can live in a [`crate::store::RecordStore`].
///
/// The id must be stable for the lifetime of the record: selection sets and
/// the detail controller hold ids, never references.
pub trait Record {
    type Id: Clone + Eq + Ord + std::hash::Hash + std::fmt::Debug;

    fn id(&self) -> Self::Id;
}
