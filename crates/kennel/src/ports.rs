//! Capabilities the GraphQL layer requires from the outside world.

use crate::store::{
    Record,
    RecordStore,
};
use std::sync::Arc;

/// Read-only access to the records served by the API.
///
/// Implementations must be immutable after construction: the resolvers read
/// them concurrently from every request task.
pub trait RecordSource: Send + Sync {
    /// All records in their stable order.
    fn records(&self) -> &[Record];
}

impl RecordSource for RecordStore {
    fn records(&self) -> &[Record] {
        RecordStore::records(self)
    }
}

impl<T> RecordSource for Arc<T>
where
    T: RecordSource + ?Sized,
{
    fn records(&self) -> &[Record] {
        self.as_ref().records()
    }
}
