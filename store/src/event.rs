//! Event sink trait.

use crate::StoreError;
use fungible_types::EventRecord;

/// Durable, append-only record of emitted ledger events.
///
/// Implementations must preserve append order and reject a record whose
/// `seq` is not exactly `event_count()`.
pub trait EventLogStore {
    fn append_event(&self, record: &EventRecord) -> Result<(), StoreError>;

    fn event_count(&self) -> Result<u64, StoreError>;

    /// Records with `seq >= from`, in order.
    fn iter_events_from(&self, from: u64) -> Result<Vec<EventRecord>, StoreError>;
}
