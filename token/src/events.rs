//! Append-only event log and per-call receipts.

use fungible_types::{AccountId, EventRecord, TokenEvent};

/// Ordered record of every event the ledger has emitted.
///
/// Sequence numbers start at zero and have no gaps, so a record's `seq` is
/// also its index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `events` in order, returning the records created for them.
    pub(crate) fn append(&mut self, events: Vec<TokenEvent>) -> Vec<EventRecord> {
        let first = self.records.len();
        for event in events {
            let seq = self.records.len() as u64;
            self.records.push(EventRecord { seq, event });
        }
        self.records[first..].to_vec()
    }

    pub fn entries(&self) -> &[EventRecord] {
        &self.records
    }

    /// Records with `seq >= from`.
    pub fn since(&self, from: u64) -> &[EventRecord] {
        let start = usize::try_from(from).map_or(self.records.len(), |i| i.min(self.records.len()));
        &self.records[start..]
    }

    /// Transfer events that move tokens into or out of `account`.
    pub fn transfers_of<'a>(&'a self, account: &'a AccountId) -> impl Iterator<Item = &'a EventRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| matches!(r.event, TokenEvent::Transfer { .. }) && r.event.involves(account))
    }

    pub fn next_seq(&self) -> u64 {
        self.records.len() as u64
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rebuild from persisted records, which must be gapless from zero.
    pub(crate) fn restore(records: Vec<EventRecord>) -> Option<Self> {
        let gapless = records
            .iter()
            .enumerate()
            .all(|(i, r)| r.seq == i as u64);
        gapless.then_some(Self { records })
    }
}

/// What a successful ledger call hands back: the success flag and the events
/// it emitted, already sequenced in the ledger's log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct Receipt {
    pub success: bool,
    pub events: Vec<EventRecord>,
}

impl Receipt {
    pub(crate) fn new(events: Vec<EventRecord>) -> Self {
        Self {
            success: true,
            events,
        }
    }

    /// The emitted events without their sequence numbers.
    pub fn emitted(&self) -> Vec<&TokenEvent> {
        self.events.iter().map(|r| &r.event).collect()
    }

    /// The single event of a one-event call.
    pub fn event(&self) -> Option<&TokenEvent> {
        match self.events.as_slice() {
            [only] => Some(&only.event),
            _ => None,
        }
    }
}
