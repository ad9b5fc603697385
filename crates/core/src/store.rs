//! Record store -- ordered, append-only collection of finalized records.
//!
//! Populated while the deck is parsed, mutated once more by the defaulting
//! passes, then frozen. The read accessors are only valid on a frozen store;
//! reading earlier is a programming error in the caller and panics.

use crate::records::{
    InterfaceSpec, MethodSpec, ModelSpec, Record, RecordKind, ResponsesSpec, StrategySpec,
    VariablesSpec,
};
use serde::Serialize;

#[derive(Debug, Default, Serialize)]
pub struct RecordStore {
    records: Vec<Record>,
    #[serde(skip)]
    frozen: bool,
}

impl RecordStore {
    pub(crate) fn push(&mut self, record: Record) {
        debug_assert!(!self.frozen, "record store frozen");
        self.records.push(record);
    }

    /// Mutable access for the defaulting passes, before freeze.
    pub(crate) fn records_mut(&mut self) -> &mut [Record] {
        debug_assert!(!self.frozen, "record store frozen");
        &mut self.records
    }

    pub(crate) fn freeze(&mut self) {
        self.frozen = true;
    }

    fn assert_frozen(&self) {
        assert!(
            self.frozen,
            "record store read before defaulting completed"
        );
    }

    /// All finalized records, in input order.
    pub fn records(&self) -> &[Record] {
        self.assert_frozen();
        &self.records
    }

    pub fn count_of(&self, kind: RecordKind) -> usize {
        self.assert_frozen();
        self.records.iter().filter(|r| r.kind() == kind).count()
    }

    pub fn variables(&self) -> impl Iterator<Item = &VariablesSpec> {
        self.records().iter().filter_map(|r| match r {
            Record::Variables(v) => Some(v),
            _ => None,
        })
    }

    pub fn responses(&self) -> impl Iterator<Item = &ResponsesSpec> {
        self.records().iter().filter_map(|r| match r {
            Record::Responses(v) => Some(v),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodSpec> {
        self.records().iter().filter_map(|r| match r {
            Record::Method(v) => Some(v),
            _ => None,
        })
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceSpec> {
        self.records().iter().filter_map(|r| match r {
            Record::Interface(v) => Some(v),
            _ => None,
        })
    }

    pub fn models(&self) -> impl Iterator<Item = &ModelSpec> {
        self.records().iter().filter_map(|r| match r {
            Record::Model(v) => Some(v),
            _ => None,
        })
    }

    pub fn strategies(&self) -> impl Iterator<Item = &StrategySpec> {
        self.records().iter().filter_map(|r| match r {
            Record::Strategy(v) => Some(v),
            _ => None,
        })
    }
}
