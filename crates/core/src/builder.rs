//! Deck builder -- record context stack and keyword dispatch bridge.
//!
//! The builder is the single entry point for the grammar engine's events:
//! `begin_group` pushes a zero-initialized record, `set_field` routes a typed
//! payload through the kind's descriptor table into the top-of-stack record
//! of that kind, and `end_group` runs kind-local checks and moves the record
//! into the store. `finish` runs the defaulting engines over the whole store
//! and hands back the frozen configuration.
//!
//! There is deliberately no process-wide instance: callers own a builder and
//! pass it through the pipeline.

use crate::descriptors::{self, find, FieldDesc};
use crate::diag::{DiagSink, Diagnostic, FatalError, Verdict};
use crate::events::DeckEvent;
use crate::records::{Record, RecordKind};
use crate::respcheck;
use crate::store::RecordStore;
use crate::value::Value;
use crate::varcheck;
use crate::vargen;
use serde::Serialize;

/// The validated, defaulted, frozen configuration.
#[derive(Debug, Serialize)]
pub struct Config {
    #[serde(flatten)]
    store: RecordStore,
    diagnostics: Vec<Diagnostic>,
    verdict: Verdict,
}

impl Config {
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }

    /// Serialize to the interchange JSON shape consumed downstream.
    pub fn to_json_value(&self) -> serde_json::Value {
        // Plain owned data with string keys; serialization cannot fail.
        serde_json::to_value(self).expect("configuration serializes")
    }
}

/// Record context stack plus the accumulating store and diagnostics.
#[derive(Default)]
pub struct DeckBuilder {
    open: Vec<Record>,
    store: RecordStore,
    diags: DiagSink,
}

impl DeckBuilder {
    pub fn new() -> Self {
        DeckBuilder::default()
    }

    /// Push a zero-initialized record of `kind`. At most one record per kind
    /// may be under construction at a time; sibling kinds nest freely.
    pub fn begin_group(&mut self, kind: RecordKind) -> Result<(), FatalError> {
        if self.open.iter().any(|r| r.kind() == kind) {
            return Err(FatalError::GroupReentered { kind: kind.name() });
        }
        self.open.push(Record::empty(kind));
        Ok(())
    }

    /// Route one keyword assignment to the open record of `kind`.
    pub fn set_field(
        &mut self,
        kind: RecordKind,
        keyword: &str,
        value: &Value,
    ) -> Result<(), FatalError> {
        let record = self
            .open
            .iter_mut()
            .rev()
            .find(|r| r.kind() == kind)
            .ok_or(FatalError::NoOpenGroup {
                op: "set_field",
                kind: kind.name(),
            })?;
        match record {
            Record::Variables(v) => apply(descriptors::VARIABLES, v, kind, keyword, value),
            Record::Responses(r) => apply(descriptors::RESPONSES, r, kind, keyword, value),
            Record::Method(m) => apply(descriptors::METHOD, m, kind, keyword, value),
            Record::Interface(i) => apply(descriptors::INTERFACE, i, kind, keyword, value),
            Record::Model(m) => apply(descriptors::MODEL, m, kind, keyword, value),
            Record::Strategy(s) => apply(descriptors::STRATEGY, s, kind, keyword, value),
        }
    }

    /// Close the open record of `kind`: run kind-local checks, then move it
    /// into the store.
    pub fn end_group(&mut self, kind: RecordKind) -> Result<(), FatalError> {
        let pos = self
            .open
            .iter()
            .rposition(|r| r.kind() == kind)
            .ok_or(FatalError::NoOpenGroup {
                op: "end_group",
                kind: kind.name(),
            })?;
        let mut record = self.open.remove(pos);
        self.local_checks(&mut record);
        self.store.push(record);
        Ok(())
    }

    /// Apply one event from the grammar engine.
    pub fn apply_event(&mut self, event: &DeckEvent) -> Result<(), FatalError> {
        match event {
            DeckEvent::BeginGroup { kind } => self.begin_group(*kind),
            DeckEvent::SetField {
                kind,
                keyword,
                value,
            } => self.set_field(*kind, keyword, value),
            DeckEvent::EndGroup { kind } => self.end_group(*kind),
        }
    }

    /// Run the variable and response defaulting engines over the whole
    /// store, freeze it, and return the configuration with its verdict.
    pub fn finish(mut self) -> Result<Config, FatalError> {
        if let Some(record) = self.open.last() {
            return Err(FatalError::MalformedStream(format!(
                "input ended with an unterminated {} group",
                record.kind().name()
            )));
        }

        // Pass A: bound generation for every variables record.
        for record in self.store.records_mut() {
            if let Record::Variables(v) = record {
                vargen::generate(v, &mut self.diags);
            }
        }
        // Pass B: validation and label synthesis.
        for record in self.store.records_mut() {
            if let Record::Variables(v) = record {
                varcheck::validate(v, &mut self.diags);
            }
        }
        // Response defaulting.
        for record in self.store.records_mut() {
            if let Record::Responses(r) = record {
                respcheck::validate(r, &mut self.diags);
            }
        }

        self.store.freeze();
        let verdict = self.diags.verdict();
        Ok(Config {
            store: self.store,
            diagnostics: self.diags.diagnostics().to_vec(),
            verdict,
        })
    }

    /// Checks local to a record, run at group close. Value-level problems
    /// squawk; cross-record and vector-level work waits for the defaulting
    /// passes.
    fn local_checks(&mut self, record: &mut Record) {
        match record {
            Record::Variables(v) => {
                if v.total_count() == 0 {
                    self.diags
                        .squawk("variables group declares no variables of any category");
                }
            }
            Record::Responses(r) => {
                if r.total_functions() == 0 {
                    self.diags
                        .squawk("responses group declares no response functions");
                }
                if r.num_response_functions > 0
                    && (r.num_objectives > 0 || r.num_least_squares_terms > 0)
                {
                    self.diags.squawk(
                        "num_response_functions may not be combined with objective or \
                         least-squares counts",
                    );
                }
            }
            Record::Method(m) => {
                if m.method_name.is_empty() {
                    self.diags.squawk("method group selects no method");
                }
            }
            Record::Interface(i) => {
                if i.analysis_drivers.is_empty() {
                    self.diags
                        .squawk("interface group declares no analysis_drivers");
                }
            }
            Record::Model(m) => {
                if m.model_type.is_empty() {
                    m.model_type = "single".to_owned();
                }
            }
            Record::Strategy(s) => {
                if s.strategy_type.is_empty() {
                    s.strategy_type = "single_method".to_owned();
                }
            }
        }
    }
}

fn apply<T>(
    table: &[FieldDesc<T>],
    target: &mut T,
    kind: RecordKind,
    keyword: &str,
    value: &Value,
) -> Result<(), FatalError> {
    match find(table, keyword) {
        Some(entry) => entry.dispatch(target, value),
        None => Err(FatalError::UnknownKeyword {
            kind: kind.name(),
            keyword: keyword.to_owned(),
        }),
    }
}

/// Run the whole pipeline: every event in order, then the defaulting passes.
pub fn process_events<'a, I>(events: I) -> Result<Config, FatalError>
where
    I: IntoIterator<Item = &'a DeckEvent>,
{
    let mut builder = DeckBuilder::new();
    for event in events {
        builder.apply_event(event)?;
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_groups_build_concurrently() {
        let mut b = DeckBuilder::new();
        b.begin_group(RecordKind::Variables).unwrap();
        b.begin_group(RecordKind::Responses).unwrap();
        b.set_field(
            RecordKind::Variables,
            "continuous_design",
            &Value::Int(2),
        )
        .unwrap();
        b.set_field(
            RecordKind::Responses,
            "num_objective_functions",
            &Value::Int(1),
        )
        .unwrap();
        b.end_group(RecordKind::Responses).unwrap();
        b.end_group(RecordKind::Variables).unwrap();

        let config = b.finish().unwrap();
        assert_eq!(config.store().variables().count(), 1);
        assert_eq!(config.store().responses().count(), 1);
    }

    #[test]
    fn reentrant_group_is_fatal() {
        let mut b = DeckBuilder::new();
        b.begin_group(RecordKind::Method).unwrap();
        let err = b.begin_group(RecordKind::Method).unwrap_err();
        assert!(matches!(err, FatalError::GroupReentered { .. }));
    }

    #[test]
    fn field_outside_group_is_fatal() {
        let mut b = DeckBuilder::new();
        let err = b
            .set_field(RecordKind::Method, "seed", &Value::Int(1))
            .unwrap_err();
        assert!(matches!(err, FatalError::NoOpenGroup { .. }));
    }

    #[test]
    fn unknown_keyword_is_fatal() {
        let mut b = DeckBuilder::new();
        b.begin_group(RecordKind::Method).unwrap();
        let err = b
            .set_field(RecordKind::Method, "no_such_control", &Value::Int(1))
            .unwrap_err();
        assert!(matches!(err, FatalError::UnknownKeyword { .. }));
    }

    #[test]
    fn unterminated_group_is_fatal() {
        let mut b = DeckBuilder::new();
        b.begin_group(RecordKind::Variables).unwrap();
        let err = b.finish().unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn empty_method_group_squawks() {
        let mut b = DeckBuilder::new();
        b.begin_group(RecordKind::Method).unwrap();
        b.end_group(RecordKind::Method).unwrap();
        let config = b.finish().unwrap();
        assert!(!config.is_accepted());
    }
}
