//! Diagnostic accumulation -- squawks, warnings, and the fatal error type.
//!
//! Three severities with distinct policies: a fatal error aborts construction
//! immediately (propagated as [`FatalError`] through `Result`), a squawk is
//! counted and collected so the user sees every problem in one run, and a
//! warning records a silently-applied default without blocking acceptance.

use serde::Serialize;
use thiserror::Error;

/// A non-recoverable construction failure. No partial configuration is
/// returned once one of these is raised; the top-level driver turns it into
/// a nonzero process exit.
#[derive(Debug, Error)]
pub enum FatalError {
    /// Keyword not present in the descriptor table for the open record kind.
    #[error("unknown keyword '{keyword}' in {kind} context")]
    UnknownKeyword { kind: &'static str, keyword: String },

    /// The grammar engine delivered a payload of the wrong shape.
    #[error("keyword '{keyword}': expected {expected}, got {got}")]
    TypeMismatch {
        keyword: String,
        expected: &'static str,
        got: &'static str,
    },

    /// A structural numeric invariant the algorithm cannot recover from.
    #[error("keyword '{keyword}': value {value} must be {requirement}")]
    GuardViolation {
        keyword: String,
        value: f64,
        requirement: &'static str,
    },

    /// A literal-valued keyword received a string outside its closed set.
    #[error("keyword '{keyword}': unrecognized literal '{literal}'")]
    UnknownLiteral { keyword: String, literal: String },

    /// `begin_group` for a kind that already has an open record.
    #[error("begin_group: a {kind} record is already under construction")]
    GroupReentered { kind: &'static str },

    /// `set_field`/`end_group` addressed a kind with no open record.
    #[error("{op}: no open {kind} record")]
    NoOpenGroup {
        op: &'static str,
        kind: &'static str,
    },

    /// The event stream itself could not be understood.
    #[error("malformed event stream: {0}")]
    MalformedStream(String),
}

/// Severity of an accumulated diagnostic. Fatal failures never reach the
/// accumulator -- they abort construction as [`FatalError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Value-level inconsistency; counted, rejects the deck at end of
    /// validation.
    Recoverable,
    /// A default substitution was applied; reported for transparency only.
    Advisory,
}

/// One accumulated diagnostic message.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Accept/reject decision made once, after every record has been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Accepted,
    Rejected { squawks: usize },
}

/// Collector for recoverable ("squawk") and advisory ("warn") diagnostics.
#[derive(Debug, Default)]
pub struct DiagSink {
    diagnostics: Vec<Diagnostic>,
    squawks: usize,
}

impl DiagSink {
    pub fn new() -> Self {
        DiagSink::default()
    }

    /// Record a recoverable diagnostic and bump the rejection counter.
    pub fn squawk(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Recoverable,
            message: message.into(),
        });
        self.squawks += 1;
    }

    /// Record an advisory diagnostic; never blocks acceptance.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Advisory,
            message: message.into(),
        });
    }

    pub fn squawk_count(&self) -> usize {
        self.squawks
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The single abort/continue decision: rejected iff any squawk was
    /// recorded over the whole deck.
    pub fn verdict(&self) -> Verdict {
        if self.squawks == 0 {
            Verdict::Accepted
        } else {
            Verdict::Rejected {
                squawks: self.squawks,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sink_accepts() {
        let sink = DiagSink::new();
        assert_eq!(sink.verdict(), Verdict::Accepted);
        assert_eq!(sink.squawk_count(), 0);
    }

    #[test]
    fn squawks_reject_warnings_do_not() {
        let mut sink = DiagSink::new();
        sink.warn("initial point clamped");
        assert_eq!(sink.verdict(), Verdict::Accepted);

        sink.squawk("lower bound exceeds upper bound");
        sink.squawk("duplicate set value");
        assert_eq!(sink.verdict(), Verdict::Rejected { squawks: 2 });
        assert_eq!(sink.diagnostics().len(), 3);
    }

    #[test]
    fn severities_are_preserved_in_order() {
        let mut sink = DiagSink::new();
        sink.squawk("first");
        sink.warn("second");
        let diags = sink.diagnostics();
        assert_eq!(diags[0].severity, Severity::Recoverable);
        assert_eq!(diags[1].severity, Severity::Advisory);
        assert_eq!(diags[1].message, "second");
    }
}
