//! optdeck-core: keyword-deck record builder and validation core.
//!
//! Turns the typed keyword-event stream produced by an external grammar
//! engine into fully-defaulted, fully-validated configuration records:
//! variables, responses, method, interface, model, and strategy.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`process_events()`] -- run the full build-default-validate pipeline
//! - [`DeckBuilder`] -- incremental event consumption (the same pipeline,
//!   one event at a time)
//! - [`Config`] -- the frozen result: record store, diagnostics, verdict
//! - [`FatalError`] -- non-recoverable construction failure
//! - Record types: [`Record`], [`RecordKind`], and the per-kind structs in
//!   [`records`]
//!
//! The pipeline is synchronous and single-owner: one builder consumes the
//! whole deck, and the returned [`Config`] is immutable afterwards.

pub mod builder;
pub mod descriptors;
pub mod diag;
pub mod events;
pub mod moments;
pub mod records;
pub mod respcheck;
pub mod store;
pub mod value;
pub mod varcheck;
pub mod vargen;

/// Version of the deck-event JSON interchange format.
pub const EVENT_FORMAT_VERSION: &str = "1.0";

// ── Convenience re-exports: key types ────────────────────────────────

pub use builder::{process_events, Config, DeckBuilder};
pub use diag::{DiagSink, Diagnostic, FatalError, Severity, Verdict};
pub use events::DeckEvent;
pub use records::{Record, RecordKind};
pub use store::RecordStore;
pub use value::Value;
