//! Typed keyword payloads delivered by the external grammar engine.
//!
//! The grammar engine parses the deck text; by the time a value reaches this
//! crate it is already a scalar or a homogeneous vector. Integer payloads
//! widen to real where a real is expected, so a deck may write `3` where
//! `3.0` is meant.

use crate::diag::FatalError;
use serde::{Deserialize, Serialize};

/// A parsed keyword payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Bare keyword with no payload (e.g. `asynchronous`).
    Flag,
    Int(i64),
    Real(f64),
    Str(String),
    IntList(Vec<i64>),
    RealList(Vec<f64>),
    StrList(Vec<String>),
}

impl Value {
    /// Human-readable shape name for error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Value::Flag => "flag",
            Value::Int(_) => "integer",
            Value::Real(_) => "real",
            Value::Str(_) => "string",
            Value::IntList(_) => "integer list",
            Value::RealList(_) => "real list",
            Value::StrList(_) => "string list",
        }
    }

    fn mismatch(&self, keyword: &str, expected: &'static str) -> FatalError {
        FatalError::TypeMismatch {
            keyword: keyword.to_owned(),
            expected,
            got: self.shape(),
        }
    }

    pub fn as_int(&self, keyword: &str) -> Result<i64, FatalError> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(other.mismatch(keyword, "integer")),
        }
    }

    /// Accepts `Int` by widening.
    pub fn as_real(&self, keyword: &str) -> Result<f64, FatalError> {
        match self {
            Value::Real(x) => Ok(*x),
            Value::Int(n) => Ok(*n as f64),
            other => Err(other.mismatch(keyword, "real")),
        }
    }

    pub fn as_str(&self, keyword: &str) -> Result<&str, FatalError> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(other.mismatch(keyword, "string")),
        }
    }

    pub fn as_int_list(&self, keyword: &str) -> Result<Vec<i64>, FatalError> {
        match self {
            Value::IntList(v) => Ok(v.clone()),
            Value::Int(n) => Ok(vec![*n]),
            other => Err(other.mismatch(keyword, "integer list")),
        }
    }

    /// Accepts integer lists (and scalars) by widening each element.
    pub fn as_real_list(&self, keyword: &str) -> Result<Vec<f64>, FatalError> {
        match self {
            Value::RealList(v) => Ok(v.clone()),
            Value::IntList(v) => Ok(v.iter().map(|n| *n as f64).collect()),
            Value::Real(x) => Ok(vec![*x]),
            Value::Int(n) => Ok(vec![*n as f64]),
            other => Err(other.mismatch(keyword, "real list")),
        }
    }

    pub fn as_str_list(&self, keyword: &str) -> Result<Vec<String>, FatalError> {
        match self {
            Value::StrList(v) => Ok(v.clone()),
            Value::Str(s) => Ok(vec![s.clone()]),
            other => Err(other.mismatch(keyword, "string list")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_widens_to_real() {
        assert_eq!(Value::Int(3).as_real("kw").unwrap(), 3.0);
        assert_eq!(
            Value::IntList(vec![1, 2]).as_real_list("kw").unwrap(),
            vec![1.0, 2.0]
        );
    }

    #[test]
    fn scalar_promotes_to_single_element_list() {
        assert_eq!(Value::Real(2.5).as_real_list("kw").unwrap(), vec![2.5]);
        assert_eq!(
            Value::Str("x1".into()).as_str_list("kw").unwrap(),
            vec!["x1".to_string()]
        );
    }

    #[test]
    fn mismatch_names_keyword_and_shapes() {
        let err = Value::Str("abc".into()).as_real("convergence_tolerance");
        let msg = err.unwrap_err().to_string();
        assert!(msg.contains("convergence_tolerance"));
        assert!(msg.contains("real"));
        assert!(msg.contains("string"));
    }

    #[test]
    fn real_does_not_narrow_to_int() {
        assert!(Value::Real(2.5).as_int("samples").is_err());
    }
}
