//! Structural comparison of a loaded fixture against the expected value.
//!
//! Every mismatch is recorded with a path (`nested_dict.ages[1]`) so a
//! diff can be reported in full rather than stopping at the first one.
//! Sequence lengths must match exactly: no padding or truncation is
//! tolerated.

use serde::Serialize;

use crate::fixture::ragged_data;
use crate::value::FixtureValue;

/// What went wrong at a given location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MismatchKind {
    KindMismatch { expected: String, actual: String },
    ValueMismatch { expected: FixtureValue, actual: FixtureValue },
    LengthMismatch { expected: usize, actual: usize },
    MissingKey { key: String },
    UnexpectedKey { key: String },
}

/// Detailed diff entry for a single failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeFailure {
    pub path: String,
    #[serde(flatten)]
    pub mismatch: MismatchKind,
}

/// Outcome of comparing an actual value with the expected one.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDiff {
    pub failures: Vec<ShapeFailure>,
}

impl ShapeDiff {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "failures": self.failures })
    }
}

/// Compare `actual` against the canonical ragged fixture.
pub fn verify_fixture(actual: &FixtureValue) -> Result<(), ShapeDiff> {
    verify_against(&ragged_data(), actual)
}

/// Compare `actual` against an arbitrary expected value.
pub fn verify_against(expected: &FixtureValue, actual: &FixtureValue) -> Result<(), ShapeDiff> {
    let mut failures = Vec::new();
    compare(expected, actual, "", &mut failures);
    if failures.is_empty() {
        Ok(())
    } else {
        Err(ShapeDiff { failures })
    }
}

fn compare(
    expected: &FixtureValue,
    actual: &FixtureValue,
    path: &str,
    failures: &mut Vec<ShapeFailure>,
) {
    let mut fail = |mismatch| {
        failures.push(ShapeFailure {
            path: display_path(path),
            mismatch,
        })
    };

    match (expected, actual) {
        (FixtureValue::List(exp), FixtureValue::List(act)) => {
            if exp.len() != act.len() {
                fail(MismatchKind::LengthMismatch {
                    expected: exp.len(),
                    actual: act.len(),
                });
            }
            for (idx, (e, a)) in exp.iter().zip(act).enumerate() {
                compare(e, a, &format!("{path}[{idx}]"), failures);
            }
        }
        (FixtureValue::Map(exp), FixtureValue::Map(act)) => {
            for key in exp.keys().filter(|key| !act.contains_key(*key)) {
                fail(MismatchKind::MissingKey { key: key.clone() });
            }
            for key in act.keys().filter(|key| !exp.contains_key(*key)) {
                fail(MismatchKind::UnexpectedKey { key: key.clone() });
            }
            for (key, e) in exp {
                if let Some(a) = act.get(key) {
                    compare(e, a, &join_key(path, key), failures);
                }
            }
        }
        (e, a) if e.kind() != a.kind() => fail(MismatchKind::KindMismatch {
            expected: e.kind().to_string(),
            actual: a.kind().to_string(),
        }),
        (e, a) if e != a => fail(MismatchKind::ValueMismatch {
            expected: e.clone(),
            actual: a.clone(),
        }),
        _ => {}
    }
}

fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "$".to_string()
    } else {
        path.to_string()
    }
}
