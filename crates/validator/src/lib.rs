//! Rule-driven validation for submitted form fields.
//!
//! Rules are declared per field as a pipe-separated string
//! (`"required|email|unique:users,email"`), parsed into explicit [`Rule`]
//! variants and evaluated in declaration order. Every rule for a field runs
//! even after an earlier one failed, so the caller gets the complete list of
//! problems in one pass. The uniqueness rule consults an injected
//! [`UniqueSource`] rather than a global connection, which is what lets the
//! HTTP layer hand in a test double.

use async_trait::async_trait;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub mod error;
pub mod rules;

pub use error::ValidatorError;
pub use rules::Rule;

/// Practical email syntax check (the WHATWG HTML5 input pattern).
static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("invalid email pattern")
    })
}

/// Answers uniqueness lookups for [`Rule::Unique`].
///
/// The match is a case-sensitive exact comparison against the named column.
#[async_trait]
pub trait UniqueSource: Send + Sync {
    async fn exists(&self, table: &str, column: &str, value: &str) -> anyhow::Result<bool>;
}

/// The outcome of a validation run: either clean, or a field-keyed list of
/// human-readable messages in the order the rules were declared.
#[derive(Debug, Default)]
pub struct Validation {
    errors: BTreeMap<String, Vec<String>>,
}

impl Validation {
    pub fn fails(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    pub fn into_errors(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }

    fn push(&mut self, field: &str, message: String) {
        self.errors.entry(field.to_string()).or_default().push(message);
    }
}

/// Validates `data` against per-field rule strings.
///
/// Returns `Err` only when a uniqueness lookup itself fails; validation
/// failures are reported through the returned [`Validation`].
pub async fn validate(
    data: &Map<String, Value>,
    rules: &[(&str, &str)],
    source: &dyn UniqueSource,
) -> Result<Validation, ValidatorError> {
    let mut outcome = Validation::default();

    for &(field, spec) in rules {
        let value = field_value(data, field);

        for rule in Rule::parse_list(spec) {
            match rule {
                Rule::Required => {
                    if value.trim().is_empty() {
                        outcome.push(field, format!("Field '{field}' is required."));
                    }
                }
                Rule::Email => {
                    if !email_pattern().is_match(value) {
                        outcome.push(field, format!("Field '{field}' must be a valid email."));
                    }
                }
                Rule::Unique { table, column } => {
                    let taken = source.exists(&table, &column, value).await.map_err(|e| {
                        ValidatorError::UniqueLookup {
                            table,
                            column,
                            source: e,
                        }
                    })?;
                    if taken {
                        outcome.push(field, format!("Field '{field}' must be unique."));
                    }
                }
            }
        }
    }

    Ok(outcome)
}

/// A missing field, or one submitted as anything but a string, validates as
/// the empty string.
fn field_value<'a>(data: &'a Map<String, Value>, field: &str) -> &'a str {
    data.get(field).and_then(Value::as_str).unwrap_or("")
}
