//! Separator-based single-line formatter.
//!
//! One record per line: values joined by the field separator in field
//! order (names are positional, never rendered), container elements joined
//! by the set separator, empty containers marked with a placeholder.
//! Control bytes, backslashes and separator occurrences inside text values
//! are hex-escaped on output; input is not unescaped, so strings that
//! round-trip must stay free of those bytes.

use std::sync::Arc;

use threadlog_api::desc::Desc;
use threadlog_api::error::FormatError;
use threadlog_api::field::Field;
use threadlog_api::format::Formatter;
use threadlog_api::reporter::Reporter;
use threadlog_api::value::{TypeTag, Value};

mod parser;
mod serializer;

// ════════════════════════════════════════════════════════════════
//  Configuration
// ════════════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("separator must not be empty")]
    EmptySeparator,
    #[error("field and set separators must differ")]
    SeparatorClash,
    #[error("empty-container marker must not be empty")]
    EmptyMarker,
}

/// Separators and markers for one plaintext formatter instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorConfig {
    /// Between values of one record.
    pub field_sep: String,
    /// Between elements of a set or vector.
    pub set_sep: String,
    /// Stands in for a container with no elements.
    pub empty_field: String,
}

impl Default for SeparatorConfig {
    fn default() -> Self {
        Self {
            field_sep: "\t".to_string(),
            set_sep: ",".to_string(),
            empty_field: "(empty)".to_string(),
        }
    }
}

impl SeparatorConfig {
    /// Validate a configuration before binding it to a formatter.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.field_sep.is_empty() || self.set_sep.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }
        if self.field_sep == self.set_sep {
            return Err(ConfigError::SeparatorClash);
        }
        if self.empty_field.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        Ok(self)
    }
}

// ════════════════════════════════════════════════════════════════
//  Formatter
// ════════════════════════════════════════════════════════════════

/// Plaintext [`Formatter`]. One instance per owning worker thread; holds
/// only the separator config and that thread's reporter.
pub struct PlainTextFormatter {
    config: SeparatorConfig,
    reporter: Arc<dyn Reporter>,
}

impl PlainTextFormatter {
    pub fn new(config: SeparatorConfig, reporter: Arc<dyn Reporter>) -> Self {
        Self { config, reporter }
    }

    /// Field-vs-value tag agreement, including container element subtypes.
    fn check_tags(&self, field: &Field, val: &Value) -> bool {
        if val.tag() != field.tag {
            self.reporter.report(&FormatError::TagMismatch {
                field: field.name.clone(),
                declared: field.tag,
                actual: val.tag(),
            });
            return false;
        }

        let elements = match val {
            Value::Set(elems) | Value::Vector(elems) => elems,
            _ => return true,
        };
        let Some(subtype) = field.subtype else {
            self.reporter.report(&FormatError::UnsupportedType {
                field: field.name.clone(),
                tag: field.tag,
            });
            return false;
        };
        for elem in elements {
            if elem.tag() != subtype {
                self.reporter.report(&FormatError::SubtypeMismatch {
                    field: field.name.clone(),
                    expected: subtype,
                    actual: elem.tag(),
                });
                return false;
            }
        }
        true
    }
}

impl Formatter for PlainTextFormatter {
    /// On arity mismatch the buffer is untouched; on a tag failure
    /// mid-record it keeps the fields already rendered (partial line).
    fn describe(&self, desc: &mut dyn Desc, fields: &[Field], vals: &[Value]) -> bool {
        if fields.len() != vals.len() {
            self.reporter.report(&FormatError::ArityMismatch {
                expected: fields.len(),
                got: vals.len(),
            });
            return false;
        }

        for (i, (field, val)) in fields.iter().zip(vals).enumerate() {
            if i > 0 {
                desc.append(&self.config.field_sep);
            }
            if !self.check_tags(field, val) {
                return false;
            }
            desc.append(&serializer::render_value(val, &self.config));
        }
        true
    }

    fn describe_value(&self, desc: &mut dyn Desc, val: &Value, _name: Option<&str>) -> bool {
        desc.append(&serializer::render_value(val, &self.config));
        true
    }

    fn parse_value(
        &self,
        text: &str,
        name: &str,
        tag: TypeTag,
        subtype: Option<TypeTag>,
    ) -> Option<Value> {
        parser::parse_value(&self.config, self.reporter.as_ref(), text, name, tag, subtype)
    }
}
