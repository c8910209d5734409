//! JSON record formatter: one object per record, keyed by field name.
//!
//! Rendering goes through a `serde_json::Value` tree first and appends a
//! single serialized string at the end, so a failed describe leaves the
//! buffer untouched. Parsing is not implemented by this format — log
//! input rides the plaintext representation — so `parse_value` reports
//! and declines.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use threadlog_api::desc::Desc;
use threadlog_api::error::FormatError;
use threadlog_api::field::Field;
use threadlog_api::format::Formatter;
use threadlog_api::render::{render_addr, render_double, render_proto, render_subnet};
use threadlog_api::reporter::Reporter;
use threadlog_api::value::{TypeTag, Value};

// ════════════════════════════════════════════════════════════════
//  Configuration
// ════════════════════════════════════════════════════════════════

/// Encoding of `Time` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum TimeFormat {
    /// Fractional seconds since the Unix epoch.
    #[default]
    EpochSeconds,
    /// Integer milliseconds since the Unix epoch.
    EpochMillis,
}

// ════════════════════════════════════════════════════════════════
//  Formatter
// ════════════════════════════════════════════════════════════════

/// JSON [`Formatter`]. One instance per owning worker thread.
pub struct JsonFormatter {
    time_format: TimeFormat,
    reporter: Arc<dyn Reporter>,
}

impl JsonFormatter {
    pub fn new(time_format: TimeFormat, reporter: Arc<dyn Reporter>) -> Self {
        Self { time_format, reporter }
    }

    /// Doubles are normalized through the shared fixed-precision rendering
    /// before becoming JSON numbers, so a value re-parsed from JSON equals
    /// the same value re-parsed from plaintext. Non-finite doubles have no
    /// JSON number form and become null.
    fn json_double(d: f64) -> serde_json::Value {
        let normalized: f64 = render_double(d).parse().unwrap_or(d);
        serde_json::Number::from_f64(normalized)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }

    fn json_time(&self, t: f64) -> serde_json::Value {
        match self.time_format {
            TimeFormat::EpochSeconds => Self::json_double(t),
            TimeFormat::EpochMillis => {
                let millis = (t * 1000.0).round();
                if millis.is_finite() {
                    json!(millis as i64)
                } else {
                    serde_json::Value::Null
                }
            }
        }
    }

    fn to_json(&self, val: &Value) -> serde_json::Value {
        match val {
            Value::Bool(b) => json!(b),
            Value::Int(n) => json!(n),
            Value::Count(n) => json!(n),
            Value::Double(d) | Value::Interval(d) => Self::json_double(*d),
            Value::Time(t) => self.json_time(*t),
            Value::String(s) | Value::Enum(s) => json!(s),
            Value::Port { number, proto } => json!({
                "port": number,
                "proto": render_proto(*proto),
            }),
            Value::Addr(addr) => json!(render_addr(addr)),
            Value::Subnet(subnet) => json!(render_subnet(subnet)),
            Value::Set(elems) | Value::Vector(elems) => {
                serde_json::Value::Array(elems.iter().map(|e| self.to_json(e)).collect())
            }
        }
    }

    /// Same agreement checks as every formatter: value tag against the
    /// field's declared tag, element tags against the declared subtype.
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

impl Formatter for JsonFormatter {
    /// The buffer is untouched on any failure: the object tree is built
    /// and checked in full before the single append.
    fn describe(&self, desc: &mut dyn Desc, fields: &[Field], vals: &[Value]) -> bool {
        if fields.len() != vals.len() {
            self.reporter.report(&FormatError::ArityMismatch {
                expected: fields.len(),
                got: vals.len(),
            });
            return false;
        }

        let mut record = serde_json::Map::with_capacity(fields.len());
        for (field, val) in fields.iter().zip(vals) {
            if !self.check_tags(field, val) {
                return false;
            }
            record.insert(field.name.clone(), self.to_json(val));
        }

        desc.append(&serde_json::Value::Object(record).to_string());
        true
    }

    fn describe_value(&self, desc: &mut dyn Desc, val: &Value, _name: Option<&str>) -> bool {
        desc.append(&self.to_json(val).to_string());
        true
    }

    fn parse_value(
        &self,
        _text: &str,
        name: &str,
        tag: TypeTag,
        _subtype: Option<TypeTag>,
    ) -> Option<Value> {
        self.reporter.report(&FormatError::UnsupportedType {
            field: name.to_string(),
            tag,
        });
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use threadlog_api::reporter::CollectingReporter;
    use threadlog_api::value::{Subnet, Transport};

    fn formatter(time_format: TimeFormat) -> (JsonFormatter, Arc<CollectingReporter>) {
        let reporter = Arc::new(CollectingReporter::new());
        (JsonFormatter::new(time_format, reporter.clone()), reporter)
    }

    #[test]
    fn record_is_one_object_keyed_by_field_name() {
        let (formatter, reporter) = formatter(TimeFormat::EpochSeconds);
        let fields = [
            Field::new("orig_h", TypeTag::Addr),
            Field::new("resp_p", TypeTag::Port),
            Field::with_subtype("tags", TypeTag::Set, TypeTag::String),
        ];
        let vals = [
            Value::Addr(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1))),
            Value::Port { number: 443, proto: Transport::Tcp },
            Value::Set(vec![Value::String("a".into()), Value::String("b".into())]),
        ];

        let mut buf = String::new();
        assert!(formatter.describe(&mut buf, &fields, &vals));
        assert!(reporter.is_empty());

        let parsed: serde_json::Value = serde_json::from_str(&buf).unwrap();
        assert_eq!(
            parsed,
            json!({
                "orig_h": "192.168.1.1",
                "resp_p": {"port": 443, "proto": "tcp"},
                "tags": ["a", "b"],
            })
        );
    }

    #[test]
    fn double_normalized_to_standard_precision() {
        let (formatter, _) = formatter(TimeFormat::EpochSeconds);
        let mut buf = String::new();
        assert!(formatter.describe_value(&mut buf, &Value::Double(3.14159), None));
        let parsed: serde_json::Value = serde_json::from_str(&buf).unwrap();
        assert_eq!(parsed.as_f64(), Some(3.14159));
    }

    #[test]
    fn non_finite_double_becomes_null() {
        let (formatter, _) = formatter(TimeFormat::EpochSeconds);
        let mut buf = String::new();
        assert!(formatter.describe_value(&mut buf, &Value::Double(f64::NAN), None));
        assert_eq!(buf, "null");
    }

    #[test]
    fn time_formats() {
        let (formatter_s, _) = formatter(TimeFormat::EpochSeconds);
        let mut buf = String::new();
        assert!(formatter_s.describe_value(&mut buf, &Value::Time(1.5), None));
        assert_eq!(buf, "1.5");

        let (formatter_ms, _) = formatter(TimeFormat::EpochMillis);
        let mut buf = String::new();
        assert!(formatter_ms.describe_value(&mut buf, &Value::Time(1.5), None));
        assert_eq!(buf, "1500");
    }

    #[test]
    fn subnet_rendered_with_shared_primitive() {
        let (formatter, _) = formatter(TimeFormat::EpochSeconds);
        let mut buf = String::new();
        let subnet = Value::Subnet(Subnet {
            prefix: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0)),
            length: 8,
        });
        assert!(formatter.describe_value(&mut buf, &subnet, None));
        assert_eq!(buf, "\"10.0.0.0/8\"");
    }

    #[test]
    fn string_escaping_is_json() {
        let (formatter, _) = formatter(TimeFormat::EpochSeconds);
        let mut buf = String::new();
        assert!(formatter.describe_value(
            &mut buf,
            &Value::String("tab\tand\"quote".into()),
            None
        ));
        let parsed: serde_json::Value = serde_json::from_str(&buf).unwrap();
        assert_eq!(parsed.as_str(), Some("tab\tand\"quote"));
    }

    #[test]
    fn arity_mismatch_leaves_buffer_untouched() {
        let (formatter, reporter) = formatter(TimeFormat::EpochSeconds);
        let fields = [
            Field::new("a", TypeTag::Count),
            Field::new("b", TypeTag::Count),
            Field::new("c", TypeTag::Count),
        ];
        let vals = [Value::Count(1), Value::Count(2)];

        let mut buf = String::new();
        assert!(!formatter.describe(&mut buf, &fields, &vals));
        assert!(buf.is_empty());
        assert_eq!(
            reporter.take(),
            vec![FormatError::ArityMismatch { expected: 3, got: 2 }]
        );
    }

    #[test]
    fn failed_describe_leaves_buffer_untouched() {
        let (formatter, reporter) = formatter(TimeFormat::EpochSeconds);
        let fields = [
            Field::new("good", TypeTag::Count),
            Field::new("bad", TypeTag::Int),
        ];
        let vals = [Value::Count(1), Value::String("oops".into())];

        let mut buf = String::new();
        assert!(!formatter.describe(&mut buf, &fields, &vals));
        assert!(buf.is_empty());
        assert!(matches!(reporter.take()[0], FormatError::TagMismatch { .. }));
    }

    #[test]
    fn parse_value_is_unsupported_and_reported() {
        let (formatter, reporter) = formatter(TimeFormat::EpochSeconds);
        assert_eq!(formatter.parse_value("42", "n", TypeTag::Count, None), None);
        assert_eq!(
            reporter.take(),
            vec![FormatError::UnsupportedType {
                field: "n".into(),
                tag: TypeTag::Count,
            }]
        );
    }
}
