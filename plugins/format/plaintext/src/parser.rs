//! Text → value, inverting the serializer's spellings. Numeric paths go
//! through the core primitives and therefore reject trailing garbage and
//! empty input; escapes are not unfolded (the output side's asymmetry).

use threadlog_api::error::FormatError;
use threadlog_api::parse::{parse_addr, parse_count, parse_double, parse_int, parse_proto, parse_subnet};
use threadlog_api::reporter::Reporter;
use threadlog_api::value::{TypeTag, Value};

use crate::SeparatorConfig;

pub(crate) fn parse_value(
    config: &SeparatorConfig,
    reporter: &dyn Reporter,
    text: &str,
    name: &str,
    tag: TypeTag,
    subtype: Option<TypeTag>,
) -> Option<Value> {
    match tag {
        TypeTag::Set | TypeTag::Vector => {
            parse_container(config, reporter, text, name, tag, subtype)
        }
        _ => parse_scalar(reporter, text, name, tag),
    }
}

fn malformed(name: &str, tag: TypeTag, text: &str) -> FormatError {
    FormatError::MalformedText {
        field: name.to_string(),
        tag,
        text: text.to_string(),
    }
}

fn parse_scalar(
    reporter: &dyn Reporter,
    text: &str,
    name: &str,
    tag: TypeTag,
) -> Option<Value> {
    match tag {
        TypeTag::Bool => match text {
            "T" => Some(Value::Bool(true)),
            "F" => Some(Value::Bool(false)),
            _ => {
                reporter.report(&malformed(name, tag, text));
                None
            }
        },
        TypeTag::Int => match parse_int(text) {
            Some(n) => Some(Value::Int(n)),
            None => {
                reporter.report(&malformed(name, tag, text));
                None
            }
        },
        TypeTag::Count => match parse_count(text) {
            Some(n) => Some(Value::Count(n)),
            None => {
                reporter.report(&malformed(name, tag, text));
                None
            }
        },
        TypeTag::Double | TypeTag::Time | TypeTag::Interval => match parse_double(text) {
            Some(d) => Some(match tag {
                TypeTag::Time => Value::Time(d),
                TypeTag::Interval => Value::Interval(d),
                _ => Value::Double(d),
            }),
            None => {
                reporter.report(&malformed(name, tag, text));
                None
            }
        },
        TypeTag::String => Some(Value::String(text.to_string())),
        TypeTag::Enum => Some(Value::Enum(text.to_string())),
        TypeTag::Port => parse_port(reporter, text, name),
        // Failure comes back as 0.0.0.0 plus a report; the parse itself
        // still "succeeds". Side channel caveat, kept on purpose.
        TypeTag::Addr => Some(Value::Addr(parse_addr(text, reporter))),
        TypeTag::Subnet => parse_subnet(text, reporter).map(Value::Subnet),
        TypeTag::Set | TypeTag::Vector => unreachable!("containers handled by parse_value"),
    }
}

/// `number/proto`, e.g. `443/tcp`. A bad protocol name degrades to
/// `unknown` with a report from the shared primitive; a bad number or a
/// missing slash fails the whole parse.
fn parse_port(reporter: &dyn Reporter, text: &str, name: &str) -> Option<Value> {
    let Some((num_part, proto_part)) = text.split_once('/') else {
        reporter.report(&malformed(name, TypeTag::Port, text));
        return None;
    };
    let number = match parse_count(num_part).and_then(|n| u16::try_from(n).ok()) {
        Some(n) => n,
        None => {
            reporter.report(&malformed(name, TypeTag::Port, text));
            return None;
        }
    };
    let proto = parse_proto(proto_part, reporter);
    Some(Value::Port { number, proto })
}

fn parse_container(
    config: &SeparatorConfig,
    reporter: &dyn Reporter,
    text: &str,
    name: &str,
    tag: TypeTag,
    subtype: Option<TypeTag>,
) -> Option<Value> {
    let Some(subtype) = subtype else {
        reporter.report(&FormatError::UnsupportedType {
            field: name.to_string(),
            tag,
        });
        return None;
    };
    // Nested containers have no textual form in this format.
    if matches!(subtype, TypeTag::Set | TypeTag::Vector) {
        reporter.report(&FormatError::UnsupportedType {
            field: name.to_string(),
            tag: subtype,
        });
        return None;
    }

    let elems = if text == config.empty_field {
        Vec::new()
    } else {
        let mut elems = Vec::new();
        for part in text.split(&config.set_sep) {
            elems.push(parse_scalar(reporter, part, name, subtype)?);
        }
        elems
    };

    Some(match tag {
        TypeTag::Set => Value::Set(elems),
        _ => Value::Vector(elems),
    })
}
