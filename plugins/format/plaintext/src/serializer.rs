//! Value → text. Shared address/subnet/double/proto primitives come from
//! the core crate; only separators, escaping and the bool/port/container
//! spellings are local to this format.

use threadlog_api::render::{render_addr, render_double, render_proto, render_subnet};
use threadlog_api::value::Value;

use crate::SeparatorConfig;

/// Render one value with this format's spellings. Every tag is
/// representable, so rendering itself cannot fail; tag agreement is the
/// caller's job.
pub(crate) fn render_value(val: &Value, config: &SeparatorConfig) -> String {
    match val {
        Value::Bool(true) => "T".to_string(),
        Value::Bool(false) => "F".to_string(),
        Value::Int(n) => n.to_string(),
        Value::Count(n) => n.to_string(),
        Value::Double(d) | Value::Time(d) | Value::Interval(d) => render_double(*d),
        Value::String(s) | Value::Enum(s) => escape(s, config),
        Value::Port { number, proto } => format!("{number}/{}", render_proto(*proto)),
        Value::Addr(addr) => render_addr(addr),
        Value::Subnet(subnet) => render_subnet(subnet),
        Value::Set(elems) | Value::Vector(elems) => render_elements(elems, config),
    }
}

fn render_elements(elems: &[Value], config: &SeparatorConfig) -> String {
    if elems.is_empty() {
        return config.empty_field.clone();
    }
    let rendered: Vec<String> = elems.iter().map(|e| render_value(e, config)).collect();
    rendered.join(&config.set_sep)
}

/// Hex-escape everything that would corrupt the line structure: control
/// bytes, DEL, backslash, and any occurrence of either separator.
fn escape(text: &str, config: &SeparatorConfig) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while !rest.is_empty() {
        if rest.starts_with(&config.field_sep) {
            escape_bytes(&mut out, &config.field_sep);
            rest = &rest[config.field_sep.len()..];
        } else if rest.starts_with(&config.set_sep) {
            escape_bytes(&mut out, &config.set_sep);
            rest = &rest[config.set_sep.len()..];
        } else if let Some(c) = rest.chars().next() {
            if c.is_control() || c == '\\' {
                escape_bytes(&mut out, &rest[..c.len_utf8()]);
            } else {
                out.push(c);
            }
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

fn escape_bytes(out: &mut String, text: &str) {
    for byte in text.bytes() {
        out.push_str(&format!("\\x{byte:02x}"));
    }
}
