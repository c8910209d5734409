use crate::desc::Desc;
use crate::field::Field;
use crate::value::{TypeTag, Value};

/// The contract every concrete textual format implements.
///
/// One instance is bound to exactly one worker thread at construction and
/// holds that thread's [`crate::reporter::Reporter`]; beyond that binding a
/// formatter keeps no state, so no call leaves anything behind for the next.
///
/// Failure discipline, both directions:
/// - every failure is reported synchronously through the bound reporter,
///   naming the field when known;
/// - the caller sees `false` (describe) or `None` (parse) — never a panic
///   crossing this interface.
pub trait Formatter {
    /// Render a full record into `desc`, one value per declared field.
    ///
    /// `fields.len() != vals.len()` is an arity error: it is reported,
    /// `false` is returned, and the buffer is left untouched — arity is
    /// checked before the first append. Buffer state after a failure
    /// mid-record is implementation-defined; each implementation documents
    /// its choice.
    fn describe(&self, desc: &mut dyn Desc, fields: &[Field], vals: &[Value]) -> bool;

    /// Render a single value without field context. `name`, when given, only
    /// enriches error messages; it never changes what is rendered.
    fn describe_value(&self, desc: &mut dyn Desc, val: &Value, name: Option<&str>) -> bool;

    /// Parse `text` into a newly owned `Value` of type `tag`.
    ///
    /// `subtype` names the element type and is required when `tag` is a
    /// container. Numeric and structured types must consume the entire
    /// input; trailing garbage is a parse failure, not a truncation. On
    /// failure the error names `name` and the attempted type, and `None`
    /// is returned.
    fn parse_value(
        &self,
        text: &str,
        name: &str,
        tag: TypeTag,
        subtype: Option<TypeTag>,
    ) -> Option<Value>;
}
