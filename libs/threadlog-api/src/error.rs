use crate::value::TypeTag;

/// Everything a formatter can fail on. Each failure is delivered to the
/// owning thread's [`crate::reporter::Reporter`] as one of these; the
/// `Display` rendering is the human-readable message the sink records.
///
/// Failures are recoverable at record or field granularity — callers skip
/// or substitute, they do not tear the thread down.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Field/value count disagreement in a record-level describe call.
    #[error("record has {got} values but {expected} declared fields")]
    ArityMismatch { expected: usize, got: usize },

    /// A type tag this formatter cannot render or parse.
    #[error("field '{field}': type {tag} not supported")]
    UnsupportedType { field: String, tag: TypeTag },

    /// Input text that does not conform to the expected form for the tag.
    #[error("field '{field}': cannot parse {text:?} as {tag}")]
    MalformedText { field: String, tag: TypeTag, text: String },

    /// Not an IPv4 or IPv6 address.
    #[error("invalid address {text:?}")]
    MalformedAddr { text: String },

    /// Not an `addr/len` prefix, or the length is out of range.
    #[error("invalid subnet {text:?}")]
    MalformedSubnet { text: String },

    /// Not one of the known transport protocol names.
    #[error("invalid transport protocol {text:?}")]
    MalformedProto { text: String },

    /// A value whose tag disagrees with its field's declared tag.
    #[error("field '{field}' declared as {declared}, value is {actual}")]
    TagMismatch { field: String, declared: TypeTag, actual: TypeTag },

    /// A container element whose tag disagrees with the declared subtype.
    #[error("field '{field}': element type {actual} does not match declared {expected}")]
    SubtypeMismatch { field: String, expected: TypeTag, actual: TypeTag },
}
