use serde::{Deserialize, Serialize};

use crate::value::TypeTag;

/// Metadata for one log-record column. Produced by the record pipeline,
/// consumed read-only by formatters.
///
/// `subtype` is the element type and is meaningful only when `tag` is
/// `Set` or `Vector`; it stays `None` for scalar columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub tag: TypeTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<TypeTag>,
}

impl Field {
    /// Scalar column.
    pub fn new(name: impl Into<String>, tag: TypeTag) -> Self {
        Self { name: name.into(), tag, subtype: None }
    }

    /// Container column with an element type.
    pub fn with_subtype(name: impl Into<String>, tag: TypeTag, subtype: TypeTag) -> Self {
        Self { name: name.into(), tag, subtype: Some(subtype) }
    }
}
