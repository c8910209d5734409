use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════
//  Type tags
// ════════════════════════════════════════════════════════════════

/// Type tag identifying what kind of datum a field carries.
///
/// `Set` and `Vector` are container tags; a field declaring one of them
/// also declares an element subtype (see [`crate::field::Field`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Bool,
    Int,
    Count,
    Double,
    Time,
    Interval,
    String,
    Enum,
    Port,
    Addr,
    Subnet,
    Set,
    Vector,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::Bool => "bool",
            TypeTag::Int => "int",
            TypeTag::Count => "count",
            TypeTag::Double => "double",
            TypeTag::Time => "time",
            TypeTag::Interval => "interval",
            TypeTag::String => "string",
            TypeTag::Enum => "enum",
            TypeTag::Port => "port",
            TypeTag::Addr => "addr",
            TypeTag::Subnet => "subnet",
            TypeTag::Set => "set",
            TypeTag::Vector => "vector",
        };
        f.write_str(name)
    }
}

/// Transport protocol associated with a port value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum Transport {
    #[default]
    Unknown,
    Tcp,
    Udp,
    Icmp,
}

// ════════════════════════════════════════════════════════════════
//  Composite scalar types
// ════════════════════════════════════════════════════════════════

/// An IP prefix: base address plus prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subnet {
    pub prefix: IpAddr,
    pub length: u8,
}

// ════════════════════════════════════════════════════════════════
//  Value
// ════════════════════════════════════════════════════════════════

/// One field's datum: a tagged union covering every [`TypeTag`].
///
/// Strategy by type:
/// - Scalars (Bool, Int, Count, Double): plain primitives.
/// - Time, Interval: seconds as `f64` (absolute vs. relative), rendered at
///   the same standard precision as Double.
/// - String, Enum: owned text; formatters apply their own escaping.
/// - Set, Vector: recursive, homogeneous per the field's declared subtype.
///
/// Values are owned by whoever constructs them. Formatters only borrow
/// during a call and never retain one; `parse_value` hands a newly owned
/// Value back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Count(u64),
    Double(f64),
    /// Seconds since the Unix epoch.
    Time(f64),
    /// Relative duration in seconds.
    Interval(f64),
    String(String),
    Enum(String),
    Port { number: u16, proto: Transport },
    Addr(IpAddr),
    Subnet(Subnet),
    Set(Vec<Value>),
    Vector(Vec<Value>),
}

impl Value {
    /// The tag this value carries. Must agree with the paired field's
    /// declared tag wherever the two travel together.
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Bool(_) => TypeTag::Bool,
            Value::Int(_) => TypeTag::Int,
            Value::Count(_) => TypeTag::Count,
            Value::Double(_) => TypeTag::Double,
            Value::Time(_) => TypeTag::Time,
            Value::Interval(_) => TypeTag::Interval,
            Value::String(_) => TypeTag::String,
            Value::Enum(_) => TypeTag::Enum,
            Value::Port { .. } => TypeTag::Port,
            Value::Addr(_) => TypeTag::Addr,
            Value::Subnet(_) => TypeTag::Subnet,
            Value::Set(_) => TypeTag::Set,
            Value::Vector(_) => TypeTag::Vector,
        }
    }
}
