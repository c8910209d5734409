pub mod desc;
pub mod error;
pub mod field;
pub mod format;
pub mod parse;
pub mod render;
pub mod reporter;
pub mod value;

pub use desc::Desc;
pub use error::FormatError;
pub use field::Field;
pub use format::Formatter;
pub use reporter::{CollectingReporter, Reporter, TracingReporter};
pub use value::{Subnet, Transport, TypeTag, Value};
