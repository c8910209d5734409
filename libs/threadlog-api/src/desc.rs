/// Append-only text sink a formatter renders into.
///
/// The buffer is owned by the caller and builds one textual log record
/// incrementally; appending is the only capability formatters need, so it
/// is the only one exposed. Formatters never read or reset the buffer.
pub trait Desc {
    fn append(&mut self, text: &str);
}

impl Desc for String {
    fn append(&mut self, text: &str) {
        self.push_str(text);
    }
}

impl Desc for Vec<u8> {
    fn append(&mut self, text: &str) {
        self.extend_from_slice(text.as_bytes());
    }
}
