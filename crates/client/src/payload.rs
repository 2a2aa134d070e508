/// Ordered form fields serialized as one `&key=value` fragment per entry.
///
/// Values are passed through exactly as supplied. The backend expects the
/// caller to have applied whatever encoding it needs; re-escaping here would
/// break compatibility.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataPayload {
    fields: Vec<(String, String)>,
}

impl DataPayload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, builder style.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.fields {
            out.push('&');
            out.push_str(name);
            out.push('=');
            out.push_str(value);
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DataPayload {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fields_in_insertion_order() {
        let data = DataPayload::new().field("Name", "John").field("Age", "30");
        assert_eq!(data.render(), "&Name=John&Age=30");
    }

    #[test]
    fn values_are_not_escaped() {
        let data = DataPayload::new().field("Note", "a b&c=d");
        assert_eq!(data.render(), "&Note=a b&c=d");
    }

    #[test]
    fn empty_payload_renders_nothing() {
        assert_eq!(DataPayload::new().render(), "");
    }
}
