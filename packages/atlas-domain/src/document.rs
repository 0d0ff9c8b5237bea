use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentEntries {
	pub entries: Vec<Value>,
	/// True when the stored value had to be coerced into a list.
	pub coerced: bool,
}

/// Reads a list-shaped document. `null` is an empty list, an array is returned as supplied and any
/// other value becomes a one-element list.
pub fn entries(value: &Value) -> DocumentEntries {
	match value {
		Value::Null => DocumentEntries { entries: Vec::new(), coerced: false },
		Value::Array(items) => DocumentEntries { entries: items.clone(), coerced: false },
		other => DocumentEntries { entries: vec![other.clone()], coerced: true },
	}
}

/// Replaces SQL `NULL` documents with JSON `null`.
pub fn or_null(value: Option<Value>) -> Value {
	value.unwrap_or(Value::Null)
}
