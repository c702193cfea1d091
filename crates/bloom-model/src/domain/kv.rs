use serde::{Deserialize, Serialize};

/// Single environment binding handed to a subprocess or a helper script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    key: String,
    value: String,
}

impl KeyValue {
    /// Create a new binding.
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Variable name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Variable value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl From<(&str, &str)> for KeyValue {
    fn from((key, value): (&str, &str)) -> Self {
        Self::new(key, value)
    }
}
