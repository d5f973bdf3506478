use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A file captured at the form boundary. Bytes are base64-encoded when the
/// submission crosses a JSON boundary (the CLI submission file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    File(UploadFile),
}

/// Flat key→value snapshot of a submitted form. Dynamic keys such as
/// `person_0_full_name` live only at this boundary; everything past the
/// orchestrator works on typed records recovered from here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormFields(HashMap<String, FieldValue>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), FieldValue::Text(value.into()));
    }

    pub fn set_file(&mut self, name: impl Into<String>, file: UploadFile) {
        self.0.insert(name.into(), FieldValue::File(file));
    }

    /// Text value of a field, or "" when absent or not text.
    pub fn text(&self, name: &str) -> &str {
        match self.0.get(name) {
            Some(FieldValue::Text(s)) => s,
            _ => "",
        }
    }

    /// File value of a field. An entry with an empty filename counts as
    /// absent, matching how an empty file input serializes.
    pub fn file(&self, name: &str) -> Option<&UploadFile> {
        match self.0.get(name) {
            Some(FieldValue::File(f)) if !f.name.is_empty() => Some(f),
            _ => None,
        }
    }

    /// Integer field with a lenient fallback: empty or unparsable → `default`.
    pub fn int_or(&self, name: &str, default: i64) -> i64 {
        self.text(name).trim().parse::<i64>().unwrap_or(default)
    }

    /// Float field with the same lenient fallback.
    pub fn float_or(&self, name: &str, default: f64) -> f64 {
        self.text(name).trim().parse::<f64>().unwrap_or(default)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
