// src/manifest/decoder.rs
use serde::Deserialize;
use serde_yaml::Value;

use crate::error::RegistryError;

// Blank documents are dropped but still counted in the stream position.
pub fn decode_documents(bytes: &[u8]) -> Result<Vec<(usize, Value)>, RegistryError> {
    let mut documents = Vec::new();
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(documents);
    }

    for (index, document) in serde_yaml::Deserializer::from_slice(bytes).enumerate() {
        let value = Value::deserialize(document).map_err(|e| RegistryError::MalformedDocument {
            index,
            reason: e.to_string(),
        })?;
        if value.is_null() {
            continue;
        }
        documents.push((index, value));
    }

    Ok(documents)
}
