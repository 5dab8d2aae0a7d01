// src/cluster/annotations.rs
use serde_yaml::Value;
use std::collections::BTreeMap;

use super::types::{
    ACCESS_CONFIG_FILE_ANNOTATION, PILOT_CFG_STORE_ANNOTATION, PILOT_ENDPOINT_ANNOTATION,
    PLATFORM_ANNOTATION,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterAnnotations {
    pub pilot_endpoint: Option<String>,
    pub platform: Option<String>,
    pub pilot_cfg_store: Option<String>,
    pub access_config_file: Option<String>,
    pub raw: BTreeMap<String, String>,
}

impl ClusterAnnotations {
    // Unquoted `true` must read the same as `"true"`; nested values are ignored.
    pub fn from_document(document: &Value) -> Self {
        let mut raw = BTreeMap::new();
        if let Some(mapping) = document["metadata"]["annotations"].as_mapping() {
            for (key, value) in mapping {
                let (Some(key), Some(value)) = (key.as_str(), scalar_to_string(value)) else {
                    continue;
                };
                raw.insert(key.to_string(), value);
            }
        }
        Self::from_map(raw)
    }

    pub fn from_map(raw: BTreeMap<String, String>) -> Self {
        let lookup = |key: &str| raw.get(key).filter(|v| !v.is_empty()).cloned();
        Self {
            pilot_endpoint: lookup(PILOT_ENDPOINT_ANNOTATION),
            platform: lookup(PLATFORM_ANNOTATION),
            pilot_cfg_store: lookup(PILOT_CFG_STORE_ANNOTATION),
            access_config_file: lookup(ACCESS_CONFIG_FILE_ANNOTATION),
            raw,
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn parse_pilot_flag(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
