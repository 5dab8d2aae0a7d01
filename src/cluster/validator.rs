// src/cluster/validator.rs
use serde_yaml::Value;

use super::annotations::{parse_pilot_flag, ClusterAnnotations};
use super::types::{
    ClusterRecord, ServerEndpoint, ACCESS_CONFIG_FILE_ANNOTATION, CLUSTER_KIND,
    PILOT_CFG_STORE_ANNOTATION, PILOT_ENDPOINT_ANNOTATION, PLATFORM_ANNOTATION,
};
use crate::config::PilotFlagPolicy;
use crate::error::RegistryError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterValidator {
    pilot_flag: PilotFlagPolicy,
}

impl ClusterValidator {
    pub fn new(pilot_flag: PilotFlagPolicy) -> Self {
        Self { pilot_flag }
    }

    pub fn validate(&self, document: &Value) -> Result<ClusterRecord, RegistryError> {
        let kind = document["kind"].as_str().unwrap_or_default();
        if kind != CLUSTER_KIND {
            return Err(RegistryError::UnexpectedKind {
                found: kind.to_string(),
            });
        }

        let name = match document["metadata"]["name"].as_str() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(RegistryError::MissingIdentity),
        };

        let server_endpoints = extract_server_endpoints(document)?;
        let annotations = ClusterAnnotations::from_document(document);

        let platform = require(&name, annotations.platform.clone(), PLATFORM_ANNOTATION)?;
        let pilot_endpoint = require(
            &name,
            annotations.pilot_endpoint.clone(),
            PILOT_ENDPOINT_ANNOTATION,
        )?;
        let access_config_file = require(
            &name,
            annotations.access_config_file.clone(),
            ACCESS_CONFIG_FILE_ANNOTATION,
        )?;
        let is_pilot = self.pilot_flag(&name, annotations.pilot_cfg_store.as_deref())?;

        Ok(
            ClusterRecord::new(name, platform, pilot_endpoint, access_config_file)
                .with_api_version(document["apiVersion"].as_str().unwrap_or_default())
                .with_pilot_config_store(is_pilot)
                .with_server_endpoints(server_endpoints)
                .with_annotations(annotations.raw),
        )
    }

    fn pilot_flag(&self, name: &str, raw: Option<&str>) -> Result<bool, RegistryError> {
        let Some(raw) = raw else {
            return Ok(false);
        };
        match (parse_pilot_flag(raw), self.pilot_flag) {
            (Some(flag), _) => Ok(flag),
            (None, PilotFlagPolicy::Lenient) => {
                tracing::warn!(
                    cluster = %name,
                    value = %raw,
                    "unparsable {} annotation, treating as false",
                    PILOT_CFG_STORE_ANNOTATION
                );
                Ok(false)
            }
            (None, PilotFlagPolicy::Strict) => Err(RegistryError::InvalidAnnotation {
                name: name.to_string(),
                key: PILOT_CFG_STORE_ANNOTATION,
                value: raw.to_string(),
            }),
        }
    }
}

fn require(name: &str, value: Option<String>, key: &'static str) -> Result<String, RegistryError> {
    value.ok_or_else(|| RegistryError::MissingAnnotation {
        name: name.to_string(),
        key,
    })
}

fn extract_server_endpoints(document: &Value) -> Result<Vec<ServerEndpoint>, RegistryError> {
    let spec = document
        .get("spec")
        .ok_or_else(|| RegistryError::malformed_spec("missing spec"))?;
    let endpoints = spec
        .get("kubernetesApiEndpoints")
        .ok_or_else(|| RegistryError::malformed_spec("missing spec.kubernetesApiEndpoints"))?
        .get("serverEndpoints")
        .ok_or_else(|| {
            RegistryError::malformed_spec("missing spec.kubernetesApiEndpoints.serverEndpoints")
        })?;

    if endpoints.is_null() {
        return Ok(Vec::new());
    }
    serde_yaml::from_value(endpoints.clone())
        .map_err(|e| RegistryError::malformed_spec(format!("serverEndpoints: {}", e)))
}
