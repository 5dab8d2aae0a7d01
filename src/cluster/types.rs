// src/cluster/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CLUSTER_KIND: &str = "Cluster";

pub const PILOT_ENDPOINT_ANNOTATION: &str = "config.istio.io/pilotEndpoint";
pub const PLATFORM_ANNOTATION: &str = "config.istio.io/platform";
pub const PILOT_CFG_STORE_ANNOTATION: &str = "config.istio.io/pilotCfgStore";
pub const ACCESS_CONFIG_FILE_ANNOTATION: &str = "config.istio.io/accessConfigFile";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEndpoint {
    #[serde(rename = "serverAddress")]
    pub server_address: String,
    #[serde(rename = "clientCIDR", alias = "clientCidr", default)]
    pub client_cidr: String,
}

impl ServerEndpoint {
    pub fn new(server_address: impl Into<String>, client_cidr: impl Into<String>) -> Self {
        Self {
            server_address: server_address.into(),
            client_cidr: client_cidr.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRecord {
    name: String,
    api_version: String,
    platform: String,
    pilot_endpoint: String,
    access_config_file: String,
    is_pilot_config_store: bool,
    server_endpoints: Vec<ServerEndpoint>,
    annotations: BTreeMap<String, String>,
}

impl ClusterRecord {
    pub fn new(
        name: impl Into<String>,
        platform: impl Into<String>,
        pilot_endpoint: impl Into<String>,
        access_config_file: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            api_version: String::new(),
            platform: platform.into(),
            pilot_endpoint: pilot_endpoint.into(),
            access_config_file: access_config_file.into(),
            is_pilot_config_store: false,
            server_endpoints: Vec::new(),
            annotations: BTreeMap::new(),
        }
    }

    pub fn with_pilot_config_store(mut self, is_pilot: bool) -> Self {
        self.is_pilot_config_store = is_pilot;
        self
    }

    pub fn with_server_endpoints(mut self, endpoints: Vec<ServerEndpoint>) -> Self {
        self.server_endpoints = endpoints;
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_annotations(mut self, annotations: BTreeMap<String, String>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn pilot_endpoint(&self) -> &str {
        &self.pilot_endpoint
    }

    pub fn access_config_file(&self) -> &str {
        &self.access_config_file
    }

    pub fn is_pilot_config_store(&self) -> bool {
        self.is_pilot_config_store
    }

    pub fn server_endpoints(&self) -> &[ServerEndpoint] {
        &self.server_endpoints
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }

    pub fn annotations(&self) -> &BTreeMap<String, String> {
        &self.annotations
    }
}
