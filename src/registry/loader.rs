// src/registry/loader.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::cluster::{ClusterRecord, ClusterValidator};
use crate::config::{expand_tilde, LoaderConfig};
use crate::error::{LoadFailure, RegistryError};
use crate::manifest::decode_documents;

use super::store::ClusterStore;

#[derive(Debug)]
pub struct LoadOutcome {
    pub store: ClusterStore,
    pub failures: Vec<LoadFailure>,
}

impl LoadOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_parts(self) -> (ClusterStore, Vec<LoadFailure>) {
        (self.store, self.failures)
    }
}

#[derive(Debug, Clone)]
pub struct RegistryLoader {
    config: LoaderConfig,
    validator: ClusterValidator,
}

impl Default for RegistryLoader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl RegistryLoader {
    pub fn new(config: LoaderConfig) -> Self {
        let validator = ClusterValidator::new(config.pilot_flag);
        Self { config, validator }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn load_configured(&self) -> Result<LoadOutcome, RegistryError> {
        let directory = self.config.directory.clone();
        self.load(directory)
    }

    pub fn load(&self, directory: impl AsRef<Path>) -> Result<LoadOutcome, RegistryError> {
        let directory = expand_tilde(directory.as_ref());
        let pattern = self.config.compiled_pattern()?;
        let files = list_files(&directory, &pattern)?;

        tracing::debug!(
            directory = %directory.display(),
            files = files.len(),
            "scanning cluster registry directory"
        );

        let mut acc = Accumulator::default();
        for path in &files {
            match fs::read(path) {
                Ok(bytes) => self.load_into(&mut acc, path, &bytes),
                Err(source) => {
                    let failure = LoadFailure::for_file(
                        path,
                        RegistryError::FileUnreadable {
                            path: path.clone(),
                            source,
                        },
                    );
                    acc.reject(failure);
                }
            }
        }

        let outcome = acc.finish();
        tracing::info!(
            directory = %directory.display(),
            clusters = outcome.store.len(),
            failures = outcome.failures.len(),
            pilot = outcome.store.pilot_record().map(ClusterRecord::name).unwrap_or("<none>"),
            "cluster registry loaded"
        );
        Ok(outcome)
    }

    pub fn load_bytes(&self, source: impl AsRef<Path>, bytes: &[u8]) -> LoadOutcome {
        let mut acc = Accumulator::default();
        self.load_into(&mut acc, source.as_ref(), bytes);
        acc.finish()
    }

    fn load_into(&self, acc: &mut Accumulator, path: &Path, bytes: &[u8]) {
        tracing::debug!(file = %path.display(), "reading cluster manifests");

        let documents = match decode_documents(bytes) {
            Ok(documents) => documents,
            Err(error) => {
                acc.reject(LoadFailure::for_file(path, error));
                return;
            }
        };

        for (index, document) in documents {
            let result = self
                .validator
                .validate(&document)
                .and_then(|record| acc.accept(record));
            if let Err(error) = result {
                acc.reject(LoadFailure::for_document(path, index, error));
            }
        }
    }
}

#[derive(Default)]
struct Accumulator {
    records: Vec<ClusterRecord>,
    pilot: Option<String>,
    failures: Vec<LoadFailure>,
}

impl Accumulator {
    fn accept(&mut self, record: ClusterRecord) -> Result<(), RegistryError> {
        if record.is_pilot_config_store() {
            if let Some(existing) = self.pilot.as_deref().filter(|p| *p != record.name()) {
                return Err(RegistryError::DuplicatePilot {
                    name: record.name().to_string(),
                    existing: existing.to_string(),
                });
            }
            self.pilot = Some(record.name().to_string());
        } else if self.pilot.as_deref() == Some(record.name()) {
            self.pilot = None;
        }

        tracing::debug!(
            cluster = %record.name(),
            pilot = record.is_pilot_config_store(),
            endpoints = record.server_endpoints().len(),
            "accepted cluster"
        );

        match self.records.iter_mut().find(|r| r.name() == record.name()) {
            Some(existing) => {
                tracing::warn!(cluster = %record.name(), "duplicate cluster name, replacing earlier definition");
                *existing = record;
            }
            None => self.records.push(record),
        }
        Ok(())
    }

    fn reject(&mut self, failure: LoadFailure) {
        tracing::warn!(%failure, "skipping cluster manifest");
        self.failures.push(failure);
    }

    fn finish(self) -> LoadOutcome {
        LoadOutcome {
            store: ClusterStore::new(self.records),
            failures: self.failures,
        }
    }
}

fn list_files(directory: &Path, pattern: &glob::Pattern) -> Result<Vec<PathBuf>, RegistryError> {
    let unreadable = |source: std::io::Error| RegistryError::DirectoryUnreadable {
        path: directory.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(directory).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .map(|n| pattern.matches(&n.to_string_lossy()))
            .unwrap_or(false);
        if matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PilotFlagPolicy;

    fn manifest(name: &str, kubeconfig: &str, pilot: bool) -> String {
        format!(
            r#"---
apiVersion: clusterregistry.k8s.io/v1alpha1
kind: Cluster
metadata:
  name: {name}
  annotations:
    config.istio.io/pilotEndpoint: "2.2.2.2:9080"
    config.istio.io/platform: "k8s"
    config.istio.io/pilotCfgStore: {pilot}
    config.istio.io/accessConfigFile: {kubeconfig}
spec:
  kubernetesApiEndpoints:
    serverEndpoints:
      - clientCIDR: "0.0.0.0/0"
        serverAddress: "192.168.4.10"
"#
        )
    }

    #[test]
    fn load_bytes_collects_good_and_bad_documents() {
        let mut input = manifest("clusA", "A_kubeconfig", true);
        input.push_str(&manifest("clusB", "B_kubeconfig", false).replace("kind: Cluster", "kind: BlusterZ"));
        input.push_str(&manifest("clusC", "C_kubeconfig", false));

        let outcome = RegistryLoader::default().load_bytes("inline.yaml", input.as_bytes());
        let names: Vec<_> = outcome.store.names().collect();
        assert_eq!(names, vec!["clusA", "clusC"]);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].document, Some(1));
        assert!(matches!(
            outcome.failures[0].error,
            RegistryError::UnexpectedKind { .. }
        ));
        assert_eq!(outcome.store.pilot_kube_config(), "A_kubeconfig");
    }

    #[test]
    fn second_pilot_with_other_name_is_rejected() {
        let mut input = manifest("clusA", "A_kubeconfig", true);
        input.push_str(&manifest("clusB", "B_kubeconfig", true));

        let outcome = RegistryLoader::default().load_bytes("inline.yaml", input.as_bytes());
        assert_eq!(outcome.store.len(), 1);
        assert_eq!(outcome.store.pilot_kube_config(), "A_kubeconfig");
        match &outcome.failures[0].error {
            RegistryError::DuplicatePilot { name, existing } => {
                assert_eq!(name, "clusB");
                assert_eq!(existing, "clusA");
            }
            other => panic!("expected DuplicatePilot, got {:?}", other),
        }
    }

    #[test]
    fn redefining_the_pilot_under_same_name_is_allowed() {
        let mut input = manifest("clusA", "old", true);
        input.push_str(&manifest("clusA", "new", true));

        let outcome = RegistryLoader::default().load_bytes("inline.yaml", input.as_bytes());
        assert!(outcome.is_clean());
        assert_eq!(outcome.store.len(), 1);
        assert_eq!(outcome.store.pilot_kube_config(), "new");
    }

    #[test]
    fn demoted_pilot_frees_the_slot() {
        let mut input = manifest("clusA", "A", true);
        input.push_str(&manifest("clusA", "A2", false));
        input.push_str(&manifest("clusB", "B", true));

        let outcome = RegistryLoader::default().load_bytes("inline.yaml", input.as_bytes());
        assert!(outcome.is_clean());
        assert_eq!(outcome.store.pilot_kube_config(), "B");
    }

    #[test]
    fn malformed_yaml_skips_whole_buffer() {
        let mut input = manifest("clusA", "A", false);
        input.push_str("---\nkind: [unclosed\n");

        let outcome = RegistryLoader::default().load_bytes("broken.yaml", input.as_bytes());
        assert!(outcome.store.is_empty());
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].document, None);
        assert!(matches!(
            outcome.failures[0].error,
            RegistryError::MalformedDocument { .. }
        ));
    }

    #[test]
    fn strict_loader_reports_bad_flag() {
        let input = manifest("clusA", "A", false).replace("pilotCfgStore: false", "pilotCfgStore: sure");
        let config = LoaderConfig {
            pilot_flag: PilotFlagPolicy::Strict,
            ..LoaderConfig::default()
        };

        let strict = RegistryLoader::new(config).load_bytes("x.yaml", input.as_bytes());
        assert!(strict.store.is_empty());
        assert!(matches!(
            strict.failures[0].error,
            RegistryError::InvalidAnnotation { .. }
        ));

        let lenient = RegistryLoader::default().load_bytes("x.yaml", input.as_bytes());
        assert!(lenient.is_clean());
        assert!(!lenient.store.get("clusA").unwrap().is_pilot_config_store());
    }

    #[test]
    fn list_files_skips_directories_and_unmatched_names() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.yaml"), "").unwrap();
        fs::write(dir.path().join("a.yaml"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested.yaml")).unwrap();

        let pattern = glob::Pattern::new("*.yaml").unwrap();
        let files = list_files(dir.path(), &pattern).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.yaml"]);
    }

    #[test]
    fn document_index_counts_blank_documents() {
        let mut input = String::from("---\n\n");
        input.push_str(&manifest("a", "a-config", false));
        input.push_str("---\nkind: BlusterZ\n");

        let outcome = RegistryLoader::default().load_bytes("x.yaml", input.as_bytes());
        assert_eq!(outcome.store.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].document, Some(2));
        assert!(matches!(
            outcome.failures[0].error,
            RegistryError::UnexpectedKind { .. }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_file_names_are_still_loaded() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let name = OsStr::from_bytes(b"clus\xffA.yaml");
        fs::write(dir.path().join(name), manifest("clusA", "A", false)).unwrap();

        let outcome = RegistryLoader::default().load(dir.path()).unwrap();
        assert!(outcome.is_clean());
        assert_eq!(outcome.store.names().collect::<Vec<_>>(), vec!["clusA"]);
    }
}
