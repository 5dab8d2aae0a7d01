// src/registry/store.rs
use crate::cluster::ClusterRecord;
use crate::error::RegistryError;

/// If more than one record is flagged as pilot, the first wins; rejecting
/// extra pilots is the loader's job. A later duplicate name replaces the
/// earlier record in its slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterStore {
    records: Vec<ClusterRecord>,
    pilot_index: Option<usize>,
}

impl ClusterStore {
    pub fn new(records: Vec<ClusterRecord>) -> Self {
        let mut deduped: Vec<ClusterRecord> = Vec::with_capacity(records.len());
        for record in records {
            match deduped.iter_mut().find(|r| r.name() == record.name()) {
                Some(existing) => *existing = record,
                None => deduped.push(record),
            }
        }

        let pilot_index = deduped.iter().position(ClusterRecord::is_pilot_config_store);
        Self {
            records: deduped,
            pilot_index,
        }
    }

    pub fn all_records(&self) -> &[ClusterRecord] {
        &self.records
    }

    pub fn pilot_record(&self) -> Option<&ClusterRecord> {
        self.pilot_index.map(|i| &self.records[i])
    }

    pub fn pilot_kube_config(&self) -> &str {
        self.pilot_record()
            .map(ClusterRecord::access_config_file)
            .unwrap_or_default()
    }

    pub fn pilot_clusters(&self) -> Vec<&ClusterRecord> {
        self.pilot_record().into_iter().collect()
    }

    pub fn remote_clusters(&self) -> impl Iterator<Item = &ClusterRecord> {
        self.records
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != self.pilot_index)
            .map(|(_, r)| r)
    }

    pub fn get(&self, name: &str) -> Result<&ClusterRecord, RegistryError> {
        self.records
            .iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(ClusterRecord::name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClusterRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a ClusterStore {
    type Item = &'a ClusterRecord;
    type IntoIter = std::slice::Iter<'a, ClusterRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
