use std::collections::HashMap;

use taster_schema::{Dataset, PlayerId, SessionRecord};

/// Sessions bucketed by participant. Buckets iterate in the order their
/// player id was first seen; each bucket keeps input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedDataset {
    order: Vec<PlayerId>,
    buckets: HashMap<PlayerId, Vec<SessionRecord>>,
}

impl GroupedDataset {
    pub fn push(&mut self, session: SessionRecord) {
        match self.buckets.get_mut(&session.player_id) {
            Some(bucket) => bucket.push(session),
            None => {
                self.order.push(session.player_id.clone());
                self.buckets.insert(session.player_id.clone(), vec![session]);
            }
        }
    }

    pub fn get(&self, id: &PlayerId) -> Option<&[SessionRecord]> {
        self.buckets.get(id).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &[SessionRecord])> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.buckets.get(id).map(|s| (id, s.as_slice())))
    }

    pub fn player_ids(&self) -> &[PlayerId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn total_sessions(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

pub fn group(dataset: &Dataset) -> GroupedDataset {
    let mut grouped = GroupedDataset::default();
    for session in &dataset.results {
        grouped.push(session.clone());
    }
    log::debug!(
        "grouped {} sessions into {} participants",
        dataset.results.len(),
        grouped.len()
    );
    grouped
}
