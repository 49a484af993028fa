//! Capture buffer — merges live capture batches with deduplication.
//!
//! An external network-capture collaborator delivers batches of
//! [`CapturedRecord`]s, and batches overlap: each delivery re-sends lines
//! already seen. The buffer admits only records whose dedup key (store
//! timestamp plus a line-prefix) has not been seen, so merging is
//! idempotent.

use eventlens_core::CapturedRecord;
use std::collections::HashSet;
use tokio::sync::mpsc;

pub const DEFAULT_DEDUP_PREFIX: usize = 50;

#[derive(Debug)]
pub struct CaptureBuffer {
    records: Vec<CapturedRecord>,
    seen: HashSet<(String, String)>,
    prefix_len: usize,
}

impl Default for CaptureBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_DEDUP_PREFIX)
    }
}

impl CaptureBuffer {
    pub fn new(prefix_len: usize) -> Self {
        Self { records: Vec::new(), seen: HashSet::new(), prefix_len }
    }

    /// Merge one batch, returning how many records were admitted.
    pub fn merge(&mut self, batch: Vec<CapturedRecord>) -> usize {
        let mut admitted = 0;
        for record in batch {
            if self.seen.insert(self.dedup_key(&record)) {
                self.records.push(record);
                admitted += 1;
            }
        }
        admitted
    }

    fn dedup_key(&self, record: &CapturedRecord) -> (String, String) {
        let timestamp = record.timestamp.clone().unwrap_or_default();
        let prefix: String = record.line_text().chars().take(self.prefix_len).collect();
        (timestamp, prefix)
    }

    pub fn records(&self) -> &[CapturedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.seen.clear();
    }

    /// Drain batches from a capture channel until the sender closes,
    /// merging each one. Returns the total admitted count.
    pub async fn collect(&mut self, rx: &mut mpsc::Receiver<Vec<CapturedRecord>>) -> usize {
        let mut admitted = 0;
        while let Some(batch) = rx.recv().await {
            let delivered = batch.len();
            let kept = self.merge(batch);
            admitted += kept;
            tracing::debug!(delivered, kept, total = self.len(), "merged capture batch");
        }
        admitted
    }
}
