use parking_lot::Mutex;

use super::{DatasetRecord, DatasetSink};

/// Collects records in memory.
#[derive(Default)]
pub struct MemoryDatasetSink {
    records: Mutex<Vec<DatasetRecord>>,
}

impl MemoryDatasetSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<DatasetRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl DatasetSink for MemoryDatasetSink {
    fn enqueue(&self, record: DatasetRecord) {
        self.records.lock().push(record);
    }
}
