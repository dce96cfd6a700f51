use crate::db::GenerationRecord;

pub const HISTORY_CAPACITY: usize = 10;

/// Newest-first list of generations, never longer than its capacity.
#[derive(Debug, Clone)]
pub struct HistoryLedger {
    records: Vec<GenerationRecord>,
    capacity: usize,
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Rebuild from records that are already newest-first (e.g. loaded from
    /// the store). Anything past the capacity is dropped.
    pub fn from_records(mut records: Vec<GenerationRecord>) -> Self {
        records.truncate(HISTORY_CAPACITY);
        Self {
            records,
            capacity: HISTORY_CAPACITY,
        }
    }

    pub fn append(&mut self, record: GenerationRecord) {
        self.records.insert(0, record);
        self.records.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn list(&self) -> &[GenerationRecord] {
        &self.records
    }

    pub fn get(&self, record_id: &str) -> Option<&GenerationRecord> {
        self.records.iter().find(|record| record.id == record_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(input: &str) -> GenerationRecord {
        GenerationRecord::new(input.into(), input.into(), input.into())
    }

    #[test]
    fn newest_first() {
        let mut ledger = HistoryLedger::new();
        ledger.append(record("一"));
        ledger.append(record("二"));

        let inputs: Vec<&str> = ledger.list().iter().map(|r| r.input_text.as_str()).collect();
        assert_eq!(inputs, vec!["二", "一"]);
    }

    #[test]
    fn eleventh_append_evicts_oldest() {
        let mut ledger = HistoryLedger::new();
        for i in 0..11 {
            ledger.append(record(&i.to_string()));
        }

        assert_eq!(ledger.len(), HISTORY_CAPACITY);
        assert_eq!(ledger.list()[0].input_text, "10");
        assert_eq!(ledger.list()[9].input_text, "1");
        assert!(ledger.list().iter().all(|r| r.input_text != "0"));
    }

    #[test]
    fn clear_then_list_is_empty() {
        let mut ledger = HistoryLedger::new();
        ledger.append(record("星"));
        ledger.clear();

        assert!(ledger.list().is_empty());
        assert!(ledger.is_empty());
    }

    #[test]
    fn get_by_id() {
        let mut ledger = HistoryLedger::new();
        let kept = record("月");
        let id = kept.id.clone();
        ledger.append(kept);

        assert_eq!(ledger.get(&id).map(|r| r.input_text.as_str()), Some("月"));
        assert!(ledger.get("nope").is_none());
    }

    #[test]
    fn from_records_applies_cap() {
        let records: Vec<_> = (0..15).rev().map(|i| record(&i.to_string())).collect();
        let ledger = HistoryLedger::from_records(records);

        assert_eq!(ledger.len(), HISTORY_CAPACITY);
        assert_eq!(ledger.list()[0].input_text, "14");
        assert_eq!(ledger.list()[9].input_text, "5");
    }

    #[test]
    fn zero_capacity_holds_nothing() {
        let mut ledger = HistoryLedger::with_capacity(0);
        ledger.append(record("空"));
        assert!(ledger.is_empty());
        assert_eq!(ledger.capacity(), 0);
    }
}
