use std::sync::Arc;

use chrono::Utc;

use crate::domain::types::RecordId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{RecordReader, RecordWriter};
use crate::table::filter::ListQuery;
use crate::table::record::{Creatable, Record};

/// Read-only store over a fixed dataset.
///
/// Created records are fabricated and handed back to the caller but never
/// stored, so every listing reflects the seed dataset.
#[derive(Debug)]
pub struct InMemoryRepository<R> {
    records: Arc<Vec<R>>,
}

impl<R> Clone for InMemoryRepository<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<R: Record> InMemoryRepository<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R: Record> RecordReader<R> for InMemoryRepository<R> {
    fn list_records(&self, query: &ListQuery<R>) -> RepositoryResult<Vec<R>> {
        let mut records = query.apply(self.records.iter().cloned());
        records.sort_by(R::default_order);
        Ok(records)
    }

    fn get_record(&self, id: &RecordId) -> RepositoryResult<Option<R>> {
        Ok(self.records.iter().find(|record| record.id() == id).cloned())
    }
}

impl<R: Creatable> RecordWriter<R> for InMemoryRepository<R> {
    fn create_record(&self, draft: R::Draft) -> RepositoryResult<R> {
        let id = RecordId::generate(R::ID_PREFIX, R::ID_LEN);
        Ok(R::from_draft(id, draft, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::call::{CallRecord, CallType, NewCall};
    use crate::repository::seed;

    fn repo() -> InMemoryRepository<CallRecord> {
        InMemoryRepository::new(seed::calls().unwrap())
    }

    #[test]
    fn lists_newest_first() {
        let calls = repo().list_records(&ListQuery::new()).unwrap();

        assert_eq!(calls.len(), 15);
        assert_eq!(calls[0].id.as_str(), "call-007");
        assert!(calls.windows(2).all(|w| w[0].date_time >= w[1].date_time));
    }

    #[test]
    fn get_record_by_id() {
        let repo = repo();
        let id = RecordId::new("call-003").unwrap();
        assert_eq!(repo.get_record(&id).unwrap().unwrap().client_name, "Olivia Brown");

        let missing = RecordId::new("call-999").unwrap();
        assert!(repo.get_record(&missing).unwrap().is_none());
    }

    #[test]
    fn create_does_not_persist() {
        let repo = repo();
        let draft = NewCall {
            client_id: RecordId::new("1").unwrap(),
            client_name: "Emma Johnson".into(),
            call_type: CallType::Reminder,
        };

        let created = repo.create_record(draft).unwrap();

        assert!(created.id.starts_with("call-"));
        assert_eq!(repo.len(), 15);
        assert!(repo.get_record(&created.id).unwrap().is_none());
    }
}
