use crate::domain::types::RecordId;
use crate::repository::errors::RepositoryResult;
use crate::table::filter::ListQuery;
use crate::table::record::{Creatable, Record};

pub mod errors;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod seed;

pub use memory::InMemoryRepository;

pub trait RecordReader<R: Record> {
    /// Records matching `query` in the record's default order.
    fn list_records(&self, query: &ListQuery<R>) -> RepositoryResult<Vec<R>>;
    fn get_record(&self, id: &RecordId) -> RepositoryResult<Option<R>>;
}

pub trait RecordWriter<R: Creatable> {
    fn create_record(&self, draft: R::Draft) -> RepositoryResult<R>;
}
