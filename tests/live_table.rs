use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::sleep;

use yuna_dashboard::domain::call::{CallRecord, CallStatus};
use yuna_dashboard::domain::types::RecordId;
use yuna_dashboard::repository::seed;
use yuna_dashboard::services::source::DataSource;
use yuna_dashboard::services::{ServiceError, ServiceResult};
use yuna_dashboard::table::controller::{LoadState, TableController};
use yuna_dashboard::table::filter::ListQuery;
use yuna_dashboard::table::live::{LiveOptions, LiveTable, TableEvent};
use yuna_dashboard::table::view::Layout;

/// Records every query it receives. Status-filtered fetches are slow, the
/// first `failures` fetches fail.
struct ScriptedSource {
    calls: Vec<CallRecord>,
    queries: Mutex<Vec<ListQuery<CallRecord>>>,
    failures: AtomicUsize,
}

impl ScriptedSource {
    fn new(failures: usize) -> Arc<Self> {
        Arc::new(Self {
            calls: seed::calls().unwrap(),
            queries: Mutex::new(Vec::new()),
            failures: AtomicUsize::new(failures),
        })
    }

    fn queries(&self) -> Vec<ListQuery<CallRecord>> {
        self.queries.lock().unwrap().clone()
    }
}

impl DataSource<CallRecord> for ScriptedSource {
    async fn fetch_list(&self, query: &ListQuery<CallRecord>) -> ServiceResult<Vec<CallRecord>> {
        self.queries.lock().unwrap().push(query.clone());

        let delay = if query.status.is_some() { 1000 } else { 10 };
        sleep(Duration::from_millis(delay)).await;

        let failed = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failed {
            return Err(ServiceError::FetchFailed("calls"));
        }
        Ok(query.apply(self.calls.clone()))
    }

    async fn fetch_one(&self, id: &RecordId) -> ServiceResult<Option<CallRecord>> {
        Ok(self.calls.iter().find(|call| &call.id == id).cloned())
    }
}

async fn settled(table: &LiveTable<CallRecord>) -> TableController<CallRecord> {
    let mut snapshots = table.subscribe();
    let controller = snapshots
        .wait_for(|controller| !matches!(controller.state(), LoadState::Loading))
        .await
        .unwrap();
    controller.clone()
}

#[tokio::test(start_paused = true)]
async fn initial_fetch_loads_newest_first() {
    let source = ScriptedSource::new(0);
    let table = LiveTable::spawn(Arc::clone(&source), LiveOptions::default());

    let controller = settled(&table).await;

    let rows = controller.rows();
    assert_eq!(rows.len(), 15);
    assert_eq!(rows[0].id.as_str(), "call-007");
    assert_eq!(controller.layout(), Layout::Desktop);
}

#[tokio::test(start_paused = true)]
async fn only_the_final_keystroke_fetches() {
    let source = ScriptedSource::new(0);
    let table = LiveTable::spawn(Arc::clone(&source), LiveOptions::default());
    settled(&table).await;

    for text in ["e", "em", "emm", "emma"] {
        table.send(TableEvent::Search(text.into()));
        sleep(Duration::from_millis(50)).await;
    }
    sleep(Duration::from_millis(500)).await;

    let queries = source.queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[1].search_term.as_deref(), Some("emma"));

    let controller = settled(&table).await;
    assert!(
        controller
            .rows()
            .iter()
            .all(|call| call.client_name.to_lowercase().contains("emma"))
    );
}

#[tokio::test(start_paused = true)]
async fn typing_back_to_the_settled_term_does_not_refetch() {
    let source = ScriptedSource::new(0);
    let table = LiveTable::spawn(Arc::clone(&source), LiveOptions::default());
    settled(&table).await;

    table.send(TableEvent::Search("l".into()));
    sleep(Duration::from_millis(50)).await;
    table.send(TableEvent::Search(String::new()));
    sleep(Duration::from_millis(500)).await;

    assert_eq!(source.queries().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn slow_stale_response_never_wins() {
    let source = ScriptedSource::new(0);
    let table = LiveTable::spawn(Arc::clone(&source), LiveOptions::default());
    settled(&table).await;

    // The filtered fetch takes 1s, the unfiltered one 10ms.
    table.send(TableEvent::Status(Some(CallStatus::Completed)));
    table.send(TableEvent::Status(None));
    sleep(Duration::from_millis(1500)).await;

    let controller = settled(&table).await;
    assert_eq!(controller.fetches_issued(), 3);
    assert_eq!(controller.query().status, None);
    assert_eq!(controller.rows().len(), 15);
}

#[tokio::test(start_paused = true)]
async fn retry_reissues_the_identical_query() {
    let source = ScriptedSource::new(1);
    let table = LiveTable::spawn(Arc::clone(&source), LiveOptions::default());

    let failed = settled(&table).await;
    assert_eq!(
        failed.state(),
        &LoadState::Failed("Failed to load calls. Please try again.".into())
    );
    assert_eq!(failed.view().name(), "error");

    table.send(TableEvent::Retry);
    sleep(Duration::from_millis(100)).await;

    let controller = settled(&table).await;
    assert_eq!(controller.rows().len(), 15);
    let queries = source.queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0], queries[1]);
}

#[tokio::test(start_paused = true)]
async fn resize_switches_layout_without_refetch() {
    let source = ScriptedSource::new(0);
    let options = LiveOptions {
        width: 1024,
        ..LiveOptions::default()
    };
    let table = LiveTable::spawn(Arc::clone(&source), options);
    let desktop = settled(&table).await;

    let mut snapshots = table.subscribe();
    let _ = snapshots.borrow_and_update();
    table.send(TableEvent::Resize(600));
    snapshots.changed().await.unwrap();
    let mobile = snapshots.borrow().clone();

    assert_eq!(desktop.layout(), Layout::Desktop);
    assert_eq!(mobile.layout(), Layout::Mobile);
    assert_eq!(mobile.fetches_issued(), 1);
    assert_eq!(source.queries().len(), 1);

    let ids = |controller: &TableController<CallRecord>| {
        controller
            .rows()
            .iter()
            .map(|call| call.id.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&desktop), ids(&mobile));
}

#[tokio::test(start_paused = true)]
async fn clear_filters_refetches_everything() {
    let source = ScriptedSource::new(0);
    let table = LiveTable::spawn(Arc::clone(&source), LiveOptions::default());
    settled(&table).await;

    table.send(TableEvent::Search("liam".into()));
    sleep(Duration::from_millis(400)).await;
    table.send(TableEvent::ClearFilters);
    sleep(Duration::from_millis(400)).await;

    let controller = settled(&table).await;
    assert!(!controller.query().is_filtered());
    assert_eq!(controller.rows().len(), 15);
    // Initial, "liam", cleared. The debouncer's echo of "" is not a new query.
    assert_eq!(source.queries().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn expanding_a_row_leaves_others_collapsed() {
    let source = ScriptedSource::new(0);
    let table = LiveTable::spawn(Arc::clone(&source), LiveOptions::default());
    settled(&table).await;

    let a = RecordId::new("call-001").unwrap();
    let b = RecordId::new("call-002").unwrap();
    let mut snapshots = table.subscribe();
    let _ = snapshots.borrow_and_update();
    table.send(TableEvent::ToggleRow(a.clone()));
    snapshots.changed().await.unwrap();

    let controller = snapshots.borrow().clone();
    assert!(controller.is_expanded(&a));
    assert!(!controller.is_expanded(&b));
}

#[tokio::test(start_paused = true)]
async fn retyping_a_search_right_after_clearing_filters_applies_it() {
    let source = ScriptedSource::new(0);
    let table = LiveTable::spawn(Arc::clone(&source), LiveOptions::default());
    settled(&table).await;

    table.send(TableEvent::Search("emma".into()));
    sleep(Duration::from_millis(400)).await;
    settled(&table).await;

    table.send(TableEvent::ClearFilters);
    sleep(Duration::from_millis(50)).await;
    table.send(TableEvent::Search("emma".into()));
    sleep(Duration::from_secs(2)).await;

    let controller = settled(&table).await;
    assert_eq!(controller.query().search_term.as_deref(), Some("emma"));
    assert!(
        controller
            .rows()
            .iter()
            .all(|call| call.client_name.to_lowercase().contains("emma"))
    );
    // Initial, "emma", cleared, "emma" again.
    assert_eq!(source.queries().len(), 4);
}
