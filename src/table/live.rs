//! Event-driven table running on its own task.
//!
//! User input arrives as [`TableEvent`]s. Search text goes through a
//! [`Debouncer`]; every other filter change fetches immediately. Fetches run
//! concurrently and resolve through the controller's token check, and each
//! state change is published as a fresh controller snapshot.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};

use crate::domain::types::RecordId;
use crate::services::ServiceResult;
use crate::services::source::DataSource;
use crate::table::controller::{FetchTicket, TableController};
use crate::table::debounce::{DEFAULT_DEBOUNCE, Debouncer};
use crate::table::record::Record;
use crate::table::view::MOBILE_BREAKPOINT;

#[derive(Clone, Debug)]
pub enum TableEvent<R: Record> {
    /// Raw search box text, debounced.
    Search(String),
    Status(Option<R::Status>),
    Kind(Option<R::Kind>),
    /// Column header click.
    Sort(String),
    Resize(u32),
    ToggleRow(RecordId),
    Retry,
    ClearFilters,
}

#[derive(Clone, Copy, Debug)]
pub struct LiveOptions {
    pub debounce: Duration,
    pub breakpoint: u32,
    pub width: u32,
}

impl Default for LiveOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            breakpoint: MOBILE_BREAKPOINT,
            width: 1280,
        }
    }
}

/// Handle to a running table. Dropping it stops the task, its pending
/// debounce timer and any in-flight fetches.
pub struct LiveTable<R: Record> {
    events: mpsc::UnboundedSender<TableEvent<R>>,
    snapshots: watch::Receiver<TableController<R>>,
    task: JoinHandle<()>,
}

impl<R: Record> LiveTable<R> {
    /// Starts the driver and immediately issues the initial fetch.
    pub fn spawn<S>(source: Arc<S>, options: LiveOptions) -> Self
    where
        S: DataSource<R> + 'static,
    {
        let mut controller = TableController::new(options.breakpoint);
        controller.resize(options.width);

        let (events, events_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshots) = watch::channel(controller.clone());
        let task = tokio::spawn(drive(
            source,
            controller,
            events_rx,
            snapshot_tx,
            options.debounce,
        ));

        Self {
            events,
            snapshots,
            task,
        }
    }

    pub fn send(&self, event: TableEvent<R>) {
        if self.events.send(event).is_err() {
            log::warn!("{} table driver is no longer running", R::NOUN);
        }
    }

    /// Latest published state.
    pub fn snapshot(&self) -> TableController<R> {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TableController<R>> {
        self.snapshots.clone()
    }
}

impl<R: Record> Drop for LiveTable<R> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

type Fetches<R> = JoinSet<(u64, ServiceResult<Vec<R>>)>;

fn issue<R, S>(fetches: &mut Fetches<R>, source: &Arc<S>, ticket: FetchTicket<R>)
where
    R: Record,
    S: DataSource<R> + 'static,
{
    let source = Arc::clone(source);
    fetches.spawn(async move {
        let result = source.fetch_list(&ticket.query).await;
        (ticket.token, result)
    });
}

async fn drive<R, S>(
    source: Arc<S>,
    mut controller: TableController<R>,
    mut events: mpsc::UnboundedReceiver<TableEvent<R>>,
    snapshots: watch::Sender<TableController<R>>,
    debounce: Duration,
) where
    R: Record,
    S: DataSource<R> + 'static,
{
    let (debouncer, mut settled) = Debouncer::spawn(debounce);
    let mut fetches: Fetches<R> = JoinSet::new();

    issue(&mut fetches, &source, controller.begin_fetch());
    snapshots.send_replace(controller.clone());

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    return;
                };
                match event {
                    TableEvent::Search(text) => {
                        debouncer.push(text);
                        continue;
                    }
                    TableEvent::Status(status) => {
                        let mut query = controller.query().clone();
                        query.status = status;
                        issue(&mut fetches, &source, controller.set_query(query));
                    }
                    TableEvent::Kind(kind) => {
                        let mut query = controller.query().clone();
                        query.kind = kind;
                        issue(&mut fetches, &source, controller.set_query(query));
                    }
                    TableEvent::Sort(field) => controller.toggle_sort(&field),
                    TableEvent::Resize(width) => {
                        controller.resize(width);
                    }
                    TableEvent::ToggleRow(id) => {
                        controller.toggle_row(&id);
                    }
                    TableEvent::Retry => issue(&mut fetches, &source, controller.retry()),
                    TableEvent::ClearFilters => {
                        debouncer.push(String::new());
                        issue(&mut fetches, &source, controller.clear_filters());
                    }
                }
            }
            Some(term) = settled.recv() => {
                let mut query = controller.query().clone();
                query.set_search(term);
                if &query == controller.query() {
                    continue;
                }
                issue(&mut fetches, &source, controller.set_query(query));
            }
            Some(joined) = fetches.join_next() => match joined {
                Ok((token, result)) => {
                    controller.resolve(token, result);
                }
                Err(err) => {
                    log::error!("{} fetch task failed: {err}", R::NOUN);
                    continue;
                }
            },
        }

        snapshots.send_replace(controller.clone());
    }
}
