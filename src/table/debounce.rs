use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Quiet period applied to free-text search input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Emits a pushed value only after no newer value arrived for `delay`.
///
/// Every push restarts the quiet window. Settled values are emitted even when
/// they repeat an earlier one; the consumer owns the current state and
/// decides whether a value changes it. Dropping the debouncer cancels any
/// pending emission.
#[derive(Debug)]
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
    T: Send + 'static,
{
    pub fn spawn(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input, input_rx) = mpsc::unbounded_channel();
        let (output, output_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(delay, input_rx, output));

        (Self { input, task }, output_rx)
    }

    pub fn push(&self, value: T) {
        if self.input.send(value).is_err() {
            log::debug!("Debouncer task already stopped");
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<T>(
    delay: Duration,
    mut input: mpsc::UnboundedReceiver<T>,
    output: mpsc::UnboundedSender<T>,
) where
    T: Send + 'static,
{
    let mut pending: Option<T> = None;

    loop {
        let Some(value) = pending.take() else {
            match input.recv().await {
                Some(value) => pending = Some(value),
                None => return,
            }
            continue;
        };

        tokio::select! {
            next = input.recv() => match next {
                Some(newer) => pending = Some(newer),
                None => return,
            },
            _ = sleep(delay) => {
                if output.send(value).is_err() {
                    return;
                }
            }
        }
    }
}
