use super::{Submission, Submitter};
use crate::algebra::TaskApi;
use entities::{AutoError, Page, Task, TaskQuery, TaskStatus, TaskType, Unit};
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::{Notify, watch},
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// What the list currently shows: the last response, verbatim, and the query it answers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
    pub query: Option<TaskQuery>,
    pub page: Page<Task>,
    pub error: Option<AutoError>,
}

/// A mounted task list. Fetches once on mount, once per query change, once per interval tick,
/// and after every successful row action. Dropping it stops all of that.
pub struct TaskListView<A> {
    api: Arc<A>,
    submitter: Submitter<A>,
    query: watch::Sender<TaskQuery>,
    state: watch::Receiver<ListState>,
    refresh: Arc<Notify>,
    token: CancellationToken,
    handle: Option<JoinHandle<Unit>>,
}

impl<A> TaskListView<A>
where
    A: TaskApi + 'static,
{
    pub fn mount(api: Arc<A>, query: TaskQuery, period: Duration) -> Self {
        let (query_tx, query_rx) = watch::channel(query);
        let (state_tx, state_rx) = watch::channel(ListState::default());
        let refresh = Arc::new(Notify::new());
        let token = CancellationToken::new();

        let handle = tokio::spawn(poll(
            api.clone(),
            query_rx,
            state_tx,
            refresh.clone(),
            token.clone(),
            period,
        ));

        Self {
            submitter: Submitter::new(api.clone()),
            api,
            query: query_tx,
            state: state_rx,
            refresh,
            token,
            handle: Some(handle),
        }
    }

    pub fn query(&self) -> TaskQuery {
        self.query.borrow().clone()
    }

    pub fn state(&self) -> ListState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.state.clone()
    }

    pub fn set_task_type(&self, task_type: Option<TaskType>) {
        self.update(|q| replace(&mut q.task_type, task_type));
    }

    pub fn set_status(&self, status: Option<TaskStatus>) {
        self.update(|q| replace(&mut q.status, status));
    }

    pub fn set_ordering(&self, ordering: Option<String>) {
        self.update(|q| replace(&mut q.ordering, ordering));
    }

    pub fn set_page(&self, page: u32) {
        self.update(|q| replace(&mut q.page.page, page));
    }

    pub fn set_page_size(&self, page_size: u32) {
        self.update(|q| replace(&mut q.page.page_size, page_size));
    }

    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    pub async fn cancel(&self, id: u64) -> Result<Unit, AutoError> {
        self.api.cancel_task(id).await?;
        self.refresh();

        Ok(())
    }

    pub async fn delete(&self, id: u64) -> Result<Unit, AutoError> {
        self.api.delete_task(id).await?;
        self.refresh();

        Ok(())
    }

    /// Submits a new task scoped to the accounts `task` failed on.
    pub async fn retry(&self, task: &Task) -> Result<Submission, AutoError> {
        let draft = task.retry_draft()?;
        let submission = self.submitter.submit(&draft).await?;
        self.refresh();

        Ok(submission)
    }

    /// Stops polling. Equivalent to dropping the view, but waits for the task to finish.
    pub async fn unmount(mut self) {
        self.token.cancel();

        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    fn update(&self, f: impl FnOnce(&mut TaskQuery) -> bool) {
        self.query.send_if_modified(f);
    }
}

impl<A> Drop for TaskListView<A> {
    fn drop(&mut self) {
        self.token.cancel();

        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

async fn poll<A>(
    api: Arc<A>,
    mut query: watch::Receiver<TaskQuery>,
    state: watch::Sender<ListState>,
    refresh: Arc<Notify>,
    token: CancellationToken,
    period: Duration,
) where
    A: TaskApi + 'static,
{
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut in_flight = fetch(
        api.clone(),
        query.borrow_and_update().clone(),
        state.clone(),
        token.clone(),
    );

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            changed = query.changed() => {
                if changed.is_err() {
                    break;
                }
                trace!("Task query changed");
            }
            _ = ticker.tick() => trace!("Poll interval elapsed"),
            _ = refresh.notified() => trace!("Refresh requested"),
        }

        if !in_flight.is_finished() {
            debug!("Discarding a task list fetch that is still in flight");
            in_flight.abort();
        }

        in_flight = fetch(
            api.clone(),
            query.borrow_and_update().clone(),
            state.clone(),
            token.clone(),
        );
    }

    in_flight.abort();
    debug!("Task list unmounted");
}

fn fetch<A>(
    api: Arc<A>,
    query: TaskQuery,
    state: watch::Sender<ListState>,
    token: CancellationToken,
) -> JoinHandle<Unit>
where
    A: TaskApi + 'static,
{
    tokio::spawn(async move {
        let result = tokio::select! {
            _ = token.cancelled() => {
                trace!("Task list fetch cancelled");
                return;
            }
            result = api.list_tasks(&query) => result,
        };

        state.send_modify(|s| {
            match result {
                Ok(page) => {
                    s.page = page;
                    s.error = None;
                }
                Err(e) => {
                    warn!("Could not refresh the task list: {e}");
                    s.error = Some(e);
                }
            }
            s.query = Some(query);
        });
    })
}
