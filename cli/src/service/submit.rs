use crate::algebra::TaskApi;
use entities::{AutoError, Estimate, Task, TaskDraft};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tracing::{info, warn};

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub task: Task,
    /// Estimate computed from the draft right before the request went out.
    pub estimate: Estimate,
}

/// Turns drafts into create-task requests, one request per attempt and never more than one
/// in flight.
pub struct Submitter<A> {
    api: Arc<A>,
    in_flight: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<A: TaskApi> Submitter<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn submit(&self, draft: &TaskDraft) -> Result<Submission, AutoError> {
        draft.validate()?;

        if self.in_flight.swap(true, Ordering::AcqRel) {
            warn!("Rejected a submission while another one is in flight");
            return Err(AutoError::Busy);
        }
        let _guard = InFlight(&self.in_flight);

        let estimate = Estimate::of(draft);
        let payload = draft.payload();

        info!(
            task_type = %payload.task_type,
            targets = payload.account_ids.len(),
            estimated_cost = estimate.total(),
            "Submitting task"
        );

        let task = self.api.create_task(&payload).await?;

        info!(task_id = task.id, "Task created");

        Ok(Submission { task, estimate })
    }
}
