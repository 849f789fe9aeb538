use super::{TaskDraft, TaskType, unit_cost_of};

pub fn estimated_cost(task_type: TaskType, targets: usize) -> u64 {
    task_type.unit_cost() * targets as u64
}

/// Same as [`estimated_cost`] for a raw tag; unknown tags estimate to zero.
pub fn estimated_cost_of(tag: &str, targets: usize) -> u64 {
    unit_cost_of(tag) * targets as u64
}

/// Snapshot of the inputs of a cost estimate together with its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimate {
    task_type: TaskType,
    unit_cost: u64,
    targets: usize,
    total: u64,
}

impl Estimate {
    pub fn of(draft: &TaskDraft) -> Self {
        let task_type = draft.task_type();
        let targets = draft.target_ids().len();

        Self {
            task_type,
            unit_cost: task_type.unit_cost(),
            targets,
            total: estimated_cost(task_type, targets),
        }
    }

    pub fn task_type(&self) -> TaskType {
        self.task_type
    }

    pub fn unit_cost(&self) -> u64 {
        self.unit_cost
    }

    pub fn targets(&self) -> usize {
        self.targets
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn exceeds(&self, balance: f64) -> bool {
        self.total as f64 > balance
    }
}
