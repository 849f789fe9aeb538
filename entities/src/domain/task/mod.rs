mod draft;
mod estimate;
mod payload;
mod pricing;

pub use draft::*;
pub use estimate::*;
pub use payload::*;
pub use pricing::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};
use tabled::Tabled;

/// Category of batch work. Drives both the unit cost and which config fields apply.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskType {
    Login,
    GetLink,
    Verify,
    BindCard,
    OneClick,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Running,
    Success,
    Failed,
    Cancelled,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskStatus::Success | TaskStatus::Failed | TaskStatus::Cancelled
        )
    }
}

/// A task as reported by the backend. The client never changes `status` itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    /// Raw tag as sent by the server; it may name a type this client does not know.
    pub task_type: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub success_count: u64,
    #[serde(default)]
    pub failed_count: u64,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub cost: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub failed_account_ids: Vec<u64>,
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl Task {
    pub fn kind(&self) -> Option<TaskType> {
        self.task_type.parse().ok()
    }

    pub fn can_cancel(&self) -> bool {
        !self.status.is_terminal()
    }

    pub fn can_retry(&self) -> bool {
        self.kind().is_some() && !self.failed_account_ids.is_empty()
    }

    pub fn progress(&self) -> String {
        format!(
            "{}/{} ({} failed)",
            self.success_count, self.total_count, self.failed_count
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
#[tabled(rename_all = "PascalCase")]
pub struct TaskRow {
    id: u64,
    #[tabled(rename = "Type")]
    task_type: String,
    status: TaskStatus,
    progress: String,
    cost: u64,
    created: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            task_type: task.task_type.clone(),
            status: task.status,
            progress: task.progress(),
            cost: task.cost,
            created: task.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}
