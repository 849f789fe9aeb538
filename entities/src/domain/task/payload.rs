use super::{ConfigField, Task, TaskDraft, TaskType};
use crate::{AutoError, NOTHING_TO_RETRY_ERR, UNKNOWN_TASK_TYPE_ERR};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of the create-task request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub task_type: TaskType,
    pub account_ids: Vec<u64>,
    pub config: Map<String, Value>,
}

impl TaskDraft {
    /// Builds the request body. Config keys the task type does not use are never included.
    pub fn payload(&self) -> CreateTaskRequest {
        let task_type = self.task_type();
        let config = task_type
            .required_fields()
            .iter()
            .filter_map(|field| {
                let value = match field {
                    ConfigField::ApiKey => self.config().api_key().map(Value::from),
                    ConfigField::CardId => self.config().card_id().map(Value::from),
                };

                value.map(|v| (field.key().to_string(), v))
            })
            .collect::<Map<String, Value>>();

        CreateTaskRequest {
            task_type,
            account_ids: self.target_ids().iter().copied().collect(),
            config,
        }
    }
}

impl Task {
    /// Draft for a new task covering exactly the accounts this one failed on.
    pub fn retry_draft(&self) -> Result<TaskDraft, AutoError> {
        let task_type = self.kind().ok_or_else(|| {
            AutoError::invalid_argument(&format!("{UNKNOWN_TASK_TYPE_ERR}{}", self.task_type))
        })?;

        if self.failed_account_ids.is_empty() {
            return Err(AutoError::invalid_argument(NOTHING_TO_RETRY_ERR));
        }

        let mut draft = TaskDraft::new(task_type);
        draft.select_all(self.failed_account_ids.iter().copied());
        draft.set_api_key(
            self.config
                .get(ConfigField::ApiKey.key())
                .and_then(Value::as_str)
                .map(str::to_string),
        );
        draft.set_card_id(
            self.config
                .get(ConfigField::CardId.key())
                .and_then(Value::as_u64),
        );

        Ok(draft)
    }
}
