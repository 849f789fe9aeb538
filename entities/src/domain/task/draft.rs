use super::TaskType;
use crate::{
    ACCOUNT_IDS_KEY, API_KEY_KEY, API_KEY_REQUIRED_ERR, AutoError, CARD_ID_KEY,
    CARD_ID_REQUIRED_ERR, FieldError, FieldErrors, NO_TARGETS_SELECTED_ERR, Unit,
};
use std::collections::BTreeSet;

/// Optional configuration keys a task type may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    ApiKey,
    CardId,
}

impl ConfigField {
    pub fn key(&self) -> &'static str {
        match self {
            ConfigField::ApiKey => API_KEY_KEY,
            ConfigField::CardId => CARD_ID_KEY,
        }
    }
}

impl TaskType {
    pub fn required_fields(&self) -> &'static [ConfigField] {
        match self {
            TaskType::Login | TaskType::GetLink => &[],
            TaskType::Verify => &[ConfigField::ApiKey],
            TaskType::BindCard => &[ConfigField::CardId],
            TaskType::OneClick => &[ConfigField::ApiKey, ConfigField::CardId],
        }
    }

    pub fn requires(&self, field: ConfigField) -> bool {
        self.required_fields().contains(&field)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftConfig {
    api_key: Option<String>,
    card_id: Option<u64>,
}

impl DraftConfig {
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn card_id(&self) -> Option<u64> {
        self.card_id
    }
}

/// Unsaved state of a task about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    task_type: TaskType,
    target_ids: BTreeSet<u64>,
    config: DraftConfig,
}

impl TaskDraft {
    pub fn new(task_type: TaskType) -> Self {
        Self {
            task_type,
            target_ids: BTreeSet::new(),
            config: DraftConfig::default(),
        }
    }

    pub fn task_type(&self) -> TaskType {
        self.task_type
    }

    pub fn target_ids(&self) -> &BTreeSet<u64> {
        &self.target_ids
    }

    pub fn config(&self) -> &DraftConfig {
        &self.config
    }

    /// Switches the task type and drops every config field the new type does not use.
    pub fn set_task_type(&mut self, task_type: TaskType) {
        self.task_type = task_type;

        if !task_type.requires(ConfigField::ApiKey) {
            self.config.api_key = None;
        }
        if !task_type.requires(ConfigField::CardId) {
            self.config.card_id = None;
        }
    }

    pub fn set_api_key(&mut self, api_key: Option<String>) {
        self.config.api_key = api_key;
    }

    pub fn set_card_id(&mut self, card_id: Option<u64>) {
        self.config.card_id = card_id;
    }

    pub fn select(&mut self, id: u64) -> bool {
        self.target_ids.insert(id)
    }

    pub fn deselect(&mut self, id: u64) -> bool {
        self.target_ids.remove(&id)
    }

    pub fn select_all(&mut self, ids: impl IntoIterator<Item = u64>) {
        self.target_ids.extend(ids);
    }

    pub fn clear_selection(&mut self) {
        self.target_ids.clear();
    }

    pub fn validate(&self) -> Result<Unit, AutoError> {
        let mut errors = FieldErrors::default();

        if self.target_ids.is_empty() {
            errors.push(FieldError::new(ACCOUNT_IDS_KEY, NO_TARGETS_SELECTED_ERR));
        }

        let has_api_key = self
            .config
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty());
        if self.task_type.requires(ConfigField::ApiKey) && !has_api_key {
            errors.push(FieldError::new(API_KEY_KEY, API_KEY_REQUIRED_ERR));
        }

        if self.task_type.requires(ConfigField::CardId) && self.config.card_id.is_none() {
            errors.push(FieldError::new(CARD_ID_KEY, CARD_ID_REQUIRED_ERR));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.into())
        }
    }
}
