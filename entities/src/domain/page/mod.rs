use crate::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_TASK_ORDERING, ORDERING_FILTER, PAGE_FILTER,
    PAGE_SIZE_FILTER, STATUS_FILTER, TASK_TYPE_FILTER, TaskStatus, TaskType,
};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// List envelope returned by every paginated endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub count: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            count: 0,
        }
    }
}

impl<T> Page<T> {
    pub fn results(&self) -> &[T] {
        &self.results
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (PAGE_FILTER, self.page.to_string()),
            (PAGE_SIZE_FILTER, self.page_size.to_string()),
        ]
    }
}

/// Combined filter, sort and pagination state of the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    pub task_type: Option<TaskType>,
    pub status: Option<TaskStatus>,
    pub ordering: Option<String>,
    pub page: PageQuery,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            task_type: None,
            status: None,
            ordering: Some(DEFAULT_TASK_ORDERING.to_string()),
            page: PageQuery::default(),
        }
    }
}

impl TaskQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.page.to_pairs();

        push_some(&mut pairs, ORDERING_FILTER, self.ordering.as_ref());
        push_some(&mut pairs, TASK_TYPE_FILTER, self.task_type.as_ref());
        push_some(&mut pairs, STATUS_FILTER, self.status.as_ref());

        pairs
    }
}

fn push_some<T: Display>(
    pairs: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: Option<&T>,
) {
    if let Some(value) = value {
        pairs.push((key, value.to_string()));
    }
}

pub fn display_option<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}
