use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::display_option;

/// A Google account that can be targeted by a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
#[tabled(rename_all = "PascalCase")]
pub struct Account {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    #[tabled(rename = "Created", display_with = "display_created")]
    pub created_at: Option<DateTime<Utc>>,
}

fn display_created(created_at: &Option<DateTime<Utc>>) -> String {
    display_option(&created_at.map(|c| c.format("%Y-%m-%d")))
}

/// Point balance of the signed-in operator; task costs are charged against it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub balance: f64,
}
