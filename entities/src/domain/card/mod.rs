use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::display_option;

/// A virtual card that `bind_card` and `one_click` tasks attach to accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
#[tabled(rename_all = "PascalCase")]
pub struct Card {
    pub id: u64,
    #[tabled(rename = "Number", display_with = "mask_card_number")]
    pub card_number: String,
    #[serde(default)]
    #[tabled(display_with = "display_option")]
    pub holder: Option<String>,
    #[serde(default)]
    pub status: String,
}

/// Keeps the last four digits only.
pub fn mask_card_number(number: &str) -> String {
    let digits = number
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<Vec<_>>();

    match digits.len() {
        0..=4 => "*".repeat(digits.len()),
        n => format!("**** {}", digits[n - 4..].iter().collect::<String>()),
    }
}
