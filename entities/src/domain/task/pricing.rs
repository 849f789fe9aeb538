use super::TaskType;

/// Unit cost, in balance points, charged per target account.
pub const PRICING_TABLE: [(TaskType, u64); 5] = [
    (TaskType::Login, 1),
    (TaskType::GetLink, 2),
    (TaskType::Verify, 5),
    (TaskType::BindCard, 10),
    (TaskType::OneClick, 18),
];

impl TaskType {
    pub fn unit_cost(&self) -> u64 {
        PRICING_TABLE
            .iter()
            .find(|(t, _)| t == self)
            .map(|(_, cost)| *cost)
            .unwrap_or_default()
    }
}

/// Unit cost for a raw tag. Tags this client does not know are free.
pub fn unit_cost_of(tag: &str) -> u64 {
    tag.parse::<TaskType>()
        .map(|t| t.unit_cost())
        .unwrap_or_default()
}
