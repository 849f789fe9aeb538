// Query parameter constants
pub const PAGE_FILTER: &str = "page";
pub const PAGE_SIZE_FILTER: &str = "page_size";
pub const ORDERING_FILTER: &str = "ordering";
pub const TASK_TYPE_FILTER: &str = "task_type";
pub const STATUS_FILTER: &str = "status";

// Pagination constants
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_TASK_ORDERING: &str = "-created_at";

// Payload keys
pub const ACCOUNT_IDS_KEY: &str = "account_ids";
pub const API_KEY_KEY: &str = "api_key";
pub const CARD_ID_KEY: &str = "card_id";
pub const ERROR_KEY: &str = "error";

// Validation messages
pub const NO_TARGETS_SELECTED_ERR: &str = "Select at least one account";
pub const API_KEY_REQUIRED_ERR: &str = "An API key is required for this task type";
pub const CARD_ID_REQUIRED_ERR: &str = "A card is required for this task type";
pub const NOTHING_TO_RETRY_ERR: &str = "The task has no failed accounts to retry";
pub const UNKNOWN_TASK_TYPE_ERR: &str = "Unknown task type: ";
