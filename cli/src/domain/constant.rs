use std::time::Duration;

// Configuration
pub const CONFIG_FILE_NAME: &str = "credentials.toml";
pub const CONFIG_FILE_PATH: &str = ".autoall";
pub const CONFIG_ENV_PREFIX: &str = "AUTOALL";
pub const LOG_ENV_VAR: &str = "AUTOALL_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const DEFAULT_API: &str = "http://localhost:8000/api/";
pub const DEFAULT_TIMEOUT_MS: u64 = 30000;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

// Endpoints, relative to the configured API base
pub const TASKS_PATH: &str = "tasks/";
pub const ACCOUNTS_PATH: &str = "accounts/";
pub const CARDS_PATH: &str = "cards/";
pub const BALANCE_PATH: &str = "balance/";

// Error messages
pub const CONFIG_NOT_FOUND_MESSAGE_ERR: &str = "You don't seem to have a configuration file.";
pub const CONFIG_INVALID_MESSAGE_ERR: &str = "Could not read the configuration file: ";
pub const HOME_NOT_FOUND_MESSAGE_ERR: &str = "Could not find the home directory";
pub const URL_PROVIDED_IS_INVALID: &str = "URL provided is invalid";
pub const REQUEST_FAILED_MESSAGE_ERR: &str = "Request failed";
pub const TASK_NOT_RETRYABLE_MESSAGE_ERR: &str = "Task cannot be retried: ";
pub const TASK_NOT_CANCELLABLE_MESSAGE_ERR: &str = "Task is already finished: ";
pub const BALANCE_TOO_LOW_WARN: &str = "The estimated cost exceeds your current balance";
pub const UNKNOWN_ACCOUNTS_WARN: &str = "Accounts not found among the loaded accounts: ";
pub const UNKNOWN_CARD_WARN: &str = "Card not found among the loaded cards: ";

// Suggestions
pub const RUN_LOGIN_SUG: &str = "Run `autoall login` to create a configuration file.";
pub const CHECK_INTERNET_CONNECTION_SUG: &str = "Check your internet connection and try again";
pub const CHECK_PARAMETERS_SUG: &str = "Check the parameters and try again";
pub const RUN_TASK_LIST_SUG: &str = "Run `autoall task list` to check your tasks";
pub const WAIT_FOR_SUBMISSION_SUG: &str = "Wait for the pending submission to finish";
pub const RUN_TASK_LIST_AFTER_LOGIN_SUG: &str =
    "The configuration file was successfully created. Try listing your tasks with `autoall task list`";

// Instructions
pub const CONFIRM_SUFFIX: &str = " [y/N]: ";
pub const ABORTED: &str = "Aborted.";
pub const WATCH_HINT: &str = "Press Ctrl-C to stop watching.";

// Metadata
pub const ABOUT: &str = "Create, price and follow Auto All System batch tasks from the terminal.";
