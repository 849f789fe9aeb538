use super::{Submitter, TaskListView, collect_pages, confirm};
use crate::{
    algebra::{Handler, TaskApi},
    domain::{
        ABORTED, ABOUT, AppContext, Auth, BALANCE_TOO_LOW_WARN, CliConfig, Http,
        RUN_TASK_LIST_AFTER_LOGIN_SUG, Server, TASK_NOT_CANCELLABLE_MESSAGE_ERR,
        TASK_NOT_RETRYABLE_MESSAGE_ERR, UNKNOWN_ACCOUNTS_WARN, UNKNOWN_CARD_WARN,
        URL_PROVIDED_IS_INVALID, WATCH_HINT,
    },
    service::Printer,
};
use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{PossibleValuesParser, TypedValueParser},
};
use clap_complete::Shell;
use entities::{
    AutoError, Balance, DEFAULT_PAGE, DEFAULT_TASK_ORDERING, Estimate, MAX_PAGE_SIZE,
    PRICING_TABLE, Page, PageQuery, Task, TaskDraft, TaskQuery, TaskRow, TaskStatus, TaskType,
    Unit,
};
use std::collections::HashSet;
use strum::IntoEnumIterator;
use tabled::Tabled;
use url::Url;

/// Create, price and follow Auto All System batch tasks from the terminal.
#[derive(Debug, Parser)]
#[command(name = "autoall", version)]
#[command(
    long_about = ABOUT
)]
pub struct AutoAll {
    #[command(subcommand)]
    command: Command,
}

impl AutoAll {
    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create, inspect and manage batch tasks.
    Task(TaskArgs),
    /// Browse the accounts tasks can target.
    Account(AccountArgs),
    /// Browse the virtual cards available to card tasks.
    Card(CardArgs),
    /// Show the current point balance.
    Balance,
    /// Configures the CLI. It truncates the configuration file and creates a new one.
    Login {
        /// API url of the backend, e.g. https://autoall.example.com/api/
        #[arg(short, long)]
        api: Option<String>,
        /// Bearer token issued by the backend
        #[arg(short, long)]
        token: String,
        /// Request timeout in milliseconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
#[command(flatten_help = true)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Create a task for a set of accounts
    Create {
        #[command(flatten)]
        draft: DraftArgs,
        /// Submit without asking for confirmation
        #[arg(short, long, default_value_t = false)]
        yes: bool,
    },
    /// Show what a task would cost, without submitting it
    Estimate {
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Show the unit cost of every task type
    Prices,
    /// List tasks
    List {
        #[command(flatten)]
        filter: ListArgs,
        /// Keep the list open and refresh it periodically
        #[arg(short, long, default_value_t = false)]
        watch: bool,
    },
    /// Cancel a pending or running task
    Cancel {
        id: u64,
        #[arg(short, long, default_value_t = false)]
        yes: bool,
    },
    /// Create a new task for the accounts a task failed on
    Retry {
        id: u64,
        #[command(flatten)]
        config: ConfigArgs,
        #[arg(short, long, default_value_t = false)]
        yes: bool,
    },
    /// Delete a task
    Delete {
        id: u64,
        #[arg(short, long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
struct DraftArgs {
    /// Kind of work to run
    #[arg(short = 't', long = "type", value_parser = task_type_parser())]
    task_type: TaskType,
    /// Target account id. Repeat the flag or separate ids with commas
    #[arg(short, long = "account", value_delimiter = ',')]
    accounts: Vec<u64>,
    #[command(flatten)]
    config: ConfigArgs,
}

impl DraftArgs {
    fn draft(&self) -> TaskDraft {
        let mut draft = TaskDraft::new(self.task_type);
        draft.select_all(self.accounts.iter().copied());
        self.config.apply(&mut draft);
        draft
    }
}

#[derive(Debug, Args)]
struct ConfigArgs {
    /// API key, used by verify and one_click tasks
    #[arg(long)]
    api_key: Option<String>,
    /// Card to bind, used by bind_card and one_click tasks
    #[arg(long)]
    card_id: Option<u64>,
}

impl ConfigArgs {
    /// Overrides only the fields that were given.
    fn apply(&self, draft: &mut TaskDraft) {
        if let Some(api_key) = &self.api_key {
            draft.set_api_key(Some(api_key.clone()));
        }
        if let Some(card_id) = self.card_id {
            draft.set_card_id(Some(card_id));
        }
        // Re-applying the type drops whichever fields it does not use.
        draft.set_task_type(draft.task_type());
    }
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Only show tasks of this type
    #[arg(short = 't', long = "type", value_parser = task_type_parser())]
    task_type: Option<TaskType>,
    /// Only show tasks in this state
    #[arg(short, long, value_parser = task_status_parser())]
    status: Option<TaskStatus>,
    /// Sort key; prefix with `-` for descending order
    #[arg(short, long, default_value = DEFAULT_TASK_ORDERING, allow_hyphen_values = true)]
    ordering: String,
    #[command(flatten)]
    page: PageArgs,
}

#[derive(Debug, Args)]
struct PageArgs {
    #[arg(short, long, default_value_t = DEFAULT_PAGE, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
    /// Defaults to `poll.page_size` from the configuration
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_PAGE_SIZE as i64))]
    page_size: Option<u32>,
}

impl PageArgs {
    fn query(&self, ctx: &AppContext) -> PageQuery {
        PageQuery {
            page: self.page,
            page_size: self
                .page_size
                .unwrap_or_else(|| ctx.config().poll().page_size()),
        }
    }
}

#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
#[command(flatten_help = true)]
pub struct AccountArgs {
    #[command(subcommand)]
    command: ListCommand,
}

#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
#[command(flatten_help = true)]
pub struct CardArgs {
    #[command(subcommand)]
    command: ListCommand,
}

#[derive(Debug, Subcommand)]
enum ListCommand {
    /// List one page of records
    List {
        #[command(flatten)]
        page: PageArgs,
    },
}

fn task_type_parser() -> impl TypedValueParser<Value = TaskType> {
    PossibleValuesParser::new(TaskType::iter().map(<&'static str>::from))
        .try_map(|s| s.parse::<TaskType>())
}

fn task_status_parser() -> impl TypedValueParser<Value = TaskStatus> {
    PossibleValuesParser::new(TaskStatus::iter().map(<&'static str>::from))
        .try_map(|s| s.parse::<TaskStatus>())
}

#[derive(Debug, Tabled)]
struct PriceRow {
    #[tabled(rename = "Type")]
    task_type: TaskType,
    #[tabled(rename = "Unit cost")]
    unit_cost: u64,
    #[tabled(rename = "Requires")]
    requires: String,
}

#[derive(Debug, Tabled)]
struct EstimateRow {
    #[tabled(rename = "Type")]
    task_type: TaskType,
    #[tabled(rename = "Unit cost")]
    unit_cost: u64,
    #[tabled(rename = "Accounts")]
    targets: usize,
    #[tabled(rename = "Estimated cost")]
    total: u64,
}

impl From<&Estimate> for EstimateRow {
    fn from(estimate: &Estimate) -> Self {
        Self {
            task_type: estimate.task_type(),
            unit_cost: estimate.unit_cost(),
            targets: estimate.targets(),
            total: estimate.total(),
        }
    }
}

impl Handler<AppContext> for AutoAll {
    async fn load(&self) -> Result<AppContext, AutoError> {
        match self.command() {
            Command::Login {
                api,
                token,
                timeout,
            } => {
                let server = api.clone().map(Server::new).unwrap_or_default();
                let config = CliConfig::new(
                    server,
                    Auth::new(Some(token.clone())),
                    Http::new(*timeout),
                );

                AppContext::new(config)
            }
            Command::Completions { .. }
            | Command::Task(TaskArgs {
                command: TaskCommand::Estimate { .. } | TaskCommand::Prices,
            }) => AppContext::new(CliConfig::default()),
            _ => AppContext::new(CliConfig::load()?),
        }
    }

    async fn validate(&self, _: &AppContext) -> Result<Unit, AutoError> {
        match self.command() {
            Command::Login { api, .. } => {
                if let Some(api) = api {
                    Url::parse(api).map_err(|e| {
                        AutoError::invalid_argument(&format!("{URL_PROVIDED_IS_INVALID}: {e}"))
                    })?;
                }

                Ok(())
            }
            Command::Task(TaskArgs {
                command: TaskCommand::Create { draft, .. },
            }) => draft.draft().validate(),
            _ => Ok(()),
        }
    }

    async fn run(&self, ctx: &AppContext) -> Result<Unit, AutoError> {
        let printer = ctx.printer();

        match self.command() {
            Command::Login { .. } => {
                let path = ctx.config().save()?;

                printer.stdout(&format!("Configuration written to {}", path.display()));
                printer.stdout(RUN_TASK_LIST_AFTER_LOGIN_SUG);

                Ok(())
            }
            Command::Completions { shell } => {
                clap_complete::generate(
                    *shell,
                    &mut <AutoAll as CommandFactory>::command(),
                    "autoall",
                    &mut std::io::stdout(),
                );

                Ok(())
            }
            Command::Balance => {
                let Balance { balance } = ctx.api().balance().await?;
                printer.stdout(&format!("Balance: {balance}"));

                Ok(())
            }
            Command::Account(AccountArgs {
                command: ListCommand::List { page },
            }) => {
                let query = page.query(ctx);
                let accounts = ctx.api().list_accounts(&query).await?;

                printer.table(accounts.results());
                printer.stdout(&footer(&accounts, &query, "accounts"));

                Ok(())
            }
            Command::Card(CardArgs {
                command: ListCommand::List { page },
            }) => {
                let query = page.query(ctx);
                let cards = ctx.api().list_cards(&query).await?;

                printer.table(cards.results());
                printer.stdout(&footer(&cards, &query, "cards"));

                Ok(())
            }
            Command::Task(TaskArgs { command }) => run_task(command, ctx).await,
        }
    }
}

async fn run_task(command: &TaskCommand, ctx: &AppContext) -> Result<Unit, AutoError> {
    let printer = ctx.printer();
    let api = ctx.api();

    match command {
        TaskCommand::Prices => {
            printer.table(PRICING_TABLE.iter().map(|(task_type, unit_cost)| PriceRow {
                task_type: *task_type,
                unit_cost: *unit_cost,
                requires: task_type
                    .required_fields()
                    .iter()
                    .map(|f| f.key())
                    .collect::<Vec<_>>()
                    .join(", "),
            }));

            Ok(())
        }
        TaskCommand::Estimate { draft } => {
            printer.table([EstimateRow::from(&Estimate::of(&draft.draft()))]);

            Ok(())
        }
        TaskCommand::Create { draft, yes } => {
            let draft = draft.draft();
            let (accounts, cards, balance) = tokio::try_join!(
                collect_pages(|page| async move { api.list_accounts(&page).await }),
                collect_pages(|page| async move { api.list_cards(&page).await }),
                api.balance()
            )?;

            let known = accounts.iter().map(|a| a.id).collect::<HashSet<_>>();
            let unknown = draft
                .target_ids()
                .iter()
                .filter(|id| !known.contains(id))
                .map(|id| id.to_string())
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                printer.warn(&format!("{UNKNOWN_ACCOUNTS_WARN}{}", unknown.join(", ")));
            }

            if let Some(card_id) = draft.config().card_id() {
                if !cards.iter().any(|c| c.id == card_id) {
                    printer.warn(&format!("{UNKNOWN_CARD_WARN}{card_id}"));
                }
            }

            submit(ctx, &draft, Some(balance), *yes).await
        }
        TaskCommand::List { filter, watch } => {
            let query = TaskQuery {
                task_type: filter.task_type,
                status: filter.status,
                ordering: Some(filter.ordering.clone()),
                page: filter.page.query(ctx),
            };

            if *watch {
                watch_tasks(ctx, query).await
            } else {
                let tasks = api.list_tasks(&query).await?;
                print_tasks(printer, &tasks, &query.page);

                Ok(())
            }
        }
        TaskCommand::Cancel { id, yes } => {
            let task = api.get_task(*id).await?;

            if !task.can_cancel() {
                return Err(AutoError::invalid_argument(&format!(
                    "{TASK_NOT_CANCELLABLE_MESSAGE_ERR}{} is {}",
                    task.id, task.status
                )));
            }

            if !*yes && !confirm(printer, &format!("Cancel task {id}?"))? {
                printer.stdout(ABORTED);
                return Ok(());
            }

            api.cancel_task(*id).await?;
            printer.stdout(&format!("Cancellation requested for task {id}."));

            refresh(ctx).await
        }
        TaskCommand::Retry { id, config, yes } => {
            let task = api.get_task(*id).await?;

            if !task.can_retry() {
                return Err(AutoError::invalid_argument(&format!(
                    "{TASK_NOT_RETRYABLE_MESSAGE_ERR}{} has no failed accounts of a known type",
                    task.id
                )));
            }

            let mut draft = task.retry_draft()?;
            config.apply(&mut draft);

            submit(ctx, &draft, None, *yes).await
        }
        TaskCommand::Delete { id, yes } => {
            if !*yes && !confirm(printer, &format!("Delete task {id}?"))? {
                printer.stdout(ABORTED);
                return Ok(());
            }

            api.delete_task(*id).await?;
            printer.stdout(&format!("Task {id} deleted."));

            refresh(ctx).await
        }
    }
}

async fn submit(
    ctx: &AppContext,
    draft: &TaskDraft,
    balance: Option<Balance>,
    yes: bool,
) -> Result<Unit, AutoError> {
    let printer = ctx.printer();

    // Recomputed here so the figure shown matches the draft actually sent.
    let estimate = Estimate::of(draft);
    printer.table([EstimateRow::from(&estimate)]);

    if let Some(Balance { balance }) = balance {
        printer.stdout(&format!("Balance: {balance}"));

        if estimate.exceeds(balance) {
            printer.warn(BALANCE_TOO_LOW_WARN);
        }
    }

    if !yes && !confirm(printer, "Submit this task?")? {
        printer.stdout(ABORTED);
        return Ok(());
    }

    let submission = Submitter::new(ctx.api().clone()).submit(draft).await?;

    printer.stdout("The following task was created:");
    printer.table([TaskRow::from(&submission.task)]);

    refresh(ctx).await
}

/// Shows the first page of the task list, as the list view does after every action.
async fn refresh(ctx: &AppContext) -> Result<Unit, AutoError> {
    let query = TaskQuery {
        page: PageQuery {
            page: DEFAULT_PAGE,
            page_size: ctx.config().poll().page_size(),
        },
        ..TaskQuery::default()
    };

    let tasks = ctx.api().list_tasks(&query).await?;
    print_tasks(ctx.printer(), &tasks, &query.page);

    Ok(())
}

async fn watch_tasks(ctx: &AppContext, query: TaskQuery) -> Result<Unit, AutoError> {
    let printer = ctx.printer();
    let view = TaskListView::mount(ctx.api().clone(), query, ctx.config().poll().interval());
    let mut state = view.subscribe();

    printer.stdout(WATCH_HINT);

    loop {
        tokio::select! {
            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }

                let snapshot = state.borrow_and_update().clone();
                match (&snapshot.error, &snapshot.query) {
                    (Some(e), _) => printer.warn(&e.to_string()),
                    (None, Some(query)) => print_tasks(printer, &snapshot.page, &query.page),
                    (None, None) => {}
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    view.unmount().await;

    Ok(())
}

fn print_tasks(printer: &Printer, tasks: &Page<Task>, query: &PageQuery) {
    printer.table(tasks.results().iter().map(TaskRow::from));
    printer.stdout(&footer(tasks, query, "tasks"));
}

fn footer<T>(page: &Page<T>, query: &PageQuery, noun: &str) -> String {
    let pages = page.count().div_ceil(u64::from(query.page_size)).max(1);

    format!(
        "Page {} of {} ({} {noun})",
        query.page,
        pages,
        page.count()
    )
}
