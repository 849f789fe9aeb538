use crate::domain::{
    CHECK_INTERNET_CONNECTION_SUG, CHECK_PARAMETERS_SUG, RUN_LOGIN_SUG, RUN_TASK_LIST_SUG,
    WAIT_FOR_SUBMISSION_SUG,
};
use clap::{
    CommandFactory,
    builder::StyledStr,
    error::{ContextKind, ContextValue, ErrorFormatter, ErrorKind, RichFormatter},
};
use entities::{AutoError, Unit};
use std::fmt::Write;
use std::io::Write as IoWrite;
use tabled::{Table, Tabled, settings::Style};

#[derive(Debug, Clone, Copy)]
pub struct Printer;

impl Printer {
    pub fn stderr<T>(
        &self,
        error: &str,
        kind: ErrorKind,
        sugg: impl Into<Option<&'static str>>,
        is_fatal: bool,
    ) -> Unit
    where
        T: CommandFactory,
    {
        let mut cmd = T::command();
        let mut err = cmd.error(kind, error).apply::<RichFormatter>();

        if let Some(sugg) = sugg.into() {
            let mut suggestion = StyledStr::new();
            let _ = suggestion.write_str(sugg);

            err.insert(
                ContextKind::Suggested,
                ContextValue::StyledStrs(vec![suggestion]),
            );
        }

        if is_fatal {
            err.exit()
        } else {
            let s = RichFormatter::format_error(&err);
            eprintln!("{}", s.ansi());
        }
    }

    /// Renders an error with the suggestion that fits its kind, then exits.
    pub fn fail<T>(&self, error: &AutoError) -> Unit
    where
        T: CommandFactory,
    {
        let (kind, sugg) = match error {
            AutoError::Validation(_) | AutoError::InvalidArgument(_) => {
                (ErrorKind::InvalidValue, Some(CHECK_PARAMETERS_SUG))
            }
            AutoError::Api { status: None, .. } => {
                (ErrorKind::Io, Some(CHECK_INTERNET_CONNECTION_SUG))
            }
            AutoError::Api {
                status: Some(404), ..
            } => (ErrorKind::InvalidValue, Some(RUN_TASK_LIST_SUG)),
            AutoError::Api { .. } => (ErrorKind::Io, None),
            AutoError::Configuration(_) => (ErrorKind::Io, Some(RUN_LOGIN_SUG)),
            AutoError::Io(_) => (ErrorKind::Io, None),
            AutoError::Busy => (ErrorKind::Io, Some(WAIT_FOR_SUBMISSION_SUG)),
        };

        match error {
            AutoError::Validation(fields) => {
                let fields = fields
                    .iter()
                    .map(|f| format!("  {f}"))
                    .collect::<Vec<_>>()
                    .join("\n");

                self.stderr::<T>(&format!("Validation failed\n{fields}"), kind, sugg, true)
            }
            _ => self.stderr::<T>(&error.to_string(), kind, sugg, true),
        }
    }

    pub fn warn(&self, message: &str) -> Unit {
        eprintln!("warning: {}", message);
    }

    pub fn stdout(&self, message: &str) -> Unit {
        println!("{}", message);
    }

    pub fn table<T: Tabled>(&self, rows: impl IntoIterator<Item = T>) -> Unit {
        self.stdout(&Table::new(rows).with(Style::modern_rounded()).to_string());
    }

    pub fn write(&self, message: &str) -> Unit {
        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "{}", message);
        let _ = stdout.flush();
    }
}
