use crate::{
    domain::config::CliConfig,
    service::{HttpApi, Printer},
};
use entities::AutoError;
use std::sync::Arc;

/// Everything a command needs, handed in explicitly instead of living in globals.
pub struct AppContext {
    config: CliConfig,
    printer: Printer,
    api: Arc<HttpApi>,
}

impl AppContext {
    pub fn new(config: CliConfig) -> Result<AppContext, AutoError> {
        let api = HttpApi::new(
            config.server().api(),
            config.auth().token().map(str::to_string),
            config.http().timeout(),
        )?;

        Ok(AppContext {
            config,
            printer: Printer,
            api: Arc::new(api),
        })
    }

    pub fn printer(&self) -> &Printer {
        &self.printer
    }

    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    pub fn api(&self) -> &Arc<HttpApi> {
        &self.api
    }
}
