use crate::domain::constant::{
    CONFIG_ENV_PREFIX, CONFIG_FILE_NAME, CONFIG_FILE_PATH, CONFIG_INVALID_MESSAGE_ERR,
    CONFIG_NOT_FOUND_MESSAGE_ERR, DEFAULT_API, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT_MS,
    HOME_NOT_FOUND_MESSAGE_ERR,
};
use config::{Config, Environment, Source};
use directories::BaseDirs;
use entities::{AutoError, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::{
    fs::{File, create_dir_all},
    io::Write,
    path::PathBuf,
    time::Duration,
};

#[derive(Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    server: Server,
    #[serde(default)]
    auth: Auth,
    #[serde(default)]
    http: Http,
    #[serde(default)]
    poll: Poll,
}

#[derive(Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct Server {
    api: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            api: DEFAULT_API.to_string(),
        }
    }
}

impl Server {
    pub fn new(api: String) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &str {
        &self.api
    }
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct Auth {
    token: Option<String>,
}

impl Auth {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct Http {
    /// Request timeout in milliseconds.
    timeout: Option<u64>,
}

impl Http {
    pub fn new(timeout: Option<u64>) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout.unwrap_or(DEFAULT_TIMEOUT_MS))
    }
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct Poll {
    /// Refresh interval of watched lists, in seconds.
    interval: Option<u64>,
    page_size: Option<u32>,
}

impl Poll {
    pub fn interval(&self) -> Duration {
        self.interval
            .filter(|i| *i > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

impl CliConfig {
    pub fn new(server: Server, auth: Auth, http: Http) -> Self {
        Self {
            server,
            auth,
            http,
            poll: Poll::default(),
        }
    }

    /// Reads `~/.autoall/credentials.toml`, overridden by `AUTOALL_*` variables
    /// (`AUTOALL_AUTH__TOKEN`, `AUTOALL_POLL__INTERVAL`, ...).
    pub fn load() -> Result<CliConfig, AutoError> {
        let (_, config_path, path_str) = CliConfig::path()?;

        if !config_path.exists() {
            return Err(AutoError::configuration(CONFIG_NOT_FOUND_MESSAGE_ERR));
        }

        CliConfig::parse(config::File::with_name(&path_str))
    }

    pub(crate) fn parse<S>(file: S) -> Result<CliConfig, AutoError>
    where
        S: Source + Send + Sync + 'static,
    {
        CliConfig::parse_with(file, CliConfig::environment())
    }

    /// `AUTOALL_` prefix, `__` between nested keys.
    fn environment() -> Environment {
        Environment::with_prefix(CONFIG_ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn parse_with<S>(file: S, env: Environment) -> Result<CliConfig, AutoError>
    where
        S: Source + Send + Sync + 'static,
    {
        Config::builder()
            .add_source(file)
            .add_source(env)
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| AutoError::configuration(&format!("{CONFIG_INVALID_MESSAGE_ERR}{e}")))
    }

    /// Writes the configuration file, truncating any previous one.
    pub fn save(&self) -> Result<PathBuf, AutoError> {
        let (base_path, config_path, _) = CliConfig::path()?;

        create_dir_all(&base_path).map_err(|e| AutoError::io_err(&format!("{e}")))?;

        let content =
            toml::to_string(self).map_err(|e| AutoError::configuration(&format!("{e}")))?;

        File::create(&config_path)
            .and_then(|mut f| f.write_all(content.as_bytes()))
            .map_err(|e| AutoError::io_err(&format!("{e}")))?;

        Ok(config_path)
    }

    /// Returns the configuration directory, the configuration file and the file path as a string.
    pub fn path() -> Result<(PathBuf, PathBuf, String), AutoError> {
        let base_path = BaseDirs::new()
            .map(|d| d.home_dir().join(CONFIG_FILE_PATH))
            .ok_or_else(|| AutoError::configuration(HOME_NOT_FOUND_MESSAGE_ERR))?;
        let config_path = base_path.join(CONFIG_FILE_NAME);
        let path_str = config_path.to_string_lossy().to_string();

        Ok((base_path, config_path, path_str))
    }

    pub fn server(&self) -> &Server {
        &self.server
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn http(&self) -> &Http {
        &self.http
    }

    pub fn poll(&self) -> &Poll {
        &self.poll
    }
}
