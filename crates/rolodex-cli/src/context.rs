use crate::types::OutputFormat;
use anyhow::Result;
use rolodex_runtime::Config;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub struct ExecutionContext {
    data_dir: PathBuf,
    base_url: Option<String>,
    config: OnceLock<Config>,
    pub format: OutputFormat,
}

impl ExecutionContext {
    pub fn new(data_dir: PathBuf, base_url: Option<String>, format: OutputFormat) -> Self {
        Self {
            data_dir,
            base_url,
            config: OnceLock::new(),
            format,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> PathBuf {
        Config::path_in(&self.data_dir)
    }

    pub fn base_url_override(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// `config.toml` with the command-line override applied
    pub fn config(&self) -> Result<&Config> {
        if let Some(config) = self.config.get() {
            return Ok(config);
        }

        let mut config = Config::load(&self.data_dir)?;
        if let Some(url) = &self.base_url {
            config.gateway.base_url = url.clone();
        }
        Ok(self.config.get_or_init(|| config))
    }
}
