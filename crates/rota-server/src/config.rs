//! Runtime configuration for the server binary.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Server settings, merged from `config.toml` and `ROTA_*` environment
/// overrides. Every field has a serving default, so an empty config is
/// valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:    String,
  pub port:    u16,
  pub db_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:    "0.0.0.0".to_string(),
      port:    8080,
      db_path: PathBuf::from("rota.db"),
    }
  }
}

impl ServerConfig {
  /// Load from the TOML file at `path` (missing file is fine) with `ROTA_*`
  /// environment overrides, then validate.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("ROTA"))
      .build()
      .context("failed to read config file")?;

    let cfg: ServerConfig = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    cfg.validate()?;
    Ok(cfg)
  }

  /// Reject configurations that cannot possibly serve.
  pub fn validate(&self) -> anyhow::Result<()> {
    if self.host.is_empty() {
      anyhow::bail!("host must not be empty");
    }
    if self.port == 0 {
      anyhow::bail!("port must not be 0");
    }
    if self.db_path.as_os_str().is_empty() {
      anyhow::bail!("db_path must not be empty");
    }
    Ok(())
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}
