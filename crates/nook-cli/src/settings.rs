//! Runtime settings: an optional TOML file overlaid with `NOOK_*` variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Shape of the configuration, after all sources are merged.
#[derive(Debug, Deserialize)]
pub struct Settings {
  /// SQLite file holding the community documents.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_store_path() -> PathBuf { PathBuf::from("nook.db") }

impl Settings {
  /// Read `file` (if it exists) and the environment; `store_override` wins
  /// over both.
  pub fn load(file: &Path, store_override: Option<PathBuf>) -> anyhow::Result<Self> {
    let builder = config::Config::builder()
      .add_source(config::File::from(file.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("NOOK"));
    Self::build(builder, store_override)
  }

  fn build(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    store_override: Option<PathBuf>,
  ) -> anyhow::Result<Self> {
    let settings = builder.build().context("failed to read config file")?;

    let mut settings: Settings = settings
      .try_deserialize()
      .context("failed to deserialise settings")?;

    if let Some(path) = store_override {
      settings.store_path = path;
    }
    settings.store_path = expand_tilde(&settings.store_path);
    Ok(settings)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
