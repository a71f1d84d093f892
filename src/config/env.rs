//! Environment-derived configuration.
//!
//! The process environment is read in exactly one place, [`EnvOverrides::from_env`],
//! at startup. Everything downstream receives an already-resolved [`Config`].

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::loader::{Config, DEFAULT_BASE_URL, DEFAULT_DOWNLOAD_DIR, DEFAULT_TIMEOUT_SECS};
use crate::error::{Error, Result};

pub const ENV_API_KEY: &str = "AIHUB_API_KEY";
pub const ENV_BASE_URL: &str = "AIHUB_API_BASE_URL";
pub const ENV_TIMEOUT: &str = "AIHUB_DOWNLOAD_TIMEOUT";
pub const ENV_DOWNLOAD_PATH: &str = "AIHUB_DEFAULT_DOWNLOAD_PATH";

/// Owner read/write only.
const ENV_FILE_PERMISSIONS: u32 = 0o600;

/// Values found in the environment, each overriding the matching config field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub download_dir: Option<PathBuf>,
}

impl EnvOverrides {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Read overrides from an arbitrary set of variables. Blank values are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut overrides = Self::default();

        for (key, value) in vars {
            let value: String = value.into();
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key.as_ref() {
                ENV_API_KEY => overrides.api_key = Some(value.to_string()),
                ENV_BASE_URL => overrides.base_url = Some(value.to_string()),
                ENV_TIMEOUT => {
                    let secs = value.parse::<u64>().map_err(|_| Error::ConfigValidation {
                        field: ENV_TIMEOUT.to_string(),
                        message: format!("'{}' is not a whole number of seconds", value),
                    })?;
                    overrides.timeout_secs = Some(secs);
                }
                ENV_DOWNLOAD_PATH => overrides.download_dir = Some(PathBuf::from(value)),
                _ => {}
            }
        }

        Ok(overrides)
    }

    /// Apply every present override to the configuration.
    pub fn apply(self, config: &mut Config) {
        if let Some(api_key) = self.api_key {
            config.api.api_key = api_key;
        }
        if let Some(base_url) = self.base_url {
            config.api.base_url = base_url;
        }
        if let Some(timeout) = self.timeout_secs {
            config.api.timeout_secs = timeout;
        }
        if let Some(dir) = self.download_dir {
            config.download.directory = dir;
        }
    }
}

/// Render the `.env` template written by `init-env`.
pub fn env_template(api_key: Option<&str>) -> String {
    format!(
        "# AI-Hub API configuration\n\
         {}={}\n\
         {}={}\n\
         {}={}\n\
         {}={}\n",
        ENV_API_KEY,
        api_key.unwrap_or(""),
        ENV_BASE_URL,
        DEFAULT_BASE_URL,
        ENV_TIMEOUT,
        DEFAULT_TIMEOUT_SECS,
        ENV_DOWNLOAD_PATH,
        DEFAULT_DOWNLOAD_DIR,
    )
}

/// Write a `.env` template with owner-only permissions.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn write_env_template(path: &Path, api_key: Option<&str>, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(env_template(api_key).as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = file.metadata()?.permissions();
        perms.set_mode(ENV_FILE_PERMISSIONS);
        file.set_permissions(perms)?;
    }

    tracing::debug!("Wrote environment template to {}", path.display());
    Ok(())
}
