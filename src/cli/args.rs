//! Command-line argument definitions using clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::download::{DownloadRequest, FileSelector};

/// AI-Hub dataset CLI.
#[derive(Parser, Debug)]
#[command(
    name = "aihub",
    version,
    about = "Query and download AI-Hub datasets",
    long_about = "A CLI tool to list, inspect and download datasets from AI-Hub.\n\n\
                  Runs an interactive menu by default. Downloaded archives are unpacked and \
                  split .part files are reassembled automatically.\n\
                  The `serve` command exposes the same operations as JSON-RPC tools on stdio."
)]
pub struct Args {
    /// Path to configuration file.
    #[arg(short, long, env = "AIHUB_CONFIG", default_value = "aihub.toml", global = true)]
    pub config: PathBuf,

    /// AI-Hub API key (overrides AIHUB_API_KEY).
    #[arg(short = 'k', long = "api-key", global = true)]
    pub api_key: Option<String>,

    /// API base URL.
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Default directory for downloads.
    #[arg(short = 'd', long = "directory", global = true)]
    pub download_directory: Option<PathBuf>,

    /// Hide download progress bars.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive menu (default).
    Menu,

    /// Serve JSON-RPC tool requests on stdin/stdout.
    Serve {
        /// List the tools and validate the API key, then exit.
        #[arg(long)]
        test: bool,
    },

    /// List all datasets.
    List,

    /// Show the details and file tree of a dataset.
    Info {
        /// Dataset key.
        dataset_key: String,
    },

    /// Show the API manual.
    Manual,

    /// Check whether the API key is accepted.
    Validate,

    /// Download a dataset.
    Download(DownloadArgs),

    /// Write a .env template with the supported variables.
    InitEnv {
        /// Where to write the file.
        #[arg(long, default_value = ".env")]
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Options of the `download` subcommand.
#[derive(ClapArgs, Debug, Clone, PartialEq, Eq)]
pub struct DownloadArgs {
    /// Dataset key.
    pub dataset_key: String,

    /// File keys to download, comma separated. Omit for all files.
    #[arg(short, long = "files", value_delimiter = ',')]
    pub files: Vec<String>,

    /// Destination directory (defaults to the configured directory).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep the downloaded .tar instead of unpacking it.
    #[arg(long)]
    pub no_extract: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(ref api_key) = self.api_key {
            config.api.api_key = api_key.clone();
        }

        if let Some(ref base_url) = self.base_url {
            config.api.base_url = base_url.clone();
        }

        if let Some(timeout) = self.timeout {
            config.api.timeout_secs = timeout;
        }

        if let Some(ref dir) = self.download_directory {
            config.download.directory = dir.clone();
        }

        if self.quiet {
            config.download.show_progress = false;
        }

        if let Some(Command::Download(DownloadArgs {
            no_extract: true, ..
        })) = self.command
        {
            config.download.extract = false;
        }
    }
}

impl DownloadArgs {
    /// Build the pipeline request, taking extract and progress settings from `config`.
    pub fn to_request(&self, config: &Config) -> DownloadRequest {
        let mut request = DownloadRequest::new(self.dataset_key.clone())
            .file_keys(FileSelector::from_keys(
                self.files.iter().map(|f| f.trim()).filter(|f| !f.is_empty()),
            ))
            .extract(config.download.extract)
            .show_progress(config.download.show_progress);
        if let Some(ref output) = self.output {
            request = request.output_dir(output);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_menu() {
        let args = Args::try_parse_from(["aihub"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.config, PathBuf::from("aihub.toml"));
    }

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::try_parse_from([
            "aihub",
            "--api-key",
            "cli-key",
            "--timeout",
            "30",
            "-q",
            "download",
            "123",
            "--no-extract",
        ])
        .unwrap();

        let mut config = Config::default();
        config.api.api_key = "env-key".into();
        args.merge_into_config(&mut config);

        assert_eq!(config.api.api_key, "cli-key");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(!config.download.show_progress);
        assert!(!config.download.extract);
    }

    #[test]
    fn test_download_request() {
        let args =
            Args::try_parse_from(["aihub", "download", "123", "-f", "1,2", "-o", "/data"]).unwrap();
        let config = Config::default();

        let Some(Command::Download(download)) = args.command else {
            panic!("expected download command");
        };
        let request = download.to_request(&config);
        assert_eq!(request.dataset_key, "123");
        assert_eq!(request.file_keys.resolve(), "1,2");
        assert_eq!(request.output_dir, Some(PathBuf::from("/data")));
        assert!(request.extract);
    }

    #[test]
    fn test_download_all_files_by_default() {
        let args = Args::try_parse_from(["aihub", "download", "123"]).unwrap();
        let Some(Command::Download(download)) = args.command else {
            panic!("expected download command");
        };
        let request = download.to_request(&Config::default());
        assert_eq!(request.file_keys, FileSelector::All);
    }
}
