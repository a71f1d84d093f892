//! Line-mode interactive menu.

use std::io::Write;

use console::style;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::api::{AihubClient, ClientConfig};
use crate::config::{validate_api_key, DownloadConfig};
use crate::download::{DownloadRequest, FileSelector};
use crate::error::{Error, Result};
use crate::output::{
    create_spinner, print_download_result, print_error, print_info, print_payload, print_success,
    print_warning,
};

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListDatasets,
    DatasetInfo,
    ApiManual,
    Download,
    ResetApiKey,
    Quit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::ListDatasets,
        MenuChoice::DatasetInfo,
        MenuChoice::ApiManual,
        MenuChoice::Download,
        MenuChoice::ResetApiKey,
        MenuChoice::Quit,
    ];

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::ListDatasets),
            "2" => Some(MenuChoice::DatasetInfo),
            "3" => Some(MenuChoice::ApiManual),
            "4" => Some(MenuChoice::Download),
            "5" => Some(MenuChoice::ResetApiKey),
            "6" | "q" | "quit" | "exit" => Some(MenuChoice::Quit),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            MenuChoice::ListDatasets => 1,
            MenuChoice::DatasetInfo => 2,
            MenuChoice::ApiManual => 3,
            MenuChoice::Download => 4,
            MenuChoice::ResetApiKey => 5,
            MenuChoice::Quit => 6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::ListDatasets => "List datasets",
            MenuChoice::DatasetInfo => "Dataset details and file tree",
            MenuChoice::ApiManual => "API manual",
            MenuChoice::Download => "Download dataset",
            MenuChoice::ResetApiKey => "Enter a new API key",
            MenuChoice::Quit => "Quit",
        }
    }

    /// Query screens wait for Enter before the menu is redrawn.
    fn pauses(self) -> bool {
        matches!(
            self,
            MenuChoice::ListDatasets
                | MenuChoice::DatasetInfo
                | MenuChoice::ApiManual
                | MenuChoice::Download
        )
    }
}

/// Interpret a yes/no answer. Blank or unrecognised input yields `default`.
pub fn parse_yes_no(input: &str, default: bool) -> bool {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}

async fn read_prompt<R>(lines: &mut Lines<R>, text: &str) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    print!("{}", text);
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?.map(|line| line.trim().to_string()))
}

async fn check_key(client: &AihubClient) -> bool {
    let spinner = create_spinner("Validating API key...");
    let valid = client.validate_api_key().await;
    spinner.finish_and_clear();
    valid
}

fn print_key_help() {
    print_info("Check that the key was copied completely and is still active.");
    print_info("Keys are issued from the AI-Hub account page.");
}

fn report_error(err: &Error) {
    print_error(&err.to_string());
    if err.is_authentication() {
        print_info("The API key was rejected. Choose 5 to enter a new key.");
    }
}

/// Interactive session bound to one input source.
pub struct Menu<R> {
    lines: Lines<R>,
    client: AihubClient,
    download: DownloadConfig,
}

impl Menu<BufReader<Stdin>> {
    /// Menu reading from the terminal.
    pub async fn connect_stdin(config: ClientConfig, download: DownloadConfig) -> Result<Self> {
        Self::connect(BufReader::new(tokio::io::stdin()), config, download).await
    }
}

impl<R> Menu<R>
where
    R: AsyncBufRead + Unpin,
{
    /// Obtain a usable API key, prompting when none is configured, and check it
    /// against the server.
    pub async fn connect(reader: R, mut config: ClientConfig, download: DownloadConfig) -> Result<Self> {
        let mut lines = reader.lines();

        if config.api_key.trim().is_empty() {
            print_warning("No API key configured (set AIHUB_API_KEY or pass --api-key).");
            let key = read_prompt(&mut lines, "Enter your AI-Hub API key: ")
                .await?
                .unwrap_or_default();
            validate_api_key(&key)?;
            config.api_key = key;
        }

        let client = AihubClient::new(config)?;
        if !check_key(&client).await {
            print_key_help();
            return Err(Error::Authentication("API key was rejected".to_string()));
        }
        print_success("API key validated");

        Ok(Self {
            lines,
            client,
            download,
        })
    }

    pub fn client(&self) -> &AihubClient {
        &self.client
    }

    async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        read_prompt(&mut self.lines, text).await
    }

    /// Run until the user quits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            print_menu();

            let Some(input) = self.prompt("Select (1-6): ").await? else {
                return Ok(());
            };
            let Some(choice) = MenuChoice::parse(&input) else {
                print_warning("Please enter a number between 1 and 6.");
                continue;
            };

            if choice == MenuChoice::Quit {
                print_info("Goodbye");
                return Ok(());
            }

            match self.perform(choice).await {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                Err(e) => report_error(&e),
            }

            if choice.pauses() && self.prompt("\nPress Enter to continue...").await?.is_none() {
                return Ok(());
            }
        }
    }

    /// Returns `false` when input ended while prompting.
    async fn perform(&mut self, choice: MenuChoice) -> Result<bool> {
        match choice {
            MenuChoice::ListDatasets => {
                let spinner = create_spinner("Fetching dataset list...");
                let payload = self.client.list_datasets().await;
                spinner.finish_and_clear();
                print_payload("Datasets", &payload?);
            }
            MenuChoice::DatasetInfo => {
                let Some(key) = self.prompt("Dataset key: ").await? else {
                    return Ok(false);
                };
                if key.is_empty() {
                    print_warning("A dataset key is required.");
                    return Ok(true);
                }
                let spinner = create_spinner(&format!("Fetching dataset {}...", key));
                let payload = self.client.get_dataset_info(&key).await;
                spinner.finish_and_clear();
                print_payload(&format!("Dataset {}", key), &payload?);
            }
            MenuChoice::ApiManual => {
                let spinner = create_spinner("Fetching API manual...");
                let payload = self.client.get_api_manual().await;
                spinner.finish_and_clear();
                print_payload("API manual", &payload?);
            }
            MenuChoice::Download => return self.download().await,
            MenuChoice::ResetApiKey => return self.reset_api_key().await,
            MenuChoice::Quit => {}
        }
        Ok(true)
    }

    async fn download(&mut self) -> Result<bool> {
        let Some(key) = self.prompt("Dataset key: ").await? else {
            return Ok(false);
        };
        if key.is_empty() {
            print_warning("A dataset key is required.");
            return Ok(true);
        }

        let Some(files) = self
            .prompt("File keys, comma separated (Enter for all): ")
            .await?
        else {
            return Ok(false);
        };

        let default_dir = self.client.config().download_dir.display().to_string();
        let Some(output) = self
            .prompt(&format!("Output directory [{}]: ", default_dir))
            .await?
        else {
            return Ok(false);
        };

        let default_extract = self.download.extract;
        let hint = if default_extract { "Y/n" } else { "y/N" };
        let Some(answer) = self
            .prompt(&format!("Extract archive and merge parts? [{}]: ", hint))
            .await?
        else {
            return Ok(false);
        };

        let mut request = DownloadRequest::new(key)
            .file_keys(FileSelector::parse_list(&files))
            .extract(parse_yes_no(&answer, default_extract))
            .show_progress(self.download.show_progress);
        if !output.is_empty() {
            request = request.output_dir(output);
        }

        print_info(&format!(
            "Downloading dataset {} (files: {})",
            request.dataset_key, request.file_keys
        ));
        let result = self.client.download_dataset(&request).await?;
        print_download_result(&result);
        Ok(true)
    }

    async fn reset_api_key(&mut self) -> Result<bool> {
        let Some(key) = self.prompt("New API key: ").await? else {
            return Ok(false);
        };
        if key.is_empty() {
            print_warning("Keeping the current API key.");
            return Ok(true);
        }
        validate_api_key(&key)?;

        let mut config = self.client.config().clone();
        config.api_key = key;
        let client = AihubClient::new(config)?;

        if check_key(&client).await {
            self.client = client;
            print_success("API key updated");
        } else {
            print_warning("The new API key was rejected. Keeping the current key.");
            print_key_help();
        }
        Ok(true)
    }
}

fn print_menu() {
    println!();
    println!("{}", style("Main menu").bold());
    for choice in MenuChoice::ALL {
        println!("  {}. {}", style(choice.number()).cyan(), choice.label());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn accepting_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/keyValidate.do"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        server
    }

    fn download_config() -> DownloadConfig {
        DownloadConfig {
            show_progress: false,
            ..DownloadConfig::default()
        }
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse(" 1 "), Some(MenuChoice::ListDatasets));
        assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::ResetApiKey));
        assert_eq!(MenuChoice::parse("q"), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse(""), None);

        for choice in MenuChoice::ALL {
            assert_eq!(
                MenuChoice::parse(&choice.number().to_string()),
                Some(choice)
            );
        }
    }

    #[test]
    fn test_parse_yes_no() {
        assert!(parse_yes_no("", true));
        assert!(!parse_yes_no("", false));
        assert!(!parse_yes_no("N", true));
        assert!(!parse_yes_no("no", true));
        assert!(parse_yes_no("y", false));
        assert!(parse_yes_no("maybe", true));
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let config = ClientConfig::new("bad-key").with_base_url(server.uri());
        let err = Menu::connect(&b""[..], config, download_config())
            .await
            .err()
            .unwrap();
        assert!(err.is_authentication());
    }

    #[tokio::test]
    async fn test_connect_prompts_for_missing_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/keyValidate.do"))
            .and(header("apikey", "typed-key"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let config = ClientConfig::new("").with_base_url(server.uri());
        let menu = Menu::connect(&b"typed-key\n"[..], config, download_config())
            .await
            .unwrap();
        assert_eq!(menu.client().config().api_key, "typed-key");
    }

    #[tokio::test]
    async fn test_connect_without_input_fails() {
        let config = ClientConfig::new("").with_base_url("http://127.0.0.1:1");
        let err = Menu::connect(&b""[..], config, download_config())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, Error::MissingConfig(_)));
    }

    #[tokio::test]
    async fn test_run_lists_then_quits() {
        let server = accepting_server().await;
        Mock::given(method("GET"))
            .and(path("/info/dataset.do"))
            .respond_with(ResponseTemplate::new(200).set_body_string("dataset list"))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::new("test-key").with_base_url(server.uri());
        let mut menu = Menu::connect(&b"9\n1\n\n6\n"[..], config, download_config())
            .await
            .unwrap();
        menu.run().await.unwrap();
    }

    #[tokio::test]
    async fn test_run_survives_api_errors() {
        let server = accepting_server().await;
        Mock::given(method("GET"))
            .and(path("/info/api.do"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = ClientConfig::new("test-key").with_base_url(server.uri());
        let mut menu = Menu::connect(&b"3\n\n3\n"[..], config, download_config())
            .await
            .unwrap();
        // Input ends while the menu is still open.
        menu.run().await.unwrap();
    }

    #[tokio::test]
    async fn test_download_keeps_archive_when_declined() {
        let server = accepting_server().await;
        Mock::given(method("GET"))
            .and(path("/down/0.5/42.do"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not really a tar".to_vec()))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();

        let input = format!("4\n42\n\n{}\nn\n\n6\n", dir.path().display());
        let config = ClientConfig::new("test-key").with_base_url(server.uri());
        let mut menu = Menu::connect(input.as_bytes(), config, download_config())
            .await
            .unwrap();
        menu.run().await.unwrap();

        let archive = dir.path().join("42.tar");
        assert_eq!(std::fs::read(archive).unwrap(), b"not really a tar");
    }

    #[tokio::test]
    async fn test_reset_api_key_keeps_old_key_on_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/keyValidate.do"))
            .and(header("apikey", "good-key"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/keyValidate.do"))
            .and(header("apikey", "other-key"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let config = ClientConfig::new("good-key").with_base_url(server.uri());
        let mut menu = Menu::connect(&b"5\nother-key\n6\n"[..], config, download_config())
            .await
            .unwrap();
        menu.run().await.unwrap();
        assert_eq!(menu.client().config().api_key, "good-key");
    }
}
