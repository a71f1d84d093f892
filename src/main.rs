//! AI-Hub downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;
use tracing_subscriber::{fmt, EnvFilter};

use aihub_downloader::{
    api::{AihubClient, ClientConfig},
    cli::{Args, Command, Menu},
    config::{
        validation::{validate_base_url, validate_timeout},
        validate_config, write_env_template, Config, EnvOverrides,
    },
    error::{exit_codes, Error, Result},
    output::{
        create_spinner, print_banner, print_config_summary, print_download_result, print_error,
        print_info, print_payload, print_success, print_warning,
    },
    protocol::McpServer,
    tools::{ToolKind, ToolRegistry},
};

#[tokio::main]
async fn main() -> ExitCode {
    // A .env file is optional.
    dotenvy::dotenv().ok();

    tokio::select! {
        outcome = run() => match outcome {
            Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
            Err(e) => {
                print_error(&format!("{}", e));
                ExitCode::from(e.exit_code() as u8)
            }
        },
        Ok(()) = tokio::signal::ctrl_c() => {
            print_warning("Interrupted");
            ExitCode::from(exit_codes::ABORT as u8)
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Logs go to stderr so stdout stays free for the protocol server
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let command = args.command.clone().unwrap_or(Command::Menu);

    if let Command::InitEnv { path, force } = &command {
        write_env_template(path, args.api_key.as_deref(), *force)?;
        print_success(&format!("Wrote {}", path.display()));
        print_info("Fill in AIHUB_API_KEY, then run aihub again.");
        return Ok(());
    }

    // Defaults < config file < environment < CLI
    let mut config = Config::load_or_default(&args.config)?;
    EnvOverrides::from_env()?.apply(&mut config);
    args.merge_into_config(&mut config);

    match command {
        Command::Serve { test } => serve(&config, test).await,
        Command::Menu => {
            print_banner();

            // A missing key is asked for interactively
            if config.has_api_key() {
                validate_config(&config)?;
            } else {
                validate_base_url(&config.api.base_url)?;
                validate_timeout(config.api.timeout_secs)?;
            }

            let client_config = ClientConfig::from(&config);
            print_config_summary(&client_config);

            let mut menu = Menu::connect_stdin(client_config, config.download.clone()).await?;
            menu.run().await
        }
        Command::List => {
            let client = connect(&config)?;
            let spinner = create_spinner("Fetching dataset list...");
            let payload = client.list_datasets().await;
            spinner.finish_and_clear();
            print_payload("Datasets", &payload?);
            Ok(())
        }
        Command::Info { ref dataset_key } => {
            let client = connect(&config)?;
            let payload = client.get_dataset_info(dataset_key).await?;
            print_payload(&format!("Dataset {}", dataset_key), &payload);
            Ok(())
        }
        Command::Manual => {
            let client = connect(&config)?;
            print_payload("API manual", &client.get_api_manual().await?);
            Ok(())
        }
        Command::Validate => {
            let client = connect(&config)?;
            if client.validate_api_key().await {
                print_success("API key is valid");
                Ok(())
            } else {
                Err(Error::Authentication("API key was rejected".to_string()))
            }
        }
        Command::Download(ref download) => {
            let client = connect(&config)?;
            print_banner();
            print_config_summary(client.config());

            let request = download.to_request(&config);
            print_info(&format!(
                "Downloading dataset {} (files: {})",
                request.dataset_key, request.file_keys
            ));
            let result = client.download_dataset(&request).await?;
            print_download_result(&result);
            Ok(())
        }
        Command::InitEnv { .. } => Ok(()),
    }
}

/// Validate the merged configuration and build a client from it.
fn connect(config: &Config) -> Result<AihubClient> {
    validate_config(config)?;
    AihubClient::new(ClientConfig::from(config))
}

/// Run the JSON-RPC tool server, or its self-test.
async fn serve(config: &Config, self_test: bool) -> Result<()> {
    let client = connect(config)?;
    let server = McpServer::new(ToolRegistry::new(client));

    if self_test {
        return run_self_test(&server).await;
    }

    tracing::info!("Serving {} tools on stdio", ToolKind::ALL.len());
    server.serve_stdio().await
}

async fn run_self_test(server: &McpServer) -> Result<()> {
    print_info("Available tools:");
    for tool in ToolKind::ALL {
        println!("  - {}: {}", tool.name(), tool.description());
    }

    print_info("Validating API key...");
    let envelope = server
        .registry()
        .execute(ToolKind::ValidateApiKey.name(), &Value::Null)
        .await;
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    let is_valid = envelope
        .data
        .as_ref()
        .and_then(|data| data.get("is_valid"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if is_valid {
        print_success("Self-test passed");
        Ok(())
    } else {
        Err(Error::Authentication("API key was rejected".to_string()))
    }
}
