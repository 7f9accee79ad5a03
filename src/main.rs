use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;

use marketdesk::config::{Config, SecureString};
use marketdesk::gateway::{
    EndpointCatalog, GatewayClient, GatewayError, LoginRequest, PredictRequest,
};
use marketdesk::logging::init_tracing;
use marketdesk::routes::{NavigationOutcome, Navigator, RouteTable, RouteTarget};

#[derive(Parser, Debug)]
#[command(name = "marketdesk", version, about = "Market dashboard navigation and backend gateway")]
struct Cli {
    /// Config file (default: ~/.config/marketdesk/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base (absolute URL or path prefix)
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the route table
    Routes,
    /// Print the backend endpoint catalog
    Endpoints,
    /// Navigate to each path in order and report the active view
    Navigate {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Issue one backend call and print the JSON result
    Call {
        #[command(subcommand)]
        operation: Operation,
    },
}

#[derive(Subcommand, Debug)]
enum Operation {
    Health,
    Predict {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        horizon: u32,
        #[arg(long)]
        model: String,
    },
    SaveAlertRules {
        /// Rules as JSON
        #[arg(long, value_parser = parse_json)]
        rules: Value,
    },
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    ContactSupport {
        /// Payload as JSON
        #[arg(long, value_parser = parse_json)]
        payload: Value,
    },
    GetPersonalization,
    SavePersonalization {
        /// Payload as JSON
        #[arg(long, value_parser = parse_json)]
        payload: Value,
    },
}

fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {}", e))
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Routes => {
            print_routes(&RouteTable::default_routes()?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Endpoints => {
            for def in EndpointCatalog::all() {
                println!("{:<5} {:<24} {}", def.method, def.path_suffix, def.name);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Navigate { paths } => {
            let table = Arc::new(RouteTable::default_routes()?);
            let navigator = Navigator::new(table, &config.navigation);
            navigate(&navigator, &paths).await
        }
        Command::Call { operation } => {
            let base_url = match cli.api_base.as_deref() {
                Some(api_base) => config.gateway.base_url_with(Some(api_base)),
                None => config.gateway.base_url(),
            };
            let client = GatewayClient::new(base_url, &config.gateway)
                .context("Failed to build HTTP client")?;

            match call(&client, operation).await {
                Ok(value) => {
                    println!("{}", serde_json::to_string_pretty(&value)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    eprintln!("Error: {}", err);
                    println!("{}", serde_json::to_string_pretty(&err.to_json())?);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn print_routes(table: &RouteTable) {
    for entry in table.entries() {
        let target = match entry.target() {
            RouteTarget::Redirect(to) => format!("-> {}", to),
            RouteTarget::Loader(_) => "lazy view".to_string(),
        };
        println!(
            "{:<20} {:<26} {}",
            entry.path(),
            entry.name().unwrap_or("-"),
            target
        );
    }
}

async fn navigate(navigator: &Navigator, paths: &[String]) -> anyhow::Result<ExitCode> {
    let mut failed = false;
    for path in paths {
        match navigator.navigate(path).await {
            Ok(NavigationOutcome::Committed(view)) => {
                println!("{} -> {} ({})", path, view.path, view.module.component);
            }
            Ok(NavigationOutcome::Superseded { generation, current }) => {
                println!("{} superseded (generation {} < {})", path, generation, current);
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                failed = true;
            }
        }
    }

    match navigator.active() {
        Some(view) => println!("active: {} [{}]", view.path, view.module.component),
        None => println!("active: none"),
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn call(client: &GatewayClient, operation: Operation) -> Result<Value, GatewayError> {
    match operation {
        Operation::Health => client.health().await,
        Operation::Predict {
            symbol,
            horizon,
            model,
        } => {
            client
                .predict(&PredictRequest {
                    symbol,
                    horizon,
                    model,
                })
                .await
        }
        Operation::SaveAlertRules { rules } => client.save_alert_rules(&rules).await,
        Operation::Login { username, password } => {
            client
                .login(&LoginRequest {
                    username,
                    password: SecureString::new(password),
                })
                .await
        }
        Operation::ForgotPassword { email } => client.forgot_password(&email).await,
        Operation::ContactSupport { payload } => client.contact_support(&payload).await,
        Operation::GetPersonalization => client.get_personalization().await,
        Operation::SavePersonalization { payload } => client.save_personalization(&payload).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_predict() {
        let cli = Cli::try_parse_from([
            "marketdesk",
            "call",
            "predict",
            "--symbol",
            "AAPL",
            "--horizon",
            "5",
            "--model",
            "lstm",
        ])
        .unwrap();
        match cli.command {
            Command::Call {
                operation:
                    Operation::Predict {
                        symbol,
                        horizon,
                        model,
                    },
            } => {
                assert_eq!(symbol, "AAPL");
                assert_eq!(horizon, 5);
                assert_eq!(model, "lstm");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_bad_json() {
        let result = Cli::try_parse_from([
            "marketdesk",
            "call",
            "save-alert-rules",
            "--rules",
            "{not json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_navigate_requires_path() {
        assert!(Cli::try_parse_from(["marketdesk", "navigate"]).is_err());
    }
}
