//! mevflood — argument resolution front-end for the mev-flood scripts.
//!
//! Entry point. Loads `.env`, initialises structured logging, resolves
//! the verb's arguments and either runs the liquidity bootstrap or
//! prints the resolved parameters as JSON for the external script.

use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing::{error, info};

use mevflood_args::args::{self, ArgumentVector, Resolution, ResolvedParams, Verb};
use mevflood_args::chain::deployer::CommandDeployer;
use mevflood_args::chain::rpc::JsonRpcClient;
use mevflood_args::config::{self, AppConfig};
use mevflood_args::engine::liquid::{LiquidDriver, TerminalPrompt, Wallets};
use mevflood_args::storage::ArtifactSequencer;
use mevflood_args::types::{ArgError, DriverError};

const PROGRAM: &str = "mevflood";

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let mut tokens = std::env::args().skip(1);
    let Some(verb_token) = tokens.next() else {
        eprintln!("a verb is required");
        println!("{}", args::verbs_help(PROGRAM));
        return ExitCode::from(1);
    };
    if verb_token == "help" || verb_token == "--help" || verb_token == "-h" {
        println!("{}", args::verbs_help(PROGRAM));
        return ExitCode::SUCCESS;
    }

    let verb: Verb = match verb_token.parse() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e}");
            println!("{}", args::verbs_help(PROGRAM));
            return ExitCode::from(1);
        }
    };
    let argv: ArgumentVector = tokens.collect();

    let params = match args::resolve(verb, &argv) {
        Ok(Resolution::Run(params)) => params,
        Ok(Resolution::Help(text)) => {
            println!("{text}");
            return ExitCode::SUCCESS;
        }
        Err(ArgError::MissingPositionalArgument { message, help }) => {
            eprintln!("{message}");
            println!("{help}");
            return ExitCode::from(1);
        }
        Err(e) => {
            error!(verb = %verb, error = %e, "Argument resolution failed");
            eprintln!("{e}");
            return ExitCode::from(1);
        }
    };

    match run(verb, params).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(DriverError::UnreachableEndpoint { url, reason }) = e.downcast_ref::<DriverError>() {
                error!(url = %url, reason = %reason, "RPC endpoint unreachable");
                eprintln!("failed to connect to {url}.");
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::from(1)
        }
    }
}

/// Execute a resolved verb.
async fn run(verb: Verb, params: ResolvedParams) -> Result<()> {
    match params {
        ResolvedParams::Liquid(params) => {
            let config_path = std::env::var("MEVFLOOD_CONFIG")
                .unwrap_or_else(|_| config::DEFAULT_CONFIG_FILE.to_string());
            let cfg = AppConfig::load(&config_path)?.with_env_overrides();
            info!(
                rpc = %cfg.rpc.url,
                env_scope = %cfg.output.env_scope,
                output_dir = %cfg.output.dir,
                "Starting liquidity bootstrap"
            );

            let provider = JsonRpcClient::new(cfg.rpc.url.clone())?;
            let deployer = CommandDeployer::new(&cfg.deployer.command);
            let sequencer = ArtifactSequencer::new(&cfg.output.dir, &cfg.output.env_scope);
            let driver = LiquidDriver::new(&cfg.rpc.url, &provider, &deployer, &TerminalPrompt, &sequencer);

            let outcome = driver
                .run(params, || {
                    Ok(Wallets {
                        admin: cfg.admin_wallet().context("Failed to load admin wallet")?,
                        user: cfg.test_wallet().context("Failed to load test wallet")?,
                    })
                })
                .await?;

            info!(
                nonce = outcome.admin_nonce,
                signed_txs = outcome.signed_txs,
                artifact = ?outcome.artifact,
                "Liquidity bootstrap complete"
            );
            Ok(())
        }
        other => {
            let json = serde_json::to_string_pretty(&other)
                .with_context(|| format!("Failed to serialise {verb} parameters"))?;
            println!("{json}");
            Ok(())
        }
    }
}

/// Initialise the `tracing` subscriber. Logs go to stderr so stdout
/// stays clean for help text and parameter JSON.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mevflood_args=info,mevflood=info"));

    let json_logging = std::env::var("MEVFLOOD_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
