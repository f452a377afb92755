//! node-smoke - smoke tests for a blockchain node's HTTP RPC surface
//!
//! Issues a fixed battery of read-only GET requests against a running node,
//! logs one PASSED/FAILED line per check and exits non-zero if any check
//! failed:
//! - `0` every check passed
//! - `1` bad invocation or configuration
//! - `2` one or more checks failed

use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod output;

use config::CliConfig;
pub use error::{CliError, CliResult};
use node_smoke_core::{run_all, RpcClient, SmokeConfig, DEFAULT_TIMEOUT};

/// node-smoke command line
#[derive(Parser, Debug)]
#[command(name = "node-smoke")]
#[command(about = "Smoke-test a running node's HTTP RPC endpoints", long_about = None)]
#[command(version)]
struct Cli {
    /// Node RPC base URL, e.g. http://localhost:8732
    #[arg(value_name = "BASE_URL")]
    base_url: Option<String>,

    /// Chain identifier for chain-scoped endpoints, e.g. main
    #[arg(value_name = "SYS_CHAIN")]
    chain: Option<String>,

    /// Token sent as the `auth` query parameter
    #[arg(value_name = "AUTH_TOKEN")]
    auth_token: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "NODE_SMOKE_CONFIG")]
    config: Option<String>,

    /// Per-request timeout in seconds
    #[arg(
        short,
        long,
        env = "NODE_SMOKE_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Extra positional arguments, accepted and ignored
    #[arg(hide = true)]
    extra: Vec<String>,
}

/// Run using the current process arguments.
pub async fn run() -> CliResult<()> {
    run_with_args(std::env::args_os()).await
}

/// Run using the provided argument iterator.
pub async fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let usage = usage_line(&args);

    let cli = match Cli::try_parse_from(args.iter()) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(_) => return Err(CliError::Usage(usage)),
    };

    let (Some(base_url), Some(chain)) = (cli.base_url.as_deref(), cli.chain.as_deref()) else {
        return Err(CliError::Usage(usage));
    };

    init_tracing(cli.verbose);
    if !cli.extra.is_empty() {
        debug!(ignored = ?cli.extra, "ignoring extra arguments");
    }

    let file_config = CliConfig::load(cli.config.as_deref())?;
    let (auth_token, timeout) = merge_settings(&cli, file_config);

    let config = SmokeConfig::new(base_url, chain)?
        .with_auth_token(auth_token)
        .with_timeout(timeout);

    info!(
        node = config.base_url(),
        chain = config.chain(),
        authenticated = config.auth_token().is_some(),
        "running smoke tests"
    );

    let client = RpcClient::new(config.clone())?;
    let summary = run_all(&client, &config).await?;
    summary.verdict()?;

    output::print_success(&summary);
    Ok(())
}

/// Map the outcome of [`run`] to a process exit status, printing any error.
pub fn finish(result: CliResult<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(usage)) => {
            println!("{}", usage);
            ExitCode::from(1)
        }
        Err(e) => {
            output::print_error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}

/// Token and timeout for the run. Command line wins over the config file.
fn merge_settings(cli: &Cli, file_config: CliConfig) -> (Option<String>, Duration) {
    let auth_token = cli.auth_token.clone().or(file_config.auth_token);
    let timeout = cli
        .timeout
        .or(file_config.timeout_seconds)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT);
    (auth_token, timeout)
}

fn usage_line(args: &[OsString]) -> String {
    let program = args
        .first()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| "node-smoke".to_string());
    format!("USAGE: {} <base-url> <sys-chain> [auth-token]", program)
}

fn init_tracing(verbose: bool) {
    // Verbose output covers this tool only; HTTP library logs carry full URLs.
    let filter = if verbose {
        "info,node_smoke=debug,node_smoke_core=debug"
    } else {
        "info"
    };
    let stderr = std::io::stderr();
    let ansi = stderr.is_terminal();

    // A subscriber may already be installed when driven from tests.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(ansi),
        )
        .try_init();
}
