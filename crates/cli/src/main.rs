use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use relay_api::AppState;
use relay_brokers_bitget::{BitgetClient, BitgetConfig, Credentials};
use relay_core::{Exchange, TradingConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "relay")]
#[command(about = "Webhook relay: turns trading alerts into signed Bitget spot orders")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// TOML file with a [trading] table (symbol, asset, buy_quote_amount)
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    #[command(flatten)]
    exchange: ExchangeArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Args)]
struct ExchangeArgs {
    /// Bitget API key
    #[arg(long, env = "BITGET_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Bitget API secret
    #[arg(long, env = "BITGET_API_SECRET", hide_env_values = true)]
    api_secret: String,

    /// Bitget API passphrase
    #[arg(long, env = "BITGET_API_PASSPHRASE", hide_env_values = true)]
    api_passphrase: String,

    /// Bitget REST base URL
    #[arg(long, env = "BITGET_BASE_URL", default_value = relay_brokers_bitget::protocol::DEFAULT_BASE_URL)]
    base_url: String,

    /// Timeout for each exchange request, in seconds
    #[arg(long, env = "RELAY_HTTP_TIMEOUT_SECS", default_value = "10")]
    timeout_secs: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server
    Serve {
        /// Interface to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "10000")]
        port: u16,
    },

    /// Print the available balance of an asset
    Balance {
        /// Asset name (defaults to the configured trading asset)
        #[arg(short, long)]
        asset: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    match cli.log_format {
        LogFormat::Text => fmt().with_env_filter(filter).with_target(false).init(),
        LogFormat::Json => fmt().json().with_env_filter(filter).init(),
    }

    let trading = match &cli.config {
        Some(path) => TradingConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TradingConfig::default(),
    };
    let client = build_client(&cli.exchange)?;

    match cli.command {
        Commands::Serve { host, port } => {
            tracing::info!(
                symbol = %trading.symbol,
                asset = %trading.asset,
                buy_quote_amount = %trading.buy_quote_amount,
                base_url = %cli.exchange.base_url,
                "Starting webhook relay"
            );
            let state = Arc::new(AppState::new(Arc::new(client), trading));
            relay_api::start_server(state, &format!("{}:{}", host, port)).await?;
        }
        Commands::Balance { asset } => {
            let asset = asset.unwrap_or(trading.asset);
            let balance = client.asset_balance(&asset).await?;
            println!("{} {}", balance.asset, balance.available.normalize());
        }
    }

    Ok(())
}

fn build_client(args: &ExchangeArgs) -> Result<BitgetClient> {
    let credentials = Credentials::new(&args.api_key, &args.api_secret, &args.api_passphrase);
    let config = BitgetConfig {
        base_url: args.base_url.clone(),
        timeout: Duration::from_secs(args.timeout_secs),
    };
    BitgetClient::new(&credentials, config).context("Invalid exchange configuration")
}
