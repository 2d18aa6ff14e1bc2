//! CLI commands and handlers
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::info;

use crate::application::session::SwapSession;
use crate::domain::valuation::{raw_amount, to_fixed};
use crate::report::SwapReport;
use crate::shared::errors::AppError;

#[derive(Parser)]
#[command(name = "multiswap")]
#[command(version, about = "Swap several Solana tokens into one")]
pub struct Cli {
    /// Path to config file (optional)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Solana RPC endpoint used to send transactions
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// DAS indexer endpoint (e.g. a Helius RPC URL with api-key)
    #[arg(long, global = true)]
    pub indexer_url: Option<String>,

    /// MultiSwap backend base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to keypair file
    #[arg(long, global = true)]
    pub keypair: Option<String>,

    /// Amount (smallest unit) treated as "nothing selected"
    #[arg(long, global = true)]
    pub minimum_amount: Option<Decimal>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the tokens you can swap into
    Tokens,

    /// Show the wallet's priced fungible tokens, most valuable first
    Assets {
        /// Filter by token name or symbol
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Quote a swap without sending anything
    Quote(SwapArgs),

    /// Quote, then sign and send the swap transactions
    Swap(SwapArgs),
}

#[derive(Args)]
pub struct SwapArgs {
    /// Token to swap into (symbol or mint address)
    #[arg(short, long)]
    pub to: String,

    /// Source token and amount, `MINT=AMOUNT` or `SYMBOL=max` (repeatable)
    #[arg(short, long = "from", required = true)]
    pub from: Vec<String>,
}

/// Human-readable amount requested for one source token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceAmount {
    Max,
    Ui(Decimal),
}

/// Parse `TOKEN=AMOUNT`
pub fn parse_source(spec: &str) -> Result<(String, SourceAmount), AppError> {
    let (token, amount) = spec
        .split_once('=')
        .ok_or_else(|| AppError::ConfigError(format!("Expected TOKEN=AMOUNT, got {:?}", spec)))?;
    let token = token.trim();
    let amount = amount.trim();
    if token.is_empty() {
        return Err(AppError::ConfigError(format!("Missing token in {:?}", spec)));
    }

    let amount = if amount.eq_ignore_ascii_case("max") {
        SourceAmount::Max
    } else {
        let value = Decimal::from_str(amount)
            .map_err(|e| AppError::ConfigError(format!("Invalid amount {:?}: {}", amount, e)))?;
        if value.is_sign_negative() {
            return Err(AppError::ConfigError(format!("Negative amount {:?}", amount)));
        }
        SourceAmount::Ui(value)
    };
    Ok((token.to_string(), amount))
}

pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute the selected command
    pub async fn execute(command: Commands, session: &mut SwapSession) -> Result<(), AppError> {
        match command {
            Commands::Tokens => Self::execute_tokens_command(session),
            Commands::Assets { query } => Self::execute_assets_command(query, session).await,
            Commands::Quote(args) => Self::execute_quote_command(args, session).await.map(|_| ()),
            Commands::Swap(args) => Self::execute_swap_command(args, session).await,
        }
    }

    fn execute_tokens_command(session: &SwapSession) -> Result<(), AppError> {
        for token in session.catalog().tokens() {
            println!("{:<6} {:<10} {} ({} decimals)", token.symbol, token.name, token.address, token.decimals);
        }
        Ok(())
    }

    async fn execute_assets_command(query: Option<String>, session: &mut SwapSession) -> Result<(), AppError> {
        session.refresh_assets().await?;
        if let Some(query) = query {
            session.set_query(&query);
        }

        let views = session.visible_assets();
        if views.is_empty() {
            println!("No priced fungible tokens found");
            return Ok(());
        }

        for view in views {
            println!(
                "{:<10} {:<12} {:>16} ${:>12}",
                view.asset.display_symbol(),
                view.short_address,
                view.balance_formatted,
                view.fiat_value_formatted
            );
        }
        Ok(())
    }

    /// Refresh assets, apply the sources and destination, and fetch quotes
    async fn prepare_swap(args: &SwapArgs, session: &mut SwapSession) -> Result<SwapReport, AppError> {
        session.refresh_assets().await?;
        session.choose_destination(&args.to)?;

        for spec in &args.from {
            let (token, amount) = parse_source(spec)?;
            let asset = session.find_source(&token)?.clone();

            let raw = match amount {
                SourceAmount::Max => Decimal::from(asset.balance),
                SourceAmount::Ui(ui) => raw_amount(ui, asset.decimals)?,
            };
            let applied = session.set_amount(&asset.id, raw)?;
            info!("Selected {} {} (raw {})", asset.display_symbol(), asset.id, applied);
        }

        if !session.can_swap() {
            return Err(AppError::EmptySelection);
        }

        session.quote().await?;
        let report = SwapReport::from_session(session)?;
        println!("{}", report.headline());
        Ok(report)
    }

    async fn execute_quote_command(args: SwapArgs, session: &mut SwapSession) -> Result<SwapReport, AppError> {
        let report = Self::prepare_swap(&args, session).await?;
        println!("{}", report.to_json().map_err(|e| AppError::ConfigError(e.to_string()))?);
        Ok(report)
    }

    async fn execute_swap_command(args: SwapArgs, session: &mut SwapSession) -> Result<(), AppError> {
        let report = Self::prepare_swap(&args, session).await?;
        let total = to_fixed(report.total_fiat_value, 2);

        let signatures = session.swap().await?;
        let report = report.with_transaction_signatures(signatures.iter().map(|s| s.to_string()).collect());

        println!("✅ Swapped ${} worth of tokens into {}", total, report.destination.symbol);
        println!("{}", report.to_json().map_err(|e| AppError::ConfigError(e.to_string()))?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_source() {
        assert_eq!(
            parse_source("SOL=1.5").unwrap(),
            ("SOL".to_string(), SourceAmount::Ui(dec!(1.5)))
        );
        assert_eq!(parse_source(" bonk = MAX ").unwrap(), ("bonk".to_string(), SourceAmount::Max));
    }

    #[test]
    fn test_parse_source_errors() {
        assert!(parse_source("SOL").is_err());
        assert!(parse_source("=1").is_err());
        assert!(parse_source("SOL=abc").is_err());
        assert!(parse_source("SOL=-1").is_err());
    }

    #[test]
    fn test_cli_parses_swap() {
        let cli = Cli::try_parse_from([
            "multiswap", "swap", "--to", "USDC", "--from", "SOL=max", "--from", "Bonk=1000", "--keypair", "id.json",
        ])
        .unwrap();
        assert_eq!(cli.keypair.as_deref(), Some("id.json"));
        match cli.command {
            Commands::Swap(args) => {
                assert_eq!(args.to, "USDC");
                assert_eq!(args.from, vec!["SOL=max", "Bonk=1000"]);
            }
            _ => panic!("expected swap command"),
        }
    }

    #[test]
    fn test_cli_requires_from() {
        assert!(Cli::try_parse_from(["multiswap", "quote", "--to", "USDC"]).is_err());
    }
}
