//! Address Book CLI
//!
//! Look up nicknames, emails and addresses in the on-chain address book.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use addrbook_core::{IdentityRecord, LookupKind, ResolveOptions};
use addrbook_resolver::{AddressBook, AddressBookOptions};

/// Address Book - resolve identities registered on-chain
#[derive(Parser)]
#[command(name = "addrbook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// RPC endpoint, repeat for failover order
    #[arg(long = "rpc-url", env = "ADDRBOOK_RPC_URL", value_delimiter = ',', global = true)]
    rpc_urls: Vec<String>,

    /// Address book contract
    #[arg(long, env = "ADDRBOOK_CONTRACT", global = true)]
    contract: Option<String>,

    /// Use testnet defaults
    #[arg(long, global = true)]
    testnet: bool,

    /// Always query the network
    #[arg(long, global = true)]
    force: bool,

    /// Print the record as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a nickname
    Nickname {
        /// Nickname to look up
        name: String,
    },

    /// Resolve an email
    Email {
        /// Email to look up
        email: String,
    },

    /// Resolve an address
    Address {
        /// Address (40 hex characters, optional 0x)
        address: String,
    },

    /// Check whether a key is registered
    Exists {
        /// Lookup kind: nickname, email or address
        kind: LookupKind,
        /// Key to check
        key: String,
    },
}

impl Cli {
    fn options(&self) -> AddressBookOptions {
        let mut options = AddressBookOptions::new();
        if self.testnet {
            options = options.testnet();
        }
        if !self.rpc_urls.is_empty() {
            options = options.with_rpc_urls(self.rpc_urls.clone());
        }
        if let Some(contract) = &self.contract {
            options = options.with_contract_address(contract.clone());
        }
        options
    }

    fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            force_request: self.force,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "addrbook=debug,info"
    } else {
        "addrbook=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let book = AddressBook::new(cli.options()).context("Failed to configure address book")?;
    debug!(endpoints = ?book.config().endpoints, "Using endpoints");

    match &cli.command {
        Commands::Nickname { name } => cmd_resolve(&book, &cli, LookupKind::Nickname, name).await,
        Commands::Email { email } => cmd_resolve(&book, &cli, LookupKind::Email, email).await,
        Commands::Address { address } => cmd_resolve(&book, &cli, LookupKind::Address, address).await,
        Commands::Exists { kind, key } => cmd_exists(&book, &cli, *kind, key).await,
    }
}

/// Resolve one key and print the record
async fn cmd_resolve(book: &AddressBook, cli: &Cli, kind: LookupKind, key: &str) -> Result<()> {
    if !cli.json {
        println!("{} {} {}", "🔍 Resolving".cyan().bold(), kind, key);
    }

    let record = book
        .resolve(kind, key, cli.resolve_options())
        .await
        .with_context(|| format!("Failed to resolve {kind} '{key}'"))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_record(&record);
    }

    Ok(())
}

/// Check one key and print yes/no
async fn cmd_exists(book: &AddressBook, cli: &Cli, kind: LookupKind, key: &str) -> Result<()> {
    let exists = book
        .exists(kind, key, cli.resolve_options())
        .await
        .with_context(|| format!("Failed to check {kind} '{key}'"))?;

    if cli.json {
        let out = serde_json::json!({ "kind": kind, "key": key, "exists": exists });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if exists {
        println!("{} {} '{}' is registered", "✅".green(), kind, key);
    } else {
        println!("{} {} '{}' is not registered", "❌".red(), kind, key);
    }

    Ok(())
}

fn print_record(record: &IdentityRecord) {
    match &record.info {
        Some(info) => {
            println!("\n{}", "✅ Identity found:".green().bold());
            println!("   {} {}", "Nickname:".green(), info.nickname);
            println!("   {} {}", "Email:".green(), info.email);
            println!("   {} {}", "Address:".green(), info.address);
            println!("   {} {}", "Avatar:".green(), info.avatar);
            if !info.free_text.is_empty() {
                println!("   {} {}", "About:".green(), info.free_text);
            }
        }
        None => println!("\n{}", "❌ Not found".red().bold()),
    }
    println!(
        "   {} {} by {}",
        "Resolved:".dimmed(),
        record.resolved_at.to_rfc3339(),
        record.resolved_by
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_build_options() {
        let cli = Cli::try_parse_from([
            "addrbook",
            "--rpc-url",
            "https://a.example",
            "--rpc-url",
            "https://b.example",
            "--testnet",
            "--force",
            "nickname",
            "alice",
        ])
        .unwrap();

        let options = cli.options();
        assert!(options.is_testnet);
        assert_eq!(
            options.rpc_urls,
            Some(vec!["https://a.example".to_string(), "https://b.example".to_string()])
        );
        assert!(cli.resolve_options().force_request);
        assert!(matches!(cli.command, Commands::Nickname { ref name } if name == "alice"));
    }

    #[test]
    fn test_exists_parses_kind() {
        let cli = Cli::try_parse_from(["addrbook", "exists", "addr", "0xabc"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Exists { kind: LookupKind::Address, ref key } if key == "0xabc"
        ));
        assert!(Cli::try_parse_from(["addrbook", "exists", "phone", "x"]).is_err());
    }
}
