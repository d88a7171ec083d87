//! Ledger CLI
//!
//! Command-line interface for the Ledger API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use ledger_client::LedgerClient;
use ledger_types::{AccountId, CreateUserRequest, Currency, SaveAccountRequest, UserId};

#[derive(Parser)]
#[command(name = "ledger")]
#[command(author, version, about = "Ledger API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Ledger API
    #[arg(long, env = "LEDGER_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    /// Email used for Basic authentication
    #[arg(long, env = "LEDGER_EMAIL")]
    email: Option<String>,

    /// Password used for Basic authentication
    #[arg(long, env = "LEDGER_PASSWORD")]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the caller's accounts
    Accounts,
    /// Send a payment from the caller's account
    Pay {
        /// Receiver's email
        #[arg(long)]
        receiver: String,
        /// Currency held by both sides (EUR, USD, GBP, RON)
        #[arg(long)]
        currency: Currency,
        /// Amount in smallest currency unit
        #[arg(long)]
        amount: u64,
    },
    /// User administration (administrator credentials required)
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Account administration (administrator credentials required)
    Account {
        #[command(subcommand)]
        action: AccountCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a new user
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Remove a user by email
    Remove {
        #[arg(long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Create or overwrite an account
    Save {
        /// Existing account id to overwrite; omit to create
        #[arg(long)]
        id: Option<AccountId>,
        #[arg(long)]
        user_id: UserId,
        #[arg(long)]
        currency: Currency,
        /// Balance in smallest currency unit
        #[arg(long)]
        amount: u64,
    },
    /// Remove the account held by a user in a currency
    Remove {
        #[arg(long)]
        email: String,
        #[arg(long)]
        currency: Currency,
    },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut client = LedgerClient::new(&cli.api_url);
    if let (Some(email), Some(password)) = (&cli.email, &cli.password) {
        client = client.with_credentials(email, password);
    }

    match cli.command {
        Commands::Accounts => {
            let accounts = client.get_accounts().await?;
            print_json(&accounts)?;
        }
        Commands::Pay {
            receiver,
            currency,
            amount,
        } => {
            let payment = client.send_payment(&receiver, currency, amount).await?;
            print_json(&payment)?;
        }
        Commands::User { action } => match action {
            UserCommands::Create {
                first_name,
                last_name,
                email,
                password,
            } => {
                let user = client
                    .create_user(&CreateUserRequest {
                        first_name,
                        last_name,
                        email,
                        password,
                    })
                    .await?;
                print_json(&user)?;
            }
            UserCommands::Remove { email } => {
                client.remove_user(&email).await?;
                println!("removed user {email}");
            }
        },
        Commands::Account { action } => match action {
            AccountCommands::Save {
                id,
                user_id,
                currency,
                amount,
            } => {
                let account = client
                    .save_account(&SaveAccountRequest {
                        id,
                        user_id,
                        currency,
                        amount,
                    })
                    .await?;
                print_json(&account)?;
            }
            AccountCommands::Remove { email, currency } => {
                client.remove_account(&email, currency).await?;
                println!("removed {currency} account of {email}");
            }
        },
        Commands::Health => {
            let healthy = client.health().await?;
            println!("{}", if healthy { "healthy" } else { "unhealthy" });
        }
    }

    Ok(())
}
