//! Cards CLI
//!
//! Command-line interface for the compliance and payment APIs.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cards_client::{ClientError, ComplianceClient, PaymentClient};
use cards_types::{CardId, DEFAULT_HASH_COST, SecretHash, UserId};

#[derive(Parser)]
#[command(name = "cards")]
#[command(author, version, about = "Card compliance and payment CLI client", long_about = None)]
struct Cli {
    /// Base URL of the compliance API
    #[arg(
        long,
        env = "COMPLIANCE_SERVICE_URL",
        default_value = "http://localhost:8080"
    )]
    compliance_url: String,

    /// Base URL of the payment API
    #[arg(long, env = "PAYMENT_SERVICE_URL", default_value = "http://localhost:8081")]
    payment_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report every card of a user as stolen
    Report {
        #[arg(long)]
        user_name: String,
        #[arg(long, env = "CARDS_SECRET_CODE", hide_env_values = true)]
        secret_code: String,
    },
    /// Show the compliance verdict for a user and card
    Status {
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        card_id: i64,
    },
    /// Submit a payment
    Pay {
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        card_id: i64,
        #[arg(long)]
        amount: f64,
    },
    /// Check health of both services
    Health,
    /// Print the bcrypt hash of a secret, for seed scripts
    HashSecret {
        secret: String,
        #[arg(long, default_value_t = DEFAULT_HASH_COST)]
        cost: u32,
    },
}

/// API errors print the server's message; everything else bubbles up.
fn print_api_error(err: ClientError) -> Result<ExitCode> {
    match err {
        ClientError::Api { status, message } => {
            eprintln!("✗ {} ({})", message, status);
            Ok(ExitCode::FAILURE)
        }
        other => Err(other.into()),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let compliance = ComplianceClient::new(&cli.compliance_url);
    let payments = PaymentClient::new(&cli.payment_url);

    match cli.command {
        Commands::Health => {
            let mut all_healthy = true;
            for (name, healthy) in [
                ("compliance", compliance.health().await.unwrap_or(false)),
                ("payment", payments.health().await.unwrap_or(false)),
            ] {
                if healthy {
                    println!("✓ {} API is healthy", name);
                } else {
                    println!("✗ {} API is not healthy", name);
                    all_healthy = false;
                }
            }
            if !all_healthy {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Report {
            user_name,
            secret_code,
        } => match compliance.report_stolen_cards(&user_name, &secret_code).await {
            Ok(text) => println!("{}", text),
            Err(e) => return print_api_error(e),
        },

        Commands::Status { user_id, card_id } => {
            match compliance
                .check_status(UserId::new(user_id), CardId::new(card_id))
                .await
            {
                Ok(status) => println!("{}", serde_json::to_string_pretty(&status)?),
                Err(e) => return print_api_error(e),
            }
        }

        Commands::Pay {
            user_id,
            card_id,
            amount,
        } => match payments
            .process_payment(UserId::new(user_id), CardId::new(card_id), amount)
            .await
        {
            Ok(resp) => println!("{}", resp.message),
            Err(e) => return print_api_error(e),
        },

        Commands::HashSecret { secret, cost } => {
            let hash = SecretHash::generate(&secret, cost)?;
            println!("{}", hash.as_str());
        }
    }

    Ok(ExitCode::SUCCESS)
}
