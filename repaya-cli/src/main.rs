//! Command-line client for the repaya payments API.
//!
//! # Usage
//!
//! ```bash
//! # Create a product checkout session
//! REPAYA_API_TOKEN=... repaya sessions.create FORM_ID \
//!     customer.id=42 product.id=P product.name="Awesome product" price.ETH=1.0
//!
//! # Look up the payment behind a session
//! repaya payments.getBySession SESSION_ID
//!
//! # List a form's payments, newest first
//! repaya payments.list FORM_ID limit=100 sort=desc
//!
//! # Total balances across all customers
//! repaya balances.getAll FORM_ID customerId=
//! ```
//!
//! # Environment Variables
//!
//! - `REPAYA_API_TOKEN` — API token to use (required)
//! - `REPAYA_ENV` — Environment base URL, `https://repaya.io` or
//!   `https://goerli.repaya.io` (default: production)
//! - `RUST_LOG` — Log level filter (default: `info`)

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use repaya::{Client, ENV_PRODUCTION};

mod options;

#[derive(Debug, Parser)]
#[command(
    name = "repaya",
    version,
    about = "Command-line client for the repaya payments API"
)]
struct Cli {
    /// API token used for bearer authentication.
    #[arg(long, env = "REPAYA_API_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Environment base URL.
    #[arg(long, env = "REPAYA_ENV", default_value = ENV_PRODUCTION, global = true)]
    env: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a payment session.
    #[command(name = "sessions.create")]
    SessionsCreate {
        /// Payment form id.
        form_id: String,
        /// Options: customer.id, customer.data, product.id, product.name,
        /// product.data, price.<COIN>, clientId.
        #[arg(value_name = "KEY=VALUE")]
        options: Vec<String>,
    },

    /// Get a payment by session id.
    #[command(name = "payments.getBySession")]
    PaymentsGetBySession {
        /// Payment session id.
        session_id: String,
    },

    /// List payments by payment form id.
    #[command(name = "payments.list")]
    PaymentsList {
        /// Payment form id.
        form_id: String,
        /// Options: from, till, sort, limit, page.
        #[arg(value_name = "KEY=VALUE")]
        options: Vec<String>,
    },

    /// Get user balances by form id.
    #[command(name = "balances.getAll")]
    BalancesGetAll {
        /// Payment form id.
        form_id: String,
        /// Options: customerId, productId, coin. Put an empty value
        /// (`customerId=`) to query total balances.
        #[arg(value_name = "KEY=VALUE")]
        options: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Some(token) = cli.token.as_deref() else {
        return Err("REPAYA_API_TOKEN environment variable must be set".into());
    };
    let client = Client::new(&cli.env, Some(token))?;

    let result = match cli.command {
        Command::SessionsCreate {
            form_id,
            options: words,
        } => {
            let tree = options::parse_options(&words, options::SESSION_OPTIONS, true)?;
            let checkout = options::checkout_options(&tree)?;
            let session = client.sessions().create(&form_id, checkout).await?;
            serde_json::to_value(session)?
        }

        Command::PaymentsGetBySession { session_id } => {
            let payment = client.payments().get_by_session(&session_id).await?;
            serde_json::to_value(payment)?
        }

        Command::PaymentsList {
            form_id,
            options: words,
        } => {
            let tree = options::parse_options(&words, options::LIST_OPTIONS, false)?;
            let opts = options::list_options(&tree)?;
            let page = client.payments().list(&form_id, opts).await?;
            serde_json::to_value(page)?
        }

        Command::BalancesGetAll {
            form_id,
            options: words,
        } => {
            let tree = options::parse_options(&words, options::BALANCE_OPTIONS, false)?;
            let opts = options::balance_options(&tree);
            let balances = client.balances().get_all(&form_id, opts).await?;
            serde_json::to_value(balances)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
