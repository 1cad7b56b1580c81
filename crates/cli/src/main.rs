//! Marketboard CLI - Token, password and bulk import tools.
//!
//! # Usage
//!
//! ```bash
//! # Issue a session token signed with the configured secret
//! mb-cli token issue --email shop@example.com --role vendor --name "Shop"
//!
//! # Check a token and print the identity it carries
//! mb-cli token verify eyJhbGciOi...
//!
//! # Hash a password the way the server stores it
//! mb-cli password hash 'correct horse'
//!
//! # Bulk import products from CSV
//! mb-cli import products.csv --url http://127.0.0.1:3000 --token "$TOKEN"
//! ```
//!
//! # Commands
//!
//! - `token issue` / `token verify` - Session tokens
//! - `password hash` - Argon2id PHC strings
//! - `import` - Upload CSV rows to `/products/bulk`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mb-cli")]
#[command(author, version, about = "Marketboard CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue and inspect session tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
    /// Password utilities
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },
    /// Import products from a header-less CSV file
    Import {
        /// CSV file (`name,image,whatsapp,instagram,cat1|cat2` per line)
        file: PathBuf,

        /// Base URL of the storefront API
        #[arg(long, env = "MARKETBOARD_URL")]
        url: Option<String>,

        /// Vendor session token
        #[arg(long, env = "MARKETBOARD_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Print the request body instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Sign a token for an identity
    Issue {
        /// Account ID (generated when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Role (`vendor` or `customer`)
        #[arg(short, long)]
        role: String,

        /// Display name
        #[arg(short, long)]
        name: String,
    },
    /// Verify a token and print its identity
    Verify {
        /// The token to check
        token: String,
    },
}

#[derive(Subcommand)]
enum PasswordAction {
    /// Print the Argon2id hash of a password
    Hash {
        /// Plaintext password
        plaintext: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing; logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let output = match cli.command {
        Commands::Token { action } => match action {
            TokenAction::Issue {
                id,
                email,
                role,
                name,
            } => commands::token::issue(id.as_deref(), &email, &role, &name)?,
            TokenAction::Verify { token } => commands::token::verify(&token)?,
        },
        Commands::Password { action } => match action {
            PasswordAction::Hash { plaintext } => commands::password::hash(&plaintext).await?,
        },
        Commands::Import {
            file,
            url,
            token,
            dry_run,
        } => {
            commands::import::run(commands::import::ImportOptions {
                file: &file,
                url: url.as_deref(),
                token: token.as_deref(),
                dry_run,
            })
            .await?
        }
    };

    writeln!(std::io::stdout(), "{output}")?;
    Ok(())
}
