pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgTodoStore};

#[derive(Parser)]
#[command(name = "todoctl")]
#[command(about = "Administrative CLI for the Todo Category API database")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create or update the database schema")]
    Migrate,

    #[command(about = "User management")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },

    #[command(about = "Todo management")]
    Todo {
        #[command(subcommand)]
        cmd: commands::todo::TodoCommands,
    },

    #[command(about = "Issue a bearer token for an existing user")]
    Token {
        #[arg(help = "User id")]
        user_id: i64,
        #[arg(long, help = "Token lifetime in hours (defaults to configured expiry)")]
        hours: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let pool = DatabaseManager::connect(&config.database).await?;
    let store = PgTodoStore::new(pool);

    let result = match cli.command {
        Commands::Migrate => commands::migrate::handle(&store, output_format).await,
        Commands::User { cmd } => commands::user::handle(cmd, &store, output_format).await,
        Commands::Todo { cmd } => commands::todo::handle(cmd, &store, output_format).await,
        Commands::Token { user_id, hours } => {
            commands::token::handle(user_id, hours, &store, &config, output_format).await
        }
    };

    store.close().await;
    result
}
