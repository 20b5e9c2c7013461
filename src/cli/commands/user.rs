use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::{PgTodoStore, TodoStore};

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a user")]
    Add {
        #[arg(help = "Unique username")]
        username: String,
    },

    #[command(about = "Show a user by id")]
    Show {
        #[arg(help = "User id")]
        id: i64,
    },
}

pub async fn handle(cmd: UserCommands, store: &PgTodoStore, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Add { username } => {
            let user = store.insert_user(username.trim()).await?;
            output_success(
                output_format,
                &format!("Created user '{}' with id {}", user.username, user.id),
                Some(json!({ "user": user })),
            )
        }
        UserCommands::Show { id } => {
            let user = store
                .get_user(id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("User {} not found", id))?;
            output_success(
                output_format,
                &format!("User {}: {}", user.id, user.username),
                Some(json!({ "user": user })),
            )
        }
    }
}
