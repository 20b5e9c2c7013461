use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::models::NewTodo;
use crate::database::{PgTodoStore, TodoStore};

#[derive(Subcommand)]
pub enum TodoCommands {
    #[command(about = "Create a todo owned by a user")]
    Add {
        #[arg(long, help = "Owning user id")]
        user: i64,
        #[arg(help = "Todo text")]
        text: String,
    },
}

pub async fn handle(cmd: TodoCommands, store: &PgTodoStore, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TodoCommands::Add { user, text } => {
            if store.get_user(user).await?.is_none() {
                anyhow::bail!("User {} not found", user);
            }
            let todo = store.insert_todo(NewTodo { text, user_id: user }).await?;
            output_success(
                output_format,
                &format!("Created todo {} for user {}", todo.id, todo.user_id),
                Some(json!({ "todo": todo })),
            )
        }
    }
}
