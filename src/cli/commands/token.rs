use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::{PgTodoStore, TodoStore};

pub async fn handle(
    user_id: i64,
    hours: Option<u64>,
    store: &PgTodoStore,
    config: &AppConfig,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let user = store
        .get_user(user_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User {} not found", user_id))?;

    let hours = hours.unwrap_or(config.security.jwt_expiry_hours);
    let token = generate_jwt(&Claims::new(user.id, &user.username, hours)?, &config.security)?;

    match output_format {
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
        OutputFormat::Json => output_success(
            output_format,
            &format!("Issued token for '{}'", user.username),
            Some(json!({ "token": token, "expires_in_hours": hours })),
        ),
    }
}
