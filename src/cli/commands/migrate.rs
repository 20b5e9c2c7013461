use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::PgTodoStore;

pub async fn handle(store: &PgTodoStore, output_format: OutputFormat) -> anyhow::Result<()> {
    store.migrate().await?;
    output_success(output_format, "Database schema is up to date", None)
}
