use serde_json::{json, Map, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&success_envelope(message, data))?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

fn success_envelope(message: &str, data: Option<Value>) -> Value {
    let mut response = Map::new();
    response.insert("success".to_string(), json!(true));
    response.insert("message".to_string(), json!(message));

    match data {
        Some(Value::Object(fields)) => response.extend(fields),
        Some(other) => {
            response.insert("data".to_string(), other);
        }
        None => {}
    }

    Value::Object(response)
}
