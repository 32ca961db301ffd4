//! CLI Entity Subcommands
//!
//! Direct create/update/delete against the entity routes, bypassing the
//! natural-language parser.

use anyhow::{bail, Result};
use clap::Subcommand;
use serde_json::{Map, Value};

use ontodash_core::{EntityAck, OntologyApi};

use crate::terminal_output::{dim, note_error, note_success};

#[derive(Subcommand)]
pub enum EntityCommands {
    /// Create an individual of an ontology class
    Create {
        /// Ontology class, e.g. `Personne` or `Destination`
        #[arg(long = "type")]
        kind: String,
        /// Attribute as `key=value`; repeatable
        #[arg(long = "attr", value_name = "KEY=VALUE")]
        attrs: Vec<String>,
    },
    /// Update attributes of an existing individual
    Update {
        #[arg(long)]
        uri: String,
        #[arg(long = "attr", value_name = "KEY=VALUE")]
        attrs: Vec<String>,
    },
    /// Delete an individual
    Delete {
        #[arg(long)]
        uri: String,
    },
}

/// Returns `Ok(false)` when the backend refused the change.
pub async fn run(api: &dyn OntologyApi, cmd: EntityCommands) -> Result<bool> {
    let result = match cmd {
        EntityCommands::Create { kind, attrs } => {
            let attributes = parse_attributes(&attrs)?;
            api.create_entity(&kind, &attributes).await
        }
        EntityCommands::Update { uri, attrs } => {
            let attributes = parse_attributes(&attrs)?;
            if attributes.as_object().is_some_and(Map::is_empty) {
                bail!("Nothing to update: pass at least one --attr KEY=VALUE");
            }
            api.update_entity(&uri, &attributes).await
        }
        EntityCommands::Delete { uri } => api.delete_entity(&uri).await,
    };

    match result {
        Ok(EntityAck { message, uri, .. }) => {
            note_success(&message);
            if let Some(uri) = uri {
                println!("  {}", dim(&uri));
            }
            Ok(true)
        }
        Err(e) => {
            note_error(&e.user_message());
            Ok(false)
        }
    }
}

/// `key=value` pairs into a JSON object. Values that parse as JSON
/// (numbers, booleans, quoted strings) keep their type; anything else is a
/// plain string.
pub fn parse_attributes(pairs: &[String]) -> Result<Value> {
    let mut map = Map::new();
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            bail!("Invalid attribute '{pair}': expected KEY=VALUE");
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("Invalid attribute '{pair}': empty key");
        }
        let value = serde_json::from_str::<Value>(raw.trim())
            .ok()
            .filter(|v| !v.is_object() && !v.is_array() && !v.is_null())
            .unwrap_or_else(|| Value::String(raw.to_string()));
        map.insert(key.to_string(), value);
    }
    Ok(Value::Object(map))
}
