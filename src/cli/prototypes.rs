//! Prototype listing command implementation.

use super::output::JsonPrototype;
use super::{CliError, OutputFormat};
use mundus::world::prototypes;

/// Execute the prototypes command.
///
/// # Errors
///
/// Returns an error if JSON output cannot be rendered.
pub(crate) fn execute(format: OutputFormat) -> Result<(), CliError> {
    let protos = prototypes();
    match format {
        OutputFormat::Text => {
            for proto in &protos {
                let kind = match proto.clothing_type {
                    Some("") => " [vestīmentum]".to_string(),
                    Some(kind) => format!(" [vestīmentum: {kind}]"),
                    None if proto.container.is_some() => " [receptāculum]".to_string(),
                    None => String::new(),
                };
                println!(
                    "{:<14} {:<10} {:<9} {:>8.2} kg {:>8.2} l{kind}",
                    proto.name,
                    proto.genitive,
                    proto.gender.as_str(),
                    proto.physical.mass,
                    proto.physical.volume
                );
            }
        }
        OutputFormat::Json => {
            let list: Vec<JsonPrototype> = protos.iter().map(JsonPrototype::from_prototype).collect();
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
    }
    Ok(())
}
