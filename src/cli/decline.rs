//! Declension command implementation.

use super::output::JsonParadigm;
use super::{CliError, OutputFormat};
use mundus::{Gender, decline};

/// Execute the decline command.
///
/// # Errors
///
/// Returns an error if the gender is unknown or the noun cannot be declined.
pub(crate) fn execute(
    nominative: &str,
    genitive: &str,
    gender: &str,
    format: OutputFormat,
) -> Result<(), CliError> {
    let gender = Gender::parse(gender)
        .ok_or_else(|| CliError::new(format!("Unknown gender '{gender}' (māre, muliebre, neutrum)")))?;
    let paradigm = decline(nominative, genitive, gender)?;

    match format {
        OutputFormat::Text => {
            println!("{nominative}, {genitive} ({gender}): {}", paradigm.declension);
            println!();
            for (label, form) in paradigm.iter() {
                println!("  {:<7} {form}", label.as_str());
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonParadigm::from_paradigm(&paradigm))?;
            println!("{json}");
        }
    }
    Ok(())
}
