//! Snapshot check command implementation.

use super::CliError;
use mundus::World;
use mundus::world::check_invariants;
use std::path::Path;

/// Execute the check command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or breaks an invariant.
pub(crate) fn execute(snapshot: &Path) -> Result<(), CliError> {
    let world = World::load(snapshot)?;
    println!("Checking: {}", snapshot.display());
    println!("  Entities: {}", world.len());
    println!("  Clock:    {}s", world.clock());

    let violations = check_invariants(&world);
    if violations.is_empty() {
        println!();
        println!("All invariants hold.");
        return Ok(());
    }

    println!();
    for violation in &violations {
        println!("  ✗ {violation}");
    }
    Err(CliError::new(format!("{} invariant violation(s)", violations.len())))
}
