//! Configuration validation command implementation.

use std::fs;
use std::path::Path;

use octa::GameError;
use octa::game::GameConfig;

use super::CliError;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or
/// describes a configuration the engine rejects.
pub(crate) fn execute(file: &Path) -> Result<(), CliError> {
    let text = fs::read_to_string(file)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", file.display())))?;

    println!("Validating: {}", file.display());
    println!();

    let config = match GameConfig::from_json(&text) {
        Ok(config) => {
            print_check("JSON syntax", true);
            print_check("Rules", true);
            config
        }
        Err(e @ GameError::InvalidConfiguration(_)) => {
            print_check("JSON syntax", true);
            print_check("Rules", false);
            return Err(e.into());
        }
        Err(e) => {
            print_check("JSON syntax", false);
            return Err(e.into());
        }
    };

    println!();
    println!("Summary:");
    println!("  Win condition: {:?}", config.win_condition);
    println!("  Turn limit:    {}", config.turn_limit);
    println!("  Stop on enemy: {}", config.stop_on_enemy);
    println!("  Safety level:  {:?}", config.safety_level);
    println!();
    println!("Effective configuration:");
    println!("{}", config.to_json()?);
    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
