//! Play command implementation.

use super::output::{format_game_text, format_move, render_grid};
use super::{CliError, GameOptions, OutputFormat, resolve_seed};
use octa::sim::run_game_with;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the game fails.
pub(crate) fn execute(
    options: &GameOptions,
    seed: Option<u64>,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let config = options.sim_config()?;
    let seed = resolve_seed(seed);
    let text = format == OutputFormat::Text;

    if text && !quiet {
        println!(
            "Playing seed {seed} on a radius {} grid ({}% blocked)...",
            config.radius, config.blocked_percent
        );
        println!();
    }

    let mut board = None;
    let summary = run_game_with(seed, &config, |engine, outcome| {
        if !text {
            return;
        }
        if !quiet {
            println!("{}", format_move(engine.current_player().opponent(), outcome));
        }
        board = Some(render_grid(engine.grid()));
    })?;

    match format {
        OutputFormat::Text => {
            if !quiet {
                println!();
            }
            print!("{}", format_game_text(&summary));
            if let Some(board) = board {
                println!();
                print!("{board}");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{json}");
        }
    }

    Ok(())
}
