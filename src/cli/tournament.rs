//! Tournament command implementation.

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use octa::sim::run_batch_with;
use tracing::warn;

use super::output::{JsonBatchResult, format_batch_csv, format_batch_text};
use super::{CliError, GameOptions, TournamentFormat, resolve_seed};

/// Execute the tournament command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or output fails.
pub(crate) fn execute(
    options: &GameOptions,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    format: TournamentFormat,
    progress: bool,
) -> Result<(), CliError> {
    let config = options.sim_config()?;

    if let Some(num_threads) = threads
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
    {
        warn!(threads = num_threads, error = %e, "keeping the existing thread pool");
    }

    let base_seed = resolve_seed(seed);
    let bar = progress.then(|| progress_bar(games)).transpose()?;

    let start = Instant::now();
    let stats = run_batch_with(base_seed, games, &config, || {
        if let Some(bar) = &bar {
            bar.inc(1);
        }
    });
    if let Some(bar) = bar {
        bar.finish_with_message("done");
    }

    let duration = start.elapsed();

    #[allow(clippy::cast_precision_loss)]
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        TournamentFormat::Text => {
            println!();
            print!("{}", format_batch_text(&stats, &config));
            println!();
            println!(
                "Duration: {:.2}s ({games_per_sec:.0} games/sec)",
                duration.as_secs_f64()
            );
        }
        TournamentFormat::Json => {
            let result = JsonBatchResult::new(base_seed, &config, &stats, duration.as_secs_f64());
            let json = serde_json::to_string_pretty(&result)?;
            println!("{json}");
        }
        TournamentFormat::Csv => {
            print!("{}", format_batch_csv(&stats, base_seed));
        }
    }

    Ok(())
}

/// Bar advanced once per finished game.
fn progress_bar(games: u64) -> Result<ProgressBar, CliError> {
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
        .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
        .progress_chars("=>-");
    Ok(ProgressBar::new(games).with_style(style))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_tracks_games() {
        let bar = progress_bar(4).unwrap();
        assert_eq!(bar.length(), Some(4));
        bar.inc(1);
        bar.inc(1);
        assert_eq!(bar.position(), 2);
    }
}
