//! The rules engine: move validation, chain reactions, rollback and win checks.

use std::collections::VecDeque;

use tracing::{debug, error, info, instrument, trace, warn};

use crate::error::{EngineResult, GameError, MoveRejection};
use crate::game::{
    CascadeProbe, CascadeReport, Cell, CellChange, CellCounts, CellId, CellState, ChangeLog, Coord,
    Direction, GameConfig, GameResult, Grid, MoveOutcome, NoProbe, Player, SafetyLevel,
    assert_invariants, check_move, evaluate_win,
};

/// Drives a game on a grid it owns.
///
/// The engine is the only mutator of cell contents once it holds the grid;
/// readers borrow the grid between moves through [`RulesEngine::grid`].
#[derive(Debug, Clone)]
pub struct RulesEngine {
    /// The board.
    grid: Grid,
    /// Rules in force.
    config: GameConfig,
    /// Player to move.
    current_player: Player,
    /// Individual moves played since the last reset.
    turn_count: u32,
    /// Set once a result ends the game.
    game_over: bool,
    /// Result of the latest move.
    last_result: Option<GameResult>,
}

impl RulesEngine {
    /// Take ownership of `grid` and start a game with player one to move.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfiguration`] if `config` is invalid.
    pub fn new(grid: Grid, config: GameConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            grid,
            config,
            current_player: Player::One,
            turn_count: 0,
            game_over: false,
            last_result: None,
        })
    }

    /// The board.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Give the board back, ending the game.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Rules in force.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Player to move.
    #[must_use]
    pub const fn current_player(&self) -> Player {
        self.current_player
    }

    /// Individual moves played since the last reset.
    #[must_use]
    pub const fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Result of the latest move, final or not.
    #[must_use]
    pub const fn last_result(&self) -> Option<GameResult> {
        self.last_result
    }

    /// Count cells per state on the board.
    #[must_use]
    pub fn cell_counts(&self) -> CellCounts {
        self.grid.count_cells()
    }

    /// Re-evaluate the win conditions against the current board.
    #[must_use]
    pub fn evaluate(&self) -> Option<GameResult> {
        evaluate_win(self.config, self.grid.count_cells(), self.turn_count)
    }

    /// Check if the game has been decided.
    ///
    /// The board only changes through [`RulesEngine::make_move`], which
    /// evaluates the win conditions every time, so the stored flag always
    /// agrees with [`RulesEngine::evaluate`].
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The final result, if the game is over.
    #[must_use]
    pub fn game_result(&self) -> Option<GameResult> {
        if self.game_over {
            self.last_result
        } else {
            None
        }
    }

    /// Decide whether `player` may play at `coord`, naming the reason if not.
    ///
    /// # Errors
    ///
    /// Returns the [`MoveRejection`] describing why the move is illegal.
    pub fn validate_move(&self, coord: Coord, player: Player) -> Result<CellId, MoveRejection> {
        let Some(id) = self.grid.at(coord) else {
            return Err(MoveRejection::NoSuchCell(coord));
        };
        if self.game_over {
            return Err(MoveRejection::GameOver);
        }
        if player != self.current_player {
            return Err(MoveRejection::OutOfTurn {
                current: self.current_player,
                requested: player,
            });
        }
        let state = self
            .grid
            .cell(id)
            .map_or(CellState::Blocked, Cell::state);
        if !state.playable_by(player) {
            return Err(MoveRejection::NotOwned { coord, state });
        }
        Ok(id)
    }

    /// Check if `player` may play at `coord`. Never fails.
    #[must_use]
    pub fn is_valid_move(&self, coord: Coord, player: Player) -> bool {
        self.validate_move(coord, player).is_ok()
    }

    /// Coordinates the current player may play, in grid storage order.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Coord> {
        if self.game_over {
            return Vec::new();
        }
        self.grid
            .iter()
            .filter(|(_, cell)| cell.state().playable_by(self.current_player))
            .map(|(_, cell)| cell.coord())
            .collect()
    }

    /// Play `player`'s move at `coord`.
    ///
    /// The move is all-or-nothing under [`SafetyLevel::LightUndo`]: on any
    /// failure after validation every touched cell is restored and the
    /// session is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidMove`] if the move is illegal (nothing is
    /// mutated), or the failure that interrupted the cascade.
    pub fn make_move(&mut self, coord: Coord, player: Player) -> EngineResult<MoveOutcome> {
        self.make_move_probed(coord, player, &mut NoProbe)
    }

    /// Play a move, reporting each cell mutation to `probe` first.
    ///
    /// # Errors
    ///
    /// As [`RulesEngine::make_move`]; a probe error surfaces as
    /// [`GameError::CascadeAborted`].
    #[instrument(level = "debug", skip(self, probe), fields(turn = self.turn_count))]
    pub fn make_move_probed<P: CascadeProbe + ?Sized>(
        &mut self,
        coord: Coord,
        player: Player,
        probe: &mut P,
    ) -> EngineResult<MoveOutcome> {
        let target = self.validate_move(coord, player)?;
        let safety = self.config.safety_level;

        let log = (safety == SafetyLevel::LightUndo).then(ChangeLog::new);
        let mut cascade = Cascade {
            grid: &mut self.grid,
            actor: player,
            stop_on_enemy: self.config.stop_on_enemy,
            log,
            probe,
            steps: 0,
            touched: Vec::new(),
            affected: Vec::new(),
            report: CascadeReport::default(),
        };
        let run = cascade.run(target);
        let Cascade {
            log,
            affected,
            report,
            ..
        } = cascade;

        if let Err(err) = run {
            return Err(self.abort(log, err));
        }

        if safety == SafetyLevel::ValidateOnly {
            verify_move(&self.grid, &affected)?;
        }

        self.current_player = self.current_player.opponent();
        self.turn_count = self.turn_count.saturating_add(1);

        let counts = self.grid.count_cells();
        let result = match evaluate_win(self.config, counts, self.turn_count) {
            Some(result) => {
                self.game_over = true;
                info!(turn = self.turn_count, outcome = %result.describe(), "game over");
                result
            }
            None => GameResult::in_progress(self.turn_count, counts),
        };
        self.last_result = Some(result);

        debug!(
            explosions = report.explosions,
            affected = affected.len(),
            "move applied"
        );
        assert_invariants(&self.grid);

        Ok(MoveOutcome {
            result,
            affected,
            report,
        })
    }

    /// Start over with player one to move, optionally under new rules.
    ///
    /// Cells are left as they are; hand the engine a fresh grid (or clear
    /// this one through [`RulesEngine::into_grid`]) for a clean board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfiguration`] if `config` is invalid,
    /// in which case nothing is reset.
    pub fn reset_game(&mut self, config: Option<GameConfig>) -> EngineResult<()> {
        if let Some(config) = config {
            config.validate()?;
            self.config = config;
        }
        self.current_player = Player::One;
        self.turn_count = 0;
        self.game_over = false;
        self.last_result = None;
        Ok(())
    }

    /// Undo a failed cascade and pick the error to report.
    fn abort(&mut self, log: Option<ChangeLog>, err: GameError) -> GameError {
        let Some(log) = log else {
            warn!(error = %err, "move failed without an undo log");
            return err;
        };
        let entries = log.len();
        match log.rollback(&mut self.grid) {
            Ok(()) => {
                warn!(error = %err, entries, "move rolled back");
                err
            }
            Err(rollback) => {
                error!(error = %err, rollback = %rollback, "rollback failed");
                rollback
            }
        }
    }
}

/// Working state of one chain reaction.
struct Cascade<'a, P: ?Sized> {
    grid: &'a mut Grid,
    actor: Player,
    stop_on_enemy: bool,
    log: Option<ChangeLog>,
    probe: &'a mut P,
    /// Mutations so far.
    steps: usize,
    /// Indexed by cell; set once a cell is in `affected`.
    touched: Vec<bool>,
    affected: Vec<Coord>,
    report: CascadeReport,
}

impl<P: CascadeProbe + ?Sized> Cascade<'_, P> {
    /// Claim and charge `target`, then explode until every queued cell is stable.
    fn run(&mut self, target: CellId) -> EngineResult<()> {
        self.touched = vec![false; self.grid.len()];

        let (coord, energy) = {
            let cell = self.cell(target)?;
            (cell.coord(), cell.energy())
        };
        let energy = energy
            .checked_add(1)
            .ok_or(GameError::EnergyOverflow(coord))?;
        self.before_change(target)?;
        let own = self.actor.cell_state();
        let cell = self.cell_mut(target)?;
        cell.set_state(own);
        cell.set_energy(energy);
        self.touch(target, coord);

        let mut queue = VecDeque::new();
        if self.cell(target)?.is_unstable() {
            queue.push_back(target);
        }

        while let Some(id) = queue.pop_front() {
            // Queue membership is stale once a later explosion has drained or
            // refilled the cell.
            if self.cell(id)?.is_unstable() {
                self.explode(id, &mut queue)?;
            }
        }

        Ok(())
    }

    /// Zero `id`, claim it, and hand one unit to every eligible neighbor.
    fn explode(&mut self, id: CellId, queue: &mut VecDeque<CellId>) -> EngineResult<()> {
        let own = self.actor.cell_state();

        self.before_change(id)?;
        let cell = self.cell_mut(id)?;
        let released = cell.energy();
        let coord = cell.coord();
        cell.set_energy(0);
        cell.set_state(own);
        self.report.explosions += 1;
        self.report.energy_released += u64::from(released);
        trace!(%coord, released, "explosion");

        for dir in Direction::ALL {
            let Some(neighbor) = self.grid.neighbor(id, dir) else {
                continue;
            };
            let (state, energy, at) = {
                let cell = self.cell(neighbor)?;
                (cell.state(), cell.energy(), cell.coord())
            };
            if state.is_blocked() {
                continue;
            }
            if self.stop_on_enemy && state.is_enemy_of(self.actor) {
                continue;
            }
            let energy = energy.checked_add(1).ok_or(GameError::EnergyOverflow(at))?;

            self.before_change(neighbor)?;
            let cell = self.cell_mut(neighbor)?;
            cell.set_state(own);
            cell.set_energy(energy);
            self.report.energy_distributed += 1;
            self.touch(neighbor, at);

            if self.cell(neighbor)?.is_unstable() {
                queue.push_back(neighbor);
            }
        }

        Ok(())
    }

    /// Notify the probe and snapshot `id` before it is mutated.
    fn before_change(&mut self, id: CellId) -> EngineResult<()> {
        let change = CellChange::capture(id, self.cell(id)?);
        let coord = self.cell(id)?.coord();
        self.steps += 1;
        self.probe
            .before_change(self.steps, coord)
            .map_err(GameError::CascadeAborted)?;
        if let Some(log) = self.log.as_mut() {
            log.record(change);
            self.report.changes_recorded += 1;
        }
        Ok(())
    }

    fn touch(&mut self, id: CellId, coord: Coord) {
        if let Some(seen) = self.touched.get_mut(id.index())
            && !*seen
        {
            *seen = true;
            self.affected.push(coord);
        }
    }

    fn cell(&self, id: CellId) -> EngineResult<&Cell> {
        self.grid
            .cell(id)
            .ok_or_else(|| GameError::InvariantViolation(format!("cell {id} missing from grid")))
    }

    fn cell_mut(&mut self, id: CellId) -> EngineResult<&mut Cell> {
        self.grid
            .cell_mut(id)
            .ok_or_else(|| GameError::InvariantViolation(format!("cell {id} missing from grid")))
    }
}

/// Fail if any cell touched by a finished move is missing or still unstable.
fn verify_move(grid: &Grid, affected: &[Coord]) -> EngineResult<()> {
    let violations = check_move(grid, affected);
    if violations.is_empty() {
        return Ok(());
    }
    let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
    error!(violations = messages.len(), "move left the grid inconsistent");
    Err(GameError::InvariantViolation(messages.join("; ")))
}
