//! Game state module - the game controller
//!
//! Ties together board, active piece, piece generator and scoring, and drives
//! the per-frame tick:
//!
//! 1. lateral repeat of the first held direction (every 100ms),
//! 2. gravity step when the level's gravity interval has elapsed; after it the
//!    settle counter grows while the piece cannot descend and resets otherwise,
//! 3. settle confirmation once the counter reaches `level + 1`, in the same
//!    tick as that gravity step: clear lines, score, spawn the upcoming piece,
//!    or reset the session if spawn is blocked. Input from later frames no
//!    longer reaches the landed piece.
//!
//! The settle counter is the lock delay: a grounded piece survives `level + 1`
//! gravity steps, so it can still slide sideways after touching down.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::config::GameConfig;
use crate::piece::ActivePiece;
use crate::pieces::get_shape;
use crate::rng::PieceGenerator;
use crate::scoring::{gravity_interval_ms, level_for_lines, line_clear_score, SPAWN_BONUS};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Pending lifecycle events, drained by the presentation layer each frame
pub type EventQueue = ArrayVec<GameEvent, 8>;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: ActivePiece,
    next: PieceKind,
    generator: PieceGenerator,
    score: u32,
    level: u32,
    lines: u32,
    /// Consecutive gravity steps the active piece could not descend
    settle_counter: u32,
    last_gravity_ms: u64,
    last_repeat_ms: u64,
    /// Held direction keys in press order
    held: ArrayVec<Direction, 3>,
    events: EventQueue,
    quit: bool,
}

impl GameState {
    /// Create a session and spawn its first piece
    pub fn new(config: GameConfig) -> Self {
        let mut generator = PieceGenerator::new(config.seed);
        let mut board = Board::new();
        let active = ActivePiece::place(generator.next_any(), &mut board);
        let next = generator.next_any();

        Self {
            config,
            board,
            active,
            next,
            generator,
            score: 0,
            level: config.start_level(),
            lines: 0,
            settle_counter: 0,
            last_gravity_ms: config.start_ms,
            last_repeat_ms: config.start_ms,
            held: ArrayVec::new(),
            events: ArrayVec::new(),
            quit: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn settle_counter(&self) -> u32 {
        self.settle_counter
    }

    pub fn held(&self) -> &[Direction] {
        &self.held
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Current gravity interval in milliseconds
    pub fn gravity_interval_ms(&self) -> f64 {
        gravity_interval_ms(self.level)
    }

    /// Take every lifecycle event raised since the last call
    pub fn take_events(&mut self) -> EventQueue {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active_kind = self.active.kind();
        out.active_cells = self.active.cells();
        out.next = self.next;
        out.next_shape = get_shape(self.next);
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.settle_counter = self.settle_counter;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply one input event
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => self.quit = true,
            InputEvent::KeyDown(Key::Space) => {
                self.active.hard_drop(&mut self.board);
                // One more blocked gravity step confirms the settle.
                self.settle_counter = self.level;
            }
            InputEvent::KeyDown(Key::RotateCw) => {
                self.active
                    .rotate(Rotation::Cw, self.config.wall_kick, &mut self.board);
            }
            InputEvent::KeyDown(Key::RotateCcw) => {
                self.active
                    .rotate(Rotation::Ccw, self.config.wall_kick, &mut self.board);
            }
            InputEvent::KeyDown(key) => {
                if let Some(direction) = key.direction() {
                    if !self.held.contains(&direction) {
                        let _ = self.held.try_push(direction);
                    }
                }
            }
            InputEvent::KeyUp(key) => {
                if let Some(direction) = key.direction() {
                    self.held.retain(|held| *held != direction);
                }
            }
        }
    }

    /// Advance the game to the monotonic time `now_ms`
    pub fn tick(&mut self, now_ms: u64) {
        if let Some(&direction) = self.held.first() {
            if now_ms.saturating_sub(self.last_repeat_ms) >= LATERAL_REPEAT_MS {
                self.last_repeat_ms = now_ms;
                self.active.try_move(direction, &mut self.board);
            }
        }

        let gravity_ms = gravity_interval_ms(self.level);
        if now_ms.saturating_sub(self.last_gravity_ms) as f64 >= gravity_ms {
            self.last_gravity_ms = now_ms;
            self.active.try_move(Direction::Down, &mut self.board);

            if self.active.can_descend(&self.board) {
                self.settle_counter = 0;
            } else {
                self.settle_counter += 1;
            }
        }

        if self.settle_counter > self.level {
            self.settle();
        }
    }

    /// Freeze the active piece, clear lines, score and spawn the next piece
    fn settle(&mut self) {
        let cleared = self.board.clear_full_rows() as u32;
        if cleared > 0 {
            self.score += line_clear_score(self.level, cleared);
            self.lines += cleared;
            self.level = level_for_lines(
                self.config.start_level(),
                self.lines,
                self.config.lines_per_level,
            );
            let _ = self.events.try_push(GameEvent::LinesCleared(cleared));
        }

        self.score += SPAWN_BONUS;

        let kind = self.next;
        match ActivePiece::spawn(kind, &mut self.board) {
            Some(piece) => self.active = piece,
            None => self.game_over(kind),
        }

        self.next = self.generator.next_excluding(self.next);
        self.settle_counter = 0;
    }

    /// Reset the session and keep playing with `kind` on an empty board
    fn game_over(&mut self, kind: PieceKind) {
        self.board.reset();
        self.score = 0;
        self.lines = 0;
        self.settle_counter = 0;
        self.level = self.config.start_level();
        self.active = ActivePiece::place(kind, &mut self.board);
        let _ = self.events.try_push(GameEvent::GameOver);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILL: Cell = Cell::Occupied(PieceKind::J);

    fn fill_row(board: &mut Board, y: i8) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, FILL);
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::default();

        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert_eq!(state.settle_counter, 0);
        assert!(!state.quit);
        for (x, y) in state.active.cells() {
            assert!(state.board.is_occupied(x, y));
        }
    }

    #[test]
    fn test_single_line_at_level_zero_scores_fifty() {
        let mut state = GameState::default();
        state.board.reset();
        fill_row(&mut state.board, 21);
        state.level = 0;

        state.settle();

        assert_eq!(state.score, 40 + 10);
        assert_eq!(state.lines, 1);
        assert_eq!(
            state.take_events().as_slice(),
            &[GameEvent::LinesCleared(1)]
        );
    }

    #[test]
    fn test_settle_without_lines_awards_spawn_bonus_only() {
        let mut state = GameState::default();
        state.active.hard_drop(&mut state.board);
        state.settle();

        assert_eq!(state.score, SPAWN_BONUS);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_spawn_failure_resets_session() {
        let mut state = GameState::new(GameConfig::default().with_start_level(2));
        state.score = 1234;
        state.lines = 7;
        state.level = 4;
        state.settle_counter = 9;
        // Block the rows right below every spawn position.
        fill_row(&mut state.board, 3);
        fill_row(&mut state.board, 4);
        state.board.clear_cell(0, 3);
        state.board.clear_cell(0, 4);
        let upcoming = state.next;

        state.settle();

        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.settle_counter, 0);
        assert_eq!(state.level, 2);
        assert_eq!(state.active.kind(), upcoming);
        // Only the fresh piece is on the board.
        let occupied = state.board.cells().iter().filter(|c| c.is_occupied()).count();
        assert_eq!(occupied, 4);
        for (x, y) in state.active.cells() {
            assert!(state.board.is_occupied(x, y));
        }
        assert_eq!(state.take_events().as_slice(), &[GameEvent::GameOver]);
        assert_ne!(state.next, upcoming);
    }

    #[test]
    fn test_gravity_moves_piece_after_interval() {
        let mut state = GameState::default();
        let before = state.active.cells();

        state.tick(1000);
        assert_eq!(state.active.cells(), before);

        state.tick(1067);
        let after = state.active.cells();
        for (b, a) in before.iter().zip(after.iter()) {
            assert_eq!((b.0, b.1 + 1), *a);
        }
    }

    #[test]
    fn test_held_key_repeats_every_100ms() {
        let mut state = GameState::default();
        let x0 = state.active.pivot().0;

        state.handle_input(InputEvent::KeyDown(Key::Left));
        state.tick(50);
        assert_eq!(state.active.pivot().0, x0);
        state.tick(100);
        assert_eq!(state.active.pivot().0, x0 - 1);
        state.tick(150);
        assert_eq!(state.active.pivot().0, x0 - 1);
        state.tick(200);
        assert_eq!(state.active.pivot().0, x0 - 2);

        state.handle_input(InputEvent::KeyUp(Key::Left));
        state.tick(400);
        assert_eq!(state.active.pivot().0, x0 - 2);
    }

    #[test]
    fn test_first_held_key_wins() {
        let mut state = GameState::default();
        state.handle_input(InputEvent::KeyDown(Key::Right));
        state.handle_input(InputEvent::KeyDown(Key::Left));
        state.handle_input(InputEvent::KeyDown(Key::Right));
        assert_eq!(state.held(), &[Direction::Right, Direction::Left]);

        state.handle_input(InputEvent::KeyUp(Key::Right));
        assert_eq!(state.held(), &[Direction::Left]);
    }

    #[test]
    fn test_hard_drop_settles_on_next_gravity_step() {
        let mut state = GameState::default();
        let first = state.active.kind();
        state.handle_input(InputEvent::KeyDown(Key::Space));
        assert_eq!(state.settle_counter, state.level);

        state.tick(1100);
        assert_eq!(state.score, SPAWN_BONUS);
        assert_eq!(state.settle_counter, 0);
        // The dropped piece stays on the floor.
        assert!((0..BOARD_WIDTH as i8).any(|x| state.board.get(x, 21) == Some(Cell::Occupied(first))));
    }

    #[test]
    fn test_settle_is_confirmed_in_the_gravity_tick() {
        let mut state = GameState::default();
        state.active.hard_drop(&mut state.board);
        let landed = state.active.cells();

        state.tick(1100);
        assert_eq!(state.settle_counter, 1);
        state.tick(2200);

        // No later frame sees the landed piece as active.
        assert_eq!(state.score, SPAWN_BONUS);
        assert!(state.active.cells().iter().all(|&(_, y)| y < 10));

        state.handle_input(InputEvent::KeyDown(Key::RotateCw));
        for (x, y) in landed {
            assert!(state.board.is_occupied(x, y));
        }
    }

    #[test]
    fn test_lock_delay_allows_sliding_after_touchdown() {
        let mut state = GameState::default();
        state.active.hard_drop(&mut state.board);

        // Level 1: the piece settles on the second blocked gravity step.
        state.tick(1100);
        assert_eq!(state.settle_counter, 1);
        assert_eq!(state.score, 0);

        state.handle_input(InputEvent::KeyDown(Key::Right));
        let x0 = state.active.pivot().0;
        state.tick(1200);
        assert_eq!(state.active.pivot().0, x0 + 1);

        state.tick(2200);
        assert_eq!(state.score, SPAWN_BONUS);
    }

    #[test]
    fn test_quit_event_sets_flag() {
        let mut state = GameState::default();
        state.handle_input(InputEvent::Quit);
        assert!(state.should_quit());
    }

    #[test]
    fn test_level_progression_speeds_up_gravity() {
        let mut state = GameState::new(GameConfig::default().with_lines_per_level(1));
        state.board.reset();
        fill_row(&mut state.board, 21);
        let slow = state.gravity_interval_ms();

        state.settle();

        assert_eq!(state.level, 2);
        assert!(state.gravity_interval_ms() < slow);
    }

    #[test]
    fn test_fixed_level_when_progression_disabled() {
        let mut state = GameState::new(GameConfig::default().with_lines_per_level(0));
        state.board.reset();
        fill_row(&mut state.board, 20);
        fill_row(&mut state.board, 21);

        state.settle();

        assert_eq!(state.lines, 2);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 100 * 2 + SPAWN_BONUS);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::default();
        state.score = 77;
        let snap = state.snapshot();
        assert_eq!(snap.score, 77);
        assert_eq!(snap.next, state.next);
        assert_eq!(snap.active_cells, state.active.cells());
        for (x, y) in snap.active_cells {
            assert_eq!(snap.cell(x, y), Some(Cell::Occupied(snap.active_kind)));
        }
    }
}
