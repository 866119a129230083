use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::generator::generate_board_in_place;
use crate::{
    ActionKind, ActionRecorder, Board, CHORD_MINE_HIT, CellCount, Difficulty, GameConfig,
    GameResult, LeaderboardEntry, PlayHistory, Pos, SCORE_IGNORED, SCORE_MINE_HIT, SCORE_SUCCESS,
    Score, Seed, UserAction, UserActionDetail,
};

/// Valid transitions:
/// - Init -> Gaming (first reveal generates the board)
/// - Gaming -> Win | GameOver
/// - any -> Init (explicit reset)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Init,
    Gaming,
    GameOver,
    Win,
}

impl GamePhase {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::Init)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Win)
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        Self::Init
    }
}

/// One game session from first click to win or loss.
///
/// Owns its board exclusively; actions are validated against the current
/// phase, applied in place, and appended to the action log with their
/// outcome score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    difficulty: Difficulty,
    config: GameConfig,
    board: Board,
    phase: GamePhase,
    revealed_count: CellCount,
    flag_count: CellCount,
    seed: Option<Seed>,
    forced_seed: Option<Seed>,
    recorder: ActionRecorder,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl Game {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::create(difficulty, None)
    }

    /// Game that will force `seed` into board generation on the first
    /// reveal; this is what retry and replay build on.
    pub fn new_seeded(difficulty: Difficulty, seed: Seed) -> Self {
        Self::create(difficulty, Some(seed))
    }

    fn create(difficulty: Difficulty, forced_seed: Option<Seed>) -> Self {
        let config = difficulty.config();
        Self {
            difficulty,
            config,
            board: Board::empty(config),
            phase: GamePhase::Init,
            revealed_count: 0,
            flag_count: 0,
            seed: None,
            forced_seed,
            recorder: ActionRecorder::new(),
            started_at: None,
            ended_at: None,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The seed the board was generated from; `None` until the first reveal.
    pub fn seed(&self) -> Option<&Seed> {
        self.seed.as_ref()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// How many mines have not been flagged yet; negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flag_count as isize)
    }

    pub fn actions(&self) -> &[UserActionDetail] {
        self.recorder.actions()
    }

    /// How many seconds have passed since the game started, 0 if it hasn't.
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or_else(Utc::now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    pub fn result(&self) -> Option<GameResult> {
        match self.phase {
            GamePhase::Win => Some(GameResult::Win),
            GamePhase::GameOver => Some(GameResult::Loss),
            GamePhase::Init | GamePhase::Gaming => None,
        }
    }

    /// Dispatches one user action and returns its outcome score.
    pub fn apply(&mut self, action: UserAction) -> Score {
        match action.kind {
            ActionKind::Reveal => self.handle_reveal(action),
            ActionKind::Flag => self.handle_flag(action),
            ActionKind::Chord => self.handle_chord(action),
        }
    }

    fn handle_reveal(&mut self, action: UserAction) -> Score {
        let pos = action.position;
        if self.phase.is_terminal() || !self.board.contains(pos) {
            return SCORE_IGNORED;
        }
        if self.phase.is_initial() && !self.begin_game(pos) {
            return SCORE_IGNORED;
        }

        let cell = self.board[pos];
        if !cell.is_untouched() {
            self.record(action, SCORE_IGNORED);
            return SCORE_IGNORED;
        }
        if cell.is_mine {
            self.board.reveal_all_mines_in_place();
            self.record(action, SCORE_MINE_HIT);
            self.end_game(GameResult::Loss);
            return SCORE_MINE_HIT;
        }

        let revealed = self.board.reveal_cell_in_place(pos);
        self.revealed_count += revealed;
        self.record(action, SCORE_SUCCESS);
        self.check_win();
        SCORE_SUCCESS
    }

    fn handle_flag(&mut self, action: UserAction) -> Score {
        let pos = action.position;
        if !matches!(self.phase, GamePhase::Gaming) || !self.board.contains(pos) {
            return SCORE_IGNORED;
        }

        let cell = self.board[pos];
        if cell.is_revealed {
            self.record(action, SCORE_IGNORED);
            return SCORE_IGNORED;
        }

        if cell.is_flagged {
            self.flag_count -= 1;
        } else {
            self.flag_count += 1;
        }
        self.board[pos].is_flagged = !cell.is_flagged;
        self.record(action, SCORE_SUCCESS);
        SCORE_SUCCESS
    }

    fn handle_chord(&mut self, action: UserAction) -> Score {
        let pos = action.position;
        if !matches!(self.phase, GamePhase::Gaming) || !self.board.contains(pos) {
            return SCORE_IGNORED;
        }

        let cell = self.board[pos];
        if !cell.is_revealed
            || cell.adjacent_mines == 0
            || self.board.count_flagged_around(pos) != cell.adjacent_mines
        {
            self.record(action, SCORE_IGNORED);
            return SCORE_IGNORED;
        }

        match self.board.reveal_around_in_place(pos) {
            CHORD_MINE_HIT => {
                self.board.reveal_all_mines_in_place();
                self.record(action, SCORE_MINE_HIT);
                self.end_game(GameResult::Loss);
                SCORE_MINE_HIT
            }
            0 => {
                self.record(action, SCORE_IGNORED);
                SCORE_IGNORED
            }
            revealed => {
                self.revealed_count += revealed as CellCount;
                self.record(action, SCORE_SUCCESS);
                self.check_win();
                SCORE_SUCCESS
            }
        }
    }

    /// Generates the board around the first-clicked cell and enters Gaming.
    fn begin_game(&mut self, safe: Pos) -> bool {
        match generate_board_in_place(self.config, &mut self.board, safe, self.forced_seed.take())
        {
            Ok(seed) => {
                log::debug!("game started with seed {} at {:?}", seed, safe);
                self.seed = Some(seed);
                self.phase = GamePhase::Gaming;
                self.started_at = Some(Utc::now());
                true
            }
            Err(err) => {
                log::error!("board generation failed: {}", err);
                false
            }
        }
    }

    fn check_win(&mut self) {
        if matches!(self.phase, GamePhase::Gaming)
            && self.revealed_count == self.config.safe_cell_count()
        {
            self.end_game(GameResult::Win);
        }
    }

    fn end_game(&mut self, result: GameResult) {
        if self.phase.is_terminal() {
            return;
        }
        self.phase = match result {
            GameResult::Win => GamePhase::Win,
            GameResult::Loss => GamePhase::GameOver,
        };
        self.ended_at = Some(Utc::now());
        self.recorder.finalize();
        log::debug!(
            "game ended with {:?} after {} actions",
            result,
            self.recorder.len()
        );
    }

    fn record(&mut self, action: UserAction, score: Score) {
        self.recorder.record(action, score, Utc::now());
    }

    /// Returns the board to a fully-unrevealed, unflagged, mine-free
    /// placeholder with the action log and counters cleared.
    pub fn reset(&mut self) {
        self.board = Board::empty(self.config);
        self.phase = GamePhase::Init;
        self.revealed_count = 0;
        self.flag_count = 0;
        self.seed = None;
        self.recorder.clear();
        self.started_at = None;
        self.ended_at = None;
    }

    /// The finished game's history entry, `None` while the game is live.
    pub fn finish(&self) -> Option<PlayHistory> {
        let result = self.result()?;
        let seed = self.seed.clone()?;
        Some(PlayHistory {
            result,
            time: self.elapsed_secs(),
            difficulty: self.difficulty,
            seed,
            actions: self.recorder.actions().to_vec(),
            date: Utc::now(),
        })
    }

    /// Best-time entry, produced only on a win.
    pub fn leaderboard_entry(&self) -> Option<LeaderboardEntry> {
        matches!(self.phase, GamePhase::Win).then(|| LeaderboardEntry {
            time: self.elapsed_secs(),
            date: Utc::now(),
        })
    }
}
