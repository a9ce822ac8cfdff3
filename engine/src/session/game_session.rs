use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::config::GameConfig;
use crate::error::{ConfigError, GameError};
use crate::game::{
    Board, BotInput, Difficulty, GameState, Mark, Outcome, ScoreBoard, calculate_move,
};

use super::session_rng::SessionRng;

struct SessionCore {
    game: GameState,
    rng: SessionRng,
    thinking: bool,
    // Bumped by reset, rewind and config changes. A scheduled computer
    // move only lands if the epoch it captured is still current.
    epoch: u64,
}

/// Render-ready snapshot of the session, taken under a single lock.
#[derive(Clone, Copy, Debug)]
pub struct SessionView {
    pub board: Board,
    pub outcome: Outcome,
    pub score: ScoreBoard,
    pub thinking: bool,
    pub current_mark: Mark,
    pub current_move: usize,
    pub history_len: usize,
    pub computer_opponent: bool,
    pub computer_mark: Mark,
    pub difficulty: Difficulty,
}

/// Shell-facing game session. Human moves come in through [`apply_move`];
/// whenever it becomes the computer's turn the session marks itself as
/// thinking, waits out the configured delay on a background task and then
/// applies the computer's move.
///
/// Call [`start`] once after construction so a computer playing X makes
/// the opening move.
///
/// [`apply_move`]: GameSession::apply_move
/// [`start`]: GameSession::start
#[derive(Clone)]
pub struct GameSession {
    core: Arc<Mutex<SessionCore>>,
    think_delay: Duration,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::build(config, SessionRng::from_random())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::build(config, SessionRng::new(seed))
    }

    fn build(config: GameConfig, rng: SessionRng) -> Result<Self, ConfigError> {
        config.validate()?;
        crate::log!("session created: seed {}", rng.seed());

        Ok(Self {
            core: Arc::new(Mutex::new(SessionCore {
                game: GameState::new(&config),
                rng,
                thinking: false,
                epoch: 0,
            })),
            think_delay: Duration::from_millis(config.think_delay_ms),
        })
    }

    pub async fn start(&self) {
        self.schedule_bot_turn_if_due().await;
    }

    pub async fn apply_move(&self, index: usize) -> Result<(), GameError> {
        {
            let mut core = self.core.lock().await;
            if core.thinking {
                return Err(GameError::BotThinking);
            }
            if core.game.is_computer_turn() {
                return Err(GameError::NotYourTurn);
            }
            core.game.place_mark(index)?;
        }
        self.schedule_bot_turn_if_due().await;
        Ok(())
    }

    pub async fn jump_to(&self, ply: usize) -> Result<(), GameError> {
        {
            let mut core = self.core.lock().await;
            core.game.jump_to(ply)?;
            core.epoch += 1;
            core.thinking = false;
        }
        self.schedule_bot_turn_if_due().await;
        Ok(())
    }

    pub async fn undo(&self) -> Result<(), GameError> {
        {
            let mut core = self.core.lock().await;
            core.game.undo()?;
            core.epoch += 1;
            core.thinking = false;
        }
        self.schedule_bot_turn_if_due().await;
        Ok(())
    }

    pub async fn reset(&self) {
        {
            let mut core = self.core.lock().await;
            core.game.reset();
            core.epoch += 1;
            core.thinking = false;
        }
        self.schedule_bot_turn_if_due().await;
    }

    /// Takes effect immediately, matching how a difficulty change does not
    /// interrupt the round being played.
    pub async fn set_difficulty(&self, difficulty: Difficulty) {
        let mut core = self.core.lock().await;
        core.game.set_difficulty(difficulty);
    }

    pub async fn set_computer_opponent(&self, enabled: bool) {
        {
            let mut core = self.core.lock().await;
            core.game.reset();
            core.game.set_computer_opponent(enabled);
            core.epoch += 1;
            core.thinking = false;
        }
        self.schedule_bot_turn_if_due().await;
    }

    pub async fn set_computer_mark(&self, mark: Mark) -> Result<(), ConfigError> {
        if mark.opponent().is_none() {
            return Err(ConfigError::InvalidComputerMark);
        }
        {
            let mut core = self.core.lock().await;
            core.game.reset();
            core.game.set_computer_mark(mark);
            core.epoch += 1;
            core.thinking = false;
        }
        self.schedule_bot_turn_if_due().await;
        Ok(())
    }

    pub async fn view(&self) -> SessionView {
        let core = self.core.lock().await;
        SessionView {
            board: *core.game.board(),
            outcome: core.game.status(),
            score: core.game.score(),
            thinking: core.thinking,
            current_mark: core.game.current_mark(),
            current_move: core.game.current_move(),
            history_len: core.game.history_len(),
            computer_opponent: core.game.computer_opponent(),
            computer_mark: core.game.computer_mark(),
            difficulty: core.game.difficulty(),
        }
    }

    pub async fn outcome(&self) -> Outcome {
        self.core.lock().await.game.status()
    }

    pub async fn score(&self) -> ScoreBoard {
        self.core.lock().await.game.score()
    }

    pub async fn is_thinking(&self) -> bool {
        self.core.lock().await.thinking
    }

    pub async fn seed(&self) -> u64 {
        self.core.lock().await.rng.seed()
    }

    async fn schedule_bot_turn_if_due(&self) {
        let scheduled_epoch = {
            let mut core = self.core.lock().await;
            if core.thinking || !core.game.is_computer_turn() {
                return;
            }
            core.thinking = true;
            core.epoch
        };

        let session = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(session.think_delay).await;
            session.finish_bot_turn(scheduled_epoch).await;
        });
    }

    async fn finish_bot_turn(&self, scheduled_epoch: u64) {
        let mut guard = self.core.lock().await;
        let core = &mut *guard;

        if core.epoch != scheduled_epoch {
            // The session was reset or rewound while this move was
            // pending; drop it.
            return;
        }
        core.thinking = false;

        if !core.game.is_computer_turn() {
            return;
        }

        let input = BotInput::from_game_state(&core.game);
        let Some(index) = calculate_move(core.game.difficulty(), &input, &mut core.rng) else {
            return;
        };

        match core.game.place_mark(index) {
            Ok(()) => crate::log!("computer played cell {}", index),
            Err(err) => crate::log!("computer move rejected: {}", err),
        }
    }
}
