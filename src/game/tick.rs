//! Frame Loop
//!
//! One `update` call per frame, in strict order:
//!
//! 1. recompute the player's contact sides
//! 2. dispatch commands for pressed keys (gated by contacts)
//! 3. apply timed states (jump ascent) and count them down
//! 4. gravity, unless jumping or standing on something
//! 5. death check (fell below the screen)
//! 6. level-complete check (reached the right edge)
//!
//! Movement always proceeds by a fixed step and is only stopped by the next
//! frame's contact check, so a body can sink into geometry for a frame.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::GameConfig;
use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::rect::BoundingBox;
use crate::game::collision::{CollisionSet, CollisionSide, GapDistances};
use crate::game::events::{GameEvent, GameEventData};
use crate::game::input::{Bindings, Command, InputFrame, InputRecording};
use crate::game::level::{Level, LevelCatalog, LevelError, LevelSpec};
use crate::game::player::Player;
use crate::game::render::RenderSink;
use crate::game::state::{GameState, TimedState, TimedStates};

/// Fatal simulation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A timed state with no handler in the apply step.
    #[error("timed state {0:?} is not supported")]
    UnsupportedTimedState(TimedState),

    /// A level spec in the catalog could not be built.
    #[error("failed to build level {level}: {source}")]
    LevelLoad {
        /// Index of the level that failed
        level: u32,
        /// Validation failure
        #[source]
        source: LevelError,
    },

    /// The catalog has no first level.
    #[error("level catalog has no level 1")]
    NoLevels,

    /// The configuration failed validation.
    #[error("{0}")]
    InvalidConfig(String),
}

/// Serializable summary of one frame, for hosts and logs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FrameSnapshot {
    /// Frames simulated so far
    pub tick: u32,
    /// Level being played
    pub level: u32,
    /// Lives left
    pub lives: u32,
    /// Player box
    pub player: BoundingBox,
    /// Sprite orientation
    pub facing_right: bool,
    /// Contact sides from the last update
    pub contacts: Vec<CollisionSide>,
    /// Gap distances at the current position
    pub gaps: GapDistances,
    /// Game status
    pub state: GameState,
}

/// Complete game: level progression, player, lives and timed states.
pub struct Game {
    config: GameConfig,
    catalog: LevelCatalog,
    bindings: Bindings,
    level: Level,
    current_level: u32,
    player: Player,
    contacts: CollisionSet,
    timed: TimedStates,
    lives: u32,
    tick: u32,
    state: GameState,
    events: Vec<GameEvent>,
}

impl Game {
    /// Start a game on level 1 with the default bindings.
    pub fn new(config: GameConfig, catalog: LevelCatalog) -> Result<Self, GameError> {
        config
            .validate()
            .map_err(|err| GameError::InvalidConfig(err.to_string()))?;
        let spec = catalog.get(1).ok_or(GameError::NoLevels)?;
        let level = build_level(1, spec, &config)?;
        let player = Player::new(0, config.spawn_y(level.height()), &config);

        info!(
            "New game: {} levels, {} lives, spawn at {:?}",
            catalog.len(),
            config.starting_lives,
            player.spawn()
        );

        Ok(Self {
            lives: config.starting_lives,
            config,
            catalog,
            bindings: Bindings::default(),
            level,
            current_level: 1,
            player,
            contacts: [CollisionSide::Bottom].into_iter().collect(),
            timed: TimedStates::new(),
            tick: 0,
            state: GameState::Ongoing,
            events: Vec::new(),
        })
    }

    /// Run one frame.
    ///
    /// Finished games return their final state without simulating.
    pub fn update(&mut self, input: &InputFrame) -> Result<GameState, GameError> {
        if self.state.is_finished() {
            return Ok(self.state);
        }

        self.tick += 1;

        // 1. Contacts against the current geometry
        self.contacts = self.level.compute_collisions(&self.player);

        #[cfg(feature = "debug-tracing")]
        tracing::trace!(
            tick = self.tick,
            position = ?self.player.position(),
            contacts = ?self.contacts,
            "frame start"
        );

        // 2. Input commands
        let commands: Vec<Command> = self.bindings.commands(input).collect();
        for command in commands {
            self.dispatch(command);
        }

        // 3. Timed states
        self.apply_timed_states()?;

        // 4. Gravity
        if !self.timed.contains(TimedState::Jumping)
            && !self.contacts.contains(CollisionSide::Bottom)
        {
            self.player.go_down();
        }

        // 5. Fell below the screen
        if self.player.position().1 > self.config.screen_height {
            self.player.reset_position();
            self.lives = self.lives.saturating_sub(1);
            self.push_event(GameEventData::LifeLost { lives_left: self.lives });
            info!("Life lost at tick {}: {} left", self.tick, self.lives);

            if self.lives == 0 {
                return Ok(self.finish(GameState::GameOver, GameEventData::GameOver));
            }
        }

        // 6. Reached the right edge
        if self.player.position().0 >= self.config.finish_x() {
            if self.advance_level()? {
                self.player.reset_position();
            } else {
                let levels_completed = self.current_level;
                return Ok(self.finish(
                    GameState::GameWin,
                    GameEventData::GameWon { levels_completed },
                ));
            }
        }

        Ok(GameState::Ongoing)
    }

    fn dispatch(&mut self, command: Command) {
        match command {
            Command::Jump => {
                if !self.timed.contains(TimedState::Jumping)
                    && self.contacts.contains(CollisionSide::Bottom)
                {
                    self.timed.insert(TimedState::Jumping, self.config.jump_duration);
                    self.push_event(GameEventData::JumpStarted);
                }
            }
            Command::MoveLeft => {
                if !self.contacts.contains(CollisionSide::Left) {
                    self.player.go_left();
                }
            }
            Command::MoveRight => {
                if !self.contacts.contains(CollisionSide::Right) {
                    self.player.go_right();
                }
            }
        }
    }

    fn apply_timed_states(&mut self) -> Result<(), GameError> {
        if let Some((unsupported, _)) = self
            .timed
            .active()
            .find(|(state, _)| *state != TimedState::Jumping)
        {
            return Err(GameError::UnsupportedTimedState(unsupported));
        }

        if self.timed.contains(TimedState::Jumping) {
            self.player.go_up();
        }

        for finished in self.timed.advance() {
            if finished == TimedState::Jumping {
                self.push_event(GameEventData::JumpFinished);
            }
        }

        Ok(())
    }

    /// Build the next level. Returns `false` when there is none.
    fn advance_level(&mut self) -> Result<bool, GameError> {
        let next = self.current_level + 1;
        let Some(spec) = self.catalog.get(next) else {
            return Ok(false);
        };

        self.level = build_level(next, spec, &self.config)?;
        self.current_level = next;
        self.push_event(GameEventData::LevelAdvanced { level: next });
        info!("Advanced to level {} at tick {}", next, self.tick);
        Ok(true)
    }

    fn finish(&mut self, state: GameState, data: GameEventData) -> GameState {
        self.state = state;
        self.push_event(data);
        info!("Game finished at tick {}: {:?}", self.tick, state);
        state
    }

    fn push_event(&mut self, data: GameEventData) {
        self.events.push(GameEvent::new(self.tick, data));
    }

    /// Quit signal from the host.
    pub fn exit(&mut self) {
        debug!("Exit requested at tick {}", self.tick);
        self.state = GameState::Exited;
    }

    /// Register a timed state directly.
    pub fn push_timed_state(&mut self, state: TimedState, ticks: u32) {
        self.timed.insert(state, ticks);
    }

    /// Drain events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current status.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Frames simulated so far.
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Lives left.
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Index of the level being played.
    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    /// Level being played.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player, for hosts that place it directly.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Contact sides computed by the last update.
    pub fn contacts(&self) -> CollisionSet {
        self.contacts
    }

    /// Active timed states.
    pub fn timed_states(&self) -> &TimedStates {
        &self.timed
    }

    /// Key bindings.
    pub fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }

    /// Configuration in use.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Summary of the current frame.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            tick: self.tick,
            level: self.current_level,
            lives: self.lives,
            player: self.player.bounds(),
            facing_right: self.player.is_facing_right(),
            contacts: self.contacts.iter().collect(),
            gaps: self.level.gap_distances(&self.player),
            state: self.state,
        }
    }

    /// Issue this frame's draw calls.
    pub fn render<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        self.level.draw(sink);
        sink.draw_player(&self.player.bounds(), self.player.is_facing_right());
        sink.draw_lives(self.lives);
    }

    /// Hash of everything that affects future frames.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, |hasher| {
            hasher.update_u32(self.current_level);
            hasher.update_u32(self.lives);
            hasher.update_rect(&self.player.bounds());
            hasher.update_bool(self.player.is_facing_right());
            hasher.update_u8(self.contacts.bits());
            for (state, ticks) in self.timed.active() {
                hasher.update_u8(state as u8);
                hasher.update_u32(ticks);
            }
            hasher.update_u8(self.state as u8);
        })
    }
}

fn build_level(index: u32, spec: &LevelSpec, config: &GameConfig) -> Result<Level, GameError> {
    Level::new(spec, config).map_err(|source| {
        error!("Could not create level {}: {}", index, source);
        GameError::LevelLoad { level: index, source }
    })
}

/// Re-run a recorded session from a fresh game.
///
/// Stops early once the game finishes. Events stay queued on the returned game.
pub fn replay_session(
    config: GameConfig,
    catalog: LevelCatalog,
    recording: &InputRecording,
) -> Result<Game, GameError> {
    let mut game = Game::new(config, catalog)?;
    for (_, frame) in recording.replay_iter() {
        if game.update(&frame)?.is_finished() {
            break;
        }
    }
    Ok(game)
}
