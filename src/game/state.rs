//! Game and Timed State
//!
//! Overall game status plus the per-player timed effects (jumping, ...)
//! tracked as remaining-tick counters.

use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

// =============================================================================
// GAME STATE
// =============================================================================

/// Overall game status reported by every update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Still playing
    Ongoing,
    /// Host asked to quit (never produced by the simulation itself)
    Exited,
    /// Lives exhausted
    GameOver,
    /// Levels exhausted
    GameWin,
}

impl GameState {
    /// True for states after which the simulation no longer advances.
    #[inline]
    pub fn is_finished(self) -> bool {
        !matches!(self, GameState::Ongoing)
    }

    /// End-screen banner for finished games.
    pub fn banner(self) -> Option<&'static str> {
        match self {
            GameState::GameOver => Some("GAME OVER"),
            GameState::GameWin => Some("YOU WON!"),
            GameState::Ongoing | GameState::Exited => None,
        }
    }
}

// =============================================================================
// TIMED STATES
// =============================================================================

/// Effects that last a fixed number of ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TimedState {
    /// Ascending after a jump
    Jumping = 0,
    /// Reserved; the frame loop has no handler for it
    Attacking = 1,
}

/// Active timed states and their remaining ticks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedStates {
    remaining: BTreeMap<TimedState, u32>,
}

impl TimedStates {
    /// No active states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or refresh) a state for `ticks` ticks.
    pub fn insert(&mut self, state: TimedState, ticks: u32) {
        self.remaining.insert(state, ticks);
    }

    /// Check whether a state is active.
    #[inline]
    pub fn contains(&self, state: TimedState) -> bool {
        self.remaining.contains_key(&state)
    }

    /// Remaining ticks of a state.
    pub fn remaining(&self, state: TimedState) -> Option<u32> {
        self.remaining.get(&state).copied()
    }

    /// Active states in key order.
    pub fn active(&self) -> impl Iterator<Item = (TimedState, u32)> + '_ {
        self.remaining.iter().map(|(s, t)| (*s, *t))
    }

    /// True when nothing is active.
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Count down every state by one tick.
    ///
    /// A state is removed when its counter was already zero before this
    /// decrement, so a state registered for `n` ticks is active for `n + 1`
    /// ticks. Returns the states removed.
    pub fn advance(&mut self) -> Vec<TimedState> {
        let mut finished = Vec::new();
        for (state, ticks) in self.remaining.iter_mut() {
            if *ticks == 0 {
                finished.push(*state);
            } else {
                *ticks -= 1;
            }
        }
        for state in &finished {
            self.remaining.remove(state);
        }
        finished
    }
}
