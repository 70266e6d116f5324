//! Game Events
//!
//! Notable transitions produced by the frame loop, for hosts and replays.

use serde::{Serialize, Deserialize};

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A jump was registered this tick
    JumpStarted,

    /// The jump state expired this tick
    JumpFinished,

    /// Player fell off the screen
    LifeLost {
        lives_left: u32,
    },

    /// Right edge reached and the next level was built
    LevelAdvanced {
        level: u32,
    },

    /// Lives exhausted
    GameOver,

    /// Right edge reached on the last level
    GameWon {
        levels_completed: u32,
    },
}

/// A game event stamped with the tick it happened on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u32, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// True for events that end the game.
    pub fn is_terminal(&self) -> bool {
        matches!(self.data, GameEventData::GameOver | GameEventData::GameWon { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_events() {
        assert!(GameEvent::new(1, GameEventData::GameOver).is_terminal());
        assert!(GameEvent::new(1, GameEventData::GameWon { levels_completed: 2 }).is_terminal());
        assert!(!GameEvent::new(1, GameEventData::LifeLost { lives_left: 2 }).is_terminal());
        assert!(!GameEvent::new(1, GameEventData::JumpStarted).is_terminal());
    }

    #[test]
    fn test_event_json_shape() {
        let event = GameEvent::new(7, GameEventData::LevelAdvanced { level: 2 });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"tick":7,"data":{"LevelAdvanced":{"level":2}}}"#);
    }
}
