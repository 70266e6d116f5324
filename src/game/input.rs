//! Input Capture and Bindings
//!
//! Input is a snapshot of pressed keys, polled once per tick. Bindings map
//! keys to commands; the frame loop dispatches commands with a `match`.

use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};
use crate::core::hash::{StateHash, StateHasher};

// =============================================================================
// KEYS AND COMMANDS
// =============================================================================

/// Physical keys the game listens to.
///
/// Declaration order is the dispatch order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Key {
    /// Up arrow
    Up = 0,
    /// Left arrow
    Left = 1,
    /// Right arrow
    Right = 2,
}

impl Key {
    /// All keys in dispatch order.
    pub const ALL: [Key; 3] = [Key::Up, Key::Left, Key::Right];

    #[inline]
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Game commands a key can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Start a jump (only from the ground, not mid-jump)
    Jump,
    /// Step left unless blocked on the left
    MoveLeft,
    /// Step right unless blocked on the right
    MoveRight,
}

/// Key-to-command mapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    map: BTreeMap<Key, Command>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut map = BTreeMap::new();
        map.insert(Key::Up, Command::Jump);
        map.insert(Key::Left, Command::MoveLeft);
        map.insert(Key::Right, Command::MoveRight);
        Self { map }
    }
}

impl Bindings {
    /// No bindings at all.
    pub fn empty() -> Self {
        Self { map: BTreeMap::new() }
    }

    /// Bind a key, replacing any previous command for it.
    pub fn bind(&mut self, key: Key, command: Command) {
        self.map.insert(key, command);
    }

    /// Remove a key's binding.
    pub fn unbind(&mut self, key: Key) -> Option<Command> {
        self.map.remove(&key)
    }

    /// Command bound to a key.
    pub fn get(&self, key: Key) -> Option<Command> {
        self.map.get(&key).copied()
    }

    /// Commands for every pressed, bound key, in key order.
    pub fn commands<'a>(&'a self, frame: &'a InputFrame) -> impl Iterator<Item = Command> + 'a {
        self.map
            .iter()
            .filter(move |(key, _)| frame.is_pressed(**key))
            .map(|(_, command)| *command)
    }
}

// =============================================================================
// INPUT FRAME
// =============================================================================

/// Pressed-key snapshot for a single tick (packed bits).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputFrame {
    pressed: u8,
}

impl InputFrame {
    /// Nothing pressed.
    pub const fn new() -> Self {
        Self { pressed: 0 }
    }

    /// Snapshot with the given keys held.
    pub fn with_keys(keys: &[Key]) -> Self {
        let mut frame = Self::new();
        for key in keys {
            frame.set(*key, true);
        }
        frame
    }

    /// Check a key.
    #[inline]
    pub const fn is_pressed(&self, key: Key) -> bool {
        self.pressed & key.bit() != 0
    }

    /// Press or release a key.
    #[inline]
    pub fn set(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.pressed |= key.bit();
        } else {
            self.pressed &= !key.bit();
        }
    }

    /// True when no key is held.
    #[inline]
    pub const fn is_idle(&self) -> bool {
        self.pressed == 0
    }

    /// Raw bits.
    #[inline]
    pub const fn bits(&self) -> u8 {
        self.pressed
    }
}

// =============================================================================
// RECORDING
// =============================================================================

/// Input change at a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDelta {
    /// Tick when this input state began
    pub tick: u32,
    /// The new input state
    pub frame: InputFrame,
}

/// Delta-compressed input recording for one session.
///
/// Only ticks where the snapshot changed are stored.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InputRecording {
    /// Last recorded tick
    pub end_tick: u32,

    deltas: Vec<InputDelta>,
}

impl InputRecording {
    /// Empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record input for a tick.
    ///
    /// Ticks must be recorded in ascending order.
    pub fn record(&mut self, tick: u32, frame: InputFrame) {
        self.end_tick = tick;

        if self.deltas.last().map(|d| d.frame) != Some(frame) {
            self.deltas.push(InputDelta { tick, frame });
        }
    }

    /// Input in effect at a tick (idle before the first delta).
    pub fn get_input_at(&self, tick: u32) -> InputFrame {
        let idx = self.deltas.partition_point(|d| d.tick <= tick);
        if idx == 0 {
            InputFrame::new()
        } else {
            self.deltas[idx - 1].frame
        }
    }

    /// Stored deltas.
    pub fn deltas(&self) -> &[InputDelta] {
        &self.deltas
    }

    /// Number of stored deltas.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Iterate `(tick, frame)` for every tick from 0 to `end_tick`.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            recording: self,
            current_tick: 0,
            delta_idx: 0,
            current_frame: InputFrame::new(),
            done: self.deltas.is_empty(),
        }
    }

    /// Hash of the stored deltas.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_input_recording();
        hasher.update_u32(self.end_tick);
        for delta in &self.deltas {
            hasher.update_u32(delta.tick);
            hasher.update_u8(delta.frame.bits());
        }
        hasher.finalize()
    }
}

/// Iterator for replaying inputs tick-by-tick.
pub struct ReplayIterator<'a> {
    recording: &'a InputRecording,
    current_tick: u32,
    delta_idx: usize,
    current_frame: InputFrame,
    done: bool,
}

impl<'a> Iterator for ReplayIterator<'a> {
    type Item = (u32, InputFrame);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.current_tick > self.recording.end_tick {
            return None;
        }

        while let Some(delta) = self.recording.deltas.get(self.delta_idx) {
            if delta.tick > self.current_tick {
                break;
            }
            self.current_frame = delta.frame;
            self.delta_idx += 1;
        }

        let result = (self.current_tick, self.current_frame);
        match self.current_tick.checked_add(1) {
            Some(next) => self.current_tick = next,
            None => self.done = true,
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_keys() {
        let mut frame = InputFrame::new();
        assert!(frame.is_idle());

        frame.set(Key::Up, true);
        frame.set(Key::Right, true);
        assert!(frame.is_pressed(Key::Up));
        assert!(frame.is_pressed(Key::Right));
        assert!(!frame.is_pressed(Key::Left));

        frame.set(Key::Up, false);
        assert!(!frame.is_pressed(Key::Up));
        assert_eq!(frame, InputFrame::with_keys(&[Key::Right]));
    }

    #[test]
    fn test_default_bindings_dispatch_in_key_order() {
        let bindings = Bindings::default();
        let frame = InputFrame::with_keys(&[Key::Right, Key::Up]);
        let commands: Vec<_> = bindings.commands(&frame).collect();
        assert_eq!(commands, vec![Command::Jump, Command::MoveRight]);
    }

    #[test]
    fn test_rebinding() {
        let mut bindings = Bindings::default();
        bindings.bind(Key::Up, Command::MoveRight);
        assert_eq!(bindings.get(Key::Up), Some(Command::MoveRight));
        assert_eq!(bindings.unbind(Key::Left), Some(Command::MoveLeft));

        let frame = InputFrame::with_keys(&Key::ALL);
        let commands: Vec<_> = bindings.commands(&frame).collect();
        assert_eq!(commands, vec![Command::MoveRight, Command::MoveRight]);

        assert_eq!(Bindings::empty().commands(&frame).count(), 0);
    }

    #[test]
    fn test_recording_delta_compression() {
        let mut recording = InputRecording::new();
        let right = InputFrame::with_keys(&[Key::Right]);
        for tick in 0..10 {
            recording.record(tick, right);
        }
        assert_eq!(recording.delta_count(), 1);

        recording.record(10, InputFrame::with_keys(&[Key::Right, Key::Up]));
        recording.record(11, right);
        assert_eq!(recording.delta_count(), 3);
    }

    #[test]
    fn test_recording_lookup() {
        let mut recording = InputRecording::new();
        let left = InputFrame::with_keys(&[Key::Left]);
        let up = InputFrame::with_keys(&[Key::Up]);
        recording.record(5, left);
        recording.record(8, up);

        assert!(recording.get_input_at(0).is_idle());
        assert_eq!(recording.get_input_at(5), left);
        assert_eq!(recording.get_input_at(7), left);
        assert_eq!(recording.get_input_at(8), up);
        assert_eq!(recording.get_input_at(100), up);
    }

    #[test]
    fn test_idle_first_frame_is_still_recorded() {
        let mut recording = InputRecording::new();
        recording.record(0, InputFrame::new());
        assert_eq!(recording.delta_count(), 1);
        assert_eq!(recording.replay_iter().count(), 1);
    }

    #[test]
    fn test_recording_resumes_after_json_round_trip() {
        let mut recording = InputRecording::new();
        recording.record(0, InputFrame::with_keys(&[Key::Right]));

        let json = serde_json::to_string(&recording).unwrap();
        let mut restored: InputRecording = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.deltas(), recording.deltas());

        recording.record(1, InputFrame::new());
        restored.record(1, InputFrame::new());

        assert!(restored.get_input_at(1).is_idle());
        assert_eq!(restored.deltas(), recording.deltas());
        assert_eq!(restored.end_tick, 1);
        assert_eq!(restored.compute_hash(), recording.compute_hash());
    }

    #[test]
    fn test_replay_iterator() {
        let mut recording = InputRecording::new();
        recording.record(0, InputFrame::with_keys(&[Key::Right]));
        recording.record(1, InputFrame::with_keys(&[Key::Right]));
        recording.record(2, InputFrame::with_keys(&[Key::Up]));
        recording.record(3, InputFrame::with_keys(&[Key::Up]));

        let frames: Vec<_> = recording.replay_iter().collect();
        assert_eq!(frames.len(), 4);
        assert!(frames[1].1.is_pressed(Key::Right));
        assert!(frames[2].1.is_pressed(Key::Up));
        assert!(frames[3].1.is_pressed(Key::Up));
        assert_eq!(frames[3].0, 3);
    }

    #[test]
    fn test_empty_recording_replays_nothing() {
        assert_eq!(InputRecording::new().replay_iter().count(), 0);
    }

    #[test]
    fn test_recording_hash_tracks_content() {
        let mut a = InputRecording::new();
        let mut b = InputRecording::new();
        a.record(0, InputFrame::with_keys(&[Key::Right]));
        b.record(0, InputFrame::with_keys(&[Key::Right]));
        assert_eq!(a.compute_hash(), b.compute_hash());

        b.record(1, InputFrame::with_keys(&[Key::Left]));
        assert_ne!(a.compute_hash(), b.compute_hash());
    }
}
