//! Held-key tracking for terminal environments.
//!
//! Most terminals only report key presses (plus auto-repeat presses), never
//! releases. The game needs explicit `KeyUp` events to stop lateral repeat, so
//! until a real release event has been seen, a held direction key is released
//! once it has been quiet for a while:
//!
//! - before the terminal's auto-repeat kicks in, after
//!   [`TAP_RELEASE_TIMEOUT_MS`], so a tap ends before the game's first lateral
//!   repeat and moves the piece once;
//! - once auto-repeat presses arrive, after [`KEY_RELEASE_TIMEOUT_MS`], which
//!   bridges the gaps between them.

use crossterm::event::{KeyEvent, KeyEventKind};

use arrayvec::ArrayVec;

use crate::map::{map_key, should_quit};
use crate::types::{InputEvent, Key, KEY_RELEASE_TIMEOUT_MS, TAP_RELEASE_TIMEOUT_MS};

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    key: Key,
    last_seen_ms: u64,
    /// An auto-repeat press has arrived for this hold
    repeating: bool,
}

/// Turns terminal key events into game input events.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: ArrayVec<HeldKey, 3>,
    release_events_seen: bool,
    tap_release_timeout_ms: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            held: ArrayVec::new(),
            release_events_seen: false,
            tap_release_timeout_ms: TAP_RELEASE_TIMEOUT_MS,
            key_release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_tap_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.tap_release_timeout_ms = timeout_ms;
        self
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Whether the terminal has proven it reports key releases
    pub fn release_events_seen(&self) -> bool {
        self.release_events_seen
    }

    pub fn handle_key_event(&mut self, key: KeyEvent, now_ms: u64) -> Option<InputEvent> {
        if key.kind == KeyEventKind::Press && should_quit(key) {
            return Some(InputEvent::Quit);
        }

        let game_key = map_key(key.code)?;
        match key.kind {
            KeyEventKind::Press => self.press(game_key, now_ms),
            KeyEventKind::Repeat => {
                self.refresh(game_key, now_ms);
                None
            }
            KeyEventKind::Release => {
                self.release_events_seen = true;
                self.release(game_key)
            }
        }
    }

    fn press(&mut self, key: Key, now_ms: u64) -> Option<InputEvent> {
        if key.direction().is_none() {
            return Some(InputEvent::KeyDown(key));
        }
        // Terminal auto-repeat arrives as plain presses.
        if self.refresh(key, now_ms) {
            return None;
        }
        let _ = self.held.try_push(HeldKey {
            key,
            last_seen_ms: now_ms,
            repeating: false,
        });
        Some(InputEvent::KeyDown(key))
    }

    fn refresh(&mut self, key: Key, now_ms: u64) -> bool {
        match self.held.iter_mut().find(|held| held.key == key) {
            Some(held) => {
                held.last_seen_ms = now_ms;
                held.repeating = true;
                true
            }
            None => false,
        }
    }

    fn release(&mut self, key: Key) -> Option<InputEvent> {
        let before = self.held.len();
        self.held.retain(|held| held.key != key);
        (self.held.len() != before).then_some(InputEvent::KeyUp(key))
    }

    /// Synthetic releases for keys that went quiet.
    pub fn update(&mut self, now_ms: u64) -> ArrayVec<InputEvent, 3> {
        let mut events = ArrayVec::<InputEvent, 3>::new();
        if self.release_events_seen {
            return events;
        }

        let (tap, hold) = (
            self.tap_release_timeout_ms as u64,
            self.key_release_timeout_ms as u64,
        );
        self.held.retain(|held| {
            let timeout = if held.repeating { hold } else { tap };
            if now_ms.saturating_sub(held.last_seen_ms) > timeout {
                let _ = events.try_push(InputEvent::KeyUp(held.key));
                false
            } else {
                true
            }
        });
        events
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
