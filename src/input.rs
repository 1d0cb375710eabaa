//! Input aggregation
//!
//! Several physical sources (keyboard keys, on-screen buttons, touches) can
//! hold the same direction at once. Each source is tracked on its own and the
//! movement intent is the OR of everything currently held, so letting go of
//! one key does not cancel a button that is still pressed.
//!
//! Commands (pause, start, restart, menu) are edge-triggered: they latch on
//! the press and are handed to exactly one tick by [`InputAggregator::take_snapshot`].
//! Holding a key, including OS key repeat, never re-fires them.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Paddle movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

/// A physical source that can hold a direction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    /// Keyboard key, by `KeyboardEvent.code`
    Key(String),
    /// On-screen button held by a mouse, pen or touch contact, by pointer id
    Pointer(i32),
}

/// One-shot commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Pause,
    Start,
    Restart,
    Menu,
}

/// What a key is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Move(Direction),
    Command(Command),
}

/// Default key bindings (by `KeyboardEvent.code`)
pub fn default_binding(code: &str) -> Option<Binding> {
    match code {
        "ArrowLeft" | "KeyA" => Some(Binding::Move(Direction::Left)),
        "ArrowRight" | "KeyD" => Some(Binding::Move(Direction::Right)),
        "Space" | "KeyP" => Some(Binding::Command(Command::Pause)),
        "Enter" => Some(Binding::Command(Command::Start)),
        "KeyR" => Some(Binding::Command(Command::Restart)),
        "Escape" => Some(Binding::Command(Command::Menu)),
        _ => None,
    }
}

/// Merges physical input sources into per-tick intents
#[derive(Debug, Default)]
pub struct InputAggregator {
    held: HashSet<(Direction, Source)>,
    keys_down: HashSet<String>,
    pause: bool,
    start: bool,
    restart: bool,
    menu: bool,
    /// Demo mode flag passed through to every tick
    pub autopilot: bool,
}

impl InputAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A key went down. Repeats while already held are ignored.
    ///
    /// Returns true if the key is bound (callers may suppress the browser default).
    pub fn key_down(&mut self, code: &str) -> bool {
        let Some(binding) = default_binding(code) else {
            return false;
        };
        if !self.keys_down.insert(code.to_string()) {
            return true;
        }
        match binding {
            Binding::Move(direction) => self.press(direction, Source::Key(code.to_string())),
            Binding::Command(command) => self.command(command),
        }
        true
    }

    /// A key came up
    pub fn key_up(&mut self, code: &str) {
        self.keys_down.remove(code);
        if let Some(Binding::Move(direction)) = default_binding(code) {
            self.release(direction, Source::Key(code.to_string()));
        }
    }

    /// Start holding a direction from a source
    pub fn press(&mut self, direction: Direction, source: Source) {
        self.held.insert((direction, source));
    }

    /// Stop holding a direction from a source
    pub fn release(&mut self, direction: Direction, source: Source) {
        self.held.remove(&(direction, source));
    }

    /// Drop every held source (focus lost, pointer cancelled...)
    pub fn release_all(&mut self) {
        self.held.clear();
        self.keys_down.clear();
    }

    /// Latch a one-shot command for the next tick
    pub fn command(&mut self, command: Command) {
        match command {
            Command::Pause => self.pause = true,
            Command::Start => self.start = true,
            Command::Restart => self.restart = true,
            Command::Menu => self.menu = true,
        }
    }

    /// Whether any source holds the direction
    pub fn is_held(&self, direction: Direction) -> bool {
        self.held.iter().any(|(d, _)| *d == direction)
    }

    /// Current intents without consuming latched commands
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            move_left: self.is_held(Direction::Left),
            move_right: self.is_held(Direction::Right),
            pause: self.pause,
            start: self.start,
            restart: self.restart,
            quit_to_menu: self.menu,
            autopilot: self.autopilot,
        }
    }

    /// Current intents; latched commands are cleared so they fire once
    pub fn take_snapshot(&mut self) -> TickInput {
        let input = self.snapshot();
        self.pause = false;
        self.start = false;
        self.restart = false;
        self.menu = false;
        input
    }
}
