//! Input commands buffered between frames
//!
//! Pointer and button events arrive whenever the host delivers them. They are
//! queued here and applied in order at the start of the next frame step, so
//! the flare list is never touched while a frame is iterating it.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Pointer moved (drives the crosshair)
    PointerMove(Vec2),
    /// Click at a position: destroys every flare under it
    Click(Vec2),
    /// Shield button pressed
    ToggleShield,
}

#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    /// Take everything queued so far, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = Command> + '_ {
        self.pending.drain(..)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl Extend<Command> for CommandQueue {
    fn extend<T: IntoIterator<Item = Command>>(&mut self, iter: T) {
        self.pending.extend(iter);
    }
}
