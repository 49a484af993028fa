//! Session color assignment.
//!
//! Rows belonging to the same user session share a color in any renderer.
//! Assignment is a round-robin over a fixed palette size, deterministic for
//! the lifetime of one dataset: the first distinct session id seen gets
//! color 0, the next gets 1, and so on, wrapping at the palette size.

use std::collections::HashMap;

pub const PALETTE_SIZE: usize = 8;

/// Round-robin session color assigner. Reset whenever a dataset is replaced
/// rather than merged, so colors stay stable within one dataset lifetime.
#[derive(Debug, Default)]
pub struct ColorAssigner {
    assigned: HashMap<String, usize>,
    next: usize,
}

impl ColorAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color index for a session id, assigning the next palette slot on
    /// first sight.
    pub fn assign(&mut self, session_id: &str) -> usize {
        if let Some(&color) = self.assigned.get(session_id) {
            return color;
        }
        let color = self.next % PALETTE_SIZE;
        self.assigned.insert(session_id.to_string(), color);
        self.next += 1;
        color
    }

    pub fn reset(&mut self) {
        self.assigned.clear();
        self.next = 0;
    }
}
