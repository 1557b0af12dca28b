//! Animation queue - strictly ordered visual transitions
//!
//! Board operations append entries; the per-tick update only ever services the
//! head. A run of consecutive [`AnimationEntry::FallingBatch`] entries settles
//! together, every other entry is serviced alone.

use std::collections::VecDeque;

use crate::types::StoneId;

/// Where a stone moved by `fall_to` belongs once its fall settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Landing {
    pub stone: StoneId,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationEntry {
    /// Some stones on the board are falling; wait until none is.
    FallingBatch(Option<Landing>),
    /// Exchange two stones, tracked by identity.
    Swap { a: StoneId, b: StoneId },
    /// Clear the presented cell `(x, y)` that showed `stone`.
    Destroy { x: i32, y: i32, stone: StoneId },
}

impl AnimationEntry {
    pub fn is_falling(&self) -> bool {
        matches!(self, AnimationEntry::FallingBatch(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationQueue {
    entries: VecDeque<AnimationEntry>,
}

impl AnimationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: AnimationEntry) {
        self.entries.push_back(entry);
    }

    pub fn front(&self) -> Option<&AnimationEntry> {
        self.entries.front()
    }

    pub fn pop(&mut self) -> Option<AnimationEntry> {
        self.entries.pop_front()
    }

    /// Pop every leading `FallingBatch`, handing each landing to `f` in order.
    ///
    /// Returns how many entries were removed.
    pub fn drain_falling_run(&mut self, mut f: impl FnMut(Landing)) -> usize {
        let mut popped = 0;
        while let Some(AnimationEntry::FallingBatch(landing)) = self.entries.front().copied() {
            self.entries.pop_front();
            popped += 1;
            if let Some(landing) = landing {
                f(landing);
            }
        }
        popped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimationEntry> + '_ {
        self.entries.iter()
    }
}
