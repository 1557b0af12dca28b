//! Plain-data copy of a board for observers, tests and dumps.

use crate::animation::AnimationEntry;
use crate::piece::{Falling, Stone, Swapping};
use crate::types::{StoneId, StoneKind};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoneSnapshot {
    pub id: u32,
    pub kind: StoneKind,
    pub position: [f32; 3],
    pub angle: f32,
    pub rotating_speed: f32,
    pub falling: Option<Falling>,
    pub swapping: Option<Swapping>,
}

impl StoneSnapshot {
    pub fn new(id: StoneId, stone: &Stone) -> Self {
        Self {
            id: id.raw(),
            kind: stone.kind(),
            position: [stone.x(), stone.y(), stone.z()],
            angle: stone.angle(),
            rotating_speed: stone.rotating_speed(),
            falling: stone.falling(),
            swapping: stone.swapping(),
        }
    }
}

/// Both grids are row-major (`y * nx + x`) raw handles, 0 for empty.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSnapshot {
    pub nx: usize,
    pub ny: usize,
    pub committed: Vec<u32>,
    pub presented: Vec<u32>,
    pub animations: Vec<AnimationEntry>,
    pub swap_in_progress: bool,
    pub stones: Vec<StoneSnapshot>,
}

impl BoardSnapshot {
    pub fn committed_at(&self, x: usize, y: usize) -> u32 {
        self.committed[y * self.nx + x]
    }

    pub fn presented_at(&self, x: usize, y: usize) -> u32 {
        self.presented[y * self.nx + x]
    }

    pub fn is_settled(&self) -> bool {
        self.animations.is_empty()
    }

    /// Stable hash of everything a renderer can see.
    pub fn fingerprint(&self) -> u64 {
        use std::hash::Hasher;

        let mut h = Fnv1aHasher::new();
        h.write_usize(self.nx);
        h.write_usize(self.ny);
        for v in self.presented.iter().chain(self.committed.iter()) {
            h.write_u32(*v);
        }
        h.write_usize(self.animations.len());
        for stone in &self.stones {
            h.write_u32(stone.id);
            for v in stone.position {
                h.write_u32(v.to_bits());
            }
            h.write_u32(stone.angle.to_bits());
        }
        h.finish()
    }
}

/// Stable 64-bit FNV-1a hasher.
///
/// `DefaultHasher` output is not guaranteed stable across Rust versions, so
/// fingerprints use this instead.
#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl std::hash::Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}
