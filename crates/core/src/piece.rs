//! Stone module - a single animated piece
//!
//! A stone knows its screen position, its spin and at most one fall and one
//! swap motion. It holds no reference to the grids; the board decides which
//! stones are visible and when their motion is advanced.
//!
//! Every motion step moves by at most `speed` toward its target and snaps onto
//! the target once within reach, or once a step no longer changes the
//! position (far from the origin `speed` can fall below f32 resolution), so
//! motions always finish.

use crate::types::StoneKind;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Falling {
    pub speed: f32,
    pub target_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swapping {
    pub target_x: f32,
    pub target_y: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stone {
    x: f32,
    y: f32,
    z: f32,
    angle: f32,
    rotating_speed: f32,
    falling: Option<Falling>,
    swapping: Option<Swapping>,
    kind: StoneKind,
}

impl Stone {
    pub fn new(x: f32, y: f32, z: f32, kind: StoneKind) -> Self {
        Self {
            x,
            y,
            z,
            angle: 0.0,
            rotating_speed: 0.0,
            falling: None,
            swapping: None,
            kind,
        }
    }

    /// The table slot 0 filler.
    pub(crate) fn placeholder() -> Self {
        Self::new(0.0, 0.0, 0.0, 0)
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    /// Spin angle in degrees, kept in `[0, 360)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn kind(&self) -> StoneKind {
        self.kind
    }

    pub fn rotating_speed(&self) -> f32 {
        self.rotating_speed
    }

    pub fn falling(&self) -> Option<Falling> {
        self.falling
    }

    pub fn swapping(&self) -> Option<Swapping> {
        self.swapping
    }

    pub fn is_falling(&self) -> bool {
        self.falling.is_some()
    }

    pub fn is_swapping(&self) -> bool {
        self.swapping.is_some()
    }

    pub fn set_rotating_speed(&mut self, speed: f32) {
        self.rotating_speed = speed;
    }

    /// Start (or retarget) a vertical fall.
    pub fn set_falling(&mut self, speed: f32, target_y: f32) {
        self.falling = Some(Falling { speed, target_y });
    }

    pub fn set_swapping(&mut self, target_x: f32, target_y: f32, speed: f32) {
        self.swapping = Some(Swapping {
            target_x,
            target_y,
            speed,
        });
    }

    pub fn update_rotating(&mut self) {
        self.angle = (self.angle + self.rotating_speed).rem_euclid(360.0);
    }

    pub fn update_falling(&mut self) {
        let Some(fall) = self.falling else {
            return;
        };
        let delta = fall.target_y - self.y;
        let next = self.y + fall.speed.abs() * delta.signum();
        if delta.abs() <= fall.speed.abs() || next == self.y {
            self.y = fall.target_y;
            self.falling = None;
        } else {
            self.y = next;
        }
    }

    pub fn update_swapping(&mut self) {
        let Some(swap) = self.swapping else {
            return;
        };
        let dx = swap.target_x - self.x;
        let dy = swap.target_y - self.y;
        let dist = (dx * dx + dy * dy).sqrt();
        let step = swap.speed.abs() / dist;
        let (next_x, next_y) = (self.x + dx * step, self.y + dy * step);
        if dist <= swap.speed.abs() || (next_x == self.x && next_y == self.y) {
            self.x = swap.target_x;
            self.y = swap.target_y;
            self.swapping = None;
        } else {
            self.x = next_x;
            self.y = next_y;
        }
    }

    /// Place the stone at a resting position, dropping any motion.
    pub(crate) fn settle_at(&mut self, x: f32, y: f32) {
        self.falling = None;
        self.swapping = None;
        self.x = x;
        self.y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps_in_both_directions() {
        let mut s = Stone::new(0.0, 0.0, 0.0, 1);
        s.set_rotating_speed(100.0);
        for _ in 0..4 {
            s.update_rotating();
        }
        assert_eq!(s.angle(), 40.0);

        s.set_rotating_speed(-50.0);
        s.update_rotating();
        assert_eq!(s.angle(), 350.0);
    }

    #[test]
    fn falling_converges_and_snaps() {
        let mut s = Stone::new(0.0, 100.0, 0.0, 1);
        s.set_falling(30.0, 0.0);
        s.update_falling();
        assert_eq!(s.y(), 70.0);
        s.update_falling();
        s.update_falling();
        assert_eq!(s.y(), 10.0);
        assert!(s.is_falling());
        s.update_falling();
        assert_eq!(s.y(), 0.0);
        assert!(!s.is_falling());
    }

    #[test]
    fn falling_upwards_also_converges() {
        let mut s = Stone::new(0.0, -10.0, 0.0, 1);
        s.set_falling(4.0, 0.0);
        for _ in 0..3 {
            s.update_falling();
        }
        assert_eq!(s.y(), 0.0);
        assert!(!s.is_falling());
    }

    #[test]
    fn swapping_moves_along_the_line() {
        let mut s = Stone::new(0.0, 0.0, 0.0, 1);
        s.set_swapping(8.0, 0.0, 4.0);
        s.update_swapping();
        assert_eq!((s.x(), s.y()), (4.0, 0.0));
        s.update_swapping();
        assert_eq!((s.x(), s.y()), (8.0, 0.0));
        assert!(!s.is_swapping());
    }

    #[test]
    fn swap_to_own_position_finishes_immediately() {
        let mut s = Stone::new(3.0, 3.0, 0.0, 1);
        s.set_swapping(3.0, 3.0, 4.0);
        s.update_swapping();
        assert!(!s.is_swapping());
    }

    #[test]
    fn falling_from_beyond_f32_resolution_snaps() {
        let mut s = Stone::new(0.0, 1.0e9, 0.0, 1);
        s.set_falling(4.0, 0.0);
        s.update_falling();
        assert_eq!(s.y(), 0.0);
        assert!(!s.is_falling());
    }

    #[test]
    fn swapping_from_beyond_f32_resolution_snaps() {
        let mut s = Stone::new(1.0e9, 0.0, 0.0, 1);
        s.set_swapping(0.0, 0.0, 4.0);
        s.update_swapping();
        assert_eq!((s.x(), s.y()), (0.0, 0.0));
        assert!(!s.is_swapping());
    }
}
