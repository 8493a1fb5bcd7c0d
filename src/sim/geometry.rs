//! Pitch geometry derived from the host container size
//!
//! Screen-style coordinates: origin top-left, x to the right, y down.
//! The player defends the left goal, the opponent the right one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp_span;
use crate::consts::*;

/// Immutable snapshot of the playable area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchGeometry {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub goal_mouth: f32,
    pub goal_depth: f32,
    pub goal_top: f32,
    pub goal_bottom: f32,
}

impl Default for PitchGeometry {
    fn default() -> Self {
        Self::new(800.0, 450.0)
    }
}

impl PitchGeometry {
    /// Build geometry for a container; degenerate sizes clamp to 1
    pub fn new(width: f32, height: f32) -> Self {
        let width = sanitize_dimension(width);
        let height = sanitize_dimension(height);

        let goal_mouth = (height * GOAL_MOUTH_RATIO)
            .clamp(GOAL_MOUTH_MIN, GOAL_MOUTH_MAX)
            .round();
        let goal_top = (height - goal_mouth) / 2.0;

        Self {
            width,
            height,
            padding: PITCH_PADDING,
            goal_mouth,
            goal_depth: GOAL_DEPTH,
            goal_top,
            goal_bottom: goal_top + goal_mouth,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    #[inline]
    pub fn midline(&self) -> f32 {
        self.width * 0.5
    }

    /// Horizontal range for the player head centre
    pub fn player_x_range(&self, radius: f32) -> (f32, f32) {
        (self.padding + radius, self.midline() - radius)
    }

    /// Horizontal range for the opponent head centre
    pub fn opponent_x_range(&self, radius: f32) -> (f32, f32) {
        (self.midline() + radius, self.width - self.padding - radius)
    }

    /// Vertical range shared by any circle of `radius`
    pub fn y_range(&self, radius: f32) -> (f32, f32) {
        (self.padding + radius, self.height - self.padding - radius)
    }

    /// Horizontal range for a ball of `radius`
    pub fn ball_x_range(&self, radius: f32) -> (f32, f32) {
        (self.padding + radius, self.width - self.padding - radius)
    }

    pub fn clamp_player(&self, pos: Vec2, radius: f32) -> Vec2 {
        let (x_lo, x_hi) = self.player_x_range(radius);
        let (y_lo, y_hi) = self.y_range(radius);
        Vec2::new(clamp_span(pos.x, x_lo, x_hi), clamp_span(pos.y, y_lo, y_hi))
    }

    pub fn clamp_opponent(&self, pos: Vec2, radius: f32) -> Vec2 {
        let (x_lo, x_hi) = self.opponent_x_range(radius);
        let (y_lo, y_hi) = self.y_range(radius);
        Vec2::new(clamp_span(pos.x, x_lo, x_hi), clamp_span(pos.y, y_lo, y_hi))
    }

    pub fn clamp_ball(&self, pos: Vec2, radius: f32) -> Vec2 {
        let (x_lo, x_hi) = self.ball_x_range(radius);
        let (y_lo, y_hi) = self.y_range(radius);
        Vec2::new(clamp_span(pos.x, x_lo, x_hi), clamp_span(pos.y, y_lo, y_hi))
    }

    /// Goal plane in front of the player's (left) goal
    #[inline]
    pub fn left_goal_plane(&self) -> f32 {
        self.padding + self.goal_depth
    }

    /// Goal plane in front of the opponent's (right) goal
    #[inline]
    pub fn right_goal_plane(&self) -> f32 {
        self.width - self.padding - self.goal_depth
    }

    #[inline]
    pub fn goal_center_y(&self) -> f32 {
        (self.goal_top + self.goal_bottom) * 0.5
    }

    /// Strictly inside the goal mouth's vertical extent
    #[inline]
    pub fn in_goal_mouth(&self, y: f32) -> bool {
        y > self.goal_top && y < self.goal_bottom
    }

    /// Centre of the goal mouth the player defends
    pub fn player_goal(&self) -> Vec2 {
        Vec2::new(self.left_goal_plane(), self.goal_center_y())
    }

    /// Centre of the goal mouth the opponent defends
    pub fn opponent_goal(&self) -> Vec2 {
        Vec2::new(self.right_goal_plane(), self.goal_center_y())
    }
}

fn sanitize_dimension(value: f32) -> f32 {
    if value.is_finite() { value.max(1.0) } else { 1.0 }
}
