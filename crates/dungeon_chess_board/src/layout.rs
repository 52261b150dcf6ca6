// SPDX-License-Identifier: MIT OR Apache-2.0
//! Mapping between board squares and world space.
//!
//! The board lies on the `y = 0` plane. Files run along +x, rank 1 is
//! nearest the viewer (+z) and rank 8 is towards the castle hall (-z).

use crate::board::{Square, BOARD_SIZE};
use serde::{Deserialize, Serialize};

/// Board placement in the scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardLayout {
    /// Edge length of one square in world units
    pub square_size: f32,
    /// World-space centre of the board (x, z)
    pub origin: [f32; 2],
    /// Height at which pieces stand
    pub piece_height: f32,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            square_size: 1.0,
            origin: [0.0, 0.0],
            piece_height: 0.0,
        }
    }
}

impl BoardLayout {
    fn half_extent(&self) -> f32 {
        self.square_size * BOARD_SIZE as f32 * 0.5
    }

    /// World-space centre of a square, at piece height
    pub fn square_center(&self, square: Square) -> [f32; 3] {
        let half = self.half_extent();
        let x = self.origin[0] - half + (square.file() as f32 + 0.5) * self.square_size;
        let z = self.origin[1] + half - (square.rank() as f32 + 0.5) * self.square_size;
        [x, self.piece_height, z]
    }

    /// Square under a world-space point on the board plane
    pub fn square_at(&self, x: f32, z: f32) -> Option<Square> {
        let half = self.half_extent();
        let fx = (x - (self.origin[0] - half)) / self.square_size;
        let fz = ((self.origin[1] + half) - z) / self.square_size;
        if !fx.is_finite() || !fz.is_finite() || fx < 0.0 || fz < 0.0 {
            return None;
        }
        let (file, rank) = (fx.floor(), fz.floor());
        if file >= BOARD_SIZE as f32 || rank >= BOARD_SIZE as f32 {
            return None;
        }
        Square::new(file as u8, rank as u8).ok()
    }

    /// Board extents as `(min_x, min_z, max_x, max_z)`
    pub fn bounds(&self) -> [f32; 4] {
        let half = self.half_extent();
        [
            self.origin[0] - half,
            self.origin[1] - half,
            self.origin[0] + half,
            self.origin[1] + half,
        ]
    }
}
