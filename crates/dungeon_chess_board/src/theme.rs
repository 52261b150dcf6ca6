// SPDX-License-Identifier: MIT OR Apache-2.0
//! Board themes.
//!
//! Provides colour presets for squares, pieces and move highlights, and a
//! cycler used by the theme hotkey.

use serde::{Deserialize, Serialize};

/// Theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ThemePreset {
    /// Wood board (default)
    #[default]
    Classic,
    /// Grey stone of the castle hall
    Castle,
    /// Dark moss and iron
    Dungeon,
    /// Polished marble
    Marble,
}

impl ThemePreset {
    /// Get all presets, in cycling order
    pub fn all() -> &'static [ThemePreset] {
        &[
            ThemePreset::Classic,
            ThemePreset::Castle,
            ThemePreset::Dungeon,
            ThemePreset::Marble,
        ]
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Classic => "Classic",
            ThemePreset::Castle => "Castle",
            ThemePreset::Dungeon => "Dungeon",
            ThemePreset::Marble => "Marble",
        }
    }

    fn index(&self) -> usize {
        Self::all().iter().position(|p| p == self).unwrap_or(0)
    }
}

/// Colours used to draw the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTheme {
    /// Preset these colours came from
    pub preset: ThemePreset,
    /// Light squares
    pub light_square: [u8; 3],
    /// Dark squares
    pub dark_square: [u8; 3],
    /// White piece tint
    pub white_piece: [u8; 3],
    /// Black piece tint
    pub black_piece: [u8; 3],
    /// Selected square and legal-target highlight
    pub highlight: [u8; 3],
}

impl Default for BoardTheme {
    fn default() -> Self {
        Self::new(ThemePreset::default())
    }
}

impl BoardTheme {
    /// Colours for a preset
    pub fn new(preset: ThemePreset) -> Self {
        let (light_square, dark_square, white_piece, black_piece, highlight) = match preset {
            ThemePreset::Classic => (
                [240, 217, 181],
                [181, 136, 99],
                [245, 240, 230],
                [40, 35, 30],
                [246, 246, 105],
            ),
            ThemePreset::Castle => (
                [170, 170, 165],
                [95, 95, 100],
                [230, 225, 210],
                [55, 50, 60],
                [120, 180, 255],
            ),
            ThemePreset::Dungeon => (
                [90, 105, 80],
                [45, 50, 40],
                [200, 190, 160],
                [30, 25, 25],
                [255, 140, 60],
            ),
            ThemePreset::Marble => (
                [235, 235, 240],
                [120, 125, 140],
                [250, 250, 252],
                [20, 20, 28],
                [140, 220, 170],
            ),
        };
        Self {
            preset,
            light_square,
            dark_square,
            white_piece,
            black_piece,
            highlight,
        }
    }

    /// Square colour by shade
    pub fn square_color(&self, dark: bool) -> [u8; 3] {
        if dark {
            self.dark_square
        } else {
            self.light_square
        }
    }
}

/// Cycles through the presets with wrap-around
#[derive(Debug, Clone, Default)]
pub struct ThemeCycle {
    current: ThemePreset,
}

impl ThemeCycle {
    /// Start at a preset
    pub fn new(start: ThemePreset) -> Self {
        Self { current: start }
    }

    /// Current preset
    pub fn current(&self) -> ThemePreset {
        self.current
    }

    /// Colours of the current preset
    pub fn theme(&self) -> BoardTheme {
        BoardTheme::new(self.current)
    }

    /// Advance to the next preset
    pub fn forward(&mut self) -> ThemePreset {
        let all = ThemePreset::all();
        self.current = all[(self.current.index() + 1) % all.len()];
        tracing::debug!("Theme switched to {}", self.current.name());
        self.current
    }

    /// Go back to the previous preset
    pub fn back(&mut self) -> ThemePreset {
        let all = ThemePreset::all();
        self.current = all[(self.current.index() + all.len() - 1) % all.len()];
        tracing::debug!("Theme switched to {}", self.current.name());
        self.current
    }
}
