// SPDX-License-Identifier: MIT OR Apache-2.0
//! Top-level application errors.

use crate::config::ConfigError;
use dungeon_chess_board::SquareError;
use thiserror::Error;

/// Errors that abort the application
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded, saved or validated
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A square given on the command line is not valid
    #[error("Invalid square: {0}")]
    Square(#[from] SquareError),

    /// Theme name not recognised
    #[error("Unknown theme: {0:?}")]
    UnknownTheme(String),
}
