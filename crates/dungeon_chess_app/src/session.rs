// SPDX-License-Identifier: MIT OR Apache-2.0
//! Game session: board input, the active capture slot and the escort.
//!
//! The session owns the one place a capture is stored. The escort driver
//! reads it every frame and the session clears it when the escort
//! completes.

use crate::config::AppConfig;
use crate::scene::SceneGraph;
use dungeon_chess_board::{
    BoardLayout, BoardTheme, ChessRules, ClickOutcome, MoveOutcome, SelectionController, Square, ThemeCycle,
    ThemePreset,
};
use dungeon_chess_sequencer::{CaptureEvent, EscortDriver, EscortFrame, EscortSequencer};

/// A game in progress
pub struct GameSession<R: ChessRules> {
    rules: R,
    selection: SelectionController,
    layout: BoardLayout,
    themes: ThemeCycle,
    active_capture: Option<CaptureEvent>,
    capture_move: Option<MoveOutcome>,
    driver: EscortDriver,
    scene: SceneGraph,
    history: Vec<MoveOutcome>,
}

impl<R: ChessRules> GameSession<R> {
    /// Start a session over `rules`
    pub fn new(rules: R, config: &AppConfig) -> Self {
        let sequencer = EscortSequencer::new(config.escort, config.dungeon_anchor);
        let driver = EscortDriver::new(sequencer).with_on_complete(|capture| {
            tracing::info!("{} locked in the dungeon", capture.piece());
        });

        Self {
            rules,
            selection: SelectionController::new(),
            layout: config.board,
            themes: ThemeCycle::new(config.theme),
            active_capture: None,
            capture_move: None,
            driver,
            scene: SceneGraph::with_escort_nodes(),
            history: Vec::new(),
        }
    }

    /// Handle a click on a square
    pub fn click(&mut self, square: Square) -> ClickOutcome {
        let outcome = self.selection.click(&mut self.rules, square);
        if let ClickOutcome::Moved(mv) = &outcome {
            self.history.push(*mv);
            if let Some(capture) = CaptureEvent::from_move(&self.layout, mv) {
                if let Some(previous) = self.active_capture.replace(capture) {
                    tracing::debug!("Capture {} replaces {}", capture.id(), previous.id());
                }
                self.capture_move = Some(*mv);
                tracing::info!("{} captured on {}", capture.piece(), mv.captured_on.unwrap_or(mv.to));
            }
        }
        outcome
    }

    /// Handle a click at a world-space point on the board plane
    pub fn click_at(&mut self, x: f32, z: f32) -> ClickOutcome {
        match self.layout.square_at(x, z) {
            Some(square) => self.click(square),
            None => {
                self.selection.clear();
                ClickOutcome::Ignored
            }
        }
    }

    /// Advance the escort to clock reading `now`
    pub fn frame(&mut self, now: f64) -> Option<EscortFrame> {
        let frame = self.driver.frame(self.active_capture.as_ref(), now, &mut self.scene)?;
        if frame.completed {
            self.active_capture = None;
            self.capture_move = None;
        }
        Some(frame)
    }

    /// Take back the last move
    pub fn undo(&mut self) -> Option<MoveOutcome> {
        let undone = self.rules.undo()?;
        self.selection.clear();
        self.history.pop();
        if self.capture_move == Some(undone) {
            // The piece is back on the board; the escort stops on the next frame
            if let Some(capture) = self.active_capture.take() {
                tracing::debug!("Capture {} taken back", capture.id());
            }
            self.capture_move = None;
        }
        tracing::debug!("Undid {} -> {}", undone.from, undone.to);
        Some(undone)
    }

    /// Switch to the next theme
    pub fn cycle_theme(&mut self) -> ThemePreset {
        self.themes.forward()
    }

    /// Switch to the previous theme
    pub fn cycle_theme_back(&mut self) -> ThemePreset {
        self.themes.back()
    }

    /// Rules engine
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Selection state
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// Current theme colours
    pub fn theme(&self) -> BoardTheme {
        self.themes.theme()
    }

    /// Capture the escort is animating, if any
    pub fn active_capture(&self) -> Option<&CaptureEvent> {
        self.active_capture.as_ref()
    }

    /// Escort driver
    pub fn driver(&self) -> &EscortDriver {
        &self.driver
    }

    /// Scene receiving escort transforms
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Mutable scene, for mounting and unmounting nodes
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    /// Moves played this session
    pub fn history(&self) -> &[MoveOutcome] {
        &self.history
    }
}
