// SPDX-License-Identifier: MIT OR Apache-2.0
//! Escort timeline widget.
//!
//! Read-only debug view of the escort:
//! - Phase bands with a time ruler
//! - Door progress curve
//! - Piece hide marker
//! - Playhead for the running activation

use crate::capture::CaptureEvent;
use crate::escort::EscortSequencer;
use crate::phase::EscortPhase;
use egui::{Color32, Pos2, Rect, Sense, Stroke, Vec2};

const BAND_HEIGHT: f32 = 20.0;
const CURVE_HEIGHT: f32 = 48.0;
const LABEL_WIDTH: f32 = 72.0;
const PLAYHEAD_WIDTH: f32 = 2.0;
const CURVE_SAMPLES: usize = 96;

/// Tick spacing actually drawn: at most one tick per pixel of `span`
fn ruler_interval(requested: f32, total: f32, span: f32) -> Option<f32> {
    if !(requested.is_finite() && requested > 0.0) {
        return None;
    }
    let min_interval = total / span.max(1.0);
    Some(requested.max(min_interval))
}

/// Timeline panel state
#[derive(Debug, Clone)]
pub struct EscortTimelinePanel {
    /// Draw the door progress curve
    pub show_door_curve: bool,
    /// Draw the hide marker
    pub show_hide_marker: bool,
    /// Ruler tick interval in seconds
    pub tick_interval: f32,
}

impl Default for EscortTimelinePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl EscortTimelinePanel {
    /// Create a new panel
    pub fn new() -> Self {
        Self {
            show_door_curve: true,
            show_hide_marker: true,
            tick_interval: 0.5,
        }
    }

    fn rgb(color: [u8; 3]) -> Color32 {
        Color32::from_rgb(color[0], color[1], color[2])
    }

    /// Render the timeline for `capture` at clock reading `now`
    pub fn ui(&mut self, ui: &mut egui::Ui, sequencer: &EscortSequencer, capture: Option<&CaptureEvent>, now: f64) {
        ui.horizontal(|ui| {
            ui.checkbox(&mut self.show_door_curve, "Door");
            ui.checkbox(&mut self.show_hide_marker, "Hide marker");
            match sequencer.time_in_sequence(now) {
                Some(t) => {
                    let (phase, _) = sequencer.config().timings.phase_at(t);
                    ui.monospace(format!("{:>8} {:5.2}s", phase.name(), t));
                }
                None => {
                    ui.monospace("idle");
                }
            }
        });

        let height = BAND_HEIGHT + if self.show_door_curve { CURVE_HEIGHT } else { 0.0 };
        let width = ui.available_width().max(LABEL_WIDTH + 1.0);
        let (rect, _response) = ui.allocate_exact_size(Vec2::new(width, height), Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::from_gray(30));

        let timings = sequencer.config().timings;
        let total = timings.total().max(f32::EPSILON);
        let span = rect.width() - LABEL_WIDTH;
        let time_to_x = |t: f32| rect.min.x + LABEL_WIDTH + (t / total) * span;

        // Phase bands
        let band = Rect::from_min_size(rect.min, Vec2::new(rect.width(), BAND_HEIGHT));
        for phase in EscortPhase::all() {
            let start = time_to_x(timings.start(*phase));
            let end = time_to_x(timings.end(*phase));
            if end <= start {
                continue;
            }
            let phase_rect = Rect::from_min_max(Pos2::new(start, band.min.y), Pos2::new(end, band.max.y));
            painter.rect_filled(phase_rect, 2.0, Self::rgb(phase.color()).gamma_multiply(0.6));
            painter.text(
                Pos2::new(start + 3.0, band.min.y + 3.0),
                egui::Align2::LEFT_TOP,
                phase.name(),
                egui::FontId::proportional(11.0),
                Color32::from_gray(20),
            );
        }
        painter.text(
            Pos2::new(rect.min.x + 4.0, band.min.y + 3.0),
            egui::Align2::LEFT_TOP,
            "Phase",
            egui::FontId::proportional(11.0),
            Color32::from_gray(180),
        );

        // Ruler ticks
        if let Some(interval) = ruler_interval(self.tick_interval, total, span) {
            let ticks = (total / interval).floor() as usize;
            for i in 0..=ticks {
                let x = time_to_x(i as f32 * interval);
                painter.line_segment(
                    [Pos2::new(x, band.max.y - 4.0), Pos2::new(x, band.max.y)],
                    Stroke::new(1.0, Color32::from_gray(140)),
                );
            }
        }

        // Door curve
        if self.show_door_curve {
            let curve = Rect::from_min_max(Pos2::new(rect.min.x, band.max.y), rect.max);
            painter.text(
                Pos2::new(curve.min.x + 4.0, curve.min.y + 3.0),
                egui::Align2::LEFT_TOP,
                "Door",
                egui::FontId::proportional(11.0),
                Color32::from_gray(180),
            );
            if let Some(capture) = capture {
                let tracks = sequencer.tracks(capture);
                let points: Vec<Pos2> = (0..=CURVE_SAMPLES)
                    .map(|i| {
                        let t = total * i as f32 / CURVE_SAMPLES as f32;
                        let door = tracks.door.evaluate_float(t).unwrap_or(0.0);
                        Pos2::new(time_to_x(t), curve.max.y - 4.0 - door * (curve.height() - 8.0))
                    })
                    .collect();
                painter.add(egui::Shape::line(points, Stroke::new(1.5, Color32::from_rgb(255, 200, 100))));
            }
        }

        // Hide marker
        if self.show_hide_marker {
            let x = time_to_x(timings.hide_time(sequencer.config().layout.hide_fraction));
            painter.line_segment(
                [Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)],
                Stroke::new(1.0, Color32::from_rgb(120, 120, 255)),
            );
        }

        // Playhead
        if let Some(t) = sequencer.time_in_sequence(now) {
            let x = time_to_x(t);
            painter.line_segment(
                [Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)],
                Stroke::new(PLAYHEAD_WIDTH, Color32::from_rgb(255, 100, 100)),
            );
        }
    }
}
