//! Floating assistant button
//!
//! A circular button that shows what the engine is doing: idle microphone,
//! pulsing rings scaled by the live input level while listening, a spinner
//! while the engine thinks, and a speaking indicator during playback.

use crate::engine::EngineState;
use crate::ui::theme::Theme;
use egui::{Color32, Rect, Sense, Vec2};

/// Volume window mapped onto the listening ring, dB RMS.
const VOLUME_FLOOR_DB: f32 = -60.0;
const VOLUME_CEIL_DB: f32 = 0.0;

pub struct AssistantButton<'a> {
    engine_state: EngineState,
    volume_rms_db: f32,
    theme: &'a Theme,
    size: f32,
}

impl<'a> AssistantButton<'a> {
    pub fn new(engine_state: EngineState, volume_rms_db: f32, theme: &'a Theme) -> Self {
        Self {
            engine_state,
            volume_rms_db,
            theme,
            size: 64.0,
        }
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Show the button and return its response. Ring animations overflow
    /// the allocated rect slightly by design, so callers should leave a
    /// little margin around it.
    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(self.size), Sense::click());

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect, &response);
        }

        let tooltip = match self.engine_state {
            EngineState::Standby => "Tap to talk",
            EngineState::Listening => "Listening... tap to stop",
            EngineState::Processing => "Thinking...",
            EngineState::Speaking => "Speaking... tap to interrupt",
        };
        response.clone().on_hover_text(tooltip);

        response
    }

    fn paint(&self, ui: &egui::Ui, rect: Rect, response: &egui::Response) {
        let painter = ui.painter();
        let center = rect.center();
        let radius = self.size * 0.42;

        let bg_color = match self.engine_state {
            EngineState::Listening => self.theme.listening,
            EngineState::Processing => self.theme.processing.gamma_multiply(0.8),
            EngineState::Speaking => self.theme.primary.gamma_multiply(1.1),
            EngineState::Standby if response.hovered() => self.theme.primary.gamma_multiply(1.2),
            EngineState::Standby => self.theme.primary,
        };

        painter.circle_filled(center, radius, bg_color);

        if response.hovered() && self.engine_state == EngineState::Standby {
            painter.circle_stroke(
                center,
                radius + 1.5,
                egui::Stroke::new(2.0, self.theme.primary.gamma_multiply(0.6)),
            );
        }

        match self.engine_state {
            EngineState::Listening => {
                self.draw_mic_icon(painter, center);
                self.draw_volume_ring(ui, center, radius);
            }
            EngineState::Processing => self.draw_processing_icon(ui, painter, center),
            EngineState::Speaking => self.draw_speaking_icon(ui, painter, center),
            EngineState::Standby => self.draw_mic_icon(painter, center),
        }
    }

    /// Normalized input level in 0..1 from the dB RMS observable.
    fn volume_level(&self) -> f32 {
        if !self.volume_rms_db.is_finite() {
            return 0.0;
        }
        ((self.volume_rms_db - VOLUME_FLOOR_DB) / (VOLUME_CEIL_DB - VOLUME_FLOOR_DB))
            .clamp(0.0, 1.0)
    }

    /// Pulsing ring whose reach follows the microphone level.
    fn draw_volume_ring(&self, ui: &egui::Ui, center: egui::Pos2, radius: f32) {
        let painter = ui.painter();
        let t = ui.ctx().input(|i| i.time);
        let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;
        let level = self.volume_level();

        let ring_radius = radius + 3.0 + level * radius * 0.6 + pulse * 3.0;
        let alpha = 0.25 + level * 0.5;

        painter.circle_stroke(
            center,
            ring_radius,
            egui::Stroke::new(
                2.0 + level * 2.0,
                self.theme.listening.gamma_multiply(alpha),
            ),
        );

        // Trailing second ring, half a phase behind
        let pulse2 = (((t * 3.0) + std::f64::consts::PI).sin() * 0.5 + 0.5) as f32;
        let radius2 = radius + 3.0 + level * radius * 0.4 + pulse2 * 4.0;
        painter.circle_stroke(
            center,
            radius2,
            egui::Stroke::new(1.5, self.theme.listening.gamma_multiply(alpha * 0.5)),
        );

        ui.ctx().request_repaint();
    }

    /// Rotating dots while the engine is processing.
    fn draw_processing_icon(&self, ui: &egui::Ui, painter: &egui::Painter, center: egui::Pos2) {
        let t = ui.ctx().input(|i| i.time);
        let angle = t * 3.0;

        for i in 0..3 {
            let dot_angle = angle + (i as f64 * std::f64::consts::TAU / 3.0);
            let orbit = self.size * 0.14;
            let dot_pos = egui::pos2(
                center.x + (dot_angle.cos() as f32 * orbit),
                center.y + (dot_angle.sin() as f32 * orbit),
            );

            let alpha = 1.0 - (i as f32 * 0.3);
            painter.circle_filled(dot_pos, 3.0, Color32::from_white_alpha((255.0 * alpha) as u8));
        }

        ui.ctx().request_repaint();
    }

    /// Three bouncing bars while the assistant speaks.
    fn draw_speaking_icon(&self, ui: &egui::Ui, painter: &egui::Painter, center: egui::Pos2) {
        let t = ui.ctx().input(|i| i.time);
        let bar_width = 3.0;
        let gap = 5.0;

        for i in 0..3 {
            let phase = t * 6.0 + i as f64 * 0.7;
            let height = 6.0 + (phase.sin() * 0.5 + 0.5) as f32 * 10.0;
            let x = center.x + (i as f32 - 1.0) * gap;

            painter.rect_filled(
                Rect::from_center_size(egui::pos2(x, center.y), Vec2::new(bar_width, height)),
                1.5,
                Color32::WHITE,
            );
        }

        ui.ctx().request_repaint();
    }

    fn draw_mic_icon(&self, painter: &egui::Painter, center: egui::Pos2) {
        let color = Color32::WHITE;

        // Mic capsule
        let mic_rect = Rect::from_center_size(
            egui::pos2(center.x, center.y - 3.0),
            Vec2::new(8.0, 14.0),
        );
        painter.rect_filled(mic_rect, 4.0, color);

        // Cradle arc, approximated with line segments
        let arc_center = egui::pos2(center.x, center.y + 2.0);
        let arc_radius = 9.0;
        let num_segments = 8;
        for i in 0..num_segments {
            let start_angle = std::f32::consts::PI * (i as f32 / num_segments as f32);
            let end_angle = std::f32::consts::PI * ((i + 1) as f32 / num_segments as f32);

            let start = egui::pos2(
                arc_center.x - arc_radius * start_angle.cos(),
                arc_center.y + arc_radius * start_angle.sin(),
            );
            let end = egui::pos2(
                arc_center.x - arc_radius * end_angle.cos(),
                arc_center.y + arc_radius * end_angle.sin(),
            );
            painter.line_segment([start, end], egui::Stroke::new(2.0, color));
        }

        // Stem
        painter.line_segment(
            [
                egui::pos2(center.x, arc_center.y + arc_radius),
                egui::pos2(center.x, arc_center.y + arc_radius + 4.0),
            ],
            egui::Stroke::new(2.0, color),
        );
    }
}
