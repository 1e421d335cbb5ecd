//! Transcript view
//!
//! Scrollable bubble list over the transcript widgets: recognized speech on
//! the right, spoken responses on the left, with a blinking cursor on any
//! widget that is still being filled in.

use crate::transcript::{TranscriptWidget, WidgetKind};
use crate::ui::theme::Theme;
use egui::{Align, Color32, RichText};

pub struct TranscriptView<'a> {
    widgets: &'a [TranscriptWidget],
    theme: &'a Theme,
}

impl<'a> TranscriptView<'a> {
    pub fn new(widgets: &'a [TranscriptWidget], theme: &'a Theme) -> Self {
        Self { widgets, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.add_space(self.theme.spacing);

                    if self.widgets.is_empty() {
                        self.show_empty_state(ui);
                    } else {
                        for widget in self.widgets {
                            self.show_widget(ui, widget);
                            ui.add_space(self.theme.spacing_sm);
                        }
                    }

                    ui.add_space(self.theme.spacing);
                });
            });
    }

    fn show_empty_state(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);

            ui.label(
                RichText::new("How can I help?")
                    .size(22.0)
                    .color(self.theme.text_primary),
            );

            ui.add_space(self.theme.spacing);

            ui.label(
                RichText::new("Tap the microphone button and start talking.")
                    .size(14.0)
                    .color(self.theme.text_muted),
            );
        });
    }

    fn show_widget(&self, ui: &mut egui::Ui, widget: &TranscriptWidget) {
        let is_recognition = widget.kind == WidgetKind::Recognition;

        let (bubble_color, text_color, align, label) = if is_recognition {
            (
                self.theme.recognition_bubble,
                Color32::WHITE,
                Align::RIGHT,
                "You",
            )
        } else {
            (
                self.theme.speech_bubble,
                self.theme.text_primary,
                Align::LEFT,
                "Assistant",
            )
        };

        ui.with_layout(egui::Layout::top_down(align), |ui| {
            ui.label(RichText::new(label).size(12.0).color(self.theme.text_muted));
            ui.add_space(2.0);

            let max_width = ui.available_width() * 0.75;

            egui::Frame::none()
                .fill(bubble_color)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);

                    if widget.text.is_empty() && widget.is_open() {
                        self.show_typing_indicator(ui);
                    } else {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(RichText::new(&widget.text).color(text_color));
                            if widget.is_open() {
                                self.show_cursor(ui);
                            }
                        });
                    }
                });

            let time_str = widget.timestamp.format("%H:%M").to_string();
            ui.label(
                RichText::new(time_str)
                    .size(10.0)
                    .color(self.theme.text_muted),
            );
        });
    }

    /// Three fading dots shown while an open widget has no text yet.
    fn show_typing_indicator(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for i in 0..3 {
                let t = ui.ctx().input(|input| input.time);
                let alpha = ((t * 3.0 + i as f64 * 0.5).sin() * 0.5 + 0.5) as f32;
                ui.label(
                    RichText::new("●")
                        .size(10.0)
                        .color(self.theme.text_muted.gamma_multiply(alpha)),
                );
            }
        });
        ui.ctx().request_repaint();
    }

    /// Blinking caret at the end of text still being delivered.
    fn show_cursor(&self, ui: &mut egui::Ui) {
        let t = ui.ctx().input(|input| input.time);
        if (t * 2.0).fract() < 0.5 {
            ui.label(RichText::new("▎").color(self.theme.primary));
        }
        ui.ctx().request_repaint();
    }
}
