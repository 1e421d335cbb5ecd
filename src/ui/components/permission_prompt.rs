//! Microphone permission fallback view
//!
//! Shown instead of the transcript when microphone access was denied.

use crate::ui::theme::Theme;
use egui::RichText;

pub struct PermissionPrompt<'a> {
    theme: &'a Theme,
}

impl<'a> PermissionPrompt<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Show the prompt. Returns true if the user asked to try again.
    pub fn show(self, ui: &mut egui::Ui) -> bool {
        let mut retry = false;

        ui.vertical_centered(|ui| {
            ui.add_space(80.0);

            egui::Frame::none()
                .fill(self.theme.bg_secondary)
                .rounding(self.theme.card_rounding)
                .inner_margin(self.theme.spacing_lg)
                .show(ui, |ui| {
                    ui.set_max_width(360.0);
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new("🎤").size(36.0));

                        ui.add_space(self.theme.spacing_sm);

                        ui.label(
                            RichText::new("Microphone access needed")
                                .size(18.0)
                                .strong()
                                .color(self.theme.text_primary),
                        );

                        ui.add_space(self.theme.spacing_sm);

                        ui.label(
                            RichText::new(
                                "The assistant can't hear you without the microphone. \
                                 Allow access in your system settings, then try again.",
                            )
                            .size(13.0)
                            .color(self.theme.text_muted),
                        );

                        ui.add_space(self.theme.spacing);

                        if ui.button("Try again").clicked() {
                            retry = true;
                        }
                    });
                });
        });

        retry
    }
}
