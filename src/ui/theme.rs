//! Theme and styling for the assistant overlay.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Vec2, Visuals};

/// Overlay theme configuration
#[derive(Clone, Debug)]
pub struct Theme {
    /// Primary accent color (button, cursors)
    pub primary: Color32,
    /// Active listening indicator color
    pub listening: Color32,
    /// Processing indicator color
    pub processing: Color32,
    /// Error color
    pub error: Color32,

    /// Background colors
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_muted: Color32,

    /// Bubble fill for recognized user speech
    pub recognition_bubble: Color32,
    /// Bubble fill for spoken responses
    pub speech_bubble: Color32,

    /// Border radius for transcript bubbles
    pub bubble_rounding: Rounding,
    /// Border radius for cards/panels
    pub card_rounding: Rounding,

    /// Standard spacing
    pub spacing: f32,
    /// Small spacing
    pub spacing_sm: f32,
    /// Large spacing
    pub spacing_lg: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme
    pub fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(99, 102, 241),    // Indigo
            listening: Color32::from_rgb(239, 68, 68),   // Red
            processing: Color32::from_rgb(234, 179, 8),  // Yellow
            error: Color32::from_rgb(239, 68, 68),       // Red

            bg_primary: Color32::from_rgb(17, 24, 39),   // Dark blue-gray
            bg_secondary: Color32::from_rgb(31, 41, 55), // Lighter blue-gray
            bg_tertiary: Color32::from_rgb(55, 65, 81),  // Even lighter

            text_primary: Color32::from_rgb(249, 250, 251), // Almost white
            text_muted: Color32::from_rgb(156, 163, 175),   // Medium gray

            recognition_bubble: Color32::from_rgb(79, 70, 229), // Indigo
            speech_bubble: Color32::from_rgb(55, 65, 81),       // Gray

            bubble_rounding: Rounding::same(10.0),
            card_rounding: Rounding::same(12.0),

            spacing: 16.0,
            spacing_sm: 8.0,
            spacing_lg: 24.0,
        }
    }

    /// Create a light theme
    pub fn light() -> Self {
        Self {
            primary: Color32::from_rgb(79, 70, 229),
            listening: Color32::from_rgb(220, 38, 38),
            processing: Color32::from_rgb(202, 138, 4),
            error: Color32::from_rgb(220, 38, 38),

            bg_primary: Color32::from_rgb(255, 255, 255),
            bg_secondary: Color32::from_rgb(243, 244, 246),
            bg_tertiary: Color32::from_rgb(229, 231, 235),

            text_primary: Color32::from_rgb(17, 24, 39),
            text_muted: Color32::from_rgb(107, 114, 128),

            recognition_bubble: Color32::from_rgb(79, 70, 229),
            speech_bubble: Color32::from_rgb(229, 231, 235),

            bubble_rounding: Rounding::same(10.0),
            card_rounding: Rounding::same(12.0),

            spacing: 16.0,
            spacing_sm: 8.0,
            spacing_lg: 24.0,
        }
    }

    /// Apply this theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.bg_primary.r() < 128 {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_secondary;
        visuals.extreme_bg_color = self.bg_tertiary;

        visuals.widgets.noninteractive.bg_fill = self.bg_secondary;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_muted);

        visuals.widgets.inactive.bg_fill = self.bg_tertiary;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_muted);

        visuals.widgets.hovered.bg_fill = self.primary.gamma_multiply(0.8);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.active.bg_fill = self.primary;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.hyperlink_color = self.primary;
        visuals.window_rounding = self.card_rounding;
        visuals.window_stroke = Stroke::new(1.0, self.bg_tertiary);

        ctx.set_visuals(visuals);

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = Vec2::splat(self.spacing_sm);
        style.spacing.window_margin = egui::Margin::same(self.spacing);

        style.text_styles.insert(
            egui::TextStyle::Heading,
            FontId::new(22.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Body,
            FontId::new(14.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Small,
            FontId::new(12.0, FontFamily::Proportional),
        );

        ctx.set_style(style);
    }
}
