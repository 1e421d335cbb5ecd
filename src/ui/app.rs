//! Main application struct and eframe integration
//!
//! The screen controller: renders the floating button or the expanded
//! overlay, relays taps and back presses into the view-model, and forwards
//! its observables into visual feedback every frame.

use crate::assistant::AssistantViewModel;
use crate::config::AssistantConfig;
use crate::engine::EngineState;
use crate::permission::{MicPermission, PermissionStatus};
use crate::ui::components::{AssistantButton, PermissionPrompt, TranscriptView};
use crate::ui::theme::Theme;
use egui::{CentralPanel, Key, TopBottomPanel};
use tracing::{info, warn};

pub struct AssistantApp {
    view_model: AssistantViewModel,
    permission: Box<dyn MicPermission>,
    config: AssistantConfig,
    theme: Theme,
    /// Set once the user denied microphone access; swaps the transcript
    /// for the explanatory fallback view.
    permission_denied: bool,
}

impl AssistantApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        view_model: AssistantViewModel,
        permission: Box<dyn MicPermission>,
        config: AssistantConfig,
    ) -> Self {
        let theme = if config.dark_theme {
            Theme::dark()
        } else {
            Theme::light()
        };
        theme.apply(&cc.egui_ctx);

        Self {
            view_model,
            permission,
            config,
            theme,
            permission_denied: false,
        }
    }

    fn handle_button_click(&mut self) {
        match self.permission.status() {
            PermissionStatus::Granted => self.view_model.on_button_click(),
            PermissionStatus::Undetermined => {
                if self.permission.request() == PermissionStatus::Granted {
                    self.view_model.on_button_click();
                } else {
                    warn!("microphone permission denied");
                    self.permission_denied = true;
                }
            }
            PermissionStatus::Denied => {
                self.permission_denied = true;
            }
        }
    }

    /// The floating button lives in a slim bottom panel so it stays put
    /// whether or not the overlay is expanded above it.
    fn show_button_area(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("assistant_button_area")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    let response = AssistantButton::new(
                        self.view_model.engine_state(),
                        self.view_model.volume_rms_db(),
                        &self.theme,
                    )
                    .size(self.config.button_size)
                    .show(ui);

                    if response.clicked() {
                        self.handle_button_click();
                    }
                });
            });
    }

    fn show_overlay(&mut self, ctx: &egui::Context, reveal: f32) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary))
            .show(ctx, |ui| {
                if self.permission_denied {
                    if PermissionPrompt::new(&self.theme).show(ui)
                        && self.permission.request() == PermissionStatus::Granted
                    {
                        info!("microphone permission granted on retry");
                        self.permission_denied = false;
                    }
                    return;
                }

                if reveal <= 0.01 {
                    // Collapsed: nothing but the host screen behind us
                    return;
                }

                ui.set_opacity(reveal);
                let widgets = self.view_model.transcript().snapshot();
                TranscriptView::new(&widgets, &self.theme).show(ui);
            });
    }
}

impl eframe::App for AssistantApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.view_model.poll_events();

        // Relay queued link intents to the host's URL opener
        while let Some(url) = self.view_model.try_take_url() {
            info!(%url, "opening link");
            ctx.open_url(egui::OpenUrl::new_tab(url));
        }

        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            self.view_model.on_back_pressed();
        }

        let reveal = ctx.animate_bool_with_time(
            egui::Id::new("assistant_reveal"),
            self.view_model.is_visible(),
            self.config.reveal_time_secs(),
        );

        self.show_button_area(ctx);
        self.show_overlay(ctx, reveal);

        // Keep animating while the engine is doing anything
        if self.view_model.engine_state() != EngineState::Standby {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("assistant overlay shutting down");
        self.view_model.shutdown();
    }
}
