//! UI components and application module
//!
//! This module provides the egui/eframe-based assistant overlay.

mod app;
pub mod components;
mod theme;

pub use app::AssistantApp;
pub use components::{AssistantButton, PermissionPrompt, TranscriptView};
pub use theme::Theme;
