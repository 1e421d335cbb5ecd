//! Reusable UI components for the assistant overlay.

pub mod assistant_button;
pub mod permission_prompt;
pub mod transcript_view;

pub use assistant_button::AssistantButton;
pub use permission_prompt::PermissionPrompt;
pub use transcript_view::TranscriptView;
