pub mod list;
pub mod types;

pub use list::TranscriptList;
pub use types::{TranscriptWidget, WidgetKind};
