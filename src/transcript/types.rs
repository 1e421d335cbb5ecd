use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a transcript entry represents: one turn of recognized user speech
/// or one spoken assistant response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidgetKind {
    Recognition,
    Speech,
}

/// One entry in the transcript. Text is filled in incrementally while the
/// widget is open; once closed it never changes again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptWidget {
    pub id: Uuid,
    pub kind: WidgetKind,
    pub text: String,
    pub closed: bool,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptWidget {
    /// Create a new, still-open widget with an empty text buffer.
    pub fn open(kind: WidgetKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            text: String::new(),
            closed: false,
            timestamp: Utc::now(),
        }
    }

    pub fn is_open(&self) -> bool {
        !self.closed
    }
}
