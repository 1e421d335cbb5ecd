use super::types::{TranscriptWidget, WidgetKind};
use parking_lot::RwLock;
use std::sync::Arc;

/// Append-mostly ordered list of transcript widgets (thread-safe).
///
/// Only the most recent open widget of a kind is ever mutated; everything
/// before it is settled history. At most one open widget of each kind exists
/// at any time.
#[derive(Debug, Clone)]
pub struct TranscriptList {
    widgets: Arc<RwLock<Vec<TranscriptWidget>>>,
}

impl TranscriptList {
    pub fn new() -> Self {
        Self {
            widgets: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Append a new open widget. An open widget of the same kind left
    /// behind by an earlier, unterminated attempt is closed first so the
    /// one-open-widget-per-kind invariant holds.
    pub fn push_open(&self, kind: WidgetKind) {
        let mut widgets = self.widgets.write();
        if let Some(stale) = widgets.iter_mut().rev().find(|w| w.kind == kind && w.is_open()) {
            stale.closed = true;
        }
        widgets.push(TranscriptWidget::open(kind));
    }

    /// Replace the text of the most recent open widget of `kind`.
    /// Returns false if there is none.
    pub fn write_last_open(&self, kind: WidgetKind, text: &str) -> bool {
        let mut widgets = self.widgets.write();
        match widgets.iter_mut().rev().find(|w| w.kind == kind && w.is_open()) {
            Some(widget) => {
                widget.text.clear();
                widget.text.push_str(text);
                true
            }
            None => false,
        }
    }

    /// Append a chunk to the most recent open widget of `kind`, separated
    /// from what is already there. Returns false if there is none.
    pub fn append_last_open(&self, kind: WidgetKind, chunk: &str) -> bool {
        let mut widgets = self.widgets.write();
        match widgets.iter_mut().rev().find(|w| w.kind == kind && w.is_open()) {
            Some(widget) => {
                if !widget.text.is_empty() {
                    widget.text.push(' ');
                }
                widget.text.push_str(chunk);
                true
            }
            None => false,
        }
    }

    /// Mark the most recent open widget of `kind` immutable.
    pub fn close_last_open(&self, kind: WidgetKind) -> bool {
        let mut widgets = self.widgets.write();
        match widgets.iter_mut().rev().find(|w| w.kind == kind && w.is_open()) {
            Some(widget) => {
                widget.closed = true;
                true
            }
            None => false,
        }
    }

    /// Remove the most recent widget of `kind` if it is still open.
    /// Closed widgets are history and are never removed this way.
    pub fn remove_last_open(&self, kind: WidgetKind) -> bool {
        let mut widgets = self.widgets.write();
        let index = widgets
            .iter()
            .rposition(|w| w.kind == kind && w.is_open());
        match index {
            Some(index) => {
                widgets.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> Vec<TranscriptWidget> {
        self.widgets.read().clone()
    }

    pub fn clear(&self) {
        self.widgets.write().clear();
    }

    pub fn len(&self) -> usize {
        self.widgets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.read().is_empty()
    }
}

impl Default for TranscriptList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_open_closes_stale_open_widget_of_same_kind() {
        let list = TranscriptList::new();
        list.push_open(WidgetKind::Recognition);
        list.push_open(WidgetKind::Recognition);

        let widgets = list.snapshot();
        assert_eq!(widgets.len(), 2);
        assert!(widgets[0].closed);
        assert!(widgets[1].is_open());
    }

    #[test]
    fn open_widgets_of_different_kinds_coexist() {
        let list = TranscriptList::new();
        list.push_open(WidgetKind::Recognition);
        list.push_open(WidgetKind::Speech);

        let widgets = list.snapshot();
        assert_eq!(widgets.len(), 2);
        assert!(widgets.iter().all(|w| w.is_open()));
    }

    #[test]
    fn write_targets_most_recent_open_of_kind() {
        let list = TranscriptList::new();
        list.push_open(WidgetKind::Recognition);
        list.close_last_open(WidgetKind::Recognition);
        list.push_open(WidgetKind::Recognition);

        assert!(list.write_last_open(WidgetKind::Recognition, "hello"));
        let widgets = list.snapshot();
        assert_eq!(widgets[0].text, "");
        assert_eq!(widgets[1].text, "hello");
    }

    #[test]
    fn write_without_open_widget_reports_failure() {
        let list = TranscriptList::new();
        assert!(!list.write_last_open(WidgetKind::Recognition, "hello"));
        assert!(list.is_empty());
    }

    #[test]
    fn append_joins_chunks_with_a_space() {
        let list = TranscriptList::new();
        list.push_open(WidgetKind::Speech);
        list.append_last_open(WidgetKind::Speech, "First sentence.");
        list.append_last_open(WidgetKind::Speech, "Second sentence.");

        assert_eq!(list.snapshot()[0].text, "First sentence. Second sentence.");
    }

    #[test]
    fn remove_only_touches_open_widgets() {
        let list = TranscriptList::new();
        list.push_open(WidgetKind::Recognition);
        list.write_last_open(WidgetKind::Recognition, "done");
        list.close_last_open(WidgetKind::Recognition);

        assert!(!list.remove_last_open(WidgetKind::Recognition));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_takes_the_open_widget_even_behind_other_kinds() {
        let list = TranscriptList::new();
        list.push_open(WidgetKind::Recognition);
        list.push_open(WidgetKind::Speech);

        assert!(list.remove_last_open(WidgetKind::Recognition));
        let widgets = list.snapshot();
        assert_eq!(widgets.len(), 1);
        assert_eq!(widgets[0].kind, WidgetKind::Speech);
    }
}
