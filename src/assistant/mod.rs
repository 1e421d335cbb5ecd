//! Assistant view-model
//!
//! Folds the engine's event streams into the transcript and the handful of
//! observable values the screen renders: visibility, engine state, volume.
//! All reduction happens on the UI thread, one frame at a time.

use crate::engine::{EngineHandle, EngineState, SttEvent, TtsEvent};
use crate::transcript::{TranscriptList, WidgetKind};
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, error};

pub struct AssistantViewModel {
    handle: EngineHandle,
    visible: bool,
    transcript: TranscriptList,
    engine_state: EngineState,
    volume_rms_db: f32,
    capitalize_recognition: bool,
    url_tx: Sender<String>,
    url_rx: Receiver<String>,
}

impl AssistantViewModel {
    pub fn new(handle: EngineHandle, capitalize_recognition: bool) -> Self {
        let (url_tx, url_rx) = unbounded();
        Self {
            handle,
            visible: false,
            transcript: TranscriptList::new(),
            engine_state: EngineState::Standby,
            volume_rms_db: f32::NEG_INFINITY,
            capitalize_recognition,
            url_tx,
            url_rx,
        }
    }

    /// Whether the overlay is expanded over the host screen.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn transcript(&self) -> &TranscriptList {
        &self.transcript
    }

    /// Last observed engine state, for button animation.
    pub fn engine_state(&self) -> EngineState {
        self.engine_state
    }

    /// Last microphone level in dB RMS. Starts at negative infinity until
    /// the first sample arrives.
    pub fn volume_rms_db(&self) -> f32 {
        self.volume_rms_db
    }

    /// Drain every pending engine event. Called once per rendered frame;
    /// each stream is consumed in arrival order.
    pub fn poll_events(&mut self) {
        while let Ok(state) = self.handle.state_rx.try_recv() {
            debug!(?state, "engine state changed");
            self.engine_state = state;
        }

        // Engine failures are logged and otherwise ignored; recovery is the
        // engine's business, not the overlay's.
        while let Ok(err) = self.handle.error_rx.try_recv() {
            error!("engine error: {err}");
        }

        while let Ok(event) = self.handle.stt_rx.try_recv() {
            self.on_stt_event(event);
        }

        while let Ok(event) = self.handle.tts_rx.try_recv() {
            self.on_tts_event(event);
        }
    }

    fn on_stt_event(&mut self, event: SttEvent) {
        match event {
            SttEvent::RecognitionStarted => {
                self.transcript.push_open(WidgetKind::Recognition);
            }
            SttEvent::PartialResult { text } => {
                let text = self.recognition_text(&text);
                if !self.transcript.write_last_open(WidgetKind::Recognition, &text) {
                    debug!("partial result with no open recognition widget, dropped");
                }
            }
            SttEvent::FinalResult { text } => {
                let text = self.recognition_text(&text);
                if self.transcript.write_last_open(WidgetKind::Recognition, &text) {
                    self.transcript.close_last_open(WidgetKind::Recognition);
                } else {
                    debug!("final result with no open recognition widget, dropped");
                }
            }
            SttEvent::EmptyResult | SttEvent::Cancelled => {
                self.transcript.remove_last_open(WidgetKind::Recognition);
            }
            SttEvent::VolumeChanged { rms_db } => {
                self.volume_rms_db = rms_db;
            }
        }
    }

    fn on_tts_event(&mut self, event: TtsEvent) {
        match event {
            TtsEvent::SequenceStarted => {
                self.transcript.push_open(WidgetKind::Speech);
            }
            TtsEvent::SpeechStarted { text: Some(text) } => {
                if !self.transcript.append_last_open(WidgetKind::Speech, &text) {
                    debug!("speech chunk with no open speech widget, dropped");
                }
            }
            TtsEvent::SpeechStarted { text: None } => {
                // Audio-only speech has nothing to show
            }
            TtsEvent::SequenceCompleted => {
                self.transcript.close_last_open(WidgetKind::Speech);
            }
        }
    }

    fn recognition_text(&self, text: &str) -> String {
        if self.capitalize_recognition {
            capitalize(text)
        } else {
            text.to_string()
        }
    }

    /// Assistant button was tapped: reveal the overlay if hidden and
    /// toggle recognition either way.
    pub fn on_button_click(&mut self) {
        if !self.visible {
            self.visible = true;
        }
        self.handle.toggle_recognition();
    }

    /// Back was pressed. Returns true if the overlay consumed the event by
    /// collapsing itself; the host should handle it otherwise.
    pub fn on_back_pressed(&mut self) -> bool {
        if self.visible {
            self.visible = false;
            self.handle.standby();
            true
        } else {
            false
        }
    }

    /// Queue a link for the host to open (side signal, not transcript).
    pub fn open_url(&self, url: impl Into<String>) {
        let _ = self.url_tx.send(url.into());
    }

    /// Take the next pending link, if any.
    pub fn try_take_url(&self) -> Option<String> {
        self.url_rx.try_recv().ok()
    }

    /// Put the engine in standby before the screen goes away. Dropping the
    /// view-model afterwards tears down every subscription.
    pub fn shutdown(&mut self) {
        self.handle.standby();
    }
}

/// Uppercase the first character, as recognized speech arrives lowercased
/// from most recognizers.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{engine_channels, EngineCommand, EngineError, EngineLink};

    fn view_model() -> (EngineLink, AssistantViewModel) {
        let (link, handle) = engine_channels(16);
        (link, AssistantViewModel::new(handle, true))
    }

    #[test]
    fn recognition_lifecycle_produces_one_closed_widget() {
        let (link, mut vm) = view_model();

        link.stt_tx.send(SttEvent::RecognitionStarted).unwrap();
        link.stt_tx
            .send(SttEvent::PartialResult { text: "turn".into() })
            .unwrap();
        link.stt_tx
            .send(SttEvent::PartialResult {
                text: "turn on".into(),
            })
            .unwrap();
        link.stt_tx
            .send(SttEvent::FinalResult {
                text: "turn on the lights".into(),
            })
            .unwrap();
        vm.poll_events();

        let widgets = vm.transcript().snapshot();
        assert_eq!(widgets.len(), 1);
        assert!(widgets[0].closed);
        assert_eq!(widgets[0].text, "Turn on the lights");
    }

    #[test]
    fn cancelled_after_started_leaves_no_widget() {
        let (link, mut vm) = view_model();

        link.stt_tx.send(SttEvent::RecognitionStarted).unwrap();
        link.stt_tx.send(SttEvent::Cancelled).unwrap();
        vm.poll_events();

        assert!(vm.transcript().is_empty());
    }

    #[test]
    fn empty_result_does_not_remove_closed_widget() {
        let (link, mut vm) = view_model();

        link.stt_tx.send(SttEvent::RecognitionStarted).unwrap();
        link.stt_tx
            .send(SttEvent::FinalResult { text: "done".into() })
            .unwrap();
        link.stt_tx.send(SttEvent::EmptyResult).unwrap();
        vm.poll_events();

        assert_eq!(vm.transcript().len(), 1);
        assert_eq!(vm.transcript().snapshot()[0].text, "Done");
    }

    #[test]
    fn orphan_partial_is_dropped() {
        let (link, mut vm) = view_model();

        link.stt_tx
            .send(SttEvent::PartialResult {
                text: "ghost".into(),
            })
            .unwrap();
        vm.poll_events();

        assert!(vm.transcript().is_empty());
    }

    #[test]
    fn speech_sequence_accumulates_chunks_in_order() {
        let (link, mut vm) = view_model();

        link.tts_tx.send(TtsEvent::SequenceStarted).unwrap();
        link.tts_tx
            .send(TtsEvent::SpeechStarted {
                text: Some("Hello.".into()),
            })
            .unwrap();
        link.tts_tx
            .send(TtsEvent::SpeechStarted { text: None })
            .unwrap();
        link.tts_tx
            .send(TtsEvent::SpeechStarted {
                text: Some("How can I help?".into()),
            })
            .unwrap();
        link.tts_tx.send(TtsEvent::SequenceCompleted).unwrap();
        vm.poll_events();

        let widgets = vm.transcript().snapshot();
        assert_eq!(widgets.len(), 1);
        assert!(widgets[0].closed);
        assert_eq!(widgets[0].text, "Hello. How can I help?");
    }

    #[test]
    fn volume_updates_scalar_without_touching_list() {
        let (link, mut vm) = view_model();

        link.stt_tx
            .send(SttEvent::VolumeChanged { rms_db: -21.5 })
            .unwrap();
        vm.poll_events();

        assert_eq!(vm.volume_rms_db(), -21.5);
        assert!(vm.transcript().is_empty());
    }

    #[test]
    fn button_click_reveals_and_toggles_recognition() {
        let (link, mut vm) = view_model();

        assert!(!vm.is_visible());
        vm.on_button_click();

        assert!(vm.is_visible());
        assert_eq!(
            link.command_rx.try_recv(),
            Ok(EngineCommand::ToggleRecognition)
        );
    }

    #[test]
    fn back_press_collapses_and_sends_standby() {
        let (link, mut vm) = view_model();
        vm.on_button_click();
        let _ = link.command_rx.try_recv();

        assert!(vm.on_back_pressed());
        assert!(!vm.is_visible());
        assert_eq!(link.command_rx.try_recv(), Ok(EngineCommand::Standby));

        // Hidden overlay does not consume back presses
        assert!(!vm.on_back_pressed());
    }

    #[test]
    fn engine_errors_leave_transcript_untouched() {
        let (link, mut vm) = view_model();

        link.stt_tx.send(SttEvent::RecognitionStarted).unwrap();
        link.error_tx
            .send(EngineError::Recognition("mic unavailable".into()))
            .unwrap();
        vm.poll_events();

        assert_eq!(vm.transcript().len(), 1);
        assert!(vm.transcript().snapshot()[0].is_open());
    }

    #[test]
    fn state_changes_are_observed() {
        let (link, mut vm) = view_model();

        link.state_tx.send(EngineState::Listening).unwrap();
        vm.poll_events();

        assert_eq!(vm.engine_state(), EngineState::Listening);
    }

    #[test]
    fn url_side_channel_round_trips() {
        let (_link, vm) = view_model();

        vm.open_url("https://example.com/docs");
        assert_eq!(vm.try_take_url().as_deref(), Some("https://example.com/docs"));
        assert!(vm.try_take_url().is_none());
    }

    #[test]
    fn capitalize_handles_unicode_and_empty() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("écoute bien"), "Écoute bien");
        assert_eq!(capitalize("Already"), "Already");
    }
}
