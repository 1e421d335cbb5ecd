//! Boundary types for the external voice engine
//!
//! The engine itself (speech recognition, synthesis, wake word, dialog
//! state machine) lives outside this crate. Everything it publishes to the
//! overlay, and everything the overlay sends back, goes through the channel
//! bundle defined here.

pub mod scripted;

use crossbeam_channel::{bounded, Receiver, Sender};
use thiserror::Error;
use tracing::debug;

/// High-level state of the voice engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Waiting for activation
    Standby,
    /// Microphone open, recognizing speech
    Listening,
    /// Recognition finished, waiting for a response
    Processing,
    /// Playing back a synthesized response
    Speaking,
}

/// Speech recognition lifecycle events
#[derive(Debug, Clone, PartialEq)]
pub enum SttEvent {
    /// A new recognition attempt began
    RecognitionStarted,
    /// Intermediate hypothesis for the current attempt
    PartialResult { text: String },
    /// Final text for the current attempt
    FinalResult { text: String },
    /// The attempt finished without recognizing anything
    EmptyResult,
    /// The attempt was cancelled before completion
    Cancelled,
    /// Microphone input level changed (visual feedback side channel)
    VolumeChanged { rms_db: f32 },
}

/// Speech synthesis lifecycle events
#[derive(Debug, Clone, PartialEq)]
pub enum TtsEvent {
    /// A new sequence of utterances began
    SequenceStarted,
    /// One utterance within the sequence started playing.
    /// `text` is `None` for non-text speech (audio-only chunks).
    SpeechStarted { text: Option<String> },
    /// The whole sequence finished
    SequenceCompleted,
}

/// Errors published on the engine's exception stream
#[derive(Error, Debug, Clone)]
pub enum EngineError {
    #[error("recognition error: {0}")]
    Recognition(String),

    #[error("synthesis error: {0}")]
    Synthesis(String),

    #[error("dialog error: {0}")]
    Dialog(String),
}

/// Commands the overlay sends back to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    /// Start recognition, or stop it if already listening
    ToggleRecognition,
    /// Stop everything and return to standby
    Standby,
}

/// Consumer half of the engine boundary, owned by the view-model
pub struct EngineHandle {
    pub state_rx: Receiver<EngineState>,
    pub error_rx: Receiver<EngineError>,
    pub stt_rx: Receiver<SttEvent>,
    pub tts_rx: Receiver<TtsEvent>,
    pub command_tx: Sender<EngineCommand>,
}

impl EngineHandle {
    /// Ask the engine to return to standby. Failure means the engine is
    /// already gone, which is fine during teardown.
    pub fn standby(&self) {
        if self.command_tx.send(EngineCommand::Standby).is_err() {
            debug!("engine command channel closed, standby not delivered");
        }
    }

    pub fn toggle_recognition(&self) {
        if self.command_tx.send(EngineCommand::ToggleRecognition).is_err() {
            debug!("engine command channel closed, toggle not delivered");
        }
    }
}

/// Producer half of the engine boundary, handed to the engine implementation
pub struct EngineLink {
    pub state_tx: Sender<EngineState>,
    pub error_tx: Sender<EngineError>,
    pub stt_tx: Sender<SttEvent>,
    pub tts_tx: Sender<TtsEvent>,
    pub command_rx: Receiver<EngineCommand>,
}

impl EngineLink {
    /// Publish a volume sample, dropping it if the overlay is not keeping
    /// up. Volume is feedback only, so losing samples is harmless.
    pub fn publish_volume(&self, rms_db: f32) {
        let _ = self.stt_tx.try_send(SttEvent::VolumeChanged { rms_db });
    }
}

/// Build the bounded channel bundle connecting an engine to the overlay.
///
/// The STT channel gets extra capacity because volume samples arrive at a
/// much higher rate than lifecycle events.
pub fn engine_channels(buffer_size: usize) -> (EngineLink, EngineHandle) {
    let (state_tx, state_rx) = bounded(buffer_size);
    let (error_tx, error_rx) = bounded(buffer_size);
    let (stt_tx, stt_rx) = bounded(buffer_size * 16);
    let (tts_tx, tts_rx) = bounded(buffer_size);
    let (command_tx, command_rx) = bounded(buffer_size);

    (
        EngineLink {
            state_tx,
            error_tx,
            stt_tx,
            tts_tx,
            command_rx,
        },
        EngineHandle {
            state_rx,
            error_rx,
            stt_rx,
            tts_rx,
            command_tx,
        },
    )
}
