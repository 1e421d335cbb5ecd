//! Scripted engine for headless runs and demos
//!
//! Replays a canned conversation into an [`EngineLink`] so the overlay can
//! be exercised without a microphone or a real voice backend.

use super::{EngineCommand, EngineLink, EngineState, SttEvent, TtsEvent};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};

/// One user turn and the assistant's reply, spoken as separate utterances.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub user: &'static str,
    pub reply: &'static [&'static str],
}

/// Default conversation used by the demo binary.
pub fn demo_script() -> Vec<Exchange> {
    vec![
        Exchange {
            user: "what is the weather like today",
            reply: &["It is sunny and 22 degrees.", "No rain expected until Friday."],
        },
        Exchange {
            user: "set a timer for ten minutes",
            reply: &["Timer set for ten minutes."],
        },
        Exchange {
            user: "thank you",
            reply: &["You're welcome!"],
        },
    ]
}

/// Plays scripted exchanges whenever the overlay toggles recognition.
pub struct ScriptedEngine {
    link: EngineLink,
    script: Vec<Exchange>,
    /// Delay between partial results
    partial_interval: Duration,
}

impl ScriptedEngine {
    pub fn new(link: EngineLink, script: Vec<Exchange>) -> Self {
        Self {
            link,
            script,
            partial_interval: Duration::from_millis(250),
        }
    }

    /// Spawn the playback thread. It exits when the overlay drops its
    /// command sender.
    pub fn spawn(self) -> std::io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("scripted-engine".into())
            .spawn(move || self.run())
    }

    fn run(mut self) {
        info!("scripted engine ready, {} exchanges", self.script.len());
        let mut next = 0usize;

        while let Ok(command) = self.link.command_rx.recv() {
            match command {
                EngineCommand::ToggleRecognition => {
                    if self.script.is_empty() {
                        continue;
                    }
                    let exchange = self.script[next % self.script.len()].clone();
                    next += 1;
                    if !self.play(&exchange) {
                        debug!("scripted engine: overlay went away mid-exchange");
                        return;
                    }
                }
                EngineCommand::Standby => {
                    // Already idle between exchanges
                }
            }
        }
        debug!("scripted engine: command channel closed");
    }

    /// Play one exchange. Returns false if the overlay disconnected.
    fn play(&self, exchange: &Exchange) -> bool {
        if self.link.state_tx.send(EngineState::Listening).is_err() {
            return false;
        }
        if self.link.stt_tx.send(SttEvent::RecognitionStarted).is_err() {
            return false;
        }

        // Build up the utterance word by word, as a streaming recognizer
        // would, with a wobbling volume level alongside.
        let words: Vec<&str> = exchange.user.split_whitespace().collect();
        for i in 1..=words.len() {
            if self.interrupted() {
                let _ = self.link.stt_tx.send(SttEvent::Cancelled);
                let _ = self.link.state_tx.send(EngineState::Standby);
                return true;
            }

            let rms_db = -38.0 + 10.0 * ((i as f32) * 0.9).sin();
            self.link.publish_volume(rms_db);

            let text = words[..i].join(" ");
            if self.link.stt_tx.send(SttEvent::PartialResult { text }).is_err() {
                return false;
            }
            thread::sleep(self.partial_interval);
        }

        let final_text = exchange.user.to_string();
        if self
            .link
            .stt_tx
            .send(SttEvent::FinalResult { text: final_text })
            .is_err()
        {
            return false;
        }

        let _ = self.link.state_tx.send(EngineState::Processing);
        thread::sleep(Duration::from_millis(400));

        // Speak the reply
        if self.link.state_tx.send(EngineState::Speaking).is_err() {
            return false;
        }
        if self.link.tts_tx.send(TtsEvent::SequenceStarted).is_err() {
            return false;
        }
        for chunk in exchange.reply {
            if self
                .link
                .tts_tx
                .send(TtsEvent::SpeechStarted {
                    text: Some((*chunk).to_string()),
                })
                .is_err()
            {
                return false;
            }
            // Rough playback time per utterance
            thread::sleep(Duration::from_millis(40 * chunk.len().min(30) as u64));
        }
        if self.link.tts_tx.send(TtsEvent::SequenceCompleted).is_err() {
            return false;
        }

        self.link.state_tx.send(EngineState::Standby).is_ok()
    }

    /// A Standby command arriving mid-exchange cancels it.
    fn interrupted(&self) -> bool {
        matches!(self.link.command_rx.try_recv(), Ok(EngineCommand::Standby))
    }
}
