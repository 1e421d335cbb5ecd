//! End-to-end view-model tests
//!
//! Drives the assistant view-model through the engine boundary with full
//! conversation scripts, the way a real engine would, and checks the shape
//! of the resulting transcript.

use sibyl::assistant::AssistantViewModel;
use sibyl::engine::{
    engine_channels, EngineCommand, EngineLink, EngineState, SttEvent, TtsEvent,
};
use sibyl::transcript::WidgetKind;

fn setup() -> (EngineLink, AssistantViewModel) {
    let (link, handle) = engine_channels(16);
    (link, AssistantViewModel::new(handle, true))
}

/// Replay one full user turn into the STT stream.
fn recognize(link: &EngineLink, partials: &[&str], final_text: &str) {
    link.stt_tx.send(SttEvent::RecognitionStarted).unwrap();
    for partial in partials {
        link.stt_tx
            .send(SttEvent::PartialResult {
                text: (*partial).to_string(),
            })
            .unwrap();
    }
    link.stt_tx
        .send(SttEvent::FinalResult {
            text: final_text.to_string(),
        })
        .unwrap();
}

/// Replay one spoken reply into the TTS stream.
fn speak(link: &EngineLink, chunks: &[&str]) {
    link.tts_tx.send(TtsEvent::SequenceStarted).unwrap();
    for chunk in chunks {
        link.tts_tx
            .send(TtsEvent::SpeechStarted {
                text: Some((*chunk).to_string()),
            })
            .unwrap();
    }
    link.tts_tx.send(TtsEvent::SequenceCompleted).unwrap();
}

#[test]
fn full_conversation_produces_alternating_closed_widgets() {
    let (link, mut vm) = setup();

    recognize(&link, &["what", "what time"], "what time is it");
    speak(&link, &["It is half past three."]);
    recognize(&link, &["thanks"], "thanks");
    speak(&link, &["Any time!"]);
    vm.poll_events();

    let widgets = vm.transcript().snapshot();
    assert_eq!(widgets.len(), 4);
    assert!(widgets.iter().all(|w| w.closed));

    assert_eq!(widgets[0].kind, WidgetKind::Recognition);
    assert_eq!(widgets[0].text, "What time is it");
    assert_eq!(widgets[1].kind, WidgetKind::Speech);
    assert_eq!(widgets[1].text, "It is half past three.");
    assert_eq!(widgets[2].kind, WidgetKind::Recognition);
    assert_eq!(widgets[2].text, "Thanks");
    assert_eq!(widgets[3].kind, WidgetKind::Speech);
    assert_eq!(widgets[3].text, "Any time!");
}

#[test]
fn abandoned_recognition_disappears_from_history() {
    let (link, mut vm) = setup();

    recognize(&link, &["hello"], "hello there");
    link.stt_tx.send(SttEvent::RecognitionStarted).unwrap();
    link.stt_tx
        .send(SttEvent::PartialResult {
            text: "mumb".to_string(),
        })
        .unwrap();
    link.stt_tx.send(SttEvent::EmptyResult).unwrap();
    vm.poll_events();

    let widgets = vm.transcript().snapshot();
    assert_eq!(widgets.len(), 1);
    assert_eq!(widgets[0].text, "Hello there");
}

#[test]
fn recognition_open_while_speech_arrives_stays_open() {
    let (link, mut vm) = setup();

    // The engine may start speaking a prompt while still listening
    link.stt_tx.send(SttEvent::RecognitionStarted).unwrap();
    speak(&link, &["Go ahead, I'm listening."]);
    vm.poll_events();

    let widgets = vm.transcript().snapshot();
    assert_eq!(widgets.len(), 2);
    assert_eq!(widgets[0].kind, WidgetKind::Recognition);
    assert!(widgets[0].is_open());
    assert_eq!(widgets[1].kind, WidgetKind::Speech);
    assert!(widgets[1].closed);
}

#[test]
fn cancelling_mid_speech_removes_only_the_recognition_widget() {
    let (link, mut vm) = setup();

    link.stt_tx.send(SttEvent::RecognitionStarted).unwrap();
    link.tts_tx.send(TtsEvent::SequenceStarted).unwrap();
    link.stt_tx.send(SttEvent::Cancelled).unwrap();
    vm.poll_events();

    let widgets = vm.transcript().snapshot();
    assert_eq!(widgets.len(), 1);
    assert_eq!(widgets[0].kind, WidgetKind::Speech);
}

#[test]
fn events_within_a_stream_fold_in_arrival_order() {
    let (link, mut vm) = setup();

    link.stt_tx.send(SttEvent::RecognitionStarted).unwrap();
    for i in 1..=20 {
        link.stt_tx
            .send(SttEvent::PartialResult {
                text: format!("word{i}"),
            })
            .unwrap();
    }
    vm.poll_events();

    // Only the latest partial survives; earlier ones were overwritten
    let widgets = vm.transcript().snapshot();
    assert_eq!(widgets.len(), 1);
    assert_eq!(widgets[0].text, "Word20");
    assert!(widgets[0].is_open());
}

#[test]
fn polling_between_turns_gives_same_result_as_polling_once() {
    let (link, mut vm) = setup();

    recognize(&link, &[], "first");
    vm.poll_events();
    speak(&link, &["Second."]);
    vm.poll_events();
    vm.poll_events();

    let widgets = vm.transcript().snapshot();
    assert_eq!(widgets.len(), 2);
    assert_eq!(widgets[0].text, "First");
    assert_eq!(widgets[1].text, "Second.");
}

#[test]
fn interaction_flow_matches_engine_contract() {
    let (link, mut vm) = setup();

    // First tap reveals and toggles recognition
    vm.on_button_click();
    assert!(vm.is_visible());
    assert_eq!(
        link.command_rx.try_recv(),
        Ok(EngineCommand::ToggleRecognition)
    );

    // Second tap only toggles; visibility is unchanged
    vm.on_button_click();
    assert!(vm.is_visible());
    assert_eq!(
        link.command_rx.try_recv(),
        Ok(EngineCommand::ToggleRecognition)
    );

    // Back collapses and parks the engine
    assert!(vm.on_back_pressed());
    assert_eq!(link.command_rx.try_recv(), Ok(EngineCommand::Standby));

    // Shutdown sends one more standby for teardown
    vm.shutdown();
    assert_eq!(link.command_rx.try_recv(), Ok(EngineCommand::Standby));
}

#[test]
fn dropping_the_view_model_tears_down_subscriptions() {
    let (link, vm) = setup();
    drop(vm);

    assert!(link.stt_tx.send(SttEvent::RecognitionStarted).is_err());
    assert!(link.state_tx.send(EngineState::Listening).is_err());
}

#[test]
fn volume_stream_is_a_pure_side_channel() {
    let (link, mut vm) = setup();

    for i in 0..100 {
        link.publish_volume(-50.0 + i as f32 * 0.5);
    }
    recognize(&link, &[], "still works");
    vm.poll_events();

    assert_eq!(vm.volume_rms_db(), -0.5);
    assert_eq!(vm.transcript().len(), 1);
}
