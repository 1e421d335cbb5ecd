use anyhow::Result;
use sibyl::assistant::AssistantViewModel;
use sibyl::config::AssistantConfig;
use sibyl::engine::engine_channels;
use sibyl::engine::scripted::{demo_script, ScriptedEngine};
use sibyl::permission::StaticPermission;
use sibyl::ui::AssistantApp;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sibyl=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Sibyl assistant overlay");

    let config = AssistantConfig::default();
    config.validate()?;

    // The demo runs against a scripted engine; a real host hands the
    // EngineLink to its voice backend instead.
    let (link, handle) = engine_channels(config.channel_buffer);
    ScriptedEngine::new(link, demo_script()).spawn()?;

    let view_model = AssistantViewModel::new(handle, config.capitalize_recognition);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 640.0])
            .with_min_inner_size([320.0, 480.0])
            .with_title("Sibyl"),
        ..Default::default()
    };

    eframe::run_native(
        "Sibyl",
        options,
        Box::new(move |cc| {
            Ok(Box::new(AssistantApp::new(
                cc,
                view_model,
                Box::new(StaticPermission::granted()),
                config,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
