mod app;
mod config;
mod conversation;
mod event;
mod gateway;
mod logging;
mod theme;

use app::SyrusApp;
use clap::Parser;
use config::Config;
use eframe::egui;
use gateway::Dispatcher;
use std::sync::mpsc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_tracing();

    let config = Config::parse();
    let gateway = config.build_gateway()?;
    tracing::info!(
        backend = ?config.backend,
        gateway = gateway.name(),
        timeout_secs = ?config.timeout_secs,
        "starting SYRUS"
    );

    let (tx, rx) = mpsc::channel();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("syrus-runtime")
        .build()?;

    let dispatcher = Dispatcher::new(gateway, tx, runtime.handle().clone());
    let app = SyrusApp::new(rx, dispatcher);
    let _runtime = runtime;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("SYRUS")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([480.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SYRUS",
        native_options,
        Box::new(move |creation_context| {
            app.theme().apply_visuals(&creation_context.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}
