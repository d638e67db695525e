//! Headless Rev Session
//!
//! Drives an engine through the tokio event loop with silent audio clips:
//! a short rev, a cool-down, then holding until the engine blows and a
//! replacement is fitted.
//!
//! Run with: RUST_LOG=rev_engine=debug cargo run --example headless_rev

use rev_engine::audio::{AudioBank, Clip, HeadlessClip};
use rev_engine::builder::SimulatorBuilder;
use rev_engine::core::Readout;
use rev_engine::runtime;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

fn draw(readout: &Readout) {
    let filled = usize::from(readout.fill_percent) / 5;
    println!(
        "[{:<20}] {:>5} {:<14} {}",
        "#".repeat(filled),
        readout.temperature_label,
        readout.status,
        readout.reset_label().unwrap_or("")
    );
}

#[tokio::main]
async fn main() {
    init_tracing();

    let sim = SimulatorBuilder::new()
        .audio(AudioBank::from_fn(|_| HeadlessClip::new()))
        .tune(|c| c.heat_step = 10.0)
        .build()
        .expect("default audio and tuned config are valid");

    let (handle, rx) = runtime::channel();

    let script = async {
        println!("=== Short rev ===");
        handle.press();
        tokio::time::sleep(Duration::from_millis(700)).await;
        handle.clip_finished(Clip::RevUp);
        tokio::time::sleep(Duration::from_millis(300)).await;
        handle.release();
        tokio::time::sleep(Duration::from_millis(400)).await;
        handle.clip_finished(Clip::RevDown);

        println!("\n=== Hold until it blows ===");
        handle.press();
        tokio::time::sleep(Duration::from_secs(3)).await;

        println!("\n=== Replace engine ===");
        handle.reset();
        tokio::time::sleep(Duration::from_millis(250)).await;
        handle.shutdown();
    };

    let (sim, ()) = tokio::join!(runtime::run(sim, rx, draw), script);

    println!("\nTransitions:");
    for transition in sim.history().transitions() {
        println!(
            "  {:<12} -> {:<12} on {:<16} at {:>5.1}°C",
            transition.from.name(),
            transition.to.name(),
            transition.trigger.name(),
            transition.temperature
        );
    }
}
