//! Async event loop for hosts with a tokio runtime.
//!
//! A single task owns the simulator. Inputs and audio notifications arrive
//! over a channel; between them the loop sleeps until the next due tick.
//! Everything is processed on that one task, in arrival order.

use crate::audio::{AudioHandle, Clip};
use crate::core::{Action, Readout};
use crate::engine::{EngineSimulator, Event};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info};

/// Messages accepted by [`run`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Input(Action),
    ClipFinished(Clip),
    Shutdown,
}

/// Cloneable sender half used by input and audio callbacks.
#[derive(Clone, Debug)]
pub struct EngineHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl EngineHandle {
    /// Returns false once the loop has stopped.
    pub fn send(&self, command: Command) -> bool {
        self.tx.send(command).is_ok()
    }

    pub fn press(&self) -> bool {
        self.send(Command::Input(Action::Press))
    }

    pub fn release(&self) -> bool {
        self.send(Command::Input(Action::Release))
    }

    pub fn reset(&self) -> bool {
        self.send(Command::Input(Action::Reset))
    }

    pub fn clip_finished(&self, clip: Clip) -> bool {
        self.send(Command::ClipFinished(clip))
    }

    pub fn shutdown(&self) -> bool {
        self.send(Command::Shutdown)
    }
}

/// Create a handle and the receiver [`run`] consumes.
pub fn channel() -> (EngineHandle, mpsc::UnboundedReceiver<Command>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EngineHandle { tx }, rx)
}

enum Wake {
    Tick,
    Command(Option<Command>),
}

/// Drive `sim` until shutdown or until every handle is dropped.
///
/// `render` is called after every tick and every command. The simulator is
/// shut down (timer disarmed, audio silenced) and returned on exit.
pub async fn run<A, R>(
    mut sim: EngineSimulator<A>,
    mut rx: mpsc::UnboundedReceiver<Command>,
    mut render: R,
) -> EngineSimulator<A>
where
    A: AudioHandle,
    R: FnMut(&Readout),
{
    info!(state = %sim.state(), "engine loop started");
    render(&sim.readout());
    let mut last = Instant::now();

    loop {
        let wake = match sim.until_next_tick() {
            Some(wait) => tokio::select! {
                command = rx.recv() => Wake::Command(command),
                _ = tokio::time::sleep(wait) => Wake::Tick,
            },
            None => Wake::Command(rx.recv().await),
        };

        let now = Instant::now();
        sim.handle(Event::Elapsed(now.duration_since(last)));
        last = now;

        match wake {
            Wake::Tick => {}
            Wake::Command(Some(Command::Input(action))) => sim.handle(Event::Input(action)),
            Wake::Command(Some(Command::ClipFinished(clip))) => {
                sim.handle(Event::ClipFinished(clip))
            }
            Wake::Command(Some(Command::Shutdown)) => break,
            Wake::Command(None) => {
                debug!("all engine handles dropped");
                break;
            }
        }

        render(&sim.readout());
    }

    sim.shutdown();
    info!(state = %sim.state(), "engine loop stopped");
    sim
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioBank, HeadlessClip};
    use crate::builder::EngineConfig;
    use crate::core::EngineState;
    use std::time::Duration;

    fn engine() -> EngineSimulator<HeadlessClip> {
        EngineSimulator::new(
            EngineConfig::default(),
            AudioBank::from_fn(|_| HeadlessClip::new()),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn loop_heats_while_held_and_stops_on_shutdown() {
        let (handle, rx) = channel();

        let script = async {
            handle.press();
            tokio::time::sleep(Duration::from_millis(1_100)).await;
            handle.release();
            tokio::time::sleep(Duration::from_millis(50)).await;
            handle.shutdown();
        };

        let (sim, ()) = tokio::join!(run(engine(), rx, |_| {}), script);

        assert_eq!(sim.state(), EngineState::CoolingDown);
        assert_eq!(sim.temperature(), 5.0);
        assert!(!sim.timer().is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_every_handle_ends_the_loop() {
        let (handle, rx) = channel();
        drop(handle);

        let sim = run(engine(), rx, |_| {}).await;
        assert_eq!(sim.state(), EngineState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn render_sees_each_frame() {
        let (handle, rx) = channel();
        let mut frames = Vec::new();

        let script = async {
            handle.press();
            tokio::time::sleep(Duration::from_millis(450)).await;
            handle.shutdown();
        };

        let (_sim, ()) = tokio::join!(run(engine(), rx, |r| frames.push(r.clone())), script);

        assert_eq!(frames.first().unwrap().state, EngineState::Idle);
        assert!(frames.iter().any(|r| r.fill_percent == 2));
        assert!(frames.iter().all(|r| r.state != EngineState::Exploded));
    }
}
