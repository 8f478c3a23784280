//! Background event handling.
//!
//! Window events that change the scene are forwarded to a tokio task over a
//! bounded channel. The task owns nothing but a handle to [`SharedScene`]; it
//! moves the card on arrow key presses and releases and re-derives the projection when the
//! framebuffer is resized. The render loop reads both every frame.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::{
    runtime::Handle,
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
};

use crate::{
    camera::Projection,
    data_structures::object::Transform,
    input::{Key, arrow_delta},
};

/// Events the background task reacts to.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    /// Text produced by a key press.
    Typed(String),
    Key { key: Key, pressed: bool },
    FramebufferResized { width: u32, height: u32 },
}

/// Scene state shared between the event task and the render loop.
#[derive(Debug)]
pub struct SharedScene {
    card: Mutex<Transform>,
    projection: Mutex<Projection>,
}

impl SharedScene {
    pub fn new(card: Transform, projection: Projection) -> Self {
        Self {
            card: Mutex::new(card),
            projection: Mutex::new(projection),
        }
    }

    pub fn card(&self) -> MutexGuard<'_, Transform> {
        self.card.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn projection(&self) -> MutexGuard<'_, Projection> {
        self.projection.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Apply one event to the shared scene.
pub fn handle_event(scene: &SharedScene, move_step: f32, event: SceneEvent) {
    match event {
        SceneEvent::Typed(text) => log::info!("Pressed {:?}", text),
        // Presses and releases both move the card, so a tap moves it twice.
        SceneEvent::Key { key, pressed } => {
            let delta = arrow_delta(key, move_step);
            if delta.x != 0.0 || delta.z != 0.0 {
                let mut card = scene.card();
                card.nudge(delta);
                log::debug!(
                    "card moved to ({}, {}) on {}",
                    card.pos.x,
                    card.pos.z,
                    if pressed { "press" } else { "release" }
                );
            }
        }
        SceneEvent::FramebufferResized { width, height } => {
            let mut projection = scene.projection();
            projection.resize(width, height);
            drop(projection);
            log::debug!("projection updated for {}x{}", width, height);
        }
    }
}

/// Sending half of the event channel plus the task draining it.
#[derive(Debug)]
pub struct EventHandler {
    sender: mpsc::Sender<SceneEvent>,
    task: JoinHandle<()>,
}

impl EventHandler {
    /// Spawn the draining task on `runtime`.
    ///
    /// The task ends once every sender is dropped.
    pub fn spawn(
        runtime: &Handle,
        scene: Arc<SharedScene>,
        move_step: f32,
        capacity: usize,
    ) -> Self {
        let (sender, mut receiver) = mpsc::channel(capacity.max(1));
        let task = runtime.spawn(async move {
            while let Some(event) = receiver.recv().await {
                handle_event(&scene, move_step, event);
            }
            log::debug!("event channel closed");
        });
        Self { sender, task }
    }

    /// Queue an event without blocking the window thread.
    ///
    /// Returns `false` when the event was dropped.
    pub fn send(&self, event: SceneEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                log::warn!("event queue full, dropping {:?}", event);
                false
            }
            Err(TrySendError::Closed(_)) => {
                log::error!("event task is gone");
                false
            }
        }
    }

    /// Close the channel and wait for the task to drain it.
    pub async fn shutdown(self) {
        let Self { sender, task } = self;
        drop(sender);
        if let Err(e) = task.await {
            log::error!("event task failed: {}", e);
        }
    }
}
