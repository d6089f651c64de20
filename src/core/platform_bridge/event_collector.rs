//=========================================================================
// Event Collector
//=========================================================================
//
// Per-frame drain of the platform channel.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → events + KeyboardState
//
// Draining is bounded so a flooding producer cannot starve the frame.
// Whatever is left stays queued for the next frame. The collector never
// blocks; frame pacing belongs to the caller.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::{InputEvent, KeyboardState};

//=== Constants ===========================================================

/// Upper bound of channel messages drained by one `collect_frame` call.
pub const MAX_EVENTS_PER_FRAME: usize = 100;

//=== EventCollector ======================================================

/// Collects platform events into the frame's discrete event list and
/// keeps the continuous keyboard snapshot in sync.
pub struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    events: Vec<InputEvent>,
    keyboard: KeyboardState,
    disconnected: bool,
}

impl EventCollector {
    pub fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            events: Vec::with_capacity(16),
            keyboard: KeyboardState::new(),
            disconnected: false,
        }
    }

    /// Drains pending platform messages into this frame's event list.
    ///
    /// Events from the previous frame are discarded first. `WindowClosed`
    /// and a disconnected channel both surface as `InputEvent::Quit`; the
    /// disconnect is reported once. Returns the number of events collected.
    pub fn collect_frame(&mut self) -> usize {
        self.events.clear();
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(message) => {
                    self.handle_message(message);
                    drained += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        info!("Platform channel disconnected, requesting quit");
                        self.disconnected = true;
                        self.events.push(InputEvent::Quit);
                    }
                    break;
                }
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!("Event queue backlog: drained {} messages this frame", drained);
        }

        self.events.len()
    }

    /// Events collected by the last `collect_frame`, in arrival order.
    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    /// Takes ownership of collected events, leaving an empty list.
    pub fn take_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Held-key snapshot after every event collected so far.
    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    fn handle_message(&mut self, message: PlatformEvent) {
        match message {
            PlatformEvent::Inputs(batch) => {
                for event in batch {
                    self.keyboard.apply(&event);
                    self.events.push(event);
                }
            }
            PlatformEvent::WindowClosed => self.events.push(InputEvent::Quit),
            PlatformEvent::FocusLost => {
                debug!("Focus lost, releasing held keys");
                self.keyboard.clear();
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
