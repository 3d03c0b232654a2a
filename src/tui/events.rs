//! Background terminal event reader.

use super::keys::{KeyInput, ViewerEvent};
use crossterm::event::{self, Event as CrosstermEvent};
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Events delivered to the main loop.
pub enum Event {
    Input(ViewerEvent),
    Tick,
}

/// Reads terminal events on a background thread and forwards them over a
/// channel. The thread exits once the receiver is dropped.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    #[must_use]
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            let event = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(CrosstermEvent::Key(key)) => {
                        KeyInput::from_event(key).map(|k| Event::Input(ViewerEvent::Key(k)))
                    }
                    Ok(CrosstermEvent::Mouse(mouse)) => {
                        ViewerEvent::from_mouse(mouse).map(Event::Input)
                    }
                    Ok(CrosstermEvent::Resize(width, height)) => {
                        Some(Event::Input(ViewerEvent::Resize { width, height }))
                    }
                    _ => None,
                }
            } else {
                Some(Event::Tick)
            };

            if let Some(event) = event {
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Block until the next event.
    pub fn next(&self) -> io::Result<Event> {
        self.rx.recv().map_err(io::Error::other)
    }
}
