// Application event channel.
// Merges terminal input, ticks, view updates, and toasts into one stream.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::controller::ViewUpdate;
use crate::notify::{NotificationSink, Toast};

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Terminal key press.
    Key(KeyEvent),
    /// Terminal resized.
    Resize,
    /// Periodic tick for toast expiry and the loading spinner.
    Tick,
    /// A collection changed and should be redrawn.
    View(ViewUpdate),
    /// A notification from background work.
    Toast(Toast),
}

pub type EventSender = mpsc::UnboundedSender<Event>;

impl NotificationSink for EventSender {
    fn notify(&self, toast: Toast) {
        // A closed channel means the UI is gone; nobody is left to notify.
        let _ = self.send(Event::Toast(toast));
    }
}

/// Event handler that produces events from terminal input and a tick timer.
pub struct EventHandler {
    tx: EventSender,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a handler without a terminal reader.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Start reading terminal input on a blocking thread.
    pub fn spawn_terminal_reader(&self, tick_rate: Duration) {
        let tx = self.tx.clone();

        tokio::task::spawn_blocking(move || {
            loop {
                let event = match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            Event::Key(key)
                        }
                        Ok(CrosstermEvent::Resize(..)) => Event::Resize,
                        Ok(_) => continue,
                        Err(e) => {
                            tracing::error!(error = %e, "failed reading terminal event");
                            break;
                        }
                    },
                    Ok(false) => Event::Tick,
                    Err(e) => {
                        tracing::error!(error = %e, "failed polling terminal");
                        break;
                    }
                };

                if tx.send(event).is_err() {
                    break;
                }
            }
        });
    }

    /// Sender for background producers.
    pub fn sender(&self) -> EventSender {
        self.tx.clone()
    }

    /// Receive the next event.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
