use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Tick,
}

/// Polls the terminal from a background task and forwards key presses.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    shutdown_tx: mpsc::UnboundedSender<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, mut shutdown_rx) = mpsc::unbounded_channel::<()>();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(tick_rate);
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    _ = ticker.tick() => {
                        let keys = drain_keys();
                        let events: Vec<Event> = if keys.is_empty() {
                            vec![Event::Tick]
                        } else {
                            keys.into_iter().map(Event::Key).collect()
                        };
                        if events.into_iter().any(|e| tx.send(e).is_err()) {
                            break;
                        }
                    }
                }
            }
        });

        Self { rx, shutdown_tx }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// Key presses already queued by the terminal. Releases and repeats are
/// dropped so each physical press is handled once.
fn drain_keys() -> Vec<KeyEvent> {
    let mut keys = Vec::new();
    while event::poll(Duration::ZERO).unwrap_or(false) {
        match event::read() {
            Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => keys.push(key),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Failed to read terminal event: {}", e);
                break;
            }
        }
    }
    keys
}
