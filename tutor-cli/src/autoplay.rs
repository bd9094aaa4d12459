use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tutor_core::PracticeDeck;
use tutor_core::collaborators::Playback;

use crate::terminal::{TerminalPlayback, render_card};

/// Flips through a shared deck on a timer until dropped.
pub struct Autoplay {
    handle: JoinHandle<()>,
}

impl Autoplay {
    pub fn start(
        deck: Arc<Mutex<PracticeDeck>>,
        interval: Duration,
        mut playback: TerminalPlayback,
        language: String,
    ) -> Self {
        // tokio rejects a zero period
        let interval = interval.max(Duration::from_millis(1));
        log::info!("Autoplay every {interval:?}");
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // the first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let mut deck = deck.lock().await;
                deck.advance_wrapping();
                println!("\n{}", render_card(&deck));
                if let Some(item) = deck.current() {
                    playback.speak(&item.script, &language);
                }
            }
        });
        Self { handle }
    }
}

impl Drop for Autoplay {
    fn drop(&mut self) {
        self.handle.abort();
        log::info!("Autoplay stopped");
    }
}
