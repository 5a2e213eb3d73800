//! Terminal browser for MBTA routes, stops, directions, and live arrival
//! predictions.

mod app;
mod items;
mod list;
mod ui;

use std::sync::Arc;

use crossterm::event::EventStream;
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;

use mbta_transit::{MbtaClient, TransitApi};

use crate::app::App;

/// Stdout belongs to the TUI, so logs go to a file, and only when asked.
fn init_tracing() {
    let Ok(path) = std::env::var("MBTA_TUI_LOG") else {
        return;
    };
    let Ok(file) = std::fs::File::create(&path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    init_tracing();

    // The API serves anonymous requests; a key only raises the rate limit.
    let api_key = std::env::var("MBTA_API_KEY").ok().filter(|k| !k.is_empty());
    let client: Arc<dyn TransitApi> = Arc::new(MbtaClient::new(api_key));

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, client).await;
    ratatui::restore();
    result
}

async fn run(terminal: &mut DefaultTerminal, client: Arc<dyn TransitApi>) -> eyre::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(client, tx);
    app.start();

    let mut events = EventStream::new();
    while !app.should_quit() {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(event)) => app.on_event(event),
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
            message = rx.recv() => {
                // The app holds a sender for dispatching fetches, so the
                // channel never closes while it is alive.
                if let Some(message) = message {
                    app.on_message(message);
                }
            }
        }
    }

    Ok(())
}
