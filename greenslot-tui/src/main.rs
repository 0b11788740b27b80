//! Terminal UI for estimating garden jobs and booking visits with greenslot.

mod app;
mod input;
mod ui;

use std::{io, path::PathBuf, sync::Arc, time::Duration as StdDuration};

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use greenslot_core::{
    config::Config,
    service::{BookingService, SlotsOutcome, SubmitOutcome},
};
use greenslot_provider_sheets as sheets;
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::app::{App, Screen};
use crate::input::Action;

/// A finished availability query, delivered back to the event loop.
struct SlotsLoaded {
    ticket: u64,
    date: NaiveDate,
    outcome: SlotsOutcome,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config_path = std::env::var("GREENSLOT_CONFIG")
        .map_or_else(|_| PathBuf::from("greenslot.toml"), PathBuf::from);
    let config = Config::load(&config_path);

    if config.backend.endpoint.is_empty() {
        bail!(
            "backend.endpoint is not set; create greenslot.toml or point GREENSLOT_CONFIG at one"
        );
    }
    if config.business.whatsapp.is_empty() {
        bail!("business.whatsapp is not set; bookings could not be confirmed over WhatsApp");
    }

    // HTTP + service setup; the timeout covers both availability queries
    // and booking submissions.
    let client = Client::builder()
        .user_agent("greenslot/0.1")
        .timeout(config.backend.request_timeout())
        .build()?;

    let (availability, booking) = sheets::ports(client, &config.backend);
    let service = Arc::new(BookingService::new(availability, booking, config));

    // App state
    let today = Local::now().date_naive();
    let app = App::new(service, today);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// Log to a file when `GREENSLOT_LOG` names one; stdout belongs to the TUI.
fn init_tracing() -> Result<()> {
    if let Ok(path) = std::env::var("GREENSLOT_LOG") {
        let file = std::fs::File::create(&path)
            .with_context(|| format!("creating log file {path}"))?;
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(file)
            .with_ansi(false)
            .init();
    }
    Ok(())
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    let (slots_tx, mut slots_rx) = mpsc::unbounded_channel::<SlotsLoaded>();

    loop {
        // Apply finished availability queries; stale ones are discarded.
        while let Ok(loaded) = slots_rx.try_recv() {
            app.apply_slots(loaded.ticket, loaded.date, loaded.outcome);
        }

        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let action = input::handle_key_event(key, &mut app);

            match action {
                Action::Quit => break,
                Action::None => {}
                Action::LoadSlots => spawn_slot_query(&app, &slots_tx),
                Action::Submit => submit(terminal, &mut app).await?,
            }
        }
    }

    Ok(())
}

/// Start a background availability query for the app's current date. The
/// ticket makes the query supersede any still in flight.
fn spawn_slot_query(app: &App, slots_tx: &UnboundedSender<SlotsLoaded>) {
    let service = Arc::clone(&app.service);
    let slots_tx = slots_tx.clone();
    let ticket = app.sequence.begin();
    let date = app.date;

    tokio::spawn(async move {
        let outcome = service.slots_for(date).await;
        slots_tx
            .send(SlotsLoaded {
                ticket,
                date,
                outcome,
            })
            .ok();
    });
}

/// One submission per activation; the form stays usable after any failure.
async fn submit(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let request = app.booking_request();

    app.status = None;
    app.is_loading = true;
    terminal.draw(|frame| ui::draw(frame, app))?;

    let result = app.service.submit(&request).await;
    app.is_loading = false;

    match result {
        Ok(SubmitOutcome::Confirmed(confirmation)) => {
            app.confirmation = Some(confirmation);
            app.screen = Screen::Confirmed;
        }
        Ok(SubmitOutcome::Rejected { reason, refreshed }) => {
            // The service re-queried availability for the submitted date;
            // take a fresh ticket so the refreshed list wins over any
            // older in-flight query.
            app.status = Some(reason);
            let ticket = app.sequence.begin();
            app.apply_slots(ticket, request.date, refreshed);
        }
        Err(err) => {
            tracing::warn!("booking submission failed: {err}");
            app.status = Some(err.to_string());
        }
    }

    Ok(())
}
