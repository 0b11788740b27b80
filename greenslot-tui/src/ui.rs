use greenslot_core::estimate::ESTIMATE_NOTE;
use greenslot_core::service::SlotsOutcome;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{App, BookingField, EstimateField, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    // Title / header
    let header = Paragraph::new("greenslot – garden job estimates & bookings")
        .block(Block::default().borders(Borders::ALL).title("Greenslot"));
    frame.render_widget(header, *header_area);

    // Main screen
    match app.screen {
        Screen::Estimate => draw_estimate(frame, app, *content_area),
        Screen::Booking => draw_booking(frame, app, *content_area),
        Screen::Confirmed => draw_confirmed(frame, app, *content_area),
    }

    // Status bar
    let nav_hint = match app.screen {
        Screen::Estimate => "↑/↓ move · ←/→ change · Enter estimate · Tab book · q/Ctrl-C quit",
        Screen::Booking => {
            "↑/↓/←/→ move · ←/→ date/time · type to edit · Enter next/submit · Esc back · Ctrl-C quit"
        }
        Screen::Confirmed => "Enter/b book another · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(msg) = &app.status {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.status.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_estimate(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // option rows
            Constraint::Min(0),    // computed estimate
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [form_area, result_area] = chunks else {
        return;
    };

    let request = app.estimate_request();
    let focused = app.current_estimate_field();

    let rows = [
        (EstimateField::Job, "Job", request.job.to_string()),
        (EstimateField::Size, "Size", request.size.to_string()),
        (EstimateField::Access, "Access", request.access.to_string()),
        (EstimateField::Waste, "Waste", request.waste.to_string()),
    ];

    let items = rows
        .into_iter()
        .map(|(field, label, value)| {
            let prefix = if field == focused { "> " } else { "  " };
            let item = ListItem::new(format!("{prefix}{label}: {value}"));
            if field == focused {
                item.style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item
            }
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Describe the job (↑/↓, ←/→, Enter)"),
    );

    let mut state = ListState::default();
    state.select(Some(app.estimate_field));
    frame.render_stateful_widget(list, *form_area, &mut state);

    let result_text = match &app.last_estimate {
        Some(result) => format!("Estimated price: {result}\n\n{ESTIMATE_NOTE}"),
        None => "Press Enter to calculate an estimate for this selection.".to_owned(),
    };

    let result = Paragraph::new(result_text)
        .block(Block::default().borders(Borders::ALL).title("Estimate"))
        .wrap(Wrap { trim: true });
    frame.render_widget(result, *result_area);
}

fn draw_booking(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // form rows
            Constraint::Min(0),    // slot strip
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [form_area, slots_area] = chunks else {
        return;
    };

    let focused = app.current_booking_field();

    let estimate_label = app
        .last_estimate
        .map_or_else(|| "not calculated".to_owned(), |result| result.to_string());

    let rows = [
        (
            BookingField::Date,
            "Date",
            format!("{} (←/→ within {} – {})", app.date, app.window.0, app.window.1),
        ),
        (
            BookingField::Slot,
            "Time",
            app.selected_time().map_or_else(
                || "Select a time".to_owned(),
                std::borrow::ToOwned::to_owned,
            ),
        ),
        (BookingField::Name, "Name", app.name.clone()),
        (BookingField::Mobile, "Mobile", app.mobile.clone()),
        (BookingField::Postcode, "Postcode", app.postcode.clone()),
        (BookingField::Notes, "Notes", app.notes.clone()),
        (
            BookingField::Submit,
            "",
            format!("[ Book now · estimate {estimate_label} ]"),
        ),
    ];

    let items = rows
        .into_iter()
        .map(|(field, label, value)| {
            let prefix = if field == focused { "> " } else { "  " };
            let line = if label.is_empty() {
                format!("{prefix}{value}")
            } else {
                format!("{prefix}{label}: {value}")
            };
            let item = ListItem::new(line);
            if field == focused {
                item.style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item
            }
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Book a visit"),
    );

    let mut state = ListState::default();
    state.select(Some(app.booking_field));
    frame.render_stateful_widget(list, *form_area, &mut state);

    frame.render_widget(slot_strip(app), *slots_area);
}

/// Render the offered slots for the selected date as one wrapped line.
fn slot_strip(app: &App) -> Paragraph<'static> {
    let title = format!("Times on {}", app.date);

    let (text, style) = if app.is_loading {
        ("Loading times…".to_owned(), Style::default().fg(Color::Yellow))
    } else {
        match &app.slots {
            SlotsOutcome::Unavailable(reason) => {
                (reason.clone(), Style::default().fg(Color::Red))
            }
            outcome => {
                let slots = outcome.slots();
                if slots.is_empty() {
                    (
                        "No times available for this date.".to_owned(),
                        Style::default().fg(Color::Red),
                    )
                } else {
                    let strip = slots
                        .iter()
                        .enumerate()
                        .map(|(index, slot)| {
                            if app.slot_index == Some(index) {
                                format!("[{slot}]")
                            } else {
                                format!(" {slot} ")
                            }
                        })
                        .collect::<Vec<String>>()
                        .join(" ");

                    let style = if matches!(outcome, SlotsOutcome::Fallback(_)) {
                        // Static business-hours slots; the backend was unreachable.
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default()
                    };
                    (strip, style)
                }
            }
        }
    };

    Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(style)
        .wrap(Wrap { trim: true })
}

fn draw_confirmed(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(confirmation) = &app.confirmation else {
        return;
    };

    let mut text = format!(
        "Booking confirmed ✅\n\n\
         Booking ID: {id}\n\n\
         Send your details on WhatsApp to finish up:\n{customer}",
        id = confirmation.booking_id,
        customer = confirmation.links.customer,
    );

    if let Some(owner) = &confirmation.links.owner {
        text.push_str("\n\nOwner alert link:\n");
        text.push_str(owner);
    }

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Confirmed"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
