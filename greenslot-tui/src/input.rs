use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use greenslot_core::model::{AccessDifficulty, JobType, SizeCategory, WasteVolume};

use crate::app::{App, BookingField, EstimateField, Screen};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.slots_for(...)` for the currently selected date
    LoadSlots,
    /// Run `service.submit(...)` with the current form state
    Submit,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Backspace, Char, Down, Enter, Esc, Left, Right, Tab, Up};

    // Ctrl-C quits everywhere; plain `q` only outside text inputs.
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q')
        && key.modifiers.is_empty()
        && !(app.screen == Screen::Booking && app.current_booking_field().is_text())
    {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::Estimate => match key.code {
            Up | Char('k') => {
                if app.estimate_field > 0 {
                    app.estimate_field -= 1;
                }
            }
            Down | Char('j') => {
                if app.estimate_field + 1 < EstimateField::ALL.len() {
                    app.estimate_field += 1;
                }
            }
            Left => cycle_option(app, false),
            Right => cycle_option(app, true),
            Enter | Char(' ') => {
                app.compute_estimate();
            }
            Tab => {
                app.screen = Screen::Booking;
                app.status = None;
                app.is_loading = true;
                action = Action::LoadSlots;
            }
            _ => {}
        },

        Screen::Booking => match key.code {
            Up => {
                if app.booking_field > 0 {
                    app.booking_field -= 1;
                }
            }
            Down => {
                if app.booking_field + 1 < BookingField::ALL.len() {
                    app.booking_field += 1;
                }
            }
            Left | Right => match app.current_booking_field() {
                BookingField::Date => {
                    let delta = if key.code == Right { 1 } else { -1 };
                    if app.step_date(delta) {
                        app.is_loading = true;
                        action = Action::LoadSlots;
                    }
                }
                BookingField::Slot => app.step_slot(key.code == Right),
                field if field.is_text() => {
                    // Arrows move focus rather than the cursor in a text row.
                    if key.code == Right {
                        if app.booking_field + 1 < BookingField::ALL.len() {
                            app.booking_field += 1;
                        }
                    } else if app.booking_field > 0 {
                        app.booking_field -= 1;
                    }
                }
                _ => {}
            },
            Char(character) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                    && let Some(field) = app.focused_text_field()
                {
                    field.push(character);
                }
            }
            Backspace => {
                if let Some(field) = app.focused_text_field() {
                    field.pop();
                }
            }
            Enter => {
                if app.current_booking_field() == BookingField::Submit {
                    action = Action::Submit;
                } else if app.booking_field + 1 < BookingField::ALL.len() {
                    app.booking_field += 1;
                }
            }
            Esc => {
                app.screen = Screen::Estimate;
                app.status = None;
            }
            _ => {}
        },

        Screen::Confirmed => match key.code {
            Enter | Esc | Char('b') => {
                app.start_over();
                app.is_loading = true;
                action = Action::LoadSlots;
            }
            _ => {}
        },
    }
    action
}

fn cycle_option(app: &mut App, forward: bool) {
    let (index, len) = match app.current_estimate_field() {
        EstimateField::Job => (&mut app.job_index, JobType::ALL.len()),
        EstimateField::Size => (&mut app.size_index, SizeCategory::ALL.len()),
        EstimateField::Access => (&mut app.access_index, AccessDifficulty::ALL.len()),
        EstimateField::Waste => (&mut app.waste_index, WasteVolume::ALL.len()),
    };

    *index = if forward {
        (*index + 1) % len
    } else {
        (*index + len - 1) % len
    };

    app.invalidate_estimate();
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use greenslot_core::{
        config::Config,
        model::BookingRequest,
        ports::{AvailabilityPort, BookingPort, BookingReply, PortError},
        service::{BookingService, SlotsOutcome},
    };

    use super::*;

    /// Port stub for key-handling tests; nothing here performs I/O.
    struct IdlePorts;

    #[async_trait]
    impl AvailabilityPort for IdlePorts {
        async fn available_times(&self, _date: NaiveDate) -> Result<Vec<String>, PortError> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl BookingPort for IdlePorts {
        async fn book(
            &self,
            _request: &BookingRequest,
            _source: &str,
        ) -> Result<BookingReply, PortError> {
            Ok(BookingReply::default())
        }
    }

    fn app() -> App {
        let ports = Arc::new(IdlePorts);
        let service = Arc::new(BookingService::new(
            Arc::clone(&ports) as Arc<dyn AvailabilityPort>,
            ports,
            Config::default(),
        ));
        App::new(
            service,
            NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"),
        )
    }

    fn press(app: &mut App, code: KeyCode) -> Action {
        handle_key_event(KeyEvent::from(code), app)
    }

    #[test]
    fn booking_again_reloads_the_slot_list() {
        let mut app = app();
        app.screen = Screen::Confirmed;
        app.slots = SlotsOutcome::Available(vec!["09:00".to_owned()]);

        let action = press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen, Screen::Booking);
        assert!(
            matches!(action, Action::LoadSlots),
            "re-entering the form must refresh availability"
        );
        assert!(app.is_loading);
    }

    #[test]
    fn arrows_move_focus_out_of_text_fields() {
        let mut app = app();
        app.screen = Screen::Booking;
        app.booking_field = 2; // Name

        press(&mut app, KeyCode::Right);
        assert_eq!(app.current_booking_field(), BookingField::Mobile);

        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.current_booking_field(), BookingField::Slot);

        assert!(app.name.is_empty(), "arrows must not edit the field text");
    }

    #[test]
    fn arrows_still_step_the_date() {
        let mut app = app();
        app.screen = Screen::Booking;
        app.booking_field = 0; // Date

        let action = press(&mut app, KeyCode::Right);

        assert!(matches!(action, Action::LoadSlots));
        assert_eq!(app.current_booking_field(), BookingField::Date);
    }
}
