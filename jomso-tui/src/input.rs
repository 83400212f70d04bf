use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.load_bins`(...) for the selected source
    LoadBins,
    /// Run `service.user_location`() and replace the current position
    RefreshLocation,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Char, Down, Enter, Esc, Left, Right, Tab, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::SourceSelect => match key.code {
            Up | Char('k') => {
                app.source_list_index = app.source_list_index.saturating_sub(1);
            }
            Down | Char('j') => {
                if app.source_list_index + 1 < app.sources.len() {
                    app.source_list_index += 1;
                }
            }
            Enter | Char(' ') => {
                if app.select_current_source().is_some() {
                    action = Action::LoadBins;
                }
            }
            _ => {}
        },

        Screen::BinList => match key.code {
            Up | Char('k') => {
                app.bin_list_index = app.bin_list_index.saturating_sub(1);
            }
            Down | Char('j') => {
                if app.bin_list_index + 1 < app.bins.len() {
                    app.bin_list_index += 1;
                }
            }
            Enter | Right => {
                app.open_selected_bin();
            }
            Tab => app.toggle_sort(),
            Char('n') => {
                if !app.jump_to_nearest() {
                    app.error_message = Some("No nearest bin available".into());
                }
            }
            Char('r') => action = Action::RefreshLocation,
            Char('l') => action = Action::LoadBins,
            Left | Esc => {
                app.screen = Screen::SourceSelect;
                app.set_bins(Vec::new());
            }
            _ => {}
        },

        Screen::BinDetail => match key.code {
            Left | Esc | Char('b') => app.close_detail(),
            Char('r') => action = Action::RefreshLocation,
            _ => {}
        },
    }
    action
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jomso_core::{JomsoService, plugin::SourceRegistry, wire::decode_bins};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::location::FixedLocation;

    #[fixture]
    fn app() -> App {
        let registry = Arc::new(SourceRegistry::new(vec![jomso_source_fixture::plugin()]));
        let service = Arc::new(JomsoService::new(
            registry,
            Arc::new(FixedLocation::new(None)),
        ));
        App::new(service)
    }

    const TWO_BINS: &str = r#"[
        {"id": "1", "lat": 49.0079, "lng": 8.4045, "fill": 92, "type": "glass",
         "address": "Near Karlstraße 12, Karlsruhe", "size": "2.5 m³"},
        {"id": "2", "lat": 49.0055, "lng": 8.4002, "fill": 60, "type": "clothes",
         "address": "Close to Europaplatz", "size": "2.5 m³"}
    ]"#;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[rstest]
    #[case(press(KeyCode::Char('q')))]
    #[case(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))]
    fn quits_from_any_screen(mut app: App, #[case] key: KeyEvent) {
        assert_eq!(handle_key_event(key, &mut app), Action::Quit, "quit shortcut");
    }

    #[rstest]
    fn enter_on_source_requests_bins(mut app: App) {
        let action = handle_key_event(press(KeyCode::Enter), &mut app);
        assert_eq!(action, Action::LoadBins, "selecting a source loads bins");
        assert_eq!(app.screen, Screen::BinList, "moved to bin list");
    }

    #[rstest]
    fn cursor_stays_within_sources(mut app: App) {
        handle_key_event(press(KeyCode::Up), &mut app);
        assert_eq!(app.source_list_index, 0, "no underflow");
        handle_key_event(press(KeyCode::Down), &mut app);
        assert_eq!(app.source_list_index, 0, "single source, no overflow");
    }

    #[rstest]
    fn missing_nearest_bin_is_reported(mut app: App) {
        app.screen = Screen::BinList;
        let action = handle_key_event(press(KeyCode::Char('n')), &mut app);
        assert_eq!(action, Action::None, "no async work");
        assert_eq!(
            app.error_message.as_deref(),
            Some("No nearest bin available"),
            "status message"
        );
    }

    #[rstest]
    #[case(KeyCode::Enter)]
    #[case(KeyCode::Right)]
    fn opens_detail_for_bin_under_cursor(mut app: App, #[case] code: KeyCode) {
        app.screen = Screen::BinList;
        app.set_bins(decode_bins(TWO_BINS).expect("bins decode"));
        handle_key_event(press(KeyCode::Down), &mut app);

        let action = handle_key_event(press(code), &mut app);

        assert_eq!(action, Action::None, "no async work");
        assert_eq!(app.screen, Screen::BinDetail, "detail screen");
        assert_eq!(
            app.detail_bin().map(|bin| bin.id.0.as_str()),
            Some("2"),
            "bin under the cursor"
        );
    }

    #[rstest]
    #[case(KeyCode::Enter)]
    #[case(KeyCode::Right)]
    fn empty_list_keeps_bin_list_screen(mut app: App, #[case] code: KeyCode) {
        app.screen = Screen::BinList;

        let action = handle_key_event(press(code), &mut app);

        assert_eq!(action, Action::None, "no async work");
        assert_eq!(app.screen, Screen::BinList, "nothing to open");
    }

    #[rstest]
    fn back_from_detail_forgets_bin(mut app: App) {
        app.screen = Screen::BinList;
        app.set_bins(decode_bins(TWO_BINS).expect("bins decode"));
        handle_key_event(press(KeyCode::Enter), &mut app);

        handle_key_event(press(KeyCode::Esc), &mut app);

        assert_eq!(app.screen, Screen::BinList, "back on the list");
        assert!(app.detail_bin.is_none(), "detail cleared");
    }

    #[rstest]
    fn refresh_location_from_detail(mut app: App) {
        app.screen = Screen::BinDetail;
        let action = handle_key_event(press(KeyCode::Char('r')), &mut app);
        assert_eq!(action, Action::RefreshLocation, "re-query location");
    }
}
