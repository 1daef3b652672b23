pub mod home;
pub mod tabs;

use ratatui::prelude::*;

use crate::app::{App, Tab};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
        ])
        .split(frame.area());

    tabs::render_tabs(frame, app, chunks[0]);

    if app.current_tab == Tab::Home {
        home::render_home(frame, chunks[1], app.selected_game, &app.scores());
    } else if let Some(game) = app.game_mut(app.current_tab) {
        game.render(frame, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_every_tab_renders() {
        let mut app = App::new(&Settings {
            seed: Some(3),
            ..Settings::default()
        });
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        for _ in Tab::all() {
            terminal.draw(|frame| render(frame, &mut app)).unwrap();
            app.on_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        }
        assert_eq!(app.current_tab, Tab::Home);
    }
}
