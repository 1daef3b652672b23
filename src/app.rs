use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::games::pinball::config::TableConfig;
use crate::games::pinball::Pinball;
use crate::games::shooter::CyberSpace;
use crate::games::Game;
use crate::settings::Settings;

pub const GAME_COUNT: usize = 3;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Tab {
    Home,
    ClassicPinball,
    NeonPinball,
    CyberSpace,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::ClassicPinball, Tab::NeonPinball, Tab::CyberSpace]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => " Home ",
            Tab::ClassicPinball => " Classic ",
            Tab::NeonPinball => " Neon ",
            Tab::CyberSpace => " Cyber Space ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::ClassicPinball => 1,
            Tab::NeonPinball => 2,
            Tab::CyberSpace => 3,
        }
    }

    /// The game tab behind a home-screen tile.
    pub fn for_game(game_idx: usize) -> Tab {
        match game_idx {
            0 => Tab::ClassicPinball,
            1 => Tab::NeonPinball,
            2 => Tab::CyberSpace,
            _ => Tab::Home,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub selected_game: usize,
    pub classic: Pinball,
    pub neon: Pinball,
    pub cyber_space: CyberSpace,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        let table = |mut config: TableConfig| {
            config.debounce_contacts = settings.debounce_contacts;
            config
        };
        // Distinct but reproducible streams per game when a seed is set
        let seed = |offset: u64| settings.seed.map(|s| s.wrapping_add(offset));
        Self {
            should_quit: false,
            current_tab: Tab::Home,
            selected_game: 0,
            classic: Pinball::new(table(TableConfig::classic()), seed(0)),
            neon: Pinball::new(table(TableConfig::neon()), seed(1)),
            cyber_space: CyberSpace::new(seed(2)),
        }
    }

    pub fn game_mut(&mut self, tab: Tab) -> Option<&mut dyn Game> {
        match tab {
            Tab::Home => None,
            Tab::ClassicPinball => Some(&mut self.classic),
            Tab::NeonPinball => Some(&mut self.neon),
            Tab::CyberSpace => Some(&mut self.cyber_space),
        }
    }

    pub fn scores(&self) -> [u32; GAME_COUNT] {
        [
            self.classic.get_score(),
            self.neon.get_score(),
            self.cyber_space.get_score(),
        ]
    }

    pub fn on_tick(&mut self) {
        // Only the visible game advances
        if let Some(game) = self.game_mut(self.current_tab) {
            game.update();
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') if self.current_tab == Tab::Home => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            KeyCode::Esc if self.current_tab != Tab::Home => {
                self.current_tab = Tab::Home;
                return;
            }
            _ => {}
        }

        if self.current_tab == Tab::Home {
            self.on_home_key(key);
            return;
        }

        if let Some(game) = self.game_mut(self.current_tab) {
            game.handle_input(key);
        }
    }

    fn on_home_key(&mut self, key: KeyEvent) {
        if !key.modifiers.is_empty() {
            return;
        }
        match key.code {
            KeyCode::Char(c @ '1'..='3') => {
                self.current_tab = Tab::for_game(c as usize - '1' as usize);
            }
            KeyCode::Right | KeyCode::Down => {
                self.selected_game = (self.selected_game + 1) % GAME_COUNT;
            }
            KeyCode::Left | KeyCode::Up => {
                self.selected_game = (self.selected_game + GAME_COUNT - 1) % GAME_COUNT;
            }
            KeyCode::Enter => {
                self.current_tab = Tab::for_game(self.selected_game);
            }
            _ => {}
        }
        log::trace!("home: selected {}, tab {:?}", self.selected_game, self.current_tab);
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.current_tab = tabs[(idx + 1) % tabs.len()];
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.current_tab = tabs[(idx + tabs.len() - 1) % tabs.len()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(&Settings {
            seed: Some(9),
            ..Settings::default()
        })
    }

    #[test]
    fn test_tab_cycling_wraps() {
        let mut app = app();
        for expected in [Tab::ClassicPinball, Tab::NeonPinball, Tab::CyberSpace, Tab::Home] {
            app.on_key(key(KeyCode::Tab));
            assert_eq!(app.current_tab, expected);
        }
        app.on_key(key(KeyCode::BackTab));
        assert_eq!(app.current_tab, Tab::CyberSpace);
    }

    #[test]
    fn test_home_selection_and_launch() {
        let mut app = app();
        app.on_key(key(KeyCode::Left));
        assert_eq!(app.selected_game, 2);
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.current_tab, Tab::CyberSpace);
        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.current_tab, Tab::Home);
        app.on_key(key(KeyCode::Char('2')));
        assert_eq!(app.current_tab, Tab::NeonPinball);
    }

    #[test]
    fn test_quit_only_from_home() {
        let mut app = app();
        app.on_key(key(KeyCode::Char('1')));
        app.on_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        app.on_key(key(KeyCode::Esc));
        app.on_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_keys_reach_active_game_only() {
        let mut app = app();
        app.on_key(key(KeyCode::Char('1')));
        app.on_key(key(KeyCode::Char('s')));
        app.on_key(key(KeyCode::Char(' ')));
        for _ in 0..3 {
            app.on_tick();
        }
        assert_eq!(app.neon.get_score(), 0);
        assert_eq!(app.scores()[2], 0);
    }

    #[test]
    fn test_debounce_setting_reaches_tables() {
        let app = App::new(&Settings {
            debounce_contacts: true,
            ..Settings::default()
        });
        assert!(app.classic.debounces_contacts());
        assert!(app.neon.debounces_contacts());
    }
}
