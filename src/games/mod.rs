pub mod pinball;
pub mod shooter;

use crossterm::event::KeyEvent;
use ratatui::prelude::*;

pub trait Game {
    /// One fixed simulation step.
    fn update(&mut self);
    fn handle_input(&mut self, key: KeyEvent);
    fn render(&mut self, frame: &mut Frame, area: Rect);
    fn get_score(&self) -> u32;
}
