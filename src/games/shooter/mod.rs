pub mod state;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::games::Game;
use crate::input::KeyLatch;

use state::{Phase, ShooterEvent, ShooterKeys, ShooterState, CANVAS_HEIGHT, CANVAS_WIDTH};

const BG: Color = Color::Rgb(10, 14, 39);
const GRID: Color = Color::Rgb(0, 40, 48);

/// "Cyber Space": a continuous vertical shooter.
pub struct CyberSpace {
    state: ShooterState,
    left: KeyLatch,
    right: KeyLatch,
    fire: KeyLatch,
    high_score: u32,
}

impl CyberSpace {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            state: ShooterState::new(seed),
            left: KeyLatch::default(),
            right: KeyLatch::default(),
            fire: KeyLatch::default(),
            high_score: 0,
        }
    }

    fn keys(&self) -> ShooterKeys {
        ShooterKeys {
            left: self.left.is_held(),
            right: self.right.is_held(),
            fire: self.fire.is_held(),
        }
    }

    fn reset(&mut self) {
        self.state.reset();
        self.left.clear();
        self.right.clear();
        self.fire.clear();
    }

    fn render_field(&self, width: usize, height: usize) -> Vec<Line<'static>> {
        if width == 0 || height == 0 {
            return Vec::new();
        }
        let sx = width as f32 / CANVAS_WIDTH;
        let sy = height as f32 / CANVAS_HEIGHT;
        let bg = Style::default().bg(BG);
        let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', bg); width]; height];

        // Background grid every 50 canvas units
        for (row, cells) in grid.iter_mut().enumerate() {
            let on_row = ((row as f32 / sy) / 50.0).fract() < (1.0 / sy) / 50.0;
            for (col, cell) in cells.iter_mut().enumerate() {
                let on_col = ((col as f32 / sx) / 50.0).fract() < (1.0 / sx) / 50.0;
                if on_row || on_col {
                    *cell = ('·', bg.fg(GRID));
                }
            }
        }

        let mut fill = |x: f32, y: f32, w: f32, h: f32, cell: (char, Style)| {
            let c0 = (x * sx).max(0.0) as usize;
            let r0 = (y * sy).max(0.0) as usize;
            let c1 = (((x + w) * sx).ceil() as usize).max(c0 + 1).min(width);
            let r1 = (((y + h) * sy).ceil() as usize).max(r0 + 1).min(height);
            for row in grid.iter_mut().take(r1).skip(r0) {
                for target in row.iter_mut().take(c1).skip(c0) {
                    *target = cell;
                }
            }
        };

        for explosion in &self.state.explosions {
            let heat = (255.0 * explosion.fade()) as u8;
            let style = bg.fg(Color::Rgb(heat, heat / 2 + 20, 0));
            let r = explosion.radius;
            fill(explosion.x - r, explosion.y - r / 2.0, r * 2.0, r, ('✸', style));
        }

        for enemy in &self.state.enemies {
            let r = enemy.sprite_rect();
            fill(r.x, r.y, r.w, r.h, ('▼', bg.fg(Color::Rgb(255, 0, 0)).add_modifier(Modifier::BOLD)));
        }

        for bullet in &self.state.bullets {
            let r = bullet.rect();
            let (ch, color) = if bullet.from_player {
                ('│', Color::Rgb(255, 255, 0))
            } else {
                ('¦', Color::Rgb(255, 0, 255))
            };
            fill(r.x, r.y, r.w, r.h, (ch, bg.fg(color)));
        }

        if self.state.phase != Phase::Ready {
            let p = self.state.player.rect();
            fill(p.x, p.y, p.w, p.h, ('▲', bg.fg(Color::Rgb(0, 255, 0)).add_modifier(Modifier::BOLD)));
        }

        grid.into_iter()
            .map(|row| {
                Line::from(
                    row.into_iter()
                        .map(|(ch, style)| Span::styled(String::from(ch), style))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

impl Game for CyberSpace {
    fn update(&mut self) {
        let events = self.state.step(self.keys());
        for event in events {
            match event {
                ShooterEvent::PlayerHit { lives_left } => log::debug!("player hit, {} lives left", lives_left),
                ShooterEvent::GameOver { score } => self.high_score = self.high_score.max(score),
                ShooterEvent::EnemyDestroyed { .. } | ShooterEvent::WaveCleared { .. } => {}
            }
        }
        self.left.tick();
        self.right.tick();
        self.fire.tick();
    }

    fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            KeyCode::Char('p') | KeyCode::Char('P') => self.state.toggle_pause(),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => {
                self.state.start();
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => self.left.press(),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => self.right.press(),
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                self.fire.press()
            }
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(0, 255, 255)))
            .title(" 🚀 Cyber Space ")
            .title_style(Style::default().fg(Color::Rgb(0, 255, 255)).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(inner);

        let sep = Span::styled(" │ ", Style::default().fg(Color::DarkGray));
        let status = Line::from(vec![
            Span::styled(
                format!(" Score: {} ", self.state.score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            sep.clone(),
            Span::styled(format!("Wave: {}", self.state.wave), Style::default().fg(Color::Cyan)),
            sep.clone(),
            Span::styled(
                format!("Lives: {}", "♥ ".repeat(self.state.lives as usize)),
                Style::default().fg(Color::Rgb(255, 80, 80)),
            ),
            sep.clone(),
            Span::styled(
                self.state.status.label(),
                Style::default().fg(Color::Rgb(0, 255, 255)).add_modifier(Modifier::BOLD),
            ),
            sep,
            Span::styled(format!("🏆 {}", self.high_score), Style::default().fg(Color::Cyan)),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        let lines = self.render_field(chunks[1].width as usize, chunks[1].height as usize);
        frame.render_widget(Paragraph::new(lines), chunks[1]);

        let dim = Style::default().fg(Color::DarkGray);
        let help = match self.state.phase {
            Phase::Ready => " S Start │ Esc Menu",
            Phase::GameOver => " GAME OVER │ S Play again │ R Reset │ Esc Menu",
            Phase::Paused => " ⏸ PAUSED │ P Resume │ R Reset",
            Phase::Running => " ← → Move │ SPACE Fire │ P Pause │ R Reset │ Esc Menu",
        };
        frame.render_widget(Paragraph::new(Line::from(Span::styled(help, dim))), chunks[2]);
    }

    fn get_score(&self) -> u32 {
        self.state.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(game: &mut CyberSpace, code: KeyCode) {
        game.handle_input(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_start_pause_reset_keys() {
        let mut game = CyberSpace::new(Some(5));
        press(&mut game, KeyCode::Char('s'));
        assert_eq!(game.state.phase, Phase::Running);
        press(&mut game, KeyCode::Char('p'));
        assert_eq!(game.state.phase, Phase::Paused);
        press(&mut game, KeyCode::Char('r'));
        assert_eq!(game.state.phase, Phase::Ready);
    }

    #[test]
    fn test_move_key_latches() {
        let mut game = CyberSpace::new(Some(5));
        press(&mut game, KeyCode::Enter);
        let x0 = game.state.player.x;
        press(&mut game, KeyCode::Right);
        game.update();
        game.update();
        assert_eq!(game.state.player.x, x0 + 10.0);
    }

    #[test]
    fn test_render_field_dimensions() {
        let mut game = CyberSpace::new(Some(5));
        game.state.start();
        let lines = game.render_field(80, 25);
        assert_eq!(lines.len(), 25);
        assert!(lines.iter().all(|l| l.spans.len() == 80));
    }
}
