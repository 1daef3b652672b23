pub mod collision;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod physics;
pub mod state;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::games::Game;
use crate::input::KeyLatch;

use config::TableConfig;
use entities::WallSide;
use geometry::distance;
use state::{Mode, PinballEvent, PinballKeys, PinballState, Status};

const BUMPER_FLASH_TICKS: u32 = 6;

type Cell = (char, Style);

/// A pinball table wired to terminal input and rendering.
pub struct Pinball {
    state: PinballState,
    left: KeyLatch,
    right: KeyLatch,
    launch: KeyLatch,
    bumper_flash: Vec<u32>,
    drains: u32,
}

impl Pinball {
    pub fn new(table: TableConfig, seed: Option<u64>) -> Self {
        let bumpers = table.bumpers.len();
        Self {
            state: PinballState::new(table, seed),
            left: KeyLatch::default(),
            right: KeyLatch::default(),
            launch: KeyLatch::default(),
            bumper_flash: vec![0; bumpers],
            drains: 0,
        }
    }

    pub fn debounces_contacts(&self) -> bool {
        self.state.table.debounce_contacts
    }

    fn keys(&self) -> PinballKeys {
        PinballKeys {
            left_flipper: self.left.is_held(),
            right_flipper: self.right.is_held(),
            launch: self.launch.is_held(),
        }
    }

    fn reset(&mut self) {
        self.state.reset();
        self.left.clear();
        self.right.clear();
        self.launch.clear();
        self.bumper_flash.iter_mut().for_each(|t| *t = 0);
        self.drains = 0;
    }

    fn render_table(&self, width: usize, height: usize) -> Vec<Line<'static>> {
        if width == 0 || height == 0 {
            return Vec::new();
        }
        let table = &self.state.table;
        let theme = &table.theme;
        let bg = Style::default().bg(theme.background);
        let mut grid: Vec<Vec<Cell>> = vec![vec![(' ', bg); width]; height];
        let sx = width as f32 / table.width;
        let sy = height as f32 / table.height;

        // Bumpers, sampled at cell centres
        for (row, cells) in grid.iter_mut().enumerate() {
            let ty = (row as f32 + 0.5) / sy;
            for (col, cell) in cells.iter_mut().enumerate() {
                let tx = (col as f32 + 0.5) / sx;
                for (i, bumper) in self.state.bumpers.iter().enumerate() {
                    let d = distance(tx, ty, bumper.x, bumper.y);
                    if d > bumper.radius {
                        continue;
                    }
                    let lit = self.bumper_flash[i] > 0;
                    *cell = if d < bumper.radius * 0.45 {
                        ('◉', bg.fg(theme.bumper_core))
                    } else if lit {
                        ('●', bg.fg(theme.bumper_core).add_modifier(Modifier::BOLD))
                    } else {
                        ('○', bg.fg(theme.bumper))
                    };
                }
            }
        }

        for wall in &self.state.walls {
            let ch = match wall.side {
                WallSide::Left | WallSide::Right => '║',
                WallSide::Top => '═',
            };
            let steps = ((wall.x2 - wall.x1).abs() * sx).max((wall.y2 - wall.y1).abs() * sy) as usize + 1;
            for s in 0..=steps {
                let t = s as f32 / steps as f32;
                let x = wall.x1 + (wall.x2 - wall.x1) * t;
                let y = wall.y1 + (wall.y2 - wall.y1) * t;
                plot(&mut grid, sx, sy, x, y, (ch, bg.fg(theme.wall)));
            }
        }
        plot(&mut grid, sx, sy, 0.0, 0.0, ('╔', bg.fg(theme.wall)));
        plot(&mut grid, sx, sy, table.width, 0.0, ('╗', bg.fg(theme.wall)));

        for flipper in [&self.state.left, &self.state.right] {
            let color = if flipper.active { theme.flipper_active } else { theme.flipper };
            let style = bg.fg(color).add_modifier(Modifier::BOLD);
            let (tip_x, tip_y) = flipper.tip();
            let steps = (flipper.length * sx.max(sy) * 2.0) as usize + 1;
            for s in 1..=steps {
                let t = s as f32 / steps as f32;
                let x = flipper.pivot_x + (tip_x - flipper.pivot_x) * t;
                let y = flipper.pivot_y + (tip_y - flipper.pivot_y) * t;
                plot(&mut grid, sx, sy, x, y, ('▬', style));
            }
            plot(&mut grid, sx, sy, flipper.pivot_x, flipper.pivot_y, ('●', style));
        }

        // Drain mouth under the flippers
        let (left_tip, _) = self.state.left.tip();
        let (right_tip, _) = self.state.right.tip();
        let drain_style = bg.fg(Color::Rgb(100, 30, 30));
        let start = (left_tip * sx).max(0.0) as usize;
        let end = ((right_tip * sx) as usize).min(width);
        for cell in grid[height - 1].iter_mut().take(end).skip(start) {
            *cell = ('▿', drain_style);
        }

        let ball = &self.state.ball;
        if self.state.running {
            plot(
                &mut grid,
                sx,
                sy,
                ball.x,
                ball.y,
                ('●', bg.fg(theme.ball).add_modifier(Modifier::BOLD)),
            );
        }

        grid.into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn help_line(&self) -> Line<'static> {
        let dim = Style::default().fg(Color::DarkGray);
        let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        match self.state.status() {
            Status::Idle => Line::from(vec![
                Span::styled(" S ", key),
                Span::styled("Start ", dim),
                Span::styled("│ U ", key),
                Span::styled("User mode ", dim),
                Span::styled("│ O ", key),
                Span::styled("Auto mode ", dim),
                Span::styled("│ Esc Menu", dim),
            ]),
            Status::LaunchPrompt if self.state.mode == Mode::User => Line::from(vec![
                Span::styled(" SPACE ", key),
                Span::styled("to launch ", dim),
                Span::styled("│ ← → Flippers │ R Reset │ Esc Menu", dim),
            ]),
            _ => Line::from(vec![
                Span::styled(" ← / Z ", key),
                Span::styled("Left flipper ", dim),
                Span::styled("│ → / / ", key),
                Span::styled("Right flipper ", dim),
                Span::styled("│ R Reset │ Esc Menu", dim),
            ]),
        }
    }
}

/// Points on the table's far edges land on the last row or column.
fn plot(grid: &mut [Vec<Cell>], sx: f32, sy: f32, x: f32, y: f32, cell: Cell) {
    if x < 0.0 || y < 0.0 {
        return;
    }
    let row = ((y * sy) as usize).min(grid.len().saturating_sub(1));
    if let Some(cells) = grid.get_mut(row) {
        let col = ((x * sx) as usize).min(cells.len().saturating_sub(1));
        if let Some(target) = cells.get_mut(col) {
            *target = cell;
        }
    }
}

impl Game for Pinball {
    fn update(&mut self) {
        for flash in &mut self.bumper_flash {
            *flash = flash.saturating_sub(1);
        }

        let events = self.state.step(self.keys());
        for event in &events {
            match event {
                PinballEvent::BumperHit { index, .. } => {
                    self.bumper_flash[*index] = BUMPER_FLASH_TICKS;
                }
                PinballEvent::Launched { vx, vy } => {
                    log::debug!("ball launched at ({:.2}, {:.2})", vx, vy);
                }
                PinballEvent::Drained => {
                    self.drains += 1;
                    log::info!("drain #{} with score {}", self.drains, self.state.score);
                }
                PinballEvent::FlipperHit { side, .. } => {
                    log::trace!("{:?} flipper kick, speed {:.1}", side, self.state.ball.speed());
                }
            }
        }

        self.left.tick();
        self.right.tick();
        self.launch.tick();
    }

    fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('z') | KeyCode::Char('Z') => self.left.press(),
            KeyCode::Right | KeyCode::Char('/') => self.right.press(),
            KeyCode::Char(' ') | KeyCode::Down => self.launch.press(),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => {
                self.state.start();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            KeyCode::Char('u') | KeyCode::Char('U') => {
                self.state.set_mode(Mode::User);
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                self.state.set_mode(Mode::Auto);
            }
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let theme = &self.state.table.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.frame))
            .title(format!(" {}{}", theme.icon, theme.title))
            .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(10),
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
            Span::styled(
                self.state.status().label(),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
            sep.clone(),
            Span::styled(
                format!("Mode: {}", self.state.mode_label()),
                Style::default().fg(Color::Rgb(200, 200, 220)),
            ),
            sep.clone(),
            Span::styled(format!("Drains: {}", self.drains), Style::default().fg(Color::Cyan)),
        ]);
        let status = if self.debounces_contacts() {
            let mut spans = status.spans;
            spans.push(sep);
            spans.push(Span::styled("Debounced", Style::default().fg(Color::DarkGray)));
            Line::from(spans)
        } else {
            status
        };
        frame.render_widget(Paragraph::new(status), chunks[0]);

        // Keep the table's aspect ratio; terminal cells are about twice as tall as wide.
        let field = chunks[1];
        let table = &self.state.table;
        let want_w = (field.height as f32 * 2.0 * table.width / table.height) as u16;
        let field_w = want_w.clamp(1, field.width.max(1));
        let field_area = Rect::new(
            field.x + field.width.saturating_sub(field_w) / 2,
            field.y,
            field_w,
            field.height,
        );
        let lines = self.render_table(field_area.width as usize, field_area.height as usize);
        frame.render_widget(Paragraph::new(lines), field_area);

        frame.render_widget(Paragraph::new(self.help_line()), chunks[2]);
    }

    fn get_score(&self) -> u32 {
        self.state.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(game: &mut Pinball, code: KeyCode) {
        game.handle_input(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_keys_drive_session() {
        let mut game = Pinball::new(TableConfig::classic(), Some(11));
        press(&mut game, KeyCode::Char('o'));
        assert_eq!(game.state.mode, Mode::Auto);
        press(&mut game, KeyCode::Char('u'));
        press(&mut game, KeyCode::Char('s'));
        assert!(game.state.running);

        // Mode is locked while running.
        press(&mut game, KeyCode::Char('o'));
        assert_eq!(game.state.mode, Mode::User);

        press(&mut game, KeyCode::Char(' '));
        game.update();
        assert!(game.state.ball_in_play);
    }

    #[test]
    fn test_flipper_latch_releases() {
        let mut game = Pinball::new(TableConfig::classic(), Some(11));
        press(&mut game, KeyCode::Char('s'));
        press(&mut game, KeyCode::Left);
        game.update();
        assert!(game.state.left.active);
        for _ in 0..crate::input::HOLD_TICKS {
            game.update();
        }
        assert!(!game.state.left.active);
    }

    #[test]
    fn test_render_table_fills_grid() {
        let mut game = Pinball::new(TableConfig::neon(), Some(11));
        game.state.start();
        let lines = game.render_table(40, 30);
        assert_eq!(lines.len(), 30);
        assert!(lines.iter().all(|l| l.spans.len() == 40));
        assert!(game.render_table(0, 10).is_empty());
    }

    #[test]
    fn test_reset_clears_counters() {
        let mut game = Pinball::new(TableConfig::classic(), Some(11));
        game.state.start();
        game.drains = 3;
        press(&mut game, KeyCode::Char('r'));
        assert_eq!(game.drains, 0);
        assert!(!game.state.running);
        assert_eq!(game.get_score(), 0);
    }
}
