use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::GAME_COUNT;

const BANNER: &str = r#"
 ╔═════════════════════════════════════════════════════════════════════════════╗
 ║  ██████╗ ██╗   ██╗███████╗████████╗         ██████╗ █████╗ ██████╗ ███████╗ ║
 ║  ██╔══██╗██║   ██║██╔════╝╚══██╔══╝         ██╔════╝██╔══██╗██╔══██╗██╔════╝ ║
 ║  ██████╔╝██║   ██║███████╗   ██║   ███████╗ ██║     ███████║██║  ██║█████╗   ║
 ║  ██╔══██╗██║   ██║╚════██║   ██║   ╚══════╝ ██║     ██╔══██║██║  ██║██╔══╝   ║
 ║  ██║  ██║╚██████╔╝███████║   ██║            ╚██████╗██║  ██║██████╔╝███████╗ ║
 ║  ╚═╝  ╚═╝ ╚═════╝ ╚══════╝   ╚═╝             ╚═════╝╚═╝  ╚═╝╚═════╝ ╚══════╝ ║
 ╚═════════════════════════════════════════════════════════════════════════════╝"#;

const KEY_COLOR: Color = Color::Rgb(80, 200, 255);
const TEXT_COLOR: Color = Color::Rgb(140, 140, 140);
const GOLD: Color = Color::Rgb(255, 220, 80);
const PANEL_BORDER: Color = Color::Rgb(60, 150, 200);
const PANEL_TITLE: Color = Color::Rgb(200, 120, 255);

struct GameTile {
    key: &'static str,
    icon: &'static str,
    name: &'static str,
    desc: &'static str,
    color: Color,
    border_color: Color,
    /// (keys, action) pairs for the controls panel.
    controls: &'static [(&'static str, &'static str)],
}

const PINBALL_CONTROLS: &[(&str, &str)] = &[
    ("S / Enter", "Start table"),
    ("Space / ↓", "Launch ball"),
    ("← / Z", "Left flipper"),
    ("→ / /", "Right flipper"),
    ("U / O", "User / Auto mode"),
    ("R", "Reset table"),
];

const GAME_TILES: [GameTile; GAME_COUNT] = [
    GameTile {
        key: "1",
        icon: "🎱",
        name: "Classic Pinball",
        desc: "Three bumpers,\ntwo flippers!",
        color: Color::Rgb(255, 215, 0),
        border_color: Color::Rgb(140, 110, 20),
        controls: PINBALL_CONTROLS,
    },
    GameTile {
        key: "2",
        icon: "💠",
        name: "Neon Pinball",
        desc: "Wider table,\nfaster kicks!",
        color: Color::Rgb(255, 0, 255),
        border_color: Color::Rgb(120, 0, 140),
        controls: PINBALL_CONTROLS,
    },
    GameTile {
        key: "3",
        icon: "🚀",
        name: "Cyber Space",
        desc: "Clear the waves,\ndodge the fire!",
        color: Color::Rgb(0, 255, 255),
        border_color: Color::Rgb(0, 110, 130),
        controls: &[
            ("S / Enter", "Start"),
            ("← → / A D", "Move ship"),
            ("Space / ↑ / W", "Fire"),
            ("P", "Pause / Resume"),
            ("R", "Reset"),
        ],
    },
];

const NAVIGATION: &[(&str, &str)] = &[
    ("Tab / Shift+Tab", "Switch tabs"),
    ("1-3", "Launch game"),
    ("↑ ↓ ← →", "Select game"),
    ("Enter", "Play selected"),
    ("Esc", "Return to Home"),
    ("q / Ctrl+C", "Quit"),
];

fn control_line(keys: &str, action: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {:<17}", keys), Style::default().fg(KEY_COLOR)),
        Span::styled(action.to_string(), Style::default().fg(TEXT_COLOR)),
    ])
}

fn render_game_tile(frame: &mut Frame, area: Rect, tile: &GameTile, selected: bool, score: u32) {
    let border_color = if selected { GOLD } else { tile.border_color };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let name_color = if selected { Color::White } else { tile.color };
    let desc_color = if selected { Color::Rgb(180, 180, 200) } else { Color::Rgb(120, 120, 140) };
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("[{}] ", tile.key), Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
        Span::raw(format!("{} ", tile.icon)),
        Span::styled(tile.name, Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
    ])];
    lines.extend(
        tile.desc
            .split('\n')
            .map(|desc| Line::from(Span::styled(desc, Style::default().fg(desc_color)))),
    );
    lines.push(Line::from(Span::styled(
        format!("Score: {}", score),
        Style::default().fg(Color::Rgb(255, 215, 0)),
    )));
    if selected {
        lines.push(Line::from(Span::styled(
            "▶ Enter to play",
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn panel(title: String, title_color: Color, border: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(title)
        .title_style(Style::default().fg(title_color).add_modifier(Modifier::BOLD))
}

/// Home screen: banner, one tile per game with its session score, and
/// the key reference for the selected game.
pub fn render_home(frame: &mut Frame, area: Rect, selected_game: usize, scores: &[u32; GAME_COUNT]) {
    let selected_game = selected_game.min(GAME_COUNT - 1);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Banner
            Constraint::Length(2),  // Subtitle
            Constraint::Length(9),  // Game tiles
            Constraint::Min(9),     // Controls
            Constraint::Length(2),  // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(KEY_COLOR))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let subtitle = Paragraph::new(Line::from(Span::styled(
        "  ⚡ Pinball & Space Shooter ⚡  ",
        Style::default().fg(GOLD).add_modifier(Modifier::BOLD | Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let games_block = panel(" 🎮 Games · ←→ Select, Enter to Play ".to_string(), PANEL_TITLE, PANEL_BORDER);
    let games_inner = games_block.inner(chunks[2]);
    frame.render_widget(games_block, chunks[2]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, GAME_COUNT as u32); GAME_COUNT])
        .split(games_inner);
    for (i, tile) in GAME_TILES.iter().enumerate() {
        render_game_tile(frame, cols[i], tile, selected_game == i, scores[i]);
    }

    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[3]);

    let mut nav_lines = vec![Line::from(Span::styled(
        "  🔧 Navigation",
        Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
    ))];
    nav_lines.extend(NAVIGATION.iter().map(|(keys, action)| control_line(keys, action)));
    let nav = Paragraph::new(nav_lines).block(panel(" ⌨ Navigation Control ".to_string(), PANEL_TITLE, PANEL_BORDER));
    frame.render_widget(nav, ctrl_cols[0]);

    let tile = &GAME_TILES[selected_game];
    let mut game_lines = vec![Line::from(Span::styled(
        format!("  {} {}", tile.icon, tile.name),
        Style::default().fg(tile.color).add_modifier(Modifier::BOLD),
    ))];
    game_lines.extend(tile.controls.iter().map(|(keys, action)| control_line(keys, action)));
    let game_ctrl = Paragraph::new(game_lines).block(panel(
        format!(" 🎮 {} Control ", tile.name),
        tile.color,
        Color::Rgb(50, 100, 140),
    ));
    frame.render_widget(game_ctrl, ctrl_cols[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("  🦀 ", Style::default().fg(Color::Rgb(255, 100, 50))),
        Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Rgb(80, 80, 100)),
        ),
        Span::styled("  │  ", Style::default().fg(Color::Rgb(40, 40, 60))),
        Span::styled("Scores reset when the arcade closes", Style::default().fg(Color::Rgb(100, 100, 130))),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_home_shows_tiles_and_scores() {
        let mut terminal = Terminal::new(TestBackend::new(120, 50)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_home(frame, area, 2, &[150, 0, 700]);
            })
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Classic Pinball"));
        assert!(text.contains("Score: 150"));
        assert!(text.contains("Score: 700"));
        assert!(text.contains("Cyber Space Control"));
    }

    #[test]
    fn test_home_survives_tiny_terminal() {
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_home(frame, area, 9, &[0; GAME_COUNT]);
            })
            .unwrap();
    }
}
