use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab};

fn tab_color(tab: Tab) -> Color {
    match tab {
        Tab::Home => Color::Rgb(255, 220, 80),
        Tab::ClassicPinball => Color::Rgb(255, 215, 0),
        Tab::NeonPinball => Color::Rgb(255, 0, 255),
        Tab::CyberSpace => Color::Rgb(0, 255, 255),
    }
}

pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|&tab| {
            let style = if tab == app.current_tab {
                Style::default().fg(tab_color(tab)).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(120, 120, 140))
            };
            Line::from(Span::styled(tab.title(), style))
        })
        .collect();

    let accent = tab_color(app.current_tab);
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
                .border_type(BorderType::Rounded)
                .title(" 🕹 RustCade Pinball ")
                .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD)),
        )
        .select(app.current_tab.index())
        .highlight_style(Style::default().fg(accent).add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
        .divider(Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80))));

    frame.render_widget(tabs, area);
}
