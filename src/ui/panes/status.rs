//! Status bar: active view, line position, last diagnostic and keybinds

use crate::debugger::{StepContext, View};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn bar(fg: Color) -> Style {
    Style::default().bg(DEFAULT_THEME.current_line_bg).fg(fg)
}

fn badge(bg: Color) -> Style {
    Style::default()
        .bg(bg)
        .fg(DEFAULT_THEME.badge_fg)
        .add_modifier(Modifier::BOLD)
}

/// `[key] description` pairs, separated by thin rules
fn keybind_spans(binds: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    let key_style = Style::default()
        .bg(DEFAULT_THEME.comment)
        .fg(DEFAULT_THEME.badge_fg);
    let mut spans = Vec::new();
    for (i, (key, desc)) in binds.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("│ ", bar(DEFAULT_THEME.comment)));
        }
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!(" {} ", desc), bar(DEFAULT_THEME.fg)));
    }
    spans
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, view: View, ctx: &StepContext<'_>) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let view_color = match view {
        View::Step => DEFAULT_THEME.primary,
        View::State => DEFAULT_THEME.secondary,
    };
    let message = match ctx.last_diagnostic() {
        Some(diagnostic) => Span::styled(format!(" {} ", diagnostic), bar(DEFAULT_THEME.error)),
        None => Span::styled(" Ready ", bar(DEFAULT_THEME.fg)),
    };

    let left = Line::from(vec![
        Span::styled(format!(" {} ", view.title()), badge(view_color)),
        Span::styled(
            format!(" Line {}/{} ", ctx.pc + 1, ctx.program.len()),
            bar(DEFAULT_THEME.fg),
        ),
        Span::styled("|", bar(DEFAULT_THEME.comment)),
        message,
    ]);
    frame.render_widget(
        Paragraph::new(left)
            .style(bar(DEFAULT_THEME.fg))
            .alignment(Alignment::Left),
        halves[0],
    );

    let toggle = match view {
        View::Step => "state",
        View::State => "step",
    };
    let mut right = keybind_spans(&[("⎵/→", "next"), ("esc", toggle), ("q", "quit")]);
    right.push(Span::styled(" DEBUG ", badge(DEFAULT_THEME.success)));
    frame.render_widget(
        Paragraph::new(Line::from(right))
            .style(bar(DEFAULT_THEME.fg))
            .alignment(Alignment::Right),
        halves[1],
    );
}
