//! State view: pending instruction, registers and non-zero memory

use crate::debugger::StepContext;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

fn pane_block(title: &'static str) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 0, 0, 0))
}

fn empty_placeholder(frame: &mut Frame, area: Rect, block: Block<'_>) {
    let paragraph = Paragraph::new("(none)")
        .block(block)
        .style(Style::default().fg(DEFAULT_THEME.comment));
    frame.render_widget(paragraph, area);
}

/// Render the state view into `area`
pub fn render_state_pane(frame: &mut Frame, area: Rect, ctx: &StepContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let current = ctx.current_line().map(|l| l.text.trim()).unwrap_or("");
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Instruction [{:03}]: ", ctx.pc + 1),
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(current.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(
                Style::default()
                    .fg(DEFAULT_THEME.border_focused)
                    .add_modifier(Modifier::BOLD),
            ),
    );
    frame.render_widget(header, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let registers = ctx.state.registers.sorted();
    if registers.is_empty() {
        empty_placeholder(frame, columns[0], pane_block(" Registers "));
    } else {
        let items: Vec<ListItem> = registers
            .into_iter()
            .map(|(name, value)| {
                ListItem::new(Line::from(vec![
                    Span::styled(name.to_string(), Style::default().fg(DEFAULT_THEME.register)),
                    Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)),
                    Span::styled(value.to_string(), Style::default().fg(DEFAULT_THEME.number)),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items).block(pane_block(" Registers ")), columns[0]);
    }

    let memory: Vec<ListItem> = ctx
        .state
        .memory
        .non_zero()
        .map(|(addr, value)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}]", addr), Style::default().fg(DEFAULT_THEME.primary)),
                Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(value.to_string(), Style::default().fg(DEFAULT_THEME.number)),
            ]))
        })
        .collect();
    if memory.is_empty() {
        empty_placeholder(frame, columns[1], pane_block(" Memory (non-zero) "));
    } else {
        frame.render_widget(
            List::new(memory).block(pane_block(" Memory (non-zero) ")),
            columns[1],
        );
    }
}
