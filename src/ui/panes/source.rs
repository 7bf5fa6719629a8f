//! Step view: program listing with the pending line highlighted
//!
//! # Features
//!
//! - Light syntax highlighting for mnemonics, registers, addresses and jump targets
//! - Current line highlighting with a fixed visual row while stepping
//! - Lines that failed to decode get an error-colored line number

use crate::parser::ast::{Decoded, Opcode, Program};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Highlight one assembly line
fn highlight_source_code(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current_word = String::new();
    let mut first_word = true;

    for c in line.chars() {
        if c.is_whitespace() || matches!(c, ',' | '[' | ']' | '=') {
            flush_word(&mut current_word, &mut spans, &mut first_word);
            let style = match c {
                '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                '=' | ',' => Style::default().fg(DEFAULT_THEME.fg),
                _ => Style::default(),
            };
            spans.push(Span::styled(c.to_string(), style));
        } else {
            current_word.push(c);
        }
    }
    flush_word(&mut current_word, &mut spans, &mut first_word);

    Line::from(spans)
}

fn flush_word(word: &mut String, spans: &mut Vec<Span<'static>>, first: &mut bool) {
    if word.is_empty() {
        return;
    }
    let style = get_word_style(word, *first);
    spans.push(Span::styled(std::mem::take(word), style));
    *first = false;
}

fn get_word_style(word: &str, is_mnemonic: bool) -> Style {
    if is_mnemonic {
        return if Opcode::from_mnemonic(word).is_some() {
            Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.error)
        };
    }
    if word.starts_with('#') {
        Style::default().fg(DEFAULT_THEME.jump_target)
    } else if word.parse::<i64>().is_ok() {
        Style::default().fg(DEFAULT_THEME.number)
    } else {
        Style::default().fg(DEFAULT_THEME.register)
    }
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Render the program listing; `current` is the zero-based pending line
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    program: &Program,
    current: usize,
    scroll_state: &mut SourceScrollState,
) {
    let block = Block::default()
        .title(" Program ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    let total_lines = program.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Keep the pending line around the middle of the pane
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    scroll_state.offset = current.saturating_sub(target_row);
    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = program
        .lines()
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let is_current = idx == current;
            let is_invalid = matches!(line.decoded, Decoded::Invalid(_));
            let line_num_str = format!("{:03} ", line.number);

            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else if is_invalid {
                Style::default().fg(DEFAULT_THEME.error)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content_line = highlight_source_code(line.text.trim());
            if is_current {
                let current_style = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content_line.spans {
                    span.style = span.style.patch(current_style);
                }
            }

            let marker = if is_current { "▶ " } else { "  " };
            let mut final_spans = vec![
                Span::styled(marker, num_style),
                Span::styled(line_num_str, num_style),
            ];
            final_spans.extend(content_line.spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
