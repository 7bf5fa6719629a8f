//! Main menu, file picker and settings screen

use crate::config::{Settings, PROGRAM_EXTENSION};
use crate::ui::theme::DEFAULT_THEME;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What the operator picked from the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Run,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Main,
    Files,
    Settings,
}

const MAIN_OPTIONS: [&str; 4] = ["Run", "Select File", "Settings", "Exit"];
const SETTINGS_OPTIONS: [&str; 3] = ["Debug Mode", "Save Main Menu", "Back to Main Menu"];

/// Program files in `dir`, sorted by name
pub fn find_programs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == PROGRAM_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub struct Menu {
    settings: Settings,
    dir: PathBuf,
    screen: Screen,
    index: usize,
    files: Vec<PathBuf>,
    notice: Option<String>,
}

impl Menu {
    pub fn new(settings: Settings, dir: impl Into<PathBuf>) -> Self {
        Menu {
            settings,
            dir: dir.into(),
            screen: Screen::Main,
            index: 0,
            files: Vec::new(),
            notice: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Draw and handle keys until the operator picks Run or Exit
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<MenuChoice> {
        loop {
            terminal.draw(|frame| self.render(frame))?;
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(choice) = self.handle_key(key.code) {
                        return Ok(choice);
                    }
                }
            }
        }
    }

    fn option_count(&self) -> usize {
        match self.screen {
            Screen::Main => MAIN_OPTIONS.len(),
            Screen::Files => self.files.len(),
            Screen::Settings => SETTINGS_OPTIONS.len(),
        }
    }

    fn switch_to(&mut self, screen: Screen) {
        self.screen = screen;
        self.index = 0;
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Option<MenuChoice> {
        match code {
            KeyCode::Up => {
                self.index = self.index.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                if self.index + 1 < self.option_count() {
                    self.index += 1;
                }
                None
            }
            KeyCode::Esc if self.screen != Screen::Main => {
                self.switch_to(Screen::Main);
                None
            }
            KeyCode::Char('q') if self.screen == Screen::Main => Some(MenuChoice::Exit),
            KeyCode::Left | KeyCode::Right if self.screen == Screen::Settings => {
                self.toggle_setting();
                None
            }
            KeyCode::Enter => self.select(),
            _ => None,
        }
    }

    fn select(&mut self) -> Option<MenuChoice> {
        self.notice = None;
        match self.screen {
            Screen::Main => match MAIN_OPTIONS[self.index] {
                "Run" => {
                    if self.settings.file.is_some() {
                        Some(MenuChoice::Run)
                    } else {
                        self.set_notice("No file selected.");
                        None
                    }
                }
                "Select File" => {
                    match find_programs(&self.dir) {
                        Ok(files) if !files.is_empty() => {
                            self.files = files;
                            self.switch_to(Screen::Files);
                        }
                        Ok(_) => self.set_notice(format!("No .{} files found.", PROGRAM_EXTENSION)),
                        Err(err) => self.set_notice(format!("Cannot list files: {}", err)),
                    }
                    None
                }
                "Settings" => {
                    self.switch_to(Screen::Settings);
                    None
                }
                _ => Some(MenuChoice::Exit),
            },
            Screen::Files => {
                self.settings.file = self.files.get(self.index).cloned();
                self.switch_to(Screen::Main);
                None
            }
            Screen::Settings => {
                if self.index + 1 == SETTINGS_OPTIONS.len() {
                    self.switch_to(Screen::Main);
                } else {
                    self.toggle_setting();
                }
                None
            }
        }
    }

    fn toggle_setting(&mut self) {
        match self.index {
            0 => self.settings.debug = !self.settings.debug,
            1 => self.settings.save = !self.settings.save,
            _ => {}
        }
    }

    fn file_label(&self) -> String {
        self.settings
            .file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string())
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let on_off = |flag: bool| if flag { "ON" } else { "OFF" };
        let header = Paragraph::new(Line::from(vec![
            Span::styled("File to execute: ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(self.file_label(), Style::default().fg(DEFAULT_THEME.secondary)),
            Span::styled(", Debug Mode: ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                on_off(self.settings.debug),
                Style::default().fg(DEFAULT_THEME.primary),
            ),
        ]));
        frame.render_widget(header, chunks[0]);

        let (title, labels): (&str, Vec<String>) = match self.screen {
            Screen::Main => (
                " Assembly Interpreter ",
                MAIN_OPTIONS.iter().map(|s| s.to_string()).collect(),
            ),
            Screen::Files => (
                " Select a file ",
                self.files.iter().map(|p| p.display().to_string()).collect(),
            ),
            Screen::Settings => (
                " Settings ",
                SETTINGS_OPTIONS
                    .iter()
                    .enumerate()
                    .map(|(i, label)| {
                        let status = match i {
                            0 => format!("{:<3}", on_off(self.settings.debug)),
                            1 => format!("{:<3}", on_off(self.settings.save)),
                            _ => "   ".to_string(),
                        };
                        format!("[ {} ] {}", status, label)
                    })
                    .collect(),
            ),
        };

        let items: Vec<ListItem> = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                if i == self.index {
                    ListItem::new(format!("> {}", label)).style(
                        Style::default()
                            .fg(DEFAULT_THEME.border_focused)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ListItem::new(format!("  {}", label))
                        .style(Style::default().fg(DEFAULT_THEME.fg))
                }
            })
            .collect();

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(DEFAULT_THEME.border_normal));
        frame.render_widget(List::new(items).block(block), chunks[1]);

        let footer = match &self.notice {
            Some(notice) => Paragraph::new(notice.as_str()).style(Style::default().fg(DEFAULT_THEME.error)),
            None => Paragraph::new("↑/↓ move | ↵ select | ←/→ toggle | esc back | q quit")
                .style(Style::default().fg(DEFAULT_THEME.comment)),
        };
        frame.render_widget(footer, chunks[2]);
    }
}
