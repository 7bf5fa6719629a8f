//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]**: terminal setup and teardown, crossterm key input, the debugger renderer
//! - **[`menu`]**: main menu, program file picker and settings screen
//! - **[`panes`]**: stateless render functions for the step view, state view and status bar
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The binary builds a debugger with [`terminal_debugger`] (or [`plain_debugger`]
//! for the text front-end) and hands it to the interpreter as its observer.

pub mod app;
pub mod menu;
pub mod panes;
pub mod theme;

pub use app::{plain_debugger, terminal_debugger, TerminalGuard};
pub use menu::{Menu, MenuChoice};
