//! TUI pane rendering modules
//!
//! - [`source`]: step view, the program listing with the pending line highlighted
//! - [`state`]: state view, the pending instruction plus registers and memory
//! - [`status`]: status bar with keybindings and the latest diagnostic
//!
//! Each module exports a stateless `render_*` function; the source pane also
//! keeps a small scroll state between frames.

pub mod source;
pub mod state;
pub mod status;

pub use source::{render_source_pane, SourceScrollState};
pub use state::render_state_pane;
pub use status::render_status_bar;
