//! Color palette shared by the menu and the debugger panes

use ratatui::style::Color;

const TEXT: Color = Color::Rgb(205, 214, 244);
const OVERLAY: Color = Color::Rgb(108, 112, 134);
const SURFACE: Color = Color::Rgb(50, 50, 70);
const BLUE: Color = Color::Rgb(137, 180, 250);
const PEACH: Color = Color::Rgb(250, 179, 135);
const GREEN: Color = Color::Rgb(166, 227, 161);
const RED: Color = Color::Rgb(243, 139, 168);
const YELLOW: Color = Color::Rgb(249, 226, 175);
const TEAL: Color = Color::Rgb(148, 226, 213);
const PINK: Color = Color::Rgb(245, 194, 231);

pub struct Theme {
    pub fg: Color,
    pub primary: Color,
    pub secondary: Color,
    pub comment: Color,
    pub success: Color,
    pub error: Color,
    /// Opcode mnemonics
    pub keyword: Color,
    /// Integer literals and register values
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    /// Pending line and status bar background
    pub current_line_bg: Color,
    /// Text drawn on top of colored badges
    pub badge_fg: Color,
    pub register: Color,
    /// `#<line>` operands
    pub jump_target: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: TEXT,
    primary: BLUE,
    secondary: PEACH,
    comment: OVERLAY,
    success: GREEN,
    error: RED,
    keyword: BLUE,
    number: PEACH,
    border_focused: YELLOW,
    border_normal: OVERLAY,
    current_line_bg: SURFACE,
    badge_fg: Color::Black,
    register: TEAL,
    jump_target: PINK,
};
