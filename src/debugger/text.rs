//! Plain-text debugger renderer
//!
//! Writes either view as text to any [`Write`] sink. Used for `--plain`
//! debugging on a raw-mode terminal and for headless tests over `Vec<u8>`.
//! Lines end in `\r\n` because raw mode does not translate newlines.

use super::{StepContext, View, ViewRenderer};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::Stylize,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

pub struct TextRenderer<W: Write> {
    out: W,
    width: usize,
    clear: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, width: usize) -> Self {
        TextRenderer {
            out,
            width,
            clear: false,
        }
    }

    /// Clear the screen before each frame
    pub fn with_clear(mut self) -> Self {
        self.clear = true;
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn header(&mut self, view: View) -> io::Result<()> {
        let title = format!(" DEBUG MODE [{}] ", view.title());
        let pad = self.width.saturating_sub(title.len());
        let left = pad / 2;
        write!(
            self.out,
            "{}{}{}\r\n\r\n",
            "=".repeat(left),
            title,
            "=".repeat(pad - left)
        )
    }

    fn render_step(&mut self, ctx: &StepContext<'_>) -> io::Result<()> {
        for (idx, line) in ctx.program.lines().iter().enumerate() {
            let text = format!("{:03}: {}", idx + 1, line.text.trim());
            if idx == ctx.pc {
                write!(self.out, "{}\r\n", text.on_red())?;
            } else {
                write!(self.out, "{}\r\n", text)?;
            }
        }
        write!(
            self.out,
            "\r\n(Space/Right = next | Esc/Tab = state view | q = quit)\r\n"
        )
    }

    fn render_state(&mut self, ctx: &StepContext<'_>) -> io::Result<()> {
        let current = ctx.current_line().map(|l| l.text.trim()).unwrap_or("");
        write!(self.out, "Instruction [{:03}]: {}\r\n\r\n", ctx.pc + 1, current)?;

        write!(self.out, "=== Registers ===\r\n")?;
        let registers = ctx.state.registers.sorted();
        if registers.is_empty() {
            write!(self.out, "  (none)\r\n")?;
        }
        for (name, value) in registers {
            write!(self.out, "  {} = {}\r\n", name, value)?;
        }

        write!(self.out, "\r\n=== Memory (non-zero only) ===\r\n")?;
        let mut any = false;
        for (addr, value) in ctx.state.memory.non_zero() {
            any = true;
            write!(self.out, "  [{}] = {}\r\n", addr, value)?;
        }
        if !any {
            write!(self.out, "  (none)\r\n")?;
        }

        write!(
            self.out,
            "\r\n(Space/Right = next | Esc/Tab = step view | q = quit)\r\n"
        )
    }
}

impl<W: Write> ViewRenderer for TextRenderer<W> {
    fn render(&mut self, view: View, ctx: &StepContext<'_>) -> io::Result<()> {
        if self.clear {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        self.header(view)?;
        match view {
            View::Step => self.render_step(ctx)?,
            View::State => self.render_state(ctx)?,
        }
        if let Some(diagnostic) = ctx.last_diagnostic() {
            write!(self.out, "{}\r\n", diagnostic.to_string().red())?;
        }
        self.out.flush()
    }
}
