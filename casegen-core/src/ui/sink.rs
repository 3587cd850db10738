//! Output regions for streamed generation results
//!
//! A [`DisplaySink`] is bound to one output region. Every `render` call
//! carries the complete text generated so far and replaces whatever the
//! region showed before.

use crate::ui::markdown::MarkdownRenderer;
use crate::ui::spinner::Spinner;
use console::style;
use crossterm::{
    cursor::{MoveToColumn, MoveUp},
    queue,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use tracing::{debug, warn};

/// Fallback height when the terminal size cannot be determined
const DEFAULT_HEIGHT: usize = 24;

/// Display region for generated output
pub trait DisplaySink {
    /// Replace the region's content with `full_text`
    fn render(&mut self, full_text: &str);

    /// Show an error beneath the current content
    fn error(&mut self, message: &str);

    /// Release the region once the generation is over
    fn finish(&mut self) {}
}

/// Progress of line-by-line output after the top of the region scrolled away
struct Appended {
    /// Latest source text
    source: String,
    /// Bytes of `source` already written, always at a line boundary
    committed: usize,
}

/// Repaints Markdown output in place on an ANSI terminal
pub struct TerminalSink<W: Write> {
    out: W,
    renderer: MarkdownRenderer,
    height: usize,
    drawn_rows: usize,
    /// Set once the region outgrew the terminal and is written line by line
    appended: Option<Appended>,
    spinner: Option<Spinner>,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout(renderer: MarkdownRenderer) -> Self {
        Self::new(io::stdout(), renderer)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, renderer: MarkdownRenderer) -> Self {
        Self {
            out,
            renderer,
            height: terminal_height(),
            drawn_rows: 0,
            appended: None,
            spinner: None,
        }
    }

    /// Show `spinner` until the first render or error
    pub fn with_spinner(mut self, spinner: Spinner) -> Self {
        self.spinner = Some(spinner);
        self
    }

    pub fn with_height(mut self, height: usize) -> Self {
        self.height = height.max(1);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn hide_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn repaint(&mut self, full_text: &str) -> io::Result<()> {
        if self.appended.is_some() {
            return self.append_lines(full_text);
        }

        let rendered = self.renderer.render(full_text);
        let rows = self.renderer.rows(&rendered);

        if self.drawn_rows > 0 {
            let up = u16::try_from(self.drawn_rows).unwrap_or(u16::MAX);
            queue!(
                self.out,
                MoveUp(up),
                MoveToColumn(0),
                Clear(ClearType::FromCursorDown)
            )?;
        }
        self.drawn_rows = 0;

        if rows >= self.height {
            debug!(rows, height = self.height, "output taller than terminal, appending");
            self.appended = Some(Appended {
                source: String::new(),
                committed: 0,
            });
            return self.append_lines(full_text);
        }

        self.out.write_all(rendered.as_bytes())?;
        self.drawn_rows = rows;
        self.out.flush()
    }

    /// Write the completed lines not yet on screen, holding back the unfinished tail
    fn append_lines(&mut self, full_text: &str) -> io::Result<()> {
        let Some(state) = self.appended.as_mut() else {
            return Ok(());
        };
        let start = if full_text.starts_with(&state.source[..state.committed]) {
            state.committed
        } else {
            0
        };
        let fresh = &full_text[start..];
        if let Some(end) = fresh.rfind('\n') {
            let lines = self.renderer.render_lines(&fresh[..end]);
            self.out.write_all(lines.as_bytes())?;
            state.committed = start + end + 1;
        } else {
            state.committed = start;
        }
        state.source = full_text.to_string();
        self.out.flush()
    }

    fn commit(&mut self) -> io::Result<()> {
        if let Some(state) = self.appended.take() {
            let tail = &state.source[state.committed..];
            if !tail.is_empty() {
                let lines = self.renderer.render_lines(tail);
                self.out.write_all(lines.as_bytes())?;
            }
        }
        self.drawn_rows = 0;
        self.out.flush()
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn render(&mut self, full_text: &str) {
        self.hide_spinner();
        if let Err(e) = self.repaint(full_text) {
            warn!("failed to write output: {e}");
        }
    }

    fn error(&mut self, message: &str) {
        self.hide_spinner();
        let result = self
            .commit()
            .and_then(|_| writeln!(self.out, "{}", style(message).red().bold()))
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!("failed to write error: {e}");
        }
    }

    fn finish(&mut self) {
        self.hide_spinner();
        if let Err(e) = self.commit() {
            warn!("failed to flush output: {e}");
        }
    }
}

/// Writes raw Markdown for pipes and redirected output
pub struct PlainSink<W: Write> {
    out: W,
    written: String,
}

impl PlainSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> PlainSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            written: String::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_delta(&mut self, full_text: &str) -> io::Result<()> {
        match full_text.strip_prefix(self.written.as_str()) {
            Some(suffix) => self.out.write_all(suffix.as_bytes())?,
            None => {
                // Not an extension of what was written: start over on a new line.
                self.end_line()?;
                self.out.write_all(full_text.as_bytes())?;
            }
        }
        self.written = full_text.to_string();
        self.out.flush()
    }

    fn end_line(&mut self) -> io::Result<()> {
        if !self.written.is_empty() && !self.written.ends_with('\n') {
            writeln!(self.out)?;
        }
        self.written.clear();
        Ok(())
    }
}

impl<W: Write> DisplaySink for PlainSink<W> {
    fn render(&mut self, full_text: &str) {
        if let Err(e) = self.write_delta(full_text) {
            warn!("failed to write output: {e}");
        }
    }

    fn error(&mut self, message: &str) {
        let result = self
            .end_line()
            .and_then(|_| writeln!(self.out, "{message}"))
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!("failed to write error: {e}");
        }
    }

    fn finish(&mut self) {
        if let Err(e) = self.end_line().and_then(|_| self.out.flush()) {
            warn!("failed to flush output: {e}");
        }
    }
}

fn terminal_height() -> usize {
    terminal_size::terminal_size()
        .map(|(_, terminal_size::Height(h))| h as usize)
        .filter(|h| *h > 0)
        .unwrap_or(DEFAULT_HEIGHT)
}
