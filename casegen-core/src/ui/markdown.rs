//! Markdown rendering for terminal output using termimad.

use termimad::{FmtText, MadSkin, ansi};

/// Fallback width when the terminal size cannot be determined
const DEFAULT_WIDTH: usize = 100;

/// Renders Markdown to ANSI-styled text, or passes it through unchanged
#[derive(Clone)]
pub struct MarkdownRenderer {
    skin: MadSkin,
    width: usize,
    styled: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MarkdownRenderer {
    /// `styled = false` keeps the raw Markdown source
    pub fn new(styled: bool) -> Self {
        Self {
            skin: casegen_skin(),
            width: terminal_width(),
            styled,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Render `text`, always ending with a newline
    pub fn render(&self, text: &str) -> String {
        let mut rendered = if self.styled {
            FmtText::from(&self.skin, text, Some(self.width)).to_string()
        } else {
            text.to_string()
        };
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        rendered
    }

    /// Render each source line of `text` on its own, so output can be
    /// emitted line by line once earlier rows have scrolled away
    pub fn render_lines(&self, text: &str) -> String {
        text.split('\n').map(|line| self.render(line)).collect()
    }

    /// Number of terminal rows `rendered` occupies at the configured width
    pub fn rows(&self, rendered: &str) -> usize {
        rendered
            .lines()
            .map(|line| {
                let visible = console::measure_text_width(line);
                visible.div_ceil(self.width).max(1)
            })
            .sum()
    }
}

fn casegen_skin() -> MadSkin {
    let mut skin = MadSkin::default();
    skin.set_headers_fg(ansi(178));
    skin.bold.set_fg(ansi(214));
    skin.italic.set_fg(ansi(110));
    skin.inline_code.set_fg(ansi(180));
    skin.code_block.set_fg(ansi(180));
    skin
}

/// Terminal width in columns, `DEFAULT_WIDTH` when unknown
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .filter(|w| *w > 0)
        .unwrap_or(DEFAULT_WIDTH)
}
