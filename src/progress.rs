//! Status reporting for long-running loops
//!
//! EM restarts and permutation scoring report their progress through a
//! [`Reporter`] handed in by the caller. The reporter lives for one command
//! invocation; there is no process-wide status state.

use std::io::Write;

/// Receiver of progress messages
pub trait Reporter {
    /// Report a single status message
    fn report(&mut self, message: &str);
}

/// Discards every message
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Reporter for Silent {
    fn report(&mut self, _message: &str) {}
}

/// Single-line terminal status
///
/// Each message overwrites the previous one in place: the line is blanked to
/// the widest message seen so far, then the new message is written without
/// advancing the line.
#[derive(Debug)]
pub struct StatusLine<W: Write> {
    out: W,
    width: usize,
}

impl<W: Write> StatusLine<W> {
    pub fn new(out: W) -> Self {
        Self { out, width: 0 }
    }

    /// Widest message written so far (tabs expanded)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Consume the status line and return the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl StatusLine<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> Reporter for StatusLine<W> {
    fn report(&mut self, message: &str) {
        let blank = " ".repeat(self.width);
        // Best effort; write failures are ignored.
        let _ = write!(self.out, "\r{}\r{}", blank, message);
        let _ = self.out.flush();
        self.width = self.width.max(expanded_width(message));
    }
}

/// Display width of `message` with tabs expanded to 8-column stops
fn expanded_width(message: &str) -> usize {
    message.chars().fold(0, |col, c| {
        if c == '\t' {
            col + 8 - col % 8
        } else {
            col + 1
        }
    })
}
