//! Structured block emission
//!
//! All wire-format output flows through [`BlockWriter`], which owns the
//! output buffer and the current nesting depth. Blocks are opened and closed
//! as a pair, so brace matching is enforced by construction instead of by
//! hand-assembled string templates.

use std::fmt::{self, Write};

/// The exact float shape the format contract requires: four fractional
/// digits with a fixed-width sign column (space for non-negative, `-` for
/// negative, following the sign bit, so `-0.0` renders as `-0.0000`).
pub fn ase_float(x: f64) -> String {
    let s = format!("{:.4}", x);
    if s.starts_with('-') { s } else { format!(" {}", s) }
}

/// Three floats tab-separated, each in [`ase_float`] shape
pub fn ase_triple(a: f64, b: f64, c: f64) -> String {
    format!("{}\t{}\t{}", ase_float(a), ase_float(b), ase_float(c))
}

/// Tab-indented, depth-tracking writer for brace-delimited blocks
#[derive(Debug, Default)]
pub struct BlockWriter {
    out: String,
    depth: usize,
}

impl BlockWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current depth
    pub fn line(&mut self, args: fmt::Arguments<'_>) {
        self.indent();
        // Writing into a String cannot fail
        let _ = self.out.write_fmt(args);
        self.out.push('\n');
    }

    /// Write one pre-formatted line at the current depth
    pub fn raw_line(&mut self, text: &str) {
        self.indent();
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Open a block: `*KEYWORD ... {` and one level of nesting
    pub fn open(&mut self, args: fmt::Arguments<'_>) {
        self.indent();
        let _ = self.out.write_fmt(args);
        self.out.push_str(" {\n");
        self.depth += 1;
    }

    /// Close the innermost open block
    pub fn close(&mut self) {
        debug_assert!(self.depth > 0, "close without matching open");
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.out.push_str("}\n");
    }

    /// Open a block, run `body`, close it
    pub fn block(&mut self, args: fmt::Arguments<'_>, body: impl FnOnce(&mut Self)) {
        self.open(args);
        body(self);
        self.close();
    }

    /// Consume the writer and return the emitted text
    pub fn finish(self) -> String {
        debug_assert_eq!(self.depth, 0, "unclosed block at end of document");
        self.out
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push('\t');
        }
    }
}
