//! Parser trait definition and shared Cursor tokenizer.

use crate::error::SankeyResult;
use crate::syntax::types::FlowData;

// ─── Parser trait ────────────────────────────────────────────────────────────

/// Trait for flow dataset parsers.
///
/// Each input syntax implements this trait.
pub trait Parser {
    /// Parse the input source string into a FlowData.
    fn parse(&self, src: &str) -> SankeyResult<FlowData>;
}

/// Header keywords accepted before the first row, longest first.
pub const HEADER_KEYWORDS: &[&str] = &["sankey-beta", "sankey"];

// ─── Cursor (stateful tokenizer) ─────────────────────────────────────────────

/// Stateful parser cursor over the input string.
///
/// `line` is 1-based and tracks every newline the cursor has stepped over,
/// including newlines inside quoted fields.
pub struct Cursor {
    pub src: Vec<char>,
    pub pos: usize,
    pub line: usize,
}

impl Cursor {
    pub fn new(src: &str) -> Self {
        Self {
            src: src.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn current(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }

    /// Peek whether the next chars match the given string.
    pub fn peek(&self, s: &str) -> bool {
        let chars: Vec<char> = s.chars().collect();
        if self.pos + chars.len() > self.src.len() {
            return false;
        }
        self.src[self.pos..self.pos + chars.len()] == chars[..]
    }

    /// Consume `s` if it matches; returns true if consumed.
    pub fn consume(&mut self, s: &str) -> bool {
        if self.peek(s) {
            self.pos += s.chars().count();
            true
        } else {
            false
        }
    }

    /// Skip horizontal whitespace (spaces/tabs).
    pub fn skip_ws(&mut self) {
        while matches!(self.current(), Some(' ') | Some('\t')) {
            self.pos += 1;
        }
    }

    /// Skip whitespace, newlines, and `%% ...` comment lines.
    pub fn skip_ws_and_newlines(&mut self) {
        loop {
            self.skip_ws();
            if self.consume_newline() {
                continue;
            }
            if self.peek("%%") {
                self.skip_to_eol();
                continue;
            }
            break;
        }
    }

    /// Advance to (but not past) the next newline.
    pub fn skip_to_eol(&mut self) {
        while let Some(ch) = self.current() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.pos += 1;
        }
    }

    /// Consume a newline (`\r\n`, `\n`, or `\r`). Returns true if consumed.
    pub fn consume_newline(&mut self) -> bool {
        match self.current() {
            Some('\r') => {
                self.pos += 1;
                if self.current() == Some('\n') {
                    self.pos += 1;
                }
                self.line += 1;
                true
            }
            Some('\n') => {
                self.pos += 1;
                self.line += 1;
                true
            }
            _ => false,
        }
    }

    /// True when the cursor sits on a newline or at end of input.
    pub fn at_eol(&self) -> bool {
        matches!(self.current(), None | Some('\n') | Some('\r'))
    }

    /// Try to consume a `sankey-beta` / `sankey` header line (case-insensitive).
    ///
    /// Only whitespace or a `%%` comment may follow the keyword on its line, so
    /// a data row whose first name starts with the keyword is left alone.
    /// Returns true if a header was consumed; otherwise the cursor is restored.
    pub fn try_parse_header(&mut self) -> bool {
        let saved = (self.pos, self.line);
        self.skip_ws_and_newlines();
        let start = self.pos;
        for keyword in HEADER_KEYWORDS {
            let len = keyword.chars().count();
            if start + len > self.src.len() {
                continue;
            }
            let candidate: String = self.src[start..start + len].iter().collect();
            if !candidate.eq_ignore_ascii_case(keyword) {
                continue;
            }
            self.pos = start + len;
            self.skip_ws();
            if self.at_eol() || self.peek("%%") {
                self.skip_to_eol();
                self.consume_newline();
                return true;
            }
            self.pos = start;
        }
        (self.pos, self.line) = saved;
        false
    }

    /// Parse a double-quoted CSV field. `""` inside the quotes is a literal quote;
    /// commas and newlines are kept verbatim.
    pub fn parse_quoted_field(&mut self) -> Result<String, String> {
        // Caller must have verified src[pos] == '"'
        self.pos += 1;
        let mut buf = String::new();
        loop {
            let Some(ch) = self.current() else {
                return Err("unterminated quoted field".to_string());
            };
            if ch == '"' {
                if self.peek("\"\"") {
                    buf.push('"');
                    self.pos += 2;
                    continue;
                }
                self.pos += 1;
                return Ok(buf);
            }
            if ch == '\n' {
                self.line += 1;
            }
            buf.push(ch);
            self.pos += 1;
        }
    }

    /// Parse a bare field: everything up to `,` or end of line, trimmed.
    pub fn parse_bare_field(&mut self) -> String {
        let start = self.pos;
        while let Some(ch) = self.current() {
            if ch == ',' || ch == '\n' || ch == '\r' {
                break;
            }
            self.pos += 1;
        }
        let field: String = self.src[start..self.pos].iter().collect();
        field.trim().to_string()
    }

    /// Parse one field, quoted or bare.
    pub fn parse_field(&mut self) -> Result<String, String> {
        self.skip_ws();
        if self.current() == Some('"') {
            let field = self.parse_quoted_field()?;
            self.skip_ws();
            return Ok(field);
        }
        Ok(self.parse_bare_field())
    }

    /// Parse a comma-separated row up to and including its newline.
    pub fn parse_row(&mut self) -> Result<Vec<String>, String> {
        let mut fields = vec![self.parse_field()?];
        while self.consume(",") {
            fields.push(self.parse_field()?);
        }
        self.skip_ws();
        if !self.at_eol() {
            let ch = self.current().unwrap_or(' ');
            return Err(format!("unexpected character '{ch}' after field"));
        }
        self.consume_newline();
        Ok(fields)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
#[path = "../../tests/rust/test_parsers_base.rs"]
mod tests;
