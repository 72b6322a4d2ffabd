//! Minimal comma-separated codec for the dataset file.
//!
//! Fields containing the separator, quotes, CR or LF are quoted with inner
//! quotes doubled. The parser tolerates CRLF and unterminated trailing quotes.

use std::io::{self, Write};
use std::mem::take;

pub const SEP: char = ',';

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write one row to any writer, LF-terminated.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{SEP}")?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}

/// Split CSV text into rows of fields. Blank lines are dropped.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            c if c == SEP && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(take(&mut field));
                if row.len() == 1 && row[0].is_empty() {
                    row.clear();
                } else {
                    rows.push(take(&mut row));
                }
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Render words as a bracketed list of quoted strings: `['a', 'b']`.
///
/// Words holding a single quote (and no double quote) are wrapped in double
/// quotes; otherwise single quotes are used and `\` / `'` are escaped.
pub fn render_word_list(words: &[String]) -> String {
    let mut out = String::from("[");
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if word.contains('\'') && !word.contains('"') {
            out.push('"');
            out.push_str(&word.replace('\\', "\\\\"));
            out.push('"');
        } else {
            out.push('\'');
            out.push_str(&word.replace('\\', "\\\\").replace('\'', "\\'"));
            out.push('\'');
        }
    }
    out.push(']');
    out
}

/// Inverse of [`render_word_list`]. Returns `None` on malformed input.
pub fn parse_word_list(text: &str) -> Option<Vec<String>> {
    let inner = text.trim().strip_prefix('[')?.strip_suffix(']')?;
    let mut words = Vec::new();
    let mut chars = inner.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        let Some(quote) = chars.next() else {
            return Some(words);
        };
        if quote != '\'' && quote != '"' {
            return None;
        }

        let mut word = String::new();
        loop {
            match chars.next()? {
                '\\' => word.push(chars.next()?),
                c if c == quote => break,
                c => word.push(c),
            }
        }
        words.push(word);

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        match chars.next() {
            None => return Some(words),
            Some(',') => continue,
            Some(_) => return None,
        }
    }
}
