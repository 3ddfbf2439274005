//! GEDCOM lexer: splits a document into `LEVEL [@XREF@] TAG [VALUE]` lines.

use crate::{Error, Result};

/// One GEDCOM line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub level: usize,
    /// Record identifier without the surrounding `@`.
    pub xref: Option<String>,
    /// Tag, upper-cased (`INDI`, `FAMC`, `_FREL`, …).
    pub tag: String,
    pub value: Option<String>,
    /// 1-based source line number.
    pub number: usize,
}

/// Tokenize GEDCOM text. Blank lines and a leading byte-order mark are skipped.
pub fn tokenize(input: &str) -> Result<Vec<Line>> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut lines = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let number = idx + 1;
        let text = raw.trim_start().trim_end_matches(['\r', '\n']);
        if text.trim().is_empty() {
            continue;
        }
        lines.push(tokenize_line(text, number)?);
    }

    Ok(lines)
}

fn tokenize_line(text: &str, number: usize) -> Result<Line> {
    let error = |message: &str| Error::UnreadableInput { line: number, message: message.into() };

    let (level, rest) = text.split_once(' ').unwrap_or((text, ""));
    let level: usize = level
        .parse()
        .map_err(|_| error("line does not start with a level number"))?;
    let rest = rest.trim_start_matches(' ');

    let (xref, rest) = match rest.split_once(' ') {
        Some((word, tail)) if is_pointer(word) => (Some(strip_pointer(word).to_string()), tail),
        _ if is_pointer(rest) => return Err(error("record identifier without a tag")),
        _ => (None, rest),
    };
    let rest = rest.trim_start_matches(' ');

    let (tag, value) = match rest.split_once(' ') {
        Some((tag, value)) => (tag, Some(value.to_string())),
        None => (rest, None),
    };
    if tag.is_empty() {
        return Err(error("missing tag"));
    }

    Ok(Line {
        level,
        xref,
        tag: tag.to_ascii_uppercase(),
        value: value.filter(|v| !v.is_empty()),
        number,
    })
}

/// `@I1@` style pointer.
pub fn is_pointer(word: &str) -> bool {
    word.len() > 2 && word.starts_with('@') && word.ends_with('@')
}

pub fn strip_pointer(word: &str) -> &str {
    word.trim().trim_matches('@')
}
