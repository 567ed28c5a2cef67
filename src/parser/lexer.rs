/*!
The character-cursor scanner shared by attribute-value parsing and DTD
internal-subset parsing — the two places quick-xml hands this crate an
opaque byte run that still needs XML's own micro-grammar run over it
(entity references, character references, parameter-entity splicing).

The primitives below (`literal`, `find`, `space`, `name`, `hex`, `dec`,
`enumeration`) are a direct transliteration of the lexer functions a
hand-rolled non-validating parser needs for exactly this sub-grammar:
peek/consume a fixed string, scan to a delimiter, skip whitespace, scan a
`Name` token, scan digit runs in either base, and scan a parenthesized
`|`-separated token list.
*/

use crate::name::is_name_char;

/// A forward-only scanner over a document's characters, tracking a single
/// position used both for consumption and for `line_col` error reporting.
#[derive(Clone)]
pub struct Cursor<'a> {
    chars: &'a [char],
    pub pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(chars: &'a [char]) -> Self {
        Cursor { chars, pos: 0 }
    }

    pub fn at(chars: &'a [char], pos: usize) -> Self {
        Cursor { chars, pos }
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    pub fn remaining(&self) -> &'a [char] {
        &self.chars[self.pos..]
    }

    /// The characters consumed since `start`, without advancing.
    pub fn consumed_since(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }

    /// `_next(s)` in spirit: true and consumed iff the upcoming characters
    /// spell `literal` exactly.
    pub fn eat_literal(&mut self, literal: &str) -> bool {
        let wanted: Vec<char> = literal.chars().collect();
        if self.chars[self.pos..].starts_with(wanted.as_slice()) {
            self.pos += wanted.len();
            true
        } else {
            false
        }
    }

    pub fn starts_with(&self, literal: &str) -> bool {
        let wanted: Vec<char> = literal.chars().collect();
        self.chars[self.pos..].starts_with(wanted.as_slice())
    }

    /// `_p_s`: consumes zero or more XML whitespace characters, returning
    /// whether any were consumed (callers use this to enforce "required
    /// whitespace here" in declaration grammars).
    pub fn space(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(' ') | Some('\t') | Some('\n') | Some('\r')) {
            self.pos += 1;
        }
        self.pos != start
    }

    /// `_p_eq`: optional space, a literal `=`, optional space.
    pub fn eq(&mut self) -> bool {
        self.space();
        if !self.eat_literal("=") {
            return false;
        }
        self.space();
        true
    }

    /// `_find`: scans forward to the first occurrence of `delimiter`,
    /// consuming and returning everything before it (not including it).
    /// `None` if `delimiter` never occurs.
    pub fn find(&mut self, delimiter: &str) -> Option<String> {
        let wanted: Vec<char> = delimiter.chars().collect();
        let mut i = self.pos;
        while i + wanted.len() <= self.chars.len() {
            if self.chars[i..i + wanted.len()] == wanted[..] {
                let text: String = self.chars[self.pos..i].iter().collect();
                self.pos = i + wanted.len();
                return Some(text);
            }
            i += 1;
        }
        None
    }

    /// `_p_name`: scans an XML `Name` token (NameStartChar NameChar*).
    pub fn name(&mut self) -> Option<String> {
        let start = self.pos;
        if !matches!(self.peek(), Some(c) if crate::name::is_name_start_char(c)) {
            return None;
        }
        self.pos += 1;
        while matches!(self.peek(), Some(c) if is_name_char(c)) {
            self.pos += 1;
        }
        Some(self.chars[start..self.pos].iter().collect())
    }

    /// `_p_q`: a single- or double-quoted literal, returning its unquoted
    /// contents. The delimiter is whichever quote character starts it.
    pub fn quoted(&mut self) -> Option<String> {
        let quote = self.peek()?;
        if quote != '"' && quote != '\'' {
            return None;
        }
        self.pos += 1;
        let start = self.pos;
        while self.peek().is_some() && self.peek() != Some(quote) {
            self.pos += 1;
        }
        if self.peek() != Some(quote) {
            return None;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        self.pos += 1;
        Some(text)
    }

    /// `_p_lit`: like [`Self::quoted`] but the raw (still-entity-laden) text
    /// between the quotes, for entity literal values that are expanded later.
    pub fn literal_value(&mut self) -> Option<String> {
        self.quoted()
    }

    pub fn hex(&mut self) -> Option<u32> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        u32::from_str_radix(&text, 16).ok()
    }

    pub fn dec(&mut self) -> Option<u32> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse().ok()
    }

    /// `_p_enum`: a parenthesized, `|`-separated list of `Name`/`Nmtoken`
    /// tokens, as used by `NOTATION` and enumerated attribute types.
    pub fn enumeration(&mut self) -> Option<Vec<String>> {
        if !self.eat_literal("(") {
            return None;
        }
        let mut items = Vec::new();
        loop {
            self.space();
            let start = self.pos;
            while matches!(self.peek(), Some(c) if is_name_char(c)) {
                self.pos += 1;
            }
            if self.pos == start {
                return None;
            }
            items.push(self.chars[start..self.pos].iter().collect());
            self.space();
            if self.eat_literal("|") {
                continue;
            }
            break;
        }
        if !self.eat_literal(")") {
            return None;
        }
        Some(items)
    }

    /// `_getLocation`: 1-based row/column of `pos`, counting newlines from
    /// the start of the buffer.
    pub fn line_col(chars: &[char], pos: usize) -> (usize, usize) {
        let mut row = 1;
        let mut col = 1;
        for &c in &chars[..pos.min(chars.len())] {
            if c == '\n' {
                row += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        (row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn scans_name_and_space() {
        let chars = cursor("  foo:bar = 'x'");
        let mut c = Cursor::new(&chars);
        c.space();
        assert_eq!(c.name().as_deref(), Some("foo:bar"));
        assert!(c.eq());
        assert_eq!(c.quoted().as_deref(), Some("x"));
    }

    #[test]
    fn finds_delimiter() {
        let chars = cursor("abc-->rest");
        let mut c = Cursor::new(&chars);
        assert_eq!(c.find("-->").as_deref(), Some("abc"));
        assert_eq!(c.remaining(), cursor("rest").as_slice());
    }

    #[test]
    fn parses_enumeration() {
        let chars = cursor("(a | b |c)");
        let mut c = Cursor::new(&chars);
        assert_eq!(
            c.enumeration(),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn hex_and_dec() {
        let chars = cursor("1F4");
        let mut c = Cursor::new(&chars);
        assert_eq!(c.hex(), Some(0x1F4));

        let chars = cursor("500");
        let mut c = Cursor::new(&chars);
        assert_eq!(c.dec(), Some(500));
    }

    #[test]
    fn line_col_counts_newlines() {
        let chars = cursor("ab\ncd\nef");
        assert_eq!(Cursor::line_col(&chars, 0), (1, 1));
        assert_eq!(Cursor::line_col(&chars, 4), (2, 2));
        assert_eq!(Cursor::line_col(&chars, 7), (3, 2));
    }
}
