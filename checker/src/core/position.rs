//! Source position tracking for diagnostics.

/// Field label used until the first parse call names one.
pub const UNNAMED_FIELD: &str = "<?>";

/// Where the reader currently is, and which field it is parsing.
///
/// `line` starts at 1 and `column` at 0. Every consumed byte (including a
/// delimiter and the final end-of-stream probe) advances the column; the
/// byte after a newline moves to column 1 of the next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub source: String,
    pub line: usize,
    pub column: usize,
    pub field: String,
    after_newline: bool,
}

impl Position {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            line: 1,
            column: 0,
            field: UNNAMED_FIELD.to_string(),
            after_newline: false,
        }
    }

    /// Record that one more byte (or end-of-stream, `None`) was consumed.
    pub fn advance(&mut self, byte: Option<u8>) {
        if self.after_newline {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.after_newline = byte == Some(b'\n');
    }

    pub fn set_field(&mut self, field: &str) {
        self.field.clear();
        self.field.push_str(field);
    }

    /// `name(line,col,field)`, the prefix of every format error.
    pub fn describe(&self) -> String {
        format!(
            "{}({},{},{})",
            self.source, self.line, self.column, self.field
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(position: &mut Position, bytes: &[u8]) {
        for &b in bytes {
            position.advance(Some(b));
        }
    }

    #[test]
    fn starts_before_first_column() {
        let position = Position::new("<stdin>");
        assert_eq!(position.describe(), "<stdin>(1,0,<?>)");
    }

    #[test]
    fn newline_belongs_to_its_own_line() {
        let mut position = Position::new("in");
        feed(&mut position, b"12\n");
        assert_eq!((position.line, position.column), (1, 3));
        position.advance(Some(b'7'));
        assert_eq!((position.line, position.column), (2, 1));
    }

    #[test]
    fn end_of_stream_still_advances() {
        let mut position = Position::new("in");
        feed(&mut position, b"5");
        position.advance(None);
        assert_eq!((position.line, position.column), (1, 2));
    }

    #[test]
    fn field_label_appears_in_description() {
        let mut position = Position::new("data.txt");
        position.set_field("xs[3]");
        feed(&mut position, b"1 ");
        assert_eq!(position.describe(), "data.txt(1,2,xs[3])");
    }
}
