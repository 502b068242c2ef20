//! Table module.
//!
//! This module renders rows of cells as aligned columns. Widths are
//! measured in terminal columns so that wide characters (CJK translations
//! for instance) stay aligned.

use anyhow::Result;
use std::io::Write;
use termcolor::{Color, ColorSpec, WriteColor};
use unicode_width::UnicodeWidthStr;

const COLUMN_SEPARATOR: &str = "  ";

/// Represents a table cell.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cell {
    value: String,
    color: Option<Color>,
    bold: bool,
}

impl Cell {
    pub fn new<T: ToString>(value: T) -> Self {
        Self {
            // tabs and newlines would break the alignment
            value: value.to_string().replace(&['\t', '\r', '\n'][..], " "),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn bold_if(self, predicate: bool) -> Self {
        if predicate {
            self.bold()
        } else {
            self
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn color_if(self, color: Color, predicate: bool) -> Self {
        if predicate {
            self.color(color)
        } else {
            self
        }
    }

    pub fn width(&self) -> usize {
        UnicodeWidthStr::width(self.value.as_str())
    }

    fn print(&self, writer: &mut dyn WriteColor, width: usize) -> Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(self.color).set_bold(self.bold);
        writer.set_color(&spec)?;
        write!(writer, "{}", self.value)?;
        writer.reset()?;
        write!(writer, "{}", " ".repeat(width.saturating_sub(self.width())))?;
        Ok(())
    }
}

/// Represents a table row.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Row(pub Vec<Cell>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(mut self, cell: Cell) -> Self {
        self.0.push(cell);
        self
    }
}

/// Represents an item that can be rendered as a table row.
pub trait Table {
    fn head() -> Row;
    fn row(&self) -> Row;

    fn print<'a, I>(writer: &mut dyn WriteColor, items: I) -> Result<()>
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        let mut rows = vec![Self::head()];
        rows.extend(items.into_iter().map(Self::row));
        print_rows(writer, &rows)
    }
}

fn print_rows(writer: &mut dyn WriteColor, rows: &[Row]) -> Result<()> {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        for (i, cell) in row.0.iter().enumerate() {
            match widths.get_mut(i) {
                Some(width) => *width = (*width).max(cell.width()),
                None => widths.push(cell.width()),
            }
        }
    }

    for row in rows {
        let last = row.0.len().saturating_sub(1);
        for (i, cell) in row.0.iter().enumerate() {
            if i == last {
                // no trailing spaces on the last column
                cell.print(writer, 0)?;
            } else {
                cell.print(writer, widths[i])?;
                write!(writer, "{}", COLUMN_SEPARATOR)?;
            }
        }
        writeln!(writer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use termcolor::Buffer;

    use super::*;

    struct Word(&'static str, &'static str);

    impl Table for Word {
        fn head() -> Row {
            Row::new().cell(Cell::new("FRONT").bold()).cell(Cell::new("BACK").bold())
        }

        fn row(&self) -> Row {
            Row::new().cell(Cell::new(self.0)).cell(Cell::new(self.1))
        }
    }

    #[test]
    fn it_should_align_wide_chars() {
        let mut buffer = Buffer::no_color();
        let words = [Word("猫", "cat"), Word("dog", "犬")];
        Word::print(&mut buffer, &words).unwrap();

        let output = String::from_utf8(buffer.into_inner()).unwrap();
        assert_eq!(output, "FRONT  BACK\n猫     cat\ndog    犬\n");
    }

    #[test]
    fn it_should_strip_line_breaks() {
        assert_eq!(Cell::new("a\tb\nc").width(), 5);
    }
}
