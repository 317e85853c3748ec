/// Console formatting module - Pure rendering concerns
///
/// This module handles all console output formatting including:
/// - Table layout and borders
/// - Color terminal output
/// - Text truncation and padding
///
/// It accepts pre-formatted cells from the report module and renders them.
///
/// ## Output Flexibility
///
/// `TableWriter` writes to any `std::io::Write` destination, so the same
/// code renders to stdout (optionally colored) and to string buffers.
use std::io::{self, Write};
use std::sync::OnceLock;
use term::color::Color;
use terminal_size::{Width, terminal_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Narrowest the flexible column is squeezed to on small consoles
const MIN_FLEXIBLE_WIDTH: usize = 12;

/// Column layout of one table: widths include one space of padding on each side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    pub headers: Vec<String>,
    pub widths: Vec<usize>,
}

impl TableLayout {
    /// Fit column widths to the headers and cells.
    ///
    /// When the table is wider than `console_width`, the `flexible` column is
    /// narrowed (its cells get truncated with "...").
    pub fn fit(headers: &[&str], rows: &[Vec<String>], console_width: usize, flexible: usize) -> Self {
        let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h) + 2).collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(display_width(cell) + 2);
            }
        }

        let total = widths.iter().sum::<usize>() + widths.len() + 1;
        if total > console_width
            && let Some(width) = widths.get_mut(flexible)
        {
            *width = width.saturating_sub(total - console_width).max(MIN_FLEXIBLE_WIDTH);
        }

        TableLayout { headers: headers.iter().map(|h| h.to_string()).collect(), widths }
    }

    /// Total table width including borders
    #[cfg(test)]
    pub fn total_width(&self) -> usize {
        self.widths.iter().sum::<usize>() + self.widths.len() + 1
    }

    fn border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(*w)).collect();
        format!("{}{}{}", left, segments.join(&mid.to_string()), right)
    }
}

/// Writer for table output - configurable for color/plain text
pub struct TableWriter<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> TableWriter<W> {
    /// Create a new table writer
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Consume the writer and return the underlying destination
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write formatted text, optionally with color
    fn write_colored(&mut self, text: &str, color: Option<Color>) -> io::Result<()> {
        match color {
            Some(color) if self.use_colors => {
                if let Some(ref mut t) = term::stdout() {
                    self.writer.flush()?;
                    let _ = t.fg(color);
                    let _ = t.write_all(text.as_bytes());
                    let _ = t.reset();
                    Ok(())
                } else {
                    write!(self.writer, "{}", text)
                }
            }
            _ => write!(self.writer, "{}", text),
        }
    }

    /// Write a plain line of text
    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", text)
    }

    /// Write top border, centered column headers and the header separator
    pub fn write_table_header(&mut self, layout: &TableLayout) -> io::Result<()> {
        writeln!(self.writer, "{}", layout.border('┌', '┬', '┐'))?;
        let cells: Vec<String> = layout
            .headers
            .iter()
            .zip(layout.widths.iter())
            .map(|(h, w)| format!("{:^width$}", h, width = *w))
            .collect();
        writeln!(self.writer, "│{}│", cells.join("│"))?;
        writeln!(self.writer, "{}", layout.border('├', '┼', '┤'))
    }

    /// Write one row, truncating cells that don't fit
    pub fn write_row(&mut self, layout: &TableLayout, cells: &[String], color: Option<Color>) -> io::Result<()> {
        let displays: Vec<String> = layout
            .widths
            .iter()
            .enumerate()
            .map(|(i, w)| truncate_with_padding(cells.get(i).map(String::as_str).unwrap_or(""), w.saturating_sub(2)))
            .collect();

        let row = format!("│ {} │", displays.join(" │ "));
        self.write_colored(&row, color)?;
        writeln!(self.writer)
    }

    /// Write table footer
    pub fn write_table_footer(&mut self, layout: &TableLayout) -> io::Result<()> {
        writeln!(self.writer, "{}", layout.border('└', '┴', '┘'))
    }
}

//
// Console width
//

static CONSOLE_WIDTH: OnceLock<usize> = OnceLock::new();

/// Override the detected console width (for tests and --console-width)
pub fn set_console_width(width: usize) {
    let _ = CONSOLE_WIDTH.set(width); // Ignore error if already initialized
}

/// Console width: the override if set, else the terminal width, else 120
pub fn console_width() -> usize {
    *CONSOLE_WIDTH.get_or_init(|| {
        if let Some((Width(w), _)) = terminal_size() {
            w as usize
        } else {
            120 // Default width
        }
    })
}

//
// Text Formatting Utilities
//

/// Count the display width of a string, accounting for wide Unicode characters
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate and pad string to exact width
pub fn truncate_with_padding(s: &str, width: usize) -> String {
    let display_w = display_width(s);

    if display_w > width {
        let mut result = String::new();
        let mut current_width = 0;

        // Reserve space for "..."
        let target_width = if width >= 3 { width - 3 } else { width };

        for c in s.chars() {
            let c_width = UnicodeWidthChar::width(c).unwrap_or(1);

            if current_width + c_width > target_width {
                break;
            }

            result.push(c);
            current_width += c_width;
        }

        if width >= 3 {
            result.push_str("...");
            current_width += 3;
        }

        // Pad if needed
        if current_width < width {
            result.push_str(&" ".repeat(width - current_width));
        }

        result
    } else {
        let padding = width - display_w;
        format!("{}{}", s, " ".repeat(padding))
    }
}

#[cfg(test)]
#[path = "console_format_test.rs"]
mod console_format_test;
