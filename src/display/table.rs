use super::OutputStyle;
use regex::Regex;
use std::sync::LazyLock;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("static regex"));

/// Column alignment within a bordered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// A simple table rendered either with box-drawing borders or as
/// `|`-separated plain lines.
#[derive(Debug, Clone, Default)]
pub struct Table {
    title: Option<String>,
    headers: Vec<String>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let align = vec![Align::Left; headers.len()];
        Self {
            title: None,
            headers,
            align,
            rows: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Right-aligns the given columns (numbers read better that way).
    pub fn align_right(mut self, columns: &[usize]) -> Self {
        for &c in columns {
            if let Some(a) = self.align.get_mut(c) {
                *a = Align::Right;
            }
        }
        self
    }

    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let mut row: Vec<String> = cells.into_iter().map(|c| c.to_string()).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn render(&self, style: OutputStyle) -> String {
        match style {
            OutputStyle::Table => self.render_bordered(),
            OutputStyle::Plain => self.render_plain(),
        }
    }

    fn render_plain(&self) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str(&strip_ansi(title));
            out.push('\n');
        }
        let headers: Vec<String> = self.headers.iter().map(|h| plain_cell(h)).collect();
        out.push_str(&headers.join(" | "));
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|c| plain_cell(c)).collect();
            out.push_str(&cells.join(" | "));
            out.push('\n');
        }
        out
    }

    fn render_bordered(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|c| {
                self.rows
                    .iter()
                    .map(|r| visible_width(&r[c]))
                    .chain(std::iter::once(visible_width(&self.headers[c])))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{}{}{}\n", left, segments.join(mid), right)
        };

        let line = |cells: &[String]| {
            let padded: Vec<String> = cells
                .iter()
                .enumerate()
                .map(|(c, cell)| pad(cell, widths[c], self.align[c]))
                .collect();
            format!("│ {} │\n", padded.join(" │ "))
        };

        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str(title);
            out.push('\n');
        }
        out.push_str(&rule("┌", "┬", "┐"));
        out.push_str(&line(&self.headers));
        out.push_str(&rule("├", "┼", "┤"));
        for row in &self.rows {
            out.push_str(&line(row));
        }
        out.push_str(&rule("└", "┴", "┘"));
        out
    }
}

/// Plain-mode cell: no colors, and a literal `|` escaped as `\|` so it
/// cannot be read as a column separator.
fn plain_cell(text: &str) -> String {
    strip_ansi(text).replace('|', "\\|")
}

/// Removes ANSI color sequences.
pub fn strip_ansi(text: &str) -> String {
    ANSI_RE.replace_all(text, "").into_owned()
}

/// Display width ignoring color codes.
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).chars().count()
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(visible_width(cell)));
    match align {
        Align::Left => format!("{}{}", cell, fill),
        Align::Right => format!("{}{}", fill, cell),
    }
}
