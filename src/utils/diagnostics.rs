//! Rust-like diagnostics for scanner and parser faults.

// Error reporting is not on the critical path, so this favours simplicity
// over speed.

use std::{
    collections::{BTreeMap, HashMap},
    rc::Rc,
};

use colored::{Color, ColoredString, Colorize};

use crate::scan::location::{Source, Span};

#[derive(Debug, Clone)]
pub struct DiagnosticItem {
    pub span: Span,
    pub message: String,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostic {
    pre_text: String,
    /// Maps from source to line number to items
    items: HashMap<Rc<Source>, BTreeMap<usize, Vec<DiagnosticItem>>>,
    post_text: String,
}

const DIAGNOSTIC_LINE_NUMBER_WIDTH: usize = 4;

impl Diagnostic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pre_text(mut self, pre_text: &str) -> Self {
        self.pre_text = pre_text.into();
        self
    }

    pub fn with_post_text(mut self, post_text: &str) -> Self {
        self.post_text = post_text.into();
        self
    }

    pub fn add_item(mut self, item: DiagnosticItem) -> Self {
        let line = item.span.start.line;
        let items = self
            .items
            .entry(item.span.start.source.clone())
            .or_default()
            .entry(line)
            .or_default();
        items.push(item);
        // Sort items by col in ascending order
        items.sort_by_key(|item| item.span.start.column);
        self
    }

    pub fn write(&self, writer: &mut dyn std::io::Write) -> std::io::Result<()> {
        writeln!(writer, "{}", self.pre_text)?;

        let spacing = " ".repeat(DIAGNOSTIC_LINE_NUMBER_WIDTH);
        let arrow = "-->".cyan().bold();
        let vertical_bar = "|".cyan().bold();
        let ellipsis = "...".cyan().bold();

        for (source, line_items) in &self.items {
            let lines = source.content.lines().collect::<Vec<_>>();
            let mut last_line = 0;
            for (line, items) in line_items {
                let first = items.first().map(|item| item.span.start.column).unwrap_or(1);
                if last_line == 0 {
                    writeln!(writer, "{}{} {}:{}:{}", spacing, arrow, source.filename, line, first)?;
                }
                if line - last_line == 1 || last_line == 0 {
                    writeln!(writer, "{} {}", spacing, vertical_bar)?
                } else {
                    writeln!(writer, "{}{}", spacing, ellipsis)?
                }
                last_line = *line;
                let line_number = format!("{:width$}", line, width = DIAGNOSTIC_LINE_NUMBER_WIDTH)
                    .cyan()
                    .bold();
                // The end marker may sit on a line past the last one.
                let text = lines.get(line - 1).copied().unwrap_or("");
                writeln!(writer, "{} {} {}", line_number, vertical_bar, text)?;

                let total_depth = items
                    .iter()
                    .map(|item| item.message.lines().count() + 1)
                    .sum::<usize>()
                    - 1;
                let mut elements: Vec<Vec<(/*column offset*/ usize, ColoredString)>> =
                    vec![vec![]; total_depth.max(1)];

                let mut cumulative_depth = 0;
                // Iterate over items from right to left
                for item in items.iter().rev() {
                    let start = item.span.start.column;
                    let caret_length = if item.span.end.line == item.span.start.line {
                        item.span.end.column.saturating_sub(start).max(1)
                    } else {
                        1
                    };
                    let color = |s: &str| match item.color {
                        Some(color) => s.color(color),
                        None => s.normal(),
                    };

                    let (caret, item_col) = match cumulative_depth {
                        0 => (
                            color(&"^".repeat(caret_length)).bold(),
                            start + caret_length + 1,
                        ),
                        _ => {
                            // Draw the vertical line connecting the caret to the message
                            for element in elements.iter_mut().take(cumulative_depth).skip(1) {
                                element.push((start, color("|").bold()));
                            }
                            (color(&"-".repeat(caret_length)).bold(), start)
                        }
                    };
                    elements[0].push((start, caret));
                    for line in item.message.lines() {
                        elements[cumulative_depth].push((item_col, color(line).bold()));
                        cumulative_depth += 1;
                    }
                    cumulative_depth += 1;
                }
                for mut element in elements {
                    element.sort_by_key(|(col, _)| *col);
                    let mut line = String::new();
                    let mut cumulative_col = 1;
                    for (col, content) in element {
                        line.push_str(&" ".repeat(col.saturating_sub(cumulative_col)));
                        line.push_str(&content.to_string());
                        cumulative_col = col.max(cumulative_col) + content.chars().count();
                    }
                    writeln!(writer, "{} {} {}", spacing, vertical_bar, line)?;
                }
            }
        }
        writeln!(writer, "{} {}", spacing, vertical_bar)?;
        if !self.post_text.is_empty() {
            let eq = "=".cyan().bold();
            for line in self.post_text.lines() {
                writeln!(writer, "{} {} {}", spacing, eq, line.bold())?;
            }
        }
        Ok(())
    }

    /// Renders into a string, mostly for tests and for callers that buffer output.
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use crate::{analyze, scan::tokenize};

    use super::*;

    #[test]
    fn scanner_error_points_at_character() {
        colored::control::set_override(false);
        let e = tokenize("a = 1\nb = 2 $ 3").unwrap_err();
        let out = Diagnostic::from(&e).render();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "error(scanner): invalid character");
        assert_eq!(lines[1], "    --> <input>:2:7");
        assert_eq!(lines[3], "   2 | b = 2 $ 3");
        assert_eq!(lines[4], "     |       ^ found '$'");
    }

    #[test]
    fn open_comment_marks_both_ends_on_one_line() {
        colored::control::set_override(false);
        let e = tokenize("x /* open").unwrap_err();
        let out = Diagnostic::from(&e).render();
        assert_eq!(
            out,
            "error(scanner): unterminated block comment\n\
             \x20   --> <input>:1:3\n\
             \x20    |\n\
             \x20  1 | x /* open\n\
             \x20    |   -      ^ still open at end of input\n\
             \x20    |   |\n\
             \x20    |   comment opens here\n\
             \x20    |\n"
        );
    }

    #[test]
    fn open_comment_skips_lines_in_between() {
        colored::control::set_override(false);
        let e = tokenize("/* a\n\n\nb").unwrap_err();
        let out = Diagnostic::from(&e).render();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines[1..],
            [
                "    --> <input>:1:1",
                "     |",
                "   1 | /* a",
                "     | ^ comment opens here",
                "    ...",
                "   4 | b",
                "     |  ^ still open at end of input",
                "     |",
            ]
        );
    }

    #[test]
    fn parser_error_underlines_token() {
        colored::control::set_override(false);
        let e = analyze("inicio decls fimdecls codigo\nescreva(fimbloco) fimprog").unwrap_err();
        let out = Diagnostic::from(&e).render();
        assert!(out.contains("error(parser): expected one of [IDENTIFIER, NUMBER], found FIMBLOCO"));
        assert!(out.contains("        ^^^^^^^^ found FIMBLOCO(fimbloco)"));
        assert!(out.contains("= while parsing Comando"));
    }

    #[test]
    fn end_marker_past_last_line() {
        colored::control::set_override(false);
        let e = analyze("inicio decls fimdecls codigo\n").unwrap_err();
        let out = Diagnostic::from(&e).render();
        assert!(out.contains("   2 | \n"));
        assert!(out.contains("found EOF"));
    }
}
