/// Plain text table with space padded columns, for use inside a code block
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header<S: Into<String>>(header: impl IntoIterator<Item = S>) -> Self {
        Self {
            header: Some(header.into_iter().map(Into::into).collect()),
            rows: Vec::new(),
        }
    }

    pub fn push_row<S: Into<String>>(&mut self, row: impl IntoIterator<Item = S>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn render(&self) -> String {
        let all_rows: Vec<&Vec<String>> = self.header.iter().chain(self.rows.iter()).collect();

        let columns = all_rows.iter().map(|row| row.len()).max().unwrap_or(0);
        let widths: Vec<usize> = (0..columns)
            .map(|column| {
                all_rows
                    .iter()
                    .filter_map(|row| row.get(column))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = Vec::with_capacity(all_rows.len() + 1);
        if let Some(header) = &self.header {
            lines.push(render_row(header, &widths));
            let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
            lines.push("-".repeat(rule_width));
        }
        lines.extend(self.rows.iter().map(|row| render_row(row, &widths)));
        lines.join("\n")
    }
}

fn render_row(row: &[String], widths: &[usize]) -> String {
    let cells: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let padding = width - cell.chars().count();
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect();
    cells.join("  ").trim_end().to_string()
}

/// Wraps text in a fenced code block so the chat client keeps alignment
pub fn code_block(text: &str) -> String {
    format!("```\n{text}\n```")
}
