use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Column-aligned text table. The last column can be word-wrapped, since it
/// is where the free-form text lives (question statements, gift descriptions,
/// plan entries); continuation lines stay under that column.
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
    wrap_last: Option<usize>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
            wrap_last: None,
        }
    }

    /// Word-wrap the last column at `width` characters.
    pub fn wrap_last(mut self, width: usize) -> Self {
        self.wrap_last = Some(width.max(1));
        self
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }

    pub fn render(&self) -> String {
        let last = self.headers.len().saturating_sub(1);

        // Expand each row into display lines, wrapping the last cell.
        let mut lines: Vec<Vec<String>> = Vec::new();
        for row in &self.rows {
            let mut cells = row.clone();
            cells.resize(self.headers.len(), String::new());
            let Some(width) = self.wrap_last else {
                lines.push(cells);
                continue;
            };
            let wrapped = wrap_words(&cells[last], width);
            cells[last] = wrapped[0].clone();
            lines.push(cells);
            for cont in &wrapped[1..] {
                let mut blank = vec![String::new(); self.headers.len()];
                blank[last] = cont.clone();
                lines.push(blank);
            }
        }

        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.len()).collect();
        for line in &lines {
            for (i, cell) in line.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let headers: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        push_line(&mut out, &headers, &widths);
        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        push_line(&mut out, &rule, &widths);
        for line in &lines {
            push_line(&mut out, line, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut text = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            text.push_str("  ");
        }
        text.push_str(cell);
        let pad = widths[i].saturating_sub(cell.chars().count());
        text.extend(std::iter::repeat(' ').take(pad));
    }
    out.push_str(text.trim_end());
    out.push('\n');
}

/// Greedy word wrap. Words longer than `width` get a line of their own
/// rather than being split.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if !line.is_empty() && line.chars().count() + 1 + word_len > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
