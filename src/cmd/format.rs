/*!
format.rs

Formatting utilities for human output paths (zero non-std dependencies).

  - StyleOptions::detect() honors NO_COLOR / NO_EMOJI and COLUMNS
  - color(role, text, &style) / emoji(tag, &style)
  - table(headers, rows, &style): padded columns, dim header rule

JSON output paths bypass this module entirely so machine output stays clean.
*/

/* ---- Style Options ---- */

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
    pub term_width: usize,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::detect()
    }
}

impl StyleOptions {
    pub fn detect() -> Self {
        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);
        StyleOptions {
            use_color: std::env::var_os("NO_COLOR").is_none(),
            use_emoji: std::env::var_os("NO_EMOJI").is_none(),
            term_width: width,
        }
    }
}

/* ---- Color / Emoji ---- */

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Primary,
    Secondary,
    Success,
    Error,
    Dim,
    Bold,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Primary => "38;5;45",    // cyan-ish
        Role::Secondary => "38;5;250", // gray
        Role::Success => "38;5;82",    // green
        Role::Error => "38;5;196",     // red
        Role::Dim => "2",
        Role::Bold => "1",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn emoji(tag: &str, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match tag {
        "success" => "✔",
        "error" => "✖",
        "info" => "ℹ",
        "tool" => "🛠",
        "list" => "📜",
        _ => "",
    }
}

/* ---- Table ---- */

/// Render a padded two-plus column table with an underlined header row.
/// Cells wider than the terminal budget are truncated with an ellipsis.
pub fn table(headers: &[&str], rows: &[Vec<String>], style: &StyleOptions) -> String {
    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().take(cols).enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    // Last column absorbs overflow so the table stays inside the terminal.
    let fixed: usize = widths[..cols - 1].iter().map(|w| w + 2).sum();
    let last_budget = style.term_width.saturating_sub(fixed).max(10);
    widths[cols - 1] = widths[cols - 1].min(last_budget);

    let mut out = String::new();
    let header_line = render_row(headers.iter().map(|h| h.to_string()).collect(), &widths);
    out.push_str(&color(Role::Bold, &header_line, style));
    out.push('\n');
    out.push_str(&color(
        Role::Dim,
        "-".repeat(header_line.chars().count().min(style.term_width)),
        style,
    ));
    out.push('\n');

    for row in rows {
        out.push_str(&render_row(row.clone(), &widths));
        out.push('\n');
    }
    out
}

fn render_row(cells: Vec<String>, widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, width) in widths.iter().copied().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let cell = truncate_ellipsis(cell, width);
        if i + 1 == widths.len() {
            line.push_str(&cell);
        } else {
            line.push_str(&format!("{cell:<width$}  "));
        }
    }
    line.trim_end().to_string()
}

/// Truncate to `max_chars`, appending `…` when anything was cut.
pub fn truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let mut out: String = s.chars().take(keep).collect();
    out.push('…');
    out
}

/* ---- Tests ---- */
