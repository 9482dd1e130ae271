use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::OutputFormat;
use crate::schema::Statistics;

/// Column labels of the statistics table.
pub const HEADER: [&str; 4] = [
    "Язык программирования",
    "Вакансий найдено",
    "Вакансий обработано",
    "Средняя зарплата",
];

/// One source's statistics in the JSON output.
#[derive(Serialize)]
struct SourceReport<'a> {
    title: &'a str,
    statistics: &'a Statistics,
}

/// Renders one source's statistics in the configured format.
pub fn render(format: OutputFormat, title: &str, statistics: &Statistics) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(title, statistics)),
        OutputFormat::Json => render_json(title, statistics),
    }
}

/// Renders statistics as a single-line JSON object:
/// `{"title": ..., "statistics": [{"language": ..., "vacancies_found": ..., ...}]}`
pub fn render_json(title: &str, statistics: &Statistics) -> Result<String> {
    serde_json::to_string(&SourceReport { title, statistics })
        .with_context(|| format!("failed to serialize statistics for {}", title))
}

/// Renders statistics as an ASCII table.
///
/// Layout:
/// - title embedded in the top border (dropped if it does not fit)
/// - header row, separator, one row per language in mapping order
/// - cells left-aligned with one space of padding
///
/// Widths are counted in chars, so Cyrillic labels line up.
pub fn render_table(title: &str, statistics: &Statistics) -> String {
    let mut rows: Vec<[String; 4]> = vec![HEADER.map(String::from)];
    rows.extend(statistics.iter().map(|entry| {
        [
            entry.language.clone(),
            entry.summary.vacancies_found.to_string(),
            entry.summary.vacancies_processed.to_string(),
            entry.summary.average_salary.to_string(),
        ]
    }));

    let mut widths = [0usize; 4];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let border = format!("+{}+", border);

    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(titled_border(&border, title));

    for (index, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!(" {}{} ", cell, " ".repeat(width - cell.chars().count())))
            .collect();
        lines.push(format!("|{}|", cells.join("|")));

        if index == 0 {
            lines.push(border.clone());
        }
    }

    lines.push(border);
    lines.join("\n")
}

fn titled_border(border: &str, title: &str) -> String {
    let inner = border.chars().count() - 2;
    let title_len = title.chars().count();

    if title.is_empty() || title_len > inner {
        return border.to_string();
    }

    let rest: String = border.chars().skip(1 + title_len).collect();
    format!("+{}{}", title, rest)
}
