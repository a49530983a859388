use std::path::Path;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::ImportError;
use crate::model::{ItemStatus, ScheduleItem};

/// Group key for rows that name none.
pub const DEFAULT_GROUP: &str = "Ungrouped";

/// Items parsed from a sheet plus the number of rows that could not be used.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub items: Vec<ScheduleItem>,
    pub skipped: usize,
    /// Items kept without dates because a date cell was empty or unparseable.
    pub undated: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    Start,
    End,
    Status,
    Group,
    Resource,
    Progress,
}

/// Try parsing a date string with several common formats.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%d.%m.%Y.", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Accepts `45`, `45%`, `0.45`.
fn parse_progress(s: &str) -> Option<u8> {
    let s = s.trim().trim_end_matches('%').trim();
    let value: f32 = s.parse().ok()?;
    let percent = if value > 0.0 && value <= 1.0 && s.contains('.') {
        value * 100.0
    } else {
        value
    };
    Some(percent.round().clamp(0.0, 100.0) as u8)
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

fn header_to_column(normalized: &str) -> Option<Column> {
    match normalized {
        "name" | "task" | "taskname" | "label" | "title" | "activity" | "process" => {
            Some(Column::Name)
        }
        "start" | "startdate" | "from" | "begin" | "plannedstart" => Some(Column::Start),
        "end" | "enddate" | "to" | "finish" | "due" | "duedate" | "plannedend" => {
            Some(Column::End)
        }
        "status" | "state" | "stage" => Some(Column::Status),
        "group" | "position" | "category" | "project" | "phase" => Some(Column::Group),
        "resource" | "owner" | "assignee" | "employee" | "person" | "machine" => {
            Some(Column::Resource)
        }
        "progress" | "percent" | "done%" | "complete" => Some(Column::Progress),
        _ => None,
    }
}

/// Import items from a CSV file. See [`parse_csv`].
pub fn import_csv(path: &Path) -> Result<ImportReport, ImportError> {
    let content = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let report = parse_csv(&content)?;
    info!(
        path = %path.display(),
        items = report.items.len(),
        skipped = report.skipped,
        "imported CSV"
    );
    Ok(report)
}

/// Parse CSV text into schedule items.
///
/// The delimiter (comma, semicolon, tab) is detected from the first line and
/// headers are matched loosely. Only a name column is required; rows whose
/// dates are missing or unreadable become undated items rather than being
/// dropped, so they show up in the missing-dates lane.
pub fn parse_csv(content: &str) -> Result<ImportReport, ImportError> {
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let columns: Vec<Option<Column>> = headers
        .iter()
        .map(|h| header_to_column(&normalize_header(h)))
        .collect();

    if !columns.contains(&Some(Column::Name)) {
        return Err(ImportError::MissingColumns {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut items = Vec::new();
    let mut skipped = 0usize;
    let mut undated = 0usize;

    for (i, result) in reader.records().enumerate() {
        let line = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(line, error = %e, "skipping CSV row");
                skipped += 1;
                continue;
            }
        };

        let cell = |wanted: Column| {
            columns
                .iter()
                .position(|c| *c == Some(wanted))
                .and_then(|idx| record.get(idx))
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        let Some(name) = cell(Column::Name) else {
            skipped += 1;
            continue;
        };
        let group = cell(Column::Group).unwrap_or(DEFAULT_GROUP);

        let mut item = ScheduleItem::unscheduled(name, group);
        item.start = cell(Column::Start).and_then(parse_date);
        item.end = cell(Column::End).and_then(parse_date);
        if cell(Column::Start).is_some() && item.start.is_none() {
            warn!(line, "unreadable start date; item kept undated");
        }
        if cell(Column::End).is_some() && item.end.is_none() {
            warn!(line, "unreadable end date; item kept undated");
        }
        if !item.is_scheduled() {
            undated += 1;
        }

        item.resource = cell(Column::Resource).map(str::to_string);
        item.status = cell(Column::Status)
            .and_then(ItemStatus::parse)
            .unwrap_or_default();
        item.progress = cell(Column::Progress).and_then(parse_progress);

        items.push(item);
    }

    if items.is_empty() {
        return Err(ImportError::Empty { skipped });
    }

    Ok(ImportReport {
        items,
        skipped,
        undated,
    })
}
