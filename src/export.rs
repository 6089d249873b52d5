// src/export.rs
// =============================================================================
// Writes the fetched listing to disk as CSV or JSON Lines.
//
// Each row is a RepositoryRecord plus two metadata columns:
// - range: "Daily" / "Weekly" / "Monthly"
// - export_datetime: local time of the export, ISO 8601
//
// Files land in the export directory as
//   github_trending_<range>_<YYYYmmdd_HHMMSS>.<csv|jsonl>
// =============================================================================

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ExportError;
use crate::trending::{DateRange, RepositoryRecord};

const CSV_HEADER: &str = "name,url,description,language,stars,stars_period,range,export_datetime";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    /// One compact JSON object per line
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "jsonl",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" | "jsonl" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

// One exported line: the record's fields followed by the metadata columns
#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(flatten)]
    record: &'a RepositoryRecord,
    range: &'static str,
    export_datetime: String,
}

pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    // Exports the records and returns the path of the new file
    pub fn export(
        &self,
        records: &[RepositoryRecord],
        range: DateRange,
        format: ExportFormat,
    ) -> Result<PathBuf, ExportError> {
        self.export_at(records, range, format, Local::now())
    }

    // Same as export(), with the clock passed in
    pub fn export_at(
        &self,
        records: &[RepositoryRecord],
        range: DateRange,
        format: ExportFormat,
        now: DateTime<Local>,
    ) -> Result<PathBuf, ExportError> {
        if records.is_empty() {
            return Err(ExportError::NoRepositories);
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name(range, format, &now));

        let exported_at = now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
        let rows = records.iter().map(|record| ExportRow {
            record,
            range: range.title(),
            export_datetime: exported_at.clone(),
        });

        let mut writer = BufWriter::new(fs::File::create(&path)?);
        match format {
            ExportFormat::Csv => write_csv(&mut writer, rows)?,
            ExportFormat::Json => write_jsonl(&mut writer, rows)?,
        }
        writer.flush()?;

        tracing::info!(path = %path.display(), count = records.len(), "exported repositories");
        Ok(path)
    }
}

fn file_name(range: DateRange, format: ExportFormat, now: &DateTime<Local>) -> String {
    format!(
        "github_trending_{}_{}.{}",
        range.as_str(),
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

fn write_csv<'a, W: Write>(
    out: &mut W,
    rows: impl Iterator<Item = ExportRow<'a>>,
) -> Result<(), ExportError> {
    writeln!(out, "{}", CSV_HEADER)?;
    for row in rows {
        let r = row.record;
        let fields = [
            r.name.as_str(),
            r.url.as_str(),
            r.description.as_str(),
            r.language.as_str(),
            r.stars.as_str(),
            r.stars_period.as_str(),
            row.range,
            row.export_datetime.as_str(),
        ];
        let line: Vec<String> = fields.iter().map(|f| escape_csv(f)).collect();
        writeln!(out, "{}", line.join(","))?;
    }
    Ok(())
}

fn write_jsonl<'a, W: Write>(
    out: &mut W,
    rows: impl Iterator<Item = ExportRow<'a>>,
) -> Result<(), ExportError> {
    for row in rows {
        serde_json::to_writer(&mut *out, &row)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

// Quotes a CSV field when it contains a separator, quote or line break
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
