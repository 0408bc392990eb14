//! CSV Feedback Log Adapter
//!
//! One row per feedback entry, under a fixed header. The file and its parent
//! directories are created on first use. Rows are only ever appended.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::io::SeekFrom;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::domain::coaching::BarrierCategory;
use crate::domain::feedback::{FeedbackEntry, FeedbackRecord, Rating, TrialIntent};
use crate::domain::foundation::Timestamp;
use crate::ports::{FeedbackLog, FeedbackLogError, FeedbackSnapshot};

/// Column names, in file order.
pub const LOG_HEADER: [&str; 9] = [
    "timestamp",
    "user_goal",
    "user_barrier",
    "target_component",
    "technique_used",
    "theory",
    "rating",
    "would_try",
    "feedback_text",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Append-only feedback log stored as a CSV file.
#[derive(Debug)]
pub struct CsvFeedbackLog {
    path: PathBuf,
    /// Serializes appends within this process.
    write_lock: Mutex<()>,
}

impl CsvFeedbackLog {
    /// Creates a log backed by the file at `path`. Nothing is touched on disk
    /// until the first append.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates parent directories and the header row if the file is absent or empty.
    ///
    /// Returns `true` when the existing contents do not end with a newline, so
    /// the next row has to start on a fresh line.
    async fn ensure_initialized(&self) -> Result<bool, FeedbackLogError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let needs_header = match fs::metadata(&self.path).await {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        if needs_header {
            let header = encode_csv(&[])?;
            fs::write(&self.path, header).await?;
            return Ok(false);
        }

        Ok(!ends_with_newline(&self.path).await?)
    }
}

/// Checks the last byte of a non-empty file.
async fn ends_with_newline(path: &Path) -> Result<bool, FeedbackLogError> {
    let mut file = File::open(path).await?;
    file.seek(SeekFrom::End(-1)).await?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last).await?;
    Ok(last[0] == b'\n')
}

#[async_trait]
impl FeedbackLog for CsvFeedbackLog {
    async fn append(&self, entry: &FeedbackEntry) -> Result<(), FeedbackLogError> {
        let _guard = self.write_lock.lock().await;
        let needs_line_break = self.ensure_initialized().await?;

        let mut row = encode_row(entry)?;
        if needs_line_break {
            tracing::warn!(path = %self.path.display(), "Feedback log lacked a trailing newline");
            row.insert(0, b'\n');
        }
        let mut file = OpenOptions::new().append(true).open(&self.path).await?;
        file.write_all(&row).await?;
        file.flush().await?;

        tracing::debug!(
            path = %self.path.display(),
            technique = %entry.record.technique_used,
            "Appended feedback entry"
        );
        Ok(())
    }

    async fn read_all(&self) -> Result<FeedbackSnapshot, FeedbackLogError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(FeedbackSnapshot::default())
            }
            Err(e) => return Err(e.into()),
        };

        decode_csv(&bytes)
    }

    async fn export(&self) -> Result<Vec<u8>, FeedbackLogError> {
        match fs::read(&self.path).await {
            Ok(bytes) if !bytes.is_empty() => Ok(bytes),
            Ok(_) => encode_csv(&[]),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => encode_csv(&[]),
            Err(e) => Err(e.into()),
        }
    }
}

/// Encodes the header followed by one row per entry.
pub(crate) fn encode_csv(entries: &[FeedbackEntry]) -> Result<Vec<u8>, FeedbackLogError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(LOG_HEADER)?;
    for entry in entries {
        writer.write_record(row_fields(entry))?;
    }
    into_bytes(writer)
}

fn encode_row(entry: &FeedbackEntry) -> Result<Vec<u8>, FeedbackLogError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(row_fields(entry))?;
    into_bytes(writer)
}

fn into_bytes(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, FeedbackLogError> {
    writer
        .into_inner()
        .map_err(|e| FeedbackLogError::Csv(e.to_string()))
}

fn row_fields(entry: &FeedbackEntry) -> [String; 9] {
    let record = &entry.record;
    [
        entry.timestamp.to_log_string(),
        record.user_goal.clone(),
        record.user_barrier.clone(),
        record.target_component.as_str().to_string(),
        record.technique_used.clone(),
        record.theory.clone(),
        record.rating.to_string(),
        record.would_try.as_str().to_string(),
        record.feedback_text.clone().unwrap_or_default(),
    ]
}

/// Parses log contents, skipping rows that do not describe a valid entry.
fn decode_csv(bytes: &[u8]) -> Result<FeedbackSnapshot, FeedbackLogError> {
    // Spreadsheet tools often prepend a byte order mark when re-saving.
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(FeedbackSnapshot::default());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut snapshot = FeedbackSnapshot::default();
    for (row, result) in reader.records().enumerate() {
        let parsed = result
            .map_err(|e| e.to_string())
            .and_then(|record| columns.parse_entry(&record));

        match parsed {
            Ok(entry) => snapshot.entries.push(entry),
            Err(reason) => {
                tracing::warn!(row = row + 1, %reason, "Skipping malformed feedback row");
                snapshot.skipped_rows += 1;
            }
        }
    }

    Ok(snapshot)
}

/// Position of each column, resolved from the header row.
struct ColumnIndex([usize; 9]);

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, FeedbackLogError> {
        let mut positions = [0usize; 9];
        for (slot, name) in positions.iter_mut().zip(LOG_HEADER) {
            *slot = headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
                .ok_or_else(|| FeedbackLogError::Csv(format!("missing column '{}'", name)))?;
        }
        Ok(Self(positions))
    }

    fn field<'r>(&self, record: &'r csv::StringRecord, column: usize) -> Result<&'r str, String> {
        record
            .get(self.0[column])
            .ok_or_else(|| format!("missing field '{}'", LOG_HEADER[column]))
    }

    fn parse_entry(&self, record: &csv::StringRecord) -> Result<FeedbackEntry, String> {
        let timestamp = Timestamp::parse_log_string(self.field(record, 0)?.trim())
            .map_err(|e| format!("bad timestamp: {}", e))?;
        let target_component = self
            .field(record, 3)?
            .parse::<BarrierCategory>()
            .map_err(|e| format!("{}", e))?;
        let rating = self
            .field(record, 6)?
            .parse::<Rating>()
            .map_err(|e| format!("{}", e))?;
        let would_try = self
            .field(record, 7)?
            .parse::<TrialIntent>()
            .map_err(|e| format!("{}", e))?;
        let feedback_text = self
            .field(record, 8)
            .ok()
            .map(str::to_string)
            .filter(|text| !text.trim().is_empty());

        Ok(FeedbackEntry::new(
            timestamp,
            FeedbackRecord {
                user_goal: self.field(record, 1)?.to_string(),
                user_barrier: self.field(record, 2)?.to_string(),
                target_component,
                technique_used: self.field(record, 4)?.to_string(),
                theory: self.field(record, 5)?.to_string(),
                rating,
                would_try,
                feedback_text,
            },
        ))
    }
}
