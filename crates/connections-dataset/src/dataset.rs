//! The persisted answer table: ordering, row index, CSV writer and reader.

use std::collections::BTreeSet;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::csv::{parse_rows, parse_word_list, render_word_list, write_row};
use crate::types::{
    AnswerRecord, DatasetError, DatasetResult, DatasetSummary, IndexedRecord,
};

/// Header row. The index column has no name.
pub const HEADER: [&str; 4] = ["", "date", "category", "connections"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Chronologically ordered, densely indexed answer records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    rows: Vec<IndexedRecord>,
}

impl Dataset {
    /// Build the table from records in page order (newest first).
    ///
    /// The sequence is reversed so the oldest record gets index 0.
    pub fn from_traversal(records: Vec<AnswerRecord>) -> Self {
        let rows = records
            .into_iter()
            .rev()
            .enumerate()
            .map(|(index, record)| IndexedRecord { index, record })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[IndexedRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn summary(&self) -> DatasetSummary {
        let dates: BTreeSet<NaiveDate> = self.rows.iter().filter_map(|r| r.record.date).collect();
        DatasetSummary {
            records: self.rows.len(),
            distinct_dates: dates.len(),
            undated: self.rows.iter().filter(|r| r.record.date.is_none()).count(),
            first_date: dates.first().copied(),
            last_date: dates.last().copied(),
        }
    }

    /// Stream the whole table, header included, into `w`.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        write_row(&mut w, &HEADER)?;
        for row in &self.rows {
            let date = row
                .record
                .date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default();
            let fields = [
                row.index.to_string(),
                date,
                row.record.category.clone(),
                render_word_list(&row.record.words),
            ];
            write_row(&mut w, &fields)?;
        }
        Ok(())
    }

    /// Render the whole table, header included.
    pub fn to_csv_string(&self) -> io::Result<String> {
        let mut buf: Vec<u8> = Vec::new();
        self.write_to(&mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Write the table to `path`, replacing any existing file.
    ///
    /// Rows go to a temporary file next to `path` which is then renamed over
    /// it, so the previous table survives any failure before the rename.
    pub fn write_csv(&self, path: &Path) -> DatasetResult<()> {
        replace_file(path, |w| self.write_to(w))?;
        debug!(path = %path.display(), rows = self.rows.len(), "dataset written");
        Ok(())
    }

    /// Read a table previously produced by [`Dataset::write_csv`].
    pub fn read_csv(path: &Path) -> DatasetResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_csv_str(&text)
    }

    /// Parse CSV text, checking the header and that the index is `0..N`.
    pub fn from_csv_str(text: &str) -> DatasetResult<Self> {
        let mut rows = parse_rows(text).into_iter();

        match rows.next() {
            Some(header) if header == HEADER => {}
            Some(header) => {
                return Err(DatasetError::Malformed {
                    row: 1,
                    reason: format!("unexpected header {header:?}"),
                })
            }
            None => {
                return Err(DatasetError::Malformed {
                    row: 1,
                    reason: "missing header".into(),
                })
            }
        }

        let mut out = Vec::new();
        for (expected, fields) in rows.enumerate() {
            // Row 1 is the header.
            let row = expected + 2;
            let malformed = |reason: String| DatasetError::Malformed { row, reason };

            let [index, date, category, words] = <[String; 4]>::try_from(fields)
                .map_err(|f| malformed(format!("expected 4 fields, found {}", f.len())))?;

            let index: usize = index
                .parse()
                .map_err(|e| malformed(format!("bad row index {index:?}: {e}")))?;
            if index != expected {
                return Err(DatasetError::NonDenseIndex {
                    expected,
                    found: index,
                });
            }

            let date = if date.is_empty() {
                None
            } else {
                Some(
                    NaiveDate::parse_from_str(&date, DATE_FORMAT)
                        .map_err(|e| malformed(format!("bad date {date:?}: {e}")))?,
                )
            };
            let words = parse_word_list(&words)
                .ok_or_else(|| malformed(format!("bad word list {words:?}")))?;

            out.push(IndexedRecord {
                index,
                record: AnswerRecord::new(date, category, words),
            });
        }

        Ok(Self { rows: out })
    }
}

/// Atomically replace `path` with whatever `fill` writes.
///
/// The temporary file lives in the target's directory so the final rename
/// never crosses filesystems. On error it is removed and `path` is untouched.
fn replace_file(
    path: &Path,
    fill: impl FnOnce(&mut dyn Write) -> io::Result<()>,
) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut w = BufWriter::new(tmp.as_file_mut());
        fill(&mut w)?;
        w.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
