//! CSV output for district result tables.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScraperError};
use crate::types::ResultTable;

/// UTF-8 byte-order mark, so spreadsheet applications detect the encoding.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write a table as CSV (BOM, header, rows) to any writer.
///
/// # Arguments
/// * `writer` - Destination
/// * `table` - Header and rows to write
/// * `delimiter` - Field delimiter byte
pub fn write_csv<W: Write>(mut writer: W, table: &ResultTable, delimiter: u8) -> Result<()> {
    writer.write_all(UTF8_BOM).map_err(csv::Error::from)?;

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(writer);

    csv_writer.write_record(&table.header)?;
    for row in &table.rows {
        csv_writer.write_record(row.to_record())?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Save a table to `path`, replacing any existing file.
///
/// The data goes to a temporary sibling first and is renamed into place, so
/// a failed write never leaves a partial file at `path`.
///
/// # Returns
/// * `Ok(())` once the file is in place
/// * `Err(ScraperError::OutputWrite)` naming `path` on any I/O failure
pub fn save_csv(path: &Path, table: &ResultTable, delimiter: u8) -> Result<()> {
    let temp_path = temp_path_for(path);
    let output_error = |source| ScraperError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let written = (|| -> Result<()> {
        let file = File::create(&temp_path).map_err(output_error)?;
        write_csv(&file, table, delimiter).map_err(|e| match e {
            ScraperError::Csv(err) => output_error(std::io::Error::other(err)),
            other => other,
        })?;
        file.sync_all().map_err(output_error)?;
        Ok(())
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path).map_err(output_error)?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        output_error(e)
    })?;

    tracing::info!(path = %path.display(), rows = table.rows.len(), "Saved CSV");
    Ok(())
}

/// Hidden temporary file next to `path` (e.g. `out/.vysledky.csv.tmp`).
fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{file_name}.tmp"))
}
