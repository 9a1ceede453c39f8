//! Parsing of raw Thermo-Calc export files.
//!
//! Exports are tab-separated text with `#`-prefixed comment lines above the
//! header. Column naming varies between console exports and plot exports,
//! so columns are matched heuristically: the first header containing a `T`
//! (case-insensitive) is the temperature column and the first containing a
//! `G` is the Gibbs-energy column, after whitespace trimming. Rows that
//! fail to parse are skipped and counted, not fatal.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use log::warn;

/// Errors from raw-export parsing.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error reading the export file.
    #[error("failed to read export: {0}")]
    Io(#[from] std::io::Error),

    /// CSV/TSV structural error.
    #[error("TSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// No header matched the heuristic for a required column.
    #[error("no column matching '{0}' in export header")]
    MissingColumn(&'static str),

    /// The export contained a header but no parseable data rows.
    #[error("export contains no data rows")]
    Empty,
}

/// A parsed raw export: temperature and Gibbs-energy columns only.
#[derive(Debug, Clone, PartialEq)]
pub struct RawExport {
    /// Name of the header matched as temperature.
    pub t_column: String,
    /// Name of the header matched as Gibbs energy.
    pub g_column: String,
    /// `(T_K, G_J)` samples in file order.
    pub rows: Vec<(f64, f64)>,
    /// Count of data rows dropped because a cell failed to parse.
    pub skipped_rows: usize,
}

impl RawExport {
    /// Parse an export file from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse an export from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ExportError> {
        let body = strip_comments(reader)?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .has_headers(true)
            .from_reader(Cursor::new(body));

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let t_idx = headers
            .iter()
            .position(|h| h.to_uppercase().contains('T'))
            .ok_or(ExportError::MissingColumn("T"))?;
        let g_idx = headers
            .iter()
            .position(|h| h.to_uppercase().contains('G'))
            .ok_or(ExportError::MissingColumn("G"))?;

        let mut rows = Vec::new();
        let mut skipped_rows = 0usize;

        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;
            let t = record.get(t_idx).map(str::trim).map(str::parse::<f64>);
            let g = record.get(g_idx).map(str::trim).map(str::parse::<f64>);
            match (t, g) {
                (Some(Ok(t)), Some(Ok(g))) => rows.push((t, g)),
                _ => {
                    skipped_rows += 1;
                    warn!("skipping unparseable export row {}", line + 1);
                }
            }
        }

        if rows.is_empty() {
            return Err(ExportError::Empty);
        }

        Ok(Self {
            t_column: headers[t_idx].clone(),
            g_column: headers[g_idx].clone(),
            rows,
            skipped_rows,
        })
    }
}

/// A raw export kept whole: every column, values as text. Used for the
/// passthrough processing of activity tables, where the transform is only
/// "standardize headers and re-emit as CSV".
#[derive(Debug, Clone, PartialEq)]
pub struct GenericExport {
    /// Trimmed header names.
    pub headers: Vec<String>,
    /// Data records, one Vec of cells per row.
    pub records: Vec<Vec<String>>,
}

impl GenericExport {
    /// Parse an export file from disk, keeping all columns.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse an export from any buffered reader, keeping all columns.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ExportError> {
        let body = strip_comments(reader)?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .has_headers(true)
            .from_reader(Cursor::new(body));

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            records.push(record.iter().map(|c| c.trim().to_string()).collect());
        }

        if records.is_empty() {
            return Err(ExportError::Empty);
        }

        Ok(Self { headers, records })
    }

    /// Write the table as comma-separated CSV.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_path(path.as_ref())?;
        writer.write_record(&self.headers)?;
        for record in &self.records {
            writer.write_record(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Drop `#`-prefixed comment lines and blank lines ahead of the header.
fn strip_comments<R: BufRead>(reader: R) -> Result<String, std::io::Error> {
    let mut body = String::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') || trimmed.is_empty() {
            continue;
        }
        body.push_str(&line);
        body.push('\n');
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const EXPORT: &str = "\
# Thermo-Calc console export\n\
# GM vs temperature, 1 atm\n\
T [K]\tGM(CUPRITE) [J/mol]\n\
1273\t-180500.2\n\
1373\t-175300.9\n\
1473\t-170100.5\n";

    #[test]
    fn test_parse_export() {
        let export = RawExport::from_reader(Cursor::new(EXPORT)).unwrap();
        assert_eq!(export.t_column, "T [K]");
        assert_eq!(export.g_column, "GM(CUPRITE) [J/mol]");
        assert_eq!(export.rows.len(), 3);
        assert_eq!(export.rows[0], (1273.0, -180_500.2));
        assert_eq!(export.skipped_rows, 0);
    }

    #[test]
    fn test_bad_row_skipped() {
        let text = "T [K]\tGM [J/mol]\n1273\t-180500.2\n1373\tNaN?\n1473\t-170100.5\n";
        let export = RawExport::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(export.rows.len(), 2);
        assert_eq!(export.skipped_rows, 1);
    }

    #[test]
    fn test_missing_gibbs_column() {
        let text = "T [K]\tX(O)\n1273\t0.333\n";
        // "X(O)" has no G, so the heuristic must fail.
        assert!(matches!(
            RawExport::from_reader(Cursor::new(text)),
            Err(ExportError::MissingColumn("G"))
        ));
    }

    #[test]
    fn test_empty_export() {
        let text = "# only comments\nT [K]\tGM [J/mol]\n";
        assert!(matches!(
            RawExport::from_reader(Cursor::new(text)),
            Err(ExportError::Empty)
        ));
    }

    #[test]
    fn test_generic_export_keeps_columns() {
        let text = "# activity export\nT [K]\tX(CU)\tACR(CU)\n1873\t0.03\t0.21\n";
        let export = GenericExport::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(export.headers, vec!["T [K]", "X(CU)", "ACR(CU)"]);
        assert_eq!(export.records[0][2], "0.21");
    }
}
