use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};
use tracing::warn;

use crate::error::CsvFormatError;

/// Exact header names the input file must use. Column order is irrelevant;
/// only `UID` is required.
pub const UID_COLUMN: &str = "UID";
pub const EMPLOYMENT_COLUMN: &str = "Expected employment key";
pub const OCCUPATION_COLUMN: &str = "Expected occupation key";
pub const INSTITUTION_COLUMN: &str = "Institution";

/// One CSV record: an applicant and the values to push for them. Empty
/// cells map to `None`. Rows are independent of one another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub uid: String,
    pub expected_employment_key: Option<String>,
    pub expected_occupation_key: Option<String>,
    pub institution: Option<String>,
}

/// Reads applicant rows from a CSV file. Holds only the path; every
/// `rows()` call opens the file again from the start, so the sequence can
/// be re-read.
pub struct CsvRowReader {
    path: PathBuf,
}

impl CsvRowReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Open the file, validate the header and return a lazy iterator over
    /// its rows in file order. Fails if the file cannot be opened or the
    /// `UID` column is missing.
    pub fn rows(&self) -> Result<RowIter, CsvFormatError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|source| CsvFormatError::Open {
                path: self.path.clone(),
                source,
            })?;

        let headers = reader.headers().map_err(|source| CsvFormatError::Open {
            path: self.path.clone(),
            source,
        })?;

        let columns = ColumnMap::from_headers(headers)?;

        Ok(RowIter {
            records: reader.into_records(),
            columns,
            skipped: 0,
        })
    }
}

/// Header-name to position mapping for one file.
#[derive(Debug)]
struct ColumnMap {
    uid: usize,
    employment: Option<usize>,
    occupation: Option<usize>,
    institution: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, CsvFormatError> {
        let position = |name: &str| headers.iter().position(|header| header == name);

        let uid = position(UID_COLUMN).ok_or_else(|| CsvFormatError::MissingColumn {
            name: UID_COLUMN.to_string(),
        })?;

        Ok(Self {
            uid,
            employment: position(EMPLOYMENT_COLUMN),
            occupation: position(OCCUPATION_COLUMN),
            institution: position(INSTITUTION_COLUMN),
        })
    }
}

/// Lazy iterator over the data rows of one open file. A row with an empty
/// `UID` cell is skipped with a warning and counted, never raised.
pub struct RowIter {
    records: StringRecordsIntoIter<File>,
    columns: ColumnMap,
    skipped: u64,
}

impl RowIter {
    /// Number of rows skipped so far for an empty `UID`.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl Iterator for RowIter {
    type Item = Result<Row, CsvFormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(source) => {
                    let line = source.position().map(|p| p.line()).unwrap_or(0);
                    return Some(Err(CsvFormatError::Record { line, source }));
                }
            };

            let uid = match field_at(&record, Some(self.columns.uid)) {
                Some(uid) => uid,
                None => {
                    let line = record.position().map(|p| p.line()).unwrap_or(0);
                    warn!("Skipping CSV line {}: empty UID", line);
                    self.skipped += 1;
                    continue;
                }
            };

            return Some(Ok(Row {
                uid,
                expected_employment_key: field_at(&record, self.columns.employment),
                expected_occupation_key: field_at(&record, self.columns.occupation),
                institution: field_at(&record, self.columns.institution),
            }));
        }
    }
}

/// Cell at `index`, with empty and absent cells collapsed to `None`. Short
/// records are allowed, so an index past the record end is just an absent
/// cell.
fn field_at(record: &StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| record.get(i))
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn collect_rows(reader: &CsvRowReader) -> Vec<Row> {
        reader
            .rows()
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_rows_in_file_order() {
        let file = write_csv(
            "UID,Expected employment key,Expected occupation key\n\
             u-1,emp-x,occ-y\n\
             u-2,emp-z,\n",
        );

        let reader = CsvRowReader::new(file.path());
        let rows = collect_rows(&reader);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].uid, "u-1");
        assert_eq!(rows[0].expected_employment_key.as_deref(), Some("emp-x"));
        assert_eq!(rows[0].expected_occupation_key.as_deref(), Some("occ-y"));
        assert_eq!(rows[1].uid, "u-2");
        assert_eq!(rows[1].expected_occupation_key, None);
    }

    #[test]
    fn test_column_order_is_irrelevant() {
        let shuffled = write_csv(
            "Expected occupation key,UID,Expected employment key\n\
             occ-y,u-1,emp-x\n",
        );

        let reader = CsvRowReader::new(shuffled.path());
        let rows = collect_rows(&reader);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].uid, "u-1");
        assert_eq!(rows[0].expected_employment_key.as_deref(), Some("emp-x"));
        assert_eq!(rows[0].expected_occupation_key.as_deref(), Some("occ-y"));
    }

    #[test]
    fn test_unknown_columns_are_ignored() {
        let file = write_csv(
            "UID,Comment from ops,Expected employment key\n\
             u-1,please fix,emp-x\n",
        );

        let reader = CsvRowReader::new(file.path());
        let rows = collect_rows(&reader);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].expected_employment_key.as_deref(), Some("emp-x"));
    }

    #[test]
    fn test_missing_uid_column_is_fatal() {
        let file = write_csv("Applicant,Expected employment key\nu-1,emp-x\n");

        let reader = CsvRowReader::new(file.path());
        let result = reader.rows();

        assert!(matches!(
            result,
            Err(CsvFormatError::MissingColumn { ref name }) if name == "UID"
        ));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let reader = CsvRowReader::new("does/not/exist.csv");
        assert!(matches!(reader.rows(), Err(CsvFormatError::Open { .. })));
    }

    #[test]
    fn test_empty_uid_rows_are_skipped_and_counted() {
        let file = write_csv(
            "UID,Expected employment key,Expected occupation key\n\
             u-1,emp-x,occ-y\n\
             ,emp-z,occ-w\n\
             u-3,emp-v,occ-u\n",
        );

        let reader = CsvRowReader::new(file.path());
        let mut rows = reader.rows().unwrap();

        let collected: Vec<Row> = rows.by_ref().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].uid, "u-1");
        assert_eq!(collected[1].uid, "u-3");
        assert_eq!(rows.skipped(), 1);
    }

    #[test]
    fn test_whitespace_cells_map_to_none() {
        let file = write_csv(
            "UID,Expected employment key,Expected occupation key\n\
             u-1,   ,occ-y\n",
        );

        let reader = CsvRowReader::new(file.path());
        let rows = collect_rows(&reader);

        assert_eq!(rows[0].expected_employment_key, None);
        assert_eq!(rows[0].expected_occupation_key.as_deref(), Some("occ-y"));
    }

    #[test]
    fn test_short_rows_surface_as_absent_fields() {
        let file = write_csv(
            "UID,Expected employment key,Expected occupation key\n\
             u-1,emp-x\n",
        );

        let reader = CsvRowReader::new(file.path());
        let rows = collect_rows(&reader);

        assert_eq!(rows[0].expected_employment_key.as_deref(), Some("emp-x"));
        assert_eq!(rows[0].expected_occupation_key, None);
    }

    #[test]
    fn test_undecodable_record_is_fatal_not_skipped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"UID,Expected employment key,Expected occupation key\n")
            .unwrap();
        // Invalid UTF-8 in the data row: corrupt input, not a row to skip.
        file.write_all(b"\xff\xfe,emp-x,occ-y\n").unwrap();
        file.flush().unwrap();

        let reader = CsvRowReader::new(file.path());
        let mut rows = reader.rows().unwrap();

        let result = rows.next().unwrap();
        assert!(matches!(result, Err(CsvFormatError::Record { .. })));
        assert_eq!(rows.skipped(), 0);
    }

    #[test]
    fn test_rows_can_be_read_again_from_the_start() {
        let file = write_csv(
            "UID,Expected employment key,Expected occupation key\n\
             u-1,emp-x,occ-y\n\
             u-2,emp-z,occ-w\n",
        );

        let reader = CsvRowReader::new(file.path());
        let first = collect_rows(&reader);
        let second = collect_rows(&reader);

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_institution_column_is_optional() {
        let with = write_csv("UID,Institution\nu-1,TW\n");
        let without = write_csv("UID\nu-1\n");

        let rows = collect_rows(&CsvRowReader::new(with.path()));
        assert_eq!(rows[0].institution.as_deref(), Some("TW"));

        let rows = collect_rows(&CsvRowReader::new(without.path()));
        assert_eq!(rows[0].institution, None);
    }
}
