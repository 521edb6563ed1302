//! Delimited-file reader for the players and teams exports

use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

use crate::error::{EtlError, Result};

/// Every column is read as text; the normalizer decides the types.
/// Blank cells read as null and over-long rows are truncated to the header.
fn read_options(limit: Option<usize>) -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_n_rows(limit)
        .with_parse_options(CsvParseOptions::default().with_truncate_ragged_lines(true))
}

/// Read a comma-delimited file with a header row.
///
/// `limit` keeps only the first N data rows.
pub fn read_table(path: &Path, limit: Option<usize>) -> Result<DataFrame> {
    read_options(limit)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|source| EtlError::Source {
            path: path.to_path_buf(),
            source,
        })
}

/// Read delimited data already in memory
pub fn read_from(data: &[u8], limit: Option<usize>) -> PolarsResult<DataFrame> {
    read_options(limit)
        .into_reader_with_file_handle(Cursor::new(data))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYERS: &[u8] = b"player_id,short_name,long_name,player_positions,overall\n\
                             1,L. Messi,Lionel Messi,\"RW, ST\",93\n\
                             2,,Cristiano Ronaldo,ST,92\n\
                             3,Neymar Jr,Neymar,LW,89\n";

    #[test]
    fn test_reads_header_and_cells_as_text() {
        let frame = read_from(PLAYERS, None).unwrap();
        assert_eq!(frame.height(), 3);

        let positions = frame.column("player_positions").unwrap();
        assert_eq!(positions.dtype(), &DataType::String);
        assert_eq!(positions.get(0).unwrap(), AnyValue::String("RW, ST"));

        let overall = frame.column("overall").unwrap();
        assert_eq!(overall.dtype(), &DataType::String);
    }

    #[test]
    fn test_blank_cells_are_null() {
        let frame = read_from(PLAYERS, None).unwrap();
        assert_eq!(frame.column("short_name").unwrap().null_count(), 1);
    }

    #[test]
    fn test_row_limit() {
        let frame = read_from(PLAYERS, Some(2)).unwrap();
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.column("player_id").unwrap().get(1).unwrap(), AnyValue::String("2"));
    }

    #[test]
    fn test_missing_file_is_source_error() {
        let err = read_table(Path::new("/nonexistent/male_players.csv"), None).unwrap_err();
        assert!(matches!(err, EtlError::Source { .. }));
    }
}
