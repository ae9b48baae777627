// src/utils/data_io.rs
//! CSV input and output for place tables and score tables.

use log::{debug, info};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::error::PlaceMatchError;
use crate::models::core::{Place, PlaceTable, REQUIRED_COLUMNS};
use crate::models::matching::{ScoreRow, ScoreTable};
use crate::models::stats_models::PipelineStats;

/// Read places from CSV. Every required column must be present in the header;
/// extra columns are ignored and an `id` column is picked up when present.
/// Header names are trimmed before matching.
pub fn read_places<R: Read>(reader: R) -> Result<PlaceTable, PlaceMatchError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(PlaceMatchError::MissingColumn(missing.to_string()));
    }

    let places = rdr
        .deserialize::<Place>()
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Read {} places from CSV", places.len());
    Ok(PlaceTable::new(places))
}

pub fn read_places_from_path(path: &Path) -> Result<PlaceTable, PlaceMatchError> {
    let table = read_places(File::open(path)?)?;
    info!("Loaded {} places from {}", table.len(), path.display());
    Ok(table)
}

/// Write the chunks as one CSV, in chunk order. The header is written even when
/// there are no rows. Returns the number of rows written.
pub fn write_score_tables<W: Write>(
    writer: W,
    tables: &[ScoreTable],
) -> Result<usize, PlaceMatchError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(ScoreTable::columns())?;
    let mut written = 0;
    for row in tables.iter().flat_map(|table| table.rows.iter()) {
        wtr.serialize(row)?;
        written += 1;
    }
    wtr.flush()?;
    Ok(written)
}

/// Read one score column back from a CSV written by [`write_score_tables`].
pub fn read_score_column<R: Read>(reader: R, column: &str) -> Result<Vec<f64>, PlaceMatchError> {
    if !ScoreTable::SCORE_COLUMNS.contains(&column) {
        return Err(PlaceMatchError::MissingColumn(column.to_string()));
    }
    let mut rdr = csv::Reader::from_reader(reader);
    let mut values = Vec::new();
    for row in rdr.deserialize::<ScoreRow>() {
        if let Some(value) = row?.score(column) {
            values.push(value);
        }
    }
    Ok(values)
}

pub fn write_stats<W: Write>(writer: W, stats: &PipelineStats) -> Result<(), PlaceMatchError> {
    serde_json::to_writer_pretty(writer, stats).map_err(io::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    const PLACES_CSV: &str = "\
id,name,address,city,state,country,categories,latitude,longitude,extra
E_1,Cafe A,,Springfield,IL,US,Cafes,1.0,1.0,x
E_2,cafe a,1 Main St,,,US,,1.0001,1.0001,y
";

    fn score_row(i: usize, j: usize) -> ScoreRow {
        ScoreRow {
            index_1: i,
            index_2: j,
            name_score: 0.5,
            latitude_score: 1.0,
            longitude_score: 0.25,
            address_score: 0.0,
            city_score: 1.0,
            country_score: 1.0,
            categories_score: 0.0,
        }
    }

    #[test]
    fn test_read_places() {
        let table = read_places(Cursor::new(PLACES_CSV)).unwrap();
        assert_eq!(table.len(), 2);
        let first = &table.places[0];
        assert_eq!(first.id.as_deref(), Some("E_1"));
        assert_eq!(first.name.as_deref(), Some("Cafe A"));
        assert_eq!(first.address, None);
        assert_eq!(table.places[1].city, None);
        assert_eq!(table.places[1].latitude, 1.0001);
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "name,address,city,state,country,latitude,longitude\nA,,,,,1,1\n";
        let err = read_places(Cursor::new(csv)).unwrap_err();
        match err {
            PlaceMatchError::MissingColumn(column) => assert_eq!(column, "categories"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_padded_headers_still_load_values() {
        let csv = "id, name ,address,city,state, country ,categories,latitude,longitude\n\
                   E_1,Cafe A,,,,US,,1.0,1.0\n";
        let table = read_places(Cursor::new(csv)).unwrap();
        assert_eq!(table.places[0].name.as_deref(), Some("Cafe A"));
        assert_eq!(table.places[0].country.as_deref(), Some("US"));
    }

    #[test]
    fn test_read_places_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(PLACES_CSV.as_bytes()).unwrap();
        let table = read_places_from_path(file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_write_scores_header_only_when_empty() {
        let mut out = Vec::new();
        let written = write_score_tables(&mut out, &[ScoreTable::default()]).unwrap();
        assert_eq!(written, 0);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.trim_end(), ScoreTable::columns().join(","));
    }

    #[test]
    fn test_write_then_read_score_column() {
        let tables = vec![
            ScoreTable::new(vec![score_row(0, 1)]),
            ScoreTable::new(vec![score_row(1, 2), score_row(2, 3)]),
        ];
        let mut out = Vec::new();
        assert_eq!(write_score_tables(&mut out, &tables).unwrap(), 3);

        let values = read_score_column(Cursor::new(&out), "longitude_score").unwrap();
        assert_eq!(values, vec![0.25, 0.25, 0.25]);
        assert!(matches!(
            read_score_column(Cursor::new(&out), "index_1"),
            Err(PlaceMatchError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_write_stats_json() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .unwrap();
        let mut stats = PipelineStats::new("run-1", ts, Some("test run"));
        stats.total_records = 3;
        let mut out = Vec::new();
        write_stats(&mut out, &stats).unwrap();
        let parsed: PipelineStats = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, stats);
    }
}
