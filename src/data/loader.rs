use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::category::{Month, Weekday};
use super::error::{PipelineError, Result};
use super::model::{Column, Dataset, Holiday, RawRecord, Season, WeatherCondition};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a ride dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the fields (the canonical export)
/// * `.json`    – `[{ "date_time": "...", "hour": 0, ... }, ...]`
/// * `.parquet` – one column per field
///
/// The result is stable-sorted by timestamp; nothing is filtered.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(PipelineError::UnsupportedFormat(other.to_string())),
    }?;

    report_data_quality(path, &dataset);
    Ok(dataset)
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> PipelineError + '_ {
    move |source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn report_data_quality(path: &Path, dataset: &Dataset) {
    match dataset.time_span() {
        Some((min, max)) => log::info!(
            "Loaded {} records from {} spanning {min} .. {max}",
            dataset.len(),
            path.display()
        ),
        None => log::info!("Loaded an empty dataset from {}", path.display()),
    }

    let odd_seasons = dataset.non_canonical_seasons();
    if !odd_seasons.is_empty() {
        let labels: Vec<&str> = odd_seasons.iter().map(Season::label).collect();
        log::warn!("Season labels outside Spring/Summer/Fall/Winter kept verbatim: {labels:?}");
    }

    let inconsistent = dataset.inconsistent_count_rows();
    if inconsistent > 0 {
        log::warn!("{inconsistent} records where casual + registered != total");
    }
}

// ---------------------------------------------------------------------------
// Row parsing shared by every format
// ---------------------------------------------------------------------------

/// One source row, cells in `Column::ALL` order. `row` is 1-based.
struct RowCells<'a> {
    row: usize,
    cells: [Option<Cow<'a, str>>; 11],
}

impl RowCells<'_> {
    fn text(&self, col: Column) -> Result<&str> {
        match self.cells[col as usize].as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(PipelineError::parse(self.row, col.name(), "", "missing value")),
        }
    }

    fn count(&self, col: Column) -> Result<u64> {
        let s = self.text(col)?;
        parse_count(s).map_err(|reason| PipelineError::parse(self.row, col.name(), s, reason))
    }

    fn real(&self, col: Column) -> Result<f64> {
        let s = self.text(col)?;
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(_) => Err(PipelineError::parse(self.row, col.name(), s, "not a finite number")),
            Err(e) => Err(PipelineError::parse(self.row, col.name(), s, e.to_string())),
        }
    }

    fn into_record(self) -> Result<RawRecord> {
        let row = self.row;

        let ts_text = self.text(Column::DateTime)?;
        let timestamp = parse_timestamp(ts_text).ok_or_else(|| {
            PipelineError::parse(row, Column::DateTime.name(), ts_text, "unrecognised date-time")
        })?;

        let hour = self.count(Column::Hour)?;
        if hour > 23 {
            return Err(PipelineError::parse(
                row,
                Column::Hour.name(),
                &hour.to_string(),
                "hour must be within 0-23",
            ));
        }

        let holiday_text = self.text(Column::Holiday)?;
        let holiday = Holiday::parse_flag(holiday_text).ok_or_else(|| {
            PipelineError::parse(row, Column::Holiday.name(), holiday_text, "unrecognised holiday flag")
        })?;

        Ok(RawRecord {
            timestamp,
            hour: hour as u8,
            total_count: self.count(Column::TotalCount)?,
            casual_count: self.count(Column::Casual)?,
            registered_count: self.count(Column::Registered)?,
            temperature: self.real(Column::Temperature)?,
            season: Season::new(self.text(Column::Season)?),
            weather: WeatherCondition::new(self.text(Column::WeatherCondition)?),
            weekday: Weekday::from_label(self.text(Column::Weekday)?, row)?,
            month: Month::from_label(self.text(Column::Month)?, row)?,
            holiday,
        })
    }
}

/// Accepts `YYYY-MM-DD[ T]HH:MM[:SS[.fff]][Z]`, a bare date (midnight), or
/// RFC 3339 with an offset, which is converted to UTC.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 5] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.naive_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Largest accepted rider count. Sums of up to 2^32 such counts fit in `u64`.
const MAX_COUNT: u64 = u32::MAX as u64;

/// Counts may be exported as floats (`"12.0"`); they must still be whole,
/// non-negative and at most [`MAX_COUNT`].
fn parse_count(s: &str) -> std::result::Result<u64, String> {
    let n = match s.parse::<u64>() {
        Ok(n) => n,
        Err(_) => match s.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v < u64::MAX as f64 => {
                v as u64
            }
            Ok(_) => return Err("expected a non-negative whole number".to_string()),
            Err(e) => return Err(e.to_string()),
        },
    };
    if n > MAX_COUNT {
        return Err(format!("count exceeds {MAX_COUNT}"));
    }
    Ok(n)
}

/// Map every field to its position, failing on the first absent one.
fn resolve_columns(mut lookup: impl FnMut(&str) -> Option<usize>) -> Result<[usize; 11]> {
    let mut idx = [0usize; 11];
    for (slot, col) in idx.iter_mut().zip(Column::ALL) {
        *slot = lookup(col.name()).ok_or(PipelineError::MissingColumn(col.name()))?;
    }
    Ok(idx)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(io_error(path))?;
    read_csv(file, path)
}

/// Read CSV from any byte source; `origin` only labels I/O errors.
pub fn read_csv<R: Read>(source: R, origin: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| csv_error(e, 0, origin))?
        .clone();
    let idx = resolve_columns(|name| headers.iter().position(|h| h == name))?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| csv_error(e, row, origin))?;
        let cells = idx.map(|j| record.get(j).map(Cow::Borrowed));
        records.push(RowCells { row, cells }.into_record()?);
    }

    Ok(Dataset::from_records(records))
}

fn csv_error(err: csv::Error, row: usize, origin: &Path) -> PipelineError {
    match err.into_kind() {
        csv::ErrorKind::Io(source) => PipelineError::Io {
            path: origin.to_path_buf(),
            source,
        },
        other if row == 0 => PipelineError::Malformed(format!("CSV header: {other:?}")),
        other => PipelineError::parse(row, "<row>", "", format!("{other:?}")),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).map_err(io_error(path))?;
    parse_json(&text)
}

/// Records-oriented JSON, i.e. `df.to_json(orient='records')`.
pub fn parse_json(text: &str) -> Result<Dataset> {
    let root: JsonValue =
        serde_json::from_str(text).map_err(|e| PipelineError::Malformed(format!("JSON: {e}")))?;
    let rows = root
        .as_array()
        .ok_or_else(|| PipelineError::Malformed("expected a top-level JSON array".to_string()))?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, value) in rows.iter().enumerate() {
        let row = i + 1;
        let obj = value.as_object().ok_or_else(|| {
            PipelineError::parse(row, "<row>", &value.to_string(), "not a JSON object")
        })?;
        if let Some(col) = Column::ALL.iter().find(|c| !obj.contains_key(c.name())) {
            return Err(PipelineError::MissingColumn(col.name()));
        }
        let cells = Column::ALL.map(|col| obj.get(col.name()).and_then(json_cell));
        records.push(RowCells { row, cells }.into_record()?);
    }

    Ok(Dataset::from_records(records))
}

fn json_cell(val: &JsonValue) -> Option<Cow<'_, str>> {
    match val {
        JsonValue::String(s) => Some(Cow::Borrowed(s.as_str())),
        JsonValue::Null => None,
        other => Some(Cow::Owned(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); timestamp columns may be native Arrow
/// timestamps/dates or strings.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(io_error(path))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .and_then(|b| b.build())
        .map_err(|e| PipelineError::Malformed(format!("Parquet: {e}")))?;

    let mut records = Vec::new();
    let mut row = 0usize;

    for batch_result in reader {
        let batch = batch_result.map_err(|e| PipelineError::Malformed(format!("Parquet: {e}")))?;
        let schema = batch.schema();
        let idx = resolve_columns(|name| schema.index_of(name).ok())?;
        let columns: Vec<&ArrayRef> = idx.iter().map(|&j| batch.column(j)).collect();

        for r in 0..batch.num_rows() {
            row += 1;
            let mut cells: [Option<Cow<'_, str>>; 11] = Default::default();
            for (cell, col) in cells.iter_mut().zip(&columns) {
                *cell = cell_text(col, r)?.map(Cow::Owned);
            }
            records.push(RowCells { row, cells }.into_record()?);
        }
    }

    Ok(Dataset::from_records(records))
}

/// Render one Arrow cell as text so every format shares the row parser.
fn cell_text(col: &ArrayRef, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Boolean => col.as_boolean().value(row).to_string(),
        _ => array_value_to_string(col.as_ref(), row)
            .map_err(|e| PipelineError::Malformed(format!("Parquet cell: {e}")))?,
    };
    Ok(Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use std::io::Write;

    const HEADER: &str = "date_time,hour,season_hourly,weather_condition_hourly,weekday_hourly,\
month_hourly,holiday_hourly,temp_hourly,casual_hourly,registered_hourly,total_count_hourly";

    fn csv_text(rows: &[&str]) -> String {
        let mut s = HEADER.to_string();
        for r in rows {
            s.push('\n');
            s.push_str(r);
        }
        s
    }

    fn read(text: &str) -> Result<Dataset> {
        read_csv(text.as_bytes(), Path::new("<memory>"))
    }

    #[test]
    fn reads_rows_and_sorts_by_timestamp() {
        let text = csv_text(&[
            "2011-01-02 01:00:00,1,Springer,\"Mist + Cloudy, Mist + Broken clouds, Mist + Few clouds, Mist\",Sun,Jan,0,0.22,3,13,16",
            "2011-01-01 00:00:00,0,Springer,\"Clear, Few clouds, Partly cloudy, Partly cloudy\",Sat,Jan,0,0.24,3,13,16",
        ]);
        let ds = read(&text).unwrap();
        assert_eq!(ds.len(), 2);

        let first = &ds.records()[0];
        assert_eq!(first.timestamp.date(), NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(first.weekday, Weekday::Sat);
        assert_eq!(first.season.label(), "Springer");
        assert_eq!(first.weather.severity(), Some(0));
        assert_eq!(ds.records()[1].weather.severity(), Some(1));
        assert_eq!(first.total_count, 16);
        assert!((first.temperature - 0.24).abs() < 1e-12);
    }

    #[test]
    fn column_order_is_irrelevant_and_extras_are_ignored() {
        let text = "instant,total_count_hourly,registered_hourly,casual_hourly,temp_hourly,\
holiday_hourly,month_hourly,weekday_hourly,weather_condition_hourly,season_hourly,hour,date_time\n\
1,40,32,8,0.3,1,Jul,Wed,Clear,Summer,5,2012-07-04 05:00:00";
        let ds = read(text).unwrap();
        let r = &ds.records()[0];
        assert_eq!(r.hour, 5);
        assert_eq!(r.total_count, 40);
        assert_eq!(r.month, Month::Jul);
        assert_eq!(r.holiday, Holiday::Holiday);
    }

    #[test]
    fn bare_dates_parse_as_midnight() {
        let text = csv_text(&["2011-03-05,7,Springer,Clear,Sat,Mar,0,0.3,1,2,3.0"]);
        let ds = read(&text).unwrap();
        let r = &ds.records()[0];
        assert_eq!(r.timestamp.hour(), 0);
        assert_eq!(r.hour, 7);
        assert_eq!(r.total_count, 3);
    }

    #[test]
    fn malformed_timestamp_is_a_parse_error() {
        let text = csv_text(&["yesterday,0,Summer,Clear,Mon,Jan,0,0.2,1,2,3"]);
        match read(&text) {
            Err(PipelineError::Parse { row, column, value, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "date_time");
                assert_eq!(value, "yesterday");
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn malformed_numbers_are_parse_errors() {
        let negative = csv_text(&["2011-01-01 00:00:00,0,Summer,Clear,Mon,Jan,0,0.2,-1,2,3"]);
        assert!(matches!(
            read(&negative),
            Err(PipelineError::Parse { column: "casual_hourly", .. })
        ));

        let bad_temp = csv_text(&["2011-01-01 00:00:00,0,Summer,Clear,Mon,Jan,0,warm,1,2,3"]);
        assert!(matches!(
            read(&bad_temp),
            Err(PipelineError::Parse { column: "temp_hourly", .. })
        ));

        let bad_hour = csv_text(&["2011-01-01 00:00:00,24,Summer,Clear,Mon,Jan,0,0.2,1,2,3"]);
        assert!(matches!(
            read(&bad_hour),
            Err(PipelineError::Parse { column: "hour", .. })
        ));

        let empty = csv_text(&["2011-01-01 00:00:00,0,Summer,Clear,Mon,Jan,0,0.2,1,,3"]);
        assert!(matches!(
            read(&empty),
            Err(PipelineError::Parse { column: "registered_hourly", .. })
        ));
    }

    #[test]
    fn counts_beyond_u32_are_rejected_so_sums_stay_exact() {
        let huge = csv_text(&[
            "2011-01-01 00:00:00,0,Summer,Clear,Mon,Jan,0,0.2,0,0,10000000000000000000",
            "2011-01-01 01:00:00,1,Summer,Clear,Mon,Jan,0,0.2,0,0,10000000000000000000",
        ]);
        assert!(matches!(
            read(&huge),
            Err(PipelineError::Parse { row: 1, column: "total_count_hourly", .. })
        ));

        // 2^64 written as a float must not clamp to u64::MAX.
        assert!(parse_count("18446744073709551616").is_err());
        assert!(parse_count("18446744073709551616.0").is_err());
        assert!(parse_count("4294967296").is_err());

        let max = csv_text(&[
            "2011-01-01 00:00:00,0,Summer,Clear,Mon,Jan,0,0.2,0,4294967295,4294967295",
            "2011-01-01 01:00:00,1,Summer,Clear,Mon,Jan,0,0.2,0,4294967295,4294967295.0",
        ]);
        let ds = read(&max).unwrap();
        let daily = crate::data::aggregate::daily_totals(ds.records());
        assert_eq!(daily[0].sum, 2 * 4_294_967_295);
    }

    #[test]
    fn offset_timestamps_are_converted_to_utc() {
        assert_eq!(
            parse_timestamp("2012-05-01T08:00:00+00:00"),
            NaiveDate::from_ymd_opt(2012, 5, 1).unwrap().and_hms_opt(8, 0, 0)
        );
        assert_eq!(
            parse_timestamp("2012-05-01T10:30:00+02:00"),
            NaiveDate::from_ymd_opt(2012, 5, 1).unwrap().and_hms_opt(8, 30, 0)
        );
    }

    #[test]
    fn unknown_weekday_rejects_the_load() {
        let text = csv_text(&[
            "2011-01-01 00:00:00,0,Summer,Clear,Mon,Jan,0,0.2,1,2,3",
            "2011-01-01 01:00:00,1,Summer,Clear,Funday,Jan,0,0.2,1,2,3",
        ]);
        assert!(matches!(
            read(&text),
            Err(PipelineError::UnknownCategory { row: 2, domain: "weekday", .. })
        ));
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let text = "date_time,hour\n2011-01-01,0";
        assert!(matches!(
            read(text),
            Err(PipelineError::MissingColumn("season_hourly"))
        ));
    }

    #[test]
    fn json_records_accept_numbers_and_strings() {
        let text = r#"[
            {"date_time": "2011-01-01 01:00:00", "hour": 1, "season_hourly": "Springer",
             "weather_condition_hourly": "Clear", "weekday_hourly": "Sat", "month_hourly": "Jan",
             "holiday_hourly": false, "temp_hourly": 0.22, "casual_hourly": 8,
             "registered_hourly": 32, "total_count_hourly": 40},
            {"date_time": "2011-01-01T00:00:00", "hour": "0", "season_hourly": "Springer",
             "weather_condition_hourly": "Clear", "weekday_hourly": "Sat", "month_hourly": "Jan",
             "holiday_hourly": "0", "temp_hourly": "0.24", "casual_hourly": 3.0,
             "registered_hourly": 13, "total_count_hourly": 16}
        ]"#;
        let ds = parse_json(text).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].total_count, 16);
        assert_eq!(ds.records()[1].holiday, Holiday::WorkingDay);
    }

    #[test]
    fn json_must_be_an_array_of_complete_objects() {
        assert!(matches!(parse_json("{}"), Err(PipelineError::Malformed(_))));
        assert!(matches!(parse_json("[1]"), Err(PipelineError::Parse { row: 1, .. })));
        assert!(matches!(
            parse_json(r#"[{"date_time": "2011-01-01"}]"#),
            Err(PipelineError::MissingColumn("hour"))
        ));
    }

    #[test]
    fn load_file_dispatches_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rides.CSV");
        let mut f = File::create(&path).unwrap();
        write!(
            f,
            "{}",
            csv_text(&["2011-01-01 00:00:00,0,Summer,Clear,Mon,Jan,0,0.2,1,2,3"])
        )
        .unwrap();
        drop(f);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);

        let other = dir.path().join("rides.xlsx");
        std::fs::write(&other, b"").unwrap();
        assert!(matches!(
            load_file(&other),
            Err(PipelineError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn unreadable_source_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        match load_file(&missing) {
            Err(PipelineError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn parquet_round_trips_through_the_shared_row_parser() {
        use arrow::array::{Float64Array, Int64Array, StringArray};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;
        use std::sync::Arc;

        let utf8 = |name: &str| Field::new(name, DataType::Utf8, false);
        let int = |name: &str| Field::new(name, DataType::Int64, false);
        let schema = Arc::new(Schema::new(vec![
            utf8("date_time"),
            int("hour"),
            utf8("season_hourly"),
            utf8("weather_condition_hourly"),
            utf8("weekday_hourly"),
            utf8("month_hourly"),
            int("holiday_hourly"),
            Field::new("temp_hourly", DataType::Float64, false),
            int("casual_hourly"),
            int("registered_hourly"),
            int("total_count_hourly"),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["2012-05-02 09:00:00", "2012-05-01 08:00:00"])),
                Arc::new(Int64Array::from(vec![9, 8])),
                Arc::new(StringArray::from(vec!["Summer", "Summer"])),
                Arc::new(StringArray::from(vec!["Clear", "Clear"])),
                Arc::new(StringArray::from(vec!["Wed", "Tues"])),
                Arc::new(StringArray::from(vec!["May", "May"])),
                Arc::new(Int64Array::from(vec![0, 0])),
                Arc::new(Float64Array::from(vec![0.5, 0.4])),
                Arc::new(Int64Array::from(vec![10, 20])),
                Arc::new(Int64Array::from(vec![90, 180])),
                Arc::new(Int64Array::from(vec![100, 200])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rides.parquet");
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        let totals: Vec<u64> = ds.records().iter().map(|r| r.total_count).collect();
        assert_eq!(totals, vec![200, 100]);
        assert_eq!(ds.records()[0].weekday, Weekday::Tues);
    }

    #[test]
    fn parquet_utc_timestamp_column_is_accepted() {
        use arrow::array::{Float64Array, Int64Array, StringArray, TimestampSecondArray};
        use arrow::datatypes::{Field, Schema, TimeUnit};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;
        use std::sync::Arc;

        // 2012-05-01 08:00:00 UTC
        let stamps = TimestampSecondArray::from(vec![1_335_859_200]).with_timezone("+00:00");
        let utf8 = |name: &str| Field::new(name, DataType::Utf8, false);
        let int = |name: &str| Field::new(name, DataType::Int64, false);
        let schema = Arc::new(Schema::new(vec![
            Field::new(
                "date_time",
                DataType::Timestamp(TimeUnit::Second, Some("+00:00".into())),
                false,
            ),
            int("hour"),
            utf8("season_hourly"),
            utf8("weather_condition_hourly"),
            utf8("weekday_hourly"),
            utf8("month_hourly"),
            int("holiday_hourly"),
            Field::new("temp_hourly", DataType::Float64, false),
            int("casual_hourly"),
            int("registered_hourly"),
            int("total_count_hourly"),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(stamps),
                Arc::new(Int64Array::from(vec![8])),
                Arc::new(StringArray::from(vec!["Summer"])),
                Arc::new(StringArray::from(vec!["Clear"])),
                Arc::new(StringArray::from(vec!["Tues"])),
                Arc::new(StringArray::from(vec!["May"])),
                Arc::new(Int64Array::from(vec![0])),
                Arc::new(Float64Array::from(vec![0.4])),
                Arc::new(Int64Array::from(vec![20])),
                Arc::new(Int64Array::from(vec![180])),
                Arc::new(Int64Array::from(vec![200])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("utc.parquet");
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(
            ds.records()[0].timestamp,
            NaiveDate::from_ymd_opt(2012, 5, 1).unwrap().and_hms_opt(8, 0, 0).unwrap()
        );
    }
}
