use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate, Weekday};
use parquet::arrow::ArrowWriter;

const WEEKDAYS: [&str; 7] = ["Mon", "Tues", "Wed", "Thurs", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const WEATHER: [&str; 4] = [
    "Clear, Few clouds, Partly cloudy, Partly cloudy",
    "Mist + Cloudy, Mist + Broken clouds, Mist + Few clouds, Mist",
    "Light Snow, Light Rain + Thunderstorm + Scattered clouds, Light Rain + Scattered clouds",
    "Heavy Rain + Ice Pallets + Thunderstorm + Mist, Snow + Fog",
];
/// Cumulative probabilities for the weather buckets.
const WEATHER_CDF: [f64; 4] = [0.65, 0.91, 0.995, 1.0];
const WEATHER_FACTOR: [f64; 4] = [1.0, 0.85, 0.45, 0.2];

/// Fixed-date public holidays observed in the sample.
const HOLIDAYS: [(u32, u32); 5] = [(1, 1), (1, 17), (7, 4), (11, 11), (12, 25)];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in [0, 1).
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Season labels as the published dataset spells them, by quarter.
fn season_label(month0: usize) -> &'static str {
    match month0 {
        0..=2 => "Springer",
        3..=5 => "Summer",
        6..=8 => "Fall",
        _ => "Winter",
    }
}

/// Rides per hour on a working day: two commute peaks.
fn hour_profile(hour: u32, working: bool) -> f64 {
    let h = hour as f64;
    if working {
        let morning = 320.0 * (-(h - 8.0).powi(2) / 2.0).exp();
        let evening = 420.0 * (-(h - 17.5).powi(2) / 3.0).exp();
        20.0 + morning + evening + 60.0 * (-(h - 13.0).powi(2) / 10.0).exp()
    } else {
        15.0 + 300.0 * (-(h - 14.0).powi(2) / 12.0).exp()
    }
}

struct Columns {
    date_time: Vec<String>,
    hour: Vec<i64>,
    season: Vec<&'static str>,
    weather: Vec<&'static str>,
    weekday: Vec<&'static str>,
    month: Vec<&'static str>,
    holiday: Vec<i64>,
    temp: Vec<f64>,
    casual: Vec<i64>,
    registered: Vec<i64>,
    total: Vec<i64>,
}

fn generate(rng: &mut SimpleRng) -> Result<Columns> {
    let mut c = Columns {
        date_time: Vec::new(),
        hour: Vec::new(),
        season: Vec::new(),
        weather: Vec::new(),
        weekday: Vec::new(),
        month: Vec::new(),
        holiday: Vec::new(),
        temp: Vec::new(),
        casual: Vec::new(),
        registered: Vec::new(),
        total: Vec::new(),
    };

    let first = NaiveDate::from_ymd_opt(2011, 1, 1).context("start date")?;
    let last = NaiveDate::from_ymd_opt(2012, 12, 31).context("end date")?;

    let mut day = first;
    while day <= last {
        let month0 = day.month0() as usize;
        let is_holiday = HOLIDAYS.contains(&(day.month(), day.day()));
        let weekend = matches!(day.weekday(), Weekday::Sat | Weekday::Sun);
        let working = !weekend && !is_holiday;
        let growth = if day.year() == 2012 { 1.6 } else { 1.0 };
        // Normalised temperature peaking in July.
        let season_temp =
            0.5 - 0.3 * (2.0 * std::f64::consts::PI * (day.ordinal0() as f64 + 15.0) / 365.0).cos();

        for hour in 0..24u32 {
            let draw = rng.unit();
            let w = WEATHER_CDF.iter().position(|&p| draw < p).unwrap_or(0);
            let temp = ((season_temp + 0.06 * (rng.unit() - 0.5)) * 100.0).round() / 100.0;

            let expected = hour_profile(hour, working)
                * WEATHER_FACTOR[w]
                * growth
                * (0.4 + temp)
                * (0.85 + 0.3 * rng.unit());
            let total = expected.round().max(1.0) as i64;
            let casual_share = if working { 0.12 } else { 0.35 };
            let casual = (total as f64 * casual_share * (0.8 + 0.4 * rng.unit())).round() as i64;
            let casual = casual.min(total);

            c.date_time.push(format!("{} {:02}:00:00", day.format("%Y-%m-%d"), hour));
            c.hour.push(hour as i64);
            c.season.push(season_label(month0));
            c.weather.push(WEATHER[w]);
            c.weekday.push(WEEKDAYS[day.weekday().num_days_from_monday() as usize]);
            c.month.push(MONTHS[month0]);
            c.holiday.push(i64::from(is_holiday));
            c.temp.push(temp);
            c.casual.push(casual);
            c.registered.push(total - casual);
            c.total.push(total);
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    Ok(c)
}

fn write_csv(c: &Columns, path: &str) -> Result<()> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    w.write_record([
        "date_time",
        "hour",
        "season_hourly",
        "weather_condition_hourly",
        "weekday_hourly",
        "month_hourly",
        "holiday_hourly",
        "temp_hourly",
        "casual_hourly",
        "registered_hourly",
        "total_count_hourly",
    ])?;
    for i in 0..c.total.len() {
        w.write_record([
            c.date_time[i].clone(),
            c.hour[i].to_string(),
            c.season[i].to_string(),
            c.weather[i].to_string(),
            c.weekday[i].to_string(),
            c.month[i].to_string(),
            c.holiday[i].to_string(),
            c.temp[i].to_string(),
            c.casual[i].to_string(),
            c.registered[i].to_string(),
            c.total[i].to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

fn write_parquet(c: &Columns, path: &str) -> Result<()> {
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
            Arc::new(StringArray::from_iter_values(&c.date_time)),
            Arc::new(Int64Array::from(c.hour.clone())),
            Arc::new(StringArray::from(c.season.clone())),
            Arc::new(StringArray::from(c.weather.clone())),
            Arc::new(StringArray::from(c.weekday.clone())),
            Arc::new(StringArray::from(c.month.clone())),
            Arc::new(Int64Array::from(c.holiday.clone())),
            Arc::new(Float64Array::from(c.temp.clone())),
            Arc::new(Int64Array::from(c.casual.clone())),
            Arc::new(Int64Array::from(c.registered.clone())),
            Arc::new(Int64Array::from(c.total.clone())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(2011);
    let columns = generate(&mut rng)?;

    let csv_path = "all_data_bike_sharing.csv";
    let parquet_path = "all_data_bike_sharing.parquet";
    write_csv(&columns, csv_path)?;
    write_parquet(&columns, parquet_path)?;

    let rides: i64 = columns.total.iter().sum();
    println!(
        "Wrote {} hourly records ({rides} rides) to {csv_path} and {parquet_path}",
        columns.total.len()
    );
    Ok(())
}
