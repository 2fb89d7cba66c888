use crate::fetch::outcome::FetchOutcome;
use crate::record::WeatherRecord;
use polars::prelude::*;

/// Column names of the compiled snapshot, in output order. The set is
/// identical on every run, including the forecast-day columns when every
/// value in them is null, so the downstream sink always sees the same shape.
pub const DATASET_COLUMNS: [&str; 20] = [
    "city",
    "country",
    "timezone",
    "localtime",
    "last_updated",
    "temp_c",
    "condition",
    "condition_icon",
    "wind_kph",
    "wind_dir",
    "cloud",
    "humidity",
    "pressure_mb",
    "day_1_temp",
    "day_1_condition",
    "day_2_temp",
    "day_2_condition",
    "day_3_temp",
    "day_3_condition",
    "retrieved_at",
];

/// Compiles the successful outcomes of a run into one rectangular
/// `DataFrame` with the fixed [`DATASET_COLUMNS`] schema.
///
/// Zero successes is a valid terminal state and yields an empty frame with
/// the full typed schema, not an error.
pub fn compile_dataset(outcomes: &[FetchOutcome]) -> PolarsResult<DataFrame> {
    let records: Vec<&WeatherRecord> = outcomes.iter().filter_map(FetchOutcome::record).collect();

    let day_temp = |slot: usize| -> Vec<Option<f64>> {
        records.iter().map(|r| r.day_temps[slot]).collect()
    };
    let day_condition = |slot: usize| -> Vec<Option<String>> {
        records.iter().map(|r| r.day_conditions[slot].clone()).collect()
    };

    df!(
        "city" => records.iter().map(|r| r.city.clone()).collect::<Vec<String>>(),
        "country" => records.iter().map(|r| r.country.clone()).collect::<Vec<String>>(),
        "timezone" => records.iter().map(|r| r.timezone.clone()).collect::<Vec<String>>(),
        "localtime" => records.iter().map(|r| r.localtime.clone()).collect::<Vec<String>>(),
        "last_updated" => records.iter().map(|r| r.last_updated.clone()).collect::<Vec<String>>(),
        "temp_c" => records.iter().map(|r| r.temp_c).collect::<Vec<f64>>(),
        "condition" => records.iter().map(|r| r.condition.clone()).collect::<Vec<String>>(),
        "condition_icon" => records.iter().map(|r| r.condition_icon.clone()).collect::<Vec<String>>(),
        "wind_kph" => records.iter().map(|r| r.wind_kph).collect::<Vec<f64>>(),
        "wind_dir" => records.iter().map(|r| r.wind_dir.clone()).collect::<Vec<String>>(),
        "cloud" => records.iter().map(|r| r.cloud).collect::<Vec<i64>>(),
        "humidity" => records.iter().map(|r| r.humidity).collect::<Vec<i64>>(),
        "pressure_mb" => records.iter().map(|r| r.pressure_mb).collect::<Vec<f64>>(),
        "day_1_temp" => day_temp(0),
        "day_1_condition" => day_condition(0),
        "day_2_temp" => day_temp(1),
        "day_2_condition" => day_condition(1),
        "day_3_temp" => day_temp(2),
        "day_3_condition" => day_condition(2),
        "retrieved_at" => records.iter().map(|r| r.retrieved_at.to_rfc3339()).collect::<Vec<String>>(),
    )
}
