// Station data domain models
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Average reading of one station over the selected period.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationAverage {
    pub equipment_id: String,
    #[serde(default)]
    pub average: Option<f64>,
}

impl StationAverage {
    #[cfg(test)]
    pub fn new(equipment_id: impl Into<String>, average: Option<f64>) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            average,
        }
    }

    /// Two decimals, or "N/A" when the station reported nothing in the period
    pub fn display_average(&self) -> String {
        match self.average {
            Some(value) => format!("{:.2}", value),
            None => "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sample {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl Sample {
    #[cfg(test)]
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }

    pub fn time_of_day_label(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string()
    }
}

/// RFC 3339, or a naive ISO-8601 datetime which the backend writes in UTC
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => Ok(timestamp.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc()),
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationSeries {
    pub equipment_id: String,
    pub values: Vec<Sample>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub title: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// Keeps the API's sample order; the chart does not re-sort.
    pub fn from_series(series: &StationSeries) -> Self {
        let points = series
            .values
            .iter()
            .map(|sample| ChartPoint {
                label: sample.time_of_day_label(),
                value: sample.value,
            })
            .collect();

        Self {
            title: format!("Station data ({})", series.equipment_id),
            points,
        }
    }
}
