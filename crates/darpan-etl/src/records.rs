//! # Raw Export Records
//!
//! Typed rows for the three CSV streams. Headers in the exports vary in
//! casing and padding; the reader lowercases and trims them before
//! deserialization, so field names here are the lowercase forms.
//!
//! Numeric columns are parsed leniently: missing, empty, or garbage
//! values count as zero, matching how the exports mix blank cells and
//! stray text into count columns.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Deserialize a numeric column, treating anything unparseable as zero.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(0.0))
}

/// One row of an enrolment chunk.
#[derive(Debug, Deserialize)]
pub struct EnrolmentRow {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub district: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub age_0_5: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub age_5_17: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub age_18_greater: f64,
}

impl EnrolmentRow {
    /// Total enrollment across all age bands.
    pub fn total(&self) -> f64 {
        self.age_0_5 + self.age_5_17 + self.age_18_greater
    }

    /// Enrollment in the 0–17 bands.
    pub fn youth(&self) -> f64 {
        self.age_0_5 + self.age_5_17
    }
}

/// One row of a demographic-update chunk.
#[derive(Debug, Deserialize)]
pub struct DemographicRow {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub district: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub demo_age_17_: f64,
}

/// One row of a biometric-update chunk.
#[derive(Debug, Deserialize)]
pub struct BiometricRow {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub district: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub bio_age_17_: f64,
}

/// Calendar month a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

/// Day-first date formats seen across export generations.
const DATE_FORMATS: [&str; 5] = ["%d-%m-%Y", "%d/%m/%Y", "%d-%m-%y", "%d/%m/%y", "%Y-%m-%d"];

/// Parse an export date, day-first. Returns `None` for unparseable values.
pub fn parse_day_first(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_day_first_accepts_dashed_and_slashed() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_day_first("15-03-2024"), Some(expected));
        assert_eq!(parse_day_first("15/03/2024"), Some(expected));
        assert_eq!(parse_day_first("2024-03-15"), Some(expected));
    }

    #[test]
    fn parse_day_first_is_day_first() {
        // 04-03 is March 4th, not April 3rd.
        let d = parse_day_first("04-03-2024").unwrap();
        use chrono::Datelike;
        assert_eq!((d.month(), d.day()), (3, 4));
    }

    #[test]
    fn parse_day_first_rejects_garbage() {
        assert_eq!(parse_day_first(""), None);
        assert_eq!(parse_day_first("not a date"), None);
        assert_eq!(parse_day_first("32-01-2024"), None);
    }

    #[test]
    fn month_key_from_date() {
        let d = NaiveDate::from_ymd_opt(2023, 11, 30).unwrap();
        assert_eq!(MonthKey::from(d), MonthKey { year: 2023, month: 11 });
    }

    #[test]
    fn lenient_numeric_parse_in_csv_rows() {
        let data = "date,state,district,age_0_5,age_5_17,age_18_greater\n\
                    01-01-2024,KERALA,ERNAKULAM,10,20,70\n\
                    02-01-2024,KERALA,ERNAKULAM,,n/a,5\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<EnrolmentRow> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows[0].total(), 100.0);
        assert_eq!(rows[0].youth(), 30.0);
        assert_eq!(rows[1].total(), 5.0);
        assert_eq!(rows[1].youth(), 0.0);
    }

    #[test]
    fn missing_columns_default_to_zero() {
        let data = "date,state,district\n01-01-2024,GOA,NORTH GOA\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<DemographicRow> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows[0].demo_age_17_, 0.0);
    }
}
