//! # Ingest Pipeline
//!
//! Orchestrates the three-stream sanitization run: load chunks, clean
//! regions, aggregate to monthly means, merge, derive, persist.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use darpan_core::{Dataset, DatasetError, DistrictMetrics, DistrictName, StateName};

use crate::records::{
    parse_day_first, BiometricRow, DemographicRow, EnrolmentRow, MonthKey,
};

/// Youth-ratio clamp bounds. Outside this band the ratio is an artifact of
/// sparse district coverage, not demography.
const RATIO_FLOOR: f64 = 0.12;
const RATIO_CEILING: f64 = 0.98;

/// Where to read raw chunks and write the processed dataset.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Root holding the `enrolment/`, `demographic/`, `biometric/` stream
    /// directories.
    pub raw_dir: PathBuf,
    /// Output path for the processed metrics document.
    pub output: PathBuf,
}

/// What a completed run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    /// District records written.
    pub districts: usize,
    /// Distinct states covered.
    pub states: usize,
    /// Rows dropped for unusable region names or dates.
    pub dropped_rows: usize,
}

/// Errors from an ingest run.
#[derive(Debug, Error)]
pub enum EtlError {
    /// A mandatory stream had no usable rows.
    #[error("no usable {stream} rows found under {dir}")]
    EmptyStream { stream: &'static str, dir: PathBuf },

    /// A stream directory could not be scanned.
    #[error("failed to scan {dir}: {source}")]
    Scan {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A chunk could not be read or decoded.
    #[error("failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The processed dataset could not be written.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

type Region = (StateName, DistrictName);

/// Run the full pipeline.
pub fn run(config: &IngestConfig) -> Result<IngestSummary, EtlError> {
    tracing::info!(raw_dir = %config.raw_dir.display(), "starting multi-stream sanitization");
    let mut dropped = 0usize;

    let enrol_dir = config.raw_dir.join("enrolment");
    let enrol_rows = load_stream(&enrol_dir, enrolment_fields, &mut dropped)?;
    if enrol_rows.is_empty() {
        return Err(EtlError::EmptyStream {
            stream: "enrolment",
            dir: enrol_dir,
        });
    }

    let demo_dir = config.raw_dir.join("demographic");
    let demo_rows = load_stream(&demo_dir, demographic_fields, &mut dropped)?;
    if demo_rows.is_empty() {
        return Err(EtlError::EmptyStream {
            stream: "demographic",
            dir: demo_dir,
        });
    }

    // The biometric stream is absent from older export batches; it merges
    // as zeros rather than failing the run.
    let bio_rows = load_stream(&config.raw_dir.join("biometric"), biometric_fields, &mut dropped)?;
    if bio_rows.is_empty() {
        tracing::warn!("biometric stream is empty; update volumes carry demographic counts only");
    }

    let enrolment = monthly_mean(enrol_rows);
    let demographic = monthly_mean(demo_rows);
    let biometric = monthly_mean(bio_rows);

    let mut records: Vec<DistrictMetrics> = enrolment
        .into_iter()
        .map(|(region, [total, youth])| {
            let demo_vol = demographic.get(&region).map_or(0.0, |v| v[0]);
            let bio_vol = biometric.get(&region).map_or(0.0, |v| v[0]);
            let (state, district) = region;
            DistrictMetrics {
                state,
                district,
                total_enrolment: total,
                youth_count: youth,
                ratio: (youth / (total + 1.0)).clamp(RATIO_FLOOR, RATIO_CEILING),
                mobile_update_volume: demo_vol + bio_vol,
            }
        })
        .collect();
    records.sort_by(|a, b| (&a.state, &a.district).cmp(&(&b.state, &b.district)));

    let dataset = Dataset::new(records);
    dataset.save(&config.output)?;

    let summary = IngestSummary {
        districts: dataset.len(),
        states: dataset.states().len(),
        dropped_rows: dropped,
    };
    tracing::info!(
        districts = summary.districts,
        states = summary.states,
        dropped_rows = summary.dropped_rows,
        output = %config.output.display(),
        "ingest complete"
    );
    Ok(summary)
}

// -- Stream loading -----------------------------------------------------------

fn enrolment_fields(row: &EnrolmentRow) -> (&str, &str, &str, [f64; 2]) {
    (&row.date, &row.state, &row.district, [row.total(), row.youth()])
}

fn demographic_fields(row: &DemographicRow) -> (&str, &str, &str, [f64; 1]) {
    (&row.date, &row.state, &row.district, [row.demo_age_17_])
}

fn biometric_fields(row: &BiometricRow) -> (&str, &str, &str, [f64; 1]) {
    (&row.date, &row.state, &row.district, [row.bio_age_17_])
}

/// CSV chunk paths in a stream directory, sorted for deterministic runs.
/// A missing directory is an empty stream, not an error.
fn stream_files(dir: &Path) -> Result<Vec<PathBuf>, EtlError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let entries = std::fs::read_dir(dir).map_err(|source| EtlError::Scan {
        dir: dir.to_path_buf(),
        source,
    })?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    files.sort();
    Ok(files)
}

/// Load every chunk of one stream into cleaned `(region, month, values)`
/// tuples. Rows with unusable region names or dates are dropped and counted.
fn load_stream<T, const N: usize>(
    dir: &Path,
    fields: for<'a> fn(&'a T) -> (&'a str, &'a str, &'a str, [f64; N]),
    dropped: &mut usize,
) -> Result<Vec<(Region, MonthKey, [f64; N])>, EtlError>
where
    T: DeserializeOwned,
{
    let mut out = Vec::new();
    for path in stream_files(dir)? {
        let csv_err = |source| EtlError::Csv {
            path: path.clone(),
            source,
        };
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(csv_err)?;
        let headers: csv::StringRecord = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        reader.set_headers(headers);

        for row in reader.deserialize::<T>() {
            let row = row.map_err(csv_err)?;
            let (date, state, district, values) = fields(&row);
            match (clean_region(state, district), parse_day_first(date)) {
                (Some(region), Some(day)) => out.push((region, MonthKey::from(day), values)),
                _ => *dropped += 1,
            }
        }
        tracing::debug!(chunk = %path.display(), rows = out.len(), "loaded stream chunk");
    }
    Ok(out)
}

/// Canonicalize a row's region, applying the Telangana reassignment.
fn clean_region(state: &str, district: &str) -> Option<Region> {
    let district = DistrictName::new(district).ok()?;
    let state = if district.is_telangana_district() {
        StateName::canonical("TELANGANA").expect("TELANGANA is an official state")
    } else {
        StateName::canonical(state).ok()?
    };
    Some((state, district))
}

/// Sum values within each (region, month), then take the mean across the
/// months a region appears in.
fn monthly_mean<const N: usize>(
    rows: Vec<(Region, MonthKey, [f64; N])>,
) -> HashMap<Region, [f64; N]> {
    let mut per_month: HashMap<(Region, MonthKey), [f64; N]> = HashMap::new();
    for (region, month, values) in rows {
        let entry = per_month.entry((region, month)).or_insert([0.0; N]);
        for (slot, value) in entry.iter_mut().zip(values) {
            *slot += value;
        }
    }

    let mut per_region: HashMap<Region, ([f64; N], u32)> = HashMap::new();
    for ((region, _), values) in per_month {
        let entry = per_region.entry(region).or_insert(([0.0; N], 0));
        for (slot, value) in entry.0.iter_mut().zip(values) {
            *slot += value;
        }
        entry.1 += 1;
    }

    per_region
        .into_iter()
        .map(|(region, (sums, months))| {
            let mut means = [0.0; N];
            for (mean, sum) in means.iter_mut().zip(sums) {
                *mean = sum / f64::from(months);
            }
            (region, means)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_chunk(dir: &Path, name: &str, body: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(name), body).unwrap();
    }

    fn run_in(raw: &Path) -> (Result<IngestSummary, EtlError>, PathBuf) {
        let output = raw.join("processed_metrics.json");
        let config = IngestConfig {
            raw_dir: raw.to_path_buf(),
            output: output.clone(),
        };
        (run(&config), output)
    }

    #[test]
    fn pipeline_produces_monthly_means() {
        let dir = tempfile::tempdir().unwrap();
        // Two January rows (summed) and one February row (own month);
        // mean across months = (30 + 60) / 2 totals.
        write_chunk(
            &dir.path().join("enrolment"),
            "a.csv",
            "Date,State,District,age_0_5,age_5_17,age_18_greater\n\
             01-01-2024,Kerala,Ernakulam,5,5,10\n\
             15-01-2024,Kerala,Ernakulam,2,3,5\n\
             01-02-2024,Kerala,Ernakulam,10,20,30\n",
        );
        write_chunk(
            &dir.path().join("demographic"),
            "d.csv",
            "date,state,district,demo_age_17_\n\
             01-01-2024,Kerala,Ernakulam,100\n\
             01-02-2024,Kerala,Ernakulam,200\n",
        );
        write_chunk(
            &dir.path().join("biometric"),
            "b.csv",
            "date,state,district,bio_age_17_\n\
             01-01-2024,Kerala,Ernakulam,40\n\
             01-02-2024,Kerala,Ernakulam,60\n",
        );

        let (result, output) = run_in(dir.path());
        let summary = result.unwrap();
        assert_eq!(summary.districts, 1);
        assert_eq!(summary.states, 1);
        assert_eq!(summary.dropped_rows, 0);

        let dataset = Dataset::load(&output).unwrap();
        let record = dataset.district("KERALA", "ERNAKULAM").unwrap();
        assert!((record.total_enrolment - 45.0).abs() < 1e-9); // (30 + 60) / 2
        assert!((record.youth_count - 22.5).abs() < 1e-9); // (15 + 30) / 2
        assert!((record.mobile_update_volume - 200.0).abs() < 1e-9); // 150 + 50
        assert!((record.ratio - 22.5 / 46.0).abs() < 1e-9);
    }

    #[test]
    fn pipeline_folds_state_aliases_and_drops_junk() {
        let dir = tempfile::tempdir().unwrap();
        write_chunk(
            &dir.path().join("enrolment"),
            "a.csv",
            "date,state,district,age_0_5,age_5_17,age_18_greater\n\
             01-01-2024,Orissa,Cuttack,1,2,3\n\
             01-01-2024,ROW 42,Nowhere,1,2,3\n\
             bad-date,ODISHA,Cuttack,1,2,3\n",
        );
        write_chunk(
            &dir.path().join("demographic"),
            "d.csv",
            "date,state,district,demo_age_17_\n01-01-2024,Orissa,Cuttack,10\n",
        );

        let (result, output) = run_in(dir.path());
        let summary = result.unwrap();
        assert_eq!(summary.districts, 1);
        assert_eq!(summary.dropped_rows, 2);

        let dataset = Dataset::load(&output).unwrap();
        assert!(dataset.district("ODISHA", "CUTTACK").is_some());
    }

    #[test]
    fn pipeline_reassigns_telangana_districts() {
        let dir = tempfile::tempdir().unwrap();
        write_chunk(
            &dir.path().join("enrolment"),
            "a.csv",
            "date,state,district,age_0_5,age_5_17,age_18_greater\n\
             01-01-2024,Andhra Pradesh,Hyderabad,1,2,3\n\
             01-01-2024,Andhra Pradesh,Guntur,1,2,3\n",
        );
        write_chunk(
            &dir.path().join("demographic"),
            "d.csv",
            "date,state,district,demo_age_17_\n01-01-2024,Andhra Pradesh,Hyderabad,10\n",
        );

        let (result, output) = run_in(dir.path());
        result.unwrap();
        let dataset = Dataset::load(&output).unwrap();
        assert!(dataset.district("TELANGANA", "HYDERABAD").is_some());
        assert!(dataset.district("ANDHRA PRADESH", "GUNTUR").is_some());
        assert!(dataset.district("ANDHRA PRADESH", "HYDERABAD").is_none());
    }

    #[test]
    fn pipeline_clamps_ratio_band() {
        let dir = tempfile::tempdir().unwrap();
        // All-adult district: raw ratio 0 → clamped to the floor.
        write_chunk(
            &dir.path().join("enrolment"),
            "a.csv",
            "date,state,district,age_0_5,age_5_17,age_18_greater\n\
             01-01-2024,Goa,North Goa,0,0,100\n\
             01-01-2024,Goa,South Goa,100,100,0\n",
        );
        write_chunk(
            &dir.path().join("demographic"),
            "d.csv",
            "date,state,district,demo_age_17_\n01-01-2024,Goa,North Goa,10\n",
        );

        let (result, output) = run_in(dir.path());
        result.unwrap();
        let dataset = Dataset::load(&output).unwrap();
        assert_eq!(
            dataset.district("GOA", "NORTH GOA").unwrap().ratio,
            RATIO_FLOOR
        );
        // All-youth district: 200/201 → just inside the ceiling.
        let south = dataset.district("GOA", "SOUTH GOA").unwrap();
        assert!(south.ratio <= RATIO_CEILING);
    }

    #[test]
    fn missing_biometric_stream_merges_zeros() {
        let dir = tempfile::tempdir().unwrap();
        write_chunk(
            &dir.path().join("enrolment"),
            "a.csv",
            "date,state,district,age_0_5,age_5_17,age_18_greater\n\
             01-01-2024,Kerala,Kollam,10,10,10\n",
        );
        write_chunk(
            &dir.path().join("demographic"),
            "d.csv",
            "date,state,district,demo_age_17_\n01-01-2024,Kerala,Kollam,75\n",
        );

        let (result, output) = run_in(dir.path());
        result.unwrap();
        let dataset = Dataset::load(&output).unwrap();
        assert_eq!(
            dataset.district("KERALA", "KOLLAM").unwrap().mobile_update_volume,
            75.0
        );
    }

    #[test]
    fn empty_enrolment_stream_errors() {
        let dir = tempfile::tempdir().unwrap();
        write_chunk(
            &dir.path().join("demographic"),
            "d.csv",
            "date,state,district,demo_age_17_\n01-01-2024,Kerala,Kollam,75\n",
        );
        let (result, _) = run_in(dir.path());
        assert!(matches!(
            result.unwrap_err(),
            EtlError::EmptyStream { stream: "enrolment", .. }
        ));
    }

    #[test]
    fn empty_demographic_stream_errors() {
        let dir = tempfile::tempdir().unwrap();
        write_chunk(
            &dir.path().join("enrolment"),
            "a.csv",
            "date,state,district,age_0_5,age_5_17,age_18_greater\n\
             01-01-2024,Kerala,Kollam,10,10,10\n",
        );
        let (result, _) = run_in(dir.path());
        assert!(matches!(
            result.unwrap_err(),
            EtlError::EmptyStream { stream: "demographic", .. }
        ));
    }

    #[test]
    fn mixed_case_headers_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        write_chunk(
            &dir.path().join("enrolment"),
            "a.csv",
            "DATE, State ,DISTRICT,AGE_0_5,Age_5_17,age_18_greater\n\
             01-01-2024,Kerala,Kollam,1,2,3\n",
        );
        write_chunk(
            &dir.path().join("demographic"),
            "d.csv",
            "Date,STATE,District,DEMO_AGE_17_\n01-01-2024,Kerala,Kollam,9\n",
        );
        let (result, output) = run_in(dir.path());
        result.unwrap();
        let dataset = Dataset::load(&output).unwrap();
        let record = dataset.district("KERALA", "KOLLAM").unwrap();
        assert_eq!(record.total_enrolment, 6.0);
        assert_eq!(record.mobile_update_volume, 9.0);
    }

    #[test]
    fn monthly_mean_ignores_region_order() {
        let region_a = clean_region("KERALA", "KOLLAM").unwrap();
        let region_b = clean_region("KERALA", "ERNAKULAM").unwrap();
        let jan = MonthKey { year: 2024, month: 1 };
        let feb = MonthKey { year: 2024, month: 2 };
        let means = monthly_mean(vec![
            (region_b.clone(), jan, [10.0]),
            (region_a.clone(), jan, [1.0]),
            (region_a.clone(), jan, [3.0]),
            (region_a.clone(), feb, [8.0]),
        ]);
        assert_eq!(means[&region_a], [6.0]); // (4 + 8) / 2
        assert_eq!(means[&region_b], [10.0]);
    }
}
