use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;

use super::model::{RawRow, SalaryDataset};

/// Typed loader failures; callers receive them wrapped in `anyhow::Error`.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("expected a top-level JSON array of records")]
    NotAnArray,
    #[error("record {0} is not a JSON object")]
    RowNotObject(usize),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a compensation dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the `ds_salaries` column names
/// * `.json` – `[{ "work_year": 2023, "job_title": "...", ... }, ...]`
pub fn load_file(path: &Path) -> Result<SalaryDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_csv(file)?
        }
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            parse_json(&text)?
        }
        other => return Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    };

    let invalid = dataset.invalid_salary_count();
    if invalid > 0 {
        log::warn!("{invalid} record(s) have a non-numeric salary_in_usd and are left out of salary aggregates");
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read CSV with a header row. Columns are matched by name, so order does not
/// matter and extra columns are ignored. A missing required column fails the
/// whole load.
pub fn read_csv<R: Read>(input: R) -> Result<SalaryDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(row);
    }

    Ok(SalaryDataset::from_raw_rows(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`). Cells may be
/// strings or numbers; both are kept as text and normalized like CSV cells.
pub fn parse_json(text: &str) -> Result<SalaryDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().ok_or(LoadError::NotAnArray)?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or(LoadError::RowNotObject(i))?;
        let text_obj: serde_json::Map<String, JsonValue> = obj
            .iter()
            .map(|(k, v)| (k.clone(), JsonValue::String(json_cell_to_text(v))))
            .collect();
        let row: RawRow = serde_json::from_value(JsonValue::Object(text_obj))
            .with_context(|| format!("JSON record {i}"))?;
        rows.push(row);
    }

    Ok(SalaryDataset::from_raw_rows(rows))
}

fn json_cell_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RemoteStatus;

    const CSV: &str = "\
work_year,experience_level,employment_type,job_title,salary,salary_currency,salary_in_usd,employee_residence,remote_ratio,company_location,company_size
2023,SE,FT,Principal Data Scientist,80000,EUR,85847,ES,100,ES,L
2023,MI,CT,ML Engineer,30000,USD,30000,US,100,US,S
2023,EN,FT,Data Analyst,abc,USD,not-a-number,US,0,US,M
";

    #[test]
    fn reads_csv_rows() {
        let ds = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[0].job_title, "Principal Data Scientist");
        assert_eq!(ds.records[0].salary_in_usd, 85847.0);
        assert_eq!(ds.records[0].company_size, "L");
        assert_eq!(ds.records[2].remote_status, RemoteStatus::InPerson);
        assert!(ds.records[2].salary_in_usd.is_nan());
    }

    #[test]
    fn csv_missing_required_column_fails() {
        let csv = "work_year,job_title\n2023,Data Scientist\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"));
    }

    #[test]
    fn csv_without_descriptive_columns_loads() {
        let csv = "work_year,experience_level,job_title,salary,salary_in_usd,remote_ratio\n\
                   2022,EX,Head of Data,200000,200000,50\n";
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.records[0].remote_status, RemoteStatus::Hybrid);
        assert_eq!(ds.records[0].employment_type, "");
    }

    #[test]
    fn parses_json_with_numeric_cells() {
        let json = r#"[
            {"work_year": 2023, "experience_level": "SE", "job_title": "Data Engineer",
             "salary": 120000, "salary_in_usd": 120000, "remote_ratio": 0},
            {"work_year": 2022, "experience_level": "XX", "job_title": "Data Engineer",
             "salary": "90000", "salary_in_usd": null, "remote_ratio": 100}
        ]"#;
        let ds = parse_json(json).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].salary_in_usd, 120000.0);
        assert_eq!(ds.records[1].experience.label(), "XX");
        assert!(ds.records[1].salary_in_usd.is_nan());
    }

    #[test]
    fn json_must_be_array_of_objects() {
        let err = parse_json(r#"{"a": 1}"#).unwrap_err();
        assert!(matches!(err.downcast_ref::<LoadError>(), Some(LoadError::NotAnArray)));

        let err = parse_json("[1]").unwrap_err();
        assert!(matches!(err.downcast_ref::<LoadError>(), Some(LoadError::RowNotObject(0))));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("salaries.parquet")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::UnsupportedExtension(ext)) if ext == "parquet"
        ));
    }
}
