// File: crates/hurricane-core/src/loader/delimited.rs
// Summary: Header-row delimited text parser with per-column type inference.

use std::collections::HashSet;
use std::path::Path;

use crate::dataset::{Column, Dataset, Value};
use crate::error::BoxError;

/// Cells read as null regardless of column type.
const NULL_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

pub(super) fn read(path: &Path, delimiter: u8) -> Result<Dataset, BoxError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(false)
        .from_path(path)?;

    let headers = unique_headers(rdr.headers()?.iter());
    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

    for rec in rdr.records() {
        let rec = rec?;
        for (col, field) in cells.iter_mut().zip(rec.iter()) {
            col.push(field.to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| Column::new(name, infer_column(&raw)))
        .collect();
    Ok(Dataset::table(columns)?)
}

/// Blank names become `Unnamed: <i>`; repeats get `.1`, `.2`, ... suffixes.
fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for (i, h) in raw.enumerate() {
        let base = if h.trim().is_empty() { format!("Unnamed: {i}") } else { h.to_string() };
        let mut name = base.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        seen.insert(name.clone());
        out.push(name);
    }
    out
}

fn is_null(s: &str) -> bool {
    NULL_MARKERS.contains(&s.trim())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Pick the narrowest type that fits every non-null cell: integer, float, bool, then text.
fn infer_column(raw: &[String]) -> Vec<Value> {
    let mut present = raw.iter().map(String::as_str).filter(|s| !is_null(s));

    if present.clone().all(|s| s.trim().parse::<i64>().is_ok()) {
        convert(raw, |s| s.trim().parse::<i64>().map(Value::Integer).ok())
    } else if present.clone().all(|s| s.trim().parse::<f64>().is_ok()) {
        convert(raw, |s| s.trim().parse::<f64>().map(Value::Float).ok())
    } else if present.all(|s| parse_bool(s).is_some()) {
        convert(raw, |s| parse_bool(s).map(Value::Bool))
    } else {
        convert(raw, |s| Some(Value::Text(s.to_string())))
    }
}

fn convert(raw: &[String], f: impl Fn(&str) -> Option<Value>) -> Vec<Value> {
    raw.iter()
        .map(|s| if is_null(s) { Value::Null } else { f(s).unwrap_or(Value::Null) })
        .collect()
}
