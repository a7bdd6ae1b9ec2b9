// File: crates/hurricane-core/src/loader/netcdf_io.rs
// Summary: netCDF / HDF5 reader with CF decoding (scale_factor, add_offset, _FillValue).

use std::path::Path;

use log::debug;
use netcdf::AttributeValue;

use super::grid::{into_dataset, GridVariable};
use crate::dataset::{Dataset, Dimension, Value};
use crate::error::BoxError;

pub(super) fn read(path: &Path) -> Result<Dataset, BoxError> {
    let file = netcdf::open(path)?;
    let mut vars = Vec::new();

    for var in file.variables() {
        let name = var.name();
        let dims: Vec<Dimension> = var
            .dimensions()
            .iter()
            .map(|d| Dimension { name: d.name(), len: d.len() })
            .collect();

        // Character and string variables are not plottable; skip rather than fail.
        let raw: Vec<f64> = match var.get_values::<f64, _>(..) {
            Ok(v) => v,
            Err(e) => {
                debug!("skipping netCDF variable '{name}': {e}");
                continue;
            }
        };

        let scale = numeric_attr(&var, "scale_factor").unwrap_or(1.0);
        let offset = numeric_attr(&var, "add_offset").unwrap_or(0.0);
        let fill = numeric_attr(&var, "_FillValue");

        let values = raw
            .into_iter()
            .map(|v| match fill {
                Some(f) if v == f => Value::Null,
                _ if v.is_nan() => Value::Null,
                _ => Value::Float(v * scale + offset),
            })
            .collect();
        vars.push(GridVariable { name, dims, values });
    }

    Ok(into_dataset(vars)?)
}

fn numeric_attr(var: &netcdf::Variable<'_>, name: &str) -> Option<f64> {
    let value = var.attribute(name)?.value().ok()?;
    match value {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(v as f64),
        AttributeValue::Int(v) => Some(v as f64),
        AttributeValue::Short(v) => Some(v as f64),
        AttributeValue::Schar(v) => Some(v as f64),
        AttributeValue::Uchar(v) => Some(v as f64),
        AttributeValue::Ushort(v) => Some(v as f64),
        AttributeValue::Uint(v) => Some(v as f64),
        AttributeValue::Longlong(v) => Some(v as f64),
        AttributeValue::Ulonglong(v) => Some(v as f64),
        _ => None,
    }
}
