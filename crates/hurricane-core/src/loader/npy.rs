// File: crates/hurricane-core/src/loader/npy.rs
// Summary: NumPy `.npy` / `.npz` readers feeding the grid flattener.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use ndarray::{ArrayD, IxDyn, OwnedRepr};
use ndarray_npy::{NpzReader, ReadNpyExt, ReadableElement};

use super::grid::{into_dataset, GridVariable};
use crate::dataset::{Dataset, Dimension, Value};
use crate::error::BoxError;

pub(super) fn read_npy(path: &Path) -> Result<Dataset, BoxError> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("values")
        .to_string();
    let array = read_typed(name, |elem| {
        let file = File::open(path)?;
        Ok(elem.read(file)?)
    })?;
    Ok(into_dataset(name_axes(vec![array]))?)
}

pub(super) fn read_npz(path: &Path) -> Result<Dataset, BoxError> {
    let mut npz = NpzReader::new(File::open(path)?)?;
    let mut arrays = Vec::new();
    for entry in npz.names()? {
        let name = entry.strip_suffix(".npy").unwrap_or(&entry).to_string();
        arrays.push(read_typed(name, |elem| elem.read_entry(&mut npz, &entry))?);
    }
    Ok(into_dataset(name_axes(arrays))?)
}

/// Element types tried in order until one matches the array's descriptor.
#[derive(Clone, Copy, Debug)]
enum Elem {
    F64,
    F32,
    I64,
    I32,
    U8,
    Bool,
}

const ELEMS: [Elem; 6] = [Elem::F64, Elem::F32, Elem::I64, Elem::I32, Elem::U8, Elem::Bool];

/// Shape plus flattened cells of one array.
type Cells = (Vec<usize>, Vec<Value>);

impl Elem {
    fn read(self, reader: impl Read) -> Result<Cells, BoxError> {
        match self {
            Elem::F64 => cells(ArrayD::<f64>::read_npy(reader)?, Value::Float),
            Elem::F32 => cells(ArrayD::<f32>::read_npy(reader)?, |v| Value::Float(v as f64)),
            Elem::I64 => cells(ArrayD::<i64>::read_npy(reader)?, Value::Integer),
            Elem::I32 => cells(ArrayD::<i32>::read_npy(reader)?, |v| Value::Integer(v as i64)),
            Elem::U8 => cells(ArrayD::<u8>::read_npy(reader)?, |v| Value::Integer(v as i64)),
            Elem::Bool => cells(ArrayD::<bool>::read_npy(reader)?, Value::Bool),
        }
    }

    fn read_entry<R: Read + Seek>(self, npz: &mut NpzReader<R>, entry: &str) -> Result<Cells, BoxError> {
        match self {
            Elem::F64 => cells(by_name::<f64, R>(npz, entry)?, Value::Float),
            Elem::F32 => cells(by_name::<f32, R>(npz, entry)?, |v| Value::Float(v as f64)),
            Elem::I64 => cells(by_name::<i64, R>(npz, entry)?, Value::Integer),
            Elem::I32 => cells(by_name::<i32, R>(npz, entry)?, |v| Value::Integer(v as i64)),
            Elem::U8 => cells(by_name::<u8, R>(npz, entry)?, |v| Value::Integer(v as i64)),
            Elem::Bool => cells(by_name::<bool, R>(npz, entry)?, Value::Bool),
        }
    }
}

fn by_name<T, R>(npz: &mut NpzReader<R>, entry: &str) -> Result<ArrayD<T>, BoxError>
where
    T: ReadableElement,
    R: Read + Seek,
{
    Ok(npz.by_name::<OwnedRepr<T>, IxDyn>(entry)?)
}

fn cells<T: Clone>(arr: ArrayD<T>, to_value: impl Fn(T) -> Value) -> Result<Cells, BoxError> {
    let shape = arr.shape().to_vec();
    // `iter` walks in logical (row-major) order whatever the memory layout.
    let values = arr.iter().cloned().map(to_value).collect();
    Ok((shape, values))
}

/// One array as read, before its axes are named.
#[derive(Debug)]
struct RawArray {
    name: String,
    shape: Vec<usize>,
    values: Vec<Value>,
}

fn read_typed(
    name: String,
    mut read: impl FnMut(Elem) -> Result<Cells, BoxError>,
) -> Result<RawArray, BoxError> {
    let mut last_err: Option<BoxError> = None;
    for elem in ELEMS {
        match read(elem) {
            Ok((shape, values)) => return Ok(RawArray { name, shape, values }),
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err.unwrap_or_else(|| format!("array '{name}' has no readable element type").into()))
}

/// NumPy stores no dimension names, so they are derived from shapes.
///
/// - Only scalars and 1-D arrays: all share one row dimension `dim_0`.
/// - A 1-D array whose length matches exactly one axis of a higher-rank
///   array names that axis and becomes its coordinate.
/// - Other axes are named `<array>_dim_<axis>`; arrays of identical shape
///   share the names given to the first of them.
/// - Remaining 1-D arrays join the single named axis of their length, or get
///   their own `<array>_dim_0` when none or several match.
fn name_axes(arrays: Vec<RawArray>) -> Vec<GridVariable> {
    if arrays.iter().all(|a| a.shape.len() <= 1) {
        return arrays
            .into_iter()
            .map(|a| {
                let dims = a.shape.iter().map(|&len| Dimension { name: "dim_0".to_string(), len }).collect();
                GridVariable { name: a.name, dims, values: a.values }
            })
            .collect();
    }

    let vectors: Vec<(&str, usize)> = arrays
        .iter()
        .filter(|a| a.shape.len() == 1)
        .map(|a| (a.name.as_str(), a.shape[0]))
        .collect();

    let mut shapes: Vec<(Vec<usize>, Vec<String>)> = Vec::new();
    for a in arrays.iter().filter(|a| a.shape.len() >= 2) {
        if shapes.iter().any(|(shape, _)| *shape == a.shape) {
            continue;
        }
        let names = a
            .shape
            .iter()
            .enumerate()
            .map(|(axis, &len)| {
                let unique = a.shape.iter().filter(|&&l| l == len).count() == 1;
                vectors
                    .iter()
                    .find(|(_, l)| unique && *l == len)
                    .map(|(n, _)| n.to_string())
                    .unwrap_or_else(|| format!("{}_dim_{axis}", a.name))
            })
            .collect();
        shapes.push((a.shape.clone(), names));
    }

    let mut axes: Vec<Dimension> = Vec::new();
    for (shape, names) in &shapes {
        for (name, &len) in names.iter().zip(shape) {
            if !axes.iter().any(|d| d.name == *name) {
                axes.push(Dimension { name: name.clone(), len });
            }
        }
    }

    arrays
        .into_iter()
        .map(|a| {
            let dims = match a.shape.len() {
                0 => Vec::new(),
                1 => {
                    let len = a.shape[0];
                    let mut matching = axes.iter().filter(|d| d.len == len);
                    match (axes.iter().find(|d| d.name == a.name), matching.next(), matching.next()) {
                        (Some(own), _, _) => vec![own.clone()],
                        (None, Some(only), None) => vec![only.clone()],
                        _ => vec![Dimension { name: format!("{}_dim_0", a.name), len }],
                    }
                }
                _ => shapes
                    .iter()
                    .find(|(shape, _)| *shape == a.shape)
                    .map(|(shape, names)| {
                        names.iter().zip(shape).map(|(name, &len)| Dimension { name: name.clone(), len }).collect::<Vec<_>>()
                    })
                    .unwrap_or_default(),
            };
            GridVariable { name: a.name, dims, values: a.values }
        })
        .collect()
}
