// File: crates/hurricane-core/src/loader/grid.rs
// Summary: Flattens named-dimension array variables into a row-aligned table.
// Notes:
// - Rows enumerate the union of all dimensions in row-major order (first dimension slowest).
// - Each dimension contributes one index column: the same-named 1-D coordinate variable when
//   present, else the integer position along that dimension.
// - Every other variable is broadcast over the dimensions it does not span.

use thiserror::Error;

use crate::dataset::{Column, Dataset, DatasetError, Dimension, Layout, Value};

/// One array read from a container, flattened row-major over `dims`.
#[derive(Clone, Debug)]
pub(super) struct GridVariable {
    pub name: String,
    pub dims: Vec<Dimension>,
    pub values: Vec<Value>,
}

#[derive(Error, Debug)]
pub(super) enum GridError {
    #[error("dimension '{dim}' has length {len} in '{variable}' but {expected} elsewhere")]
    DimensionMismatch { dim: String, variable: String, len: usize, expected: usize },

    #[error("variable '{variable}' holds {got} values but its shape needs {want}")]
    ShapeMismatch { variable: String, got: usize, want: usize },

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

pub(super) fn into_dataset(vars: Vec<GridVariable>) -> Result<Dataset, GridError> {
    let dims = union_dims(&vars)?;
    for v in &vars {
        let want: usize = v.dims.iter().map(|d| d.len).product();
        if want != v.values.len() {
            return Err(GridError::ShapeMismatch { variable: v.name.clone(), got: v.values.len(), want });
        }
    }
    let rows: usize = if dims.is_empty() {
        usize::from(!vars.is_empty())
    } else {
        dims.iter().map(|d| d.len).product()
    };

    // Coordinate variables are consumed as index columns.
    let is_coord = |v: &GridVariable| v.dims.len() == 1 && v.dims[0].name == v.name;

    let mut columns = Vec::with_capacity(dims.len() + vars.len());
    for (axis, dim) in dims.iter().enumerate() {
        let stride: usize = dims[axis + 1..].iter().map(|d| d.len).product();
        let coord = vars.iter().find(|v| is_coord(v) && v.name == dim.name);
        let values = (0..rows)
            .map(|row| {
                let pos = (row / stride) % dim.len;
                match coord {
                    Some(c) => c.values[pos].clone(),
                    None => Value::Integer(pos as i64),
                }
            })
            .collect();
        columns.push(Column::new(dim.name.clone(), values));
    }

    for v in vars.iter().filter(|v| !is_coord(v)) {
        columns.push(Column::new(v.name.clone(), broadcast(v, &dims, rows)));
    }

    Ok(Dataset::from_columns(Layout::Grid { dims }, columns)?)
}

fn union_dims(vars: &[GridVariable]) -> Result<Vec<Dimension>, GridError> {
    let mut dims: Vec<Dimension> = Vec::new();
    for v in vars {
        for d in &v.dims {
            match dims.iter().find(|known| known.name == d.name) {
                Some(known) if known.len != d.len => {
                    return Err(GridError::DimensionMismatch {
                        dim: d.name.clone(),
                        variable: v.name.clone(),
                        len: d.len,
                        expected: known.len,
                    });
                }
                Some(_) => {}
                None => dims.push(d.clone()),
            }
        }
    }
    Ok(dims)
}

/// Map each table row back to the variable's own flat index.
fn broadcast(var: &GridVariable, dims: &[Dimension], rows: usize) -> Vec<Value> {
    // For each of the variable's axes: (stride in the full grid, stride in the variable, length).
    let axes: Vec<(usize, usize, usize)> = var
        .dims
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let full_axis = dims.iter().position(|g| g.name == d.name).unwrap_or(0);
            let grid_stride: usize = dims[full_axis + 1..].iter().map(|g| g.len).product();
            let var_stride: usize = var.dims[i + 1..].iter().map(|g| g.len).product();
            (grid_stride, var_stride, d.len)
        })
        .collect();

    (0..rows)
        .map(|row| {
            let idx: usize = axes
                .iter()
                .map(|&(grid_stride, var_stride, len)| ((row / grid_stride) % len) * var_stride)
                .sum();
            var.values.get(idx).cloned().unwrap_or(Value::Null)
        })
        .collect()
}
