// File: crates/hurricane-core/tests/loader.rs
// Purpose: Extension dispatch, type inference and error taxonomy of the file loader.

use std::path::PathBuf;

use hurricane_core::{load, ColumnKind, Error, Format, Layout, Value};
use ndarray::{array, Array1};
use ndarray_npy::{write_npy, NpzWriter};

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target/test_out/loader").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(dir: &PathBuf, file: &str, text: &str) -> PathBuf {
    let p = dir.join(file);
    std::fs::write(&p, text).unwrap();
    p
}

#[test]
fn csv_infers_column_kinds() {
    let dir = out_dir("csv_kinds");
    let p = write(
        &dir,
        "storms.csv",
        "name,year,wind,landfall\nAndrew,1992,150.5,true\nKatrina,2005,NA,true\nIrma,2017,155,false\n",
    );
    let ds = load(&p).expect("load csv");
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.column_names(), vec!["name", "year", "wind", "landfall"]);
    assert_eq!(ds.column("name").unwrap().kind(), ColumnKind::Text);
    assert_eq!(ds.column("year").unwrap().values()[0], Value::Integer(1992));
    let wind = ds.column("wind").unwrap();
    assert_eq!(wind.kind(), ColumnKind::Numeric);
    assert_eq!(wind.values()[1], Value::Null);
    assert_eq!(wind.values()[2], Value::Float(155.0));
    assert_eq!(ds.column("landfall").unwrap().values()[2], Value::Bool(false));
    assert_eq!(ds.layout(), &Layout::Table);
}

#[test]
fn tsv_and_uppercase_extension() {
    let dir = out_dir("tsv_upper");
    let tsv = write(&dir, "obs.tsv", "lat\tlon\n25.1\t-80.2\n29.9\t-90.1\n");
    let ds = load(&tsv).expect("load tsv");
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.column("lon").unwrap().values()[1], Value::Float(-90.1));

    let upper = write(&dir, "STATES.CSV", "state\nFlorida\nTexas\n");
    let ds = load(&upper).expect("load upper-case csv");
    assert_eq!(ds.column("state").unwrap().len(), 2);
}

#[test]
fn duplicate_and_blank_headers_are_renamed() {
    let dir = out_dir("headers");
    let p = write(&dir, "dup.csv", "a,a,,a\n1,2,3,4\n");
    let ds = load(&p).unwrap();
    assert_eq!(ds.column_names(), vec!["a", "a.1", "Unnamed: 2", "a.2"]);
}

#[test]
fn empty_file_gives_zero_rows() {
    let dir = out_dir("empty");
    let p = write(&dir, "empty.csv", "");
    let ds = load(&p).expect("empty csv still loads");
    assert_eq!(ds.len(), 0);
    assert!(ds.is_empty());

    let header_only = write(&dir, "header.csv", "state,damage\n");
    let ds = load(&header_only).unwrap();
    assert_eq!(ds.len(), 0);
    assert_eq!(ds.column("state").unwrap().kind(), ColumnKind::Empty);
}

#[test]
fn zero_byte_files_load_empty_for_every_format() {
    let dir = out_dir("zero_byte");
    for ext in Format::supported_extensions() {
        let p = write(&dir, &format!("empty.{ext}"), "");
        let ds = load(&p).unwrap_or_else(|e| panic!("empty .{ext} should load: {e}"));
        assert_eq!(ds.len(), 0, ".{ext}");
        assert!(ds.columns().is_empty(), ".{ext}");
        let tabular = matches!(Format::from_extension(ext), Some(Format::Csv | Format::Tsv));
        assert_eq!(matches!(ds.layout(), Layout::Table), tabular, ".{ext} layout {:?}", ds.layout());
    }
}

#[test]
fn ragged_csv_is_a_parse_error() {
    let dir = out_dir("ragged");
    let p = write(&dir, "bad.csv", "a,b\n1,2\n3\n");
    match load(&p) {
        Err(Error::Parse { format, path, .. }) => {
            assert_eq!(format, "CSV");
            assert_eq!(path, p);
        }
        other => panic!("expected Parse error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_not_found() {
    let err = load("target/test_out/loader/does_not_exist.csv").unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");
}

#[test]
fn unsupported_extensions_are_rejected() {
    let dir = out_dir("unsupported");
    for file in ["sheet.xlsx", "data.json", "noext"] {
        let p = write(&dir, file, "x");
        match load(&p) {
            Err(Error::UnsupportedFormat { extension, supported, .. }) => {
                assert!(supported.contains(&"csv"));
                if file == "noext" {
                    assert_eq!(extension, "<none>");
                } else {
                    assert!(extension.starts_with('.'));
                }
            }
            other => panic!("{file}: expected UnsupportedFormat, got {other:?}"),
        }
    }
}

#[test]
fn format_lookup_is_case_insensitive() {
    assert_eq!(Format::from_extension("NPZ"), Some(Format::Npz));
    assert_eq!(Format::from_extension("tsv"), Some(Format::Tsv));
    assert_eq!(Format::from_extension("xls"), None);
}

#[test]
fn npy_becomes_single_column_named_after_file() {
    let dir = out_dir("npy");
    let p = dir.join("wind.npy");
    write_npy(&p, &array![10.0f64, 20.0, 30.0]).unwrap();
    let ds = load(&p).expect("load npy");
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.column_names(), vec!["dim_0", "wind"]);
    assert_eq!(ds.column("wind").unwrap().values()[2], Value::Float(30.0));
    assert_eq!(ds.column("dim_0").unwrap().values()[2], Value::Integer(2));
}

#[test]
fn npz_columns_share_the_row_dimension() {
    let dir = out_dir("npz");
    let p = dir.join("track.npz");
    {
        let mut npz = NpzWriter::new(std::fs::File::create(&p).unwrap());
        npz.add_array("lat", &array![25.0f64, 26.5, 28.0]).unwrap();
        npz.add_array("lon", &array![-80.0f64, -81.5, -83.0]).unwrap();
        npz.add_array("category", &array![1i64, 3, 5]).unwrap();
        npz.finish().unwrap();
    }
    let ds = load(&p).expect("load npz");
    assert_eq!(ds.len(), 3);
    for name in ["lat", "lon", "category"] {
        assert!(ds.get(name).is_some(), "missing column {name}: {:?}", ds.column_names());
    }
    assert_eq!(ds.column("category").unwrap().values()[1], Value::Integer(3));
    match ds.layout() {
        Layout::Grid { dims } => assert_eq!(dims.len(), 1),
        other => panic!("expected grid layout, got {other:?}"),
    }
}

#[test]
fn npz_grids_broadcast_into_rows() {
    let dir = out_dir("npz_grid");
    let p = dir.join("field.npz");
    {
        let field = ndarray::Array2::from_shape_vec((2, 3), vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let row_weight: Array1<f64> = array![10.0, 20.0];
        let mut npz = NpzWriter::new(std::fs::File::create(&p).unwrap());
        npz.add_array("field", &field).unwrap();
        npz.add_array("weight", &row_weight).unwrap();
        npz.finish().unwrap();
    }
    let ds = load(&p).expect("load grid npz");
    assert_eq!(ds.len(), 6);
    let field: Vec<f64> = ds.column("field").unwrap().values().iter().filter_map(Value::as_f64).collect();
    assert_eq!(field, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let weight: Vec<f64> = ds.column("weight").unwrap().values().iter().filter_map(Value::as_f64).collect();
    assert_eq!(weight, vec![10.0, 10.0, 10.0, 20.0, 20.0, 20.0]);
    // `weight` matches only the first axis, so it becomes that axis' coordinate.
    assert_eq!(ds.column_names(), vec!["weight", "field_dim_1", "field"]);
    let dim1: Vec<f64> = ds.column("field_dim_1").unwrap().values().iter().filter_map(Value::as_f64).collect();
    assert_eq!(dim1, vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
}

#[test]
fn npz_one_dimensional_arrays_name_grid_axes() {
    let dir = out_dir("npz_coords");
    let p = dir.join("wind_field.npz");
    {
        let wind = ndarray::Array2::from_shape_vec((2, 3), vec![30.0f64, 35.0, 40.0, 45.0, 50.0, 55.0]).unwrap();
        let mut npz = NpzWriter::new(std::fs::File::create(&p).unwrap());
        npz.add_array("lat", &array![25.0f64, 26.0]).unwrap();
        npz.add_array("lon", &array![-80.0f64, -79.0, -78.0]).unwrap();
        npz.add_array("wind", &wind).unwrap();
        npz.finish().unwrap();
    }
    let ds = load(&p).expect("lat/lon/wind archive loads");
    assert_eq!(ds.len(), 6);
    assert_eq!(ds.column_names(), vec!["lat", "lon", "wind"]);
    let col = |name: &str| -> Vec<f64> { ds.column(name).unwrap().values().iter().filter_map(Value::as_f64).collect() };
    assert_eq!(col("lat"), vec![25.0, 25.0, 25.0, 26.0, 26.0, 26.0]);
    assert_eq!(col("lon"), vec![-80.0, -79.0, -78.0, -80.0, -79.0, -78.0]);
    assert_eq!(col("wind"), vec![30.0, 35.0, 40.0, 45.0, 50.0, 55.0]);
    match ds.layout() {
        Layout::Grid { dims } => {
            let dims: Vec<(&str, usize)> = dims.iter().map(|d| (d.name.as_str(), d.len)).collect();
            assert_eq!(dims, vec![("lat", 2), ("lon", 3)]);
        }
        other => panic!("expected grid layout, got {other:?}"),
    }
}

#[test]
fn npz_same_shape_grids_share_axes() {
    let dir = out_dir("npz_same_shape");
    let p = dir.join("uv.npz");
    {
        let u = ndarray::Array2::from_shape_vec((2, 2), vec![1.0f64, 2.0, 3.0, 4.0]).unwrap();
        let v = ndarray::Array2::from_shape_vec((2, 2), vec![5.0f64, 6.0, 7.0, 8.0]).unwrap();
        let mut npz = NpzWriter::new(std::fs::File::create(&p).unwrap());
        npz.add_array("u", &u).unwrap();
        npz.add_array("v", &v).unwrap();
        npz.finish().unwrap();
    }
    let ds = load(&p).unwrap();
    assert_eq!(ds.len(), 4);
    assert_eq!(ds.column_names(), vec!["u_dim_0", "u_dim_1", "u", "v"]);
    assert_eq!(ds.column("v").unwrap().values()[3], Value::Float(8.0));
}

#[test]
fn npz_with_conflicting_lengths_is_a_parse_error() {
    let dir = out_dir("npz_conflict");
    let p = dir.join("bad.npz");
    {
        let mut npz = NpzWriter::new(std::fs::File::create(&p).unwrap());
        npz.add_array("a", &array![1.0f64, 2.0]).unwrap();
        npz.add_array("b", &array![1.0f64, 2.0, 3.0]).unwrap();
        npz.finish().unwrap();
    }
    assert!(matches!(load(&p), Err(Error::Parse { .. })));
}

#[test]
fn corrupt_npz_is_a_parse_error() {
    let dir = out_dir("npz_corrupt");
    let p = write(&dir, "junk.npz", "definitely not a zip archive");
    assert!(matches!(load(&p), Err(Error::Parse { .. })));
}

#[cfg(feature = "netcdf")]
#[test]
fn netcdf_packed_values_are_decoded() {
    let dir = out_dir("netcdf");
    let p = dir.join("packed.nc");
    let _ = std::fs::remove_file(&p);
    {
        let mut file = netcdf::create(&p).unwrap();
        file.add_dimension("lat", 2).unwrap();
        file.add_dimension("lon", 2).unwrap();

        let mut lat = file.add_variable::<f64>("lat", &["lat"]).unwrap();
        lat.put_values(&[25.0f64, 26.0], ..).unwrap();
        let mut lon = file.add_variable::<f64>("lon", &["lon"]).unwrap();
        lon.put_values(&[-80.0f64, -79.0], ..).unwrap();

        let mut wind = file.add_variable::<i16>("wind", &["lat", "lon"]).unwrap();
        wind.put_attribute("_FillValue", -999i16).unwrap();
        wind.put_attribute("scale_factor", 0.5f64).unwrap();
        wind.put_attribute("add_offset", 10.0f64).unwrap();
        wind.put_values(&[100i16, -999, 40, 0], ..).unwrap();
    }

    let ds = load(&p).expect("load netCDF");
    assert_eq!(ds.len(), 4);
    assert_eq!(ds.column_names(), vec!["lat", "lon", "wind"]);
    assert_eq!(
        ds.column("wind").unwrap().values(),
        &[Value::Float(60.0), Value::Null, Value::Float(30.0), Value::Float(10.0)]
    );
    let lat: Vec<f64> = ds.column("lat").unwrap().values().iter().filter_map(Value::as_f64).collect();
    assert_eq!(lat, vec![25.0, 25.0, 26.0, 26.0]);
    let lon: Vec<f64> = ds.column("lon").unwrap().values().iter().filter_map(Value::as_f64).collect();
    assert_eq!(lon, vec![-80.0, -79.0, -80.0, -79.0]);
}
