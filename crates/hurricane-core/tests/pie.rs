// File: crates/hurricane-core/tests/pie.rs
// Purpose: Pie counting, rendering to disk and failure paths that must not write output.

use std::collections::BTreeMap;
use std::path::PathBuf;

use hurricane_core::render::wedges;
use hurricane_core::{render, ChartSpec, Column, Dataset, Derived, Error, StyleOptions, Value};

fn states() -> Dataset {
    Dataset::table(vec![
        Column::from_values("state", ["Florida", "Texas", "Louisiana", "Florida", "Texas", "Florida"]),
        Column::from_values("damage_usd", [26.5e9, 19.0e9, 125.0e9, 50.2e9, 8.1e9, 4.7e9]),
    ])
    .unwrap()
}

fn no_text() -> StyleOptions {
    let mut extra = BTreeMap::new();
    extra.insert("draw_text".to_string(), "false".to_string());
    StyleOptions { extra, ..StyleOptions::default() }
}

fn out(name: &str) -> PathBuf {
    let p = PathBuf::from("target/test_out/pie").join(name);
    std::fs::create_dir_all(p.parent().unwrap()).unwrap();
    let _ = std::fs::remove_file(&p);
    p
}

#[test]
fn fractions_follow_counts() {
    let col = Column::from_values("c", ["A", "A", "B", "C", "A"]);
    let w = wedges(&col).unwrap();
    let got: Vec<(String, usize)> = w.iter().map(|w| (w.label(), w.count)).collect();
    assert_eq!(got, vec![("A".into(), 3), ("B".into(), 1), ("C".into(), 1)]);
    assert!((w[0].fraction - 0.6).abs() < 1e-12);
    assert!((w[1].fraction - 0.2).abs() < 1e-12);
    let total: f64 = w.iter().map(|w| w.fraction).sum();
    assert!((total - 1.0).abs() < 1e-12);
    assert_eq!(w[0].percent_label(), "60.0%");
}

#[test]
fn ties_keep_first_seen_order_and_missing_is_skipped() {
    let col = Column::new(
        "c",
        vec![Value::from("z"), Value::Null, Value::from("y"), Value::Float(f64::NAN), Value::from("x")],
    );
    let labels: Vec<String> = wedges(&col).unwrap().iter().map(|w| w.label()).collect();
    assert_eq!(labels, vec!["z", "y", "x"]);
}

#[test]
fn all_missing_column_is_invalid() {
    let col = Column::new("c", vec![Value::Null, Value::Null]);
    assert!(matches!(wedges(&col), Err(Error::InvalidInput(_))));
}

#[test]
fn florida_scenario_writes_png() {
    let path = out("states.png");
    let spec = ChartSpec::pie("state").with_title("Storm landfalls by state").with_output(&path);
    let rendered = render(&states(), &spec).expect("render pie");

    match &rendered.derived {
        Derived::Pie(w) => {
            let got: Vec<(String, f64)> = w.iter().map(|w| (w.label(), w.fraction)).collect();
            assert_eq!(got[0].0, "Florida");
            assert!((got[0].1 - 0.5).abs() < 1e-12);
            assert_eq!(got[1].0, "Texas");
            assert!((got[1].1 - 1.0 / 3.0).abs() < 1e-12);
            assert_eq!(got[2].0, "Louisiana");
            assert!((got[2].1 - 1.0 / 6.0).abs() < 1e-12);
        }
        other => panic!("expected pie series, got {other:?}"),
    }
    assert_eq!(rendered.output.as_deref(), Some(path.as_path()));
    let bytes = std::fs::read(&path).expect("output exists");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn output_dimensions_follow_figure_size_and_dpi() {
    let path = out("sized.png");
    let style = StyleOptions { figure_size: Some((4.0, 3.0)), dpi: Some(50.0), ..no_text() };
    let spec = ChartSpec::pie("state").with_output(&path).with_style(style);
    let rendered = render(&states(), &spec).unwrap();
    assert_eq!((rendered.width(), rendered.height()), (200, 150));

    let img = image::open(&path).expect("decode written png").to_rgba8();
    assert_eq!(img.dimensions(), (200, 150));
}

#[test]
fn default_figure_is_ten_inches_square() {
    let spec = ChartSpec::pie("state").with_style(no_text());
    let rendered = render(&states(), &spec).unwrap();
    assert_eq!((rendered.width(), rendered.height()), (1000, 1000));
    assert!(rendered.output.is_none());
}

#[test]
fn rendering_twice_overwrites() {
    let path = out("overwrite/twice.png");
    let spec = ChartSpec::pie("state").with_output(&path).with_style(no_text());
    render(&states(), &spec).unwrap();
    render(&states(), &spec).unwrap();
    let img = image::open(&path).expect("second write is a complete png");
    assert_eq!(img.width(), 1000);

    let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[test]
fn output_path_that_is_a_directory_fails_cleanly() {
    let parent = PathBuf::from("target/test_out/pie/dir_target");
    let path = parent.join("taken.png");
    std::fs::create_dir_all(&path).unwrap();

    let spec = ChartSpec::pie("state").with_output(&path).with_style(no_text());
    match render(&states(), &spec) {
        Err(Error::Write { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected Write error, got {other:?}"),
    }
    assert!(path.is_dir(), "existing directory must be left alone");
    let leftovers: Vec<_> = std::fs::read_dir(&parent)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[test]
fn jpeg_output_by_extension() {
    let path = out("states.jpg");
    let spec = ChartSpec::pie("state").with_output(&path).with_style(no_text());
    render(&states(), &spec).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(&[0xFF, 0xD8]), "should be JPEG header");
}

#[test]
fn missing_column_writes_nothing() {
    let path = out("missing.png");
    let spec = ChartSpec::pie("county").with_output(&path);
    match render(&states(), &spec) {
        Err(Error::ColumnNotFound { column, available }) => {
            assert_eq!(column, "county");
            assert_eq!(available, vec!["state", "damage_usd"]);
        }
        other => panic!("expected ColumnNotFound, got {other:?}"),
    }
    assert!(!path.exists());
}

#[test]
fn unknown_colormap_writes_nothing() {
    let path = out("bad_cmap.png");
    let style = StyleOptions { color_map: Some("rainbow-unicorn".into()), ..StyleOptions::default() };
    let spec = ChartSpec::pie("state").with_output(&path).with_style(style);
    assert!(matches!(render(&states(), &spec), Err(Error::Render(_))));
    assert!(!path.exists());
}

#[test]
fn unsupported_image_extension_is_a_write_error() {
    let path = out("chart.bmp");
    let spec = ChartSpec::pie("state").with_output(&path);
    assert!(matches!(render(&states(), &spec), Err(Error::Write { .. })));
    assert!(!path.exists());
}

#[test]
fn bad_style_values_are_render_errors() {
    let cases = [
        StyleOptions { theme: Some("neon".into()), ..StyleOptions::default() },
        StyleOptions { figure_size: Some((0.0, 4.0)), ..StyleOptions::default() },
        StyleOptions { dpi: Some(-1.0), ..StyleOptions::default() },
        StyleOptions { alpha: Some(1.5), ..StyleOptions::default() },
    ];
    for style in cases {
        let spec = ChartSpec::pie("state").with_style(style.clone());
        assert!(matches!(render(&states(), &spec), Err(Error::Render(_))), "style {style:?} should fail");
    }
}

#[test]
fn themes_change_the_background() {
    let style = StyleOptions { theme: Some("dark".into()), figure_size: Some((2.0, 2.0)), ..no_text() };
    let spec = ChartSpec::pie("state").with_style(style);
    let rendered = render(&states(), &spec).unwrap();
    let img = image::load_from_memory(&rendered.to_png_bytes().unwrap()).unwrap().to_rgba8();
    let corner = img.get_pixel(0, 0).0;
    assert!(corner[0] < 64 && corner[1] < 64 && corner[2] < 64, "dark corner expected, got {corner:?}");
}
