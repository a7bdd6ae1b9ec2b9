// File: crates/hurricane-examples/src/bin/pie.rs
// Summary: Builds a small landfall table in memory and renders a pie chart of states to PNG.

use anyhow::Result;
use hurricane_core::{render, ChartSpec, Column, Dataset};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dataset = Dataset::table(vec![
        Column::from_values("state", ["Florida", "Texas", "Louisiana", "Florida", "Texas", "Florida"]),
        Column::from_values("damage_usd", [1000i64, 3500, 1200, 2000, 4000, 500]),
    ])?;

    for column in dataset.columns() {
        println!("{:<12} {:?}", column.name(), column.values().iter().map(|v| v.to_string()).collect::<Vec<_>>());
    }

    let out = std::path::PathBuf::from("target/out/example_pie_chart.png");
    let spec = ChartSpec::pie("state")
        .with_title("Example: Hurricane Landfalls by State")
        .with_output(&out);
    render(&dataset, &spec)?;
    println!("Wrote {}", out.display());
    Ok(())
}
