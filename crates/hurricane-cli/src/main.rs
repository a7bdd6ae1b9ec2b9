// File: crates/hurricane-cli/src/main.rs
// Summary: `hurricane` binary; loads a data file and renders a pie, bar or map chart.
// Exit codes: 0 success, 1 load/render failure, 2 usage error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use log::{debug, info};

use hurricane_core::{load, render, ChartSpec, DuplicatePolicy, Layout, StyleOptions};

#[derive(Parser)]
#[command(name = "hurricane")]
#[command(about = "Load hurricane data files and render charts from them")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a chart image from a data file
    Plot(PlotArgs),

    /// Print the columns a data file loads into
    Inspect {
        /// Input data file
        #[arg(long)]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PlotType {
    Pie,
    Bar,
    Map,
}

#[derive(clap::Args)]
struct PlotArgs {
    /// Chart kind
    #[arg(long = "type", value_enum)]
    kind: PlotType,

    /// Input data file
    #[arg(long)]
    input: PathBuf,

    /// Output image (.png, .jpg or .jpeg)
    #[arg(long)]
    output: PathBuf,

    /// Chart title; defaults to "<Kind> Chart"
    #[arg(long)]
    title: Option<String>,

    /// Pie: counted column. Bar: x column. Map: color value column
    #[arg(long)]
    variable: Option<String>,

    /// Bar: y column
    #[arg(long)]
    y_variable: Option<String>,

    /// Map: longitude column
    #[arg(long)]
    lon_var: Option<String>,

    /// Map: latitude column
    #[arg(long)]
    lat_var: Option<String>,

    /// Figure size in inches, e.g. 12x7
    #[arg(long, value_parser = parse_size)]
    figure_size: Option<(f32, f32)>,

    /// Pixels per inch
    #[arg(long)]
    dpi: Option<f32>,

    /// Theme preset (classic, light, dark, solarized-dark, solarized-light)
    #[arg(long)]
    theme: Option<String>,

    /// Colormap name; append _r to reverse
    #[arg(long)]
    color_map: Option<String>,

    /// Pie: angle of the first wedge, degrees
    #[arg(long)]
    start_angle: Option<f32>,

    /// Map: marker area in points squared
    #[arg(long)]
    marker_size: Option<f32>,

    /// Map: marker opacity in [0, 1]
    #[arg(long)]
    alpha: Option<f32>,

    /// Bar: how repeated x-values are combined
    #[arg(long, default_value = "mean")]
    duplicates: DuplicatePolicy,

    /// Extra drawing option, repeatable (e.g. antialias=false)
    #[arg(long = "style", value_parser = parse_key_value)]
    style: Vec<(String, String)>,
}

fn parse_size(s: &str) -> Result<(f32, f32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f32 = w.trim().parse().map_err(|_| format!("bad width '{w}'"))?;
    let h: f32 = h.trim().parse().map_err(|_| format!("bad height '{h}'"))?;
    Ok((w, h))
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (k, v) = s.split_once('=').ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    Ok((k.trim().to_string(), v.trim().to_string()))
}

impl PlotArgs {
    /// Build the chart request, exiting with a usage error when a required column flag is absent.
    fn to_spec(&self) -> ChartSpec {
        let spec = match self.kind {
            PlotType::Pie => ChartSpec::pie(require(&self.variable, "--variable", "pie charts")),
            PlotType::Bar => ChartSpec::bar(
                require(&self.variable, "--variable", "bar charts (x-axis)"),
                require(&self.y_variable, "--y-variable", "bar charts"),
            ),
            PlotType::Map => ChartSpec::map(
                require(&self.lon_var, "--lon-var", "map plots"),
                require(&self.lat_var, "--lat-var", "map plots"),
                require(&self.variable, "--variable", "map plots (color value)"),
            ),
        };
        let style = StyleOptions {
            figure_size: self.figure_size,
            dpi: self.dpi,
            theme: self.theme.clone(),
            color_map: self.color_map.clone(),
            start_angle: self.start_angle,
            marker_size: self.marker_size,
            alpha: self.alpha,
            duplicates: self.duplicates,
            extra: self.style.iter().cloned().collect::<BTreeMap<_, _>>(),
        };
        let spec = spec.with_output(&self.output).with_style(style);
        match &self.title {
            Some(t) => spec.with_title(t),
            None => spec,
        }
    }
}

fn require(value: &Option<String>, flag: &str, what: &str) -> String {
    match value {
        Some(v) => v.clone(),
        None => Cli::command()
            .error(ErrorKind::MissingRequiredArgument, format!("{flag} is required for {what}"))
            .exit(),
    }
}

fn plot(args: &PlotArgs) -> anyhow::Result<()> {
    let spec = args.to_spec();
    info!("plotting {} chart from {}", spec.kind(), args.input.display());
    debug!("style: {:?}", spec.style());
    let dataset = load(&args.input).with_context(|| format!("loading {}", args.input.display()))?;
    render(&dataset, &spec).with_context(|| format!("rendering {} chart", spec.kind()))?;
    println!("Wrote {}", args.output.display());
    Ok(())
}

fn inspect(input: &Path) -> anyhow::Result<()> {
    let dataset = load(input).with_context(|| format!("loading {}", input.display()))?;
    match dataset.layout() {
        Layout::Table => println!("layout: table"),
        Layout::Grid { dims } => {
            let dims: Vec<String> = dims.iter().map(|d| format!("{}={}", d.name, d.len)).collect();
            println!("layout: grid ({})", dims.join(", "));
        }
    }
    println!("rows: {}", dataset.len());
    for column in dataset.columns() {
        println!("  {:<24} {}", column.name(), column.kind());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Plot(args) => plot(args),
        Commands::Inspect { input } => inspect(input),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
