//! # stattab
//!
//! A CLI for rendering tabular data as publication-quality tables.
//!
//! ## Overview
//!
//! stattab is built on top of stattablib and turns a CSV or JSON file
//! into a LaTeX, HTML, or plain-text table. It covers the common cases
//! (captions, labels, index columns, summary statistics) and leaves the
//! full configuration surface (custom formatters, multicolumn headers,
//! injected lines) to the library.
//!
//! ## Usage
//!
//! ```bash
//! # Render a CSV as plain text
//! stattab data.csv
//!
//! # LaTeX with a caption, written to a file
//! stattab data.csv --format latex --caption "Results" --output results.tex
//!
//! # Only the tabular block, for \input{} into a larger document
//! stattab data.csv --format latex --only-tabular
//!
//! # Summary statistics of selected numeric columns
//! stattab data.csv --summary --vars price,quantity
//!
//! # First CSV column as row labels
//! stattab data.csv --index --index-name Country
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use stattablib::{CellValue, DataSet, GenericTable, SummaryTable, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Latex,
    Html,
}

#[derive(Debug, Parser)]
#[command(name = "stattab", version, about = "Render CSV/JSON data as LaTeX, HTML, or text tables")]
struct Cli {
    /// Input file (.csv, or .json with an array of objects)
    input: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Render summary statistics instead of the raw data
    #[arg(long)]
    summary: bool,

    /// Columns to summarize (defaults to every column)
    #[arg(long, value_delimiter = ',')]
    vars: Vec<String>,

    /// Table caption (LaTeX only)
    #[arg(long)]
    caption: Option<String>,

    /// Cross-reference label (LaTeX only)
    #[arg(long)]
    label: Option<String>,

    /// Emit only the tabular block, without the floating wrapper
    #[arg(long)]
    only_tabular: bool,

    /// Decimal places for numeric values
    #[arg(long)]
    sig_digits: Option<usize>,

    /// Cell padding for text output
    #[arg(long)]
    padding: Option<usize>,

    /// Thousands separator for numeric values
    #[arg(long)]
    thousands_sep: Option<String>,

    /// Treat the first CSV column as row labels
    #[arg(long)]
    index: bool,

    /// Hide the row label column
    #[arg(long, conflicts_with = "index")]
    no_index: bool,

    /// Header over the row label column
    #[arg(long)]
    index_name: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let data = load_input(&cli.input, cli.index)
        .with_context(|| format!("failed to load '{}'", cli.input.display()))?;

    let rendered = if cli.summary {
        let vars: Vec<String> = if cli.vars.is_empty() {
            data.columns().to_vec()
        } else {
            cli.vars.clone()
        };
        let var_refs: Vec<&str> = vars.iter().map(String::as_str).collect();
        let mut table = SummaryTable::new(&data, &var_refs)?;
        configure(&mut table, &cli)?;
        render(&table, &cli)?
    } else {
        let mut table = GenericTable::new(data);
        configure(&mut table, &cli)?;
        render(&table, &cli)?
    };

    match &cli.output {
        Some(path) => std::fs::write(path, &rendered)
            .with_context(|| format!("failed to write '{}'", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}

fn configure(table: &mut impl Table, cli: &Cli) -> Result<()> {
    let model = table.model_mut();
    if let Some(caption) = &cli.caption {
        model.set_caption(caption.clone());
    }
    if let Some(label) = &cli.label {
        model.set_label(label.clone());
    }
    if let Some(digits) = cli.sig_digits {
        model.params_mut().set_sig_digits(digits);
    }
    if let Some(sep) = &cli.thousands_sep {
        model.params_mut().set_thousands_sep(sep.clone());
    }
    if let Some(padding) = cli.padding {
        model.params_mut().set_padding(padding)?;
    }
    if cli.no_index {
        model.params_mut().set_include_index(false);
    }
    if let Some(name) = &cli.index_name {
        model.set_index_name(name.clone());
    }
    Ok(())
}

fn render(table: &impl Table, cli: &Cli) -> Result<String> {
    let out = match cli.format {
        Format::Latex => table.render_latex(cli.only_tabular),
        Format::Html => table.render_html(),
        Format::Text => table.render_text()?,
    };
    Ok(out)
}

fn load_input(path: &Path, index: bool) -> Result<DataSet> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => load_csv(path, index),
        Some("json") => load_json(path),
        other => bail!(
            "unsupported input extension {:?} (expected .csv or .json)",
            other.unwrap_or("")
        ),
    }
}

/// Read a CSV with a header row. With `index`, the first column holds the
/// row keys; otherwise rows are keyed by position.
fn load_csv(path: &Path, index: bool) -> Result<DataSet> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        bail!("CSV has no header row");
    }

    let columns: Vec<String> = if index {
        headers[1..].to_vec()
    } else {
        headers.clone()
    };
    let mut data = DataSet::new(columns)?;

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let fields: Vec<&str> = record.iter().collect();
        let (key, cells) = if index {
            match fields.split_first() {
                Some((key, rest)) => (key.to_string(), rest.to_vec()),
                None => continue,
            }
        } else {
            (i.to_string(), fields)
        };
        data.push_row(key, cells.iter().map(|raw| CellValue::parse(raw)))?;
    }
    Ok(data)
}

/// Read a JSON array of objects: one object per row, keyed by position.
/// Columns come from the first object, in sorted key order.
fn load_json(path: &Path) -> Result<DataSet> {
    let raw = std::fs::read_to_string(path)?;
    let parsed: serde_json::Value = serde_json::from_str(&raw)?;
    let serde_json::Value::Array(objects) = parsed else {
        bail!("JSON input must be an array of objects");
    };

    let Some(serde_json::Value::Object(first)) = objects.first() else {
        bail!("JSON input must be a non-empty array of objects");
    };
    let columns: Vec<String> = first.keys().cloned().collect();
    let mut data = DataSet::new(columns.clone())?;

    for (i, object) in objects.iter().enumerate() {
        let serde_json::Value::Object(map) = object else {
            bail!("JSON row {i} is not an object");
        };
        let cells: Vec<CellValue> = columns
            .iter()
            .map(|col| match map.get(col) {
                Some(serde_json::Value::Number(n)) => match n.as_i64() {
                    Some(v) => CellValue::Int(v),
                    None => CellValue::Float(n.as_f64().unwrap_or(f64::NAN)),
                },
                Some(serde_json::Value::String(s)) => CellValue::Text(s.clone()),
                Some(serde_json::Value::Bool(b)) => CellValue::Text(b.to_string()),
                Some(serde_json::Value::Null) | None => CellValue::Text(String::new()),
                Some(other) => CellValue::Text(other.to_string()),
            })
            .collect();
        data.push_row(i.to_string(), cells)?;
    }
    Ok(data)
}
