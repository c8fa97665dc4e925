//! The `Table` trait and the general-purpose table kinds.
//!
//! A table is a [`TableModel`] plus a row source. The trait supplies the
//! render entry points for all three backends and the write-to-file
//! variants; implementors only provide model access and row
//! materialization.

use std::path::Path;

use crate::dataset::DataSet;
use crate::model::TableModel;
use crate::params::{PartialParams, TableParams};
use crate::render::{write_to_path, HtmlRenderer, LatexRenderer, Renderer, TextRenderer};
use crate::value::CellValue;
use crate::Result;

/// A renderable table: shared model plus materialized rows.
///
/// Rendering is a pure function of the current model state; calling the
/// same render method twice on an unmodified table produces identical
/// strings.
pub trait Table {
    fn model(&self) -> &TableModel;
    fn model_mut(&mut self) -> &mut TableModel;

    /// Materialize the ordered, fully formatted string rows. Each row has
    /// one cell per column, plus a leading index cell when the index is
    /// included.
    fn rows(&self) -> Vec<Vec<String>>;

    /// Render as LaTeX. Requires booktabs in the including document. With
    /// `only_tabular` the floating wrapper, caption, and label are
    /// omitted.
    fn render_latex(&self, only_tabular: bool) -> String {
        let rows = self.rows();
        tracing::debug!(backend = "latex", rows = rows.len(), "rendering table");
        LatexRenderer::new(only_tabular).render(self.model(), &rows)
    }

    /// Render as a self-contained HTML `<table>` fragment.
    fn render_html(&self) -> String {
        let rows = self.rows();
        tracing::debug!(backend = "html", rows = rows.len(), "rendering table");
        HtmlRenderer::new().render(self.model(), &rows)
    }

    /// Render as a fixed-width text block. Fails only on out-of-range
    /// padding.
    fn render_text(&self) -> Result<String> {
        let rows = self.rows();
        tracing::debug!(backend = "text", rows = rows.len(), "rendering table");
        let renderer = TextRenderer::new(self.model(), &rows)?;
        Ok(renderer.render(self.model(), &rows))
    }

    /// Render as LaTeX and write to `path`.
    fn render_latex_to(&self, path: impl AsRef<Path>, only_tabular: bool) -> Result<()>
    where
        Self: Sized,
    {
        write_to_path(path, &self.render_latex(only_tabular))
    }

    /// Render as HTML and write to `path`.
    fn render_html_to(&self, path: impl AsRef<Path>) -> Result<()>
    where
        Self: Sized,
    {
        write_to_path(path, &self.render_html())
    }

    /// Render as text and write to `path`.
    fn render_text_to(&self, path: impl AsRef<Path>) -> Result<()>
    where
        Self: Sized,
    {
        write_to_path(path, &self.render_text()?)
    }
}

/// A table over any rectangular dataset: default materializer, index on.
#[derive(Debug, Clone)]
pub struct GenericTable {
    model: TableModel,
    data: DataSet,
}

impl GenericTable {
    pub fn new(data: DataSet) -> Self {
        let mut model = TableModel::new(data.columns().to_vec());
        model.set_params(TableParams::with_type_defaults(PartialParams {
            include_index: Some(true),
            ..Default::default()
        }));
        Self { model, data }
    }

    pub fn data(&self) -> &DataSet {
        &self.data
    }
}

impl Table for GenericTable {
    fn model(&self) -> &TableModel {
        &self.model
    }

    fn model_mut(&mut self) -> &mut TableModel {
        &mut self.model
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.model.materialize(&self.data)
    }
}

/// Row labels of a summary table, in display order.
const SUMMARY_ROWS: &[&str] = &["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Descriptive statistics of selected numeric variables: one column per
/// variable, one row per statistic.
#[derive(Debug, Clone)]
pub struct SummaryTable {
    inner: GenericTable,
}

impl SummaryTable {
    pub fn new(data: &DataSet, var_list: &[&str]) -> Result<Self> {
        let mut summary = DataSet::new(var_list.iter().copied())?;
        let columns: Vec<Vec<f64>> = var_list
            .iter()
            .map(|var| {
                let mut values = data.numeric_column(var);
                values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                values
            })
            .collect();

        for stat in SUMMARY_ROWS {
            let cells: Vec<CellValue> = columns
                .iter()
                .map(|values| match *stat {
                    "count" => CellValue::Int(values.len() as i64),
                    "mean" => CellValue::Float(mean(values)),
                    "std" => CellValue::Float(sample_std(values)),
                    "min" => CellValue::Float(values.first().copied().unwrap_or(f64::NAN)),
                    "25%" => CellValue::Float(percentile(values, 0.25)),
                    "50%" => CellValue::Float(percentile(values, 0.5)),
                    "75%" => CellValue::Float(percentile(values, 0.75)),
                    _ => CellValue::Float(values.last().copied().unwrap_or(f64::NAN)),
                })
                .collect();
            summary.push_row(*stat, cells)?;
        }

        Ok(Self {
            inner: GenericTable::new(summary),
        })
    }
}

impl Table for SummaryTable {
    fn model(&self) -> &TableModel {
        self.inner.model()
    }

    fn model_mut(&mut self) -> &mut TableModel {
        self.inner.model_mut()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.inner.rows()
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
pub(crate) fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Standard error of the mean.
pub(crate) fn sem(values: &[f64]) -> f64 {
    sample_std(values) / (values.len() as f64).sqrt()
}

/// Percentile by linear interpolation between closest ranks. `sorted`
/// must be in ascending order.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = q * (n - 1) as f64;
            let low = rank.floor() as usize;
            let high = rank.ceil() as usize;
            let frac = rank - low as f64;
            sorted[low] + frac * (sorted[high] - sorted[low])
        }
    }
}
