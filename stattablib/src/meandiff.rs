//! Mean-difference comparison tables.
//!
//! Shows per-group means of selected variables, an overall mean, and one
//! difference column per group pair, with significance stars and standard
//! errors. The hypothesis test itself is not computed here: construction
//! takes a [`SignificanceTest`] implementor (a Welch-style two-sample test
//! is the expected choice) and stores only the resulting p-values.

use std::collections::BTreeMap;
use std::path::Path;

use crate::dataset::DataSet;
use crate::error::TableError;
use crate::format::{format_float, format_int, significance_legend, significance_stars};
use crate::model::{CustomLine, Location, TableModel};
use crate::params::{Alignment, PartialParams, TableParams};
use crate::render::RenderTarget;
use crate::table::{mean, sem, Table};
use crate::value::CellValue;
use crate::Result;

/// Two-sample hypothesis test supplied by the caller.
pub trait SignificanceTest {
    /// p-value for the difference in means between samples `a` and `b`.
    fn p_value(&self, a: &[f64], b: &[f64]) -> f64;
}

impl<F> SignificanceTest for F
where
    F: Fn(&[f64], &[f64]) -> f64,
{
    fn p_value(&self, a: &[f64], b: &[f64]) -> f64 {
        self(a, b)
    }
}

/// Difference in means between groups, one variable per row.
#[derive(Debug, Clone)]
pub struct MeanDifferenceTable {
    model: TableModel,
    means: DataSet,
    sems: BTreeMap<(String, String), f64>,
    p_values: BTreeMap<String, f64>,
    group_sizes: BTreeMap<String, i64>,
    show_n: bool,
    show_standard_errors: bool,
    show_stars: bool,
    p_levels: Vec<f64>,
}

impl MeanDifferenceTable {
    /// Build from raw observations: `data` holds one row per observation,
    /// `var_list` the variables to compare, `group_var` the grouping
    /// column. With exactly two groups `diff_pairs` may be omitted; with
    /// more it is required.
    pub fn new(
        data: &DataSet,
        var_list: &[&str],
        group_var: &str,
        diff_pairs: Option<&[(String, String)]>,
        test: &dyn SignificanceTest,
    ) -> Result<Self> {
        let mut groups: Vec<String> = Vec::new();
        for g in data.text_column(group_var) {
            if !groups.contains(&g) {
                groups.push(g);
            }
        }
        let ngroups = groups.len();
        if ngroups < 2 {
            return Err(TableError::GroupCount(
                "there must be at least two groups".to_string(),
            ));
        }
        if ngroups > 2 && diff_pairs.is_none() {
            return Err(TableError::GroupCount(
                "diff_pairs must be provided when there are more than two groups".to_string(),
            ));
        }

        let implicit_pair = [(groups[0].clone(), groups[1].clone())];
        let (pairs, implicit): (&[(String, String)], bool) = match diff_pairs {
            Some(pairs) => (pairs, false),
            None => (&implicit_pair, true),
        };

        let diff_columns: Vec<String> = if implicit {
            vec!["Difference".to_string()]
        } else {
            pairs.iter().map(|(a, b)| format!("{a} - {b}")).collect()
        };

        let mut columns: Vec<String> = groups.clone();
        columns.push("Overall Mean".to_string());
        columns.extend(diff_columns.iter().cloned());

        // Per-group samples, means, standard errors, and group sizes.
        let mut sems = BTreeMap::new();
        let mut group_means: BTreeMap<(String, String), f64> = BTreeMap::new();
        let mut samples: BTreeMap<(String, String), Vec<f64>> = BTreeMap::new();
        for var in var_list {
            for group in &groups {
                let values = data.numeric_column_where(var, group_var, group);
                group_means.insert((var.to_string(), group.clone()), mean(&values));
                sems.insert((var.to_string(), group.clone()), sem(&values));
                samples.insert((var.to_string(), group.clone()), values);
            }
        }

        let mut group_sizes = BTreeMap::new();
        let group_column = data.text_column(group_var);
        for group in &groups {
            let n = group_column.iter().filter(|g| *g == group).count() as i64;
            group_sizes.insert(group.clone(), n);
        }
        group_sizes.insert("Overall Mean".to_string(), data.nrows() as i64);

        // p-values keyed by "{difference column}_{variable}".
        let mut p_values = BTreeMap::new();
        for (column, (a, b)) in diff_columns.iter().zip(pairs) {
            for var in var_list {
                let sample_a = &samples[&(var.to_string(), a.clone())];
                let sample_b = &samples[&(var.to_string(), b.clone())];
                p_values.insert(format!("{column}_{var}"), test.p_value(sample_a, sample_b));
            }
        }

        // The means grid the materializer walks: one row per variable.
        let mut means = DataSet::new(columns.clone())?;
        for var in var_list {
            let mut cells: Vec<CellValue> = Vec::with_capacity(columns.len());
            for group in &groups {
                cells.push(CellValue::Float(group_means[&(var.to_string(), group.clone())]));
            }
            cells.push(CellValue::Float(mean(&data.numeric_column(var))));
            for (a, b) in pairs {
                let diff = group_means[&(var.to_string(), a.clone())]
                    - group_means[&(var.to_string(), b.clone())];
                cells.push(CellValue::Float(diff));
            }
            means.push_row(*var, cells)?;
        }

        let mut model = TableModel::new(columns);
        model.set_params(TableParams::with_type_defaults(PartialParams {
            include_index: Some(true),
            ..Default::default()
        }));
        model.add_multicolumns(
            ["Means", "", "Differences"],
            [ngroups, 1, diff_columns.len()],
        )?;
        model.add_latex_line(
            Location::AfterMulticolumns,
            format!(
                "\\cline{{2-{}}}\\cline{{{}-{}}}",
                ngroups + 1,
                ngroups + 3,
                model.ncolumns() + 1
            ),
        );

        Ok(Self {
            model,
            means,
            sems,
            p_values,
            group_sizes,
            show_n: true,
            show_standard_errors: true,
            show_stars: true,
            p_levels: vec![0.1, 0.05, 0.01],
        })
    }

    /// Show the `N=` group-size line under the column labels.
    pub fn set_show_n(&mut self, on: bool) {
        self.show_n = on;
    }

    /// Show a standard-error row under each mean row.
    pub fn set_show_standard_errors(&mut self, on: bool) {
        self.show_standard_errors = on;
    }

    /// Mark difference cells with significance stars and add the legend
    /// note.
    pub fn set_show_stars(&mut self, on: bool) {
        self.show_stars = on;
    }

    /// Star thresholds, largest first by convention.
    pub fn set_p_levels(&mut self, levels: Vec<f64>) {
        self.p_levels = levels;
    }

    /// Render as LaTeX with the group sizes and significance legend
    /// applied for the duration of the call.
    pub fn render_latex(&mut self, only_tabular: bool) -> String {
        self.render_decorated(RenderTarget::Latex, |t| Table::render_latex(t, only_tabular))
    }

    /// Render as HTML with the render-time decorations applied.
    pub fn render_html(&mut self) -> String {
        self.render_decorated(RenderTarget::Html, Table::render_html)
    }

    /// Render as plain text with the render-time decorations applied.
    pub fn render_text(&mut self) -> Result<String> {
        self.render_decorated(RenderTarget::Text, Table::render_text)
    }

    pub fn render_latex_to(&mut self, path: impl AsRef<Path>, only_tabular: bool) -> Result<()> {
        let out = self.render_latex(only_tabular);
        crate::render::write_to_path(path, &out)
    }

    pub fn render_html_to(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let out = self.render_html();
        crate::render::write_to_path(path, &out)
    }

    pub fn render_text_to(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let out = self.render_text()?;
        crate::render::write_to_path(path, &out)
    }

    /// Inject the render-time decorations, run `f`, and remove them again
    /// on every exit path, leaving the persistent configuration untouched.
    fn render_decorated<R>(&mut self, target: RenderTarget, f: impl FnOnce(&Self) -> R) -> R {
        let params = self.model.params().resolved();
        let added_line = self.show_n;
        if added_line {
            let cells: Vec<String> = self
                .model
                .columns()
                .iter()
                .map(|col| match self.group_sizes.get(col) {
                    Some(n) => format!("N={}", format_int(*n, &params.thousands_sep)),
                    None => String::new(),
                })
                .collect();
            self.model.push_line(
                Location::AfterColumns,
                CustomLine {
                    label: String::new(),
                    cells,
                },
            );
        }
        let added_note = self.show_stars;
        if added_note {
            // phrased per backend already, so it must not be re-escaped
            let legend = significance_legend(&self.p_levels, target == RenderTarget::Latex);
            self.model.add_note(legend, Alignment::Right, false);
        }

        struct Undecorate<'a> {
            table: &'a mut MeanDifferenceTable,
            line: bool,
            note: bool,
        }
        impl Drop for Undecorate<'_> {
            fn drop(&mut self) {
                if self.note {
                    self.table.model.pop_note();
                }
                if self.line {
                    self.table.model.pop_line(Location::AfterColumns);
                }
            }
        }

        let guard = Undecorate {
            table: self,
            line: added_line,
            note: added_note,
        };
        f(&*guard.table)
    }
}

impl Table for MeanDifferenceTable {
    fn model(&self) -> &TableModel {
        &self.model
    }

    fn model_mut(&mut self) -> &mut TableModel {
        &mut self.model
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let params = self.model.params().resolved();
        let include_index = params.include_index;
        let mut rows = Vec::with_capacity(self.means.nrows() * 2);

        for (var, values) in self.means.iter() {
            let mut row = Vec::new();
            let mut se_row = Vec::new();
            if include_index {
                row.push(self.model.index_label(var).to_string());
                se_row.push(String::new());
            }
            for (column, value) in self.model.columns().iter().zip(values) {
                let mut cell = self.model.format_cell(var, column, value, &params);
                if self.show_stars {
                    if let Some(p) = self.p_values.get(&format!("{column}_{var}")) {
                        cell.push_str(&significance_stars(*p, &self.p_levels));
                    }
                }
                row.push(cell);

                if self.show_standard_errors {
                    let se_cell = match self.sems.get(&(var.to_string(), column.clone())) {
                        Some(se) => format!(
                            "({})",
                            format_float(*se, params.sig_digits, &params.thousands_sep)
                        ),
                        None => String::new(),
                    };
                    se_row.push(se_cell);
                }
            }
            rows.push(row);
            if self.show_standard_errors {
                rows.push(se_row);
            }
        }
        rows
    }
}
