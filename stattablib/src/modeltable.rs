//! Model coefficient tables and the adapter surface that feeds them.
//!
//! Anything that fits models supplies a [`ModelSummary`] per model: a map
//! from statistic name to either a scalar or a per-coefficient map.
//! Coefficient estimates (`params`) are required; everything else is
//! optional and simply drops out of the rendered output when absent.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::TableError;
use crate::format::{format_float, format_int, significance_legend, significance_stars};
use crate::model::{CustomLine, Location, TableModel};
use crate::params::{Alignment, PackageParams, PartialParams, TableParams};
use crate::render::RenderTarget;
use crate::table::Table;
use crate::value::CellValue;
use crate::Result;

/// Names of the statistics the table knows how to display.
pub mod stat {
    pub const PARAMS: &str = "params";
    pub const STANDARD_ERRORS: &str = "standard_errors";
    pub const P_VALUES: &str = "p_values";
    pub const CONF_INT_LOW: &str = "conf_int_low";
    pub const CONF_INT_HIGH: &str = "conf_int_high";
    pub const OBSERVATIONS: &str = "observations";
    pub const NGROUPS: &str = "ngroups";
    pub const R_SQUARED: &str = "r_squared";
    pub const ADJUSTED_R_SQUARED: &str = "adjusted_r_squared";
    pub const PSEUDO_R_SQUARED: &str = "pseudo_r_squared";
    pub const F_STATISTIC: &str = "f_statistic";
    pub const DOF_MODEL: &str = "dof_model";
    pub const DOF_RESID: &str = "dof_resid";
    pub const DEPENDENT_VARIABLE: &str = "dependent_variable_name";
    pub const MODEL_TYPE: &str = "model_type";
}

/// One named statistic: a scalar, or a value per coefficient.
///
/// Keyed statistics preserve insertion order, which doubles as the
/// default coefficient display order.
#[derive(Debug, Clone, PartialEq)]
pub enum Statistic {
    Scalar(CellValue),
    Keyed(Vec<(String, f64)>),
}

/// Extracted statistics for one fitted model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    stats: BTreeMap<String, Statistic>,
}

impl ModelSummary {
    /// Summary with the required coefficient estimates.
    pub fn new<I, S>(params: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut stats = BTreeMap::new();
        stats.insert(
            stat::PARAMS.to_string(),
            Statistic::Keyed(params.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        );
        Self { stats }
    }

    /// Build from a raw name -> statistic map, the shape model adapters
    /// produce. Fails unless coefficient estimates are present.
    pub fn from_stats<I, S>(stats: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Statistic)>,
        S: Into<String>,
    {
        let stats: BTreeMap<String, Statistic> =
            stats.into_iter().map(|(k, v)| (k.into(), v)).collect();
        if !matches!(stats.get(stat::PARAMS), Some(Statistic::Keyed(_))) {
            return Err(TableError::MissingStatistic(stat::PARAMS.to_string()));
        }
        Ok(Self { stats })
    }

    /// Attach a scalar statistic.
    pub fn with_scalar(mut self, name: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.stats
            .insert(name.into(), Statistic::Scalar(value.into()));
        self
    }

    /// Attach a per-coefficient statistic.
    pub fn with_keyed<I, S>(mut self, name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.stats.insert(
            name.into(),
            Statistic::Keyed(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        );
        self
    }

    /// Look a statistic up by name.
    pub fn get(&self, name: &str) -> Result<&Statistic> {
        self.stats
            .get(name)
            .ok_or_else(|| TableError::MissingStatistic(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.stats.contains_key(name)
    }

    fn keyed(&self, name: &str) -> Option<&[(String, f64)]> {
        match self.stats.get(name) {
            Some(Statistic::Keyed(entries)) => Some(entries),
            _ => None,
        }
    }

    fn keyed_value(&self, name: &str, key: &str) -> Option<f64> {
        self.keyed(name)?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    fn scalar(&self, name: &str) -> Option<&CellValue> {
        match self.stats.get(name) {
            Some(Statistic::Scalar(value)) => Some(value),
            _ => None,
        }
    }

    fn scalar_f64(&self, name: &str) -> Option<f64> {
        self.scalar(name)?.as_f64()
    }

    fn scalar_text(&self, name: &str) -> Option<&str> {
        match self.scalar(name)? {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coefficient estimates, in the adapter's order.
    pub fn params(&self) -> &[(String, f64)] {
        // present by construction
        self.keyed(stat::PARAMS).unwrap_or(&[])
    }

    pub fn estimate(&self, coefficient: &str) -> Option<f64> {
        self.keyed_value(stat::PARAMS, coefficient)
    }

    pub fn standard_error(&self, coefficient: &str) -> Option<f64> {
        self.keyed_value(stat::STANDARD_ERRORS, coefficient)
    }

    pub fn p_value(&self, coefficient: &str) -> Option<f64> {
        self.keyed_value(stat::P_VALUES, coefficient)
    }

    pub fn conf_int(&self, coefficient: &str) -> Option<(f64, f64)> {
        let low = self.keyed_value(stat::CONF_INT_LOW, coefficient)?;
        let high = self.keyed_value(stat::CONF_INT_HIGH, coefficient)?;
        Some((low, high))
    }

    pub fn observations(&self) -> Option<i64> {
        self.scalar_f64(stat::OBSERVATIONS).map(|v| v as i64)
    }

    pub fn ngroups(&self) -> Option<i64> {
        self.scalar_f64(stat::NGROUPS).map(|v| v as i64)
    }

    pub fn r_squared(&self) -> Option<f64> {
        self.scalar_f64(stat::R_SQUARED)
    }

    pub fn adjusted_r_squared(&self) -> Option<f64> {
        self.scalar_f64(stat::ADJUSTED_R_SQUARED)
    }

    pub fn pseudo_r_squared(&self) -> Option<f64> {
        self.scalar_f64(stat::PSEUDO_R_SQUARED)
    }

    pub fn f_statistic(&self) -> Option<f64> {
        self.scalar_f64(stat::F_STATISTIC)
    }

    pub fn dof_model(&self) -> Option<f64> {
        self.scalar_f64(stat::DOF_MODEL)
    }

    pub fn dof_resid(&self) -> Option<f64> {
        self.scalar_f64(stat::DOF_RESID)
    }

    pub fn dependent_variable_name(&self) -> Option<&str> {
        self.scalar_text(stat::DEPENDENT_VARIABLE)
    }

    pub fn model_type(&self) -> Option<&str> {
        self.scalar_text(stat::MODEL_TYPE)
    }
}

/// Side-by-side coefficient comparison of fitted models.
#[derive(Debug, Clone)]
pub struct ModelTable {
    model: TableModel,
    summaries: Vec<ModelSummary>,
    coef_order: Vec<String>,
    dependent_variable: Option<String>,
    show_r2: bool,
    show_adjusted_r2: bool,
    show_pseudo_r2: bool,
    show_fstat: bool,
    show_dof: bool,
    show_observations: bool,
    show_ngroups: bool,
    show_model_type: bool,
    show_ses: bool,
    show_cis: bool,
    show_stars: bool,
    p_levels: Vec<f64>,
}

impl ModelTable {
    /// Build from one summary per model. Columns are numbered `(1)` to
    /// `(n)`; coefficients appear in discovery order across models until
    /// [`parameter_order`](Self::parameter_order) overrides it.
    pub fn new(summaries: Vec<ModelSummary>) -> Result<Self> {
        if summaries.is_empty() {
            return Err(TableError::GroupCount(
                "at least one model summary is required".to_string(),
            ));
        }

        let columns: Vec<String> = (1..=summaries.len()).map(|i| format!("({i})")).collect();
        let mut coef_order: Vec<String> = Vec::new();
        for summary in &summaries {
            for (name, _) in summary.params() {
                if !coef_order.contains(name) {
                    coef_order.push(name.clone());
                }
            }
        }

        let mut model = TableModel::new(columns);
        model.set_params(TableParams::with_type_defaults(PartialParams {
            include_index: Some(true),
            ..Default::default()
        }));

        Ok(Self {
            model,
            summaries,
            coef_order,
            dependent_variable: None,
            show_r2: true,
            show_adjusted_r2: false,
            show_pseudo_r2: true,
            show_fstat: true,
            show_dof: false,
            show_observations: true,
            show_ngroups: true,
            show_model_type: true,
            show_ses: true,
            show_cis: false,
            show_stars: true,
            p_levels: vec![0.1, 0.05, 0.01],
        })
    }

    /// Put the listed coefficients first, in the given order; everything
    /// else keeps its discovery order after them.
    pub fn parameter_order(&mut self, order: &[&str]) {
        let mut reordered: Vec<String> = order
            .iter()
            .filter(|name| self.coef_order.iter().any(|c| c == **name))
            .map(|name| name.to_string())
            .collect();
        for name in &self.coef_order {
            if !reordered.contains(name) {
                reordered.push(name.clone());
            }
        }
        self.coef_order = reordered;
    }

    /// Display labels for coefficients.
    pub fn covariate_labels<I, K, V>(&mut self, labels: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.model.rename_index(labels);
    }

    /// Header shown above the model columns. Defaults to the dependent
    /// variable name when every model that reports one agrees.
    pub fn set_dependent_variable(&mut self, name: impl Into<String>) {
        self.dependent_variable = Some(name.into());
    }

    pub fn set_show_r2(&mut self, on: bool) {
        self.show_r2 = on;
    }

    pub fn set_show_adjusted_r2(&mut self, on: bool) {
        self.show_adjusted_r2 = on;
    }

    pub fn set_show_pseudo_r2(&mut self, on: bool) {
        self.show_pseudo_r2 = on;
    }

    pub fn set_show_fstat(&mut self, on: bool) {
        self.show_fstat = on;
    }

    pub fn set_show_dof(&mut self, on: bool) {
        self.show_dof = on;
    }

    pub fn set_show_observations(&mut self, on: bool) {
        self.show_observations = on;
    }

    pub fn set_show_ngroups(&mut self, on: bool) {
        self.show_ngroups = on;
    }

    pub fn set_show_model_type(&mut self, on: bool) {
        self.show_model_type = on;
    }

    pub fn set_show_ses(&mut self, on: bool) {
        self.show_ses = on;
    }

    pub fn set_show_cis(&mut self, on: bool) {
        self.show_cis = on;
    }

    pub fn set_show_stars(&mut self, on: bool) {
        self.show_stars = on;
    }

    pub fn set_p_levels(&mut self, levels: Vec<f64>) {
        self.p_levels = levels;
    }

    /// Hide or show the `(1)..(n)` model number labels.
    pub fn set_show_model_numbers(&mut self, on: bool) {
        self.model.params_mut().set_show_columns(on);
    }

    pub fn render_latex(&mut self, only_tabular: bool) -> String {
        self.render_decorated(RenderTarget::Latex, |t| Table::render_latex(t, only_tabular))
    }

    pub fn render_html(&mut self) -> String {
        self.render_decorated(RenderTarget::Html, Table::render_html)
    }

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

    fn dependent_variable_header(&self) -> Option<String> {
        if let Some(name) = &self.dependent_variable {
            return Some(name.clone());
        }
        let mut names = self
            .summaries
            .iter()
            .filter_map(|s| s.dependent_variable_name());
        let first = names.next()?;
        if names.all(|n| n == first) {
            Some(first.to_string())
        } else {
            None
        }
    }

    /// Summary statistic lines, in display order, phrased for `target`.
    fn stat_lines(&self, target: RenderTarget, params: &PackageParams) -> Vec<CustomLine> {
        let r2_label = |prefix: &str| match target {
            RenderTarget::Latex => format!("{prefix}$R^2$"),
            RenderTarget::Html => format!("{prefix}R<sup>2</sup>"),
            RenderTarget::Text => format!("{prefix}R2"),
        };
        let float = |v: f64| format_float(v, params.sig_digits, &params.thousands_sep);
        let int = |v: i64| format_int(v, &params.thousands_sep);

        let mut lines: Vec<(bool, String, Vec<Option<String>>)> = Vec::new();
        lines.push((
            self.show_observations,
            "Observations".to_string(),
            self.summaries
                .iter()
                .map(|s| s.observations().map(int))
                .collect(),
        ));
        lines.push((
            self.show_r2,
            r2_label(""),
            self.summaries
                .iter()
                .map(|s| s.r_squared().map(float))
                .collect(),
        ));
        lines.push((
            self.show_adjusted_r2,
            r2_label("Adjusted "),
            self.summaries
                .iter()
                .map(|s| s.adjusted_r_squared().map(float))
                .collect(),
        ));
        lines.push((
            self.show_pseudo_r2,
            r2_label("Pseudo "),
            self.summaries
                .iter()
                .map(|s| s.pseudo_r_squared().map(float))
                .collect(),
        ));
        lines.push((
            self.show_fstat,
            "F Statistic".to_string(),
            self.summaries
                .iter()
                .map(|s| s.f_statistic().map(float))
                .collect(),
        ));
        lines.push((
            self.show_dof,
            "DoF Model".to_string(),
            self.summaries
                .iter()
                .map(|s| s.dof_model().map(float))
                .collect(),
        ));
        lines.push((
            self.show_dof,
            "DoF Residual".to_string(),
            self.summaries
                .iter()
                .map(|s| s.dof_resid().map(float))
                .collect(),
        ));
        lines.push((
            self.show_ngroups,
            "N. Groups".to_string(),
            self.summaries
                .iter()
                .map(|s| s.ngroups().map(int))
                .collect(),
        ));
        lines.push((
            self.show_model_type,
            "Model Type".to_string(),
            self.summaries
                .iter()
                .map(|s| s.model_type().map(str::to_string))
                .collect(),
        ));

        lines
            .into_iter()
            .filter(|(enabled, _, cells)| *enabled && cells.iter().any(Option::is_some))
            .map(|(_, label, cells)| CustomLine {
                label,
                cells: cells.into_iter().map(Option::unwrap_or_default).collect(),
            })
            .collect()
    }

    fn render_decorated<R>(&mut self, target: RenderTarget, f: impl FnOnce(&Self) -> R) -> R {
        let params = self.model.params().resolved();

        let added_multicolumn = match self.dependent_variable_header() {
            Some(name) => {
                let span = self.model.ncolumns();
                self.model.add_multicolumns([name], [span]).is_ok()
            }
            None => false,
        };

        let stat_lines = self.stat_lines(target, &params);
        let added_lines = stat_lines.len();
        for line in stat_lines {
            self.model.push_line(Location::AfterBody, line);
        }

        let added_note = self.show_stars;
        if added_note {
            // phrased per backend already, so it must not be re-escaped
            let legend = significance_legend(&self.p_levels, target == RenderTarget::Latex);
            self.model.add_note(legend, Alignment::Right, false);
        }

        struct Undecorate<'a> {
            table: &'a mut ModelTable,
            multicolumn: bool,
            lines: usize,
            note: bool,
        }
        impl Drop for Undecorate<'_> {
            fn drop(&mut self) {
                if self.note {
                    self.table.model.pop_note();
                }
                for _ in 0..self.lines {
                    self.table.model.pop_line(Location::AfterBody);
                }
                if self.multicolumn {
                    self.table.model.pop_multicolumn();
                }
            }
        }

        let guard = Undecorate {
            table: self,
            multicolumn: added_multicolumn,
            lines: added_lines,
            note: added_note,
        };
        f(&*guard.table)
    }
}

impl Table for ModelTable {
    fn model(&self) -> &TableModel {
        &self.model
    }

    fn model_mut(&mut self) -> &mut TableModel {
        &mut self.model
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let params = self.model.params().resolved();
        let include_index = params.include_index;
        let mut rows = Vec::new();

        for coef in &self.coef_order {
            let mut est_row = Vec::new();
            let mut under_row = Vec::new();
            if include_index {
                est_row.push(self.model.index_label(coef).to_string());
                under_row.push(String::new());
            }

            for (column, summary) in self.model.columns().iter().zip(&self.summaries) {
                let est_cell = match summary.estimate(coef) {
                    Some(est) => {
                        let mut cell = self.model.format_cell(
                            coef,
                            column,
                            &CellValue::Float(est),
                            &params,
                        );
                        if self.show_stars {
                            if let Some(p) = summary.p_value(coef) {
                                cell.push_str(&significance_stars(p, &self.p_levels));
                            }
                        }
                        cell
                    }
                    None => String::new(),
                };
                est_row.push(est_cell);

                let under_cell = if self.show_ses {
                    summary
                        .standard_error(coef)
                        .map(|se| {
                            format!(
                                "({})",
                                format_float(se, params.sig_digits, &params.thousands_sep)
                            )
                        })
                        .unwrap_or_default()
                } else if self.show_cis {
                    summary
                        .conf_int(coef)
                        .map(|(low, high)| {
                            format!(
                                "[{}, {}]",
                                format_float(low, params.sig_digits, &params.thousands_sep),
                                format_float(high, params.sig_digits, &params.thousands_sep)
                            )
                        })
                        .unwrap_or_default()
                } else {
                    String::new()
                };
                under_row.push(under_cell);
            }

            rows.push(est_row);
            if self.show_ses || self.show_cis {
                rows.push(under_row);
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ols_summary() -> ModelSummary {
        ModelSummary::new([("Intercept", 1.5), ("x", 0.25)])
            .with_keyed(stat::STANDARD_ERRORS, [("Intercept", 0.5), ("x", 0.01)])
            .with_keyed(stat::P_VALUES, [("Intercept", 0.2), ("x", 0.001)])
            .with_scalar(stat::OBSERVATIONS, 1000.0)
            .with_scalar(stat::R_SQUARED, 0.42)
            .with_scalar(stat::F_STATISTIC, 12.5)
            .with_scalar(stat::DEPENDENT_VARIABLE, "y")
            .with_scalar(stat::MODEL_TYPE, "OLS")
    }

    fn probit_summary() -> ModelSummary {
        ModelSummary::new([("Intercept", -0.5), ("z", 2.0)])
            .with_keyed(stat::P_VALUES, [("Intercept", 0.5), ("z", 0.04)])
            .with_scalar(stat::OBSERVATIONS, 500.0)
            .with_scalar(stat::PSEUDO_R_SQUARED, 0.18)
            .with_scalar(stat::DEPENDENT_VARIABLE, "y")
            .with_scalar(stat::MODEL_TYPE, "Probit")
    }

    #[test]
    fn test_from_stats_requires_params() {
        let err = ModelSummary::from_stats([(
            stat::R_SQUARED,
            Statistic::Scalar(CellValue::Float(0.5)),
        )]);
        assert!(matches!(err, Err(TableError::MissingStatistic(name)) if name == "params"));

        let ok = ModelSummary::from_stats([(
            stat::PARAMS,
            Statistic::Keyed(vec![("x".to_string(), 1.0)]),
        )]);
        assert!(ok.is_ok());
    }

    #[test]
    fn test_get_unknown_statistic() {
        let summary = ols_summary();
        assert!(summary.get(stat::PARAMS).is_ok());
        assert!(matches!(
            summary.get("bananas"),
            Err(TableError::MissingStatistic(_))
        ));
    }

    #[test]
    fn test_optional_getters_are_none_safe() {
        let summary = ModelSummary::new([("x", 1.0)]);
        assert!(summary.observations().is_none());
        assert!(summary.r_squared().is_none());
        assert!(summary.dependent_variable_name().is_none());
        assert!(summary.standard_error("x").is_none());
        assert!(summary.conf_int("x").is_none());
    }

    #[test]
    fn test_coefficient_discovery_order() {
        let table = ModelTable::new(vec![ols_summary(), probit_summary()]).unwrap();
        assert_eq!(table.coef_order, vec!["Intercept", "x", "z"]);
        assert_eq!(table.model().columns(), &["(1)", "(2)"]);
    }

    #[test]
    fn test_parameter_order_override() {
        let mut table = ModelTable::new(vec![ols_summary(), probit_summary()]).unwrap();
        table.parameter_order(&["z", "Intercept"]);
        assert_eq!(table.coef_order, vec!["z", "Intercept", "x"]);
    }

    #[test]
    fn test_rows_with_stars_and_ses() {
        let table = ModelTable::new(vec![ols_summary()]).unwrap();
        let rows = table.rows();
        // estimate + s.e. row per coefficient
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][0], "Intercept");
        assert_eq!(rows[0][1], "1.500");
        assert_eq!(rows[1][1], "(0.500)");
        assert_eq!(rows[2][1], "0.250***");
        assert_eq!(rows[3][1], "(0.010)");
    }

    #[test]
    fn test_missing_coefficient_renders_empty() {
        let table = ModelTable::new(vec![ols_summary(), probit_summary()]).unwrap();
        let rows = table.rows();
        // "x" exists only in model 1, "z" only in model 2
        let x_row = rows.iter().find(|r| r[0] == "x").unwrap();
        assert!(!x_row[1].is_empty());
        assert!(x_row[2].is_empty());
        let z_row = rows.iter().find(|r| r[0] == "z").unwrap();
        assert!(z_row[1].is_empty());
        assert!(!z_row[2].is_empty());
    }

    #[test]
    fn test_confidence_intervals_instead_of_ses() {
        let summary = ModelSummary::new([("x", 1.0)])
            .with_keyed(stat::CONF_INT_LOW, [("x", 0.5)])
            .with_keyed(stat::CONF_INT_HIGH, [("x", 1.5)]);
        let mut table = ModelTable::new(vec![summary]).unwrap();
        table.set_show_ses(false);
        table.set_show_cis(true);
        let rows = table.rows();
        assert_eq!(rows[1][1], "[0.500, 1.500]");
    }

    #[test]
    fn test_stat_lines_per_backend() {
        let mut table = ModelTable::new(vec![probit_summary()]).unwrap();

        let latex = table.render_latex(true);
        assert!(latex.contains("Pseudo $R^2$"));

        let html = table.render_html();
        assert!(html.contains("Pseudo R<sup>2</sup>"));

        let text = table.render_text().unwrap();
        assert!(text.contains("Pseudo R2"));
        assert!(text.contains("Observations"));
        assert!(text.contains("500"));
    }

    #[test]
    fn test_absent_stats_omitted() {
        let mut table = ModelTable::new(vec![ols_summary()]).unwrap();
        let text = table.render_text().unwrap();
        // OLS summary carries neither ngroups nor a pseudo R2
        assert!(!text.contains("N. Groups"));
        assert!(!text.contains("Pseudo R2"));
        assert!(text.contains("Model Type"));
        assert!(text.contains("OLS"));
    }

    #[test]
    fn test_flag_disables_line() {
        let mut table = ModelTable::new(vec![probit_summary()]).unwrap();
        table.set_show_pseudo_r2(false);
        let html = table.render_html();
        assert!(!html.contains("Pseudo R<sup>2</sup>"));
    }

    #[test]
    fn test_dependent_variable_header() {
        let mut table = ModelTable::new(vec![ols_summary(), probit_summary()]).unwrap();
        let latex = table.render_latex(true);
        assert!(latex.contains("\\multicolumn{2}{c}{y}"));

        table.set_dependent_variable("Wages");
        let latex = table.render_latex(true);
        assert!(latex.contains("\\multicolumn{2}{c}{Wages}"));
    }

    #[test]
    fn test_decorations_rolled_back() {
        let mut table = ModelTable::new(vec![ols_summary()]).unwrap();
        table.render_latex(false);
        table.render_html();
        table.render_text().unwrap();
        assert!(table.model().notes().is_empty());
        assert!(table.model().lines(Location::AfterBody).is_empty());
        assert!(table.model().multicolumns().is_empty());
    }

    #[test]
    fn test_observations_formatted_as_integer() {
        let mut table = ModelTable::new(vec![ols_summary()]).unwrap();
        let text = table.render_text().unwrap();
        assert!(text.contains("1,000"));
        assert!(!text.contains("1,000.000"));
    }

    #[test]
    fn test_significance_legend_note_present() {
        let mut table = ModelTable::new(vec![ols_summary()]).unwrap();
        let html = table.render_html();
        assert!(html.contains("Significance levels:"));
        table.set_show_stars(false);
        let html = table.render_html();
        assert!(!html.contains("Significance levels:"));
    }
}
