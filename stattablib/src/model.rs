//! The abstract table model shared by every backend.
//!
//! `TableModel` holds everything a renderer needs except the source data:
//! column order and labels, multicolumn group headers, notes, custom lines
//! at named insertion points, verbatim per-backend injections, formatter
//! sets, and the parameter tiers. It contains no rendering logic.
//!
//! Every structural rule is enforced here, at mutation time: multicolumn
//! spans must sum to the column count, custom lines must have exactly one
//! cell per column, and removal selectors must match something. A model
//! that was configured without errors always renders.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::dataset::DataSet;
use crate::error::TableError;
use crate::format::{default_format, FormatterAxis, FormatterSet};
use crate::params::{Alignment, PackageParams, TableParams};
use crate::value::CellValue;
use crate::Result;

/// Named insertion points for custom content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Location {
    /// Directly under the multicolumn group header lines
    AfterMulticolumns,
    /// Directly under the column label line
    AfterColumns,
    /// After the last data row
    AfterBody,
    /// After the footer rule, before the notes
    AfterFooter,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::AfterMulticolumns => "after-multicolumns",
            Location::AfterColumns => "after-columns",
            Location::AfterBody => "after-body",
            Location::AfterFooter => "after-footer",
        }
    }
}

impl FromStr for Location {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "after-multicolumns" => Ok(Location::AfterMulticolumns),
            "after-columns" => Ok(Location::AfterColumns),
            "after-body" => Ok(Location::AfterBody),
            "after-footer" => Ok(Location::AfterFooter),
            other => Err(TableError::InvalidLocation(other.to_string())),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One header row of group labels spanning multiple columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiColumn {
    pub labels: Vec<String>,
    pub spans: Vec<usize>,
}

/// A single-line note under the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub text: String,
    pub alignment: Alignment,
    pub escape: bool,
}

/// A row-shaped custom line: an index label plus one cell per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomLine {
    pub label: String,
    pub cells: Vec<String>,
}

/// Shared table description: columns, decorations, formatting rules, and
/// parameters. Data stays outside; the materializer takes it per call.
#[derive(Debug, Clone)]
pub struct TableModel {
    columns: Vec<String>,
    index_name: String,
    column_labels: BTreeMap<String, String>,
    index_labels: BTreeMap<String, String>,
    multicolumns: Vec<MultiColumn>,
    notes: Vec<Note>,
    custom_lines: BTreeMap<Location, Vec<CustomLine>>,
    latex_lines: BTreeMap<Location, Vec<String>>,
    html_lines: BTreeMap<Location, Vec<String>>,
    formatters: Option<FormatterSet>,
    caption: Option<String>,
    label: Option<String>,
    params: TableParams,
}

impl TableModel {
    /// Model over the given display columns. The column count is fixed
    /// for the model's lifetime.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            index_name: String::new(),
            column_labels: BTreeMap::new(),
            index_labels: BTreeMap::new(),
            multicolumns: Vec::new(),
            notes: Vec::new(),
            custom_lines: BTreeMap::new(),
            latex_lines: BTreeMap::new(),
            html_lines: BTreeMap::new(),
            formatters: None,
            caption: None,
            label: None,
            params: TableParams::new(),
        }
    }

    pub fn ncolumns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn params(&self) -> &TableParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut TableParams {
        &mut self.params
    }

    pub(crate) fn set_params(&mut self, params: TableParams) {
        self.params = params;
    }

    /// Label shown over the index column.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn set_index_name(&mut self, name: impl Into<String>) {
        self.index_name = name.into();
    }

    /// Map raw column keys to display labels. Keys that are not columns
    /// are kept but never consulted.
    pub fn rename_columns<I, K, V>(&mut self, labels: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in labels {
            self.column_labels.insert(k.into(), v.into());
        }
    }

    /// Map raw row keys to display labels.
    pub fn rename_index<I, K, V>(&mut self, labels: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in labels {
            self.index_labels.insert(k.into(), v.into());
        }
    }

    /// Display label for a column key (the key itself when not renamed).
    pub fn column_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.column_labels.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Display label for a row key (the key itself when not renamed).
    pub fn index_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.index_labels.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Register a header row of group labels. Spans must sum to the
    /// column count; an empty span list makes a single label span the
    /// whole table.
    pub fn add_multicolumns<I, S>(
        &mut self,
        labels: I,
        spans: impl IntoIterator<Item = usize>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let mut spans: Vec<usize> = spans.into_iter().collect();
        if spans.is_empty() {
            spans = vec![self.ncolumns()];
        }
        if labels.len() != spans.len() {
            return Err(TableError::LengthMismatch {
                expected: spans.len(),
                actual: labels.len(),
            });
        }
        let total: usize = spans.iter().sum();
        if total != self.ncolumns() {
            return Err(TableError::SpanMismatch {
                expected: self.ncolumns(),
                actual: total,
            });
        }
        self.multicolumns.push(MultiColumn { labels, spans });
        Ok(())
    }

    pub fn multicolumns(&self) -> &[MultiColumn] {
        &self.multicolumns
    }

    /// Add a note under the table footer.
    pub fn add_note(&mut self, text: impl Into<String>, alignment: Alignment, escape: bool) {
        self.notes.push(Note {
            text: text.into(),
            alignment,
            escape,
        });
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Remove a note by text or by position. At least one selector is
    /// required; a selector that matches nothing is an error.
    pub fn remove_note(&mut self, text: Option<&str>, index: Option<usize>) -> Result<()> {
        match (text, index) {
            (Some(text), _) => {
                let pos = self
                    .notes
                    .iter()
                    .position(|n| n.text == text)
                    .ok_or_else(|| TableError::NoteNotFound(text.to_string()))?;
                self.notes.remove(pos);
                Ok(())
            }
            (None, Some(index)) => {
                if index >= self.notes.len() {
                    return Err(TableError::NoteNotFound(format!("index {index}")));
                }
                self.notes.remove(index);
                Ok(())
            }
            (None, None) => Err(TableError::MissingSelector),
        }
    }

    /// Add a row-shaped line at an insertion point. The cell count must
    /// equal the column count; the label fills the index cell.
    pub fn add_line<I, S>(
        &mut self,
        location: Location,
        cells: I,
        label: impl Into<String>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        if cells.len() != self.ncolumns() {
            return Err(TableError::LengthMismatch {
                expected: self.ncolumns(),
                actual: cells.len(),
            });
        }
        self.custom_lines.entry(location).or_default().push(CustomLine {
            label: label.into(),
            cells,
        });
        Ok(())
    }

    /// Custom lines at an insertion point, in registration order.
    pub fn lines(&self, location: Location) -> &[CustomLine] {
        self.custom_lines.get(&location).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Remove a custom line by cell values or by position.
    pub fn remove_line(
        &mut self,
        location: Location,
        cells: Option<&[String]>,
        index: Option<usize>,
    ) -> Result<()> {
        let not_found = || TableError::LineNotFound {
            location: location.to_string(),
        };
        let lines = self.custom_lines.entry(location).or_default();
        match (cells, index) {
            (Some(cells), _) => {
                let pos = lines
                    .iter()
                    .position(|l| l.cells == cells)
                    .ok_or_else(not_found)?;
                lines.remove(pos);
                Ok(())
            }
            (None, Some(index)) => {
                if index >= lines.len() {
                    return Err(not_found());
                }
                lines.remove(index);
                Ok(())
            }
            (None, None) => Err(TableError::MissingSelector),
        }
    }

    /// Add a pre-formatted line rendered verbatim by the LaTeX backend
    /// only. No escaping, no padding.
    pub fn add_latex_line(&mut self, location: Location, line: impl Into<String>) {
        self.latex_lines.entry(location).or_default().push(line.into());
    }

    pub fn latex_lines(&self, location: Location) -> &[String] {
        self.latex_lines.get(&location).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn remove_latex_line(
        &mut self,
        location: Location,
        line: Option<&str>,
        index: Option<usize>,
    ) -> Result<()> {
        let lines = self.latex_lines.entry(location).or_default();
        Self::remove_raw_line(lines, location, line, index)
    }

    /// Add a pre-formatted line rendered verbatim by the HTML backend only.
    pub fn add_html_line(&mut self, location: Location, line: impl Into<String>) {
        self.html_lines.entry(location).or_default().push(line.into());
    }

    pub fn html_lines(&self, location: Location) -> &[String] {
        self.html_lines.get(&location).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn remove_html_line(
        &mut self,
        location: Location,
        line: Option<&str>,
        index: Option<usize>,
    ) -> Result<()> {
        let lines = self.html_lines.entry(location).or_default();
        Self::remove_raw_line(lines, location, line, index)
    }

    fn remove_raw_line(
        lines: &mut Vec<String>,
        location: Location,
        line: Option<&str>,
        index: Option<usize>,
    ) -> Result<()> {
        let not_found = || TableError::LineNotFound {
            location: location.to_string(),
        };
        match (line, index) {
            (Some(line), _) => {
                let pos = lines.iter().position(|l| l == line).ok_or_else(not_found)?;
                lines.remove(pos);
                Ok(())
            }
            (None, Some(index)) => {
                if index >= lines.len() {
                    return Err(not_found());
                }
                lines.remove(index);
                Ok(())
            }
            (None, None) => Err(TableError::MissingSelector),
        }
    }

    /// Install custom formatters. The keys of the set address the column
    /// axis or the index axis; installing a set on the other axis replaces
    /// the previous one (last call wins) and logs a warning.
    pub fn set_formatters(&mut self, set: FormatterSet) {
        if let Some(prev) = &self.formatters {
            if prev.axis() != set.axis() {
                tracing::warn!(
                    previous = ?prev.axis(),
                    replacement = ?set.axis(),
                    "formatters already set on the other axis; the last call wins"
                );
            }
        }
        self.formatters = Some(set);
    }

    pub fn formatters(&self) -> Option<&FormatterSet> {
        self.formatters.as_ref()
    }

    /// LaTeX caption text.
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = Some(caption.into());
    }

    /// LaTeX cross-reference label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// Format one cell: custom formatter when the axis key matches, the
    /// default formatter otherwise. Never fails.
    pub(crate) fn format_cell(
        &self,
        row_key: &str,
        column: &str,
        value: &CellValue,
        params: &PackageParams,
    ) -> String {
        if let Some(set) = &self.formatters {
            let key = match set.axis() {
                FormatterAxis::Columns => column,
                FormatterAxis::Index => row_key,
            };
            if let Some(f) = set.get(key) {
                return f(value);
            }
        }
        default_format(value, params.sig_digits, &params.thousands_sep)
    }

    /// Default row materializer: one string row per dataset row, with a
    /// leading index label cell when the index is included.
    pub fn materialize(&self, data: &DataSet) -> Vec<Vec<String>> {
        let params = self.params.resolved();
        let col_positions: Vec<Option<usize>> = self
            .columns
            .iter()
            .map(|c| data.columns().iter().position(|d| d == c))
            .collect();

        let mut rows = Vec::with_capacity(data.nrows());
        for (key, values) in data.iter() {
            let mut row = Vec::with_capacity(self.ncolumns() + usize::from(params.include_index));
            if params.include_index {
                row.push(self.index_label(key).to_string());
            }
            for (column, position) in self.columns.iter().zip(&col_positions) {
                let cell = match position {
                    Some(i) => self.format_cell(key, column, &values[*i], &params),
                    None => String::new(),
                };
                row.push(cell);
            }
            rows.push(row);
        }
        rows
    }

    // Decoration support: variants push a line, note, or multicolumn
    // before delegating to the base renderer and pop it afterwards, on
    // every exit path. Pushed lines are shaped correctly by construction,
    // so no validation runs here.

    pub(crate) fn push_line(&mut self, location: Location, line: CustomLine) {
        self.custom_lines.entry(location).or_default().push(line);
    }

    pub(crate) fn pop_note(&mut self) {
        self.notes.pop();
    }

    pub(crate) fn pop_line(&mut self, location: Location) {
        if let Some(lines) = self.custom_lines.get_mut(&location) {
            lines.pop();
        }
    }

    pub(crate) fn pop_multicolumn(&mut self) {
        self.multicolumns.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatterSet;

    fn sample_data() -> DataSet {
        let mut data = DataSet::new(["a", "b"]).unwrap();
        data.push_row("r1", [CellValue::Float(1234.5), CellValue::from("x")])
            .unwrap();
        data.push_row("r2", [CellValue::Float(2.0), CellValue::from("y")])
            .unwrap();
        data
    }

    #[test]
    fn test_location_round_trip() {
        for loc in [
            Location::AfterMulticolumns,
            Location::AfterColumns,
            Location::AfterBody,
            Location::AfterFooter,
        ] {
            assert_eq!(loc.as_str().parse::<Location>().unwrap(), loc);
        }
        assert!(matches!(
            "top".parse::<Location>(),
            Err(TableError::InvalidLocation(_))
        ));
    }

    #[test]
    fn test_span_sum_validated_at_registration() {
        let mut model = TableModel::new(["a", "b", "c"]);
        let err = model.add_multicolumns(["First", "Second"], [1, 3]);
        assert!(matches!(
            err,
            Err(TableError::SpanMismatch {
                expected: 3,
                actual: 4
            })
        ));
        assert!(model.multicolumns().is_empty());

        model.add_multicolumns(["First", "Second"], [1, 2]).unwrap();
        assert_eq!(model.multicolumns().len(), 1);
    }

    #[test]
    fn test_empty_spans_cover_all_columns() {
        let mut model = TableModel::new(["a", "b", "c"]);
        model.add_multicolumns(["Everything"], []).unwrap();
        assert_eq!(model.multicolumns()[0].spans, vec![3]);
    }

    #[test]
    fn test_line_length_validated() {
        let mut model = TableModel::new(["a", "b"]);
        let err = model.add_line(Location::AfterBody, ["only one"], "");
        assert!(matches!(
            err,
            Err(TableError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_remove_note_selectors() {
        let mut model = TableModel::new(["a"]);
        model.add_note("first", Alignment::Left, true);
        model.add_note("second", Alignment::Right, false);

        assert!(matches!(
            model.remove_note(None, None),
            Err(TableError::MissingSelector)
        ));
        assert!(matches!(
            model.remove_note(Some("missing"), None),
            Err(TableError::NoteNotFound(_))
        ));

        model.remove_note(Some("first"), None).unwrap();
        assert_eq!(model.notes().len(), 1);
        model.remove_note(None, Some(0)).unwrap();
        assert!(model.notes().is_empty());
        assert!(model.remove_note(None, Some(0)).is_err());
    }

    #[test]
    fn test_remove_line_by_value() {
        let mut model = TableModel::new(["a", "b"]);
        model
            .add_line(Location::AfterColumns, ["Yes", "No"], "Controls")
            .unwrap();
        let cells = vec!["Yes".to_string(), "No".to_string()];
        model
            .remove_line(Location::AfterColumns, Some(&cells), None)
            .unwrap();
        assert!(model.lines(Location::AfterColumns).is_empty());
        assert!(model
            .remove_line(Location::AfterColumns, Some(&cells), None)
            .is_err());
    }

    #[test]
    fn test_materialized_row_width() {
        let mut model = TableModel::new(["a", "b"]);
        let data = sample_data();

        let rows = model.materialize(&data);
        assert!(rows.iter().all(|r| r.len() == 2));

        model.params_mut().set_include_index(true);
        let rows = model.materialize(&data);
        assert!(rows.iter().all(|r| r.len() == 3));
        assert_eq!(rows[0][0], "r1");
    }

    #[test]
    fn test_materialize_applies_labels_and_default_format() {
        let mut model = TableModel::new(["a", "b"]);
        model.params_mut().set_include_index(true);
        model.rename_index([("r1", "Row One")]);

        let rows = model.materialize(&sample_data());
        assert_eq!(rows[0][0], "Row One");
        assert_eq!(rows[0][1], "1,234.500");
        assert_eq!(rows[0][2], "x");
    }

    #[test]
    fn test_formatter_miss_falls_back() {
        let mut model = TableModel::new(["a", "b"]);
        model.set_formatters(FormatterSet::columns().with("a", |_| "A".to_string()));

        let rows = model.materialize(&sample_data());
        assert_eq!(rows[0][0], "A");
        // column "b" has no formatter: default applies
        assert_eq!(rows[0][1], "x");
    }

    #[test]
    fn test_index_axis_formatter() {
        let mut model = TableModel::new(["a", "b"]);
        model.params_mut().set_include_index(true);
        model.set_formatters(FormatterSet::index().with("r2", |_| "-".to_string()));

        let rows = model.materialize(&sample_data());
        assert_eq!(rows[1][1], "-");
        assert_eq!(rows[1][2], "-");
        assert_eq!(rows[0][1], "1,234.500");
    }
}
