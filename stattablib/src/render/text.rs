//! Plain-text backend.
//!
//! Every cell is padded to the uniform width computed by the measurement
//! pre-pass, so the output lines up in terminals and logs without any
//! markup. Rule characters, the border string, and cell alignments come
//! from the resolved parameters.

use unicode_width::UnicodeWidthStr;

use crate::model::{CustomLine, Location, TableModel};
use crate::params::{Alignment, PackageParams};
use crate::render::measure::{measure, Dimensions};
use crate::render::Renderer;
use crate::Result;

/// Pad `content` to `width` display columns. Content wider than the
/// target is returned unchanged. Centering biases the extra space to the
/// right.
fn pad(content: &str, width: usize, alignment: Alignment) -> String {
    let w = content.width();
    if w >= width {
        return content.to_string();
    }
    let space = width - w;
    match alignment {
        Alignment::Left => format!("{content}{}", " ".repeat(space)),
        Alignment::Right => format!("{}{content}", " ".repeat(space)),
        Alignment::Center => {
            let left = space / 2;
            format!("{}{content}{}", " ".repeat(left), " ".repeat(space - left))
        }
    }
}

/// Escape-flagged notes have line breaks and tabs normalized to spaces so
/// a note cannot break the fixed-width block.
fn normalize_note(text: &str) -> String {
    text.replace(['\n', '\t'], " ").replace('\r', "")
}

/// Renders a table as a fixed-width text block. Construction runs the
/// measurement pre-pass and fails fast on out-of-range padding.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    params: PackageParams,
    dims: Dimensions,
}

impl TextRenderer {
    pub fn new(model: &TableModel, rows: &[Vec<String>]) -> Result<Self> {
        let params = model.params().resolved();
        let dims = measure(model, rows, &params)?;
        Ok(Self { params, dims })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// A full-width rule from one repeated character. Empty characters
    /// produce an empty rule line.
    fn rule(&self, ch: &str) -> String {
        ch.repeat(self.dims.total + 2 * self.params.border_char.width())
    }

    /// One bordered line of padded cells. `cells[0]` goes in the index
    /// slot when the index is rendered.
    fn row_line(&self, cells: &[String]) -> String {
        let mut line = self.params.border_char.clone();
        for (i, cell) in cells.iter().enumerate() {
            if i == 0 && self.params.include_index {
                line.push_str(&pad(cell, self.dims.index_cell, self.params.index_alignment));
            } else {
                line.push_str(&pad(cell, self.dims.body_cell, self.params.column_alignment));
            }
        }
        line.push_str(&self.params.border_char);
        line
    }

    fn custom_line(&self, line: &CustomLine) -> String {
        let mut cells = Vec::with_capacity(line.cells.len() + 1);
        if self.params.include_index {
            cells.push(line.label.clone());
        }
        cells.extend(line.cells.iter().cloned());
        self.row_line(&cells)
    }
}

impl Renderer for TextRenderer {
    fn header(&self, model: &TableModel, _rows: &[Vec<String>]) -> String {
        let mut header = self.rule(&self.params.header_char);
        header.push('\n');
        if self.params.ascii_double_top_rule {
            header.push_str(&self.rule(&self.params.header_char));
            header.push('\n');
        }

        for group in model.multicolumns() {
            header.push_str(&self.params.border_char);
            if self.params.include_index {
                header.push_str(&" ".repeat(self.dims.index_cell));
            }
            for (label, span) in group.labels.iter().zip(&group.spans) {
                header.push_str(&pad(label, self.dims.body_cell * span, Alignment::Center));
            }
            header.push_str(&self.params.border_char);
            header.push('\n');
        }
        for line in model.lines(Location::AfterMulticolumns) {
            header.push_str(&self.custom_line(line));
            header.push('\n');
        }

        if self.params.show_columns {
            header.push_str(&self.params.border_char);
            if self.params.include_index {
                header.push_str(&pad(
                    model.index_name(),
                    self.dims.index_cell,
                    Alignment::Center,
                ));
            }
            for col in model.columns() {
                header.push_str(&pad(
                    model.column_label(col),
                    self.dims.body_cell,
                    Alignment::Center,
                ));
            }
            header.push_str(&self.params.border_char);
            header.push('\n');
        }
        for line in model.lines(Location::AfterColumns) {
            header.push_str(&self.custom_line(line));
            header.push('\n');
        }
        if self.params.show_columns {
            header.push_str(&self.params.border_char);
            header.push_str(&self.params.mid_rule_char.repeat(self.dims.total));
            header.push_str(&self.params.border_char);
            header.push('\n');
        }
        header
    }

    fn body(&self, model: &TableModel, rows: &[Vec<String>]) -> String {
        let mut body = String::new();
        for row in rows {
            body.push_str(&self.row_line(row));
            body.push('\n');
        }
        for line in model.lines(Location::AfterBody) {
            body.push_str(&self.custom_line(line));
            body.push('\n');
        }
        body
    }

    fn footer(&self, model: &TableModel, _rows: &[Vec<String>]) -> String {
        let mut footer = self.rule(&self.params.footer_char);
        if self.params.ascii_double_bottom_rule {
            footer.push('\n');
            footer.push_str(&self.rule(&self.params.footer_char));
        }
        for line in model.lines(Location::AfterFooter) {
            footer.push('\n');
            footer.push_str(&self.custom_line(line));
        }
        for note in model.notes() {
            let text = if note.escape {
                normalize_note(&note.text)
            } else {
                note.text.clone()
            };
            footer.push('\n');
            footer.push_str(&pad(&text, self.dims.total, note.alignment));
        }
        footer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataSet;
    use crate::value::CellValue;

    fn render(model: &TableModel, data: &DataSet) -> String {
        let rows = model.materialize(data);
        TextRenderer::new(model, &rows).unwrap().render(model, &rows)
    }

    fn two_column_table() -> (TableModel, DataSet) {
        let mut data = DataSet::new(["a", "abcdefghij"]).unwrap();
        data.push_row("r1", [CellValue::Int(1), CellValue::Int(2)])
            .unwrap();
        data.push_row("r2", [CellValue::Int(3), CellValue::Int(4)])
            .unwrap();
        let model = TableModel::new(["a", "abcdefghij"]);
        (model, data)
    }

    #[test]
    fn test_uniform_cell_width() {
        // labels of widths 1 and 10 with padding 2: every body cell is 14
        let (mut model, data) = two_column_table();
        model.params_mut().set_padding(2).unwrap();
        let out = render(&model, &data);

        for line in out.lines() {
            assert_eq!(line.width(), 28, "line {line:?} is not table-wide");
        }
        // body cells are centered in exactly 14 columns
        let body_line = out.lines().nth(3).unwrap();
        assert_eq!(&body_line[..14], format!("{:^14}", "1.000"));
        assert_eq!(&body_line[14..], format!("{:^14}", "2.000"));
    }

    #[test]
    fn test_rule_characters() {
        let (mut model, data) = two_column_table();
        model.params_mut().set_header_char("=").unwrap();
        model.params_mut().set_footer_char("-").unwrap();
        let out = render(&model, &data);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].chars().all(|c| c == '='));
        assert!(lines.last().unwrap().chars().all(|c| c == '-'));
        // mid rule under the column labels
        assert!(lines[2].chars().all(|c| c == '-'));
    }

    #[test]
    fn test_border_char_wraps_every_line() {
        let (mut model, data) = two_column_table();
        model.params_mut().set_border_char("|").unwrap();
        let out = render(&model, &data);
        let lines: Vec<&str> = out.lines().collect();
        // rules extend over the border width; cell lines start and end with it
        assert_eq!(lines[0].width(), 30);
        assert_eq!(lines[lines.len() - 1].width(), 30);
        for line in &lines[1..lines.len() - 1] {
            assert!(line.starts_with('|') && line.ends_with('|'));
        }
    }

    #[test]
    fn test_index_column_and_alignment() {
        let mut data = DataSet::new(["v"]).unwrap();
        data.push_row("alpha", [CellValue::Int(1)]).unwrap();
        data.push_row("b", [CellValue::Int(2)]).unwrap();
        let mut model = TableModel::new(["v"]);
        model.params_mut().set_include_index(true);
        model.params_mut().set_padding(1).unwrap();
        model.set_index_name("var");

        let out = render(&model, &data);
        // index cell: "alpha" + 2 = 7 wide, left aligned by default
        let body_line = out.lines().nth(2).unwrap();
        assert!(body_line.starts_with("alpha  "));
    }

    #[test]
    fn test_multicolumn_group_centered_over_span() {
        let (mut model, data) = two_column_table();
        model.params_mut().set_padding(2).unwrap();
        model.add_multicolumns(["Wide"], [2]).unwrap();
        let out = render(&model, &data);
        let group_line = out.lines().nth(1).unwrap();
        assert_eq!(group_line, format!("{:^28}", "Wide"));
    }

    #[test]
    fn test_notes_aligned_to_table_width() {
        let (mut model, data) = two_column_table();
        model.params_mut().set_padding(2).unwrap();
        model.add_note("left", Alignment::Left, true);
        model.add_note("right", Alignment::Right, true);
        let out = render(&model, &data);
        let lines: Vec<&str> = out.lines().collect();
        let n = lines.len();
        assert_eq!(lines[n - 2], format!("{:<28}", "left"));
        assert_eq!(lines[n - 1], format!("{:>28}", "right"));
    }

    #[test]
    fn test_note_normalization_honors_escape_flag() {
        let (mut model, data) = two_column_table();
        model.add_note("two\nlines", Alignment::Left, true);
        let out = render(&model, &data);
        assert!(out.contains("two lines"));

        let mut model2 = TableModel::new(["a", "abcdefghij"]);
        model2.add_note("two\nlines", Alignment::Left, false);
        let out2 = render(&model2, &data);
        assert!(out2.contains("two\nlines"));
    }

    #[test]
    fn test_custom_lines_spliced() {
        let (mut model, data) = two_column_table();
        model
            .add_line(Location::AfterColumns, ["N=5", "N=6"], "")
            .unwrap();
        model
            .add_line(Location::AfterBody, ["x", "y"], "")
            .unwrap();
        let out = render(&model, &data);
        let lines: Vec<&str> = out.lines().collect();
        // header rule, labels, N= line, mid rule, 2 data rows, x/y line, footer
        assert!(lines[2].contains("N=5"));
        assert!(lines[3].chars().all(|c| c == '-'));
        assert!(lines[6].contains('x'));
    }

    #[test]
    fn test_double_rules() {
        let (mut model, data) = two_column_table();
        model.params_mut().set_ascii_double_top_rule(true);
        model.params_mut().set_ascii_double_bottom_rule(true);
        let out = render(&model, &data);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].chars().all(|c| c == '='));
        assert!(lines[1].chars().all(|c| c == '='));
        assert!(lines[lines.len() - 1].chars().all(|c| c == '-'));
        assert!(lines[lines.len() - 2].chars().all(|c| c == '-'));
    }

    #[test]
    fn test_no_trailing_newline() {
        let (model, data) = two_column_table();
        let out = render(&model, &data);
        assert!(!out.ends_with('\n'));
    }
}
