//! HTML backend.
//!
//! Emits a self-contained `<table>` fragment suitable for standalone use
//! or notebook-style rich display. Alignment codes translate to the long
//! CSS keywords; no character escaping is performed, that is left to the
//! display environment.

use crate::model::{CustomLine, Location, TableModel};
use crate::render::Renderer;

/// Renders a table as a `<table>` fragment.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    fn create_line(&self, line: &CustomLine, include_index: bool) -> String {
        let mut out = String::from("    <tr>\n");
        if include_index {
            out.push_str(&format!("      <th>{}</th>\n", line.label));
        }
        for cell in &line.cells {
            out.push_str(&format!("      <th>{cell}</th>\n"));
        }
        out.push_str("    </tr>\n");
        out
    }
}

impl Renderer for HtmlRenderer {
    fn header(&self, model: &TableModel, _rows: &[Vec<String>]) -> String {
        let params = model.params().resolved();
        let mut header = String::from("<table>\n  <thead>\n");

        for group in model.multicolumns() {
            header.push_str("    <tr>\n");
            if params.include_index {
                header.push_str(&format!("      <th>{}</th>\n", model.index_name()));
            }
            let cells: Vec<String> = group
                .labels
                .iter()
                .zip(&group.spans)
                .map(|(label, span)| {
                    format!("<th colspan=\"{span}\" style=\"text-align:center;\">{label}</th>")
                })
                .collect();
            header.push_str("      ");
            header.push_str(&cells.join(" "));
            header.push('\n');
            header.push_str("    </tr>\n");
        }
        for line in model.html_lines(Location::AfterMulticolumns) {
            header.push_str(line);
            header.push('\n');
        }
        for line in model.lines(Location::AfterMulticolumns) {
            header.push_str(&self.create_line(line, params.include_index));
        }

        if params.show_columns {
            header.push_str("    <tr>\n");
            if params.include_index {
                header.push_str(&format!("      <th>{}</th>\n", model.index_name()));
            }
            for col in model.columns() {
                header.push_str(&format!(
                    "      <th style=\"text-align:center;\">{}</th>\n",
                    model.column_label(col)
                ));
            }
            header.push_str("    </tr>\n");
        }
        for line in model.html_lines(Location::AfterColumns) {
            header.push_str(line);
            header.push('\n');
        }
        for line in model.lines(Location::AfterColumns) {
            header.push_str(&self.create_line(line, params.include_index));
        }

        header.push_str("  </thead>\n");
        header.push_str("  <tbody>\n");
        header
    }

    fn body(&self, model: &TableModel, rows: &[Vec<String>]) -> String {
        let params = model.params().resolved();
        let mut body = String::new();
        for row in rows {
            body.push_str("    <tr>\n");
            for cell in row {
                body.push_str(&format!("      <td>{cell}</td>\n"));
            }
            body.push_str("    </tr>\n");
        }
        for line in model.lines(Location::AfterBody) {
            body.push_str(&self.create_line(line, params.include_index));
        }
        for line in model.html_lines(Location::AfterBody) {
            body.push_str(line);
            body.push('\n');
        }
        body
    }

    fn footer(&self, model: &TableModel, _rows: &[Vec<String>]) -> String {
        let params = model.params().resolved();
        let mut footer = String::new();
        for line in model.lines(Location::AfterFooter) {
            footer.push_str(&self.create_line(line, params.include_index));
        }
        if !model.notes().is_empty() {
            let ncols = model.ncolumns() + usize::from(params.include_index);
            for note in model.notes() {
                footer.push_str(&format!(
                    "    <tr><td colspan=\"{ncols}\" style=\"text-align:{};\"><i>{}</i></td></tr>\n",
                    note.alignment.keyword(),
                    note.text
                ));
            }
        }
        footer.push_str("  </tbody>\n");
        footer.push_str("</table>\n");
        footer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataSet;
    use crate::params::Alignment;
    use crate::value::CellValue;

    fn sample() -> (TableModel, DataSet) {
        let mut data = DataSet::new(["a", "b"]).unwrap();
        data.push_row("r1", [CellValue::Int(1), CellValue::Int(2)])
            .unwrap();
        let model = TableModel::new(["a", "b"]);
        (model, data)
    }

    fn render(model: &TableModel, data: &DataSet) -> String {
        let rows = model.materialize(data);
        HtmlRenderer::new().render(model, &rows)
    }

    #[test]
    fn test_fragment_is_closed() {
        let (model, data) = sample();
        let out = render(&model, &data);
        assert!(out.starts_with("<table>\n  <thead>\n"));
        assert!(out.ends_with("  </tbody>\n</table>\n"));
    }

    #[test]
    fn test_colspan_groups() {
        let (mut model, data) = sample();
        model.add_multicolumns(["Both"], [2]).unwrap();
        let out = render(&model, &data);
        assert!(out.contains("<th colspan=\"2\" style=\"text-align:center;\">Both</th>"));
    }

    #[test]
    fn test_column_labels_renamed() {
        let (mut model, data) = sample();
        model.rename_columns([("a", "Alpha")]);
        let out = render(&model, &data);
        assert!(out.contains("<th style=\"text-align:center;\">Alpha</th>"));
        assert!(out.contains("<th style=\"text-align:center;\">b</th>"));
    }

    #[test]
    fn test_no_escaping() {
        let mut data = DataSet::new(["a"]).unwrap();
        data.push_row("r", [CellValue::from("50% & rising")]).unwrap();
        let model = TableModel::new(["a"]);
        let out = render(&model, &data);
        assert!(out.contains("<td>50% & rising</td>"));
    }

    #[test]
    fn test_note_alignment_keywords() {
        let (mut model, data) = sample();
        model.add_note("left note", Alignment::Left, true);
        model.add_note("right note", Alignment::Right, false);
        let out = render(&model, &data);
        assert!(out.contains("style=\"text-align:left;\"><i>left note</i>"));
        assert!(out.contains("style=\"text-align:right;\"><i>right note</i>"));
        // colspan covers data columns plus nothing else: index is off
        assert!(out.contains("colspan=\"2\""));
    }

    #[test]
    fn test_custom_line_cells_are_header_cells() {
        let (mut model, data) = sample();
        model.params_mut().set_include_index(true);
        model
            .add_line(Location::AfterColumns, ["N=5", "N=6"], "Sizes")
            .unwrap();
        let out = render(&model, &data);
        assert!(out.contains("      <th>Sizes</th>\n      <th>N=5</th>\n      <th>N=6</th>\n"));
    }

    #[test]
    fn test_row_count_matches_data() {
        let (model, data) = sample();
        let out = render(&model, &data);
        let body_rows = out.matches("<td>").count();
        assert_eq!(body_rows, 2); // one row, two cells
    }
}
