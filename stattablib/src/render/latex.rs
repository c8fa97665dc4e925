//! LaTeX backend.
//!
//! Output targets the booktabs package (`\toprule`/`\midrule`/
//! `\bottomrule`). Every header and body cell is escaped; verbatim
//! injected lines never are. With `only_tabular` the floating `table`
//! environment, caption, and label are omitted and only the `tabular`
//! block is emitted.

use crate::model::{CustomLine, Location, TableModel};
use crate::params::CaptionLocation;
use crate::render::Renderer;

/// Reserved characters and their replacements, applied in order.
const ESCAPE_CHARS: &[(&str, &str)] = &[
    ("\\", "\\textbackslash "),
    ("_", "\\_"),
    ("%", "\\%"),
    ("$", "\\$"),
    ("#", "\\#"),
    ("{", "\\{"),
    ("}", "\\}"),
    ("~", "\\textasciitilde "),
    ("^", "\\textasciicircum "),
    ("&", "\\&"),
];

/// Escape LaTeX reserved characters in cell or note text.
pub fn escape(text: &str) -> String {
    let mut out = text.to_string();
    for (raw, escaped) in ESCAPE_CHARS {
        out = out.replace(raw, escaped);
    }
    out
}

/// Renders a table as a LaTeX `table`/`tabular` document.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatexRenderer {
    only_tabular: bool,
}

impl LatexRenderer {
    pub fn new(only_tabular: bool) -> Self {
        Self { only_tabular }
    }

    fn caption_and_label(&self, model: &TableModel) -> String {
        let mut out = String::new();
        if let Some(caption) = model.caption() {
            out.push_str("  \\caption{");
            out.push_str(caption);
            out.push_str("}\n");
        }
        if let Some(label) = model.label() {
            out.push_str("  \\label{");
            out.push_str(label);
            out.push_str("}\n");
        }
        out
    }

    fn create_line(&self, line: &CustomLine, include_index: bool) -> String {
        let mut out = String::new();
        if include_index {
            out.push_str("  ");
            out.push_str(&line.label);
            out.push_str(" & ");
        }
        out.push_str(&line.cells.join(" & "));
        out.push_str("\\\\\n");
        out
    }
}

impl Renderer for LatexRenderer {
    fn header(&self, model: &TableModel, _rows: &[Vec<String>]) -> String {
        let params = model.params().resolved();
        let mut header = String::new();

        if !self.only_tabular {
            header.push_str("\\begin{table}[!htbp]\n  \\centering\n");
            if params.caption_location == CaptionLocation::Top {
                header.push_str(&self.caption_and_label(model));
            }
        }

        let mut content_columns = "c".repeat(model.ncolumns());
        if params.include_index {
            content_columns.insert(0, 'l');
        }
        header.push_str("\\begin{tabular}{");
        header.push_str(&content_columns);
        header.push_str("}\n");
        header.push_str("  \\toprule\n");
        if params.double_top_rule {
            header.push_str("  \\toprule\n");
        }

        for group in model.multicolumns() {
            if params.include_index {
                header.push_str("  ");
                header.push_str(model.index_name());
                header.push_str(" & ");
            }
            let cells: Vec<String> = group
                .labels
                .iter()
                .zip(&group.spans)
                .map(|(label, span)| format!("\\multicolumn{{{span}}}{{c}}{{{}}}", escape(label)))
                .collect();
            header.push_str(&cells.join(" & "));
            header.push_str(" \\\\\n");
        }
        for line in model.latex_lines(Location::AfterMulticolumns) {
            header.push_str("  ");
            header.push_str(line);
            header.push('\n');
        }
        for line in model.lines(Location::AfterMulticolumns) {
            header.push_str(&self.create_line(line, params.include_index));
        }

        if params.show_columns {
            if params.include_index {
                header.push_str("  ");
                header.push_str(model.index_name());
                header.push_str(" & ");
            }
            let labels: Vec<String> = model
                .columns()
                .iter()
                .map(|col| escape(model.column_label(col)))
                .collect();
            header.push_str(&labels.join(" & "));
            header.push_str("\\\\\n");
        }
        for line in model.latex_lines(Location::AfterColumns) {
            header.push_str("  ");
            header.push_str(line);
            header.push('\n');
        }
        for line in model.lines(Location::AfterColumns) {
            header.push_str(&self.create_line(line, params.include_index));
        }
        header.push_str("  \\midrule\n");

        header
    }

    fn body(&self, model: &TableModel, rows: &[Vec<String>]) -> String {
        let params = model.params().resolved();
        let mut body = String::new();
        for row in rows {
            let cells: Vec<String> = row.iter().map(|cell| escape(cell)).collect();
            body.push_str("  ");
            body.push_str(&cells.join(" & "));
            body.push_str(" \\\\\n");
        }
        for line in model.lines(Location::AfterBody) {
            body.push_str(&self.create_line(line, params.include_index));
        }
        for line in model.latex_lines(Location::AfterBody) {
            body.push_str(line);
        }
        body
    }

    fn footer(&self, model: &TableModel, _rows: &[Vec<String>]) -> String {
        let params = model.params().resolved();
        let mut footer = String::new();
        footer.push_str("  \\bottomrule\n");
        if params.double_bottom_rule {
            footer.push_str("  \\bottomrule\n");
        }
        if !model.lines(Location::AfterFooter).is_empty() {
            for line in model.lines(Location::AfterFooter) {
                footer.push_str(&self.create_line(line, params.include_index));
            }
            footer.push_str("  \\bottomrule\n");
        }
        if !model.notes().is_empty() {
            let align_cols = model.ncolumns() + usize::from(params.include_index);
            for note in model.notes() {
                let text = if note.escape {
                    escape(&note.text)
                } else {
                    note.text.clone()
                };
                footer.push_str(&format!(
                    "  \\multicolumn{{{align_cols}}}{{{}}}",
                    note.alignment.code()
                ));
                footer.push_str("{{\\small \\textit{");
                footer.push_str(&text);
                footer.push_str("}}}\\\\\n");
            }
        }

        footer.push_str("\\end{tabular}\n");
        if !self.only_tabular {
            if params.caption_location == CaptionLocation::Bottom {
                footer.push_str(&self.caption_and_label(model));
            }
            footer.push_str("\\end{table}\n");
        }
        footer
    }
}
