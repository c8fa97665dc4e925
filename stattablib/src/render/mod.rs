//! Backend renderers: LaTeX, HTML, and plain text.
//!
//! Each backend independently assembles header, body, and footer from the
//! same table model and materialized rows. The structural behavior is
//! identical across backends (multicolumn group lines, the column label
//! line, custom lines at their insertion points, data rows, then footer
//! lines and notes) while the markup, escaping rules, and, for plain
//! text, the width measurement differ per backend.
//!
//! - **LaTeX**: table/tabular environments, booktabs rules, character
//!   escaping ([`latex`])
//! - **HTML**: a self-contained `<table>` fragment, no escaping ([`html`])
//! - **Plain text**: fixed-width cells from a measurement pre-pass
//!   ([`text`], [`measure`])

pub mod html;
pub mod latex;
pub mod measure;
pub mod text;

pub use html::HtmlRenderer;
pub use latex::LatexRenderer;
pub use measure::{measure, Dimensions};
pub use text::TextRenderer;

use std::path::Path;

use crate::model::TableModel;
use crate::Result;

/// Which backend a render call targets. Variants use this to phrase
/// backend-sensitive decorations (math-mode `<`, superscripts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    Latex,
    Html,
    Text,
}

/// A rendering backend: header, body, and footer of one document,
/// concatenated in order by the provided `render`.
pub trait Renderer {
    fn render(&self, model: &TableModel, rows: &[Vec<String>]) -> String {
        let mut out = self.header(model, rows);
        out.push_str(&self.body(model, rows));
        out.push_str(&self.footer(model, rows));
        out
    }

    fn header(&self, model: &TableModel, rows: &[Vec<String>]) -> String;
    fn body(&self, model: &TableModel, rows: &[Vec<String>]) -> String;
    fn footer(&self, model: &TableModel, rows: &[Vec<String>]) -> String;
}

/// Write a fully rendered document to a file. The string is complete
/// before the file is opened, so there is no partial-write recovery.
pub fn write_to_path(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.tex");
        write_to_path(&path, "contents\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "contents\n");
    }

    #[test]
    fn test_write_to_unwritable_path_fails() {
        let err = write_to_path("/nonexistent-dir/table.tex", "x");
        assert!(err.is_err());
    }
}
