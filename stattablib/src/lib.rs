//! # stattablib
//!
//! Publication-quality statistical tables, rendered to LaTeX, HTML, and
//! fixed-width plain text.
//!
//! ## Overview
//!
//! One abstract table model (columns, labels, multicolumn group headers,
//! notes, custom lines at named insertion points) feeds three
//! independent rendering backends that stay semantically interchangeable:
//! the same rows, headers, and notes come out in each dialect's markup.
//! Specialized tables (summary statistics, mean-difference comparisons,
//! model coefficient grids) pre-populate the shared model and delegate to
//! the same renderers.
//!
//! ## Features
//!
//! - **Three backends**: LaTeX (booktabs), self-contained HTML fragments,
//!   and padded plain text with measured uniform column widths
//! - **Structural validation up front**: span sums, line widths, and
//!   alignment codes are checked when configured, so a configured table
//!   always renders
//! - **Custom content**: per-key formatters, row-shaped custom lines at
//!   named insertion points, and verbatim per-backend line injections
//! - **Layered configuration**: instance overrides > table-type defaults
//!   > package-wide defaults
//!
//! ## Example
//!
//! ```rust
//! use stattablib::{DataSet, GenericTable, Table};
//!
//! let mut data = DataSet::new(["treated", "control"]).unwrap();
//! data.push_row("Outcome", [12.5, 11.25]).unwrap();
//! data.push_row("Cost", [1000.0, 800.0]).unwrap();
//!
//! let mut table = GenericTable::new(data);
//! table.model_mut().set_caption("Group comparison");
//!
//! let latex = table.render_latex(false);
//! assert!(latex.contains("\\begin{tabular}{lcc}"));
//!
//! let text = table.render_text().unwrap();
//! assert!(text.contains("1,000.000"));
//! ```

pub mod dataset;
pub mod error;
pub mod format;
pub mod meandiff;
pub mod model;
pub mod modeltable;
pub mod params;
pub mod render;
pub mod table;
pub mod value;

pub use dataset::DataSet;
pub use error::TableError;
pub use format::{default_format, significance_stars, FormatterAxis, FormatterSet};
pub use meandiff::{MeanDifferenceTable, SignificanceTest};
pub use model::{CustomLine, Location, MultiColumn, Note, TableModel};
pub use modeltable::{ModelSummary, ModelTable, Statistic};
pub use params::{Alignment, CaptionLocation, PackageParams, PartialParams, TableParams};
pub use render::{Dimensions, HtmlRenderer, LatexRenderer, Renderer, TextRenderer};
pub use table::{GenericTable, SummaryTable, Table};
pub use value::CellValue;

/// Result type for stattablib operations
pub type Result<T> = std::result::Result<T, TableError>;
