//! Column width measurement for the plain-text backend.
//!
//! Plain text has no layout engine, so every cell must be padded to a
//! fixed width before a single line can be emitted. One pre-pass over the
//! materialized rows and the header labels computes two widths: a uniform
//! body cell width and an independent index cell width. One body width for
//! every column (rather than per-column widths) keeps all body columns
//! aligned under multicolumn group headers without span arithmetic.
//!
//! Widths are Unicode display widths, not byte or char counts.

use unicode_width::UnicodeWidthStr;

use crate::model::TableModel;
use crate::params::{check_padding, PackageParams};
use crate::Result;

/// Measured cell and table widths, padding included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Uniform width of every body cell
    pub body_cell: usize,
    /// Width of the index cell; zero when the index is not rendered
    pub index_cell: usize,
    /// Full table width: `body_cell * ncolumns + index_cell`
    pub total: usize,
}

/// Measure the widths needed to lay out `rows`. Fails fast on
/// out-of-range padding, before looking at any content.
pub fn measure(
    model: &TableModel,
    rows: &[Vec<String>],
    params: &PackageParams,
) -> Result<Dimensions> {
    check_padding(params.padding)?;
    let pad = 2 * params.padding;
    let include_index = params.include_index;

    let mut body_cell = 0usize;
    let mut index_cell = 0usize;

    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let size = cell.width() + pad;
            if i == 0 && include_index {
                index_cell = index_cell.max(size);
            } else {
                body_cell = body_cell.max(size);
            }
        }
    }

    if include_index {
        index_cell = index_cell.max(model.index_name().width() + pad);
    }

    if params.show_columns {
        for column in model.columns() {
            body_cell = body_cell.max(model.column_label(column).width() + pad);
        }
    }

    let total = body_cell * model.ncolumns() + index_cell;
    Ok(Dimensions {
        body_cell,
        index_cell,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use crate::model::TableModel;

    fn params_with_padding(padding: usize) -> PackageParams {
        PackageParams {
            padding,
            ..PackageParams::default()
        }
    }

    #[test]
    fn test_uniform_body_width() {
        // column labels of widths 1 and 10, padding 2
        let model = TableModel::new(["a", "abcdefghij"]);
        let rows = vec![vec!["1.0".to_string(), "2.0".to_string()]];
        let dims = measure(&model, &rows, &params_with_padding(2)).unwrap();
        assert_eq!(dims.body_cell, 14);
        assert_eq!(dims.index_cell, 0);
        assert_eq!(dims.total, 28);
    }

    #[test]
    fn test_index_width_independent() {
        let model = {
            let mut m = TableModel::new(["a"]);
            m.set_index_name("id");
            m
        };
        let mut params = params_with_padding(1);
        params.include_index = true;
        let rows = vec![
            vec!["long index label".to_string(), "x".to_string()],
            vec!["r2".to_string(), "yy".to_string()],
        ];
        let dims = measure(&model, &rows, &params).unwrap();
        // index: "long index label" (16) + 2, body: max("a", "x", "yy") + 2
        assert_eq!(dims.index_cell, 18);
        assert_eq!(dims.body_cell, 4);
        assert_eq!(dims.total, 22);
    }

    #[test]
    fn test_padding_validated_first() {
        let model = TableModel::new(["a"]);
        let err = measure(&model, &[], &params_with_padding(21));
        assert!(matches!(err, Err(TableError::PaddingOutOfRange(21))));
    }

    #[test]
    fn test_display_width_not_char_count() {
        let model = TableModel::new(["人口密度"]);
        let rows: Vec<Vec<String>> = Vec::new();
        let dims = measure(&model, &rows, &params_with_padding(0)).unwrap();
        // four CJK chars occupy eight columns
        assert_eq!(dims.body_cell, 8);
    }

    #[test]
    fn test_hidden_columns_not_measured() {
        let model = TableModel::new(["a_very_long_column_label"]);
        let mut params = params_with_padding(0);
        params.show_columns = false;
        let rows = vec![vec!["xx".to_string()]];
        let dims = measure(&model, &rows, &params).unwrap();
        assert_eq!(dims.body_cell, 2);
    }
}
