use crate::data::model::{Dataset, Value};
use crate::error::Error;

// ---------------------------------------------------------------------------
// Cell – a tagged table cell
// ---------------------------------------------------------------------------

/// One cell of a rendered table. The variant is decided when the table is
/// built, not inferred per cell at render time.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Rendered as escaped text.
    Plain(String),
    /// Rendered in scientific notation at the table's precision.
    Number(f64),
    /// Rendered as `$mean \pm std$`, both parts in scientific notation.
    MeanStd(f64, f64),
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Plain(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Plain(text)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Plain(value.to_string())
    }
}

impl From<(f64, f64)> for Cell {
    fn from((mean, std): (f64, f64)) -> Self {
        Cell::MeanStd(mean, std)
    }
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        match value {
            Value::Float(v) => Cell::Number(*v),
            other => Cell::Plain(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// TableSpec – caption, label, and layout options
// ---------------------------------------------------------------------------

/// Layout options for a rendered table.
///
/// `midrules` lists body-row indices; a `\midrule` is inserted immediately
/// before each listed row. `precision` is the number of digits after the
/// decimal point in scientific notation.
#[derive(Debug, Clone)]
pub struct TableSpec {
    pub caption: String,
    pub label: String,
    /// One alignment code per column, e.g. `"lccc"`.
    pub column_format: String,
    pub midrules: Vec<usize>,
    pub precision: usize,
}

impl Default for TableSpec {
    fn default() -> Self {
        Self {
            caption: String::new(),
            label: String::new(),
            column_format: String::new(),
            midrules: Vec::new(),
            precision: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Formatting primitives
// ---------------------------------------------------------------------------

/// Format a float as `<mantissa>\text{e<exponent>}` at the given precision.
///
/// Zero maps to the literal `0`; non-finite values pass through as plain
/// text. The exponent is a plain signed integer with no `+` and no leading
/// zeros.
pub fn scientific(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{value:.precision$e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => format!("{mantissa}\\text{{e{exponent}}}"),
        None => formatted,
    }
}

/// Escape LaTeX special characters in a single pass over the original
/// characters; the backslash produced by one substitution is never
/// re-escaped.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("\\&"),
            '%' => out.push_str("\\%"),
            '$' => out.push_str("\\$"),
            '#' => out.push_str("\\#"),
            '_' => out.push_str("\\_"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '\\' => out.push_str("\\textbackslash{}"),
            other => out.push(other),
        }
    }
    out
}

fn render_cell(cell: &Cell, precision: usize) -> String {
    match cell {
        Cell::Plain(text) => escape_latex(text),
        Cell::Number(v) => scientific(*v, precision),
        Cell::MeanStd(mean, std) => format!(
            "${} \\pm {}$",
            scientific(*mean, precision),
            scientific(*std, precision)
        ),
    }
}

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

/// Render a LaTeX `table*` float from row-oriented cells.
///
/// Every row must have exactly one cell per column name; the mismatch is
/// reported before any output is produced. Column names are set in bold
/// and taken verbatim (callers may embed LaTeX in them), as are the
/// caption and label.
pub fn render_table_from_rows<S: AsRef<str>>(
    rows: &[Vec<Cell>],
    columns: &[S],
    spec: &TableSpec,
) -> Result<String, Error> {
    for (i, row) in rows.iter().enumerate() {
        if row.len() != columns.len() {
            return Err(Error::RowLength {
                row: i,
                got: row.len(),
                want: columns.len(),
            });
        }
    }
    Ok(render(rows, columns, spec))
}

/// Render a LaTeX `table*` float from a dataset's records in order.
///
/// Column names come from the dataset itself, so no length check is
/// needed. `Float` cells render in scientific notation; everything else
/// renders as escaped text (`Null` as an empty cell).
pub fn render_table_from_dataset(dataset: &Dataset, spec: &TableSpec) -> String {
    let rows: Vec<Vec<Cell>> = dataset
        .rows()
        .map(|row| row.into_iter().map(Cell::from).collect())
        .collect();
    render(&rows, dataset.column_names(), spec)
}

fn render<S: AsRef<str>>(rows: &[Vec<Cell>], columns: &[S], spec: &TableSpec) -> String {
    let header_row = columns
        .iter()
        .map(|col| format!("\\textbf{{{}}}", col.as_ref()))
        .collect::<Vec<_>>()
        .join(" & ");

    let mut out = String::new();
    out.push_str("\\begin{table*}[t]\n");
    out.push_str("\\centering\n");
    out.push_str("\\rowcolors{2}{gray!20}{white}\n");
    out.push_str(&format!("\\begin{{tabular}}{{{}}}\n", spec.column_format));
    out.push_str("    \\toprule\n");
    out.push_str(&format!("    {header_row} \\\\\n"));
    out.push_str("    \\midrule\n");

    for (i, row) in rows.iter().enumerate() {
        if spec.midrules.contains(&i) {
            out.push_str("    \\midrule\n");
        }
        let formatted_row = row
            .iter()
            .map(|cell| render_cell(cell, spec.precision))
            .collect::<Vec<_>>()
            .join(" & ");
        out.push_str(&format!("    {formatted_row} \\\\\n"));
    }

    out.push_str("    \\bottomrule\n");
    out.push_str("\\end{tabular}\n");
    out.push_str(&format!("\\caption{{{}}}\n", spec.caption));
    out.push_str(&format!("\\label{{tab:{}}}\n", spec.label));
    out.push_str("\\end{table*}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scientific_zero_is_literal_zero() {
        assert_eq!(scientific(0.0, 0), "0");
        assert_eq!(scientific(0.0, 2), "0");
        assert_eq!(scientific(-0.0, 5), "0");
    }

    #[test]
    fn scientific_rounds_mantissa_and_keeps_plain_exponent() {
        assert_eq!(scientific(1234.5, 2), "1.23\\text{e3}");
        assert_eq!(scientific(1234.5, 0), "1\\text{e3}");
        assert_eq!(scientific(0.00123, 1), "1.2\\text{e-3}");
        assert_eq!(scientific(-1234.5, 2), "-1.23\\text{e3}");
        assert_eq!(scientific(1.0, 2), "1.00\\text{e0}");
    }

    #[test]
    fn escape_replaces_specials() {
        assert_eq!(escape_latex("50% & $5"), "50\\% \\& \\$5");
        assert_eq!(escape_latex("a_b#c"), "a\\_b\\#c");
        assert_eq!(escape_latex("x~y^z"), "x\\textasciitilde{}y\\textasciicircum{}z");
        assert_eq!(escape_latex("{ok}"), "\\{ok\\}");
    }

    #[test]
    fn escape_backslash_is_single_pass() {
        // the backslash introduced by the substitution must not be re-escaped
        assert_eq!(escape_latex("a\\b"), "a\\textbackslash{}b");
        assert_eq!(escape_latex("\\%"), "\\textbackslash{}\\%");
    }

    fn sample_spec() -> TableSpec {
        TableSpec {
            caption: "Planner results".into(),
            label: "planners".into(),
            column_format: "lc".into(),
            ..Default::default()
        }
    }

    #[test]
    fn mismatched_row_length_fails_before_rendering() {
        let rows = vec![
            vec![Cell::from("A"), Cell::from(1.0)],
            vec![Cell::from("B")],
        ];
        let err = render_table_from_rows(&rows, &["Name", "Value"], &sample_spec()).unwrap_err();
        assert!(matches!(
            err,
            Error::RowLength {
                row: 1,
                got: 1,
                want: 2
            }
        ));
    }

    #[test]
    fn mean_std_cells_render_exactly() {
        let rows = vec![
            vec![Cell::from("A"), Cell::from((1.0, 0.1))],
            vec![Cell::from("B"), Cell::from((2.0, 0.2))],
        ];
        let table = render_table_from_rows(&rows, &["Name", "Value"], &sample_spec()).unwrap();
        assert!(table.contains("A & $1.00\\text{e0} \\pm 1.00\\text{e-1}$ \\\\"));
        assert!(table.contains("B & $2.00\\text{e0} \\pm 2.00\\text{e-1}$ \\\\"));
    }

    #[test]
    fn skeleton_and_header() {
        let rows = vec![vec![Cell::from("A"), Cell::from(1.0)]];
        let table = render_table_from_rows(&rows, &["Name", "Value"], &sample_spec()).unwrap();
        assert!(table.starts_with("\\begin{table*}[t]\n"));
        assert!(table.ends_with("\\end{table*}\n"));
        assert!(table.contains("\\begin{tabular}{lc}"));
        assert!(table.contains("\\toprule"));
        assert!(table.contains("\\textbf{Name} & \\textbf{Value} \\\\"));
        assert!(table.contains("\\bottomrule"));
        assert!(table.contains("\\caption{Planner results}"));
        assert!(table.contains("\\label{tab:planners}"));
    }

    #[test]
    fn midrule_inserted_before_listed_row() {
        let rows = vec![
            vec![Cell::from("A")],
            vec![Cell::from("B")],
            vec![Cell::from("C")],
        ];
        let spec = TableSpec {
            midrules: vec![1],
            column_format: "l".into(),
            ..Default::default()
        };
        let table = render_table_from_rows(&rows, &["Name"], &spec).unwrap();

        // one header midrule plus exactly one inserted rule
        assert_eq!(table.matches("\\midrule").count(), 2);
        let lines: Vec<&str> = table.lines().collect();
        let b_line = lines.iter().position(|l| l.contains("B \\\\")).unwrap();
        assert_eq!(lines[b_line - 1].trim(), "\\midrule");
        // all three rows survive the insertion
        assert!(table.contains("A \\\\"));
        assert!(table.contains("C \\\\"));
    }

    #[test]
    fn dataset_rendering_uses_column_labels_and_types() {
        let ds = Dataset::new(
            vec!["method".into(), "runtime_s".into(), "note".into()],
            vec![
                vec![
                    Value::String("rrt_star".into()),
                    Value::String("prm".into()),
                ],
                vec![Value::Float(1234.5), Value::Float(0.0)],
                vec![Value::Null, Value::String("50% done".into())],
            ],
        )
        .unwrap();
        let spec = TableSpec {
            caption: "Runtimes".into(),
            label: "runtimes".into(),
            column_format: "lcc".into(),
            ..Default::default()
        };
        let table = render_table_from_dataset(&ds, &spec);

        // plain cells escaped, floats in scientific notation, nulls empty
        assert!(table.contains("rrt\\_star & 1.23\\text{e3} &  \\\\"));
        assert!(table.contains("prm & 0 & 50\\% done \\\\"));
        assert!(table.contains("\\textbf{method} & \\textbf{runtime_s} & \\textbf{note} \\\\"));
    }

    #[test]
    fn precision_is_configurable() {
        let rows = vec![vec![Cell::from(1234.5)]];
        let spec = TableSpec {
            precision: 4,
            column_format: "c".into(),
            ..Default::default()
        };
        let table = render_table_from_rows(&rows, &["v"], &spec).unwrap();
        assert!(table.contains("1.2345\\text{e3}"));
    }
}
