use std::collections::BTreeMap;

/// One rendered widget output placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    pub text: String,
}

impl GridCell {
    pub fn new(row: u32, col: u32, text: impl Into<String>) -> Self {
        Self {
            row,
            col,
            text: text.into(),
        }
    }
}

/// Compose cells into display lines.
///
/// Rows ascend, columns ascend within a row, cells join on the separator
/// with natural widths (no padding: terminal glyph widths vary and we do
/// not try to measure them). Two cells on the same coordinate: last one
/// registered wins. Rows whose cells are all empty vanish from the
/// output entirely.
pub fn layout(cells: Vec<GridCell>, separator: &str) -> Vec<String> {
    let mut rows: BTreeMap<u32, BTreeMap<u32, String>> = BTreeMap::new();
    for cell in cells {
        rows.entry(cell.row).or_default().insert(cell.col, cell.text);
    }

    rows.into_values()
        .filter_map(|columns| {
            let parts: Vec<String> = columns
                .into_values()
                .filter(|text| !text.is_empty())
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(separator))
            }
        })
        .collect()
}
