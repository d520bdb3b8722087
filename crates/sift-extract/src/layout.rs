//! Page layout reconstruction.
//!
//! A page is a bag of positioned objects; rendering sorts them by vertical
//! position and emits text in reading order. The sort is stable, so objects
//! sharing a position keep their collection order.

/// Any extracted page element carrying a sortable vertical coordinate.
/// Positions grow downward from the top of the page.
#[derive(Debug, Clone)]
pub enum PositionedObject {
    /// A run of text at a vertical position.
    TextLine { top: f64, text: String },
    /// A graphic primitive (rule, box edge). Contributes ordering only.
    Primitive { top: f64 },
    /// A table; `rows: None` marks a table whose cells could not be
    /// extracted and renders as a placeholder.
    Table {
        top: f64,
        rows: Option<Vec<Vec<String>>>,
    },
    /// An embedded image, referenced by name, with an optional description.
    Image {
        top: f64,
        name: String,
        description: Option<String>,
    },
}

impl PositionedObject {
    /// Uniform vertical accessor: tables use their bounding box's top edge,
    /// text lines their own top, everything else its document coordinate.
    pub fn vertical_position(&self) -> f64 {
        match self {
            Self::TextLine { top, .. } => *top,
            Self::Primitive { top } => *top,
            Self::Table { top, .. } => *top,
            Self::Image { top, .. } => *top,
        }
    }
}

/// Render a page's objects as Markdown, sorted by vertical position.
pub fn render_page(objects: &mut Vec<PositionedObject>) -> String {
    objects.sort_by(|a, b| {
        a.vertical_position()
            .partial_cmp(&b.vertical_position())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut out = String::new();
    for object in objects.iter() {
        match object {
            PositionedObject::TextLine { text, .. } => {
                let text = text.trim();
                if !text.is_empty() {
                    out.push_str(text);
                    out.push_str("\n\n");
                }
            }
            PositionedObject::Primitive { .. } => {}
            PositionedObject::Table { rows, .. } => match rows {
                Some(rows) if !rows.is_empty() => {
                    out.push_str(&render_table(rows));
                    out.push('\n');
                }
                _ => {
                    out.push_str("[table omitted]\n\n");
                }
            },
            PositionedObject::Image {
                name, description, ..
            } => {
                out.push_str(&format!("![image: {name}]\n\n"));
                if let Some(description) = description {
                    out.push_str(description.trim());
                    out.push_str("\n\n");
                }
            }
        }
    }
    out
}

/// Header row, separator row, then data rows, pipe-delimited.
fn render_table(rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for (i, row) in rows.iter().enumerate() {
        let mut cells: Vec<String> = row.iter().map(|c| c.trim().to_string()).collect();
        cells.resize(width, String::new());
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
        if i == 0 {
            out.push_str(&format!("| {} |\n", vec!["---"; width].join(" | ")));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(top: f64, rows: &[&[&str]]) -> PositionedObject {
        PositionedObject::Table {
            top,
            rows: Some(
                rows.iter()
                    .map(|r| r.iter().map(|c| c.to_string()).collect())
                    .collect(),
            ),
        }
    }

    fn line(top: f64, text: &str) -> PositionedObject {
        PositionedObject::TextLine {
            top,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_text_renders_around_table_by_position() {
        let mut objects = vec![
            line(300.0, "Below the table."),
            table(150.0, &[&["h1", "h2"], &["a", "b"]]),
            line(50.0, "Above the table."),
        ];

        let rendered = render_page(&mut objects);
        let above = rendered.find("Above the table.").unwrap();
        let header = rendered.find("| h1 | h2 |").unwrap();
        let below = rendered.find("Below the table.").unwrap();

        assert!(above < header);
        assert!(header < below);
    }

    #[test]
    fn test_table_rows_are_never_interleaved_with_text() {
        let mut objects = vec![
            table(100.0, &[&["x", "y"], &["1", "2"], &["3", "4"]]),
            line(110.0, "Text positioned between the table's rows."),
        ];

        let rendered = render_page(&mut objects);
        // The table renders as one block: header, separator, both data rows
        // in sequence.
        assert!(rendered.contains("| x | y |\n| --- | --- |\n| 1 | 2 |\n| 3 | 4 |"));
    }

    #[test]
    fn test_failed_table_leaves_placeholder_in_order() {
        let mut objects = vec![
            line(10.0, "before"),
            PositionedObject::Table {
                top: 20.0,
                rows: None,
            },
            line(30.0, "after"),
        ];

        let rendered = render_page(&mut objects);
        let before = rendered.find("before").unwrap();
        let placeholder = rendered.find("[table omitted]").unwrap();
        let after = rendered.find("after").unwrap();
        assert!(before < placeholder && placeholder < after);
    }

    #[test]
    fn test_image_marker_with_description() {
        let mut objects = vec![PositionedObject::Image {
            top: 5.0,
            name: "Im1".to_string(),
            description: Some("A bar chart of quarterly sales.".to_string()),
        }];

        let rendered = render_page(&mut objects);
        assert!(rendered.contains("![image: Im1]"));
        assert!(rendered.contains("A bar chart of quarterly sales."));
    }

    #[test]
    fn test_empty_page_renders_empty() {
        let mut objects = vec![];
        assert_eq!(render_page(&mut objects), "");
    }

    #[test]
    fn test_ragged_table_rows_are_padded() {
        let mut objects = vec![table(0.0, &[&["a", "b", "c"], &["1"]])];
        let rendered = render_page(&mut objects);
        assert!(rendered.contains("| 1 |  |  |"));
    }

    #[test]
    fn test_stable_order_for_equal_positions() {
        let mut objects = vec![line(10.0, "first"), line(10.0, "second")];
        let rendered = render_page(&mut objects);
        assert!(rendered.find("first").unwrap() < rendered.find("second").unwrap());
    }
}
