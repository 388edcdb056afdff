//! Diagnostic summary table.

use std::{
    fmt,
    io::{self, Write},
};

use super::{LevelSetTree, Node};

const HEADERS: [&str; 8] = [
    "id",
    "start_level",
    "end_level",
    "start_mass",
    "end_mass",
    "size",
    "parent",
    "children",
];

fn row(node: &Node) -> [String; 8] {
    let children = node
        .children
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    [
        node.id.to_string(),
        format!("{:5.3}", node.start_level),
        format!("{:5.3}", node.end_level),
        format!("{:5.3}", node.start_mass),
        format!("{:5.3}", node.end_mass),
        node.size().to_string(),
        node.parent.map_or_else(|| "-".to_owned(), |parent| parent.to_string()),
        format!("[{children}]"),
    ]
}

fn write_rule(f: &mut fmt::Formatter<'_>, widths: &[usize]) -> fmt::Result {
    for width in widths {
        write!(f, "+{}", "-".repeat(width + 2))?;
    }
    writeln!(f, "+")
}

fn write_cells<S: AsRef<str>>(
    f: &mut fmt::Formatter<'_>,
    widths: &[usize],
    cells: &[S],
) -> fmt::Result {
    for (cell, &width) in cells.iter().zip(widths) {
        write!(f, "| {:>width$} ", cell.as_ref())?;
    }
    writeln!(f, "|")
}

impl fmt::Display for LevelSetTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<[String; 8]> = self.nodes().map(row).collect();
        let widths: Vec<usize> = HEADERS
            .iter()
            .enumerate()
            .map(|(column, header)| {
                rows.iter()
                    .map(|cells| cells[column].len())
                    .fold(header.len(), usize::max)
            })
            .collect();

        write_rule(f, &widths)?;
        write_cells(f, &widths, &HEADERS)?;
        write_rule(f, &widths)?;
        for cells in &rows {
            write_cells(f, &widths, cells)?;
        }
        write_rule(f, &widths)
    }
}

/// Writes the node summary table of `tree` to `writer`.
///
/// # Errors
/// Propagates any I/O error raised by `writer`.
///
/// # Examples
/// ```
/// use lstree_core::{LevelSetTree, render_summary};
///
/// let tree = LevelSetTree::builder()
///     .build()?
///     .construct(&[vec![1], vec![0]], &[1.0, 1.0], &[1.0])?;
/// let mut buffer = Vec::new();
/// render_summary(&tree, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains("start_level"));
/// assert!(text.contains("1.000"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_summary(tree: &LevelSetTree, mut writer: impl Write) -> io::Result<()> {
    write!(writer, "{tree}")
}
