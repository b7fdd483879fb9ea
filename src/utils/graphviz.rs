//! Graphviz output for parse trees. Only reads (label, children) pairs.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tempfile::Builder;

use crate::parse::ast::Node;

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Renders the tree as a DOT digraph. Nodes are numbered in pre-order.
pub fn to_dot(root: &Node) -> String {
    fn visit(node: &Node, parent: Option<usize>, counter: &mut usize, out: &mut String) {
        let id = *counter;
        *counter += 1;
        let _ = writeln!(out, "    n{} [label=\"{}\"];", id, escape(&node.label()));
        if let Some(parent) = parent {
            let _ = writeln!(out, "    n{} -> n{};", parent, id);
        }
        for child in &node.children {
            visit(child, Some(id), counter, out);
        }
    }

    let mut out = String::from("digraph parse_tree {\n");
    out.push_str(
        "    node [shape=ellipse, style=filled, color=lightgrey, fontname=\"Arial\"];\n",
    );
    visit(root, None, &mut 0, &mut out);
    out.push_str("}\n");
    out
}

/// Pipes `dot` through the external `dot -Tsvg` tool and returns the SVG.
pub fn render_svg(dot: &str) -> io::Result<Vec<u8>> {
    let mut process = Command::new("dot")
        .arg("-Tsvg")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;
    process
        .stdin
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "dot has no stdin"))?
        .write_all(dot.as_bytes())?;
    let output = process.wait_with_output()?;
    if !output.status.success() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("dot exited with {}", output.status),
        ));
    }
    Ok(output.stdout)
}

/// Renders a DOT document to a kept temporary SVG file and opens it in the
/// default viewer. Returns the path of the SVG.
pub fn show_graphviz(dot: &str) -> io::Result<PathBuf> {
    let svg = render_svg(dot)?;
    let mut tempfile = Builder::new()
        .prefix("mc-parse-tree")
        .suffix(".svg")
        .tempfile()?;
    tempfile.write_all(&svg)?;
    tempfile.flush()?;
    let (_, path) = tempfile.keep().map_err(|e| e.error)?;
    opener::open(&path).map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    Ok(path)
}
