//! Syntax error detection over tree-sitter ERROR / MISSING nodes.

use tree_sitter::Node;

/// Count ERROR and MISSING nodes, returning the count and the
/// 1-based line of the first one (0 when there are none).
pub fn count_errors(root: Node) -> (u32, usize) {
    let mut count = 0u32;
    let mut first_line = None;
    collect_errors(root, &mut count, &mut first_line);
    (count, first_line.unwrap_or(0))
}

fn collect_errors(node: Node, count: &mut u32, first_line: &mut Option<usize>) {
    if node.is_error() || node.is_missing() {
        *count += 1;
        first_line.get_or_insert(node.start_position().row + 1);
    }
    if !node.has_error() {
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(child, count, first_line);
    }
}
