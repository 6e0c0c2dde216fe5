//! Canonical text rendering of syntax trees
//!
//! The notation is deliberately neutral: `visibility name;` for
//! properties, `Ns\Type::method(...)` for static calls, `/** @tag body */`
//! blocks for doc metadata. It exists for diagnostics and golden tests,
//! not for feeding back into a compiler.

use std::fmt::Write;

use crate::doc::DocMetadata;
use crate::node::{NodeCategory, NodeKind, SyntaxNode};

const INDENT: &str = "    ";

/// Render a node and everything under it. Statements and declarations
/// come back as newline-terminated lines; a bare expression comes back
/// as a single unterminated fragment.
pub fn render(node: &SyntaxNode) -> String {
    match node.category() {
        NodeCategory::Expression => render_expr(node),
        _ => {
            let mut out = String::new();
            render_item(node, 0, &mut out);
            out
        }
    }
}

fn render_item(node: &SyntaxNode, depth: usize, out: &mut String) {
    match node.kind() {
        NodeKind::Class { name } => {
            render_doc(node.doc(), depth, out);
            push_line(out, depth, &format!("class {name} {{"));
            for child in node.children() {
                render_item(child, depth + 1, out);
            }
            push_line(out, depth, "}");
        }
        NodeKind::Property { name, visibility } => {
            render_doc(node.doc(), depth, out);
            push_line(out, depth, &format!("{visibility} {name};"));
        }
        NodeKind::Method { name, visibility } => {
            render_doc(node.doc(), depth, out);
            push_line(out, depth, &format!("{visibility} {name}() {{"));
            for child in node.children() {
                render_item(child, depth + 1, out);
            }
            push_line(out, depth, "}");
        }
        NodeKind::ExpressionStmt => {
            let expr = node.child(0).map(render_expr).unwrap_or_default();
            push_line(out, depth, &format!("{expr};"));
        }
        NodeKind::Block => {
            push_line(out, depth, "{");
            for child in node.children() {
                render_item(child, depth + 1, out);
            }
            push_line(out, depth, "}");
        }
        _ => {
            push_line(out, depth, &format!("{};", render_expr(node)));
        }
    }
}

fn render_expr(node: &SyntaxNode) -> String {
    match node.kind() {
        NodeKind::Variable { name } => name.clone(),
        NodeKind::Literal { text } => text.clone(),
        NodeKind::PropertyFetch { property } => {
            let receiver = node.child(0).map(render_expr).unwrap_or_default();
            format!("{receiver}.{property}")
        }
        NodeKind::StaticCall { target, method } => {
            let args: Vec<String> = node.children().iter().map(render_expr).collect();
            format!("{target}::{method}({})", args.join(", "))
        }
        NodeKind::Assign => {
            let target = node.child(0).map(render_expr).unwrap_or_default();
            let value = node.child(1).map(render_expr).unwrap_or_default();
            format!("{target} = {value}")
        }
        _ => node.describe(),
    }
}

fn render_doc(doc: Option<&DocMetadata>, depth: usize, out: &mut String) {
    let Some(doc) = doc else {
        return;
    };
    if doc.is_empty() {
        return;
    }
    push_line(out, depth, "/**");
    for tag in doc.tags() {
        let mut lines = tag.body().lines();
        match lines.next() {
            None | Some("") => push_line(out, depth, &format!(" * @{}", tag.name())),
            Some(first) => push_line(out, depth, &format!(" * @{} {first}", tag.name())),
        }
        for continuation in lines {
            push_line(out, depth, &format!(" *   {continuation}"));
        }
    }
    push_line(out, depth, " */");
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    let _ = writeln!(out, "{line}");
}
