//! Depth-first traversal over syntax trees

use crate::location::NodePath;
use crate::node::SyntaxNode;

/// Walk the tree depth-first, parents before children. The callback
/// receives each node with its address. Return `true` to continue
/// traversal into the node's children, `false` to skip them.
pub fn walk<F>(root: &SyntaxNode, visit: &mut F)
where
    F: FnMut(&NodePath, &SyntaxNode) -> bool,
{
    walk_at(&NodePath::root(), root, visit);
}

fn walk_at<F>(path: &NodePath, node: &SyntaxNode, visit: &mut F)
where
    F: FnMut(&NodePath, &SyntaxNode) -> bool,
{
    if !visit(path, node) {
        return;
    }
    for (index, child) in node.children().iter().enumerate() {
        walk_at(&path.child(index), child, visit);
    }
}

/// First node, in depth-first order, satisfying the predicate.
pub fn find<'a, P>(root: &'a SyntaxNode, mut predicate: P) -> Option<(NodePath, &'a SyntaxNode)>
where
    P: FnMut(&SyntaxNode) -> bool,
{
    find_at(NodePath::root(), root, &mut predicate)
}

fn find_at<'a, P>(
    path: NodePath,
    node: &'a SyntaxNode,
    predicate: &mut P,
) -> Option<(NodePath, &'a SyntaxNode)>
where
    P: FnMut(&SyntaxNode) -> bool,
{
    if predicate(node) {
        return Some((path, node));
    }
    for (index, child) in node.children().iter().enumerate() {
        if let Some(found) = find_at(path.child(index), child, predicate) {
            return Some(found);
        }
    }
    None
}
