//! Pretty-printing for [Node], reusing this crate's existing `ptree`-based tree
//! printer (see `ASTNode::print` in the upstream parsing toolkit this crate grew
//! out of) so a grammar's IR can be inspected the same way a parsed AST can.
use std::borrow::Cow;

use ptree::{Style, TreeItem};

use super::Node;

impl TreeItem for Node {
    type Child = Node;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _: &Style) -> std::io::Result<()> {
        let label = match self {
            Node::Alternatives { .. } => "Alternatives".to_string(),
            Node::MultipartBody { .. } => "MultipartBody".to_string(),
            Node::ZeroOrMore { .. } => "ZeroOrMore".to_string(),
            Node::OneOrMore { .. } => "OneOrMore".to_string(),
            Node::ZeroOrOne { brackets, .. } => format!("ZeroOrOne(brackets={})", brackets),
            Node::RuleRef { name, .. } => format!("RuleRef({})", name),
            Node::TokenRef { name, .. } => format!("TokenRef({})", name),
            Node::TokenLit { literal, .. } => format!("TokenLit(\"{}\")", literal),
        };
        match self.binding() {
            Some(b) => write!(f, "{} [{}]", label, b),
            None => write!(f, "{}", label),
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        let children: Vec<Node> = match self {
            Node::Alternatives { nodes, .. } | Node::MultipartBody { nodes, .. } => {
                nodes.iter().map(|n| (**n).clone()).collect()
            }
            Node::ZeroOrMore { node, .. }
            | Node::OneOrMore { node, .. }
            | Node::ZeroOrOne { node, .. } => vec![(**node).clone()],
            Node::RuleRef { .. } | Node::TokenRef { .. } | Node::TokenLit { .. } => Vec::new(),
        };
        Cow::Owned(children)
    }
}

impl Node {
    /// Print this node and its descendants as an indented tree to stdout.
    pub fn print(&self) -> std::io::Result<()> {
        ptree::print_tree(self)
    }
}
