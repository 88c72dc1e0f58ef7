//! The grammar intermediate representation: a typed tree of EBNF constructs.
//!
//! [Node] is the sum type described in the data model: sequence, alternation,
//! optional, repetition, terminal/non-terminal reference, and literal. Children
//! are held behind [Rc] rather than [Box] so that the [processor](crate::processor)
//! can treat "unchanged" as a cheap pointer-identity check and return a subtree by
//! bumping a refcount instead of deep-cloning it.
mod builder;
mod print;
pub mod raw;

use std::rc::Rc;

pub use builder::build_grammar;

/// One node of a grammar rule's body.
///
/// Every variant carries an optional `binding` (a user-named position in the
/// eventual result tree) uniformly, rather than on a subset of variants — this
/// lets callers treat `binding()` as a total accessor instead of a fallible probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Ordered choice, tried left to right. Always has at least two children;
    /// a single alternative is hoisted in its place instead of being wrapped.
    Alternatives {
        binding: Option<String>,
        nodes: Vec<Rc<Node>>,
    },
    /// Concatenation; every child must match in order. Always has at least two
    /// children, for the same reason as [Node::Alternatives].
    MultipartBody {
        binding: Option<String>,
        nodes: Vec<Rc<Node>>,
    },
    /// Kleene star.
    ZeroOrMore {
        binding: Option<String>,
        node: Rc<Node>,
    },
    /// Kleene plus.
    OneOrMore {
        binding: Option<String>,
        node: Rc<Node>,
    },
    /// Optional. `brackets` records whether the surface syntax used `[ ... ]`
    /// (true) or a trailing `?` (false); it affects only comment rendering.
    ZeroOrOne {
        binding: Option<String>,
        node: Rc<Node>,
        brackets: bool,
    },
    /// Reference to another parse rule.
    RuleRef {
        binding: Option<String>,
        name: String,
    },
    /// Reference to a named terminal. `replaced_lit` remembers the literal text
    /// that the processor bound to this terminal, purely for comment rendering.
    TokenRef {
        binding: Option<String>,
        name: String,
        replaced_lit: Option<String>,
    },
    /// A bare string literal, stored without surrounding quotes. No `TokenLit`
    /// may reach the generator: the processor must replace every one with the
    /// `TokenRef` it resolves to, or record an [UnresolvedLiteral](crate::error::IrError::UnresolvedLiteral) error.
    TokenLit {
        binding: Option<String>,
        literal: String,
    },
}

impl Node {
    /// The binding attached to this node, if any.
    pub fn binding(&self) -> Option<&str> {
        match self {
            Node::Alternatives { binding, .. }
            | Node::MultipartBody { binding, .. }
            | Node::ZeroOrMore { binding, .. }
            | Node::OneOrMore { binding, .. }
            | Node::ZeroOrOne { binding, .. }
            | Node::RuleRef { binding, .. }
            | Node::TokenRef { binding, .. }
            | Node::TokenLit { binding, .. } => binding.as_deref(),
        }
    }

    /// Re-attach (or clear) this node's binding, leaving everything else as-is.
    pub fn with_binding(self, binding: Option<String>) -> Node {
        match self {
            Node::Alternatives { nodes, .. } => Node::Alternatives { binding, nodes },
            Node::MultipartBody { nodes, .. } => Node::MultipartBody { binding, nodes },
            Node::ZeroOrMore { node, .. } => Node::ZeroOrMore { binding, node },
            Node::OneOrMore { node, .. } => Node::OneOrMore { binding, node },
            Node::ZeroOrOne { node, brackets, .. } => Node::ZeroOrOne {
                binding,
                node,
                brackets,
            },
            Node::RuleRef { name, .. } => Node::RuleRef { binding, name },
            Node::TokenRef {
                name, replaced_lit, ..
            } => Node::TokenRef {
                binding,
                name,
                replaced_lit,
            },
            Node::TokenLit { literal, .. } => Node::TokenLit { binding, literal },
        }
    }

    /// Build an `Alternatives` node from a list of alternatives, hoisting the
    /// sole child in place when there is only one (invariant 4).
    pub fn alternatives(nodes: Vec<Rc<Node>>) -> Rc<Node> {
        Self::hoist_or_wrap(nodes, |nodes| Node::Alternatives {
            binding: None,
            nodes,
        })
    }

    /// Build a `MultipartBody` node from a list of parts, hoisting the sole
    /// child in place when there is only one (invariant 4).
    pub fn multipart(nodes: Vec<Rc<Node>>) -> Rc<Node> {
        Self::hoist_or_wrap(nodes, |nodes| Node::MultipartBody {
            binding: None,
            nodes,
        })
    }

    fn hoist_or_wrap(
        mut nodes: Vec<Rc<Node>>,
        wrap: impl FnOnce(Vec<Rc<Node>>) -> Node,
    ) -> Rc<Node> {
        if nodes.len() == 1 {
            nodes.pop().expect("checked len == 1 above")
        } else {
            Rc::new(wrap(nodes))
        }
    }

    /// The surface-form rendering of this node, used verbatim in generated
    /// comments. A total function: every node kind renders to a finite string.
    pub fn comment(&self) -> String {
        match self {
            Node::Alternatives { nodes, .. } => nodes
                .iter()
                .map(|n| n.comment())
                .collect::<Vec<_>>()
                .join(" | "),
            Node::MultipartBody { nodes, .. } => nodes
                .iter()
                .map(|n| match n.as_ref() {
                    Node::Alternatives { .. } => format!("({})", n.comment()),
                    _ => n.comment(),
                })
                .collect::<Vec<_>>()
                .join(" "),
            Node::ZeroOrMore { node, .. } => Self::suffixed(node, "*"),
            Node::OneOrMore { node, .. } => Self::suffixed(node, "+"),
            Node::ZeroOrOne {
                node, brackets, ..
            } => {
                if *brackets {
                    format!("[{}]", node.comment())
                } else {
                    Self::suffixed(node, "?")
                }
            }
            Node::RuleRef { name, .. } => name.clone(),
            Node::TokenRef {
                name, replaced_lit, ..
            } => match replaced_lit {
                Some(lit) => format!("\"{}\"", lit),
                None => name.clone(),
            },
            Node::TokenLit { literal, .. } => format!("\"{}\"", literal),
        }
    }

    fn suffixed(node: &Node, suffix: &str) -> String {
        match node {
            Node::Alternatives { .. } | Node::MultipartBody { .. } => {
                format!("({}){}", node.comment(), suffix)
            }
            _ => format!("{}{}", node.comment(), suffix),
        }
    }
}

/// A single parse rule: a name and the node tree of its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub body: Rc<Node>,
}

impl Rule {
    pub fn comment(&self) -> String {
        format!("{}: {}", self.name, self.body.comment())
    }
}

/// Binds a literal to a terminal name (`TOKEN_NAME: TOKEN_LIT`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRule {
    pub name: String,
    pub literal: String,
}

impl TokenRule {
    pub fn comment(&self) -> String {
        format!("{}: \"{}\"", self.name, self.literal)
    }
}

/// A whole grammar: its parse rules and its token rules, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grammar {
    pub rules: Vec<Rule>,
    pub token_rules: Vec<TokenRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(name: &str) -> Rc<Node> {
        Rc::new(Node::TokenRef {
            binding: None,
            name: name.to_string(),
            replaced_lit: None,
        })
    }

    fn rule_ref(name: &str) -> Rc<Node> {
        Rc::new(Node::RuleRef {
            binding: None,
            name: name.to_string(),
        })
    }

    #[test]
    fn single_alternative_is_hoisted() {
        let single = Node::alternatives(vec![tok("STRING")]);
        assert!(matches!(single.as_ref(), Node::TokenRef { .. }));
    }

    #[test]
    fn single_part_multipart_is_hoisted() {
        let single = Node::multipart(vec![rule_ref("value")]);
        assert!(matches!(single.as_ref(), Node::RuleRef { .. }));
    }

    #[test]
    fn multipart_joins_alternatives_children_with_parens() {
        let alt = Node::alternatives(vec![tok("TRUE"), tok("FALSE")]);
        let body = Node::multipart(vec![rule_ref("key"), alt]);
        assert_eq!(body.comment(), "key (TRUE | FALSE)");
    }

    #[test]
    fn zero_or_one_brackets_render_as_brackets() {
        let opt = Node::ZeroOrOne {
            binding: None,
            node: rule_ref("value"),
            brackets: true,
        };
        assert_eq!(opt.comment(), "[value]");
    }

    #[test]
    fn zero_or_one_suffix_renders_as_question_mark() {
        let opt = Node::ZeroOrOne {
            binding: None,
            node: rule_ref("value"),
            brackets: false,
        };
        assert_eq!(opt.comment(), "value?");
    }

    #[test]
    fn repetition_suffix_parenthesizes_containers_not_atoms() {
        let star_atom = Node::ZeroOrMore {
            binding: None,
            node: tok("COMMA"),
        };
        assert_eq!(star_atom.comment(), "COMMA*");

        let inner = Node::multipart(vec![tok("COMMA"), rule_ref("value")]);
        let star_container = Node::ZeroOrMore {
            binding: None,
            node: inner,
        };
        assert_eq!(star_container.comment(), "(COMMA value)*");
    }

    #[test]
    fn token_ref_comment_prefers_replaced_literal() {
        let t = Node::TokenRef {
            binding: None,
            name: "COLON".to_string(),
            replaced_lit: Some(":".to_string()),
        };
        assert_eq!(t.comment(), "\":\"");
    }
}
