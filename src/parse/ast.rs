//! The parse tree. Labels are only built at the display boundary; the parser
//! works on [`NodeKind`].

use std::fmt;

use crate::scan::token::{TokenKind, TokenWithSpan};

/// Grammar rules that produce an inner node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Rule {
    #[strum(to_string = "Programa")]
    Program,
    #[strum(to_string = "Decls")]
    Decls,
    #[strum(to_string = "Decl")]
    Decl,
    #[strum(to_string = "Comandos")]
    Commands,
    #[strum(to_string = "Comando")]
    Command,
    #[strum(to_string = "Atribuicao")]
    Assignment,
    #[strum(to_string = "Condicional")]
    Conditional,
    #[strum(to_string = "ExpressaoLogica")]
    LogicalExpr,
    #[strum(to_string = "ExpressaoRelacional")]
    RelationalExpr,
    #[strum(to_string = "ExpressaoAritmetica")]
    ArithmeticExpr,
    #[strum(to_string = "Termo")]
    Term,
    /// A parenthesised factor.
    #[strum(to_string = "Group")]
    Group,
}

/// Binary operators. Logical ones display as their keyword kind, the rest as
/// their symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum BinOp {
    #[strum(to_string = "E")]
    And,
    #[strum(to_string = "OU")]
    Or,
    #[strum(to_string = "+")]
    Add,
    #[strum(to_string = "-")]
    Sub,
    #[strum(to_string = "*")]
    Mul,
    #[strum(to_string = "/")]
    Div,
    #[strum(to_string = ">")]
    Greater,
    #[strum(to_string = ">=")]
    GreaterEqual,
    #[strum(to_string = "<")]
    Less,
    #[strum(to_string = "<=")]
    LessEqual,
    #[strum(to_string = "==")]
    Equal,
    #[strum(to_string = "!=")]
    NotEqual,
}

impl BinOp {
    pub fn from_token(kind: TokenKind) -> Option<BinOp> {
        Some(match kind {
            TokenKind::E => BinOp::And,
            TokenKind::Ou => BinOp::Or,
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Mul => BinOp::Mul,
            TokenKind::Div => BinOp::Div,
            TokenKind::Greater => BinOp::Greater,
            TokenKind::GreaterEqual => BinOp::GreaterEqual,
            TokenKind::Less => BinOp::Less,
            TokenKind::LessEqual => BinOp::LessEqual,
            TokenKind::Equal => BinOp::Equal,
            TokenKind::NotEqual => BinOp::NotEqual,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Rule(Rule),
    /// A consumed token.
    Terminal(TokenWithSpan),
    /// An operator application; always has exactly two children.
    BinOp(BinOp),
}

/// A node of the parse tree. Children are owned and ordered left to right.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    pub fn rule(rule: Rule) -> Self {
        Self {
            kind: NodeKind::Rule(rule),
            children: Vec::new(),
        }
    }

    pub fn terminal(token: TokenWithSpan) -> Self {
        Self {
            kind: NodeKind::Terminal(token),
            children: Vec::new(),
        }
    }

    pub fn bin_op(op: BinOp, lhs: Node, rhs: Node) -> Self {
        Self {
            kind: NodeKind::BinOp(op),
            children: vec![lhs, rhs],
        }
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// The descriptive label, e.g. `Programa`, `IDENTIFIER(x)` or `+`.
    pub fn label(&self) -> String {
        match &self.kind {
            NodeKind::Rule(rule) => rule.to_string(),
            NodeKind::Terminal(token) => token.inner.to_string(),
            NodeKind::BinOp(op) => op.to_string(),
        }
    }

    pub fn is_rule(&self, rule: Rule) -> bool {
        matches!(self.kind, NodeKind::Rule(r) if r == rule)
    }

    pub fn is_bin_op(&self, op: BinOp) -> bool {
        matches!(self.kind, NodeKind::BinOp(o) if o == op)
    }

    /// Total number of nodes in this subtree.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Node::size).sum::<usize>()
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{}{}", "  ".repeat(depth), self.label())?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    /// One label per line, children indented under their parent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
