use std::rc::Rc;

use crate::scan::{
    location::{Location, Source, Span},
    token::{Token, TokenKind, TokenWithSpan},
};

use super::{
    ast::{BinOp, Node, Rule},
    error::{ParserError, ParserErrorKind},
};

/// Recursive-descent parser with one token of lookahead. Never backtracks.
pub struct Parser {
    /// The token stream to parse.
    tokens: Vec<TokenWithSpan>,
    /// The current position in the token stream.
    pos: usize,
}

macro_rules! unexpected {
    ($tws:expr, $($k:expr),+) => {
        return Err(ParserError::new(ParserErrorKind::UnexpectedToken {
            expecting: vec![$($k),+],
            found: $tws.clone(),
        }))
    };
}

impl Parser {
    pub fn new(mut tokens: Vec<TokenWithSpan>) -> Self {
        // Make sure the stream ends with an end marker so lookahead never runs dry.
        let end = match tokens.last() {
            Some(tok) if tok.inner.kind == TokenKind::EndOfFile => None,
            Some(tok) => Some(tok.span.end.clone()),
            None => Some(Location::start_of(Rc::new(Source::new("<empty>", "")))),
        };
        if let Some(end) = end {
            tokens.push(TokenWithSpan {
                inner: Token::end_of_file(),
                span: Span::new(end.clone(), end),
            });
        }
        Self { tokens, pos: 0 }
    }

    pub fn advance(&mut self) {
        self.pos = (self.pos + 1).min(self.tokens.len() - 1);
    }

    pub fn lookahead(&self, by: usize) -> &TokenWithSpan {
        &self.tokens[(self.pos + by).min(self.tokens.len() - 1)]
    }

    pub fn current(&self) -> &TokenWithSpan {
        self.lookahead(0)
    }

    fn current_kind(&self) -> TokenKind {
        self.current().inner.kind
    }

    /// Consumes the current token if it has the expected kind and returns it
    /// as a leaf.
    pub fn eat(&mut self, kind: TokenKind) -> Result<Node, ParserError> {
        let tok = self.current();
        if tok.inner.kind != kind {
            unexpected!(tok, kind);
        }
        let leaf = Node::terminal(tok.clone());
        self.advance();
        Ok(leaf)
    }

    /// Runs `f`, recording `rule` as an enclosing context of any error it returns.
    fn in_context<T>(
        &mut self,
        rule: Rule,
        f: impl FnOnce(&mut Self) -> Result<T, ParserError>,
    ) -> Result<T, ParserError> {
        f(self).map_err(|mut e| {
            e.contexts.push(rule);
            e
        })
    }

    /// `programa := INICIO DECLS decls FIMDECLS CODIGO comandos FIMPROG`, followed
    /// by the end of input.
    pub fn parse_program(&mut self) -> Result<Node, ParserError> {
        self.in_context(Rule::Program, |p| {
            let mut root = Node::rule(Rule::Program);
            root.push(p.eat(TokenKind::Inicio)?);
            root.push(p.eat(TokenKind::Decls)?);
            root.push(p.parse_decls()?);
            root.push(p.eat(TokenKind::FimDecls)?);
            root.push(p.eat(TokenKind::Codigo)?);
            root.push(p.parse_commands()?);
            root.push(p.eat(TokenKind::FimProg)?);
            if p.current_kind() != TokenKind::EndOfFile {
                unexpected!(p.current(), TokenKind::EndOfFile);
            }
            Ok(root)
        })
    }

    pub fn parse_decls(&mut self) -> Result<Node, ParserError> {
        self.in_context(Rule::Decls, |p| {
            let mut node = Node::rule(Rule::Decls);
            while !matches!(
                p.current_kind(),
                TokenKind::FimDecls | TokenKind::EndOfFile
            ) {
                let is_decl = p.current_kind() == TokenKind::Identifier
                    && p.lookahead(1).inner.kind == TokenKind::Colon;
                if !is_decl {
                    return Err(ParserError::new(ParserErrorKind::InvalidDeclaration(
                        p.current().clone(),
                    )));
                }
                node.push(p.parse_decl()?);
            }
            Ok(node)
        })
    }

    fn parse_decl(&mut self) -> Result<Node, ParserError> {
        self.in_context(Rule::Decl, |p| {
            let mut node = Node::rule(Rule::Decl);
            node.push(p.eat(TokenKind::Identifier)?);
            node.push(p.eat(TokenKind::Colon)?);
            match p.current_kind() {
                kind @ (TokenKind::Int | TokenKind::Float) => node.push(p.eat(kind)?),
                _ => unexpected!(p.current(), TokenKind::Int, TokenKind::Float),
            }
            Ok(node)
        })
    }

    /// Zero or more commands, up to the end of a block, of the declarations,
    /// of the program or of the input.
    pub fn parse_commands(&mut self) -> Result<Node, ParserError> {
        self.in_context(Rule::Commands, |p| {
            let mut node = Node::rule(Rule::Commands);
            while !matches!(
                p.current_kind(),
                TokenKind::FimProg | TokenKind::FimBloco | TokenKind::FimDecls | TokenKind::EndOfFile
            ) {
                node.push(p.parse_command()?);
            }
            Ok(node)
        })
    }

    fn parse_command(&mut self) -> Result<Node, ParserError> {
        self.in_context(Rule::Command, |p| {
            let mut node = Node::rule(Rule::Command);
            match p.current_kind() {
                TokenKind::Leia => {
                    node.push(p.eat(TokenKind::Leia)?);
                    node.push(p.eat(TokenKind::Identifier)?);
                }
                TokenKind::Escreva => {
                    node.push(p.eat(TokenKind::Escreva)?);
                    node.push(p.eat(TokenKind::LParen)?);
                    match p.current_kind() {
                        kind @ (TokenKind::Identifier | TokenKind::Number) => {
                            node.push(p.eat(kind)?)
                        }
                        _ => unexpected!(p.current(), TokenKind::Identifier, TokenKind::Number),
                    }
                    node.push(p.eat(TokenKind::RParen)?);
                }
                TokenKind::Se => node.push(p.parse_conditional()?),
                TokenKind::Identifier => {
                    let next = p.lookahead(1).inner.kind;
                    if next != TokenKind::Assign {
                        return Err(ParserError::new(ParserErrorKind::AssignmentExpected {
                            found: p.current().clone(),
                            next,
                        }));
                    }
                    node.push(p.parse_assignment()?);
                }
                _ => {
                    return Err(ParserError::new(ParserErrorKind::InvalidCommand(
                        p.current().clone(),
                    )))
                }
            }
            Ok(node)
        })
    }

    fn parse_assignment(&mut self) -> Result<Node, ParserError> {
        self.in_context(Rule::Assignment, |p| {
            let mut node = Node::rule(Rule::Assignment);
            node.push(p.eat(TokenKind::Identifier)?);
            node.push(p.eat(TokenKind::Assign)?);
            node.push(p.parse_logical_expr()?);
            Ok(node)
        })
    }

    /// `condicional := SE expressao_logica ENTAO BLOCO comandos FIMBLOCO`
    fn parse_conditional(&mut self) -> Result<Node, ParserError> {
        self.in_context(Rule::Conditional, |p| {
            let mut node = Node::rule(Rule::Conditional);
            node.push(p.eat(TokenKind::Se)?);
            node.push(p.parse_logical_expr()?);
            node.push(p.eat(TokenKind::Entao)?);
            node.push(p.eat(TokenKind::Bloco)?);
            node.push(p.parse_commands()?);
            node.push(p.eat(TokenKind::FimBloco)?);
            Ok(node)
        })
    }

    /// The operator the current token stands for, if it is one of `ops`.
    fn current_op(&self, ops: &[BinOp]) -> Option<BinOp> {
        BinOp::from_token(self.current_kind()).filter(|op| ops.contains(op))
    }

    /// Parses `operand (op operand)*` into a left-associative tree of operator
    /// nodes wrapped in a `rule` node. With `chain` unset at most one operator
    /// is consumed.
    fn parse_binary(
        &mut self,
        rule: Rule,
        ops: &[BinOp],
        chain: bool,
        operand: fn(&mut Self) -> Result<Node, ParserError>,
    ) -> Result<Node, ParserError> {
        let mut acc = operand(self)?;
        while let Some(op) = self.current_op(ops) {
            self.advance();
            let rhs = operand(self)?;
            acc = Node::bin_op(op, acc, rhs);
            if !chain {
                break;
            }
        }
        Ok(Node::rule(rule).with_child(acc))
    }

    /// `expressao_logica := expressao_relacional ((E|OU) expressao_relacional)*`
    pub fn parse_logical_expr(&mut self) -> Result<Node, ParserError> {
        self.in_context(Rule::LogicalExpr, |p| {
            p.parse_binary(
                Rule::LogicalExpr,
                &[BinOp::And, BinOp::Or],
                true,
                Self::parse_relational_expr,
            )
        })
    }

    /// `expressao_relacional := expressao_aritmetica (relop expressao_aritmetica)?`
    fn parse_relational_expr(&mut self) -> Result<Node, ParserError> {
        self.parse_binary(
            Rule::RelationalExpr,
            &[
                BinOp::Greater,
                BinOp::GreaterEqual,
                BinOp::Less,
                BinOp::LessEqual,
                BinOp::Equal,
                BinOp::NotEqual,
            ],
            false,
            Self::parse_arithmetic_expr,
        )
    }

    fn parse_arithmetic_expr(&mut self) -> Result<Node, ParserError> {
        self.parse_binary(
            Rule::ArithmeticExpr,
            &[BinOp::Add, BinOp::Sub],
            true,
            Self::parse_term,
        )
    }

    fn parse_term(&mut self) -> Result<Node, ParserError> {
        self.parse_binary(
            Rule::Term,
            &[BinOp::Mul, BinOp::Div],
            true,
            Self::parse_factor,
        )
    }

    /// `fator := NUMBER | IDENTIFIER | '(' expressao_logica ')'`
    fn parse_factor(&mut self) -> Result<Node, ParserError> {
        match self.current_kind() {
            kind @ (TokenKind::Number | TokenKind::Identifier) => self.eat(kind),
            TokenKind::LParen => self.in_context(Rule::Group, |p| {
                let mut node = Node::rule(Rule::Group);
                node.push(p.eat(TokenKind::LParen)?);
                node.push(p.parse_logical_expr()?);
                node.push(p.eat(TokenKind::RParen)?);
                Ok(node)
            }),
            _ => Err(ParserError::new(ParserErrorKind::UnexpectedFactor(
                self.current().clone(),
            ))),
        }
    }
}
