use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;

use super::location::Spanned;

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum TokenKind {
    // Types
    #[strum(to_string = "INT"       )]  Int,
    #[strum(to_string = "FLOAT"     )]  Float,

    // Program structure
    #[strum(to_string = "INICIO"    )]  Inicio,
    #[strum(to_string = "DECLS"     )]  Decls,
    #[strum(to_string = "FIMDECLS"  )]  FimDecls,
    #[strum(to_string = "CODIGO"    )]  Codigo,
    #[strum(to_string = "FIMPROG"   )]  FimProg,

    // Input and output
    #[strum(to_string = "LEIA"      )]  Leia,
    #[strum(to_string = "ESCREVA"   )]  Escreva,

    // Control flow
    #[strum(to_string = "SE"        )]  Se,
    #[strum(to_string = "ENTAO"     )]  Entao,
    #[strum(to_string = "BLOCO"     )]  Bloco,
    #[strum(to_string = "FIMBLOCO"  )]  FimBloco,

    // Logical operators
    #[strum(to_string = "E"         )]  E,
    #[strum(to_string = "OU"        )]  Ou,

    // Reserved, not used by any grammar rule
    #[strum(to_string = "PRINT"     )]  Print,
    #[strum(to_string = "WHILE"     )]  While,
    #[strum(to_string = "ELSE"      )]  Else,

    #[strum(to_string = "IDENTIFIER")]  Identifier,
    #[strum(to_string = "NUMBER"    )]  Number,

    // Arithmetic operators
    #[strum(to_string = "PLUS"      )]  Plus,
    #[strum(to_string = "MINUS"     )]  Minus,
    #[strum(to_string = "MUL"       )]  Mul,
    #[strum(to_string = "DIV"       )]  Div,

    // Symbols
    #[strum(to_string = "LPAREN"    )]  LParen,
    #[strum(to_string = "RPAREN"    )]  RParen,
    #[strum(to_string = "COLON"     )]  Colon,
    #[strum(to_string = "ASSIGN"    )]  Assign,

    // Comparison operators
    #[strum(to_string = "GT"        )]  Greater,
    #[strum(to_string = "GE"        )]  GreaterEqual,
    #[strum(to_string = "LT"        )]  Less,
    #[strum(to_string = "LE"        )]  LessEqual,
    #[strum(to_string = "EQ"        )]  Equal,
    #[strum(to_string = "NE"        )]  NotEqual,

    #[strum(to_string = "EOF"       )]  EndOfFile,
}

lazy_static! {
    /// Reserved words, keyed by their lowercase spelling.
    static ref RESERVED_WORDS: HashMap<&'static str, TokenKind> = HashMap::from([
        ("int", TokenKind::Int),
        ("float", TokenKind::Float),
        ("inicio", TokenKind::Inicio),
        ("decls", TokenKind::Decls),
        ("fimdecls", TokenKind::FimDecls),
        ("codigo", TokenKind::Codigo),
        ("fimprog", TokenKind::FimProg),
        ("leia", TokenKind::Leia),
        ("escreva", TokenKind::Escreva),
        ("se", TokenKind::Se),
        ("entao", TokenKind::Entao),
        ("bloco", TokenKind::Bloco),
        ("fimbloco", TokenKind::FimBloco),
        ("e", TokenKind::E),
        ("ou", TokenKind::Ou),
        ("print", TokenKind::Print),
        ("while", TokenKind::While),
        ("else", TokenKind::Else),
    ]);
}

/// Looks up a word in the reserved-word table, ignoring case.
pub fn reserved_word(word: &str) -> Option<TokenKind> {
    RESERVED_WORDS.get(word.to_ascii_lowercase().as_str()).copied()
}

/// A scanned token. Every token but the end marker carries its lexeme exactly
/// as it appeared in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            lexeme: Some(lexeme.into()),
        }
    }

    pub fn end_of_file() -> Self {
        Self {
            kind: TokenKind::EndOfFile,
            lexeme: None,
        }
    }

    pub fn lexeme(&self) -> Option<&str> {
        self.lexeme.as_deref()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lexeme {
            Some(lexeme) => write!(f, "{}({})", self.kind, lexeme),
            None => write!(f, "{}", self.kind),
        }
    }
}

pub type TokenWithSpan = Spanned<Token>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_words_ignore_case() {
        assert_eq!(reserved_word("FimProg"), Some(TokenKind::FimProg));
        assert_eq!(reserved_word("ENTAO"), Some(TokenKind::Entao));
        assert_eq!(reserved_word("while"), Some(TokenKind::While));
        assert_eq!(reserved_word("inicio_"), None);
    }

    #[test]
    fn token_display() {
        assert_eq!(Token::new(TokenKind::Number, "3.5").to_string(), "NUMBER(3.5)");
        assert_eq!(Token::end_of_file().to_string(), "EOF");
    }
}
