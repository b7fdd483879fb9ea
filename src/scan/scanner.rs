use std::rc::Rc;

use super::{
    error::{ScannerError, ScannerErrorKind},
    location::{Location, Source, Span},
    token::{reserved_word, Token, TokenKind, TokenWithSpan},
};

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

/// Hand-written scanner over the whole source. Stops at the first lexical
/// fault; never produces tokens after one.
pub struct Scanner {
    cur_char: Option<char>,
    cur_loc: Location,
    all_chars: Vec<char>,
}

impl Scanner {
    pub fn new(source: Rc<Source>) -> Self {
        let all_chars: Vec<char> = source.content.chars().collect();
        Scanner {
            cur_char: all_chars.first().cloned(),
            cur_loc: Location::start_of(source),
            all_chars,
        }
    }

    /// Moves past the current character, keeping line and column in sync.
    fn advance(&mut self) {
        if let Some('\n') = self.cur_char {
            self.cur_loc.line += 1;
            self.cur_loc.column = 1;
        } else {
            self.cur_loc.column += 1;
        }
        self.cur_loc.offset += 1;
        self.cur_char = self.all_chars.get(self.cur_loc.offset).cloned();
    }

    fn peek(&self) -> Option<char> {
        self.all_chars.get(self.cur_loc.offset + 1).cloned()
    }

    /// The first character at or after the cursor that is not blank. Comments
    /// are not skipped.
    fn peek_non_blank(&self) -> Option<char> {
        self.all_chars[self.cur_loc.offset.min(self.all_chars.len())..]
            .iter()
            .find(|c| !is_blank(**c))
            .cloned()
    }

    fn token_from(&self, start: Location, kind: TokenKind, lexeme: String) -> TokenWithSpan {
        TokenWithSpan {
            inner: Token::new(kind, lexeme),
            span: Span::new(start, self.cur_loc.clone()),
        }
    }

    fn error_here(&self, kind: ScannerErrorKind) -> ScannerError {
        ScannerError::new(kind, self.cur_loc.clone(), self.cur_char)
    }

    fn skip_blanks(&mut self) {
        while matches!(self.cur_char, Some(c) if is_blank(c)) {
            self.advance();
        }
    }

    fn skip_line_comment(&mut self) {
        while matches!(self.cur_char, Some(c) if c != '\n') {
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), ScannerError> {
        let start = self.cur_loc.clone();
        // Skip "/*"
        self.advance();
        self.advance();
        loop {
            match self.cur_char {
                None => {
                    return Err(ScannerError::new(
                        ScannerErrorKind::UnterminatedBlockComment,
                        start,
                        None,
                    )
                    .with_end_of_input(self.cur_loc.clone()))
                }
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    self.advance();
                    return Ok(());
                }
                Some(_) => self.advance(),
            }
        }
    }

    fn take_digits(&mut self, value: &mut String) {
        while let Some(c) = self.cur_char.filter(char::is_ascii_digit) {
            value.push(c);
            self.advance();
        }
    }

    fn next_number(&mut self) -> Result<TokenWithSpan, ScannerError> {
        let start = self.cur_loc.clone();
        let mut value = String::new();
        let leading_dot = self.cur_char == Some('.');
        self.take_digits(&mut value);
        if let Some('.') = self.cur_char {
            value.push('.');
            self.advance();
            if !matches!(self.cur_char, Some(c) if c.is_ascii_digit()) {
                return Err(ScannerError::new(
                    ScannerErrorKind::MissingFractionDigits,
                    start,
                    Some('.'),
                ));
            }
            self.take_digits(&mut value);
        }
        // A second point right after a leading-dot literal falls through to the
        // check below and is reported at the literal start.
        if let (Some('.'), false) = (self.cur_char, leading_dot) {
            return Err(self.error_here(ScannerErrorKind::MultipleDecimalPoints));
        }
        if let Some('.') = self.peek_non_blank() {
            return Err(ScannerError::new(
                ScannerErrorKind::DecimalPointAfterNumber,
                start,
                Some('.'),
            ));
        }
        Ok(self.token_from(start, TokenKind::Number, value))
    }

    fn next_keyword_or_ident(&mut self) -> TokenWithSpan {
        let start = self.cur_loc.clone();
        let mut word = String::new();
        while let Some(c) = self
            .cur_char
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        {
            word.push(c);
            self.advance();
        }
        let kind = reserved_word(&word).unwrap_or(TokenKind::Identifier);
        self.token_from(start, kind, word)
    }

    /// Relational operators and assignment, which need one character of
    /// lookahead.
    fn next_op(&mut self, c: char) -> Result<TokenWithSpan, ScannerError> {
        let start = self.cur_loc.clone();
        let followed_by_eq = self.peek() == Some('=');
        let kind = match (c, followed_by_eq) {
            ('>', true) => TokenKind::GreaterEqual,
            ('>', false) => TokenKind::Greater,
            ('<', true) => TokenKind::LessEqual,
            ('<', false) => TokenKind::Less,
            ('=', true) => TokenKind::Equal,
            ('=', false) => TokenKind::Assign,
            ('!', true) => TokenKind::NotEqual,
            ('!', false) => return Err(self.error_here(ScannerErrorKind::BareExclamation)),
            _ => return Err(self.error_here(ScannerErrorKind::InvalidCharacter)),
        };
        let mut lexeme = String::from(c);
        self.advance();
        if followed_by_eq {
            lexeme.push('=');
            self.advance();
        }
        Ok(self.token_from(start, kind, lexeme))
    }

    fn next_single_char(&mut self, c: char) -> Result<TokenWithSpan, ScannerError> {
        let start = self.cur_loc.clone();
        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Mul,
            '/' => TokenKind::Div,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ':' => TokenKind::Colon,
            _ => return Err(self.error_here(ScannerErrorKind::InvalidCharacter)),
        };
        self.advance();
        Ok(self.token_from(start, kind, c.to_string()))
    }

    /// Scans the next token, skipping blanks and comments. Returns the end
    /// marker once the input is exhausted.
    pub fn next(&mut self) -> Result<TokenWithSpan, ScannerError> {
        loop {
            let c = match self.cur_char {
                None => {
                    return Ok(TokenWithSpan {
                        inner: Token::end_of_file(),
                        span: Span::new(self.cur_loc.clone(), self.cur_loc.clone()),
                    })
                }
                Some(c) => c,
            };
            match c {
                c if is_blank(c) => self.skip_blanks(),
                '#' => self.skip_line_comment(),
                '/' if self.peek() == Some('*') => self.skip_block_comment()?,
                '+' | '-' | '*' | '/' | '(' | ')' | ':' => return self.next_single_char(c),
                '>' | '<' | '=' | '!' => return self.next_op(c),
                c if c.is_ascii_digit() || c == '.' => return self.next_number(),
                c if c.is_ascii_alphabetic() || c == '_' => return Ok(self.next_keyword_or_ident()),
                _ => return Err(self.error_here(ScannerErrorKind::InvalidCharacter)),
            }
        }
    }

    /// Scans the whole input. The returned sequence always ends with exactly
    /// one end marker.
    pub fn tokenize(mut self) -> Result<Vec<TokenWithSpan>, ScannerError> {
        let mut tokens = vec![];
        loop {
            let tok = self.next()?;
            let eof = tok.inner.kind == TokenKind::EndOfFile;
            tokens.push(tok);
            if eof {
                return Ok(tokens);
            }
        }
    }
}
