use std::fmt::Display;
use std::iter::Peekable;
use std::str::Chars;

use itertools::{Itertools, PeekingNext};

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum TokenType {
    EndOfFile,
    Arrow,
    Star,
    Hash,
    Id,
    Error
}

impl Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenType::EndOfFile => "END_OF_FILE",
            TokenType::Arrow => "ARROW",
            TokenType::Star => "STAR",
            TokenType::Hash => "HASH",
            TokenType::Id => "ID",
            TokenType::Error => "ERROR",
        };
        write!(f, "{}", name)
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct Token {
    pub kind: TokenType,
    pub lexeme: String,
    pub line: usize
}

impl Token {
    fn new(kind: TokenType, lexeme: impl Into<String>, line: usize) -> Self {
        Token { kind, lexeme: lexeme.into(), line }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{} , {} , {}}}", self.lexeme, self.kind, self.line)
    }
}

// C `isspace` in the default locale
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn skip_space(chars: &mut Peekable<Chars>, line: &mut usize) {
    while let Some(c) = chars.peeking_next(|&c| is_space(c)) {
        if c == '\n' {
            *line += 1;
        }
    }
}

fn lex_id(chars: &mut Peekable<Chars>, line: usize) -> Token {
    let lexeme: String = chars.peeking_take_while(|c| c.is_ascii_alphanumeric()).collect();
    Token::new(TokenType::Id, lexeme, line)
}

// Scans one token, or None once the input is exhausted
fn lex_token(chars: &mut Peekable<Chars>, line: &mut usize) -> Option<Token> {
    skip_space(chars, line);

    let c = *chars.peek()?;
    if c.is_ascii_alphabetic() {
        return Some(lex_id(chars, *line));
    }

    chars.next();
    let kind = match c {
        // A lone `-` is an error and whatever follows it is scanned again
        '-' if chars.peeking_next(|&c| c == '>').is_some() => TokenType::Arrow,
        '#' => TokenType::Hash,
        '*' => TokenType::Star,
        _ => TokenType::Error,
    };

    Some(Token::new(kind, "", *line))
}

fn lex(text: &str) -> (Vec<Token>, usize) {
    let mut chars = text.chars().peekable();
    let mut line = 1;
    let mut tokens = Vec::new();

    while let Some(token) = lex_token(&mut chars, &mut line) {
        tokens.push(token);
    }

    (tokens, line)
}

// Token stream with arbitrary lookahead. The input is tokenized up front
pub struct Lexer {
    tokens: Vec<Token>,
    index: usize,
    end: Token
}

impl Lexer {
    pub fn new(text: &str) -> Self {
        let (tokens, last_line) = lex(text);
        Lexer {
            tokens,
            index: 0,
            end: Token::new(TokenType::EndOfFile, "", last_line)
        }
    }

    pub fn next_token(&mut self) -> Token {
        match self.tokens.get(self.index) {
            Some(token) => {
                self.index += 1;
                token.clone()
            }
            None => self.end.clone()
        }
    }

    // `how_far` counts from 1, the next token to be returned
    pub fn peek(&self, how_far: usize) -> &Token {
        debug_assert!(how_far > 0, "peek distance must be positive");
        self.tokens
            .get(self.index + how_far - 1)
            .unwrap_or(&self.end)
    }
}
