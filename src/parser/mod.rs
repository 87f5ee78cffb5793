/*
    This module builds a grammar from the `ID -> ID* *` ... `#` notation
*/

mod lexer;

use std::fmt::Display;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::grammar::*;
use crate::error_handling::*;
use lexer::*;

pub use lexer::{Token, TokenType};

#[derive(Debug)]
pub enum CompileErrorType {
    // The next token was not the one the grammar requires here
    UnexpectedToken { expected: TokenType, found: Token },
    // There was an issue with reading the input
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            (
                CompileErrorType::UnexpectedToken { expected: a, found: x },
                CompileErrorType::UnexpectedToken { expected: b, found: y }
            ) => a == b && x == y,
            _ => false,
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::UnexpectedToken { expected, found } if found.kind == TokenType::Error =>
                write!(f, "Expected {} but found an unrecognized character", expected),
            CompileErrorType::UnexpectedToken { expected, found } =>
                write!(f, "Expected {} but found {}", expected, found),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type Result<T> = std::result::Result<T, CompileError>;

fn io_error(error: std::io::Error, source: PathBuf) -> CompileError {
    CompileError {
        location: Location {
            source,
            line: 0
        },
        error: CompileErrorType::FileError(error)
    }
}

// Predictive parser over the token stream. Classification of every symbol
// happens as its ID is consumed.
struct GrammarBuilder {
    lexer: Lexer,
    source: PathBuf,
    rules: Vec<Rule>,
    symbols: SymbolTable
}

impl GrammarBuilder {
    fn new(text: &str, source: PathBuf) -> Self {
        GrammarBuilder {
            lexer: Lexer::new(text),
            source,
            rules: Vec::new(),
            symbols: SymbolTable::new()
        }
    }

    fn expect(&mut self, expected: TokenType) -> Result<Token> {
        let token = self.lexer.next_token();
        if token.kind == expected {
            return Ok(token);
        }

        Err(CompileError {
            location: Location {
                source: self.source.clone(),
                line: token.line
            },
            error: CompileErrorType::UnexpectedToken { expected, found: token }
        })
    }

    fn lookahead(&self) -> TokenType {
        self.lexer.peek(1).kind
    }

    // input ::= Grammar END_OF_FILE
    fn parse_input(mut self) -> Result<Grammar> {
        self.parse_grammar()?;
        self.expect(TokenType::EndOfFile)?;

        Ok(Grammar::new(self.rules, self.symbols))
    }

    // Grammar ::= Rule-list HASH
    fn parse_grammar(&mut self) -> Result<()> {
        self.parse_rule_list()?;
        self.expect(TokenType::Hash)?;
        Ok(())
    }

    // Rule-list ::= Rule Rule-list | Rule
    fn parse_rule_list(&mut self) -> Result<()> {
        loop {
            self.parse_rule()?;
            if self.lookahead() == TokenType::Hash {
                return Ok(());
            }
        }
    }

    // Rule ::= ID ARROW Right-hand-side STAR
    fn parse_rule(&mut self) -> Result<()> {
        let left = self.expect(TokenType::Id)?;
        self.symbols.record_left(&left.lexeme);
        self.rules.push(Rule {
            left: left.lexeme,
            right: Vec::new()
        });

        self.expect(TokenType::Arrow)?;
        self.parse_right_hand_side()?;
        self.expect(TokenType::Star)?;
        Ok(())
    }

    // Right-hand-side ::= Id-list | epsilon
    fn parse_right_hand_side(&mut self) -> Result<()> {
        if self.lookahead() == TokenType::Star {
            return Ok(());
        }
        self.parse_id_list()
    }

    // Id-list ::= ID Id-list | ID
    fn parse_id_list(&mut self) -> Result<()> {
        loop {
            let id = self.expect(TokenType::Id)?;
            self.symbols.record_right(&id.lexeme);

            // parse_rule pushed the rule being read
            if let Some(rule) = self.rules.last_mut() {
                rule.right.push(id.lexeme);
            }

            if self.lookahead() == TokenType::Star {
                return Ok(());
            }
        }
    }
}

pub fn parse_str(text: &str, source: impl Into<PathBuf>) -> Result<Grammar> {
    GrammarBuilder::new(text, source.into()).parse_input()
}

// Bytes that are not UTF-8 become U+FFFD and lex as unrecognized characters
pub fn parse_reader(mut reader: impl Read, source: impl Into<PathBuf>) -> Result<Grammar> {
    let source = source.into();
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error(e, source.clone()))?;

    parse_str(&String::from_utf8_lossy(&bytes), source)
}

pub fn parse_file(path: &Path) -> Result<Grammar> {
    let file = File::open(path).map_err(|e| io_error(e, path.to_path_buf()))?;
    parse_reader(file, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Result<Grammar> {
        parse_str(text, "test")
    }

    fn unexpected(expected: TokenType, found: TokenType, line: usize) -> CompileErrorType {
        let lexeme = match found {
            TokenType::Id => "x",
            _ => "",
        };
        CompileErrorType::UnexpectedToken {
            expected,
            found: Token { kind: found, lexeme: lexeme.to_string(), line }
        }
    }

    #[test]
    fn parse_normal_grammar() {
        let grammar = parse("S -> A B *\nA -> a *\nA -> *\nB -> b *\n#").unwrap();

        assert_eq!(grammar.rules(), &[
            Rule::new("S", &["A", "B"]),
            Rule::new("A", &["a"]),
            Rule::new("A", &[]),
            Rule::new("B", &["b"])
        ]);
        assert_eq!(grammar.terminals().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(grammar.nonterminals().collect::<Vec<_>>(), vec!["S", "A", "B"]);
        assert_eq!(grammar.start_symbol(), "S");
    }

    #[test]
    fn parse_reclassifies_terminals() {
        let grammar = parse("A -> B * B -> a * #").unwrap();

        assert_eq!(grammar.class_of("B"), Some(SymbolClass::Nonterminal));
        assert_eq!(grammar.terminals().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(grammar.symbols().map(|(s, _)| s).collect::<Vec<_>>(), vec!["A", "B", "a"]);
    }

    #[test]
    fn parse_matches_from_rules() {
        let text = "E -> T X * X -> plus T X * X -> * T -> id * #";
        let parsed = parse(text).unwrap();
        let rebuilt = Grammar::from_rules(parsed.rules().to_vec()).unwrap();
        assert_eq!(parsed, rebuilt);
    }

    #[test]
    fn parse_long_grammar() {
        let mut text = String::new();
        for i in 0..20_000 {
            text.push_str(&format!("N{} -> N{} t *\n", i, i + 1));
        }
        text.push_str("N20000 -> *\n#");

        let grammar = parse(&text).unwrap();
        assert_eq!(grammar.rules().len(), 20_001);
        assert_eq!(grammar.terminals().collect::<Vec<_>>(), vec!["t"]);
    }

    #[test]
    fn parse_malformed_grammar() {
        // Missing `*`, the id-list wants another ID
        assert_eq!(parse("S -> a #").unwrap_err().error, unexpected(TokenType::Id, TokenType::Hash, 1));
        assert_eq!(parse("S -> #").unwrap_err().error, unexpected(TokenType::Id, TokenType::Hash, 1));

        // Missing `#`, the rule-list wants another rule
        assert_eq!(parse("S -> a *").unwrap_err().error, unexpected(TokenType::Id, TokenType::EndOfFile, 1));

        // Missing arrow
        assert_eq!(parse("S x * #").unwrap_err().error, unexpected(TokenType::Arrow, TokenType::Id, 1));

        // No rules at all
        assert_eq!(parse("#").unwrap_err().error, unexpected(TokenType::Id, TokenType::Hash, 1));
        assert_eq!(parse("").unwrap_err().error, unexpected(TokenType::Id, TokenType::EndOfFile, 1));

        // Unrecognized character inside a right-hand side
        assert_eq!(parse("S -> a ; *\n#").unwrap_err().error, unexpected(TokenType::Id, TokenType::Error, 1));
    }

    #[test]
    fn parse_rejects_trailing_content() {
        let error = parse("S -> a *\n#\nx").unwrap_err();
        assert_eq!(error.error, unexpected(TokenType::EndOfFile, TokenType::Id, 3));
        assert_eq!(error.location, Location { source: PathBuf::from("test"), line: 3 });
    }

    #[test]
    fn parse_missing_file() {
        let error = parse_file(Path::new("does/not/exist.txt")).unwrap_err();
        assert_eq!(error.error, CompileErrorType::FileError(std::io::ErrorKind::NotFound.into()));
    }

    #[test]
    fn parse_from_reader() {
        let grammar = parse_reader("S -> * #".as_bytes(), "reader").unwrap();
        assert_eq!(grammar.rules(), &[Rule::new("S", &[])]);
    }

    #[test]
    fn parse_invalid_utf8_is_syntax_error() {
        let error = parse_reader(&b"S -> a \xff *\n#\n"[..], "reader").unwrap_err();
        assert_eq!(error.error, unexpected(TokenType::Id, TokenType::Error, 1));
    }

    #[test]
    fn parse_keeps_symbol_order_when_rebuilt() {
        let parsed = parse("S -> b A a * A -> c * #").unwrap();
        let rebuilt = Grammar::from_rules(parsed.rules().to_vec()).unwrap();
        assert_eq!(
            parsed.symbols().collect::<Vec<_>>(),
            rebuilt.symbols().collect::<Vec<_>>()
        );
    }
}
