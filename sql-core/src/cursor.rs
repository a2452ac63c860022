//! Lexical cursor over a tokenized statement.

use crate::error::SqlResult;
use crate::lexer::{Lexeme, SqlLexer, Token};

/// Read-and-advance access to a token stream, as needed by clause parsers.
pub trait LexicalCursor {
    /// The lexeme under the cursor. Past the end this is the trailing `Eof`.
    fn current(&self) -> &Lexeme;

    /// Move to the next lexeme.
    fn next_token(&mut self);

    fn end_position(&self) -> usize {
        self.current().end_position
    }

    fn equal(&self, token: &Token) -> bool {
        self.current().token == *token
    }

    fn skip_if_equal(&mut self, token: &Token) -> bool {
        if self.equal(token) {
            self.next_token();
            true
        } else {
            false
        }
    }
}

/// Cursor over a pre-tokenized statement.
#[derive(Debug, Clone)]
pub struct LexerEngine {
    lexemes: Vec<Lexeme>,
    position: usize,
}

impl LexerEngine {
    pub fn new(sql: &str) -> SqlResult<Self> {
        let lexemes = SqlLexer::new(sql).tokenize()?;
        Ok(Self::from_lexemes(lexemes))
    }

    /// Wrap already produced lexemes, appending an `Eof` if the stream lacks one.
    pub fn from_lexemes(mut lexemes: Vec<Lexeme>) -> Self {
        if lexemes.last().map(|l| &l.token) != Some(&Token::Eof) {
            let end_position = lexemes.last().map(|l| l.end_position).unwrap_or(0);
            lexemes.push(Lexeme {
                token: Token::Eof,
                literals: String::new(),
                end_position,
            });
        }

        Self {
            lexemes,
            position: 0,
        }
    }

    pub fn is_end(&self) -> bool {
        self.current().token == Token::Eof
    }
}

impl LexicalCursor for LexerEngine {
    fn current(&self) -> &Lexeme {
        &self.lexemes[self.position]
    }

    fn next_token(&mut self) {
        if self.position + 1 < self.lexemes.len() {
            self.position += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_if_equal() {
        let mut cursor = LexerEngine::new("LIMIT 10").unwrap();
        assert!(!cursor.skip_if_equal(&Token::Offset));
        assert!(cursor.skip_if_equal(&Token::Limit));
        assert_eq!(cursor.current().token, Token::Integer(10));
        assert_eq!(cursor.end_position(), 8);
    }

    #[test]
    fn test_cursor_stops_at_eof() {
        let mut cursor = LexerEngine::new("?").unwrap();
        cursor.next_token();
        cursor.next_token();
        cursor.next_token();
        assert!(cursor.is_end());
        assert_eq!(cursor.end_position(), 1);
    }

    #[test]
    fn test_from_lexemes_appends_eof() {
        let cursor = LexerEngine::from_lexemes(Vec::new());
        assert!(cursor.is_end());

        let mut cursor = LexerEngine::from_lexemes(vec![Lexeme {
            token: Token::Limit,
            literals: "LIMIT".to_string(),
            end_position: 5,
        }]);
        cursor.next_token();
        assert!(cursor.is_end());
        assert_eq!(cursor.end_position(), 5);
    }
}
