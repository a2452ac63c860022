use crate::error::{SqlError, SqlResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords the SELECT scanner stops on. Any other word is an identifier.
    Select,
    From,
    Where,

    // Clauses
    Order,
    Group,
    Having,
    Limit,
    Offset,
    Union,
    For,

    // Joins
    Join,
    On,
    Using,

    // Logical, also produced by `!`
    Not,

    // Literals and identifiers
    Identifier(String),
    Integer(u64),
    Float(f64),
    String(String),
    Placeholder, // ?

    // Operators
    Equal,         // =
    NotEqual,      // != or <>
    LessThan,      // <
    LessThanEq,    // <=
    GreaterThan,   // >
    GreaterThanEq, // >=
    Plus,          // +
    Minus,         // -
    Star,          // *
    Slash,         // /
    Percent,       // %

    // Delimiters
    Comma,      // ,
    Dot,        // .
    LeftParen,  // (
    RightParen, // )
    Semicolon,  // ;

    // Special
    Eof,
}

/// A token together with where it sits in the source text.
///
/// `end_position` is the byte offset one past the token's last byte, which is
/// what the pagination parser measures literal start offsets back from.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub literals: String,
    pub end_position: usize,
}

pub struct SqlLexer {
    input: Vec<char>,
    position: usize,
    byte_offset: usize,
    current_char: Option<char>,
}

impl SqlLexer {
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Self {
            input: chars,
            position: 0,
            byte_offset: 0,
            current_char,
        }
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char {
            self.byte_offset += ch.len_utf8();
        }
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_line_comment(&mut self) {
        // Skip -- comments
        while let Some(ch) = self.current_char {
            if ch == '\n' {
                self.advance();
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) {
        // Skip /* */ comments
        self.advance(); // skip /
        self.advance(); // skip *
        while let Some(ch) = self.current_char {
            if ch == '*' && self.peek() == Some('/') {
                self.advance();
                self.advance();
                break;
            }
            self.advance();
        }
    }

    fn read_number(&mut self) -> SqlResult<Token> {
        let mut num_str = String::new();
        let mut has_dot = false;

        while let Some(ch) = self.current_char {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else if ch == '.' && !has_dot {
                // Decimal point only when a digit follows
                match self.peek() {
                    Some(next) if next.is_ascii_digit() => {
                        has_dot = true;
                        num_str.push(ch);
                        self.advance();
                    }
                    _ => break,
                }
            } else {
                break;
            }
        }

        if !has_dot {
            if let Ok(value) = num_str.parse::<u64>() {
                return Ok(Token::Integer(value));
            }
        }

        // Integers beyond u64 are kept as floats and rejected where an integer is required
        num_str
            .parse::<f64>()
            .map(Token::Float)
            .map_err(|_| SqlError::ParseError(format!("Invalid number: {}", num_str)))
    }

    fn read_string(&mut self, quote: char) -> SqlResult<Token> {
        self.advance(); // Skip opening quote

        let mut string = String::new();

        while let Some(ch) = self.current_char {
            if ch == quote {
                // Doubled quote is an escaped quote
                if self.peek() == Some(quote) {
                    string.push(quote);
                    self.advance();
                    self.advance();
                } else {
                    self.advance();
                    return Ok(Token::String(string));
                }
            } else if ch == '\\' {
                self.advance();
                if let Some(escaped) = self.current_char {
                    string.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        _ => escaped,
                    });
                    self.advance();
                }
            } else {
                string.push(ch);
                self.advance();
            }
        }

        Err(SqlError::ParseError("Unterminated string".to_string()))
    }

    fn read_identifier(&mut self) -> Token {
        let mut ident = String::new();

        while let Some(ch) = self.current_char {
            if ch.is_alphanumeric() || ch == '_' || ch == '$' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Keywords are case-insensitive
        match ident.to_uppercase().as_str() {
            "SELECT" => Token::Select,
            "FROM" => Token::From,
            "WHERE" => Token::Where,
            "ORDER" => Token::Order,
            "GROUP" => Token::Group,
            "HAVING" => Token::Having,
            "LIMIT" => Token::Limit,
            "OFFSET" => Token::Offset,
            "UNION" => Token::Union,
            "FOR" => Token::For,
            "JOIN" => Token::Join,
            "ON" => Token::On,
            "USING" => Token::Using,
            "NOT" => Token::Not,
            _ => Token::Identifier(ident),
        }
    }

    fn read_quoted_identifier(&mut self, quote: char) -> SqlResult<Token> {
        self.advance(); // Skip opening quote

        let mut ident = String::new();

        while let Some(ch) = self.current_char {
            if ch == quote {
                self.advance();
                return Ok(Token::Identifier(ident));
            }
            ident.push(ch);
            self.advance();
        }

        Err(SqlError::ParseError("Unterminated quoted identifier".to_string()))
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    fn read_token(&mut self) -> SqlResult<Token> {
        let token = match self.current_char {
            None => Token::Eof,
            Some(ch) if ch.is_ascii_digit() => return self.read_number(),
            Some('\'') => return self.read_string('\''),
            Some(quote @ ('`' | '"')) => return self.read_quoted_identifier(quote),
            Some(ch) if ch.is_alphabetic() || ch == '_' => return Ok(self.read_identifier()),
            Some('?') => self.single(Token::Placeholder),
            Some('=') => self.single(Token::Equal),
            Some('!') => {
                self.advance();
                if self.current_char == Some('=') {
                    self.advance();
                    Token::NotEqual
                } else {
                    Token::Not
                }
            }
            Some('<') => {
                self.advance();
                if self.current_char == Some('=') {
                    self.advance();
                    Token::LessThanEq
                } else if self.current_char == Some('>') {
                    self.advance();
                    Token::NotEqual // <>
                } else {
                    Token::LessThan
                }
            }
            Some('>') => {
                self.advance();
                if self.current_char == Some('=') {
                    self.advance();
                    Token::GreaterThanEq
                } else {
                    Token::GreaterThan
                }
            }
            Some('+') => self.single(Token::Plus),
            Some('-') => self.single(Token::Minus),
            Some('*') => self.single(Token::Star),
            Some('/') => self.single(Token::Slash),
            Some('%') => self.single(Token::Percent),
            Some(',') => self.single(Token::Comma),
            Some('.') => self.single(Token::Dot),
            Some('(') => self.single(Token::LeftParen),
            Some(')') => self.single(Token::RightParen),
            Some(';') => self.single(Token::Semicolon),
            Some(ch) => {
                return Err(SqlError::ParseError(format!(
                    "Unexpected character '{}' at position {}",
                    ch, self.byte_offset
                )));
            }
        };

        Ok(token)
    }

    pub fn next_lexeme(&mut self) -> SqlResult<Lexeme> {
        loop {
            self.skip_whitespace();

            match self.current_char {
                Some('-') if self.peek() == Some('-') => self.skip_line_comment(),
                Some('/') if self.peek() == Some('*') => self.skip_block_comment(),
                Some('#') => self.skip_line_comment(),
                _ => break,
            }
        }

        let start = self.position;
        let token = self.read_token()?;
        let literals: String = self.input[start..self.position].iter().collect();

        Ok(Lexeme {
            token,
            literals,
            end_position: self.byte_offset,
        })
    }

    /// Tokenize the whole input. The result always ends with an `Eof` lexeme.
    pub fn tokenize(&mut self) -> SqlResult<Vec<Lexeme>> {
        let mut lexemes = Vec::new();

        loop {
            let lexeme = self.next_lexeme()?;
            let done = lexeme.token == Token::Eof;
            lexemes.push(lexeme);
            if done {
                break;
            }
        }

        Ok(lexemes)
    }
}
