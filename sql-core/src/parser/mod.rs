//! SELECT statement scanner.
//!
//! This is not a full SQL parser. It walks the token stream once, counting
//! placeholders in order, recording the logic tables named in FROM and JOIN
//! clauses, and handing the top-level pagination clause to
//! [`LimitClauseParser`].

mod limit;


pub use limit::LimitClauseParser;

use crate::cursor::{LexerEngine, LexicalCursor};
use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::lexer::Token;
use crate::statement::{SelectStatement, StatementBuilder};

/// Parse a SELECT statement with the given dialect.
pub fn parse_select(sql: &str, dialect: Dialect) -> SqlResult<SelectStatement> {
    SelectParser::new(sql, dialect)?.parse()
}

pub struct SelectParser {
    cursor: LexerEngine,
    limit_parser: LimitClauseParser,
}

impl SelectParser {
    pub fn new(sql: &str, dialect: Dialect) -> SqlResult<Self> {
        Ok(Self {
            cursor: LexerEngine::new(sql)?,
            limit_parser: LimitClauseParser::new(dialect),
        })
    }

    pub fn parse(&mut self) -> SqlResult<SelectStatement> {
        if !self.cursor.skip_if_equal(&Token::Select) {
            return Err(SqlError::ParseError(format!(
                "Expected SELECT, found {:?}",
                self.cursor.current().token
            )));
        }

        let mut statement = SelectStatement::new();
        // One entry per open parenthesis level: whether that level is inside a FROM clause
        let mut in_from = vec![false];
        let mut expect_table = false;

        loop {
            let depth = in_from.len() - 1;
            let token = self.cursor.current().token.clone();

            match token {
                Token::Eof => break,
                Token::LeftParen => {
                    in_from.push(false);
                    expect_table = false;
                }
                Token::RightParen => {
                    if depth == 0 {
                        return Err(SqlError::ParseError(format!(
                            "Unbalanced ')' at position {}",
                            self.cursor.end_position()
                        )));
                    }
                    in_from.pop();
                    expect_table = false;
                }
                Token::Placeholder => {
                    statement.increase_parameters_index();
                }
                Token::Limit if depth == 0 => {
                    if statement.limit.is_some() {
                        return Err(SqlError::ParseError(
                            "Duplicate LIMIT clause".to_string(),
                        ));
                    }
                    in_from[depth] = false;
                    expect_table = false;
                    self.limit_parser.parse(&mut self.cursor, &mut statement)?;
                    continue;
                }
                Token::From => {
                    in_from[depth] = true;
                    expect_table = true;
                }
                Token::Join | Token::Comma if in_from[depth] => {
                    expect_table = true;
                }
                Token::On | Token::Using => {
                    expect_table = false;
                }
                Token::Where
                | Token::Group
                | Token::Order
                | Token::Having
                | Token::Limit
                | Token::Union
                | Token::For => {
                    in_from[depth] = false;
                    expect_table = false;
                }
                Token::Identifier(name) if expect_table => {
                    self.cursor.next_token();
                    let table = self.qualified_table_name(name);
                    statement.add_table(&table);
                    expect_table = false;
                    continue;
                }
                _ => {
                    expect_table = false;
                }
            }

            self.cursor.next_token();
        }

        if in_from.len() > 1 {
            return Err(SqlError::ParseError("Unbalanced '('".to_string()));
        }

        tracing::debug!(
            tables = ?statement.tables,
            parameters = statement.parameters_index(),
            limit = ?statement.limit,
            "scanned select statement"
        );

        Ok(statement)
    }

    /// `schema.table` routes by `table`.
    fn qualified_table_name(&mut self, name: String) -> String {
        if !self.cursor.skip_if_equal(&Token::Dot) {
            return name;
        }
        match &self.cursor.current().token {
            Token::Identifier(table) => {
                let table = table.clone();
                self.cursor.next_token();
                table
            }
            _ => name,
        }
    }
}
