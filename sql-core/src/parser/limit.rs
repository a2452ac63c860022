//! Pagination clause parser.
//!
//! Handles `LIMIT v`, `LIMIT v, w` and `LIMIT v OFFSET w`, where each value is
//! an unsigned decimal integer literal or a `?` placeholder. Literals produce
//! rewrite tokens; placeholders get parameter indices and advance the
//! statement's parameter counter.

use crate::cursor::LexicalCursor;
use crate::dialect::{Dialect, PaginationSyntax};
use crate::error::{SqlError, SqlResult};
use crate::lexer::Token;
use crate::limit::{Limit, LimitValue};
use crate::statement::StatementBuilder;
use crate::token::RewriteToken;

/// A pagination value as read from the token stream, before any parameter
/// index has been assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScannedValue {
    Literal { value: u64, start_offset: usize },
    Placeholder { position: usize },
}

impl ScannedValue {
    fn is_placeholder(&self) -> bool {
        matches!(self, ScannedValue::Placeholder { .. })
    }

    fn to_limit_value(self, parameter_index: usize) -> LimitValue {
        match self {
            ScannedValue::Literal { value, .. } => LimitValue::Literal(value),
            ScannedValue::Placeholder { .. } => LimitValue::Parameter(parameter_index),
        }
    }

    fn rewrite_token(&self, as_offset: bool) -> Option<RewriteToken> {
        match *self {
            ScannedValue::Literal {
                value,
                start_offset,
            } if as_offset => Some(RewriteToken::offset(start_offset, value)),
            ScannedValue::Literal {
                value,
                start_offset,
            } => Some(RewriteToken::row_count(start_offset, value)),
            ScannedValue::Placeholder { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PaginationForm {
    Bare,
    Comma,
    Offset,
}

/// Number of decimal digits in `value`.
///
/// Pagination literals are unsigned decimal integers without leading zeros,
/// so this is also the literal's length in the source text.
fn decimal_digit_count(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |digits| digits as usize + 1)
}

pub struct LimitClauseParser {
    syntax: PaginationSyntax,
}

impl LimitClauseParser {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            syntax: dialect.pagination(),
        }
    }

    /// Parse a pagination clause starting at the cursor.
    ///
    /// Returns `Ok(None)` without moving the cursor when the current token is
    /// not `LIMIT`. On success the limit and any rewrite tokens are attached
    /// to `statement`. On error the statement's parameter counter and token
    /// list are left untouched.
    pub fn parse<C, S>(&self, cursor: &mut C, statement: &mut S) -> SqlResult<Option<Limit>>
    where
        C: LexicalCursor,
        S: StatementBuilder,
    {
        if !cursor.skip_if_equal(&Token::Limit) {
            return Ok(None);
        }

        let base_index = statement.parameters_index();
        let first = Self::scan_value(cursor)?;
        cursor.next_token();

        let form = self.scan_form(cursor)?;
        let second = match form {
            PaginationForm::Bare => None,
            PaginationForm::Comma | PaginationForm::Offset => {
                let value = Self::scan_value(cursor)?;
                cursor.next_token();
                Some(value)
            }
        };

        // Indices are fixed here; the counter is only advanced afterwards.
        let first_value = first.to_limit_value(base_index);
        let second_index = if first.is_placeholder() {
            base_index + 1
        } else {
            base_index
        };
        let second_value = second.map(|value| value.to_limit_value(second_index));

        let (limit, tokens) = match (form, second, second_value) {
            (PaginationForm::Comma, Some(row_count), Some(row_count_value)) => (
                Limit::new(row_count_value, Some(first_value)),
                [first.rewrite_token(true), row_count.rewrite_token(false)],
            ),
            (PaginationForm::Offset, Some(offset), Some(offset_value)) => (
                Limit::new(first_value, Some(offset_value)),
                [offset.rewrite_token(true), first.rewrite_token(false)],
            ),
            _ => (Limit::new(first_value, None), [first.rewrite_token(false), None]),
        };

        for value in std::iter::once(first).chain(second) {
            if value.is_placeholder() {
                statement.increase_parameters_index();
            }
        }
        for token in tokens.into_iter().flatten() {
            statement.add_rewrite_token(token);
        }

        tracing::trace!(
            ?form,
            ?first,
            ?second,
            base_index,
            parameters_index = statement.parameters_index(),
            "parsed pagination clause"
        );

        statement.set_limit(limit);
        Ok(Some(limit))
    }

    fn scan_form<C: LexicalCursor>(&self, cursor: &mut C) -> SqlResult<PaginationForm> {
        if cursor.equal(&Token::Comma) {
            if !self.syntax.comma_offset {
                return Err(SqlError::UnsupportedPaginationSyntax(
                    "LIMIT offset, row_count".to_string(),
                ));
            }
            cursor.next_token();
            return Ok(PaginationForm::Comma);
        }
        if cursor.equal(&Token::Offset) {
            if !self.syntax.offset_keyword {
                return Err(SqlError::UnsupportedPaginationSyntax(
                    "LIMIT row_count OFFSET offset".to_string(),
                ));
            }
            cursor.next_token();
            return Ok(PaginationForm::Offset);
        }
        Ok(PaginationForm::Bare)
    }

    fn scan_value<C: LexicalCursor>(cursor: &C) -> SqlResult<ScannedValue> {
        let end_position = cursor.end_position();
        let lexeme = cursor.current();
        match lexeme.token {
            Token::Integer(value) => Ok(ScannedValue::Literal {
                value,
                start_offset: end_position.saturating_sub(decimal_digit_count(value)),
            }),
            Token::Placeholder => Ok(ScannedValue::Placeholder {
                position: end_position.saturating_sub(1),
            }),
            Token::Eof => Err(SqlError::MalformedPaginationClause {
                position: end_position,
                found: "end of input".to_string(),
            }),
            _ => Err(SqlError::MalformedPaginationClause {
                position: end_position,
                found: format!("'{}'", lexeme.literals),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::LexerEngine;
    use crate::statement::SelectStatement;
    use crate::token::RewriteTokenKind;

    fn parse_with(
        sql: &str,
        dialect: Dialect,
        parameters_index: usize,
    ) -> (SqlResult<Option<Limit>>, SelectStatement, LexerEngine) {
        let mut cursor = LexerEngine::new(sql).unwrap();
        let mut statement = SelectStatement::with_parameters_index(parameters_index);
        let result = LimitClauseParser::new(dialect).parse(&mut cursor, &mut statement);
        (result, statement, cursor)
    }

    fn parse(sql: &str, parameters_index: usize) -> (SqlResult<Option<Limit>>, SelectStatement) {
        let (result, statement, _) = parse_with(sql, Dialect::MySql, parameters_index);
        (result, statement)
    }

    #[test]
    fn test_decimal_digit_count() {
        assert_eq!(decimal_digit_count(0), 1);
        assert_eq!(decimal_digit_count(9), 1);
        assert_eq!(decimal_digit_count(10), 2);
        assert_eq!(decimal_digit_count(12345), 5);
        assert_eq!(decimal_digit_count(u64::MAX), 20);
    }

    #[test]
    fn test_not_a_limit_clause() {
        let (result, statement, cursor) = parse_with("ORDER BY id", Dialect::MySql, 3);
        assert_eq!(result.unwrap(), None);
        assert_eq!(cursor.current().token, Token::Order);
        assert_eq!(statement.parameters_index(), 3);
        assert!(statement.limit.is_none());
    }

    #[test]
    fn test_bare_literal() {
        let (result, statement) = parse("LIMIT 10", 0);
        let limit = result.unwrap().unwrap();
        assert_eq!(limit, Limit::new(LimitValue::Literal(10), None));
        assert_eq!(statement.rewrite_tokens, vec![RewriteToken::row_count(6, 10)]);
        assert_eq!(statement.parameters_index(), 0);
        assert_eq!(statement.limit, Some(limit));
    }

    #[test]
    fn test_bare_placeholder() {
        let (result, statement) = parse("LIMIT ?", 4);
        assert_eq!(
            result.unwrap(),
            Some(Limit::new(LimitValue::Parameter(4), None))
        );
        assert!(statement.rewrite_tokens.is_empty());
        assert_eq!(statement.parameters_index(), 5);
    }

    #[test]
    fn test_comma_form_with_leading_placeholder() {
        let (result, statement) = parse("LIMIT ?, 20", 0);
        assert_eq!(
            result.unwrap(),
            Some(Limit::new(
                LimitValue::Literal(20),
                Some(LimitValue::Parameter(0))
            ))
        );
        assert_eq!(statement.rewrite_tokens, vec![RewriteToken::row_count(9, 20)]);
        assert_eq!(statement.parameters_index(), 1);
    }

    #[test]
    fn test_comma_form_with_trailing_placeholder() {
        let (result, statement) = parse("LIMIT 5, ?", 7);
        assert_eq!(
            result.unwrap(),
            Some(Limit::new(
                LimitValue::Parameter(7),
                Some(LimitValue::Literal(5))
            ))
        );
        assert_eq!(statement.rewrite_tokens, vec![RewriteToken::offset(6, 5)]);
        assert_eq!(statement.parameters_index(), 8);
    }

    #[test]
    fn test_comma_form_literals_emit_offset_then_row_count() {
        let (result, statement) = parse("LIMIT 100, 25", 0);
        assert_eq!(
            result.unwrap(),
            Some(Limit::new(
                LimitValue::Literal(25),
                Some(LimitValue::Literal(100))
            ))
        );
        assert_eq!(
            statement.rewrite_tokens,
            vec![RewriteToken::offset(6, 100), RewriteToken::row_count(11, 25)]
        );
        assert_eq!(statement.parameters_index(), 0);
    }

    #[test]
    fn test_comma_form_two_placeholders() {
        let (result, statement) = parse("LIMIT ?, ?", 1);
        assert_eq!(
            result.unwrap(),
            Some(Limit::new(
                LimitValue::Parameter(2),
                Some(LimitValue::Parameter(1))
            ))
        );
        assert!(statement.rewrite_tokens.is_empty());
        assert_eq!(statement.parameters_index(), 3);
    }

    #[test]
    fn test_offset_form_two_placeholders() {
        let (result, statement) = parse("LIMIT ? OFFSET ?", 2);
        assert_eq!(
            result.unwrap(),
            Some(Limit::new(
                LimitValue::Parameter(2),
                Some(LimitValue::Parameter(3))
            ))
        );
        assert!(statement.rewrite_tokens.is_empty());
        assert_eq!(statement.parameters_index(), 4);
    }

    #[test]
    fn test_offset_form_literals_emit_offset_first() {
        let (result, statement) = parse("LIMIT 10 OFFSET 30", 0);
        assert_eq!(
            result.unwrap(),
            Some(Limit::new(
                LimitValue::Literal(10),
                Some(LimitValue::Literal(30))
            ))
        );
        assert_eq!(
            statement.rewrite_tokens,
            vec![RewriteToken::offset(16, 30), RewriteToken::row_count(6, 10)]
        );
        assert_eq!(statement.rewrite_tokens[0].kind, RewriteTokenKind::Offset);
    }

    #[test]
    fn test_offset_form_literal_row_count_placeholder_offset() {
        let (result, statement) = parse("LIMIT 10 OFFSET ?", 5);
        assert_eq!(
            result.unwrap(),
            Some(Limit::new(
                LimitValue::Literal(10),
                Some(LimitValue::Parameter(5))
            ))
        );
        assert_eq!(statement.rewrite_tokens, vec![RewriteToken::row_count(6, 10)]);
        assert_eq!(statement.parameters_index(), 6);
    }

    #[test]
    fn test_cursor_left_after_clause() {
        let (result, _, cursor) = parse_with("LIMIT 1 OFFSET 2 FOR UPDATE", Dialect::MySql, 0);
        assert!(result.unwrap().is_some());
        assert_eq!(cursor.current().token, Token::For);
    }

    #[test]
    fn test_malformed_value() {
        let (result, statement) = parse("LIMIT abc", 2);
        assert_eq!(
            result.unwrap_err(),
            SqlError::MalformedPaginationClause {
                position: 9,
                found: "'abc'".to_string(),
            }
        );
        assert_eq!(statement.parameters_index(), 2);
        assert!(statement.limit.is_none());
    }

    #[test]
    fn test_out_of_range_offset_keeps_statement_untouched() {
        let (result, statement) = parse("LIMIT 10 OFFSET 18446744073709551616", 1);
        assert_eq!(
            result.unwrap_err(),
            SqlError::MalformedPaginationClause {
                position: 36,
                found: "'18446744073709551616'".to_string(),
            }
        );
        assert_eq!(statement.parameters_index(), 1);
        assert!(statement.rewrite_tokens.is_empty());
        assert!(statement.limit.is_none());
    }

    #[test]
    fn test_malformed_second_value_keeps_statement_untouched() {
        let (result, statement) = parse("LIMIT ?, 'x'", 0);
        assert!(matches!(
            result,
            Err(SqlError::MalformedPaginationClause { .. })
        ));
        assert_eq!(statement.parameters_index(), 0);
        assert!(statement.rewrite_tokens.is_empty());
    }

    #[test]
    fn test_missing_value() {
        let (result, _) = parse("LIMIT", 0);
        assert_eq!(
            result.unwrap_err(),
            SqlError::MalformedPaginationClause {
                position: 5,
                found: "end of input".to_string(),
            }
        );
    }

    #[test]
    fn test_negative_literal_is_malformed() {
        let (result, _) = parse("LIMIT -1", 0);
        assert!(matches!(
            result,
            Err(SqlError::MalformedPaginationClause { .. })
        ));
    }

    #[test]
    fn test_postgresql_rejects_comma_form() {
        let (result, statement, _) = parse_with("LIMIT 5, 10", Dialect::PostgreSql, 0);
        assert!(matches!(
            result,
            Err(SqlError::UnsupportedPaginationSyntax(_))
        ));
        assert!(statement.rewrite_tokens.is_empty());

        let (result, _, _) = parse_with("LIMIT 10 OFFSET 5", Dialect::PostgreSql, 0);
        assert!(result.unwrap().is_some());
    }
}
