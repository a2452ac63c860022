//! shardroute-sql - SQL front end for the shard router.
//!
//! This crate turns a SELECT statement into the facts the router needs:
//! the logic tables it references, the number of bound parameters, its
//! pagination clause, and positional rewrite tokens for every pagination
//! literal. It has no routing or storage dependencies.
//!
//! # Main Components
//!
//! - **Lexer**: tokens with byte end positions
//! - **Cursor**: the [`LexicalCursor`] seam clause parsers read through
//! - **Parser**: the SELECT scanner and the pagination clause parser
//!
//! # Example
//!
//! ```rust
//! use shardroute_sql::{parse_select, Dialect, LimitValue, RewriteToken};
//!
//! let stmt = parse_select("SELECT * FROM t_order WHERE user_id = ? LIMIT ?, 20", Dialect::MySql).unwrap();
//! let limit = stmt.limit.unwrap();
//! assert_eq!(limit.offset, Some(LimitValue::Parameter(1)));
//! assert_eq!(limit.row_count, LimitValue::Literal(20));
//! assert_eq!(stmt.rewrite_tokens, vec![RewriteToken::row_count(49, 20)]);
//! ```

pub mod cursor;
pub mod dialect;
pub mod error;
pub mod lexer;
pub mod limit;
pub mod parser;
pub mod statement;
pub mod token;

// Re-export main types for convenience
pub use cursor::{LexerEngine, LexicalCursor};
pub use dialect::{Dialect, PaginationSyntax};
pub use error::{SqlError, SqlResult};
pub use lexer::{Lexeme, SqlLexer, Token};
pub use limit::{Limit, LimitValue};
pub use parser::{parse_select, LimitClauseParser, SelectParser};
pub use statement::{SelectStatement, StatementBuilder};
pub use token::{RewriteToken, RewriteTokenKind};
