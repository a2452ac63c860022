//! SQL dialects and the pagination syntax each accepts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SqlError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    MySql,
    PostgreSql,
}

/// Which forms may follow `LIMIT value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSyntax {
    /// `LIMIT offset, row_count`
    pub comma_offset: bool,
    /// `LIMIT row_count OFFSET offset`
    pub offset_keyword: bool,
}

impl Dialect {
    pub fn pagination(&self) -> PaginationSyntax {
        match self {
            Dialect::MySql => PaginationSyntax {
                comma_offset: true,
                offset_keyword: true,
            },
            Dialect::PostgreSql => PaginationSyntax {
                comma_offset: false,
                offset_keyword: true,
            },
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::MySql => write!(f, "mysql"),
            Dialect::PostgreSql => write!(f, "postgresql"),
        }
    }
}

impl FromStr for Dialect {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" => Ok(Dialect::MySql),
            "postgresql" | "postgres" | "pg" => Ok(Dialect::PostgreSql),
            other => Err(SqlError::ParseError(format!("Unknown dialect: {}", other))),
        }
    }
}
