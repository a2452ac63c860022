//! Statement state collected while a single statement is parsed.

use serde::{Deserialize, Serialize};

use crate::limit::Limit;
use crate::token::RewriteToken;

/// What clause parsers are allowed to do to the statement under construction.
pub trait StatementBuilder {
    /// Number of placeholders consumed so far, which is also the index the
    /// next placeholder will get.
    fn parameters_index(&self) -> usize;

    fn increase_parameters_index(&mut self);

    fn add_rewrite_token(&mut self, token: RewriteToken);

    fn set_limit(&mut self, limit: Limit);
}

/// Routing-relevant facts about a SELECT statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectStatement {
    /// Logic tables from FROM and JOIN clauses, first occurrence order.
    pub tables: Vec<String>,
    pub limit: Option<Limit>,
    /// Rewrite tokens in emission order.
    pub rewrite_tokens: Vec<RewriteToken>,
    parameters_index: usize,
}

impl SelectStatement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a counter that earlier parts of the statement already advanced.
    pub fn with_parameters_index(parameters_index: usize) -> Self {
        Self {
            parameters_index,
            ..Self::default()
        }
    }

    pub fn add_table(&mut self, name: &str) {
        if !self.tables.iter().any(|t| t.eq_ignore_ascii_case(name)) {
            self.tables.push(name.to_string());
        }
    }
}

impl StatementBuilder for SelectStatement {
    fn parameters_index(&self) -> usize {
        self.parameters_index
    }

    fn increase_parameters_index(&mut self) {
        self.parameters_index += 1;
    }

    fn add_rewrite_token(&mut self, token: RewriteToken) {
        self.rewrite_tokens.push(token);
    }

    fn set_limit(&mut self, limit: Limit) {
        self.limit = Some(limit);
    }
}
