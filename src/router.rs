//! Statement routing: parse a SELECT and merge its dimension routings.

use serde::{Deserialize, Serialize};
use shardroute_sql::{parse_select, SelectStatement};

use crate::config::RouterConfig;
use crate::error::RouteResult;
use crate::routing::{CartesianRoutingEngine, RoutingEngine, RoutingResult};

/// A parsed statement with every physical target it must run on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedStatement {
    pub statement: SelectStatement,
    pub routing: RoutingResult,
}

pub struct StatementRouter {
    config: RouterConfig,
}

impl StatementRouter {
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Route `sql` given one routing result per sharding dimension.
    pub fn route(&self, sql: &str, dimensions: Vec<RoutingResult>) -> RouteResult<RoutedStatement> {
        let statement = parse_select(sql, self.config.dialect)?;
        let routing = CartesianRoutingEngine::new(dimensions)
            .with_max_units_per_data_source(self.config.routing.max_units_per_data_source)
            .route()?;

        let routed_tables = routing.logic_table_names();
        for table in &statement.tables {
            if !routed_tables.iter().any(|t| t.eq_ignore_ascii_case(table)) {
                tracing::warn!(logic_table = %table, "statement table has no routing, assuming unsharded");
            }
        }

        tracing::debug!(
            units = routing.len(),
            data_sources = routing.data_source_names().len(),
            rewrite_tokens = statement.rewrite_tokens.len(),
            "routed statement"
        );

        Ok(RoutedStatement { statement, routing })
    }
}

impl Default for StatementRouter {
    fn default() -> Self {
        Self::new(RouterConfig::default())
    }
}
