//! Cartesian routing.
//!
//! Each input result comes from one independent sharding dimension. A data
//! source is a valid target only if every dimension reaches it. On each such
//! data source the output holds every combination of one actual table per
//! logic table.

use indexmap::{IndexMap, IndexSet};

use super::result::RoutingResult;
use super::table::{RoutingTable, TableUnit};
use super::RoutingEngine;
use crate::error::{RouteError, RouteResult};

/// Merge independently routed results into every jointly reachable target.
pub fn merge<I>(results: I) -> RouteResult<RoutingResult>
where
    I: IntoIterator<Item = RoutingResult>,
{
    CartesianRoutingEngine::new(results.into_iter().collect()).route()
}

pub struct CartesianRoutingEngine {
    routing_results: Vec<RoutingResult>,
    max_units_per_data_source: Option<usize>,
}

impl CartesianRoutingEngine {
    pub fn new(routing_results: Vec<RoutingResult>) -> Self {
        Self {
            routing_results,
            max_units_per_data_source: None,
        }
    }

    /// Refuse to build more than `limit` units on any one data source.
    pub fn with_max_units_per_data_source(mut self, limit: Option<usize>) -> Self {
        self.max_units_per_data_source = limit;
        self
    }

    fn intersection_data_sources(&self) -> IndexSet<String> {
        let mut iter = self.routing_results.iter();
        let mut result = match iter.next() {
            Some(first) => first.data_source_names(),
            None => return IndexSet::new(),
        };
        for each in iter {
            let names = each.data_source_names();
            result.retain(|name| names.contains(name));
        }
        result
    }

    fn data_source_logic_tables(&self, data_sources: &IndexSet<String>) -> IndexMap<String, IndexSet<String>> {
        let mut result: IndexMap<String, IndexSet<String>> = data_sources
            .iter()
            .map(|name| (name.clone(), IndexSet::new()))
            .collect();
        for each in &self.routing_results {
            for (data_source, logic_tables) in each.logic_tables_by_data_source(data_sources) {
                let known = result.entry(data_source).or_default();
                for logic_table in logic_tables {
                    if !known.iter().any(|name| name.eq_ignore_ascii_case(&logic_table)) {
                        known.insert(logic_table);
                    }
                }
            }
        }
        result
    }

    /// One group of actual table names per logic table on `data_source`.
    ///
    /// When several dimensions bind the same logic table here, only the actual
    /// tables all of them agree on survive. Names compare ASCII case-insensitively.
    fn actual_table_groups(&self, data_source: &str, logic_tables: &IndexSet<String>) -> Vec<IndexSet<String>> {
        let mut groups: IndexMap<String, IndexSet<String>> = IndexMap::new();
        for each in &self.routing_results {
            for (logic_table, actual_tables) in each.actual_table_groups(data_source, logic_tables) {
                match groups.get_mut(&logic_table.to_ascii_lowercase()) {
                    Some(group) => group.retain(|name| {
                        actual_tables.iter().any(|actual| actual.eq_ignore_ascii_case(name))
                    }),
                    None => {
                        groups.insert(logic_table.to_ascii_lowercase(), actual_tables);
                    }
                }
            }
        }
        logic_tables
            .iter()
            .filter_map(|logic_table| groups.swap_remove(&logic_table.to_ascii_lowercase()))
            .collect()
    }

    fn to_routing_table_groups(
        &self,
        data_source: &str,
        actual_table_groups: Vec<IndexSet<String>>,
    ) -> RouteResult<Vec<Vec<RoutingTable>>> {
        actual_table_groups
            .into_iter()
            .map(|group| {
                group
                    .iter()
                    .map(|actual_table| self.find_routing_table(data_source, actual_table))
                    .collect()
            })
            .collect()
    }

    fn find_routing_table(&self, data_source: &str, actual_table: &str) -> RouteResult<RoutingTable> {
        self.routing_results
            .iter()
            .find_map(|each| each.find_routing_table(data_source, actual_table))
            .cloned()
            .ok_or_else(|| RouteError::InconsistentRoutingResult {
                data_source: data_source.to_string(),
                actual_table: actual_table.to_string(),
            })
    }

    fn check_fanout(&self, data_source: &str, groups: &[Vec<RoutingTable>]) -> RouteResult<()> {
        let Some(limit) = self.max_units_per_data_source else {
            return Ok(());
        };
        let units = groups
            .iter()
            .try_fold(1usize, |acc, group| acc.checked_mul(group.len()))
            .unwrap_or(usize::MAX);
        if units > limit {
            return Err(RouteError::FanoutExceeded {
                data_source: data_source.to_string(),
                units,
                limit,
            });
        }
        Ok(())
    }
}

impl RoutingEngine for CartesianRoutingEngine {
    fn route(&self) -> RouteResult<RoutingResult> {
        match self.routing_results.as_slice() {
            [] => return Err(RouteError::EmptyMergeInput),
            // A lone dimension is already jointly satisfiable.
            [only] => return Ok(only.clone()),
            _ => {}
        }

        let data_sources = self.intersection_data_sources();
        tracing::debug!(
            inputs = self.routing_results.len(),
            data_sources = ?data_sources,
            "cartesian routing"
        );
        for each in &self.routing_results {
            for excluded in each.data_source_names().difference(&data_sources) {
                tracing::debug!(data_source = %excluded, "data source not reachable by every dimension, skipped");
            }
        }

        let mut result = RoutingResult::new();
        for (data_source, logic_tables) in self.data_source_logic_tables(&data_sources) {
            let actual_table_groups = self.actual_table_groups(&data_source, &logic_tables);
            if actual_table_groups.is_empty() {
                continue;
            }
            let routing_table_groups = self.to_routing_table_groups(&data_source, actual_table_groups)?;
            self.check_fanout(&data_source, &routing_table_groups)?;
            for tables in cartesian_product(&routing_table_groups) {
                let mut unit = TableUnit::new(data_source.clone());
                for table in tables {
                    unit.add_routing_table(table);
                }
                result.add_table_unit(unit);
            }
        }

        tracing::debug!(units = result.len(), "cartesian routing finished");
        Ok(result)
    }
}

/// Every way to pick one item from each group, first group varying slowest.
fn cartesian_product<T: Clone>(groups: &[Vec<T>]) -> Vec<Vec<T>> {
    groups.iter().fold(vec![Vec::new()], |acc, group| {
        acc.iter()
            .flat_map(|prefix| {
                group.iter().map(move |item| {
                    let mut tuple = prefix.clone();
                    tuple.push(item.clone());
                    tuple
                })
            })
            .collect()
    })
}
