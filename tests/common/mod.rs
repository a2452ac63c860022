//! Common test utilities for routing tests
//!
//! Provides shared helper functions for:
//! - Installing a tracing subscriber driven by `RUST_LOG`
//! - Building routing results from compact table descriptions
//! - Loading routing results from JSON fixtures

#![allow(dead_code)]

use serde_json::Value;
use shardroute::{RoutingResult, TableUnit};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A unit binding `(logic_table, actual_table)` pairs on `data_source`.
pub fn unit(data_source: &str, tables: &[(&str, &str)]) -> TableUnit {
    TableUnit::with_tables(data_source, tables.iter().copied())
}

pub fn routing_result(units: Vec<TableUnit>) -> RoutingResult {
    units.into_iter().collect()
}

pub fn routing_result_from_json(value: Value) -> RoutingResult {
    serde_json::from_value(value).expect("Invalid routing result fixture")
}

/// Units rendered as `ds:logic=actual,logic=actual` for readable assertions.
pub fn describe(result: &RoutingResult) -> Vec<String> {
    result
        .table_units()
        .iter()
        .map(|unit| {
            let tables: Vec<String> = unit
                .routing_tables()
                .iter()
                .map(|t| format!("{}={}", t.logic_table_name, t.actual_table_name))
                .collect();
            format!("{}:{}", unit.data_source_name(), tables.join(","))
        })
        .collect()
}
