use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::table::{RoutingTable, TableUnit};

/// The set of table units a statement routes to.
///
/// Units keep insertion order and are never duplicated. All views below are
/// computed from the units on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingResult {
    table_units: Vec<TableUnit>,
}

impl RoutingResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_units(&self) -> &[TableUnit] {
        &self.table_units
    }

    pub fn len(&self) -> usize {
        self.table_units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table_units.is_empty()
    }

    /// Add a unit. Returns `false` if an equal unit is already present.
    pub fn add_table_unit(&mut self, unit: TableUnit) -> bool {
        if self.table_units.contains(&unit) {
            return false;
        }
        self.table_units.push(unit);
        true
    }

    pub fn data_source_names(&self) -> IndexSet<String> {
        self.table_units
            .iter()
            .map(|unit| unit.data_source_name().to_string())
            .collect()
    }

    /// Logic tables routed to each of `candidates` that this result reaches.
    pub fn logic_tables_by_data_source(
        &self,
        candidates: &IndexSet<String>,
    ) -> IndexMap<String, IndexSet<String>> {
        let mut result: IndexMap<String, IndexSet<String>> = IndexMap::new();
        for unit in &self.table_units {
            if !candidates.contains(unit.data_source_name()) {
                continue;
            }
            result
                .entry(unit.data_source_name().to_string())
                .or_default()
                .extend(
                    unit.routing_tables()
                        .iter()
                        .map(|table| table.logic_table_name.clone()),
                );
        }
        result
    }

    /// Actual tables bound to each of `logic_tables` on `data_source`, one
    /// group per logic table. Logic tables with nothing bound here are left out.
    pub fn actual_table_groups(
        &self,
        data_source: &str,
        logic_tables: &IndexSet<String>,
    ) -> IndexMap<String, IndexSet<String>> {
        let mut result = IndexMap::new();
        for logic_table in logic_tables {
            let actual_tables = self.actual_table_names(data_source, logic_table);
            if !actual_tables.is_empty() {
                result.insert(logic_table.clone(), actual_tables);
            }
        }
        result
    }

    pub fn actual_table_names(&self, data_source: &str, logic_table: &str) -> IndexSet<String> {
        self.units_on(data_source)
            .filter_map(|unit| unit.find_by_logic_table(logic_table))
            .map(|table| table.actual_table_name.clone())
            .collect()
    }

    pub fn find_routing_table(&self, data_source: &str, actual_table: &str) -> Option<&RoutingTable> {
        self.table_units
            .iter()
            .filter(|unit| unit.data_source_name() == data_source)
            .find_map(|unit| unit.find_by_actual_table(actual_table))
    }

    /// Every logic table routed anywhere in this result.
    pub fn logic_table_names(&self) -> IndexSet<String> {
        self.table_units
            .iter()
            .flat_map(|unit| unit.routing_tables().iter())
            .map(|table| table.logic_table_name.clone())
            .collect()
    }

    fn units_on<'a>(&'a self, data_source: &'a str) -> impl Iterator<Item = &'a TableUnit> + 'a {
        self.table_units
            .iter()
            .filter(move |unit| unit.data_source_name() == data_source)
    }
}

impl FromIterator<TableUnit> for RoutingResult {
    fn from_iter<I: IntoIterator<Item = TableUnit>>(iter: I) -> Self {
        let mut result = RoutingResult::new();
        for unit in iter {
            result.add_table_unit(unit);
        }
        result
    }
}

impl Extend<TableUnit> for RoutingResult {
    fn extend<I: IntoIterator<Item = TableUnit>>(&mut self, iter: I) {
        for unit in iter {
            self.add_table_unit(unit);
        }
    }
}
