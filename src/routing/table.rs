use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::RouteError;

/// Binding of one logic table to one actual table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutingTable {
    pub logic_table_name: String,
    pub actual_table_name: String,
}

impl RoutingTable {
    pub fn new(logic_table_name: impl Into<String>, actual_table_name: impl Into<String>) -> Self {
        Self {
            logic_table_name: logic_table_name.into(),
            actual_table_name: actual_table_name.into(),
        }
    }
}

/// One physical execution target: a data source plus at most one actual
/// table per logic table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTableUnit")]
pub struct TableUnit {
    data_source_name: String,
    routing_tables: IndexSet<RoutingTable>,
}

#[derive(Deserialize)]
struct RawTableUnit {
    data_source_name: String,
    #[serde(default)]
    routing_tables: Vec<RoutingTable>,
}

impl TryFrom<RawTableUnit> for TableUnit {
    type Error = RouteError;

    fn try_from(raw: RawTableUnit) -> Result<Self, Self::Error> {
        let mut unit = TableUnit::new(raw.data_source_name);
        for table in raw.routing_tables {
            let logic_table = table.logic_table_name.clone();
            if !unit.add_routing_table(table) {
                return Err(RouteError::InvalidTableUnit(format!(
                    "logic table '{}' bound more than once on data source '{}'",
                    logic_table, unit.data_source_name
                )));
            }
        }
        Ok(unit)
    }
}

impl TableUnit {
    pub fn new(data_source_name: impl Into<String>) -> Self {
        Self {
            data_source_name: data_source_name.into(),
            routing_tables: IndexSet::new(),
        }
    }

    /// Build a unit from `(logic, actual)` pairs. Later bindings of an
    /// already bound logic table are ignored.
    pub fn with_tables<L, A>(data_source_name: impl Into<String>, tables: impl IntoIterator<Item = (L, A)>) -> Self
    where
        L: Into<String>,
        A: Into<String>,
    {
        let mut unit = Self::new(data_source_name);
        for (logic, actual) in tables {
            unit.add_routing_table(RoutingTable::new(logic, actual));
        }
        unit
    }

    pub fn data_source_name(&self) -> &str {
        &self.data_source_name
    }

    pub fn routing_tables(&self) -> &IndexSet<RoutingTable> {
        &self.routing_tables
    }

    /// Bind a routing table. Returns `false` and leaves the unit unchanged if
    /// its logic table is already bound.
    pub fn add_routing_table(&mut self, table: RoutingTable) -> bool {
        if self.find_by_logic_table(&table.logic_table_name).is_some() {
            return false;
        }
        self.routing_tables.insert(table)
    }

    pub fn find_by_logic_table(&self, logic_table_name: &str) -> Option<&RoutingTable> {
        self.routing_tables
            .iter()
            .find(|t| t.logic_table_name.eq_ignore_ascii_case(logic_table_name))
    }

    pub fn find_by_actual_table(&self, actual_table_name: &str) -> Option<&RoutingTable> {
        self.routing_tables
            .iter()
            .find(|t| t.actual_table_name.eq_ignore_ascii_case(actual_table_name))
    }
}
