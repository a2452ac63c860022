//! Pagination value model.

use serde::{Deserialize, Serialize};

/// One component of a pagination clause.
///
/// A literal carries its value; a placeholder carries the index of the bound
/// parameter that will supply the value at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitValue {
    Literal(u64),
    Parameter(usize),
}

impl LimitValue {
    pub fn is_parameter(&self) -> bool {
        matches!(self, LimitValue::Parameter(_))
    }

    pub fn literal(&self) -> Option<u64> {
        match self {
            LimitValue::Literal(value) => Some(*value),
            LimitValue::Parameter(_) => None,
        }
    }

    pub fn parameter_index(&self) -> Option<usize> {
        match self {
            LimitValue::Literal(_) => None,
            LimitValue::Parameter(index) => Some(*index),
        }
    }
}

/// Row count and optional offset of a SELECT statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit {
    pub row_count: LimitValue,
    pub offset: Option<LimitValue>,
}

impl Limit {
    pub fn new(row_count: LimitValue, offset: Option<LimitValue>) -> Self {
        Self { row_count, offset }
    }

    /// Parameter indices referenced by this limit, in ascending order.
    pub fn parameter_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = std::iter::once(self.row_count)
            .chain(self.offset)
            .filter_map(|value| value.parameter_index())
            .collect();
        indices.sort_unstable();
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_value_accessors() {
        assert_eq!(LimitValue::Literal(10).literal(), Some(10));
        assert_eq!(LimitValue::Literal(10).parameter_index(), None);
        assert!(!LimitValue::Literal(10).is_parameter());
        assert_eq!(LimitValue::Parameter(3).parameter_index(), Some(3));
        assert_eq!(LimitValue::Parameter(3).literal(), None);
        assert!(LimitValue::Parameter(3).is_parameter());
    }

    #[test]
    fn test_parameter_indices() {
        let limit = Limit::new(LimitValue::Parameter(2), Some(LimitValue::Parameter(1)));
        assert_eq!(limit.parameter_indices(), vec![1, 2]);

        let limit = Limit::new(LimitValue::Literal(5), None);
        assert!(limit.parameter_indices().is_empty());
    }

    #[test]
    fn test_serialization() {
        let limit = Limit::new(LimitValue::Literal(20), Some(LimitValue::Parameter(0)));
        let json = serde_json::to_value(limit).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"row_count": {"literal": 20}, "offset": {"parameter": 0}})
        );
    }
}
