use shardroute_sql::SqlError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Cannot merge an empty set of routing results")]
    EmptyMergeInput,

    #[error("Cannot find routing table, data source: {data_source}, actual table: {actual_table}")]
    InconsistentRoutingResult {
        data_source: String,
        actual_table: String,
    },

    #[error("Cartesian routing on data source '{data_source}' would produce {units} table units (limit {limit})")]
    FanoutExceeded {
        data_source: String,
        units: usize,
        limit: usize,
    },

    #[error("Invalid table unit: {0}")]
    InvalidTableUnit(String),

    #[error(transparent)]
    Sql(#[from] SqlError),
}

pub type RouteResult<T> = Result<T, RouteError>;

impl serde::Serialize for RouteError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RouteError::EmptyMergeInput;
        assert_eq!(err.to_string(), "Cannot merge an empty set of routing results");

        let err = RouteError::InconsistentRoutingResult {
            data_source: "ds_0".to_string(),
            actual_table: "t_order_1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot find routing table, data source: ds_0, actual table: t_order_1"
        );

        let err = RouteError::FanoutExceeded {
            data_source: "ds_1".to_string(),
            units: 64,
            limit: 16,
        };
        assert_eq!(
            err.to_string(),
            "Cartesian routing on data source 'ds_1' would produce 64 table units (limit 16)"
        );
    }

    #[test]
    fn test_sql_errors_pass_through() {
        let err: RouteError = SqlError::ParseError("Unterminated string".to_string()).into();
        assert_eq!(err.to_string(), "Parse error: Unterminated string");
        assert!(matches!(err, RouteError::Sql(SqlError::ParseError(_))));
    }

    #[test]
    fn test_error_serializes_as_message() {
        let json = serde_json::to_string(&RouteError::EmptyMergeInput).unwrap();
        assert_eq!(json, "\"Cannot merge an empty set of routing results\"");
    }
}
