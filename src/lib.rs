pub mod config;
pub mod error;
pub mod router;
pub mod routing;

pub use config::{RouterConfig, RoutingConfig};
pub use error::{RouteError, RouteResult};
pub use router::{RoutedStatement, StatementRouter};
pub use routing::{merge, CartesianRoutingEngine, RoutingEngine, RoutingResult, RoutingTable, TableUnit};
pub use shardroute_sql as sql;
