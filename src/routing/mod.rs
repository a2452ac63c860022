//! Logical-to-physical routing model and the engines that produce it.

pub mod cartesian;
pub mod result;
pub mod table;

pub use cartesian::{merge, CartesianRoutingEngine};
pub use result::RoutingResult;
pub use table::{RoutingTable, TableUnit};

use crate::error::RouteResult;

/// Produces the routing result for one statement.
pub trait RoutingEngine {
    fn route(&self) -> RouteResult<RoutingResult>;
}
