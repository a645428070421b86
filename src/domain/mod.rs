// Domain layer: claim schema, record models and ports (interfaces).

pub mod model;
pub mod ports;
pub mod schema;
