// Domain layer: the structure record, its attribute schema and ports.

pub mod model;
pub mod ports;
pub mod render;
pub mod schema;
