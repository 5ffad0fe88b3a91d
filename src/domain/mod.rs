// Domain layer: pipeline values and the ports the adapters implement.

pub mod model;
pub mod ports;
