// Domain layer: registration model and the ports the core depends on.

pub mod model;
pub mod ports;
