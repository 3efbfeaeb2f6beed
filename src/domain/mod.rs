// Domain layer: wire models and the ports the orchestrators depend on.

pub mod model;
pub mod ports;
