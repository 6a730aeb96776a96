// Domain layer: request/batch/probe models and the ports to external collaborators.

pub mod model;
pub mod ports;
