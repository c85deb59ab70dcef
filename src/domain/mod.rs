// Domain layer: participants, assignments, reports and the ports the core drives.

pub mod model;
pub mod ports;
