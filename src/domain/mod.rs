// Domain layer: table/phase/statement models and the ports the engine runs against.

pub mod model;
pub mod ports;
