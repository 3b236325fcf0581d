//! Port traits: the boundary between the domain and the outside world.

pub mod alert_port;
pub mod config_port;
pub mod data_port;
pub mod results_port;
