//! Domain layer: regions, payment values and the ports the dispatcher talks to.

pub mod event;
pub mod payment;
pub mod ports;
pub mod region;
