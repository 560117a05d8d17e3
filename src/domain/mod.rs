// Domain layer: the offer letter record, its defaults and the required-field contract.
// Only std, serde and chrono; no I/O.

pub mod model;
