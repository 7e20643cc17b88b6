pub mod bucketing;
pub mod ratio;
pub mod statistics;
pub mod trend;
