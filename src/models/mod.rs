pub mod customer;
pub mod metrics;
pub mod order;

pub use customer::*;
pub use metrics::*;
pub use order::*;
