pub mod availability;
pub mod binomial;
pub mod report;

pub use availability::{
    binomial_tail, evaluate, exact_tail, largest_quorum, AvailabilityError, AvailabilityQuery,
    Formula,
};
pub use report::{analyze, AvailabilityReport};
