pub mod outcome;
pub(crate) mod scheduler;
pub(crate) mod worker;
