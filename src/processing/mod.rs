pub mod queries;
pub mod statistics;
