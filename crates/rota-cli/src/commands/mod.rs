pub mod analyze;
pub mod fetch_model;
pub mod serve;
