pub mod boolean;
pub mod query;
