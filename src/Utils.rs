//! utility modules used throughout the project
/// logger setup shared by the calculator entry points
pub mod logger;
