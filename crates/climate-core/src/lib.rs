pub mod error;
pub mod types;
pub mod dates;
pub mod db;
pub mod queries;
pub mod reports;
pub mod summary;
