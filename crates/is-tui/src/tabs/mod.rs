pub mod analysis;
pub mod dashboard;
pub mod reports;
pub mod sources;
