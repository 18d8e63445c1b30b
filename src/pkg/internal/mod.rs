pub mod adaptors;
pub mod coalesce;
pub mod display;
pub mod filters;
