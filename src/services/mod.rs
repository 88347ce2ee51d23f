pub mod aggregation_service;
pub mod details_cache;
