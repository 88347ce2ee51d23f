pub mod places_repo;

#[cfg(test)]
pub mod stub_places_repo;
