pub mod coordinate;
pub mod restaurant;
pub mod restaurant_details;
pub mod restaurant_image;
