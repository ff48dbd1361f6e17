mod handler;
mod model;

pub use handler::{create_group, delete_group, get_locations, join_group, update_location};
