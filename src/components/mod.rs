pub mod app;
pub mod locator_map;
pub mod track_path;
