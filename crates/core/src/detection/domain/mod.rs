pub mod non_max_suppression;
pub mod object_detector;
pub mod run_config;
