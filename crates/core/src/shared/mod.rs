pub mod constants;
pub mod detection;
pub mod frame;
pub mod output_paths;
pub mod source;
pub mod video_metadata;
