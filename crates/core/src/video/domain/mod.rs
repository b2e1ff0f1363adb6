pub mod image_writer;
pub mod media_factory;
pub mod video_reader;
pub mod video_writer;
