use super::image_writer::ImageWriter;
use super::video_reader::VideoReader;
use super::video_writer::VideoWriter;

/// Creates fresh, unopened readers and writers for each run.
///
/// Every run gets its own instances so no file handle outlives the run
/// that opened it.
pub trait MediaFactory: Send {
    fn video_reader(&self) -> Box<dyn VideoReader>;
    fn image_reader(&self) -> Box<dyn VideoReader>;
    fn video_writer(&self) -> Box<dyn VideoWriter>;
    fn image_writer(&self) -> Box<dyn ImageWriter>;
}
