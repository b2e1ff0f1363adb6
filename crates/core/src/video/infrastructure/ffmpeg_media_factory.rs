use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::media_factory::MediaFactory;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

use super::ffmpeg_reader::FfmpegReader;
use super::ffmpeg_writer::FfmpegWriter;
use super::image_file_reader::ImageFileReader;
use super::image_file_writer::ImageFileWriter;

/// ffmpeg for video, the `image` crate for stills.
#[derive(Default)]
pub struct FfmpegMediaFactory;

impl FfmpegMediaFactory {
    pub fn new() -> Self {
        Self
    }
}

impl MediaFactory for FfmpegMediaFactory {
    fn video_reader(&self) -> Box<dyn VideoReader> {
        Box::new(FfmpegReader::new())
    }

    fn image_reader(&self) -> Box<dyn VideoReader> {
        Box::new(ImageFileReader::new())
    }

    fn video_writer(&self) -> Box<dyn VideoWriter> {
        Box::new(FfmpegWriter::new())
    }

    fn image_writer(&self) -> Box<dyn ImageWriter> {
        Box::new(ImageFileWriter::new())
    }
}
