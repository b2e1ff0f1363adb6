//! In-memory media, detector and observer doubles shared by pipeline and
//! app-state tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::detection::domain::object_detector::ObjectDetector;
use crate::detection::domain::run_config::RunConfig;
use crate::pipeline::run_observer::RunObserver;
use crate::rendering::domain::annotation_renderer::AnnotationRenderer;
use crate::shared::detection::Detection;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::media_factory::MediaFactory;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

pub fn solid_frame(index: usize, w: u32, h: u32, value: u8) -> Frame {
    Frame::new(vec![value; (w * h * 3) as usize], w, h, index)
}

pub fn frames(count: usize, w: u32, h: u32) -> Vec<Result<Frame, String>> {
    (0..count)
        .map(|i| Ok(solid_frame(i, w, h, (i * 10) as u8)))
        .collect()
}

/// What the doubles saw, shared between the factory and the test body.
#[derive(Default)]
pub struct MediaProbe {
    pub reader_open: bool,
    pub reader_opens: usize,
    pub writer_open: bool,
    pub writer_opens: usize,
    pub written: Vec<Frame>,
    pub images_written: Vec<(PathBuf, Frame)>,
    pub output_paths: Vec<PathBuf>,
}

#[derive(Clone, Default)]
pub struct StubMediaFactory {
    pub video_frames: Vec<Result<Frame, String>>,
    pub image_frames: Vec<Result<Frame, String>>,
    pub fail_reader_open: bool,
    pub fail_writer_open: bool,
    pub fail_write_at: Option<usize>,
    pub probe: Arc<Mutex<MediaProbe>>,
}

impl StubMediaFactory {
    pub fn with_video(video_frames: Vec<Result<Frame, String>>) -> Self {
        Self {
            video_frames,
            ..Self::default()
        }
    }

    pub fn with_image(frame: Frame) -> Self {
        Self {
            image_frames: vec![Ok(frame)],
            ..Self::default()
        }
    }

    fn reader(&self, frames: &[Result<Frame, String>], fps: f64) -> Box<dyn VideoReader> {
        Box::new(StubReader {
            frames: frames.to_vec(),
            fps,
            fail_open: self.fail_reader_open,
            probe: self.probe.clone(),
        })
    }
}

impl MediaFactory for StubMediaFactory {
    fn video_reader(&self) -> Box<dyn VideoReader> {
        self.reader(&self.video_frames, 25.0)
    }

    fn image_reader(&self) -> Box<dyn VideoReader> {
        self.reader(&self.image_frames, 0.0)
    }

    fn video_writer(&self) -> Box<dyn VideoWriter> {
        Box::new(StubVideoWriter {
            fail_open: self.fail_writer_open,
            fail_write_at: self.fail_write_at,
            count: 0,
            probe: self.probe.clone(),
        })
    }

    fn image_writer(&self) -> Box<dyn ImageWriter> {
        Box::new(StubImageWriter {
            probe: self.probe.clone(),
        })
    }
}

pub struct StubReader {
    frames: Vec<Result<Frame, String>>,
    fps: f64,
    fail_open: bool,
    probe: Arc<Mutex<MediaProbe>>,
}

impl VideoReader for StubReader {
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
        if self.fail_open {
            return Err("cannot open".into());
        }
        let (width, height) = self
            .frames
            .iter()
            .find_map(|f| f.as_ref().ok())
            .map(|f| (f.width(), f.height()))
            .unwrap_or((8, 8));
        let mut probe = self.probe.lock().unwrap();
        probe.reader_open = true;
        probe.reader_opens += 1;
        Ok(VideoMetadata {
            width,
            height,
            fps: self.fps,
            frame_rate: (self.fps.round() as i32, 1),
            total_frames: self.frames.len(),
            codec: "stub".into(),
            source_path: Some(path.to_path_buf()),
        })
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        Box::new(
            std::mem::take(&mut self.frames)
                .into_iter()
                .map(|f| f.map_err(Into::into)),
        )
    }

    fn close(&mut self) {
        self.probe.lock().unwrap().reader_open = false;
    }
}

pub struct StubVideoWriter {
    fail_open: bool,
    fail_write_at: Option<usize>,
    count: usize,
    probe: Arc<Mutex<MediaProbe>>,
}

impl VideoWriter for StubVideoWriter {
    fn open(
        &mut self,
        path: &Path,
        _metadata: &VideoMetadata,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if self.fail_open {
            return Err("disk full".into());
        }
        let mut probe = self.probe.lock().unwrap();
        probe.writer_open = true;
        probe.writer_opens += 1;
        probe.output_paths.push(path.to_path_buf());
        Ok(())
    }

    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if self.fail_write_at == Some(self.count) {
            return Err("write failed".into());
        }
        self.count += 1;
        self.probe.lock().unwrap().written.push(frame.clone());
        Ok(())
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.probe.lock().unwrap().writer_open = false;
        Ok(())
    }
}

pub struct StubImageWriter {
    probe: Arc<Mutex<MediaProbe>>,
}

impl ImageWriter for StubImageWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        self.probe
            .lock()
            .unwrap()
            .images_written
            .push((path.to_path_buf(), frame.clone()));
        Ok(())
    }
}

/// Returns the same detections for every frame, optionally failing once
/// `fail_at` frames have been processed.
#[derive(Default)]
pub struct StubDetector {
    pub detections: Vec<Detection>,
    pub fail_at: Option<usize>,
    pub calls: usize,
}

impl ObjectDetector for StubDetector {
    fn detect(
        &mut self,
        _frame: &Frame,
        _config: &RunConfig,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        if self.fail_at == Some(self.calls) {
            return Err("session run failed".into());
        }
        self.calls += 1;
        Ok(self.detections.clone())
    }
}

/// Marks the first pixel with the detection count so tests can tell an
/// annotated frame from a raw one.
pub struct MarkingRenderer;

impl AnnotationRenderer for MarkingRenderer {
    fn render(&self, frame: &Frame, detections: &[Detection]) -> Frame {
        let mut out = frame.clone();
        out.data_mut()[0] = 200 + detections.len().min(55) as u8;
        out
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    pub frames: Vec<Frame>,
    pub statuses: Vec<String>,
}

impl RunObserver for RecordingObserver {
    fn frame(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }

    fn status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }
}

pub fn detection(class_id: usize, score: f32) -> Detection {
    Detection {
        x1: 1.0,
        y1: 1.0,
        x2: 4.0,
        y2: 4.0,
        score,
        class_id,
        label: format!("class{class_id}"),
    }
}
