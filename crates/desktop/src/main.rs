mod app;
mod theme;
mod widgets;
mod workers;

use std::sync::{Arc, Mutex};

use app::App;
use yolo_processor_core::detection::domain::run_config::RunConfig;
use yolo_processor_core::detection::infrastructure::model_resolver;
use yolo_processor_core::detection::infrastructure::onnx_yolo_detector::OnnxYoloDetector;
use yolo_processor_core::pipeline::processor::Processor;
use yolo_processor_core::rendering::infrastructure::box_annotation_renderer::BoxAnnotationRenderer;
use yolo_processor_core::shared::constants::{
    MODEL_FILE_NAME, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH,
};
use yolo_processor_core::video::infrastructure::ffmpeg_media_factory::FfmpegMediaFactory;

fn main() -> iced::Result {
    env_logger::init();

    let processor = match load_processor() {
        Ok(processor) => Arc::new(Mutex::new(processor)),
        Err(e) => {
            log::error!("Startup failed: {e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    iced::application(move || App::new(processor.clone()), App::update, App::view)
        .title(WINDOW_TITLE)
        .theme(App::theme)
        .subscription(App::subscription)
        .window(iced::window::Settings {
            size: iced::Size::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            resizable: false,
            ..Default::default()
        })
        .run()
}

/// Loads the model once; every run reuses the same session.
fn load_processor() -> Result<Processor, Box<dyn std::error::Error>> {
    let model_path = model_resolver::resolve(MODEL_FILE_NAME)?;
    log::info!("Loading model from {}", model_path.display());
    let detector = OnnxYoloDetector::new(&model_path)?;

    Ok(Processor::new(
        Box::new(detector),
        Box::new(BoxAnnotationRenderer::new()),
        Box::new(FfmpegMediaFactory::new()),
        RunConfig::default(),
    ))
}
