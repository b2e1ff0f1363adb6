pub mod pipeline_error;
pub mod pipeline_logger;
pub mod process_image_use_case;
pub mod process_video_use_case;
pub mod processor;
pub mod run_observer;

#[cfg(test)]
pub(crate) mod test_support;
