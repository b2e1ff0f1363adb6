use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::{Receiver, TryRecvError};
use iced::widget::{center, column, container, image, row, text};
use iced::{event, keyboard, window, ContentFit, Element, Event, Length, Subscription, Task, Theme};

use yolo_processor_core::app::app_state::AppState;
use yolo_processor_core::app::command::Command;
use yolo_processor_core::pipeline::processor::Processor;
use yolo_processor_core::pipeline::run_observer::RunObserver;
use yolo_processor_core::shared::constants::{IMAGE_EXTENSIONS, PREVIEW_HEIGHT, PREVIEW_WIDTH};
use yolo_processor_core::shared::frame::Frame;
use yolo_processor_core::shared::source::RunTarget;
use yolo_processor_core::video::infrastructure::ffmpeg_media_factory::FfmpegMediaFactory;

use crate::theme;
use crate::widgets::primary_button::primary_button;
use crate::workers::run_worker::{self, WorkerMessage};

const POLL_INTERVAL: Duration = Duration::from_millis(16);

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Message {
    BrowseVideo,
    BrowseImage,
    VideoPicked(Option<PathBuf>),
    ImagePicked(Option<PathBuf>),
    FileDropped(PathBuf),
    Run,
    QuitPressed,
    PollWorker,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// An in-flight run: the worker's channel and its quit flag.
struct ActiveRun {
    rx: Receiver<WorkerMessage>,
    quit: Arc<AtomicBool>,
}

pub struct App {
    state: AppState,
    processor: Arc<Mutex<Processor>>,
    /// Used on the UI thread for thumbnails, so a preview never waits for
    /// the processor lock held by a run.
    preview_media: FfmpegMediaFactory,
    preview_handle: Option<image::Handle>,
    run: Option<ActiveRun>,
}

impl App {
    pub fn new(processor: Arc<Mutex<Processor>>) -> (Self, Task<Message>) {
        (
            Self {
                state: AppState::new(),
                processor,
                preview_media: FfmpegMediaFactory::new(),
                preview_handle: None,
                run: None,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::BrowseVideo => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Select Video File")
                            .add_filter("All Files", &["*"])
                            .add_filter("MP4 Files", &["mp4"])
                            .pick_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::VideoPicked,
                );
            }
            Message::BrowseImage => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Select Image File")
                            .add_filter("All Files", &["*"])
                            .add_filter("Image Files", IMAGE_EXTENSIONS)
                            .pick_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::ImagePicked,
                );
            }
            Message::VideoPicked(path) => self.apply(Command::BrowseVideo(path)),
            Message::ImagePicked(path) => self.apply(Command::BrowseImage(path)),
            Message::FileDropped(path) => {
                if self.run.is_some() {
                    log::debug!("Drop of {} ignored: a run is active", path.display());
                } else {
                    self.apply(Command::Drop(vec![path]));
                }
            }
            Message::Run => {
                if self.run.is_some() {
                    log::debug!("Run ignored: a run is already active");
                    return Task::none();
                }
                let target = self.state.handle(Command::Run, &self.preview_media);
                if target != RunTarget::None {
                    let (rx, quit) = run_worker::spawn(
                        self.processor.clone(),
                        target,
                        self.state.outputs().clone(),
                    );
                    self.run = Some(ActiveRun { rx, quit });
                }
            }
            Message::QuitPressed => {
                if let Some(run) = &self.run {
                    log::info!("Quit requested");
                    run.quit.store(true, Ordering::Relaxed);
                }
            }
            Message::PollWorker => self.poll_worker(),
        }
        Task::none()
    }

    fn apply(&mut self, command: Command) {
        self.state.handle(command, &self.preview_media);
        self.refresh_preview();
    }

    fn poll_worker(&mut self) {
        let Some(run) = &self.run else {
            return;
        };

        let mut latest_frame = None;
        let mut finished = false;
        loop {
            match run.rx.try_recv() {
                Ok(WorkerMessage::Frame(frame)) => latest_frame = Some(frame),
                Ok(WorkerMessage::Status(status)) => self.state.status(&status),
                Ok(WorkerMessage::Finished) | Err(TryRecvError::Disconnected) => {
                    finished = true;
                    break;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        // Only the newest frame of a batch is worth converting for display.
        if let Some(frame) = latest_frame {
            self.state.frame(&frame);
            self.refresh_preview();
        }
        if finished {
            self.run = None;
        }
    }

    fn refresh_preview(&mut self) {
        self.preview_handle = self.state.preview().map(to_handle);
    }

    pub fn view(&self) -> Element<'_, Message> {
        let preview: Element<'_, Message> = match &self.preview_handle {
            Some(handle) => image(handle.clone())
                .content_fit(ContentFit::Contain)
                .filter_method(image::FilterMethod::Linear)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => center(text("No preview").color(theme::muted_color(&self.theme()))).into(),
        };

        let panel = container(preview)
            .width(PREVIEW_WIDTH as f32)
            .height(PREVIEW_HEIGHT as f32)
            .style(|theme: &Theme| container::Style {
                background: Some(theme::surface_color(theme).into()),
                border: iced::border::Border {
                    radius: 15.0.into(),
                    ..iced::border::Border::default()
                },
                ..container::Style::default()
            });

        let status = text(self.state.status_text()).size(15);

        let idle = self.run.is_none();
        let buttons = row![
            primary_button("Browse Video", idle.then_some(Message::BrowseVideo)),
            primary_button("Browse Image", idle.then_some(Message::BrowseImage)),
            primary_button("Run", idle.then_some(Message::Run)),
        ]
        .spacing(12);

        container(
            column![panel, status, buttons]
                .spacing(14)
                .align_x(iced::Alignment::Center),
        )
        .padding(20)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    pub fn theme(&self) -> Theme {
        theme::app_theme()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let events = event::listen_with(map_event);
        if self.run.is_some() {
            Subscription::batch([
                events,
                iced::time::every(POLL_INTERVAL).map(|_| Message::PollWorker),
            ])
        } else {
            events
        }
    }
}

/// Window-level input: dropped files and the `q` key.
fn map_event(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => match key.as_ref() {
            keyboard::Key::Character("q") | keyboard::Key::Character("Q") => {
                Some(Message::QuitPressed)
            }
            _ => None,
        },
        _ => None,
    }
}

fn to_handle(frame: &Frame) -> image::Handle {
    let rgba: Vec<u8> = frame
        .data()
        .chunks_exact(3)
        .flat_map(|px| [px[0], px[1], px[2], 255])
        .collect();
    image::Handle::from_rgba(frame.width(), frame.height(), rgba)
}
