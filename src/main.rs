use iced::widget::{column, container, scrollable, text, Column};
use iced::{window, Alignment, Color, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

mod analysis;
mod config;
mod state;
mod ui;
mod upload;

use analysis::Analyzer;
use config::Config;
use state::data::{AnalysisReport, SelectedImage};
use state::lifecycle::{AnalysisLifecycle, Lifecycle};
use upload::UploadController;

/// Main application state
struct SkinAnalyzer {
    /// In-flight image loads and their staleness tracking
    uploads: UploadController,
    /// The upload -> analyze -> render state machine
    lifecycle: AnalysisLifecycle,
    /// The external analysis collaborator
    analyzer: Analyzer,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the upload area / "Browse Files"
    PickImage,
    /// User dropped a file onto the window
    FileDropped(PathBuf),
    /// Background image load finished (tagged with its load generation)
    ImageLoaded(u64, Result<SelectedImage, String>),
    /// User clicked "Analyze Image"
    Analyze,
    /// Analysis call resolved (tagged with its call generation);
    /// the error branch carries internal detail for logging only
    AnalysisFinished(u64, Result<AnalysisReport, String>),
    /// User clicked "Clear Image"
    Clear,
}

impl SkinAnalyzer {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // Without a credential the app cannot reach its only collaborator
        let config = Config::from_env()
            .expect("Failed to load configuration. Set GEMINI_API_KEY in the environment or .env.");

        println!("🩺 Skin Analyzer initialized (model: {})", config.model);

        (
            SkinAnalyzer {
                uploads: UploadController::new(),
                lifecycle: AnalysisLifecycle::new(),
                analyzer: Analyzer::new(&config),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImage => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Select a Photo")
                    .add_filter("Images", &upload::PICKER_EXTENSIONS)
                    .pick_file();

                match file {
                    Some(path) => self.begin_load(path),
                    None => Task::none(),
                }
            }
            Message::FileDropped(path) => {
                // Same accept path as the picker; one shared validation
                self.begin_load(path)
            }
            Message::ImageLoaded(generation, result) => {
                if !self.uploads.is_current(generation) {
                    println!("⏭️  Discarding stale image load");
                    return Task::none();
                }

                match result {
                    Ok(image) => self.lifecycle.image_accepted(image),
                    Err(error) => {
                        eprintln!("⚠️  Rejected file: {}", error);
                        self.lifecycle.input_rejected(error);
                    }
                }

                Task::none()
            }
            Message::Analyze => {
                // The lifecycle decides: it refuses with no image and
                // ignores the request while a call is already in flight
                let Some(pending) = self.lifecycle.analyze_requested() else {
                    return Task::none();
                };

                let analyzer = self.analyzer.clone();
                let generation = pending.generation;
                let request = pending.request;

                Task::perform(
                    async move { analyzer.analyze(request).await.map_err(|e| e.to_string()) },
                    move |result| Message::AnalysisFinished(generation, result),
                )
            }
            Message::AnalysisFinished(generation, Ok(report)) => {
                println!("✅ Analysis complete: {}", report.condition_name);
                self.lifecycle.call_succeeded(generation, report);
                Task::none()
            }
            Message::AnalysisFinished(generation, Err(detail)) => {
                // Full detail stays in the log; the UI gets the fixed message
                eprintln!("❌ Analysis failed: {}", detail);
                self.lifecycle.call_failed(generation);
                Task::none()
            }
            Message::Clear => {
                self.uploads.reset();
                self.lifecycle.clear();
                Task::none()
            }
        }
    }

    /// Start a background load for a picked or dropped file
    fn begin_load(&mut self, path: PathBuf) -> Task<Message> {
        let generation = self.uploads.begin();
        Task::perform(upload::load_image(path), move |result| {
            Message::ImageLoaded(generation, result)
        })
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let mut page: Column<Message> = column![
            text("Skin Analyzer").size(40),
            text("Upload a photo of a skin concern for a quick, AI-powered analysis.")
                .size(16)
                .color(Color::from_rgb8(0x6B, 0x72, 0x80)),
        ]
        .spacing(16)
        .align_x(Alignment::Center);

        page = page.push(match self.lifecycle.state() {
            Lifecycle::Idle => ui::uploader::drop_zone(),
            Lifecycle::Ready { image }
            | Lifecycle::Success { image, .. }
            | Lifecycle::Failed { image, .. } => ui::uploader::preview(image, false),
            Lifecycle::Loading { image } => ui::uploader::preview(image, true),
        });

        if let Lifecycle::Loading { .. } = self.lifecycle.state() {
            page = page.push(ui::report::loader());
        }

        if let Some(message) = self.error_message() {
            page = page.push(ui::error_banner(message));
        }

        if let Lifecycle::Success { report, .. } = self.lifecycle.state() {
            page = page.push(ui::report::view(report));
        }

        page = page.push(ui::disclaimer());

        scrollable(
            container(page.max_width(760.0))
                .width(Length::Fill)
                .center_x(Length::Fill)
                .padding(32),
        )
        .into()
    }

    /// The error to surface, if any: a local validation error takes
    /// precedence over a failed analysis from an earlier attempt.
    fn error_message(&self) -> Option<&str> {
        if let Some(error) = self.lifecycle.validation_error() {
            return Some(error);
        }
        match self.lifecycle.state() {
            Lifecycle::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Listen for files dropped onto the window
    fn subscription(&self) -> Subscription<Message> {
        iced::event::listen_with(|event, _status, _window| match event {
            iced::Event::Window(window::Event::FileDropped(path)) => {
                Some(Message::FileDropped(path))
            }
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> iced::Result {
    iced::application("Skin Analyzer", SkinAnalyzer::update, SkinAnalyzer::view)
        .subscription(SkinAnalyzer::subscription)
        .theme(SkinAnalyzer::theme)
        .centered()
        .run_with(SkinAnalyzer::new)
}
