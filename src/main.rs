use std::path::PathBuf;

use iced::widget::{button, column, container, row, text, Column};
use iced::{event, window, Alignment, Border, Color, Element, Event, Length, Subscription, Task, Theme};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod restore;
mod state;
mod ui;

use config::Config;
use error::StartupError;
use restore::RestorationClient;
use state::data::RestoredImage;
use state::session::Session;
use ui::{uploader, viewer};

/// Main application state
struct PhotoRestorer {
    /// Configured connection to the image service
    client: RestorationClient,
    /// Selection, result, error and in-flight tracking
    session: Session,
    /// Files are being dragged over the window
    hovering: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the upload zone
    PickFile,
    /// Files entered the window during a drag
    FileHovered,
    /// The drag left the window without dropping
    FilesHoveredLeft,
    /// A file was dropped onto the window
    FileDropped(PathBuf),
    /// User clicked "Restore Photo"
    Restore,
    /// Background restoration finished for the given generation
    RestoreFinished(u64, Result<RestoredImage, String>),
}

impl PhotoRestorer {
    fn new(client: RestorationClient) -> (Self, Task<Message>) {
        (
            PhotoRestorer {
                client,
                session: Session::new(),
                hovering: false,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFile => {
                if !self.session.accepts_uploads() {
                    return Task::none();
                }
                if let Some(path) = uploader::pick_image() {
                    self.offer(path);
                }
                Task::none()
            }
            Message::FileHovered => {
                self.hovering = true;
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.hovering = false;
                Task::none()
            }
            Message::FileDropped(path) => {
                self.hovering = false;
                self.offer(path);
                Task::none()
            }
            Message::Restore => {
                let Some(ticket) = self.session.begin_restore() else {
                    return Task::none();
                };

                info!(
                    generation = ticket.generation,
                    path = %ticket.path.display(),
                    "starting restoration"
                );

                let client = self.client.clone();
                let generation = ticket.generation;
                Task::perform(
                    async move {
                        restore::restore_photo(&client, &ticket.path, &ticket.media_type)
                            .await
                            .map_err(|e| {
                                error!(generation, "restoration failed: {e}");
                                e.to_string()
                            })
                    },
                    move |result| Message::RestoreFinished(generation, result),
                )
            }
            Message::RestoreFinished(generation, result) => {
                if !self.session.finish_restore(generation, result) {
                    info!(
                        generation,
                        current = self.session.generation(),
                        "discarding result of a superseded restoration"
                    );
                    return Task::none();
                }

                if let Some(restored) = self.session.restored() {
                    info!(
                        "✅ Restored image ready ({} bytes, {}, {} base64 chars)",
                        restored.bytes.len(),
                        restored.media_type,
                        restored.base64.len()
                    );
                }
                info!(phase = ?self.session.phase(), "restoration settled");
                Task::none()
            }
        }
    }

    /// Route a picked or dropped file through the upload surface
    fn offer(&mut self, path: PathBuf) {
        let disabled = !self.session.accepts_uploads();
        if let Some(photo) = uploader::receive(path, disabled) {
            self.session.select(photo);
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let restoring = self.session.is_restoring();

        let mut content: Column<Message> = column![
            text("AI Photo Restorer").size(42),
            text("Breathe new life into your old memories. Upload a photo to see the magic.")
                .size(16),
            uploader::view(self.session.selected(), self.hovering, restoring),
        ]
        .spacing(20)
        .padding(40)
        .max_width(900)
        .align_x(Alignment::Center);

        if let Some(message) = self.session.error() {
            content = content.push(error_banner(message));
        }

        if let Some(photo) = self.session.selected() {
            let panes = row![
                viewer::pane("Original Photo", Some(&photo.preview), false),
                viewer::pane(
                    "Restored Photo",
                    self.session.restored().map(|restored| &restored.handle),
                    restoring,
                ),
            ]
            .spacing(24);

            let label = if restoring { "Restoring..." } else { "Restore Photo" };
            let restore_button = button(text(label).size(18))
                .on_press_maybe(self.session.can_restore().then_some(Message::Restore))
                .padding([12, 32])
                .style(button::primary);

            content = content.push(panes).push(restore_button);
        }

        content = content.push(text("Powered by Gemini API").size(12));

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    /// Window drag-and-drop events
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn error_banner<'a>(message: &'a str) -> Element<'a, Message> {
    container(text(message).size(16))
        .padding(12)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            text_color: Some(Color::from_rgb(0.97, 0.44, 0.44)),
            background: Some(Color::from_rgba(0.94, 0.27, 0.27, 0.2).into()),
            border: Border {
                radius: 8.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        })
        .into()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<(), StartupError> {
    init_tracing();

    // The app is useless without a credential, so refuse to open a window
    let config = Config::from_env().inspect_err(|e| error!("{e}"))?;
    let client = RestorationClient::new(&config)?;
    info!("🎨 Photo Restorer starting, sending requests to {}", client.url());

    iced::application("AI Photo Restorer", PhotoRestorer::update, PhotoRestorer::view)
        .subscription(PhotoRestorer::subscription)
        .theme(PhotoRestorer::theme)
        .centered()
        .run_with(move || PhotoRestorer::new(client))?;

    Ok(())
}
