/// Upload surface
///
/// Photos arrive either from the native picker or from a file dropped onto
/// the window. Both paths go through `receive`, which refuses anything whose
/// declared media type is not an image and anything offered while the
/// surface is disabled.
use std::path::{Path, PathBuf};

use iced::widget::{button, column, container, image, text};
use iced::{Alignment, Border, Color, ContentFit, Element, Length, Theme};
use rfd::FileDialog;
use thiserror::Error;
use tracing::{info, warn};

use crate::state::data::SelectedImage;
use crate::Message;

/// Extensions offered by the picker
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "webp", "gif", "bmp", "tif", "tiff", "heic", "heif",
];

/// Why a file was not accepted
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadRejected {
    #[error("upload surface is disabled while a restoration is running")]
    Disabled,

    #[error("{} is not an image (declared type: {declared})", path.display())]
    NotAnImage { path: PathBuf, declared: String },
}

/// Show the native file picker. Returns `None` if the user cancels.
pub fn pick_image() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Select a Photo to Restore")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
}

/// Media type implied by the file extension, if any
pub fn declared_media_type(path: &Path) -> Option<String> {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
}

/// Validate a picked or dropped file
pub fn accept(path: PathBuf, disabled: bool) -> Result<SelectedImage, UploadRejected> {
    if disabled {
        return Err(UploadRejected::Disabled);
    }

    match declared_media_type(&path) {
        Some(media_type) if media_type.starts_with("image/") => {
            Ok(SelectedImage::new(path, media_type))
        }
        other => Err(UploadRejected::NotAnImage {
            path,
            declared: other.unwrap_or_else(|| "unknown".to_string()),
        }),
    }
}

/// Accept a file and hand it to the caller, logging rejections
pub fn receive(path: PathBuf, disabled: bool) -> Option<SelectedImage> {
    match accept(path, disabled) {
        Ok(image) => {
            info!(file = %image.file_name(), media_type = %image.media_type, "photo selected");
            Some(image)
        }
        Err(reason) => {
            warn!("ignoring upload: {reason}");
            None
        }
    }
}

/// Render the drop zone.
///
/// Shows the current photo as a preview once one is selected. The whole
/// zone is a button that opens the picker.
pub fn view<'a>(
    selected: Option<&SelectedImage>,
    hovering: bool,
    disabled: bool,
) -> Element<'a, Message> {
    let content: Element<'a, Message> = match selected {
        Some(photo) => column![
            image(photo.preview.clone())
                .height(Length::Fixed(160.0))
                .content_fit(ContentFit::Contain),
            text("Choose another photo").size(14),
        ]
        .spacing(8)
        .align_x(Alignment::Center)
        .into(),
        None => column![
            text("Click to upload or drag and drop").size(18),
            text("PNG, JPG, WEBP, etc.").size(12),
        ]
        .spacing(6)
        .align_x(Alignment::Center)
        .into(),
    };

    let zone = container(content)
        .padding(32)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .style(move |theme: &Theme| drop_zone_style(theme, hovering, disabled));

    button(zone)
        .on_press_maybe((!disabled).then_some(Message::PickFile))
        .padding(0)
        .width(Length::Fill)
        .style(button::text)
        .into()
}

fn drop_zone_style(theme: &Theme, hovering: bool, disabled: bool) -> container::Style {
    let palette = theme.extended_palette();
    let border_color = if hovering && !disabled {
        palette.primary.strong.color
    } else {
        palette.background.strong.color
    };

    container::Style {
        text_color: disabled.then_some(Color::from_rgb(0.5, 0.5, 0.55)),
        border: Border {
            color: border_color,
            width: 2.0,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    }
}
