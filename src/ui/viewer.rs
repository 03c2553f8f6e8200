/// Image pane used for both the original and the restored photo
use iced::widget::image::Handle;
use iced::widget::{column, container, image, text};
use iced::{Alignment, Border, ContentFit, Element, Length, Theme};

use crate::Message;

/// Side length of a pane in logical pixels
const PANE_SIZE: f32 = 380.0;

/// Render a titled pane.
///
/// Loading wins over an image, an image wins over the placeholder.
pub fn pane<'a>(title: &'a str, handle: Option<&Handle>, loading: bool) -> Element<'a, Message> {
    let body: Element<'a, Message> = if loading {
        text("Restoring...").size(18).into()
    } else if let Some(handle) = handle {
        image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into()
    } else {
        text("Your photo will appear here").size(14).into()
    };

    let frame = container(body)
        .width(Length::Fixed(PANE_SIZE))
        .height(Length::Fixed(PANE_SIZE))
        .center_x(Length::Fixed(PANE_SIZE))
        .center_y(Length::Fixed(PANE_SIZE))
        .style(|theme: &Theme| {
            let palette = theme.extended_palette();
            container::Style {
                background: Some(palette.background.weak.color.into()),
                border: Border {
                    color: palette.background.strong.color,
                    width: 1.0,
                    radius: 12.0.into(),
                },
                ..container::Style::default()
            }
        });

    column![text(title).size(20), frame]
        .spacing(12)
        .align_x(Alignment::Center)
        .into()
}
