/// UI building blocks
///
/// One view function per piece of the page. Which pieces are shown is
/// decided by the lifecycle state in `main::view`; nothing here holds
/// state of its own.

pub mod report;
pub mod uploader;

use iced::widget::{column, container, text};
use iced::{Border, Color, Element, Length};

use crate::Message;

/// Banner for both error kinds: local validation (bad file, no image)
/// and a failed analysis call.
pub fn error_banner(message: &str) -> Element<'_, Message> {
    container(
        text(format!("Error: {}", message))
            .size(15)
            .color(Color::from_rgb8(0x99, 0x1B, 0x1B)),
    )
    .width(Length::Fill)
    .padding(16)
    .style(|_theme| container::Style {
        background: Some(Color::from_rgb8(0xFE, 0xE2, 0xE2).into()),
        border: Border {
            color: Color::from_rgb8(0xFC, 0xA5, 0xA5),
            width: 1.0,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    })
    .into()
}

/// Fixed medical disclaimer shown under the analyzer on every state.
pub fn disclaimer() -> Element<'static, Message> {
    container(
        column![
            text("Important Disclaimer").size(16),
            text(
                "This tool provides AI-generated information for educational purposes only \
                 and is not a substitute for professional medical advice, diagnosis, or \
                 treatment. Always seek the advice of your physician or other qualified \
                 health provider with any questions you may have regarding a medical \
                 condition."
            )
            .size(13)
            .color(Color::from_rgb8(0x85, 0x6A, 0x1D)),
        ]
        .spacing(8),
    )
    .width(Length::Fill)
    .padding(16)
    .style(|_theme| container::Style {
        background: Some(Color::from_rgb8(0xFE, 0xFC, 0xE8).into()),
        border: Border {
            color: Color::from_rgb8(0xFA, 0xCC, 0x15),
            width: 1.0,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    })
    .into()
}
