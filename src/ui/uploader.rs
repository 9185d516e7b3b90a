/// Upload area views: the empty drop zone and the selected-image preview

use iced::widget::{button, column, container, image, row, text};
use iced::{Alignment, Border, Color, Element, Length};

use crate::state::data::SelectedImage;
use crate::Message;

/// Shown while no image is selected. Clicking browses; dropping a file
/// anywhere on the window goes through the same accept path.
pub fn drop_zone() -> Element<'static, Message> {
    let content = column![
        text("📷").size(44),
        text("Click to upload or drag and drop").size(18),
        text("PNG, JPG, or WEBP")
            .size(14)
            .color(Color::from_rgb8(0x6B, 0x72, 0x80)),
        button("Browse Files").on_press(Message::PickImage).padding(10),
    ]
    .spacing(12)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .padding(48)
        .center_x(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Color::from_rgb8(0xF9, 0xFA, 0xFB).into()),
            border: Border {
                color: Color::from_rgb8(0xD1, 0xD5, 0xDB),
                width: 2.0,
                radius: 12.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

/// The held image with Analyze/Clear actions. Both buttons are disabled
/// while a call is in flight; the update loop would ignore a second
/// analyze anyway, but there is no point offering it.
pub fn preview(selected: &SelectedImage, analyzing: bool) -> Element<'_, Message> {
    let photo = image(image::Handle::from_bytes(selected.bytes.clone()))
        .height(Length::Fixed(320.0));

    let analyze_label = if analyzing { "Analyzing..." } else { "Analyze Image" };

    let actions = row![
        button(analyze_label)
            .on_press_maybe((!analyzing).then_some(Message::Analyze))
            .padding(12),
        button("Clear Image")
            .on_press_maybe((!analyzing).then_some(Message::Clear))
            .padding(12)
            .style(button::secondary),
    ]
    .spacing(16);

    column![photo, actions]
        .spacing(20)
        .align_x(Alignment::Center)
        .into()
}
