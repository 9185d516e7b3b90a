/// Result views: the loading indicator and the rendered analysis report

use iced::widget::{column, container, row, text, Column};
use iced::{Alignment, Border, Color, Element, Length};

use crate::state::data::AnalysisReport;
use crate::Message;

/// Shown while the analysis call is in flight.
pub fn loader() -> Element<'static, Message> {
    column![
        text("⏳").size(32),
        text("AI is analyzing your image...")
            .size(16)
            .color(Color::from_rgb8(0x6B, 0x72, 0x80)),
    ]
    .spacing(8)
    .align_x(Alignment::Center)
    .into()
}

/// The full report: condition header plus symptom and suggestion cards.
pub fn view(report: &AnalysisReport) -> Element<'_, Message> {
    let header = container(
        column![
            text(report.condition_name.as_str()).size(28),
            text(report.description.as_str())
                .size(15)
                .color(Color::from_rgb8(0x37, 0x41, 0x51)),
        ]
        .spacing(8)
        .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .padding(20)
    .center_x(Length::Fill)
    .style(card_style);

    let cards = row![
        section_card("Common Symptoms", &report.symptoms, "•"),
        section_card("Suggestions & Next Steps", &report.suggestions, "✔"),
    ]
    .spacing(16);

    column![header, cards].spacing(16).into()
}

fn section_card<'a>(title: &'a str, items: &'a [String], bullet: &'a str) -> Element<'a, Message> {
    let list = items.iter().fold(Column::new().spacing(6), |col, item| {
        col.push(text(format!("{} {}", bullet, item)).size(14))
    });

    container(column![text(title).size(17), list].spacing(12))
        .width(Length::FillPortion(1))
        .padding(18)
        .style(card_style)
        .into()
}

fn card_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(Color::WHITE.into()),
        border: Border {
            color: Color::from_rgb8(0xE5, 0xE7, 0xEB),
            width: 1.0,
            radius: 10.0.into(),
        },
        ..container::Style::default()
    }
}
