use chrono::{DateTime, Utc};
use iced::widget::{button, column, container, mouse_area, row, scrollable, text, Space};
use iced::{Border, Element, Length, Padding, Theme};

use crate::app::Message;
use crate::core::intent::Intent;
use crate::core::model::{EpisodeWithWatch, Season};
use crate::core::text::ShowDetailsTextCreator;
use crate::theme;

/// Modal overlay for an opened episode. Closing it navigates up.
pub fn episode_sheet<'a>(
    season: &'a Season,
    episode: &'a EpisodeWithWatch,
    text_creator: &ShowDetailsTextCreator,
    now: DateTime<Utc>,
) -> Element<'a, Message> {
    let close = Message::Intent(Intent::NavigateUp);

    let watched = match episode.watched_at {
        Some(at) => text(format!("Watched {}", at.format("%b %-d, %Y")))
            .size(12)
            .color(theme::SUCCESS),
        None => text("Not watched").size(12).color(theme::TEXT_MUTED),
    };

    let content = column![
        text(text_creator.episode_number(season, &episode.episode))
            .size(12)
            .color(theme::ACCENT),
        text(text_creator.episode_title(&episode.episode))
            .size(18)
            .color(theme::TEXT_PRIMARY),
        text(text_creator.air_date(&episode.episode, now))
            .size(12)
            .color(theme::TEXT_SECONDARY),
        watched,
        scrollable(
            text(episode.episode.summary.as_deref().unwrap_or("No summary available."))
                .size(13)
                .color(theme::TEXT_SECONDARY),
        )
        .height(Length::Shrink),
        row![
            Space::new().width(Length::Fill),
            button(text("Close").size(13).color(theme::TEXT_PRIMARY))
                .padding(Padding::from([8, 20]))
                .style(|_, _| button::Style {
                    background: Some(theme::BG_TERTIARY.into()),
                    border: Border {
                        color: theme::BORDER,
                        width: 1.0,
                        radius: 6.0.into(),
                    },
                    ..Default::default()
                })
                .on_press(close.clone()),
        ],
    ]
    .spacing(10)
    .padding(24)
    .width(420);

    let modal = container(content).max_height(520).style(|_: &Theme| container::Style {
        background: Some(theme::BG_SECONDARY.into()),
        border: Border {
            color: theme::BORDER,
            width: 1.0,
            radius: 12.0.into(),
        },
        ..Default::default()
    });

    mouse_area(
        container(modal)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_: &Theme| container::Style {
                background: Some(theme::SCRIM.into()),
                ..Default::default()
            }),
    )
    .on_press(close)
    .into()
}
