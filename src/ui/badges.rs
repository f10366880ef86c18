use iced::widget::{container, text};
use iced::{Border, Color, Element, Padding, Theme};

use crate::app::Message;
use crate::theme;

fn badge(label: &'static str, color: Color) -> Element<'static, Message> {
    container(text(label).size(10).color(theme::TEXT_PRIMARY))
        .padding(Padding::from([2, 6]))
        .style(move |_: &Theme| container::Style {
            background: Some(color.into()),
            border: Border::default().rounded(3),
            ..Default::default()
        })
        .into()
}

/// Season excluded from progress.
pub fn ignored_badge() -> Element<'static, Message> {
    badge("IGNORED", theme::BG_TERTIARY)
}

/// Every aired episode of the season is watched.
pub fn watched_badge() -> Element<'static, Message> {
    badge("WATCHED", Color { a: 0.7, ..theme::SUCCESS })
}
