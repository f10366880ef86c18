use iced::widget::{column, container, row, text, Space};
use iced::{Border, Element, Length, Padding, Theme};

use crate::app::Message;
use crate::core::model::ShowDetailsViewState;
use crate::core::text::ShowDetailsTextCreator;
use crate::theme;

const TOOLBAR_HEIGHT: f32 = 56.0;
const POSTER_WIDTH: f32 = 96.0;
const POSTER_HEIGHT: f32 = 144.0;

fn initials(title: &str) -> String {
    title
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .filter(|c| c.is_alphanumeric())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

/// Poster placeholder, hidden until the enter transition has started.
fn poster<'a>(title: &str, visible: bool, alpha: f32) -> Element<'a, Message> {
    if !visible {
        return Space::new().width(POSTER_WIDTH).height(POSTER_HEIGHT).into();
    }
    container(
        text(initials(title))
            .size(28)
            .color(theme::with_alpha(theme::TEXT_PRIMARY, alpha)),
    )
    .width(POSTER_WIDTH)
    .height(POSTER_HEIGHT)
    .center_x(POSTER_WIDTH)
    .center_y(POSTER_HEIGHT)
    .style(move |_: &Theme| container::Style {
        background: Some(theme::with_alpha(theme::ACCENT_DIM, alpha).into()),
        border: Border {
            color: theme::with_alpha(theme::BORDER_LIGHT, alpha),
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    })
    .into()
}

/// Hero header at the top of the list. It scrolls away with the content and
/// fades out as the header collapses.
pub fn show_header<'a>(
    state: &'a ShowDetailsViewState,
    text_creator: &ShowDetailsTextCreator,
    collapse_distance: f32,
    progress: f32,
    entered: bool,
) -> Element<'a, Message> {
    let alpha = 1.0 - progress.clamp(0.0, 1.0);
    let show = &state.show;

    let mut details = column![
        text(&show.title)
            .size(24)
            .color(theme::with_alpha(theme::TEXT_PRIMARY, alpha)),
        text(text_creator.header_subtitle(show))
            .size(13)
            .color(theme::with_alpha(theme::TEXT_SECONDARY, alpha)),
    ]
    .spacing(6)
    .width(Length::Fill);

    if let Some(genres) = text_creator.genres(show) {
        details = details.push(
            text(genres)
                .size(12)
                .color(theme::with_alpha(theme::TEXT_MUTED, alpha)),
        );
    }
    if let (Some(rating), Some(label)) = (show.rating, text_creator.rating(show)) {
        details = details.push(
            text(label)
                .size(13)
                .color(theme::with_alpha(theme::rating_color(rating), alpha)),
        );
    }

    container(
        column![
            Space::new().height(Length::Fill),
            row![poster(&show.title, entered, alpha), details]
                .spacing(16)
                .align_y(iced::Alignment::End),
        ]
        .padding(Padding::from([16, 20])),
    )
    .width(Length::Fill)
    .height(collapse_distance + TOOLBAR_HEIGHT)
    .style(move |_: &Theme| container::Style {
        background: Some(theme::with_alpha(theme::HERO_TOP, alpha).into()),
        ..Default::default()
    })
    .into()
}

pub fn toolbar_height() -> f32 {
    TOOLBAR_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Halt and Catch Fire"), "HA");
        assert_eq!(initials("mr. robot"), "MR");
        assert_eq!(initials(""), "");
    }
}
