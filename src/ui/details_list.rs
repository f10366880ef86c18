//! The scrolling body of the details screen: summary, related shows and
//! seasons. Every interaction is raised as a [`ListEvent`].

use chrono::{DateTime, Utc};
use iced::widget::{button, column, container, mouse_area, row, scrollable, text, Space};
use iced::{Border, Element, Length, Padding, Theme};

use crate::app::Message;
use crate::core::intent::{ElementId, ListEvent};
use crate::core::model::{
    ActionDate, EpisodeWithWatch, Season, SeasonWithEpisodes, ShowDetailsViewState, TvShow,
};
use crate::core::text::ShowDetailsTextCreator;
use crate::theme;
use crate::ui::badges;

pub fn details_list<'a>(
    state: &'a ShowDetailsViewState,
    text_creator: &ShowDetailsTextCreator,
    now: DateTime<Utc>,
) -> Element<'a, Message> {
    let mut items: Vec<Element<'a, Message>> = Vec::new();

    if let Some(summary) = &state.show.summary {
        items.push(section_title("Summary"));
        items.push(
            text(summary)
                .size(13)
                .color(theme::TEXT_SECONDARY)
                .into(),
        );
    }

    if !state.related.is_empty() {
        items.push(section_title("Related"));
        items.push(related_row(&state.related));
    }

    if !state.seasons.is_empty() {
        items.push(section_title("Seasons"));
        for season in &state.seasons {
            let expanded = state.is_expanded(season.season.id);
            items.push(season_row(season, expanded, text_creator, now));
            if expanded {
                for episode in &season.episodes {
                    items.push(episode_row(&season.season, episode, text_creator, now));
                }
            }
        }
    }

    // Room for the follow button over the last row.
    items.push(Space::new().height(96).into());

    column(items)
        .spacing(10)
        .padding(Padding::from([16, 20]))
        .width(Length::Fill)
        .into()
}

fn section_title<'a>(label: &'a str) -> Element<'a, Message> {
    container(text(label).size(15).color(theme::TEXT_PRIMARY))
        .padding(Padding {
            top: 8.0,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        })
        .into()
}

fn related_row(shows: &[TvShow]) -> Element<'_, Message> {
    let cards: Vec<Element<'_, Message>> = shows
        .iter()
        .map(|show| {
            let show_id = show.id;
            mouse_area(
                container(
                    text(&show.title)
                        .size(12)
                        .color(theme::TEXT_PRIMARY),
                )
                .width(96)
                .height(144)
                .padding(8)
                .center_x(96)
                .center_y(144)
                .style(|_: &Theme| container::Style {
                    background: Some(theme::BG_TERTIARY.into()),
                    border: Border {
                        color: theme::BORDER,
                        width: 1.0,
                        radius: 8.0.into(),
                    },
                    ..Default::default()
                }),
            )
            .on_press(Message::List(ListEvent::RelatedShowClicked {
                show_id,
                view: ElementId::poster(show_id),
            }))
            .into()
        })
        .collect();

    scrollable(row(cards).spacing(10))
        .direction(scrollable::Direction::Horizontal(
            scrollable::Scrollbar::new(),
        ))
        .width(Length::Fill)
        .into()
}

fn season_row<'a>(
    season: &'a SeasonWithEpisodes,
    expanded: bool,
    text_creator: &ShowDetailsTextCreator,
    now: DateTime<Utc>,
) -> Element<'a, Message> {
    let id = season.season.id;
    let watched = season.watched_aired_count(now);
    let aired = season.aired_count(now);

    let mut title_row = row![
        text(text_creator.season_title(&season.season))
            .size(14)
            .color(if season.ignored {
                theme::TEXT_MUTED
            } else {
                theme::TEXT_PRIMARY
            }),
    ]
    .spacing(8)
    .align_y(iced::Alignment::Center);
    if season.ignored {
        title_row = title_row.push(badges::ignored_badge());
    } else if aired > 0 && watched >= aired {
        title_row = title_row.push(badges::watched_badge());
    }

    let header = mouse_area(
        row![
            column![
                title_row,
                text(text_creator.season_summary(season, now))
                    .size(12)
                    .color(theme::season_progress_color(watched, aired)),
            ]
            .spacing(4)
            .width(Length::Fill),
            text(if expanded { "▾" } else { "▸" })
                .size(16)
                .color(theme::TEXT_MUTED),
        ]
        .align_y(iced::Alignment::Center),
    )
    .on_press(Message::List(ListEvent::ToggleSeasonExpanded(id)));

    let mut body = column![header].spacing(10);
    if expanded {
        body = body.push(season_actions(season, watched, now));
    }

    container(body)
        .padding(12)
        .width(Length::Fill)
        .style(|_: &Theme| container::Style {
            background: Some(theme::BG_SECONDARY.into()),
            border: Border {
                color: theme::BORDER,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        })
        .into()
}

fn season_actions<'a>(
    season: &SeasonWithEpisodes,
    watched: usize,
    now: DateTime<Utc>,
) -> Element<'a, Message> {
    let id = season.season.id;
    let mut actions: Vec<Element<'a, Message>> = Vec::new();

    if season.ignored {
        actions.push(action_button(
            "Follow season",
            ListEvent::MarkSeasonFollowed(id),
        ));
    } else {
        if season.aired_count(now) > 0 && season.to_air_count(now) > 0 {
            actions.push(action_button(
                "Watched (aired)",
                ListEvent::MarkSeasonWatched {
                    season_id: id,
                    only_aired: true,
                    date: ActionDate::Now,
                },
            ));
        }
        actions.push(action_button(
            "Watched now",
            ListEvent::MarkSeasonWatched {
                season_id: id,
                only_aired: false,
                date: ActionDate::Now,
            },
        ));
        actions.push(action_button(
            "Watched on air date",
            ListEvent::MarkSeasonWatched {
                season_id: id,
                only_aired: false,
                date: ActionDate::Aired,
            },
        ));
        if watched > 0 {
            actions.push(action_button("Unwatch", ListEvent::MarkSeasonUnwatched(id)));
        }
        actions.push(action_button("Ignore", ListEvent::MarkSeasonIgnored(id)));
    }
    if !season.season.is_specials() && season.season.number > 1 {
        actions.push(action_button(
            "Ignore previous",
            ListEvent::MarkPreviousSeasonsIgnored(id),
        ));
    }

    row(actions).spacing(6).wrap().into()
}

fn action_button<'a>(label: &'a str, event: ListEvent) -> Element<'a, Message> {
    button(text(label).size(11).color(theme::TEXT_PRIMARY))
        .padding(Padding::from([4, 10]))
        .style(|_, status| {
            let bg = match status {
                button::Status::Hovered => theme::BG_HOVER,
                _ => theme::BG_TERTIARY,
            };
            button::Style {
                background: Some(bg.into()),
                text_color: theme::TEXT_PRIMARY,
                border: Border {
                    color: theme::BORDER,
                    width: 1.0,
                    radius: 4.0.into(),
                },
                ..Default::default()
            }
        })
        .on_press(Message::List(event))
        .into()
}

fn episode_row<'a>(
    season: &Season,
    episode: &'a EpisodeWithWatch,
    text_creator: &ShowDetailsTextCreator,
    now: DateTime<Utc>,
) -> Element<'a, Message> {
    let episode_id = episode.episode.id;
    let (marker, marker_color) = if episode.is_watched() {
        ("●", theme::SUCCESS)
    } else if episode.episode.has_aired(now) {
        ("○", theme::TEXT_MUTED)
    } else {
        ("◌", theme::TEXT_MUTED)
    };

    mouse_area(
        container(
            row![
                text(marker).size(12).color(marker_color),
                text(text_creator.episode_number(season, &episode.episode))
                    .size(12)
                    .color(theme::ACCENT),
                column![
                    text(text_creator.episode_title(&episode.episode))
                        .size(13)
                        .color(theme::TEXT_PRIMARY),
                    text(text_creator.air_date(&episode.episode, now))
                        .size(11)
                        .color(theme::TEXT_MUTED),
                ]
                .spacing(2)
                .width(Length::Fill),
            ]
            .spacing(10)
            .align_y(iced::Alignment::Center),
        )
        .padding(Padding {
            top: 6.0,
            right: 12.0,
            bottom: 6.0,
            left: 24.0,
        })
        .width(Length::Fill),
    )
    .on_press(Message::List(ListEvent::EpisodeClicked {
        episode_id,
        view: ElementId::episode(episode_id),
    }))
    .into()
}
