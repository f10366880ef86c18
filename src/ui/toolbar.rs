use iced::widget::{button, container, row, text, Space};
use iced::{Border, Element, Length, Padding, Theme};

use crate::app::Message;
use crate::core::intent::Intent;
use crate::theme;
use crate::ui::header::toolbar_height;

/// Toolbar pinned above the list. Its background and title fade in as the
/// header collapses; the bottom border shows once the header rests closed.
pub fn toolbar(
    title: &str,
    progress: f32,
    collapsed: bool,
    can_go_up: bool,
    refreshing: bool,
) -> Element<'static, Message> {
    let progress = progress.clamp(0.0, 1.0);
    let title_alpha = ((progress - 0.5) * 2.0).clamp(0.0, 1.0);

    let up: Element<'static, Message> = if can_go_up {
        toolbar_button("←", Some(Message::Intent(Intent::NavigateUp)))
    } else {
        Space::new().width(36).into()
    };

    let refresh_label = if refreshing { "Refreshing..." } else { "Refresh" };
    let refresh = toolbar_button(
        refresh_label,
        if refreshing {
            None
        } else {
            Some(Message::Intent(Intent::Refresh { force: true }))
        },
    );

    container(
        row![
            up,
            text(title.to_string())
                .size(17)
                .color(theme::with_alpha(theme::TEXT_PRIMARY, title_alpha)),
            Space::new().width(Length::Fill),
            refresh,
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center)
        .padding(Padding::from([0, 12])),
    )
    .width(Length::Fill)
    .height(toolbar_height())
    .center_y(toolbar_height())
    .style(move |_: &Theme| container::Style {
        background: Some(theme::with_alpha(theme::BG_SECONDARY, progress).into()),
        border: Border {
            color: theme::with_alpha(theme::BORDER, progress),
            width: if collapsed { 1.0 } else { 0.0 },
            radius: 0.0.into(),
        },
        ..Default::default()
    })
    .into()
}

fn toolbar_button(label: &str, msg: Option<Message>) -> Element<'static, Message> {
    button(text(label.to_string()).size(13).color(theme::TEXT_PRIMARY))
        .padding(Padding::from([6, 12]))
        .style(|_, status| {
            let bg = match status {
                button::Status::Hovered => theme::BG_HOVER,
                _ => theme::with_alpha(theme::BG_TERTIARY, 0.8),
            };
            button::Style {
                background: Some(bg.into()),
                text_color: theme::TEXT_PRIMARY,
                border: Border::default().rounded(6),
                ..Default::default()
            }
        })
        .on_press_maybe(msg)
        .into()
}
