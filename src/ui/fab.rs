use iced::widget::{button, container, text, Space};
use iced::{Border, Element, Length, Padding, Shadow, Vector};

use crate::app::Message;
use crate::core::intent::Intent;
use crate::theme;

/// Floating follow button, bottom-right. Fully transparent renders nothing so
/// the list underneath stays clickable.
pub fn follow_fab(is_followed: bool, alpha: f32) -> Element<'static, Message> {
    if alpha <= 0.0 {
        return Space::new().width(0).height(0).into();
    }

    let (label, color) = if is_followed {
        ("✓ Following", theme::SUCCESS)
    } else {
        ("+ Follow", theme::ACCENT)
    };

    let fab = button(
        text(label)
            .size(14)
            .color(theme::with_alpha(theme::TEXT_PRIMARY, alpha)),
    )
    .padding(Padding::from([14, 22]))
    .style(move |_, status| {
        let bg = match status {
            button::Status::Hovered if !is_followed => theme::ACCENT_HOVER,
            _ => color,
        };
        button::Style {
            background: Some(theme::with_alpha(bg, alpha).into()),
            text_color: theme::TEXT_PRIMARY,
            border: Border::default().rounded(28),
            shadow: Shadow {
                color: theme::with_alpha(iced::Color::BLACK, 0.4 * alpha),
                offset: Vector::new(0.0, 4.0),
                blur_radius: 12.0,
            },
            ..Default::default()
        }
    })
    .on_press(Message::Intent(Intent::ToggleFollow));

    container(fab)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(iced::alignment::Horizontal::Right)
        .align_y(iced::alignment::Vertical::Bottom)
        .padding(24)
        .into()
}
