use iced::widget::{column, container, mouse_area, text};
use iced::{Border, Color, Element, Length, Padding, Theme};
use std::time::{Duration, Instant};

use crate::app::Message;
use crate::theme;

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastType {
    Success,
    Error,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub toast_type: ToastType,
    pub created_at: Instant,
}

impl Toast {
    pub fn new(id: u64, message: String, toast_type: ToastType) -> Self {
        Self {
            id,
            message,
            toast_type,
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > TOAST_TTL
    }
}

/// (border, background, text)
fn toast_colors(tt: ToastType) -> (Color, Color, Color) {
    let accent = match tt {
        ToastType::Success => theme::SUCCESS,
        ToastType::Error => theme::ERROR,
        ToastType::Warning => theme::WARNING,
    };
    (accent, theme::with_alpha(accent, 0.15), accent)
}

/// Stacked toasts, top-right under the toolbar. Click to dismiss.
pub fn toast_container(toasts: &[Toast]) -> Element<'_, Message> {
    let toast_views: Vec<Element<'_, Message>> = toasts
        .iter()
        .map(|t| {
            let (border_color, bg_color, text_color) = toast_colors(t.toast_type);

            mouse_area(
                container(text(&t.message).size(13).color(text_color))
                    .padding(Padding::from([10, 16]))
                    .width(280)
                    .style(move |_: &Theme| container::Style {
                        background: Some(bg_color.into()),
                        border: Border {
                            color: border_color,
                            width: 1.0,
                            radius: 8.0.into(),
                        },
                        ..Default::default()
                    }),
            )
            .on_press(Message::DismissToast(t.id))
            .into()
        })
        .collect();

    container(column(toast_views).spacing(8))
        .padding(Padding::from([72, 16]))
        .width(Length::Shrink)
        .into()
}
