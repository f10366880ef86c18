use chrono::Utc;
use iced::widget::scrollable::AbsoluteOffset;
use iced::widget::{Id, column, container, operation, scrollable, stack, text};
use iced::{Element, Length, Subscription, Task, Theme};
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::core::intent::{Intent, ListEvent};
use crate::core::library::{self, Catalog, Library};
use crate::core::navigator::{Destination, NavStack};
use crate::core::text::ShowDetailsTextCreator;
use crate::core::view_model::Effect;
use crate::screen::ShowDetailsScreen;
use crate::theme as app_theme;
use crate::ui;
use crate::ui::toast::{Toast, ToastType};

const ANIMATION_FRAME: Duration = Duration::from_millis(16);

// ── Message enum ──

#[derive(Debug, Clone)]
pub enum Message {
    // Library
    Loaded(Result<Library, String>),
    Reloaded(i64, Result<Catalog, String>),

    // Screen
    Intent(Intent),
    List(ListEvent),
    Scrolled(scrollable::Viewport),
    AnimationTick,

    // Toast
    DismissToast(u64),
    TickToasts,

    // Keyboard
    KeyPressed(iced::keyboard::Key, iced::keyboard::Modifiers),
}

/// Programmatic scroll that puts a screen's list back at the offset its
/// header motion was computed from.
#[derive(Debug, Clone, PartialEq)]
struct ScrollRestore {
    id: Id,
    offset_y: f32,
}

impl ScrollRestore {
    fn into_task(self) -> Task<Message> {
        operation::scroll_to(
            self.id,
            AbsoluteOffset {
                x: 0.0,
                y: self.offset_y,
            },
        )
    }
}

/// Runtime work left over after an intent was applied.
#[derive(Debug, Default)]
struct Applied {
    exit: bool,
    restore: Option<ScrollRestore>,
    reload: Option<i64>,
}

/// What the application needs to boot.
#[derive(Debug, Clone)]
pub struct Boot {
    pub config: AppConfig,
    pub show_id: i64,
}

// ── App state ──

pub struct App {
    config: AppConfig,
    library: Option<Library>,
    loading: bool,

    nav: NavStack,
    screens: Vec<ShowDetailsScreen>,
    text: ShowDetailsTextCreator,

    toasts: Vec<Toast>,
    next_toast_id: u64,
}

impl App {
    pub fn new(boot: Boot) -> (Self, Task<Message>) {
        let path = boot.config.library_path.clone();
        let init_task = Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    library::load_library(&path).map_err(|e| e.to_string())
                })
                .await
                .map_err(|e| format!("Task error: {e}"))?
            },
            Message::Loaded,
        );

        let screen = ShowDetailsScreen::create(boot.show_id, &boot.config);
        let app = App {
            nav: NavStack::new(Destination::Show(boot.show_id)),
            screens: vec![screen],
            config: boot.config,
            library: None,
            loading: true,
            text: ShowDetailsTextCreator,
            toasts: Vec::new(),
            next_toast_id: 1,
        };

        (app, init_task)
    }

    pub fn title(&self) -> String {
        self.screens
            .last()
            .and_then(|s| s.state())
            .map(|s| s.show.title.clone())
            .unwrap_or_else(|| "Show Details".to_string())
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn add_toast(&mut self, message: String, toast_type: ToastType) {
        let id = self.next_toast_id;
        self.next_toast_id += 1;
        self.toasts.push(Toast::new(id, message, toast_type));
    }

    /// Re-bind the top screen to the current library contents.
    fn invalidate(&mut self) {
        if let (Some(screen), Some(library)) = (self.screens.last_mut(), self.library.as_ref()) {
            screen.invalidate(library);
        }
    }

    /// Bring the screen stack in line with the show destinations on the back
    /// stack. Returns a scroll restore when a different screen ends up on top.
    fn sync_screens(&mut self) -> Option<ScrollRestore> {
        let top_before = self.screens.last().map(|s| s.scroll_id());

        let shows = self.nav.shows();
        let kept = self
            .screens
            .iter()
            .zip(&shows)
            .take_while(|(screen, id)| screen.arguments().show_id == **id)
            .count();
        self.screens.truncate(kept);
        for id in &shows[kept..] {
            self.screens.push(ShowDetailsScreen::create(*id, &self.config));
        }
        if let Some(shared) = self.nav.take_shared() {
            tracing::debug!("Shared elements for entering screen: {shared:?}");
        }

        let top = self.screens.last()?;
        if top_before.as_ref() == Some(&top.scroll_id()) {
            return None;
        }
        Some(ScrollRestore {
            id: top.scroll_id(),
            offset_y: top.scroll_offset(),
        })
    }

    fn apply(&mut self, intent: Intent) -> Applied {
        let (Some(screen), Some(library)) = (self.screens.last_mut(), self.library.as_mut()) else {
            tracing::debug!("Dropping {intent:?}, screen not ready");
            return Applied::default();
        };

        let show_id = screen.arguments().show_id;
        let effect = screen
            .view_model
            .dispatch(library, intent, &mut self.nav, Utc::now());

        if self.nav.is_empty() {
            tracing::info!("Back stack empty, exiting");
            return Applied {
                exit: true,
                ..Applied::default()
            };
        }
        let restore = self.sync_screens();
        self.invalidate();

        Applied {
            exit: false,
            restore,
            reload: (effect == Some(Effect::ReloadLibrary)).then_some(show_id),
        }
    }

    fn dispatch(&mut self, intent: Intent) -> Task<Message> {
        let applied = self.apply(intent);
        if applied.exit {
            return iced::exit();
        }

        let mut tasks = Vec::new();
        if let Some(restore) = applied.restore {
            tasks.push(restore.into_task());
        }
        if let Some(show_id) = applied.reload {
            let path = self.config.library_path.clone();
            tasks.push(Task::perform(
                async move { library::load_catalog(path).await.map_err(|e| e.to_string()) },
                move |result| Message::Reloaded(show_id, result),
            ));
        }
        Task::batch(tasks)
    }

    fn on_list_scrolled(&mut self, offset_y: f32) {
        if let Some(screen) = self.screens.last_mut() {
            let effects = screen.on_scroll(offset_y, Instant::now());
            if !effects.is_empty() {
                tracing::trace!("Follow button effects: {effects:?}");
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subs = vec![];

        // Toast auto-dismiss ticker
        if !self.toasts.is_empty() {
            subs.push(iced::time::every(Duration::from_millis(100)).map(|_| Message::TickToasts));
        }

        // Follow button animation frames
        if self.screens.last().is_some_and(|s| s.is_animating()) {
            subs.push(iced::time::every(ANIMATION_FRAME).map(|_| Message::AnimationTick));
        }

        subs.push(iced::event::listen_with(|event, status, _id| match event {
            iced::Event::Keyboard(iced::keyboard::Event::KeyPressed { key, modifiers, .. })
                if status == iced::event::Status::Ignored =>
            {
                Some(Message::KeyPressed(key, modifiers))
            }
            _ => None,
        }));

        Subscription::batch(subs)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(Ok(library)) => {
                self.library = Some(library);
                self.loading = false;
                self.invalidate();
                if self.screens.last().is_some_and(|s| s.state().is_none()) {
                    let id = self.nav.current_show().unwrap_or_default();
                    self.add_toast(format!("Show {id} is not in the library"), ToastType::Warning);
                }
                Task::none()
            }
            Message::Loaded(Err(e)) => {
                self.loading = false;
                tracing::error!("Failed to load library: {e}");
                self.add_toast(format!("Load error: {e}"), ToastType::Error);
                Task::none()
            }

            Message::Reloaded(show_id, result) => {
                let Some(library) = self.library.as_mut() else {
                    return Task::none();
                };
                let outcome = match self
                    .screens
                    .iter_mut()
                    .rev()
                    .find(|s| s.arguments().show_id == show_id)
                {
                    Some(screen) => screen.view_model.on_reloaded(library, result),
                    None => result.map(|catalog| library.replace_catalog(catalog)),
                };
                match outcome {
                    Ok(()) => self.add_toast("Refreshed".to_string(), ToastType::Success),
                    Err(e) => {
                        tracing::warn!("Refresh failed for show {show_id}: {e}");
                        self.add_toast(format!("Refresh error: {e}"), ToastType::Error);
                    }
                }
                self.invalidate();
                Task::none()
            }

            // ── Screen ──
            Message::Intent(intent) => self.dispatch(intent),
            Message::List(event) => self.dispatch(event.into()),
            Message::Scrolled(viewport) => {
                self.on_list_scrolled(viewport.absolute_offset().y);
                Task::none()
            }
            Message::AnimationTick => {
                if let Some(screen) = self.screens.last_mut() {
                    screen.tick(Instant::now());
                }
                Task::none()
            }

            // ── Toast ──
            Message::DismissToast(id) => {
                self.toasts.retain(|t| t.id != id);
                Task::none()
            }
            Message::TickToasts => {
                self.toasts.retain(|t| !t.is_expired());
                Task::none()
            }

            // ── Keyboard ──
            Message::KeyPressed(key, modifiers) => {
                use iced::keyboard::Key;
                use iced::keyboard::key::Named;

                match key {
                    // Same rule as the toolbar's up button: never pop the root screen
                    Key::Named(Named::Escape | Named::Backspace) if self.nav.depth() > 1 => {
                        self.dispatch(Intent::NavigateUp)
                    }
                    Key::Character(c) if !modifiers.command() => match c.as_str() {
                        "f" => self.dispatch(Intent::ToggleFollow),
                        "r" => self.dispatch(Intent::Refresh { force: true }),
                        _ => Task::none(),
                    },
                    _ => Task::none(),
                }
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let now = Instant::now();
        let can_go_up = self.nav.depth() > 1;

        let Some(screen) = self.screens.last() else {
            return container(text("")).into();
        };

        let body: Element<'_, Message> = match screen.state() {
            Some(state) => {
                let progress = screen.header_progress();
                let content = column![
                    ui::header::show_header(
                        state,
                        &self.text,
                        self.config.collapse_distance,
                        progress,
                        screen.transitions_started(),
                    ),
                    ui::details_list::details_list(state, &self.text, Utc::now()),
                ]
                .width(Length::Fill);

                let list = scrollable(content)
                    .id(screen.scroll_id())
                    .on_scroll(Message::Scrolled)
                    .width(Length::Fill)
                    .height(Length::Fill);

                let toolbar = ui::toolbar::toolbar(
                    &state.show.title,
                    progress,
                    screen.header_collapsed(),
                    can_go_up,
                    state.refreshing,
                );

                stack![
                    list,
                    toolbar,
                    ui::fab::follow_fab(state.is_followed, screen.fab_alpha(now)),
                ]
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
            }
            None => {
                let label = if self.loading {
                    "Loading…".to_string()
                } else {
                    format!("Show {} is unavailable", screen.arguments().show_id)
                };
                column![
                    ui::toolbar::toolbar("", 1.0, true, can_go_up, false),
                    container(text(label).size(14).color(app_theme::TEXT_MUTED))
                        .width(Length::Fill)
                        .height(Length::Fill)
                        .center_x(Length::Fill)
                        .center_y(Length::Fill),
                ]
                .into()
            }
        };

        let base = container(body)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_: &Theme| container::Style {
                background: Some(app_theme::BG_PRIMARY.into()),
                ..Default::default()
            });

        let mut layers: Vec<Element<'_, Message>> = vec![base.into()];

        // Episode overlay
        if let Some(Destination::Episode(episode_id)) = self.nav.current()
            && let Some((season, episode)) =
                screen.state().and_then(|s| s.find_episode(episode_id))
        {
            layers.push(ui::episode_sheet::episode_sheet(
                season,
                episode,
                &self.text,
                Utc::now(),
            ));
        }

        // Toasts
        if !self.toasts.is_empty() {
            layers.push(
                container(ui::toast::toast_container(&self.toasts))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(iced::alignment::Horizontal::Right)
                    .align_y(iced::alignment::Vertical::Top)
                    .into(),
            );
        }

        stack(layers).width(Length::Fill).height(Length::Fill).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fab::FabVisibility;
    use crate::core::intent::ElementId;
    use crate::core::library::tests::SAMPLE;
    use iced::keyboard::key::Named;
    use iced::keyboard::{Key, Modifiers};

    fn app() -> App {
        let boot = Boot {
            config: AppConfig {
                collapse_distance: 100.0,
                ..AppConfig::default()
            },
            show_id: 1,
        };
        let (mut app, _) = App::new(boot);
        let _ = app.update(Message::Loaded(Ok(Library::from_json(SAMPLE).unwrap())));
        app
    }

    #[test]
    fn test_loaded_binds_state() {
        let app = app();
        assert!(!app.loading);
        assert_eq!(app.title(), "Halt and Catch Fire");
        assert!(app.screens[0].transitions_started());
    }

    #[test]
    fn test_fab_click_toggles_follow() {
        let mut app = app();
        let _ = app.update(Message::Intent(Intent::ToggleFollow));
        assert!(app.screens[0].state().unwrap().is_followed);
    }

    #[test]
    fn test_related_show_pushes_screen_and_up_pops() {
        let mut app = app();
        let _ = app.update(Message::List(ListEvent::RelatedShowClicked {
            show_id: 2,
            view: ElementId::poster(2),
        }));
        assert_eq!(app.screens.len(), 2);
        assert_eq!(app.title(), "Mr. Robot");
        assert!(app.screens[1].state().unwrap().is_followed);

        let _ = app.update(Message::Intent(Intent::NavigateUp));
        assert_eq!(app.screens.len(), 1);
        assert_eq!(app.title(), "Halt and Catch Fire");
    }

    #[test]
    fn test_screen_change_restores_its_scroll_offset() {
        let mut app = app();
        app.on_list_scrolled(200.0);
        assert_eq!(app.screens[0].header_progress(), 1.0);

        let pushed = app.apply(
            ListEvent::RelatedShowClicked {
                show_id: 2,
                view: ElementId::poster(2),
            }
            .into(),
        );
        let entered = &app.screens[1];
        assert_eq!(
            pushed.restore,
            Some(ScrollRestore {
                id: entered.scroll_id(),
                offset_y: 0.0,
            })
        );
        assert_eq!(entered.header_progress(), 0.0);
        assert_eq!(entered.fab_visibility(), FabVisibility::Shown);

        let popped = app.apply(Intent::NavigateUp);
        let back = &app.screens[0];
        assert_eq!(
            popped.restore,
            Some(ScrollRestore {
                id: back.scroll_id(),
                offset_y: 200.0,
            })
        );
        assert_eq!(back.header_progress(), 1.0);
        assert!(back.fab_visibility().is_or_will_be_hidden());
    }

    #[test]
    fn test_episode_overlay_does_not_scroll() {
        let mut app = app();
        app.on_list_scrolled(40.0);
        let applied = app.apply(
            ListEvent::EpisodeClicked {
                episode_id: 101,
                view: ElementId::episode(101),
            }
            .into(),
        );
        assert!(applied.restore.is_none());
        assert!(!applied.exit);
    }

    #[test]
    fn test_escape_on_root_screen_stays_open() {
        let mut app = app();
        let _ = app.update(Message::KeyPressed(
            Key::Named(Named::Escape),
            Modifiers::empty(),
        ));
        assert_eq!(app.nav.depth(), 1);
        assert_eq!(app.screens.len(), 1);

        let _ = app.update(Message::List(ListEvent::RelatedShowClicked {
            show_id: 3,
            view: ElementId::poster(3),
        }));
        let _ = app.update(Message::KeyPressed(
            Key::Named(Named::Backspace),
            Modifiers::empty(),
        ));
        assert_eq!(app.nav.depth(), 1);
        assert_eq!(app.title(), "Halt and Catch Fire");
    }

    #[test]
    fn test_refresh_requests_reload_for_top_show() {
        let mut app = app();
        let applied = app.apply(Intent::Refresh { force: true });
        assert_eq!(applied.reload, Some(1));
        assert!(applied.restore.is_none());
    }

    #[test]
    fn test_episode_overlay_keeps_show_screen() {
        let mut app = app();
        let _ = app.update(Message::List(ListEvent::EpisodeClicked {
            episode_id: 101,
            view: ElementId::episode(101),
        }));
        assert_eq!(app.nav.current(), Some(Destination::Episode(101)));
        assert_eq!(app.screens.len(), 1);

        let _ = app.update(Message::Intent(Intent::NavigateUp));
        assert_eq!(app.nav.current(), Some(Destination::Show(1)));
    }

    #[test]
    fn test_season_callbacks_update_state() {
        let mut app = app();
        let _ = app.update(Message::List(ListEvent::ToggleSeasonExpanded(11)));
        let _ = app.update(Message::List(ListEvent::MarkSeasonIgnored(12)));
        let state = app.screens[0].state().unwrap();
        assert!(state.is_expanded(11));
        assert!(state.seasons.iter().any(|s| s.season.id == 12 && s.ignored));
    }

    #[test]
    fn test_failed_load_reports_toast() {
        let (mut app, _) = App::new(Boot {
            config: AppConfig::default(),
            show_id: 1,
        });
        let _ = app.update(Message::Loaded(Err("boom".to_string())));
        assert!(!app.loading);
        assert_eq!(app.toasts.len(), 1);
        assert_eq!(app.screens[0].fab_visibility(), FabVisibility::Shown);
    }
}
