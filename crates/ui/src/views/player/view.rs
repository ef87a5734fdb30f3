use course_core::model::{CourseId, LessonId, QuizId};
use course_core::{CompletionOutcome, Direction};
use dioxus::prelude::*;
use tracing::debug;

use super::lesson::LessonPane;
use super::quiz_panel::QuizPanel;
use crate::context::{AppContext, use_session_guard};
use crate::views::components::ErrorPanel;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{PlayerVm, SidebarModuleVm};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerIntent {
    Select(LessonId),
    Step(Direction),
    CompleteActive,
    Sync,
}

#[component]
pub fn PlayerView(course_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let player = ctx.player();
    let guard = use_session_guard();
    let mut vm = use_signal(|| None::<PlayerVm>);
    let mut action_error = use_signal(|| None::<ViewError>);
    let mut busy = use_signal(|| false);
    let mut open_quiz = use_signal(|| None::<QuizId>);

    let player_for_resource = player.clone();
    let resource = use_resource(move || {
        let player = player_for_resource.clone();
        async move {
            let loaded = PlayerVm::load(&player, CourseId::new(course_id))
                .await
                .inspect_err(|err| {
                    guard.ended(*err);
                })?;
            vm.set(Some(loaded));
            action_error.set(None);
            Ok::<_, ViewError>(())
        }
    });

    let dispatch = use_callback(move |intent: PlayerIntent| {
        let player = player.clone();
        spawn(async move {
            if busy() {
                return;
            }
            // Work on a copy so a failed request leaves the shown state untouched.
            let Some(mut working) = vm.read().as_ref().cloned() else {
                return;
            };
            busy.set(true);
            let result = match intent {
                PlayerIntent::Select(lesson_id) => working.select(&player, lesson_id).await,
                PlayerIntent::Step(direction) => {
                    working.step(&player, direction).await;
                    Ok(())
                }
                PlayerIntent::CompleteActive => {
                    working.complete_active(&player).await.map(|outcome| {
                        if outcome == CompletionOutcome::AlreadyCompleted {
                            debug!("lesson was already complete");
                        }
                    })
                }
                PlayerIntent::Sync => working.sync(&player).await,
            };
            match result {
                Ok(()) => {
                    if matches!(intent, PlayerIntent::Select(_) | PlayerIntent::Step(_)) {
                        open_quiz.set(None);
                    }
                    vm.set(Some(working));
                    action_error.set(None);
                }
                Err(err) => {
                    if !guard.ended(err) {
                        action_error.set(Some(err));
                    }
                }
            }
            busy.set(false);
        });
    });

    let state = view_state_from_resource(&resource);
    rsx! {
        div { class: "page player-page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading course..." }
                },
                ViewState::Error(err) => rsx! {
                    ErrorPanel {
                        error: err,
                        on_retry: move |()| {
                            let mut resource = resource;
                            resource.restart();
                        },
                    }
                },
                ViewState::Ready(()) => {
                    let snapshot = vm
                        .read()
                        .as_ref()
                        .map(|current| {
                            (
                                current.title().to_string(),
                                current.sidebar(),
                                current.lesson(),
                                current.progress(),
                                current.nav(),
                            )
                        });
                    match snapshot {
                        None => rsx! {
                            p { "Loading course..." }
                        },
                        Some((title, sidebar, lesson, progress, nav)) => rsx! {
                            header { class: "view-header",
                                h2 { class: "view-title", "{title}" }
                                div { class: "progress",
                                    div {
                                        class: "progress-bar",
                                        role: "progressbar",
                                        "aria-valuenow": "{progress.percent}",
                                        style: "width: {progress.percent}%",
                                    }
                                }
                                p { class: "progress-label", "{progress.label}" }
                                if progress.complete {
                                    span { class: "badge badge-done", "Course complete" }
                                }
                                button {
                                    class: "btn btn-link",
                                    r#type: "button",
                                    disabled: busy(),
                                    onclick: move |_| dispatch.call(PlayerIntent::Sync),
                                    "Sync progress"
                                }
                            }
                            if let Some(err) = action_error() {
                                p { class: "form-banner", role: "alert", "{err.message()}" }
                            }
                            div { class: "player-body",
                                LessonSidebar {
                                    modules: sidebar,
                                    on_select: move |id| dispatch.call(PlayerIntent::Select(id)),
                                }
                                section { class: "player-main",
                                    match lesson {
                                        None => rsx! {
                                            p { class: "empty", "This course has no lessons yet." }
                                        },
                                        Some(lesson) => rsx! {
                                            LessonPane {
                                                lesson,
                                                busy: busy(),
                                                on_complete: move |()| dispatch.call(PlayerIntent::CompleteActive),
                                                on_open_quiz: move |quiz_id| open_quiz.set(Some(quiz_id)),
                                            }
                                        },
                                    }
                                    if let Some(quiz_id) = open_quiz() {
                                        QuizPanel {
                                            key: "{quiz_id}",
                                            quiz_id,
                                            on_close: move |()| open_quiz.set(None),
                                        }
                                    }
                                    nav { class: "lesson-nav",
                                        button {
                                            class: "btn btn-secondary",
                                            r#type: "button",
                                            disabled: !nav.can_previous || busy(),
                                            onclick: move |_| dispatch.call(PlayerIntent::Step(Direction::Previous)),
                                            "Previous"
                                        }
                                        button {
                                            class: "btn btn-secondary",
                                            r#type: "button",
                                            disabled: !nav.can_next || busy(),
                                            onclick: move |_| dispatch.call(PlayerIntent::Step(Direction::Next)),
                                            "Next"
                                        }
                                    }
                                }
                            }
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn LessonSidebar(modules: Vec<SidebarModuleVm>, on_select: EventHandler<LessonId>) -> Element {
    rsx! {
        aside { class: "lesson-sidebar",
            for module in modules {
                div { class: "lesson-sidebar-module",
                    h4 { "{module.title}" }
                    ul {
                        for lesson in module.lessons {
                            li {
                                key: "{lesson.id}",
                                class: if lesson.active { "lesson-link active" } else { "lesson-link" },
                                button {
                                    r#type: "button",
                                    onclick: move |_| on_select.call(lesson.id),
                                    if lesson.completed {
                                        span { class: "lesson-check", "✓ " }
                                    }
                                    "{lesson.title}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
