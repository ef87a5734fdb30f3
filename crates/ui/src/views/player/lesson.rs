use course_core::model::QuizId;
use dioxus::prelude::*;

use crate::vm::LessonVm;

#[component]
pub fn LessonPane(
    lesson: LessonVm,
    busy: bool,
    on_complete: EventHandler<()>,
    on_open_quiz: EventHandler<QuizId>,
) -> Element {
    rsx! {
        article { class: "lesson",
            p { class: "lesson-module", "{lesson.module_title}" }
            h3 { class: "lesson-title", "{lesson.title}" }
            if let Some(duration) = lesson.duration_label.as_ref() {
                p { class: "lesson-duration", "{duration}" }
            }
            if let Some(url) = lesson.video_url.as_ref() {
                div { class: "lesson-video",
                    video { controls: true, src: "{url}" }
                    a { href: "{url}", target: "_blank", "Open video" }
                }
            }
            div { class: "lesson-body", dangerous_inner_html: "{lesson.content_html}" }

            if lesson.has_activities {
                div { class: "lesson-activities",
                    if !lesson.assignments.is_empty() {
                        section { class: "lesson-assignments",
                            h4 { "Assignments" }
                            for assignment in lesson.assignments.iter() {
                                div { class: "assignment",
                                    h5 { "{assignment.title}" }
                                    if let Some(due) = assignment.due_label.as_ref() {
                                        span { class: "assignment-due", "{due}" }
                                    }
                                    if let Some(points) = assignment.points_label.as_ref() {
                                        span { class: "assignment-points", "{points}" }
                                    }
                                    div {
                                        class: "assignment-body",
                                        dangerous_inner_html: "{assignment.instructions_html}",
                                    }
                                }
                            }
                        }
                    }

                    if !lesson.quizzes.is_empty() {
                        section { class: "lesson-quizzes",
                            h4 { "Quizzes" }
                            ul {
                                for quiz in lesson.quizzes.iter() {
                                    li { key: "{quiz.id}",
                                        button {
                                            class: "btn btn-link",
                                            r#type: "button",
                                            onclick: {
                                                let quiz_id = quiz.id;
                                                move |_| on_open_quiz.call(quiz_id)
                                            },
                                            "{quiz.title}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            div { class: "lesson-actions",
                if lesson.completed {
                    span { class: "badge badge-done", "Completed" }
                } else {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: busy,
                        onclick: move |_| on_complete.call(()),
                        if busy { "Saving..." } else { "Mark as complete" }
                    }
                }
            }
        }
    }
}
