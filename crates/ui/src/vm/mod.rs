mod catalog_vm;
mod dashboard_vm;
mod feedback_vm;
mod markdown_vm;
mod player_vm;
mod quiz_vm;
mod time_fmt;

pub use catalog_vm::{CourseCardVm, map_course_cards};
pub use dashboard_vm::{
    ChoiceRow, CourseForm, LessonForm, ModuleForm, QuestionForm, QuizForm, parse_question_kind,
    question_kind_label, question_kind_value,
};
pub use feedback_vm::FormFeedback;
pub use markdown_vm::{markdown_to_html, normalize_markdown, sanitize_html};
pub use player_vm::{
    AssignmentVm, LessonVm, NavVm, PlayerVm, ProgressVm, QuizLinkVm, SidebarLessonVm,
    SidebarModuleVm,
};
pub use quiz_vm::{ChoiceVm, QuestionVm, QuizVm};
pub use time_fmt::{format_datetime, format_minutes};
