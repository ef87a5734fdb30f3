mod catalog;
pub(crate) mod components;
mod dashboard;
mod login;
mod player;
mod profile;
mod register;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use catalog::CatalogView;
pub use dashboard::{
    CourseModulesView, DashboardView, LessonQuizzesView, ModuleLessonsView, QuizQuestionsView,
};
pub use login::LoginView;
pub use player::PlayerView;
pub use profile::ProfileView;
pub use register::RegisterView;
pub use state::{ViewError, ViewState, view_state_from_resource};
