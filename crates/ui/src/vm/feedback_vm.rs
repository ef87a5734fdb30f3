use std::collections::BTreeMap;

use services::ApiError;

use crate::views::ViewError;

/// What a form shows after a failed submit: a banner plus per-field messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFeedback {
    pub banner: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl FormFeedback {
    #[must_use]
    pub fn from_api(err: &ApiError) -> Self {
        let Some(errors) = err.field_errors() else {
            return Self {
                banner: Some(ViewError::from_api(err).message().to_string()),
                fields: BTreeMap::new(),
            };
        };

        let fields = errors
            .fields
            .iter()
            .map(|(name, messages)| (name.clone(), messages.join(" ")))
            .collect::<BTreeMap<_, _>>();
        let banner = match (&errors.detail, fields.is_empty()) {
            (Some(detail), _) => Some(detail.clone()),
            (None, true) => Some(errors.to_string()),
            (None, false) => None,
        };
        Self { banner, fields }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Messages for fields the form does not render next to an input.
    #[must_use]
    pub fn unplaced(&self, shown: &[&str]) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(name, _)| !shown.contains(&name.as_str()))
            .map(|(name, message)| format!("{name}: {message}"))
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.banner.is_none() && self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::FieldErrors;

    #[test]
    fn validation_errors_are_split_by_field() {
        let err = ApiError::Validation(FieldErrors::from_body(
            r#"{"title": ["This field may not be blank."], "slug": ["taken"]}"#,
        ));
        let feedback = FormFeedback::from_api(&err);
        assert_eq!(feedback.banner, None);
        assert_eq!(feedback.field("title"), Some("This field may not be blank."));
        assert_eq!(feedback.unplaced(&["title"]), vec!["slug: taken".to_string()]);
    }

    #[test]
    fn detail_becomes_the_banner() {
        let err = ApiError::Validation(FieldErrors::detail("Invalid username or password."));
        let feedback = FormFeedback::from_api(&err);
        assert_eq!(feedback.banner.as_deref(), Some("Invalid username or password."));
        assert!(feedback.fields.is_empty());
    }

    #[test]
    fn other_errors_use_the_generic_banner() {
        let feedback = FormFeedback::from_api(&ApiError::Forbidden);
        assert_eq!(
            feedback.banner.as_deref(),
            Some(ViewError::Forbidden.message())
        );
        assert!(!feedback.is_empty());
    }
}
