use serde::{Deserialize, Serialize};

use crate::model::ids::{QuestionId, QuizId};

/// A quiz attached to a lesson, with the learner's attempt bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: QuizId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub attempts_used: u32,
    /// `None` means unlimited attempts.
    #[serde(default)]
    pub max_attempts: Option<u32>,
    /// Minimum percentage required to pass.
    #[serde(default)]
    pub pass_mark: Option<u8>,
}

impl Quiz {
    /// Attempts still available, or `None` when attempts are unlimited.
    #[must_use]
    pub fn attempts_remaining(&self) -> Option<u32> {
        self.max_attempts
            .map(|max| max.saturating_sub(self.attempts_used))
    }

    #[must_use]
    pub fn can_attempt(&self) -> bool {
        self.attempts_remaining().is_none_or(|left| left > 0)
    }

    #[must_use]
    pub fn total_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice,
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(rename = "question_type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default = "default_points")]
    pub points: u32,
}

fn default_points() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: u64,
    pub text: String,
}

/// A learner's answer to one question in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub question: QuestionId,
    /// Selected choice ids for choice and true/false questions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Graded result returned by `POST /quizzes/{id}/submit/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: u32,
    pub max_score: u32,
    pub passed: bool,
    pub attempts_used: u32,
}

impl QuizResult {
    #[must_use]
    pub fn percentage(&self) -> u8 {
        if self.max_score == 0 {
            return 0;
        }
        let pct = (u64::from(self.score) * 200 + u64::from(self.max_score))
            / (u64::from(self.max_score) * 2);
        u8::try_from(pct.min(100)).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(used: u32, max: Option<u32>) -> Quiz {
        Quiz {
            id: QuizId::new(1),
            title: "Check".into(),
            description: None,
            questions: Vec::new(),
            attempts_used: used,
            max_attempts: max,
            pass_mark: None,
        }
    }

    #[test]
    fn unlimited_quiz_can_always_be_attempted() {
        let q = quiz(40, None);
        assert_eq!(q.attempts_remaining(), None);
        assert!(q.can_attempt());
    }

    #[test]
    fn exhausted_quiz_cannot_be_attempted() {
        assert!(quiz(2, Some(3)).can_attempt());
        assert!(!quiz(3, Some(3)).can_attempt());
        assert_eq!(quiz(5, Some(3)).attempts_remaining(), Some(0));
    }

    #[test]
    fn question_kind_reads_backend_field_name() {
        let q: Question = serde_json::from_str(
            r#"{"id": 3, "text": "2+2?", "question_type": "single_choice",
                "choices": [{"id": 1, "text": "4"}]}"#,
        )
        .unwrap();
        assert_eq!(q.kind, QuestionKind::SingleChoice);
        assert_eq!(q.points, 1);
    }

    #[test]
    fn result_percentage_rounds_half_up() {
        let result = QuizResult {
            score: 1,
            max_score: 8,
            passed: false,
            attempts_used: 1,
        };
        assert_eq!(result.percentage(), 13);
    }

    #[test]
    fn answer_omits_empty_fields() {
        let answer = QuizAnswer {
            question: QuestionId::new(4),
            choices: Vec::new(),
            text: Some("ownership".into()),
        };
        let json = serde_json::to_string(&answer).unwrap();
        assert_eq!(json, r#"{"question":4,"text":"ownership"}"#);
    }
}
