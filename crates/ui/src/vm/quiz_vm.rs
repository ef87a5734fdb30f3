use std::collections::BTreeMap;

use course_core::model::{
    Question, QuestionId, QuestionKind, Quiz, QuizAnswer, QuizId, QuizResult,
};
use services::QuizService;

use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub id: u64,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub id: QuestionId,
    pub text: String,
    pub kind: QuestionKind,
    pub points_label: String,
    pub choices: Vec<ChoiceVm>,
    pub text_answer: String,
}

/// Answer sheet for one quiz attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizVm {
    quiz: Quiz,
    answers: BTreeMap<QuestionId, QuizAnswer>,
    result: Option<QuizResult>,
}

impl QuizVm {
    #[must_use]
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            answers: BTreeMap::new(),
            result: None,
        }
    }

    /// # Errors
    ///
    /// Returns the `ViewError` for the failed fetch.
    pub async fn load(quizzes: &QuizService, quiz_id: QuizId) -> Result<Self, ViewError> {
        let quiz = quizzes
            .quiz(quiz_id)
            .await
            .map_err(|err| ViewError::from_api(&err))?;
        Ok(Self::new(quiz))
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn questions(&self) -> Vec<QuestionVm> {
        self.quiz
            .questions
            .iter()
            .map(|question| {
                let answer = self.answers.get(&question.id);
                QuestionVm {
                    id: question.id,
                    text: question.text.clone(),
                    kind: question.kind,
                    points_label: match question.points {
                        1 => "1 point".to_string(),
                        points => format!("{points} points"),
                    },
                    choices: question
                        .choices
                        .iter()
                        .map(|choice| ChoiceVm {
                            id: choice.id,
                            text: choice.text.clone(),
                            selected: answer.is_some_and(|a| a.choices.contains(&choice.id)),
                        })
                        .collect(),
                    text_answer: answer.and_then(|a| a.text.clone()).unwrap_or_default(),
                }
            })
            .collect()
    }

    /// Pick a choice. Single-answer kinds replace the selection, multiple choice toggles.
    pub fn choose(&mut self, question_id: QuestionId, choice_id: u64) {
        let Some(question) = self.question(question_id) else {
            return;
        };
        if !question.choices.iter().any(|choice| choice.id == choice_id) {
            return;
        }
        let kind = question.kind;
        let answer = self.answer_mut(question_id);
        match kind {
            QuestionKind::MultipleChoice => {
                if let Some(pos) = answer.choices.iter().position(|id| *id == choice_id) {
                    answer.choices.remove(pos);
                } else {
                    answer.choices.push(choice_id);
                }
            }
            QuestionKind::SingleChoice | QuestionKind::TrueFalse | QuestionKind::ShortAnswer => {
                answer.choices = vec![choice_id];
            }
        }
    }

    pub fn set_text(&mut self, question_id: QuestionId, text: String) {
        if self.question(question_id).is_none() {
            return;
        }
        self.answer_mut(question_id).text = Some(text);
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|a| is_answered(a)).count()
    }

    #[must_use]
    pub fn attempts_label(&self) -> String {
        match (self.quiz.attempts_remaining(), self.quiz.max_attempts) {
            (Some(left), Some(max)) => format!("{left} of {max} attempts left"),
            _ => "Unlimited attempts".to_string(),
        }
    }

    #[must_use]
    pub fn points_label(&self) -> String {
        let questions = self.quiz.questions.len();
        let points = self.quiz.total_points();
        let question_noun = if questions == 1 { "question" } else { "questions" };
        let point_noun = if points == 1 { "point" } else { "points" };
        format!("{questions} {question_noun}, {points} {point_noun}")
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.quiz.can_attempt() && self.answered_count() > 0
    }

    #[must_use]
    pub fn result_label(&self) -> Option<String> {
        let result = self.result.as_ref()?;
        let verdict = if result.passed { "Passed" } else { "Not passed" };
        Some(format!(
            "Score {} / {} ({}%). {verdict}.",
            result.score,
            result.max_score,
            result.percentage()
        ))
    }

    /// Submit the answered questions and keep the graded result.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::NoAttemptsLeft` when the quiz is exhausted, or the
    /// `ViewError` for the failed request.
    pub async fn submit(&mut self, quizzes: &QuizService) -> Result<QuizResult, ViewError> {
        let answers: Vec<QuizAnswer> = self
            .answers
            .values()
            .filter(|a| is_answered(a))
            .cloned()
            .collect();
        let result = quizzes
            .submit(&self.quiz, &answers)
            .await
            .map_err(|err| ViewError::from_quiz(&err))?;
        self.quiz.attempts_used = result.attempts_used;
        self.answers.clear();
        self.result = Some(result.clone());
        Ok(result)
    }

    fn question(&self, id: QuestionId) -> Option<&Question> {
        self.quiz.questions.iter().find(|q| q.id == id)
    }

    fn answer_mut(&mut self, question_id: QuestionId) -> &mut QuizAnswer {
        self.answers.entry(question_id).or_insert_with(|| QuizAnswer {
            question: question_id,
            choices: Vec::new(),
            text: None,
        })
    }
}

fn is_answered(answer: &QuizAnswer) -> bool {
    !answer.choices.is_empty() || answer.text.as_deref().is_some_and(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::Choice;

    fn question(id: u64, kind: QuestionKind, choices: &[u64]) -> Question {
        Question {
            id: QuestionId::new(id),
            text: format!("Question {id}"),
            kind,
            choices: choices
                .iter()
                .map(|c| Choice {
                    id: *c,
                    text: format!("Choice {c}"),
                })
                .collect(),
            points: 1,
        }
    }

    fn quiz(max_attempts: Option<u32>, attempts_used: u32) -> Quiz {
        Quiz {
            id: QuizId::new(1),
            title: "Check".into(),
            description: None,
            questions: vec![
                question(1, QuestionKind::SingleChoice, &[10, 11]),
                question(2, QuestionKind::MultipleChoice, &[20, 21, 22]),
                question(3, QuestionKind::ShortAnswer, &[]),
            ],
            attempts_used,
            max_attempts,
            pass_mark: None,
        }
    }

    #[test]
    fn single_choice_replaces_and_multiple_toggles() {
        let mut vm = QuizVm::new(quiz(None, 0));
        vm.choose(QuestionId::new(1), 10);
        vm.choose(QuestionId::new(1), 11);
        vm.choose(QuestionId::new(2), 20);
        vm.choose(QuestionId::new(2), 22);
        vm.choose(QuestionId::new(2), 20);

        let questions = vm.questions();
        let picked = |q: &QuestionVm| {
            q.choices
                .iter()
                .filter(|c| c.selected)
                .map(|c| c.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(picked(&questions[0]), vec![11]);
        assert_eq!(picked(&questions[1]), vec![22]);
    }

    #[test]
    fn unknown_questions_and_choices_are_ignored() {
        let mut vm = QuizVm::new(quiz(None, 0));
        vm.choose(QuestionId::new(9), 10);
        vm.choose(QuestionId::new(1), 99);
        vm.set_text(QuestionId::new(9), "x".into());
        assert_eq!(vm.answered_count(), 0);
        assert!(!vm.can_submit());
    }

    #[test]
    fn blank_text_does_not_count_as_answered() {
        let mut vm = QuizVm::new(quiz(None, 0));
        vm.set_text(QuestionId::new(3), "   ".into());
        assert_eq!(vm.answered_count(), 0);
        vm.set_text(QuestionId::new(3), "lifetimes".into());
        assert_eq!(vm.answered_count(), 1);
        assert_eq!(vm.questions()[2].text_answer, "lifetimes");
    }

    #[test]
    fn attempts_gate_submission() {
        let mut vm = QuizVm::new(quiz(Some(2), 1));
        vm.choose(QuestionId::new(1), 10);
        assert_eq!(vm.attempts_label(), "1 of 2 attempts left");
        assert!(vm.can_submit());

        let mut spent = QuizVm::new(quiz(Some(2), 2));
        spent.choose(QuestionId::new(1), 10);
        assert_eq!(spent.attempts_label(), "0 of 2 attempts left");
        assert!(!spent.can_submit());

        assert_eq!(QuizVm::new(quiz(None, 5)).attempts_label(), "Unlimited attempts");
    }

    #[test]
    fn points_label_sums_question_points() {
        let mut weighted = quiz(None, 0);
        weighted.questions[1].points = 3;
        assert_eq!(QuizVm::new(weighted).points_label(), "3 questions, 5 points");

        let mut single = quiz(None, 0);
        single.questions.truncate(1);
        assert_eq!(QuizVm::new(single).points_label(), "1 question, 1 point");
    }
}
