use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    bank::QuestionKind,
    engine::{Answer, Feedback, QuizAttempt, Verdict},
};

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub answer: Answer,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionView {
    Mcq {
        id: u32,
        question: &'static str,
        options: &'static [&'static str],
    },
    Tf {
        id: u32,
        question: &'static str,
    },
}

#[derive(Debug, Serialize)]
pub struct VerdictView {
    pub verdict: Verdict,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct QuizView {
    pub id: Uuid,
    pub position: usize,
    pub total: usize,
    pub score: usize,
    pub answered: usize,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<Answer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<VerdictView>,
}

impl QuizView {
    pub fn of(id: Uuid, quiz: &QuizAttempt) -> Self {
        let question = quiz.current_question().map(|q| match q.kind {
            QuestionKind::MultipleChoice { options, .. } => QuestionView::Mcq {
                id: q.id,
                question: q.prompt,
                options,
            },
            QuestionKind::TrueFalse { .. } => QuestionView::Tf {
                id: q.id,
                question: q.prompt,
            },
        });
        Self {
            id,
            position: (quiz.current_index() + 1).min(quiz.total()),
            total: quiz.total(),
            score: quiz.score(),
            answered: quiz.answered(),
            completed: quiz.is_completed(),
            question,
            selected: quiz.selected(),
            feedback: quiz.feedback(),
            result: quiz.verdict().map(|v| VerdictView {
                verdict: v,
                message: v.message(),
            }),
        }
    }
}
