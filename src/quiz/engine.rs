use serde::{Deserialize, Serialize};

use super::{
    bank::{Question, QuestionKind},
    QuizError,
};

/// A chosen answer: an option index for multiple choice, a bool for
/// true/false.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Answer {
    Choice(usize),
    Truth(bool),
}

impl Answer {
    fn fits(&self, kind: &QuestionKind) -> bool {
        match (self, kind) {
            (Answer::Choice(i), QuestionKind::MultipleChoice { options, .. }) => *i < options.len(),
            (Answer::Truth(_), QuestionKind::TrueFalse { .. }) => true,
            _ => false,
        }
    }

    fn is_correct(&self, kind: &QuestionKind) -> bool {
        match (self, kind) {
            (Answer::Choice(i), QuestionKind::MultipleChoice { correct, .. }) => i == correct,
            (Answer::Truth(b), QuestionKind::TrueFalse { correct }) => b == correct,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Perfect,
    Great,
    KeepLearning,
}

impl Verdict {
    /// Perfect for a full score, great from 70% up.
    pub fn for_score(score: usize, total: usize) -> Verdict {
        if score == total {
            Verdict::Perfect
        } else if score * 10 >= total * 7 {
            Verdict::Great
        } else {
            Verdict::KeepLearning
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Perfect => "Perfect score! You're a cybersecurity expert!",
            Verdict::Great => "Great job! You have solid cybersecurity knowledge.",
            Verdict::KeepLearning => "Keep learning! Cybersecurity is a continuous journey.",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub explanation: &'static str,
}

/// One pass through a question list.
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    questions: &'static [Question],
    current: usize,
    selected: Option<Answer>,
    show_result: bool,
    score: usize,
    completed: bool,
}

impl QuizAttempt {
    pub fn new(questions: &'static [Question]) -> Self {
        Self {
            questions,
            current: 0,
            selected: None,
            show_result: false,
            score: 0,
            completed: false,
        }
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }
    pub fn current_index(&self) -> usize {
        self.current
    }
    pub fn selected(&self) -> Option<Answer> {
        self.selected
    }
    pub fn show_result(&self) -> bool {
        self.show_result
    }
    pub fn score(&self) -> usize {
        self.score
    }
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Questions answered and checked so far.
    pub fn answered(&self) -> usize {
        if self.completed {
            return self.total();
        }
        self.current + usize::from(self.show_result)
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        if self.completed {
            return None;
        }
        let questions = self.questions;
        questions.get(self.current)
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.completed
            .then(|| Verdict::for_score(self.score, self.total()))
    }

    /// Feedback for the current question once its result is shown.
    pub fn feedback(&self) -> Option<Feedback> {
        if !self.show_result {
            return None;
        }
        let question = self.current_question()?;
        let answer = self.selected?;
        Some(Feedback {
            correct: answer.is_correct(&question.kind),
            explanation: question.explanation,
        })
    }

    pub fn select(&mut self, answer: Answer) -> Result<(), QuizError> {
        let question = self.current_question().ok_or(QuizError::Completed)?;
        if self.show_result {
            return Err(QuizError::AlreadyChecked);
        }
        if !answer.fits(&question.kind) {
            return Err(QuizError::InvalidAnswer);
        }
        self.selected = Some(answer);
        Ok(())
    }

    pub fn check(&mut self) -> Result<Feedback, QuizError> {
        let question = self.current_question().ok_or(QuizError::Completed)?;
        if self.show_result {
            return Err(QuizError::AlreadyChecked);
        }
        let answer = self.selected.ok_or(QuizError::NoAnswerSelected)?;

        self.show_result = true;
        let correct = answer.is_correct(&question.kind);
        if correct {
            self.score += 1;
        }
        Ok(Feedback {
            correct,
            explanation: question.explanation,
        })
    }

    pub fn next(&mut self) -> Result<(), QuizError> {
        if self.completed {
            return Err(QuizError::Completed);
        }
        if !self.show_result {
            return Err(QuizError::NotChecked);
        }
        self.selected = None;
        self.show_result = false;
        if self.current + 1 < self.total() {
            self.current += 1;
        } else {
            self.completed = true;
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = QuizAttempt::new(self.questions);
    }
}
