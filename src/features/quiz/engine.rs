use std::collections::HashSet;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::models::Card;
use crate::features::stats;

/// Decoy answers shown next to the correct one
pub const DECOYS_PER_QUESTION: usize = 3;

#[derive(Error, Debug, PartialEq)]
pub enum QuizError {
    #[error("Este deck está vazio.")]
    EmptyDeck,
    #[error("Nenhum card para revisar agora.")]
    NothingDue,
    #[error("Study session already finished")]
    SessionFinished,
    #[error("Choice {choice} is out of range (question has {options} options)")]
    InvalidChoice { choice: usize, options: usize },
}

/// Snapshot of a card taken when a session starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizCard {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub tags: Vec<String>,
}

impl From<Card> for QuizCard {
    fn from(card: Card) -> Self {
        let tags = card.tag_list();
        QuizCard {
            id: card.card_id,
            question: card.question,
            answer: card.answer,
            tags,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub card_id: i32,
    pub question: String,
    pub tags: Vec<String>,
    pub options: Vec<String>,
    pub answer_index: usize,
}

/// What the client sees of a question; the answer index stays server side.
#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub card_id: i32,
    pub question: String,
    pub tags: Vec<String>,
    pub options: Vec<String>,
    pub number: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionSummary {
    pub correct: u32,
    pub wrong: u32,
    pub answered: usize,
    pub total: usize,
    pub accuracy: u32,
}

#[derive(Debug, Serialize)]
pub struct AnswerOutcome {
    pub card_id: i32,
    pub correct: bool,
    pub correct_answer: String,
    pub correct_index: usize,
    pub finished: bool,
    pub summary: SessionSummary,
}

/// One pass over a shuffled set of cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    pub deck_id: i32,
    pub deck_title: String,
    questions: Vec<QuizQuestion>,
    position: usize,
    correct: u32,
    wrong: u32,
}

impl QuizSession {
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.questions.len()
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.position)
    }

    pub fn current_view(&self) -> Option<QuestionView> {
        self.current().map(|q| QuestionView {
            card_id: q.card_id,
            question: q.question.clone(),
            tags: q.tags.clone(),
            options: q.options.clone(),
            number: self.position + 1,
            total: self.total(),
        })
    }

    /// Scores `choice` against the current question and moves on to the next one.
    pub fn answer(&mut self, choice: usize) -> Result<AnswerOutcome, QuizError> {
        let question = self.current().ok_or(QuizError::SessionFinished)?;

        if choice >= question.options.len() {
            return Err(QuizError::InvalidChoice {
                choice,
                options: question.options.len(),
            });
        }

        let correct = choice == question.answer_index;
        let card_id = question.card_id;
        let correct_index = question.answer_index;
        let correct_answer = question.options[correct_index].clone();

        if correct {
            self.correct += 1;
        } else {
            self.wrong += 1;
        }
        self.position += 1;

        Ok(AnswerOutcome {
            card_id,
            correct,
            correct_answer,
            correct_index,
            finished: self.is_finished(),
            summary: self.summary(),
        })
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            correct: self.correct,
            wrong: self.wrong,
            answered: self.position.min(self.questions.len()),
            total: self.questions.len(),
            accuracy: stats::accuracy(self.correct as usize, self.wrong as usize),
        }
    }
}

pub struct QuizEngine;

impl QuizEngine {
    /// Returns the cards in a random order.
    pub fn shuffle_cards<R: Rng + ?Sized>(mut cards: Vec<QuizCard>, rng: &mut R) -> Vec<QuizCard> {
        cards.shuffle(rng);
        cards
    }

    /// Builds the answer options for `current`: its own answer plus up to
    /// three distinct answers taken from the other cards of `deck`.
    /// Returns the options and the index of the correct one.
    pub fn build_options<R: Rng + ?Sized>(
        current: &QuizCard,
        deck: &[QuizCard],
        rng: &mut R,
    ) -> (Vec<String>, usize) {
        let mut seen = HashSet::new();
        let candidates: Vec<&str> = deck
            .iter()
            .filter(|card| card.id != current.id)
            .map(|card| card.answer.as_str())
            .filter(|answer| *answer != current.answer && seen.insert(*answer))
            .collect();

        let mut options: Vec<String> = candidates
            .choose_multiple(rng, DECOYS_PER_QUESTION)
            .map(|answer| answer.to_string())
            .collect();
        options.shuffle(rng);

        let answer_index = rng.random_range(0..=options.len());
        options.insert(answer_index, current.answer.clone());

        (options, answer_index)
    }

    /// Shuffles `selected`, keeps at most `limit` of them and builds one
    /// question per card. Decoys are drawn from the whole `deck`.
    pub fn build_session<R: Rng + ?Sized>(
        deck_id: i32,
        deck_title: String,
        deck: &[QuizCard],
        selected: Vec<QuizCard>,
        limit: Option<usize>,
        rng: &mut R,
    ) -> Result<QuizSession, QuizError> {
        let mut order = Self::shuffle_cards(selected, rng);
        if let Some(limit) = limit {
            order.truncate(limit);
        }

        if order.is_empty() {
            return Err(QuizError::EmptyDeck);
        }

        let questions = order
            .into_iter()
            .map(|card| {
                let (options, answer_index) = Self::build_options(&card, deck, rng);
                QuizQuestion {
                    card_id: card.id,
                    question: card.question,
                    tags: card.tags,
                    options,
                    answer_index,
                }
            })
            .collect();

        Ok(QuizSession {
            deck_id,
            deck_title,
            questions,
            position: 0,
            correct: 0,
            wrong: 0,
        })
    }
}
