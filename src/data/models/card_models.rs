use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::schema::cards;

/// Card row. `tags` holds a JSON array of strings.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Card {
    pub card_id: i32,
    pub deck_id: i32,
    pub question: String,
    pub answer: String,
    pub tags: String,
    pub created_at: NaiveDateTime,
}

impl Card {
    pub fn tag_list(&self) -> Vec<String> {
        decode_tags(&self.tags)
    }
}

#[derive(Insertable)]
#[diesel(table_name = cards)]
pub struct NewCard {
    pub deck_id: i32,
    pub question: String,
    pub answer: String,
    pub tags: String,
    pub created_at: NaiveDateTime,
}

impl NewCard {
    pub fn new(deck_id: i32, question: &str, answer: &str, tags: &[String], now: NaiveDateTime) -> Self {
        NewCard {
            deck_id,
            question: question.trim().to_string(),
            answer: answer.trim().to_string(),
            tags: encode_tags(tags),
            created_at: now,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CardView {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub tags: Vec<String>,
}

impl From<Card> for CardView {
    fn from(card: Card) -> Self {
        let tags = card.tag_list();
        CardView {
            id: card.card_id,
            question: card.question,
            answer: card.answer,
            tags,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCardRequest {
    #[validate(length(min = 1, max = 1000, message = "Question is required"))]
    pub question: String,
    #[validate(length(min = 1, max = 2000, message = "Answer is required"))]
    pub answer: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

pub fn encode_tags(tags: &[String]) -> String {
    let cleaned: Vec<&str> = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    serde_json::to_string(&cleaned).unwrap_or_else(|_| "[]".to_string())
}

pub fn decode_tags(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        log::warn!("Ignoring malformed tag list {:?}: {}", raw, e);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_drop_blank_entries() {
        let tags = vec![" Resumo ".to_string(), "".to_string(), "IA".to_string()];
        let encoded = encode_tags(&tags);
        assert_eq!(decode_tags(&encoded), vec!["Resumo", "IA"]);
    }

    #[test]
    fn malformed_tags_read_as_empty() {
        assert!(decode_tags("not json").is_empty());
    }
}
