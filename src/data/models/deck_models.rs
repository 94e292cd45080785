use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::data::models::CardView;
use crate::schema::decks;

pub const DEFAULT_DECK_EMOJI: &str = "🃏";
pub const DEFAULT_DECK_COLOR: &str = "#1A6BFF";
pub const GENERATED_DECK_EMOJI: &str = "🧠";

lazy_static! {
    static ref HEX_COLOR_RE: Regex = Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();
}

/// Deck row as stored in the database
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = decks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Deck {
    #[serde(rename = "id")]
    pub deck_id: i32,
    #[serde(skip_serializing)]
    pub user_id: i32,
    pub title: String,
    pub emoji: String,
    pub color: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = decks)]
pub struct NewDeck<'a> {
    pub user_id: i32,
    pub title: &'a str,
    pub emoji: &'a str,
    pub color: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Deck listing entry with the number of cards it holds
#[derive(Debug, Serialize)]
pub struct DeckSummary {
    #[serde(flatten)]
    pub deck: Deck,
    pub card_count: i64,
}

/// A deck with all its cards
#[derive(Debug, Serialize)]
pub struct DeckWithCards {
    #[serde(flatten)]
    pub deck: Deck,
    pub cards: Vec<CardView>,
}

/// Request payload for creating a new deck
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDeckRequest {
    #[validate(length(min = 1, max = 120, message = "Title must be between 1 and 120 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 16))]
    pub emoji: Option<String>,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
}

/// Standard API response format
#[derive(Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            message: message.into(),
        }
    }
}

fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_RE.is_match(color) {
        Ok(())
    } else {
        Err(ValidationError::new("hex_color").with_message("Color must look like #1A6BFF".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_request_accepts_defaults_left_out() {
        let req = CreateDeckRequest {
            title: "Anatomia".into(),
            emoji: None,
            color: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn deck_request_rejects_blank_title_and_bad_color() {
        let req = CreateDeckRequest {
            title: String::new(),
            emoji: Some("🧬".into()),
            color: Some("blue".into()),
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("color"));
    }

    #[test]
    fn hex_color_check() {
        assert!(validate_hex_color("#00E5A0").is_ok());
        assert!(validate_hex_color("#00E5A").is_err());
        assert!(validate_hex_color("00E5A0").is_err());
    }
}
