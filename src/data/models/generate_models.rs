use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::generation::Language;

pub const DEFAULT_CARD_QUANTITY: u32 = 15;
pub const MAX_CARD_QUANTITY: u32 = 30;
/// Same bound as `CreateDeckRequest::title`
pub const MAX_DECK_TITLE_CHARS: usize = 120;

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateTextRequest {
    #[validate(length(min = 1, max = 120, message = "Title must be between 1 and 120 characters"))]
    pub title: String,
    #[validate(length(max = 100_000, message = "Text is too long"))]
    pub text: String,
    pub quantity: Option<u32>,
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub deck_id: i32,
    pub card_count: usize,
}

/// Requested quantity clamped to what one prompt can reasonably produce.
pub fn clamp_quantity(requested: Option<u32>) -> u32 {
    requested
        .unwrap_or(DEFAULT_CARD_QUANTITY)
        .clamp(1, MAX_CARD_QUANTITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_defaults_and_clamps() {
        assert_eq!(clamp_quantity(None), 15);
        assert_eq!(clamp_quantity(Some(0)), 1);
        assert_eq!(clamp_quantity(Some(8)), 8);
        assert_eq!(clamp_quantity(Some(500)), 30);
    }

    #[test]
    fn text_request_title_is_bounded() {
        let request = |title: String| GenerateTextRequest {
            title,
            text: "Mitocôndria produz ATP.".into(),
            quantity: None,
            language: Language::default(),
        };

        assert!(request("Biologia".into()).validate().is_ok());
        assert!(request("é".repeat(120)).validate().is_ok());

        let errors = request("a".repeat(121)).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }
}
