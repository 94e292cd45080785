use std::sync::Arc;

use axum::extract::{Json, Multipart, State};
use validator::Validate;

use crate::{
    data::models::{
        clamp_quantity, ApiError, GenerateResponse, GenerateTextRequest, DEFAULT_DECK_COLOR,
        GENERATED_DECK_EMOJI, MAX_DECK_TITLE_CHARS,
    },
    data::repositories::DeckRepository,
    database::DbPool,
    features::generation::{pdf, GroqClient, Language},
    utils,
};

/// Tag attached to every AI-generated card
pub const GENERATED_TAG: &str = "IA";

pub type GenerateState = (DbPool, Option<Arc<GroqClient>>);

pub fn validate_generation_input(title: &str, text: &str) -> Result<(), ApiError> {
    validate_title(title)?;
    if text.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Adicione o conteúdo de estudo antes de gerar.".into(),
        ));
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Dê um nome para o seu deck antes de gerar.".into(),
        ));
    }
    if title.trim().chars().count() > MAX_DECK_TITLE_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Title must be between 1 and {} characters",
            MAX_DECK_TITLE_CHARS
        )));
    }
    Ok(())
}

/// Asks the model for cards and stores them as a new deck. Nothing is written
/// when the model call fails.
async fn generate_deck(
    pool: &DbPool,
    client: &GroqClient,
    user_id: i32,
    title: &str,
    text: &str,
    quantity: u32,
    language: Language,
) -> Result<GenerateResponse, ApiError> {
    let generated = client.generate_cards(text, quantity, language).await?;

    let pairs: Vec<(String, String)> = generated
        .into_iter()
        .take(quantity as usize)
        .map(|card| (card.question, card.answer))
        .collect();

    let mut conn = pool.get()?;
    let (deck, card_count) = DeckRepository::create_with_cards(
        &mut conn,
        user_id,
        title.trim(),
        GENERATED_DECK_EMOJI,
        DEFAULT_DECK_COLOR,
        &pairs,
        &[GENERATED_TAG.to_string()],
    )?;

    log::info!(
        "Generated deck {} with {} cards for user {}",
        deck.deck_id,
        card_count,
        user_id
    );

    Ok(GenerateResponse {
        deck_id: deck.deck_id,
        card_count,
    })
}

#[axum::debug_handler]
pub async fn generate_from_text(
    State((pool, client)): State<GenerateState>,
    session: tower_sessions::Session,
    Json(payload): Json<GenerateTextRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let user_id = utils::require_user(&session).await?;
    let client = client.ok_or(ApiError::GenerationDisabled)?;

    validate_generation_input(&payload.title, &payload.text)?;
    payload.validate()?;

    let response = generate_deck(
        &pool,
        &client,
        user_id,
        &payload.title,
        &payload.text,
        clamp_quantity(payload.quantity),
        payload.language,
    )
    .await?;

    Ok(Json(response))
}

#[derive(Debug, Default)]
struct PdfUpload {
    title: String,
    file: Option<Vec<u8>>,
    quantity: Option<u32>,
    language: Language,
}

async fn read_pdf_upload(mut multipart: Multipart) -> Result<PdfUpload, ApiError> {
    let mut upload = PdfUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                upload.file = Some(bytes.to_vec());
            }
            "title" | "quantity" | "language" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                match name.as_str() {
                    "title" => upload.title = value,
                    "quantity" if !value.trim().is_empty() => {
                        upload.quantity = Some(value.trim().parse().map_err(|_| {
                            ApiError::BadRequest(format!("Invalid quantity: {}", value))
                        })?);
                    }
                    "language" => {
                        upload.language = value.parse().map_err(ApiError::BadRequest)?;
                    }
                    _ => {}
                }
            }
            other => log::debug!("Ignoring multipart field {:?}", other),
        }
    }

    Ok(upload)
}

#[axum::debug_handler]
pub async fn generate_from_pdf(
    State((pool, client)): State<GenerateState>,
    session: tower_sessions::Session,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, ApiError> {
    let user_id = utils::require_user(&session).await?;
    let client = client.ok_or(ApiError::GenerationDisabled)?;

    let upload = read_pdf_upload(multipart).await?;
    validate_title(&upload.title)?;
    let bytes = upload
        .file
        .ok_or_else(|| ApiError::BadRequest("Selecione um arquivo PDF.".into()))?;

    // lopdf parsing is CPU bound
    let text = tokio::task::spawn_blocking(move || pdf::extract_text(&bytes))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    validate_generation_input(&upload.title, &text)?;

    let response = generate_deck(
        &pool,
        &client,
        user_id,
        &upload.title,
        &text,
        clamp_quantity(upload.quantity),
        upload.language,
    )
    .await?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_is_rejected_first() {
        let err = validate_generation_input("   ", "").unwrap_err();
        assert_eq!(err.to_string(), "Dê um nome para o seu deck antes de gerar.");
    }

    #[test]
    fn blank_text_is_rejected() {
        let err = validate_generation_input("Biologia", " \n ").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn long_titles_are_rejected_for_every_source() {
        let long = "a".repeat(121);
        let err = validate_generation_input(&long, "Mitocôndria produz ATP.").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));

        // the multipart form is checked before the PDF is parsed
        assert!(validate_title(&long).is_err());
        assert!(validate_title(&"ç".repeat(120)).is_ok());
        assert!(validate_title("  Biologia  ").is_ok());
    }

    #[test]
    fn filled_input_passes() {
        assert!(validate_generation_input("Biologia", "Mitocôndria produz ATP.").is_ok());
    }
}
