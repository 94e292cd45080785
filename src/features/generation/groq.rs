//! Client for Groq's OpenAI-compatible chat completions endpoint, used to
//! turn study material into question/answer pairs.

use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

const TEMPERATURE: f32 = 0.5;
const MAX_TOKENS: u32 = 4096;

lazy_static! {
    // First `{` through last `}`; models like to wrap JSON in prose.
    static ref JSON_BLOCK_RE: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("the AI service timed out")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("rate limited by the AI service")]
    RateLimited,
    #[error("invalid AI API key")]
    InvalidApiKey,
    #[error("A IA não retornou um JSON válido.")]
    NoJson,
    #[error("Formato de resposta inesperado da IA.")]
    UnexpectedShape,
    #[error("A IA não gerou nenhum card utilizável.")]
    NoCards,
    #[error("json error: {0}")]
    Json(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "PT-BR")]
    PtBr,
    #[serde(rename = "EN-US")]
    EnUs,
}

impl Language {
    fn instruction(self) -> &'static str {
        match self {
            Language::PtBr => "Gere os flashcards em português brasileiro.",
            Language::EnUs => "Generate the flashcards in English.",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "PT-BR" => Ok(Language::PtBr),
            "EN-US" => Ok(Language::EnUs),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratedCard {
    #[serde(rename = "pergunta")]
    pub question: String,
    #[serde(rename = "resposta")]
    pub answer: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

pub fn build_prompt(text: &str, quantity: u32, language: Language) -> String {
    format!(
        "Você é um gerador de flashcards para estudantes brasileiros.\n\
         {instruction}\n\
         Gere exatamente {quantity} flashcards com base no texto abaixo.\n\
         Responda SOMENTE com JSON válido neste formato, sem nenhum texto adicional, sem markdown, sem backticks:\n\
         {{\"cards\": [{{\"pergunta\": \"...\", \"resposta\": \"...\"}}]}}\n\
         Regras:\n\
         - Perguntas claras e objetivas\n\
         - Respostas concisas de 1 a 3 frases\n\
         - Foque nos conceitos mais importantes do texto\n\
         Texto: {text}",
        instruction = language.instruction(),
    )
}

/// Pulls the card list out of a model reply.
pub fn parse_cards_response(content: &str) -> Result<Vec<GeneratedCard>, GenerationError> {
    let block = JSON_BLOCK_RE
        .find(content)
        .ok_or(GenerationError::NoJson)?
        .as_str();

    let parsed: Value =
        serde_json::from_str(block).map_err(|e| GenerationError::Json(e.to_string()))?;

    let items = parsed
        .get("cards")
        .and_then(Value::as_array)
        .ok_or(GenerationError::UnexpectedShape)?;

    let cards: Vec<GeneratedCard> = items
        .iter()
        .filter_map(|item| match serde_json::from_value::<GeneratedCard>(item.clone()) {
            Ok(card) => Some(card),
            Err(e) => {
                log::warn!("Skipping malformed generated card: {}", e);
                None
            }
        })
        .filter(|card| !card.question.trim().is_empty() && !card.answer.trim().is_empty())
        .collect();

    if cards.is_empty() {
        return Err(GenerationError::NoCards);
    }

    Ok(cards)
}

#[derive(Debug, Clone)]
pub struct GroqClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

    pub fn new(api_key: String, model: String, base_url: String) -> Result<Self, GenerationError> {
        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(concat!("flipei/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_key,
            model,
            base_url,
        })
    }

    pub async fn generate_cards(
        &self,
        text: &str,
        quantity: u32,
        language: Language,
    ) -> Result<Vec<GeneratedCard>, GenerationError> {
        let prompt = build_prompt(text, quantity, language);
        let content = self.complete(&prompt).await?;
        let cards = parse_cards_response(&content)?;
        log::info!("Model returned {} cards ({} requested)", cards.len(), quantity);
        Ok(cards)
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let res = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        match res.status() {
            s if s.is_success() => {
                let body = res
                    .json::<ChatResponse>()
                    .await
                    .map_err(|e| GenerationError::Json(e.to_string()))?;
                Ok(body
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.message.content)
                    .unwrap_or_default())
            }
            StatusCode::UNAUTHORIZED => Err(GenerationError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => Err(GenerationError::RateLimited),
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(GenerationError::Http { status, body })
            }
        }
    }
}

fn map_reqwest_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout
    } else {
        GenerationError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_wrapped_in_prose() {
        let reply = "Claro! Aqui estão os cards:\n```json\n{\"cards\": [\
            {\"pergunta\": \"O que é mitose?\", \"resposta\": \"Divisão celular.\"},\
            {\"pergunta\": \"Onde ocorre?\", \"resposta\": \"Em células somáticas.\"}]}\n```\nBons estudos!";
        let cards = parse_cards_response(reply).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "O que é mitose?");
        assert_eq!(cards[1].answer, "Em células somáticas.");
    }

    #[test]
    fn missing_json_is_reported() {
        assert!(matches!(
            parse_cards_response("Desculpe, não consigo ajudar."),
            Err(GenerationError::NoJson)
        ));
    }

    #[test]
    fn cards_must_be_an_array() {
        assert!(matches!(
            parse_cards_response("{\"flashcards\": []}"),
            Err(GenerationError::UnexpectedShape)
        ));
        assert!(matches!(
            parse_cards_response("{\"cards\": \"nenhum\"}"),
            Err(GenerationError::UnexpectedShape)
        ));
    }

    #[test]
    fn broken_json_is_a_json_error() {
        assert!(matches!(
            parse_cards_response("{\"cards\": [ {\"pergunta\": }"),
            Err(GenerationError::Json(_))
        ));
    }

    #[test]
    fn blank_and_malformed_cards_are_dropped() {
        let reply = r#"{"cards": [
            {"pergunta": "  ", "resposta": "vazio"},
            {"question": "wrong keys"},
            {"pergunta": "Capital do Brasil?", "resposta": "Brasília."}
        ]}"#;
        let cards = parse_cards_response(reply).unwrap();
        assert_eq!(
            cards,
            vec![GeneratedCard {
                question: "Capital do Brasil?".into(),
                answer: "Brasília.".into(),
            }]
        );

        assert!(matches!(
            parse_cards_response(r#"{"cards": []}"#),
            Err(GenerationError::NoCards)
        ));
    }

    #[test]
    fn prompt_carries_quantity_language_and_text() {
        let prompt = build_prompt("A fotossíntese ocorre nos cloroplastos.", 12, Language::EnUs);
        assert!(prompt.contains("exatamente 12 flashcards"));
        assert!(prompt.contains("Generate the flashcards in English."));
        assert!(prompt.contains("{\"cards\": [{\"pergunta\": \"...\", \"resposta\": \"...\"}]}"));
        assert!(prompt.ends_with("Texto: A fotossíntese ocorre nos cloroplastos."));
    }

    #[test]
    fn language_codes() {
        assert_eq!("pt-br".parse::<Language>().unwrap(), Language::PtBr);
        assert_eq!("EN-US".parse::<Language>().unwrap(), Language::EnUs);
        assert_eq!("".parse::<Language>().unwrap(), Language::PtBr);
        assert!("fr".parse::<Language>().is_err());
        let lang: Language = serde_json::from_str("\"EN-US\"").unwrap();
        assert_eq!(lang, Language::EnUs);
    }
}
