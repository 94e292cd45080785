use lazy_static::lazy_static;
use lopdf::Document;
use regex::Regex;
use thiserror::Error;

/// Longest text handed to the model
pub const MAX_EXTRACTED_CHARS: usize = 15_000;
pub const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;

const TRUNCATION_NOTICE: &str = "\n\n[Texto truncado para processamento...]";

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Não foi possível ler o PDF: {0}")]
    Unreadable(String),
    #[error("O PDF não contém texto extraível. Pode ser um PDF escaneado (imagem). Tente copiar o texto manualmente.")]
    NoExtractableText,
    #[error("O PDF excede o limite de {max} bytes")]
    TooLarge { size: usize, max: usize },
}

pub fn extract_text(bytes: &[u8]) -> Result<String, PdfError> {
    if bytes.len() > MAX_PDF_BYTES {
        return Err(PdfError::TooLarge {
            size: bytes.len(),
            max: MAX_PDF_BYTES,
        });
    }

    let document = Document::load_mem(bytes).map_err(|e| PdfError::Unreadable(e.to_string()))?;

    let mut pages = Vec::new();
    for page_number in document.get_pages().keys() {
        match document.extract_text(&[*page_number]) {
            Ok(text) => pages.push((*page_number, text)),
            Err(e) => log::warn!("Skipping unreadable PDF page {}: {}", page_number, e),
        }
    }

    assemble_pages(pages)
}

/// Joins per-page text into one document, labelling each non-empty page and
/// truncating the result to [`MAX_EXTRACTED_CHARS`].
pub fn assemble_pages<I>(pages: I) -> Result<String, PdfError>
where
    I: IntoIterator<Item = (u32, String)>,
{
    let labelled: Vec<String> = pages
        .into_iter()
        .filter_map(|(number, raw)| {
            let text = WHITESPACE_RE.replace_all(&raw, " ");
            let text = text.trim();
            (!text.is_empty()).then(|| format!("[Página {}]\n{}", number, text))
        })
        .collect();

    let full_text = labelled.join("\n\n");
    if full_text.trim().is_empty() {
        return Err(PdfError::NoExtractableText);
    }

    Ok(truncate_for_prompt(full_text))
}

fn truncate_for_prompt(text: String) -> String {
    match text.char_indices().nth(MAX_EXTRACTED_CHARS) {
        Some((cut, _)) => {
            let mut truncated = text[..cut].to_string();
            truncated.push_str(TRUNCATION_NOTICE);
            truncated
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_labelled_and_whitespace_collapsed() {
        let text = assemble_pages(vec![
            (1, "Capítulo 1\n\n  Introdução   à   citologia".to_string()),
            (2, "   \n\t ".to_string()),
            (3, "A célula é a unidade\nbásica da vida.".to_string()),
        ])
        .unwrap();

        assert_eq!(
            text,
            "[Página 1]\nCapítulo 1 Introdução à citologia\n\n[Página 3]\nA célula é a unidade básica da vida."
        );
    }

    #[test]
    fn no_text_is_an_error() {
        assert!(matches!(
            assemble_pages(vec![(1, "  ".to_string())]),
            Err(PdfError::NoExtractableText)
        ));
        assert!(matches!(
            assemble_pages(Vec::new()),
            Err(PdfError::NoExtractableText)
        ));
    }

    #[test]
    fn long_text_is_truncated_by_characters() {
        let page = "é".repeat(MAX_EXTRACTED_CHARS + 500);
        let text = assemble_pages(vec![(1, page)]).unwrap();

        assert!(text.ends_with(TRUNCATION_NOTICE));
        let body = text.strip_suffix(TRUNCATION_NOTICE).unwrap();
        assert_eq!(body.chars().count(), MAX_EXTRACTED_CHARS);
        assert!(body.starts_with("[Página 1]\n"));
    }

    #[test]
    fn text_at_the_limit_is_kept_whole() {
        let label = "[Página 1]\n";
        let page = "a".repeat(MAX_EXTRACTED_CHARS - label.chars().count());
        let text = assemble_pages(vec![(1, page)]).unwrap();
        assert_eq!(text.chars().count(), MAX_EXTRACTED_CHARS);
        assert!(!text.ends_with(TRUNCATION_NOTICE));
    }

    #[test]
    fn garbage_bytes_are_unreadable() {
        assert!(matches!(extract_text(b"not a pdf"), Err(PdfError::Unreadable(_))));
    }
}
