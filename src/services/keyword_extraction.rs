use std::collections::HashSet;

use anyhow::Error;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::models::ArticleKeyword;

pub const DEFAULT_KEYWORD_COUNT: usize = 10;

const EMBED_BATCH_SIZE: usize = 32;
const MIN_WORD_CHARS: usize = 3;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Seam between keyword scoring and the embedding model, so tests can supply
/// a deterministic encoder instead of downloading model weights.
pub trait SentenceEncoder: Send + Sync {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, Error>;
}

pub struct MultilingualEncoder {
    model: TextEmbedding,
}

impl MultilingualEncoder {
    pub fn new() -> Result<Self, Error> {
        // the corpus is Russian, so the multilingual E5 checkpoint
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::MultilingualE5Small).with_show_download_progress(true),
        )?;

        Ok(MultilingualEncoder { model })
    }
}

impl SentenceEncoder for MultilingualEncoder {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, Error> {
        let embeddings = self.model.embed(texts.to_vec(), Some(EMBED_BATCH_SIZE))?;
        Ok(embeddings)
    }
}

/// Score every distinct word of `text` by its best cosine similarity against
/// any sentence of the same text, scaled to 0-100, and keep the `top_n`
/// highest. The word list keeps first-seen order and casing, which also makes
/// the descending sort stable for equal scores.
pub fn extract_keywords(
    encoder: &dyn SentenceEncoder,
    text: &str,
    top_n: usize,
) -> Result<Vec<ArticleKeyword>, Error> {
    let words = unique_words(text);
    if words.is_empty() {
        return Ok(Vec::new());
    }

    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return Ok(Vec::new());
    }

    info!(
        "scoring {} unique words against {} sentences",
        words.len(),
        sentences.len()
    );

    let sentence_embeddings = encoder.encode(&sentences)?;
    let word_embeddings = encoder.encode(&words)?;

    let mut keywords: Vec<ArticleKeyword> = words
        .iter()
        .zip(&word_embeddings)
        .map(|(word, word_embedding)| {
            let best = sentence_embeddings
                .iter()
                .map(|sentence_embedding| cosine_similarity(word_embedding, sentence_embedding))
                .fold(f32::MIN, f32::max);

            ArticleKeyword {
                keyword: word.clone(),
                score: ((best * 100.0).max(0.0)) as i32,
            }
        })
        .collect();

    keywords.sort_by_key(|entry| std::cmp::Reverse(entry.score));
    keywords.truncate(top_n);
    Ok(keywords)
}

fn unique_words(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();

    for found in WORD.find_iter(text) {
        let word = found.as_str();
        if word.chars().count() < MIN_WORD_CHARS {
            continue;
        }
        if seen.insert(word.to_lowercase()) {
            words.push(word.to_string());
        }
    }

    words
}

fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn cosine_similarity(v1: &[f32], v2: &[f32]) -> f32 {
    let dot_product = v1
        .iter()
        .zip(v2.iter())
        .fold(0.0, |acc, (x1, x2)| acc + (x1 * x2));
    let v1_norm = v1.iter().fold(0.0, |acc, x| acc + (x * x)).sqrt();
    let v2_norm = v2.iter().fold(0.0, |acc, x| acc + (x * x)).sqrt();
    dot_product / (v1_norm * v2_norm)
}
