use crate::error::{AppError, Result};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// English stop words excluded from the vocabulary.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "doing", "down",
        "during", "each", "few", "for", "from", "further", "had", "has", "have", "having",
        "he", "her", "here", "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it",
        "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not",
        "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "out", "over",
        "own", "same", "she", "should", "so", "some", "such", "than", "that", "the", "their",
        "theirs", "them", "then", "there", "these", "they", "this", "those", "through", "to",
        "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
        "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your",
        "yours", "yourself",
    ]
    .into_iter()
    .collect()
});

/// A corpus entry to be indexed
#[derive(Debug, Clone)]
pub struct CorpusEntry {
    pub id: Uuid,
    pub description: String,
}

/// Sparse lexical similarity index over case descriptions.
///
/// Builds TF-IDF weighted vectors over a bounded vocabulary of unigrams and
/// bigrams and answers nearest-neighbor queries by cosine similarity. An
/// instance is cheap and short-lived: each call site fits its own index over
/// a corpus snapshot instead of sharing process-wide state.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    /// Maximum vocabulary size
    max_features: usize,

    /// Term -> vocabulary slot
    vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per vocabulary slot
    idf: Vec<f64>,

    /// L2-normalized corpus vectors, parallel to `ids`
    vectors: Vec<Vec<f64>>,

    /// Corpus entry ids, parallel to `vectors`
    ids: Vec<Uuid>,

    /// Whether `fit` has been called on a non-empty corpus
    fitted: bool,
}

impl SimilarityIndex {
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            vectors: Vec::new(),
            ids: Vec::new(),
            fitted: false,
        }
    }

    /// Build the vector representation of every corpus entry.
    ///
    /// No-op on an empty corpus; the index stays unfitted and queries return
    /// nothing. Entries with a blank description fail fast with a validation
    /// error rather than silently mis-indexing.
    pub fn fit(&mut self, corpus: &[CorpusEntry]) -> Result<()> {
        if corpus.is_empty() {
            return Ok(());
        }

        for entry in corpus {
            if entry.description.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "Corpus entry {} has an empty description",
                    entry.id
                )));
            }
        }

        let tokenized: Vec<Vec<String>> =
            corpus.iter().map(|e| extract_terms(&e.description)).collect();

        // Corpus-wide term counts and document frequencies.
        let mut term_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for terms in &tokenized {
            for term in terms {
                *term_counts.entry(term.clone()).or_insert(0) += 1;
            }
            let unique: HashSet<&String> = terms.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }

        // Keep the most frequent terms; ties broken lexicographically so the
        // vocabulary is stable across re-fits of the same corpus.
        let mut vocab_list: Vec<(String, usize)> = term_counts.into_iter().collect();
        vocab_list.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        vocab_list.truncate(self.max_features);

        self.vocabulary = vocab_list
            .into_iter()
            .enumerate()
            .map(|(idx, (term, _))| (term, idx))
            .collect();

        // Smoothed IDF.
        let n_docs = corpus.len() as f64;
        self.idf = vec![0.0; self.vocabulary.len()];
        for (term, &idx) in &self.vocabulary {
            let df = *doc_freq.get(term).unwrap_or(&0) as f64;
            self.idf[idx] = ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0;
        }

        self.ids = corpus.iter().map(|e| e.id).collect();
        self.vectors = tokenized.iter().map(|terms| self.vectorize_terms(terms)).collect();
        self.fitted = true;

        Ok(())
    }

    /// Find the corpus entries most similar to a query description.
    ///
    /// Returns up to `top_k` `(id, score)` pairs ordered by descending score,
    /// skipping `exclude_id`. Returns an empty vector when the index was
    /// never fitted.
    pub fn find_similar(
        &self,
        query_description: &str,
        exclude_id: Option<Uuid>,
        top_k: usize,
    ) -> Vec<(Uuid, f64)> {
        if !self.fitted || self.ids.is_empty() {
            return Vec::new();
        }

        let query = self.vectorize_terms(&extract_terms(query_description));

        let mut scored: Vec<(Uuid, f64)> = self
            .ids
            .iter()
            .zip(self.vectors.iter())
            .map(|(id, vector)| (*id, dot(&query, vector)))
            .collect();

        // Stable sort keeps corpus order for equal scores.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        scored
            .into_iter()
            .filter(|(id, _)| Some(*id) != exclude_id)
            .take(top_k)
            .collect()
    }

    /// Build an L2-normalized TF-IDF vector; out-of-vocabulary terms drop out.
    fn vectorize_terms(&self, terms: &[String]) -> Vec<f64> {
        let mut vector = vec![0.0; self.vocabulary.len()];

        for term in terms {
            if let Some(&idx) = self.vocabulary.get(term) {
                vector[idx] += 1.0;
            }
        }

        for (idx, value) in vector.iter_mut().enumerate() {
            *value *= self.idf[idx];
        }

        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in vector.iter_mut() {
                *value /= norm;
            }
        }

        vector
    }
}

impl Default for SimilarityIndex {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Cosine similarity of two L2-normalized vectors; a zero vector scores 0.
fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Lowercase, strip stop words, and emit unigrams plus adjacent bigrams.
fn extract_terms(text: &str) -> Vec<String> {
    let tokens: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 2 && !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect();

    let mut terms = tokens.clone();
    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }

    terms
}
