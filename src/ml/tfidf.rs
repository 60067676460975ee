//! TF-IDF vectorizer for text feature extraction.
//!
//! Fitting builds a frozen vocabulary from the training documents:
//!
//! 1. Every document is run through the analyzer.
//! 2. Terms seen in fewer than `min_df` documents are dropped.
//! 3. If `max_features` is set, only the terms with the highest corpus
//!    frequency are kept (ties broken alphabetically).
//! 4. Feature indices are assigned in alphabetical term order.
//!
//! Transforming a document counts in-vocabulary terms, multiplies each count
//! by the term's smoothed IDF `ln((1 + n) / (1 + df)) + 1` and scales the
//! result to unit L2 norm. Terms outside the vocabulary are ignored.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::error::{HamspamError, Result};
use crate::ml::sparse::SparseVector;

/// TF-IDF vectorizer for text feature extraction.
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> feature index.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each feature index.
    idf: Vec<f64>,
    /// Total number of documents seen during fitting.
    n_documents: usize,
    /// Upper bound on the vocabulary size.
    max_features: Option<usize>,
    /// Minimum number of documents a term must appear in.
    min_df: usize,
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("max_features", &self.max_features)
            .field("min_df", &self.min_df)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a new TF-IDF vectorizer with the specified analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            max_features: None,
            min_df: 1,
            analyzer,
        }
    }

    /// Cap the vocabulary at the `max_features` most frequent terms.
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// Require terms to appear in at least `min_df` documents.
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df.max(1);
        self
    }

    /// Fit the vectorizer on training documents.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if documents.is_empty() {
            return Err(HamspamError::training(
                "Cannot fit a vectorizer on an empty document set",
            ));
        }

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        let mut term_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let tokens = self.tokenize(doc)?;
            let mut unique_tokens = HashSet::new();

            for token in tokens {
                if unique_tokens.insert(token.clone()) {
                    *document_frequency.entry(token.clone()).or_insert(0) += 1;
                }
                *term_frequency.entry(token).or_insert(0) += 1;
            }
        }

        let mut candidates: Vec<(String, usize)> = document_frequency
            .iter()
            .filter(|(_, df)| **df >= self.min_df)
            .map(|(term, _)| (term.clone(), term_frequency[term]))
            .collect();

        if candidates.is_empty() {
            return Err(HamspamError::training(
                "Empty vocabulary; documents may only contain stop words",
            ));
        }

        if let Some(limit) = self.max_features {
            if candidates.len() > limit {
                candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                candidates.truncate(limit);
            }
        }
        candidates.sort_by(|a, b| a.0.cmp(&b.0));

        self.n_documents = documents.len();
        let n = self.n_documents as f64;

        let mut vocabulary = HashMap::with_capacity(candidates.len());
        let mut idf = Vec::with_capacity(candidates.len());
        for (idx, (term, _)) in candidates.into_iter().enumerate() {
            let df = document_frequency[&term] as f64;
            // IDF = ln((N + 1) / (df + 1)) + 1
            idf.push(((n + 1.0) / (df + 1.0)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        self.vocabulary = vocabulary;
        self.idf = idf;

        log::debug!(
            "Fitted TF-IDF vocabulary of {} terms over {} documents",
            self.vocabulary.len(),
            self.n_documents
        );

        Ok(())
    }

    /// Fit on `documents` and return their feature vectors.
    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    /// Transform a document into an L2-normalized TF-IDF feature vector.
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        let tokens = self.tokenize(document)?;

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in &tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut features = SparseVector::from_entries(
            counts
                .into_iter()
                .map(|(idx, count)| (idx, count * self.idf[idx]))
                .collect(),
        );
        features.normalize();

        Ok(features)
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let tokens: Vec<String> = self
            .analyzer
            .analyze(text)?
            .filter(|token| !token.is_stopped())
            .map(|token| token.text)
            .collect();
        Ok(tokens)
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Feature index of `term`, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Vocabulary terms ordered by feature index.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = vec![String::new(); self.vocabulary.len()];
        for (term, &idx) in &self.vocabulary {
            names[idx] = term.clone();
        }
        names
    }

    /// IDF weight of `term`, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|idx| self.idf[idx])
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}
