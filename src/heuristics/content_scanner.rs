use super::SignalScore;
use crate::config::{ContentAnalysisConfig, KeywordRule};
use crate::report::{Finding, FindingKind};

/// Scans the case-folded body text for known phishing-language markers.
pub struct ContentScanner {
    keywords: Vec<KeywordRule>,
}

impl ContentScanner {
    pub fn from_config(config: &ContentAnalysisConfig) -> Self {
        Self {
            // matching happens against lowercased text
            keywords: config
                .keywords
                .iter()
                .map(|rule| KeywordRule {
                    phrase: rule.phrase.to_lowercase(),
                    score: rule.score,
                })
                .collect(),
        }
    }

    /// Substring containment, not word-boundary tokenized: a phrase inside
    /// a larger word still counts. Each hit accumulates independently.
    pub fn scan(&self, text: &str) -> SignalScore {
        let haystack = text.to_lowercase();
        let mut outcome = SignalScore::default();

        for rule in &self.keywords {
            if haystack.contains(&rule.phrase) {
                log::debug!("phishing phrase hit: {:?}", rule.phrase);
                outcome.score += rule.score;
                outcome.findings.push(Finding {
                    kind: FindingKind::Warning,
                    category: "Content Analysis".to_string(),
                    message: format!("Contains suspicious phrase: \"{}\"", rule.phrase),
                });
            }
        }

        outcome
    }
}
