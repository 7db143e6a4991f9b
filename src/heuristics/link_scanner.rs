use super::SignalScore;
use crate::config::LinkAnalysisConfig;
use crate::report::LinkAnalysis;
use regex::Regex;

const DISPLAY_TEXT_LIMIT: usize = 50;

/// Finds URL-like substrings in the raw email text and classifies each one.
pub struct LinkScanner {
    url_regex: Regex,
    suspicious_domains: Vec<String>,
    shorteners: Vec<String>,
    flagged_domains: Vec<String>,
    suspicious_link_score: i32,
}

impl LinkScanner {
    pub fn from_config(config: &LinkAnalysisConfig) -> anyhow::Result<Self> {
        Ok(Self {
            // A URL runs from the scheme to the first whitespace or HTML
            // delimiter character.
            url_regex: Regex::new(r#"(?i)https?://[^\s<>"']+"#)?,
            suspicious_domains: config.suspicious_domains.clone(),
            shorteners: config.shorteners.clone(),
            flagged_domains: config.flagged_domains.clone(),
            suspicious_link_score: config.suspicious_link_score,
        })
    }

    /// One entry per URL occurrence, in scan order. Duplicate URLs produce
    /// duplicate entries.
    pub fn scan(&self, text: &str) -> Vec<LinkAnalysis> {
        self.url_regex
            .find_iter(text)
            .map(|m| self.classify(m.as_str()))
            .collect()
    }

    /// Flat score per suspicious link; this pass emits no findings of its
    /// own, the per-link reasons carry the explanation.
    pub fn score(&self, links: &[LinkAnalysis]) -> SignalScore {
        let suspicious_count = links.iter().filter(|l| l.suspicious).count() as i32;
        SignalScore {
            score: suspicious_count * self.suspicious_link_score,
            findings: Vec::new(),
        }
    }

    fn classify(&self, url: &str) -> LinkAnalysis {
        let suspicious = self.is_suspicious(url);
        let mut reasons = Vec::new();

        if suspicious {
            log::debug!("suspicious link: {url}");
            if self.contains_any(url, &self.shorteners) {
                reasons.push("Shortened URL".to_string());
            }
            if self.contains_any(url, &self.flagged_domains) {
                reasons.push("Suspicious domain".to_string());
            }
            if !url.starts_with("https") {
                reasons.push("Insecure protocol".to_string());
            }
        }

        LinkAnalysis {
            url: url.to_string(),
            display_text: display_text(url),
            suspicious,
            reasons,
        }
    }

    fn is_suspicious(&self, url: &str) -> bool {
        self.contains_any(url, &self.suspicious_domains) || !url.starts_with("https")
    }

    fn contains_any(&self, url: &str, needles: &[String]) -> bool {
        needles.iter().any(|n| url.contains(n.as_str()))
    }
}

fn display_text(url: &str) -> String {
    let mut text: String = url.chars().take(DISPLAY_TEXT_LIMIT).collect();
    if url.chars().count() > DISPLAY_TEXT_LIMIT {
        text.push_str("...");
    }
    text
}
