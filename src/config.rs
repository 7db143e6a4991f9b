use serde::{Deserialize, Serialize};

/// Heuristic lists and scoring weights. Everything the engine matches
/// against lives here so lists can be tuned without touching code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub link_analysis: LinkAnalysisConfig,
    pub content_analysis: ContentAnalysisConfig,
    pub authentication: AuthenticationConfig,
    /// Raw accumulated scores below this get the "no concerns" finding.
    #[serde(default = "default_safe_score_threshold")]
    pub safe_score_threshold: i32,
}

fn default_safe_score_threshold() -> i32 {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkAnalysisConfig {
    /// Substring match against the whole URL marks it suspicious.
    pub suspicious_domains: Vec<String>,
    /// Substrings reported as "Shortened URL" on suspicious links.
    pub shorteners: Vec<String>,
    /// Substrings reported as "Suspicious domain" on suspicious links.
    pub flagged_domains: Vec<String>,
    /// Flat contribution per suspicious link.
    pub suspicious_link_score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentAnalysisConfig {
    pub keywords: Vec<KeywordRule>,
}

/// One phishing-language marker and its score contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRule {
    pub phrase: String,
    pub score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticationConfig {
    pub spf_failure_score: i32,
    pub dkim_failure_score: i32,
    /// Probability that the stub verifier reports SPF as passing.
    pub spf_pass_rate: f64,
    /// Probability that the stub verifier reports DKIM as passing.
    pub dkim_pass_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            link_analysis: LinkAnalysisConfig {
                suspicious_domains: vec![
                    "bit.ly".to_string(),
                    "tinyurl.com".to_string(),
                    "suspicious-domain.com".to_string(),
                ],
                shorteners: vec!["bit.ly".to_string(), "tinyurl".to_string()],
                flagged_domains: vec!["suspicious-domain".to_string()],
                suspicious_link_score: 30,
            },
            content_analysis: ContentAnalysisConfig {
                keywords: vec![
                    KeywordRule {
                        phrase: "urgent".to_string(),
                        score: 15,
                    },
                    KeywordRule {
                        phrase: "verify account".to_string(),
                        score: 15,
                    },
                    KeywordRule {
                        phrase: "click here immediately".to_string(),
                        score: 15,
                    },
                    KeywordRule {
                        phrase: "suspended".to_string(),
                        score: 15,
                    },
                    KeywordRule {
                        phrase: "prize".to_string(),
                        score: 15,
                    },
                    KeywordRule {
                        phrase: "winner".to_string(),
                        score: 15,
                    },
                ],
            },
            authentication: AuthenticationConfig {
                spf_failure_score: 25,
                dkim_failure_score: 20,
                spf_pass_rate: 0.7,
                dkim_pass_rate: 0.6,
            },
            safe_score_threshold: default_safe_score_threshold(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_lists() {
        let config = Config::default();
        assert!(config
            .link_analysis
            .suspicious_domains
            .contains(&"bit.ly".to_string()));
        assert_eq!(config.content_analysis.keywords.len(), 6);
        assert_eq!(config.link_analysis.suspicious_link_score, 30);
        assert_eq!(config.safe_score_threshold, 20);
    }

    #[test]
    fn test_config_yaml_round_trip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            parsed.link_analysis.suspicious_domains,
            config.link_analysis.suspicious_domains
        );
        assert_eq!(
            parsed.authentication.spf_failure_score,
            config.authentication.spf_failure_score
        );
        assert_eq!(parsed.safe_score_threshold, config.safe_score_threshold);
    }

    #[test]
    fn test_safe_threshold_defaults_when_omitted() {
        let yaml = r#"
link_analysis:
  suspicious_domains: ["bit.ly"]
  shorteners: ["bit.ly"]
  flagged_domains: []
  suspicious_link_score: 30
content_analysis:
  keywords:
    - phrase: urgent
      score: 15
authentication:
  spf_failure_score: 25
  dkim_failure_score: 20
  spf_pass_rate: 0.7
  dkim_pass_rate: 0.6
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.safe_score_threshold, 20);
    }
}
