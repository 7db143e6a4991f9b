use super::SignalScore;
use crate::auth::AuthenticationVerifier;
use crate::config::AuthenticationConfig;
use crate::report::{Finding, FindingKind, HeaderAnalysis};
use regex::Regex;

/// Sentinel for header fields the pattern match cannot find.
pub const UNKNOWN_FIELD: &str = "Unknown";

/// Pulls sender fields out of the raw text and attaches the authentication
/// verdict supplied by the verifier.
pub struct HeaderInspector {
    from_regex: Regex,
    return_path_regex: Regex,
    spf_failure_score: i32,
    dkim_failure_score: i32,
}

impl HeaderInspector {
    pub fn from_config(config: &AuthenticationConfig) -> anyhow::Result<Self> {
        Ok(Self {
            // first label match wins; the value is line-bounded
            from_regex: Regex::new(r"(?i)From:?\s*([^\r\n]+)")?,
            return_path_regex: Regex::new(r"(?i)Return-Path:?\s*([^\r\n]+)")?,
            spf_failure_score: config.spf_failure_score,
            dkim_failure_score: config.dkim_failure_score,
        })
    }

    pub fn inspect(
        &self,
        text: &str,
        verifier: &dyn AuthenticationVerifier,
    ) -> (HeaderAnalysis, SignalScore) {
        let sender = self.capture(&self.from_regex, text);
        let return_path = self.capture(&self.return_path_regex, text);

        let verdict = verifier.verify(&sender, &return_path);
        log::debug!(
            "auth verdict ({}): spf={} dkim={}",
            verifier.name(),
            verdict.spf_valid,
            verdict.dkim_valid
        );

        let mut outcome = SignalScore::default();
        if !verdict.spf_valid {
            outcome.score += self.spf_failure_score;
            outcome.findings.push(Finding {
                kind: FindingKind::Danger,
                category: "Authentication".to_string(),
                message: "SPF validation failed".to_string(),
            });
        }
        if !verdict.dkim_valid {
            outcome.score += self.dkim_failure_score;
            outcome.findings.push(Finding {
                kind: FindingKind::Warning,
                category: "Authentication".to_string(),
                message: "DKIM signature invalid".to_string(),
            });
        }

        let headers = HeaderAnalysis {
            sender,
            return_path,
            spf_valid: verdict.spf_valid,
            dkim_valid: verdict.dkim_valid,
            suspicious_headers: Vec::new(),
        };

        (headers, outcome)
    }

    fn capture(&self, regex: &Regex, text: &str) -> String {
        regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_else(|| UNKNOWN_FIELD.to_string())
    }
}
