use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal risk category derived from the accumulated score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Band boundaries are exclusive upward: 0-24 Low, 25-49 Medium,
    /// 50-74 High, 75+ Critical.
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 75 => RiskLevel::Critical,
            s if s >= 50 => RiskLevel::High,
            s if s >= 25 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        };
        write!(f, "{label}")
    }
}

/// Severity tag on a single finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FindingKind {
    Safe,
    Warning,
    Danger,
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FindingKind::Safe => "SAFE",
            FindingKind::Warning => "WARNING",
            FindingKind::Danger => "DANGER",
        };
        write!(f, "{label}")
    }
}

/// A discrete observation surfaced to the user, in detection order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub category: String,
    pub message: String,
}

/// One extracted URL occurrence with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAnalysis {
    pub url: String,
    pub display_text: String,
    pub suspicious: bool,
    pub reasons: Vec<String>,
}

/// Sender fields pulled from the header block plus the authentication
/// verdict. `suspicious_headers` is reserved and stays empty for now.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderAnalysis {
    pub sender: String,
    pub return_path: String,
    pub spf_valid: bool,
    pub dkim_valid: bool,
    pub suspicious_headers: Vec<String>,
}

/// Full result of one analysis pass. Owned by the caller; the engine keeps
/// no reference to it after returning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub risk_score: i32,
    pub risk_level: RiskLevel,
    pub findings: Vec<Finding>,
    pub links: Vec<LinkAnalysis>,
    pub headers: HeaderAnalysis,
}
