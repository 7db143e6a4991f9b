pub mod analyzer;
pub mod auth;
pub mod config;
pub mod heuristics;
pub mod report;

pub use analyzer::AnalyzerEngine;
pub use auth::{AuthVerdict, AuthenticationVerifier, StaticVerifier, StubVerifier};
pub use config::Config;
pub use report::{
    AnalysisReport, Finding, FindingKind, HeaderAnalysis, LinkAnalysis, RiskLevel,
};
