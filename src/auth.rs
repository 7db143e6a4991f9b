use crate::config::AuthenticationConfig;
use rand::Rng;

/// SPF/DKIM outcome for a single analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthVerdict {
    pub spf_valid: bool,
    pub dkim_valid: bool,
}

/// Produces the authentication verdict for one email. Implementations may
/// consult real infrastructure or fake the result; the engine only sees
/// this trait.
pub trait AuthenticationVerifier: Send + Sync {
    fn verify(&self, sender: &str, return_path: &str) -> AuthVerdict;
    fn name(&self) -> &str;
}

/// Randomized stand-in for real SPF/DKIM verification. Draws each flag
/// independently at the configured pass rate; consults no DNS.
pub struct StubVerifier {
    spf_pass_rate: f64,
    dkim_pass_rate: f64,
}

impl StubVerifier {
    pub fn new(spf_pass_rate: f64, dkim_pass_rate: f64) -> Self {
        // gen_bool panics outside [0, 1]
        Self {
            spf_pass_rate: spf_pass_rate.clamp(0.0, 1.0),
            dkim_pass_rate: dkim_pass_rate.clamp(0.0, 1.0),
        }
    }

    pub fn from_config(config: &AuthenticationConfig) -> Self {
        Self::new(config.spf_pass_rate, config.dkim_pass_rate)
    }
}

impl AuthenticationVerifier for StubVerifier {
    fn verify(&self, _sender: &str, _return_path: &str) -> AuthVerdict {
        let mut rng = rand::thread_rng();
        AuthVerdict {
            spf_valid: rng.gen_bool(self.spf_pass_rate),
            dkim_valid: rng.gen_bool(self.dkim_pass_rate),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Fixed verdict regardless of input. Used in tests and anywhere a
/// reproducible run matters.
pub struct StaticVerifier {
    verdict: AuthVerdict,
}

impl StaticVerifier {
    pub fn new(spf_valid: bool, dkim_valid: bool) -> Self {
        Self {
            verdict: AuthVerdict {
                spf_valid,
                dkim_valid,
            },
        }
    }
}

impl AuthenticationVerifier for StaticVerifier {
    fn verify(&self, _sender: &str, _return_path: &str) -> AuthVerdict {
        self.verdict
    }

    fn name(&self) -> &str {
        "static"
    }
}
