use std::time::Duration;

use serde::Serialize;

/// Provider name reported when every adapter in the chain was exhausted
pub const FALLBACK_PROVIDER_NAME: &str = "Fallback";

/// Outcome of one orchestrated generation call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
    pub content: String,
    pub provider_name: String,
    pub elapsed: Duration,
    /// True when served by any adapter beyond the first, or by the synthetic notice
    pub is_from_fallback: bool,
}

impl GenerationResult {
    pub fn new(
        content: impl Into<String>,
        provider_name: impl Into<String>,
        elapsed: Duration,
        is_from_fallback: bool,
    ) -> Self {
        Self {
            content: content.into(),
            provider_name: provider_name.into(),
            elapsed,
            is_from_fallback,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    /// Whether this is the synthetic notice rather than real provider output
    pub fn is_synthetic(&self) -> bool {
        self.provider_name == FALLBACK_PROVIDER_NAME
    }
}

/// Fixed notice returned when no provider could produce a response
pub const UNAVAILABLE_NOTICE: &str = r#"## System Notice: AI Service Temporarily Unavailable

Our AI analysis service is currently experiencing technical difficulties. In the meantime, here is some general guidance:

### Immediate Actions:
1. **Document everything** - Preserve all relevant evidence and communications
2. **Timeline review** - Check all applicable statutes of limitations and deadlines
3. **Legal research** - Begin preliminary research on relevant statutes and case law
4. **Professional consultation** - Consider consulting with qualified legal counsel

### General Legal Strategy Framework:
- **Fact Development**: Gather and organize all relevant information
- **Legal Research**: Identify applicable laws and precedents
- **Risk Assessment**: Evaluate potential exposures and opportunities
- **Action Plan**: Develop step-by-step strategy with timelines

### Important Disclaimer:
This response is for general informational purposes only and does not constitute legal advice. Please consult with a qualified attorney for specific legal guidance related to your matter.

---
*Please try again later for a comprehensive analysis.*"#;
