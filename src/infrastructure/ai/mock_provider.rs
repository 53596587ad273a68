use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::domain::{AiProvider, DomainError, GenerationRequest};

const MIN_LATENCY_MS: u64 = 500;
const MAX_LATENCY_MS: u64 = 1500;

/// Area of law a prompt is classified into by the stub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseCategory {
    Contract,
    Criminal,
    CivilRights,
    Corporate,
    General,
}

impl CaseCategory {
    /// Keyword sets in priority order; the first set with a hit wins
    const RULES: [(CaseCategory, &'static [&'static str]); 4] = [
        (CaseCategory::Contract, &["contract", "agreement"]),
        (
            CaseCategory::Criminal,
            &["criminal", "defendant", "prosecution"],
        ),
        (
            CaseCategory::CivilRights,
            &["civil rights", "discrimination", "constitutional"],
        ),
        (CaseCategory::Corporate, &["corporate", "business", "merger"]),
    ];

    pub fn classify(prompt: &str) -> Self {
        let lowered = prompt.to_lowercase();

        Self::RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(CaseCategory::General)
    }

    pub fn template(&self) -> &'static str {
        match self {
            Self::Contract => CONTRACT_TEMPLATE,
            Self::Criminal => CRIMINAL_TEMPLATE,
            Self::CivilRights => CIVIL_RIGHTS_TEMPLATE,
            Self::Corporate => CORPORATE_TEMPLATE,
            Self::General => GENERAL_TEMPLATE,
        }
    }
}

/// Local deterministic stub. Always constructible, never fails.
#[derive(Debug, Clone)]
pub struct MockAiProvider {
    latency: (u64, u64),
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            latency: (MIN_LATENCY_MS, MAX_LATENCY_MS),
        }
    }

    /// Override the simulated latency range in milliseconds
    pub fn with_latency(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.latency = (min_ms.min(max_ms), max_ms.max(min_ms));
        self
    }

    fn simulated_latency(&self) -> Duration {
        let (min, max) = self.latency;
        if min == max {
            return Duration::from_millis(min);
        }

        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<String, DomainError> {
        info!(
            prompt_len = request.prompt.len(),
            "Mock provider generating response"
        );

        let latency = self.simulated_latency();
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(DomainError::Cancelled),
            _ = tokio::time::sleep(latency) => {}
        }

        let category = CaseCategory::classify(&request.prompt);
        let content = category.template();
        debug!(?category, response_len = content.len(), "Mock provider responded");

        Ok(content.to_string())
    }

    async fn probe(&self, _cancel: &CancellationToken) -> bool {
        true
    }

    fn name(&self) -> &str {
        "Mock"
    }
}

const CONTRACT_TEMPLATE: &str = r#"## Contract Law Analysis

### Key Considerations:
- **Formation**: Confirm offer, acceptance, consideration, capacity and lawful purpose
- **Terms**: Review express and implied terms for ambiguity
- **Performance**: Map each party's obligations against the agreed timeline
- **Risk Allocation**: Check limitation of liability, indemnities and force majeure

### Recommended Strategy:
1. **Document Review**: Assemble the executed agreement, amendments and correspondence
2. **Breach Analysis**: Identify which obligations were missed and whether the breach is material
3. **Remedies**: Compare damages, specific performance and rescission
4. **Dispute Resolution**: Follow any notice, cure or arbitration clause before filing

### Relevant Principles:
- Contracts are read under an objective reasonable-person standard
- An implied covenant of good faith and fair dealing applies to performance
- Materiality of a breach turns on timing, severity and opportunity to cure

### Next Steps:
- [ ] Complete a clause-by-clause term analysis
- [ ] Quantify losses caused by the alleged breach
- [ ] Send any contractually required notice
- [ ] Prepare a negotiation position paper"#;

const CRIMINAL_TEMPLATE: &str = r#"## Criminal Defense Strategy

### Constitutional Protections:
- **Fourth Amendment**: Unreasonable search and seizure
- **Fifth Amendment**: Privilege against self-incrimination and due process
- **Sixth Amendment**: Right to counsel and to confront witnesses
- **Eighth Amendment**: Excessive bail and cruel or unusual punishment

### Defense Framework:
1. **Evidence Review**: Test the admissibility of every item the prosecution relies on
2. **Suppression Motions**: Target statements or evidence obtained in violation of rights
3. **Witness Strategy**: Prepare cross-examination themes for prosecution witnesses
4. **Plea Evaluation**: Weigh trial exposure against any offered agreement

### Key Precedents:
- Miranda v. Arizona: warnings required before custodial interrogation
- Mapp v. Ohio: exclusionary rule applies to the states
- Gideon v. Wainwright: right to appointed counsel in felony cases

### Investigation Priorities:
- [ ] Reconstruct the arrest and search timeline
- [ ] Audit chain of custody for physical evidence
- [ ] Locate and interview defense witnesses
- [ ] Research statutory defenses and sentencing ranges"#;

const CIVIL_RIGHTS_TEMPLATE: &str = r#"## Civil Rights Strategy

### Constitutional Framework:
- **Equal Protection**: Fourteenth Amendment scrutiny analysis
- **Due Process**: Procedural and substantive protections
- **First Amendment**: Speech, religion and assembly
- **42 U.S.C. § 1983**: Claims for deprivation of rights under color of law

### Strategic Approach:
1. **Scrutiny Level**: Determine whether strict, intermediate or rational-basis review applies
2. **Evidence of Discrimination**: Combine direct evidence with disparate-impact statistics
3. **Relief**: Pair damages claims with injunctive relief against ongoing conduct
4. **Class Potential**: Assess whether the practice affects a definable group

### Landmark Cases:
- Brown v. Board of Education: segregation in public education is unconstitutional
- Loving v. Virginia: marriage as a fundamental right
- Tennessee v. Garner: limits on the use of deadly force

### Action Plan:
- [ ] Document the pattern or practice at issue
- [ ] Gather statistical and comparative evidence
- [ ] Check administrative exhaustion requirements and filing deadlines
- [ ] Identify federal and state statutes that apply"#;

const CORPORATE_TEMPLATE: &str = r#"## Corporate Law Strategy

### Governance Framework:
- **Fiduciary Duties**: Directors' duties of care and loyalty
- **Shareholder Rights**: Voting, inspection and derivative actions
- **Compliance**: Securities reporting and state corporate law obligations
- **Transactions**: Structure of mergers, acquisitions and reorganizations

### Risk Management:
1. **Due Diligence**: Financial, legal and operational review of the counterparty
2. **Regulatory Review**: Industry-specific approvals and antitrust clearance
3. **Key Contracts**: Change-of-control and assignment clauses in material agreements
4. **Intellectual Property**: Ownership and protection of core assets

### Key Principles:
- Business judgment rule protects informed, good-faith board decisions
- Entire fairness review applies to conflicted transactions
- Revlon duties arise when control of the company is sold

### Implementation Steps:
- [ ] Audit board processes and committee charters
- [ ] Prepare a stakeholder communication plan
- [ ] Assess regulatory filings and approvals
- [ ] Finalize transaction documents and approvals"#;

const GENERAL_TEMPLATE: &str = r#"## Legal Strategy Analysis

### Initial Assessment:
The matter described touches several areas of law. The framework below gives a structured starting point for building a strategy.

### Strategic Framework:
1. **Legal Research**: Identify controlling statutes, regulations and case law
2. **Fact Development**: Collect and organize evidence and documents
3. **Risk Assessment**: Estimate exposure and ways to reduce it
4. **Alternatives**: Explore negotiation, mediation and settlement

### Key Considerations:
- **Jurisdiction**: Confirm proper venue and governing law
- **Limitations Periods**: Calendar every filing deadline
- **Evidence Preservation**: Issue a litigation hold early
- **Client Objectives**: Keep the strategy aligned with the client's goals

### Recommended Actions:
- [ ] Complete preliminary legal research
- [ ] Conduct a detailed client interview
- [ ] Build a case timeline and procedural calendar
- [ ] Evaluate settlement options and budget

*Note: This analysis supports strategic planning and does not constitute legal advice.*"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn instant() -> MockAiProvider {
        MockAiProvider::new().with_latency(0, 0)
    }

    #[test]
    fn test_contract_wins_over_later_keywords() {
        let category =
            CaseCategory::classify("Criminal defendant disputes a merger agreement contract");
        assert_eq!(category, CaseCategory::Contract);
    }

    #[test]
    fn test_classification_priority_and_case() {
        assert_eq!(
            CaseCategory::classify("The PROSECUTION withheld evidence"),
            CaseCategory::Criminal
        );
        assert_eq!(
            CaseCategory::classify("Workplace discrimination claim"),
            CaseCategory::CivilRights
        );
        assert_eq!(
            CaseCategory::classify("Small business partnership dispute"),
            CaseCategory::Corporate
        );
        assert_eq!(
            CaseCategory::classify("Neighbor's tree fell on my fence"),
            CaseCategory::General
        );
    }

    #[tokio::test]
    async fn test_generate_returns_template() {
        let provider = instant();
        let request = GenerationRequest::new("Breach of a supply agreement");

        let content = provider
            .generate(&request, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(content, CONTRACT_TEMPLATE);
        assert!(provider.probe(&CancellationToken::new()).await);
        assert_eq!(provider.name(), "Mock");
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_within_range() {
        let provider = MockAiProvider::new();
        let request = GenerationRequest::new("anything");

        let started = tokio::time::Instant::now();
        provider
            .generate(&request, &CancellationToken::new())
            .await
            .unwrap();
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_millis(MIN_LATENCY_MS));
        assert!(elapsed <= Duration::from_millis(MAX_LATENCY_MS));
    }

    #[tokio::test]
    async fn test_cancelled_token_aborts_sleep() {
        let provider = MockAiProvider::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = provider
            .generate(&GenerationRequest::new("anything"), &cancel)
            .await;

        assert!(result.unwrap_err().is_cancelled());
    }
}
