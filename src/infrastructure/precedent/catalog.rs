//! Seed catalog of landmark precedents

use chrono::{TimeZone, Utc};

use crate::domain::Precedent;

struct Seed {
    id: i32,
    citation: &'static str,
    summary: &'static str,
    jurisdiction: &'static str,
    year: i32,
    case_type: &'static str,
    relevance_score: f64,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: 1,
        citation: "Brown v. Board of Education, 347 U.S. 483 (1954)",
        summary: "Declared state laws establishing separate public schools for black and white students unconstitutional.",
        jurisdiction: "United States Supreme Court",
        year: 1954,
        case_type: "Civil Rights",
        relevance_score: 0.95,
    },
    Seed {
        id: 2,
        citation: "Miranda v. Arizona, 384 U.S. 436 (1966)",
        summary: "Suspects must be informed of the right to remain silent and the right to an attorney before custodial interrogation.",
        jurisdiction: "United States Supreme Court",
        year: 1966,
        case_type: "Criminal",
        relevance_score: 0.90,
    },
    Seed {
        id: 3,
        citation: "Roe v. Wade, 410 U.S. 113 (1973)",
        summary: "Recognized a constitutional right to abortion under the Due Process Clause of the Fourteenth Amendment.",
        jurisdiction: "United States Supreme Court",
        year: 1973,
        case_type: "Constitutional",
        relevance_score: 0.85,
    },
    Seed {
        id: 4,
        citation: "Marbury v. Madison, 5 U.S. 137 (1803)",
        summary: "Established judicial review, allowing courts to strike down laws that conflict with the Constitution.",
        jurisdiction: "United States Supreme Court",
        year: 1803,
        case_type: "Constitutional",
        relevance_score: 0.92,
    },
    Seed {
        id: 5,
        citation: "Citizens United v. FEC, 558 U.S. 310 (2010)",
        summary: "Held that corporations and unions share the political speech protections of the First Amendment.",
        jurisdiction: "United States Supreme Court",
        year: 2010,
        case_type: "Corporate",
        relevance_score: 0.80,
    },
    Seed {
        id: 6,
        citation: "Gideon v. Wainwright, 372 U.S. 335 (1963)",
        summary: "States must provide counsel to criminal defendants who cannot afford an attorney.",
        jurisdiction: "United States Supreme Court",
        year: 1963,
        case_type: "Criminal",
        relevance_score: 0.88,
    },
    Seed {
        id: 7,
        citation: "Hadley v. Baxendale, 9 Ex. 341 (1854)",
        summary: "Contract damages are limited to losses reasonably foreseeable by both parties when the contract was made.",
        jurisdiction: "Court of Exchequer (England)",
        year: 1854,
        case_type: "Contract",
        relevance_score: 0.87,
    },
    Seed {
        id: 8,
        citation: "Smith v. Van Gorkom, 488 A.2d 858 (Del. 1985)",
        summary: "Directors breached their duty of care by approving a merger without adequate information.",
        jurisdiction: "Delaware Supreme Court",
        year: 1985,
        case_type: "Corporate",
        relevance_score: 0.78,
    },
];

/// The static precedent catalog, ordered by id
pub fn seed_precedents() -> Vec<Precedent> {
    let seeded_at = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);

    SEEDS
        .iter()
        .map(|seed| Precedent {
            id: seed.id,
            citation: seed.citation.to_string(),
            summary: seed.summary.to_string(),
            jurisdiction: seed.jurisdiction.to_string(),
            year: seed.year,
            case_type: seed.case_type.to_string(),
            relevance_score: seed.relevance_score,
            created_at: seeded_at,
            updated_at: seeded_at,
        })
        .collect()
}
