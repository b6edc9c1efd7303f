//! Fixed vocabularies embedded in the extraction schema.

/// Roles a person investor may hold.
pub const ROLES: [&str; 11] = [
    "CEO/Founder",
    "Partner",
    "Managing Partner",
    "General Partner",
    "Principal",
    "Venture Partner",
    "Operating Partner",
    "Independent Investor/Angel",
    "Associate",
    "Research Analyst",
    "Scout",
];

pub const INVESTMENT_STAGES: [&str; 11] = [
    "pre-seed",
    "seed",
    "series-a",
    "series-b",
    "series-c",
    "series-d",
    "series-e-plus",
    "growth",
    "late-stage",
    "pre-ipo",
    "debt",
];

pub const INVESTMENT_INDUSTRIES: &[&str] = &[
    "adtech",
    "aerospace",
    "agtech",
    "ai",
    "analytics",
    "ar-vr",
    "automotive",
    "b2b-saas",
    "beauty",
    "big-data",
    "biotech",
    "blockchain",
    "cannabis",
    "carbon",
    "chemicals",
    "cleantech",
    "climate-tech",
    "cloud-infrastructure",
    "communications",
    "construction",
    "consumer",
    "consumer-goods",
    "creator-economy",
    "crypto",
    "cybersecurity",
    "data-infrastructure",
    "deep-tech",
    "defense",
    "developer-tools",
    "devops",
    "digital-health",
    "drones",
    "e-commerce",
    "edtech",
    "energy",
    "enterprise-software",
    "entertainment",
    "fashion",
    "femtech",
    "fintech",
    "food-beverage",
    "foodtech",
    "future-of-work",
    "gaming",
    "genomics",
    "govtech",
    "hardware",
    "healthcare",
    "healthtech",
    "hospitality",
    "hr-tech",
    "impact",
    "industrial",
    "insurtech",
    "iot",
    "legaltech",
    "life-sciences",
    "logistics",
    "machine-learning",
    "manufacturing",
    "marketplaces",
    "media",
    "medical-devices",
    "mental-health",
    "mobility",
    "music",
    "nanotech",
    "network-infrastructure",
    "nutrition",
    "open-source",
    "payments",
    "pet-tech",
    "pharma",
    "photonics",
    "productivity",
    "proptech",
    "quantum-computing",
    "real-estate",
    "regtech",
    "retail",
    "robotics",
    "sales-marketing",
    "semiconductors",
    "smart-cities",
    "social",
    "space",
    "sports",
    "supply-chain",
    "sustainability",
    "telecom",
    "transportation",
    "travel",
    "water",
    "wealth-management",
    "web3",
    "wellness",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn vocabularies_have_no_duplicates() {
        for list in [&ROLES[..], &INVESTMENT_STAGES[..], INVESTMENT_INDUSTRIES] {
            let unique: HashSet<_> = list.iter().collect();
            assert_eq!(unique.len(), list.len());
        }
    }

    #[test]
    fn industry_slugs_are_kebab_case() {
        for slug in INVESTMENT_INDUSTRIES {
            assert!(
                slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "{slug}"
            );
        }
        assert!(INVESTMENT_INDUSTRIES.len() >= 90);
    }
}
