//! Plan context normalization
//!
//! Maps raw contract-type/plan/state strings into the canonical identifiers
//! used to name knowledge-base partitions (`{State}_{ContractType}_{PlanTier}`).
//! Partition names must match the ingestion pipeline exactly, so all
//! normalization rules live here and nowhere else.

use copilot_core::PlanContext;

/// States with two-letter aliases in the knowledge base
const STATE_ALIASES: &[(&str, &str)] = &[
    ("AZ", "Arizona"),
    ("CA", "California"),
    ("GA", "Georgia"),
    ("MD", "Maryland"),
    ("MN", "Minnesota"),
    ("NV", "Nevada"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("WI", "Wisconsin"),
];

/// Canonical tier id for "the highest tier of this contract type"
pub const DEFAULT_TIER: &str = "default";

/// Upper-case the contract type (RE, DTC)
pub fn normalize_contract_type(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Canonicalize a state name
///
/// Accepts two-letter abbreviations and case-insensitive full names; unknown
/// states pass through unchanged so new partitions need no code change here.
pub fn normalize_state(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let upper = trimmed.to_uppercase();
    if let Some((_, full)) = STATE_ALIASES.iter().find(|(abbr, _)| *abbr == upper) {
        return full.to_string();
    }
    let lower = trimmed.to_lowercase();
    for (_, full) in STATE_ALIASES {
        if lower == full.to_lowercase() {
            return full.to_string();
        }
    }
    trimmed.to_string()
}

/// Canonicalize a plan name into a tier id for the given contract type
///
/// Strips non-alphanumerics and lower-cases before matching, so "Shield
/// Plus", "shield-plus" and "ShieldPlus" all resolve identically. The
/// highest tier of each contract type maps to [`DEFAULT_TIER`].
pub fn normalize_plan_tier(contract_type: &str, raw_plan: &str) -> String {
    let trimmed = raw_plan.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let compact: String = trimmed
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    match normalize_contract_type(contract_type).as_str() {
        "RE" => match compact.as_str() {
            "shieldessential" | "essential" => "ShieldEssential".to_string(),
            "shieldplus" | "plus" => "ShieldPlus".to_string(),
            "shieldcomplete" | "complete" => DEFAULT_TIER.to_string(),
            _ => trimmed.to_string(),
        },
        "DTC" => match compact.as_str() {
            "shieldsilver" | "silver" => "ShieldSilver".to_string(),
            "shieldgold" | "gold" => "ShieldGold".to_string(),
            "shieldplatinum" | "platinum" => DEFAULT_TIER.to_string(),
            _ => trimmed.to_string(),
        },
        _ => trimmed.to_string(),
    }
}

/// Resolve the knowledge partition for a plan context
///
/// Returns `None` when contract type or state cannot be resolved; callers
/// must treat that as "cannot answer yet", not an error. Unknown plan names
/// fall back to the contract type's highest tier.
pub fn knowledge_partition(plan: &PlanContext) -> Option<String> {
    let ct = normalize_contract_type(&plan.contract_type);
    let state = normalize_state(&plan.state);
    if ct.is_empty() || state.is_empty() {
        return None;
    }
    let tier = normalize_plan_tier(&ct, &plan.plan);

    let partition = match ct.as_str() {
        "RE" => match tier.as_str() {
            "ShieldEssential" => format!("{state}_RE_ShieldEssential"),
            "ShieldPlus" => format!("{state}_RE_ShieldPlus"),
            _ => format!("{state}_RE_ShieldComplete"),
        },
        "DTC" => match tier.as_str() {
            "ShieldSilver" => format!("{state}_DTC_ShieldSilver"),
            "ShieldGold" => format!("{state}_DTC_ShieldGold"),
            _ => format!("{state}_DTC_ShieldPlatinum"),
        },
        _ => return None,
    };
    Some(partition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_aliases_resolve() {
        assert_eq!(normalize_state("TX"), "Texas");
        assert_eq!(normalize_state("tx"), "Texas");
        assert_eq!(normalize_state("california"), "California");
        assert_eq!(normalize_state("Puerto Rico"), "Puerto Rico");
        assert_eq!(normalize_state(""), "");
    }

    #[test]
    fn plan_tiers_canonicalize() {
        assert_eq!(normalize_plan_tier("re", "Shield Plus"), "ShieldPlus");
        assert_eq!(normalize_plan_tier("RE", "essential"), "ShieldEssential");
        assert_eq!(normalize_plan_tier("dtc", "platinum"), DEFAULT_TIER);
        assert_eq!(normalize_plan_tier("DTC", "Gold"), "ShieldGold");
        assert_eq!(normalize_plan_tier("RE", "complete"), DEFAULT_TIER);
    }

    #[test]
    fn partitions_compose_state_contract_tier() {
        let plan = PlanContext::new("re", "Shield Plus", "TX");
        assert_eq!(
            knowledge_partition(&plan).as_deref(),
            Some("Texas_RE_ShieldPlus")
        );

        // Highest tier and unknown plans land on the contract default
        let plan = PlanContext::new("dtc", "platinum", "California");
        assert_eq!(
            knowledge_partition(&plan).as_deref(),
            Some("California_DTC_ShieldPlatinum")
        );
        let plan = PlanContext::new("dtc", "mystery plan", "CA");
        assert_eq!(
            knowledge_partition(&plan).as_deref(),
            Some("California_DTC_ShieldPlatinum")
        );
    }

    #[test]
    fn missing_context_yields_none() {
        assert!(knowledge_partition(&PlanContext::new("", "ShieldPlus", "TX")).is_none());
        assert!(knowledge_partition(&PlanContext::new("RE", "ShieldPlus", "")).is_none());
        assert!(knowledge_partition(&PlanContext::new("UNKNOWN", "x", "TX")).is_none());
    }
}
