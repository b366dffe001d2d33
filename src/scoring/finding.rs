use serde::{Deserialize, Serialize};

/// Risk tier of a single permission. Closed enumeration; ordering is by
/// severity so `Critical` compares greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    /// Fixed point weight this tier contributes to the total score.
    pub fn weight(self) -> u32 {
        match self {
            Self::Critical => 40,
            Self::High => 20,
            Self::Medium => 10,
            Self::Low => 5,
        }
    }

    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" | "crit" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// One scored contribution to an extension's total risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFinding {
    /// The permission token that triggered this finding.
    pub permission: String,
    pub risk_level: RiskTier,
    /// Weight of `risk_level`, denormalized for display.
    pub points: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_ordering_by_severity() {
        assert!(RiskTier::Critical > RiskTier::High);
        assert!(RiskTier::High > RiskTier::Medium);
        assert!(RiskTier::Medium > RiskTier::Low);
    }

    #[test]
    fn weights_are_fixed() {
        assert_eq!(RiskTier::Critical.weight(), 40);
        assert_eq!(RiskTier::High.weight(), 20);
        assert_eq!(RiskTier::Medium.weight(), 10);
        assert_eq!(RiskTier::Low.weight(), 5);
    }

    #[test]
    fn serializes_uppercase() {
        let json = serde_json::to_string(&RiskTier::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");
    }

    #[test]
    fn lenient_parsing() {
        assert_eq!(RiskTier::from_str_lenient("HIGH"), Some(RiskTier::High));
        assert_eq!(RiskTier::from_str_lenient("crit"), Some(RiskTier::Critical));
        assert_eq!(RiskTier::from_str_lenient("nope"), None);
    }
}
