use serde::{Deserialize, Serialize};

/// Priority shared by tasks and timeline items. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

pub const PRIORITIES: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

impl Priority {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Sort rank: high first, low last.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    /// Rank of a stored priority string; unknown values rank with medium.
    pub fn rank_of(s: &str) -> u8 {
        Self::parse(s).map_or(1, Self::rank)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_of_unknown_sorts_with_medium() {
        assert_eq!(Priority::rank_of("high"), 0);
        assert_eq!(Priority::rank_of("medium"), 1);
        assert_eq!(Priority::rank_of("low"), 2);
        assert_eq!(Priority::rank_of("urgent"), 1);
        assert_eq!(Priority::rank_of(""), 1);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Priority::parse(" HIGH "), Some(Priority::High));
        assert_eq!(Priority::parse("nope"), None);
    }
}
