//! Ranking strategies and their weight vectors.

use serde::{Deserialize, Serialize};

/// Relative influence of each factor on the final score.
///
/// Every strategy's weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    /// Weight of the urgency score
    pub urgency: f64,
    /// Weight of the raw importance
    pub importance: f64,
    /// Weight of the effort score
    pub effort: f64,
    /// Weight of the blocking-count score
    pub dependency: f64,
}

impl Weights {
    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.urgency + self.importance + self.effort + self.dependency
    }
}

/// A named weighting strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Favour quick wins
    FastestWins,
    /// Favour importance
    HighImpact,
    /// Favour due dates
    DeadlineDriven,
    /// Balanced mix
    #[default]
    SmartBalance,
}

impl Strategy {
    /// Every strategy, in name order.
    pub const ALL: [Strategy; 4] = [
        Strategy::DeadlineDriven,
        Strategy::FastestWins,
        Strategy::HighImpact,
        Strategy::SmartBalance,
    ];

    /// Wire name of the strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::FastestWins => "fastest_wins",
            Strategy::HighImpact => "high_impact",
            Strategy::DeadlineDriven => "deadline_driven",
            Strategy::SmartBalance => "smart_balance",
        }
    }

    /// Weight vector for this strategy.
    pub fn weights(&self) -> Weights {
        match self {
            Strategy::FastestWins => Weights {
                urgency: 0.2,
                importance: 0.2,
                effort: 0.5,
                dependency: 0.1,
            },
            Strategy::HighImpact => Weights {
                urgency: 0.2,
                importance: 0.6,
                effort: 0.1,
                dependency: 0.1,
            },
            Strategy::DeadlineDriven => Weights {
                urgency: 0.6,
                importance: 0.2,
                effort: 0.1,
                dependency: 0.1,
            },
            Strategy::SmartBalance => Weights {
                urgency: 0.3,
                importance: 0.4,
                effort: 0.15,
                dependency: 0.15,
            },
        }
    }

    /// Resolve a name leniently: case-insensitive, unknown names fall back
    /// to [`Strategy::SmartBalance`].
    pub fn resolve(name: &str) -> Self {
        name.to_lowercase().parse().unwrap_or_default()
    }

    /// Comma-separated list of accepted names.
    pub fn allowed_names() -> String {
        Self::ALL.iter().map(Strategy::as_str).collect::<Vec<_>>().join(", ")
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy name that matches no known strategy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Invalid strategy '{name}'. Allowed values: {allowed}.",
    allowed = Strategy::allowed_names()
)]
pub struct ParseStrategyError {
    /// The rejected name
    pub name: String,
}

impl std::str::FromStr for Strategy {
    type Err = ParseStrategyError;

    /// Strict parse: exact wire names only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fastest_wins" => Ok(Strategy::FastestWins),
            "high_impact" => Ok(Strategy::HighImpact),
            "deadline_driven" => Ok(Strategy::DeadlineDriven),
            "smart_balance" => Ok(Strategy::SmartBalance),
            _ => Err(ParseStrategyError { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        for strategy in Strategy::ALL {
            assert!((strategy.weights().total() - 1.0).abs() < 1e-9, "{strategy}");
        }
    }

    #[test]
    fn test_weight_table() {
        let w = Strategy::FastestWins.weights();
        assert_eq!((w.urgency, w.importance, w.effort, w.dependency), (0.2, 0.2, 0.5, 0.1));
        let w = Strategy::HighImpact.weights();
        assert_eq!((w.urgency, w.importance, w.effort, w.dependency), (0.2, 0.6, 0.1, 0.1));
        let w = Strategy::DeadlineDriven.weights();
        assert_eq!((w.urgency, w.importance, w.effort, w.dependency), (0.6, 0.2, 0.1, 0.1));
        let w = Strategy::SmartBalance.weights();
        assert_eq!((w.urgency, w.importance, w.effort, w.dependency), (0.3, 0.4, 0.15, 0.15));
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(Strategy::resolve("FASTEST_WINS"), Strategy::FastestWins);
        assert_eq!(Strategy::resolve("Deadline_Driven"), Strategy::DeadlineDriven);
    }

    #[test]
    fn test_resolve_falls_back_to_smart_balance() {
        assert_eq!(Strategy::resolve("whatever"), Strategy::SmartBalance);
        assert_eq!(Strategy::resolve(""), Strategy::SmartBalance);
    }

    #[test]
    fn test_strict_parse_rejects_unknown_and_uppercase() {
        assert_eq!("high_impact".parse::<Strategy>(), Ok(Strategy::HighImpact));

        let err = "HIGH_IMPACT".parse::<Strategy>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid strategy 'HIGH_IMPACT'. Allowed values: deadline_driven, fastest_wins, high_impact, smart_balance."
        );
    }

    #[test]
    fn test_serde_uses_snake_case() {
        assert_eq!(serde_json::to_string(&Strategy::SmartBalance).unwrap(), "\"smart_balance\"");
        for strategy in Strategy::ALL {
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{}\"", strategy.as_str()));
        }
    }
}
