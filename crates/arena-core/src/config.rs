//! Reward amount configuration.

use shared_types::DiamondAmount;

/// Fixed credit amounts applied by the workflows.
#[derive(Debug, Clone, Copy)]
pub struct RewardConfig {
    /// Bonus credited to *both* parties of a referral redemption.
    pub referral_bonus: DiamondAmount,
    /// Credit for one game reward claim.
    pub game_reward: DiamondAmount,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            referral_bonus: 100,
            game_reward: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_amounts() {
        let config = RewardConfig::default();
        assert_eq!(config.referral_bonus, 100);
        assert_eq!(config.game_reward, 10);
    }
}
