//! End-of-round currency conversion
//!
//! Pure function of the terminal session: variant, outcome and final score.

use super::game::{Outcome, Variant};

/// Coins for a pity (losing) round in the fixed-payout games
pub const PITY_COINS: u32 = 5;

/// Coins awarded for a finished round
pub fn coins_for(variant: Variant, outcome: Outcome, score: u32) -> u32 {
    match (variant, outcome) {
        (Variant::Runner, _) => (20 + score / 20).min(150),
        (Variant::Dodger, _) => (10 + score / 50).min(100),
        (Variant::Shooter, Outcome::Won) => 75,
        (Variant::BrickBreaker, Outcome::Won) => 50,
        (Variant::PaddleBall, Outcome::Won) => 20,
        (Variant::Shooter | Variant::BrickBreaker | Variant::PaddleBall, Outcome::Lost) => {
            PITY_COINS
        }
        (Variant::Snake, _) => score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_reward() {
        assert_eq!(coins_for(Variant::Runner, Outcome::Lost, 0), 20);
        assert_eq!(coins_for(Variant::Runner, Outcome::Lost, 19), 20);
        assert_eq!(coins_for(Variant::Runner, Outcome::Lost, 600), 50);
        assert_eq!(coins_for(Variant::Runner, Outcome::Lost, 2600), 150);
        assert_eq!(coins_for(Variant::Runner, Outcome::Lost, 3000), 150);
    }

    #[test]
    fn test_dodger_reward() {
        assert_eq!(coins_for(Variant::Dodger, Outcome::Lost, 0), 10);
        assert_eq!(coins_for(Variant::Dodger, Outcome::Lost, 2000), 50);
        assert_eq!(coins_for(Variant::Dodger, Outcome::Lost, 5000), 100);
        assert_eq!(coins_for(Variant::Dodger, Outcome::Lost, 90_000), 100);
    }

    #[test]
    fn test_fixed_payouts() {
        assert_eq!(coins_for(Variant::Shooter, Outcome::Won, 500), 75);
        assert_eq!(coins_for(Variant::Shooter, Outcome::Lost, 120), 5);
        assert_eq!(coins_for(Variant::BrickBreaker, Outcome::Won, 350), 50);
        assert_eq!(coins_for(Variant::BrickBreaker, Outcome::Lost, 40), 5);
        assert_eq!(coins_for(Variant::PaddleBall, Outcome::Won, 5), 20);
        assert_eq!(coins_for(Variant::PaddleBall, Outcome::Lost, 3), 5);
    }

    #[test]
    fn test_snake_pays_per_apple() {
        assert_eq!(coins_for(Variant::Snake, Outcome::Lost, 0), 0);
        assert_eq!(coins_for(Variant::Snake, Outcome::Lost, 17), 17);
    }
}
