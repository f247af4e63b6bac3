//! Goal arithmetic
//!
//! Goals start on a multiple of [`BASE_GOAL`] and double each time a count
//! lands on them exactly, so they grow geometrically while counts grow
//! linearly.

/// Unit every fresh goal is rounded to
pub const BASE_GOAL: u64 = 50;

/// Server goal of a fresh install
pub const DEFAULT_SERVER_GOAL: u64 = 100;

/// Smallest positive multiple of [`BASE_GOAL`] that is at least `kills`
///
/// Zero kills yields [`BASE_GOAL`], never zero.
pub fn round_goal(kills: u64) -> u64 {
    if kills <= BASE_GOAL {
        return BASE_GOAL;
    }
    kills.div_ceil(BASE_GOAL).saturating_mul(BASE_GOAL)
}

/// Goal that replaces `goal` once it has been reached
pub fn escalate(goal: u64) -> u64 {
    goal.saturating_mul(2)
}

/// Load-time repair: the round goal wins when it exceeds the stored goal
pub fn repair_goal(stored: u64, kills: u64) -> u64 {
    stored.max(round_goal(kills))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_goal_zero_is_base() {
        assert_eq!(round_goal(0), 50);
    }

    #[test]
    fn test_round_goal_boundaries() {
        assert_eq!(round_goal(1), 50);
        assert_eq!(round_goal(49), 50);
        assert_eq!(round_goal(50), 50);
        assert_eq!(round_goal(51), 100);
        assert_eq!(round_goal(120), 150);
        assert_eq!(round_goal(150), 150);
    }

    #[test]
    fn test_escalate_doubles() {
        assert_eq!(escalate(50), 100);
        assert_eq!(escalate(100), 200);
        assert_eq!(escalate(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_repair_goal_prefers_larger() {
        assert_eq!(repair_goal(100, 120), 150);
        assert_eq!(repair_goal(400, 120), 400);
        assert_eq!(repair_goal(0, 0), 50);
    }
}
