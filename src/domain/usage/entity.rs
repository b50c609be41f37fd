//! Account usage entities

use serde::{Deserialize, Serialize};

use crate::domain::tier::Speed;

/// Snapshot of an account's cumulative usage, optionally combined with the
/// bandwidth speed its usage currently resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUsage {
    pub account_number: String,
    pub total_usage: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<Speed>,
}

impl AccountUsage {
    pub fn new(account_number: impl Into<String>, total_usage: i64) -> Self {
        Self {
            account_number: account_number.into(),
            total_usage,
            speed: None,
        }
    }

    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = Some(speed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_omitted_when_absent() {
        let usage = AccountUsage::new("123456", 50);
        let json = serde_json::to_string(&usage).unwrap();

        assert!(json.contains("\"total_usage\":50"));
        assert!(!json.contains("speed"));
    }

    #[test]
    fn test_with_speed() {
        let usage = AccountUsage::new("123456", 50).with_speed(Speed::Fast);
        let json = serde_json::to_string(&usage).unwrap();

        assert!(json.contains("\"speed\":\"FAST\""));
    }
}
