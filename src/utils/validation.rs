use anyhow::{anyhow, Result};

/// Interval choices offered by the dhikr keyboard.
pub const DHIKR_INTERVALS: [i64; 3] = [2, 4, 6];

pub fn validate_dhikr_interval(hours: i64) -> Result<()> {
    if DHIKR_INTERVALS.contains(&hours) {
        Ok(())
    } else {
        Err(anyhow!("Dhikr interval must be one of 2, 4 or 6 hours"))
    }
}

pub fn validate_telegram_user_id(user_id: i64) -> Result<()> {
    if user_id <= 0 {
        return Err(anyhow!("User ID must be positive"));
    }

    // Telegram user ids currently fit well below 2^52
    if user_id > 4_503_599_627_370_496 {
        return Err(anyhow!("User ID out of valid range"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dhikr_interval_allowed() {
        assert!(validate_dhikr_interval(2).is_ok());
        assert!(validate_dhikr_interval(4).is_ok());
        assert!(validate_dhikr_interval(6).is_ok());
    }

    #[test]
    fn test_validate_dhikr_interval_rejected() {
        assert!(validate_dhikr_interval(0).is_err());
        assert!(validate_dhikr_interval(1).is_err());
        assert!(validate_dhikr_interval(3).is_err());
        assert!(validate_dhikr_interval(-4).is_err());
        assert!(validate_dhikr_interval(24).is_err());
    }

    #[test]
    fn test_validate_telegram_user_id() {
        assert!(validate_telegram_user_id(42).is_ok());
        assert!(validate_telegram_user_id(987_654_321).is_ok());
        assert!(validate_telegram_user_id(0).is_err());
        assert!(validate_telegram_user_id(-5).is_err());
        assert!(validate_telegram_user_id(i64::MAX).is_err());
    }
}
