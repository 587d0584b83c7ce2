// Lookback windows offered by the dashboard.

use chrono::Duration;

use crate::error::{ForumError, Result};

/// Day counts a user can pick from.
pub const LOOKBACK_DAYS: [u32; 9] = [1, 7, 10, 14, 21, 28, 30, 60, 90];

/// One of [`LOOKBACK_DAYS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookbackWindow {
    index: usize,
}

impl Default for LookbackWindow {
    /// Seven days.
    fn default() -> Self {
        Self { index: 1 }
    }
}

impl LookbackWindow {
    pub fn from_days(days: u32) -> Result<Self> {
        LOOKBACK_DAYS
            .iter()
            .position(|&d| d == days)
            .map(|index| Self { index })
            .ok_or_else(|| {
                ForumError::Config(format!(
                    "lookback of {} days not offered, pick one of {:?}",
                    days, LOOKBACK_DAYS
                ))
            })
    }

    pub fn days(&self) -> u32 {
        LOOKBACK_DAYS[self.index]
    }

    pub fn duration(&self) -> Duration {
        Duration::days(i64::from(self.days()))
    }

    /// Next longer window; stays put at the longest.
    pub fn longer(&self) -> Self {
        Self {
            index: (self.index + 1).min(LOOKBACK_DAYS.len() - 1),
        }
    }

    /// Next shorter window; stays put at the shortest.
    pub fn shorter(&self) -> Self {
        Self {
            index: self.index.saturating_sub(1),
        }
    }

    pub fn label(&self) -> String {
        match self.days() {
            1 => "1 day".to_string(),
            n => format!("{} days", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_seven_days() {
        let window = LookbackWindow::default();
        assert_eq!(window.days(), 7);
        assert_eq!(window.duration(), Duration::days(7));
        assert_eq!(window.label(), "7 days");
    }

    #[test]
    fn test_from_days() {
        assert_eq!(LookbackWindow::from_days(90).unwrap().days(), 90);
        assert!(matches!(
            LookbackWindow::from_days(5),
            Err(ForumError::Config(_))
        ));
    }

    #[test]
    fn test_stepping_is_clamped() {
        let shortest = LookbackWindow::from_days(1).unwrap();
        assert_eq!(shortest.shorter(), shortest);
        assert_eq!(shortest.label(), "1 day");
        assert_eq!(shortest.longer().days(), 7);

        let longest = LookbackWindow::from_days(90).unwrap();
        assert_eq!(longest.longer(), longest);
        assert_eq!(longest.shorter().days(), 60);
    }
}
