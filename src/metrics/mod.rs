//! In-memory session statistics: best score, runs played, elapsed time
//!
//! Nothing here is persisted; the slate is wiped when the process exits.

use std::time::{Duration, Instant};

pub struct SessionMetrics {
    pub started_at: Instant,
    pub elapsed: Duration,
    pub high_score: u32,
    pub runs_played: u32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            elapsed: Duration::ZERO,
            high_score: 0,
            runs_played: 0,
        }
    }

    /// Refresh the elapsed clock; called once per rendered frame
    pub fn update(&mut self) {
        self.elapsed = self.started_at.elapsed();
    }

    pub fn on_run_start(&mut self) {
        self.started_at = Instant::now();
        self.elapsed = Duration::ZERO;
    }

    pub fn on_run_over(&mut self, final_score: u32) {
        self.runs_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = SessionMetrics::new();
        metrics.elapsed = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed = Duration::ZERO;
        assert_eq!(metrics.format_time(), "00:00");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = SessionMetrics::new();

        metrics.on_run_over(10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.runs_played, 1);

        metrics.on_run_over(5);
        assert_eq!(metrics.high_score, 10);

        metrics.on_run_over(15);
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.runs_played, 3);
    }

    #[test]
    fn test_run_start_resets_clock() {
        let mut metrics = SessionMetrics::new();
        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert!(metrics.elapsed.as_millis() >= 20);

        metrics.on_run_start();
        metrics.update();
        assert!(metrics.elapsed.as_millis() < 20);
    }
}
