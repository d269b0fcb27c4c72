/// Step counter for the 16-step background track
///
/// The original drove its sequencer from a wall-clock interval timer; here
/// the counter is stepped by the same loop that drives the simulation, so
/// tests can advance it deterministically and restarting a run can never
/// leave two timers going. [`MusicSequencer::reset`] on every game start is
/// the "cancel the previous timer" rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicSequencer {
    frames_per_step: u32,
    counter: u32,
    step: u32,
}

pub const PATTERN_LEN: u32 = 16;

impl MusicSequencer {
    /// `frames_per_step` must be non-zero; [`GameConfig::validate`] enforces
    /// this for session-owned sequencers
    ///
    /// [`GameConfig::validate`]: crate::game::GameConfig::validate
    pub fn new(frames_per_step: u32) -> Self {
        Self {
            frames_per_step,
            counter: 0,
            step: 0,
        }
    }

    /// Restart the pattern from step zero
    pub fn reset(&mut self) {
        self.counter = 0;
        self.step = 0;
    }

    /// Advance one frame; yields the due step index when one elapses
    pub fn advance(&mut self) -> Option<u32> {
        self.counter += 1;
        if self.counter < self.frames_per_step {
            return None;
        }
        self.counter = 0;
        let due = self.step % PATTERN_LEN;
        self.step = self.step.wrapping_add(1);
        Some(due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_step_per_interval() {
        let mut seq = MusicSequencer::new(9);
        let mut steps = Vec::new();
        for _ in 0..9 * 4 {
            if let Some(s) = seq.advance() {
                steps.push(s);
            }
        }
        assert_eq!(steps, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_pattern_wraps_at_sixteen() {
        let mut seq = MusicSequencer::new(1);
        let steps: Vec<u32> = (0..PATTERN_LEN * 2).filter_map(|_| seq.advance()).collect();
        assert_eq!(steps.len() as u32, PATTERN_LEN * 2);
        assert_eq!(steps[0], 0);
        assert_eq!(steps[15], 15);
        assert_eq!(steps[16], 0);
    }

    #[test]
    fn test_reset_restarts_pattern() {
        let mut seq = MusicSequencer::new(1);
        seq.advance();
        seq.advance();
        seq.reset();
        assert_eq!(seq.advance(), Some(0));
    }
}
