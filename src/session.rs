//! Animation sessions: one per algorithm, each advancing its own step
//! sequence on its own timer. Step application is pure state mutation so
//! the whole player is testable without a terminal.

use std::time::{Duration, Instant};

use crate::algo::AlgoId;
use crate::step::Step;

/// Bars are scaled against a fixed 200-unit height, mirroring the original
/// pixel scale. The renderer projects units onto however many rows it has.
pub const HEIGHT_UNITS: i64 = 200;

/// Animation delay for a given speed setting (speed in [1,10]).
pub fn delay_for_speed(speed: u8) -> Duration {
    let speed = speed.clamp(1, 10) as u64;
    Duration::from_millis(1100 - speed * 100)
}

/// Transient per-bar highlight, cleared before every applied step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    Compare,
    Swap,
    Divide,
    Merge,
    Pivot,
    Partition,
    Place,
    MergeComplete,
}

/// One array slot: the value it currently shows and its scaled height.
/// Bars are never reordered, only relabeled in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub value: i64,
    pub height: i64,
    pub highlight: Highlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Running,
    Paused,
    Finished,
}

/// Scale a value against a maximum: `floor(value / max * 200)` height units.
/// Non-positive values render as zero-height bars.
pub fn scale_height(value: i64, max: i64) -> i64 {
    if value <= 0 || max <= 0 {
        return 0;
    }
    value * HEIGHT_UNITS / max
}

pub struct Session {
    pub algorithm: AlgoId,
    pub bars: Vec<Bar>,
    pub state: PlayState,
    /// Milliseconds the server spent executing the algorithm.
    pub time_taken: Option<f64>,
    steps: Vec<Step>,
    cursor: usize,
    /// Captured once at creation; `place` steps scale against this, never
    /// against a recomputed maximum.
    initial_max: i64,
    next_tick: Instant,
}

impl Session {
    pub fn new(algorithm: AlgoId, array: &[i64], steps: Vec<Step>, time_taken: Option<f64>) -> Self {
        let initial_max = array.iter().copied().max().filter(|m| *m > 0).unwrap_or(1);
        let bars = array
            .iter()
            .map(|&value| Bar {
                value,
                height: scale_height(value, initial_max),
                highlight: Highlight::None,
            })
            .collect();

        let state = if steps.is_empty() {
            PlayState::Finished
        } else {
            PlayState::Running
        };

        Self {
            algorithm,
            bars,
            state,
            time_taken,
            steps,
            cursor: 0,
            initial_max,
            next_tick: Instant::now(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlayState::Finished
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Advance the timer: applies at most one step per call once the
    /// session's deadline has passed, then re-arms the deadline.
    pub fn tick(&mut self, now: Instant, delay: Duration) {
        if self.state != PlayState::Running || now < self.next_tick {
            return;
        }
        self.advance();
        self.next_tick = now + delay;
    }

    pub fn pause(&mut self) {
        if self.state == PlayState::Running {
            self.state = PlayState::Paused;
        }
    }

    /// Re-enter Running, re-arming the timer from the current cursor.
    pub fn resume(&mut self, now: Instant, delay: Duration) {
        if self.state == PlayState::Paused {
            self.state = PlayState::Running;
            self.next_tick = now + delay;
        }
    }

    /// Apply exactly one step and move the cursor. Transitions to Finished
    /// once the cursor reaches the end of the sequence.
    pub fn advance(&mut self) {
        if self.state == PlayState::Finished {
            return;
        }

        for bar in &mut self.bars {
            bar.highlight = Highlight::None;
        }

        if let Some(step) = self.steps.get(self.cursor).copied() {
            self.apply(step);
            self.cursor += 1;
        }

        if self.cursor >= self.steps.len() {
            self.state = PlayState::Finished;
        }
    }

    /// Pure step interpretation. Steps whose indices fall outside the bar
    /// sequence are ignored, not errors.
    fn apply(&mut self, step: Step) {
        if !step.in_bounds(self.bars.len()) {
            return;
        }

        match step {
            Step::Compare(i, j) => {
                self.bars[i].highlight = Highlight::Compare;
                self.bars[j].highlight = Highlight::Compare;
            }
            Step::Swap(i, j) => {
                self.bars.swap(i, j);
                self.bars[i].highlight = Highlight::Swap;
                self.bars[j].highlight = Highlight::Swap;
            }
            Step::Divide(start, end, _mid) => {
                self.highlight_range(start, end, Highlight::Divide);
            }
            Step::Merge(start, _mid, end) => {
                self.highlight_range(start, end, Highlight::Merge);
            }
            Step::Pivot(i) => {
                self.bars[i].highlight = Highlight::Pivot;
            }
            Step::Partition(start, end) => {
                self.highlight_range(start, end, Highlight::Partition);
            }
            Step::Place(i, value) => {
                let bar = &mut self.bars[i];
                bar.value = value;
                bar.height = scale_height(value, self.initial_max);
                bar.highlight = Highlight::Place;
            }
            Step::MergeComplete(start, end) => {
                self.highlight_range(start, end, Highlight::MergeComplete);
            }
        }
    }

    fn highlight_range(&mut self, start: usize, end: usize, highlight: Highlight) {
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        for bar in &mut self.bars[lo..=hi] {
            bar.highlight = highlight;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(steps: Vec<Step>) -> Session {
        Session::new(AlgoId::Bubble, &[5, 3, 8, 1], steps, None)
    }

    #[test]
    fn test_initial_heights_scale_against_max() {
        let s = session(vec![]);
        let heights: Vec<i64> = s.bars.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![125, 75, 200, 25]);
    }

    #[test]
    fn test_heights_monotonic_in_value() {
        let s = Session::new(AlgoId::Bubble, &[7, 2, 9, 9, 1], vec![], None);
        for a in &s.bars {
            for b in &s.bars {
                if a.value > b.value {
                    assert!(a.height >= b.height);
                }
            }
        }
    }

    #[test]
    fn test_empty_and_nonpositive_arrays_guarded() {
        let s = Session::new(AlgoId::Bubble, &[], vec![], None);
        assert!(s.bars.is_empty());
        assert!(s.is_finished());

        let s = Session::new(AlgoId::Bubble, &[0, -3], vec![], None);
        assert_eq!(s.bars[0].height, 0);
        assert_eq!(s.bars[1].height, 0);
    }

    #[test]
    fn test_swap_exchanges_exactly_two_bars() {
        let mut s = session(vec![Step::Swap(0, 1)]);
        s.advance();

        assert_eq!(s.bars[0].value, 3);
        assert_eq!(s.bars[0].height, 75);
        assert_eq!(s.bars[1].value, 5);
        assert_eq!(s.bars[1].height, 125);
        assert_eq!(s.bars[0].highlight, Highlight::Swap);
        assert_eq!(s.bars[1].highlight, Highlight::Swap);

        // untouched bars keep value and height
        assert_eq!(s.bars[2].value, 8);
        assert_eq!(s.bars[2].height, 200);
        assert_eq!(s.bars[3].value, 1);
        assert_eq!(s.bars[3].height, 25);
    }

    #[test]
    fn test_place_scales_against_original_max() {
        // place a value larger than the initial max: height goes over the
        // 200-unit scale rather than rescaling every bar
        let mut s = session(vec![Step::Place(3, 16)]);
        s.advance();
        assert_eq!(s.bars[3].value, 16);
        assert_eq!(s.bars[3].height, 16 * HEIGHT_UNITS / 8);
        assert_eq!(s.bars[3].highlight, Highlight::Place);
    }

    #[test]
    fn test_compare_highlights_clear_on_next_step() {
        let mut s = session(vec![Step::Compare(0, 1), Step::Compare(2, 3)]);
        s.advance();
        assert_eq!(s.bars[0].highlight, Highlight::Compare);
        s.advance();
        assert_eq!(s.bars[0].highlight, Highlight::None);
        assert_eq!(s.bars[2].highlight, Highlight::Compare);
    }

    #[test]
    fn test_out_of_range_step_is_ignored() {
        let mut s = session(vec![Step::Swap(0, 9)]);
        s.advance();
        assert_eq!(s.bars[0].value, 5);
        assert!(s.bars.iter().all(|b| b.highlight == Highlight::None));
        // the cursor still advanced past the ignored step
        assert!(s.is_finished());
    }

    #[test]
    fn test_range_steps_highlight_span() {
        let mut s = session(vec![Step::Merge(0, 1, 2)]);
        s.advance();
        assert_eq!(s.bars[0].highlight, Highlight::Merge);
        assert_eq!(s.bars[1].highlight, Highlight::Merge);
        assert_eq!(s.bars[2].highlight, Highlight::Merge);
        assert_eq!(s.bars[3].highlight, Highlight::None);
    }

    #[test]
    fn test_finishes_at_end_of_sequence() {
        let mut s = session(vec![Step::Compare(0, 1), Step::Swap(0, 1)]);
        assert_eq!(s.state, PlayState::Running);
        s.advance();
        assert_eq!(s.state, PlayState::Running);
        s.advance();
        assert_eq!(s.state, PlayState::Finished);
        // advancing past the end is a no-op
        s.advance();
        assert_eq!(s.cursor(), 2);
    }

    #[test]
    fn test_tick_respects_deadline_and_pause() {
        let mut s = session(vec![Step::Compare(0, 1), Step::Swap(0, 1)]);
        let delay = Duration::from_millis(100);
        let t0 = Instant::now();

        s.tick(t0, delay);
        assert_eq!(s.cursor(), 1);

        // deadline not yet reached
        s.tick(t0 + Duration::from_millis(50), delay);
        assert_eq!(s.cursor(), 1);

        s.pause();
        s.tick(t0 + Duration::from_millis(500), delay);
        assert_eq!(s.cursor(), 1);

        s.resume(t0 + Duration::from_millis(500), delay);
        s.tick(t0 + Duration::from_millis(600), delay);
        assert_eq!(s.cursor(), 2);
        assert!(s.is_finished());
    }

    #[test]
    fn test_delay_for_speed() {
        assert_eq!(delay_for_speed(1), Duration::from_millis(1000));
        assert_eq!(delay_for_speed(5), Duration::from_millis(600));
        assert_eq!(delay_for_speed(10), Duration::from_millis(100));
        // out-of-range speeds clamp instead of underflowing
        assert_eq!(delay_for_speed(0), Duration::from_millis(1000));
        assert_eq!(delay_for_speed(99), Duration::from_millis(100));
    }
}
