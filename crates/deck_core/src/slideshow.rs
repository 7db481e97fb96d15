//! Slideshow cursor: playback position and timer ownership

use crate::error::CoreError;
use crate::playlist::Direction;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Smallest accepted auto-advance interval.
pub const MIN_INTERVAL: Duration = Duration::from_millis(500);

/// Playback states. `Uninitialized` means no playlist has been finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Uninitialized,
    Stopped,
    Running,
}

/// An armed periodic advance task.
///
/// `epoch` fences late ticks: a tick whose epoch no longer matches the
/// cursor's must not mutate anything.
#[derive(Debug)]
pub struct TimerTask {
    pub(crate) handle: JoinHandle<()>,
    pub(crate) epoch: u64,
}

/// Playback cursor over the playlist.
///
/// Owns the armed timer task; arming and disarming go through this type so
/// at most one task can be live at a time.
#[derive(Debug, Default)]
pub struct SlideCursor {
    index: usize,
    state: PlaybackState,
    interval: Duration,
    timer: Option<TimerTask>,
    epoch: u64,
}

impl SlideCursor {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    /// Interval of the current or most recent run.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Validate a requested interval against [`MIN_INTERVAL`].
    pub fn validate_interval(interval_ms: u64) -> Result<Duration, CoreError> {
        let interval = Duration::from_millis(interval_ms);
        if interval < MIN_INTERVAL {
            return Err(CoreError::InvalidInterval(interval_ms));
        }
        Ok(interval)
    }

    /// Reset to the start of a freshly finalized playlist.
    pub(crate) fn init(&mut self) {
        debug_assert!(self.timer.is_none());
        self.index = 0;
        self.state = PlaybackState::Stopped;
    }

    /// Drop back to `Uninitialized` (catalog reload).
    pub(crate) fn reset(&mut self) {
        debug_assert!(self.timer.is_none());
        self.index = 0;
        self.state = PlaybackState::Uninitialized;
        self.interval = Duration::ZERO;
    }

    /// Step the index with wrap-around in both directions.
    ///
    /// Manual navigation and timer ticks both advance through here.
    pub(crate) fn step(&mut self, direction: Direction, len: usize) -> usize {
        debug_assert!(len > 0);
        let len = len as isize;
        self.index = ((self.index as isize + direction.delta() + len) % len) as usize;
        self.index
    }

    /// Epoch a newly armed task must carry to pass the tick fence.
    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Does a tick from `epoch` still own this cursor?
    pub(crate) fn tick_is_current(&self, epoch: u64) -> bool {
        self.timer.is_some() && self.epoch == epoch && self.state == PlaybackState::Running
    }

    /// Take ownership of a newly spawned timer task.
    ///
    /// The caller must have disarmed any previous task first.
    pub(crate) fn arm(&mut self, task: TimerTask, interval: Duration) {
        debug_assert!(self.timer.is_none());
        debug_assert_eq!(task.epoch, self.epoch);
        self.timer = Some(task);
        self.interval = interval;
        self.state = PlaybackState::Running;
    }

    /// Abort and forget the armed timer, if any, and bump the epoch so a
    /// tick already past its await point becomes inert.
    ///
    /// Running drops to Stopped; Uninitialized stays Uninitialized.
    pub(crate) fn disarm(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        if let Some(task) = self.timer.take() {
            task.handle.abort();
        }
        if self.state == PlaybackState::Running {
            self.state = PlaybackState::Stopped;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninitialized() {
        let cursor = SlideCursor::default();
        assert_eq!(cursor.state(), PlaybackState::Uninitialized);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn step_wraps_forward_and_back() {
        let mut cursor = SlideCursor::default();
        cursor.init();

        assert_eq!(cursor.step(Direction::Forward, 3), 1);
        assert_eq!(cursor.step(Direction::Forward, 3), 2);
        assert_eq!(cursor.step(Direction::Forward, 3), 0);

        assert_eq!(cursor.step(Direction::Back, 3), 2);
        assert_eq!(cursor.step(Direction::Back, 3), 1);
        assert_eq!(cursor.step(Direction::Back, 3), 0);
    }

    #[test]
    fn step_is_cyclic_over_the_playlist_length() {
        for len in 1..=5 {
            let mut cursor = SlideCursor::default();
            cursor.init();
            for _ in 0..len {
                cursor.step(Direction::Forward, len);
            }
            assert_eq!(cursor.index(), 0);

            for _ in 0..len {
                cursor.step(Direction::Back, len);
            }
            assert_eq!(cursor.index(), 0);
        }
    }

    #[test]
    fn interval_boundary_is_500ms() {
        assert_eq!(
            SlideCursor::validate_interval(499).unwrap_err(),
            CoreError::InvalidInterval(499)
        );
        assert_eq!(
            SlideCursor::validate_interval(500).unwrap(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn disarm_without_a_timer_keeps_the_state() {
        let mut cursor = SlideCursor::default();
        cursor.disarm();
        assert_eq!(cursor.state(), PlaybackState::Uninitialized);

        cursor.init();
        let epoch = cursor.epoch();
        cursor.disarm();
        assert_eq!(cursor.state(), PlaybackState::Stopped);
        assert_ne!(cursor.epoch(), epoch);
    }
}
