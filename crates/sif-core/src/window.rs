//! Frame window and frame set shared by every track of one region.

use crate::track::Track;
use std::collections::BTreeSet;

/// First and last animated frame over a set of tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameWindow {
    pub first: i64,
    pub last: i64,
}

impl Default for FrameWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameWindow {
    /// Empty window: `first` starts above and `last` below every frame.
    pub fn new() -> Self {
        Self {
            first: i64::MAX,
            last: -1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first > self.last
    }

    pub fn include(&mut self, frame: i64) {
        self.first = self.first.min(frame);
        self.last = self.last.max(frame);
    }

    /// Widens the window with the waypoints of an animated track; constant
    /// and single-waypoint tracks leave it unchanged.
    pub fn update<T: Copy>(&mut self, track: &Track<T>) {
        if !track.is_animated() {
            return;
        }
        for frame in track.frames() {
            self.include(frame);
        }
    }

    /// An empty window collapses to frame 0.
    pub fn finalize(mut self) -> Self {
        if self.is_empty() {
            self.first = 0;
            self.last = 0;
        }
        self
    }
}

/// Ordered, de-duplicated frames at which some animated track has a waypoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSet {
    frames: BTreeSet<i64>,
}

impl FrameSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, frame: i64) {
        self.frames.insert(frame);
    }

    pub fn update<T: Copy>(&mut self, track: &Track<T>) {
        if !track.is_animated() {
            return;
        }
        self.frames.extend(track.frames());
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn contains(&self, frame: i64) -> bool {
        self.frames.contains(&frame)
    }

    /// Frames inside `window`, ascending.
    pub fn within(&self, window: FrameWindow) -> impl Iterator<Item = i64> + '_ {
        let range = (!window.is_empty()).then(|| self.frames.range(window.first..=window.last));
        range.into_iter().flatten().copied()
    }

    /// The frame after `frame` inside `window`, or `window.last` when none is left.
    pub fn next_frame(&self, frame: i64, window: FrameWindow) -> i64 {
        if frame >= window.last {
            return window.last;
        }
        self.frames
            .range((frame + 1)..=window.last)
            .next()
            .copied()
            .unwrap_or(window.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::AnimationState;
    use crate::track::{Interpolation, Waypoint};

    fn animated(frames: &[i64]) -> Track<f64> {
        Track {
            waypoints: frames
                .iter()
                .map(|&frame| Waypoint {
                    frame,
                    value: 0.0,
                    before: Interpolation::Clamped,
                    after: Interpolation::Clamped,
                })
                .collect(),
            state: AnimationState::Animated,
        }
    }

    #[test]
    fn test_window_and_set_over_tracks() {
        let tracks = [animated(&[2, 5]), animated(&[0, 7]), Track::constant(1.0)];
        let mut window = FrameWindow::new();
        let mut set = FrameSet::new();
        for track in &tracks {
            window.update(track);
            set.update(track);
        }
        let window = window.finalize();
        assert_eq!(window, FrameWindow { first: 0, last: 7 });
        assert_eq!(set.within(window).collect::<Vec<_>>(), vec![0, 2, 5, 7]);
        assert_eq!(set.next_frame(2, window), 5);
        assert_eq!(set.next_frame(7, window), 7);
    }

    #[test]
    fn test_degenerate_window() {
        let mut window = FrameWindow::new();
        window.update(&Track::constant(0.0));
        assert!(window.is_empty());
        assert_eq!(window.finalize(), FrameWindow { first: 0, last: 0 });
    }
}
