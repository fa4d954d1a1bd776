//! Banner auto-carousel.

use std::time::Duration;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub struct Carousel<T> {
    slides: Vec<T>,
    index: usize,
    interval: Duration,
    elapsed: Duration,
    paused: bool,
}

impl<T> Carousel<T> {
    pub fn new(slides: Vec<T>) -> Self { Self::with_interval(slides, DEFAULT_INTERVAL) }

    pub fn with_interval(slides: Vec<T>, interval: Duration) -> Self {
        Self { slides, index: 0, interval, elapsed: Duration::ZERO, paused: false }
    }

    pub fn current(&self) -> Option<&T> { self.slides.get(self.index) }
    pub fn index(&self) -> usize { self.index }
    pub fn len(&self) -> usize { self.slides.len() }
    pub fn is_empty(&self) -> bool { self.slides.is_empty() }
    pub fn is_paused(&self) -> bool { self.paused }

    pub fn next(&mut self) {
        if !self.slides.is_empty() {
            self.index = (self.index + 1) % self.slides.len();
        }
        self.elapsed = Duration::ZERO;
    }

    pub fn previous(&mut self) {
        if !self.slides.is_empty() {
            self.index = (self.index + self.slides.len() - 1) % self.slides.len();
        }
        self.elapsed = Duration::ZERO;
    }

    /// Jumps to `index`, clamped to the last slide.
    pub fn go_to(&mut self, index: usize) {
        self.index = index.min(self.slides.len().saturating_sub(1));
        self.elapsed = Duration::ZERO;
    }

    pub fn pause(&mut self) { self.paused = true; }
    pub fn resume(&mut self) { self.paused = false; }

    /// Advances once per full interval in `elapsed`. Returns true if the slide changed.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if self.paused || self.slides.len() < 2 || self.interval.is_zero() {
            return false;
        }
        self.elapsed += elapsed;
        let mut advanced = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            advanced += 1;
        }
        if advanced == 0 {
            return false;
        }
        self.index = (self.index + advanced) % self.slides.len();
        true
    }
}
