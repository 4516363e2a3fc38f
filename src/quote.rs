// quote.rs - Rotating reflective prompts shown over the backdrop
//
// Advanced on every abstract-field tick. Each change also shifts the hue the
// page tints the quote card with.

use rand::Rng;

pub const DEFAULT_QUOTES: [&str; 5] = [
    "What mysteries lie in the spaces between thoughts?",
    "How does consciousness emerge from complexity?",
    "Where do ideas go when they're forgotten?",
    "Can beauty be measured in mathematical terms?",
    "What shapes the rhythm of our universe?",
];

const HUE_STEP: f32 = 40.0;

#[derive(Clone, Debug)]
pub struct QuoteRotator {
    quotes: Vec<String>,
    current: usize,
    hue: f32,
}

impl QuoteRotator {
    /// Starts on the first quote. An empty list falls back to the defaults.
    pub fn new(quotes: Vec<String>) -> Self {
        let quotes = if quotes.is_empty() {
            DEFAULT_QUOTES.iter().map(|q| q.to_string()).collect()
        } else {
            quotes
        };
        Self { quotes, current: 0, hue: 0.0 }
    }

    pub fn current(&self) -> &str {
        &self.quotes[self.current]
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Pick a uniformly random quote (the same one may come up again) and
    /// rotate the tint.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> &str {
        self.current = rng.random_range(0..self.quotes.len());
        self.hue = (self.hue + HUE_STEP) % 360.0;
        self.current()
    }
}

impl Default for QuoteRotator {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::seeded;

    #[test]
    fn starts_on_first_default() {
        let q = QuoteRotator::default();
        assert_eq!(q.current(), DEFAULT_QUOTES[0]);
        assert_eq!(q.hue(), 0.0);
    }

    #[test]
    fn advance_rotates_hue_and_stays_in_list() {
        let mut rng = seeded(1);
        let mut q = QuoteRotator::default();
        for step in 1..=9 {
            let quote = q.advance(&mut rng).to_string();
            assert!(DEFAULT_QUOTES.contains(&quote.as_str()));
            assert_eq!(q.hue(), (step as f32 * HUE_STEP) % 360.0);
        }
        assert_eq!(q.hue(), 0.0);
    }

    #[test]
    fn custom_quotes() {
        let mut q = QuoteRotator::new(vec!["only".into()]);
        assert_eq!(q.advance(&mut seeded(2)), "only");
    }
}
