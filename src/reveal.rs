//! Reveal cursor state machine.
//!
//! Tracks how many sentences of the current document are visible. The cursor
//! ranges over `1..=total` for a non-empty document and is 0 only when the
//! document has no sentences. Both transitions saturate at their bound, so
//! the reader can oscillate indefinitely without errors.

/// How many of a document's sentences are currently revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealCursor {
    revealed: usize,
    total: usize,
}

impl RevealCursor {
    /// Fresh cursor for a document with `total` sentences: one sentence
    /// visible, or the empty state when there are none.
    pub fn new(total: usize) -> Self {
        RevealCursor {
            revealed: if total == 0 { 0 } else { 1 },
            total,
        }
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Show one more sentence. No-op at the end of the document.
    pub fn reveal(&mut self) {
        if self.revealed < self.total {
            self.revealed += 1;
        }
    }

    /// Hide the most recently revealed sentence. No-op at the first one.
    pub fn unreveal(&mut self) {
        if self.revealed > 1 {
            self.revealed -= 1;
        }
    }

    /// Progress through the document, 0–100. Derived, not stored.
    pub fn progress_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((100.0 * self.revealed as f64) / self.total as f64).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one_or_empty() {
        assert_eq!(RevealCursor::new(5).revealed(), 1);
        let empty = RevealCursor::new(0);
        assert_eq!(empty.revealed(), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn reveal_saturates_at_total() {
        let mut c = RevealCursor::new(2);
        c.reveal();
        assert_eq!(c.revealed(), 2);
        c.reveal();
        assert_eq!(c.revealed(), 2);
    }

    #[test]
    fn unreveal_saturates_at_one() {
        let mut c = RevealCursor::new(3);
        c.unreveal();
        assert_eq!(c.revealed(), 1);
        c.reveal();
        c.unreveal();
        assert_eq!(c.revealed(), 1);
    }

    #[test]
    fn reveal_unreveal_round_trips_from_interior() {
        let mut c = RevealCursor::new(10);
        c.reveal();
        c.reveal();
        let before = c.revealed();
        c.reveal();
        c.unreveal();
        assert_eq!(c.revealed(), before);
        c.unreveal();
        c.reveal();
        assert_eq!(c.revealed(), before);
    }

    #[test]
    fn empty_cursor_ignores_transitions() {
        let mut c = RevealCursor::new(0);
        c.reveal();
        c.unreveal();
        assert_eq!(c.revealed(), 0);
        assert_eq!(c.progress_percent(), 0);
    }

    #[test]
    fn progress_is_rounded_percentage() {
        let mut c = RevealCursor::new(3);
        assert_eq!(c.progress_percent(), 33);
        c.reveal();
        assert_eq!(c.progress_percent(), 67);
        c.reveal();
        assert_eq!(c.progress_percent(), 100);
    }
}
