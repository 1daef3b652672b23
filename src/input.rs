/// Ticks a single key press counts as "held". Terminal auto-repeat refreshes
/// the latch before it runs out, so a key held down stays held.
pub const HOLD_TICKS: u32 = 6;

/// Held-key emulation for terminals, which report presses but not releases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyLatch {
    remaining: u32,
}

impl KeyLatch {
    pub fn press(&mut self) {
        self.remaining = HOLD_TICKS;
    }

    pub fn is_held(&self) -> bool {
        self.remaining > 0
    }

    /// Call once per tick, after the held state has been sampled.
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn clear(&mut self) {
        self.remaining = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_expires_after_hold_ticks() {
        let mut latch = KeyLatch::default();
        assert!(!latch.is_held());
        latch.press();
        for _ in 0..HOLD_TICKS {
            assert!(latch.is_held());
            latch.tick();
        }
        assert!(!latch.is_held());
    }

    #[test]
    fn test_repeat_refreshes_latch() {
        let mut latch = KeyLatch::default();
        latch.press();
        for _ in 0..HOLD_TICKS * 3 {
            latch.tick();
            latch.press();
            assert!(latch.is_held());
        }
        latch.clear();
        assert!(!latch.is_held());
    }
}
