/// An 8-bit countdown register. The delay and sound timers of [`CPU`] are
/// both `Timer`s, decremented by the driver at 60hz.
///
/// [`CPU`]: crate::CPU
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer(u8);

impl Timer {
    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn set(&mut self, value: u8) {
        self.0 = value;
    }

    /// Count down by one unless already at zero. Returns whether the timer is
    /// still running after the tick.
    pub fn tick(&mut self) -> bool {
        self.0 = self.0.saturating_sub(1);

        self.is_active()
    }

    pub fn is_active(&self) -> bool {
        self.0 > 0
    }
}

#[cfg(test)]
mod tests {
    use super::Timer;

    #[test]
    fn test_default() {
        let t = Timer::default();

        assert!(!t.is_active());
        assert_eq!(t.value(), 0);
    }

    #[test]
    fn test_tick_when_value_is_zero() {
        let mut t = Timer::default();

        assert!(!t.tick());
        assert_eq!(t.value(), 0);
    }

    #[test]
    fn test_tick_counts_down_to_zero_and_stops() {
        let mut t = Timer::default();
        t.set(2);

        assert!(t.tick());
        assert_eq!(t.value(), 1);

        assert!(!t.tick());
        assert_eq!(t.value(), 0);

        assert!(!t.tick());
        assert_eq!(t.value(), 0);
    }

    #[test]
    fn test_set_overrides_countdown() {
        let mut t = Timer::default();
        t.set(10);
        t.tick();

        t.set(3);

        assert_eq!(t.value(), 3);
    }
}
