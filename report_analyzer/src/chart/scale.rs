//!
//! Axis scales and tick generation.
//!

///
/// An axis scale.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    /// Linear mapping.
    #[default]
    Linear,
    /// Base-10 logarithmic mapping; only positive values are representable.
    Log,
}

impl Scale {
    ///
    /// Maps a value into [0, 1] within the `[lo, hi]` domain.
    ///
    /// Returns `None` for values the scale cannot represent, so callers drop
    /// the mark instead of drawing it at a bogus position.
    ///
    pub fn position(self, value: f64, lo: f64, hi: f64) -> Option<f64> {
        if !value.is_finite() || hi <= lo {
            return None;
        }
        match self {
            Self::Linear => Some((value - lo) / (hi - lo)),
            Self::Log => {
                if value <= 0.0 || lo <= 0.0 {
                    return None;
                }
                Some((value.log10() - lo.log10()) / (hi.log10() - lo.log10()))
            }
        }
    }

    ///
    /// Tick values covering the `[lo, hi]` domain.
    ///
    pub fn ticks(self, lo: f64, hi: f64) -> Vec<f64> {
        if hi <= lo || !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        match self {
            Self::Linear => {
                let raw_step = (hi - lo) / 5.0;
                let magnitude = 10f64.powf(raw_step.log10().floor());
                let residual = raw_step / magnitude;
                let step = if residual <= 1.0 {
                    magnitude
                } else if residual <= 2.0 {
                    2.0 * magnitude
                } else if residual <= 5.0 {
                    5.0 * magnitude
                } else {
                    10.0 * magnitude
                };
                let mut ticks = Vec::new();
                let mut tick = (lo / step).ceil() * step;
                while tick <= hi + step * 1e-9 {
                    ticks.push(tick);
                    tick += step;
                }
                ticks
            }
            Self::Log => {
                if lo <= 0.0 {
                    return Vec::new();
                }
                let mut ticks = Vec::new();
                let mut power = lo.log10().floor() as i32;
                while 10f64.powi(power) <= hi * 1.1 {
                    for mantissa in [1.0, 2.0, 5.0] {
                        let value = mantissa * 10f64.powi(power);
                        if value >= lo * 0.8 && value <= hi * 1.2 {
                            ticks.push(value);
                        }
                    }
                    power += 1;
                }
                ticks.sort_by(|a, b| a.partial_cmp(b).expect("Finite ticks"));
                ticks.dedup_by(|a, b| (*a - *b).abs() < 1e-12);
                ticks
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Scale;

    #[test]
    fn linear_position_is_proportional() {
        assert_eq!(Scale::Linear.position(5.0, 0.0, 10.0), Some(0.5));
    }

    #[test]
    fn log_position_rejects_non_positive_values() {
        assert_eq!(Scale::Log.position(0.0, 1.0, 100.0), None);
        assert_eq!(Scale::Log.position(-3.0, 1.0, 100.0), None);
    }

    #[test]
    fn log_position_is_proportional_in_decades() {
        assert_eq!(Scale::Log.position(10.0, 1.0, 100.0), Some(0.5));
    }

    #[test]
    fn linear_ticks_cover_the_domain() {
        let ticks = Scale::Linear.ticks(0.0, 10.0);
        assert!(ticks.contains(&0.0));
        assert!(ticks.contains(&10.0));
    }

    #[test]
    fn log_ticks_follow_one_two_five() {
        let ticks = Scale::Log.ticks(1.0, 100.0);
        assert!(ticks.contains(&1.0));
        assert!(ticks.contains(&2.0));
        assert!(ticks.contains(&5.0));
        assert!(ticks.contains(&10.0));
    }

    #[test]
    fn degenerate_domain_yields_no_ticks() {
        assert!(Scale::Linear.ticks(1.0, 1.0).is_empty());
    }
}
