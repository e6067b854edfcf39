//! Bar chart data and axis scaling, independent of the PDF backend.

use crate::core::aggregate::Aggregate;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// One bar per day with valid hours, labelled `YYYY-MM-DD`, in date order.
pub fn daily_bars(agg: &Aggregate) -> Vec<Bar> {
    agg.days
        .iter()
        .map(|d| Bar {
            label: d.date.format("%Y-%m-%d").to_string(),
            value: d.hours,
        })
        .collect()
}

/// Value axis with round tick spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Axis {
    /// Axis covering `values` and zero, with roughly `target_ticks` intervals.
    pub fn fit(values: impl IntoIterator<Item = f64>, target_ticks: usize) -> Axis {
        let (lo, hi) = values
            .into_iter()
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));

        let span = if hi - lo > 0.0 { hi - lo } else { 1.0 };
        let step = nice_step(span / target_ticks.max(1) as f64);

        Axis {
            min: (lo / step).floor() * step,
            max: ((hi / step).ceil() * step).max(step),
            step,
        }
    }

    pub fn ticks(&self) -> Vec<f64> {
        let n = ((self.max - self.min) / self.step).round() as i64;
        (0..=n).map(|i| self.min + i as f64 * self.step).collect()
    }

    /// Position of `v` in `[0, 1]` along the axis.
    pub fn scale(&self, v: f64) -> f64 {
        (v - self.min) / (self.max - self.min)
    }

    pub fn tick_label(&self, v: f64) -> String {
        if self.step >= 1.0 {
            format!("{:.0}", v)
        } else if self.step >= 0.1 {
            format!("{:.1}", v)
        } else {
            format!("{:.2}", v)
        }
    }
}

/// Smallest of 1, 2, 5 or 10 times a power of ten that is at least `raw`.
pub fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

/// Show every n-th label so they do not overlap.
pub fn label_stride(bars: usize, max_labels: usize) -> usize {
    if max_labels == 0 {
        return 1;
    }
    bars.div_ceil(max_labels).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::group_by_day;
    use crate::models::timecard::TimeCard;

    #[test]
    fn steps_are_round() {
        assert_eq!(nice_step(1.7), 2.0);
        assert_eq!(nice_step(3.0), 5.0);
        assert!((nice_step(0.07) - 0.1).abs() < 1e-12);
        assert_eq!(nice_step(12.0), 20.0);
        assert_eq!(nice_step(0.0), 1.0);
    }

    #[test]
    fn axis_includes_zero_and_negatives() {
        let a = Axis::fit([8.0, 5.5, 9.25], 5);
        assert_eq!(a.min, 0.0);
        assert_eq!(a.step, 2.0);
        assert_eq!(a.max, 10.0);
        assert_eq!(a.ticks().len(), 6);

        let b = Axis::fit([-1.5, 4.0], 5);
        assert_eq!(b.min, -2.0);
        assert_eq!(b.max, 4.0);
        assert!(b.scale(0.0) > 0.0);
    }

    #[test]
    fn empty_axis_is_usable() {
        let a = Axis::fit(std::iter::empty(), 5);
        assert!(a.max > a.min);
        assert_eq!(a.scale(a.min), 0.0);
    }

    #[test]
    fn bars_follow_days() {
        let cards = vec![
            TimeCard::parse("2024-03-05 09:00:00", "2024-03-05 10:00:00", true, "").unwrap(),
            TimeCard::parse("2024-03-04 09:00:00", "2024-03-04 11:00:00", true, "").unwrap(),
            TimeCard::parse("2024-03-06 09:00:00", "2024-03-06 11:00:00", false, "").unwrap(),
        ];
        let bars = daily_bars(&group_by_day(&cards));
        assert_eq!(
            bars,
            vec![
                Bar {
                    label: "2024-03-04".into(),
                    value: 2.0
                },
                Bar {
                    label: "2024-03-05".into(),
                    value: 1.0
                },
            ]
        );
        assert_eq!(label_stride(365, 40), 10);
        assert_eq!(label_stride(3, 40), 1);
    }
}
