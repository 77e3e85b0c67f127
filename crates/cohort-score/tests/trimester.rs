use cohort_score::trimester_subscore;
use proptest::prelude::*;

proptest! {
    #[test]
    fn month_outside_the_trimester_pins_to_the_nearer_boundary(
        before in 0.0f64..60.0,
        after in 0.0f64..60.0,
        month in -5.0f64..15.0,
    ) {
        for (bot, top) in [(0.0, 3.0), (3.0, 6.0), (6.0, 9.0)] {
            let score = trimester_subscore(before, after, month, bot, top);
            if month <= bot {
                prop_assert!((score - after * (top - bot) / 3.0).abs() < 1e-9);
            } else if month >= top {
                prop_assert!((score - before * (top - bot) / 3.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn subscore_stays_between_the_pure_before_and_after_rates(
        before in 0.0f64..60.0,
        after in 0.0f64..60.0,
        month in 0.0f64..9.0,
    ) {
        for (bot, top) in [(0.0, 3.0), (3.0, 6.0), (6.0, 9.0)] {
            let score = trimester_subscore(before, after, month, bot, top);
            let lo = before.min(after) * (top - bot) / 3.0;
            let hi = before.max(after) * (top - bot) / 3.0;
            prop_assert!(score >= lo - 1e-9 && score <= hi + 1e-9);
        }
    }

    #[test]
    fn equal_rates_make_the_month_irrelevant(
        rate in 0.0f64..60.0,
        month in 0.0f64..9.0,
    ) {
        let score = trimester_subscore(rate, rate, month, 3.0, 6.0);
        prop_assert!((score - rate).abs() < 1e-9);
    }
}

#[test]
fn later_change_month_weights_the_before_rate_more() {
    let early = trimester_subscore(20.0, 0.0, 3.5, 3.0, 6.0);
    let late = trimester_subscore(20.0, 0.0, 5.5, 3.0, 6.0);
    assert!(late > early);
}
