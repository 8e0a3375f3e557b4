use super::denomination::Denomination;

/// Result of pricing one (machine, denomination) row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefillQuote {
    pub current: f64,
    pub refill: u32,
    pub new_total: f64,
    pub capacity_reached: bool,
}

/// Reads a typed coin count. Empty input is `None`; anything that is not a
/// finite, non-negative number counts as zero.
pub fn parse_current(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value = trimmed
        .parse::<f64>()
        .ok()
        // Coin counts are never negative; "-30" is treated like garbage
        // input rather than as stock below empty.
        .filter(|value| value.is_finite() && *value >= 0.0)
        .unwrap_or(0.0);
    Some(value)
}

/// Number of coins to load so the machine ends up as close to `capacity` as
/// whole rolls allow, without ever going over it. `None` means nothing has
/// been entered yet.
pub fn compute_refill(current: &str, capacity: u32, denomination: Denomination) -> Option<u32> {
    let current = parse_current(current)?;
    Some(refill_for(current, capacity, denomination))
}

fn refill_for(current: f64, capacity: u32, denomination: Denomination) -> u32 {
    let capacity = f64::from(capacity);
    if current >= capacity {
        return 0;
    }

    let shortfall = capacity - current;
    let step = f64::from(denomination.rounding_step());
    // f64::round is half-away-from-zero, i.e. half-up for a positive shortfall.
    let mut refill = (shortfall / step).round() * step;
    if refill > shortfall {
        refill = (shortfall / step).floor() * step;
    }
    refill.max(0.0) as u32
}

pub fn quote(current: &str, capacity: u32, denomination: Denomination) -> Option<RefillQuote> {
    let refill = compute_refill(current, capacity, denomination)?;
    let current = parse_current(current)?;
    Some(RefillQuote {
        current,
        refill,
        new_total: current + f64::from(refill),
        capacity_reached: current >= f64::from(capacity),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    const ALL: [Denomination; 4] = Denomination::ALL;

    #[test]
    fn empty_k11_ten_cents_falls_back_to_previous_roll() {
        assert_eq!(compute_refill("0", 770, Denomination::TenCents), Some(700));
        let quote = quote("0", 770, Denomination::TenCents).expect("numeric input");
        assert_eq!(quote.new_total, 700.0);
        assert!(!quote.capacity_reached);
    }

    #[test]
    fn exact_roll_fills_to_capacity() {
        let quote = quote("350", 400, Denomination::FiftyCents).expect("numeric input");
        assert_eq!(quote.refill, 50);
        assert_eq!(quote.new_total, 400.0);
    }

    #[test]
    fn small_shortfall_rounds_to_nothing() {
        let quote = quote("390", 400, Denomination::FiftyCents).expect("numeric input");
        assert_eq!(quote.refill, 0);
        assert_eq!(quote.new_total, 390.0);
        assert!(!quote.capacity_reached);
    }

    #[test]
    fn overfull_machine_needs_no_refill() {
        let quote = quote("500", 400, Denomination::FiftyCents).expect("numeric input");
        assert_eq!(quote.refill, 0);
        assert_eq!(quote.new_total, 500.0);
        assert!(quote.capacity_reached);
    }

    #[test]
    fn empty_input_propagates() {
        assert_eq!(compute_refill("", 500, Denomination::TwentyCents), None);
        assert_eq!(compute_refill("   ", 500, Denomination::TwentyCents), None);
        assert_eq!(quote("", 500, Denomination::TwentyCents), None);
    }

    #[test]
    fn k12_ten_cents_partial_stock() {
        let quote = quote("120", 1000, Denomination::TenCents).expect("numeric input");
        assert_eq!(quote.refill, 800);
        assert_eq!(quote.new_total, 920.0);
    }

    #[test]
    fn midpoint_rounds_up_then_falls_back() {
        // 150 / 100 = 1.5 rounds half-up to 200, which overshoots.
        assert_eq!(compute_refill("0", 150, Denomination::TenCents), Some(100));
        // 25 / 50 = 0.5 rounds half-up to 50, which overshoots.
        assert_eq!(compute_refill("375", 400, Denomination::FiftyCents), Some(0));
        // 275 / 50 = 5.5 -> 300 overshoots, fall back to 250.
        assert_eq!(compute_refill("105", 380, Denomination::TwoEuro), Some(250));
    }

    #[test]
    fn rounds_down_when_nearest_roll_is_below_shortfall() {
        // 340 / 100 = 3.4 rounds to 300 directly.
        assert_eq!(compute_refill("160", 500, Denomination::TwentyCents), Some(300));
    }

    #[test]
    fn unparseable_input_counts_as_zero() {
        assert_eq!(compute_refill("abc", 400, Denomination::FiftyCents), Some(400));
        assert_eq!(compute_refill("1.2.3", 770, Denomination::TenCents), Some(700));
        assert_eq!(compute_refill("NaN", 600, Denomination::TwoEuro), Some(600));
        assert_eq!(compute_refill("-20", 500, Denomination::TwentyCents), Some(500));
        assert_eq!(parse_current("inf"), Some(0.0));
    }

    #[test]
    fn fractional_counts_are_accepted() {
        let quote = quote("349.5", 400, Denomination::FiftyCents).expect("numeric input");
        assert_eq!(quote.refill, 50);
        assert_eq!(quote.new_total, 399.5);
    }

    #[test]
    fn full_machine_needs_nothing() {
        for denomination in ALL {
            for capacity in [380, 400, 500, 600, 770, 1000] {
                assert_eq!(
                    compute_refill(&capacity.to_string(), capacity, denomination),
                    Some(0)
                );
            }
        }
    }

    #[test]
    fn sampled_inputs_never_exceed_capacity() {
        let mut rng = rand::thread_rng();
        for _ in 0..5_000 {
            let denomination = ALL[rng.gen_range(0..ALL.len())];
            let capacity: u32 = rng.gen_range(1..=2_000);
            let current: u32 = rng.gen_range(0..=capacity);
            let step = denomination.rounding_step();

            let refill = compute_refill(&current.to_string(), capacity, denomination)
                .expect("numeric input");
            assert!(current + refill <= capacity, "{current} + {refill} > {capacity}");
            assert_eq!(refill % step, 0, "{refill} not a multiple of {step}");
            assert!(capacity - current - refill < step);
        }
    }
}
