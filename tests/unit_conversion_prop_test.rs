//! Property tests for the unit conversion tables.

use calc_tech::calculators::conversion::{convert_value, find_unit, Category};
use proptest::prelude::*;

fn tolerance(x: f64) -> f64 {
    1e-9 * x.abs().max(1.0)
}

proptest! {
    /// Every unit's scale is invertible: from_base(to_base(x)) == x.
    #[test]
    fn base_round_trip(x in -1e9f64..1e9) {
        for category in Category::ALL {
            for unit in category.units() {
                let back = unit.scale.from_base(unit.scale.to_base(x));
                prop_assert!((back - x).abs() <= tolerance(x),
                    "{} round trip: {} -> {}", unit.symbol, x, back);
            }
        }
    }

    /// Converting there and back between any pair in a category is lossless.
    #[test]
    fn pairwise_round_trip(x in -1e6f64..1e6, category_index in 0usize..10) {
        let category = Category::ALL[category_index];
        let units = category.units();
        for from in units {
            for to in units {
                let there = convert_value(x, from, to);
                let back = convert_value(there, to, from);
                prop_assert!((back - x).abs() <= tolerance(x) * 10.0,
                    "{} -> {} -> {}: {} became {}", from.symbol, to.symbol, from.symbol, x, back);
            }
        }
    }
}

#[test]
fn test_reference_conversions() {
    let (_, km) = find_unit("km").unwrap();
    let (_, mi) = find_unit("mi").unwrap();
    assert!((convert_value(1.0, mi, km) - 1.609_344).abs() < 1e-12);

    let (_, c) = find_unit("C").unwrap();
    let (_, f) = find_unit("F").unwrap();
    assert!((convert_value(100.0, c, f) - 212.0).abs() < 1e-9);
    assert!((convert_value(-40.0, f, c) + 40.0).abs() < 1e-9);
}
