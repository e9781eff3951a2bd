use std::str::FromStr;

use bigdec::{BigDecimal, Error, MathContext, RoundingMode};

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

/// Each input rounded to an integer under every mode, in the order
/// Up, Down, Ceiling, Floor, HalfUp, HalfDown, HalfEven.
const TABLE: [(&str, [&str; 7]); 10] = [
    ("5.5", ["6", "5", "6", "5", "6", "5", "6"]),
    ("2.5", ["3", "2", "3", "2", "3", "2", "2"]),
    ("1.6", ["2", "1", "2", "1", "2", "2", "2"]),
    ("1.1", ["2", "1", "2", "1", "1", "1", "1"]),
    ("1.0", ["1", "1", "1", "1", "1", "1", "1"]),
    ("-1.0", ["-1", "-1", "-1", "-1", "-1", "-1", "-1"]),
    ("-1.1", ["-2", "-1", "-1", "-2", "-1", "-1", "-1"]),
    ("-1.6", ["-2", "-1", "-1", "-2", "-2", "-2", "-2"]),
    ("-2.5", ["-3", "-2", "-2", "-3", "-3", "-2", "-2"]),
    ("-5.5", ["-6", "-5", "-5", "-6", "-6", "-5", "-6"]),
];

#[test]
fn set_scale_matches_rounding_table() {
    for (input, expected) in TABLE {
        for (mode, want) in RoundingMode::ALL.into_iter().zip(expected) {
            let got = dec(input).set_scale(0, mode).unwrap();
            assert_eq!(got.to_string(), want, "{input} {mode}");
        }
    }
}

#[test]
fn round_matches_rounding_table() {
    for (input, expected) in TABLE {
        for (mode, want) in RoundingMode::ALL.into_iter().zip(expected) {
            let mc = MathContext::with_rounding(1, mode);
            let got = dec(input).round(&mc).unwrap();
            assert_eq!(got.compare_to(&dec(want)), std::cmp::Ordering::Equal, "{input} {mode}");
        }
    }
}

#[test]
fn unnecessary_only_accepts_exact_values() {
    for (input, _) in TABLE {
        let result = dec(input).set_scale(0, RoundingMode::Unnecessary);
        if input.ends_with(".0") {
            assert!(result.is_ok(), "{input}");
        } else {
            assert_eq!(result, Err(Error::RoundingRequired { op: "set_scale" }), "{input}");
        }
    }
}

#[test]
fn ties_far_below_the_kept_digit() {
    let mode = RoundingMode::HalfEven;
    assert_eq!(dec("0.125").set_scale(2, mode).unwrap(), dec("0.12"));
    assert_eq!(dec("0.1250000001").set_scale(2, mode).unwrap(), dec("0.13"));
    assert_eq!(dec("0.135").set_scale(2, mode).unwrap(), dec("0.14"));
    assert_eq!(dec("-0.125").set_scale(2, RoundingMode::HalfDown).unwrap(), dec("-0.12"));
}

#[test]
fn carry_adds_a_digit() {
    let mc = MathContext::with_rounding(3, RoundingMode::HalfUp);
    assert_eq!(dec("9.995").round(&mc).unwrap().to_string(), "10.0");
    assert_eq!(dec("-99.95").round(&mc).unwrap().to_string(), "-100");
    assert_eq!(dec("999.5").round(&mc).unwrap().to_string(), "1.00E+3");
}

#[test]
fn presets_round_like_ieee_decimals() {
    let third = dec("1").divide(&dec("3"), &MathContext::DECIMAL32).unwrap();
    assert_eq!(third.to_string(), "0.3333333");
    let third = dec("1").divide(&dec("3"), &MathContext::DECIMAL64).unwrap();
    assert_eq!(third.precision(), 16);
    let two_thirds = dec("2").divide(&dec("3"), &MathContext::DECIMAL128).unwrap();
    assert_eq!(two_thirds.to_string(), "0.6666666666666666666666666666666667");
}

#[test]
fn mode_names_parse() {
    for mode in RoundingMode::ALL {
        assert_eq!(RoundingMode::from_str(mode.as_str()).unwrap(), mode);
    }
    let mc: MathContext = "precision=7 roundingMode=HALF_EVEN".parse().unwrap();
    assert_eq!(mc, MathContext::DECIMAL32);
}
