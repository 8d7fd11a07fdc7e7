pub const HOURS_PER_DAY: u32 = 24;
pub const DAYS_PER_YEAR: u32 = 365;
pub const PENCE_PER_POUND: f64 = 100.;
pub const GRAMS_PER_TONNE: f64 = 1_000_000.;

/// Convert an amount in pence into pounds.
pub(crate) fn pence_to_pounds(pence: f64) -> f64 {
    pence / PENCE_PER_POUND
}

/// Convert an emission factor in gCO2/kWh into tCO2/kWh.
pub(crate) fn grams_to_tonnes(grams: f64) -> f64 {
    grams / GRAMS_PER_TONNE
}

/// Bring an azimuth in degrees into the range (-180, 180].
pub(crate) fn normalise_azimuth(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.);
    if wrapped > 180. {
        wrapped - 360.
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    fn should_convert_pence_to_pounds() {
        assert_eq!(pence_to_pounds(1234.), 12.34);
    }

    #[rstest]
    fn should_convert_grams_to_tonnes() {
        assert_eq!(grams_to_tonnes(300.), 0.0003);
    }

    #[rstest]
    #[case(0., 0.)]
    #[case(180., 180.)]
    #[case(-180., 180.)]
    #[case(270., -90.)]
    #[case(-225., 135.)]
    #[case(540., 180.)]
    #[case(-45., -45.)]
    fn should_normalise_azimuth(#[case] degrees: f64, #[case] expected: f64) {
        assert_eq!(normalise_azimuth(degrees), expected);
    }
}
