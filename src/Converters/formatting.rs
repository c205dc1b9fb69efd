/// lower bound of the fixed-point range for concentrations
const FIXED_MIN: f64 = 0.01;
/// upper bound of the fixed-point range for concentrations
const FIXED_MAX: f64 = 10_000.0;

/// two fractional digits, e.g. "212.00"
pub fn format_temperature(value: f64) -> String {
    format!("{:.2}", value)
}

/// scientific with four fractional digits, e.g. "2.5000e5"
pub fn format_pressure(value: f64) -> String {
    format!("{:.4e}", value)
}

/// Scientific notation outside [0.01, 10000] by magnitude, fixed point with at most
/// six fractional digits inside it. Zero is printed as "0".
pub fn format_concentration(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(FIXED_MIN..=FIXED_MAX).contains(&magnitude) {
        format!("{:.4e}", value)
    } else {
        trim_fraction(&format!("{:.6}", value))
    }
}

fn trim_fraction(fixed: &str) -> String {
    if !fixed.contains('.') {
        return fixed.to_string();
    }
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_concentration() {
        assert_eq!(format_concentration(12.5), "12.5");
        assert_eq!(format_concentration(1000.0), "1000");
        assert_eq!(format_concentration(0.0), "0");
        assert_eq!(format_concentration(0.05), "0.05");
        assert_eq!(format_concentration(0.001), "1.0000e-3");
        assert_eq!(format_concentration(1e9), "1.0000e9");
        assert_eq!(format_concentration(0.123456789), "0.123457");
    }

    #[test]
    fn test_format_temperature_and_pressure() {
        assert_eq!(format_temperature(212.0), "212.00");
        assert_eq!(format_temperature(-40.0), "-40.00");
        assert_eq!(format_pressure(250000.0), "2.5000e5");
        assert_eq!(format_pressure(1.0), "1.0000e0");
    }
}
