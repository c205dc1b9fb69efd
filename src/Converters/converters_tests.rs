#[cfg(test)]
mod tests {
    use crate::Converters::concentration::{ConcentrationUnit, convert_concentration};
    use crate::Converters::pressure::{PressureUnit, convert_pressure};
    use crate::Converters::temperature::{TemperatureUnit, convert_temperature};
    use crate::Converters::unit_converter::{
        AnyConverter, ConversionError, INVALID_INPUT_DISPLAY, UnitConverter, parse_input,
    };
    use approx::assert_relative_eq;

    #[test]
    fn test_temperature_fixed_points() {
        use TemperatureUnit::*;
        assert_relative_eq!(convert_temperature(0.0, Celsius, Fahrenheit), 32.0);
        assert_relative_eq!(convert_temperature(32.0, Fahrenheit, Kelvin), 273.15, epsilon = 1e-9);
        assert_relative_eq!(convert_temperature(100.0, Celsius, Fahrenheit), 212.0);
        assert_relative_eq!(convert_temperature(212.0, Fahrenheit, Kelvin), 373.15, epsilon = 1e-9);
        assert_relative_eq!(convert_temperature(0.0, Celsius, Rankine), 491.67, epsilon = 1e-9);
        assert_relative_eq!(convert_temperature(80.0, Reaumur, Celsius), 100.0);
        assert_relative_eq!(convert_temperature(-40.0, Celsius, Fahrenheit), -40.0);
    }

    #[test]
    fn test_temperature_round_trip_all_pairs() {
        let values = [-273.15, -40.0, 0.0, 25.0, 36.6, 1000.0];
        for from in TemperatureUnit::ALL {
            for to in TemperatureUnit::ALL {
                for v in values {
                    let there = convert_temperature(v, from, to);
                    let back = convert_temperature(there, to, from);
                    assert_relative_eq!(back, v, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_pressure() {
        use PressureUnit::*;
        assert_eq!(convert_pressure(1.0, Atmosphere, Pascal), 101325.0);
        let pa = convert_pressure(1.0, Atmosphere, Pascal);
        assert_relative_eq!(convert_pressure(pa, Pascal, Atmosphere), 1.0, epsilon = 1e-12);
        assert_relative_eq!(convert_pressure(1.0, Bar, Kilopascal), 100.0);
        assert_relative_eq!(convert_pressure(760.0, Torr, Atmosphere), 1.0, epsilon = 1e-4);
        assert_relative_eq!(convert_pressure(14.6959, Psi, Atmosphere), 1.0, epsilon = 1e-4);
        assert_relative_eq!(convert_pressure(1.0, Megapascal, Millibar), 10_000.0);
    }

    #[test]
    fn test_concentration() {
        use ConcentrationUnit::*;
        assert_relative_eq!(convert_concentration(1.0, Molar, Millimolar), 1000.0);
        assert_relative_eq!(convert_concentration(1.0, Molar, Micromolar), 1e6, max_relative = 1e-12);
        assert_relative_eq!(convert_concentration(1.0, Molar, Nanomolar), 1e9, max_relative = 1e-12);
        assert_relative_eq!(convert_concentration(500.0, Micromolar, Millimolar), 0.5, max_relative = 1e-12);
    }

    #[test]
    fn test_invalid_input_is_not_zero() {
        assert_eq!(parse_input("0"), Ok(0.0));
        assert_eq!(parse_input("  2.5 "), Ok(2.5));
        assert!(matches!(parse_input(""), Err(ConversionError::InvalidInput(_))));
        assert!(matches!(parse_input("abc"), Err(ConversionError::InvalidInput(_))));
        assert!(matches!(parse_input("NaN"), Err(ConversionError::InvalidInput(_))));
        assert!(matches!(parse_input("inf"), Err(ConversionError::InvalidInput(_))));

        let conv = AnyConverter::from_quantity("concentration").unwrap();
        assert_eq!(conv.convert_display("x1", "M", "mM"), INVALID_INPUT_DISPLAY);
        assert_eq!(conv.convert_display("0", "M", "mM"), "0");
    }

    #[test]
    fn test_unit_symbol_parsing() {
        assert_eq!("°C".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Celsius));
        assert_eq!("kelvin".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Kelvin));
        assert_eq!("°Ré".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Reaumur));
        assert_eq!("MPa".parse::<PressureUnit>(), Ok(PressureUnit::Megapascal));
        assert_eq!("KPA".parse::<PressureUnit>(), Ok(PressureUnit::Kilopascal));
        assert_eq!("µM".parse::<ConcentrationUnit>(), Ok(ConcentrationUnit::Micromolar));
        assert!(matches!(
            "furlong".parse::<PressureUnit>(),
            Err(ConversionError::UnknownUnit(_))
        ));
    }

    #[test]
    fn test_any_converter_dispatch() {
        let temp = AnyConverter::from_quantity("Temperature").unwrap();
        assert_eq!(temp.quantity_name(), "temperature");
        assert_eq!(temp.convert_display("100", "C", "F"), "212.00");
        assert_eq!(temp.convert_display("0", "C", "K"), "273.15");

        let pressure = AnyConverter::from_quantity("p").unwrap();
        assert_eq!(pressure.convert_display("1", "bar", "Pa"), "1.0000e5");
        assert_eq!(
            pressure.convert_display("1", "bar", "furlong"),
            ConversionError::UnknownUnit("furlong".to_string()).to_string()
        );

        let all = AnyConverter::from_quantity("c")
            .unwrap()
            .convert_all(1.0, "M")
            .unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0], ("M", 1.0));
        assert_relative_eq!(all[1].1, 1000.0);

        assert!(AnyConverter::from_quantity("volume").is_err());
        assert_eq!(AnyConverter::all().len(), 3);
    }
}
