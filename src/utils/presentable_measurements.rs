//! Resting place for [PresentableMeasurement] & [MetricUnit]

use std::fmt::Display;


/// The unit of the quantity returned by a `metric` callback -- used for presentation purposes only
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MetricUnit {
    /// elapsed time, as returned by the time analysis metric
    Nanoseconds,
    /// heap usage, as returned by the space analysis metric
    Bytes,
    /// anything else -- the given suffix will follow the (unscaled) value
    Custom(&'static str),
}
impl MetricUnit {
    /// Wraps `value` so it is shown with the most fitting scale for this unit
    pub fn present(&self, value: f64) -> PresentableMeasurement {
        match self {
            Self::Nanoseconds         => nanoseconds_measurement(value),
            Self::Bytes               => bytes_measurement(value),
            Self::Custom(custom_unit) => custom_unit_measurement(value, custom_unit),
        }
    }
}

/// Holds and present custom unit measurements with auto-scaling.\
/// Costs may be negative (clock skew or memory being freed), so the scale is chosen by the magnitude.
pub struct PresentableMeasurement {
    pub(crate) value: f64,
    /// := (threshold, scale, unit, format)
    auto_scale: &'static [(f64, f64, &'static str, &'static str)],
    /// follows the auto-scaled unit
    unit_suffix: &'static str,
}

impl Display for PresentableMeasurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (scaled_value, unit, format) = self.auto_scale.iter()
            .find(|&&(threshold, _, _, _)| self.value.abs() >= threshold)
            .map_or(
                (self.value, "", ":.2"),
                |&(_threshold, scale, unit, format)| (self.value / scale, unit, format));
        let suffix = self.unit_suffix;
        match format {
            ":.0"  => write!(f, "{:.0}{unit}{suffix}",  scaled_value),
            ":.2"  => write!(f, "{:.2}{unit}{suffix}",  scaled_value),
            ":.3"  => write!(f, "{:.3}{unit}{suffix}",  scaled_value),
            ":.3e" => write!(f, "{:.3e}{unit}{suffix}", scaled_value),
            _ => write!(f, "{}{unit}{suffix}", scaled_value),
        }
    }
}

/// Builds a [PresentableMeasurement] able to display & auto-scale
/// quantities representing "a number of nanoseconds".
pub fn nanoseconds_measurement(value: f64) -> PresentableMeasurement {
    const AUTO_SCALE_DATA: &[(f64, f64, &str, &str)] = &[
        (1e9, 1e9, "s",  ":.2"),
        (1e6, 1e6, "ms", ":.2"),
        (1e3, 1e3, "µs", ":.2"),
        (0.0, 1.0, "ns", ":.0"),
    ];
    PresentableMeasurement {
        value,
        auto_scale:  AUTO_SCALE_DATA,
        unit_suffix: "",
    }
}

/// Builds a [PresentableMeasurement] able to display & auto-scale
/// quantities representing "a number of bytes".
pub fn bytes_measurement(value: f64) -> PresentableMeasurement {
    const AUTO_SCALE_DATA: &[(f64, f64, &str, &str)] = &[
        (1024.0*1024.0*1024.0*1024.0, 1024.0*1024.0*1024.0*1024.0, "TiB", ":.2"),
        (1024.0*1024.0*1024.0,        1024.0*1024.0*1024.0,        "GiB", ":.2"),
        (1024.0*1024.0,               1024.0*1024.0,               "MiB", ":.2"),
        (1024.0,                      1024.0,                      "KiB", ":.2"),
        (0.0,                         1.0,                         "b",   ":.0"),
    ];
    PresentableMeasurement {
        value,
        auto_scale:  AUTO_SCALE_DATA,
        unit_suffix: "",
    }
}

/// Builds a [PresentableMeasurement] able to display & auto-scale
/// quantities representing "a quantity of `custom_unit`".
pub fn custom_unit_measurement(value: f64, custom_unit: &'static str) -> PresentableMeasurement {
    const AUTO_SCALE_DATA: &[(f64, f64, &str, &str)] = &[
        (100_000.0, 1.0, "", ":.3e"),
        (      1.0, 1.0, "", ":.2"),
        (      0.0, 1.0, "", ":.3"),
    ];
    PresentableMeasurement {
        value,
        auto_scale:  AUTO_SCALE_DATA,
        unit_suffix: custom_unit,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nanoseconds_measurement() {
        let expected_representations = [
            (            0.0, "0ns"    ),
            (          999.0, "999ns"  ),
            (         1500.0, "1.50µs" ),
            (        -1500.0, "-1.50µs"),
            (      2_500_000.0, "2.50ms" ),
            (  3_200_000_000.0, "3.20s"  ),
        ];
        let measurement_fn = nanoseconds_measurement;
        for (value, expected_representation) in expected_representations {
            let observed_representation = measurement_fn(value).to_string();
            assert_eq!(&observed_representation, expected_representation, "Measurement representation doesn't match");
        }
    }

    #[test]
    fn test_bytes_measurement() {
        let expected_representations = [
            (                                 0.0, "0b"       ),
            (                              1023.0, "1023b"    ),
            (                              1536.0, "1.50KiB"  ),
            (                             -2048.0, "-2.00KiB" ),
            (                1024.0*1024.0*3.0, "3.00MiB"  ),
            (        1024.0*1024.0*1024.0*10.15, "10.15GiB" ),
            ( 1024.0*1024.0*1024.0*1024.0*10.15, "10.15TiB" ),
        ];
        let measurement_fn = bytes_measurement;
        for (value, expected_representation) in expected_representations {
            let observed_representation = measurement_fn(value).to_string();
            assert_eq!(&observed_representation, expected_representation, "Measurement representation doesn't match");
        }
    }

    #[test]
    fn test_custom_unit_measurement() {
        let expected_representations = [
            (             0.0, "0.000req"   ),
            (            0.25, "0.250req"   ),
            (           10.15, "10.15req"   ),
            (         10393.6, "10393.60req"),
            (      10643046.4, "1.064e7req" ),
            (   10898479513.6, "1.090e10req"),
        ];
        let measurement_fn = |val| custom_unit_measurement(val, "req");
        for (value, expected_representation) in expected_representations {
            let observed_representation = measurement_fn(value).to_string();
            assert_eq!(&observed_representation, expected_representation, "Measurement representation doesn't match");
        }
    }

    #[test]
    fn units_dispatch_to_their_measurements() {
        assert_eq!(MetricUnit::Nanoseconds.present(2_000.0).to_string(), "2.00µs");
        assert_eq!(MetricUnit::Bytes.present(2048.0).to_string(), "2.00KiB");
        assert_eq!(MetricUnit::Custom("ops").present(3.0).to_string(), "3.00ops");
    }
}
