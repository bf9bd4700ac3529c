use super::PanelProxy;
use qpanel_types::{Context, ExitStatus};
use thiserror::Error;

/// Tool description for the help listing
pub fn description() -> &'static str {
    "Convert a value between length, weight and temperature units"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Length,
    Weight,
    Temperature,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    #[error("cannot convert {0} to {1}: different categories")]
    CategoryMismatch(String, String),
}

// Scalar conversion goes through a reference unit per category:
// meters for length, kilograms for weight. Temperature is piecewise
// through Celsius.
const LENGTH_TO_METERS: &[(&str, f64)] = &[
    ("m", 1.0),
    ("km", 1000.0),
    ("cm", 0.01),
    ("mm", 0.001),
    ("in", 0.0254),
    ("ft", 0.3048),
];

const WEIGHT_TO_KG: &[(&str, f64)] = &[
    ("kg", 1.0),
    ("g", 0.001),
    ("lb", 0.45359237),
    ("oz", 0.028349523125),
];

fn scalar_factor(unit: &str) -> Option<(Category, f64)> {
    for (name, factor) in LENGTH_TO_METERS {
        if *name == unit {
            return Some((Category::Length, *factor));
        }
    }
    for (name, factor) in WEIGHT_TO_KG {
        if *name == unit {
            return Some((Category::Weight, *factor));
        }
    }
    None
}

/// The category a unit name belongs to. Temperature units are accepted
/// in either case; scalar units are lowercase only.
pub fn category_of(unit: &str) -> Option<Category> {
    if matches!(unit, "C" | "F" | "K" | "c" | "f" | "k") {
        return Some(Category::Temperature);
    }
    scalar_factor(unit).map(|(category, _)| category)
}

fn to_celsius(value: f64, from: &str) -> f64 {
    match from.to_ascii_uppercase().as_str() {
        "F" => (value - 32.0) * 5.0 / 9.0,
        "K" => value - 273.15,
        _ => value,
    }
}

fn from_celsius(celsius: f64, to: &str) -> f64 {
    match to.to_ascii_uppercase().as_str() {
        "F" => celsius * 9.0 / 5.0 + 32.0,
        "K" => celsius + 273.15,
        _ => celsius,
    }
}

/// Convert `value` from one unit to another within a single category
pub fn convert(value: f64, from: &str, to: &str) -> Result<f64, ConvertError> {
    let from_category =
        category_of(from).ok_or_else(|| ConvertError::UnknownUnit(from.to_string()))?;
    let to_category = category_of(to).ok_or_else(|| ConvertError::UnknownUnit(to.to_string()))?;
    if from_category != to_category {
        return Err(ConvertError::CategoryMismatch(
            from.to_string(),
            to.to_string(),
        ));
    }
    if from_category == Category::Temperature {
        return Ok(from_celsius(to_celsius(value, from), to));
    }
    let (_, from_factor) =
        scalar_factor(from).ok_or_else(|| ConvertError::UnknownUnit(from.to_string()))?;
    let (_, to_factor) =
        scalar_factor(to).ok_or_else(|| ConvertError::UnknownUnit(to.to_string()))?;
    Ok(value * from_factor / to_factor)
}

/// Round to the given number of significant digits for display
pub fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(digits - 1 - magnitude);
    (value * factor).round() / factor
}

/// Tool entry point
///
/// Usage:
///   convert <value> <from> <to>
pub fn command(ctx: &Context, argv: Vec<String>, _proxy: &mut dyn PanelProxy) -> ExitStatus {
    if argv.len() != 4 {
        ctx.write_stderr("Usage: convert <value> <from> <to>").ok();
        ctx.write_stderr("       e.g. convert 10 m ft").ok();
        return ExitStatus::ExitedWith(1);
    }
    let value: f64 = match argv[1].parse() {
        Ok(value) => value,
        Err(_) => {
            ctx.write_stderr(&format!("convert: not a number: {}", argv[1]))
                .ok();
            return ExitStatus::ExitedWith(1);
        }
    };
    match convert(value, &argv[2], &argv[3]) {
        Ok(out) => {
            let rounded = round_significant(out, 12);
            match ctx.write_stdout(&format!("{} {} = {} {}", value, argv[2], rounded, argv[3])) {
                Ok(_) => ExitStatus::ExitedWith(0),
                Err(err) => {
                    ctx.write_stderr(&format!("convert: {err}")).ok();
                    ExitStatus::ExitedWith(1)
                }
            }
        }
        Err(err) => {
            ctx.write_stderr(&format!("convert: {err}")).ok();
            ExitStatus::ExitedWith(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_length_conversions() {
        assert!(close(convert(1.0, "km", "m").unwrap(), 1000.0));
        assert!(close(convert(10.0, "m", "ft").unwrap(), 32.80839895013123));
        assert!(close(convert(12.0, "in", "cm").unwrap(), 30.48));
        assert!(close(convert(2500.0, "mm", "m").unwrap(), 2.5));
    }

    #[test]
    fn test_weight_conversions() {
        assert!(close(convert(1.0, "kg", "g").unwrap(), 1000.0));
        assert!(close(convert(1.0, "lb", "kg").unwrap(), 0.45359237));
        assert!(close(convert(16.0, "oz", "lb").unwrap(), 1.0));
    }

    #[test]
    fn test_temperature_conversions() {
        assert!(close(convert(0.0, "C", "F").unwrap(), 32.0));
        assert!(close(convert(100.0, "C", "F").unwrap(), 212.0));
        assert!(close(convert(0.0, "C", "K").unwrap(), 273.15));
        assert!(close(convert(300.0, "K", "C").unwrap(), 26.85));
        assert!(close(convert(-40.0, "F", "C").unwrap(), -40.0));
        // lowercase accepted for temperature
        assert!(close(convert(0.0, "c", "k").unwrap(), 273.15));
    }

    #[test]
    fn test_same_unit_is_identity() {
        assert!(close(convert(42.5, "m", "m").unwrap(), 42.5));
        assert!(close(convert(-12.0, "F", "F").unwrap(), -12.0));
    }

    #[test]
    fn test_unknown_unit() {
        assert_eq!(
            convert(1.0, "furlong", "m"),
            Err(ConvertError::UnknownUnit("furlong".to_string()))
        );
        assert_eq!(
            convert(1.0, "m", "yd"),
            Err(ConvertError::UnknownUnit("yd".to_string()))
        );
    }

    #[test]
    fn test_category_mismatch() {
        assert_eq!(
            convert(1.0, "m", "kg"),
            Err(ConvertError::CategoryMismatch(
                "m".to_string(),
                "kg".to_string()
            ))
        );
        assert_eq!(
            convert(1.0, "C", "ft"),
            Err(ConvertError::CategoryMismatch(
                "C".to_string(),
                "ft".to_string()
            ))
        );
    }

    #[test]
    fn test_round_significant() {
        assert!(close(round_significant(32.80839895013123, 12), 32.8083989501));
        assert!(close(round_significant(0.1 + 0.2, 12), 0.3));
        assert_eq!(round_significant(0.0, 12), 0.0);
        assert!(round_significant(f64::INFINITY, 12).is_infinite());
    }
}
