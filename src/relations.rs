use std::f64::consts::TAU;
use std::fmt;

use crate::error::{RelationError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveQuantity {
    Frequency,
    Wavelength,
    Speed,
    Wavenumber,
    AngularFrequency,
}

impl WaveQuantity {
    pub const ALL: [WaveQuantity; 5] = [
        WaveQuantity::Frequency,
        WaveQuantity::Wavelength,
        WaveQuantity::Speed,
        WaveQuantity::Wavenumber,
        WaveQuantity::AngularFrequency,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WaveQuantity::Frequency => "Frequency (f)",
            WaveQuantity::Wavelength => "Wavelength (λ)",
            WaveQuantity::Speed => "Speed (v)",
            WaveQuantity::Wavenumber => "Wavenumber (k)",
            WaveQuantity::AngularFrequency => "Angular frequency (ω)",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for WaveQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaveRelationInputs {
    values: [Option<f64>; 5],
}

impl WaveRelationInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, quantity: WaveQuantity, value: f64) -> Self {
        self.set(quantity, value);
        self
    }

    pub fn set(&mut self, quantity: WaveQuantity, value: f64) {
        self.values[quantity.index()] = Some(value);
    }

    pub fn get(&self, quantity: WaveQuantity) -> Option<f64> {
        self.values[quantity.index()]
    }

    pub fn from_fields<'a, I>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (WaveQuantity, &'a str)>,
    {
        let mut inputs = Self::default();
        for (quantity, text) in fields {
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            let value = text.parse::<f64>().map_err(|_| RelationError::InvalidNumber {
                quantity: quantity.label(),
                text: text.to_owned(),
            })?;
            inputs.set(quantity, value);
        }
        Ok(inputs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveRelations {
    values: [Option<f64>; 5],
}

impl WaveRelations {
    pub fn get(&self, quantity: WaveQuantity) -> Option<f64> {
        self.values[quantity.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (WaveQuantity, f64)> + '_ {
        WaveQuantity::ALL
            .into_iter()
            .filter_map(|q| self.get(q).map(|value| (q, value)))
    }
}

impl fmt::Display for WaveRelations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Result:")?;
        for (quantity, value) in self.iter() {
            write!(f, "\n{quantity}: {value:.3}")?;
        }
        Ok(())
    }
}

fn divide(
    numerator: f64,
    denominator: f64,
    target: WaveQuantity,
    divisor: WaveQuantity,
) -> Result<f64> {
    if denominator == 0.0 {
        return Err(RelationError::division_by_zero(target.label(), divisor.label()));
    }
    finite(numerator / denominator, target)
}

fn finite(value: f64, target: WaveQuantity) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RelationError::NonFinite {
            target: target.label(),
        })
    }
}

/// Derives what it can from `inputs`, in fixed precedence:
///
/// 1. `v = f·λ` when f and λ are known and v is not
/// 2. otherwise `λ = v/f` when v and f are known and λ is not
/// 3. otherwise `f = v/λ` when v and λ are known and f is not
/// 4. `k = 2π/λ` whenever λ is known
/// 5. `ω = 2π·f` whenever f is known
///
/// Steps 4 and 5 overwrite supplied k or ω. Any failing step fails the whole solve.
pub fn solve(inputs: &WaveRelationInputs) -> Result<WaveRelations> {
    use WaveQuantity::*;

    let mut f = inputs.get(Frequency);
    let mut lambda = inputs.get(Wavelength);
    let mut v = inputs.get(Speed);
    let mut k = inputs.get(Wavenumber);
    let mut omega = inputs.get(AngularFrequency);
    let mut derived = false;

    match (f, lambda, v) {
        (Some(f), Some(lambda), None) => {
            v = Some(finite(f * lambda, Speed)?);
            derived = true;
        }
        (Some(f), None, Some(v)) => {
            lambda = Some(divide(v, f, Wavelength, Frequency)?);
            derived = true;
        }
        (None, Some(lambda), Some(v)) => {
            f = Some(divide(v, lambda, Frequency, Wavelength)?);
            derived = true;
        }
        _ => {}
    }

    if let Some(lambda) = lambda {
        k = Some(divide(TAU, lambda, Wavenumber, Wavelength)?);
        derived = true;
    }
    if let Some(f) = f {
        omega = Some(finite(TAU * f, AngularFrequency)?);
        derived = true;
    }

    if !derived {
        return Err(RelationError::Insufficient);
    }

    Ok(WaveRelations {
        values: [f, lambda, v, k, omega],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use WaveQuantity::*;

    #[test]
    fn frequency_and_wavelength_give_everything() {
        let inputs = WaveRelationInputs::new().with(Frequency, 2.0).with(Wavelength, 3.0);
        let solved = solve(&inputs).unwrap();
        assert_relative_eq!(solved.get(Speed).unwrap(), 6.0);
        assert_relative_eq!(solved.get(Wavenumber).unwrap(), 2.094, epsilon = 1e-3);
        assert_relative_eq!(solved.get(AngularFrequency).unwrap(), 12.566, epsilon = 1e-3);
    }

    #[test]
    fn speed_and_frequency_give_wavelength() {
        let inputs = WaveRelationInputs::new().with(Speed, 340.0).with(Frequency, 170.0);
        let solved = solve(&inputs).unwrap();
        assert_relative_eq!(solved.get(Wavelength).unwrap(), 2.0);
        assert_relative_eq!(solved.get(Wavenumber).unwrap(), std::f64::consts::PI);
    }

    #[test]
    fn speed_and_zero_wavelength_is_an_error() {
        let inputs = WaveRelationInputs::new().with(Speed, 5.0).with(Wavelength, 0.0);
        let err = solve(&inputs).unwrap_err();
        assert!(matches!(err, RelationError::DivisionByZero { .. }));
    }

    #[test]
    fn zero_frequency_cannot_give_wavelength() {
        let inputs = WaveRelationInputs::new().with(Speed, 5.0).with(Frequency, 0.0);
        assert!(matches!(
            solve(&inputs),
            Err(RelationError::DivisionByZero { target: "Wavelength (λ)", .. })
        ));
    }

    #[test]
    fn supplied_speed_is_not_overwritten() {
        let inputs = WaveRelationInputs::new()
            .with(Frequency, 2.0)
            .with(Wavelength, 3.0)
            .with(Speed, 10.0);
        assert_eq!(solve(&inputs).unwrap().get(Speed), Some(10.0));
    }

    #[test]
    fn derived_wavenumber_replaces_supplied_one() {
        let inputs = WaveRelationInputs::new().with(Wavelength, 1.0).with(Wavenumber, 99.0);
        assert_relative_eq!(solve(&inputs).unwrap().get(Wavenumber).unwrap(), TAU);
    }

    #[test]
    fn underivable_quantities_stay_absent() {
        let solved = solve(&WaveRelationInputs::new().with(Frequency, 1.0)).unwrap();
        assert_eq!(solved.get(Speed), None);
        assert_eq!(solved.get(Wavelength), None);
        assert_eq!(solved.iter().count(), 2);
    }

    #[test]
    fn nothing_derivable_is_insufficient() {
        assert_eq!(solve(&WaveRelationInputs::new()), Err(RelationError::Insufficient));
        let only_k = WaveRelationInputs::new().with(Wavenumber, 1.0);
        assert_eq!(solve(&only_k), Err(RelationError::Insufficient));
    }

    #[test]
    fn from_fields_skips_blanks_and_rejects_garbage() {
        let inputs = WaveRelationInputs::from_fields([(Frequency, " 2 "), (Wavelength, "")]).unwrap();
        assert_eq!(inputs.get(Frequency), Some(2.0));
        assert_eq!(inputs.get(Wavelength), None);

        let err = WaveRelationInputs::from_fields([(Speed, "fast")]).unwrap_err();
        assert!(matches!(err, RelationError::InvalidNumber { .. }));
    }

    #[test]
    fn display_lists_known_quantities_in_order() {
        let inputs = WaveRelationInputs::new().with(Frequency, 2.0).with(Wavelength, 3.0);
        let text = solve(&inputs).unwrap().to_string();
        assert_eq!(
            text,
            "Result:\nFrequency (f): 2.000\nWavelength (λ): 3.000\nSpeed (v): 6.000\n\
             Wavenumber (k): 2.094\nAngular frequency (ω): 12.566"
        );
    }
}
