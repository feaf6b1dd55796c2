use crate::types::{SimulationParams, WaveParameters};

/// Evenly spaced x-coordinates, first and last point included.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleGrid {
    xs: Vec<f64>,
}

impl SampleGrid {
    pub fn new(start: f64, end: f64, count: usize) -> Self {
        let xs = match count {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (end - start) / (count - 1) as f64;
                (0..count).map(|i| start + step * i as f64).collect()
            }
        };
        Self { xs }
    }

    pub fn from_params(params: &SimulationParams) -> Self {
        Self::new(0.0, params.domain_end, params.sample_count)
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

impl Default for SampleGrid {
    fn default() -> Self {
        Self::from_params(&SimulationParams::default())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SuperpositionField {
    pub first: Vec<f64>,
    pub second: Vec<f64>,
    pub sum: Vec<f64>,
}

impl SuperpositionField {
    fn from_components(first: Vec<f64>, second: Vec<f64>) -> Self {
        let sum = first.iter().zip(&second).map(|(a, b)| a + b).collect();
        Self { first, second, sum }
    }
}

#[inline]
pub fn displacement(params: &WaveParameters, t: f64, x: f64) -> f64 {
    params.amplitude * (params.wavenumber * x - params.angular_frequency * t + params.phase).sin()
}

pub fn simple(params: &WaveParameters, t: f64, xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|&x| displacement(params, t, x)).collect()
}

pub fn superposition(
    first: &WaveParameters,
    second: &WaveParameters,
    t: f64,
    xs: &[f64],
) -> SuperpositionField {
    SuperpositionField::from_components(simple(first, t, xs), simple(second, t, xs))
}

pub fn forced_destructive(params: &WaveParameters, t: f64, xs: &[f64]) -> SuperpositionField {
    let first = simple(params, t, xs);
    let second = first.iter().map(|y| -y).collect();
    SuperpositionField::from_components(first, second)
}

pub fn standing(params: &WaveParameters, t: f64, xs: &[f64]) -> Vec<f64> {
    let temporal = (params.angular_frequency * t).sin();
    xs.iter()
        .map(|&x| 2.0 * params.amplitude * (params.wavenumber * x).cos() * temporal)
        .collect()
}

pub fn particle_displacement(params: &WaveParameters, t: f64, x_fixed: f64) -> f64 {
    2.0 * params.amplitude * (params.wavenumber * x_fixed).cos() * (params.angular_frequency * t).sin()
}
