use std::f64::consts::PI;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParameters {
    pub amplitude: f64,
    pub wavenumber: f64,
    pub angular_frequency: f64,
    pub phase: f64,
}

impl WaveParameters {
    pub const fn new(amplitude: f64, wavenumber: f64, angular_frequency: f64, phase: f64) -> Self {
        Self {
            amplitude,
            wavenumber,
            angular_frequency,
            phase,
        }
    }
}

impl Default for WaveParameters {
    fn default() -> Self {
        Self::new(2.0, PI, 5.0, 0.5)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WavePair {
    pub first: WaveParameters,
    pub second: WaveParameters,
}

impl Default for WavePair {
    fn default() -> Self {
        Self {
            first: WaveParameters::default(),
            second: WaveParameters::new(1.5, 1.5 * PI, 4.0, PI),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    pub sample_count: usize,
    pub domain_end: f64,
    pub time_step: f64,
    pub frame_interval: Duration,
    pub particle_x: f64,
    pub trace_window: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            sample_count: 500,
            domain_end: 4.0 * PI,
            time_step: 0.1,
            frame_interval: Duration::from_millis(30),
            particle_x: 2.0 * PI,
            trace_window: 5.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioParams {
    pub sample_rate: u32,
    pub block_size: u32,
    pub channels: u16,
}

impl Default for AudioParams {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            block_size: 1024,
            channels: 1,
        }
    }
}
