use std::f64::consts::PI;

use tracing::{debug, info};

use crate::error::ParameterParseError;
use crate::types::{SimulationParams, WavePair, WaveParameters};
use crate::wave_field::{self, SampleGrid, SuperpositionField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationMode {
    Simple,
    #[default]
    Superposition,
    Standing,
    ForcedDestructive,
}

impl std::fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationMode::Simple => write!(f, "Simple wave"),
            SimulationMode::Superposition => write!(f, "Superposition"),
            SimulationMode::Standing => write!(f, "Standing wave"),
            SimulationMode::ForcedDestructive => write!(f, "Total destructive interference"),
        }
    }
}

impl SimulationMode {
    pub fn all() -> &'static [SimulationMode] {
        &[
            SimulationMode::Simple,
            SimulationMode::Superposition,
            SimulationMode::Standing,
            SimulationMode::ForcedDestructive,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeCommand {
    Simple,
    Superposition,
    Standing,
    ForcedDestructive,
}

impl ModeCommand {
    pub fn mode(self) -> SimulationMode {
        match self {
            ModeCommand::Simple => SimulationMode::Simple,
            ModeCommand::Superposition => SimulationMode::Superposition,
            ModeCommand::Standing => SimulationMode::Standing,
            ModeCommand::ForcedDestructive => SimulationMode::ForcedDestructive,
        }
    }
}

impl From<SimulationMode> for ModeCommand {
    fn from(mode: SimulationMode) -> Self {
        match mode {
            SimulationMode::Simple => ModeCommand::Simple,
            SimulationMode::Superposition => ModeCommand::Superposition,
            SimulationMode::Standing => ModeCommand::Standing,
            SimulationMode::ForcedDestructive => ModeCommand::ForcedDestructive,
        }
    }
}

pub const FIELD_COUNT: usize = 8;

/// Labels of the parameter form, in field order. `k` and `k1` are entered in units of π.
pub const FIELD_LABELS: [&str; FIELD_COUNT] = ["E0", "k", "w", "phi", "E1", "k1", "w1", "phi1"];

const E0: usize = 0;
const K0: usize = 1;
const W0: usize = 2;
const PHI0: usize = 3;
const E1: usize = 4;
const K1: usize = 5;
const W1: usize = 6;
const PHI1: usize = 7;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterForm {
    fields: [String; FIELD_COUNT],
}

impl ParameterForm {
    pub fn from_waves(waves: &WavePair) -> Self {
        let WavePair { first, second } = waves;
        let fields = [
            first.amplitude,
            first.wavenumber / PI,
            first.angular_frequency,
            first.phase,
            second.amplitude,
            second.wavenumber / PI,
            second.angular_frequency,
            second.phase,
        ]
        .map(|value| value.to_string());
        Self { fields }
    }

    pub fn field(&self, index: usize) -> &str {
        &self.fields[index]
    }

    pub fn field_mut(&mut self, index: usize) -> &mut String {
        &mut self.fields[index]
    }

    pub fn set_field(&mut self, index: usize, text: impl Into<String>) {
        self.fields[index] = text.into();
    }

    /// Parses all eight fields; a single bad field rejects the whole form.
    pub fn parse(&self) -> Result<WavePair, ParameterParseError> {
        let value = |index: usize| -> Result<f64, ParameterParseError> {
            let text = &self.fields[index];
            text.trim().parse::<f64>().map_err(|_| ParameterParseError {
                field: FIELD_LABELS[index],
                text: text.clone(),
            })
        };

        Ok(WavePair {
            first: WaveParameters::new(value(E0)?, value(K0)? * PI, value(W0)?, value(PHI0)?),
            second: WaveParameters::new(value(E1)?, value(K1)? * PI, value(W1)?, value(PHI1)?),
        })
    }

    /// Copies wave 1's amplitude, wavenumber and frequency text into wave 2
    /// and sets wave 2's phase half a period ahead. Falls back to
    /// `held_phase` when the wave 1 phase field is not a number.
    pub fn mirror_inverted(&mut self, held_phase: f64) {
        self.fields[E1] = self.fields[E0].clone();
        self.fields[K1] = self.fields[K0].clone();
        self.fields[W1] = self.fields[W0].clone();
        let phase = self.fields[PHI0].trim().parse::<f64>().unwrap_or(held_phase);
        self.fields[PHI1] = (phase + PI).to_string();
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleTrace {
    points: Vec<[f64; 2]>,
}

impl ParticleTrace {
    pub fn push(&mut self, t: f64, y: f64) {
        self.points.push([t, y]);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    pub fn last(&self) -> Option<[f64; 2]> {
        self.points.last().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn recent(&self, span: f64) -> &[[f64; 2]] {
        let Some([newest, _]) = self.last() else {
            return &[];
        };
        let start = self.points.partition_point(|p| p[0] < newest - span);
        &self.points[start..]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FrameOutput {
    Simple(Vec<f64>),
    Superposition(SuperpositionField),
    Standing { field: Vec<f64>, particle: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub time: f64,
    pub mode: SimulationMode,
    pub output: FrameOutput,
}

pub struct SimulationController {
    params: SimulationParams,
    grid: SampleGrid,
    form: ParameterForm,
    waves: WavePair,
    mode: SimulationMode,
    time: f64,
    trace: ParticleTrace,
}

impl SimulationController {
    pub fn new(params: SimulationParams, waves: WavePair) -> Self {
        Self {
            grid: SampleGrid::from_params(&params),
            form: ParameterForm::from_waves(&waves),
            params,
            waves,
            mode: SimulationMode::default(),
            time: 0.0,
            trace: ParticleTrace::default(),
        }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    pub fn mode(&self) -> SimulationMode {
        self.mode
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn waves(&self) -> &WavePair {
        &self.waves
    }

    pub fn trace(&self) -> &ParticleTrace {
        &self.trace
    }

    pub fn form(&self) -> &ParameterForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ParameterForm {
        &mut self.form
    }

    pub fn on_command(&mut self, command: ModeCommand) {
        self.set_mode(command.mode());
    }

    /// Switches mode, restarting the clock and the particle trace.
    ///
    /// Entering [`SimulationMode::ForcedDestructive`] first rewrites the wave 2
    /// fields as the inverted copy of wave 1.
    pub fn set_mode(&mut self, mode: SimulationMode) {
        self.refresh_parameters();
        if mode == SimulationMode::ForcedDestructive {
            self.form.mirror_inverted(self.waves.first.phase);
            self.refresh_parameters();
        }

        info!(from = %self.mode, to = %mode, "simulation mode changed");
        self.mode = mode;
        self.time = 0.0;
        self.trace.clear();
    }

    pub fn refresh_parameters(&mut self) -> bool {
        match self.form.parse() {
            Ok(waves) => {
                self.waves = waves;
                true
            }
            Err(err) => {
                debug!("keeping previous wave parameters: {err}");
                false
            }
        }
    }

    pub fn tick(&mut self) -> Frame {
        self.tick_by(self.params.time_step)
    }

    pub fn tick_by(&mut self, dt: f64) -> Frame {
        self.refresh_parameters();

        let t = self.time;
        let xs = self.grid.xs();
        let WavePair { first, second } = &self.waves;

        let output = match self.mode {
            SimulationMode::Simple => FrameOutput::Simple(wave_field::simple(first, t, xs)),
            SimulationMode::Superposition => {
                FrameOutput::Superposition(wave_field::superposition(first, second, t, xs))
            }
            SimulationMode::ForcedDestructive => {
                FrameOutput::Superposition(wave_field::forced_destructive(first, t, xs))
            }
            SimulationMode::Standing => {
                let particle = wave_field::particle_displacement(first, t, self.params.particle_x);
                self.trace.push(t, particle);
                FrameOutput::Standing {
                    field: wave_field::standing(first, t, xs),
                    particle,
                }
            }
        };

        self.time += dt;

        Frame {
            time: t,
            mode: self.mode,
            output,
        }
    }
}

impl Default for SimulationController {
    fn default() -> Self {
        Self::new(SimulationParams::default(), WavePair::default())
    }
}
