pub mod app;
pub mod audio_engine;
pub mod error;
pub mod relations;
pub mod simulation;
pub mod types;
pub mod wave_field;

pub use error::{AudioError, ParameterParseError, RelationError};
pub use relations::{solve, WaveQuantity, WaveRelationInputs, WaveRelations};
pub use simulation::{
    Frame, FrameOutput, ModeCommand, ParameterForm, SimulationController, SimulationMode,
};
pub use types::{AudioParams, SimulationParams, WavePair, WaveParameters};
pub use wave_field::{SampleGrid, SuperpositionField};
