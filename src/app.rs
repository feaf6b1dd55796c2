use std::time::Instant;

use eframe::egui::{self, Color32};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use tracing::{debug, warn};

use crate::audio_engine::{AncSnapshot, AudioEngine};
use crate::relations::{self, WaveQuantity, WaveRelationInputs};
use crate::simulation::{
    Frame, FrameOutput, ModeCommand, SimulationController, SimulationMode, FIELD_LABELS,
};
use crate::types::AudioParams;

const FIELD_Y_RANGE: f64 = 3.0;
const TRACE_Y_RANGE: f64 = 2.5;
const AUDIO_Y_RANGE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Tab {
    Simulator,
    Calculator,
    Audio,
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tab::Simulator => write!(f, "Wave simulator"),
            Tab::Calculator => write!(f, "Calculator"),
            Tab::Audio => write!(f, "Live audio"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CalculatorPanel {
    fields: [String; 5],
    result: Option<Result<String, String>>,
}

impl CalculatorPanel {
    pub fn field_mut(&mut self, quantity: WaveQuantity) -> &mut String {
        &mut self.fields[quantity as usize]
    }

    pub fn calculate(&mut self) -> &Result<String, String> {
        let fields = WaveQuantity::ALL
            .into_iter()
            .zip(self.fields.iter().map(String::as_str));
        let outcome = WaveRelationInputs::from_fields(fields)
            .and_then(|inputs| relations::solve(&inputs))
            .map(|solved| solved.to_string())
            .map_err(|err| {
                debug!("wave relation calculation failed: {err}");
                format!("Error: {err}")
            });
        self.result.insert(outcome)
    }

    pub fn result(&self) -> Option<&Result<String, String>> {
        self.result.as_ref()
    }
}

pub struct WaveLabApp {
    controller: SimulationController,
    frame: Option<Frame>,
    last_tick: Instant,
    calculator: CalculatorPanel,
    audio_params: AudioParams,
    audio: Option<AudioEngine>,
    audio_snapshot: AncSnapshot,
    audio_error: Option<String>,
    tab: Option<Tab>,
}

impl WaveLabApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        controller: SimulationController,
        audio_params: AudioParams,
        tab: Option<Tab>,
    ) -> Self {
        Self {
            controller,
            frame: None,
            last_tick: Instant::now(),
            calculator: CalculatorPanel::default(),
            audio_params,
            audio: None,
            audio_snapshot: AncSnapshot::with_block_size(audio_params.block_size as usize),
            audio_error: None,
            tab,
        }
    }

    fn advance(&mut self) {
        let interval = self.controller.params().frame_interval;
        if self.frame.is_none() || self.last_tick.elapsed() >= interval {
            self.frame = Some(self.controller.tick());
            self.last_tick = Instant::now();
        }

        if let Some(audio) = &self.audio {
            self.audio_snapshot = audio.snapshot();
        }
    }

    fn toggle_audio(&mut self) {
        if self.audio.take().is_some() {
            return;
        }

        match AudioEngine::start(self.audio_params) {
            Ok(engine) => {
                self.audio = Some(engine);
                self.audio_error = None;
            }
            Err(err) => {
                warn!("audio passthrough unavailable: {err}");
                self.audio_error = Some(err.to_string());
            }
        }
    }

    fn draw_menu(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.25);
            ui.heading("Interactive active noise cancellation through destructive interference");
            ui.add_space(20.0);
            for (tab, text) in [
                (Tab::Simulator, "Start wave simulator"),
                (Tab::Calculator, "Open wave calculator"),
                (Tab::Audio, "Show live audio"),
            ] {
                if ui.add_sized([240.0, 36.0], egui::Button::new(text)).clicked() {
                    self.tab = Some(tab);
                }
            }
        });
    }

    fn draw_simulator(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            egui::Grid::new("wave-parameters")
                .num_columns(4)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    let form = self.controller.form_mut();
                    for row in 0..FIELD_LABELS.len() / 2 {
                        for index in [row, row + FIELD_LABELS.len() / 2] {
                            ui.label(FIELD_LABELS[index]);
                            ui.add(
                                egui::TextEdit::singleline(form.field_mut(index)).desired_width(80.0),
                            );
                        }
                        ui.end_row();
                    }
                });

            ui.separator();
            ui.vertical(|ui| {
                ui.label("k and k1 are multiples of π");
                ui.label(format!("mode: {}", self.controller.mode()));
                ui.label(format!("t = {:.1}", self.controller.time()));
            });
        });

        ui.horizontal(|ui| {
            for &mode in SimulationMode::all() {
                if ui
                    .selectable_label(self.controller.mode() == mode, mode.to_string())
                    .clicked()
                {
                    self.controller.on_command(ModeCommand::from(mode));
                    self.frame = None;
                }
            }
        });

        ui.separator();

        let Some(frame) = &self.frame else {
            return;
        };
        let xs = self.controller.grid().xs();

        match &frame.output {
            FrameOutput::Simple(ys) => {
                let height = ui.available_height();
                field_plot(ui, "simple", height, xs, "Wave 1", ys, Color32::LIGHT_BLUE);
            }
            FrameOutput::Superposition(field) => {
                let height = ui.available_height() / 3.0 - 6.0;
                field_plot(ui, "wave-1", height, xs, "Wave 1", &field.first, Color32::LIGHT_BLUE);
                field_plot(ui, "wave-2", height, xs, "Wave 2", &field.second, Color32::LIGHT_RED);
                field_plot(ui, "sum", height, xs, "Sum", &field.sum, Color32::LIGHT_GREEN);
            }
            FrameOutput::Standing { field, .. } => {
                let height = ui.available_height();
                let width = ui.available_width();
                let params = self.controller.params();
                let trace = self.controller.trace();
                ui.horizontal(|ui| {
                    ui.allocate_ui([width / 3.0, height].into(), |ui| {
                        field_plot(ui, "standing", height, xs, "Standing wave", field, Color32::GREEN);
                    });

                    let recent = trace.recent(params.trace_window);
                    Plot::new("particle-trace")
                        .height(height)
                        .allow_drag(false)
                        .allow_zoom(false)
                        .allow_scroll(false)
                        .include_y(-TRACE_Y_RANGE)
                        .include_y(TRACE_Y_RANGE)
                        .include_x((frame.time - params.trace_window).max(0.0))
                        .include_x(frame.time + 1.0)
                        .legend(Legend::default())
                        .show(ui, |plot_ui| {
                            plot_ui.line(
                                Line::new(PlotPoints::from(recent.to_vec()))
                                    .name(format!("particle at x = {:.2}", params.particle_x))
                                    .color(Color32::LIGHT_BLUE),
                            );
                            if let Some(point) = trace.last() {
                                plot_ui.points(
                                    Points::new(vec![point]).radius(5.0).color(Color32::RED),
                                );
                            }
                        });
                });
            }
        }
    }

    fn draw_calculator(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("wave-relations")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                for quantity in WaveQuantity::ALL {
                    ui.label(format!("{quantity}:"));
                    ui.add(
                        egui::TextEdit::singleline(self.calculator.field_mut(quantity))
                            .desired_width(120.0),
                    );
                    ui.end_row();
                }
            });

        if ui.button("Calculate remaining values").clicked() {
            self.calculator.calculate();
        }

        ui.separator();
        match self.calculator.result() {
            None => {
                ui.label("Result: ...");
            }
            Some(Ok(text)) => {
                ui.label(text);
            }
            Some(Err(text)) => {
                ui.colored_label(Color32::from_rgb(230, 100, 100), text);
            }
        }
    }

    fn draw_audio(&mut self, ui: &mut egui::Ui) {
        let label = if self.audio.is_some() {
            "Stop microphone cancellation"
        } else {
            "Start microphone cancellation"
        };
        if ui.button(label).clicked() {
            self.toggle_audio();
        }

        if let Some(audio) = &self.audio {
            ui.label(format!(
                "Input: {}  Output: {}  {} Hz, {} samples per block",
                audio.input_device_name, audio.output_device_name, audio.sample_rate, audio.block_size
            ));
        } else if let Some(err) = &self.audio_error {
            ui.colored_label(
                Color32::from_rgb(230, 100, 100),
                format!("Audio offline: {err}"),
            );
        }

        ui.separator();
        let height = ui.available_height() / 3.0 - 6.0;
        let snapshot = &self.audio_snapshot;
        audio_plot(ui, "audio-original", height, "Original", snapshot.original(), Color32::YELLOW);
        audio_plot(ui, "audio-inverted", height, "Inverted", snapshot.inverted(), Color32::LIGHT_BLUE);
        audio_plot(ui, "audio-sum", height, "Cancelled result", snapshot.sum(), Color32::from_rgb(230, 80, 230));
    }
}

fn field_plot(
    ui: &mut egui::Ui,
    id: &str,
    height: f32,
    xs: &[f64],
    name: &str,
    ys: &[f64],
    color: Color32,
) {
    Plot::new(id)
        .height(height)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .include_y(-FIELD_Y_RANGE)
        .include_y(FIELD_Y_RANGE)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let points: PlotPoints = xs.iter().zip(ys).map(|(&x, &y)| [x, y]).collect();
            plot_ui.line(Line::new(points).name(name).color(color));
        });
}

fn audio_plot(ui: &mut egui::Ui, id: &str, height: f32, name: &str, samples: &[f32], color: Color32) {
    let points: PlotPoints = samples
        .iter()
        .enumerate()
        .map(|(i, &s)| [i as f64, s as f64])
        .collect();
    Plot::new(id)
        .height(height)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .include_y(-AUDIO_Y_RANGE)
        .include_y(AUDIO_Y_RANGE)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name(name).color(color));
        });
}

impl eframe::App for WaveLabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.advance();

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, None, "Menu");
                for tab in [Tab::Simulator, Tab::Calculator, Tab::Audio] {
                    ui.selectable_value(&mut self.tab, Some(tab), tab.to_string());
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            None => self.draw_menu(ui),
            Some(Tab::Simulator) => self.draw_simulator(ui),
            Some(Tab::Calculator) => self.draw_calculator(ui),
            Some(Tab::Audio) => self.draw_audio(ui),
        });

        ctx.request_repaint_after(self.controller.params().frame_interval);
    }
}
