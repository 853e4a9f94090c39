//! Application state and key handling.

use std::time::Duration;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;

use voxshift::engine::{AudioBackend, DeviceInfo};
use voxshift::{presets, AudioEngine, EngineConfig, Preset};

use super::ui;

/// ~60fps redraw, also how often the engine is supervised
const FRAME: Duration = Duration::from_millis(16);

pub struct App {
    pub engine: AudioEngine,
    pub presets: Vec<Preset>,
    pub selected: usize,
    pub inputs: Vec<DeviceInfo>,
    pub outputs: Vec<DeviceInfo>,
    pub input_idx: Option<usize>,
    pub output_idx: Option<usize>,
    /// Last error or notice shown in the status bar
    pub status: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(config: EngineConfig) -> EyreResult<Self> {
        let mut engine = AudioEngine::new(config);
        let inputs = engine.list_input_devices().wrap_err("failed to list input devices")?;
        let outputs = engine.list_output_devices().wrap_err("failed to list output devices")?;

        // Start on the host defaults, falling back to the first listed device
        let input_idx = pick_default(&inputs, engine.backend().default_input_device());
        let output_idx = pick_default(&outputs, engine.backend().default_output_device());
        if let Some(i) = input_idx {
            engine.set_input_device(inputs[i].id.clone())?;
        }
        if let Some(i) = output_idx {
            engine.set_output_device(outputs[i].id.clone())?;
        }

        let presets = presets::all();
        engine.set_preset(presets[0].clone());

        Ok(Self {
            engine,
            presets,
            selected: 0,
            inputs,
            outputs,
            input_idx,
            output_idx,
            status: None,
            should_quit: false,
        })
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            if let Err(err) = self.engine.supervise() {
                self.status = Some(err.to_string());
            }

            terminal.draw(|frame| ui::render(frame, self))?;

            if event::poll(FRAME)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.engine.stop();
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => {
                let last = self.presets.len() - 1;
                self.select_preset(self.selected.checked_sub(1).unwrap_or(last));
            }
            KeyCode::Down => self.select_preset((self.selected + 1) % self.presets.len()),
            KeyCode::Char('b') => self.engine.set_bypass(!self.engine.is_bypassed()),
            KeyCode::Char('s') => self.toggle_running(),
            KeyCode::Char('i') => self.cycle_input(),
            KeyCode::Char('o') => self.cycle_output(),
            _ => {}
        }
    }

    fn select_preset(&mut self, idx: usize) {
        self.selected = idx;
        self.engine.set_preset(self.presets[idx].clone());
    }

    fn toggle_running(&mut self) {
        if self.engine.is_running() {
            self.engine.stop();
            self.status = None;
        } else {
            self.status = self.engine.start().err().map(|e| e.to_string());
        }
    }

    fn cycle_input(&mut self) {
        let Some(next) = next_index(self.input_idx, self.inputs.len()) else {
            return;
        };
        self.input_idx = Some(next);
        let id = self.inputs[next].id.clone();
        self.status = self.engine.set_input_device(id).err().map(|e| e.to_string());
    }

    fn cycle_output(&mut self) {
        let Some(next) = next_index(self.output_idx, self.outputs.len()) else {
            return;
        };
        self.output_idx = Some(next);
        let id = self.outputs[next].id.clone();
        self.status = self.engine.set_output_device(id).err().map(|e| e.to_string());
    }
}

fn pick_default(devices: &[DeviceInfo], default: Option<DeviceInfo>) -> Option<usize> {
    if devices.is_empty() {
        return None;
    }
    let found = default.and_then(|d| devices.iter().position(|x| x.id == d.id));
    Some(found.unwrap_or(0))
}

fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(current.map_or(0, |i| (i + 1) % len))
}
