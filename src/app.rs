// The event-handling layer. Owns every piece of mutable state (history, paint
// parameters, visible surface, open prompt) and applies one event at a time.
// Nothing here touches the window, so the whole flow runs in tests.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Error;
use crate::export;
use crate::history::History;
use crate::input::PointerEvent;
use crate::paint::{ColorChoice, PaintState, PresetColor, Tool};
use crate::surface::{DrawingSurface, Snapshot};
use crate::types::Color;

/// Something the user asked for from the toolbar or keyboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    SelectTool(Tool),
    Color(ColorChoice),
    OpenHexEntry,
    WidthPreview(u32), // slider drag: readout only
    WidthCommit(u32),  // slider release: applies to the current tool
    WidthStep(i32),
    Undo,
    Redo,
    Save,
    Clear, // asks first
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AppEvent {
    Pointer(PointerEvent),
    Action(Action),
    Confirm(bool), // answer to the open prompt
    HexInput(char),
    HexBackspace,
}

/// A modal question blocking the canvas until answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    ConfirmClear,
    HexEntry(String),
}

pub struct App {
    surface: DrawingSurface,
    history: History<Snapshot>,
    paint: PaintState,
    prompt: Option<Prompt>,
    width_readout: u32,
    custom_color: Option<Color>,
    min_width: u32,
    max_width: u32,
    export_dir: PathBuf,
    status: Option<String>,
    release_deferred: bool, // pointer let go while a prompt held the stroke open
}

impl App {
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;
        let surface = DrawingSurface::new(config.width, config.height, config.background_color()?);
        let history = History::new(config.history_capacity, surface.snapshot())?;

        let initial = config.initial_color()?;
        let choice = PresetColor::matching(initial).map_or(ColorChoice::Custom(initial), ColorChoice::Preset);
        let paint = PaintState::new(
            config.clamp_width(config.pen_width),
            config.clamp_width(config.eraser_width),
            choice,
        );

        Ok(Self {
            width_readout: paint.active_width(),
            custom_color: match choice {
                ColorChoice::Custom(c) => Some(c),
                ColorChoice::Preset(_) => None,
            },
            surface,
            history,
            paint,
            prompt: None,
            min_width: config.min_width,
            max_width: config.max_width,
            export_dir: config.export_dir.clone(),
            status: None,
            release_deferred: false,
        })
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn paint(&self) -> &PaintState {
        &self.paint
    }

    pub fn history(&self) -> &History<Snapshot> {
        &self.history
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn width_readout(&self) -> u32 {
        self.width_readout
    }

    pub fn width_range(&self) -> (u32, u32) {
        (self.min_width, self.max_width)
    }

    pub fn custom_color(&self) -> Option<Color> {
        self.custom_color
    }

    /// Last save result, shown in the toolbar.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Pointer(p) => self.on_pointer(p),
            AppEvent::Action(a) => self.on_action(a),
            AppEvent::Confirm(yes) => self.on_confirm(yes),
            AppEvent::HexInput(c) => {
                if let Some(Prompt::HexEntry(digits)) = &mut self.prompt {
                    if c.is_ascii_hexdigit() && digits.len() < 6 {
                        digits.push(c.to_ascii_lowercase());
                    }
                }
            }
            AppEvent::HexBackspace => {
                if let Some(Prompt::HexEntry(digits)) = &mut self.prompt {
                    digits.pop();
                }
            }
        }
    }

    fn on_pointer(&mut self, event: PointerEvent) {
        // The canvas is blocked while a prompt is up. A stroke in progress stays
        // open and uncommitted until the prompt is answered.
        if self.prompt.is_some() {
            if matches!(event, PointerEvent::Up | PointerEvent::Leave) && self.surface.is_stroking() {
                self.release_deferred = true;
            }
            return;
        }
        match event {
            PointerEvent::Down(p) => self.surface.begin_stroke(p),
            PointerEvent::Move(p) => self.surface.extend_stroke(p, &self.paint),
            PointerEvent::Up | PointerEvent::Leave => self.surface.end_stroke(&mut self.history),
        }
    }

    fn on_action(&mut self, action: Action) {
        if self.prompt.is_some() {
            return;
        }
        match action {
            Action::SelectTool(tool) => {
                self.paint.set_tool(tool);
                self.width_readout = self.paint.active_width();
            }
            Action::Color(choice) => {
                if let ColorChoice::Custom(c) = choice {
                    self.custom_color = Some(c);
                }
                self.paint.set_color(choice);
                self.width_readout = self.paint.active_width();
            }
            Action::OpenHexEntry => {
                let start = self.custom_color.map(|c| c.to_hex()[1..].to_string()).unwrap_or_default();
                self.prompt = Some(Prompt::HexEntry(start));
            }
            Action::WidthPreview(v) => self.width_readout = v.clamp(self.min_width, self.max_width),
            Action::WidthCommit(v) => self.commit_width(v),
            Action::WidthStep(delta) => {
                let next = self.paint.active_width().saturating_add_signed(delta);
                self.commit_width(next);
            }
            Action::Undo => {
                self.finish_stroke();
                if let Some(snapshot) = self.history.undo() {
                    self.surface.restore(snapshot);
                    log::debug!("undo -> {}", self.history.cursor());
                }
            }
            Action::Redo => {
                self.finish_stroke();
                if let Some(snapshot) = self.history.redo() {
                    self.surface.restore(snapshot);
                    log::debug!("redo -> {}", self.history.cursor());
                }
            }
            Action::Save => self.save(),
            Action::Clear => self.prompt = Some(Prompt::ConfirmClear),
        }
    }

    fn on_confirm(&mut self, yes: bool) {
        match self.prompt.take() {
            Some(Prompt::ConfirmClear) if yes => self.surface.clear(&mut self.history),
            Some(Prompt::ConfirmClear) => log::warn!("clear cancelled"),
            Some(Prompt::HexEntry(digits)) if yes => match Color::from_hex(&digits) {
                Ok(color) => self.on_action(Action::Color(ColorChoice::Custom(color))),
                // Incomplete value: keep the prompt open.
                Err(_) => self.prompt = Some(Prompt::HexEntry(digits)),
            },
            Some(Prompt::HexEntry(_)) | None => {}
        }

        // Release that arrived under the prompt: finish the stroke now.
        // After a confirmed clear there is no stroke left and this is a no-op.
        if self.prompt.is_none() && std::mem::take(&mut self.release_deferred) {
            self.surface.end_stroke(&mut self.history);
        }
    }

    fn commit_width(&mut self, width: u32) {
        let width = width.clamp(self.min_width, self.max_width);
        self.paint.set_width(self.paint.tool(), width);
        self.width_readout = width;
    }

    /// A history operation arriving mid-stroke first commits what is painted so far.
    fn finish_stroke(&mut self) {
        if self.surface.is_stroking() {
            log::debug!("history action mid-stroke, committing stroke first");
            self.surface.end_stroke(&mut self.history);
        }
    }

    fn save(&mut self) {
        match export::save_png(self.surface.raster(), &self.export_dir) {
            Ok(path) => {
                log::info!("saved {}", path.display());
                let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                self.status = Some(format!("SAVED {name}"));
            }
            Err(e) => {
                log::error!("save failed: {e}");
                self.status = Some("SAVE FAILED".into());
            }
        }
    }
}
