// The strip of controls under the canvas.
// Each control is an enum value; its highlighted/disabled look is derived from
// app state through `affordance`, never by searching controls by name.

use crate::app::{Action, App, Prompt};
use crate::draw::{self, Rect};
use crate::paint::{ColorChoice, PresetColor, Tool};
use crate::types::{FrameBuffer, Point};

const PAD: i32 = 6;
const GAP: i32 = 4;
const SLIDER_W: i32 = 120;
const READOUT_W: i32 = 40;

const BAR_BG: u32 = 0x00_2B_2B_2B;
const BUTTON_BG: u32 = 0x00_44_44_44;
const BUTTON_ACTIVE_BG: u32 = 0x00_1E_88_E5;
const BUTTON_DISABLED_BG: u32 = 0x00_35_35_35;
const TEXT: u32 = 0x00_FF_FF_FF;
const TEXT_DIM: u32 = 0x00_77_77_77;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Tool(Tool),
    Swatch(PresetColor),
    CustomSwatch,
    WidthSlider,
    Undo,
    Redo,
    Save,
    Clear,
}

impl Control {
    fn label(self) -> &'static str {
        match self {
            Control::Tool(Tool::Pen) => "PEN",
            Control::Tool(Tool::Eraser) => "ERASER",
            Control::Undo => "UNDO",
            Control::Redo => "REDO",
            Control::Save => "SAVE",
            Control::Clear => "CLEAR",
            Control::CustomSwatch => "#",
            Control::Swatch(_) | Control::WidthSlider => "",
        }
    }

    /// What clicking this control asks for. The slider reports through drags instead.
    pub fn action(self) -> Option<Action> {
        match self {
            Control::Tool(t) => Some(Action::SelectTool(t)),
            Control::Swatch(p) => Some(Action::Color(ColorChoice::Preset(p))),
            Control::CustomSwatch => Some(Action::OpenHexEntry),
            Control::Undo => Some(Action::Undo),
            Control::Redo => Some(Action::Redo),
            Control::Save => Some(Action::Save),
            Control::Clear => Some(Action::Clear),
            Control::WidthSlider => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affordance {
    Normal,
    Active,
    Disabled,
}

/// Highlight state of `control` for the current app state.
pub fn affordance(control: Control, app: &App) -> Affordance {
    let active = |on: bool| if on { Affordance::Active } else { Affordance::Normal };
    let enabled = |on: bool| if on { Affordance::Normal } else { Affordance::Disabled };
    match control {
        Control::Tool(t) => active(app.paint().tool() == t),
        Control::Swatch(p) => active(app.paint().color_choice() == ColorChoice::Preset(p)),
        Control::CustomSwatch => active(matches!(app.paint().color_choice(), ColorChoice::Custom(_))),
        Control::Undo => enabled(app.history().can_undo()),
        Control::Redo => enabled(app.history().can_redo()),
        Control::WidthSlider | Control::Save | Control::Clear => Affordance::Normal,
    }
}

pub struct Toolbar {
    area: Rect,
    items: Vec<(Control, Rect)>,
    readout: Rect,
    status: Rect,
    range: (u32, u32),
    was_down: bool,
    drag: Option<u32>, // slider value while dragging
}

impl Toolbar {
    /// Lay out the strip spanning `width` pixels starting at window row `top`.
    pub fn new(width: usize, top: usize, height: usize, range: (u32, u32)) -> Self {
        let area = Rect::new(0, top as i32, width as i32, height as i32);
        let inner_h = (area.h - 2 * PAD).max(1);
        let y = area.y + PAD;
        let mut x = PAD;
        let mut items = Vec::new();

        let push = |items: &mut Vec<(Control, Rect)>, x: &mut i32, control: Control, w: i32| {
            items.push((control, Rect::new(*x, y, w, inner_h)));
            *x += w + GAP;
        };
        let button_w = |c: Control| draw::text_width(c.label()) + 16;

        for control in [Control::Tool(Tool::Pen), Control::Tool(Tool::Eraser)] {
            push(&mut items, &mut x, control, button_w(control));
        }
        x += 2 * GAP;
        for preset in PresetColor::ALL {
            push(&mut items, &mut x, Control::Swatch(preset), inner_h);
        }
        push(&mut items, &mut x, Control::CustomSwatch, inner_h);
        x += 2 * GAP;
        push(&mut items, &mut x, Control::WidthSlider, SLIDER_W);
        let readout = Rect::new(x, y, READOUT_W, inner_h);
        x += READOUT_W + 2 * GAP;
        for control in [Control::Undo, Control::Redo, Control::Save, Control::Clear] {
            push(&mut items, &mut x, control, button_w(control));
        }
        let status = Rect::new(x + GAP, y, (area.w - x - GAP - PAD).max(0), inner_h);

        Self { area, items, readout, status, range, was_down: false, drag: None }
    }

    /// Control under window position `p`, if any.
    pub fn hit(&self, p: Point) -> Option<Control> {
        let (px, py) = (p.x as i32, p.y as i32);
        self.items.iter().find(|(_, r)| r.contains(px, py)).map(|(c, _)| *c)
    }

    fn rect_of(&self, control: Control) -> Option<Rect> {
        self.items.iter().find(|(c, _)| *c == control).map(|(_, r)| *r)
    }

    /// Slider value for window x, clamped to the configured range.
    pub fn slider_value(&self, x: f32) -> u32 {
        let Some(track) = self.rect_of(Control::WidthSlider) else { return self.range.0 };
        let (min, max) = self.range;
        let t = ((x - track.x as f32) / (track.w - 1).max(1) as f32).clamp(0.0, 1.0);
        min + (t * (max - min) as f32).round() as u32
    }

    fn slider_x(&self, track: Rect, value: u32) -> i32 {
        let (min, max) = self.range;
        let t = (value.clamp(min, max) - min) as f32 / (max - min).max(1) as f32;
        track.x + (t * (track.w - 1) as f32).round() as i32
    }

    /// Feed one pointer poll. Buttons fire on press; the slider previews while
    /// dragged and commits on release, even if released outside the window.
    pub fn pointer(&mut self, pos: Option<Point>, down: bool) -> Option<Action> {
        let pressed = down && !self.was_down;
        self.was_down = down;

        if let Some(value) = self.drag {
            if !down {
                self.drag = None;
                return Some(Action::WidthCommit(value));
            }
            let next = self.slider_value(pos?.x);
            if next == value {
                return None;
            }
            self.drag = Some(next);
            return Some(Action::WidthPreview(next));
        }

        if !pressed {
            return None;
        }
        match self.hit(pos?)? {
            Control::WidthSlider => {
                let value = self.slider_value(pos?.x);
                self.drag = Some(value);
                Some(Action::WidthPreview(value))
            }
            control => control.action(),
        }
    }

    pub fn render(&self, fb: &mut FrameBuffer, app: &App) {
        draw::fill_rect(fb, self.area, BAR_BG);

        for &(control, rect) in &self.items {
            let look = affordance(control, app);
            match control {
                Control::Swatch(preset) => {
                    draw::fill_rect(fb, rect, preset.color().0 & 0x00FF_FFFF);
                    if look == Affordance::Active {
                        draw::stroke_rect(fb, rect, 2, TEXT);
                    }
                }
                Control::CustomSwatch => {
                    match app.custom_color() {
                        Some(c) => draw::fill_rect(fb, rect, c.0 & 0x00FF_FFFF),
                        None => {
                            draw::fill_rect(fb, rect, BUTTON_BG);
                            draw::draw_text_centered(fb, rect, control.label(), TEXT);
                        }
                    }
                    if look == Affordance::Active {
                        draw::stroke_rect(fb, rect, 2, TEXT);
                    }
                }
                Control::WidthSlider => {
                    let mid = rect.y + rect.h / 2;
                    draw::fill_rect(fb, Rect::new(rect.x, mid - 1, rect.w, 2), TEXT_DIM);
                    let knob = self.slider_x(rect, app.width_readout());
                    draw::fill_rect(fb, Rect::new(knob - 3, rect.y + 4, 7, rect.h - 8), TEXT);
                }
                _ => {
                    let (bg, fg) = match look {
                        Affordance::Active => (BUTTON_ACTIVE_BG, TEXT),
                        Affordance::Normal => (BUTTON_BG, TEXT),
                        Affordance::Disabled => (BUTTON_DISABLED_BG, TEXT_DIM),
                    };
                    draw::fill_rect(fb, rect, bg);
                    draw::draw_text_centered(fb, rect, control.label(), fg);
                }
            }
        }

        let readout = format!("{}PX", app.width_readout());
        draw::draw_text_centered(fb, self.readout, &readout, TEXT);

        let history = app.history();
        let mut status = format!("{}/{}", history.cursor(), history.len() - 1);
        if let Some(note) = app.status() {
            status = format!("{status} | {note}");
        }
        draw::draw_text_5x7(fb, self.status.x, self.status.y + (self.status.h - draw::GLYPH_HEIGHT) / 2, &status, TEXT_DIM);
    }
}

/// Modal box over the middle of the canvas for the open prompt.
pub fn render_prompt(fb: &mut FrameBuffer, canvas: Rect, prompt: &Prompt) {
    let (title, detail) = match prompt {
        Prompt::ConfirmClear => ("CLEAR CANVAS?".to_string(), "Y: CLEAR   N: KEEP".to_string()),
        Prompt::HexEntry(digits) => (format!("COLOR #{digits:_<6}"), "ENTER: OK   ESC: CANCEL".to_string()),
    };
    let w = draw::text_width(&title).max(draw::text_width(&detail)) + 40;
    let h = 52;
    let boxed = Rect::new(canvas.x + (canvas.w - w) / 2, canvas.y + (canvas.h - h) / 2, w, h);
    draw::fill_rect(fb, boxed, BAR_BG);
    draw::stroke_rect(fb, boxed, 2, TEXT);
    draw::draw_text_centered(fb, Rect::new(boxed.x, boxed.y + 8, w, 16), &title, TEXT);
    draw::draw_text_centered(fb, Rect::new(boxed.x, boxed.y + 28, w, 16), &detail, TEXT_DIM);
}
