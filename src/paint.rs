// Current paint parameters: which tool, how wide, which color.
// Only toolbar/palette actions mutate this; the surface reads it per segment.

use crate::types::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Pen,
    Eraser,
}

/// How a stroke combines with existing pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositeMode {
    SourceOver,     // paint covers what is underneath
    DestinationOut, // covered pixels become transparent
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresetColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Black,
}

impl PresetColor {
    pub const ALL: [PresetColor; 7] = [
        PresetColor::Red,
        PresetColor::Orange,
        PresetColor::Yellow,
        PresetColor::Green,
        PresetColor::Blue,
        PresetColor::Purple,
        PresetColor::Black,
    ];

    pub const fn color(self) -> Color {
        match self {
            PresetColor::Red => Color::rgb(0xf4, 0x43, 0x36),
            PresetColor::Orange => Color::rgb(0xff, 0x98, 0x00),
            PresetColor::Yellow => Color::rgb(0xff, 0xeb, 0x3b),
            PresetColor::Green => Color::rgb(0x4c, 0xaf, 0x50),
            PresetColor::Blue => Color::rgb(0x21, 0x96, 0xf3),
            PresetColor::Purple => Color::rgb(0x9c, 0x27, 0xb0),
            PresetColor::Black => Color::rgb(0x00, 0x00, 0x00),
        }
    }

    /// Preset whose value is exactly `color`, if any.
    pub fn matching(color: Color) -> Option<PresetColor> {
        Self::ALL.into_iter().find(|p| p.color() == color)
    }
}

/// A palette selection: one of the swatches or a user-typed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorChoice {
    Preset(PresetColor),
    Custom(Color),
}

impl ColorChoice {
    pub fn color(self) -> Color {
        match self {
            ColorChoice::Preset(p) => p.color(),
            ColorChoice::Custom(c) => c,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PaintState {
    tool: Tool,
    pen_width: u32,
    eraser_width: u32,
    color: ColorChoice,
}

impl PaintState {
    pub fn new(pen_width: u32, eraser_width: u32, color: ColorChoice) -> Self {
        Self { tool: Tool::Pen, pen_width, eraser_width, color }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            log::debug!("paint: tool {:?} -> {:?}", self.tool, tool);
        }
        self.tool = tool;
    }

    /// Picking a color always means "I want to paint", so it switches back to the pen.
    pub fn set_color(&mut self, choice: ColorChoice) {
        log::debug!("paint: color {}", choice.color().to_hex());
        self.color = choice;
        self.tool = Tool::Pen;
    }

    pub fn color_choice(&self) -> ColorChoice {
        self.color
    }

    pub fn color(&self) -> Color {
        self.color.color()
    }

    pub fn width(&self, tool: Tool) -> u32 {
        match tool {
            Tool::Pen => self.pen_width,
            Tool::Eraser => self.eraser_width,
        }
    }

    pub fn set_width(&mut self, tool: Tool, width: u32) {
        log::debug!("paint: {tool:?} width {width}px");
        match tool {
            Tool::Pen => self.pen_width = width,
            Tool::Eraser => self.eraser_width = width,
        }
    }

    /// Width of whichever tool is active.
    pub fn active_width(&self) -> u32 {
        self.width(self.tool)
    }

    pub fn composite(&self) -> CompositeMode {
        match self.tool {
            Tool::Pen => CompositeMode::SourceOver,
            Tool::Eraser => CompositeMode::DestinationOut,
        }
    }
}

impl Default for PaintState {
    fn default() -> Self {
        Self::new(10, 10, ColorChoice::Preset(PresetColor::Red))
    }
}
