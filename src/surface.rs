// The visible raster plus the stroke state machine (begin / extend / end).
// Painting is immediate: every extend writes pixels straight into the raster.
// Completed strokes and clears are handed to the history as whole-raster snapshots.

use std::rc::Rc;

use crate::history::History;
use crate::paint::{CompositeMode, PaintState};
use crate::types::{Color, FrameBuffer, Point};

/// Immutable capture of the raster, shared with the history.
pub type Snapshot = Rc<FrameBuffer>;

pub struct DrawingSurface {
    raster: FrameBuffer,
    background: Color,
    anchor: Option<Point>, // Some(..) while a stroke is active
}

impl DrawingSurface {
    /// A blank surface filled with the background color.
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            raster: FrameBuffer::filled(width, height, background),
            background,
            anchor: None,
        }
    }

    pub fn raster(&self) -> &FrameBuffer {
        &self.raster
    }

    pub fn is_stroking(&self) -> bool {
        self.anchor.is_some()
    }

    /// Copy of the current raster, ready to commit.
    pub fn snapshot(&self) -> Snapshot {
        Rc::new(self.raster.clone())
    }

    /// Open a stroke at `point`. Ignored while another stroke is active.
    pub fn begin_stroke(&mut self, point: Point) {
        if self.anchor.is_some() {
            return;
        }
        self.anchor = Some(point);
    }

    /// Paint from the anchor to `point` with the current paint state, then move the anchor.
    pub fn extend_stroke(&mut self, point: Point, paint: &PaintState) {
        let Some(from) = self.anchor else { return };
        let color = match paint.composite() {
            CompositeMode::SourceOver => paint.color(),
            CompositeMode::DestinationOut => Color::TRANSPARENT,
        };
        stroke_segment(&mut self.raster, from, point, paint.active_width(), color);
        self.anchor = Some(point);
    }

    /// Finish the active stroke and commit the result. No-op without a stroke.
    pub fn end_stroke(&mut self, history: &mut History<Snapshot>) {
        if self.anchor.take().is_none() {
            return;
        }
        history.commit(self.snapshot());
    }

    /// Wipe to background and restart history from the blank raster.
    /// Not undoable; callers must have asked the user first.
    pub fn clear(&mut self, history: &mut History<Snapshot>) {
        self.anchor = None;
        self.raster.pixels.fill(self.background.0);
        history.initialize(self.snapshot());
        log::info!("canvas cleared");
    }

    /// Put a snapshot back on screen (undo/redo). Bypasses stroke logic.
    pub fn restore(&mut self, snapshot: &FrameBuffer) {
        self.raster.pixels.copy_from_slice(&snapshot.pixels);
    }

    /// Write the visible image into a 0x00RRGGBB window buffer.
    /// Erased (transparent) pixels show the background.
    pub fn present_into(&self, out: &mut [u32]) {
        let bg = self.background.0 & 0x00FF_FFFF;
        for (dst, &px) in out.iter_mut().zip(&self.raster.pixels) {
            *dst = if px >> 24 == 0 { bg } else { px & 0x00FF_FFFF };
        }
    }
}

/* ---------- Rasterization: round-capped thick lines ---------- */

/// Fill a disc of radius `radius` centered at (cx,cy).
/// The pixel containing the center is always covered so 1px strokes never vanish.
fn stamp_disc(fb: &mut FrameBuffer, cx: f32, cy: f32, radius: f32, color: Color) {
    let r2 = radius * radius;
    let x0 = (cx - radius).floor().max(0.0) as usize;
    let y0 = (cy - radius).floor().max(0.0) as usize;
    let x1 = ((cx + radius).ceil().max(0.0) as usize).min(fb.width);
    let y1 = ((cy + radius).ceil().max(0.0) as usize).min(fb.height);

    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                fb.pixels[y * fb.width + x] = color.0;
            }
        }
    }

    if cx >= 0.0 && cy >= 0.0 {
        let (x, y) = (cx as usize, cy as usize);
        if x < fb.width && y < fb.height {
            fb.pixels[y * fb.width + x] = color.0;
        }
    }
}

/// Stamp discs no more than one pixel apart from `a` to `b`.
fn stroke_segment(fb: &mut FrameBuffer, a: Point, b: Point, width: u32, color: Color) {
    let radius = width.max(1) as f32 / 2.0;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let steps = (dx * dx + dy * dy).sqrt().ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        stamp_disc(fb, a.x + dx * t, a.y + dy * t, radius, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::DEFAULT_CAPACITY;
    use crate::paint::{ColorChoice, PresetColor, Tool};

    const BG: Color = Color::WHITE;

    fn setup() -> (DrawingSurface, History<Snapshot>, PaintState) {
        let surface = DrawingSurface::new(40, 30, BG);
        let history = History::new(DEFAULT_CAPACITY, surface.snapshot()).unwrap();
        (surface, history, PaintState::default())
    }

    fn count(fb: &FrameBuffer, color: Color) -> usize {
        fb.pixels.iter().filter(|&&p| p == color.0).count()
    }

    #[test]
    fn pen_stroke_paints_and_commits_once() {
        let (mut s, mut h, paint) = setup();
        s.begin_stroke(Point::new(5.0, 5.0));
        s.extend_stroke(Point::new(20.0, 5.0), &paint);
        s.extend_stroke(Point::new(20.0, 20.0), &paint);
        assert_eq!(h.len(), 1, "nothing committed mid-stroke");
        s.end_stroke(&mut h);

        let red = PresetColor::Red.color();
        assert_eq!(s.raster().get(12, 5), Some(red.0));
        assert_eq!(s.raster().get(20, 12), Some(red.0));
        assert_eq!(s.raster().get(35, 28), Some(BG.0));
        assert_eq!(h.len(), 2);
        assert_eq!(&**h.current(), s.raster());
    }

    #[test]
    fn width_controls_thickness() {
        let (mut s, _h, mut paint) = setup();
        paint.set_width(Tool::Pen, 1);
        s.begin_stroke(Point::new(2.5, 10.5));
        s.extend_stroke(Point::new(12.5, 10.5), &paint);
        let thin = count(s.raster(), paint.color());

        let (mut s, _h, _) = setup();
        paint.set_width(Tool::Pen, 6);
        s.begin_stroke(Point::new(2.5, 10.5));
        s.extend_stroke(Point::new(12.5, 10.5), &paint);
        let thick = count(s.raster(), paint.color());

        assert!(thin >= 11, "1px line covers every column, got {thin}");
        assert!(thick > thin * 4, "thick {thick} vs thin {thin}");
    }

    #[test]
    fn one_pixel_stroke_on_pixel_corner_is_visible() {
        let (mut s, _h, mut paint) = setup();
        paint.set_width(Tool::Pen, 1);
        s.begin_stroke(Point::new(3.0, 3.0));
        s.extend_stroke(Point::new(3.0, 3.0), &paint);
        assert_eq!(s.raster().get(3, 3), Some(paint.color().0));
    }

    #[test]
    fn eraser_makes_pixels_transparent() {
        let (mut s, mut h, mut paint) = setup();
        paint.set_color(ColorChoice::Preset(PresetColor::Black));
        s.begin_stroke(Point::new(0.0, 10.0));
        s.extend_stroke(Point::new(39.0, 10.0), &paint);
        s.end_stroke(&mut h);

        paint.set_tool(Tool::Eraser);
        paint.set_width(Tool::Eraser, 4);
        s.begin_stroke(Point::new(20.0, 0.0));
        s.extend_stroke(Point::new(20.0, 29.0), &paint);
        s.end_stroke(&mut h);

        assert_eq!(s.raster().get(20, 10), Some(Color::TRANSPARENT.0));
        assert_eq!(s.raster().get(5, 10), Some(Color::BLACK.0));
        assert_eq!(h.len(), 3);

        let mut window = vec![0u32; 40 * 30];
        s.present_into(&mut window);
        assert_eq!(window[10 * 40 + 20], 0x00FF_FFFF, "erased shows background");
        assert_eq!(window[10 * 40 + 5], 0x0000_0000);
    }

    #[test]
    fn stray_moves_and_ends_are_ignored() {
        let (mut s, mut h, paint) = setup();
        let before = s.raster().clone();
        s.extend_stroke(Point::new(10.0, 10.0), &paint);
        s.end_stroke(&mut h);
        assert_eq!(s.raster(), &before);
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn second_begin_keeps_first_anchor() {
        let (mut s, _h, paint) = setup();
        s.begin_stroke(Point::new(2.0, 2.0));
        s.begin_stroke(Point::new(30.0, 25.0));
        s.extend_stroke(Point::new(2.0, 20.0), &paint);
        assert_eq!(s.raster().get(2, 10), Some(paint.color().0));
        assert_eq!(s.raster().get(30, 25), Some(BG.0));
    }

    #[test]
    fn strokes_clip_at_edges() {
        let (mut s, _h, mut paint) = setup();
        paint.set_width(Tool::Pen, 12);
        s.begin_stroke(Point::new(-20.0, -5.0));
        s.extend_stroke(Point::new(60.0, 40.0), &paint);
        assert_eq!(s.raster().pixels.len(), 40 * 30);
        assert_eq!(s.raster().get(0, 0), Some(paint.color().0));
    }

    #[test]
    fn clear_resets_raster_and_history() {
        let (mut s, mut h, paint) = setup();
        for y in [4.0, 8.0, 12.0] {
            s.begin_stroke(Point::new(0.0, y));
            s.extend_stroke(Point::new(30.0, y), &paint);
            s.end_stroke(&mut h);
        }
        h.undo();
        s.clear(&mut h);
        let blank = FrameBuffer::filled(40, 30, BG);
        assert_eq!(s.raster(), &blank);
        assert_eq!(h.len(), 1);
        assert_eq!(h.cursor(), 0);
        assert_eq!(&**h.current(), &blank);
    }

    #[test]
    fn restore_puts_snapshot_back() {
        let (mut s, mut h, paint) = setup();
        s.begin_stroke(Point::new(1.0, 1.0));
        s.extend_stroke(Point::new(9.0, 9.0), &paint);
        s.end_stroke(&mut h);
        let snap = h.undo().cloned().unwrap();
        s.restore(&snap);
        assert_eq!(s.raster(), &FrameBuffer::filled(40, 30, BG));
    }
}
