// Turns per-frame mouse polling into discrete gesture events.
// The window only tells us "where is the mouse" and "is the button held";
// strokes need begin / move / end / leave transitions.

use crate::types::Point;

/// One poll of the pointer. `pos` is None when the pointer is outside the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub pos: Option<Point>,
    pub down: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    Leave, // left the canvas while held; ends the stroke like Up
}

#[derive(Default)]
pub struct PointerTracker {
    last: PointerSample,
    captured: bool, // press started inside the canvas
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare against the previous sample and report what changed.
    pub fn update(&mut self, sample: PointerSample) -> Option<PointerEvent> {
        let prev = std::mem::replace(&mut self.last, sample);

        if self.captured {
            if !sample.down {
                self.captured = false;
                return Some(PointerEvent::Up);
            }
            return match sample.pos {
                None => {
                    self.captured = false;
                    Some(PointerEvent::Leave)
                }
                Some(p) if prev.pos != Some(p) => Some(PointerEvent::Move(p)),
                Some(_) => None,
            };
        }

        // Only a fresh press inside the canvas starts a gesture; dragging in from outside does not.
        match (prev.down, sample.down, sample.pos) {
            (false, true, Some(p)) => {
                self.captured = true;
                Some(PointerEvent::Down(p))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(x: f32, y: f32, down: bool) -> PointerSample {
        PointerSample { pos: Some(Point::new(x, y)), down }
    }

    fn outside(down: bool) -> PointerSample {
        PointerSample { pos: None, down }
    }

    fn run(samples: &[PointerSample]) -> Vec<PointerEvent> {
        let mut tracker = PointerTracker::new();
        samples.iter().filter_map(|&s| tracker.update(s)).collect()
    }

    #[test]
    fn press_drag_release() {
        let events = run(&[
            at(1.0, 1.0, false),
            at(1.0, 1.0, true),
            at(2.0, 1.0, true),
            at(2.0, 1.0, true),
            at(3.0, 4.0, true),
            at(3.0, 4.0, false),
        ]);
        assert_eq!(
            events,
            vec![
                PointerEvent::Down(Point::new(1.0, 1.0)),
                PointerEvent::Move(Point::new(2.0, 1.0)),
                PointerEvent::Move(Point::new(3.0, 4.0)),
                PointerEvent::Up,
            ]
        );
    }

    #[test]
    fn leaving_while_held_ends_gesture() {
        let events = run(&[
            at(5.0, 5.0, true),
            outside(true),
            at(6.0, 6.0, true), // coming back in while still held is not a new stroke
            at(6.0, 6.0, false),
        ]);
        assert_eq!(events, vec![PointerEvent::Down(Point::new(5.0, 5.0)), PointerEvent::Leave]);
    }

    #[test]
    fn press_outside_never_starts_a_stroke() {
        let events = run(&[outside(true), at(4.0, 4.0, true), at(5.0, 4.0, true), at(5.0, 4.0, false)]);
        assert!(events.is_empty(), "{events:?}");
    }
}
