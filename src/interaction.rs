use crate::models::widget::{Position, MAX_ICON_SIZE, MIN_ICON_SIZE};

/// Pointer coordinates in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

/// Drag progress for the social links widget. Motion is only meaningful
/// while a press is being held.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging {
        /// Where the pointer went down.
        pressed: Pointer,
        /// Where the widget was at that moment.
        anchor: Position,
    },
}

/// How many wheel-delta units move the icon size by one pixel.
const WHEEL_DIVISOR: f64 = 50.0;

/// Icon size after one wheel step. Scrolling up (negative delta) grows the
/// icons; the result stays inside the icon size bounds. The shell is
/// expected to consume the wheel event so the page does not scroll.
pub fn wheel_resize(size: f64, delta_y: f64) -> f64 {
    (size - delta_y / WHEEL_DIVISOR).clamp(MIN_ICON_SIZE, MAX_ICON_SIZE)
}

/// Explicit drag state machine for the widget. Every position it reports is
/// recomputed from the press anchor, so long drags accumulate no drift.
#[derive(Debug, Default)]
pub struct WidgetController {
    phase: DragPhase,
}

impl WidgetController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Begin a drag: remember where the pointer went down and where the
    /// widget was at that moment.
    pub fn press(&mut self, pointer: Pointer, anchor: Position) {
        self.phase = DragPhase::Dragging {
            pressed: pointer,
            anchor,
        };
    }

    /// The pointer moved. While a drag is active, returns where the widget
    /// should now sit; motion outside a drag is ignored.
    pub fn motion(&self, pointer: Pointer) -> Option<Position> {
        match self.phase {
            DragPhase::Dragging { pressed, anchor } => Some(Position {
                x: anchor.x + (pointer.x - pressed.x).round() as i64,
                y: anchor.y + (pointer.y - pressed.y).round() as i64,
            }),
            DragPhase::Idle => None,
        }
    }

    /// The pointer was released; the drag ends wherever the widget is.
    pub fn release(&mut self) {
        self.phase = DragPhase::Idle;
    }
}
