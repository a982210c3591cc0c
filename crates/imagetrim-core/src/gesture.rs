//! Gesture adapter: raw pointer/scale event records to pan and scale
//! gestures.
//!
//! The adapter consumes already-classified input records from the host (it
//! does not do gesture detection itself) and emits two incremental signals:
//!
//! - [`Gesture::Scale`]: the multiplicative change since the previous scale
//!   event, with the focal point latched at gesture start.
//! - [`Gesture::Pan`]: the translation since the previous move sample of the
//!   *primary* pointer only.
//!
//! When fingers are lifted in a different order after a multi-touch gesture,
//! the pointer at index zero changes identity between samples. Computing a
//! delta across that boundary makes the image jump, so such samples are
//! suppressed entirely until a fresh down-phase latches a new primary
//! pointer.

use serde::{Deserialize, Serialize};

/// Phase of a pointer-event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A raw pointer sample delivered by the host input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub pointer_id: u32,
    pub x: f32,
    pub y: f32,
    pub phase: PointerPhase,
}

/// Phase of a scale-gesture record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalePhase {
    Begin,
    Update,
    End,
}

/// An already-detected scale-gesture sample from the host.
///
/// `factor` is the incremental multiplicative change since the previous
/// sample, not a cumulative value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleEvent {
    pub factor: f32,
    pub focal_x: f32,
    pub focal_y: f32,
    pub phase: ScalePhase,
}

/// High-level gesture emitted by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gesture {
    /// Incremental scale about a focal point in view-local coordinates.
    Scale {
        factor: f32,
        focal_x: f32,
        focal_y: f32,
    },
    /// Incremental translation in view-local coordinates.
    Pan { dx: f32, dy: f32 },
}

/// Stateful adapter turning event records into [`Gesture`] values.
#[derive(Debug, Clone, Default)]
pub struct GestureAdapter {
    /// Pointer latched at gesture start; pan deltas come from it alone.
    primary: Option<u32>,
    last_x: f32,
    last_y: f32,
    /// Focal point latched when the scale gesture began.
    focal: Option<(f32, f32)>,
}

impl GestureAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one pointer sample. Returns a pan gesture for processed move
    /// samples of the primary pointer, `None` otherwise.
    pub fn on_pointer(&mut self, event: PointerEvent) -> Option<Gesture> {
        match event.phase {
            PointerPhase::Down => {
                // Only the first finger starts a pan gesture; additional
                // fingers belong to the scale gesture.
                if self.primary.is_none() {
                    self.primary = Some(event.pointer_id);
                    self.last_x = event.x;
                    self.last_y = event.y;
                }
                None
            }
            PointerPhase::Move => {
                if self.primary != Some(event.pointer_id) {
                    // Identity mismatch with the gesture-start pointer:
                    // suppress the sample instead of producing a jump.
                    return None;
                }
                let dx = event.x - self.last_x;
                let dy = event.y - self.last_y;
                self.last_x = event.x;
                self.last_y = event.y;
                Some(Gesture::Pan { dx, dy })
            }
            PointerPhase::Up => {
                if self.primary == Some(event.pointer_id) {
                    self.primary = None;
                }
                None
            }
        }
    }

    /// Feed one scale sample. Returns a scale gesture for update samples,
    /// with the focal point held fixed at its gesture-start value.
    pub fn on_scale(&mut self, event: ScaleEvent) -> Option<Gesture> {
        match event.phase {
            ScalePhase::Begin => {
                self.focal = Some((event.focal_x, event.focal_y));
                None
            }
            ScalePhase::Update => {
                let (focal_x, focal_y) = *self
                    .focal
                    .get_or_insert((event.focal_x, event.focal_y));
                Some(Gesture::Scale {
                    factor: event.factor,
                    focal_x,
                    focal_y,
                })
            }
            ScalePhase::End => {
                self.focal = None;
                None
            }
        }
    }
}
