use crate::chart::ChartSource;
use crate::wheel::primitives::{Color, Point, Shape};
use serde::{Deserialize, Serialize};

/// Declarative description of a drawn wheel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelSpec {
    pub width: f32,
    pub height: f32,
    pub center: Point,
    pub radius: f32,
    /// Degrees added to every longitude before placing it; puts the Ascendant at 9 o'clock
    pub rotation_offset: f32,
    pub background_color: Color,
    pub source: ChartSource,
    pub shapes: Vec<Shape>,
}

impl WheelSpec {
    pub fn new(width: f32, height: f32, source: ChartSource) -> Self {
        Self {
            width,
            height,
            center: Point {
                x: width / 2.0,
                y: height / 2.0,
            },
            radius: width.min(height) / 2.0,
            rotation_offset: 0.0,
            background_color: Color::BLACK,
            source,
            shapes: Vec::new(),
        }
    }
}
