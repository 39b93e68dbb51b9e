//! 2-D wheel geometry for a computed chart.

pub mod generator;
pub mod primitives;
pub mod spec;
pub mod style;

pub use generator::WheelGenerator;
pub use primitives::{Color, LineStyle, Point, Shape, Stroke};
pub use spec::WheelSpec;
pub use style::WheelStyle;
