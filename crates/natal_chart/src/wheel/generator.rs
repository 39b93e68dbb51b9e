use crate::angle::normalize;
use crate::aspects::{Aspect, AspectKind};
use crate::bodies::{Body, BodyPosition};
use crate::chart::ChartResult;
use crate::houses::{HouseLabel, Houses};
use crate::wheel::primitives::{LineStyle, Point, Shape, Stroke};
use crate::wheel::spec::WheelSpec;
use crate::wheel::style::WheelStyle;
use crate::zodiac::ALL_SIGNS;

/// Turns a computed chart into wheel geometry.
///
/// Longitude runs counter-clockwise. With houses present the wheel is
/// rotated so the Ascendant sits at 9 o'clock; without them 0° Aries does.
pub struct WheelGenerator {
    style: WheelStyle,
}

impl WheelGenerator {
    pub fn new() -> Self {
        Self::with_style(WheelStyle::default())
    }

    pub fn with_style(style: WheelStyle) -> Self {
        Self { style }
    }

    pub fn generate(&self, chart: &ChartResult, width: f32, height: f32) -> WheelSpec {
        let mut spec = WheelSpec::new(width, height, chart.source);
        spec.background_color = self.style.background_color;
        spec.radius = (width.min(height) / 2.0 - self.style.padding).max(0.0);
        spec.rotation_offset = match &chart.houses {
            Some(houses) => (180.0 - houses.angles.ascendant.longitude) as f32,
            None => 180.0,
        };

        let placer = Placer {
            center: spec.center,
            radius: spec.radius,
            rotation: spec.rotation_offset,
        };

        let mut shapes = self.frame(&placer);
        if let Some(houses) = &chart.houses {
            shapes.extend(self.house_cusps(&placer, houses));
        }
        shapes.extend(self.aspect_lines(&placer, &chart.bodies, &chart.aspects));
        shapes.extend(self.body_markers(&placer, &chart.bodies));
        spec.shapes = shapes;
        spec
    }

    fn stroke(&self, width: f32) -> Stroke {
        Stroke {
            color: self.style.stroke_color,
            width,
        }
    }

    /// Outer circle, inner edge of the sign band, 12 dividers and sign glyphs.
    fn frame(&self, placer: &Placer) -> Vec<Shape> {
        let inner = self.style.sign_band_inner;
        let mut shapes = vec![
            Shape::Circle {
                center: placer.center,
                radius: placer.radius,
                stroke: self.stroke(self.style.stroke_width),
            },
            Shape::Circle {
                center: placer.center,
                radius: placer.radius * inner,
                stroke: self.stroke(self.style.stroke_width),
            },
        ];
        for sign in ALL_SIGNS {
            let start = sign.start_longitude();
            shapes.push(Shape::SignDivider {
                sign_index: sign.index(),
                from: placer.point(start, inner),
                to: placer.point(start, 1.0),
                stroke: self.stroke(self.style.stroke_width),
            });
            shapes.push(Shape::SignLabel {
                sign_index: sign.index(),
                position: placer.point(start + 15.0, (1.0 + inner) / 2.0),
                glyph: sign.glyph(),
                color: self.style.sign_colors[sign.index() as usize],
            });
        }
        shapes
    }

    fn house_cusps(&self, placer: &Placer, houses: &Houses) -> Vec<Shape> {
        houses
            .houses
            .iter()
            .map(|cusp| {
                let is_angle = matches!(
                    cusp.name,
                    HouseLabel::Asc | HouseLabel::IC | HouseLabel::Desc | HouseLabel::MC
                );
                let width = if is_angle {
                    self.style.stroke_width * 2.0
                } else {
                    self.style.stroke_width
                };
                Shape::HouseCusp {
                    house_num: cusp.number,
                    from: placer.point(cusp.longitude, 0.0),
                    to: placer.point(cusp.longitude, self.style.sign_band_inner),
                    stroke: self.stroke(width),
                }
            })
            .collect()
    }

    fn body_markers(&self, placer: &Placer, bodies: &[BodyPosition]) -> Vec<Shape> {
        bodies
            .iter()
            .map(|body| Shape::BodyMarker {
                body: body.name.name().to_string(),
                center: placer.point(body.longitude, self.style.body_ring),
                glyph: body.name.glyph(),
                color: if body.retrograde {
                    self.style.retrograde_color
                } else {
                    self.style.direct_color
                },
                retrograde: body.retrograde,
            })
            .collect()
    }

    fn aspect_lines(&self, placer: &Placer, bodies: &[BodyPosition], aspects: &[Aspect]) -> Vec<Shape> {
        let longitude_of = |body: Body| bodies.iter().find(|b| b.name == body).map(|b| b.longitude);
        aspects
            .iter()
            .filter_map(|aspect| {
                let from = longitude_of(aspect.body_a)?;
                let to = longitude_of(aspect.body_b)?;
                let style = match aspect.kind {
                    AspectKind::Square | AspectKind::Opposition => LineStyle::Solid,
                    _ => LineStyle::Dashed,
                };
                Some(Shape::AspectLine {
                    from: placer.point(from, self.style.aspect_ring),
                    to: placer.point(to, self.style.aspect_ring),
                    aspect_type: aspect.kind.name().to_lowercase(),
                    color: self.style.aspect_color(aspect.kind),
                    width: self.style.aspect_width,
                    style,
                })
            })
            .collect()
    }
}

impl Default for WheelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Polar placement of longitudes around the wheel center.
struct Placer {
    center: Point,
    radius: f32,
    rotation: f32,
}

impl Placer {
    /// `fraction` is a share of the outer radius.
    fn point(&self, longitude: f64, fraction: f32) -> Point {
        let angle = normalize(longitude + self.rotation as f64).to_radians();
        let r = (self.radius * fraction) as f64;
        Point {
            x: self.center.x + (r * angle.cos()) as f32,
            y: self.center.y - (r * angle.sin()) as f32,
        }
    }
}
