use crate::consts::{MIN_FONT_SIZE, TEXT_ASCENT, TEXT_LINE_HEIGHT};
use crate::element::TextBlock;
use crate::geometry::{BoundingBox, Point};
use crate::metrics::{FontSpec, TextMetrics};

use super::ElementHandler;

/// Text blocks: a single anchor point plus a font size.
pub struct TextHandler;

impl ElementHandler for TextHandler {
    type Data = TextBlock;

    fn translate(data: &mut TextBlock, dx: f64, dy: f64) {
        data.x += dx;
        data.y += dy;
    }

    fn scale(data: &mut TextBlock, scale_x: f64, scale_y: f64, center: Point) {
        data.font_size = (data.font_size * scale_x.max(scale_y)).max(MIN_FONT_SIZE);
        let p = Point::new(data.x, data.y).scale_about(center, scale_x, scale_y);
        data.x = p.x;
        data.y = p.y;
    }

    fn rotate(data: &mut TextBlock, angle: f64, pivot: Point) {
        let p = Point::new(data.x, data.y).rotate_about(pivot, angle);
        data.x = p.x;
        data.y = p.y;
        data.rotation += angle;
    }

    /// Widest line by `width`, `lines * font_size * 1.25` tall, lifted by
    /// `0.75 * font_size` so the box starts near the cap height.
    fn bounding_box(data: &TextBlock, metrics: &dyn TextMetrics) -> Option<BoundingBox> {
        let font = FontSpec::of(data);
        let mut width: f64 = 0.0;
        let mut lines = 0_u32;
        for line in data.text.split('\n') {
            width = width.max(metrics.measure_text_width(line, &font));
            lines += 1;
        }
        Some(BoundingBox::new(
            data.x,
            data.y - data.font_size * TEXT_ASCENT,
            width,
            f64::from(lines) * data.font_size * TEXT_LINE_HEIGHT,
        ))
    }
}
