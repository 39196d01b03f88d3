use super::layout;
use crate::models::BackgroundFill;
use tiny_skia::{GradientStop, LinearGradient, Paint, Pixmap, Point, Rect, SpreadMode, Transform};

/// Paint the whole pixmap with the configured fill, replacing every pixel.
pub fn paint_background(pixmap: &mut Pixmap, fill: BackgroundFill<'_>) {
    let (width, height) = (pixmap.width(), pixmap.height());

    match fill {
        BackgroundFill::Solid(color) => pixmap.fill(color.to_skia()),
        BackgroundFill::Gradient {
            direction,
            start,
            end,
        } => {
            let vector = layout::gradient_vector(direction, width, height);
            let shader = LinearGradient::new(
                Point::from_xy(vector.x0, vector.y0),
                Point::from_xy(vector.x1, vector.y1),
                vec![
                    GradientStop::new(0.0, start.to_skia()),
                    GradientStop::new(1.0, end.to_skia()),
                ],
                SpreadMode::Pad,
                Transform::identity(),
            );

            // No shader only for invalid stops
            let Some(shader) = shader else {
                pixmap.fill(start.to_skia());
                return;
            };

            let Some(rect) = Rect::from_xywh(0.0, 0.0, width as f32, height as f32) else {
                return;
            };
            // Clear first so translucent stops never blend with a previous frame
            pixmap.fill(tiny_skia::Color::TRANSPARENT);
            let paint = Paint {
                shader,
                anti_alias: false,
                ..Default::default()
            };
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }
}
