use crate::domain::composite::CompositeResult;
use crate::domain::compositor_trait::Compositor;
use crate::domain::error::DomainError;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

const SEPARATOR_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
const BACKDROP: [u8; 3] = [255, 255, 255];

/// Where a source image lands relative to its target region, in the
/// region's coordinate space. Offsets are zero or negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub draw_width: f64,
    pub draw_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Crop-to-fill: scale uniformly until the region is covered, then center
/// so the overflow is cropped equally from both edges.
pub fn fill_placement(
    width: u32,
    height: u32,
    target_width: u32,
    target_height: u32,
) -> Placement {
    let img_aspect = width as f64 / height as f64;
    let target_aspect = target_width as f64 / target_height as f64;
    let (tw, th) = (target_width as f64, target_height as f64);

    if img_aspect > target_aspect {
        let draw_width = th * img_aspect;
        Placement {
            draw_width,
            draw_height: th,
            offset_x: (tw - draw_width) / 2.0,
            offset_y: 0.0,
        }
    } else {
        let draw_height = tw / img_aspect;
        Placement {
            draw_width: tw,
            draw_height,
            offset_x: 0.0,
            offset_y: (th - draw_height) / 2.0,
        }
    }
}

pub struct RasterCompositor {
    filter: FilterType,
}

impl RasterCompositor {
    pub fn new() -> Self {
        Self {
            filter: FilterType::Triangle,
        }
    }

    /// Crops the visible window out of the source first and scales only
    /// that window, so memory stays bounded by the target size.
    fn fill_region(
        &self,
        source: &DynamicImage,
        target_width: u32,
        target_height: u32,
    ) -> RgbImage {
        let (width, height) = source.dimensions();
        let (window_x, window_y, window_width, window_height) =
            source_window(width, height, target_width, target_height);

        let window = flatten(&source.crop_imm(window_x, window_y, window_width, window_height));
        if (window_width, window_height) == (target_width, target_height) {
            window
        } else {
            imageops::resize(&window, target_width, target_height, self.filter)
        }
    }
}

/// The part of a `width` x `height` source that stays visible after
/// crop-to-fill into the target, as `(x, y, width, height)` in source pixels.
pub fn source_window(
    width: u32,
    height: u32,
    target_width: u32,
    target_height: u32,
) -> (u32, u32, u32, u32) {
    let placement = fill_placement(width, height, target_width, target_height);
    let scale = placement.draw_width / width as f64;

    let window_width = ((target_width as f64 / scale).round() as u32).clamp(1, width);
    let window_height = ((target_height as f64 / scale).round() as u32).clamp(1, height);
    (
        (width - window_width) / 2,
        (height - window_height) / 2,
        window_width,
        window_height,
    )
}

impl Default for RasterCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor for RasterCompositor {
    fn combine(
        &self,
        left: &DynamicImage,
        right: &DynamicImage,
        separator_width: u32,
    ) -> Result<CompositeResult, DomainError> {
        for (name, raster) in [("first", left), ("second", right)] {
            if raster.width() == 0 || raster.height() == 0 {
                return Err(DomainError::InvalidInput(format!(
                    "{} image has zero area ({}x{})",
                    name,
                    raster.width(),
                    raster.height()
                )));
            }
        }

        let total_height = left.height().max(right.height());
        let half_width = left.width().max(right.width());
        let total_width = half_width.checked_mul(2).ok_or_else(|| {
            DomainError::InvalidInput(format!("composite width overflows: 2 x {}", half_width))
        })?;

        let mut canvas = RgbImage::new(total_width, total_height);
        let left_half = self.fill_region(left, half_width, total_height);
        let right_half = self.fill_region(right, half_width, total_height);
        imageops::replace(&mut canvas, &left_half, 0, 0);
        imageops::replace(&mut canvas, &right_half, half_width as i64, 0);

        // Anything wider than the canvas paints the whole canvas.
        let separator_width = separator_width.min(total_width);
        if separator_width > 0 {
            let left_edge = (half_width - separator_width / 2) as i32;
            let rect = Rect::at(left_edge, 0).of_size(separator_width, total_height);
            draw_filled_rect_mut(&mut canvas, rect, SEPARATOR_COLOR);
        }

        tracing::debug!(
            width = total_width,
            height = total_height,
            separator_width,
            "Composited images"
        );
        Ok(CompositeResult::new(canvas))
    }
}

/// Drops alpha by blending each pixel over a white backdrop.
fn flatten(source: &DynamicImage) -> RgbImage {
    if !source.color().has_alpha() {
        return source.to_rgb8();
    }
    let rgba = source.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = a as u32;
        let blend = |c: u8, bg: u8| {
            ((c as u32 * alpha + bg as u32 * (255 - alpha) + 127) / 255) as u8
        };
        Rgb([blend(r, BACKDROP[0]), blend(g, BACKDROP[1]), blend(b, BACKDROP[2])])
    })
}
