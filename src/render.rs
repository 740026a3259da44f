use image::ImageBuffer;
use image::Rgb;
use rayon::prelude::*;

use crate::session::PlaneView;

pub const CROSSHAIR_COLOR: [u8; 3] = [255, 200, 0];

// Full u16 range, no windowing.
#[inline]
fn normalize_to_u8(value: u16) -> u8 {
    ((value as f32 / 65535.0) * 255.0).clamp(0.0, 255.0) as u8
}

/// Renders a displayed plane with its crosshair burned in.
///
/// Image x follows the slice's first axis and image y its second, so the
/// picture matches the coordinates clicks are reported in.
pub fn plane_to_image(view: &PlaneView<u16>) -> Option<ImageBuffer<Rgb<u8>, Vec<u8>>> {
    let (width, height) = view.slice.dim();
    let crosshair = view.crosshair;

    let pixel_data: Vec<u8> = (0..height)
        .into_par_iter()
        .flat_map(|y| {
            (0..width)
                .flat_map(|x| {
                    if x == crosshair.vertical || y == crosshair.horizontal {
                        CROSSHAIR_COLOR
                    } else {
                        let gray = normalize_to_u8(view.slice[[x, y]]);
                        [gray; 3]
                    }
                })
                .collect::<Vec<u8>>()
        })
        .collect();

    ImageBuffer::from_raw(width as u32, height as u32, pixel_data)
}
