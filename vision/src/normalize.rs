use std::{fs, path::Path};

use image::{
    DynamicImage, GrayImage, Luma,
    imageops::{self, FilterType},
};
use log::debug;

use crate::{
    FeatureVector, Result, VisionErr,
    feature::SIDE,
};

/// Pixels below this intensity become black, the rest white.
pub const THRESHOLD: u8 = 128;

/// Decodes an encoded image container (PNG, JPEG, ...) held in memory.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

/// Reads and decodes the image file at `path`.
pub fn open<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let bytes = fs::read(path)?;
    decode(&bytes)
}

/// Decodes `bytes` and normalizes the resulting image.
pub fn normalize_bytes(bytes: &[u8]) -> Result<FeatureVector> {
    normalize(&decode(bytes)?)
}

/// Turns an arbitrary image into the network's input.
///
/// The image is converted to grayscale, stretched to 28x28 with a Lanczos filter, inverted,
/// binarized at `THRESHOLD` and scaled into `[0, 1]`.
///
/// # Arguments
/// * `image` - The image, any size and color type.
///
/// # Returns
/// The feature vector or `VisionErr::EmptyImage` if the image has no pixels.
pub fn normalize(image: &DynamicImage) -> Result<FeatureVector> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(VisionErr::EmptyImage { width, height });
    }

    let gray = grayscale(image);
    let mut small = imageops::resize(&gray, SIDE, SIDE, FilterType::Lanczos3);
    imageops::invert(&mut small);
    binarize(&mut small);

    debug!("normalized a {width}x{height} {:?} image", image.color());
    Ok(FeatureVector::from_gray(&small))
}

/// Collapses the image into a single luma channel.
///
/// Single channel images keep their luma (dropping alpha). Color images use the ITU-R 601-2
/// weights in 16.16 fixed point, ignoring alpha.
pub fn grayscale(image: &DynamicImage) -> GrayImage {
    match image {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_) => image.to_luma8(),
        _ => {
            let rgb = image.to_rgb8();
            GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                Luma([luma(r, g, b)])
            })
        }
    }
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    let l = u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000;
    (l >> 16) as u8
}

fn binarize(image: &mut GrayImage) {
    image.pixels_mut().for_each(|Luma([v])| {
        *v = if *v < THRESHOLD { 0 } else { 255 };
    });
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    use super::*;
    use crate::feature::LEN;

    fn filled(width: u32, height: u32, v: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([v])))
    }

    #[test]
    fn black_images_become_all_ones() {
        let x = normalize(&filled(28, 28, 0)).unwrap();

        assert_eq!(x.view().len(), LEN);
        assert!(x.view().iter().all(|&v| v == 1.));
    }

    #[test]
    fn white_images_become_all_zeros() {
        let x = normalize(&filled(28, 28, 255)).unwrap();

        assert_eq!(x.view().len(), LEN);
        assert!(x.view().iter().all(|&v| v == 0.));
    }

    #[test]
    fn color_images_are_converted_to_gray() {
        let black = DynamicImage::ImageRgb8(RgbImage::from_pixel(280, 280, Rgb([0, 0, 0])));
        let white = DynamicImage::ImageRgba8(RgbaImage::from_pixel(60, 90, Rgba([255; 4])));

        assert!(normalize(&black).unwrap().view().iter().all(|&v| v == 1.));
        assert!(normalize(&white).unwrap().view().iter().all(|&v| v == 0.));
    }

    #[test]
    fn grayscale_uses_luminance_weights() {
        let mut rgb = RgbImage::new(4, 1);
        rgb.put_pixel(0, 0, Rgb([255, 0, 0]));
        rgb.put_pixel(1, 0, Rgb([0, 255, 0]));
        rgb.put_pixel(2, 0, Rgb([0, 0, 255]));
        rgb.put_pixel(3, 0, Rgb([255, 255, 255]));

        let gray = grayscale(&DynamicImage::ImageRgb8(rgb));

        assert_eq!(gray.as_raw(), &vec![76, 150, 29, 255]);
    }

    #[test]
    fn values_are_binary() {
        let gradient = GrayImage::from_fn(56, 56, |x, y| Luma([((x + y) * 255 / 110) as u8]));
        let x = normalize(&DynamicImage::ImageLuma8(gradient)).unwrap();

        assert!(x.view().iter().all(|&v| v == 0. || v == 1.));
        assert!(x.view().iter().any(|&v| v == 0.));
        assert!(x.view().iter().any(|&v| v == 1.));
    }

    #[test]
    fn pixels_are_flattened_row_by_row() {
        let half = GrayImage::from_fn(28, 28, |x, _| Luma([if x < 14 { 0 } else { 255 }]));
        let x = normalize(&DynamicImage::ImageLuma8(half)).unwrap();
        let column = x.column();

        assert_eq!(column.dim(), (LEN, 1));
        for row in 0..28 {
            for col in 0..10 {
                assert_eq!(column[[row * 28 + col, 0]], 1.);
            }
            for col in 18..28 {
                assert_eq!(column[[row * 28 + col, 0]], 0.);
            }
        }
    }

    #[test]
    fn odd_shapes_are_stretched() {
        for (w, h) in [(1, 1), (1, 500), (300, 7), (29, 28)] {
            let x = normalize(&filled(w, h, 0)).unwrap();

            assert_eq!(x.view().len(), LEN, "{w}x{h}");
        }
    }

    #[test]
    fn empty_images_are_invalid() {
        for (w, h) in [(0, 0), (0, 28), (28, 0)] {
            let err = normalize(&filled(w, h, 0)).unwrap_err();

            assert!(err.is_invalid_image());
            assert!(matches!(err, VisionErr::EmptyImage { .. }));
        }
    }

    #[test]
    fn garbage_bytes_are_invalid() {
        let err = normalize_bytes(b"not an image at all").unwrap_err();

        assert!(err.is_invalid_image());
        assert!(matches!(err, VisionErr::Undecodable(_)));
    }

    #[test]
    fn encoded_images_match_decoded_ones() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_fn(84, 84, |x, y| {
            Luma([if (20..60).contains(&x) && (30..50).contains(&y) { 255 } else { 0 }])
        }));
        let mut png = Cursor::new(Vec::new());
        image.write_to(&mut png, ImageFormat::Png).unwrap();

        let from_bytes = normalize_bytes(png.get_ref()).unwrap();

        assert_eq!(from_bytes, normalize(&image).unwrap());
    }

    #[test]
    fn missing_files_are_io_errors() {
        let err = open("/definitely/not/here.png").unwrap_err();

        assert!(matches!(err, VisionErr::Io(_)));
        assert!(!err.is_invalid_image());
    }
}
