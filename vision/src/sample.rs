use image::{GrayImage, Luma};

use crate::{Result, VisionErr};

/// Side of the canvas sample digits are drawn on, ten times the network's input.
pub const CANVAS: u32 = 280;

/// The seven strokes of a digit as `(x, y, width, height)` rectangles, in the order
/// top, top right, bottom right, bottom, bottom left, top left, middle.
const SEGMENTS: [(u32, u32, u32, u32); 7] = [
    (90, 40, 100, 20),
    (170, 40, 20, 100),
    (170, 140, 20, 100),
    (90, 220, 100, 20),
    (90, 140, 20, 100),
    (90, 40, 20, 100),
    (90, 130, 100, 20),
];

/// Which segments light up for each digit, bit `i` standing for `SEGMENTS[i]`.
const DIGITS: [u8; 10] = [
    0b011_1111, // 0
    0b000_0110, // 1
    0b101_1011, // 2
    0b100_1111, // 3
    0b110_0110, // 4
    0b110_1101, // 5
    0b111_1101, // 6
    0b000_0111, // 7
    0b111_1111, // 8
    0b110_1111, // 9
];

/// Draws `digit` in white on a black `CANVAS`x`CANVAS` grayscale image, the way a user would
/// draw it on the canvas of the web front end.
///
/// # Returns
/// The image or `VisionErr::InvalidDigit` if `digit` is not in `0..=9`.
pub fn sample_image(digit: u8) -> Result<GrayImage> {
    let mask = *DIGITS
        .get(usize::from(digit))
        .ok_or(VisionErr::InvalidDigit(digit))?;

    let lit: Vec<_> = SEGMENTS
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, segment)| *segment)
        .collect();

    Ok(GrayImage::from_fn(CANVAS, CANVAS, |x, y| {
        let inside = lit
            .iter()
            .any(|&(sx, sy, w, h)| (sx..sx + w).contains(&x) && (sy..sy + h).contains(&y));

        Luma([if inside { 255 } else { 0 }])
    }))
}
