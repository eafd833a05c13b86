#![allow(dead_code)]

use fingermatch::image::io::save_gray_image;
use fingermatch::FingerprintImage;
use std::path::Path;

pub const BACKGROUND: u8 = 20;
pub const RIDGE: u8 = 220;

/// Paints every pixel of a `width x height` canvas for which `inside` holds.
pub fn draw(width: usize, height: usize, inside: impl Fn(i64, i64) -> bool) -> FingerprintImage {
    let mut img = FingerprintImage::filled(width, height, BACKGROUND).unwrap();
    for y in 0..height {
        for x in 0..width {
            if inside(x as i64, y as i64) {
                img.set(x, y, RIDGE);
            }
        }
    }
    img
}

/// 16x16 square at (10, 10) with two opposite corners cut at 45 degrees.
///
/// Its outer boundary has 6 corners enclosing exactly 200 square pixels.
pub fn hexagon() -> FingerprintImage {
    draw(48, 48, |x, y| {
        (10..=25).contains(&x) && (10..=25).contains(&y) && x + y >= 25 && x + y <= 45
    })
}

pub fn hexagon_corners() -> Vec<(u32, u32)> {
    let mut corners = vec![(15, 10), (25, 10), (25, 20), (20, 25), (10, 25), (10, 15)];
    corners.sort();
    corners
}

/// Square at (10, 10) with all four corners cut: 8 boundary corners.
pub fn octagon() -> FingerprintImage {
    draw(56, 56, |x, y| {
        (10..=40).contains(&x)
            && (10..=40).contains(&y)
            && x + y >= 25
            && x + y <= 75
            && x - y <= 25
            && y - x <= 25
    })
}

/// A few specks, each well under the 50 square pixel cutoff.
pub fn specks() -> FingerprintImage {
    draw(40, 40, |x, y| {
        let speck = |x0: i64, y0: i64, w: i64, h: i64| {
            (x0..x0 + w).contains(&x) && (y0..y0 + h).contains(&y)
        };
        speck(3, 3, 3, 3) || speck(15, 20, 6, 5) || speck(30, 8, 2, 7) || (x == 35 && y == 35)
    })
}

pub fn write_png(dir: &Path, name: &str, img: &FingerprintImage) {
    save_gray_image(img, dir.join(name)).unwrap();
}
