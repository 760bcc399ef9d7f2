//! End-to-end tests for the conversion pipeline.
//!
//! Each test runs `convert` or `convert_to_canvas` from raw image to text
//! with a deterministic glyph raster.

mod common;

use common::{gradient, strip_ansi, StubRaster, RAMP};
use glyphcast::ascii::{convert, convert_to_canvas, ConvertOptions, TargetSize};
use glyphcast::Error;
use image::{Rgb, RgbImage};

fn options() -> ConvertOptions {
    ConvertOptions {
        charset: RAMP.to_string(),
        sort_chars: true,
        fix_scaling: false,
        ..ConvertOptions::default()
    }
}

fn ramp_index(ch: char) -> usize {
    RAMP.chars().position(|c| c == ch).unwrap()
}

#[test]
fn test_solid_black_two_by_two() {
    let image = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
    let options = ConvertOptions {
        charset: " #".to_string(),
        ..options()
    };
    assert_eq!(convert(&image, &StubRaster, &options).unwrap(), "##\n##");
}

#[test]
fn test_output_grid_matches_target_size() {
    let image = gradient(64, 64);
    let options = ConvertOptions {
        size: TargetSize::Exact {
            width: 37,
            height: 11,
        },
        ..options()
    };

    for colorful in [false, true] {
        let options = ConvertOptions {
            colorful,
            ..options.clone()
        };
        let text = convert(&image, &StubRaster, &options).unwrap();
        let plain = strip_ansi(&text);
        let rows: Vec<&str> = plain.split('\n').collect();
        assert_eq!(rows.len(), 11);
        assert!(rows.iter().all(|r| r.chars().count() == 37));
    }
}

#[test]
fn test_native_size_is_preserved() {
    let image = gradient(23, 17);
    let canvas = convert_to_canvas(&image, &StubRaster, &options()).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (23, 17));
}

#[test]
fn test_fix_scaling_halves_rows() {
    let image = gradient(100, 100);
    let options = ConvertOptions {
        fix_scaling: true,
        ..options()
    };
    let canvas = convert_to_canvas(&image, &StubRaster, &options).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (100, 50));
}

#[test]
fn test_scale_applies_to_both_axes() {
    let image = gradient(40, 20);
    let options = ConvertOptions {
        scale: 0.5,
        fix_scaling: true,
        ..options()
    };
    let canvas = convert_to_canvas(&image, &StubRaster, &options).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (20, 5));
}

#[test]
fn test_pipeline_is_idempotent() {
    let image = RgbImage::from_fn(31, 19, |x, y| Rgb([(x * 8) as u8, (y * 13) as u8, 77]));
    let options = ConvertOptions {
        colorful: true,
        sharpness: 2.0,
        brightness: 0.8,
        fix_scaling: true,
        ..options()
    };
    let first = convert(&image, &StubRaster, &options).unwrap();
    let second = convert(&image, &StubRaster, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_inverted_brighter_pixels_get_heavier_glyphs() {
    let image = gradient(200, 1);
    let options = ConvertOptions {
        invert: true,
        ..options()
    };
    let text = convert(&image, &StubRaster, &options).unwrap();
    let levels: Vec<usize> = text.chars().map(ramp_index).collect();
    assert!(levels.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(levels.first(), Some(&0));
    assert_eq!(levels.last(), Some(&9));
}

#[test]
fn test_default_darker_pixels_get_heavier_glyphs() {
    let image = gradient(200, 1);
    let text = convert(&image, &StubRaster, &options()).unwrap();
    let levels: Vec<usize> = text.chars().map(ramp_index).collect();
    assert!(levels.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(text.chars().next(), Some('@'));
    assert_eq!(text.chars().last(), Some(' '));
}

#[test]
fn test_colored_output_carries_source_colors() {
    let colors = [
        Rgb([255, 0, 0]),
        Rgb([0, 255, 0]),
        Rgb([0, 0, 255]),
        Rgb([17, 99, 201]),
    ];
    let image = RgbImage::from_fn(4, 1, |x, _| colors[x as usize]);
    let options = ConvertOptions {
        colorful: true,
        ..options()
    };
    let canvas = convert_to_canvas(&image, &StubRaster, &options).unwrap();
    let text = convert(&image, &StubRaster, &options).unwrap();

    let mut rest = text.as_str();
    for (x, color) in colors.iter().enumerate() {
        let cell = canvas.get(x as u32, 0).unwrap();
        assert_eq!(cell.color, *color);
        let expected = format!(
            "\x1b[38;2;{};{};{}m{}\x1b[0m",
            color[0], color[1], color[2], cell.ch
        );
        assert!(rest.starts_with(&expected), "cell {} in {:?}", x, text);
        rest = &rest[expected.len()..];
    }
    assert!(rest.is_empty());
}

#[test]
fn test_empty_charset_is_rejected() {
    let image = gradient(4, 4);
    for charset in ["", "\n\t\r", "   ", " \u{3000} "] {
        let options = ConvertOptions {
            charset: charset.to_string(),
            ..options()
        };
        let result = convert(&image, &StubRaster, &options);
        assert!(
            matches!(result, Err(Error::Configuration(_))),
            "{:?} should be rejected",
            charset
        );
    }
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let image = gradient(4, 4);
    let bad = [
        ConvertOptions {
            scale: 0.0,
            ..options()
        },
        ConvertOptions {
            scale: -1.0,
            ..options()
        },
        ConvertOptions {
            size: TargetSize::Exact {
                width: 10,
                height: 0,
            },
            ..options()
        },
        ConvertOptions {
            brightness: -1.0,
            ..options()
        },
    ];
    for options in bad {
        let result = convert(&image, &StubRaster, &options);
        assert!(matches!(result, Err(Error::Validation(_))), "{:?}", options);
    }
}

#[test]
fn test_unrenderable_glyph_scores_zero_and_still_converts() {
    // StubRaster has no glyph for 'Z', so it profiles as blank paper
    let image = RgbImage::from_fn(2, 1, |x, _| {
        if x == 0 {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    });
    let options = ConvertOptions {
        charset: "Z#".to_string(),
        ..options()
    };
    assert_eq!(convert(&image, &StubRaster, &options).unwrap(), "Z#");
}

#[test]
fn test_unsorted_charset_still_picks_closest() {
    let image = RgbImage::from_pixel(3, 1, Rgb([0, 0, 0]));
    let options = ConvertOptions {
        charset: "@ .".to_string(),
        sort_chars: false,
        ..options()
    };
    assert_eq!(convert(&image, &StubRaster, &options).unwrap(), "@@@");
}
