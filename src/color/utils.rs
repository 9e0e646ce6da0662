use crate::{color::Rgb, math8::scale8};

/// Build a color from wide channel values, clamping each into `0..=255`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn rgb_clamped(r: i32, g: i32, b: i32) -> Rgb {
    const fn clamp(v: i32) -> u8 {
        if v < 0 {
            0
        } else if v > 255 {
            255
        } else {
            v as u8
        }
    }
    Rgb {
        r: clamp(r),
        g: clamp(g),
        b: clamp(b),
    }
}

/// Scale every channel by `level` (255 keeps the color unchanged)
#[inline]
pub const fn scale_color(color: Rgb, level: u8) -> Rgb {
    if level == 255 {
        return color;
    }
    Rgb {
        r: scale8(color.r, level),
        g: scale8(color.g, level),
        b: scale8(color.b, level),
    }
}
