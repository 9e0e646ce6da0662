mod utils;
mod wheel;

use smart_leds::RGB8;
pub use utils::{rgb_clamped, scale_color};
pub use wheel::wheel;

pub type Rgb = RGB8;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
