use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Lighten, Srgb};

// ---------------------------------------------------------------------------
// Category palette
// ---------------------------------------------------------------------------

/// The ten-colour category palette (matplotlib's `tab10`).
pub const TAB10: [Srgb<u8>; 10] = [
    Srgb::new(0x1f, 0x77, 0xb4),
    Srgb::new(0xff, 0x7f, 0x0e),
    Srgb::new(0x2c, 0xa0, 0x2c),
    Srgb::new(0xd6, 0x27, 0x28),
    Srgb::new(0x94, 0x67, 0xbd),
    Srgb::new(0x8c, 0x56, 0x4b),
    Srgb::new(0xe3, 0x77, 0xc2),
    Srgb::new(0x7f, 0x7f, 0x7f),
    Srgb::new(0xbc, 0xbd, 0x22),
    Srgb::new(0x17, 0xbe, 0xcf),
];

/// Years per colour band in the bar chart.
pub const YEARS_PER_BAND: i64 = 5;

/// Palette slot for a bar: years are grouped into five-year bands counted
/// from the earliest year shown, cycling through the palette.
pub fn bar_color_index(year: i32, min_year: i32) -> usize {
    let band = (i64::from(year) - i64::from(min_year)).div_euclid(YEARS_PER_BAND);
    band.rem_euclid(TAB10.len() as i64) as usize
}

pub fn palette_color(index: usize) -> Color32 {
    to_color32(TAB10[index % TAB10.len()])
}

pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

/// Lighter variant used for the element under the pointer.
pub fn highlight(c: Color32) -> Color32 {
    let rgb: Srgb = Srgb::new(c.r(), c.g(), c.b()).into_format();
    let hsl: Hsl = rgb.into_color();
    let lighter: Srgb = hsl.lighten(0.25).into_color();
    let out: Srgb<u8> = lighter.into_format();
    Color32::from_rgb(out.red, out.green, out.blue)
}
