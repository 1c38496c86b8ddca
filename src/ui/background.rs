use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, ColorImage, Rect, TextureHandle, pos2};

/// Decode the decorative background image.
pub fn load_image(path: &Path) -> Result<ColorImage> {
    let img = image::open(path)
        .with_context(|| format!("opening background image {}", path.display()))?
        .to_rgba8();
    let size = [img.width() as usize, img.height() as usize];
    log::info!("Loaded background {} ({}x{})", path.display(), size[0], size[1]);
    Ok(ColorImage::from_rgba_unmultiplied(size, img.as_raw()))
}

/// Paint the texture stretched over the whole window, behind every panel.
pub fn paint(ctx: &egui::Context, texture: &TextureHandle) {
    let screen = ctx.screen_rect();
    let painter = ctx.layer_painter(egui::LayerId::background());
    painter.image(
        texture.id(),
        screen,
        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
        Color32::WHITE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_png_into_color_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bg.png");
        image::RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let img = load_image(&path).unwrap();
        assert_eq!(img.size, [4, 3]);
        assert_eq!(img.pixels[0], Color32::from_rgb(10, 20, 30));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_image(&dir.path().join("nope.jpg")).is_err());
    }
}
