use anyhow::{Context, Result};
use daypilot_icon::icon_gen::{
    Palette, DEFAULT_OUTPUT_DIR, FOREGROUND_ICON_FILE, ICON_SIZE, MAIN_ICON_FILE,
};
use image::{ColorType, Rgb};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    check_main_icon(&dir.join(MAIN_ICON_FILE))?;
    println!();
    check_foreground(&dir.join(FOREGROUND_ICON_FILE))?;

    Ok(())
}

fn check_main_icon(path: &Path) -> Result<()> {
    let img = image::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let rgb_img = img.to_rgb8();
    let (width, height) = (img.width(), img.height());

    println!("Checking app icon: {}", path.display());
    println!("  Dimensions: {}x{}, color type: {:?}", width, height, img.color());

    // Gradient endpoints live in the first and last rows, away from the badge
    let top = *rgb_img.get_pixel(0, 0);
    let bottom = *rgb_img.get_pixel(0, height - 1);
    println!("  Top row:    RGB {:?}", top.0);
    println!("  Bottom row: RGB {:?}", bottom.0);

    let palette = Palette::default();
    report(width == ICON_SIZE && height == ICON_SIZE, "expected dimensions");
    report(img.color() == ColorType::Rgb8, "opaque RGB");
    report(
        close_to(top, palette.primary) && close_to(bottom, palette.secondary),
        "gradient endpoints match the default palette",
    );

    Ok(())
}

fn check_foreground(path: &Path) -> Result<()> {
    let img = image::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let rgba_img = img.to_rgba8();
    let (width, height) = (img.width(), img.height());

    println!("Checking foreground: {}", path.display());
    println!("  Dimensions: {}x{}, color type: {:?}", width, height, img.color());

    let corners = [(0, 0), (width - 1, 0), (0, height - 1), (width - 1, height - 1)];
    let alphas = corners.map(|(x, y)| rgba_img.get_pixel(x, y)[3]);
    println!("  Corner alphas: {:?}", alphas);

    report(width == ICON_SIZE && height == ICON_SIZE, "expected dimensions");
    report(img.color() == ColorType::Rgba8, "RGBA");
    report(alphas.iter().all(|&a| a == 0), "transparent corners");

    Ok(())
}

fn close_to(actual: Rgb<u8>, expected: Rgb<u8>) -> bool {
    actual
        .0
        .iter()
        .zip(expected.0.iter())
        .all(|(&a, &e)| a.abs_diff(e) <= 1)
}

fn report(ok: bool, what: &str) {
    if ok {
        println!("  ✓ {}", what);
    } else {
        println!("  ⚠ not {}", what);
    }
}
