//! Android launcher export
//!
//! Writes the rendered icons into an Android `res` directory as density
//! specific mipmaps, plus the `mipmap-anydpi-v26` XML that declares the
//! adaptive icon.

use crate::icon_gen::save;
use anyhow::{Context, Result};
use image::{imageops::FilterType, DynamicImage};
use std::{fs::create_dir_all, path::Path};

/// Legacy square launcher icon sizes
pub const LAUNCHER_DENSITIES: [(&str, u32); 5] = [
    ("mdpi", 48),
    ("hdpi", 72),
    ("xhdpi", 96),
    ("xxhdpi", 144),
    ("xxxhdpi", 192),
];

/// Adaptive icon layer sizes (108dp with a 72dp visible area)
pub const ADAPTIVE_DENSITIES: [(&str, u32); 5] = [
    ("mdpi", 108),
    ("hdpi", 162),
    ("xhdpi", 216),
    ("xxhdpi", 324),
    ("xxxhdpi", 432),
];

const ADAPTIVE_ICON_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<adaptive-icon xmlns:android="http://schemas.android.com/apk/res/android">
    <background android:drawable="@mipmap/ic_launcher_background" />
    <foreground android:drawable="@mipmap/ic_launcher_foreground" />
</adaptive-icon>
"#;

pub fn generate_android_icons(
    icon: &DynamicImage,
    foreground: &DynamicImage,
    background: &DynamicImage,
    res_dir: &Path,
) -> Result<()> {
    println!("Generating Android launcher icons...");

    for (density, size) in LAUNCHER_DENSITIES {
        let resized = icon.resize_exact(size, size, FilterType::Lanczos3);
        save(
            &resized,
            &res_dir.join(format!("mipmap-{density}")).join("ic_launcher.png"),
        )?;
        println!("  ✓ Generated mipmap-{density}/ic_launcher.png");
    }

    println!("Generating Android adaptive icons...");

    // The foreground is drawn with its own safe-zone padding, so it is
    // scaled to the full layer size
    for (density, size) in ADAPTIVE_DENSITIES {
        let mipmap_dir = res_dir.join(format!("mipmap-{density}"));

        let resized = foreground.resize_exact(size, size, FilterType::Lanczos3);
        save(&resized, &mipmap_dir.join("ic_launcher_foreground.png"))?;
        println!("  ✓ Generated mipmap-{density}/ic_launcher_foreground.png");

        let resized = background.resize_exact(size, size, FilterType::Lanczos3);
        save(&resized, &mipmap_dir.join("ic_launcher_background.png"))?;
        println!("  ✓ Generated mipmap-{density}/ic_launcher_background.png");
    }

    write_adaptive_icon_xml(res_dir)
}

/// Round and square launchers share the same layers; the system applies the mask
fn write_adaptive_icon_xml(res_dir: &Path) -> Result<()> {
    let anydpi_dir = res_dir.join("mipmap-anydpi-v26");
    create_dir_all(&anydpi_dir).context("Can't create mipmap-anydpi-v26 directory")?;

    for name in ["ic_launcher.xml", "ic_launcher_round.xml"] {
        std::fs::write(anydpi_dir.join(name), ADAPTIVE_ICON_XML)
            .with_context(|| format!("Failed to write {name}"))?;
        println!("  ✓ Generated mipmap-anydpi-v26/{name}");
    }

    Ok(())
}
