use crate::{
    android,
    canvas::{Canvas, Paint, Rect},
};
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use image::{DynamicImage, ImageOutputFormat, Rgb, Rgba};
use std::{
    fs::{create_dir_all, File},
    path::{Path, PathBuf},
    str::FromStr,
};

/// Edge length of both generated icons, in pixels.
pub const ICON_SIZE: u32 = 1024;

/// Below this the badge geometry collapses to a few pixels.
pub const MIN_ICON_SIZE: u32 = 64;

pub const DEFAULT_OUTPUT_DIR: &str = "assets/icons";
pub const MAIN_ICON_FILE: &str = "app_icon.png";
pub const FOREGROUND_ICON_FILE: &str = "app_icon_foreground.png";

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Debug, Parser)]
#[clap(
    name = "daypilot-icon",
    about = "Draw the DayPilot app icon and its adaptive-icon foreground"
)]
pub struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Edge length of the generated icons in pixels.
    #[clap(short, long, value_name = "PX", default_value_t = ICON_SIZE)]
    pub size: u32,

    /// Primary brand color: gradient top, calendar outline and header (CSS color format)
    #[clap(long, value_name = "COLOR", default_value = "#6366f1")]
    pub primary: String,

    /// Secondary brand color: gradient bottom and checkmark (CSS color format)
    #[clap(long, value_name = "COLOR", default_value = "#8b5cf6")]
    pub secondary: String,

    /// Also export Android launcher icons into this `res` directory
    #[clap(long, value_name = "RES_DIR")]
    pub android: Option<PathBuf>,
}

/// The two brand colors every shape is painted with (besides white).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Indigo; gradient top, calendar frame and header.
    pub primary: Rgb<u8>,
    /// Purple; gradient bottom and checkmark.
    pub secondary: Rgb<u8>,
}

impl Palette {
    pub const DAYPILOT: Palette = Palette {
        primary: Rgb([99, 102, 241]),
        secondary: Rgb([139, 92, 246]),
    };

    /// Builds a palette from two CSS color strings
    pub fn parse(primary: &str, secondary: &str) -> Result<Self> {
        Ok(Self {
            primary: parse_color(primary)?,
            secondary: parse_color(secondary)?,
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DAYPILOT
    }
}

fn parse_color(color: &str) -> Result<Rgb<u8>> {
    css_color::Srgb::from_str(color)
        .map(|color| {
            Rgb([
                (color.red * 255.).round() as u8,
                (color.green * 255.).round() as u8,
                (color.blue * 255.).round() as u8,
            ])
        })
        .map_err(|_| anyhow!("Invalid color: {}", color))
}

/// How the calendar frame is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BadgePaint {
    /// Primary-colored outline, stroke width as a fraction of the canvas
    Outline { width_ratio: f64 },
    /// Solid white body
    Filled,
}

/// Fixed proportions of one icon variant. Every length is a fraction of the
/// enclosing measurement, see [`BadgeLayout::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconStyle {
    /// White backing disc, relative to the canvas.
    pub circle_ratio: Option<f64>,
    /// Box the calendar is centred in, relative to the canvas.
    pub icon_ratio: f64,
    /// Calendar side, relative to the icon box.
    pub badge_ratio: f64,
    /// Corner radius, relative to the calendar side.
    pub corner_ratio: f64,
    pub badge: BadgePaint,
    /// Header band height, relative to the calendar side.
    pub header_ratio: f64,
    pub rounded_header: bool,
    /// Checkmark box side, relative to the calendar side.
    pub check_ratio: f64,
    /// Checkmark stroke width, relative to the canvas.
    pub check_width_ratio: f64,
}

pub const MAIN_STYLE: IconStyle = IconStyle {
    circle_ratio: Some(0.7),
    icon_ratio: 0.5,
    badge_ratio: 0.8,
    corner_ratio: 0.1,
    badge: BadgePaint::Outline { width_ratio: 0.04 },
    header_ratio: 0.2,
    rounded_header: false,
    check_ratio: 0.5,
    check_width_ratio: 0.05,
};

// Larger calendar without the disc: the launcher masks the layer itself.
pub const FOREGROUND_STYLE: IconStyle = IconStyle {
    circle_ratio: None,
    icon_ratio: 0.6,
    badge_ratio: 0.9,
    corner_ratio: 0.12,
    badge: BadgePaint::Filled,
    header_ratio: 0.25,
    rounded_header: true,
    check_ratio: 0.5,
    check_width_ratio: 0.06,
};

/// Pixel geometry of an icon variant at a concrete canvas size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeLayout {
    pub circle: Option<Rect>,
    pub badge: Rect,
    pub corner_radius: i32,
    pub outline_width: Option<i32>,
    pub header: Rect,
    pub rounded_header: bool,
    pub checkmark: [(i32, i32); 3],
    pub check_width: i32,
}

impl BadgeLayout {
    pub fn new(size: u32, style: &IconStyle) -> Self {
        let circle = style.circle_ratio.map(|ratio| {
            let circle_size = scale(size, ratio);
            let offset = (size - circle_size) / 2;
            Rect::square(offset as i32, offset as i32, circle_size as i32)
        });

        let icon_size = scale(size, style.icon_ratio);
        let icon_offset = (size - icon_size) / 2;

        let badge_size = scale(icon_size, style.badge_ratio);
        let badge_offset = icon_offset + (icon_size - badge_size) / 2;
        let badge = Rect::square(badge_offset as i32, badge_offset as i32, badge_size as i32);

        let header_height = scale(badge_size, style.header_ratio);
        let header = Rect::new(
            badge.x0,
            badge.y0,
            badge.x1,
            badge.y0 + header_height as i32,
        );

        // Checkmark box centred in the area under the header
        let check_size = scale(badge_size, style.check_ratio);
        let check_x = badge_offset + (badge_size - check_size) / 2;
        let check_y =
            badge_offset + header_height + (badge_size - header_height - check_size) / 2;
        let checkmark = [
            (check_x, check_y + check_size / 2),
            (check_x + check_size / 3, check_y + check_size * 2 / 3),
            (check_x + check_size, check_y + check_size / 4),
        ]
        .map(|(x, y)| (x as i32, y as i32));

        let outline_width = match style.badge {
            BadgePaint::Outline { width_ratio } => Some(scale(size, width_ratio) as i32),
            BadgePaint::Filled => None,
        };

        Self {
            circle,
            badge,
            corner_radius: scale(badge_size, style.corner_ratio) as i32,
            outline_width,
            header,
            rounded_header: style.rounded_header,
            checkmark,
            check_width: scale(size, style.check_width_ratio) as i32,
        }
    }
}

/// Truncating scale, so derived lengths never round up past their container.
fn scale(length: u32, ratio: f64) -> u32 {
    (length as f64 * ratio) as u32
}

fn draw_badge<P: Paint>(canvas: &mut Canvas<P>, layout: &BadgeLayout, palette: &Palette) {
    if let Some(circle) = layout.circle {
        canvas.fill_ellipse(circle, WHITE);
    }

    match layout.outline_width {
        Some(width) => {
            canvas.stroke_rounded_rect(layout.badge, layout.corner_radius, width, palette.primary)
        }
        None => canvas.fill_rounded_rect(layout.badge, layout.corner_radius, WHITE),
    }

    // Calendar header
    if layout.rounded_header {
        canvas.fill_rounded_rect(layout.header, layout.corner_radius, palette.primary);
    } else {
        canvas.fill_rect(layout.header, palette.primary);
    }

    let [start, elbow, end] = layout.checkmark;
    canvas.stroke_line(start, elbow, layout.check_width, palette.secondary);
    canvas.stroke_line(elbow, end, layout.check_width, palette.secondary);
}

/// Draw the opaque app icon with the default size and palette
pub fn render_main_icon() -> DynamicImage {
    render_main_icon_with(ICON_SIZE, &Palette::default())
}

/// Draw the opaque app icon: gradient background, white disc and an
/// outlined calendar with a checkmark
pub fn render_main_icon_with(size: u32, palette: &Palette) -> DynamicImage {
    let mut canvas = Canvas::<Rgb<u8>>::new(size);
    canvas.fill_vertical_gradient(palette.primary, palette.secondary);
    draw_badge(&mut canvas, &BadgeLayout::new(size, &MAIN_STYLE), palette);

    DynamicImage::ImageRgb8(canvas.into_buffer())
}

/// Draw the adaptive icon foreground with the default size and palette
pub fn render_foreground_icon() -> DynamicImage {
    render_foreground_icon_with(ICON_SIZE, &Palette::default())
}

/// Draw the adaptive icon foreground: a filled calendar with a checkmark on
/// a transparent canvas
pub fn render_foreground_icon_with(size: u32, palette: &Palette) -> DynamicImage {
    let mut canvas = Canvas::<Rgba<u8>>::new(size);
    draw_badge(&mut canvas, &BadgeLayout::new(size, &FOREGROUND_STYLE), palette);

    DynamicImage::ImageRgba8(canvas.into_buffer())
}

/// Draw the gradient alone, used as the adaptive icon background layer
pub fn render_background_layer(size: u32, palette: &Palette) -> DynamicImage {
    let mut canvas = Canvas::<Rgb<u8>>::new(size);
    canvas.fill_vertical_gradient(palette.primary, palette.secondary);

    DynamicImage::ImageRgb8(canvas.into_buffer())
}

/// Encode `image` as PNG at `path`, creating missing parent directories and
/// replacing any existing file
pub fn save(image: &DynamicImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)
            .with_context(|| format!("Can't create output directory {}", parent.display()))?;
    }

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    image
        .write_to(&mut file, ImageOutputFormat::Png)
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    Ok(())
}

pub fn generate_icons(args: Args) -> Result<()> {
    // Validate everything up front so a bad flag leaves no files behind
    if args.size < MIN_ICON_SIZE {
        bail!(
            "Icon size must be at least {}px, got {}px",
            MIN_ICON_SIZE,
            args.size
        );
    }
    let palette = Palette::parse(&args.primary, &args.secondary)?;

    println!("🎨 Generating DayPilot app icon...");

    let icon = render_main_icon_with(args.size, &palette);
    let icon_path = args.output.join(MAIN_ICON_FILE);
    save(&icon, &icon_path)?;
    println!("✓ Generated {}", icon_path.display());

    let foreground = render_foreground_icon_with(args.size, &palette);
    let foreground_path = args.output.join(FOREGROUND_ICON_FILE);
    save(&foreground, &foreground_path)?;
    println!("✓ Generated {}", foreground_path.display());

    if let Some(res_dir) = &args.android {
        let background = render_background_layer(args.size, &palette);
        android::generate_android_icons(&icon, &foreground, &background, res_dir)?;
    }

    println!("\n📱 App icons generated successfully!");
    println!("\nNext steps:");
    println!("1. Run: flutter pub add dev:flutter_launcher_icons");
    println!(
        "2. Point flutter_launcher_icons at {} (image_path) and {} (adaptive_icon_foreground)",
        icon_path.display(),
        foreground_path.display()
    );
    println!("3. Run: flutter pub run flutter_launcher_icons");

    Ok(())
}
