use anyhow::{Context, Result};
use badge_check::{badge, logger};

fn main() -> Result<()> {
    logger::init_cli_logger(false);

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| badge::DEFAULT_OUTPUT_PATH.to_string());

    let stats = badge::inspect_badge(&path).with_context(|| format!("Failed to inspect {path}"))?;

    println!("Inspecting badge: {}", path);
    println!("Image dimensions: {}x{}", stats.width, stats.height);
    println!(
        "Alpha channel: {}",
        if stats.has_alpha { "present" } else { "missing" }
    );
    println!(
        "Inscribed circle: center=({}, {}) radius={}",
        stats.circle.center_x, stats.circle.center_y, stats.circle.radius
    );

    match stats.average_luma {
        Some(luma) => println!(
            "Average luma: {:.2} (needs > {})",
            luma,
            badge::HAPPY_LUMA_THRESHOLD
        ),
        None => println!("Average luma: n/a (no pixels)"),
    }

    println!("\nNontransparent pixels: {}", stats.nontransparent_pixels);
    println!("  {} of them outside the circle", stats.pixels_outside_circle);

    if (stats.width, stats.height) == (badge::BADGE_SIZE, badge::BADGE_SIZE) {
        println!("✓ Badge has the expected size");
    } else {
        println!(
            "⚠ Badge should be {}x{}",
            badge::BADGE_SIZE,
            badge::BADGE_SIZE
        );
    }

    Ok(())
}
