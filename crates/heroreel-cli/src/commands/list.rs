use anyhow::Result;

use heroreel_core::counter::format_grouped;
use heroreel_core::AppConfig;
use heroreel_tui::themes::available_themes;

pub fn run(config: &AppConfig) -> Result<()> {
    if config.slides.is_empty() {
        println!("No slides configured.");
        println!("\nTo write a config with sample slides, run:");
        println!("  heroreel init");
    } else {
        println!("Slides ({}):\n", config.slides.len());
        for (index, slide) in config.slides.iter().enumerate() {
            println!("  {}. {}", index + 1, slide.title);
            if !slide.subtitle.is_empty() {
                println!("     {}", slide.subtitle);
            }
            if let Some(ref cta) = slide.cta {
                println!("     [{}]", cta);
            }
        }
        println!();
    }

    if !config.stats.is_empty() {
        println!("Stats:");
        for stat in &config.stats {
            println!(
                "  {:>10}{}  {}",
                format_grouped(stat.value, config.ui.thousands_separator),
                stat.suffix,
                stat.label
            );
        }
        println!();
    }

    // Timing and swipe settings, as they would appear in the config file
    println!("[carousel]");
    print!("{}", toml::to_string_pretty(&config.carousel)?);
    println!(
        "\ntheme = \"{}\" (available: {})",
        config.ui.theme.name,
        available_themes().join(", ")
    );

    Ok(())
}
