//! Providers command - list tile providers and map styles.

use tilemosaic::config::ConfigFile;
use tilemosaic::provider::{MapStyle, ProviderTemplate};

use crate::error::CliError;

/// Run the providers command.
pub fn run() -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    let table = config
        .provider_table()
        .map_err(|e| CliError::Config(e.to_string()))?;

    println!("Tile Providers");
    println!("==============");
    println!();

    for provider in table.iter() {
        let marker = if provider.name == config.provider.name {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<14} max zoom {:>2}{}",
            marker,
            provider.name,
            provider.max_zoom,
            notes(provider)
        );
        println!("    {}", display_template(provider));
    }

    println!();
    println!("Map styles (--style):");
    for style in MapStyle::ALL {
        let marker = if style == config.provider.style { "*" } else { " " };
        println!("{} {}  {}", marker, style.code(), style.description());
    }

    println!();
    println!("* = default from config.ini");
    Ok(())
}

fn notes(provider: &ProviderTemplate) -> &'static str {
    if provider.datum_offset {
        "  (regional datum offset corrected)"
    } else {
        ""
    }
}

fn display_template(provider: &ProviderTemplate) -> &str {
    if provider.template.is_empty() {
        "(uses the default provider's template)"
    } else {
        &provider.template
    }
}
