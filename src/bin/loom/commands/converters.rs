//! `loom converters` command

use std::path::Path;

use anyhow::Result;

use projection_loom::MappingConfiguration;

pub fn execute(config: Option<&Path>) -> Result<()> {
    let settings = super::settings(config)?;
    let configuration = MappingConfiguration::from_settings(&settings);

    println!("Converters (first match wins):");
    for (i, name) in configuration.profile().names().iter().enumerate() {
        println!("  {}. {}", i + 1, name);
    }

    if !settings.datetime.formats.is_empty() {
        println!();
        println!("Extra datetime formats:");
        for format in &settings.datetime.formats {
            println!("  {}", format);
        }
    }

    Ok(())
}
