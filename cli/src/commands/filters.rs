//! Filter option listing command

use anyhow::Result;
use clinic_desk_core::{list_options, FilterDomain};
use colored::Colorize;
use tracing::info;

/// Show the filter options of a domain in display order
pub async fn filters_command(domain: String, json: bool) -> Result<()> {
    info!("Listing filter options for {}", domain);

    let options: Vec<_> = list_options(&domain).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    if options.is_empty() {
        let known: Vec<_> = FilterDomain::ALL.iter().map(|d| d.as_str()).collect();
        println!(
            "🔎 No filter options for '{}' (known domains: {})",
            domain,
            known.join(", ")
        );
        return Ok(());
    }

    println!("🔎 Filters for {}\n", domain.bold());
    for option in options {
        println!(
            "  [{}] {} {}",
            option.icon.name().cyan(),
            option.label.bold(),
            format!("({})", option.value).dimmed()
        );
    }

    Ok(())
}
