//! Reverse routing command

use super::load_table;
use crate::config::DeskConfigLoader;
use anyhow::{anyhow, Result};
use clinic_desk_core::{PageId, PathParams};
use tracing::info;

/// Parse `name=value` pairs given on the command line
fn parse_params(pairs: &[String]) -> Result<PathParams> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .ok_or_else(|| anyhow!("Expected NAME=VALUE, got '{}'", pair))
        })
        .collect()
}

/// Print the concrete URL path of a page
pub async fn href_command(
    page: String,
    params: Vec<String>,
    config_loader: DeskConfigLoader,
) -> Result<()> {
    info!("Building link for {}", page);

    let page_id = PageId::from_name(&page).ok_or_else(|| {
        let known: Vec<_> = PageId::ALL.iter().map(|p| p.as_str()).collect();
        anyhow!("Unknown page '{}'. Known pages: {}", page, known.join(", "))
    })?;
    let params = parse_params(&params)?;

    let (_, table) = load_table(&config_loader).await?;
    println!("{}", table.href(page_id, &params)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        let params = parse_params(&["blogId=42".to_string()]).unwrap();
        assert_eq!(params.get("blogId"), Some("42"));

        assert!(parse_params(&["blogId".to_string()]).is_err());
        assert!(parse_params(&[]).unwrap().is_empty());
    }
}
