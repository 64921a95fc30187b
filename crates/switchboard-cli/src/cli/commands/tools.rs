//! Tools command handler.

use anyhow::{Result, bail};
use switchboard_types::ToolCategory;

pub fn list(category: Option<&str>) -> Result<()> {
    let categories = match category {
        Some(name) => match ToolCategory::parse(name) {
            Some(category) => vec![category],
            None => {
                let known: Vec<_> = ToolCategory::ALL.iter().map(|c| c.as_str()).collect();
                bail!("Unknown category '{name}' (expected one of: {})", known.join(", "));
            }
        },
        None => ToolCategory::ALL.to_vec(),
    };

    for category in categories {
        println!("{category} ({})", category.tools().len());
        for tool in category.tools() {
            println!("  {tool}");
        }
    }
    Ok(())
}
