use anyhow::Result;
use serde_json::json;

use mneme_lib::api::StudyService;

use crate::OutputFormat;

pub async fn run(
    service: &impl StudyService,
    tags: Vec<String>,
    limit: usize,
    offset: usize,
    format: &OutputFormat,
) -> Result<()> {
    let tags = tags.into_iter().collect();
    let page = service.list_entries(limit, offset, &tags).await?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "entries": page.entries,
                    "total": page.total,
                }))?
            );
        }
        OutputFormat::Plain => {
            println!("Showing {} of {} entries", page.entries.len(), page.total);
            for entry in &page.entries {
                println!();
                println!("#{} {}", entry.id, entry.created_at.format("%Y-%m-%d %H:%M"));
                println!("    {}", entry.content);
                if !entry.tags.is_empty() {
                    println!("    tags: {}", entry.tags);
                }
            }
        }
    }

    Ok(())
}
