use anyhow::Result;

use mneme_lib::api::StudyService;

use crate::OutputFormat;

pub async fn run(service: &impl StudyService, id: i64, format: &OutputFormat) -> Result<()> {
    let entry = service.get_entry(id).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        OutputFormat::Plain => {
            println!("#{} {}", entry.id, entry.created_at.format("%Y-%m-%d %H:%M"));
            println!("{}", entry.content);
            if !entry.tags.is_empty() {
                println!("tags: {}", entry.tags);
            }
        }
    }

    Ok(())
}
