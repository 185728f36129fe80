use anyhow::{bail, Result};

use mneme_lib::api::StudyService;
use mneme_lib::models::TagSet;

use crate::OutputFormat;

pub async fn run(
    service: &impl StudyService,
    content: Option<&str>,
    tags: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let content = match content {
        Some(content) => content,
        None => bail!("no entry content provided (pass text, or pipe via stdin)"),
    };

    let tags = TagSet::parse(tags.unwrap_or(""));
    let entry = service.create_entry(content, &tags).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        OutputFormat::Plain => {
            println!("Created entry #{}", entry.id);
            if !entry.tags.is_empty() {
                println!("    tags: {}", entry.tags);
            }
        }
    }

    Ok(())
}
