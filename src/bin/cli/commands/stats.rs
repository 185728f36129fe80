use anyhow::Result;

use mneme_lib::api::StudyService;

use crate::OutputFormat;

pub async fn run(service: &impl StudyService, format: &OutputFormat) -> Result<()> {
    let stats = service.get_stats().await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            println!("Entries:           {}", stats.total_entries);
            println!("Cards:             {}", stats.total_cards);
            println!("Due today:         {}", stats.due_today);
            println!("Reviews this week: {}", stats.reviews_this_week);
        }
    }

    Ok(())
}
