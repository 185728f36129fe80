use anyhow::Result;
use serde_json::json;

use mneme_lib::api::StudyService;

use crate::OutputFormat;

use super::cards::print_card;

pub async fn run(service: &impl StudyService, limit: usize, format: &OutputFormat) -> Result<()> {
    let cards = service.list_due_cards(limit).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "cards": cards }))?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No cards are due for review right now.");
            } else {
                println!("{} card(s) due", cards.len());
                for card in &cards {
                    print_card(card);
                }
            }
        }
    }

    Ok(())
}
