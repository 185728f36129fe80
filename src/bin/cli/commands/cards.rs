use anyhow::Result;
use serde_json::json;

use mneme_lib::api::{CardQuery, StudyService};
use mneme_lib::models::{Card, CardType};

use crate::OutputFormat;

pub async fn run(
    service: &impl StudyService,
    card_type: Option<CardType>,
    tags: Vec<String>,
    limit: usize,
    offset: usize,
    format: &OutputFormat,
) -> Result<()> {
    let query = CardQuery {
        limit,
        offset,
        card_type,
        tags: tags.into_iter().collect(),
    };
    let page = service.list_cards(&query).await?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "cards": page.cards,
                    "total": page.total,
                }))?
            );
        }
        OutputFormat::Plain => {
            println!("Showing {} of {} cards", page.cards.len(), page.total);
            for card in &page.cards {
                print_card(card);
            }
        }
    }

    Ok(())
}

pub fn print_card(card: &Card) {
    let due = if card.is_due() { " [due]" } else { "" };
    println!();
    println!("#{} [{}]{} {}", card.id, card.card_type, due, card.front);
    if let Some(back) = card.back.as_deref() {
        if !back.is_empty() {
            println!("    {}", back);
        }
    }
    if !card.tags.is_empty() {
        println!("    tags: {}", card.tags);
    }
    println!(
        "    EF {:.2} | interval {}d | due {}",
        card.ease_factor,
        card.interval_days,
        card.due_at.format("%Y-%m-%d %H:%M")
    );
}
