use clap::Parser;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use locagent::analyzer::{NO_HISTORY, PreferenceSummary};
use locagent::toolbox::InteractionTool;

use crate::error::CliResult;
use crate::output::{OutputFormat, format_percent};

#[derive(Parser)]
pub struct AnalyzeCommand {
    #[clap(long, short, help = "Resident (user) ID to analyze")]
    pub user: String,

    #[clap(long, default_value = "5", help = "Number of top categories to show")]
    pub top: usize,
}

impl AnalyzeCommand {
    pub fn execute(&self, toolbox: &dyn InteractionTool, format: OutputFormat) -> CliResult<()> {
        let reviews = toolbox.get_reviews(Some(&self.user), None);

        let Some(summary) = PreferenceSummary::from_reviews(&reviews) else {
            match format {
                OutputFormat::Json => {
                    let output = serde_json::json!({
                        "user_id": &self.user,
                        "review_count": 0,
                        "summary": NO_HISTORY,
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Table => println!("{NO_HISTORY}"),
            }
            return Ok(());
        };

        let top = summary.top_categories(self.top);

        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "user_id": &self.user,
                    "review_count": summary.review_count,
                    "average_rating": summary.average_rating,
                    "positive_ratio": summary.positive_ratio,
                    "matched_categories": summary
                        .matched_categories
                        .iter()
                        .map(|c| c.label())
                        .collect::<Vec<_>>(),
                    "top_categories": top
                        .iter()
                        .map(|(c, hits)| serde_json::json!({"category": c.label(), "count": hits}))
                        .collect::<Vec<_>>(),
                    "summary": summary.render(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL_CONDENSED)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(["Property", "Value"]);

                table.add_row(["Resident".to_string(), self.user.clone()]);
                table.add_row(["Reviews".to_string(), summary.review_count.to_string()]);
                table.add_row([
                    "Average rating".to_string(),
                    format!("{:.1}", summary.average_rating),
                ]);
                table.add_row(["Positive".to_string(), format_percent(summary.positive_ratio)]);
                for (category, hits) in &top {
                    table.add_row([category.label().to_string(), hits.to_string()]);
                }

                println!("{table}");
            }
        }

        Ok(())
    }
}
