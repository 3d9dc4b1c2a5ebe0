use clap::Parser;
use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};
use locagent::config::Config;
use locagent::lexicon::{SentimentLexicon, ensure_present};

use crate::error::CliResult;
use crate::output::OutputFormat;

#[derive(Parser)]
pub struct LexiconCommand {
    #[clap(long, help = "Download source used when the lexicon file is missing")]
    pub source_url: Option<String>,

    #[clap(help = "Tokens to look up in the lexicon")]
    pub tokens: Vec<String>,
}

impl LexiconCommand {
    pub async fn execute(&self, config: &Config, format: OutputFormat) -> CliResult<()> {
        let mut lexicon_config = config.lexicon.clone();
        if let Some(url) = &self.source_url {
            lexicon_config.source_url = Some(url.clone());
        }

        let path = ensure_present(&lexicon_config).await?;
        let lexicon = SentimentLexicon::load(&path)?;
        let lookups = lookup_tokens(&lexicon, &self.tokens);

        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "path": path.display().to_string(),
                    "entries": lexicon.len(),
                    "valences": lookups
                        .iter()
                        .map(|(token, valence)| {
                            serde_json::json!({"token": token, "valence": valence})
                        })
                        .collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                println!("Lexicon: {}", path.display());
                println!("Entries: {}", lexicon.len());
                if !lookups.is_empty() {
                    let mut table = Table::new();
                    table
                        .load_preset(UTF8_FULL_CONDENSED)
                        .set_header(["Token", "Valence"]);
                    for (token, valence) in &lookups {
                        let valence = valence
                            .map(|v| format!("{v:.2}"))
                            .unwrap_or_else(|| "-".to_string());
                        table.add_row([token.to_string(), valence]);
                    }
                    println!("{table}");
                }
            }
        }

        Ok(())
    }
}

fn lookup_tokens<'a>(
    lexicon: &SentimentLexicon,
    tokens: &'a [String],
) -> Vec<(&'a str, Option<f32>)> {
    tokens
        .iter()
        .map(|token| (token.as_str(), lexicon.valence(token)))
        .collect()
}
