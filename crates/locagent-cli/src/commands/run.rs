use clap::Parser;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use locagent::{AgentError, LocationBehaviorAgent};
use locagent::agent::TaskOutput;
use locagent::config::Config;
use locagent::llm::{LanguageModel, RemoteLlm};
use locagent::toolbox::{InMemoryToolbox, InteractionTool};

use crate::error::CliResult;
use crate::output::{OutputFormat, truncate_string};

#[derive(Parser)]
pub struct RunCommand {
    #[clap(
        long,
        short,
        help = "Task context JSON file (one object or an array of objects)"
    )]
    pub task: PathBuf,
}

impl RunCommand {
    pub async fn execute(
        &self,
        config: &Config,
        toolbox: Arc<InMemoryToolbox>,
        format: OutputFormat,
    ) -> CliResult<()> {
        let content = std::fs::read_to_string(&self.task)
            .map_err(|e| format!("Failed to read task file {}: {e}", self.task.display()))?;
        let contexts = match serde_json::from_str::<Value>(&content)? {
            Value::Array(items) => items,
            single => vec![single],
        };

        let llm: Arc<dyn LanguageModel> = Arc::new(RemoteLlm::new(&config.llm)?);
        let agent = LocationBehaviorAgent::new(toolbox.clone(), llm, config.agent.clone());

        let results = run_tasks(&agent, contexts).await;
        let failed = results.iter().filter(|r| r.is_err()).count();

        match format {
            OutputFormat::Json => {
                let mut values: Vec<Value> = results.iter().map(result_json).collect();
                let output = if values.len() == 1 {
                    values.remove(0)
                } else {
                    Value::Array(values)
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                for (index, result) in results.iter().enumerate() {
                    match result {
                        Ok(output) => println!("{}", render_table(output, toolbox.as_ref())),
                        Err(e) => println!("Task {} failed: {e}", index + 1),
                    }
                }
            }
        }

        if failed > 0 {
            return Err(format!("{failed} of {} tasks failed", results.len()).into());
        }
        Ok(())
    }
}

/// Run every task in order; a failed task does not stop the rest
async fn run_tasks(
    agent: &LocationBehaviorAgent,
    contexts: Vec<Value>,
) -> Vec<Result<TaskOutput, AgentError>> {
    let mut results = Vec::with_capacity(contexts.len());
    for context in contexts {
        let result = agent.forward_context(context).await;
        if let Err(e) = &result {
            tracing::error!("Task {} failed: {}", results.len() + 1, e);
        }
        results.push(result);
    }
    results
}

fn result_json(result: &Result<TaskOutput, AgentError>) -> Value {
    match result {
        Ok(output) => serde_json::to_value(output).unwrap_or(Value::Null),
        Err(e) => serde_json::json!({ "error": e.to_string() }),
    }
}

fn render_table(output: &TaskOutput, toolbox: &dyn InteractionTool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    match output {
        TaskOutput::Recommendation(result) => {
            table.set_header(["Rank", "ID", "Name"]);
            for (rank, id) in result.item_list.iter().enumerate() {
                let name = toolbox
                    .get_item(id)
                    .and_then(|l| l.name)
                    .unwrap_or_else(|| "-".to_string());
                table.add_row([(rank + 1).to_string(), id.clone(), truncate_string(&name, 40)]);
            }
        }
        TaskOutput::Review(result) => {
            table.set_header(["Stars", "Review"]);
            table.add_row([result.stars.to_string(), result.review.clone()]);
        }
    }

    table
}
