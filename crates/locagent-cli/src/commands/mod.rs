pub mod analyze;
pub mod lexicon;
pub mod run;

pub use analyze::AnalyzeCommand;
pub use lexicon::LexiconCommand;
pub use run::RunCommand;

use std::path::Path;

use locagent::config::Config;
use locagent::toolbox::InMemoryToolbox;

use crate::error::CliResult;

/// Open the dataset named on the command line, else the one in config
pub fn load_toolbox(dataset: Option<&Path>, config: &Config) -> CliResult<InMemoryToolbox> {
    let path = dataset
        .or(config.toolbox.dataset.as_deref())
        .ok_or("No dataset given. Pass --dataset or set toolbox.dataset in config.")?;
    Ok(InMemoryToolbox::from_file(path)?)
}
