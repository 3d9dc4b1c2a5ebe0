//! Sentiment lexicon bootstrap
//!
//! The lexicon is a process-wide resource fetched at most once. Startup code
//! calls [`ensure_present`] explicitly; nothing happens at load time.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::config::LexiconConfig;
use crate::error::{AgentError, Result};

static GLOBAL: LexiconBootstrap = LexiconBootstrap::new();

/// Make sure the configured lexicon exists, downloading it on first use.
/// Later calls in the same process return the cached path.
pub async fn ensure_present(config: &LexiconConfig) -> Result<PathBuf> {
    GLOBAL.ensure(config).await
}

/// Guarded one-time initialization of the lexicon file.
///
/// A failed attempt is not cached, so the next call tries again.
pub struct LexiconBootstrap {
    path: OnceCell<PathBuf>,
}

impl LexiconBootstrap {
    pub const fn new() -> Self {
        Self {
            path: OnceCell::const_new(),
        }
    }

    pub async fn ensure(&self, config: &LexiconConfig) -> Result<PathBuf> {
        self.path
            .get_or_try_init(|| fetch_if_missing(config))
            .await
            .cloned()
    }
}

impl Default for LexiconBootstrap {
    fn default() -> Self {
        Self::new()
    }
}

async fn fetch_if_missing(config: &LexiconConfig) -> Result<PathBuf> {
    let path = config.path.clone();
    if tokio::fs::try_exists(&path).await? {
        debug!("Sentiment lexicon found at {}", path.display());
        return Ok(path);
    }

    let Some(url) = config.source_url.as_deref() else {
        return Err(AgentError::Lexicon(format!(
            "{} not found and no source_url configured",
            path.display()
        )));
    };

    info!("Downloading sentiment lexicon from {} to {}", url, path.display());
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(|e| AgentError::Lexicon(e.to_string()))?;
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AgentError::Lexicon(format!("Download failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AgentError::Lexicon(format!("Download returned {status}")));
    }
    let body = response
        .bytes()
        .await
        .map_err(|e| AgentError::Lexicon(format!("Download failed: {e}")))?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    // only a complete download may appear at `path`
    let partial = path.with_extension("part");
    tokio::fs::write(&partial, &body).await?;
    tokio::fs::rename(&partial, &path).await?;

    info!("Sentiment lexicon saved ({} bytes)", body.len());
    Ok(path)
}

/// Token valences from a VADER-format lexicon
/// (`token<TAB>mean<TAB>std<TAB>ratings`).
#[derive(Debug, Clone, Default)]
pub struct SentimentLexicon {
    valences: HashMap<String, f32>,
}

impl SentimentLexicon {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let mut valences = HashMap::new();
        let mut skipped = 0usize;

        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            let mut fields = line.split('\t');
            let entry = fields
                .next()
                .zip(fields.next())
                .and_then(|(token, mean)| Some((token, mean.trim().parse::<f32>().ok()?)));
            match entry {
                Some((token, valence)) => {
                    valences.insert(token.to_lowercase(), valence);
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!("Skipped {} malformed lexicon lines", skipped);
        }
        Self { valences }
    }

    pub fn valence(&self, token: &str) -> Option<f32> {
        self.valences.get(&token.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}
