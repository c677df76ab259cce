use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use lughat_types::Language;

/// Load the language documents a store starts with.
///
/// A missing file is not an error, the store simply starts empty.
pub fn load_seed(path: &Path) -> anyhow::Result<Vec<Language>> {
    if !path.exists() {
        tracing::warn!("Seed file {} not found, starting with an empty catalog", path.display());
        return Ok(Vec::new());
    }

    tracing::info!("Loading seed languages from {}", path.display());
    let file = File::open(path).with_context(|| format!("opening seed {}", path.display()))?;
    let reader = BufReader::new(file);
    let languages: Vec<Language> =
        serde_json::from_reader(reader).with_context(|| format!("parsing seed {}", path.display()))?;

    tracing::info!("Loaded {} languages", languages.len());
    Ok(languages)
}
