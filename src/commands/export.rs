use std::path::Path;

use anyhow::{Context as _, Result};
use serde_json::json;

use super::Context;

/// Writes `{season, tracked}` so a selection can be shared or backed up.
/// The API key is never included.
pub fn run(ctx: &Context, output: Option<&Path>) -> Result<()> {
    let prefs = ctx.load()?;
    let document = json!({
        "season": prefs.season,
        "tracked": prefs.tracked,
    });
    let content = serde_json::to_string_pretty(&document)?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{content}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Exported tracking selection to {}", path.display());
        }
        None => println!("{content}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_selection_without_key() {
        let dir = TempDir::new().unwrap();
        let ctx = Context::new(Some(dir.path().join("config.json"))).unwrap();
        ctx.store
            .update(|p| {
                p.cfbd_api_key = Some("secret".to_string());
                p.season = 2025;
                p.tracked.add_team("Michigan");
            })
            .unwrap();

        let out = dir.path().join("export.json");
        run(&ctx, Some(&out)).unwrap();

        let content = std::fs::read_to_string(&out).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["season"], 2025);
        assert_eq!(value["tracked"]["teams"][0], "Michigan");
        assert!(!content.contains("secret"));
    }
}
