use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use egui::{Context, FontData, FontDefinitions, FontFamily};

// ---------------------------------------------------------------------------
// Filesystem font registration
// ---------------------------------------------------------------------------

/// Register every `.ttf` / `.otf` file under `dir` with the egui context.
///
/// Licensed font families (e.g. the Microsoft TrueType core fonts) often
/// cannot be bundled and must be copied onto the machine separately; this
/// helper picks them up from their installation directory at startup. The
/// fonts are appended to the proportional fallback list, so built-in fonts
/// keep working. Calling it again simply re-registers the same files.
///
/// Returns the number of fonts registered.
pub fn install_fonts_from_dir(ctx: &Context, dir: &Path) -> Result<usize> {
    let mut fonts = FontDefinitions::default();
    let files = collect_font_files(dir)?;

    for path in &files {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("font")
            .to_string();
        let bytes =
            std::fs::read(path).with_context(|| format!("reading font file {}", path.display()))?;
        fonts
            .font_data
            .insert(name.clone(), Arc::new(FontData::from_owned(bytes)));
        fonts
            .families
            .entry(FontFamily::Proportional)
            .or_default()
            .push(name);
        log::info!("Registered font {}", path.display());
    }

    ctx.set_fonts(fonts);
    Ok(files.len())
}

/// Font files under `dir`, sorted for deterministic registration order.
fn collect_font_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("reading font directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.context("reading font directory entry")?.path();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        if ext == "ttf" || ext == "otf" {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_only_font_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Arial.ttf"), b"ttf").unwrap();
        std::fs::write(dir.path().join("Georgia.otf"), b"otf").unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"not a font").unwrap();

        let files = collect_font_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["Arial.ttf", "Georgia.otf"]);
    }

    #[test]
    fn empty_directory_yields_no_fonts() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_font_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(collect_font_files(Path::new("/no/such/fonts")).is_err());
    }
}
