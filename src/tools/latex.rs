//! LaTeX rendering tool.
//!
//! Writes LaTeX source to a scoped output directory, compiles it with an
//! external engine, and cleans up compiler artifacts.

use crate::config::{LatexSettings, Settings};
use crate::error::{ForskError, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// How much of the compiler output to keep in error messages.
const OUTPUT_TAIL_CHARS: usize = 2000;

/// Auxiliary file extensions removed after a successful compile.
const AUX_EXTENSIONS: [&str; 7] = [
    "aux",
    "log",
    "out",
    "toc",
    "synctex.gz",
    "fls",
    "fdb_latexmk",
];

/// Renders LaTeX source documents to PDF using an external engine.
#[derive(Clone)]
pub struct LatexRenderer {
    output_dir: PathBuf,
    engines: Vec<String>,
}

impl LatexRenderer {
    /// Create a renderer from settings.
    ///
    /// A relative output directory is anchored to the current working
    /// directory so returned artifact paths are always absolute.
    pub fn new(settings: &LatexSettings) -> Result<Self> {
        let expanded = Settings::expand_path(&settings.output_dir);
        let output_dir = if expanded.is_absolute() {
            expanded
        } else {
            std::env::current_dir()?.join(expanded)
        };

        Ok(Self {
            output_dir,
            engines: settings.engines.clone(),
        })
    }

    /// The directory rendered PDFs are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render a LaTeX document to PDF and return the absolute path.
    ///
    /// The source is written verbatim to `<stem>.tex` in the output
    /// directory, compiled non-interactively with halt-on-error, and
    /// known auxiliary files are removed afterwards (best effort).
    /// The generated PDF is left on disk for later download.
    pub async fn render(&self, latex_source: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let stem = artifact_stem();
        let tex_path = self.output_dir.join(format!("{}.tex", stem));
        let pdf_path = self.output_dir.join(format!("{}.pdf", stem));

        std::fs::write(&tex_path, latex_source)?;
        debug!("Wrote LaTeX source to {}", tex_path.display());

        let engine = self.resolve_engine().ok_or(ForskError::NoEngine)?;
        info!("Compiling {} with {}", tex_path.display(), engine);

        let output = Command::new(&engine)
            .arg("-interaction=nonstopmode")
            .arg("-halt-on-error")
            .arg("-synctex=0")
            .arg("-output-directory")
            .arg(&self.output_dir)
            .arg(&tex_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ForskError::Compilation(format!("{} failed to start: {}", engine, e)))?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            let mut msg = format!("{} exited with {}", engine, output.status);
            if !stderr.trim().is_empty() {
                msg.push_str(&format!("\nStderr (tail):\n{}", tail(&stderr)));
            }
            if !stdout.trim().is_empty() {
                msg.push_str(&format!("\nStdout (tail):\n{}", tail(&stdout)));
            }
            return Err(ForskError::Compilation(msg));
        }

        if !pdf_path.exists() {
            return Err(ForskError::ArtifactMissing(pdf_path));
        }

        self.cleanup_aux_files(&stem);

        info!("Rendered PDF at {}", pdf_path.display());
        Ok(pdf_path)
    }

    /// Resolve the first usable engine from the candidate list.
    ///
    /// Candidates with a path separator are checked for existence on
    /// disk (known install locations); bare names are probed via PATH.
    pub fn resolve_engine(&self) -> Option<String> {
        for candidate in &self.engines {
            let expanded = Settings::expand_path(candidate);
            if candidate.contains('/') || candidate.contains('\\') {
                if expanded.exists() {
                    return Some(expanded.to_string_lossy().to_string());
                }
            } else if probe_executable(candidate) {
                return Some(candidate.clone());
            }
        }
        None
    }

    /// Remove auxiliary compiler files for a stem. Failures are logged
    /// and swallowed so they never mask a successful render.
    fn cleanup_aux_files(&self, stem: &str) {
        for ext in AUX_EXTENSIONS {
            let path = self.output_dir.join(format!("{}.{}", stem, ext));
            if path.exists() {
                if let Err(e) = std::fs::remove_file(&path) {
                    warn!("Failed to remove {}: {}", path.display(), e);
                }
            }
        }
    }
}

/// Derive a fresh filename stem for a render.
///
/// Combines a second-granularity timestamp with a random suffix so
/// repeated or concurrent renders within the same second cannot collide.
fn artifact_stem() -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("paper_{}_{}", timestamp, &suffix[..8])
}

/// Check whether an executable responds on PATH.
fn probe_executable(name: &str) -> bool {
    matches!(
        std::process::Command::new(name)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status(),
        Ok(status) if status.success()
    )
}

/// Last portion of captured compiler output, for diagnostics.
fn tail(text: &str) -> &str {
    let start = text
        .char_indices()
        .rev()
        .take(OUTPUT_TAIL_CHARS)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(0);
    &text[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL_DOC: &str = r#"\documentclass{article}
\begin{document}
Hello from Forsk.
\end{document}
"#;

    fn renderer_with(dir: &TempDir, engines: Vec<String>) -> LatexRenderer {
        LatexRenderer::new(&LatexSettings {
            output_dir: dir.path().to_string_lossy().to_string(),
            engines,
        })
        .unwrap()
    }

    #[test]
    fn test_artifact_stems_are_unique() {
        let a = artifact_stem();
        let b = artifact_stem();
        assert_ne!(a, b);
        assert!(a.starts_with("paper_"));
    }

    #[test]
    fn test_tail_limits_output() {
        let long = "x".repeat(5000);
        assert_eq!(tail(&long).len(), OUTPUT_TAIL_CHARS);
        assert_eq!(tail("short"), "short");
    }

    #[tokio::test]
    async fn test_render_without_engine_writes_tex_only() {
        let dir = TempDir::new().unwrap();
        let renderer = renderer_with(&dir, vec!["definitely-not-a-latex-engine".to_string()]);

        let err = renderer.render(MINIMAL_DOC).await.unwrap_err();
        assert!(matches!(err, ForskError::NoEngine));

        // The .tex source is written before engine resolution, but no
        // PDF may appear.
        let files: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        assert!(files.iter().any(|f| f.ends_with(".tex")));
        assert!(!files.iter().any(|f| f.ends_with(".pdf")));
    }

    #[tokio::test]
    async fn test_render_minimal_document() {
        let dir = TempDir::new().unwrap();
        let renderer = renderer_with(&dir, LatexSettings::default().engines);

        // Soft skip on machines without a LaTeX installation
        if renderer.resolve_engine().is_none() {
            return;
        }

        let pdf_path = renderer.render(MINIMAL_DOC).await.unwrap();
        assert!(pdf_path.is_absolute());
        assert!(pdf_path.exists());

        // Auxiliary files must be cleaned up
        let files: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        assert!(!files.iter().any(|f| f.ends_with(".aux")));
        assert!(!files.iter().any(|f| f.ends_with(".log")));
    }

    #[tokio::test]
    async fn test_render_invalid_source_reports_compiler_tail() {
        let dir = TempDir::new().unwrap();
        let renderer = renderer_with(&dir, LatexSettings::default().engines);

        if renderer.resolve_engine().is_none() {
            return;
        }

        let err = renderer
            .render(r"\documentclass{article}\begin{document}\undefinedmacro\end{document}")
            .await
            .unwrap_err();
        match err {
            ForskError::Compilation(msg) => assert!(msg.contains("tail")),
            other => panic!("Expected Compilation, got {:?}", other),
        }
    }
}
