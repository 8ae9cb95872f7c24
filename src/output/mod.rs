use anyhow::Result;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::pipeline::GenerationResult;

/// Render a generation result in the requested format
pub fn render(result: &GenerationResult, format: &OutputFormat) -> Result<String> {
    let content = match format {
        OutputFormat::Text => result.text.clone(),
        OutputFormat::Markdown => format!("## {}\n\n{}\n", result.kind.heading(), result.text),
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
    };
    Ok(content)
}

/// Save generation result to file
pub fn save_to_file(result: &GenerationResult, path: &Path, format: &OutputFormat) -> Result<()> {
    let content = render(result, format)?;
    fs_err::write(path, content)?;
    Ok(())
}

/// Print generation result to console
pub fn print_to_console(result: &GenerationResult, format: &OutputFormat) -> Result<()> {
    println!("{}", render(result, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::GenerationKind;

    fn result(kind: GenerationKind) -> GenerationResult {
        GenerationResult {
            kind,
            source: "https://youtu.be/dQw4w9WgXcQ".into(),
            model: "gemini-pro".into(),
            prompt_chars: 123,
            text: "Key points".into(),
            completed_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_render_text_is_verbatim() {
        let rendered = render(&result(GenerationKind::Summary), &OutputFormat::Text).unwrap();
        assert_eq!(rendered, "Key points");
    }

    #[test]
    fn test_render_markdown_headings() {
        let summary = render(&result(GenerationKind::Summary), &OutputFormat::Markdown).unwrap();
        assert_eq!(summary, "## Detailed Notes:\n\nKey points\n");

        let answer = render(&result(GenerationKind::Answer), &OutputFormat::Markdown).unwrap();
        assert!(answer.starts_with("## Answer:"));
    }

    #[test]
    fn test_save_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        save_to_file(&result(GenerationKind::Summary), &path, &OutputFormat::Json).unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&fs_err::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["model"], "gemini-pro");
        assert_eq!(saved["prompt_chars"], 123);
    }
}
