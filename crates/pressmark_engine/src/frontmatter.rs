use pressmark_core::FrontMatter;

#[derive(Debug, thiserror::Error)]
#[error("could not serialize front matter: {0}")]
pub struct FrontMatterError(#[from] serde_yaml::Error);

/// `---`, the YAML header, `---`, then the body and a trailing newline.
pub fn build_markdown_document(
    front_matter: &FrontMatter,
    body_markdown: &str,
) -> Result<String, FrontMatterError> {
    let header = front_matter.to_yaml()?;
    Ok(format!("---\n{header}---\n{body_markdown}\n"))
}
