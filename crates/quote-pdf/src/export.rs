use crate::layout::layout;
use crate::options::QuoteOptions;
use crate::render::{ImageAssets, render};
use crate::types::{QuoteRecord, Result};
use std::path::{Path, PathBuf};

/// Outcome of a successful export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub pages: usize,
    pub bytes: usize,
}

/// Lay out and render a quote to PDF bytes in one step
pub fn render_quote_bytes(
    record: &QuoteRecord,
    assets: &ImageAssets,
    options: &QuoteOptions,
) -> Result<Vec<u8>> {
    options.validate()?;
    let pages = layout(record, &options.geometry);
    render(record, &pages, assets, options)
}

/// Where the document lands inside `dir` under the configured file name
pub fn default_output_path(dir: impl AsRef<Path>, options: &QuoteOptions) -> PathBuf {
    dir.as_ref().join(&options.file_name)
}

/// Render a quote and write it to `output_path`.
///
/// Nothing is written unless rendering succeeds, and a failed write does
/// not leave a partial file behind.
pub async fn export_quote(
    record: &QuoteRecord,
    options: &QuoteOptions,
    output_path: impl AsRef<Path>,
) -> Result<ExportReport> {
    options.validate()?;

    let assets = ImageAssets::load(&options.header_image, &options.footer_image).await?;

    let record = record.clone();
    let options = options.clone();
    let output_path = output_path.as_ref().to_owned();

    let (bytes, pages) = tokio::task::spawn_blocking(move || {
        let pages = layout(&record, &options.geometry);
        let count = pages.len();
        render(&record, &pages, &assets, &options).map(|bytes| (bytes, count))
    })
    .await??;

    if let Err(e) = tokio::fs::write(&output_path, &bytes).await {
        let _ = tokio::fs::remove_file(&output_path).await;
        return Err(e.into());
    }

    log::info!(
        "Exported quote ({} pages) to {}",
        pages,
        output_path.display()
    );

    Ok(ExportReport {
        path: output_path,
        pages,
        bytes: bytes.len(),
    })
}
