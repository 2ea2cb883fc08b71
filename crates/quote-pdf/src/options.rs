use crate::constants::DEFAULT_MAX_ITEMS_PER_PAGE;
use crate::types::{QuoteError, Result};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Portrait dimensions (width, height)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMargins {
    pub top_mm: f32,
    pub bottom_mm: f32,
    pub left_mm: f32,
    pub right_mm: f32,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self::uniform(10.0)
    }
}

impl PageMargins {
    /// Create uniform margins on all sides
    pub fn uniform(margin_mm: f32) -> Self {
        Self {
            top_mm: margin_mm,
            bottom_mm: margin_mm,
            left_mm: margin_mm,
            right_mm: margin_mm,
        }
    }
}

/// Fixed layout constants for one output format.
///
/// All vertical positions are measured from the top edge of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub paper_size: PaperSize,
    pub margins: PageMargins,
    /// Letterhead image height (first page only)
    pub header_height_mm: f32,
    /// Footer image height (every page)
    pub footer_height_mm: f32,
    /// Client, budget, date and description block below the letterhead
    pub metadata_height_mm: f32,
    /// Height of one table row, header row included
    pub row_height_mm: f32,
    pub font_size_pt: f32,
    pub max_items_per_page: NonZeroUsize,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            margins: PageMargins::default(),
            header_height_mm: 40.0,
            footer_height_mm: 40.0,
            metadata_height_mm: 60.0,
            row_height_mm: 5.0,
            font_size_pt: 9.0,
            max_items_per_page: DEFAULT_MAX_ITEMS_PER_PAGE,
        }
    }
}

impl PageGeometry {
    pub fn page_width_mm(&self) -> f32 {
        self.paper_size.dimensions_mm().0
    }

    pub fn page_height_mm(&self) -> f32 {
        self.paper_size.dimensions_mm().1
    }

    pub fn content_width_mm(&self) -> f32 {
        self.page_width_mm() - self.margins.left_mm - self.margins.right_mm
    }

    /// Where the letterhead ends and the client block begins
    pub fn header_bottom_mm(&self) -> f32 {
        self.margins.top_mm + self.header_height_mm
    }

    /// Where the item table starts on the first page
    pub fn first_page_start_mm(&self) -> f32 {
        self.header_bottom_mm() + self.metadata_height_mm
    }

    /// Where the item table starts on every following page
    pub fn continuation_start_mm(&self) -> f32 {
        self.margins.top_mm
    }

    /// Top edge of the footer image
    pub fn footer_top_mm(&self) -> f32 {
        self.page_height_mm() - self.margins.bottom_mm - self.footer_height_mm
    }

    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.paper_size.dimensions_mm();
        if !(width > 0.0 && height > 0.0) {
            return Err(QuoteError::Config(
                "Page width and height must be positive".to_string(),
            ));
        }

        let lengths = [
            ("top margin", self.margins.top_mm),
            ("bottom margin", self.margins.bottom_mm),
            ("left margin", self.margins.left_mm),
            ("right margin", self.margins.right_mm),
            ("header height", self.header_height_mm),
            ("footer height", self.footer_height_mm),
            ("metadata height", self.metadata_height_mm),
        ];
        for (name, value) in lengths {
            if !(value >= 0.0) {
                return Err(QuoteError::Config(format!("{name} cannot be negative")));
            }
        }

        if !(self.row_height_mm > 0.0) {
            return Err(QuoteError::Config(
                "Row height must be positive".to_string(),
            ));
        }
        if !(self.font_size_pt > 0.0) {
            return Err(QuoteError::Config(
                "Font size must be positive".to_string(),
            ));
        }
        if self.content_width_mm() <= 0.0 {
            return Err(QuoteError::Config(
                "Left and right margins leave no room for content".to_string(),
            ));
        }

        // The table header plus one row must fit above the footer on page 1
        if self.first_page_start_mm() + 2.0 * self.row_height_mm > self.footer_top_mm() {
            return Err(QuoteError::Config(format!(
                "Header, client block and footer leave no room for the item table ({:.1}mm tall page)",
                height
            )));
        }

        Ok(())
    }
}

/// Complete export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteOptions {
    pub geometry: PageGeometry,
    /// Letterhead image painted on top of the first page
    pub header_image: PathBuf,
    /// Footer image painted at the bottom of every page
    pub footer_image: PathBuf,
    /// Name offered for the downloaded document
    pub file_name: String,
    /// PDF document title
    pub title: String,
    pub currency_symbol: String,
}

impl Default for QuoteOptions {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            header_image: PathBuf::from("assets/HeaderPdf.jpg"),
            footer_image: PathBuf::from("assets/FooterPdf.jpg"),
            file_name: "cotizacion.pdf".to_string(),
            title: "Cotización".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl QuoteOptions {
    /// Load options from JSON file
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| QuoteError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| QuoteError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;

        if self.file_name.trim().is_empty() {
            return Err(QuoteError::Config("Output file name is empty".to_string()));
        }

        Ok(())
    }
}
