use crate::constants::*;
use crate::layout::PageDescription;
use crate::metrics;
use crate::options::{PageGeometry, QuoteOptions};
use crate::stats::summary_lines;
use crate::types::{LineItem, QuoteError, QuoteRecord, Result};
use printpdf::*;
use std::path::Path;

/// Letterhead and footer images, decoded once per export
pub struct ImageAssets {
    header: RawImage,
    footer: RawImage,
}

impl ImageAssets {
    pub fn from_bytes(header: &[u8], footer: &[u8]) -> Result<Self> {
        Ok(Self {
            header: decode_image("header", header)?,
            footer: decode_image("footer", footer)?,
        })
    }

    /// Read and decode both images. A missing file is a render error.
    pub async fn load(
        header_path: impl AsRef<Path>,
        footer_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let header = read_asset(header_path.as_ref()).await?;
        let footer = read_asset(footer_path.as_ref()).await?;

        tokio::task::spawn_blocking(move || Self::from_bytes(&header, &footer)).await?
    }
}

async fn read_asset(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|e| {
        QuoteError::Render(format!("image asset {} unavailable: {}", path.display(), e))
    })
}

fn decode_image(label: &str, bytes: &[u8]) -> Result<RawImage> {
    let mut warnings = Vec::new();
    let image = RawImage::decode_from_bytes(bytes, &mut warnings)
        .map_err(|e| QuoteError::Render(format!("failed to decode {label} image: {e}")))?;
    if image.width == 0 || image.height == 0 {
        return Err(QuoteError::Render(format!("{label} image is empty")));
    }
    Ok(image)
}

/// Cell texts of one table row: quantity, name, unit price, line total
pub fn table_row(item: &LineItem, currency_symbol: &str) -> [String; 4] {
    [
        item.quantity.to_string(),
        item.name.clone(),
        item.unit_price.display_with(currency_symbol),
        item.line_total().display_with(currency_symbol),
    ]
}

/// Paint every page and serialize the document.
///
/// Pages are folded into a list of finished pages one after another; any
/// failure aborts the whole render and no bytes are produced.
pub fn render(
    record: &QuoteRecord,
    pages: &[PageDescription<'_>],
    assets: &ImageAssets,
    options: &QuoteOptions,
) -> Result<Vec<u8>> {
    if pages.is_empty() {
        return Err(QuoteError::Render("no pages to render".to_string()));
    }

    let mut doc = PdfDocument::new(&options.title);
    let painter = PagePainter {
        record,
        options,
        header: PlacedImage::register(&mut doc, &assets.header),
        footer: PlacedImage::register(&mut doc, &assets.footer),
    };

    let finished = pages
        .iter()
        .try_fold(Vec::with_capacity(pages.len()), |mut done, page| {
            done.push(painter.paint(page)?);
            Ok::<_, QuoteError>(done)
        })?;
    doc.pages = finished;

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

    log::debug!(
        "Rendered quote for {} ({} pages, {} bytes)",
        record.client(),
        pages.len(),
        bytes.len()
    );
    Ok(bytes)
}

struct PlacedImage {
    id: XObjectId,
    width_px: f32,
    height_px: f32,
}

impl PlacedImage {
    fn register(doc: &mut PdfDocument, image: &RawImage) -> Self {
        Self {
            id: doc.add_image(image),
            width_px: image.width as f32,
            height_px: image.height as f32,
        }
    }
}

struct PagePainter<'a> {
    record: &'a QuoteRecord,
    options: &'a QuoteOptions,
    header: PlacedImage,
    footer: PlacedImage,
}

impl PagePainter<'_> {
    fn geometry(&self) -> &PageGeometry {
        &self.options.geometry
    }

    fn paint(&self, page: &PageDescription<'_>) -> Result<PdfPage> {
        let g = self.geometry();
        let mut ops = Vec::new();

        if page.is_first_page {
            self.image(&mut ops, &self.header, g.margins.top_mm, g.header_height_mm);
            self.metadata(&mut ops)?;
        }

        let table_bottom = self.table(&mut ops, page)?;

        if page.is_last_page {
            self.summary(&mut ops, table_bottom);
        }

        self.image(&mut ops, &self.footer, g.footer_top_mm(), g.footer_height_mm);

        Ok(PdfPage::new(
            Mm(g.page_width_mm()),
            Mm(g.page_height_mm()),
            ops,
        ))
    }

    /// Vertical PDF coordinate of a distance from the top edge
    fn y(&self, from_top_mm: f32) -> Pt {
        Mm(self.geometry().page_height_mm() - from_top_mm).into_pt()
    }

    fn image(&self, ops: &mut Vec<Op>, image: &PlacedImage, top_mm: f32, height_mm: f32) {
        if height_mm <= 0.0 {
            return;
        }
        let g = self.geometry();
        ops.push(Op::UseXobject {
            id: image.id.clone(),
            transform: XObjectTransform {
                translate_x: Some(Mm(g.margins.left_mm).into_pt()),
                translate_y: Some(self.y(top_mm + height_mm)),
                scale_x: Some(Mm(g.content_width_mm()).into_pt().0 / image.width_px),
                scale_y: Some(Mm(height_mm).into_pt().0 / image.height_px),
                dpi: Some(IMAGE_PLACEMENT_DPI),
                ..Default::default()
            },
        });
    }

    fn metadata(&self, ops: &mut Vec<Op>) -> Result<()> {
        let g = self.geometry();
        let record = self.record;
        let size = g.font_size_pt;
        let x = g.margins.left_mm;
        let spacing = (g.metadata_height_mm / 6.0).min(METADATA_LINE_SPACING_MM);
        let base = g.header_bottom_mm();

        let client = displayable("client", record.client())?;
        let budget = displayable("budget", record.budget_label())?;
        let lines = [
            format!("CLIENTE: {client}"),
            format!("PRESUPUESTO: {budget}"),
            format!("FECHA: {}", record.date().format("%d/%m/%Y")),
            "DESCRIPCIÓN:".to_string(),
        ];
        for (i, line) in lines.iter().enumerate() {
            let baseline = base + (i + 1) as f32 * spacing;
            self.text(ops, BuiltinFont::Helvetica, size, x, baseline, line);
        }

        let line_spacing = DESCRIPTION_LINE_SPACING_MM.min(spacing);
        let first = base + 4.0 * spacing + line_spacing;
        let limit = g.first_page_start_mm() - pt_to_mm(size) * 0.5;
        let capacity = if limit < first || line_spacing <= 0.0 {
            0
        } else {
            ((limit - first) / line_spacing) as usize + 1
        };

        let mut wrapped = Vec::new();
        for line in record.description().lines() {
            let line = displayable("description", line)?;
            wrapped.extend(wrap_to_width(
                line,
                g.content_width_mm(),
                BuiltinFont::Helvetica,
                size,
            ));
        }
        if wrapped.len() > capacity {
            return Err(QuoteError::Render(format!(
                "description needs {} lines but the client block holds {}; \
                 shorten it or raise metadata_height_mm",
                wrapped.len(),
                capacity
            )));
        }

        for (i, line) in wrapped.iter().enumerate() {
            let baseline = first + i as f32 * line_spacing;
            self.text(ops, BuiltinFont::Helvetica, size, x, baseline, line);
        }

        Ok(())
    }

    /// Paint the item table and return the distance of its bottom edge
    /// from the top of the page.
    fn table(&self, ops: &mut Vec<Op>, page: &PageDescription<'_>) -> Result<f32> {
        let g = self.geometry();
        let row_h = g.row_height_mm;
        let size = g.font_size_pt;
        let left = g.margins.left_mm;
        let widths = TABLE_COLUMN_RATIOS.map(|r| r * g.content_width_mm());

        let mut top = page.start_offset_mm;

        ops.push(Op::SetOutlineThickness {
            pt: Pt(GRID_LINE_WIDTH),
        });
        ops.push(Op::SetOutlineColor { col: black() });

        // Header row: black band, white bold labels
        ops.push(Op::SetFillColor { col: black() });
        self.fill_rect(ops, left, top, g.content_width_mm(), row_h);
        ops.push(Op::SetFillColor { col: white() });
        let mut x = left;
        for (label, width) in TABLE_HEADERS.iter().zip(widths) {
            let baseline = cell_baseline(top, row_h, size);
            self.text(
                ops,
                BuiltinFont::HelveticaBold,
                size,
                x + CELL_PADDING_MM,
                baseline,
                label,
            );
            x += width;
        }
        ops.push(Op::SetFillColor { col: black() });
        top += row_h;

        for item in page.items {
            displayable("product name", &item.name)?;
            let cells = table_row(item, &self.options.currency_symbol);
            let baseline = cell_baseline(top, row_h, size);

            let mut x = left;
            for (col, (cell, width)) in cells.iter().zip(widths).enumerate() {
                self.stroke_rect(ops, x, top, width, row_h);
                if col == 1 {
                    let fitted = clip_to_width(
                        cell,
                        width - 2.0 * CELL_PADDING_MM,
                        BuiltinFont::Helvetica,
                        size,
                    );
                    self.text(
                        ops,
                        BuiltinFont::Helvetica,
                        size,
                        x + CELL_PADDING_MM,
                        baseline,
                        &fitted,
                    );
                } else {
                    let text_x = x + width
                        - CELL_PADDING_MM
                        - text_width_mm(cell, BuiltinFont::Helvetica, size);
                    self.text(ops, BuiltinFont::Helvetica, size, text_x, baseline, cell);
                }
                x += width;
            }
            top += row_h;
        }

        Ok(top)
    }

    fn summary(&self, ops: &mut Vec<Op>, table_bottom_mm: f32) {
        let g = self.geometry();
        let size = g.font_size_pt;
        let right = g.margins.left_mm + g.content_width_mm();

        let lines = summary_lines(self.record, &self.options.currency_symbol);
        let last = lines.len() - 1;
        for (i, line) in lines.iter().enumerate() {
            let baseline = table_bottom_mm + SUMMARY_GAP_MM + i as f32 * SUMMARY_LINE_SPACING_MM;
            let font = if i == last {
                BuiltinFont::HelveticaBold
            } else {
                BuiltinFont::Helvetica
            };
            let x = right - text_width_mm(line, font, size);
            self.text(ops, font, size, x, baseline, line);
        }

        let bottom = table_bottom_mm + SUMMARY_GAP_MM + last as f32 * SUMMARY_LINE_SPACING_MM;
        if bottom > g.footer_top_mm() {
            log::warn!("Quote summary overlaps the footer; lower max_items_per_page");
        }
    }

    fn text(
        &self,
        ops: &mut Vec<Op>,
        font: BuiltinFont,
        size_pt: f32,
        x_mm: f32,
        baseline_mm: f32,
        text: &str,
    ) {
        ops.push(Op::StartTextSection);
        ops.push(Op::SetTextCursor {
            pos: Point {
                x: Mm(x_mm).into_pt(),
                y: self.y(baseline_mm),
            },
        });
        ops.push(Op::SetFontSizeBuiltinFont {
            font,
            size: Pt(size_pt),
        });
        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.to_string())],
            font,
        });
        ops.push(Op::EndTextSection);
    }

    fn corners(&self, x_mm: f32, top_mm: f32, width_mm: f32, height_mm: f32) -> Vec<LinePoint> {
        let (x0, x1) = (Mm(x_mm).into_pt(), Mm(x_mm + width_mm).into_pt());
        let (y0, y1) = (self.y(top_mm + height_mm), self.y(top_mm));
        [(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
            .into_iter()
            .map(|(x, y)| LinePoint {
                p: Point { x, y },
                bezier: false,
            })
            .collect()
    }

    fn stroke_rect(&self, ops: &mut Vec<Op>, x_mm: f32, top_mm: f32, width_mm: f32, height_mm: f32) {
        ops.push(Op::DrawLine {
            line: Line {
                points: self.corners(x_mm, top_mm, width_mm, height_mm),
                is_closed: true,
            },
        });
    }

    fn fill_rect(&self, ops: &mut Vec<Op>, x_mm: f32, top_mm: f32, width_mm: f32, height_mm: f32) {
        ops.push(Op::DrawPolygon {
            polygon: Polygon {
                rings: vec![PolygonRing {
                    points: self.corners(x_mm, top_mm, width_mm, height_mm),
                }],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            },
        });
    }
}

fn black() -> Color {
    Color::Rgb(Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        icc_profile: None,
    })
}

fn white() -> Color {
    Color::Rgb(Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        icc_profile: None,
    })
}

fn cell_baseline(row_top_mm: f32, row_height_mm: f32, size_pt: f32) -> f32 {
    row_top_mm + (row_height_mm + pt_to_mm(size_pt) * 0.7) / 2.0
}

/// Rendered width of `text` in mm
fn text_width_mm(text: &str, font: BuiltinFont, size_pt: f32) -> f32 {
    pt_to_mm(metrics::text_width_pt(text, font, size_pt))
}

/// Shorten `text` with an ellipsis so it fits in `width_mm`
fn clip_to_width(text: &str, width_mm: f32, font: BuiltinFont, size_pt: f32) -> String {
    if text_width_mm(text, font, size_pt) <= width_mm {
        return text.to_string();
    }

    let budget = width_mm - text_width_mm(ELLIPSIS, font, size_pt);
    let mut used = 0.0;
    let mut clipped: String = text
        .chars()
        .take_while(|&ch| {
            used += pt_to_mm(f32::from(metrics::char_width(font, ch)) * size_pt / 1000.0);
            used <= budget
        })
        .collect();
    clipped.push_str(ELLIPSIS);
    clipped
}

/// Break `line` at spaces so every piece fits in `width_mm`. Words wider
/// than the whole width are split between characters.
fn wrap_to_width(line: &str, width_mm: f32, font: BuiltinFont, size_pt: f32) -> Vec<String> {
    let fits = |text: &str| text_width_mm(text, font, size_pt) <= width_mm;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for ch in word.chars() {
            current.push(ch);
            if !fits(&current) && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }
    lines.push(current);
    lines
}

/// Reject text the built-in fonts cannot show
fn displayable<'t>(field: &str, value: &'t str) -> Result<&'t str> {
    match value
        .chars()
        .find(|c| c.is_control() || u32::from(*c) > MAX_BUILTIN_CODE_POINT)
    {
        Some(c) => Err(QuoteError::Render(format!(
            "{field} contains a character that cannot be displayed: {:?}",
            c
        ))),
        None => Ok(value),
    }
}
