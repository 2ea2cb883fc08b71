use chrono::NaiveDate;
use quote_pdf::*;
use std::num::NonZeroUsize;
use std::path::Path;
use tempfile::TempDir;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([20, 60, 140]));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn test_assets() -> ImageAssets {
    ImageAssets::from_bytes(&png_bytes(190, 40), &png_bytes(190, 40)).unwrap()
}

fn record_with_items(count: usize) -> QuoteRecord {
    let items = (0..count)
        .map(|i| LineItem::new(i as i64, format!("Producto número {i}"), 2, "10.00".parse().unwrap()))
        .collect();

    assemble(QuoteInput {
        client: Some("ACME".to_string()),
        budget_label: Some("Obra norte".to_string()),
        date: NaiveDate::from_ymd_opt(2024, 5, 1),
        description: Some("Cambio de cableado\nIncluye materiales".to_string()),
        labor_cost: Some("3.00".parse().unwrap()),
        items,
    })
    .unwrap()
}

fn pdf_page_count(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes).unwrap().get_pages().len()
}

/// What one page of the output paints
struct PageContent {
    text: String,
    images: usize,
}

fn push_pdf_string(text: &mut String, obj: &lopdf::Object) {
    if let Ok(bytes) = obj.as_str() {
        text.extend(bytes.iter().map(|&b| char::from(b)));
    }
}

fn page_contents(bytes: &[u8]) -> Vec<PageContent> {
    let doc = lopdf::Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let stream = doc.get_page_content(page_id).unwrap();
            let content = lopdf::content::Content::decode(&stream).unwrap();

            let mut page = PageContent {
                text: String::new(),
                images: 0,
            };
            for op in &content.operations {
                match op.operator.as_str() {
                    "Do" => page.images += 1,
                    "Tj" | "'" | "\"" => {
                        if let Some(operand) = op.operands.last() {
                            push_pdf_string(&mut page.text, operand);
                        }
                        page.text.push('\n');
                    }
                    "TJ" => {
                        for operand in &op.operands {
                            for item in operand.as_array().into_iter().flatten() {
                                push_pdf_string(&mut page.text, item);
                            }
                        }
                        page.text.push('\n');
                    }
                    _ => {}
                }
            }
            page
        })
        .collect()
}

fn acme_record(description: &str) -> QuoteRecord {
    assemble(QuoteInput {
        client: Some("ACME".to_string()),
        budget_label: Some("Obra norte".to_string()),
        date: NaiveDate::from_ymd_opt(2024, 5, 1),
        description: Some(description.to_string()),
        labor_cost: Some("3".parse().unwrap()),
        items: vec![
            LineItem::new(1, "Cable", 2, "10".parse().unwrap()),
            LineItem::new(3, "Interruptor", 1, "5".parse().unwrap()),
        ],
    })
    .unwrap()
}

fn write_assets(dir: &Path) -> QuoteOptions {
    let header = dir.join("header.png");
    let footer = dir.join("footer.png");
    std::fs::write(&header, png_bytes(190, 40)).unwrap();
    std::fs::write(&footer, png_bytes(190, 40)).unwrap();
    QuoteOptions {
        header_image: header,
        footer_image: footer,
        ..Default::default()
    }
}

#[test]
fn test_render_single_page() {
    let record = record_with_items(2);
    let options = QuoteOptions::default();
    let pages = layout(&record, &options.geometry);

    let bytes = render(&record, &pages, &test_assets(), &options).unwrap();

    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(pdf_page_count(&bytes), 1);
}

#[test]
fn test_render_empty_quote() {
    let record = record_with_items(0);
    let options = QuoteOptions::default();
    let pages = layout(&record, &options.geometry);

    let bytes = render(&record, &pages, &test_assets(), &options).unwrap();
    assert_eq!(pdf_page_count(&bytes), 1);
}

#[test]
fn test_render_multiple_pages() {
    let record = record_with_items(23);
    let options = QuoteOptions::default();

    let bytes = render_quote_bytes(&record, &test_assets(), &options).unwrap();
    assert_eq!(pdf_page_count(&bytes), 2);

    let mut small = QuoteOptions::default();
    small.geometry.max_items_per_page = NonZeroUsize::new(5).unwrap();
    let bytes = render_quote_bytes(&record, &test_assets(), &small).unwrap();
    assert_eq!(pdf_page_count(&bytes), 5);
}

#[test]
fn test_single_page_content() {
    let record = acme_record("Cambio de cableado\nIncluye materiales");
    let bytes = render_quote_bytes(&record, &test_assets(), &QuoteOptions::default()).unwrap();

    let pages = page_contents(&bytes);
    assert_eq!(pages.len(), 1);
    let page = &pages[0];

    // Letterhead and footer
    assert_eq!(page.images, 2);
    for expected in [
        "CLIENTE: ACME",
        "PRESUPUESTO: Obra norte",
        "FECHA: 01/05/2024",
        "Cambio de cableado",
        "Incluye materiales",
        "CANT.",
        "Interruptor",
        "SUBTOTAL: $25.00",
        "MANO DE OBRA: $3.00",
        "TOTAL: $28.00",
    ] {
        assert!(page.text.contains(expected), "missing {expected:?} in {:?}", page.text);
    }
}

#[test]
fn test_letterhead_and_summary_placement() {
    let record = record_with_items(23);
    let bytes = render_quote_bytes(&record, &test_assets(), &QuoteOptions::default()).unwrap();

    let pages = page_contents(&bytes);
    assert_eq!(pages.len(), 2);

    assert_eq!(pages[0].images, 2);
    assert!(pages[0].text.contains("CLIENTE: ACME"));
    assert!(!pages[0].text.contains("SUBTOTAL"));

    assert_eq!(pages[1].images, 1);
    assert!(!pages[1].text.contains("CLIENTE"));
    assert!(pages[1].text.contains("CANT."));
    assert!(pages[1].text.contains("SUBTOTAL: $460.00"));
    assert!(pages[1].text.contains("TOTAL: $463.00"));

    let mut small = QuoteOptions::default();
    small.geometry.max_items_per_page = NonZeroUsize::new(5).unwrap();
    let bytes = render_quote_bytes(&record, &test_assets(), &small).unwrap();
    let pages = page_contents(&bytes);
    assert_eq!(pages.len(), 5);
    for (i, page) in pages.iter().enumerate() {
        let first = i == 0;
        let last = i == pages.len() - 1;
        assert_eq!(page.images, if first { 2 } else { 1 }, "page {}", i + 1);
        assert_eq!(page.text.contains("CLIENTE"), first, "page {}", i + 1);
        assert_eq!(page.text.contains("SUBTOTAL"), last, "page {}", i + 1);
    }
}

#[test]
fn test_description_filling_the_client_block() {
    let record = acme_record("Línea uno\nLínea dos\nLínea tres");
    let bytes = render_quote_bytes(&record, &test_assets(), &QuoteOptions::default()).unwrap();

    let page = &page_contents(&bytes)[0];
    for line in ["nea uno", "nea dos", "nea tres"] {
        assert!(page.text.contains(line), "missing {line:?}");
    }
}

#[test]
fn test_description_too_long_fails_render() {
    let options = QuoteOptions::default();

    let record = acme_record("uno\ndos\ntres\ncuatro");
    match render_quote_bytes(&record, &test_assets(), &options) {
        Err(QuoteError::Render(msg)) => assert!(msg.contains("description"), "{msg}"),
        other => panic!("Expected Render error, got {:?}", other.map(|b| b.len())),
    }

    // One long line wraps past the block as well
    let record = acme_record(&"reparación de instalación eléctrica ".repeat(20));
    assert!(matches!(
        render_quote_bytes(&record, &test_assets(), &options),
        Err(QuoteError::Render(_))
    ));

    // A taller client block makes room for it
    let mut tall = QuoteOptions::default();
    tall.geometry.metadata_height_mm = 90.0;
    let record = acme_record("uno\ndos\ntres\ncuatro");
    assert!(render_quote_bytes(&record, &test_assets(), &tall).is_ok());
}

#[test]
fn test_render_rejects_undisplayable_text() {
    let mut input = QuoteInput {
        client: Some("ACME \u{1F600}".to_string()),
        date: NaiveDate::from_ymd_opt(2024, 5, 1),
        ..Default::default()
    };
    let record = assemble(input.clone()).unwrap();
    let options = QuoteOptions::default();
    let pages = layout(&record, &options.geometry);
    assert!(matches!(
        render(&record, &pages, &test_assets(), &options),
        Err(QuoteError::Render(_))
    ));

    // A bad product name on a later page still fails the whole render
    input.client = Some("ACME".to_string());
    input.items = (0..30)
        .map(|i| LineItem::new(i, "Cable", 1, "1".parse().unwrap()))
        .collect();
    input.items[25].name = "Cable\u{0}".to_string();
    let record = assemble(input).unwrap();
    assert!(matches!(
        render_quote_bytes(&record, &test_assets(), &options),
        Err(QuoteError::Render(_))
    ));
}

#[test]
fn test_undecodable_asset() {
    match ImageAssets::from_bytes(b"not an image", &png_bytes(4, 4)) {
        Err(QuoteError::Render(msg)) => assert!(msg.contains("header")),
        Err(other) => panic!("Expected Render error, got {other:?}"),
        Ok(_) => panic!("Expected Render error"),
    }
}

#[tokio::test]
async fn test_missing_asset_is_render_error() {
    let dir = TempDir::new().unwrap();
    let result = ImageAssets::load(dir.path().join("nope.png"), dir.path().join("nope2.png")).await;
    assert!(matches!(result, Err(QuoteError::Render(_))));
}

#[tokio::test]
async fn test_export_writes_document() {
    let dir = TempDir::new().unwrap();
    let options = write_assets(dir.path());
    let output = default_output_path(dir.path(), &options);
    let record = record_with_items(23);

    let report = export_quote(&record, &options, &output).await.unwrap();

    assert_eq!(report.path, output);
    assert_eq!(report.pages, 2);
    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(bytes.len(), report.bytes);
    assert_eq!(pdf_page_count(&bytes), 2);
}

#[tokio::test]
async fn test_failed_export_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let mut options = write_assets(dir.path());
    options.footer_image = dir.path().join("missing.png");
    let output = dir.path().join("cotizacion.pdf");

    let result = export_quote(&record_with_items(3), &options, &output).await;

    assert!(matches!(result, Err(QuoteError::Render(_))));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_invalid_options_block_export() {
    let dir = TempDir::new().unwrap();
    let mut options = write_assets(dir.path());
    options.geometry.row_height_mm = -1.0;
    let output = dir.path().join("cotizacion.pdf");

    let result = export_quote(&record_with_items(3), &options, &output).await;

    assert!(matches!(result, Err(QuoteError::Config(_))));
    assert!(!output.exists());
}
