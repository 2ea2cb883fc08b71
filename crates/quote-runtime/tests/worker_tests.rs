use quote_runtime::*;
use std::path::Path;
use tempfile::TempDir;
use tokio::sync::mpsc;

/// Queue `commands`, run the worker until the queue is drained and
/// collect every update it sent.
async fn run_worker(commands: Vec<QuoteCommand>) -> Vec<QuoteUpdate> {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();

    for cmd in commands {
        command_tx.send(cmd).unwrap();
    }
    drop(command_tx);

    worker_task(command_rx, update_tx).await;

    let mut updates = Vec::new();
    while let Ok(update) = update_rx.try_recv() {
        updates.push(update);
    }
    updates
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(19, 4, image::Rgb([0, 0, 0]));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn write_catalog(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("productos.json");
    std::fs::write(
        &path,
        r#"[
            {"id": 1, "nombre": "Cable", "precio": 10},
            {"id": 2, "nombre": "Cable coaxial", "precio": 22.5},
            {"id": 3, "nombre": "Interruptor", "precio": 5}
        ]"#,
    )
    .unwrap();
    path
}

fn write_quote(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("cotizacion.json");
    std::fs::write(
        &path,
        r#"{"cliente": "ACME", "fecha": "2024-05-01", "manoDeObra": 3,
            "items": [
                {"productoId": 1, "nombre": "Cable", "cantidad": 2, "precioUnitario": 10},
                {"productoId": 3, "nombre": "Interruptor", "cantidad": 1, "precioUnitario": 5}
            ]}"#,
    )
    .unwrap();
    path
}

#[tokio::test]
async fn test_load_quote() {
    let dir = TempDir::new().unwrap();
    let quote_path = write_quote(dir.path());

    let updates = run_worker(vec![QuoteCommand::LoadQuote {
        quote_path,
        items_path: None,
    }])
    .await;

    match updates.as_slice() {
        [QuoteUpdate::QuoteLoaded { record }] => {
            assert_eq!(record.client(), "ACME");
            assert_eq!(record.total().to_string(), "$28.00");
        }
        other => panic!("Unexpected updates: {other:?}"),
    }
}

#[tokio::test]
async fn test_load_quote_with_csv_items() {
    let dir = TempDir::new().unwrap();
    let quote_path = write_quote(dir.path());
    let items_path = dir.path().join("items.csv");
    std::fs::write(&items_path, "product_id,name,quantity,unit_price\n9,Foco,3,1.50\n").unwrap();

    let updates = run_worker(vec![QuoteCommand::LoadQuote {
        quote_path,
        items_path: Some(items_path),
    }])
    .await;

    match updates.as_slice() {
        [QuoteUpdate::QuoteLoaded { record }] => {
            assert_eq!(record.items().len(), 1);
            assert_eq!(record.subtotal().to_string(), "$4.50");
        }
        other => panic!("Unexpected updates: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_quote_reports_error() {
    let dir = TempDir::new().unwrap();
    let quote_path = dir.path().join("sin_cliente.json");
    std::fs::write(&quote_path, r#"{"fecha": "2024-05-01"}"#).unwrap();

    let updates = run_worker(vec![QuoteCommand::LoadQuote {
        quote_path,
        items_path: None,
    }])
    .await;

    match updates.as_slice() {
        [QuoteUpdate::Error { message }] => assert!(message.contains("client is required")),
        other => panic!("Unexpected updates: {other:?}"),
    }
}

#[tokio::test]
async fn test_queued_searches_collapse_to_latest() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(dir.path());

    let updates = run_worker(vec![
        QuoteCommand::LoadCatalog { path: catalog },
        QuoteCommand::SearchCatalog {
            term: "c".to_string(),
        },
        QuoteCommand::SearchCatalog {
            term: "ca".to_string(),
        },
        QuoteCommand::SearchCatalog {
            term: "coax".to_string(),
        },
    ])
    .await;

    assert_eq!(updates.len(), 2);
    assert!(matches!(
        updates[0],
        QuoteUpdate::CatalogLoaded { product_count: 3 }
    ));
    match &updates[1] {
        QuoteUpdate::SearchResults { term, products } => {
            assert_eq!(term, "coax");
            assert_eq!(products.len(), 1);
            assert_eq!(products[0].id, 2);
        }
        other => panic!("Unexpected update: {other:?}"),
    }
}

#[tokio::test]
async fn test_search_without_catalog_is_empty() {
    let updates = run_worker(vec![QuoteCommand::SearchCatalog {
        term: "cable".to_string(),
    }])
    .await;

    match updates.as_slice() {
        [QuoteUpdate::SearchResults { products, .. }] => assert!(products.is_empty()),
        other => panic!("Unexpected updates: {other:?}"),
    }
}

#[tokio::test]
async fn test_exports_are_not_merged() {
    let dir = TempDir::new().unwrap();
    let header = dir.path().join("header.png");
    let footer = dir.path().join("footer.png");
    std::fs::write(&header, png_bytes()).unwrap();
    std::fs::write(&footer, png_bytes()).unwrap();

    let input = quote_pdf::QuoteInput {
        client: Some("ACME".to_string()),
        date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1),
        ..Default::default()
    };
    let record = quote_pdf::assemble(input).unwrap();
    let options = QuoteOptions {
        header_image: header,
        footer_image: footer,
        ..Default::default()
    };

    let first = dir.path().join("a.pdf");
    let second = dir.path().join("b.pdf");
    let updates = run_worker(vec![
        QuoteCommand::Export {
            record: record.clone(),
            options: options.clone(),
            output_path: first.clone(),
        },
        QuoteCommand::Export {
            record,
            options,
            output_path: second.clone(),
        },
    ])
    .await;

    assert_eq!(updates.len(), 2);
    for update in &updates {
        assert!(matches!(update, QuoteUpdate::ExportComplete { report } if report.pages == 1));
    }
    assert!(first.exists());
    assert!(second.exists());
}

#[tokio::test]
async fn test_export_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    let input = quote_pdf::QuoteInput {
        client: Some("ACME".to_string()),
        date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1),
        ..Default::default()
    };
    let record = quote_pdf::assemble(input).unwrap();
    let options = QuoteOptions {
        header_image: dir.path().join("missing.png"),
        ..Default::default()
    };
    let output_path = dir.path().join("cotizacion.pdf");

    let updates = run_worker(vec![QuoteCommand::Export {
        record,
        options,
        output_path: output_path.clone(),
    }])
    .await;

    match updates.as_slice() {
        [QuoteUpdate::Error { message }] => assert!(message.contains("Render error")),
        other => panic!("Unexpected updates: {other:?}"),
    }
    assert!(!output_path.exists());
}
