use crate::handlers::{self, CatalogStore};
use crate::{QuoteCommand, QuoteUpdate};
use tokio::sync::mpsc;

/// Async worker task that processes quote commands and sends updates.
///
/// Runs until every command sender is dropped.
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<QuoteCommand>,
    update_tx: mpsc::UnboundedSender<QuoteUpdate>,
) {
    let mut catalog = CatalogStore::new();

    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut catalog, &mut command_rx, &update_tx).await;
    }
}

async fn process_command(
    cmd: QuoteCommand,
    catalog: &mut CatalogStore,
    command_rx: &mut mpsc::UnboundedReceiver<QuoteCommand>,
    update_tx: &mpsc::UnboundedSender<QuoteUpdate>,
) {
    match cmd {
        QuoteCommand::LoadQuote {
            quote_path,
            items_path,
        } => {
            handlers::handle_load_quote(quote_path, items_path, update_tx).await;
        }
        QuoteCommand::LoadCatalog { path } => {
            handlers::handle_load_catalog(path, catalog, update_tx).await;
        }
        QuoteCommand::SearchCatalog { mut term } => {
            // Drain any queued searches, keeping only the most recent term
            while let Ok(next_cmd) = command_rx.try_recv() {
                if let QuoteCommand::SearchCatalog { term: newer } = next_cmd {
                    log::debug!("Discarding queued search for {:?}, using {:?}", term, newer);
                    term = newer;
                } else {
                    // Can't put it back, so run it before the search
                    Box::pin(process_command(next_cmd, catalog, command_rx, update_tx)).await;
                }
            }

            handlers::handle_search(term, catalog, update_tx);
        }
        QuoteCommand::Export {
            record,
            options,
            output_path,
        } => {
            // Exports are never merged; each request produces its own file
            handlers::handle_export(record, options, output_path, update_tx).await;
        }
    }
}
