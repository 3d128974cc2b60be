//! Product listing.
//!
//! # Usage
//!
//! ```bash
//! tindi products
//! tindi products --search router
//! tindi products --html
//! ```

use std::io::Write;

use tindi_storefront::render::GridState;
use tindi_storefront::storage::KeyValueStore;

use super::{CliError, Session};

/// Fetch products and print one line per card.
///
/// # Errors
///
/// Returns `CliError::Failed` if the API could not be reached.
pub async fn list<S: KeyValueStore, W: Write>(
    session: &mut Session<S, W>,
    search: &str,
) -> Result<(), CliError> {
    let state = session.fetch_products(search).await;

    match &state {
        GridState::Products(cards) => {
            for card in cards {
                session.surface_mut().line(format_args!(
                    "{:<26} {:<32} {:>14}  {}",
                    card.id, card.name, card.price, card.stock_label
                ));
            }
            tracing::info!(count = state.card_count(), "Listed products");
            Ok(())
        }
        GridState::Empty => {
            session
                .surface_mut()
                .line(format_args!("No products found."));
            Ok(())
        }
        GridState::ConnectionFailed { target } => {
            session.surface_mut().line(format_args!(
                "Connection Failed. Please ensure the backend is running.\nTarget: {target}"
            ));
            Err(CliError::Failed("product fetch failed"))
        }
        GridState::Loading => Ok(()),
    }
}
