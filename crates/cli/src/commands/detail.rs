//! Product detail view.
//!
//! The catalog only lives for one session, so the listing is fetched first.
//!
//! # Usage
//!
//! ```bash
//! tindi detail 65f0c2
//! tindi detail 65f0c2 --add
//! ```

use std::io::Write;

use tindi_core::ProductId;
use tindi_storefront::storage::KeyValueStore;

use super::{CliError, Session};

/// Show a product and optionally add one unit of it.
///
/// # Errors
///
/// Returns an error if the product is unknown, out of stock when `add` is
/// set, or the add fails.
pub async fn show<S: KeyValueStore, W: Write>(
    session: &mut Session<S, W>,
    id: &str,
    add: bool,
) -> Result<(), CliError> {
    session.fetch_products("").await;
    open(session, &ProductId::new(id), add)
}

/// Open the detail view for a product already in the session's catalog.
pub(crate) fn open<S: KeyValueStore, W: Write>(
    session: &mut Session<S, W>,
    id: &ProductId,
    add: bool,
) -> Result<(), CliError> {
    if !session.open_detail(id) {
        return Err(CliError::ProductNotFound(id.to_string()));
    }
    if !add {
        session.close_detail_modal();
        return Ok(());
    }

    match session.trigger_detail_add() {
        Some(result) => {
            result.map_err(tindi_storefront::WidgetError::from)?;
            Ok(())
        }
        None => Err(CliError::OutOfStock(id.to_string())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tindi_core::{Price, Product};
    use tindi_storefront::config::WidgetConfig;
    use tindi_storefront::storage::MemoryStore;
    use tindi_storefront::Storefront;

    use super::*;
    use crate::terminal::TerminalSurface;

    fn session(stock: i64) -> Session<MemoryStore, Vec<u8>> {
        let config = WidgetConfig::for_hostname("localhost").unwrap();
        let mut session =
            Storefront::new(config, MemoryStore::new(), TerminalSurface::new(Vec::new())).unwrap();
        session.set_products(vec![Product {
            id: ProductId::new("sw-8"),
            name: "8-Port Switch".to_string(),
            price: Price::from_whole(4200),
            image: None,
            category: None,
            description: None,
            stock,
        }]);
        session
    }

    fn printed(session: Session<MemoryStore, Vec<u8>>) -> String {
        String::from_utf8(session.into_surface().into_inner()).unwrap()
    }

    #[test]
    fn test_open_prints_detail() {
        let mut session = session(7);
        open(&mut session, &ProductId::new("sw-8"), false).unwrap();

        assert_eq!(session.cart().count(), 0);
        let out = printed(session);
        assert!(out.contains("8-Port Switch"));
        assert!(out.contains("Price: 4,200 KES"));
        assert!(out.contains("No description."));
    }

    #[test]
    fn test_open_with_add() {
        let mut session = session(7);
        open(&mut session, &ProductId::new("sw-8"), true).unwrap();

        assert_eq!(session.cart().count(), 1);
        assert!(printed(session).contains("[ok] 1 x 8-Port Switch added to cart!"));
    }

    #[test]
    fn test_open_unknown() {
        let mut session = session(7);
        let err = open(&mut session, &ProductId::new("nope"), false).unwrap_err();
        assert!(matches!(err, CliError::ProductNotFound(id) if id == "nope"));
    }

    #[test]
    fn test_add_out_of_stock() {
        let mut session = session(0);
        let err = open(&mut session, &ProductId::new("sw-8"), true).unwrap_err();

        assert!(matches!(err, CliError::OutOfStock(_)));
        assert!(printed(session).contains("Out of Stock"));
    }
}
