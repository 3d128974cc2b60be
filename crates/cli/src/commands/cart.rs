//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! tindi cart add --name "Router" --price 1500 --image img/router.png --max-stock 5 --qty 2
//! tindi cart show
//! tindi cart count
//! tindi cart clear
//! ```
//!
//! # Environment Variables
//!
//! - `TINDI_CART_DIR` - Directory holding the persisted cart (default `.tindi`)

use std::io::Write;

use tindi_core::Price;
use tindi_storefront::WidgetError;
use tindi_storefront::cart::AddToCart;
use tindi_storefront::storage::KeyValueStore;

use super::{CliError, Session};

/// Add units of a product to the cart.
///
/// # Errors
///
/// Returns an error if the add is rejected or the cart cannot be written.
pub fn add<S: KeyValueStore, W: Write>(
    session: &mut Session<S, W>,
    request: AddToCart,
) -> Result<(), CliError> {
    session.add_to_cart(request).map_err(WidgetError::from)?;
    Ok(())
}

/// Build an add request from command-line values.
pub fn request(
    name: String,
    price: Price,
    image: String,
    max_stock: Option<u32>,
    quantity: String,
) -> AddToCart {
    let request = AddToCart::new(name, price, image).with_quantity(quantity);
    match max_stock {
        Some(limit) => request.with_max_stock(limit),
        None => request,
    }
}

/// Print every line item and the total.
pub fn show<S: KeyValueStore, W: Write>(session: &mut Session<S, W>) {
    let cart = session.cart().load();

    if cart.is_empty() {
        session.surface_mut().line(format_args!("Your cart is empty."));
        return;
    }

    for item in cart.items() {
        let stock = item
            .max_stock
            .map(|limit| format!(" (max {limit})"))
            .unwrap_or_default();
        session.surface_mut().line(format_args!(
            "{:>4} x {:<32} {:>14}{stock}",
            item.counted_quantity(),
            item.name,
            item.price.display()
        ));
    }
    session
        .surface_mut()
        .line(format_args!("Items: {}", cart.total_quantity()));
}

/// Delete the stored cart.
///
/// # Errors
///
/// Returns an error if the stored cart cannot be deleted.
pub fn clear<S: KeyValueStore, W: Write>(session: &mut Session<S, W>) -> Result<(), CliError> {
    session.clear_cart()?;
    session.surface_mut().line(format_args!("Cart cleared."));
    Ok(())
}

/// Print the cart badge count.
pub fn count<S: KeyValueStore, W: Write>(session: &mut Session<S, W>) {
    let count = session.update_cart_count();
    session.surface_mut().line(format_args!("{count}"));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tindi_storefront::Storefront;
    use tindi_storefront::config::WidgetConfig;
    use tindi_storefront::storage::MemoryStore;

    use super::*;
    use crate::terminal::TerminalSurface;

    fn session() -> Session<MemoryStore, Vec<u8>> {
        let config = WidgetConfig::for_hostname("localhost").unwrap();
        Storefront::new(config, MemoryStore::new(), TerminalSurface::new(Vec::new())).unwrap()
    }

    fn printed(session: Session<MemoryStore, Vec<u8>>) -> String {
        String::from_utf8(session.into_surface().into_inner()).unwrap()
    }

    fn router(quantity: &str) -> AddToCart {
        request(
            "Router".to_string(),
            Price::from_whole(1500),
            "img.png".to_string(),
            Some(5),
            quantity.to_string(),
        )
    }

    #[test]
    fn test_add_show_and_count() {
        let mut session = session();
        add(&mut session, router("3")).unwrap();
        show(&mut session);
        count(&mut session);

        let out = printed(session);
        assert!(out.contains("[ok] 3 x Router added to cart!"));
        assert!(out.contains("1,500 KES (max 5)"));
        assert!(out.contains("Items: 3"));
        assert!(out.ends_with("3\n"));
    }

    #[test]
    fn test_rejected_add_fails_command() {
        let mut session = session();
        add(&mut session, router("3")).unwrap();
        let err = add(&mut session, router("3")).unwrap_err();

        assert!(matches!(err, CliError::Widget(WidgetError::Cart(_))));
        assert_eq!(session.cart().count(), 3);
        assert!(printed(session).contains("[error] Stock Limit Reached!"));
    }

    #[test]
    fn test_unbounded_request() {
        let request = request(
            "Cable".to_string(),
            Price::from_whole(300),
            String::new(),
            None,
            "40".to_string(),
        );
        assert_eq!(request.max_stock, None);
        assert_eq!(request.quantity, "40");
    }

    #[test]
    fn test_show_total_saturates() {
        let mut session = session();
        for name in ["Cable", "Connector"] {
            let request = request(
                name.to_string(),
                Price::from_whole(1),
                String::new(),
                None,
                u32::MAX.to_string(),
            );
            add(&mut session, request).unwrap();
        }
        show(&mut session);

        let out = printed(session);
        assert!(out.ends_with(&format!("Items: {}\n", u32::MAX)));
    }

    #[test]
    fn test_clear() {
        let mut session = session();
        add(&mut session, router("2")).unwrap();
        clear(&mut session).unwrap();
        show(&mut session);

        assert!(printed(session).ends_with("Cart cleared.\nYour cart is empty.\n"));
    }

    #[test]
    fn test_show_empty() {
        let mut session = session();
        show(&mut session);
        assert_eq!(printed(session), "Your cart is empty.\n");
    }
}
