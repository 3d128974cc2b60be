//! The page session.
//!
//! [`Storefront`] owns everything one page view needs: the API client, the
//! cart store, the transient product catalog and the host [`Surface`]. Hosts
//! call one method per user action from a single task.

use std::collections::HashSet;

use tracing::{debug, error, info, instrument, warn};

use tindi_core::{Product, ProductId};

use crate::api::ApiClient;
use crate::cart::{AddToCart, AddToCartError, AddedToCart, CartStore};
use crate::catalog::ProductCatalog;
use crate::config::WidgetConfig;
use crate::detail::DetailModal;
use crate::error::WidgetError;
use crate::events::{CartEvent, Listeners, Subscription};
use crate::quote::{QUOTE_REQUIRED_FIELDS, QuoteForm, QuoteOutcome, SubmitGuard};
use crate::render::GridState;
use crate::storage::KeyValueStore;
use crate::surface::{Modal, Notice, Surface};

/// Link targets that open the quote modal instead of navigating.
const QUOTE_LINKS: &[&str] = &["quote.html", "quote.html#"];

/// Whether a link should open the quote modal.
#[must_use]
pub fn is_quote_link(href: &str) -> bool {
    QUOTE_LINKS.contains(&href)
}

/// One page view of the storefront.
#[derive(Debug)]
pub struct Storefront<S, V> {
    api: ApiClient,
    cart: CartStore<S>,
    catalog: ProductCatalog,
    detail: DetailModal,
    surface: V,
    open_modals: HashSet<Modal>,
    cart_listeners: Listeners<CartEvent>,
}

impl<S: KeyValueStore, V: Surface> Storefront<S, V> {
    /// Start a page session.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: WidgetConfig, storage: S, surface: V) -> Result<Self, WidgetError> {
        let api = ApiClient::new(&config.api_url)?;
        info!(endpoint = api.target(), "Storefront session started");

        Ok(Self {
            api,
            cart: CartStore::new(storage),
            catalog: ProductCatalog::new(),
            detail: DetailModal::new(),
            surface,
            open_modals: HashSet::new(),
            cart_listeners: Listeners::new(),
        })
    }

    /// Page-load initialization: refresh the cart badge, then load the grid.
    pub async fn load(&mut self) -> GridState {
        self.update_cart_count();
        self.fetch_products("").await
    }

    // =========================================================================
    // Product grid
    // =========================================================================

    /// Fetch products and redraw the grid.
    ///
    /// The catalog is only replaced by a non-empty successful listing, so a
    /// failed or empty fetch keeps the previous products resolvable.
    #[instrument(skip(self))]
    pub async fn fetch_products(&mut self, query: &str) -> GridState {
        self.show_grid(&GridState::Loading);

        let state = match self.api.list_products(query).await {
            Ok(listing) if listing.success && !listing.products.is_empty() => {
                return self.set_products(listing.products);
            }
            Ok(listing) => {
                debug!(success = listing.success, "No products to show");
                GridState::Empty
            }
            Err(e) => {
                warn!(error = %e, endpoint = self.api.target(), "Product fetch failed");
                GridState::ConnectionFailed {
                    target: self.api.target().to_string(),
                }
            }
        };

        self.show_grid(&state);
        state
    }

    /// Show an already fetched product list and make it the catalog.
    pub fn set_products(&mut self, products: Vec<Product>) -> GridState {
        let state = GridState::from_products(&products);
        if !products.is_empty() {
            self.catalog.replace(products);
        }
        self.show_grid(&state);
        state
    }

    fn show_grid(&mut self, state: &GridState) {
        match state.render() {
            Ok(html) => self.surface.set_grid(&html),
            Err(e) => error!(error = %e, "Failed to render product grid"),
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add to the cart and tell the customer how it went.
    ///
    /// # Errors
    ///
    /// Returns the reason the add did not happen; the customer has already
    /// been notified.
    pub fn add_to_cart(&mut self, request: AddToCart) -> Result<AddedToCart, AddToCartError> {
        match self.cart.add_to_cart(request) {
            Ok(added) => {
                self.surface.notify(&Notice::success(added.message()));
                self.update_cart_count();
                Ok(added)
            }
            Err(e) => {
                if !e.is_rejection() {
                    error!(error = ?e, "Cart write failed");
                }
                self.surface.notify(&Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Add from a product card: `quantity` is the card's quantity input.
    ///
    /// Returns `None` if the product is not in the catalog.
    pub fn add_product_to_cart(
        &mut self,
        id: &ProductId,
        quantity: &str,
    ) -> Option<Result<AddedToCart, AddToCartError>> {
        let Some(product) = self.catalog.get(id) else {
            debug!(%id, "Add requested for unknown product");
            return None;
        };

        let request = AddToCart::new(
            product.name.clone(),
            product.price,
            product.image.clone().unwrap_or_default(),
        )
        .with_max_stock(product.stock_ceiling().unwrap_or(0))
        .with_quantity(quantity);

        Some(self.add_to_cart(request))
    }

    /// Empty the cart and refresh the badge.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Storage` if the stored cart cannot be deleted.
    pub fn clear_cart(&mut self) -> Result<(), WidgetError> {
        self.cart.clear()?;
        self.update_cart_count();
        Ok(())
    }

    /// Recompute the cart badge and notify cart listeners.
    pub fn update_cart_count(&mut self) -> u32 {
        let count = self.cart.count();
        self.surface.set_cart_count(count);
        self.cart_listeners.emit(&CartEvent::CountChanged(count));
        count
    }

    /// Subscribe to cart badge refreshes.
    #[must_use = "dropping the subscription unregisters the handler"]
    pub fn on_cart_change(
        &self,
        handler: impl Fn(&CartEvent) + Send + Sync + 'static,
    ) -> Subscription {
        self.cart_listeners.subscribe(handler)
    }

    // =========================================================================
    // Quote and contact forms
    // =========================================================================

    /// Submit the quote modal's form.
    pub async fn submit_quote(&mut self, form: &QuoteForm) -> QuoteOutcome {
        if let Err(e) = form.validate(QUOTE_REQUIRED_FIELDS) {
            let outcome = QuoteOutcome::Invalid(e);
            self.surface.notify(&outcome.notice());
            return outcome;
        }
        self.send_quote(form).await
    }

    /// Submit the contact form. Fields are not required; a supplied email
    /// must still look like one.
    pub async fn submit_contact(&mut self, form: &QuoteForm) -> QuoteOutcome {
        if let Err(e) = form.validate(&[]) {
            let outcome = QuoteOutcome::Invalid(e);
            self.surface.notify(&outcome.notice());
            return outcome;
        }
        self.send_quote(form).await
    }

    #[instrument(skip(self, form), fields(field_count = form.fields().len()))]
    async fn send_quote(&mut self, form: &QuoteForm) -> QuoteOutcome {
        let mut guard = SubmitGuard::engage(&mut self.surface);

        let result = self.api.submit_quote(&form.to_request()).await;
        if let Err(e) = &result {
            warn!(error = %e, endpoint = self.api.target(), "Quote submission failed");
        }

        let outcome = QuoteOutcome::from_response(result);
        guard.surface().notify(&outcome.notice());

        if outcome.is_accepted() {
            info!("Quote request accepted");
            guard.surface().reset_quote_form();
            guard.surface().hide_modal(Modal::Quote);
            self.open_modals.remove(&Modal::Quote);
        }

        outcome
    }

    // =========================================================================
    // Modals
    // =========================================================================

    pub fn open_quote_modal(&mut self) {
        self.show_modal(Modal::Quote);
    }

    pub fn close_quote_modal(&mut self) {
        self.hide_modal(Modal::Quote);
    }

    /// Open the detail modal for a catalog product.
    ///
    /// Returns `false`, changing nothing, if the product is not in the
    /// catalog.
    pub fn open_detail(&mut self, id: &ProductId) -> bool {
        let Some(view) = self.detail.open(&self.catalog, id) else {
            debug!(%id, "Detail requested for unknown product");
            return false;
        };

        self.surface.show_detail(&view);
        self.show_modal(Modal::ProductDetail);
        true
    }

    /// Fire the detail modal's add trigger.
    ///
    /// Adds one unit and closes the modal. Returns `None` if the trigger is
    /// not armed.
    pub fn trigger_detail_add(&mut self) -> Option<Result<AddedToCart, AddToCartError>> {
        let request = self.detail.take_pending()?;
        let result = self.add_to_cart(request);
        self.hide_modal(Modal::ProductDetail);
        Some(result)
    }

    pub fn close_detail_modal(&mut self) {
        self.hide_modal(Modal::ProductDetail);
    }

    /// Handle a click whose target is `target`'s overlay: closes it if open.
    pub fn dismiss(&mut self, target: Modal) {
        if self.open_modals.contains(&target) {
            self.hide_modal(target);
        }
    }

    #[must_use]
    pub fn is_open(&self, modal: Modal) -> bool {
        self.open_modals.contains(&modal)
    }

    fn show_modal(&mut self, modal: Modal) {
        self.open_modals.insert(modal);
        self.surface.show_modal(modal);
    }

    fn hide_modal(&mut self, modal: Modal) {
        if modal == Modal::ProductDetail {
            self.detail.disarm();
        }
        self.open_modals.remove(&modal);
        self.surface.hide_modal(modal);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    #[must_use]
    pub const fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn surface(&self) -> &V {
        &self.surface
    }

    pub const fn surface_mut(&mut self) -> &mut V {
        &mut self.surface
    }

    /// End the session, returning the surface.
    pub fn into_surface(self) -> V {
        self.surface
    }
}
