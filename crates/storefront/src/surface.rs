//! The host surface the widget draws on.
//!
//! The widget never touches a page directly. Everything visible goes through
//! [`Surface`]: alerts, the cart badge, the product grid, the quote submit
//! control and the two modals. A browser binding, a terminal, or a test
//! recorder can each implement it.

use crate::detail::DetailView;

/// Severity of a customer-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
}

/// A customer-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }
}

/// The widget's modals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modal {
    Quote,
    ProductDetail,
}

/// State of a form's submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
    pub disabled: bool,
}

impl SubmitControl {
    #[must_use]
    pub fn enabled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
        }
    }
}

/// Everything the widget can show or change on the host page.
pub trait Surface {
    /// Show a message to the customer.
    fn notify(&mut self, notice: &Notice);

    /// Write the cart badge.
    fn set_cart_count(&mut self, count: u32);

    /// Replace the product grid's contents with an HTML fragment.
    fn set_grid(&mut self, html: &str);

    /// Current state of the quote form's submit control.
    fn submit_control(&self) -> SubmitControl;

    fn set_submit_control(&mut self, control: &SubmitControl);

    /// Clear the quote form's fields.
    fn reset_quote_form(&mut self);

    fn show_modal(&mut self, modal: Modal);

    fn hide_modal(&mut self, modal: Modal);

    /// Fill the product detail modal.
    fn show_detail(&mut self, view: &DetailView);
}

/// Surface that records every call. Useful for tests and headless hosts.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub notices: Vec<Notice>,
    pub cart_count: Option<u32>,
    pub grid: Option<String>,
    /// Every grid write, in order.
    pub grid_history: Vec<String>,
    pub submit: SubmitControl,
    /// Every submit-control write, in order.
    pub submit_history: Vec<SubmitControl>,
    pub form_resets: usize,
    pub open_modals: Vec<Modal>,
    pub detail: Option<DetailView>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            notices: Vec::new(),
            cart_count: None,
            grid: None,
            grid_history: Vec::new(),
            submit: SubmitControl::enabled(crate::quote::SUBMIT_LABEL),
            submit_history: Vec::new(),
            form_resets: 0,
            open_modals: Vec::new(),
            detail: None,
        }
    }
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Message of the most recent notice.
    #[must_use]
    pub fn last_message(&self) -> Option<&str> {
        self.notices.last().map(|n| n.message.as_str())
    }

    #[must_use]
    pub fn is_open(&self, modal: Modal) -> bool {
        self.open_modals.contains(&modal)
    }
}

impl Surface for RecordingSurface {
    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn set_cart_count(&mut self, count: u32) {
        self.cart_count = Some(count);
    }

    fn set_grid(&mut self, html: &str) {
        self.grid = Some(html.to_string());
        self.grid_history.push(html.to_string());
    }

    fn submit_control(&self) -> SubmitControl {
        self.submit.clone()
    }

    fn set_submit_control(&mut self, control: &SubmitControl) {
        self.submit = control.clone();
        self.submit_history.push(control.clone());
    }

    fn reset_quote_form(&mut self) {
        self.form_resets += 1;
    }

    fn show_modal(&mut self, modal: Modal) {
        if !self.open_modals.contains(&modal) {
            self.open_modals.push(modal);
        }
    }

    fn hide_modal(&mut self, modal: Modal) {
        self.open_modals.retain(|m| *m != modal);
    }

    fn show_detail(&mut self, view: &DetailView) {
        self.detail = Some(view.clone());
    }
}
