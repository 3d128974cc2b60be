//! Terminal rendering of the storefront surface.

use std::fmt;
use std::io::Write;

use tindi_storefront::detail::DetailView;
use tindi_storefront::surface::{Modal, Notice, NoticeKind, SubmitControl, Surface};

/// A [`Surface`] that writes to a terminal (or any writer).
///
/// The product grid is HTML; it is kept and only echoed when `echo_grid` is
/// set.
pub struct TerminalSurface<W> {
    out: W,
    echo_grid: bool,
    grid: Option<String>,
    submit: SubmitControl,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            echo_grid: false,
            grid: None,
            submit: SubmitControl::enabled(tindi_storefront::quote::SUBMIT_LABEL),
        }
    }

    #[must_use]
    pub fn echo_grid(mut self, echo: bool) -> Self {
        self.echo_grid = echo;
        self
    }

    /// Last grid fragment drawn.
    pub fn grid(&self) -> Option<&str> {
        self.grid.as_deref()
    }

    /// Write one line.
    pub fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{args}") {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn notify(&mut self, notice: &Notice) {
        let tag = match notice.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
            NoticeKind::Warning => "warning",
        };
        for (i, text) in notice.message.lines().enumerate() {
            if i == 0 {
                self.line(format_args!("[{tag}] {text}"));
            } else {
                self.line(format_args!("        {text}"));
            }
        }
    }

    fn set_cart_count(&mut self, count: u32) {
        tracing::debug!(count, "Cart badge updated");
    }

    fn set_grid(&mut self, html: &str) {
        if self.echo_grid {
            self.line(format_args!("{html}"));
        }
        self.grid = Some(html.to_string());
    }

    fn submit_control(&self) -> SubmitControl {
        self.submit.clone()
    }

    fn set_submit_control(&mut self, control: &SubmitControl) {
        if control.disabled {
            self.line(format_args!("{}", control.label));
        }
        self.submit = control.clone();
    }

    fn reset_quote_form(&mut self) {}

    fn show_modal(&mut self, modal: Modal) {
        tracing::debug!(?modal, "Modal opened");
    }

    fn hide_modal(&mut self, modal: Modal) {
        tracing::debug!(?modal, "Modal closed");
    }

    fn show_detail(&mut self, view: &DetailView) {
        self.line(format_args!("{}", view.name));
        self.line(format_args!("  Price: {}", view.price));
        self.line(format_args!("  Image: {}", view.image));
        self.line(format_args!("  {}", view.description));
        if !view.add_enabled {
            self.line(format_args!("  {}", view.add_label));
        }
    }
}
