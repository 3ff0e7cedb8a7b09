//! Controller for the tariffs browsing screen.

use std::sync::Arc;

use tokio::sync::watch;
use uuid::Uuid;

use crate::traits::{EnergyApi, StringResourceProvider};
use crate::view_state::{ScreenSizeInfo, TariffsViewState, WindowSizeClass};

/// Single writer of [`TariffsViewState`].
pub struct TariffsController {
    api: Arc<dyn EnergyApi>,
    strings: Arc<dyn StringResourceProvider>,
    state: watch::Sender<TariffsViewState>,
}

impl TariffsController {
    pub fn new(api: Arc<dyn EnergyApi>, strings: Arc<dyn StringResourceProvider>) -> Self {
        let (state, _) = watch::channel(TariffsViewState::default());
        Self {
            api,
            strings,
            state,
        }
    }

    /// Handle for observing the latest view state.
    pub fn view_state(&self) -> watch::Receiver<TariffsViewState> {
        self.state.subscribe()
    }

    /// Reload the product list for the current postcode query.
    pub async fn refresh(&mut self) {
        self.publish(TariffsViewState {
            is_loading: true,
            ..self.current()
        });

        let postcode = self.current().query_postcode;
        match self.api.get_products(postcode.as_deref()).await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "loaded product summaries");
                self.publish(
                    TariffsViewState {
                        product_summaries: products,
                        is_loading: false,
                        ..self.current()
                    }
                    .update_screen_type(),
                );
            }
            Err(error) => {
                tracing::warn!(%error, "product list fetch failed");
                let next = self
                    .current()
                    .filter_error_and_stop_loading(error, self.strings.as_ref())
                    .await;
                self.publish(next);
            }
        }
    }

    /// Change the postcode filter and reload.
    pub async fn on_query_postcode(&mut self, postcode: String) {
        let query = if postcode.trim().is_empty() {
            None
        } else {
            Some(postcode)
        };
        self.publish(TariffsViewState {
            query_postcode: query,
            ..self.current()
        });
        self.refresh().await;
    }

    /// Fetch the full record for a selected product.
    pub async fn get_product_details(&mut self, product_code: String, postcode: String) {
        self.publish(TariffsViewState {
            is_loading: true,
            ..self.current()
        });

        match self.api.get_product_details(&product_code, &postcode).await {
            Ok(details) => {
                self.publish(
                    TariffsViewState {
                        product_details: Some(details),
                        is_loading: false,
                        ..self.current()
                    }
                    .update_screen_type(),
                );
            }
            Err(error) => {
                tracing::warn!(%error, %product_code, "product detail fetch failed");
                let next = self
                    .current()
                    .filter_error_and_stop_loading(error, self.strings.as_ref())
                    .await;
                self.publish(next);
            }
        }
    }

    /// The detail pane or sheet was closed.
    pub fn on_product_details_dismissed(&mut self) {
        self.publish(self.current().dismiss_product_details().update_screen_type());
    }

    /// The full-screen error was acknowledged.
    pub fn on_special_error_screen_shown(&mut self) {
        self.publish(
            self.current()
                .dismiss_special_error_screen()
                .update_screen_type(),
        );
    }

    /// A transient notification finished showing.
    pub fn error_shown(&mut self, id: Uuid) {
        self.publish(self.current().error_shown(id));
    }

    /// The window was resized; re-derive layout and screen type.
    pub fn notify_screen_size_changed(
        &mut self,
        screen_size: ScreenSizeInfo,
        window_size_class: WindowSizeClass,
    ) {
        self.publish(
            self.current()
                .update_layout(screen_size, window_size_class)
                .update_screen_type(),
        );
    }

    pub fn request_scroll_to_top(&mut self, enabled: bool) {
        self.publish(self.current().with_scroll_to_top(enabled));
    }

    fn current(&self) -> TariffsViewState {
        self.state.borrow().clone()
    }

    fn publish(&self, next: TariffsViewState) {
        self.state.send_replace(next);
    }
}
