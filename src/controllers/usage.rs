//! Controller for the consumption (usage) screen.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use uuid::Uuid;

use crate::models::{
    consumption_range, BarChartData, ConsumptionPresentationStyle, Insights,
};
use crate::traits::{EnergyApi, StringResourceProvider};
use crate::view_state::{ScreenSizeInfo, UsageViewState, WindowSizeClass};

/// Single writer of [`UsageViewState`].
pub struct UsageController {
    api: Arc<dyn EnergyApi>,
    strings: Arc<dyn StringResourceProvider>,
    demo_mode: bool,
    state: watch::Sender<UsageViewState>,
}

impl UsageController {
    pub fn new(
        api: Arc<dyn EnergyApi>,
        strings: Arc<dyn StringResourceProvider>,
        demo_mode: bool,
    ) -> Self {
        let (state, _) = watch::channel(UsageViewState::default());
        Self {
            api,
            strings,
            demo_mode,
            state,
        }
    }

    /// Handle for observing the latest view state.
    pub fn view_state(&self) -> watch::Receiver<UsageViewState> {
        self.state.subscribe()
    }

    /// Load the account profile, its tariff and the current period.
    pub async fn initial_load(&mut self) {
        self.publish(UsageViewState {
            is_loading: true,
            is_demo_mode: Some(self.demo_mode),
            ..self.current()
        });

        let profile = match self.api.get_user_profile().await {
            Ok(profile) => profile,
            Err(error) => {
                tracing::warn!(%error, "account fetch failed");
                let next = self
                    .current()
                    .clear_data_fields_and_stop_loading()
                    .filter_error_and_stop_loading(error, None, self.strings.as_ref())
                    .await;
                self.publish(next);
                return;
            }
        };

        // The tariff is presentation garnish for insights; its failure must
        // not take the whole screen down.
        let tariff = match &profile.tariff_code {
            Some(code) => match self.api.get_tariff(code).await {
                Ok(tariff) => Some(tariff),
                Err(error) => {
                    tracing::warn!(%error, "tariff fetch failed");
                    let next = self
                        .current()
                        .filter_error_and_stop_loading(error, None, self.strings.as_ref())
                        .await;
                    self.publish(next);
                    None
                }
            },
            None => None,
        };

        let filter = self
            .current()
            .consumption_query_filter
            .unwrap_or_default();
        self.publish(UsageViewState {
            user_profile: Some(profile),
            tariff,
            consumption_query_filter: Some(filter),
            ..self.current()
        });

        self.load_consumptions().await;
    }

    /// Present the same period with a different granularity.
    pub async fn on_switch_presentation_style(&mut self, style: ConsumptionPresentationStyle) {
        let filter = self
            .current()
            .consumption_query_filter
            .unwrap_or_default()
            .with_presentation_style(style);
        self.publish(UsageViewState {
            consumption_query_filter: Some(filter),
            is_loading: true,
            ..self.current()
        });
        self.load_consumptions().await;
    }

    /// Step one period back in time.
    pub async fn on_previous_time_frame(&mut self) {
        let filter = self
            .current()
            .consumption_query_filter
            .unwrap_or_default()
            .navigate_backward();
        self.publish(UsageViewState {
            consumption_query_filter: Some(filter),
            is_loading: true,
            ..self.current()
        });
        self.load_consumptions().await;
    }

    /// Step one period forward, ignoring requests past the current period.
    pub async fn on_next_time_frame(&mut self) {
        let filter = self.current().consumption_query_filter.unwrap_or_default();
        if !filter.can_navigate_forward(Utc::now()) {
            return;
        }
        self.publish(UsageViewState {
            consumption_query_filter: Some(filter.navigate_forward()),
            is_loading: true,
            ..self.current()
        });
        self.load_consumptions().await;
    }

    /// The full-screen error was acknowledged.
    pub fn on_special_error_screen_shown(&mut self) {
        self.publish(self.current().dismiss_special_error_screen());
    }

    /// A transient notification finished showing.
    pub fn error_shown(&mut self, id: Uuid) {
        self.publish(self.current().error_shown(id));
    }

    /// The window was resized; re-derive chart layout and columns.
    pub fn notify_screen_size_changed(
        &mut self,
        screen_size: ScreenSizeInfo,
        window_size_class: WindowSizeClass,
    ) {
        self.publish(self.current().update_layout(screen_size, window_size_class));
    }

    pub fn request_scroll_to_top(&mut self, enabled: bool) {
        self.publish(self.current().with_scroll_to_top(enabled));
    }

    async fn load_consumptions(&mut self) {
        let state = self.current();
        let filter = state.consumption_query_filter.unwrap_or_default();
        let (from, to) = filter.requested_period();

        match self.api.get_consumption(from, to).await {
            Ok(consumptions) => {
                tracing::debug!(count = consumptions.len(), "loaded consumption cells");
                let grouped = filter.group_cells(&consumptions);
                let range = consumption_range(&consumptions);
                let chart =
                    BarChartData::from_consumptions(&consumptions, filter.presentation_style);
                let tariff = self.current().tariff;
                let insights = Insights::calculate(&consumptions, tariff.as_ref());
                self.publish(UsageViewState {
                    consumption_grouped_cells: grouped,
                    consumption_range: range,
                    bar_chart_data: Some(chart),
                    insights,
                    is_loading: false,
                    ..self.current()
                });
            }
            Err(error) => {
                tracing::warn!(%error, "consumption fetch failed");
                let next = self
                    .current()
                    .filter_error_and_stop_loading(error, None, self.strings.as_ref())
                    .await;
                self.publish(next);
            }
        }
    }

    fn current(&self) -> UsageViewState {
        self.state.borrow().clone()
    }

    fn publish(&self, next: UsageViewState) {
        self.state.send_replace(next);
    }
}
