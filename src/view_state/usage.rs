//! View state for the consumption (usage) screen.

use std::ops::RangeInclusive;

use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    BarChartData, ConsumptionGroupedCells, ConsumptionQueryFilter, Insights, Tariff, UserProfile,
};
use crate::traits::{StringResource, StringResourceProvider};

use super::{
    breakpoints, push_unique_message, remove_message, ErrorMessage, ScreenSizeInfo,
    SpecialErrorScreen, WindowSizeClass, WindowWidthClass,
};

/// Which visual sub-screen the usage destination presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageScreenType {
    Chart,
    /// Sticky: kept until an explicit dismissal action runs.
    Error(SpecialErrorScreen),
}

/// Chart layout derived from the screen orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequestedChartLayout {
    Portrait,
    Landscape {
        /// Cap on the chart height, in dp.
        requested_max_height: f32,
    },
}

/// Immutable snapshot of everything the usage screen needs to render.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageViewState {
    pub is_loading: bool,
    pub is_demo_mode: Option<bool>,
    pub user_profile: Option<UserProfile>,
    pub tariff: Option<Tariff>,
    pub show_tool_tip_on_click: bool,
    pub requested_screen_type: UsageScreenType,
    pub requested_chart_layout: RequestedChartLayout,
    pub requested_adaptive_layout: WindowWidthClass,
    pub requested_usage_columns: usize,
    pub consumption_query_filter: Option<ConsumptionQueryFilter>,
    pub consumption_grouped_cells: Vec<ConsumptionGroupedCells>,
    pub consumption_range: RangeInclusive<f64>,
    pub bar_chart_data: Option<BarChartData>,
    pub insights: Option<Insights>,
    pub request_scroll_to_top: bool,
    pub error_messages: Vec<ErrorMessage>,
}

impl Default for UsageViewState {
    fn default() -> Self {
        Self {
            is_loading: true,
            is_demo_mode: None,
            user_profile: None,
            tariff: None,
            show_tool_tip_on_click: false,
            requested_screen_type: UsageScreenType::Chart,
            requested_chart_layout: RequestedChartLayout::Portrait,
            requested_adaptive_layout: WindowWidthClass::Compact,
            requested_usage_columns: 1,
            consumption_query_filter: None,
            consumption_grouped_cells: Vec::new(),
            consumption_range: 0.0..=0.0,
            bar_chart_data: None,
            insights: None,
            request_scroll_to_top: false,
            error_messages: Vec::new(),
        }
    }
}

impl UsageViewState {
    /// Re-derive chart layout, column count and tooltip behavior from the
    /// current window size. Pure; never touches fetch state.
    pub fn update_layout(
        self,
        screen_size: ScreenSizeInfo,
        window_size_class: WindowSizeClass,
    ) -> Self {
        let show_tool_tip_on_click = !window_size_class.platform.is_desktop();
        let usage_columns =
            (screen_size.width_dp / breakpoints::USAGE_COLUMN_WIDTH_DP) as usize;
        let requested_chart_layout = if screen_size.is_portrait() {
            RequestedChartLayout::Portrait
        } else {
            RequestedChartLayout::Landscape {
                requested_max_height: screen_size.height_dp / 2.0,
            }
        };

        Self {
            show_tool_tip_on_click,
            requested_adaptive_layout: window_size_class.width_class,
            requested_chart_layout,
            requested_usage_columns: usage_columns,
            ..self
        }
    }

    /// Drop every fetched payload and stop loading, keeping the error queue
    /// and the requested screen type untouched.
    pub fn clear_data_fields_and_stop_loading(self) -> Self {
        Self {
            user_profile: None,
            consumption_grouped_cells: Vec::new(),
            consumption_range: 0.0..=0.0,
            bar_chart_data: None,
            insights: None,
            is_loading: false,
            ..self
        }
    }

    /// Classify a fetch failure and stop loading.
    ///
    /// The generic branch prefers the failure's own message, then the
    /// supplied default, then the localized tariff-load fallback.
    pub async fn filter_error_and_stop_loading(
        self,
        error: ApiError,
        default_message: Option<String>,
        strings: &dyn StringResourceProvider,
    ) -> Self {
        match error {
            ApiError::HttpStatus { status } => Self {
                requested_screen_type: UsageScreenType::Error(SpecialErrorScreen::HttpError {
                    status_code: status,
                }),
                is_loading: false,
                ..self
            },
            ApiError::NetworkUnreachable => Self {
                requested_screen_type: UsageScreenType::Error(SpecialErrorScreen::NetworkError),
                is_loading: false,
                ..self
            },
            ApiError::Other { message } => {
                let message = match message.or(default_message) {
                    Some(message) => message,
                    None => {
                        strings
                            .get_string(StringResource::AccountErrorLoadTariff, &[])
                            .await
                    }
                };
                self.handle_error_and_stop_loading(message)
            }
        }
    }

    /// Remove a shown notification from the queue.
    pub fn error_shown(self, id: Uuid) -> Self {
        Self {
            error_messages: remove_message(self.error_messages, id),
            ..self
        }
    }

    /// Explicit dismissal of the sticky full-screen error.
    pub fn dismiss_special_error_screen(self) -> Self {
        Self {
            requested_screen_type: UsageScreenType::Chart,
            ..self
        }
    }

    pub fn with_scroll_to_top(self, enabled: bool) -> Self {
        Self {
            request_scroll_to_top: enabled,
            ..self
        }
    }

    fn handle_error_and_stop_loading(self, message: String) -> Self {
        Self {
            error_messages: push_unique_message(self.error_messages, message),
            is_loading: false,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::EnglishStringProvider;
    use crate::view_state::PlatformType;

    fn landscape(width_dp: f32, height_dp: f32) -> ScreenSizeInfo {
        ScreenSizeInfo::new(width_dp, height_dp)
    }

    fn window_for(size: ScreenSizeInfo, platform: PlatformType) -> WindowSizeClass {
        WindowSizeClass::classify(size, platform)
    }

    #[test]
    fn test_column_count_is_floor_of_width_over_column_unit() {
        for (width, expected) in [(0.0, 0), (175.0, 1), (349.0, 1), (350.0, 2)] {
            let size = landscape(width, 2000.0);
            let state = UsageViewState::default()
                .update_layout(size, window_for(size, PlatformType::Desktop));
            assert_eq!(
                state.requested_usage_columns, expected,
                "width {} dp should yield {} columns",
                width, expected
            );
        }
    }

    #[test]
    fn test_portrait_screen_requests_portrait_chart() {
        let size = landscape(400.0, 800.0);
        let state =
            UsageViewState::default().update_layout(size, window_for(size, PlatformType::Mobile));
        assert_eq!(state.requested_chart_layout, RequestedChartLayout::Portrait);
    }

    #[test]
    fn test_landscape_chart_max_height_is_half_screen_height() {
        let size = landscape(1280.0, 720.0);
        let state = UsageViewState::default()
            .update_layout(size, window_for(size, PlatformType::Desktop));
        assert_eq!(
            state.requested_chart_layout,
            RequestedChartLayout::Landscape {
                requested_max_height: 360.0
            }
        );
    }

    #[test]
    fn test_tooltip_on_click_only_off_desktop() {
        let size = landscape(800.0, 600.0);
        let mobile =
            UsageViewState::default().update_layout(size, window_for(size, PlatformType::Mobile));
        assert!(mobile.show_tool_tip_on_click);

        let desktop = UsageViewState::default()
            .update_layout(size, window_for(size, PlatformType::Desktop));
        assert!(!desktop.show_tool_tip_on_click);
    }

    #[test]
    fn test_layout_update_stores_width_class() {
        let size = landscape(700.0, 500.0);
        let state = UsageViewState::default()
            .update_layout(size, window_for(size, PlatformType::Desktop));
        assert_eq!(state.requested_adaptive_layout, WindowWidthClass::Medium);
    }

    #[test]
    fn test_clear_data_fields_resets_payloads_and_loading() {
        let state = UsageViewState {
            user_profile: Some(UserProfile {
                account_number: "A-1234A5B6".to_string(),
                postcode: None,
                mpan: "1200023456789".to_string(),
                meter_serial_number: "21E1234567".to_string(),
                tariff_code: None,
                moved_in_at: None,
            }),
            consumption_range: 0.0..=4.0,
            error_messages: vec![ErrorMessage::new("kept")],
            requested_screen_type: UsageScreenType::Error(SpecialErrorScreen::NetworkError),
            is_loading: true,
            ..UsageViewState::default()
        };

        let cleared = state.clear_data_fields_and_stop_loading();
        assert_eq!(cleared.user_profile, None);
        assert!(cleared.consumption_grouped_cells.is_empty());
        assert_eq!(cleared.consumption_range, 0.0..=0.0);
        assert_eq!(cleared.bar_chart_data, None);
        assert_eq!(cleared.insights, None);
        assert!(!cleared.is_loading);
        // Preserved across the clear:
        assert_eq!(cleared.error_messages.len(), 1);
        assert_eq!(
            cleared.requested_screen_type,
            UsageScreenType::Error(SpecialErrorScreen::NetworkError)
        );
    }

    #[tokio::test]
    async fn test_http_error_sets_sticky_error_screen() {
        let state = UsageViewState::default()
            .filter_error_and_stop_loading(
                ApiError::HttpStatus { status: 401 },
                None,
                &EnglishStringProvider,
            )
            .await;
        assert_eq!(
            state.requested_screen_type,
            UsageScreenType::Error(SpecialErrorScreen::HttpError { status_code: 401 })
        );
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_generic_error_prefers_own_message_over_default() {
        let state = UsageViewState::default()
            .filter_error_and_stop_loading(
                ApiError::other("meter offline"),
                Some("default text".to_string()),
                &EnglishStringProvider,
            )
            .await;
        assert_eq!(state.error_messages[0].message, "meter offline");
    }

    #[tokio::test]
    async fn test_generic_error_falls_back_to_supplied_default() {
        let state = UsageViewState::default()
            .filter_error_and_stop_loading(
                ApiError::Other { message: None },
                Some("default text".to_string()),
                &EnglishStringProvider,
            )
            .await;
        assert_eq!(state.error_messages[0].message, "default text");
    }

    #[tokio::test]
    async fn test_generic_error_falls_back_to_localized_string() {
        let state = UsageViewState::default()
            .filter_error_and_stop_loading(
                ApiError::Other { message: None },
                None,
                &EnglishStringProvider,
            )
            .await;
        assert_eq!(
            state.error_messages[0].message,
            "Unable to retrieve your tariff"
        );
    }

    #[tokio::test]
    async fn test_duplicate_messages_are_suppressed() {
        let state = UsageViewState::default()
            .filter_error_and_stop_loading(
                ApiError::other("twice"),
                None,
                &EnglishStringProvider,
            )
            .await
            .filter_error_and_stop_loading(
                ApiError::other("twice"),
                None,
                &EnglishStringProvider,
            )
            .await;
        assert_eq!(state.error_messages.len(), 1);
    }

    #[test]
    fn test_dismissal_returns_to_chart_screen() {
        let state = UsageViewState {
            requested_screen_type: UsageScreenType::Error(SpecialErrorScreen::NetworkError),
            ..UsageViewState::default()
        }
        .dismiss_special_error_screen();
        assert_eq!(state.requested_screen_type, UsageScreenType::Chart);
    }
}
