//! View state for the tariffs browsing screen.

use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{ProductDetails, ProductSummary};
use crate::traits::{StringResource, StringResourceProvider};

use super::{
    breakpoints, push_unique_message, remove_message, ErrorMessage, ScreenSizeInfo,
    SpecialErrorScreen, WindowSizeClass, WindowWidthClass,
};

/// Which visual sub-screen the tariffs destination presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TariffsScreenType {
    List,
    FullScreenDetail,
    /// Sticky: kept until an explicit dismissal action runs.
    Error(SpecialErrorScreen),
}

/// Layout variant derived from the window width class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TariffScreenLayoutStyle {
    Compact { use_bottom_sheet: bool },
    Wide { use_bottom_sheet: bool },
    ListDetailPane,
}

/// Immutable snapshot of everything the tariffs screen needs to render.
///
/// Constructed with defaults at controller initialization; every action or
/// fetch completion produces a replacement value via the methods below.
#[derive(Debug, Clone, PartialEq)]
pub struct TariffsViewState {
    pub is_loading: bool,
    pub query_postcode: Option<String>,
    pub product_summaries: Vec<ProductSummary>,
    pub product_details: Option<ProductDetails>,
    pub requested_screen_type: Option<TariffsScreenType>,
    pub requested_layout: TariffScreenLayoutStyle,
    pub requested_wide_list_layout: bool,
    pub request_scroll_to_top: bool,
    pub error_messages: Vec<ErrorMessage>,
}

impl Default for TariffsViewState {
    fn default() -> Self {
        Self {
            is_loading: true,
            query_postcode: None,
            product_summaries: Vec::new(),
            product_details: None,
            requested_screen_type: None,
            requested_layout: TariffScreenLayoutStyle::Compact {
                use_bottom_sheet: true,
            },
            requested_wide_list_layout: false,
            request_scroll_to_top: false,
            error_messages: Vec::new(),
        }
    }
}

impl TariffsViewState {
    /// Whether product details should present as a bottom sheet.
    pub fn should_use_bottom_sheet(&self) -> bool {
        matches!(
            self.requested_layout,
            TariffScreenLayoutStyle::Compact {
                use_bottom_sheet: true
            } | TariffScreenLayoutStyle::Wide {
                use_bottom_sheet: true
            }
        )
    }

    // Make it less intrusive when hopping among products
    pub fn should_show_loading_screen(&self) -> bool {
        self.is_loading && self.product_summaries.is_empty()
    }

    /// Re-derive the layout from the current window size.
    ///
    /// Pure over its inputs: re-run on every window-size-change
    /// notification, never touching fetch state.
    pub fn update_layout(
        self,
        screen_size: ScreenSizeInfo,
        window_size_class: WindowSizeClass,
    ) -> Self {
        let use_bottom_sheet = !window_size_class.platform.is_desktop();
        let requested_layout = match window_size_class.width_class {
            WindowWidthClass::Compact => TariffScreenLayoutStyle::Compact { use_bottom_sheet },
            WindowWidthClass::Medium => TariffScreenLayoutStyle::Wide { use_bottom_sheet },
            WindowWidthClass::Expanded => TariffScreenLayoutStyle::ListDetailPane,
        };
        let requested_wide_list_layout = match window_size_class.width_class {
            WindowWidthClass::Compact => false,
            WindowWidthClass::Medium => true,
            // List pane width
            WindowWidthClass::Expanded => {
                (screen_size.width_dp / 2.0) > breakpoints::WINDOW_WIDTH_COMPACT_DP
            }
        };

        Self {
            requested_layout,
            requested_wide_list_layout,
            ..self
        }
    }

    /// Decide which screen variant to show. Called after every mutation.
    pub fn update_screen_type(self) -> Self {
        let requested_screen_type = if self.is_error_screen() {
            // Error screen is kept until being told to dismiss
            self.requested_screen_type
        } else if self.should_show_tariffs_list() {
            Some(TariffsScreenType::List)
        } else if self.has_product_details_loaded() {
            Some(TariffsScreenType::FullScreenDetail)
        } else {
            // nothing triggered for a change, just keep it
            self.requested_screen_type
        };

        Self {
            requested_screen_type,
            ..self
        }
    }

    /// Classify a fetch failure and stop loading.
    ///
    /// HTTP and network failures become the sticky full-screen error;
    /// anything else joins the transient notification queue, resolving a
    /// localized fallback when the failure carries no message of its own.
    pub async fn filter_error_and_stop_loading(
        self,
        error: ApiError,
        strings: &dyn StringResourceProvider,
    ) -> Self {
        match error {
            ApiError::HttpStatus { status } => Self {
                requested_screen_type: Some(TariffsScreenType::Error(
                    SpecialErrorScreen::HttpError {
                        status_code: status,
                    },
                )),
                is_loading: false,
                ..self
            },
            ApiError::NetworkUnreachable => Self {
                requested_screen_type: Some(TariffsScreenType::Error(
                    SpecialErrorScreen::NetworkError,
                )),
                is_loading: false,
                ..self
            },
            ApiError::Other { message } => {
                let message = match message {
                    Some(message) => message,
                    None => {
                        strings
                            .get_string(StringResource::AccountErrorLoadAccount, &[])
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
            requested_screen_type: None,
            ..self
        }
    }

    /// Clear the product detail payload (detail pane or sheet closed).
    pub fn dismiss_product_details(self) -> Self {
        Self {
            product_details: None,
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

    fn should_show_tariffs_list(&self) -> bool {
        self.product_details.is_none()
            || self.requested_layout == TariffScreenLayoutStyle::ListDetailPane
            || self.requested_layout
                == (TariffScreenLayoutStyle::Compact {
                    use_bottom_sheet: true,
                })
            || self.requested_layout
                == (TariffScreenLayoutStyle::Wide {
                    use_bottom_sheet: true,
                })
    }

    fn is_error_screen(&self) -> bool {
        matches!(
            self.requested_screen_type,
            Some(TariffsScreenType::Error(_))
        )
    }

    fn has_product_details_loaded(&self) -> bool {
        self.product_details.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::PlatformType;
    use chrono::Utc;

    fn window(width_class: WindowWidthClass, platform: PlatformType) -> WindowSizeClass {
        WindowSizeClass::new(width_class, platform)
    }

    fn details() -> ProductDetails {
        ProductDetails {
            code: "AGILE-24-10-01".to_string(),
            display_name: "Agile".to_string(),
            full_name: "Agile Tariff".to_string(),
            description: "Half-hourly pricing".to_string(),
            features: Vec::new(),
            term: None,
            available_from: Utc::now(),
            tariffs: Vec::new(),
        }
    }

    #[test]
    fn test_compact_width_class_uses_compact_layout() {
        let state = TariffsViewState::default().update_layout(
            ScreenSizeInfo::new(400.0, 800.0),
            window(WindowWidthClass::Compact, PlatformType::Mobile),
        );
        assert_eq!(
            state.requested_layout,
            TariffScreenLayoutStyle::Compact {
                use_bottom_sheet: true
            }
        );
        assert!(!state.requested_wide_list_layout);
    }

    #[test]
    fn test_desktop_never_uses_bottom_sheet() {
        let state = TariffsViewState::default().update_layout(
            ScreenSizeInfo::new(700.0, 500.0),
            window(WindowWidthClass::Medium, PlatformType::Desktop),
        );
        assert_eq!(
            state.requested_layout,
            TariffScreenLayoutStyle::Wide {
                use_bottom_sheet: false
            }
        );
        assert!(!state.should_use_bottom_sheet());
    }

    #[test]
    fn test_medium_width_class_requests_wide_list_layout() {
        let state = TariffsViewState::default().update_layout(
            ScreenSizeInfo::new(700.0, 500.0),
            window(WindowWidthClass::Medium, PlatformType::Mobile),
        );
        assert!(state.requested_wide_list_layout);
    }

    #[test]
    fn test_expanded_wide_list_layout_depends_on_half_width() {
        // Half of 1200 exceeds the 599 threshold.
        let wide = TariffsViewState::default().update_layout(
            ScreenSizeInfo::new(1200.0, 800.0),
            window(WindowWidthClass::Expanded, PlatformType::Desktop),
        );
        assert_eq!(wide.requested_layout, TariffScreenLayoutStyle::ListDetailPane);
        assert!(wide.requested_wide_list_layout);

        // Half of 1000 does not.
        let narrow = TariffsViewState::default().update_layout(
            ScreenSizeInfo::new(1000.0, 800.0),
            window(WindowWidthClass::Expanded, PlatformType::Desktop),
        );
        assert!(!narrow.requested_wide_list_layout);
    }

    #[test]
    fn test_layout_update_never_touches_fetch_state() {
        let state = TariffsViewState {
            product_details: Some(details()),
            is_loading: true,
            ..TariffsViewState::default()
        };
        let updated = state.clone().update_layout(
            ScreenSizeInfo::new(1200.0, 800.0),
            window(WindowWidthClass::Expanded, PlatformType::Desktop),
        );
        assert_eq!(updated.product_details, state.product_details);
        assert_eq!(updated.is_loading, state.is_loading);
    }

    #[test]
    fn test_screen_type_resolves_to_list_without_selection() {
        let state = TariffsViewState::default().update_screen_type();
        assert_eq!(state.requested_screen_type, Some(TariffsScreenType::List));
    }

    #[test]
    fn test_screen_type_resolves_to_full_detail_without_bottom_sheet() {
        let state = TariffsViewState {
            product_details: Some(details()),
            requested_layout: TariffScreenLayoutStyle::Compact {
                use_bottom_sheet: false,
            },
            ..TariffsViewState::default()
        }
        .update_screen_type();
        assert_eq!(
            state.requested_screen_type,
            Some(TariffsScreenType::FullScreenDetail)
        );
    }

    #[test]
    fn test_list_detail_pane_keeps_list_even_with_selection() {
        let state = TariffsViewState {
            product_details: Some(details()),
            requested_layout: TariffScreenLayoutStyle::ListDetailPane,
            ..TariffsViewState::default()
        }
        .update_screen_type();
        assert_eq!(state.requested_screen_type, Some(TariffsScreenType::List));
    }

    #[test]
    fn test_error_screen_is_sticky_across_resolution() {
        let error = TariffsScreenType::Error(SpecialErrorScreen::NetworkError);
        let state = TariffsViewState {
            requested_screen_type: Some(error),
            product_details: Some(details()),
            ..TariffsViewState::default()
        }
        .update_screen_type();
        assert_eq!(state.requested_screen_type, Some(error));
    }

    #[test]
    fn test_dismissal_unsticks_error_screen() {
        let state = TariffsViewState {
            requested_screen_type: Some(TariffsScreenType::Error(
                SpecialErrorScreen::NetworkError,
            )),
            ..TariffsViewState::default()
        }
        .dismiss_special_error_screen()
        .update_screen_type();
        assert_eq!(state.requested_screen_type, Some(TariffsScreenType::List));
    }

    #[tokio::test]
    async fn test_http_error_sets_sticky_error_screen() {
        let strings = crate::traits::EnglishStringProvider;
        let state = TariffsViewState::default()
            .filter_error_and_stop_loading(ApiError::HttpStatus { status: 503 }, &strings)
            .await;
        assert_eq!(
            state.requested_screen_type,
            Some(TariffsScreenType::Error(SpecialErrorScreen::HttpError {
                status_code: 503
            }))
        );
        assert!(!state.is_loading);
        assert!(state.error_messages.is_empty());
    }

    #[tokio::test]
    async fn test_network_error_sets_sticky_error_screen() {
        let strings = crate::traits::EnglishStringProvider;
        let state = TariffsViewState::default()
            .filter_error_and_stop_loading(ApiError::NetworkUnreachable, &strings)
            .await;
        assert_eq!(
            state.requested_screen_type,
            Some(TariffsScreenType::Error(SpecialErrorScreen::NetworkError))
        );
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_generic_error_joins_notification_queue() {
        let strings = crate::traits::EnglishStringProvider;
        let state = TariffsViewState::default()
            .filter_error_and_stop_loading(ApiError::other("postcode not found"), &strings)
            .await;
        assert_eq!(state.requested_screen_type, None);
        assert!(!state.is_loading);
        assert_eq!(state.error_messages.len(), 1);
        assert_eq!(state.error_messages[0].message, "postcode not found");
    }

    #[tokio::test]
    async fn test_generic_error_without_message_uses_localized_fallback() {
        let strings = crate::traits::EnglishStringProvider;
        let state = TariffsViewState::default()
            .filter_error_and_stop_loading(ApiError::Other { message: None }, &strings)
            .await;
        assert_eq!(
            state.error_messages[0].message,
            "Unable to retrieve your account details"
        );
    }

    #[tokio::test]
    async fn test_duplicate_error_messages_are_suppressed() {
        let strings = crate::traits::EnglishStringProvider;
        let state = TariffsViewState::default()
            .filter_error_and_stop_loading(ApiError::other("same text"), &strings)
            .await
            .filter_error_and_stop_loading(ApiError::other("same text"), &strings)
            .await;
        assert_eq!(state.error_messages.len(), 1);
    }

    #[test]
    fn test_error_shown_removes_only_that_entry() {
        let state = TariffsViewState {
            error_messages: vec![ErrorMessage::new("one"), ErrorMessage::new("two")],
            ..TariffsViewState::default()
        };
        let id = state.error_messages[0].id;
        let state = state.error_shown(id);
        assert_eq!(state.error_messages.len(), 1);
        assert_eq!(state.error_messages[0].message, "two");
    }

    #[test]
    fn test_loading_screen_only_when_no_data_yet() {
        let empty = TariffsViewState::default();
        assert!(empty.should_show_loading_screen());

        // Non-blocking refresh: loading with data present keeps the list.
        let refreshing = TariffsViewState {
            product_summaries: vec![ProductSummary {
                code: "VAR-22-11-01".to_string(),
                display_name: "Flexible".to_string(),
                full_name: "Flexible Tariff".to_string(),
                description: "Variable rates".to_string(),
                features: Vec::new(),
                term: None,
                available_from: Utc::now(),
                brand: "OCTOPUS_ENERGY".to_string(),
            }],
            ..TariffsViewState::default()
        };
        assert!(!refreshing.should_show_loading_screen());
    }
}
