//! Application router: maps destinations to screens, exposes the latest
//! view state per destination and dispatches UI events into the owning
//! controller.

mod events;
mod navigation;

pub use events::{TariffsUiEvent, UiEvent, UsageUiEvent};
pub use navigation::AppDestination;

use std::sync::Arc;

use tokio::sync::watch;

use crate::controllers::{TariffsController, UsageController};
use crate::traits::{EnergyApi, StringResourceProvider};
use crate::view_state::{
    PlatformType, ScreenSizeInfo, TariffsViewState, UsageViewState, WindowSizeClass,
};

/// Top-level application state: the visible destination plus one controller
/// per screen.
///
/// All event entry points funnel through [`App::dispatch`] and
/// [`App::notify_screen_size_changed`]; the event loop awaits each call to
/// completion, which serializes every state update.
pub struct App {
    destination: AppDestination,
    tariffs: TariffsController,
    usage: UsageController,
    tariffs_state: watch::Receiver<TariffsViewState>,
    usage_state: watch::Receiver<UsageViewState>,
    screen_size: ScreenSizeInfo,
    window_size_class: WindowSizeClass,
    selected_product: usize,
    should_quit: bool,
}

impl App {
    pub fn new(
        api: Arc<dyn EnergyApi>,
        strings: Arc<dyn StringResourceProvider>,
        demo_mode: bool,
        platform: PlatformType,
    ) -> Self {
        let tariffs = TariffsController::new(Arc::clone(&api), Arc::clone(&strings));
        let usage = UsageController::new(api, strings, demo_mode);
        let tariffs_state = tariffs.view_state();
        let usage_state = usage.view_state();
        let screen_size = ScreenSizeInfo::from_terminal(80, 24);
        Self {
            destination: AppDestination::start_destination(),
            tariffs,
            usage,
            tariffs_state,
            usage_state,
            screen_size,
            window_size_class: WindowSizeClass::classify(screen_size, platform),
            selected_product: 0,
            should_quit: false,
        }
    }

    /// The currently visible destination.
    pub fn destination(&self) -> AppDestination {
        self.destination
    }

    /// Latest tariffs view state snapshot for rendering.
    pub fn tariffs_view_state(&self) -> TariffsViewState {
        self.tariffs_state.borrow().clone()
    }

    /// Latest usage view state snapshot for rendering.
    pub fn usage_view_state(&self) -> UsageViewState {
        self.usage_state.borrow().clone()
    }

    /// Switch to a destination. Activating the one already visible requests
    /// a scroll to top instead, mirroring double-tapped nav items.
    pub fn navigate_to(&mut self, destination: AppDestination) {
        if destination == self.destination {
            match destination {
                AppDestination::Usage => self.usage.request_scroll_to_top(true),
                AppDestination::Tariffs => self.tariffs.request_scroll_to_top(true),
            }
            return;
        }
        self.destination = destination;
        // The newly visible screen derives its layout from the last known
        // window size before its first frame.
        self.forward_screen_size();
    }

    /// Cycle to the next destination in tab order.
    pub fn navigate_next(&mut self) {
        self.navigate_to(self.destination.next());
    }

    /// The terminal was resized.
    pub fn notify_screen_size_changed(&mut self, columns: u16, rows: u16) {
        self.screen_size = ScreenSizeInfo::from_terminal(columns, rows);
        self.window_size_class =
            WindowSizeClass::classify(self.screen_size, self.window_size_class.platform);
        self.forward_screen_size();
    }

    /// Route a UI event to the controller owning the target screen.
    pub async fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::Tariffs(event) => self.dispatch_tariffs(event).await,
            UiEvent::Usage(event) => self.dispatch_usage(event).await,
        }
    }

    /// Index of the highlighted product row, clamped to the current list.
    pub fn selected_product(&self) -> usize {
        let count = self.tariffs_state.borrow().product_summaries.len();
        self.selected_product.min(count.saturating_sub(1))
    }

    /// Move the product selection up.
    pub fn move_selection_up(&mut self) {
        if self.selected_product > 0 {
            self.selected_product -= 1;
        }
    }

    /// Move the product selection down.
    pub fn move_selection_down(&mut self) {
        let count = self.tariffs_state.borrow().product_summaries.len();
        if count > 0 && self.selected_product < count - 1 {
            self.selected_product += 1;
        }
    }

    /// The UI event opening the highlighted product, when there is one.
    pub fn open_selected_product(&self) -> Option<UiEvent> {
        let state = self.tariffs_state.borrow();
        let index = self
            .selected_product
            .min(state.product_summaries.len().saturating_sub(1));
        let product = state.product_summaries.get(index)?;
        Some(UiEvent::Tariffs(TariffsUiEvent::ProductItemClick {
            product_code: product.code.clone(),
            postcode: state.query_postcode.clone().unwrap_or_default(),
        }))
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    async fn dispatch_tariffs(&mut self, event: TariffsUiEvent) {
        match event {
            TariffsUiEvent::Refresh => self.tariffs.refresh().await,
            TariffsUiEvent::QueryPostcode(postcode) => {
                self.tariffs.on_query_postcode(postcode).await
            }
            TariffsUiEvent::ProductItemClick {
                product_code,
                postcode,
            } => {
                self.tariffs
                    .get_product_details(product_code, postcode)
                    .await
            }
            TariffsUiEvent::ProductDetailsDismissed => self.tariffs.on_product_details_dismissed(),
            TariffsUiEvent::SpecialErrorScreenShown => self.tariffs.on_special_error_screen_shown(),
            TariffsUiEvent::ErrorShown(id) => self.tariffs.error_shown(id),
            TariffsUiEvent::ScrolledToTop => self.tariffs.request_scroll_to_top(false),
        }
    }

    async fn dispatch_usage(&mut self, event: UsageUiEvent) {
        match event {
            UsageUiEvent::InitialLoad => self.usage.initial_load().await,
            UsageUiEvent::SwitchPresentationStyle(style) => {
                self.usage.on_switch_presentation_style(style).await
            }
            UsageUiEvent::PreviousTimeFrame => self.usage.on_previous_time_frame().await,
            UsageUiEvent::NextTimeFrame => self.usage.on_next_time_frame().await,
            UsageUiEvent::SpecialErrorScreenShown => self.usage.on_special_error_screen_shown(),
            UsageUiEvent::ErrorShown(id) => self.usage.error_shown(id),
            UsageUiEvent::ScrolledToTop => self.usage.request_scroll_to_top(false),
        }
    }

    fn forward_screen_size(&mut self) {
        match self.destination {
            AppDestination::Usage => self
                .usage
                .notify_screen_size_changed(self.screen_size, self.window_size_class),
            AppDestination::Tariffs => self
                .tariffs
                .notify_screen_size_changed(self.screen_size, self.window_size_class),
        }
    }
}
