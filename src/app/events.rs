//! UI events dispatched from the render layer into the controllers.

use uuid::Uuid;

use crate::models::ConsumptionPresentationStyle;

/// Actions the tariffs screen can raise.
#[derive(Debug, Clone, PartialEq)]
pub enum TariffsUiEvent {
    Refresh,
    QueryPostcode(String),
    ProductItemClick {
        product_code: String,
        postcode: String,
    },
    ProductDetailsDismissed,
    SpecialErrorScreenShown,
    ErrorShown(Uuid),
    ScrolledToTop,
}

/// Actions the usage screen can raise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UsageUiEvent {
    InitialLoad,
    SwitchPresentationStyle(ConsumptionPresentationStyle),
    PreviousTimeFrame,
    NextTimeFrame,
    SpecialErrorScreenShown,
    ErrorShown(Uuid),
    ScrolledToTop,
}

/// An action routed to the controller owning the target screen.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Tariffs(TariffsUiEvent),
    Usage(UsageUiEvent),
}
