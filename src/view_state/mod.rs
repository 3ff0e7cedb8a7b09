//! Per-screen view states and the vocabulary they share.
//!
//! Every screen owns an immutable view state: a snapshot of everything the
//! render layer needs, produced by a single controller and observed through
//! a `tokio::sync::watch` slot. State transitions are functional: each
//! helper consumes the current value and returns its replacement, so the
//! single-writer-multiple-reader model stays trivial to reason about.
//!
//! This module holds the shared pieces:
//!
//! - [`ErrorMessage`]: identified entries of the transient notification queue
//! - [`SpecialErrorScreen`]: full-screen sticky error kinds
//! - [`ScreenSizeInfo`] / [`WindowSizeClass`]: window-size inputs to the
//!   responsive layout classifiers
//! - [`PlatformType`]: coarse platform kind feeding layout decisions

pub mod tariffs;
pub mod usage;

pub use tariffs::{TariffScreenLayoutStyle, TariffsScreenType, TariffsViewState};
pub use usage::{RequestedChartLayout, UsageScreenType, UsageViewState};

use uuid::Uuid;

/// Window width buckets driving responsive layout choices.
pub mod breakpoints {
    /// Widths below this are the Compact bucket (in dp).
    pub const COMPACT_MAX_WIDTH_DP: f32 = 600.0;
    /// Widths below this (and at least compact) are the Medium bucket.
    pub const MEDIUM_MAX_WIDTH_DP: f32 = 840.0;
    /// A list pane narrower than this is not worth a wide row layout.
    pub const WINDOW_WIDTH_COMPACT_DP: f32 = 599.0;
    /// Width of one usage column (in dp).
    pub const USAGE_COLUMN_WIDTH_DP: f32 = 175.0;

    /// Assumed width of one terminal cell in dp.
    pub const CELL_WIDTH_DP: f32 = 8.0;
    /// Assumed height of one terminal cell in dp.
    pub const CELL_HEIGHT_DP: f32 = 16.0;
}

/// A pending transient notification.
///
/// The id keys dismissal and animation in the presentation layer; it is
/// collision-resistant, never relied upon for ordering. Display order is
/// insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    pub id: Uuid,
    pub message: String,
}

impl ErrorMessage {
    /// Create a message with a fresh id.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
        }
    }
}

/// Append a message unless an entry with identical text is already queued.
///
/// No-op under duplicate text: the existing entry (and its id) stays.
pub(crate) fn push_unique_message(
    mut messages: Vec<ErrorMessage>,
    message: String,
) -> Vec<ErrorMessage> {
    if !messages.iter().any(|m| m.message == message) {
        messages.push(ErrorMessage::new(message));
    }
    messages
}

/// Remove the message with the given id, if still queued.
pub(crate) fn remove_message(messages: Vec<ErrorMessage>, id: Uuid) -> Vec<ErrorMessage> {
    messages.into_iter().filter(|m| m.id != id).collect()
}

/// Full-screen error kinds. These are sticky: once a screen type carries
/// one, only an explicit dismissal clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialErrorScreen {
    /// The server answered with this status code.
    HttpError { status_code: u16 },
    /// The server could not be reached.
    NetworkError,
}

/// Coarse platform kind. Layout rules only distinguish desktop from the
/// rest (bottom sheets and click tooltips are touch affordances).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformType {
    Desktop,
    Mobile,
}

impl PlatformType {
    /// The platform this binary was built for.
    pub fn detect() -> Self {
        if cfg!(any(target_os = "android", target_os = "ios")) {
            PlatformType::Mobile
        } else {
            PlatformType::Desktop
        }
    }

    pub fn is_desktop(self) -> bool {
        self == PlatformType::Desktop
    }
}

/// Screen dimensions in density-independent units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSizeInfo {
    pub width_dp: f32,
    pub height_dp: f32,
}

impl ScreenSizeInfo {
    pub fn new(width_dp: f32, height_dp: f32) -> Self {
        Self {
            width_dp,
            height_dp,
        }
    }

    /// Convert a terminal grid into dp using the fixed cell-size constants.
    pub fn from_terminal(columns: u16, rows: u16) -> Self {
        Self {
            width_dp: columns as f32 * breakpoints::CELL_WIDTH_DP,
            height_dp: rows as f32 * breakpoints::CELL_HEIGHT_DP,
        }
    }

    /// Taller than wide.
    pub fn is_portrait(&self) -> bool {
        self.height_dp >= self.width_dp
    }
}

/// Window width class buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowWidthClass {
    Compact,
    Medium,
    Expanded,
}

impl WindowWidthClass {
    /// Bucket a width in dp.
    pub fn from_width_dp(width_dp: f32) -> Self {
        if width_dp < breakpoints::COMPACT_MAX_WIDTH_DP {
            WindowWidthClass::Compact
        } else if width_dp < breakpoints::MEDIUM_MAX_WIDTH_DP {
            WindowWidthClass::Medium
        } else {
            WindowWidthClass::Expanded
        }
    }
}

/// Window classification handed to the layout classifiers: the width bucket
/// plus the platform kind the window is presented on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSizeClass {
    pub width_class: WindowWidthClass,
    pub platform: PlatformType,
}

impl WindowSizeClass {
    pub fn new(width_class: WindowWidthClass, platform: PlatformType) -> Self {
        Self {
            width_class,
            platform,
        }
    }

    /// Classify a screen size for the given platform.
    pub fn classify(screen_size: ScreenSizeInfo, platform: PlatformType) -> Self {
        Self {
            width_class: WindowWidthClass::from_width_dp(screen_size.width_dp),
            platform,
        }
    }
}
