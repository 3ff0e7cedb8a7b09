//! Navigation destinations.

/// Named destinations in the bottom navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppDestination {
    Usage,
    Tariffs,
}

impl AppDestination {
    pub const ALL: [AppDestination; 2] = [AppDestination::Usage, AppDestination::Tariffs];

    /// Destination shown when the app starts.
    pub fn start_destination() -> Self {
        AppDestination::Usage
    }

    /// Tab label.
    pub fn title(self) -> &'static str {
        match self {
            AppDestination::Usage => "Usage",
            AppDestination::Tariffs => "Tariffs",
        }
    }

    /// The next destination in tab order, wrapping at the end.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_destination_is_usage() {
        assert_eq!(AppDestination::start_destination(), AppDestination::Usage);
    }

    #[test]
    fn test_next_cycles_through_all_destinations() {
        let mut destination = AppDestination::start_destination();
        for _ in 0..AppDestination::ALL.len() {
            destination = destination.next();
        }
        assert_eq!(destination, AppDestination::start_destination());
    }
}
