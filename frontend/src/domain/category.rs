//! Keyword-driven service categories.
//!
//! A service's display name selects its icon, accent colour, and landing
//! page. Rules are checked in order against the lower-cased name; the first
//! rule with any matching keyword wins, so "Luxury Car Rides" is a car rental
//! rather than a lux listing.

use std::fmt;

/// Presentation category derived from a service name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCategory {
    Hotels,
    VisaAssistance,
    Flights,
    BusTravel,
    CarRentals,
    NomadoLove,
    LittleNomads,
    EventsRetreats,
    NomadoJobs,
    NomadoShop,
    NomadoLux,
    NomadoForex,
    /// No keyword matched.
    Other,
}

/// One keyword rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    /// Lower-case substrings, any of which selects `category`.
    pub keywords: &'static [&'static str],
    pub category: ServiceCategory,
}

/// Rules in priority order.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        keywords: &["hotel", "guesthouse"],
        category: ServiceCategory::Hotels,
    },
    CategoryRule {
        keywords: &["visa"],
        category: ServiceCategory::VisaAssistance,
    },
    CategoryRule {
        keywords: &["flight"],
        category: ServiceCategory::Flights,
    },
    CategoryRule {
        keywords: &["bus"],
        category: ServiceCategory::BusTravel,
    },
    CategoryRule {
        keywords: &["car", "ride"],
        category: ServiceCategory::CarRentals,
    },
    CategoryRule {
        keywords: &["love"],
        category: ServiceCategory::NomadoLove,
    },
    CategoryRule {
        keywords: &["nomad", "little"],
        category: ServiceCategory::LittleNomads,
    },
    CategoryRule {
        keywords: &["event", "retreat"],
        category: ServiceCategory::EventsRetreats,
    },
    CategoryRule {
        keywords: &["job"],
        category: ServiceCategory::NomadoJobs,
    },
    CategoryRule {
        keywords: &["shop"],
        category: ServiceCategory::NomadoShop,
    },
    CategoryRule {
        keywords: &["lux"],
        category: ServiceCategory::NomadoLux,
    },
    CategoryRule {
        keywords: &["forex"],
        category: ServiceCategory::NomadoForex,
    },
];

impl ServiceCategory {
    /// Classify a display name. Matching is case-insensitive.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::ServiceCategory;
    ///
    /// assert_eq!(ServiceCategory::classify("Boutique HOTELS"), ServiceCategory::Hotels);
    /// assert_eq!(ServiceCategory::classify("Snorkelling"), ServiceCategory::Other);
    /// ```
    pub fn classify(name: &str) -> Self {
        let name = name.to_lowercase();
        CATEGORY_RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|keyword| name.contains(keyword)))
            .map_or(Self::Other, |rule| rule.category)
    }

    /// Stable key used to select the icon, e.g. `category:hotels`.
    pub const fn icon_key(self) -> &'static str {
        match self {
            Self::Hotels => "category:hotels",
            Self::VisaAssistance => "category:visa-assistance",
            Self::Flights => "category:flights",
            Self::BusTravel => "category:bus-travel",
            Self::CarRentals => "category:car-rentals",
            Self::NomadoLove => "category:nomado-love",
            Self::LittleNomads => "category:little-nomads",
            Self::EventsRetreats => "category:events-retreats",
            Self::NomadoJobs => "category:nomado-jobs",
            Self::NomadoShop => "category:nomado-shop",
            Self::NomadoLux => "category:nomado-lux",
            Self::NomadoForex => "category:nomado-forex",
            Self::Other => "category:other",
        }
    }

    /// Colour family for gradients and the icon tint.
    pub const fn accent(self) -> &'static str {
        match self {
            Self::Hotels => "blue",
            Self::VisaAssistance => "purple",
            Self::Flights => "sky",
            Self::BusTravel => "green",
            Self::CarRentals => "red",
            Self::NomadoLove => "pink",
            Self::LittleNomads => "orange",
            Self::EventsRetreats => "indigo",
            Self::NomadoJobs => "slate",
            Self::NomadoShop => "emerald",
            Self::NomadoLux => "yellow",
            Self::NomadoForex => "teal",
            Self::Other => "gray",
        }
    }

    /// Landing page for the category; `#` when there is none.
    pub const fn link(self) -> &'static str {
        match self {
            Self::Hotels => "/hotels",
            Self::VisaAssistance => "/visa-assistance",
            Self::Flights => "/flights",
            Self::BusTravel => "/bus-travel",
            Self::CarRentals => "/car-rentals",
            Self::NomadoLove => "/nomado-love",
            Self::LittleNomads => "/little-nomads",
            Self::EventsRetreats => "/events-retreats",
            Self::NomadoJobs => "/nomado-jobs",
            Self::NomadoShop => "/nomado-shop",
            Self::NomadoLux => "/nomado-lux",
            Self::NomadoForex => "/nomado-forex",
            Self::Other => "#",
        }
    }

    /// Gradient classes, e.g. `from-blue-500 to-blue-700`.
    pub fn gradient(self) -> String {
        let accent = self.accent();
        format!("from-{accent}-500 to-{accent}-700")
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.icon_key();
        f.write_str(key.strip_prefix("category:").unwrap_or(key))
    }
}
