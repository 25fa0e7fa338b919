//! Item renderers: one record in, one self-contained card out.
//!
//! Renderers are pure. They borrow the record, never fail, and substitute
//! display defaults for anything missing, blank, or numerically zero.

use dioxus::prelude::*;

use crate::domain::{DestinationRecord, DisplayValue, ServiceCategory, ServiceRecord, non_blank};

use super::icons::CategoryIcon;

pub const DEFAULT_SERVICE_DESCRIPTION: &str =
    "Discover amazing experiences and create unforgettable memories";
pub const DEFAULT_DESTINATION_DESCRIPTION: &str =
    "Experience the beauty and culture of this amazing destination with unforgettable memories.";
pub const DEFAULT_PRICE: &str = "$299";
pub const DEFAULT_RATING: &str = "4.8";
pub const DEFAULT_REVIEWS: &str = "2.1k";

/// Renders one record of type `R`.
pub trait ItemRenderer<R>: Send + Sync {
    fn render(&self, record: &R) -> Element;
}

fn display_or(value: Option<&DisplayValue>, fallback: &str) -> String {
    value
        .filter(|value| !value.is_blank() && !value.is_zero())
        .map_or_else(|| fallback.to_owned(), ToString::to_string)
}

/// Card for a service type: category icon on an accent gradient, name,
/// description, and a link to the category page.
#[derive(Debug, Default, Clone, Copy)]
pub struct ServiceTypeCard;

impl ItemRenderer<ServiceRecord> for ServiceTypeCard {
    fn render(&self, record: &ServiceRecord) -> Element {
        let category = ServiceCategory::classify(&record.name);
        let gradient = category.gradient();
        let name = record.name.trim();
        let description =
            non_blank(record.description.as_deref()).unwrap_or(DEFAULT_SERVICE_DESCRIPTION);

        rsx! {
            a {
                class: "service-type-card group cursor-pointer h-full",
                href: category.link(),
                "data-category": category.to_string(),
                article { class: "bg-white rounded-2xl shadow-lg overflow-hidden h-full flex flex-col",
                    div { class: "service-type-banner flex items-center justify-center h-48",
                        div { class: "service-type-icon w-20 h-20 bg-gradient-to-br {gradient} rounded-2xl p-4",
                            CategoryIcon { category }
                        }
                    }
                    div { class: "p-6 flex-1 flex flex-col",
                        h3 { class: "service-type-name text-xl font-bold text-gray-900 mb-2", "{name}" }
                        p { class: "service-type-description text-gray-600 text-sm mb-4 flex-1", "{description}" }
                        span { class: "text-sm font-medium text-blue-600 bg-blue-50 px-3 py-1 rounded-full",
                            "Explore"
                        }
                    }
                }
            }
        }
    }
}

/// Card for a destination: image, optional featured badge, rating, price,
/// and description.
#[derive(Debug, Default, Clone, Copy)]
pub struct DestinationCard;

impl ItemRenderer<DestinationRecord> for DestinationCard {
    fn render(&self, record: &DestinationRecord) -> Element {
        let name = record.name.trim();
        let description =
            non_blank(record.description.as_deref()).unwrap_or(DEFAULT_DESTINATION_DESCRIPTION);
        let image = non_blank(record.image.as_deref());
        let price = display_or(record.price.as_ref(), DEFAULT_PRICE);
        let rating = display_or(record.rating.as_ref(), DEFAULT_RATING);
        let reviews = display_or(record.reviews.as_ref(), DEFAULT_REVIEWS);
        let location = record.location();

        rsx! {
            article { class: "destination-card group h-full bg-white rounded-2xl shadow-lg overflow-hidden flex flex-col",
                div { class: "destination-media relative overflow-hidden h-48",
                    if let Some(src) = image {
                        img {
                            class: "destination-image w-full h-full object-cover",
                            src: "{src}",
                            alt: "{name}",
                        }
                    }
                    div { class: "destination-price absolute bottom-3 right-3 bg-white/95 px-3 py-1 rounded-full",
                        span { class: "text-xs text-gray-600 font-medium", "From " }
                        strong { class: "text-lg font-bold text-gray-900", "{price}" }
                    }
                }
                div { class: "destination-info p-5 flex-1 flex flex-col",
                    h3 { class: "destination-name text-xl font-bold text-gray-900 mb-1", "{name}" }
                    if let Some(location) = location {
                        p { class: "destination-location text-gray-500 text-sm", "{location}" }
                    }
                    p { class: "destination-description text-gray-600 text-sm", "{description}" }
                    div { class: "destination-rating flex items-center mb-4",
                        span { class: "rating-value text-sm font-semibold text-gray-900", "{rating}" }
                        span { class: "rating-reviews text-sm text-gray-500", "({reviews} reviews)" }
                    }
                    div { class: "flex flex-wrap gap-2 mb-4",
                        if record.is_featured() {
                            span { class: "destination-badge bg-purple-50 text-purple-700 text-xs px-2 py-1 rounded-full",
                                "Featured"
                            }
                        }
                        if let Some(deals) = record.deals_count {
                            span { class: "destination-deals text-xs text-gray-600", "{deals} deals" }
                        }
                    }
                }
            }
        }
    }
}

/// Plain tile: link, image, and name.
#[derive(Debug, Default, Clone, Copy)]
pub struct ServiceTile;

impl ItemRenderer<ServiceRecord> for ServiceTile {
    fn render(&self, record: &ServiceRecord) -> Element {
        let name = record.name.trim();
        let href = ServiceCategory::classify(name).link();
        let image = non_blank(record.image.as_deref());
        rsx! {
            a { class: "service-item", href,
                article {
                    if let Some(src) = image {
                        img { src: "{src}", alt: "{name}" }
                    }
                    p { "{name}" }
                }
            }
        }
    }
}
