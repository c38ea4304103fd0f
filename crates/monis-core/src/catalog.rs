//! # Built-in Catalog
//!
//! The fixed fallback product list. The live catalog comes from the
//! database; when that source is unreachable or empty, this list keeps the
//! configurator usable. It is also what seeds a fresh database.
//!
//! Entries are grouped by category. Desk and chair entries carry
//! `is_base = true`; everything else is a multi-select accessory.

use crate::types::{Category, Product};

fn product(
    id: &str,
    name: &str,
    category: Category,
    price_per_week_cents: i64,
    price_per_month_cents: i64,
    description: &str,
    is_featured: bool,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category,
        price_per_week_cents,
        price_per_month_cents,
        description: description.to_string(),
        is_base: category.is_base(),
        is_featured,
    }
}

/// Returns the built-in product catalog.
///
/// Product ids are unique; callers may rely on that when seeding or when
/// serving this list as a catalog snapshot.
pub fn builtin_catalog() -> Vec<Product> {
    vec![
        // Desks
        product(
            "desk-electric",
            "Electric Standing Desk",
            Category::Desk,
            500,
            1500,
            "Electric height adjustment (70-118cm), smooth quiet motor, spacious tabletop. Perfect sit-stand setup.",
            true,
        ),
        product(
            "desk-mechanical",
            "Mechanical Adjustable Desk",
            Category::Desk,
            400,
            1200,
            "Manual height adjustment, solid wooden top, clean minimal design.",
            false,
        ),
        product(
            "desk-compact",
            "Compact Work Desk",
            Category::Desk,
            300,
            900,
            "Space-saving design, perfect for studio apartments in Bali. Clean lines, bamboo finish.",
            false,
        ),
        // Chairs
        product(
            "chair-ergonomic",
            "Ergonomic Office Chair",
            Category::Chair,
            600,
            1800,
            "Breathable mesh back, 4D armrests, adjustable lumbar support, reclining backrest.",
            true,
        ),
        product(
            "chair-gaming",
            "Racing Gaming Chair",
            Category::Chair,
            700,
            2200,
            "High-back racing style, lumbar pillow, neck cushion, wide recline range.",
            false,
        ),
        product(
            "chair-executive",
            "Executive Leather Chair",
            Category::Chair,
            900,
            2800,
            "Premium faux leather, high back with integrated headrest, premium feel.",
            false,
        ),
        // Monitors
        product(
            "monitor-24-fhd",
            "24\" Full HD Monitor",
            Category::Monitor,
            500,
            1500,
            "Xiaomi 24\" IPS, 100Hz, 1920x1080 FHD, 99% sRGB",
            false,
        ),
        product(
            "monitor-27-4k",
            "27\" 4K Monitor",
            Category::Monitor,
            1300,
            4000,
            "4K UHD, HDR, USB-C 96W charging, IPS panel",
            false,
        ),
        product(
            "monitor-27-studio",
            "27\" Apple Studio Display",
            Category::Monitor,
            7500,
            22000,
            "5K Retina, 600 nits, 12MP camera, Thunderbolt 3",
            false,
        ),
        product(
            "monitor-34-ultrawide",
            "34\" Ultrawide Curved",
            Category::Monitor,
            1900,
            5800,
            "WQHD 3440x1440, 144Hz, curved, ultrawide immersive",
            false,
        ),
        // Lamps
        product(
            "lamp-desk",
            "LED Desk Lamp",
            Category::Lamp,
            200,
            600,
            "Adjustable color temp, USB charging port, touch dimmer",
            false,
        ),
        product(
            "lamp-floor",
            "Arc Floor Lamp",
            Category::Lamp,
            300,
            900,
            "Warm ambient light, modern arch design, dimmer switch",
            false,
        ),
        // Plants
        product(
            "plant-small",
            "Mini Tropical Plant",
            Category::Plant,
            100,
            300,
            "Cute succulent or pothos, low maintenance, Bali-grown",
            false,
        ),
        product(
            "plant-large",
            "Large Monstera",
            Category::Plant,
            300,
            900,
            "Statement tropical plant, adds Bali jungle vibes",
            false,
        ),
        // Keyboard & accessories
        product(
            "keyboard-mech",
            "Mechanical Keyboard",
            Category::Keyboard,
            400,
            1200,
            "Tactile switches, compact TKL layout, USB-C",
            false,
        ),
        product(
            "docking-station",
            "USB-C Docking Station",
            Category::Accessory,
            400,
            1200,
            "12-in-1 hub, 4K HDMI, USB-A/C, SD card, Ethernet",
            false,
        ),
        product(
            "storage-drawer",
            "Desk Organizer & Drawer",
            Category::Storage,
            200,
            600,
            "Under-desk drawers + desktop organizer tray",
            false,
        ),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let catalog = builtin_catalog();
        let ids: HashSet<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_base_flag_matches_category() {
        for p in builtin_catalog() {
            assert_eq!(p.is_base, p.category.is_base(), "product {}", p.id);
        }
    }

    #[test]
    fn test_has_base_items_in_every_base_category() {
        let catalog = builtin_catalog();
        assert!(catalog.iter().any(|p| p.category == Category::Desk));
        assert!(catalog.iter().any(|p| p.category == Category::Chair));
    }

    #[test]
    fn test_prices_are_non_negative() {
        for p in builtin_catalog() {
            assert!(p.price_per_week_cents >= 0, "product {}", p.id);
            assert!(p.price_per_month_cents >= 0, "product {}", p.id);
        }
    }
}
