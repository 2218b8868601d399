use super::Location;
use regex::Regex;
use std::sync::OnceLock;

/// `lat,lon` pairs embedded in free text, with a leading separator if any
fn coordinate_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\s*,\s*)?(-?\d{1,3}\.\d+,-?\d{1,3}\.\d+)\s*").expect("valid coordinate pattern")
    })
}

impl Location {
    /// Address fit for display.
    ///
    /// Coordinate pairs pasted into the address are removed. An address that
    /// is empty, repeats `coordinates`, or is nothing but coordinates becomes
    /// `fallback`. `coordinates` itself is never touched.
    pub fn cleaned_address(&self, fallback: &str) -> String {
        if self.address.is_empty() || self.address.trim() == self.coordinates.trim() {
            return fallback.to_string();
        }

        let stripped = coordinate_pattern().replace_all(&self.address, "");
        let cleaned = stripped.trim_matches(|c: char| c == ' ' || c == ',');
        if cleaned.is_empty() {
            fallback.to_string()
        } else {
            cleaned.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(address: &str, coordinates: &str) -> Location {
        Location {
            address: address.to_string(),
            coordinates: coordinates.to_string(),
            image_url: "/img/map.png".to_string(),
        }
    }

    #[test]
    fn test_embedded_coordinates_removed() {
        let loc = location("Tsim Sha Tsui Pier 1, 22.2934,114.1686", "22.2934,114.1686");
        assert_eq!(loc.cleaned_address("Hong Kong"), "Tsim Sha Tsui Pier 1");

        let loc = location("22.28,114.15 Central Ferry Pier 7", "");
        assert_eq!(loc.cleaned_address("Hong Kong"), "Central Ferry Pier 7");
        assert_eq!(loc.coordinates, "");
    }

    #[test]
    fn test_address_equal_to_coordinates_falls_back() {
        let loc = location(" 22.2934,114.1686 ", "22.2934,114.1686");
        assert_eq!(loc.cleaned_address("Hong Kong"), "Hong Kong");
    }

    #[test]
    fn test_empty_address_falls_back() {
        assert_eq!(location("", "22.3,114.2").cleaned_address("Macau"), "Macau");
        assert_eq!(location(" , ", "").cleaned_address("Macau"), "Macau");
    }

    #[test]
    fn test_only_coordinates_left_falls_back() {
        let loc = location("22.3193,114.1694", "22.30,114.17");
        assert_eq!(loc.cleaned_address("Hong Kong"), "Hong Kong");
    }

    #[test]
    fn test_plain_address_unchanged() {
        let loc = location("123 Main St", "40.7,-74.0");
        assert_eq!(loc.cleaned_address("Hong Kong"), "123 Main St");
    }
}
