//! Search input resolution: country names map to their capital, and
//! ambiguous city names get a country code so the API picks the right one.

use serde::{Deserialize, Serialize};

const CAPITALS: &[(&str, &str)] = &[
    ("Afghanistan", "Kabul"),
    ("Argentina", "Buenos Aires"),
    ("Australia", "Canberra"),
    ("Austria", "Vienna"),
    ("Bangladesh", "Dhaka"),
    ("Belgium", "Brussels"),
    ("Brazil", "Brasilia"),
    ("Canada", "Ottawa"),
    ("Chile", "Santiago"),
    ("China", "Beijing"),
    ("Colombia", "Bogota"),
    ("Denmark", "Copenhagen"),
    ("Egypt", "Cairo"),
    ("Finland", "Helsinki"),
    ("France", "Paris"),
    ("Germany", "Berlin"),
    ("Greece", "Athens"),
    ("India", "New Delhi"),
    ("Indonesia", "Jakarta"),
    ("Iran", "Tehran"),
    ("Ireland", "Dublin"),
    ("Italy", "Rome"),
    ("Japan", "Tokyo"),
    ("Kenya", "Nairobi"),
    ("Mexico", "Mexico City"),
    ("Nepal", "Kathmandu"),
    ("Netherlands", "Amsterdam"),
    ("New Zealand", "Wellington"),
    ("Nigeria", "Abuja"),
    ("Norway", "Oslo"),
    ("Pakistan", "Islamabad"),
    ("Peru", "Lima"),
    ("Philippines", "Manila"),
    ("Poland", "Warsaw"),
    ("Portugal", "Lisbon"),
    ("Russia", "Moscow"),
    ("Saudi Arabia", "Riyadh"),
    ("South Africa", "Pretoria"),
    ("South Korea", "Seoul"),
    ("Spain", "Madrid"),
    ("Sri Lanka", "Colombo"),
    ("Sweden", "Stockholm"),
    ("Switzerland", "Bern"),
    ("Thailand", "Bangkok"),
    ("Turkey", "Ankara"),
    ("Ukraine", "Kyiv"),
    ("United Kingdom", "London"),
    ("United States", "Washington"),
    ("Vietnam", "Hanoi"),
];

const CITY_ENHANCEMENTS: &[(&str, &str)] = &[
    ("London", "London,UK"),
    ("Paris", "Paris,FR"),
    ("Rome", "Rome,IT"),
    ("Milan", "Milan,IT"),
    ("Naples", "Naples,IT"),
    ("Florence", "Florence,IT"),
    ("Venice", "Venice,IT"),
    ("Manchester", "Manchester,UK"),
    ("Birmingham", "Birmingham,UK"),
    ("Newcastle", "Newcastle,UK"),
    ("Cambridge", "Cambridge,UK"),
    ("Oxford", "Oxford,UK"),
    ("York", "York,UK"),
    ("Bath", "Bath,UK"),
    ("Edinburgh", "Edinburgh,UK"),
    ("Glasgow", "Glasgow,UK"),
    ("Dublin", "Dublin,IE"),
    ("Cork", "Cork,IE"),
    ("Perth", "Perth,AU"),
    ("Adelaide", "Adelaide,AU"),
    ("Darwin", "Darwin,AU"),
    ("Canberra", "Canberra,AU"),
    ("Melbourne", "Melbourne,AU"),
    ("Sydney", "Sydney,AU"),
    ("Brisbane", "Brisbane,AU"),
    ("Auckland", "Auckland,NZ"),
    ("Wellington", "Wellington,NZ"),
    ("Christchurch", "Christchurch,NZ"),
];

/// A search term as typed and the query actually sent upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityQuery {
    pub original: String,
    pub query: String,
}

impl CityQuery {
    pub fn resolve(input: &str) -> Self {
        let original = input.trim().to_string();

        let city = match capital_of(&original) {
            Some(capital) => {
                tracing::info!(
                    "Country \"{}\" mapped to capital city \"{}\"",
                    original,
                    capital
                );
                capital
            }
            None => original.as_str(),
        };

        Self {
            query: enhance_city_name(city).to_string(),
            original,
        }
    }

    /// Queries that already carry a country code are not retried
    /// without the language parameter.
    pub fn has_country_code(&self) -> bool {
        self.query.contains(',')
    }
}

/// Capital city for a country name, case-insensitive
pub fn capital_of(country: &str) -> Option<&'static str> {
    CAPITALS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(country))
        .map(|(_, capital)| *capital)
}

/// Append a country code to city names the API tends to resolve elsewhere.
/// The lookup is exact, so "london" is passed through unchanged.
pub fn enhance_city_name(city: &str) -> &str {
    CITY_ENHANCEMENTS
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, enhanced)| *enhanced)
        .unwrap_or(city)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_maps_to_capital() {
        let q = CityQuery::resolve("japan");
        assert_eq!(q.original, "japan");
        assert_eq!(q.query, "Tokyo");
    }

    #[test]
    fn test_capital_is_enhanced() {
        let q = CityQuery::resolve("Italy");
        assert_eq!(q.query, "Rome,IT");
        assert!(q.has_country_code());
    }

    #[test]
    fn test_ambiguous_city_gets_country_code() {
        assert_eq!(CityQuery::resolve("Perth").query, "Perth,AU");
        assert_eq!(enhance_city_name("London"), "London,UK");
    }

    #[test]
    fn test_plain_city_passes_through() {
        let q = CityQuery::resolve("  Dehradun ");
        assert_eq!(q.original, "Dehradun");
        assert_eq!(q.query, "Dehradun");
        assert!(!q.has_country_code());
    }

    #[test]
    fn test_enhancement_is_case_sensitive() {
        assert_eq!(enhance_city_name("london"), "london");
    }
}
