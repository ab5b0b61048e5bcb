use crate::core::geo::Coordinate;
use serde::{Deserialize, Serialize};

/// One entry of the search suggestion list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub label: String,
    pub value: Coordinate,
}

impl Suggestion {
    pub fn new(label: impl Into<String>, value: Coordinate) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Mapbox `mapbox.places` response, reduced to what the page uses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub features: Vec<GeocodingFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingFeature {
    pub place_name: String,
    pub center: Coordinate,
}

impl From<GeocodingFeature> for Suggestion {
    fn from(feature: GeocodingFeature) -> Self {
        Suggestion::new(feature.place_name, feature.center)
    }
}

impl GeocodingResponse {
    pub fn into_suggestions(self) -> Vec<Suggestion> {
        self.features.into_iter().map(Suggestion::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_become_suggestions() {
        let body = serde_json::json!({
            "type": "FeatureCollection",
            "query": ["paris"],
            "features": [
                {
                    "id": "place.1",
                    "place_name": "Paris, France",
                    "center": [2.3522, 48.8566],
                    "relevance": 1
                },
                {
                    "id": "place.2",
                    "place_name": "Paris, Texas, United States",
                    "center": [-95.5555, 33.6609]
                }
            ]
        });
        let response: GeocodingResponse = serde_json::from_value(body).unwrap();
        let suggestions = response.into_suggestions();

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].label, "Paris, France");
        assert_eq!(suggestions[0].value, Coordinate::new(2.3522, 48.8566));
        assert_eq!(suggestions[1].value.lng, -95.5555);
    }

    #[test]
    fn test_missing_features_is_empty() {
        let response: GeocodingResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_suggestions().is_empty());
    }
}
