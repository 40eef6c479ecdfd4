//! Wire types for the facial analysis service.
//!
//! Every top-level field of a result is independently optional: the service
//! may omit any of them, and an empty object is a valid result that renders
//! as no sections. Unknown fields in the body are ignored.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One facial landmark, `[x, y]` in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point(pub f64, pub f64);

/// Facial symmetry section of a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symmetry {
    /// 0-100.
    pub score: f64,
    pub assessment: String,
}

/// Per-feature measurement and assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDetail {
    pub measurement: String,
    pub assessment: String,
}

/// Parsed response of one analysis call.
///
/// The `features` map keeps the response body's own key order; that order is
/// what the display layer shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<Point>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symmetry: Option<Symmetry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<IndexMap<String, FeatureDetail>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    /// 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl AnalysisReport {
    /// True when the service omitted every section.
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_none()
            && self.symmetry.is_none()
            && self.features.is_none()
            && self.recommendations.is_none()
            && self.confidence.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_a_valid_report() {
        let report: AnalysisReport = serde_json::from_str("{}").unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_symmetry_only_report() {
        let report: AnalysisReport =
            serde_json::from_str(r#"{"symmetry":{"score":92,"assessment":"Excellent"}}"#).unwrap();

        let symmetry = report.symmetry.expect("symmetry section");
        assert_eq!(symmetry.score, 92.0);
        assert_eq!(symmetry.assessment, "Excellent");
        assert!(report.landmarks.is_none());
        assert!(report.features.is_none());
        assert!(report.recommendations.is_none());
        assert!(report.confidence.is_none());
    }

    #[test]
    fn test_features_keep_response_order() {
        let json = r#"{
            "features": {
                "nose": {"measurement": "42px width", "assessment": "Proportional"},
                "eyes": {"measurement": "L:31px, R:30px", "assessment": "Symmetric"},
                "lips": {"measurement": "22px thickness", "assessment": "Natural proportion"}
            }
        }"#;

        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        let features = report.features.expect("features section");
        let order: Vec<&str> = features.keys().map(|k| k.as_str()).collect();
        assert_eq!(order, vec!["nose", "eyes", "lips"]);
    }

    #[test]
    fn test_landmarks_parse_from_pixel_pairs() {
        let report: AnalysisReport =
            serde_json::from_str(r#"{"landmarks":[[120.5,88.0],[131.0,90.2]]}"#).unwrap();

        let landmarks = report.landmarks.expect("landmarks section");
        assert_eq!(landmarks.len(), 2);
        assert_eq!(landmarks[0], Point(120.5, 88.0));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{
            "confidence": 87.5,
            "analysis_id": "7f9c1b",
            "timestamp": "2025-11-02T10:15:00",
            "symmetry": {"score": 81.0, "assessment": "Good", "left_distance": 10.0, "right_distance": 12.0}
        }"#;

        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.confidence, Some(87.5));
        assert_eq!(report.symmetry.unwrap().assessment, "Good");
    }

    #[test]
    fn test_wrongly_shaped_section_is_an_error() {
        // A string where the feature object should be is not a readable result.
        let json = r#"{"features": {"error": "Feature analysis failed"}}"#;
        assert!(serde_json::from_str::<AnalysisReport>(json).is_err());
    }
}
