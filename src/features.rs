use serde::{
    Deserialize,
    Serialize,
};
use tracing::warn;

/// Ordered set of feature labels ("Pool", "Sea View", ...) as picked on the listing form.
/// The backend stores each category as a JSON array string; that encoding only exists at
/// the payload boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSet {
    labels: Vec<String>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the label at the end if absent, removes it if present. Returns whether the
    /// label is selected afterwards.
    pub fn toggle(&mut self, label: &str) -> bool {
        if let Some(position) = self.labels.iter().position(|existing| existing == label) {
            self.labels.remove(position);
            false
        } else {
            self.labels.push(label.to_string());
            true
        }
    }

    pub fn insert(&mut self, label: &str) -> bool {
        if self.contains(label) {
            return false;
        }
        self.labels.push(label.to_string());
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|existing| existing == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn to_payload(&self) -> String {
        // Vec<String> always serializes
        serde_json::to_string(&self.labels).unwrap_or_else(|_| "[]".to_string())
    }

    /// Null, empty or malformed payloads read as an empty set. Duplicates are dropped.
    pub fn from_payload(payload: Option<&str>) -> Self {
        let Some(raw) = payload.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::new();
        };

        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(labels) => FeatureSet::from(labels),
            Err(e) => {
                warn!(payload = raw, error = %e, "unreadable feature list");
                Self::new()
            }
        }
    }
}

impl From<Vec<String>> for FeatureSet {
    fn from(labels: Vec<String>) -> Self {
        labels.iter().map(String::as_str).collect()
    }
}

impl From<FeatureSet> for Vec<String> {
    fn from(set: FeatureSet) -> Self {
        set.labels
    }
}

impl<'a> FromIterator<&'a str> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = FeatureSet::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureCategory {
    Interior,
    Exterior,
    Location,
}

impl FeatureCategory {
    pub const ALL: [FeatureCategory; 3] =
        [FeatureCategory::Interior, FeatureCategory::Exterior, FeatureCategory::Location];

    /// Backend payload field for the category.
    pub fn payload_field(self) -> &'static str {
        match self {
            FeatureCategory::Interior => "ozellikler_ic",
            FeatureCategory::Exterior => "ozellikler_dis",
            FeatureCategory::Location => "ozellikler_konum",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyFeatures {
    pub interior: FeatureSet,
    pub exterior: FeatureSet,
    pub location: FeatureSet,
}

impl PropertyFeatures {
    pub fn category(&self, category: FeatureCategory) -> &FeatureSet {
        match category {
            FeatureCategory::Interior => &self.interior,
            FeatureCategory::Exterior => &self.exterior,
            FeatureCategory::Location => &self.location,
        }
    }

    pub fn category_mut(&mut self, category: FeatureCategory) -> &mut FeatureSet {
        match category {
            FeatureCategory::Interior => &mut self.interior,
            FeatureCategory::Exterior => &mut self.exterior,
            FeatureCategory::Location => &mut self.location,
        }
    }

    pub fn toggle(&mut self, category: FeatureCategory, label: &str) -> bool {
        self.category_mut(category).toggle(label)
    }

    /// `(payload field, JSON array string)` pairs for the save request.
    pub fn to_payload_fields(&self) -> Vec<(&'static str, String)> {
        FeatureCategory::ALL
            .iter()
            .map(|&category| (category.payload_field(), self.category(category).to_payload()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_membership_keeps_order() {
        let mut set = FeatureSet::new();
        assert!(set.toggle("Pool"));
        assert!(set.toggle("Garden"));
        assert!(set.toggle("Sea View"));
        assert!(!set.toggle("Garden"));

        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["Pool", "Sea View"]);
        assert!(set.toggle("Garden"));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["Pool", "Sea View", "Garden"]);
    }

    #[test]
    fn test_payload_boundary() {
        let set: FeatureSet = ["Pool", "Garden"].into_iter().collect();
        assert_eq!(set.to_payload(), r#"["Pool","Garden"]"#);
        assert_eq!(FeatureSet::from_payload(Some(r#"["Pool","Garden","Pool"]"#)), set);
    }

    #[test]
    fn test_deserialize_drops_duplicates() {
        let mut features: PropertyFeatures = serde_json::from_str(
            r#"{"interior":["Pool","Garden","Pool"],"exterior":[],"location":[]}"#,
        )
        .unwrap();
        assert_eq!(features.interior.len(), 2);

        assert!(!features.toggle(FeatureCategory::Interior, "Pool"));
        assert!(!features.interior.contains("Pool"));
        assert_eq!(serde_json::to_string(&features.interior).unwrap(), r#"["Garden"]"#);
    }

    #[test]
    fn test_bad_payloads_are_empty() {
        assert!(FeatureSet::from_payload(None).is_empty());
        assert!(FeatureSet::from_payload(Some("")).is_empty());
        assert!(FeatureSet::from_payload(Some("Pool, Garden")).is_empty());
        assert!(FeatureSet::from_payload(Some(r#"{"a":1}"#)).is_empty());
    }

    #[test]
    fn test_property_payload_fields() {
        let mut features = PropertyFeatures::default();
        features.toggle(FeatureCategory::Interior, "Fireplace");
        features.toggle(FeatureCategory::Location, "Near Beach");

        let fields = features.to_payload_fields();
        assert_eq!(fields[0], ("ozellikler_ic", r#"["Fireplace"]"#.to_string()));
        assert_eq!(fields[1], ("ozellikler_dis", "[]".to_string()));
        assert_eq!(fields[2], ("ozellikler_konum", r#"["Near Beach"]"#.to_string()));
    }
}
