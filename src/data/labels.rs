//! static mapping from signature file prefix to shape class name.
//! The SharvitB2 database names its files s01xxx, s02xxx ... ; the prefix
//! encodes the shape class.

/// label attached to files whose prefix is not in the table
pub const UNKNOWN_LABEL: &str = "Unknown";

// the ten classes the classifiers run on
const CLASS_TABLE: [(&str, &str); 10] = [
    ("s01", "Pigeon"),
    ("s02", "Bone"),
    ("s03", "Carpet"),
    ("s04", "Camel"),
    ("s05", "PickUp"),
    ("s06", "Person"),
    ("s07", "Car"),
    ("s08", "Elephant"),
    ("s09", "Face"),
    ("s10", "Fork"),
];

/// Extracts the class label of a descriptor file from its name prefix.
/// Returns [UNKNOWN_LABEL] when no prefix of the table matches.
pub fn label_for_file(file_name: &str) -> &'static str {
    CLASS_TABLE
        .iter()
        .find(|(prefix, _)| file_name.starts_with(prefix))
        .map(|(_, class)| *class)
        .unwrap_or(UNKNOWN_LABEL)
}

/// the closed set of class names, in table order
pub fn known_classes() -> Vec<&'static str> {
    CLASS_TABLE.iter().map(|(_, class)| *class).collect()
}

//========================================================

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_label_for_file() {
        assert_eq!(label_for_file("s01n001.zrk"), "Pigeon");
        assert_eq!(label_for_file("s10n012.zrk"), "Fork");
        // prefix s11 is outside the ten class table
        assert_eq!(label_for_file("s11n001.zrk"), UNKNOWN_LABEL);
        assert_eq!(label_for_file("whatever.zrk"), UNKNOWN_LABEL);
    }

    #[test]
    fn test_known_classes() {
        let classes = known_classes();
        assert_eq!(classes.len(), 10);
        assert_eq!(classes[0], "Pigeon");
        assert_eq!(classes[9], "Fork");
    }
} // end of mod tests
