use std::fmt;

use serde::{Deserialize, Serialize};

/// Label of the pseudo-type that carries a freeform note per orbit.
pub const COMMENT_LABEL: &str = "comment";

const DIRECTIONS: [&str; 2] = ["inbound", "outbound"];
const PHASES: [&str; 2] = ["pre", "post"];
const FEATURES: [&str; 2] = ["bow shock", "ion composition boundary"];

/// Display order applied to the natural cross product so that the four
/// variants of one feature sit next to each other in the cycle.
const CANONICAL_PERMUTATION: [usize; 8] = [0, 2, 1, 3, 5, 7, 4, 6];

/// A directional, phase-qualified plasma boundary crossing.
///
/// Variant order is the canonical display order. It decides which marker
/// style a crossing is drawn with, so it must match [`catalog_labels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BoundaryType {
    #[serde(rename = "inbound pre bow shock")]
    InboundPreBowShock,
    #[serde(rename = "inbound post bow shock")]
    InboundPostBowShock,
    #[serde(rename = "outbound pre bow shock")]
    OutboundPreBowShock,
    #[serde(rename = "outbound post bow shock")]
    OutboundPostBowShock,
    #[serde(rename = "inbound pre ion composition boundary")]
    InboundPreIcb,
    #[serde(rename = "inbound post ion composition boundary")]
    InboundPostIcb,
    #[serde(rename = "outbound pre ion composition boundary")]
    OutboundPreIcb,
    #[serde(rename = "outbound post ion composition boundary")]
    OutboundPostIcb,
}

impl BoundaryType {
    pub const ALL: [BoundaryType; 8] = [
        BoundaryType::InboundPreBowShock,
        BoundaryType::InboundPostBowShock,
        BoundaryType::OutboundPreBowShock,
        BoundaryType::OutboundPostBowShock,
        BoundaryType::InboundPreIcb,
        BoundaryType::InboundPostIcb,
        BoundaryType::OutboundPreIcb,
        BoundaryType::OutboundPostIcb,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BoundaryType::InboundPreBowShock => "inbound pre bow shock",
            BoundaryType::InboundPostBowShock => "inbound post bow shock",
            BoundaryType::OutboundPreBowShock => "outbound pre bow shock",
            BoundaryType::OutboundPostBowShock => "outbound post bow shock",
            BoundaryType::InboundPreIcb => "inbound pre ion composition boundary",
            BoundaryType::InboundPostIcb => "inbound post ion composition boundary",
            BoundaryType::OutboundPreIcb => "outbound pre ion composition boundary",
            BoundaryType::OutboundPostIcb => "outbound post ion composition boundary",
        }
    }

    /// Position in the canonical order.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_label(label: &str) -> Option<Self> {
        index_of(label).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for BoundaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Generate the 8 labels from the three binary dimensions, in canonical order.
pub fn catalog_labels() -> Vec<String> {
    let natural: Vec<String> = DIRECTIONS
        .iter()
        .flat_map(|dir| {
            PHASES.iter().flat_map(move |phase| {
                FEATURES
                    .iter()
                    .map(move |feature| format!("{dir} {phase} {feature}"))
            })
        })
        .collect();
    CANONICAL_PERMUTATION
        .iter()
        .map(|&i| natural[i].clone())
        .collect()
}

/// Canonical position of a label, `None` for unknown labels and `comment`.
pub fn index_of(label: &str) -> Option<usize> {
    catalog_labels().iter().position(|l| l == label)
}

/// Every boundary type in canonical order, resolved from the generated labels.
pub fn catalog() -> Vec<BoundaryType> {
    catalog_labels()
        .iter()
        .filter_map(|label| BoundaryType::from_label(label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn canonical_order_groups_features() {
        let labels = catalog_labels();
        assert_eq!(
            labels,
            vec![
                "inbound pre bow shock",
                "inbound post bow shock",
                "outbound pre bow shock",
                "outbound post bow shock",
                "inbound pre ion composition boundary",
                "inbound post ion composition boundary",
                "outbound pre ion composition boundary",
                "outbound post ion composition boundary",
            ]
        );
    }

    #[test]
    fn enum_order_matches_generated_catalog() {
        let labels = catalog_labels();
        for (i, ty) in BoundaryType::ALL.iter().enumerate() {
            assert_eq!(ty.label(), labels[i]);
            assert_eq!(ty.index(), i);
        }
    }

    #[test]
    fn catalog_is_a_permutation_of_the_cross_product() {
        let labels: HashSet<String> = catalog_labels().into_iter().collect();
        assert_eq!(labels.len(), 8);
        for dir in DIRECTIONS {
            for phase in PHASES {
                for feature in FEATURES {
                    assert!(labels.contains(&format!("{dir} {phase} {feature}")));
                }
            }
        }
    }

    #[test]
    fn index_of_is_a_bijection() {
        let indices: HashSet<usize> = catalog_labels()
            .iter()
            .map(|l| index_of(l).unwrap())
            .collect();
        assert_eq!(indices, (0..8).collect());
        assert_eq!(index_of(COMMENT_LABEL), None);
        assert_eq!(index_of("sideways bow shock"), None);
    }

    #[test]
    fn resolved_catalog_matches_enum() {
        assert_eq!(catalog(), BoundaryType::ALL.to_vec());
        assert_eq!(
            BoundaryType::from_label("outbound pre ion composition boundary"),
            Some(BoundaryType::OutboundPreIcb)
        );
        assert_eq!(BoundaryType::from_label(COMMENT_LABEL), None);
    }

    #[test]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&BoundaryType::OutboundPreIcb).unwrap();
        assert_eq!(json, "\"outbound pre ion composition boundary\"");
        let back: BoundaryType = serde_json::from_str("\"inbound post bow shock\"").unwrap();
        assert_eq!(back, BoundaryType::InboundPostBowShock);
    }
}
