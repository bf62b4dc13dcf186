//! Fixed lookup tables feeding the snapshot generator.
//!
//! Order matters everywhere in this file: entries are picked by
//! `seed % len`, so reordering a table changes every generated snapshot.

/// Makes with their models, in lookup order.
pub const MAKES: &[(&str, &[&str])] = &[
    ("Fiat", &["Ducato", "Doblo", "Fiorino", "Scudo"]),
    ("Volkswagen", &["Transporter", "Caddy", "Crafter"]),
    ("Ford", &["Transit", "Transit Custom", "Courier"]),
    ("Mercedes-Benz", &["Sprinter", "Vito"]),
    ("Renault", &["Master", "Trafic", "Kangoo"]),
    ("Iveco", &["Daily"]),
];

pub const FUELS: &[&str] = &["Diesel", "Hybrid", "Electric", "CNG"];

/// World manufacturer identifiers, aligned index for index with `MAKES`.
pub const VIN_PREFIXES: &[&str] = &["ZFA", "WV1", "WF0", "W1V", "VF1", "ZCF"];

/// VIN characters: digits and capital letters except I, O and Q.
pub const VIN_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPRSTUVWXYZ0123456789";

pub const VIN_LENGTH: usize = 17;

/// Catalog entry; costs are whole euros.
#[derive(Debug, Clone, Copy)]
pub struct CatalogPart {
    pub code: &'static str,
    pub description: &'static str,
    pub min_cost: u32,
    pub max_cost: u32,
}

pub const PARTS: &[CatalogPart] = &[
    CatalogPart {
        code: "OIL-5W30-5L",
        description: "Engine oil 5W-30 (5L)",
        min_cost: 45,
        max_cost: 85,
    },
    CatalogPart {
        code: "FLT-OIL-001",
        description: "Oil filter",
        min_cost: 8,
        max_cost: 18,
    },
    CatalogPart {
        code: "FLT-AIR-002",
        description: "Air filter",
        min_cost: 10,
        max_cost: 25,
    },
    CatalogPart {
        code: "BRK-PAD-FR",
        description: "Front brake pads set",
        min_cost: 35,
        max_cost: 120,
    },
    CatalogPart {
        code: "BRK-DISC-FR",
        description: "Front brake discs pair",
        min_cost: 90,
        max_cost: 220,
    },
    CatalogPart {
        code: "WPR-BL-650",
        description: "Wiper blades 650mm",
        min_cost: 12,
        max_cost: 35,
    },
];

pub const SERVICE_TYPES: &[&str] = &[
    "Service / Oil + Filters",
    "Brake pads replacement",
    "Tyre replacement",
    "Periodic inspection",
    "Wiper blades replacement",
];

pub const ROLES: &[&str] = &["Driver", "Technician", "Supervisor"];

pub const ORG_UNITS: &[&str] = &[
    "Milan Hub",
    "Rome Hub",
    "Turin Logistics",
    "Service Ops",
    "Warehouse North",
    "Delivery South",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vin_alphabet_excludes_ambiguous_letters() {
        assert_eq!(VIN_ALPHABET.len(), 33);
        for c in b"IOQ" {
            assert!(!VIN_ALPHABET.contains(c));
        }
    }

    #[test]
    fn every_make_has_a_prefix_and_models() {
        assert_eq!(MAKES.len(), VIN_PREFIXES.len());
        assert!(MAKES.iter().all(|(_, models)| !models.is_empty()));
        assert!(VIN_PREFIXES.iter().all(|p| p.len() == 3));
    }

    #[test]
    fn part_cost_ranges_are_ordered() {
        assert!(PARTS.iter().all(|p| p.min_cost < p.max_cost));
    }
}
