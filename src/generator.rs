//! Deterministic mock snapshot generator.
//!
//! Every field except `data_as_of`, the number of service events and the
//! labor cost is derived from a stable hash of the normalized plate. The
//! clock and the random source are parameters so callers decide how much
//! of the result is reproducible.

use crate::catalog::{
    FUELS, MAKES, ORG_UNITS, PARTS, ROLES, SERVICE_TYPES, VIN_ALPHABET, VIN_LENGTH, VIN_PREFIXES,
};
use crate::seed::{composite_seed, mask_plate, normalize_plate, stable_hash};
use crate::types::{
    CurrentUser, PartUsed, ServiceEvent, Severity, Snapshot, VehicleInfo, WarningDetail,
};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rust_decimal::Decimal;

/// Plates the mock dataset pretends not to know.
pub const UNKNOWN_PLATES: &[&str] = &["ZZ999ZZ", "NOTFOUND"];

pub const HISTORY_UNAVAILABLE_WARNING: &str =
    "Service history not available for this plate in the mock dataset.";
pub const ODOMETER_WARNING: &str = "Potential odometer inconsistency detected (mock warning).";

const PARTS_PER_EVENT: usize = 2;
const MIN_CONFIDENCE: f64 = 0.05;
const MAX_CONFIDENCE: f64 = 0.99;

/// Builds the snapshot for `plate`, or `None` when the plate is unknown.
///
/// `plate` should be non-empty after trimming; length checks belong to the
/// caller. Location and back-office identifiers embed the hash of `plate`
/// exactly as given, everything else uses the normalized form.
pub fn generate<R: Rng + ?Sized>(
    plate: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Option<Snapshot> {
    let p = normalize_plate(plate);
    if UNKNOWN_PLATES.contains(&p.as_str()) {
        return None;
    }

    let seed = stable_hash(&p);
    let raw_hash = stable_hash(plate);

    let mut snapshot = Snapshot {
        data_as_of: now,
        confidence: 0.0,
        vehicle: vehicle_info(&p, seed),
        service_events: service_events(&p, seed, raw_hash, now, rng),
        current_users: current_users(seed, now),
        warnings: Vec::new(),
        warning_details: Vec::new(),
    };

    if p.starts_with("AA") {
        snapshot.service_events.clear();
        add_warning(
            &mut snapshot,
            "SERVICE_HISTORY_UNAVAILABLE",
            HISTORY_UNAVAILABLE_WARNING,
            Severity::Medium,
        );
    }
    if p.starts_with("CC") {
        add_warning(
            &mut snapshot,
            "ODOMETER_INCONSISTENCY",
            ODOMETER_WARNING,
            Severity::High,
        );
    }

    snapshot.confidence = confidence(
        snapshot.service_events.len(),
        snapshot.current_users.len(),
        &snapshot.warning_details,
    );
    Some(snapshot)
}

fn add_warning(snapshot: &mut Snapshot, code: &str, message: &str, severity: Severity) {
    snapshot.warnings.push(message.to_string());
    snapshot.warning_details.push(WarningDetail {
        code: code.to_string(),
        message: message.to_string(),
        severity,
    });
}

fn pick<T: Copy>(table: &[T], seed: u64) -> T {
    table[(seed % table.len() as u64) as usize]
}

fn vehicle_info(plate: &str, seed: u64) -> VehicleInfo {
    let (make, models) = pick(MAKES, seed);
    VehicleInfo {
        plate_masked: mask_plate(plate),
        vin: Some(vin(seed)),
        make: Some(make.to_string()),
        model: Some(pick(models, seed).to_string()),
        year: Some(2005 + (seed % 9) as u32),
        fuel: Some(pick(FUELS, seed / 7).to_string()),
    }
}

pub fn vin(seed: u64) -> String {
    let mut chars: Vec<u8> = (0..VIN_LENGTH as u64)
        .map(|i| pick(VIN_ALPHABET, seed + i * 37))
        .collect();
    chars[..3].copy_from_slice(pick(VIN_PREFIXES, seed).as_bytes());
    chars.into_iter().map(char::from).collect()
}

fn current_users(seed: u64, now: DateTime<Utc>) -> Vec<CurrentUser> {
    let count = 1 + seed % 3;
    (0..count)
        .map(|i| {
            let user_seed = seed + i * 97;
            let role = pick(ROLES, user_seed);
            let days = 1 + (user_seed % 200) as i64;
            CurrentUser {
                user_id: format!("{}_{}", &role[..1], 100 + user_seed % 900),
                role: Some(role.to_string()),
                org_unit: Some(pick(ORG_UNITS, user_seed / 3).to_string()),
                since: Some(now - Duration::days(days)),
            }
        })
        .collect()
}

fn service_events<R: Rng + ?Sized>(
    plate: &str,
    seed: u64,
    raw_hash: u64,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<ServiceEvent> {
    let count = rng.gen_range(1..=3usize);
    (0..count)
        .map(|i| {
            let event_seed = composite_seed(plate, i);
            let parts = pick_parts(plate, i, PARTS_PER_EVENT);
            let parts_total_cost = parts.iter().map(|part| part.cost).sum();
            ServiceEvent {
                practice_number: format!("PR-2026-{}", 100_000 + event_seed % 900_000),
                kind: SERVICE_TYPES[i % SERVICE_TYPES.len()].to_string(),
                km: 20_000 + seed % 180_000,
                location: format!("Workshop {} (MI)", raw_hash),
                when: (now - Duration::days(85 + 60 * i as i64)).date_naive(),
                backoffice_id: format!("BO-{}", raw_hash),
                technician_id: format!("TECH-{}-{}", raw_hash, i + 1),
                parts,
                parts_total_cost,
                labor: Decimal::new(rng.gen_range(2500..=3250), 2),
            }
        })
        .collect()
}

/// Parts used in event `event_index`; a pure function of its arguments.
pub fn pick_parts(plate: &str, event_index: usize, count: usize) -> Vec<PartUsed> {
    let seed = composite_seed(plate, event_index);
    (0..count as u64)
        .map(|i| {
            let item = pick(PARTS, seed + i * 97);
            PartUsed {
                code: item.code.to_string(),
                description: item.description.to_string(),
                cost: pick_cost(
                    seed + i * 31,
                    Decimal::from(item.min_cost),
                    Decimal::from(item.max_cost),
                ),
            }
        })
        .collect()
}

/// A point in `[min, max)` picked by `seed`, rounded half-to-even to cents.
fn pick_cost(seed: u64, min: Decimal, max: Decimal) -> Decimal {
    let r = Decimal::new((seed % 1000) as i64, 3);
    (min + (max - min) * r).round_dp(2)
}

pub fn confidence(events: usize, users: usize, warnings: &[WarningDetail]) -> f64 {
    let mut score = 0.95 - 0.025 * events as f64 - 0.010 * users as f64;
    for warning in warnings {
        score -= warning.severity.confidence_penalty();
    }
    round2(score.max(MIN_CONFIDENCE).min(MAX_CONFIDENCE))
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn snapshot(plate: &str, rng_seed: u64) -> Option<Snapshot> {
        generate(plate, now(), &mut StdRng::seed_from_u64(rng_seed))
    }

    #[test]
    fn unknown_plates_are_not_found() {
        assert!(snapshot("ZZ999ZZ", 1).is_none());
        assert!(snapshot(" notfound ", 1).is_none());
        assert!(snapshot("ZZ999ZY", 1).is_some());
    }

    #[test]
    fn seeded_fields_do_not_depend_on_rng() {
        let a = snapshot("AB123CD", 1).unwrap();
        let b = snapshot("ab123cd", 99).unwrap();
        assert_eq!(a.vehicle, b.vehicle);
        assert_eq!(a.current_users, b.current_users);
        for (x, y) in a.service_events.iter().zip(&b.service_events) {
            assert_eq!(x.parts, y.parts);
            assert_eq!(x.parts_total_cost, y.parts_total_cost);
            assert_eq!(x.practice_number, y.practice_number);
        }
    }

    #[test]
    fn same_rng_seed_gives_identical_snapshot() {
        assert_eq!(snapshot("XY987WV", 7), snapshot("XY987WV", 7));
    }

    #[test]
    fn vehicle_fields_come_from_tables() {
        let s = snapshot("AB123CD", 1).unwrap();
        let seed = stable_hash("AB123CD");
        let (make, models) = MAKES[(seed % MAKES.len() as u64) as usize];
        assert_eq!(s.vehicle.plate_masked, "AB***CD");
        assert_eq!(s.vehicle.make.as_deref(), Some(make));
        assert!(models.contains(&s.vehicle.model.as_deref().unwrap()));
        let year = s.vehicle.year.unwrap();
        assert!((2005..=2013).contains(&year));
        assert!(FUELS.contains(&s.vehicle.fuel.as_deref().unwrap()));
    }

    #[test]
    fn vin_shape() {
        for seed in [0u64, 1, 42, 4_294_967_295] {
            let v = vin(seed);
            assert_eq!(v.len(), VIN_LENGTH);
            assert!(VIN_PREFIXES.contains(&&v[..3]));
            assert!(v.bytes().skip(3).all(|c| VIN_ALPHABET.contains(&c)));
        }
        assert_eq!(&vin(0)[..3], "ZFA");
        assert_eq!(&vin(0)[3..], "NTX159DHMSW048");
    }

    #[test]
    fn users_follow_seed() {
        let s = snapshot("AB123CD", 1).unwrap();
        let seed = stable_hash("AB123CD");
        assert_eq!(s.current_users.len() as u64, 1 + seed % 3);
        for (i, user) in s.current_users.iter().enumerate() {
            let user_seed = seed + i as u64 * 97;
            let role = user.role.as_deref().unwrap();
            assert!(user.user_id.starts_with(&role[..1]));
            assert!(user.user_id.ends_with(&(100 + user_seed % 900).to_string()));
            assert!(user.since.unwrap() < now());
        }
    }

    #[test]
    fn events_have_bounded_random_fields() {
        for rng_seed in 0..20 {
            let s = snapshot("BX441TT", rng_seed).unwrap();
            assert!((1..=3).contains(&s.service_events.len()));
            for (i, event) in s.service_events.iter().enumerate() {
                assert_eq!(event.kind, SERVICE_TYPES[i]);
                assert!(event.labor >= Decimal::new(2500, 2));
                assert!(event.labor <= Decimal::new(3250, 2));
                assert!(event.labor.scale() <= 2);
                assert!(event.km >= 20_000 && event.km < 200_000);
                assert!(event.practice_number.starts_with("PR-2026-"));
                assert_eq!(event.parts.len(), PARTS_PER_EVENT);
                let sum: Decimal = event.parts.iter().map(|p| p.cost).sum();
                assert_eq!(sum, event.parts_total_cost);
            }
        }
    }

    #[test]
    fn raw_plate_hash_is_embedded_in_locations() {
        let s = snapshot("bx441tt", 3).unwrap();
        let raw = stable_hash("bx441tt").to_string();
        let event = &s.service_events[0];
        assert!(event.location.contains(&raw));
        assert!(event.backoffice_id.contains(&raw));
        assert!(event.technician_id.contains(&raw));
    }

    #[test]
    fn part_costs_stay_in_catalog_range() {
        for event_index in 0..5 {
            for part in pick_parts("AB123CD", event_index, 4) {
                let item = PARTS.iter().find(|p| p.code == part.code).unwrap();
                assert!(part.cost >= Decimal::from(item.min_cost));
                assert!(part.cost <= Decimal::from(item.max_cost));
            }
        }
        assert_eq!(pick_parts("AB123CD", 1, 2), pick_parts("AB123CD", 1, 2));
    }

    #[test]
    fn pick_parts_reaches_every_catalog_entry() {
        let mut seen = std::collections::HashSet::new();
        for event_index in 0..200 {
            for part in pick_parts("MN345OP", event_index, PARTS.len()) {
                assert_eq!(part.cost.round_dp(2), part.cost);
                seen.insert(part.code);
            }
        }
        assert_eq!(seen.len(), PARTS.len());
    }

    #[test]
    fn cost_midpoints_round_to_even_cents() {
        let cost =
            |seed, min: u32, max: u32| pick_cost(seed, Decimal::from(min), Decimal::from(max));
        // 10 + 15 * 0.005 = 10.075
        assert_eq!(cost(5, 10, 25), Decimal::new(1008, 2));
        // 35 + 85 * 0.005 = 35.425
        assert_eq!(cost(5, 35, 120), Decimal::new(3542, 2));
        assert_eq!(cost(0, 45, 85), Decimal::from(45));
        assert_eq!(cost(1999, 8, 18), Decimal::new(1799, 2));
    }

    #[test]
    fn aa_prefix_drops_history() {
        let s = snapshot("AA123BB", 5).unwrap();
        assert!(s.service_events.is_empty());
        assert_eq!(s.warnings, vec![HISTORY_UNAVAILABLE_WARNING.to_string()]);
        assert_eq!(s.warning_details[0].severity, Severity::Medium);
    }

    #[test]
    fn cc_prefix_warns_about_odometer() {
        let s = snapshot("cc555dd", 5).unwrap();
        assert!(!s.service_events.is_empty());
        assert!(s.warnings.contains(&ODOMETER_WARNING.to_string()));
        assert_eq!(s.warning_details[0].code, "ODOMETER_INCONSISTENCY");
        let expected = confidence(
            s.service_events.len(),
            s.current_users.len(),
            &s.warning_details,
        );
        assert_eq!(s.confidence, expected);
        assert!(s.confidence <= 0.95 - 0.25);
    }

    #[test]
    fn confidence_formula() {
        assert_eq!(confidence(0, 0, &[]), 0.95);
        assert_eq!(confidence(2, 1, &[]), 0.89);
        let high = WarningDetail {
            code: "X".to_string(),
            message: "x".to_string(),
            severity: Severity::High,
        };
        let many = vec![high; 10];
        assert_eq!(confidence(3, 3, &many), MIN_CONFIDENCE);
    }
}
