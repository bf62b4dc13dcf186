const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the UTF-8 bytes of `s`.
///
/// Unlike `std::collections::hash_map::DefaultHasher` this is identical
/// across processes, platforms and releases, which is what lets a plate map
/// to the same snapshot forever.
pub fn stable_hash(s: &str) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in s.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    u64::from(hash)
}

/// Seed for per-item data: the hash of `plate|index`.
pub fn composite_seed(plate: &str, index: usize) -> u64 {
    stable_hash(&format!("{}|{}", plate, index))
}

pub fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

/// Hides the middle of a plate, keeping at most two characters on each side.
pub fn mask_plate(plate: &str) -> String {
    let chars: Vec<char> = plate.chars().collect();
    let n = chars.len();
    if n <= 2 {
        "**".to_string()
    } else if n <= 4 {
        format!("{}**{}", chars[0], chars[n - 1])
    } else {
        format!(
            "{}{}***{}{}",
            chars[0],
            chars[1],
            chars[n - 2],
            chars[n - 1]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_reference_values() {
        assert_eq!(stable_hash(""), 0x811c_9dc5);
        assert_eq!(stable_hash("a"), 0xe40c_292c);
        assert_eq!(stable_hash("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn composite_seed_differs_per_index() {
        assert_eq!(composite_seed("AB123CD", 0), stable_hash("AB123CD|0"));
        assert_ne!(composite_seed("AB123CD", 0), composite_seed("AB123CD", 1));
    }

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(normalize_plate("  ab123cd \n"), "AB123CD");
    }

    #[test]
    fn masking_by_length() {
        assert_eq!(mask_plate(""), "**");
        assert_eq!(mask_plate("AB"), "**");
        assert_eq!(mask_plate("ABC"), "A**C");
        assert_eq!(mask_plate("AB12"), "A**2");
        assert_eq!(mask_plate("AB123CD"), "AB***CD");
    }
}
