/// Rotation- and direction-invariant key for a cyclic wall-id sequence.
///
/// The forward and the reversed sequences are each reduced to their
/// lexicographically smallest rotation; the smaller of the two joined strings
/// is the key. Two traces of the same loop, started anywhere and walked in
/// either direction, produce the same key.
#[must_use]
pub fn canonical_cycle_key<S: AsRef<str>>(wall_ids: &[S]) -> String {
    if wall_ids.is_empty() {
        return String::new();
    }
    let forward: Vec<&str> = wall_ids.iter().map(AsRef::as_ref).collect();
    let mut backward = forward.clone();
    backward.reverse();

    let a = min_rotation(&forward).join("|");
    let b = min_rotation(&backward).join("|");
    if a <= b {
        a
    } else {
        b
    }
}

fn min_rotation<'a>(seq: &[&'a str]) -> Vec<&'a str> {
    let n = seq.len();
    let mut best = 0;
    for start in 1..n {
        let candidate = (0..n).map(|k| seq[(start + k) % n]);
        let current = (0..n).map(|k| seq[(best + k) % n]);
        if candidate.lt(current) {
            best = start;
        }
    }
    (0..n).map(|k| seq[(best + k) % n]).collect()
}

/// Deterministic id for a newly detected room, derived from its cycle key.
///
/// Uses 64-bit FNV-1a so the same boundary always yields the same id.
#[must_use]
pub fn room_id_for_key(key: &str) -> String {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for b in key.bytes() {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    format!("room-{hash:016x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_invariant() {
        let a = canonical_cycle_key(&["c", "d", "a", "b"]);
        let b = canonical_cycle_key(&["a", "b", "c", "d"]);
        assert_eq!(a, b);
        assert_eq!(a, "a|b|c|d");
    }

    #[test]
    fn direction_invariant() {
        let fwd = canonical_cycle_key(&["a", "b", "c", "d"]);
        let rev = canonical_cycle_key(&["d", "c", "b", "a"]);
        let rev_rotated = canonical_cycle_key(&["b", "a", "d", "c"]);
        assert_eq!(fwd, rev);
        assert_eq!(fwd, rev_rotated);
    }

    #[test]
    fn different_cycles_differ() {
        assert_ne!(
            canonical_cycle_key(&["a", "b", "c"]),
            canonical_cycle_key(&["a", "b", "d"])
        );
        assert_eq!(canonical_cycle_key::<&str>(&[]), "");
    }

    #[test]
    fn room_ids_are_stable() {
        let key = canonical_cycle_key(&["w1", "w2", "w3"]);
        assert_eq!(room_id_for_key(&key), room_id_for_key(&key));
        assert!(room_id_for_key(&key).starts_with("room-"));
        assert_eq!(room_id_for_key(&key).len(), "room-".len() + 16);
        assert_ne!(room_id_for_key("a|b|c"), room_id_for_key("a|b|d"));
    }
}
