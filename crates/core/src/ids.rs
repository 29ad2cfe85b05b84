#![forbid(unsafe_code)]

use uuid::Uuid;

/// Fresh record identifier in hyphenated UUID v4 form.
///
/// Uniqueness is statistical; callers never check for collisions.
pub fn new_id() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

pub fn is_uuid_shaped(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    for (index, byte) in bytes.iter().enumerate() {
        let dash = matches!(index, 8 | 13 | 18 | 23);
        if dash != (*byte == b'-') {
            return false;
        }
        if !dash && !(byte.is_ascii_digit() || (b'a'..=b'f').contains(byte)) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_has_v4_shape() {
        let id = new_id();
        assert!(is_uuid_shaped(&id), "unexpected id shape: {id}");
        assert_eq!(&id[14..15], "4");
        assert!(matches!(&id[19..20], "8" | "9" | "a" | "b"), "variant: {id}");
    }

    #[test]
    fn new_id_does_not_repeat() {
        let ids = (0..256).map(|_| new_id()).collect::<std::collections::BTreeSet<_>>();
        assert_eq!(ids.len(), 256);
    }

    #[test]
    fn uuid_shape_rejects_near_misses() {
        assert!(!is_uuid_shaped(""));
        assert!(!is_uuid_shaped("xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx"));
        assert!(!is_uuid_shaped("0f8fad5bd9cb469fa16570867728950e"));
        assert!(!is_uuid_shaped("0F8FAD5B-D9CB-469F-A165-70867728950E"));
        assert!(is_uuid_shaped("0f8fad5b-d9cb-469f-a165-70867728950e"));
    }
}
