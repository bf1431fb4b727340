//! Ward Reference Data
//!
//! Static list of the ward codes present in the register and their display names.
//! Served by `GET /wards` and consulted directly by the client.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ward {
    pub code: &'static str,
    pub name: &'static str,
}

pub const WARDS: &[Ward] = &[
    Ward {
        code: "049",
        name: "KAIKULANGARA",
    },
    Ward {
        code: "048",
        name: "PORT",
    },
];

pub fn find_ward(code: &str) -> Option<&'static Ward> {
    let code = code.trim();
    WARDS.iter().find(|ward| ward.code == code)
}

pub fn ward_name(code: &str) -> Option<&'static str> {
    find_ward(code).map(|ward| ward.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ward_lookup() {
        assert_eq!(ward_name("049"), Some("KAIKULANGARA"));
        assert_eq!(ward_name(" 048 "), Some("PORT"));
    }

    #[test]
    fn test_unknown_ward() {
        assert!(find_ward("999").is_none());
        assert!(find_ward("").is_none());
    }

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in WARDS.iter().enumerate() {
            for b in &WARDS[i + 1..] {
                assert_ne!(a.code, b.code);
            }
        }
    }
}
