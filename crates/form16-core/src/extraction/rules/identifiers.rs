//! PAN, TAN and assessment year format checks.

use super::patterns::{ASSESSMENT_YEAR_FORMAT, PAN_FORMAT, TAN_FORMAT};

/// Category of a PAN holder, encoded in the fourth character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanHolder {
    Individual,
    Company,
    HinduUndividedFamily,
    Firm,
    AssociationOfPersons,
    Trust,
    BodyOfIndividuals,
    LocalAuthority,
    ArtificialJuridicalPerson,
    Government,
}

/// Validate the shape of a PAN (`AAAAA9999A`).
pub fn validate_pan(pan: &str) -> bool {
    PAN_FORMAT.is_match(pan.trim())
}

/// Validate the shape of a TAN (`AAAA99999A`).
pub fn validate_tan(tan: &str) -> bool {
    TAN_FORMAT.is_match(tan.trim())
}

/// Holder category of a well-formed PAN.
pub fn pan_holder(pan: &str) -> Option<PanHolder> {
    let pan = pan.trim();
    if !validate_pan(pan) {
        return None;
    }

    match pan.as_bytes()[3] {
        b'P' => Some(PanHolder::Individual),
        b'C' => Some(PanHolder::Company),
        b'H' => Some(PanHolder::HinduUndividedFamily),
        b'F' => Some(PanHolder::Firm),
        b'A' => Some(PanHolder::AssociationOfPersons),
        b'T' => Some(PanHolder::Trust),
        b'B' => Some(PanHolder::BodyOfIndividuals),
        b'L' => Some(PanHolder::LocalAuthority),
        b'J' => Some(PanHolder::ArtificialJuridicalPerson),
        b'G' => Some(PanHolder::Government),
        _ => None,
    }
}

/// Check that an assessment year spans two consecutive years
/// (`2024-25`, `2024-2025`).
pub fn validate_assessment_year(year: &str) -> bool {
    let Some(caps) = ASSESSMENT_YEAR_FORMAT.captures(year.trim()) else {
        return false;
    };

    let (Ok(first), Ok(second)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
        return false;
    };

    if caps[2].len() == 2 {
        (first + 1) % 100 == second
    } else {
        first + 1 == second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pan() {
        assert!(validate_pan("ABCPE1234F"));
        assert!(validate_pan(" ABCPE1234F "));
        assert!(!validate_pan("ABCP1234F"));
        assert!(!validate_pan("abcpe1234f"));
        assert!(!validate_pan("ABCD12345E"));
    }

    #[test]
    fn test_validate_tan() {
        assert!(validate_tan("MUMA12345B"));
        assert!(!validate_tan("ABCDE1234F"));
    }

    #[test]
    fn test_pan_holder() {
        assert_eq!(pan_holder("ABCPE1234F"), Some(PanHolder::Individual));
        assert_eq!(pan_holder("AAACR1234K"), Some(PanHolder::Company));
        assert_eq!(pan_holder("AAAXR1234K"), None);
        assert_eq!(pan_holder("not a pan"), None);
    }

    #[test]
    fn test_validate_assessment_year() {
        assert!(validate_assessment_year("2024-25"));
        assert!(validate_assessment_year("2024-2025"));
        assert!(validate_assessment_year("2099-00"));
        assert!(validate_assessment_year("2024 – 25"));
        assert!(!validate_assessment_year("2024-26"));
        assert!(!validate_assessment_year("24-25"));
    }
}
