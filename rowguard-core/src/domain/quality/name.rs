// rowguard-core/src/domain/quality/name.rs

use crate::domain::quality::configuration::NameRules;

/// Letters separated by single spaces, no surrounding whitespace,
/// length (in characters) within `rules`.
pub fn is_valid_name(name: Option<&str>, rules: &NameRules) -> bool {
    let Some(value) = name else {
        return false;
    };
    if value.trim().is_empty() || value.trim() != value {
        return false;
    }

    let length = value.chars().count();
    if length < rules.min_length || length > rules.max_length {
        return false;
    }

    let mut previous_space = false;
    for c in value.chars() {
        if c == ' ' {
            if previous_space {
                return false;
            }
            previous_space = true;
        } else if c.is_alphabetic() {
            previous_space = false;
        } else {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> NameRules {
        NameRules::default()
    }

    #[test]
    fn test_accepts_letters_and_single_spaces() {
        for name in ["Jane", "John Doe", "Mary Ann Smith", "Zoë", "J"] {
            assert!(
                is_valid_name(Some(name), &rules()),
                "{name} should be valid"
            );
        }
    }

    #[test]
    fn test_rejects_digits_and_punctuation() {
        for name in ["John2", "R2D2", "O'Brien", "Jean-Luc", "Doe, John", "J.R."] {
            assert!(
                !is_valid_name(Some(name), &rules()),
                "{name} should be invalid"
            );
        }
    }

    #[test]
    fn test_rejects_bad_spacing() {
        for name in [" John", "John ", "John  Doe", "John\tDoe", "   "] {
            assert!(
                !is_valid_name(Some(name), &rules()),
                "{name:?} should be invalid"
            );
        }
    }

    #[test]
    fn test_rejects_empty_and_null() {
        assert!(!is_valid_name(Some(""), &rules()));
        assert!(!is_valid_name(None, &rules()));
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        let bounds = NameRules {
            min_length: 2,
            max_length: 5,
        };
        assert!(!is_valid_name(Some("A"), &bounds));
        assert!(is_valid_name(Some("Al"), &bounds));
        assert!(is_valid_name(Some("Alice"), &bounds));
        assert!(!is_valid_name(Some("Alicia"), &bounds));
    }

    #[test]
    fn test_default_bound_rejects_pasted_paragraphs() {
        let long = "a".repeat(51);
        assert!(!is_valid_name(Some(&long), &rules()));
        assert!(is_valid_name(Some(&"a".repeat(50)), &rules()));
    }
}
