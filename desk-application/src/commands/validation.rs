use desk_domain::{normalize_optional_text, ChildInfo};

use crate::AppError;

const MIN_NAME_CHARS: usize = 2;

pub fn normalize_required_text(value: String, field: &str) -> Result<String, AppError> {
    normalize_optional_text(Some(value))
        .ok_or_else(|| AppError::BadRequest(format!("{} must not be empty", field)))
}

pub fn normalize_person_name(value: String, field: &str) -> Result<String, AppError> {
    let name = normalize_required_text(value, field)?;
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(AppError::BadRequest(format!(
            "{} must be at least {} characters",
            field, MIN_NAME_CHARS
        )));
    }
    Ok(name)
}

pub fn normalize_email(value: String) -> Result<String, AppError> {
    let email = normalize_required_text(value, "email")?;
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
                    .unwrap_or(false)
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::BadRequest(format!(
            "email '{}' is not a valid address",
            email
        )));
    }
    Ok(email)
}

/// Checks the party size and the per-child details, returning the total.
pub fn validate_party(
    adult_count: u32,
    child_count: u32,
    children: Option<Vec<ChildInfo>>,
) -> Result<(u32, Option<Vec<ChildInfo>>), AppError> {
    let total = adult_count
        .checked_add(child_count)
        .ok_or_else(|| AppError::BadRequest("party size is too large".to_string()))?;
    if total == 0 {
        return Err(AppError::BadRequest(
            "at least one guest is required".to_string(),
        ));
    }

    let children = match children {
        Some(list) if child_count == 0 && list.is_empty() => None,
        Some(list) => {
            if list.len() != child_count as usize {
                return Err(AppError::BadRequest(format!(
                    "expected details for {} children, got {}",
                    child_count,
                    list.len()
                )));
            }
            if let Some(child) = list.iter().find(|child| !child.has_valid_age()) {
                return Err(AppError::BadRequest(format!(
                    "child age {} is outside 1..=18",
                    child.age
                )));
            }
            Some(list)
        }
        None => None,
    };
    Ok((total, children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_domain::ChildGender;

    fn child(age: u8) -> ChildInfo {
        ChildInfo {
            age,
            gender: ChildGender::Girl,
        }
    }

    #[test]
    fn party_requires_a_guest() {
        assert!(matches!(
            validate_party(0, 0, None),
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(validate_party(2, 1, None).expect("valid").0, 3);
    }

    #[test]
    fn child_details_must_match_count_and_age_range() {
        assert!(validate_party(1, 2, Some(vec![child(4)])).is_err());
        assert!(validate_party(1, 1, Some(vec![child(0)])).is_err());
        assert!(validate_party(1, 1, Some(vec![child(19)])).is_err());
        let (_, children) = validate_party(1, 1, Some(vec![child(18)])).expect("valid");
        assert_eq!(children.map(|c| c.len()), Some(1));
        let (_, children) = validate_party(2, 0, Some(Vec::new())).expect("valid");
        assert!(children.is_none());
    }

    #[test]
    fn names_and_emails_are_trimmed_and_checked() {
        assert_eq!(
            normalize_person_name("  Maria ".to_string(), "name").expect("valid"),
            "Maria"
        );
        assert!(normalize_person_name(" M ".to_string(), "name").is_err());
        assert_eq!(
            normalize_email(" maria@example.org ".to_string()).expect("valid"),
            "maria@example.org"
        );
        for bad in ["", "maria", "maria@", "@example.org", "maria@example", "ma ria@example.org"] {
            assert!(normalize_email(bad.to_string()).is_err(), "input: {bad}");
        }
    }
}
