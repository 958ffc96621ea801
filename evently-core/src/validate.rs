//! Declarative per-field validation.
//!
//! Payload types implement [`Validate`] by listing their field rules; the
//! generic [`run`] evaluator collects every violation instead of stopping at
//! the first, so the caller can return the full list in one 400 response.

/// One failed field rule.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A single field rule: the field it covers and a check returning an error
/// message when the rule is broken.
pub struct FieldRule<'a> {
    pub field: &'static str,
    pub check: Box<dyn Fn() -> Option<String> + 'a>,
}

impl<'a> FieldRule<'a> {
    pub fn new(field: &'static str, check: impl Fn() -> Option<String> + 'a) -> Self {
        Self {
            field,
            check: Box::new(check),
        }
    }
}

/// Evaluate a rule set, collecting every violation.
pub fn run(rules: &[FieldRule<'_>]) -> Vec<Violation> {
    rules
        .iter()
        .filter_map(|rule| (rule.check)().map(|message| Violation::new(rule.field, message)))
        .collect()
}

pub trait Validate {
    fn validate(&self) -> Vec<Violation>;

    /// Convenience: `Ok(())` when clean, the violation list otherwise.
    fn check(&self) -> Result<(), Vec<Violation>> {
        let violations = self.validate();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

// -- rule helpers -------------------------------------------------------

pub fn required(value: &str, label: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{label} is required"))
    } else {
        None
    }
}

pub fn length_between(value: &str, min: usize, max: usize, label: &str) -> Option<String> {
    let len = value.chars().count();
    if len < min {
        Some(format!("{label} must be at least {min} characters long"))
    } else if len > max {
        Some(format!("{label} must not exceed {max} characters"))
    } else {
        None
    }
}

/// Shape check only: one `@`, non-empty local part, a dot in the domain.
pub fn email_shape(value: &str) -> Option<String> {
    let mut parts = value.split('@');
    let (local, domain) = (parts.next().unwrap_or(""), parts.next().unwrap_or(""));
    let well_formed = parts.next().is_none()
        && !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.');
    if well_formed {
        None
    } else {
        Some("Invalid email format".to_string())
    }
}

/// At least 8 chars with an uppercase letter, a digit, and a special character.
pub fn password_strength(value: &str) -> Option<String> {
    if value.chars().count() < 8 {
        return Some("Password must be at least 8 characters long".to_string());
    }
    if value.chars().count() > 50 {
        return Some("Password must not exceed 50 characters".to_string());
    }
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_special = value.chars().any(|c| !c.is_ascii_alphanumeric());
    if has_upper && has_digit && has_special {
        None
    } else {
        Some(
            "Password must contain at least one uppercase letter, one special character, \
             and one number"
                .to_string(),
        )
    }
}

// -- payload rule sets ---------------------------------------------------

impl Validate for evently_sdk::objects::auth::RegisterRequest {
    fn validate(&self) -> Vec<Violation> {
        run(&[
            FieldRule::new("email", || {
                required(&self.email, "Email").or_else(|| email_shape(&self.email))
            }),
            FieldRule::new("first_name", || {
                required(&self.first_name, "First name")
                    .or_else(|| length_between(&self.first_name, 2, 50, "First name"))
            }),
            FieldRule::new("second_name", || {
                required(&self.second_name, "Second name")
                    .or_else(|| length_between(&self.second_name, 2, 50, "Second name"))
            }),
            FieldRule::new("password", || password_strength(&self.password)),
        ])
    }
}

impl Validate for evently_sdk::objects::auth::LoginRequest {
    fn validate(&self) -> Vec<Violation> {
        run(&[
            FieldRule::new("email", || {
                required(&self.email, "Email").or_else(|| email_shape(&self.email))
            }),
            FieldRule::new("password", || required(&self.password, "Password")),
        ])
    }
}

impl Validate for evently_sdk::objects::users::UpdateUserRequest {
    fn validate(&self) -> Vec<Violation> {
        run(&[
            FieldRule::new("email", || {
                self.email.as_deref().and_then(email_shape)
            }),
            FieldRule::new("first_name", || {
                self.first_name
                    .as_deref()
                    .and_then(|name| length_between(name, 2, 50, "First name"))
            }),
            FieldRule::new("second_name", || {
                self.second_name
                    .as_deref()
                    .and_then(|name| length_between(name, 2, 50, "Second name"))
            }),
        ])
    }
}

impl Validate for evently_sdk::objects::events::CreateEventRequest {
    fn validate(&self) -> Vec<Violation> {
        run(&[
            FieldRule::new("title", || required(&self.title, "Event title")),
            FieldRule::new("description", || {
                required(&self.description, "Event description")
            }),
            FieldRule::new("date", || required(&self.date, "Event date")),
            FieldRule::new("time", || required(&self.time, "Time")),
            FieldRule::new("location", || required(&self.location, "Event location")),
        ])
    }
}

impl Validate for evently_sdk::objects::events::RsvpRequest {
    fn validate(&self) -> Vec<Violation> {
        run(&[
            FieldRule::new("title", || required(&self.title, "Event title")),
            FieldRule::new("description", || {
                required(&self.description, "Event description")
            }),
            FieldRule::new("date", || required(&self.date, "Event date")),
            FieldRule::new("time", || required(&self.time, "Time")),
            FieldRule::new("location", || required(&self.location, "Event location")),
            FieldRule::new("invitees", || {
                self.invitees
                    .iter()
                    .find_map(|invitee| email_shape(invitee))
            }),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Signup<'a> {
        email: &'a str,
        first_name: &'a str,
        password: &'a str,
    }

    impl Validate for Signup<'_> {
        fn validate(&self) -> Vec<Violation> {
            run(&[
                FieldRule::new("email", || {
                    required(self.email, "Email").or_else(|| email_shape(self.email))
                }),
                FieldRule::new("first_name", || {
                    required(self.first_name, "First name")
                        .or_else(|| length_between(self.first_name, 2, 50, "First name"))
                }),
                FieldRule::new("password", || password_strength(self.password)),
            ])
        }
    }

    #[test]
    fn collects_all_violations_not_just_the_first() {
        let bad = Signup {
            email: "not-an-email",
            first_name: "x",
            password: "short",
        };
        let violations = bad.validate();
        assert_eq!(violations.len(), 3);
        assert_eq!(violations[0].field, "email");
        assert_eq!(violations[1].field, "first_name");
        assert_eq!(violations[2].field, "password");
    }

    #[test]
    fn clean_payload_passes() {
        let ok = Signup {
            email: "ada@example.com",
            first_name: "Ada",
            password: "Sup3r!secret",
        };
        assert!(ok.check().is_ok());
    }

    #[test]
    fn email_shape_rejects_common_garbage() {
        for bad in ["", "a@", "@b.com", "a@b", "a@@b.com", "a@.com", "a@b."] {
            assert!(email_shape(bad).is_some(), "{bad:?} should be rejected");
        }
        assert!(email_shape("person@mail.example.org").is_none());
    }

    #[test]
    fn password_rules() {
        assert!(password_strength("Sh0rt!").is_some());
        assert!(password_strength("alllowercase1!").is_some());
        assert!(password_strength("NoSpecial123").is_some());
        assert!(password_strength("NoDigits!!").is_some());
        assert!(password_strength("G00d!enough").is_none());
    }
}
