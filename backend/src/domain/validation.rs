//! Declarative field validation engine.
//!
//! Request shapes own a const table of per-field constraints evaluated by
//! [`validate`]. The engine accumulates violations across fields, never
//! short-circuiting a payload, so a caller can report everything wrong in one
//! response. Within a single field, evaluation stops at the first failed
//! constraint so the field reports its most fundamental problem.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// How a ruleset treats fields that are absent from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Absent fields violate `Required` (create semantics).
    Mandatory,
    /// Absent fields are skipped entirely (partial-update semantics).
    IfSupplied,
}

/// A single declarative constraint on one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Field must be present and non-empty.
    Required,
    /// Character-count bounds for text fields.
    Length { min: usize, max: usize },
    /// Inclusive bounds for numeric fields.
    Range { min: i64, max: i64 },
    /// Mailbox syntax.
    EmailSyntax,
    /// Every character is a letter or whitespace.
    AlphaSpace,
    /// Uppercase, lowercase, digit and symbol classes all present, length >= 8.
    PasswordStrength,
}

/// Ordered constraints for one named field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    pub constraints: &'static [Constraint],
}

/// Rule table for one request shape.
#[derive(Debug, Clone, Copy)]
pub struct Ruleset {
    pub presence: Presence,
    pub rules: &'static [FieldRules],
}

/// A field-level constraint violation with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
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

/// Value of one payload field as seen by the engine.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    /// The caller omitted the field.
    Absent,
    Text(&'a str),
    Number(i64),
}

impl FieldValue<'_> {
    fn is_absent(self) -> bool {
        matches!(self, Self::Absent)
    }
}

const USER_FIELD_RULES: &[FieldRules] = &[
    FieldRules {
        field: "name",
        constraints: &[
            Constraint::Required,
            Constraint::Length { min: 2, max: 100 },
            Constraint::AlphaSpace,
        ],
    },
    FieldRules {
        field: "email",
        constraints: &[
            Constraint::Required,
            Constraint::EmailSyntax,
            Constraint::Length { min: 1, max: 100 },
        ],
    },
    FieldRules {
        field: "password",
        constraints: &[
            Constraint::Required,
            Constraint::Length { min: 8, max: 255 },
            Constraint::PasswordStrength,
        ],
    },
    FieldRules {
        field: "age",
        constraints: &[Constraint::Required, Constraint::Range { min: 13, max: 120 }],
    },
];

/// Ruleset applied to create requests: every field is mandatory.
pub const CREATE_RULES: Ruleset = Ruleset {
    presence: Presence::Mandatory,
    rules: USER_FIELD_RULES,
};

/// Ruleset applied to partial updates: same constraints, absent fields
/// skipped. Malformed presence (an explicit empty string or out-of-range
/// number) still validates.
pub const UPDATE_RULES: Ruleset = Ruleset {
    presence: Presence::IfSupplied,
    rules: USER_FIELD_RULES,
};

/// Symbols accepted by [`Constraint::PasswordStrength`].
const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static ALPHA_SPACE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn alpha_space_regex() -> &'static Regex {
    ALPHA_SPACE_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z\s]+$")
            .unwrap_or_else(|error| panic!("alpha-space regex failed to compile: {error}"))
    })
}

/// Validate `payload` against `ruleset`, returning every violation.
///
/// Pure function of its inputs; the engine touches no external state.
pub fn validate(payload: &[(&'static str, FieldValue<'_>)], ruleset: &Ruleset) -> Vec<Violation> {
    let mut violations = Vec::new();
    for rules in ruleset.rules {
        let Some((_, value)) = payload.iter().find(|(name, _)| *name == rules.field) else {
            continue;
        };
        if ruleset.presence == Presence::IfSupplied && value.is_absent() {
            continue;
        }
        if let Some(violation) = check_field(rules, *value) {
            violations.push(violation);
        }
    }
    violations
}

fn check_field(rules: &FieldRules, value: FieldValue<'_>) -> Option<Violation> {
    rules
        .constraints
        .iter()
        .find_map(|constraint| constraint.check(rules.field, value))
}

impl Constraint {
    fn check(self, field: &'static str, value: FieldValue<'_>) -> Option<Violation> {
        match (self, value) {
            (Self::Required, FieldValue::Absent) => {
                Some(Violation::new(field, format!("{field} is required")))
            }
            (Self::Required, FieldValue::Text(text)) if text.is_empty() => {
                Some(Violation::new(field, format!("{field} is required")))
            }
            // Non-required constraints never fire on an absent field.
            (_, FieldValue::Absent) => None,
            (Self::Length { min, max }, FieldValue::Text(text)) => {
                let length = text.chars().count();
                if length < min {
                    Some(Violation::new(
                        field,
                        format!("{field} must be at least {min} characters"),
                    ))
                } else if length > max {
                    Some(Violation::new(
                        field,
                        format!("{field} must be at most {max} characters"),
                    ))
                } else {
                    None
                }
            }
            (Self::Range { min, max }, FieldValue::Number(number)) => {
                if number < min {
                    Some(Violation::new(
                        field,
                        format!("{field} must be at least {min}"),
                    ))
                } else if number > max {
                    Some(Violation::new(
                        field,
                        format!("{field} must be at most {max}"),
                    ))
                } else {
                    None
                }
            }
            (Self::EmailSyntax, FieldValue::Text(text)) => {
                if email_regex().is_match(text) {
                    None
                } else {
                    Some(Violation::new(
                        field,
                        format!("{field} must be a valid email address"),
                    ))
                }
            }
            (Self::AlphaSpace, FieldValue::Text(text)) => {
                if alpha_space_regex().is_match(text) {
                    None
                } else {
                    Some(Violation::new(
                        field,
                        format!("{field} can only contain letters and spaces"),
                    ))
                }
            }
            (Self::PasswordStrength, FieldValue::Text(text)) => {
                if password_is_strong(text) {
                    None
                } else {
                    Some(Violation::new(
                        field,
                        format!(
                            "{field} must contain at least 8 characters with uppercase, \
                             lowercase, number, and special character"
                        ),
                    ))
                }
            }
            // Type-mismatched pairs cannot arise from the static tables.
            _ => None,
        }
    }
}

fn password_is_strong(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}
