use std::collections::BTreeMap;

use contracts::system::users::{AdminUser, AdminUserPayload, UserId, UserStatus};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::shared::http::ServerFieldErrors;

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit(UserId),
}

impl FormMode {
    pub fn is_create(&self) -> bool {
        matches!(self, FormMode::Create)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Email,
    FirstName,
    LastName,
    Password,
    Status,
}

impl FormField {
    /// Server-side name of the field.
    pub fn key(self) -> &'static str {
        match self {
            FormField::Email => "email",
            FormField::FirstName => "first_name",
            FormField::LastName => "last_name",
            FormField::Password => "password",
            FormField::Status => "status",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "email" => Some(FormField::Email),
            "first_name" => Some(FormField::FirstName),
            "last_name" => Some(FormField::LastName),
            "password" => Some(FormField::Password),
            "status" | "is_active" => Some(FormField::Status),
            _ => None,
        }
    }
}

/// Draft of a user record as edited in the modal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserFormValues {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Write-only. Empty on edit means "keep the stored password".
    pub password: String,
    pub status: UserStatus,
}

impl UserFormValues {
    pub fn from_user(user: &AdminUser) -> Self {
        Self {
            email: user.email.clone(),
            first_name: user.first_name.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            password: String::new(),
            status: user.status,
        }
    }
}

/// One message per field, plus a form-level message for server errors that
/// do not belong to any field (`detail`, `non_field_errors`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    fields: BTreeMap<FormField, String>,
    form: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_none()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn form_message(&self) -> Option<&str> {
        self.form.as_deref()
    }

    pub fn set(&mut self, field: FormField, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn clear(&mut self, field: FormField) {
        self.fields.remove(&field);
    }

    /// Map server errors onto fields; the first message of each wins.
    pub fn from_server(errors: &ServerFieldErrors) -> Self {
        let mut mapped = FieldErrors::default();
        let mut unmatched = Vec::new();
        for (key, messages) in errors {
            let Some(first) = messages.first() else {
                continue;
            };
            match FormField::from_key(key) {
                Some(field) => mapped.set(field, first.clone()),
                None => unmatched.push(first.clone()),
            }
        }
        if !unmatched.is_empty() {
            mapped.form = Some(unmatched.join(" "));
        }
        mapped
    }
}

pub fn validate(values: &UserFormValues, mode: &FormMode) -> FieldErrors {
    let mut errors = FieldErrors::default();

    let email = values.email.trim();
    if email.is_empty() {
        errors.set(FormField::Email, "Email is required");
    } else if !EMAIL_RE.is_match(email) {
        errors.set(FormField::Email, "Enter a valid email address");
    }

    if values.first_name.trim().is_empty() {
        errors.set(FormField::FirstName, "First name is required");
    }
    if values.last_name.trim().is_empty() {
        errors.set(FormField::LastName, "Last name is required");
    }

    if values.password.is_empty() {
        if mode.is_create() {
            errors.set(FormField::Password, "Password is required");
        }
    } else if values.password.chars().count() < MIN_PASSWORD_LEN {
        errors.set(
            FormField::Password,
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }

    errors
}

pub fn to_payload(values: &UserFormValues) -> AdminUserPayload {
    AdminUserPayload::new(
        values.email.trim().to_string(),
        values.first_name.trim().to_string(),
        values.last_name.trim().to_string(),
        values.status,
        (!values.password.is_empty()).then(|| values.password.clone()),
    )
}

/// Draft plus errors: everything the modal renders besides chrome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub mode: FormMode,
    pub values: UserFormValues,
    pub errors: FieldErrors,
}

impl UserForm {
    pub fn new(mode: FormMode, values: UserFormValues) -> Self {
        Self {
            mode,
            values,
            errors: FieldErrors::default(),
        }
    }

    pub fn reset(&mut self, mode: FormMode, values: UserFormValues) {
        *self = Self::new(mode, values);
    }

    /// Editing a field clears its error.
    pub fn edit(&mut self, field: FormField, f: impl FnOnce(&mut UserFormValues)) {
        f(&mut self.values);
        self.errors.clear(field);
        self.errors.form = None;
    }

    /// Validate locally. On failure the errors are kept for display and
    /// nothing may be sent.
    pub fn submit(&mut self) -> Result<UserFormValues, FieldErrors> {
        let errors = validate(&self.values, &self.mode);
        if errors.is_empty() {
            self.errors = FieldErrors::default();
            Ok(self.values.clone())
        } else {
            self.errors = errors.clone();
            Err(errors)
        }
    }

    pub fn apply_server_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> UserFormValues {
        UserFormValues {
            email: "ann@site.io".into(),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            password: String::new(),
            status: UserStatus::Enabled,
        }
    }

    #[test]
    fn edit_without_password_sends_no_password_key() {
        let mut form = UserForm::new(FormMode::Edit(UserId::Number(1)), filled());
        let values = form.submit().unwrap();
        let payload = serde_json::to_value(to_payload(&values)).unwrap();
        assert!(payload.get("password").is_none());
        assert_eq!(payload["is_active"], serde_json::json!(true));
    }

    #[test]
    fn create_with_short_password_fails_locally() {
        let mut form = UserForm::new(FormMode::Create, UserFormValues {
            password: "abcde".into(),
            ..filled()
        });
        let errors = form.submit().unwrap_err();
        assert_eq!(
            errors.get(FormField::Password),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(form.errors, errors);
    }

    #[test]
    fn create_requires_password() {
        let errors = validate(&filled(), &FormMode::Create);
        assert_eq!(errors.get(FormField::Password), Some("Password is required"));
        assert!(validate(&filled(), &FormMode::Edit(UserId::Number(2))).is_empty());
    }

    #[test]
    fn short_password_rejected_on_edit_too() {
        let values = UserFormValues {
            password: "123".into(),
            ..filled()
        };
        let errors = validate(&values, &FormMode::Edit(UserId::Number(2)));
        assert!(errors.get(FormField::Password).is_some());
    }

    #[test]
    fn email_and_names_are_checked() {
        let values = UserFormValues {
            email: "not-an-email".into(),
            first_name: " ".into(),
            last_name: String::new(),
            ..filled()
        };
        let errors = validate(&values, &FormMode::Edit(UserId::Number(1)));
        assert_eq!(errors.get(FormField::Email), Some("Enter a valid email address"));
        assert_eq!(errors.get(FormField::FirstName), Some("First name is required"));
        assert_eq!(errors.get(FormField::LastName), Some("Last name is required"));
        assert!(errors.get(FormField::Status).is_none());

        let empty = UserFormValues::default();
        assert_eq!(
            validate(&empty, &FormMode::Create).get(FormField::Email),
            Some("Email is required")
        );
    }

    #[test]
    fn server_errors_land_on_fields() {
        let mut server = ServerFieldErrors::new();
        server.insert("email".into(), vec!["already used".into(), "second".into()]);
        server.insert("non_field_errors".into(), vec!["Try again".into()]);

        let mut form = UserForm::new(FormMode::Create, filled());
        form.apply_server_errors(FieldErrors::from_server(&server));
        assert_eq!(form.errors.get(FormField::Email), Some("already used"));
        assert_eq!(form.errors.form_message(), Some("Try again"));

        form.edit(FormField::Email, |v| v.email = "new@site.io".into());
        assert!(form.errors.get(FormField::Email).is_none());
    }

    #[test]
    fn edit_prefill_normalizes_missing_names() {
        let user = AdminUser {
            id: UserId::Number(8),
            email: "x@y.io".into(),
            first_name: None,
            last_name: Some("Y".into()),
            avatar: None,
            status: UserStatus::Disabled,
            date_joined: None,
        };
        let values = UserFormValues::from_user(&user);
        assert_eq!(values.first_name, "");
        assert_eq!(values.password, "");
        assert_eq!(values.status, UserStatus::Disabled);
    }
}
