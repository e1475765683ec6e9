use contracts::system::users::AdminUser;

use super::form::{FieldErrors, FormMode, UserFormValues};
use crate::shared::http::ApiError;

/// What the page hands to the modal. The modal knows nothing about which
/// record it edits beyond this.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModalState {
    pub show: bool,
    pub title: String,
    pub mode: FormMode,
    pub form_value: UserFormValues,
}

impl ModalState {
    pub fn open_create(&mut self) {
        *self = ModalState {
            show: true,
            title: "Create User".to_string(),
            mode: FormMode::Create,
            form_value: UserFormValues::default(),
        };
    }

    pub fn open_edit(&mut self, user: &AdminUser) {
        *self = ModalState {
            show: true,
            title: "Edit User".to_string(),
            mode: FormMode::Edit(user.id.clone()),
            form_value: UserFormValues::from_user(user),
        };
    }

    pub fn close(&mut self) {
        self.show = false;
    }
}

/// How a save attempt ended, from the page's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Modal closed; the list must be refreshed.
    Saved,
    /// Server rejected fields; the modal stays open showing them.
    FieldErrors(FieldErrors),
    /// Modal stays open. `notice` is set when nobody has told the user yet.
    Failed { notice: Option<String> },
}

/// Classifies a save result without touching the modal. The caller closes
/// it on `Saved` and leaves it alone otherwise.
pub fn classify_submit<T>(mode: &FormMode, result: Result<T, ApiError>) -> SubmitOutcome {
    match result {
        Ok(_) => SubmitOutcome::Saved,
        Err(err) => match err.field_errors() {
            Some(server) => SubmitOutcome::FieldErrors(FieldErrors::from_server(&server)),
            // The HTTP layer already toasted everything except validation.
            None if err.is_validation() => SubmitOutcome::Failed {
                notice: Some(match mode {
                    FormMode::Create => "Failed to create user".to_string(),
                    FormMode::Edit(_) => "Failed to update user".to_string(),
                }),
            },
            None => SubmitOutcome::Failed { notice: None },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::users::ui::modal::form::FormField;
    use contracts::system::users::{UserId, UserStatus};
    use serde_json::json;

    fn user() -> AdminUser {
        AdminUser {
            id: UserId::Number(12),
            email: "e@site.io".into(),
            first_name: Some("E".into()),
            last_name: None,
            avatar: None,
            status: UserStatus::Disabled,
            date_joined: None,
        }
    }

    #[test]
    fn server_field_errors_keep_the_modal_open() {
        let mut modal = ModalState::default();
        modal.open_create();
        let result: Result<(), _> = Err(ApiError::Validation {
            message: "Bad Request".into(),
            body: json!({"data": {"email": ["already used"]}}),
        });

        let before = modal.clone();
        let outcome = classify_submit(&modal.mode, result);
        let SubmitOutcome::FieldErrors(errors) = outcome else {
            panic!("expected field errors, got {:?}", outcome);
        };
        assert_eq!(errors.get(FormField::Email), Some("already used"));
        assert_eq!(modal, before);
    }

    #[test]
    fn success_is_saved() {
        let mut modal = ModalState::default();
        modal.open_edit(&user());
        assert_eq!(classify_submit(&modal.mode, Ok(())), SubmitOutcome::Saved);
        modal.close();
        assert!(!modal.show);
    }

    #[test]
    fn generic_failure_is_not_toasted_twice() {
        let mut modal = ModalState::default();
        modal.open_edit(&user());
        let outcome = classify_submit::<()>(
            &modal.mode,
            Err(ApiError::Server {
                status: 500,
                message: "boom".into(),
            }),
        );
        assert_eq!(outcome, SubmitOutcome::Failed { notice: None });

        let outcome = classify_submit::<()>(
            &modal.mode,
            Err(ApiError::Validation {
                message: "Bad Request".into(),
                body: json!([]),
            }),
        );
        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                notice: Some("Failed to update user".into())
            }
        );
        assert!(modal.show);
    }

    #[test]
    fn edit_prefills_normalized_record() {
        let mut modal = ModalState::default();
        modal.open_edit(&user());
        assert_eq!(modal.mode, FormMode::Edit(UserId::Number(12)));
        assert_eq!(modal.form_value.status, UserStatus::Disabled);
        assert_eq!(modal.title, "Edit User");

        modal.open_create();
        assert_eq!(modal.form_value, UserFormValues::default());
        assert!(modal.mode.is_create());
    }
}
