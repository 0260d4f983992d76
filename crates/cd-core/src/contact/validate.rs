//! Field and uniqueness validation for contact submissions

use std::sync::LazyLock;

use regex::Regex;

use crate::contact::{
    ContactFields, ContactForm, ContactId, ContactStore, Field, FieldErrors, Rejected,
};

pub const INVALID_FIRST_NAME: &str = "Invalid first name";
pub const INVALID_LAST_NAME: &str = "Invalid last name";
pub const INVALID_EMAIL: &str = "Invalid email";
pub const INVALID_PHONE: &str = "Invalid phone number";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern compiles")
});

/// Whether `email` has the `local@domain.tld` shape
pub fn is_well_formed_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Check an email for shape and uniqueness
///
/// `owner` is the contact being edited; its own address does not count as a
/// duplicate. Malformed and duplicate addresses get the same message.
pub fn check_email(
    email: &str,
    store: &ContactStore,
    owner: Option<&ContactId>,
) -> Option<&'static str> {
    if !is_well_formed_email(email) || store.email_in_use(email, owner) {
        Some(INVALID_EMAIL)
    } else {
        None
    }
}

/// Validate a submission against every field rule
///
/// All rules run; the error map reports every failing field at once.
pub fn validate(
    form: &ContactForm,
    store: &ContactStore,
    owner: Option<&ContactId>,
) -> Result<ContactFields, Rejected> {
    let mut errors = FieldErrors::new();

    if form.first_name.is_empty() {
        errors.insert(Field::FirstName, INVALID_FIRST_NAME);
    }
    if form.last_name.is_empty() {
        errors.insert(Field::LastName, INVALID_LAST_NAME);
    }
    if let Some(message) = check_email(&form.email, store, owner) {
        errors.insert(Field::Mail, message);
    }
    let phone = form.phone.parse::<i64>();
    if phone.is_err() {
        errors.insert(Field::Phone, INVALID_PHONE);
    }

    match phone {
        Ok(phone) if errors.is_empty() => Ok(ContactFields {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
            phone,
        }),
        _ => Err(Rejected {
            form: form.clone(),
            errors,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::Contact;

    fn store_with(email: &str) -> (ContactStore, ContactId) {
        let mut store = ContactStore::new();
        let contact = Contact::new(
            ContactId::new_v4(),
            ContactFields {
                first_name: "Pedro".to_string(),
                last_name: "Sanchez".to_string(),
                email: email.to_string(),
                phone: 113,
            },
        );
        let id = contact.id;
        store.insert(contact).unwrap();
        (store, id)
    }

    #[test]
    fn test_valid_form() {
        let store = ContactStore::new();
        let form = ContactForm::new("Juan", "Mama", "juan@gm.com", "112");
        let fields = validate(&form, &store, None).unwrap();
        assert_eq!(fields.first_name, "Juan");
        assert_eq!(fields.last_name, "Mama");
        assert_eq!(fields.email, "juan@gm.com");
        assert_eq!(fields.phone, 112);
    }

    #[test]
    fn test_all_errors_collected() {
        let store = ContactStore::new();
        let form = ContactForm::new("", "", "nope", "12ab");
        let rejected = validate(&form, &store, None).unwrap_err();

        assert_eq!(rejected.errors.len(), 4);
        assert_eq!(rejected.errors.get(Field::FirstName), Some(INVALID_FIRST_NAME));
        assert_eq!(rejected.errors.get(Field::LastName), Some(INVALID_LAST_NAME));
        assert_eq!(rejected.errors.get(Field::Mail), Some(INVALID_EMAIL));
        assert_eq!(rejected.errors.get(Field::Phone), Some(INVALID_PHONE));
        assert_eq!(rejected.form, form);
    }

    #[test]
    fn test_only_empty_names_rejected() {
        let store = ContactStore::new();

        let empty = ContactForm::new("", "Mama", "juan@gm.com", "112");
        let rejected = validate(&empty, &store, None).unwrap_err();
        assert!(rejected.errors.contains(Field::FirstName));
        assert_eq!(rejected.errors.len(), 1);

        let empty_last = ContactForm::new("Juan", "", "juan@gm.com", "112");
        let rejected = validate(&empty_last, &store, None).unwrap_err();
        assert!(rejected.errors.contains(Field::LastName));
        assert_eq!(rejected.errors.len(), 1);

        // whitespace is non-empty text and is stored as submitted
        let spaces = ContactForm::new(" ", "  ", "juan@gm.com", "112");
        let fields = validate(&spaces, &store, None).unwrap();
        assert_eq!(fields.first_name, " ");
        assert_eq!(fields.last_name, "  ");
    }

    #[test]
    fn test_duplicate_email_rejected_regardless_of_other_fields() {
        let (store, _) = store_with("pedro@gm.com");

        let good = ContactForm::new("Other", "Person", "pedro@gm.com", "1");
        let rejected = validate(&good, &store, None).unwrap_err();
        assert_eq!(rejected.errors.get(Field::Mail), Some(INVALID_EMAIL));
        assert_eq!(rejected.errors.len(), 1);

        let bad = ContactForm::new("", "", "pedro@gm.com", "x");
        let rejected = validate(&bad, &store, None).unwrap_err();
        assert!(rejected.errors.contains(Field::Mail));
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let (store, _) = store_with("pedro@gm.com");
        let form = ContactForm::new("Other", "Person", "Pedro@gm.com", "1");
        assert!(validate(&form, &store, None).is_ok());
    }

    #[test]
    fn test_owner_keeps_own_email() {
        let (store, id) = store_with("pedro@gm.com");
        let form = ContactForm::new("Pedro", "Sanchez", "pedro@gm.com", "114");
        assert!(validate(&form, &store, Some(&id)).is_ok());

        let other = ContactId::new_v4();
        assert!(validate(&form, &store, Some(&other)).is_err());
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_well_formed_email("a.b-c+d%e_f@sub.domain.io"));
        assert!(is_well_formed_email("x@y.co"));
        assert!(!is_well_formed_email(""));
        assert!(!is_well_formed_email("x@y.c"));
        assert!(!is_well_formed_email("x@y"));
        assert!(!is_well_formed_email("@y.com"));
        assert!(!is_well_formed_email("x y@z.com"));
        assert!(!is_well_formed_email("x@y.c0m"));
    }

    #[test]
    fn test_phone_parsing() {
        let store = ContactStore::new();
        let plain = ContactForm::new("A", "B", "a@b.com", "5551234");
        assert_eq!(validate(&plain, &store, None).unwrap().phone, 5551234);

        let signed = ContactForm::new("A", "B", "a@b.com", "-7");
        assert_eq!(validate(&signed, &store, None).unwrap().phone, -7);

        for phone in [
            "",
            " 5551234 ",
            "5551234\n",
            "555-1234",
            "(555) 1234",
            "99999999999999999999",
        ] {
            let form = ContactForm::new("A", "B", "a@b.com", phone);
            let rejected = validate(&form, &store, None).unwrap_err();
            assert_eq!(
                rejected.errors.get(Field::Phone),
                Some(INVALID_PHONE),
                "phone {:?}",
                phone
            );
        }
    }

    #[test]
    fn test_check_email() {
        let (store, id) = store_with("pedro@gm.com");
        assert_eq!(check_email("pedro@gm.com", &store, None), Some(INVALID_EMAIL));
        assert_eq!(check_email("pedro@gm.com", &store, Some(&id)), None);
        assert_eq!(check_email("bad", &store, Some(&id)), Some(INVALID_EMAIL));
        assert_eq!(check_email("new@gm.com", &store, None), None);
    }
}
