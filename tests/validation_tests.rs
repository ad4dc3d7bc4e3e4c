
use portfolio_contact::{
    entities::message::Subject,
    validation::{
        validate_email, validate_message_body, validate_name, validate_subject,
        validate_submission, DisposableDomains,
    },
};
use test_utils::{form, valid_form};

fn message_of<T>(result: Result<T, validator::ValidationError>) -> String {
    match result {
        Ok(_) => panic!("expected a validation failure"),
        Err(e) => e.message.expect("validation errors carry a message").into_owned(),
    }
}

#[test]
fn names_with_letters_in_range_are_accepted() {
    for name in ["Al", "Ada Lovelace", "O'Brien", "José", "李明", "R2-D2"] {
        assert!(validate_name(name).is_ok(), "{name} should be valid");
    }
    assert!(validate_name(&"a".repeat(100)).is_ok());
}

#[test]
fn name_is_measured_after_trimming() {
    assert_eq!(message_of(validate_name("  A  ")), "Name must be at least 2 characters long");
    assert!(validate_name("  Al  ").is_ok());
}

#[test]
fn name_length_bounds_are_enforced() {
    assert_eq!(message_of(validate_name("A")), "Name must be at least 2 characters long");
    assert_eq!(
        message_of(validate_name(&"a".repeat(101))),
        "Name is too long (max 100 characters)"
    );
}

#[test]
fn names_without_letters_are_rejected() {
    for name in ["12345", "!!", "42 42", "-- --"] {
        assert_eq!(message_of(validate_name(name)), "Please enter a valid name");
    }
}

#[test]
fn well_formed_emails_are_accepted() {
    let domains = DisposableDomains::default();
    for email in ["a@b.com", "first.last@sub.example.org", "x+tag@example.co.uk"] {
        assert!(validate_email(email, &domains).is_ok(), "{email} should be valid");
    }
}

#[test]
fn malformed_emails_are_rejected() {
    let domains = DisposableDomains::default();
    for email in ["plainaddress", "a@b", "a b@c.com", "a@@b.com", "@b.com", "a@.com"] {
        assert_eq!(message_of(validate_email(email, &domains)), "Invalid email format", "{email}");
    }
}

#[test]
fn email_length_limits_are_enforced() {
    let domains = DisposableDomains::default();

    let long_local = format!("{}@example.com", "a".repeat(65));
    assert_eq!(message_of(validate_email(&long_local, &domains)), "Email local part is too long");

    let long_total = format!("user@{}.com", "d".repeat(250));
    assert_eq!(message_of(validate_email(&long_total, &domains)), "Email address is too long");

    let max_local = format!("{}@example.com", "a".repeat(64));
    assert!(validate_email(&max_local, &domains).is_ok());
}

#[test]
fn disposable_domains_are_rejected_case_insensitively() {
    let domains = DisposableDomains::default();
    for email in ["x@mailinator.com", "x@MAILINATOR.COM", "x@eu.guerrillamail.com"] {
        assert_eq!(
            message_of(validate_email(email, &domains)),
            "Disposable email addresses are not allowed",
            "{email}"
        );
    }
}

#[test]
fn deny_list_can_be_swapped() {
    let custom = DisposableDomains::new(["example.net"]);
    assert!(validate_email("x@mailinator.com", &custom).is_ok());
    assert!(validate_email("x@example.net", &custom).is_err());

    assert!(validate_email("x@mailinator.com", &DisposableDomains::empty()).is_ok());
}

#[test]
fn message_body_bounds_are_enforced() {
    assert!(validate_message_body("1234567890").is_ok());
    assert!(validate_message_body(&"m".repeat(5000)).is_ok());
    assert_eq!(
        message_of(validate_message_body("short")),
        "Message must be at least 10 characters long"
    );
    assert_eq!(
        message_of(validate_message_body("   123456789   ")),
        "Message must be at least 10 characters long"
    );
    assert_eq!(
        message_of(validate_message_body(&"m".repeat(5001))),
        "Message is too long (max 5000 characters)"
    );
}

#[test]
fn only_known_subjects_are_accepted() {
    assert_eq!(validate_subject("project").unwrap(), Subject::Project);
    assert_eq!(validate_subject("job").unwrap(), Subject::Job);
    assert_eq!(validate_subject("collaboration").unwrap(), Subject::Collaboration);
    assert_eq!(validate_subject("other").unwrap(), Subject::Other);

    for subject in ["spam", "Project", ""] {
        assert_eq!(message_of(validate_subject(subject)), "Please select a valid subject");
    }
}

#[test]
fn submission_is_normalized() {
    let raw = form("  Ada  ", "  Ada@Example.COM ", "job", "  Hello there, Ada here.  ");
    let submission = validate_submission(&raw, &DisposableDomains::default()).unwrap();

    assert_eq!(submission.name, "Ada");
    assert_eq!(submission.email, "ada@example.com");
    assert_eq!(submission.subject, Subject::Job);
    assert_eq!(submission.body, "Hello there, Ada here.");
}

#[test]
fn submission_requires_every_field() {
    let mut raw = valid_form();
    raw.subject.clear();
    assert_eq!(
        message_of(validate_submission(&raw, &DisposableDomains::default())),
        "All fields are required"
    );
}

#[test]
fn submission_reports_the_first_failing_check() {
    let domains = DisposableDomains::default();

    // every field is wrong: the name check runs first
    let all_bad = form("1", "nope", "spam", "short");
    assert_eq!(message_of(validate_submission(&all_bad, &domains)), "Name must be at least 2 characters long");

    let bad_email_and_body = form("Al", "nope", "spam", "short");
    assert_eq!(message_of(validate_submission(&bad_email_and_body, &domains)), "Invalid email format");

    let bad_body_and_subject = form("Al", "a@b.com", "spam", "short");
    assert_eq!(
        message_of(validate_submission(&bad_body_and_subject, &domains)),
        "Message must be at least 10 characters long"
    );

    let bad_subject = form("Al", "a@b.com", "spam", "1234567890");
    assert_eq!(message_of(validate_submission(&bad_subject, &domains)), "Please select a valid subject");
}
