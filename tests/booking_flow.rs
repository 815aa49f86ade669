use chrono::NaiveDate;
use recovery_office::booking::{BookingContext, BookingStep, BookingWizard, StepStatus};
use recovery_office::calendar::{CalendarState, ScheduleSlotProvider, TimeSlotProvider};
use recovery_office::config::AppConfig;
use recovery_office::form::{
    BookingField, BookingFormController, ContactMethod, FormEvent,
};
use std::cell::RefCell;
use std::rc::Rc;

const CONFIG: &str = r#"
log_filter: "warn"
schedule:
  slot_minutes: 30
  opening_hours:
    - weekday: tuesday
      open: "09:00"
      close: "11:00"
  closed_dates: ["2026-10-27"]
  booked:
    - date: "2026-10-20"
      time: "09:30"
"#;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn full_booking_walkthrough() {
    let config = AppConfig::from_yaml_str(CONFIG).expect("config should parse");
    let provider = ScheduleSlotProvider::from_config(&config.schedule).expect("provider");
    let today = date(2026, 10, 18);

    // Date step.
    let mut calendar = CalendarState::new(today);
    assert!(!calendar.select(date(2026, 10, 13)));
    assert!(calendar.select(date(2026, 10, 20)));
    let chosen = calendar.selected().expect("selected date");

    let mut wizard = BookingWizard::new();
    assert!(wizard.select_date(chosen, today));
    wizard.advance();
    assert_eq!(wizard.current(), BookingStep::SelectTime);

    // Time step.
    let slots = provider.slots_for(chosen);
    assert_eq!(slots.len(), 4);
    assert!(!wizard.select_slot("2026-10-20-0930", &provider));
    assert!(wizard.select_slot("2026-10-20-1000", &provider));
    wizard.advance();
    assert_eq!(wizard.current(), BookingStep::Details);

    // Details step.
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let mut form = BookingFormController::from_context(&wizard);
    form.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    assert!(!form.submit(&mut wizard));
    assert_eq!(wizard.current(), BookingStep::Details);
    assert!(
        events
            .borrow()
            .iter()
            .any(|e| matches!(e, FormEvent::SubmitRejected { .. }))
    );

    form.handle_change(BookingField::FirstName, "Jane");
    form.handle_change(BookingField::LastName, "Doe");
    form.handle_change(BookingField::Email, "jane@doe.com");
    form.handle_change(BookingField::Phone, "5551234567");
    form.handle_change(BookingField::PreferredContactMethod, "text");
    form.handle_change(BookingField::TermsAccepted, "on");
    assert_eq!(form.error(BookingField::FirstName), None);

    assert!(form.submit(&mut wizard));
    assert_eq!(wizard.current(), BookingStep::Confirm);
    assert_eq!(wizard.status_at(2), StepStatus::Done);
    assert!(events.borrow().iter().any(|e| matches!(
        e,
        FormEvent::StepRequested { from: 2, to: 3 }
    )));

    let summary = wizard.summary().expect("summary");
    assert_eq!(summary.date, date(2026, 10, 20));
    assert_eq!(summary.time, "10:00 AM");
    assert_eq!(summary.customer.preferred_contact_method, ContactMethod::Text);

    // Going back keeps what was entered.
    form.go_back(&mut wizard);
    assert_eq!(wizard.current(), BookingStep::Details);
    let revisited = BookingFormController::from_context(&wizard);
    assert_eq!(revisited.form().text(BookingField::Email), "jane@doe.com");
    assert_eq!(
        wizard.customer_info().map(|info| info.phone.as_str()),
        Some("5551234567")
    );
}

#[test]
fn closed_dates_have_no_slots() {
    let config = AppConfig::from_yaml_str(CONFIG).expect("config should parse");
    let provider = ScheduleSlotProvider::from_config(&config.schedule).expect("provider");
    assert!(provider.slots_for(date(2026, 10, 27)).is_empty());
    assert!(provider.slots_for(date(2026, 10, 21)).is_empty());
}
