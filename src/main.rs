use chrono::{Datelike, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use recovery_office::booking::{BookingContext, BookingWizard};
use recovery_office::calendar::date::{WEEKDAY_SHORT, parse_iso_date};
use recovery_office::calendar::{
    CalendarState, GridDay, ScheduleSlotProvider, TimeSlotProvider, ViewMonth,
};
use recovery_office::config::{AppConfig, CONFIG_ENV};
use recovery_office::error::{AppError, Result};
use recovery_office::form::{
    BookingField, BookingFormController, ContactField, ContactFormController, ContactMessage,
    FormField,
};
use recovery_office::logging::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "recovery-office")]
#[command(about = "Recovery Office booking tools")]
struct Cli {
    #[arg(long, global = true, env = CONFIG_ENV)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a month grid and the time slots of the selected day.
    Calendar(CalendarArgs),
    /// Validate booking details and print what would be handed on.
    Book(BookArgs),
    /// Validate a contact message and print it.
    Contact(ContactArgs),
    /// Print the effective configuration, or its JSON schema.
    Config {
        #[arg(long, default_value_t = false)]
        schema: bool,
    },
}

#[derive(Args)]
struct CalendarArgs {
    #[arg(long)]
    year: Option<i32>,
    /// 1-12
    #[arg(long)]
    month: Option<u32>,
    #[arg(long)]
    select: Option<String>,
    #[arg(long)]
    today: Option<String>,
}

#[derive(Args)]
struct BookArgs {
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, value_enum, default_value_t = ContactMethodCli::Email)]
    contact_method: ContactMethodCli,
    #[arg(long, default_value_t = false)]
    returning: bool,
    #[arg(long)]
    notes: Option<String>,
    #[arg(long, default_value_t = false)]
    accept_terms: bool,
    #[arg(long)]
    date: Option<String>,
    #[arg(long, requires = "date")]
    slot: Option<String>,
    #[arg(long)]
    today: Option<String>,
}

#[derive(Args)]
struct ContactArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long, default_value = "")]
    message: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ContactMethodCli {
    Email,
    Phone,
    Text,
}

impl ContactMethodCli {
    fn as_str(self) -> &'static str {
        match self {
            ContactMethodCli::Email => "email",
            ContactMethodCli::Phone => "phone",
            ContactMethodCli::Text => "text",
        }
    }
}

fn main() -> ExitCode {
    ExitCode::from(exit_status(run()))
}

/// 0 on success, 1 when input failed validation, 2 on any other error.
fn exit_status(outcome: Result<bool>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(err) => {
            eprintln!("Error: {err}");
            2
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    init_logging(&config.effective_log_filter());

    match cli.command {
        Commands::Calendar(args) => print_calendar(&config, args),
        Commands::Book(args) => run_booking(&config, args),
        Commands::Contact(args) => run_contact(args),
        Commands::Config { schema } => {
            if schema {
                println!("{}", AppConfig::json_schema()?);
            } else {
                print!("{}", config.to_yaml()?);
            }
            Ok(true)
        }
    }
}

fn parse_date_arg(raw: Option<String>) -> Result<Option<NaiveDate>> {
    raw.map(|raw| parse_iso_date(&raw).ok_or(AppError::InvalidDate(raw)))
        .transpose()
}

fn print_calendar(config: &AppConfig, args: CalendarArgs) -> Result<bool> {
    let today = parse_date_arg(args.today)?.unwrap_or_else(recovery_office::calendar::today);
    let mut state = CalendarState::new(today);

    if let Some(selected) = parse_date_arg(args.select)? {
        state = state.with_selected(selected);
    }

    if args.year.is_some() || args.month.is_some() {
        let delta = month_delta(state.view(), args.year, args.month)?;
        state.navigate(delta);
    }

    println!("{:^28}", state.month_title());
    println!(
        "{}",
        WEEKDAY_SHORT
            .iter()
            .map(|name| format!(" {name} "))
            .collect::<String>()
    );
    for week in state.weeks() {
        println!("{}", week.iter().map(render_cell).collect::<String>());
    }

    if let Some(selected) = state.selected() {
        let provider = ScheduleSlotProvider::from_config(&config.schedule)?;
        let slots = provider.slots_for(selected);
        println!();
        if slots.is_empty() {
            println!("No appointments on {selected}");
        }
        for slot in slots {
            let status = if slot.available { "" } else { " (booked)" };
            println!("  {:>8}  {}{}", slot.time, slot.id, status);
        }
    }

    Ok(true)
}

/// Months between `view` and the requested `--year`/`--month` (1-12).
fn month_delta(view: ViewMonth, year: Option<i32>, month: Option<u32>) -> Result<i32> {
    let (min, max) = (NaiveDate::MIN.year(), NaiveDate::MAX.year());
    let target_year = year.unwrap_or(view.year);
    if !(min..=max).contains(&target_year) {
        return Err(AppError::YearOutOfRange {
            year: target_year,
            min,
            max,
        });
    }
    let target_month = match month {
        Some(m @ 1..=12) => (m - 1) as i32,
        Some(other) => return Err(AppError::InvalidMonth(other)),
        None => i32::from(view.month),
    };
    Ok((target_year - view.year) * 12 + (target_month - i32::from(view.month)))
}

fn render_cell(day: &GridDay) -> String {
    let d = day.cell.day;
    if day.flags.is_selected {
        format!("[{d:>2}]")
    } else if day.flags.is_today {
        format!("*{d:>2} ")
    } else if !day.cell.is_current_month {
        format!("({d:>2})")
    } else if day.flags.is_disabled {
        format!("-{d:>2} ")
    } else {
        format!(" {d:>2} ")
    }
}

fn run_booking(config: &AppConfig, args: BookArgs) -> Result<bool> {
    let today = parse_date_arg(args.today)?.unwrap_or_else(recovery_office::calendar::today);
    let mut wizard = BookingWizard::new();

    if let Some(date) = parse_date_arg(args.date)? {
        if !wizard.select_date(date, today) {
            eprintln!("{date} is in the past");
            return Ok(false);
        }
        wizard.advance();

        if let Some(slot_id) = args.slot.as_deref() {
            let provider = ScheduleSlotProvider::from_config(&config.schedule)?;
            if !wizard.select_slot(slot_id, &provider) {
                eprintln!("slot {slot_id} is not available on {date}");
                return Ok(false);
            }
            wizard.advance();
        }
    }

    let mut form = BookingFormController::from_context(&wizard);
    form.handle_change(BookingField::FirstName, args.first_name);
    form.handle_change(BookingField::LastName, args.last_name);
    form.handle_change(BookingField::Email, args.email);
    form.handle_change(BookingField::Phone, args.phone);
    form.handle_change(
        BookingField::PreferredContactMethod,
        args.contact_method.as_str(),
    );
    form.handle_change(BookingField::IsNewClient, !args.returning);
    form.handle_change(
        BookingField::AdditionalNotes,
        args.notes.unwrap_or_default(),
    );
    form.handle_change(BookingField::TermsAccepted, args.accept_terms);

    if !form.submit(&mut wizard) {
        for (field, message) in form.form().errors() {
            eprintln!("{}: {}", field.name(), message);
        }
        return Ok(false);
    }

    if let Some(summary) = wizard.summary() {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if let Some(info) = wizard.customer_info() {
        println!("{}", serde_json::to_string_pretty(info)?);
    }
    Ok(true)
}

fn run_contact(args: ContactArgs) -> Result<bool> {
    let mut form = ContactFormController::new();
    form.handle_change(ContactField::Name, args.name);
    form.handle_change(ContactField::Email, args.email);
    form.handle_change(ContactField::Phone, args.phone);
    form.handle_change(ContactField::Subject, args.subject);
    form.handle_change(ContactField::Message, args.message);

    let mut sent = Vec::new();
    if !form.submit(&mut |message: ContactMessage| sent.push(message)) {
        for (field, message) in form.form().errors() {
            eprintln!("{}: {}", field.name(), message);
        }
        return Ok(false);
    }

    for message in &sent {
        println!("{}", serde_json::to_string_pretty(message)?);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recovery_office::calendar::{DayCell, DayFlags};

    fn grid_day(
        is_current_month: bool,
        is_today: bool,
        is_selected: bool,
        is_disabled: bool,
    ) -> GridDay {
        GridDay {
            cell: DayCell {
                day: 7,
                month: 9,
                year: 2026,
                is_current_month,
            },
            flags: DayFlags {
                is_today,
                is_selected,
                is_disabled,
            },
        }
    }

    fn book_args(extra: &[&str]) -> BookArgs {
        let base = [
            "recovery-office",
            "book",
            "--first-name",
            "Jane",
            "--last-name",
            "Doe",
            "--email",
            "jane@doe.com",
            "--phone",
            "5551234567",
            "--today",
            "2026-10-18",
        ];
        let cli = Cli::try_parse_from(base.iter().chain(extra)).expect("book arguments");
        match cli.command {
            Commands::Book(args) => args,
            _ => panic!("expected the book command"),
        }
    }

    fn contact_args(message: &str) -> ContactArgs {
        ContactArgs {
            name: "Jane Doe".to_string(),
            email: "jane@doe.com".to_string(),
            phone: String::new(),
            subject: "Question".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn cell_markers_follow_precedence() {
        assert_eq!(render_cell(&grid_day(true, true, true, false)), "[ 7]");
        assert_eq!(render_cell(&grid_day(true, true, false, false)), "* 7 ");
        assert_eq!(render_cell(&grid_day(false, false, false, true)), "( 7)");
        assert_eq!(render_cell(&grid_day(true, false, false, true)), "- 7 ");
        assert_eq!(render_cell(&grid_day(true, false, false, false)), "  7 ");
    }

    #[test]
    fn bad_date_argument_is_rejected() {
        assert!(matches!(
            parse_date_arg(Some("2026-13-01".to_string())),
            Err(AppError::InvalidDate(raw)) if raw == "2026-13-01"
        ));
        assert_eq!(parse_date_arg(None).ok(), Some(None));
        assert_eq!(
            parse_date_arg(Some("2026-10-20".to_string())).ok().flatten(),
            NaiveDate::from_ymd_opt(2026, 10, 20)
        );
    }

    #[test]
    fn month_and_year_arguments_are_checked() {
        let view = ViewMonth { year: 2026, month: 9 };
        assert!(matches!(
            month_delta(view, None, Some(13)),
            Err(AppError::InvalidMonth(13))
        ));
        assert!(matches!(
            month_delta(view, Some(i32::MAX), Some(1)),
            Err(AppError::YearOutOfRange { year: i32::MAX, .. })
        ));
        assert_eq!(month_delta(view, Some(2027), Some(1)).ok(), Some(3));
        assert_eq!(month_delta(view, None, Some(10)).ok(), Some(0));
        assert_eq!(month_delta(view, Some(2025), None).ok(), Some(-12));
    }

    #[test]
    fn exit_status_separates_validation_from_errors() {
        assert_eq!(exit_status(Ok(true)), 0);
        assert_eq!(exit_status(Ok(false)), 1);
        assert_eq!(exit_status(Err(AppError::InvalidMonth(0))), 2);
    }

    #[test]
    fn contact_command_reports_validation() {
        assert_eq!(run_contact(contact_args("Too short")).ok(), Some(false));
        assert_eq!(
            run_contact(contact_args("I would like to book a first session.")).ok(),
            Some(true)
        );
    }

    #[test]
    fn booking_command_reports_validation() {
        let config = AppConfig::default();
        assert_eq!(run_booking(&config, book_args(&[])).ok(), Some(false));
        assert_eq!(
            run_booking(&config, book_args(&["--accept-terms"])).ok(),
            Some(true)
        );
        assert_eq!(
            run_booking(&config, book_args(&["--accept-terms", "--date", "2026-10-17"])).ok(),
            Some(false)
        );
        assert_eq!(
            run_booking(
                &config,
                book_args(&[
                    "--accept-terms",
                    "--date",
                    "2026-10-20",
                    "--slot",
                    "2026-10-20-0900",
                ])
            )
            .ok(),
            Some(true)
        );
        assert!(matches!(
            run_booking(&config, book_args(&["--date", "next tuesday"])),
            Err(AppError::InvalidDate(_))
        ));
    }

    #[test]
    fn slot_requires_a_date() {
        assert!(
            Cli::try_parse_from(["recovery-office", "book", "--slot", "2026-10-20-0900"]).is_err()
        );
        assert!(
            Cli::try_parse_from([
                "recovery-office",
                "book",
                "--date",
                "2026-10-20",
                "--slot",
                "2026-10-20-0900",
            ])
            .is_ok()
        );
    }
}
