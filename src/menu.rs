//! Interactive menu loop dispatching to the calculators and stores.

use std::io::{self, BufRead, Write};

use crate::calc::{Co2Emissions, EnergyCost, HeatingLoad};
use crate::config::ToolConfig;
use crate::input::Prompter;
use crate::report::ReportStore;
use crate::usage_log::UsageLog;

/// Menu option codes, in display order. `"6"` exits.
pub const MENU_CHOICES: [&str; 6] = ["1", "2", "3", "4", "5", "6"];

/// Stores and constants shared by one interactive session.
///
/// File paths come from configuration at construction; nothing here is a
/// process-wide constant.
pub struct Session {
    /// Timestamped calculation report.
    pub report: ReportStore,
    /// CSV usage log backing the history chart.
    pub usage: UsageLog,
    /// Electricity emission factor (kg CO₂ per kWh).
    pub emission_factor: f64,
}

impl Session {
    /// Builds a session from validated configuration.
    pub fn from_config(cfg: &ToolConfig) -> Self {
        Self {
            report: ReportStore::new(&cfg.storage.report_path),
            usage: UsageLog::new(&cfg.storage.usage_log_path),
            emission_factor: cfg.emissions.electricity_kg_per_kwh,
        }
    }
}

/// Runs the menu loop until the exit choice is selected.
///
/// Each iteration prompts for a choice, dispatches the matching handler,
/// and returns to the prompt. Only the exit choice terminates the loop.
///
/// # Errors
///
/// Returns an `io::Error` on console or store failures, including input
/// exhaustion before an exit choice.
pub fn run<R: BufRead, W: Write>(session: &Session, p: &mut Prompter<R, W>) -> io::Result<()> {
    loop {
        p.say("")?;
        p.say("Building Engineering Tool")?;
        p.say("1. Energy Cost Calculator")?;
        p.say("2. Heating Load Estimator")?;
        p.say("3. CO2 Emissions Calculator")?;
        p.say("4. View report")?;
        p.say("5. Plot energy history")?;
        p.say("6. Exit")?;

        let choice = p.ask_menu("Choose an option (1-6): ", &MENU_CHOICES)?;
        match choice.as_str() {
            "1" => energy_cost(session, p)?,
            "2" => heating_load(session, p)?,
            "3" => co2_emissions(session, p)?,
            "4" => view_report(session, p)?,
            "5" => plot_history(session, p)?,
            _ => {
                p.say("Goodbye!")?;
                return Ok(());
            }
        }
    }
}

/// Energy cost: compute, print, persist to report, then log for charting.
///
/// The report append and the usage-log append are two independent writes;
/// a crash between them leaves each file individually well-formed.
fn energy_cost<R: BufRead, W: Write>(session: &Session, p: &mut Prompter<R, W>) -> io::Result<()> {
    let energy_kwh = p.ask_number("Enter energy used in kWh: ")?;
    let price = p.ask_number("Enter cost per kWh in euros: ")?;

    let result = EnergyCost::calculate(energy_kwh, price);
    p.say(&result.to_string())?;
    session.report.append(&result.summary())?;
    session.usage.log(energy_kwh)?;
    p.say("Logged energy usage for charting.")
}

fn heating_load<R: BufRead, W: Write>(session: &Session, p: &mut Prompter<R, W>) -> io::Result<()> {
    let area = p.ask_number("Enter floor area in m²: ")?;
    let u_value = p.ask_number("Enter average U-value (W/m²·K): ")?;
    let delta_t = p.ask_number("Enter temperature difference (inside - outside, °C): ")?;

    let result = HeatingLoad::calculate(area, u_value, delta_t);
    p.say(&result.to_string())?;
    session.report.append(&result.summary())
}

fn co2_emissions<R: BufRead, W: Write>(
    session: &Session,
    p: &mut Prompter<R, W>,
) -> io::Result<()> {
    let energy_kwh = p.ask_number("Enter energy used in kWh: ")?;

    let result = Co2Emissions::calculate(energy_kwh, session.emission_factor);
    p.say(&result.to_string())?;
    session.report.append(&result.summary())
}

/// Echoes the whole report verbatim, or says there is nothing yet.
fn view_report<R: BufRead, W: Write>(session: &Session, p: &mut Prompter<R, W>) -> io::Result<()> {
    match session.report.read()? {
        None => p.say("No report yet. Run a calculation first."),
        Some(text) => {
            p.say("")?;
            p.say("--- Report History ---")?;
            p.say(text.trim_end_matches('\n'))?;
            p.say("--- End ---")
        }
    }
}

/// Charts the usage log, or reports the absent/empty-data condition.
fn plot_history<R: BufRead, W: Write>(session: &Session, p: &mut Prompter<R, W>) -> io::Result<()> {
    match session.usage.readings()? {
        None => p.say("No energy log yet. Run the Energy Cost Calculator first."),
        Some(rows) if rows.is_empty() => p.say("Log exists but has no valid data yet."),
        Some(rows) => render_chart(&rows, p),
    }
}

#[cfg(feature = "tui")]
fn render_chart<R: BufRead, W: Write>(
    rows: &[crate::usage_log::Reading],
    _p: &mut Prompter<R, W>,
) -> io::Result<()> {
    crate::tui::run_usage_chart(rows)
}

#[cfg(not(feature = "tui"))]
fn render_chart<R: BufRead, W: Write>(
    rows: &[crate::usage_log::Reading],
    p: &mut Prompter<R, W>,
) -> io::Result<()> {
    p.say(&format!(
        "{} readings logged. Chart display needs the `tui` feature \
         (cargo run --features tui).",
        rows.len()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_session() -> (tempfile::TempDir, Session) {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = Session {
            report: ReportStore::new(dir.path().join("report.txt")),
            usage: UsageLog::new(dir.path().join("energy_log.csv")),
            emission_factor: 0.233,
        };
        (dir, session)
    }

    fn run_scripted(session: &Session, script: &str) -> String {
        let mut p = Prompter::new(script.as_bytes(), Vec::<u8>::new());
        run(session, &mut p).expect("menu run should complete");
        String::from_utf8(p.into_output()).expect("utf-8 output")
    }

    #[test]
    fn exit_choice_terminates() {
        let (_dir, session) = temp_session();
        let out = run_scripted(&session, "6\n");
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn energy_cost_prints_and_persists() {
        let (_dir, session) = temp_session();
        let out = run_scripted(&session, "1\n10\n0.25\n6\n");
        assert!(out.contains("Energy used: 10.00 kWh (36.00 MJ)"));
        assert!(out.contains("Total energy cost: EUR 2.50"));
        assert!(out.contains("Logged energy usage for charting."));

        let report = session.report.read().expect("read ok").expect("exists");
        assert!(report.contains("Energy Cost: 10.00 kWh (36.00 MJ), EUR 2.50"));
        let rows = session.usage.readings().expect("read ok").expect("exists");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kwh, 10.0);
    }

    #[test]
    fn heating_load_round_trip() {
        let (_dir, session) = temp_session();
        let out = run_scripted(&session, "2\n100\n0.3\n20\n6\n");
        assert!(out.contains("Estimated heating load: 0.60 kW"));
        assert!(out.contains("ΔT: 20.00 °C (68.00 °F)"));
        let report = session.report.read().expect("read ok").expect("exists");
        assert!(report.contains("Heating Load: Area 100.00 m2, dT 20.00 C, 0.60 kW"));
    }

    #[test]
    fn co2_uses_session_emission_factor() {
        let (_dir, session) = temp_session();
        let out = run_scripted(&session, "3\n10\n6\n");
        assert!(out.contains("Estimated CO₂ emissions: 2.33 kg"));
    }

    #[test]
    fn view_report_without_data_says_so_and_creates_nothing() {
        let (_dir, session) = temp_session();
        let out = run_scripted(&session, "4\n6\n");
        assert!(out.contains("No report yet. Run a calculation first."));
        assert!(!session.report.path().exists());
    }

    #[test]
    fn invalid_choice_reprompts_then_recovers() {
        let (_dir, session) = temp_session();
        let out = run_scripted(&session, "9\nhello\n6\n");
        assert!(out.contains("Invalid choice. Pick one of: 1, 2, 3, 4, 5, 6"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn plot_without_log_reports_absent_data() {
        let (_dir, session) = temp_session();
        let out = run_scripted(&session, "5\n6\n");
        assert!(out.contains("No energy log yet."));
    }

    #[test]
    fn retried_numeric_input_still_lands_one_report_line() {
        let (_dir, session) = temp_session();
        run_scripted(&session, "1\nabc\n10\n0.25\n6\n");
        let report = session.report.read().expect("read ok").expect("exists");
        assert_eq!(report.lines().count(), 1);
    }
}
