//! Interactive text menu over any line-oriented reader and writer.

use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use tracing::debug;

use tvm_core::cash_flows::{self, IrrSettings};
use tvm_core::format::{format_currency, format_percent, format_periods};
use tvm_core::time_value;
use tvm_core::{PaymentTiming, Rate, TvmResult};

use crate::input::parse::{parse_count, parse_number};
use crate::input::rate::{RateQuote, ZERO_PERIODS_PER_YEAR_NOTICE};

const CHOOSE: &str = "Choose an option: ";
const PERIODS_PROMPT: &str = "Number of periods: ";

/// Run the menu on the process stdin/stdout until the user exits or input
/// ends.
pub fn run_menu() -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Drive one menu session. End of input is a normal exit.
pub fn run_session<R: BufRead, W: Write>(input: R, output: W) -> io::Result<()> {
    let mut menu = Menu::new(input, output);
    match menu.run() {
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            debug!("menu input closed");
            writeln!(menu.output)?;
            menu.output.flush()
        }
        other => other,
    }
}

pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "=== Financial calculator ===")?;
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Main menu:")?;
            writeln!(self.output, "1) Present value (PV)")?;
            writeln!(self.output, "2) Future value (FV)")?;
            writeln!(self.output, "3) Payments / annuity (PMT)")?;
            writeln!(self.output, "4) Interest rate")?;
            writeln!(self.output, "5) Net present value (NPV)")?;
            writeln!(self.output, "6) Number of periods (n)")?;
            writeln!(self.output, "7) Internal rate of return (IRR)")?;
            writeln!(self.output, "0) Exit")?;

            let choice = self.read_line(CHOOSE)?;
            debug!(choice = %choice, "main menu selection");
            match choice.as_str() {
                "1" => self.present_value_menu()?,
                "2" => self.future_value_menu()?,
                "3" => self.payment_menu()?,
                "4" => self.interest_rate()?,
                "5" => self.net_present_value()?,
                "6" => self.number_of_periods()?,
                "7" => self.internal_rate_of_return()?,
                "0" => {
                    writeln!(self.output, "Goodbye!")?;
                    return self.output.flush();
                }
                _ => writeln!(self.output, "Invalid option.")?,
            }
        }
    }

    fn present_value_menu(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "--- Present value (PV) ---")?;
            writeln!(self.output, "1) PV of a future amount (single sum)")?;
            writeln!(self.output, "2) PV of an ordinary annuity (payments at period end)")?;
            writeln!(self.output, "3) PV of an annuity due (payments at period start)")?;
            writeln!(self.output, "4) Combined PV (annuity + future amount)")?;
            writeln!(self.output, "0) Back")?;

            let choice = self.read_line(CHOOSE)?;
            debug!(choice = %choice, "present value menu selection");
            match choice.as_str() {
                "0" => return Ok(()),
                "1" => {
                    let fv = self.read_number("FV (future amount): ")?;
                    let r = self.read_rate()?;
                    let n = self.read_number(PERIODS_PROMPT)?;
                    self.show_money("PV", time_value::present_value(fv, r, n))?;
                }
                "2" | "3" => {
                    let timing = PaymentTiming::from_due_flag(choice == "3");
                    let pmt = self.read_number("Periodic payment (PMT): ")?;
                    let r = self.read_rate()?;
                    let n = self.read_number(PERIODS_PROMPT)?;
                    self.show_money(
                        "PV",
                        time_value::present_value_annuity(pmt, r, n, timing),
                    )?;
                }
                "4" => {
                    let pmt = self.read_number("Periodic payment (PMT): ")?;
                    let fv = self.read_number("Additional future amount (FV) [0 if none]: ")?;
                    let r = self.read_rate()?;
                    let n = self.read_number(PERIODS_PROMPT)?;
                    self.show_money(
                        "PV (total)",
                        time_value::present_value_combined(pmt, fv, r, n, PaymentTiming::Ordinary),
                    )?;
                }
                _ => writeln!(self.output, "Invalid option.")?,
            }
        }
    }

    fn future_value_menu(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "--- Future value (FV) ---")?;
            writeln!(self.output, "1) FV of a present amount (single sum)")?;
            writeln!(self.output, "2) FV of an ordinary annuity (payments at period end)")?;
            writeln!(self.output, "3) FV of an annuity due (payments at period start)")?;
            writeln!(self.output, "4) Combined FV (present amount + annuity)")?;
            writeln!(self.output, "0) Back")?;

            let choice = self.read_line(CHOOSE)?;
            debug!(choice = %choice, "future value menu selection");
            match choice.as_str() {
                "0" => return Ok(()),
                "1" => {
                    let pv = self.read_number("PV (present amount): ")?;
                    let r = self.read_rate()?;
                    let n = self.read_number(PERIODS_PROMPT)?;
                    self.show_money("FV", time_value::future_value(pv, r, n))?;
                }
                "2" | "3" => {
                    let timing = PaymentTiming::from_due_flag(choice == "3");
                    let pmt = self.read_number("Periodic payment (PMT): ")?;
                    let r = self.read_rate()?;
                    let n = self.read_number(PERIODS_PROMPT)?;
                    self.show_money(
                        "FV",
                        time_value::future_value_annuity(pmt, r, n, timing),
                    )?;
                }
                "4" => {
                    let pv = self.read_number("Present amount (PV) [0 if none]: ")?;
                    let pmt = self.read_number("Periodic payment (PMT): ")?;
                    let r = self.read_rate()?;
                    let n = self.read_number(PERIODS_PROMPT)?;
                    self.show_money(
                        "FV (total)",
                        time_value::future_value_combined(pv, pmt, r, n, PaymentTiming::Ordinary),
                    )?;
                }
                _ => writeln!(self.output, "Invalid option.")?,
            }
        }
    }

    fn payment_menu(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "--- Payments / annuity (PMT) ---")?;
            writeln!(self.output, "1) PMT to repay a loan (PV), paid at period end")?;
            writeln!(self.output, "2) PMT to repay a loan (PV), paid at period start (due)")?;
            writeln!(self.output, "3) PMT to reach a savings goal (FV), paid at period end")?;
            writeln!(self.output, "4) PMT to reach a savings goal (FV), paid at period start (due)")?;
            writeln!(self.output, "0) Back")?;

            let choice = self.read_line(CHOOSE)?;
            debug!(choice = %choice, "payment menu selection");
            match choice.as_str() {
                "0" => return Ok(()),
                "1" | "2" => {
                    let timing = PaymentTiming::from_due_flag(choice == "2");
                    let pv = self.read_number("Loan amount (PV): ")?;
                    let r = self.read_rate()?;
                    let n = self.read_number("Number of payments: ")?;
                    self.show_money(
                        "PMT",
                        time_value::payment_from_present_value(pv, r, n, timing),
                    )?;
                }
                "3" | "4" => {
                    let timing = PaymentTiming::from_due_flag(choice == "4");
                    let fv = self.read_number("Savings goal (FV): ")?;
                    let r = self.read_rate()?;
                    let n = self.read_number("Number of payments: ")?;
                    self.show_money(
                        "PMT",
                        time_value::payment_from_future_value(fv, r, n, timing),
                    )?;
                }
                _ => writeln!(self.output, "Invalid option.")?,
            }
        }
    }

    fn interest_rate(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "--- Interest rate ---")?;
        let pv = self.read_number("Present value (PV): ")?;
        let fv = self.read_number("Future value (FV): ")?;
        let n = self.read_number(PERIODS_PROMPT)?;
        let shown = time_value::periodic_rate(pv, fv, n).map(|r| format_percent(r, 4));
        self.show("Rate per period", shown)
    }

    fn net_present_value(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "--- Net present value (NPV) ---")?;
        let flows = self.read_cash_flows()?;
        let r = self.read_rate()?;
        self.show_money("NPV", cash_flows::npv(r, &flows))
    }

    fn number_of_periods(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "--- Number of periods (n) ---")?;
        let pv = self.read_number("Present value (PV): ")?;
        let fv = self.read_number("Future value (FV): ")?;
        let r = self.read_rate()?;
        let shown = time_value::number_of_periods(pv, fv, r)
            .map(|n| format!("{} periods", format_periods(n)));
        self.show("n", shown)
    }

    fn internal_rate_of_return(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "--- Internal rate of return (IRR) ---")?;
        let flows = self.read_cash_flows()?;
        let guess = self.read_number("Initial guess in % (e.g. 10% = 10): ")? / Decimal::ONE_HUNDRED;
        let settings = IrrSettings {
            guess,
            ..IrrSettings::default()
        };
        let solution = cash_flows::solve_irr(&flows, &settings);
        debug!(?solution, "irr solved");
        writeln!(self.output, "IRR = {}", format_percent(solution.rate, 4))?;
        if !solution.is_converged() {
            writeln!(
                self.output,
                "Note: the solver did not converge ({:?} after {} iterations); the value is a best estimate.",
                solution.status, solution.iterations
            )?;
        }
        Ok(())
    }

    /// Rate sub-dialog: a rate per period, or an annual rate split across
    /// the year's periods. Returns a decimal fraction.
    fn read_rate(&mut self) -> io::Result<Rate> {
        loop {
            writeln!(self.output, "Enter the interest rate:")?;
            writeln!(self.output, "  1) Rate per period (e.g. 1.5 for 1.5%)")?;
            writeln!(
                self.output,
                "  2) Annual rate and periods per year (e.g. 12 and 12 for monthly)"
            )?;
            let option = self.read_line("Option (1/2): ")?;
            let quote = if option == "2" {
                let percent = self.read_number("Annual rate in % (e.g. 12): ")?;
                let periods_per_year = self.read_number("Periods per year (e.g. 12): ")?;
                RateQuote::Annual {
                    percent,
                    periods_per_year,
                }
            } else {
                let percent = self.read_number("Rate per period in % (e.g. 1.5): ")?;
                RateQuote::PerPeriod { percent }
            };
            if quote.has_zero_periods_per_year() {
                writeln!(self.output, "{}", ZERO_PERIODS_PER_YEAR_NOTICE)?;
            }
            match quote.periodic_rate() {
                Ok(rate) => return Ok(rate),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    fn read_cash_flows(&mut self) -> io::Result<Vec<Decimal>> {
        let count = loop {
            let line = self.read_line("Number of cash flows (including the initial one): ")?;
            match parse_count(&line) {
                Ok(count) => break count,
                Err(e) => writeln!(self.output, "{e}")?,
            }
        };
        let mut flows = Vec::new();
        for i in 0..count {
            let prompt = format!("Cash flow {i} (negative for the initial investment): ");
            flows.push(self.read_number(&prompt)?);
        }
        Ok(flows)
    }

    /// Prompt until the reply parses as a number.
    fn read_number(&mut self, prompt: &str) -> io::Result<Decimal> {
        loop {
            let line = self.read_line(prompt)?;
            match parse_number(&line) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    fn show_money(&mut self, label: &str, result: TvmResult<Decimal>) -> io::Result<()> {
        self.show(label, result.map(format_currency))
    }

    fn show(&mut self, label: &str, result: TvmResult<String>) -> io::Result<()> {
        match result {
            Ok(text) => writeln!(self.output, "{label} = {text}"),
            Err(e) => writeln!(self.output, "Error: {e}"),
        }
    }
}
