//! Terminal prompts standing in for the editor's dialogs.

use std::io::{BufRead, Write};

use austria_address::operator::AddressTypeQuestion;
use austria_address::{AddressType, AddressTypeChoice, Notification, NotificationLevel, Operator};

/// Asks questions on `output` and reads answers line by line from `input`.
/// End of input or an unreadable answer declines.
pub struct TerminalOperator<R, W> {
    input: R,
    output: W,
    /// Answer every confirmation with yes
    assume_yes: bool,
    /// Pre-supplied answer for unclassified addresses
    address_type: Option<AddressType>,
    remember: bool,
}

impl<R: BufRead, W: Write> TerminalOperator<R, W> {
    pub fn new(
        input: R,
        output: W,
        assume_yes: bool,
        address_type: Option<AddressType>,
        remember: bool,
    ) -> Self {
        Self {
            input,
            output,
            assume_yes,
            address_type,
            remember,
        }
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        write!(self.output, "{} ", prompt).ok()?;
        self.output.flush().ok()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_lowercase()),
        }
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        matches!(self.ask(prompt).as_deref(), Some("y") | Some("yes"))
    }
}

impl<R: BufRead, W: Write> Operator for TerminalOperator<R, W> {
    fn choose_address_type(
        &mut self,
        question: &AddressTypeQuestion,
    ) -> Option<AddressTypeChoice> {
        if let Some(address_type) = self.address_type {
            return Some(AddressTypeChoice {
                address_type,
                remember: self.remember,
            });
        }

        writeln!(self.output, "{}", question).ok()?;
        let address_type = match self
            .ask("Is it a [s]treet or a [p]lace? (anything else cancels)")?
            .as_str()
        {
            "s" | "street" => AddressType::Street,
            "p" | "place" => AddressType::Place,
            _ => return None,
        };

        let remember = self.remember
            || self.confirm(&format!(
                "Remember this choice for {} in {} {} for this session? [y/N]",
                question.place_name, question.postcode, question.city
            ));

        Some(AddressTypeChoice {
            address_type,
            remember,
        })
    }

    fn confirm_unverified(&mut self, cause: &str) -> bool {
        self.confirm(&format!(
            "Unable to check whether this address already exists in OpenStreetMap ({}). Continue anyway? [y/N]",
            cause
        ))
    }

    fn confirm_duplicates(&mut self, urls: &[String]) -> bool {
        if writeln!(
            self.output,
            "The following objects in OpenStreetMap already have this address:"
        )
        .is_err()
        {
            return false;
        }
        for url in urls {
            if writeln!(self.output, "  {}", url).is_err() {
                return false;
            }
        }
        self.confirm("Are you sure that you want to add it? [y/N]")
    }

    fn notify(&mut self, notification: Notification) {
        let label = match notification.level {
            NotificationLevel::Info => "info",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        };
        let _ = writeln!(self.output, "{}: {}", label, notification.message);
    }
}
