use std::io::{self, BufRead, Write};
use log::error;
use crate::address::{AddressInput, NormalizedAddress};
use crate::config::Credentials;
use crate::outcome::ValidationOutcome;
use crate::smarty::SmartyClient;

const TITLE: &str = "USPS Address Validator (Smarty)";
const HINT: &str = "(press enter to keep the value in brackets, type - to clear it)";
/// answer that empties a field
const CLEAR: &str = "-";

/// the result of the most recent submission
#[derive(Debug, Clone, PartialEq, Eq)]
enum Submission {
    Outcome(ValidationOutcome),
    /// the lookup never produced an outcome (network, undecodable body)
    Fault(String),
}

/// what the output area shows above the address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Success,
    Warning(String),
    Error(String),
}

impl Status {
    pub fn line(&self) -> String {
        match self {
            Status::Success => "Valid USPS address!".to_string(),
            Status::Warning(message) => format!("⚠ {}", message),
            Status::Error(message) => format!("Error: {}", message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    AuthId,
    AuthToken,
    Street,
    City,
    State,
    Zipcode,
}

impl Field {
    /// in the order the form asks for them
    pub const ALL: [Field; 6] = [
        Field::AuthId,
        Field::AuthToken,
        Field::Street,
        Field::City,
        Field::State,
        Field::Zipcode,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::AuthId => "Smarty AUTH-ID",
            Field::AuthToken => "Smarty AUTH-TOKEN",
            Field::Street => "Street",
            Field::City => "City",
            Field::State => "State (2 letters, e.g., TX)",
            Field::Zipcode => "ZIP Code",
        }
    }

    fn is_secret(self) -> bool {
        self == Field::AuthToken
    }
}

/// The single-page form: inputs plus the last submission.
#[derive(Debug, Default)]
pub struct Form {
    pub credentials: Credentials,
    pub address: AddressInput,
    last: Option<Submission>,
}

impl Form {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            ..Default::default()
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::AuthId => &self.credentials.auth_id,
            Field::AuthToken => self.credentials.auth_token(),
            Field::Street => &self.address.street,
            Field::City => &self.address.city,
            Field::State => &self.address.state,
            Field::Zipcode => &self.address.zipcode,
        }
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::AuthId => self.credentials.auth_id = value,
            Field::AuthToken => self.credentials.set_auth_token(value),
            Field::Street => self.address.street = value,
            Field::City => self.address.city = value,
            Field::State => self.address.state = value,
            Field::Zipcode => self.address.zipcode = value,
        }
    }

    /// validate the current inputs, replacing whatever was shown before
    pub async fn submit(&mut self, client: &SmartyClient) {
        let submission = match client.verify(&self.address, &self.credentials).await {
            Ok(outcome) => Submission::Outcome(outcome),
            Err(e) => {
                error!("cannot verify address [{}]: {:?}", self.address.street, e);
                Submission::Fault(e.to_string())
            }
        };
        self.last = Some(submission);
    }

    /// `None` until the first submission
    pub fn status(&self) -> Option<Status> {
        let status = match self.last.as_ref()? {
            Submission::Fault(message) => Status::Error(message.clone()),
            Submission::Outcome(outcome) => match (outcome.address(), outcome.message()) {
                (Some(_), None) => Status::Success,
                (Some(_), Some(message)) => Status::Warning(message),
                (None, message) => Status::Error(message.unwrap_or_default()),
            },
        };
        Some(status)
    }

    pub fn suggested_address(&self) -> Option<&NormalizedAddress> {
        match self.last.as_ref()? {
            Submission::Outcome(outcome) => outcome.address(),
            Submission::Fault(_) => None,
        }
    }

    /// the output area, empty before the first submission
    pub fn render(&self) -> String {
        let Some(status) = self.status() else {
            return String::new();
        };
        let mut out = status.line();
        if let Some(address) = self.suggested_address() {
            out.push_str("\n\nSuggested/Corrected Address:\n");
            out.push_str(&address.formatted());
        }
        out
    }
}

/// Drive the form over a line-oriented terminal until the user stops or
/// input runs out.
pub async fn run_terminal<R, W>(mut reader: R, mut writer: W, client: &SmartyClient, form: &mut Form) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(writer, "{}", TITLE)?;
    writeln!(writer, "{}", HINT)?;
    loop {
        for field in Field::ALL {
            let current = display_value(field, form.field(field));
            let Some(value) = prompt(&mut reader, &mut writer, field.label(), &current)? else {
                return Ok(());
            };
            if value == CLEAR {
                form.set_field(field, String::new());
            } else if !value.is_empty() {
                form.set_field(field, value);
            }
        }

        writeln!(writer, "Validating address...")?;
        form.submit(client).await;
        writeln!(writer, "\n{}\n", form.render())?;

        let again = prompt(&mut reader, &mut writer, "Validate another address? [y/N]", "")?;
        if !matches!(again.as_deref().map(str::trim), Some("y" | "Y" | "yes")) {
            return Ok(());
        }
    }
}

fn display_value(field: Field, value: &str) -> String {
    if field.is_secret() && !value.is_empty() {
        "*".repeat(8)
    } else {
        value.to_string()
    }
}

/// `None` on end of input, otherwise the answer without its line terminator
fn prompt<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, label: &str, current: &str) -> io::Result<Option<String>> {
    if current.is_empty() {
        write!(writer, "{}: ", label)?;
    } else {
        write!(writer, "{} [{}]: ", label, current)?;
    }
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{Advisory, Rejection};
    use pretty_assertions::assert_eq;

    fn address() -> NormalizedAddress {
        NormalizedAddress {
            primary_number: Some("1".into()),
            street_name: Some("Infinite".into()),
            street_suffix: Some("Loop".into()),
            city: Some("Cupertino".into()),
            state: Some("CA".into()),
            zipcode: Some("95014".into()),
            plus4: Some("2083".into()),
            dpv_code: Some("Y".into()),
        }
    }

    fn form_with(submission: Submission) -> Form {
        Form {
            last: Some(submission),
            ..Default::default()
        }
    }

    #[test]
    fn blank_before_first_submission() {
        let form = Form::default();
        assert_eq!(form.status(), None);
        assert_eq!(form.render(), "");
    }

    #[test]
    fn renders_valid_address() {
        let form = form_with(Submission::Outcome(ValidationOutcome::Valid(address())));
        assert_eq!(form.status(), Some(Status::Success));
        assert_eq!(
            form.render(),
            "Valid USPS address!\n\nSuggested/Corrected Address:\n1 Infinite Loop\nCupertino, CA 95014-2083"
        );
    }

    #[test]
    fn renders_advisory_as_warning() {
        let form = form_with(Submission::Outcome(ValidationOutcome::Advisory {
            address: address(),
            advisory: Advisory::ClosestMatch,
        }));
        assert_eq!(
            form.status(),
            Some(Status::Warning("Address not found in USPS DPV, suggested closest match".into()))
        );
        assert!(form.render().ends_with("Cupertino, CA 95014-2083"));
    }

    #[test]
    fn renders_rejection_without_address() {
        let form = form_with(Submission::Outcome(ValidationOutcome::Rejected(Rejection::Http(500))));
        assert_eq!(form.render(), "Error: HTTP error 500");
        assert_eq!(form.suggested_address(), None);
    }

    #[test]
    fn renders_fault_as_error() {
        let form = form_with(Submission::Fault("request to Smarty failed: timed out".into()));
        assert_eq!(form.status(), Some(Status::Error("request to Smarty failed: timed out".into())));
    }

    #[test]
    fn fields_map_onto_inputs() {
        let mut form = Form::new(Credentials::new("id", "token"));
        form.set_field(Field::Street, "1 Infinite Loop".into());
        form.set_field(Field::AuthToken, "other".into());

        assert_eq!(form.field(Field::AuthId), "id");
        assert_eq!(form.field(Field::AuthToken), "other");
        assert_eq!(form.address.street, "1 Infinite Loop");
    }

    #[test]
    fn prompt_keeps_secret_hidden() {
        let mut out = Vec::new();
        let mut input = "\n".as_bytes();
        let current = display_value(Field::AuthToken, "secret-token");
        let value = prompt(&mut input, &mut out, Field::AuthToken.label(), &current).unwrap();

        assert_eq!(value.as_deref(), Some(""));
        let shown = String::from_utf8(out).unwrap();
        assert_eq!(shown, "Smarty AUTH-TOKEN [********]: ");
    }

    #[test]
    fn prompt_keeps_answer_verbatim() {
        let mut out = Vec::new();
        let mut input = "  12 Main St  \r\n".as_bytes();
        let value = prompt(&mut input, &mut out, "Street", "").unwrap();
        assert_eq!(value.as_deref(), Some("  12 Main St  "));
    }

    #[test]
    fn prompt_reports_end_of_input() {
        let mut out = Vec::new();
        let mut input = "".as_bytes();
        assert_eq!(prompt(&mut input, &mut out, "City", "").unwrap(), None);
    }
}
