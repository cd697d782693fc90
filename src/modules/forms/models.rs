use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use wrp_kernel::settings::FormsSettings;

use super::transport::{FormTransport, TransportError};

/// The visitor-facing forms relayed to external endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Contact,
    Submissions,
    Press,
    Bookings,
    Newsletter,
}

/// One input of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
}

const fn required(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        required: true,
    }
}

const fn optional(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        required: false,
    }
}

const CONTACT_FIELDS: &[FieldSpec] = &[required("name"), required("email"), required("message")];
const SUBMISSION_FIELDS: &[FieldSpec] = &[
    required("name"),
    required("email"),
    required("title"),
    required("genre"),
    required("query"),
    optional("sample_link"),
];
const PRESS_FIELDS: &[FieldSpec] = &[
    required("publication"),
    required("name"),
    required("email"),
    required("request"),
];
const BOOKING_FIELDS: &[FieldSpec] = &[
    required("event_name"),
    required("date"),
    required("location"),
    required("author"),
    required("details"),
];
const NEWSLETTER_FIELDS: &[FieldSpec] = &[required("email")];

impl FormKind {
    pub const ALL: [FormKind; 5] = [
        FormKind::Contact,
        FormKind::Submissions,
        FormKind::Press,
        FormKind::Bookings,
        FormKind::Newsletter,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Submissions => "submissions",
            FormKind::Press => "press",
            FormKind::Bookings => "bookings",
            FormKind::Newsletter => "newsletter",
        }
    }

    pub fn parse(kind: &str) -> Option<FormKind> {
        Self::ALL.into_iter().find(|k| k.as_str() == kind)
    }

    pub const fn fields(self) -> &'static [FieldSpec] {
        match self {
            FormKind::Contact => CONTACT_FIELDS,
            FormKind::Submissions => SUBMISSION_FIELDS,
            FormKind::Press => PRESS_FIELDS,
            FormKind::Bookings => BOOKING_FIELDS,
            FormKind::Newsletter => NEWSLETTER_FIELDS,
        }
    }

    pub fn endpoint(self, settings: &FormsSettings) -> Option<&str> {
        let endpoint = match self {
            FormKind::Contact => &settings.contact,
            FormKind::Submissions => &settings.submissions,
            FormKind::Press => &settings.press,
            FormKind::Bookings => &settings.bookings,
            FormKind::Newsletter => &settings.newsletter,
        };
        endpoint.as_deref().filter(|url| !url.trim().is_empty())
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Submission state of one form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Field values and submission status of one form instance.
///
/// `begin` does not refuse a second submission while one is in flight;
/// callers disable their submit control while [`FormSession::is_in_flight`].
#[derive(Debug, Clone)]
pub struct FormSession {
    kind: FormKind,
    fields: BTreeMap<String, String>,
    status: FormStatus,
}

impl FormSession {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            fields: BTreeMap::new(),
            status: FormStatus::Idle,
        }
    }

    /// Start a session pre-filled with `values`. Names the form does not
    /// declare are dropped.
    pub fn with_values(kind: FormKind, values: BTreeMap<String, String>) -> Self {
        let mut session = Self::new(kind);
        for (name, value) in values {
            session.set(&name, value);
        }
        session
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn is_in_flight(&self) -> bool {
        self.status == FormStatus::Loading
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        if self.kind.fields().iter().any(|field| field.name == name) {
            self.fields.insert(name.to_string(), value.into());
        } else {
            tracing::debug!(form = %self.kind, field = name, "ignoring undeclared field");
        }
    }

    /// Required fields that are absent or blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.kind
            .fields()
            .iter()
            .filter(|field| field.required)
            .filter(|field| {
                !matches!(self.fields.get(field.name), Some(value) if !value.trim().is_empty())
            })
            .map(|field| field.name)
            .collect()
    }

    /// Move to `loading` and return the payload to send.
    pub fn begin(&mut self) -> Vec<(String, String)> {
        if self.is_in_flight() {
            tracing::warn!(form = %self.kind, "form submitted again while a submission is in flight");
        }
        self.status = FormStatus::Loading;
        self.fields
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Settle the submission: 2xx clears the fields, anything else keeps them.
    pub fn finish(&mut self, outcome: &Result<u16, TransportError>) -> FormStatus {
        self.status = match outcome {
            Ok(code) if (200..300).contains(code) => {
                self.fields.clear();
                FormStatus::Success
            }
            Ok(code) => {
                tracing::warn!(form = %self.kind, status_code = code, "form endpoint rejected submission");
                FormStatus::Error
            }
            Err(error) => {
                tracing::warn!(form = %self.kind, %error, "form submission failed");
                FormStatus::Error
            }
        };
        self.status
    }

    /// Send the current fields through `transport`. No retries.
    pub async fn submit(
        &mut self,
        transport: &dyn FormTransport,
        endpoint: Option<&str>,
    ) -> FormStatus {
        let payload = self.begin();
        let outcome = match endpoint {
            Some(endpoint) => transport.post_form(endpoint, &payload).await,
            None => Err(TransportError::NotConfigured(self.kind)),
        };
        self.finish(&outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedStatus {
        outcome: fn() -> Result<u16, TransportError>,
        seen: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl FixedStatus {
        fn new(outcome: fn() -> Result<u16, TransportError>) -> Self {
            Self {
                outcome,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl FormTransport for FixedStatus {
        async fn post_form(
            &self,
            endpoint: &str,
            fields: &[(String, String)],
        ) -> Result<u16, TransportError> {
            self.seen
                .lock()
                .unwrap()
                .push((endpoint.to_string(), fields.to_vec()));
            (self.outcome)()
        }
    }

    fn filled_contact() -> FormSession {
        let mut session = FormSession::new(FormKind::Contact);
        session.set("name", "Ada");
        session.set("email", "ada@example.com");
        session.set("message", "Hello there");
        session
    }

    #[tokio::test]
    async fn success_clears_fields() {
        let transport = FixedStatus::new(|| Ok(200));
        let mut session = filled_contact();
        assert_eq!(session.status(), FormStatus::Idle);

        let status = session
            .submit(&transport, Some("https://forms.test/contact"))
            .await;

        assert_eq!(status, FormStatus::Success);
        assert!(session.fields().is_empty());

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].0, "https://forms.test/contact");
        assert_eq!(seen[0].1.len(), 3);
    }

    #[tokio::test]
    async fn rejected_status_keeps_fields() {
        for outcome in [
            (|| Ok(422)) as fn() -> Result<u16, TransportError>,
            || Ok(500),
            || Err(TransportError::Network("connection reset".to_string())),
        ] {
            let transport = FixedStatus::new(outcome);
            let mut session = filled_contact();

            let status = session.submit(&transport, Some("https://forms.test")).await;

            assert_eq!(status, FormStatus::Error);
            assert_eq!(session.fields().get("name").map(String::as_str), Some("Ada"));
            assert_eq!(session.fields().len(), 3);
        }
    }

    #[tokio::test]
    async fn missing_endpoint_is_an_error_without_a_request() {
        let transport = FixedStatus::new(|| Ok(200));
        let mut session = FormSession::new(FormKind::Newsletter);
        session.set("email", "reader@example.com");

        assert_eq!(session.submit(&transport, None).await, FormStatus::Error);
        assert!(transport.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn begin_passes_through_loading() {
        let mut session = filled_contact();
        session.begin();
        assert!(session.is_in_flight());
        assert_eq!(session.status(), FormStatus::Loading);

        assert_eq!(session.finish(&Ok(204)), FormStatus::Success);
        assert!(!session.is_in_flight());
    }

    #[test]
    fn second_begin_while_loading_is_not_prevented() {
        let mut session = filled_contact();
        let first = session.begin();
        let second = session.begin();

        assert_eq!(first, second);
        assert_eq!(session.status(), FormStatus::Loading);

        session.finish(&Ok(200));
        session.finish(&Ok(500));
        assert_eq!(session.status(), FormStatus::Error);
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let mut session = FormSession::new(FormKind::Submissions);
        session.set("name", "Ada");
        session.set("email", "  ");
        session.set("sample_link", "");

        assert_eq!(
            session.missing_required(),
            vec!["email", "title", "genre", "query"]
        );
    }

    #[test]
    fn undeclared_fields_are_dropped() {
        let values = BTreeMap::from([
            ("email".to_string(), "reader@example.com".to_string()),
            ("_gotcha".to_string(), "bot".to_string()),
        ]);
        let session = FormSession::with_values(FormKind::Newsletter, values);
        assert_eq!(session.fields().len(), 1);
        assert!(session.missing_required().is_empty());
    }

    #[test]
    fn endpoints_come_from_settings() {
        let settings = FormsSettings::default();
        assert_eq!(
            FormKind::Contact.endpoint(&settings),
            Some("https://formspree.io/f/mykyzeye")
        );
        assert_eq!(FormKind::Newsletter.endpoint(&settings), None);

        let blank = FormsSettings {
            press: Some(" ".to_string()),
            ..FormsSettings::default()
        };
        assert_eq!(FormKind::Press.endpoint(&blank), None);
    }
}
