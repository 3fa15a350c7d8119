use chrono::{Days, NaiveDate};
use serde_json::{Map, Value};

/// Fields a generation request must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 5] = ["destination", "duration", "budget", "start_date", "interests"];

/// Travel preferences as submitted by the caller.
///
/// Only the presence of the required keys is enforced. Values are read
/// leniently and the submitted JSON is kept so the prompt shows what the
/// caller actually sent.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelPreferences {
    pub destination: String,
    /// Whole days as submitted; zero or negative means no days.
    pub duration: i64,
    /// Numeric budget, `0.0` when the submitted value is not a number.
    pub budget: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub group_size: Option<i64>,
    pub interests: Vec<String>,
    raw: Map<String, Value>,
}

#[derive(Debug, PartialEq)]
pub enum PreferencesError {
    NotAnObject,
    MissingField(&'static str),
}

impl PreferencesError {
    pub fn message(&self) -> String {
        match self {
            PreferencesError::NotAnObject => "Request body must be a JSON object".to_string(),
            PreferencesError::MissingField(field) => format!("Missing required field: {}", field),
        }
    }
}

/// Renders a JSON value the way it reads in prose: strings without quotes.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

static NULL: Value = Value::Null;

fn number_of(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn date_of(value: &Value) -> Option<NaiveDate> {
    value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
}

impl TravelPreferences {
    /// Checks the raw body for the required keys, in order, and reads it.
    pub fn from_request_body(body: &Value) -> Result<Self, PreferencesError> {
        let object = body.as_object().ok_or(PreferencesError::NotAnObject)?;

        if let Some(field) = REQUIRED_FIELDS
            .iter()
            .find(|field| !object.contains_key(**field))
        {
            return Err(PreferencesError::MissingField(*field));
        }

        let field = |name: &str| object.get(name).unwrap_or(&NULL);

        let interests = match field("interests") {
            Value::Array(items) => items.iter().map(display_value).collect(),
            Value::Null => Vec::new(),
            other => vec![display_value(other)],
        };

        Ok(Self {
            destination: display_value(field("destination")),
            duration: number_of(field("duration")).map_or(0, |n| n.trunc() as i64),
            budget: number_of(field("budget")).unwrap_or(0.0),
            start_date: date_of(field("start_date")),
            end_date: date_of(field("end_date")),
            group_size: number_of(field("group_size")).map(|n| n.trunc() as i64),
            interests,
            raw: object.clone(),
        })
    }

    /// Number of days to plan for.
    pub fn days(&self) -> u32 {
        u32::try_from(self.duration.max(0)).unwrap_or(u32::MAX)
    }

    /// The submitted value of `field` as text, empty when absent.
    pub fn text(&self, field: &str) -> String {
        self.raw.get(field).map(display_value).unwrap_or_default()
    }

    /// The submitted value of `field`, if any.
    pub fn raw(&self, field: &str) -> Option<&Value> {
        self.raw.get(field)
    }

    /// The trip's last day as text: the supplied end date, or the one implied
    /// by the start date and duration.
    pub fn end_date_text(&self) -> String {
        if self.raw.contains_key("end_date") {
            return self.text("end_date");
        }
        match self.start_date {
            Some(start) => start
                .checked_add_days(Days::new(u64::from(self.days().saturating_sub(1))))
                .unwrap_or(start)
                .format("%Y-%m-%d")
                .to_string(),
            None => self.text("start_date"),
        }
    }

    pub fn group_size_text(&self) -> String {
        match self.raw.get("group_size") {
            Some(value) => display_value(value),
            None => "1".to_string(),
        }
    }

    /// Calendar date of the `day`-th day (1-based) of the trip, `YYYY-MM-DD`.
    /// Falls back to the submitted start date text when it is not a date.
    pub fn date_of_day(&self, day: u32) -> String {
        self.start_date
            .and_then(|start| start.checked_add_days(Days::new(u64::from(day.saturating_sub(1)))))
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| self.text("start_date"))
    }
}
