use std::fmt;

use serde_json::Value;

use crate::error::GatewayError;

/// Operations a survey request can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Summarize,
    Submit,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Summarize => "summarize",
            Action::Submit => "submit",
        }
    }

    /// Parse the `action` field; matching is exact and case-sensitive
    pub fn parse(value: Option<&Value>) -> Result<Self, GatewayError> {
        match value {
            Some(Value::String(s)) if s == "summarize" => Ok(Action::Summarize),
            Some(Value::String(s)) if s == "submit" => Ok(Action::Submit),
            other => Err(GatewayError::UnknownAction(echo(other))),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render an unrecognized action the way the client sent it
fn echo(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_actions() {
        assert_eq!(Action::parse(Some(&json!("summarize"))).unwrap(), Action::Summarize);
        assert_eq!(Action::parse(Some(&json!("submit"))).unwrap(), Action::Submit);
    }

    #[test]
    fn test_unknown_actions_are_echoed() {
        let cases = [
            (Some(json!("publish")), "不明なアクションです: publish"),
            (Some(json!("Submit")), "不明なアクションです: Submit"),
            (Some(json!("")), "不明なアクションです: "),
            (Some(json!(null)), "不明なアクションです: null"),
            (Some(json!(7)), "不明なアクションです: 7"),
            (None, "不明なアクションです: undefined"),
        ];
        for (value, expected) in cases {
            let err = Action::parse(value.as_ref()).unwrap_err();
            assert_eq!(err.to_string(), expected);
        }
    }
}
