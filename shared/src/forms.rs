//! Add forms for accounts and channels
//!
//! A form holds what the user typed. Turning it into a request validates
//! the required fields and drops every optional field still at its default,
//! so the payload only carries what the user actually set.

use crate::error::ValidationError;
use crate::messages::{
    AccountRequest, ChannelRequest, ChannelType, DEFAULT_MAX_CONCURRENT, DEFAULT_PRIORITY,
    DEFAULT_TIMEOUT_SECS,
};

/// Parse a numeric text input; blank, garbage and zero fall back to `default`
pub fn parse_number_or(text: &str, default: i64) -> i64 {
    match text.trim().parse::<i64>() {
        Ok(0) | Err(_) => default,
        Ok(n) => n,
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn unless_default<T: PartialEq>(value: T, default: T) -> Option<T> {
    if value == default {
        None
    } else {
        Some(value)
    }
}

// ============================================================================
// Account form
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct AccountForm {
    pub apiname: String,
    pub username: String,
    pub password: String,
    pub authtoken: String,
    pub usertobitid: Option<i64>,
    pub personid: String,
    pub usecount: i64,
    pub tokenstatus: bool,
    pub accountstatus: bool,
}

impl Default for AccountForm {
    fn default() -> Self {
        Self {
            apiname: String::new(),
            username: String::new(),
            password: String::new(),
            authtoken: String::new(),
            usertobitid: None,
            personid: String::new(),
            usecount: 0,
            tokenstatus: true,
            accountstatus: true,
        }
    }
}

impl AccountForm {
    pub fn set_usertobitid(&mut self, text: &str) {
        self.usertobitid = text.trim().parse().ok();
    }

    pub fn set_usecount(&mut self, text: &str) {
        self.usecount = parse_number_or(text, 0);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.apiname.trim().is_empty() {
            return Err(ValidationError::Required("API name"));
        }
        if self.username.trim().is_empty() {
            return Err(ValidationError::Required("Username"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::Required("Password"));
        }
        Ok(())
    }

    /// Validated request with untouched optional fields omitted
    pub fn to_request(&self) -> Result<AccountRequest, ValidationError> {
        self.validate()?;

        Ok(AccountRequest {
            apiname: self.apiname.trim().to_string(),
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            authtoken: non_empty(&self.authtoken),
            usertobitid: self.usertobitid.filter(|&id| id != 0),
            personid: non_empty(&self.personid),
            usecount: unless_default(self.usecount, 0),
            tokenstatus: unless_default(self.tokenstatus, true),
            accountstatus: unless_default(self.accountstatus, true),
        })
    }
}

// ============================================================================
// Channel form
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelForm {
    pub channelname: String,
    pub channeltype: ChannelType,
    pub channelurl: String,
    pub channelkey: String,
    pub channelstatus: bool,
    pub maxconcurrent: i64,
    pub timeout: i64,
    pub priority: i64,
    pub description: String,
}

impl Default for ChannelForm {
    fn default() -> Self {
        Self {
            channelname: String::new(),
            channeltype: ChannelType::OpenAi,
            channelurl: String::new(),
            channelkey: String::new(),
            channelstatus: true,
            maxconcurrent: DEFAULT_MAX_CONCURRENT,
            timeout: DEFAULT_TIMEOUT_SECS,
            priority: DEFAULT_PRIORITY,
            description: String::new(),
        }
    }
}

impl ChannelForm {
    pub fn set_maxconcurrent(&mut self, text: &str) {
        self.maxconcurrent = parse_number_or(text, DEFAULT_MAX_CONCURRENT);
    }

    pub fn set_timeout(&mut self, text: &str) {
        self.timeout = parse_number_or(text, DEFAULT_TIMEOUT_SECS);
    }

    pub fn set_priority(&mut self, text: &str) {
        self.priority = parse_number_or(text, DEFAULT_PRIORITY);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.channelname.trim().is_empty() {
            return Err(ValidationError::Required("Channel name"));
        }
        if self.channeltype.as_str().is_empty() {
            return Err(ValidationError::Required("Channel type"));
        }
        Ok(())
    }

    pub fn to_request(&self) -> Result<ChannelRequest, ValidationError> {
        self.validate()?;

        Ok(ChannelRequest {
            channelname: self.channelname.trim().to_string(),
            channeltype: self.channeltype.clone(),
            channelurl: non_empty(&self.channelurl).map(|u| u.trim().to_string()),
            channelkey: non_empty(&self.channelkey),
            channelstatus: unless_default(self.channelstatus, true),
            maxconcurrent: unless_default(self.maxconcurrent, DEFAULT_MAX_CONCURRENT),
            timeout: unless_default(self.timeout, DEFAULT_TIMEOUT_SECS),
            priority: unless_default(self.priority, DEFAULT_PRIORITY),
            description: non_empty(&self.description),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn alice() -> AccountForm {
        AccountForm {
            apiname: "openai-1".to_string(),
            username: "alice".to_string(),
            password: "secret".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_account_defaults_are_omitted() {
        let request = alice().to_request().unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"apiname": "openai-1", "username": "alice", "password": "secret"})
        );
    }

    #[test]
    fn test_account_edited_fields_are_sent() {
        let mut form = alice();
        form.authtoken = "tok".to_string();
        form.set_usertobitid("1234");
        form.set_usecount("5");
        form.accountstatus = false;

        let body = serde_json::to_value(form.to_request().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "apiname": "openai-1",
                "username": "alice",
                "password": "secret",
                "authtoken": "tok",
                "usertobitid": 1234,
                "usecount": 5,
                "accountstatus": false
            })
        );
    }

    #[test]
    fn test_account_submitted_fields_subset() {
        let required = ["apiname", "username", "password"];
        let mut form = alice();
        form.personid = "p-1".to_string();
        form.tokenstatus = false;

        let body = serde_json::to_value(form.to_request().unwrap()).unwrap();
        let edited = ["personid", "tokenstatus"];
        for key in body.as_object().unwrap().keys() {
            assert!(
                required.contains(&key.as_str()) || edited.contains(&key.as_str()),
                "unexpected field {}",
                key
            );
        }
    }

    #[test]
    fn test_account_required_fields() {
        let mut form = alice();
        form.username = "   ".to_string();
        assert_eq!(form.to_request(), Err(ValidationError::Required("Username")));

        let mut form = alice();
        form.password.clear();
        assert_eq!(form.validate(), Err(ValidationError::Required("Password")));

        assert_eq!(
            AccountForm::default().validate(),
            Err(ValidationError::Required("API name"))
        );
    }

    #[test]
    fn test_numeric_inputs_fall_back() {
        let mut form = ChannelForm::default();
        form.set_maxconcurrent("abc");
        form.set_timeout("0");
        form.set_priority("");
        assert_eq!(form, ChannelForm::default());

        form.set_timeout("120");
        assert_eq!(form.timeout, 120);

        let mut account = alice();
        account.set_usertobitid("x");
        assert_eq!(account.usertobitid, None);
    }

    #[test]
    fn test_channel_defaults_are_omitted() {
        let form = ChannelForm {
            channelname: "openai-channel-1".to_string(),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(form.to_request().unwrap()).unwrap(),
            json!({"channelname": "openai-channel-1", "channeltype": "openai"})
        );
    }

    #[test]
    fn test_channel_edited_fields_are_sent() {
        let mut form = ChannelForm {
            channelname: "claude".to_string(),
            channeltype: ChannelType::Anthropic,
            channelurl: "https://api.anthropic.com".to_string(),
            channelkey: "sk-ant".to_string(),
            channelstatus: false,
            description: "primary".to_string(),
            ..Default::default()
        };
        form.set_priority("3");

        assert_eq!(
            serde_json::to_value(form.to_request().unwrap()).unwrap(),
            json!({
                "channelname": "claude",
                "channeltype": "anthropic",
                "channelurl": "https://api.anthropic.com",
                "channelkey": "sk-ant",
                "channelstatus": false,
                "priority": 3,
                "description": "primary"
            })
        );
    }

    #[test]
    fn test_channel_name_required() {
        assert_eq!(
            ChannelForm::default().to_request(),
            Err(ValidationError::Required("Channel name"))
        );
    }
}
