//! Google API integration for the nutrition logger.
//!
//! Persists formatted meal records to external services:
//! - Spreadsheet append (Google Sheets, with Drive lookup/creation)
//! - Calendar-event creation (Google Calendar)
//!
//! Failures are reported as structured per-service outcomes, never raised as
//! control flow toward the caller: the spreadsheet and calendar writes succeed
//! or fail independently.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use nutri_core::{FormattedRecord, MealEvent, SheetRow, format::SHEET_HEADER};

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const SHEETS_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const CALENDAR_URL: &str = "https://www.googleapis.com/calendar/v3/calendars";

/// Display name of the spreadsheet looked up (or created) in Drive.
const SPREADSHEET_NAME: &str = "nutri 영양 기록";
/// Tab name holding the log rows.
const SHEET_NAME: &str = "Nutrition Log";
/// Event length when the caller gives no explicit end time.
const MEAL_EVENT_MINUTES: i64 = 30;
/// Fixed time zone of calendar entries.
const CALENDAR_TIME_ZONE: &str = "Asia/Seoul";

/// Google client errors.
#[derive(Debug, Error)]
pub enum GoogleError {
    /// A required credential was missing or empty.
    #[error("Google credentials not configured: {reason}")]
    NotConfigured { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// API returned an error response.
    #[error("Google API error (status {status}): {message}")]
    Api { status: u16, message: String },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// OAuth credentials for the refresh-token grant.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Creates credentials, rejecting missing or empty values.
    ///
    /// # Errors
    ///
    /// Returns `GoogleError::NotConfigured` naming the first missing field,
    /// so a caller can tell the user exactly what to set up.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Result<Self, GoogleError> {
        let client_id = client_id.into().trim().to_string();
        let client_secret = client_secret.into().trim().to_string();
        let refresh_token = refresh_token.into().trim().to_string();

        if client_id.is_empty() {
            return Err(GoogleError::NotConfigured {
                reason: "client ID is empty",
            });
        }
        if client_secret.is_empty() {
            return Err(GoogleError::NotConfigured {
                reason: "client secret is empty",
            });
        }
        if refresh_token.is_empty() {
            return Err(GoogleError::NotConfigured {
                reason: "refresh token is empty",
            });
        }

        Ok(Self {
            client_id,
            client_secret,
            refresh_token,
        })
    }
}

/// Structured result of one collaborator call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub success: bool,
    /// Human-readable Korean message for the chat surface.
    pub message: String,
    /// Resource locator (spreadsheet or event URL) on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl SyncOutcome {
    fn ok(message: String, link: Option<String>) -> Self {
        Self {
            success: true,
            message,
            link,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            message,
            link: None,
        }
    }
}

/// Per-service outcomes of one save. Partial failure is expected and
/// reported independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReport {
    pub sheets: SyncOutcome,
    pub calendar: SyncOutcome,
}

impl SaveReport {
    /// `true` when neither service accepted the record.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        !self.sheets.success && !self.calendar.success
    }
}

/// Google API client.
///
/// # Thread Safety
///
/// Safe to clone and share across tasks; clones share the underlying HTTP
/// connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    credentials: Credentials,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client from validated credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(credentials: Credentials) -> Result<Self, GoogleError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(GoogleError::ClientBuild)?;
        Ok(Self { http, credentials })
    }

    /// Exchanges the refresh token for a short-lived access token.
    async fn fetch_access_token(&self) -> Result<String, GoogleError> {
        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
        }

        let params = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("refresh_token", self.credentials.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self.http.post(TOKEN_URL).form(&params).send().await?;
        let body = check_response(response).await?;
        let payload: TokenResponse = serde_json::from_str(&body)
            .map_err(|err| GoogleError::InvalidResponse(err.to_string()))?;
        Ok(payload.access_token)
    }

    /// Looks up the log spreadsheet in Drive by its display name.
    async fn find_spreadsheet(&self, token: &str) -> Result<Option<String>, GoogleError> {
        #[derive(Deserialize)]
        struct FileList {
            #[serde(default)]
            files: Vec<File>,
        }

        #[derive(Deserialize)]
        struct File {
            id: String,
        }

        let query = format!(
            "name='{SPREADSHEET_NAME}' and \
             mimeType='application/vnd.google-apps.spreadsheet' and trashed=false"
        );
        let response = self
            .http
            .get(DRIVE_FILES_URL)
            .bearer_auth(token)
            .query(&[("q", query.as_str()), ("fields", "files(id, name)")])
            .send()
            .await?;
        let body = check_response(response).await?;
        let payload: FileList = serde_json::from_str(&body)
            .map_err(|err| GoogleError::InvalidResponse(err.to_string()))?;
        Ok(payload.files.into_iter().next().map(|file| file.id))
    }

    /// Creates the log spreadsheet and writes its header row.
    async fn create_spreadsheet(&self, token: &str) -> Result<String, GoogleError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Created {
            spreadsheet_id: String,
        }

        let request = json!({
            "properties": { "title": SPREADSHEET_NAME },
            "sheets": [{ "properties": { "title": SHEET_NAME } }],
        });
        let response = self
            .http
            .post(SHEETS_URL)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;
        let body = check_response(response).await?;
        let created: Created = serde_json::from_str(&body)
            .map_err(|err| GoogleError::InvalidResponse(err.to_string()))?;

        let header = json!({ "values": [SHEET_HEADER] });
        let url = format!(
            "{SHEETS_URL}/{}/values/{SHEET_NAME}!A1:M1",
            created.spreadsheet_id
        );
        let response = self
            .http
            .put(url)
            .bearer_auth(token)
            .query(&[("valueInputOption", "RAW")])
            .json(&header)
            .send()
            .await?;
        check_response(response).await?;

        tracing::info!(spreadsheet_id = %created.spreadsheet_id, "created log spreadsheet");
        Ok(created.spreadsheet_id)
    }

    /// Resolves the spreadsheet to write to: an explicitly configured ID, an
    /// existing spreadsheet found by name, or a freshly created one.
    async fn ensure_spreadsheet(
        &self,
        token: &str,
        configured_id: Option<&str>,
    ) -> Result<String, GoogleError> {
        if let Some(id) = configured_id {
            return Ok(id.to_string());
        }
        if let Some(id) = self.find_spreadsheet(token).await? {
            return Ok(id);
        }
        self.create_spreadsheet(token).await
    }

    async fn append_rows_inner(
        &self,
        spreadsheet_id: Option<&str>,
        rows: &[SheetRow],
    ) -> Result<(usize, String), GoogleError> {
        let token = self.fetch_access_token().await?;
        let spreadsheet_id = self.ensure_spreadsheet(&token, spreadsheet_id).await?;

        let request = append_payload(rows);
        let url = format!("{SHEETS_URL}/{spreadsheet_id}/values/{SHEET_NAME}!A:M:append");
        let response = self
            .http
            .post(url)
            .bearer_auth(&token)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&request)
            .send()
            .await?;
        check_response(response).await?;

        let link = format!("https://docs.google.com/spreadsheets/d/{spreadsheet_id}");
        Ok((rows.len(), link))
    }

    /// Appends the formatted rows to the log spreadsheet.
    ///
    /// Never fails: errors are folded into the returned outcome.
    pub async fn append_rows(
        &self,
        spreadsheet_id: Option<&str>,
        rows: &[SheetRow],
    ) -> SyncOutcome {
        match self.append_rows_inner(spreadsheet_id, rows).await {
            Ok((count, link)) => {
                tracing::info!(rows = count, "appended rows to spreadsheet");
                SyncOutcome::ok(
                    format!("{count}개 항목이 Google Sheets에 저장되었습니다."),
                    Some(link),
                )
            }
            Err(err) => {
                tracing::warn!(error = %err, "spreadsheet append failed");
                SyncOutcome::failed(failure_message("Google Sheets", &err))
            }
        }
    }

    async fn create_event_inner(
        &self,
        calendar_id: &str,
        event: &MealEvent,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Option<String>, GoogleError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct CreatedEvent {
            #[serde(default)]
            html_link: Option<String>,
        }

        let token = self.fetch_access_token().await?;
        let request = calendar_event_payload(event, start, end);
        let url = format!("{CALENDAR_URL}/{calendar_id}/events");
        let response = self
            .http
            .post(url)
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await?;
        let body = check_response(response).await?;
        let created: CreatedEvent = serde_json::from_str(&body)
            .map_err(|err| GoogleError::InvalidResponse(err.to_string()))?;
        Ok(created.html_link)
    }

    /// Creates a meal event on the given calendar.
    ///
    /// Start defaults to now and end to start plus 30 minutes. Never fails:
    /// errors are folded into the returned outcome.
    pub async fn create_meal_event(
        &self,
        calendar_id: &str,
        event: &MealEvent,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> SyncOutcome {
        match self.create_event_inner(calendar_id, event, start, end).await {
            Ok(link) => {
                tracing::info!("created calendar event");
                SyncOutcome::ok("Google Calendar에 식사 이벤트가 생성되었습니다.".to_string(), link)
            }
            Err(err) => {
                tracing::warn!(error = %err, "calendar event creation failed");
                SyncOutcome::failed(failure_message("Google Calendar", &err))
            }
        }
    }

    /// Saves a formatted record to both services concurrently.
    ///
    /// The two writes are independent; one failing does not stop or undo the
    /// other, and both outcomes are reported.
    pub async fn save_meal(
        &self,
        spreadsheet_id: Option<&str>,
        calendar_id: &str,
        record: &FormattedRecord,
    ) -> SaveReport {
        let (sheets, calendar) = tokio::join!(
            self.append_rows(spreadsheet_id, &record.rows),
            self.create_meal_event(calendar_id, &record.event, None, None),
        );
        SaveReport { sheets, calendar }
    }
}

/// Reads a response body, mapping non-success statuses to `GoogleError::Api`.
async fn check_response(response: reqwest::Response) -> Result<String, GoogleError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        return Ok(body);
    }
    Err(GoogleError::Api {
        status: status.as_u16(),
        message: parse_api_error(&body).unwrap_or_else(|| body.clone()),
    })
}

/// Best-effort extraction of the message from a Google error payload.
fn parse_api_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorPayload {
        error: ErrorDetails,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ErrorDetails {
        Structured { message: String },
        Plain(String),
    }

    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| match payload.error {
            ErrorDetails::Structured { message } | ErrorDetails::Plain(message) => message,
        })
}

/// Korean failure message for one service, with auth and permission errors
/// called out specifically.
fn failure_message(service: &str, err: &GoogleError) -> String {
    match err {
        GoogleError::Api { status: 401, .. } => {
            "Google 인증이 만료되었습니다. 다시 로그인해주세요.".to_string()
        }
        GoogleError::Api { status: 403, .. } => {
            format!("{service} 권한이 없습니다. 권한을 확인해주세요.")
        }
        _ => format!("{service} 저장 중 오류가 발생했습니다: {err}"),
    }
}

/// Sheets append request body: one value array per row, column order fixed.
fn append_payload(rows: &[SheetRow]) -> Value {
    let values: Vec<Vec<Value>> = rows.iter().map(row_values).collect();
    json!({ "values": values })
}

/// Projects a row into the thirteen-column value array.
fn row_values(row: &SheetRow) -> Vec<Value> {
    vec![
        json!(row.date_time),
        json!(row.meal),
        json!(row.item),
        json!(row.qty),
        json!(row.unit),
        json!(row.grams),
        json!(row.kcal),
        json!(row.carb),
        json!(row.protein),
        json!(row.fat),
        json!(row.sodium),
        json!(row.note),
        json!(row.source),
    ]
}

/// Calendar insert request body with defaulted times and the fixed zone.
fn calendar_event_payload(
    event: &MealEvent,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Value {
    let start = start.unwrap_or_else(Utc::now);
    let end = end.unwrap_or(start + TimeDelta::minutes(MEAL_EVENT_MINUTES));

    json!({
        "summary": event.title,
        "description": event.description,
        "start": { "dateTime": start.to_rfc3339(), "timeZone": CALENDAR_TIME_ZONE },
        "end": { "dateTime": end.to_rfc3339(), "timeZone": CALENDAR_TIME_ZONE },
        "reminders": {
            "useDefault": false,
            "overrides": [{ "method": "popup", "minutes": 0 }],
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    fn credentials() -> Credentials {
        Credentials::new("client-id", "client-secret", "refresh-token").unwrap()
    }

    #[test]
    fn credentials_reject_empty_fields() {
        assert!(matches!(
            Credentials::new("", "secret", "token"),
            Err(GoogleError::NotConfigured { .. })
        ));
        assert!(matches!(
            Credentials::new("id", "   ", "token"),
            Err(GoogleError::NotConfigured { .. })
        ));
        assert!(matches!(
            Credentials::new("id", "secret", ""),
            Err(GoogleError::NotConfigured { .. })
        ));
    }

    #[test]
    fn credentials_trim_whitespace() {
        let creds = Credentials::new(" id ", "secret", " token\n").unwrap();
        assert_eq!(creds.client_id, "id");
        assert_eq!(creds.refresh_token, "token");
    }

    #[test]
    fn debug_redacts_secrets() {
        let client = Client::new(credentials()).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("client-secret"));
        assert!(!debug.contains("refresh-token"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn row_values_follow_header_order() {
        let row = SheetRow {
            date_time: "2025-03-01T12:30:00+09:00".to_string(),
            meal: "아침".to_string(),
            item: "토스트".to_string(),
            qty: 2.0,
            unit: "장".to_string(),
            grams: 60,
            kcal: 174,
            carb: 28.8,
            protein: 4.8,
            fat: 3.6,
            sodium: 0,
            note: "아침에 토스트 2장".to_string(),
            source: "nutri v0.1".to_string(),
        };
        let values = row_values(&row);
        assert_eq!(values.len(), SHEET_HEADER.len());
        assert_eq!(values[0], json!("2025-03-01T12:30:00+09:00"));
        assert_eq!(values[1], json!("아침"));
        assert_eq!(values[5], json!(60));
        assert_eq!(values[12], json!("nutri v0.1"));
    }

    #[test]
    fn calendar_payload_defaults_end_to_thirty_minutes() {
        let event = MealEvent {
            title: "🍽️ [아침] 토스트 (≈ 174 kcal)".to_string(),
            description: "영양 정보:".to_string(),
        };
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 3, 30, 0).unwrap();
        let payload = calendar_event_payload(&event, Some(start), None);

        assert_eq!(payload["start"]["dateTime"], json!("2025-03-01T03:30:00+00:00"));
        assert_eq!(payload["end"]["dateTime"], json!("2025-03-01T04:00:00+00:00"));
        assert_eq!(payload["start"]["timeZone"], json!("Asia/Seoul"));
        assert_eq!(payload["reminders"]["useDefault"], json!(false));
    }

    #[test]
    fn failure_messages_map_auth_statuses() {
        let auth = GoogleError::Api {
            status: 401,
            message: "unauthorized".to_string(),
        };
        assert!(failure_message("Google Sheets", &auth).contains("인증이 만료"));

        let forbidden = GoogleError::Api {
            status: 403,
            message: "forbidden".to_string(),
        };
        assert!(failure_message("Google Calendar", &forbidden).contains("권한"));

        let other = GoogleError::InvalidResponse("bad json".to_string());
        assert!(failure_message("Google Sheets", &other).contains("오류"));
    }

    #[test]
    fn parse_api_error_handles_both_shapes() {
        let structured = r#"{"error":{"code":403,"message":"The caller does not have permission"}}"#;
        assert_eq!(
            parse_api_error(structured).as_deref(),
            Some("The caller does not have permission")
        );

        let oauth = r#"{"error":"invalid_grant"}"#;
        assert_eq!(parse_api_error(oauth).as_deref(), Some("invalid_grant"));

        assert_eq!(parse_api_error("not json"), None);
    }

    #[test]
    fn save_report_partial_failure_is_not_total() {
        let report = SaveReport {
            sheets: SyncOutcome::ok("저장됨".to_string(), None),
            calendar: SyncOutcome::failed("실패".to_string()),
        };
        assert!(!report.all_failed());

        let report = SaveReport {
            sheets: SyncOutcome::failed("실패".to_string()),
            calendar: SyncOutcome::failed("실패".to_string()),
        };
        assert!(report.all_failed());
    }
}
