use axum::{
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

/// One-shot message shown on the page a redirect lands on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Notice(String),
    Alert(String),
}

/// Body sent alongside a redirect so API clients can surface the flash
#[derive(Debug, Default, Serialize)]
pub struct FlashBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
}

/// `303 See Other` with a `Location` header and an optional flash message.
#[derive(Debug, Clone)]
pub struct Redirect {
    location: String,
    flash: Option<Flash>,
}

impl Redirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            flash: None,
        }
    }

    pub fn with_notice(mut self, message: impl Into<String>) -> Self {
        self.flash = Some(Flash::Notice(message.into()));
        self
    }

    pub fn with_alert(mut self, message: impl Into<String>) -> Self {
        self.flash = Some(Flash::Alert(message.into()));
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }
}

impl IntoResponse for Redirect {
    fn into_response(self) -> axum::response::Response {
        let body = match self.flash {
            Some(Flash::Notice(notice)) => FlashBody {
                notice: Some(notice),
                alert: None,
            },
            Some(Flash::Alert(alert)) => FlashBody {
                notice: None,
                alert: Some(alert),
            },
            None => FlashBody::default(),
        };

        (StatusCode::SEE_OTHER, [(LOCATION, self.location)], Json(body)).into_response()
    }
}

/// Created response helper (partial-page fragments after a POST)
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}
