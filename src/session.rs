use cookie::Cookie;
use log::{debug, error, warn};
use reqwest::header::{HeaderMap, HeaderValue, SET_COOKIE};

const XSRF_COOKIE: &str = "XSRF-TOKEN";

/// The credential the SMC hands back on login: whatever cookies it set.
#[derive(Debug, Clone, Default)]
pub struct Session {
    cookies: Vec<Cookie<'static>>,
}

impl Session {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let cookies = headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| {
                let value = value
                    .to_str()
                    .map_err(|e| error!("non-ascii set-cookie header: {e:?}"))
                    .ok()?;

                Cookie::parse(value.to_string())
                    .map_err(|e| error!("invalid set-cookie header: {e:?}"))
                    .ok()
            })
            .inspect(|c| debug!("session cookie {}", c.name()))
            .collect::<Vec<_>>();

        if cookies.is_empty() {
            warn!("login succeeded but no session cookies were set");
        }

        Self { cookies }
    }

    /// Value for the `Cookie` request header, `None` if there's nothing to send.
    pub fn cookie_header(&self) -> Option<HeaderValue> {
        if self.cookies.is_empty() {
            return None;
        }

        let joined = self
            .cookies
            .iter()
            .map(|c| c.stripped().to_string())
            .collect::<Vec<_>>()
            .join("; ");

        HeaderValue::from_str(&joined)
            .map_err(|e| error!("couldn't build cookie header: {e:?}"))
            .ok()
    }

    /// The anti-forgery token, echoed back on state-changing requests.
    pub fn xsrf_token(&self) -> Option<&str> {
        self.cookies
            .iter()
            .find(|c| c.name() == XSRF_COOKIE)
            .map(|c| c.value())
    }
}
