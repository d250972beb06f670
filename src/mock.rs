//! A stand-in SMC for tests, served over plain http on an ephemeral port.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use warp::http::{header, Response, StatusCode};
use warp::path::FullPath;
use warp::Filter;

use crate::config::{Config, Delimiter};
use crate::role::RoleKind;

pub const USER: &str = "admin";
pub const PASSWORD: &str = "hunter2";
pub const XSRF: &str = "xsrf-1234";
const JWT: &str = "stealthwatch.jwt=jwt-5678";

const USERS: &str = r#"{"data": [
    {
        "userName": "alice",
        "enabled": true,
        "dataRoleId": 1,
        "functionRoleIds": [],
        "webFunctionRoleIds": [],
        "isAdmin": false
    },
    {
        "userName": "bob",
        "fullName": "Bob Builder",
        "emailAddress": "bob@example.com",
        "enabled": false,
        "dataRoleId": 2,
        "functionRoleIds": [10, 99],
        "webFunctionRoleIds": [20, 98],
        "isAdmin": true
    }
]}"#;

const DATA_ROLES: &str = r#"{"data": [
    {"id": 1, "name": "All Data (Read & Write)", "description": "everything"},
    {"id": 2, "name": "All Data (Read Only)", "description": "look, don't touch"}
]}"#;

const FUNCTION_ROLES: &str = r#"{"data": [
    {"id": 10, "name": "Analyst", "description": "investigates flows"}
]}"#;

const WEB_FUNCTION_ROLES: &str = r#"{"data": [
    {"id": 20, "name": "Config Manager", "description": "manages configuration"}
]}"#;

/// How the mock misbehaves. Paths are given without the leading `/`.
#[derive(Debug, Clone, Default)]
pub struct Behaviour {
    pub login_status: Option<u16>,
    pub logout_status: Option<u16>,
    pub fail: Option<(&'static str, u16)>,
    pub garbage: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Calls {
    pub login: usize,
    pub users: usize,
    pub data_roles: usize,
    pub function_roles: usize,
    pub web_function_roles: usize,
    pub logout: usize,
    pub logout_with_xsrf: usize,
}

impl Calls {
    pub fn fetches(&self) -> usize {
        self.users + self.data_roles + self.function_roles + self.web_function_roles
    }
}

struct State {
    behaviour: Behaviour,
    calls: Mutex<Calls>,
}

pub struct MockSmc {
    addr: SocketAddr,
    state: Arc<State>,
}

impl MockSmc {
    pub async fn start(behaviour: Behaviour) -> Self {
        let state = Arc::new(State {
            behaviour,
            calls: Mutex::new(Calls::default()),
        });

        let with_state = {
            let state = Arc::clone(&state);
            warp::any().map(move || Arc::clone(&state))
        };

        let login = warp::post()
            .and(warp::path!("token" / "v2" / "authenticate"))
            .and(warp::body::form())
            .and(with_state.clone())
            .map(login);

        let logout = warp::delete()
            .and(warp::path!("token"))
            .and(warp::header::optional::<String>("x-xsrf-token"))
            .and(with_state.clone())
            .map(logout);

        let list = warp::get()
            .and(warp::path("smc-users"))
            .and(warp::path::full())
            .and(warp::header::optional::<String>("cookie"))
            .and(with_state)
            .map(list);

        let routes = login.or(logout).unify().or(list).unify();

        let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        Self { addr, state }
    }

    pub fn config(&self) -> Config {
        Config {
            host: format!("http://{}", self.addr),
            username: USER.into(),
            password: PASSWORD.into(),
            tenant: Some("123".into()),
            output: PathBuf::from("UserReport.csv"),
            quiet: true,
            delimiter: Delimiter::Comma,
            timeout: Duration::from_secs(5),
        }
    }

    pub fn calls(&self) -> Calls {
        *self.state.calls.lock().unwrap()
    }
}

fn reply(status: u16, body: &str) -> Response<String> {
    Response::builder()
        .status(StatusCode::from_u16(status).unwrap())
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn login(form: HashMap<String, String>, state: Arc<State>) -> Response<String> {
    state.calls.lock().unwrap().login += 1;

    if let Some(status) = state.behaviour.login_status {
        return reply(status, "");
    }

    let ok = form.get("username").map(String::as_str) == Some(USER)
        && form.get("password").map(String::as_str) == Some(PASSWORD);
    if !ok {
        return reply(401, "");
    }

    Response::builder()
        .status(StatusCode::OK)
        .header(header::SET_COOKIE, format!("{JWT}; Path=/; Secure; HttpOnly"))
        .header(header::SET_COOKIE, format!("XSRF-TOKEN={XSRF}; Path=/"))
        .body(String::new())
        .unwrap()
}

fn logout(xsrf: Option<String>, state: Arc<State>) -> Response<String> {
    let mut calls = state.calls.lock().unwrap();
    calls.logout += 1;
    if xsrf.as_deref() == Some(XSRF) {
        calls.logout_with_xsrf += 1;
    }

    reply(state.behaviour.logout_status.unwrap_or(200), "")
}

fn list(path: FullPath, cookie: Option<String>, state: Arc<State>) -> Response<String> {
    let path = path.as_str().trim_start_matches('/');

    let body = {
        let mut calls = state.calls.lock().unwrap();
        if path == "smc-users/rest/v1/users" {
            calls.users += 1;
            USERS
        } else if path == RoleKind::Data.path() {
            calls.data_roles += 1;
            DATA_ROLES
        } else if path == RoleKind::Function.path() {
            calls.function_roles += 1;
            FUNCTION_ROLES
        } else if path == RoleKind::WebFunction.path() {
            calls.web_function_roles += 1;
            WEB_FUNCTION_ROLES
        } else {
            return reply(404, "");
        }
    };

    if !cookie.is_some_and(|c| c.contains(JWT)) {
        return reply(401, "");
    }

    match state.behaviour {
        Behaviour {
            fail: Some((failing, status)),
            ..
        } if failing == path => reply(status, ""),
        Behaviour {
            garbage: Some(garbled),
            ..
        } if garbled == path => reply(200, r#"{"data": "not a list"}"#),
        _ => reply(200, body),
    }
}
