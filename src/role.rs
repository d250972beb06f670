use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

pub const NO_MATCH: &str = "--";
const NO_WEB_MATCH: &str = "na";

/// Role ids are numbers on current SMCs, but we treat them as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum RoleId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RoleId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(fmt, "{n}"),
            Self::Text(s) => write!(fmt, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Role {
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_MATCH)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    Data,
    Function,
    WebFunction,
}

impl RoleKind {
    pub const ALL: [RoleKind; 3] = [Self::Data, Self::Function, Self::WebFunction];

    pub fn path(self) -> &'static str {
        match self {
            Self::Data => "smc-users/rest/v1/roles/data-roles",
            Self::Function => "smc-users/rest/v1/roles/functionroles",
            Self::WebFunction => "smc-users/rest/v1/roles/webfunctionroles",
        }
    }

    /// Used in logs and error messages.
    pub fn resource(self) -> &'static str {
        match self {
            Self::Data => "data roles",
            Self::Function => "functional roles",
            Self::WebFunction => "web functional roles",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Data => "The defined Data Roles are:",
            Self::Function => "The defined Functional Roles are:",
            Self::WebFunction => "The defined Web Functional Roles are:",
        }
    }

    // web function roles have always shown "na", the others "--"
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Data | Self::Function => NO_MATCH,
            Self::WebFunction => NO_WEB_MATCH,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoleCatalog {
    kind: RoleKind,
    roles: Vec<Role>,
    by_id: HashMap<RoleId, usize>,
}

impl RoleCatalog {
    pub fn new(kind: RoleKind, roles: Vec<Role>) -> Self {
        let mut by_id = HashMap::with_capacity(roles.len());
        for (i, role) in roles.iter().enumerate() {
            // first definition wins, as a linear scan would
            by_id.entry(role.id.clone()).or_insert(i);
        }

        Self { kind, roles, by_id }
    }

    pub fn kind(&self) -> RoleKind {
        self.kind
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn get(&self, id: &RoleId) -> Option<&Role> {
        self.by_id.get(id).map(|&i| &self.roles[i])
    }

    /// The display name for `id`, or this catalog's placeholder.
    pub fn name_of(&self, id: &RoleId) -> &str {
        self.get(id)
            .map(|role| role.name.as_str())
            .unwrap_or(self.kind.placeholder())
    }

    pub fn names_of<'a>(&'a self, ids: &'a [RoleId]) -> impl Iterator<Item = &'a str> + 'a {
        ids.iter().map(move |id| self.name_of(id))
    }
}
