use std::fmt::Write as _;

use crate::config::Delimiter;
use crate::role::{RoleCatalog, RoleId, RoleKind};
use crate::time::Timestamp;
use crate::user::User;

const ROLE_COLUMNS: [&str; 3] = ["roleId", "roleName", "roleDescription"];
const USER_COLUMNS: [&str; 8] = [
    "user name",
    "full name",
    "email",
    "enabled",
    "data role",
    "function role",
    "web function role",
    "admin",
];
const USER_TITLE: &str = "The User list is:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Exactly the delimiter between cells, for the file.
    Plain,
    /// Cells padded to their column's width, for the console.
    Padded,
}

#[derive(Debug)]
struct Table {
    title: &'static str,
    columns: &'static [&'static str],
    rows: Vec<Vec<String>>,
}

#[derive(Debug)]
pub struct Report {
    timestamp: Timestamp,
    catalogs: Vec<RoleCatalog>,
    users: Option<Table>,
    partial: Option<String>,
}

impl Report {
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            catalogs: Vec::with_capacity(RoleKind::ALL.len()),
            users: None,
            partial: None,
        }
    }

    pub fn add_catalog(&mut self, catalog: RoleCatalog) {
        self.catalogs.push(catalog);
    }

    fn catalog(&self, kind: RoleKind) -> Option<&RoleCatalog> {
        self.catalogs.iter().find(|c| c.kind() == kind)
    }

    /// Join `users` against the catalogs added so far. A kind with no
    /// catalog resolves every id to that kind's placeholder.
    pub fn add_users(&mut self, users: &[User]) {
        let resolve_one = |kind: RoleKind, id: &RoleId| match self.catalog(kind) {
            Some(catalog) => catalog.name_of(id).to_string(),
            None => kind.placeholder().to_string(),
        };
        let resolve_all = |kind: RoleKind, ids: &[RoleId]| {
            let names = match self.catalog(kind) {
                Some(catalog) => catalog.names_of(ids).collect::<Vec<_>>(),
                None => vec![kind.placeholder(); ids.len()],
            };
            format!("[{}]", names.join("; "))
        };

        let rows = users
            .iter()
            .map(|user| {
                vec![
                    user.user_name.clone(),
                    user.full_name().to_string(),
                    user.email().to_string(),
                    yes_no(user.enabled).to_string(),
                    resolve_one(RoleKind::Data, &user.data_role_id),
                    resolve_all(RoleKind::Function, &user.function_role_ids),
                    resolve_all(RoleKind::WebFunction, &user.web_function_role_ids),
                    yes_no(user.is_admin).to_string(),
                ]
            })
            .collect();

        self.users = Some(Table {
            title: USER_TITLE,
            columns: &USER_COLUMNS,
            rows,
        });
    }

    /// Mark the report as cut short by `reason`.
    pub fn mark_partial(&mut self, reason: impl Into<String>) {
        self.partial = Some(reason.into());
    }

    pub fn is_partial(&self) -> bool {
        self.partial.is_some()
    }

    pub fn render(&self, delimiter: Delimiter, layout: Layout) -> String {
        let mut out = String::new();

        // two blank lines follow the timestamp, one precedes each section
        let _ = writeln!(out, "Data current as of: {}\n\n", self.timestamp);

        for catalog in &self.catalogs {
            let table = Table {
                title: catalog.kind().title(),
                columns: &ROLE_COLUMNS,
                rows: catalog
                    .roles()
                    .iter()
                    .map(|role| {
                        vec![
                            role.id.to_string(),
                            role.name.clone(),
                            role.description().to_string(),
                        ]
                    })
                    .collect(),
            };
            table.render(&mut out, delimiter, layout);
        }

        if let Some(users) = &self.users {
            users.render(&mut out, delimiter, layout);
        }

        if let Some(reason) = &self.partial {
            let _ = writeln!(out, "\n*** partial report: {reason} ***");
        }

        out
    }
}

impl Table {
    fn render(&self, out: &mut String, delimiter: Delimiter, layout: Layout) {
        let _ = writeln!(out, "\n{}\n", self.title);

        let header = self.columns.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        let widths = match layout {
            Layout::Plain => vec![0; self.columns.len()],
            Layout::Padded => std::iter::once(&header)
                .chain(&self.rows)
                .fold(vec![0; self.columns.len()], |mut widths, row| {
                    for (w, cell) in widths.iter_mut().zip(row) {
                        *w = (*w).max(cell.chars().count());
                    }
                    widths
                }),
        };

        for row in std::iter::once(&header).chain(&self.rows) {
            write_row(out, row, &widths, delimiter);
        }
    }
}

fn write_row(out: &mut String, row: &[String], widths: &[usize], delimiter: Delimiter) {
    let sep = delimiter.as_str();
    let last = row.len().saturating_sub(1);

    for (i, (cell, width)) in row.iter().zip(widths).enumerate() {
        if i == last {
            out.push_str(cell);
            continue;
        }

        match delimiter {
            // "a,   b": the comma hugs the cell, padding follows it
            Delimiter::Comma => {
                let cell = format!("{cell}{sep}");
                let _ = write!(out, "{cell:<w$}", w = width + sep.len());
            }
            // padding after a tab would land past the tab stop
            Delimiter::Tab => {
                let _ = write!(out, "{cell:<width$}{sep}");
            }
        }
    }
    out.push('\n');
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}
