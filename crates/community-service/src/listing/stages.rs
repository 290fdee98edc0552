//! Pipeline stages
//!
//! Each stage takes the output of the previous one. Order matters: the auth
//! gate runs before any filtering, `by_serverid` only sees servers that
//! survived the category and membership filters, and `qty` truncates last.

use community_core::{RecordId, ServerWithCategory};

use super::{ListingError, ServerListQuery};

/// A server moving through the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedServer {
    pub entry: ServerWithCategory,
    /// Set only when member counts were requested
    pub num_members: Option<usize>,
}

impl From<ServerWithCategory> for ListedServer {
    fn from(entry: ServerWithCategory) -> Self {
        Self {
            entry,
            num_members: None,
        }
    }
}

/// One step of the listing pipeline
pub type Stage = fn(
    Vec<ListedServer>,
    &ServerListQuery,
    Option<RecordId>,
) -> Result<Vec<ListedServer>, ListingError>;

/// Stages in execution order
pub const STAGES: [(&str, Stage); 6] = [
    ("require_identity", require_identity),
    ("category", filter_by_category),
    ("by_user", filter_by_member),
    ("by_serverid", filter_by_server_id),
    ("with_num_members", annotate_member_count),
    ("qty", truncate),
];

/// Run every stage over `servers`
pub fn run_pipeline(
    servers: Vec<ListedServer>,
    query: &ServerListQuery,
    caller: Option<RecordId>,
) -> Result<Vec<ListedServer>, ListingError> {
    STAGES
        .iter()
        .try_fold(servers, |acc, (_, stage)| stage(acc, query, caller))
}

fn require_identity(
    servers: Vec<ListedServer>,
    query: &ServerListQuery,
    caller: Option<RecordId>,
) -> Result<Vec<ListedServer>, ListingError> {
    if query.by_user && caller.is_none() {
        return Err(ListingError::AuthenticationRequired);
    }
    Ok(servers)
}

fn filter_by_category(
    mut servers: Vec<ListedServer>,
    query: &ServerListQuery,
    _caller: Option<RecordId>,
) -> Result<Vec<ListedServer>, ListingError> {
    if let Some(category) = &query.category {
        servers.retain(|s| &s.entry.category_name == category);
    }
    Ok(servers)
}

fn filter_by_member(
    mut servers: Vec<ListedServer>,
    query: &ServerListQuery,
    caller: Option<RecordId>,
) -> Result<Vec<ListedServer>, ListingError> {
    if query.by_user {
        let user = caller.ok_or(ListingError::AuthenticationRequired)?;
        servers.retain(|s| s.entry.server.is_member(user));
    }
    Ok(servers)
}

fn filter_by_server_id(
    mut servers: Vec<ListedServer>,
    query: &ServerListQuery,
    _caller: Option<RecordId>,
) -> Result<Vec<ListedServer>, ListingError> {
    let Some(raw) = &query.by_serverid else {
        return Ok(servers);
    };

    let id = match RecordId::parse(raw.trim()) {
        Ok(id) => Some(id),
        // Integer text outside the id range matches nothing
        Err(_) if is_integer(raw.trim()) => None,
        Err(_) => {
            return Err(ListingError::InvalidParameter(
                "Server Value Error".to_string(),
            ))
        }
    };

    servers.retain(|s| Some(s.entry.server.id) == id);
    if servers.is_empty() {
        return Err(ListingError::NotFound(raw.clone()));
    }
    Ok(servers)
}

fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn annotate_member_count(
    mut servers: Vec<ListedServer>,
    query: &ServerListQuery,
    _caller: Option<RecordId>,
) -> Result<Vec<ListedServer>, ListingError> {
    if query.with_num_members {
        for listed in &mut servers {
            listed.num_members = Some(listed.entry.server.member_count());
        }
    }
    Ok(servers)
}

fn truncate(
    mut servers: Vec<ListedServer>,
    query: &ServerListQuery,
    _caller: Option<RecordId>,
) -> Result<Vec<ListedServer>, ListingError> {
    if let Some(raw) = &query.qty {
        let qty: usize = raw.trim().parse().map_err(|_| {
            ListingError::InvalidParameter("qty must be a non-negative integer".to_string())
        })?;
        servers.truncate(qty);
    }
    Ok(servers)
}
