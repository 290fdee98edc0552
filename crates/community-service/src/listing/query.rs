//! Recognised listing parameters

use crate::dto::ServerListParams;

/// Parsed form of the listing query string
///
/// Empty values count as absent. Boolean flags are on only for the exact
/// string `"true"`. Numeric parameters stay raw here and are parsed by the
/// stage that uses them, so their errors surface in pipeline order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerListQuery {
    pub category: Option<String>,
    pub qty: Option<String>,
    pub by_user: bool,
    pub by_serverid: Option<String>,
    pub with_num_members: bool,
}

impl ServerListQuery {
    pub fn from_params(params: &ServerListParams) -> Self {
        Self {
            category: present(params.category.as_deref()),
            qty: present(params.qty.as_deref()),
            by_user: is_true(params.by_user.as_deref()),
            by_serverid: present(params.by_serverid.as_deref()),
            with_num_members: is_true(params.with_num_members.as_deref()),
        }
    }
}

fn present(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn is_true(value: Option<&str>) -> bool {
    value == Some("true")
}
