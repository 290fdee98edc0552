//! Server models -> entity

use std::collections::{BTreeSet, HashMap};

use community_core::{FileRef, RecordId, Server};

use crate::models::{ServerMemberModel, ServerModel};

/// A server row and the member ids loaded for it
pub struct ServerParts {
    pub model: ServerModel,
    pub member_ids: BTreeSet<RecordId>,
}

impl From<ServerParts> for Server {
    fn from(parts: ServerParts) -> Self {
        let ServerParts { model, member_ids } = parts;
        Server {
            id: RecordId::new(model.id),
            name: model.name,
            owner_id: RecordId::new(model.owner_id),
            category_id: RecordId::new(model.category_id),
            description: model.description,
            member_ids,
            banner: model.banner.map(FileRef::new),
            icon: model.icon.map(FileRef::new),
        }
    }
}

/// Group membership rows by server id
pub fn group_members(rows: Vec<ServerMemberModel>) -> HashMap<i64, BTreeSet<RecordId>> {
    let mut grouped: HashMap<i64, BTreeSet<RecordId>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.server_id)
            .or_default()
            .insert(RecordId::new(row.user_id));
    }
    grouped
}
