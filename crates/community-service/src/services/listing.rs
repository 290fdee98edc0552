//! Server listing service
//!
//! Loads every server with its category name, runs the listing pipeline and
//! attaches each surviving server's channels.

use std::collections::HashMap;

use community_core::{Channel, RecordId};
use tracing::{debug, instrument};

use crate::dto::{ServerListParams, ServerResponse, ServerView};
use crate::listing::{run_pipeline, ListedServer, ServerListQuery};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Server listing service
pub struct ServerListingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ServerListingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List servers matching `params`, in id order
    ///
    /// `caller` is the authenticated user, if any; `by_user=true` requires one.
    #[instrument(skip(self, params))]
    pub async fn list_servers(
        &self,
        params: &ServerListParams,
        caller: Option<RecordId>,
    ) -> ServiceResult<Vec<ServerResponse>> {
        let query = ServerListQuery::from_params(params);

        let all: Vec<ListedServer> = self
            .ctx
            .server_repo()
            .find_all_with_category()
            .await?
            .into_iter()
            .map(ListedServer::from)
            .collect();
        let total = all.len();

        let listed = run_pipeline(all, &query, caller)?;
        debug!(total, returned = listed.len(), "Server listing filtered");

        let ids: Vec<RecordId> = listed.iter().map(|s| s.entry.server.id).collect();
        let mut channels: HashMap<RecordId, Vec<Channel>> = HashMap::new();
        if !ids.is_empty() {
            for channel in self.ctx.channel_repo().find_by_servers(&ids).await? {
                channels.entry(channel.server_id).or_default().push(channel);
            }
        }

        Ok(listed
            .iter()
            .map(|listed| {
                let server = &listed.entry.server;
                ServerResponse::from(ServerView {
                    server,
                    category_name: &listed.entry.category_name,
                    channels: channels
                        .get(&server.id)
                        .map(Vec::as_slice)
                        .unwrap_or_default(),
                    num_members: listed.num_members,
                })
            })
            .collect())
    }
}
