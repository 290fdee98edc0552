//! Channel model -> entity

use community_core::{Channel, RecordId};

use crate::models::ChannelModel;

impl From<ChannelModel> for Channel {
    fn from(model: ChannelModel) -> Self {
        Channel {
            id: RecordId::new(model.id),
            name: model.name,
            owner_id: RecordId::new(model.owner_id),
            topic: model.topic,
            server_id: RecordId::new(model.server_id),
        }
    }
}
