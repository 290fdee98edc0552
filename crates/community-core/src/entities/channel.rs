//! Channel entity - a named topic inside a server

use crate::value_objects::RecordId;

/// Maximum length of a channel name
pub const CHANNEL_NAME_MAX: usize = 100;
/// Maximum length of a channel topic
pub const CHANNEL_TOPIC_MAX: usize = 100;

/// Channel entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: RecordId,
    pub name: String,
    pub owner_id: RecordId,
    pub topic: String,
    pub server_id: RecordId,
}

impl Channel {
    pub fn new(id: RecordId, name: &str, owner_id: RecordId, server_id: RecordId) -> Self {
        let mut channel = Self {
            id,
            name: name.to_string(),
            owner_id,
            topic: String::new(),
            server_id,
        };
        channel.normalize();
        channel
    }

    /// Names are stored lower-cased; must run before every save
    pub fn normalize(&mut self) {
        self.name = self.name.to_lowercase();
    }

    #[inline]
    pub fn is_owner(&self, user_id: RecordId) -> bool {
        self.owner_id == user_id
    }
}
