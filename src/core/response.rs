use serde::Serialize;

/// Interaction callback types understood by the chat platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionResponseType {
    Pong = 1,
    ChannelMessageWithSource = 4,
}

/// Message flags, see the platform's message object documentation
pub mod flags {
    pub const EPHEMERAL: u64 = 1 << 6;
}

/// Body returned to the platform in reply to an interaction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "InteractionResponse")]
pub enum ResponseBody {
    Pong,
    /// A message posted in the channel where the command was invoked
    ChannelMessage { content: String },
    /// A channel message only visible to the invoking user
    EphemeralChannelMessage { content: String },
}

/// Wire envelope: `{"type": 4, "data": {"content": "...", "flags": 64}}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MessageData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageData {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

impl ResponseBody {
    pub fn channel_message(content: impl Into<String>) -> Self {
        ResponseBody::ChannelMessage {
            content: content.into(),
        }
    }

    pub fn ephemeral(content: impl Into<String>) -> Self {
        ResponseBody::EphemeralChannelMessage {
            content: content.into(),
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            ResponseBody::Pong => None,
            ResponseBody::ChannelMessage { content }
            | ResponseBody::EphemeralChannelMessage { content } => Some(content),
        }
    }
}

impl From<ResponseBody> for InteractionResponse {
    fn from(body: ResponseBody) -> Self {
        let message = |content, flags| InteractionResponse {
            kind: InteractionResponseType::ChannelMessageWithSource as u8,
            data: Some(MessageData { content, flags }),
        };
        match body {
            ResponseBody::Pong => InteractionResponse {
                kind: InteractionResponseType::Pong as u8,
                data: None,
            },
            ResponseBody::ChannelMessage { content } => message(content, None),
            ResponseBody::EphemeralChannelMessage { content } => {
                message(content, Some(flags::EPHEMERAL))
            }
        }
    }
}
