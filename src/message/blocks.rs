//! Wire types for the chat webhook body (block-kit style attachments).

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessagePayload {
    pub channel: String,
    pub attachments: Vec<Attachment>,
}

/// A colored side bar holding the display blocks and optional detail fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub color: String,
    pub blocks: Vec<Block>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<AttachmentField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentField {
    pub value: String,
    pub short: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header {
        text: Text,
    },
    Context {
        elements: Vec<Text>,
    },
    Section {
        text: Text,
        #[serde(skip_serializing_if = "Option::is_none")]
        accessory: Option<Accessory>,
    },
    Divider,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Text {
    #[serde(rename = "plain_text")]
    Plain { text: String, emoji: bool },
    #[serde(rename = "mrkdwn")]
    Markdown { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Accessory {
    Button {
        text: Text,
        value: String,
        url: String,
    },
}

impl Text {
    pub fn plain(text: impl Into<String>) -> Self {
        Text::Plain {
            text: text.into(),
            emoji: true,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Text::Markdown { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Text::Plain { text, .. } | Text::Markdown { text } => text,
        }
    }
}

impl Block {
    pub fn header(text: impl Into<String>) -> Self {
        Block::Header {
            text: Text::plain(text),
        }
    }

    pub fn context(element: Text) -> Self {
        Block::Context {
            elements: vec![element],
        }
    }

    pub fn section(text: impl Into<String>) -> Self {
        Block::Section {
            text: Text::markdown(text),
            accessory: None,
        }
    }

    pub fn link_button(label: impl Into<String>, button_text: impl Into<String>, url: impl Into<String>) -> Self {
        Block::Section {
            text: Text::markdown(label),
            accessory: Some(Accessory::Button {
                text: Text::plain(button_text),
                value: "Report".to_string(),
                url: url.into(),
            }),
        }
    }
}
