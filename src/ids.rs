//! Opaque global IDs: base64 of `<Kind>:<database id>`.

use base64::{engine::general_purpose::STANDARD, Engine as _};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalId {
    Label(i64),
    Org(i64),
    Thread(i64),
}

impl GlobalId {
    pub fn kind(&self) -> &'static str {
        match self {
            GlobalId::Label(_) => "Label",
            GlobalId::Org(_) => "Org",
            GlobalId::Thread(_) => "DiscussionThread",
        }
    }

    pub fn db_id(&self) -> i64 {
        match *self {
            GlobalId::Label(id) | GlobalId::Org(id) | GlobalId::Thread(id) => id,
        }
    }

    pub fn encode(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.kind(), self.db_id()))
    }

    /// `None` for anything that is not a well-formed ID of a known kind
    pub fn decode(raw: &str) -> Option<Self> {
        let bytes = STANDARD.decode(raw).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        let (kind, id) = text.split_once(':')?;
        let id: i64 = id.parse().ok()?;

        match kind {
            "Label" => Some(GlobalId::Label(id)),
            "Org" => Some(GlobalId::Org(id)),
            "DiscussionThread" => Some(GlobalId::Thread(id)),
            _ => None,
        }
    }
}
