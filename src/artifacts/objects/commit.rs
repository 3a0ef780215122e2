//! Commit object
//!
//! Commits are the nodes of the history graph. Each one records:
//! - A tree object ID (directory snapshot)
//! - Zero or one parent commit ID
//! - Author and committer signatures
//! - A free-text message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{
    DecodeError, Object, Packable, Unpackable, read_payload, with_header,
};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::io::BufRead;

/// Author or committer signature
///
/// Contains name, email, and timestamp with timezone information.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: DateTime<FixedOffset>,
}

impl Author {
    /// Create a signature stamped with the current wall-clock time in UTC
    pub fn new(name: String, email: String) -> Self {
        Self::new_with_timestamp(name, email, Utc::now().fixed_offset())
    }

    /// Create a signature at a fixed time
    ///
    /// `<`, `>` and line breaks are dropped from name and email, since they
    /// would end the field or the header line early.
    pub fn new_with_timestamp(name: String, email: String, timestamp: DateTime<FixedOffset>) -> Self {
        Author {
            name: sanitize_ident(&name),
            email: sanitize_ident(&email),
            timestamp,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// "Name <email@example.com>"
    pub fn identity(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// Identity followed by seconds since the epoch and the UTC offset,
    /// as written in commit headers
    pub fn display(&self) -> String {
        format!(
            "{} {} {}",
            self.identity(),
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Format timestamp in human-readable form
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %-d %H:%M:%S %Y %z").to_string()
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }
}

impl TryFrom<&str> for Author {
    type Error = DecodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Format: "name <email> timestamp timezone"
        // Split from right to get timezone and timestamp first
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(DecodeError::new("invalid signature format"));
        }

        let timezone = parts[0];
        let timestamp = parts[1]
            .parse::<i64>()
            .map_err(|_| DecodeError::new("invalid signature timestamp"))?;
        let name_email_part = parts[2];

        let email_start = name_email_part
            .find('<')
            .ok_or_else(|| DecodeError::new("invalid signature format: missing '<'"))?;
        let email_end = name_email_part
            .rfind('>')
            .filter(|end| *end > email_start)
            .ok_or_else(|| DecodeError::new("invalid signature format: missing '>'"))?;

        let name = name_email_part[..email_start].trim().to_string();
        let email = name_email_part[email_start + 1..email_end].to_string();

        let offset = parse_timezone(timezone)
            .ok_or_else(|| DecodeError::new(format!("invalid timezone {timezone:?}")))?;
        let timestamp = DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| DecodeError::new("signature timestamp out of range"))?
            .with_timezone(&offset);

        Ok(Author {
            name,
            email,
            timestamp,
        })
    }
}

fn sanitize_ident(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '\n' | '\r' | '\0'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Parse a `+hhmm` / `-hhmm` offset
fn parse_timezone(timezone: &str) -> Option<FixedOffset> {
    let (sign, digits) = match timezone.split_at_checked(1)? {
        ("+", digits) => (1, digits),
        ("-", digits) => (-1, digits),
        _ => return None,
    };
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let hours = digits[..2].parse::<i32>().ok()?;
    let minutes = digits[2..].parse::<i32>().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Encode a commit object
///
/// The `parent` line is only present when a parent exists. The message is
/// appended verbatim after the blank line separating it from the headers.
pub fn encode_commit(
    tree_oid: &ObjectId,
    message: &str,
    parent: Option<&ObjectId>,
    author: &Author,
    committer: &Author,
) -> Bytes {
    let content = commit_payload(tree_oid, message, parent, author, committer);
    with_header(ObjectType::Commit, content.as_bytes())
}

fn commit_payload(
    tree_oid: &ObjectId,
    message: &str,
    parent: Option<&ObjectId>,
    author: &Author,
    committer: &Author,
) -> String {
    let mut content = format!("tree {tree_oid}\n");
    if let Some(parent) = parent {
        content.push_str(&format!("parent {parent}\n"));
    }
    content.push_str(&format!("author {}\n", author.display()));
    content.push_str(&format!("committer {}\n", committer.display()));
    content.push('\n');
    content.push_str(message);
    content
}

/// Commit object
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Absent for the root commit of a branch
    parent: Option<ObjectId>,
    tree_oid: ObjectId,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        tree_oid: ObjectId,
        author: Author,
        committer: Author,
        message: String,
    ) -> Self {
        Commit {
            parent,
            tree_oid,
            author,
            committer,
            message,
        }
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn committer(&self) -> &Author {
        &self.committer
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Bytes {
        encode_commit(
            &self.tree_oid,
            &self.message,
            self.parent.as_ref(),
            &self.author,
            &self.committer,
        )
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> Result<Self, DecodeError> {
        let content = String::from_utf8(read_payload(reader)?)
            .map_err(|_| DecodeError::new("commit is not UTF-8"))?;

        let (headers, message) = content
            .split_once("\n\n")
            .ok_or_else(|| DecodeError::new("missing blank line before message"))?;
        let mut lines = headers.lines();

        let tree_oid = lines
            .next()
            .and_then(|line| line.strip_prefix("tree "))
            .ok_or_else(|| DecodeError::new("missing tree line"))?;
        let tree_oid = parse_oid(tree_oid)?;

        let mut next_line = lines
            .next()
            .ok_or_else(|| DecodeError::new("missing author line"))?;

        let parent = match next_line.strip_prefix("parent ") {
            Some(parent) => {
                next_line = lines
                    .next()
                    .ok_or_else(|| DecodeError::new("missing author line"))?;
                Some(parse_oid(parent)?)
            }
            None => None,
        };

        let author = next_line
            .strip_prefix("author ")
            .ok_or_else(|| DecodeError::new("invalid author line"))?;
        let author = Author::try_from(author)?;

        let committer = lines
            .next()
            .and_then(|line| line.strip_prefix("committer "))
            .ok_or_else(|| DecodeError::new("missing committer line"))?;
        let committer = Author::try_from(committer)?;

        if let Some(extra) = lines.next() {
            return Err(DecodeError::new(format!("unexpected header {extra:?}")));
        }

        Ok(Self::new(
            parent,
            tree_oid,
            author,
            committer,
            message.to_string(),
        ))
    }
}

fn parse_oid(hex: &str) -> Result<ObjectId, DecodeError> {
    ObjectId::try_parse(hex).map_err(|e| DecodeError::new(e.to_string()))
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        commit_payload(
            &self.tree_oid,
            &self.message,
            self.parent.as_ref(),
            &self.author,
            &self.committer,
        )
    }
}
