use crate::artifacts::objects::object::DecodeError;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

/// Parsed `"{kind} {length}\0"` object header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectHeader {
    pub object_type: ObjectType,
    pub size: usize,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Build the `"{kind} {length}\0"` prefix for a payload of `size` bytes
    pub fn header(&self, size: usize) -> String {
        format!("{} {}\0", self.as_str(), size)
    }

    /// Consume the header from `data_reader`, leaving it positioned at the payload
    pub fn parse_object_header(
        data_reader: &mut impl BufRead,
    ) -> Result<ObjectHeader, DecodeError> {
        let mut object_type = Vec::new();
        data_reader.read_until(b' ', &mut object_type)?;
        if object_type.pop() != Some(b' ') {
            return Err(DecodeError::new("missing object kind"));
        }

        let object_type = std::str::from_utf8(&object_type)
            .map_err(|_| DecodeError::new("object kind is not ASCII"))?;
        let object_type = ObjectType::try_from(object_type)?;

        let mut size = Vec::new();
        data_reader.read_until(b'\0', &mut size)?;
        if size.pop() != Some(b'\0') {
            return Err(DecodeError::new("unterminated object header"));
        }

        // plain decimal digits, no sign and no leading zero
        let is_canonical = match size.as_slice() {
            [b'0'] => true,
            [first, ..] => *first != b'0' && size.iter().all(u8::is_ascii_digit),
            [] => false,
        };
        let size = std::str::from_utf8(&size)
            .ok()
            .filter(|_| is_canonical)
            .and_then(|size| size.parse::<usize>().ok())
            .ok_or_else(|| DecodeError::new("invalid object length"))?;

        Ok(ObjectHeader { object_type, size })
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = DecodeError;

    fn try_from(value: &str) -> Result<Self, DecodeError> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(DecodeError::new(format!("invalid object type {value:?}"))),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
