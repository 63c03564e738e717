use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Build the `<kind> <len>\0` header that prefixes every stored payload
    pub fn header(&self, payload_len: usize) -> String {
        format!("{} {}\0", self.as_str(), payload_len)
    }

    /// Consume the `<kind> <len>\0` header from the reader
    ///
    /// Returns the kind together with the declared payload length.
    pub fn parse_header(data_reader: &mut impl BufRead) -> Result<(ObjectType, usize), String> {
        let mut object_type = Vec::new();
        data_reader
            .read_until(b' ', &mut object_type)
            .map_err(|e| e.to_string())?;
        if object_type.pop() != Some(b' ') {
            return Err("missing space after object kind".to_string());
        }
        let object_type = std::str::from_utf8(&object_type).map_err(|e| e.to_string())?;
        let object_type = ObjectType::try_from(object_type)?;

        let mut size = Vec::new();
        data_reader
            .read_until(b'\0', &mut size)
            .map_err(|e| e.to_string())?;
        if size.pop() != Some(b'\0') {
            return Err("missing NUL after object size".to_string());
        }
        let size = std::str::from_utf8(&size)
            .ok()
            .and_then(|size| size.parse::<usize>().ok())
            .ok_or_else(|| "invalid object size".to_string())?;

        Ok((object_type, size))
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(format!("invalid object type {value:?}")),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
