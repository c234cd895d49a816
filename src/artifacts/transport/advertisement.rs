use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::transport::error::TransportResult;
use crate::artifacts::transport::pkt_line::{PktLine, PktLineReader};

/// Placeholder ref an empty repository advertises to carry its capabilities
const CAPABILITIES_PLACEHOLDER: &str = "capabilities^{}";
const PEELED_SUFFIX: &str = "^{}";

/// Refs advertised by a remote, in the order it sent them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefAdvertisement {
    refs: Vec<(String, ObjectId)>,
}

impl RefAdvertisement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a ref; a name that was already advertised keeps its first ID
    pub fn push(&mut self, name: String, oid: ObjectId) {
        if self.get(&name).is_none() {
            self.refs.push((name, oid));
        }
    }

    /// Parse newline-delimited `<hex-id> <refname>` lines
    pub fn parse(text: &str) -> Self {
        text.lines().filter_map(Self::parse_line).collect()
    }

    /// Parse the body of a smart HTTP `info/refs` response
    pub fn from_pkt_lines(body: &[u8]) -> TransportResult<Self> {
        let mut advertisement = Self::new();
        let mut reader = PktLineReader::new(body);

        while let Some(line) = reader.next_line()? {
            if let PktLine::Data(data) = line {
                if let Some((name, oid)) = Self::parse_line(&String::from_utf8_lossy(data)) {
                    advertisement.push(name, oid);
                }
            }
        }

        Ok(advertisement)
    }

    /// Parse one advertisement line
    ///
    /// Capabilities after a NUL, the `# service=` banner, peeled tag entries and
    /// lines without a valid ID yield `None`.
    pub fn parse_line(line: &str) -> Option<(String, ObjectId)> {
        let line = line.trim_end_matches(['\n', '\r']);
        let line = line.split('\0').next().unwrap_or_default();
        if line.starts_with('#') {
            return None;
        }

        let (hex, name) = line.split_once(' ')?;
        let name = name.trim();
        if name.is_empty() || name == CAPABILITIES_PLACEHOLDER || name.ends_with(PEELED_SUFFIX) {
            return None;
        }

        match ObjectId::try_parse(hex) {
            Ok(oid) => Some((name.to_string(), oid)),
            Err(e) => {
                tracing::debug!(line, error = %e, "ignoring advertisement line");
                None
            }
        }
    }

    pub fn first(&self) -> Option<(&str, &ObjectId)> {
        self.refs.first().map(|(name, oid)| (name.as_str(), oid))
    }

    pub fn get(&self, name: &str) -> Option<&ObjectId> {
        self.refs
            .iter()
            .find(|(ref_name, _)| ref_name == name)
            .map(|(_, oid)| oid)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectId)> {
        self.refs.iter().map(|(name, oid)| (name.as_str(), oid))
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

impl FromIterator<(String, ObjectId)> for RefAdvertisement {
    fn from_iter<I: IntoIterator<Item = (String, ObjectId)>>(iter: I) -> Self {
        let mut advertisement = Self::new();
        for (name, oid) in iter {
            advertisement.push(name, oid);
        }
        advertisement
    }
}
