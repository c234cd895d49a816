use crate::artifacts::objects::object_type::ObjectType;

#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd)]
pub enum FileMode {
    #[default]
    Regular,
    Executable,
}

/// Mode of a tree entry
///
/// Snapshots only ever produce `File(Regular)` and `Directory`; the remaining
/// modes show up in trees received from other repositories.
#[derive(Debug, Clone, Copy, Eq, Ord, PartialEq, PartialOrd)]
pub enum EntryMode {
    File(FileMode),
    Directory,
    Symlink,
    Submodule,
}

impl EntryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::File(FileMode::Regular) => "100644",
            EntryMode::File(FileMode::Executable) => "100755",
            EntryMode::Directory => "40000",
            EntryMode::Symlink => "120000",
            EntryMode::Submodule => "160000",
        }
    }

    pub fn as_u32(&self) -> u32 {
        match self {
            EntryMode::File(FileMode::Regular) => 0o100644,
            EntryMode::File(FileMode::Executable) => 0o100755,
            EntryMode::Directory => 0o40000,
            EntryMode::Symlink => 0o120000,
            EntryMode::Submodule => 0o160000,
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }

    /// Type of the object an entry with this mode points to
    pub fn object_type(&self) -> ObjectType {
        match self {
            EntryMode::Directory => ObjectType::Tree,
            EntryMode::Submodule => ObjectType::Commit,
            EntryMode::File(_) | EntryMode::Symlink => ObjectType::Blob,
        }
    }
}

impl From<FileMode> for EntryMode {
    fn from(mode: FileMode) -> Self {
        EntryMode::File(mode)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid entry mode: {0:?}")]
pub struct InvalidEntryMode(pub String);

impl TryFrom<&str> for EntryMode {
    type Error = InvalidEntryMode;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // some writers zero-pad directory modes
        match value {
            "100644" | "100664" => Ok(EntryMode::File(FileMode::Regular)),
            "100755" => Ok(EntryMode::File(FileMode::Executable)),
            "40000" | "040000" => Ok(EntryMode::Directory),
            "120000" => Ok(EntryMode::Symlink),
            "160000" => Ok(EntryMode::Submodule),
            _ => Err(InvalidEntryMode(value.to_string())),
        }
    }
}
