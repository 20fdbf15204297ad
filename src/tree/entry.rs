//! Filesystem entries: one object in a tree, read without following symlinks

use crate::error::CompareError;
use crate::tree::hasher::{self, Hash};
use crate::tree::path::Location;
use crate::tree::Tree;
use std::cell::OnceCell;
use std::fmt;
use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use tracing::trace;

const S_IFMT: u32 = 0o170000;
const S_IFSOCK: u32 = 0o140000;
const S_IFLNK: u32 = 0o120000;
const S_IFREG: u32 = 0o100000;
const S_IFBLK: u32 = 0o060000;
const S_IFDIR: u32 = 0o040000;
const S_IFCHR: u32 = 0o020000;
const S_IFIFO: u32 = 0o010000;

/// Permission bits, including setuid, setgid and sticky
const PERMISSION_BITS: u32 = 0o7777;

/// Kind of filesystem object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryType {
    File,
    Directory,
    SymbolicLink,
    NamedPipe,
    CharacterDevice,
    BlockDevice,
    Socket,
    Unknown,
}

impl EntryType {
    /// Every type an exclusion rule may name
    pub const RULE_TYPES: [EntryType; 7] = [
        EntryType::File,
        EntryType::Directory,
        EntryType::SymbolicLink,
        EntryType::NamedPipe,
        EntryType::CharacterDevice,
        EntryType::BlockDevice,
        EntryType::Socket,
    ];

    /// Classify raw `st_mode` bits
    pub fn from_mode(mode: u32) -> Self {
        match mode & S_IFMT {
            S_IFREG => EntryType::File,
            S_IFDIR => EntryType::Directory,
            S_IFLNK => EntryType::SymbolicLink,
            S_IFIFO => EntryType::NamedPipe,
            S_IFCHR => EntryType::CharacterDevice,
            S_IFBLK => EntryType::BlockDevice,
            S_IFSOCK => EntryType::Socket,
            _ => EntryType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::File => "file",
            EntryType::Directory => "directory",
            EntryType::SymbolicLink => "symbolic_link",
            EntryType::NamedPipe => "named_pipe",
            EntryType::CharacterDevice => "character_device",
            EntryType::BlockDevice => "block_device",
            EntryType::Socket => "socket",
            EntryType::Unknown => "unknown",
        }
    }

    /// Parse a rule type name. `unknown` is not a valid rule type.
    pub fn from_rule_name(name: &str) -> Option<Self> {
        Self::RULE_TYPES
            .iter()
            .copied()
            .find(|kind| kind.as_str() == name)
    }

    /// Leading character of an `ls -l` mode string
    fn mode_char(&self) -> char {
        match self {
            EntryType::File => '-',
            EntryType::Directory => 'd',
            EntryType::SymbolicLink => 'l',
            EntryType::NamedPipe => 'p',
            EntryType::CharacterDevice => 'c',
            EntryType::BlockDevice => 'b',
            EntryType::Socket => 's',
            EntryType::Unknown => '?',
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes shared by every entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    pub uid: u32,
    pub gid: u32,
    /// Raw `st_mode`, type bits included
    pub mode: u32,
    /// Modification time in whole seconds since the epoch
    pub mtime: i64,
}

impl Attributes {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            uid: metadata.uid(),
            gid: metadata.gid(),
            mode: metadata.mode(),
            mtime: metadata.mtime(),
        }
    }
}

/// Kind-specific payload
#[derive(Debug)]
pub enum EntryKind {
    File {
        size: u64,
        checksum: OnceCell<Hash>,
    },
    Directory,
    SymbolicLink {
        target: String,
    },
    /// Pipes, devices, sockets and unrecognized objects
    Special(EntryType),
}

/// One filesystem object within a tree
#[derive(Debug)]
pub struct Entry<'t> {
    tree: &'t Tree,
    location: Location,
    attributes: Attributes,
    kind: EntryKind,
}

impl<'t> Entry<'t> {
    /// Read the object at `location` with a single lstat
    pub fn read(tree: &'t Tree, location: Location) -> Result<Self, CompareError> {
        let metadata =
            std::fs::symlink_metadata(&location.absolute).map_err(|e| CompareError::Metadata {
                path: location.absolute.clone(),
                source: e,
            })?;
        Self::from_metadata(tree, location, &metadata)
    }

    /// Build an entry from metadata that was read without following symlinks
    pub fn from_metadata(
        tree: &'t Tree,
        location: Location,
        metadata: &Metadata,
    ) -> Result<Self, CompareError> {
        let attributes = Attributes::from_metadata(metadata);

        let kind = match EntryType::from_mode(attributes.mode) {
            EntryType::File => EntryKind::File {
                size: metadata.size(),
                checksum: OnceCell::new(),
            },
            EntryType::Directory => EntryKind::Directory,
            EntryType::SymbolicLink => {
                let target = std::fs::read_link(&location.absolute).map_err(|e| {
                    CompareError::LinkTarget {
                        path: location.absolute.clone(),
                        source: e,
                    }
                })?;
                EntryKind::SymbolicLink {
                    target: target.to_string_lossy().into_owned(),
                }
            }
            other => EntryKind::Special(other),
        };

        Ok(Self::new(tree, location, attributes, kind))
    }

    pub fn new(tree: &'t Tree, location: Location, attributes: Attributes, kind: EntryKind) -> Self {
        Self {
            tree,
            location,
            attributes,
            kind,
        }
    }

    pub fn entry_type(&self) -> EntryType {
        match &self.kind {
            EntryKind::File { .. } => EntryType::File,
            EntryKind::Directory => EntryType::Directory,
            EntryKind::SymbolicLink { .. } => EntryType::SymbolicLink,
            EntryKind::Special(kind) => *kind,
        }
    }

    pub fn tree(&self) -> &'t Tree {
        self.tree
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Normalized path relative to the tree root
    pub fn relative(&self) -> &str {
        &self.location.relative
    }

    /// Identity and ordering key, see [`Location::key`]
    pub fn key(&self) -> &[u8] {
        &self.location.key
    }

    /// On-disk path
    pub fn path(&self) -> &Path {
        &self.location.absolute
    }

    pub fn uid(&self) -> u32 {
        self.attributes.uid
    }

    pub fn gid(&self) -> u32 {
        self.attributes.gid
    }

    /// Permission bits. Not meaningful for symbolic links.
    pub fn permissions(&self) -> u32 {
        self.attributes.mode & PERMISSION_BITS
    }

    pub fn mtime(&self) -> i64 {
        self.attributes.mtime
    }

    pub fn size(&self) -> Option<u64> {
        match &self.kind {
            EntryKind::File { size, .. } => Some(*size),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::SymbolicLink { target } => Some(target),
            _ => None,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    /// Content hash of a regular file, `None` for every other kind
    ///
    /// The content is read on the first call only; later calls return the
    /// cached digest.
    pub fn checksum(&self) -> Result<Option<Hash>, CompareError> {
        let EntryKind::File { checksum, .. } = &self.kind else {
            return Ok(None);
        };

        if let Some(hash) = checksum.get() {
            return Ok(Some(*hash));
        }

        let hash = hasher::hash_file(&self.location.absolute)?;
        trace!(
            path = %self.location.relative,
            checksum = %hex::encode(hash),
            "Computed content hash"
        );
        Ok(Some(*checksum.get_or_init(|| hash)))
    }

    /// `ls -l` style mode string, e.g. `-rw-r--r--`
    pub fn mode_string(&self) -> String {
        format_mode(self.entry_type(), self.permissions())
    }
}

/// Render a type and permission bits the way `ls -l` does
pub fn format_mode(kind: EntryType, permissions: u32) -> String {
    let mut out = String::with_capacity(10);
    out.push(kind.mode_char());

    let special = [(0o4000, 's', 'S'), (0o2000, 's', 'S'), (0o1000, 't', 'T')];
    for (index, shift) in [6u32, 3, 0].into_iter().enumerate() {
        let bits = (permissions >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });

        let (flag, set_exec, set_no_exec) = special[index];
        let executable = bits & 0o1 != 0;
        out.push(match (permissions & flag != 0, executable) {
            (true, true) => set_exec,
            (true, false) => set_no_exec,
            (false, true) => 'x',
            (false, false) => '-',
        });
    }

    out
}
