//! Uploaded-file value objects and descriptor normalization.
//!
//! The environment boundary delivers uploaded files as a descriptor tree: a
//! descriptor with scalar fields describes one file, a descriptor whose
//! fields are parallel arrays (keyed by index) describes a batch from a
//! multi-file input, and nested groups mirror nested input names.
//! [`normalize_uploaded_files`] folds that tree into [`UploadedFile`] value
//! objects with the same shape.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One uploaded file, as described by the environment snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    name: String,
    content_type: String,
    tmp_path: PathBuf,
    error: u32,
    size: u64,
}

impl UploadedFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        tmp_path: impl Into<PathBuf>,
        error: u32,
        size: u64,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            tmp_path: tmp_path.into(),
            error,
            size,
        }
    }

    /// The client-supplied file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The client-supplied media type.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Where the upload was spooled on disk.
    pub fn tmp_path(&self) -> &Path {
        &self.tmp_path
    }

    /// The upload error code reported by the environment; zero means ok.
    pub fn error(&self) -> u32 {
        self.error
    }

    /// The upload size in bytes as reported by the environment.
    pub fn size(&self) -> u64 {
        self.size
    }
}

/// A raw uploaded-file descriptor, as injected by the environment boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileDescriptor {
    /// Scalar fields describing a single file.
    Entry { name: String, content_type: String, tmp_name: String, error: u32, size: u64 },
    /// Parallel arrays keyed by index, one file per index.
    Batch {
        names: Vec<String>,
        content_types: Vec<String>,
        tmp_names: Vec<String>,
        errors: Vec<u32>,
        sizes: Vec<u64>,
    },
    /// A nested descriptor group.
    Group(HashMap<String, FileDescriptor>),
}

/// The normalized counterpart of a [`FileDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileNode {
    File(UploadedFile),
    List(Vec<UploadedFile>),
    Group(HashMap<String, FileNode>),
}

/// Recursively normalizes a descriptor tree into uploaded-file values,
/// preserving its shape.
pub fn normalize_uploaded_files(
    descriptors: HashMap<String, FileDescriptor>,
) -> HashMap<String, FileNode> {
    descriptors.into_iter().map(|(attr, descriptor)| (attr, normalize(descriptor))).collect()
}

fn normalize(descriptor: FileDescriptor) -> FileNode {
    match descriptor {
        FileDescriptor::Entry { name, content_type, tmp_name, error, size } => {
            FileNode::File(UploadedFile::new(name, content_type, tmp_name, error, size))
        }
        FileDescriptor::Batch { names, content_types, tmp_names, errors, sizes } => {
            let files = names
                .into_iter()
                .zip(content_types)
                .zip(tmp_names)
                .zip(errors)
                .zip(sizes)
                .map(|((((name, content_type), tmp_name), error), size)| {
                    UploadedFile::new(name, content_type, tmp_name, error, size)
                })
                .collect();
            FileNode::List(files)
        }
        FileDescriptor::Group(group) => FileNode::Group(normalize_uploaded_files(group)),
    }
}
