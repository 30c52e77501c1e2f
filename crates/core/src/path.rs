//! Hierarchical addresses into a scope's tree
//!
//! - [`DataPath`]: untyped list of segments, what brokers see
//! - [`Path<R>`]: a `DataPath` tagged with the record type stored there,
//!   what façade callers hold
//!
//! Text form is absolute and `/`-separated: `/` is the root, `/a/b` is the
//! node `b` under `a`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use crate::error::PathError;

/// Inline capacity for path segments. Deeper paths spill to the heap.
const INLINE_SEGMENTS: usize = 6;

/// One validated component of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathSegment(String);

impl PathSegment {
    /// Validate and wrap a segment
    pub fn new(segment: impl Into<String>) -> Result<Self, PathError> {
        let segment = segment.into();
        if segment.is_empty() {
            return Err(PathError::InvalidSegment {
                segment,
                reason: "segment is empty",
            });
        }
        if segment.contains('/') {
            return Err(PathError::InvalidSegment {
                segment,
                reason: "segment contains '/'",
            });
        }
        if segment == "." || segment == ".." {
            return Err(PathError::InvalidSegment {
                segment,
                reason: "relative segments are not allowed",
            });
        }
        if segment.chars().any(char::is_control) {
            return Err(PathError::InvalidSegment {
                segment,
                reason: "segment contains a control character",
            });
        }
        Ok(PathSegment(segment))
    }

    /// Segment text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Untyped absolute path
///
/// # Examples
///
/// ```
/// use canopy_core::DataPath;
///
/// let path = DataPath::parse("/network/topology").unwrap();
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.parent().unwrap().to_string(), "/network");
/// assert!(DataPath::root().is_root());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataPath {
    segments: SmallVec<[PathSegment; INLINE_SEGMENTS]>,
}

impl DataPath {
    /// The root of a scope's tree
    pub fn root() -> Self {
        DataPath {
            segments: SmallVec::new(),
        }
    }

    /// Parse `/a/b/c` text. A single trailing `/` is tolerated.
    pub fn parse(text: &str) -> Result<Self, PathError> {
        let body = text
            .strip_prefix('/')
            .ok_or_else(|| PathError::NotAbsolute(text.to_string()))?;
        if body.is_empty() {
            return Ok(Self::root());
        }
        let body = body.strip_suffix('/').unwrap_or(body);

        let mut segments = SmallVec::new();
        for raw in body.split('/') {
            if raw.is_empty() {
                return Err(PathError::EmptySegment(text.to_string()));
            }
            segments.push(PathSegment::new(raw)?);
        }
        Ok(DataPath { segments })
    }

    /// Build a path from individual segments
    pub fn from_segments<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut path = Self::root();
        for segment in segments {
            path.push(segment)?;
        }
        Ok(path)
    }

    /// Append a segment in place
    pub fn push(&mut self, segment: impl Into<String>) -> Result<(), PathError> {
        self.segments.push(PathSegment::new(segment)?);
        Ok(())
    }

    /// New path one level below this one
    pub fn child(&self, segment: impl Into<String>) -> Result<Self, PathError> {
        let mut child = self.clone();
        child.push(segment)?;
        Ok(child)
    }

    /// Path one level up, `None` at the root
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(DataPath { segments })
    }

    /// Segments from the root down
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Last segment, `None` at the root
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Whether this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Depth below the root
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Alias for [`DataPath::is_root`]
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// Whether `prefix` is this path or one of its ancestors
    pub fn starts_with(&self, prefix: &DataPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl Default for DataPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl fmt::Debug for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataPath({})", self)
    }
}

impl FromStr for DataPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DataPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DataPath> for String {
    fn from(path: DataPath) -> Self {
        path.to_string()
    }
}

/// Path to a record of type `R`
///
/// The type parameter is a compile-time tag only; it ties the path to the
/// record type callers read and write there.
///
/// ```
/// use canopy_core::Path;
///
/// struct Interface;
///
/// let path: Path<Interface> = Path::parse("/interfaces/eth0").unwrap();
/// assert_eq!(path.to_string(), "/interfaces/eth0");
/// ```
pub struct Path<R> {
    inner: DataPath,
    _record: PhantomData<fn() -> R>,
}

impl<R> Path<R> {
    /// Parse absolute path text
    pub fn parse(text: &str) -> Result<Self, PathError> {
        DataPath::parse(text).map(Self::from_data_path)
    }

    /// Root of the scope's tree
    pub fn root() -> Self {
        Self::from_data_path(DataPath::root())
    }

    /// Tag an untyped path
    pub fn from_data_path(inner: DataPath) -> Self {
        Path {
            inner,
            _record: PhantomData,
        }
    }

    /// Path one level below, same record type
    pub fn child(&self, segment: impl Into<String>) -> Result<Self, PathError> {
        self.inner.child(segment).map(Self::from_data_path)
    }

    /// Same location, different record type
    pub fn cast<S>(&self) -> Path<S> {
        Path::from_data_path(self.inner.clone())
    }

    /// Untyped view
    pub fn as_data_path(&self) -> &DataPath {
        &self.inner
    }

    /// Drop the type tag
    pub fn into_data_path(self) -> DataPath {
        self.inner
    }
}

impl<R> Clone for Path<R> {
    fn clone(&self) -> Self {
        Self::from_data_path(self.inner.clone())
    }
}

impl<R> PartialEq for Path<R> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<R> Eq for Path<R> {}

impl<R> std::hash::Hash for Path<R> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<R> fmt::Display for Path<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl<R> fmt::Debug for Path<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path<{}>({})", std::any::type_name::<R>(), self.inner)
    }
}

impl<R> FromStr for Path<R> {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<R> AsRef<DataPath> for Path<R> {
    fn as_ref(&self) -> &DataPath {
        &self.inner
    }
}
