//! Tree operations on a scope's payload
//!
//! A partition is a JSON object tree, or nothing if it was never written
//! (or its root was deleted). Interior nodes are objects; anything else is
//! a leaf. Paths address object members from the root down.

use canopy_core::{CommitError, DataPath, Payload};
use serde_json::Map;

/// An empty container, used for a partition's implicit root
pub(crate) fn empty() -> Payload {
    Payload::Object(Map::new())
}

/// Text of the first `depth` segments of `path`
fn prefix(path: &DataPath, depth: usize) -> String {
    if depth == 0 {
        return "/".to_string();
    }
    path.segments()[..depth]
        .iter()
        .map(|segment| format!("/{}", segment))
        .collect()
}

/// Copy of the subtree at `path`
///
/// A partition that holds nothing has nothing at its root either.
pub(crate) fn get(root: Option<&Payload>, path: &DataPath) -> Option<Payload> {
    let mut node = root?;
    for segment in path.segments() {
        node = node.as_object()?.get(segment.as_str())?;
    }
    Some(node.clone())
}

/// Container holding the last segment of `path`, walking (and optionally
/// creating) the intermediate nodes
fn parent_mut<'a>(
    root: &'a mut Payload,
    path: &DataPath,
    create_parents: bool,
) -> Result<&'a mut Map<String, Payload>, CommitError> {
    let parent_depth = path.len().saturating_sub(1);
    let mut node = root;

    for (depth, segment) in path.segments()[..parent_depth].iter().enumerate() {
        let map = node.as_object_mut().ok_or_else(|| CommitError::NotContainer {
            path: prefix(path, depth),
        })?;
        node = if create_parents {
            map.entry(segment.as_str())
                .or_insert_with(|| Payload::Object(Map::new()))
        } else {
            match map.get_mut(segment.as_str()) {
                Some(child) => child,
                None => {
                    return Err(CommitError::MissingParent {
                        path: path.to_string(),
                    })
                }
            }
        };
    }

    node.as_object_mut().ok_or_else(|| CommitError::NotContainer {
        path: prefix(path, parent_depth),
    })
}

/// Replace the subtree at `path` with `data`
///
/// Writing below the root of an empty partition starts from an empty
/// container.
pub(crate) fn put(
    root: &mut Option<Payload>,
    path: &DataPath,
    data: Payload,
    create_parents: bool,
) -> Result<(), CommitError> {
    let Some(leaf) = path.last() else {
        *root = Some(data);
        return Ok(());
    };
    let parent = parent_mut(root.get_or_insert_with(empty), path, create_parents)?;
    parent.insert(leaf.as_str().to_string(), data);
    Ok(())
}

/// Combine `data` into the subtree at `path`
///
/// Objects are unioned member by member, recursively; on any other pairing
/// the incoming value replaces the stored one.
pub(crate) fn merge(
    root: &mut Option<Payload>,
    path: &DataPath,
    data: Payload,
    create_parents: bool,
) -> Result<(), CommitError> {
    let Some(leaf) = path.last() else {
        match root {
            Some(existing) => merge_into(existing, data),
            None => *root = Some(data),
        }
        return Ok(());
    };
    let parent = parent_mut(root.get_or_insert_with(empty), path, create_parents)?;
    match parent.get_mut(leaf.as_str()) {
        Some(existing) => merge_into(existing, data),
        None => {
            parent.insert(leaf.as_str().to_string(), data);
        }
    }
    Ok(())
}

fn merge_into(target: &mut Payload, patch: Payload) {
    match patch {
        Payload::Object(incoming) if target.is_object() => {
            if let Some(existing) = target.as_object_mut() {
                for (key, value) in incoming {
                    match existing.get_mut(&key) {
                        Some(slot) => merge_into(slot, value),
                        None => {
                            existing.insert(key, value);
                        }
                    }
                }
            }
        }
        other => *target = other,
    }
}

/// Remove the subtree at `path`. Returns whether anything was removed.
///
/// Deleting a path that does not exist is not an error. Deleting the root
/// leaves the partition holding nothing.
pub(crate) fn delete(root: &mut Option<Payload>, path: &DataPath) -> bool {
    let Some(leaf) = path.last() else {
        return root.take().is_some();
    };

    let Some(mut node) = root.as_mut() else {
        return false;
    };
    for segment in &path.segments()[..path.len() - 1] {
        match node.as_object_mut().and_then(|map| map.get_mut(segment.as_str())) {
            Some(child) => node = child,
            None => return false,
        }
    }
    node.as_object_mut()
        .map(|map| map.remove(leaf.as_str()).is_some())
        .unwrap_or(false)
}
