//! Helpers for writing loose objects in unit tests
//!
//! The object write path is not implemented, so tests compress fixtures
//! themselves.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;
use std::path::Path;

/// Store `payload` as a loose object of the given kind under `objects_dir`
pub(crate) fn write_loose_object(objects_dir: &Path, kind: ObjectType, payload: &[u8]) -> ObjectId {
    let oid = ObjectId::from_content(kind, payload);

    let mut content = format!("{} {}\0", kind.as_str(), payload.len()).into_bytes();
    content.extend_from_slice(payload);
    write_raw_object(objects_dir, &oid, &content);

    oid
}

/// Store already formatted object bytes at the path of `oid`, header included
pub(crate) fn write_raw_object(objects_dir: &Path, oid: &ObjectId, content: &[u8]) {
    let path = objects_dir.join(oid.to_path());
    std::fs::create_dir_all(path.parent().expect("object path has a parent"))
        .expect("Failed to create fan-out directory");

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(content).expect("Failed to compress object");
    std::fs::write(path, encoder.finish().expect("Failed to finish compression"))
        .expect("Failed to write object file");
}

pub(crate) fn tree_payload(leaves: &[(&str, &str, &ObjectId)]) -> Vec<u8> {
    let mut payload = Vec::new();
    for (mode, path, oid) in leaves {
        payload.extend_from_slice(format!("{mode} {path}\0").as_bytes());
        payload.extend_from_slice(&oid.to_bytes());
    }
    payload
}

pub(crate) fn commit_payload(tree: &ObjectId, parent: Option<&ObjectId>, message: &str) -> Vec<u8> {
    let mut payload = format!("tree {tree}\n");
    if let Some(parent) = parent {
        payload.push_str(&format!("parent {parent}\n"));
    }
    payload.push_str("author fake_user <fake_email@email.com> 1672574400 +0000\n");
    payload.push_str("committer fake_user <fake_email@email.com> 1672574400 +0000\n");
    payload.push_str(&format!("\n{message}\n"));

    payload.into_bytes()
}
