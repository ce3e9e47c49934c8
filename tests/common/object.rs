use grit::artifacts::objects::object_id::ObjectId;
use grit::artifacts::objects::object_type::ObjectType;
use std::io::Write;
use std::path::Path;

/// Store `payload` as a zlib-compressed loose object below `repository/.git/objects`
pub fn write_object(repository: &Path, kind: ObjectType, payload: &[u8]) -> ObjectId {
    let oid = ObjectId::from_content(kind, payload);

    let mut content = format!("{} {}\0", kind, payload.len()).into_bytes();
    content.extend_from_slice(payload);
    write_raw_object(repository, &oid, &content);

    oid
}

pub fn write_raw_object(repository: &Path, oid: &ObjectId, content: &[u8]) {
    let path = repository.join(".git").join("objects").join(oid.to_path());
    std::fs::create_dir_all(path.parent().expect("object path has a parent"))
        .expect("Failed to create fan-out directory");

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(content).expect("Failed to compress object");
    std::fs::write(path, encoder.finish().expect("Failed to finish compression"))
        .expect("Failed to write object file");
}

pub fn write_tree(repository: &Path, leaves: &[(&str, &str, &ObjectId)]) -> ObjectId {
    let mut payload = Vec::new();
    for (mode, name, oid) in leaves {
        payload.extend_from_slice(format!("{mode} {name}\0").as_bytes());
        payload.extend_from_slice(&oid.to_bytes());
    }

    write_object(repository, ObjectType::Tree, &payload)
}

pub fn write_commit(repository: &Path, tree: &ObjectId, message: &str) -> ObjectId {
    let payload = format!(
        "tree {tree}\n\
         author fake_user <fake_email@email.com> 1672574400 +0000\n\
         committer fake_user <fake_email@email.com> 1672574400 +0000\n\
         \n\
         {message}\n"
    );

    write_object(repository, ObjectType::Commit, payload.as_bytes())
}

/// Point `refs/heads/<branch>` at `oid`
pub fn write_branch(repository: &Path, branch: &str, oid: &ObjectId) {
    let path = repository.join(".git").join("refs").join("heads").join(branch);
    std::fs::create_dir_all(path.parent().expect("ref path has a parent"))
        .expect("Failed to create ref directory");
    std::fs::write(path, format!("{oid}\n")).expect("Failed to write ref");
}
