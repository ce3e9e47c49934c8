use crate::areas::repository::Repository;
use crate::artifacts::branch::{HEAD_REF_NAME, MIN_PREFIX_LENGTH};
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};

/// A name given on the command line: `HEAD`, a branch, a tag, or a full or
/// abbreviated object ID.
///
/// # Resolution rules
///
/// - Names shorter than 4 characters are too ambiguous and never resolve.
/// - `HEAD` resolves through the HEAD ref, following `ref: ` indirection.
/// - 40-character names are taken as complete object IDs, without checking
///   that the object exists.
/// - Anything else is lowercased and matched against the object store as a
///   prefix. Several matches are reported, never silently narrowed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision<'r> {
    name: &'r str,
}

impl<'r> Revision<'r> {
    pub fn new(name: &'r str) -> Self {
        Revision { name }
    }

    /// Every full object ID `name` could stand for, or `None` when it is
    /// unresolvable (too short, or an unborn HEAD)
    pub fn candidates(&self, repository: &Repository) -> Result<Option<Vec<ObjectId>>> {
        if self.name.len() < MIN_PREFIX_LENGTH {
            return Ok(None);
        }

        if self.name == HEAD_REF_NAME {
            return Ok(repository.refs().read_head()?.map(|oid| vec![oid]));
        }

        if self.name.len() == OBJECT_ID_LENGTH {
            return Ok(Some(vec![ObjectId::try_parse(self.name)?]));
        }

        Ok(Some(
            repository
                .database()
                .find_objects_by_prefix(&self.name.to_ascii_lowercase())?,
        ))
    }

    /// The single object `name` stands for
    ///
    /// Fails with [`Error::MultipleResults`] when the name matches more than
    /// one object.
    pub fn find_object(&self, repository: &Repository) -> Result<Option<Object>> {
        match self.single_candidate(repository)? {
            Some(oid) => Ok(Some(repository.database().decode(&oid)?)),
            None => Ok(None),
        }
    }

    /// The object ID a branch or tag of this name points at, falling back to
    /// the single candidate of [`Revision::candidates`]
    pub fn resolve_oid(&self, repository: &Repository) -> Result<Option<ObjectId>> {
        if let Some(branch) = repository.refs().find_by_name(self.name)? {
            return Ok(Some(branch.oid));
        }
        if let Some(tag) = repository.refs().find_tag(self.name)? {
            return Ok(Some(tag.oid));
        }

        self.single_candidate(repository)
    }

    /// [`Revision::resolve_oid`] along with the decoded object
    pub fn resolve(&self, repository: &Repository) -> Result<Option<(ObjectId, Object)>> {
        match self.resolve_oid(repository)? {
            Some(oid) => {
                let object = repository.database().decode(&oid)?;
                Ok(Some((oid, object)))
            }
            None => Ok(None),
        }
    }

    fn single_candidate(&self, repository: &Repository) -> Result<Option<ObjectId>> {
        let mut candidates = self.candidates(repository)?.unwrap_or_default();

        match candidates.len() {
            0 => Ok(None),
            1 => Ok(candidates.pop()),
            _ => Err(Error::MultipleResults {
                name: self.name.to_string(),
                candidates,
            }),
        }
    }
}

impl Repository {
    /// See [`Revision::candidates`]
    pub fn resolve_part(&self, name: &str) -> Result<Option<Vec<ObjectId>>> {
        Revision::new(name).candidates(self)
    }

    /// See [`Revision::find_object`]
    pub fn find_object(&self, name: &str) -> Result<Option<Object>> {
        Revision::new(name).find_object(self)
    }

    /// See [`Revision::resolve_oid`]
    pub fn resolve_oid(&self, name: &str) -> Result<Option<ObjectId>> {
        Revision::new(name).resolve_oid(self)
    }

    /// See [`Revision::resolve`]
    pub fn resolve_revision(&self, name: &str) -> Result<Option<(ObjectId, Object)>> {
        Revision::new(name).resolve(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::object_type::ObjectType;
    use crate::fixtures::{write_loose_object, write_raw_object};
    use assert_fs::TempDir;
    use rstest::{fixture, rstest};

    const FIRST: &str = "abc1230000000000000000000000000000000000";
    const SECOND: &str = "abc4560000000000000000000000000000000000";

    #[fixture]
    fn repository_dir() -> TempDir {
        TempDir::new().expect("Failed to create temp dir")
    }

    /// A repository holding two blobs stored under `ab/c123...` and `ab/c456...`
    #[fixture]
    fn repository(repository_dir: TempDir) -> (TempDir, Repository) {
        let repository = Repository::create(repository_dir.path()).unwrap();
        for (oid, content) in [(FIRST, b"blob 5\0first".as_slice()), (SECOND, b"blob 6\0second".as_slice())] {
            write_raw_object(
                repository.database().objects_path(),
                &ObjectId::try_parse(oid).unwrap(),
                content,
            );
        }

        (repository_dir, repository)
    }

    #[rstest]
    fn test_unique_prefix_has_one_candidate(repository: (TempDir, Repository)) {
        let (_dir, repository) = repository;

        pretty_assertions::assert_eq!(
            repository.resolve_part("abc1").unwrap(),
            Some(vec![ObjectId::try_parse(FIRST).unwrap()])
        );
        pretty_assertions::assert_eq!(
            repository.resolve_part("ABC4").unwrap(),
            Some(vec![ObjectId::try_parse(SECOND).unwrap()])
        );

        let object = repository.find_object("abc1").unwrap().unwrap();
        pretty_assertions::assert_eq!(object.payload().as_ref(), b"first");
    }

    #[rstest]
    #[case("abc")]
    #[case("ab")]
    #[case("")]
    fn test_names_below_four_characters_never_resolve(
        repository: (TempDir, Repository),
        #[case] name: &str,
    ) {
        let (_dir, repository) = repository;

        pretty_assertions::assert_eq!(repository.resolve_part(name).unwrap(), None);
        assert!(repository.find_object(name).unwrap().is_none());
    }

    #[rstest]
    fn test_ambiguous_prefix_reports_every_candidate(repository: (TempDir, Repository)) {
        let (_dir, repository) = repository;
        let third = ObjectId::try_parse("abc1239999999999999999999999999999999999").unwrap();
        write_raw_object(repository.database().objects_path(), &third, b"blob 0\0");

        pretty_assertions::assert_eq!(repository.resolve_part("abc123").unwrap().map(|c| c.len()), Some(2));

        match repository.find_object("abc123") {
            Err(Error::MultipleResults { name, candidates }) => {
                pretty_assertions::assert_eq!(name, "abc123");
                pretty_assertions::assert_eq!(candidates, vec![ObjectId::try_parse(FIRST).unwrap(), third]);
            }
            other => panic!("expected MultipleResults, got {other:?}"),
        }
    }

    #[rstest]
    fn test_unknown_prefix_is_not_found(repository: (TempDir, Repository)) {
        let (_dir, repository) = repository;

        pretty_assertions::assert_eq!(repository.resolve_part("def0").unwrap(), Some(vec![]));
        assert!(repository.find_object("def0").unwrap().is_none());
        assert!(repository.find_object("not-hex").unwrap().is_none());
    }

    #[rstest]
    fn test_full_object_id_is_taken_verbatim(repository: (TempDir, Repository)) {
        let (_dir, repository) = repository;
        let absent = ObjectId::from_content(ObjectType::Blob, b"absent");

        pretty_assertions::assert_eq!(
            repository.resolve_part(absent.as_ref()).unwrap(),
            Some(vec![absent.clone()])
        );
        assert!(matches!(
            repository.find_object(absent.as_ref()),
            Err(Error::BadFile { .. })
        ));
    }

    #[rstest]
    fn test_head_resolves_through_current_branch(repository: (TempDir, Repository)) {
        let (_dir, repository) = repository;
        pretty_assertions::assert_eq!(repository.resolve_part("HEAD").unwrap(), None);

        let blob = write_loose_object(repository.database().objects_path(), ObjectType::Blob, b"tip");
        std::fs::write(repository.refs().heads_path().join("master"), format!("{blob}\n")).unwrap();

        pretty_assertions::assert_eq!(repository.resolve_part("HEAD").unwrap(), Some(vec![blob.clone()]));
        let (oid, object) = repository.resolve_revision("master").unwrap().unwrap();
        pretty_assertions::assert_eq!(oid, blob);
        pretty_assertions::assert_eq!(object.payload().as_ref(), b"tip");
    }

    #[rstest]
    fn test_resolve_revision_prefers_refs_over_prefixes(repository: (TempDir, Repository)) {
        let (_dir, repository) = repository;
        std::fs::write(repository.refs().tags_path().join("abc1"), format!("{SECOND}\n")).unwrap();

        let (oid, _) = repository.resolve_revision("abc1").unwrap().unwrap();

        pretty_assertions::assert_eq!(oid.as_ref(), SECOND);
        pretty_assertions::assert_eq!(repository.resolve_oid("abc1").unwrap(), Some(oid));
    }

    #[rstest]
    fn test_resolve_oid_follows_branches_then_prefixes(repository: (TempDir, Repository)) {
        let (_dir, repository) = repository;
        std::fs::write(repository.refs().heads_path().join("topic"), format!("{FIRST}\n")).unwrap();

        pretty_assertions::assert_eq!(
            repository.resolve_oid("topic").unwrap(),
            Some(ObjectId::try_parse(FIRST).unwrap())
        );
        pretty_assertions::assert_eq!(
            repository.resolve_oid("ABC4").unwrap(),
            Some(ObjectId::try_parse(SECOND).unwrap())
        );
        pretty_assertions::assert_eq!(repository.resolve_oid("def0").unwrap(), None);
        pretty_assertions::assert_eq!(repository.resolve_oid("abc").unwrap(), None);
    }

    #[rstest]
    fn test_resolve_oid_reports_ambiguity(repository: (TempDir, Repository)) {
        let (_dir, repository) = repository;
        let third = ObjectId::try_parse("abc4569999999999999999999999999999999999").unwrap();
        write_raw_object(repository.database().objects_path(), &third, b"blob 0\0");

        assert!(matches!(
            repository.resolve_oid("abc456"),
            Err(Error::MultipleResults { candidates, .. }) if candidates.len() == 2
        ));
    }
}
