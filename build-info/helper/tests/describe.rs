use mockall::{mock, predicate::eq};
use verstamp_build_info_helper::{
    DescribeQuery, Error, Generator, GitQuery, describe_repository, render_artifact,
};

mock! {
    Git {}
    impl GitQuery for Git {
        fn describe(&self, query: DescribeQuery) -> Result<String, Error>;
    }
}

fn git_answering(description: &'static str, hash: &'static str) -> MockGit {
    let mut git = MockGit::new();
    git.expect_describe()
        .with(eq(DescribeQuery::Description))
        .returning(move |_| Ok(description.to_owned()));
    git.expect_describe()
        .with(eq(DescribeQuery::FullHash))
        .returning(move |_| Ok(hash.to_owned()));
    git
}

#[test]
fn describes_a_clean_checkout() {
    let git = git_answering(
        "v0.1-3-g8ef01d3",
        "8ef01d3fbcde1ef46305f784a9cbe543e854a53e",
    );
    let d = describe_repository(&git).unwrap();

    assert_eq!(d.raw_description, "v0.1-3-g8ef01d3");
    assert_eq!(d.raw_hash, "8ef01d3fbcde1ef46305f784a9cbe543e854a53e");
    assert_eq!(d.package(), "0.1.3");
    assert!(!d.version.dirty);
}

#[test]
fn describes_a_dirty_checkout() {
    let git = git_answering(
        "v0.1-5-g23b104b-dirty",
        "23b104b091e418b62fde9db580d7d458713f9c64-dirty",
    );
    let d = describe_repository(&git).unwrap();

    assert_eq!(d.package(), "0.1.5-dirty");
    assert!(d.raw_hash.ends_with("-dirty"));
}

#[test]
fn untagged_hash_leaves_components_blank() {
    let git = git_answering("abcdefa", "abcdefabcdefabcdefabcdefabcdefabcdefabcd");
    let d = describe_repository(&git).unwrap();

    assert_eq!(d.version.major, None);
    assert_eq!(d.version.minor, None);
    assert_eq!(d.version.patch, None);
    assert_eq!(d.package(), "..");
}

#[test]
fn missing_git_is_propagated() {
    let mut git = MockGit::new();
    git.expect_describe().times(1).returning(|_| {
        Err(Error::GitNotFound {
            program: "git".into(),
            source: std::io::ErrorKind::NotFound.into(),
        })
    });

    let err = describe_repository(&git).unwrap_err();
    assert!(matches!(err, Error::GitNotFound { .. }), "{err:?}");
}

#[test]
fn generating_twice_writes_once() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("version_info.rs");
    let generator = Generator::new(git_answering(
        "v0.1-3-g8ef01d3",
        "8ef01d3fbcde1ef46305f784a9cbe543e854a53e",
    ));

    let first = generator.generate(&out).unwrap();
    assert!(first.written);
    let second = generator.generate(&out).unwrap();
    assert!(!second.written);

    assert_eq!(first.descriptor, second.descriptor);
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        render_artifact(&first.descriptor)
    );
}
