use std::path::Path;

#[inline]
pub(crate) fn relpath<P1, P2>(path: P1, prefix: P2) -> String
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    path.as_ref()
        .strip_prefix(prefix)
        .expect("valid prefix")
        .to_str()
        .unwrap()
        .into()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::relpath;

    #[test]
    fn relpath_ok() {
        let path =
            PathBuf::from("/home/foo/german_hw_data/0001.png");
        let prefix = PathBuf::from("/home/foo");
        assert_eq!(relpath(path, prefix), "german_hw_data/0001.png");
    }

    #[test]
    #[should_panic]
    fn relpath_panic() {
        let path =
            PathBuf::from("/home/foo/german_hw_data/0001.png");
        let prefix = PathBuf::from("/home/bar");
        let _ = relpath(path, prefix);
    }
}
