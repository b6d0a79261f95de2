use std::path::PathBuf;
use std::{env, fs};

use crate::annotations::{self, AnnotationRecord};
use crate::config::Config;
use crate::error::{DhsdError, DhsdResult};

pub(crate) struct Dataset {
    /// The root directory of the dataset.
    root_dir: PathBuf,
}

impl Dataset {
    pub(crate) const CONFIG: &'static str = "dhsd.toml";
    pub(crate) const ANNOTATIONS: &'static str = "data.csv";
    pub(crate) const IMAGE_DIR: &'static str = "german_hw_data";
    pub(crate) const TRAIN: &'static str = "train.csv";
    pub(crate) const TEST: &'static str = "test.csv";

    /// Discovers the root of the dataset.
    ///
    /// This function fails, if neither the current directory nor any
    /// parent directory contains a dataset [Config].
    pub(crate) fn discover() -> DhsdResult<Self> {
        let mut root_dir = env::current_dir()?;

        loop {
            if let Ok(metadata) =
                fs::metadata(root_dir.join(Self::CONFIG))
            {
                if metadata.is_file() {
                    break;
                }
            }

            if !root_dir.pop() {
                return Err(DhsdError::Other(
                    "not a dataset (or any parent directory)".into(),
                ));
            }
        }

        Ok(Self { root_dir })
    }

    /// Returns the config associated with the dataset.
    #[inline]
    pub(crate) fn config(&self) -> DhsdResult<Config> {
        Config::from_path(self.root_dir.join(Self::CONFIG))
    }

    /// Returns the base directory of the dataset.
    #[inline]
    pub(crate) fn base_dir(&self) -> &PathBuf {
        &self.root_dir
    }

    /// Returns the image directory of the dataset.
    #[inline]
    pub(crate) fn image_dir(&self) -> PathBuf {
        self.root_dir.join(Self::IMAGE_DIR)
    }

    /// Reads the annotation table associated with the dataset.
    #[inline]
    pub(crate) fn annotations(
        &self,
    ) -> DhsdResult<Vec<AnnotationRecord>> {
        annotations::read_annotations(
            self.root_dir.join(Self::ANNOTATIONS),
        )
    }
}
