use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

/// A variable that is set but cannot be read as a string.
#[derive(Debug, Error)]
#[error("env var [{key}] is set but not valid unicode: '{lossy}'")]
pub struct InvalidUnicode {
    pub key: String,
    pub lossy: String,
}

/// Read-only key/value store that variables are resolved from.
///
/// `Ok(None)` means the key is not set. A set key whose value cannot be
/// read is an error, never `None`.
pub trait EnvSource {
    fn get(&self, key: &str) -> Result<Option<String>, InvalidUnicode>;
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Result<Option<String>, InvalidUnicode> {
        match std::env::var_os(key) {
            None => Ok(None),
            Some(raw) => raw.into_string().map(Some).map_err(|raw| InvalidUnicode {
                key: key.to_string(),
                lossy: raw.to_string_lossy().into_owned(),
            }),
        }
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Result<Option<String>, InvalidUnicode> {
        Ok(HashMap::get(self, key).cloned())
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Result<Option<String>, InvalidUnicode> {
        Ok(BTreeMap::get(self, key).cloned())
    }
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn get(&self, key: &str) -> Result<Option<String>, InvalidUnicode> {
        (**self).get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_sources() {
        let map: HashMap<String, String> = [("KEY".to_string(), "val".to_string())].into();
        assert_eq!(EnvSource::get(&map, "KEY").unwrap(), Some("val".to_string()));
        assert_eq!(EnvSource::get(&map, "OTHER").unwrap(), None);

        let map: BTreeMap<String, String> = map.into_iter().collect();
        assert_eq!(EnvSource::get(&map, "KEY").unwrap(), Some("val".to_string()));
    }

    #[test]
    fn test_process_env() {
        std::env::set_var("ENVRULES_SOURCE_TEST_KEY", "from-process");
        assert_eq!(
            ProcessEnv.get("ENVRULES_SOURCE_TEST_KEY").unwrap(),
            Some("from-process".to_string())
        );
        assert_eq!(ProcessEnv.get("ENVRULES_SOURCE_TEST_MISSING").unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_process_env_non_unicode_is_an_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        std::env::set_var("ENVRULES_SOURCE_TEST_NON_UTF8", OsStr::from_bytes(b"f\xff"));
        let err = ProcessEnv.get("ENVRULES_SOURCE_TEST_NON_UTF8").unwrap_err();
        assert_eq!(err.key, "ENVRULES_SOURCE_TEST_NON_UTF8");
        assert!(err.lossy.starts_with('f'));
    }
}
