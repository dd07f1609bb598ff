//! Classpath helpers.

/// Separator between classpath entries on this platform.
pub const CLASSPATH_SEPARATOR: &str = if cfg!(windows) { ";" } else { ":" };

/// Join classpath entries with [`CLASSPATH_SEPARATOR`].
pub fn join_classpath<I, S>(entries: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|e| e.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(CLASSPATH_SEPARATOR)
}
