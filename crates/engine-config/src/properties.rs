use crate::{
    error::ConfigError,
    locate::{self, PROPERTIES_FILE},
};
use std::{collections::HashMap, fs, path::Path};
use tracing::{debug, info, warn};

/// Flat key/value configuration loaded from `application.properties`.
///
/// Loaded once per invocation and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    inner: HashMap<String, String>,
}

impl Properties {
    /// Loads the first `application.properties` found beside the executable.
    pub fn load() -> Result<Self, ConfigError> {
        let searched = locate::candidates();
        match searched.iter().find(|path| path.is_file()) {
            Some(path) => Self::from_file(path),
            None => {
                debug!(?searched, "No {} found", PROPERTIES_FILE);
                Err(ConfigError::Missing {
                    file_name: PROPERTIES_FILE.to_string(),
                    searched,
                })
            }
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| PROPERTIES_FILE.to_string());

        if !path.exists() {
            return Err(ConfigError::Missing {
                file_name,
                searched: vec![path.to_path_buf()],
            });
        }

        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Unreadable { file_name, source })?;

        let properties = Self::parse(&content);
        info!(
            "Loaded {} properties from {}",
            properties.len(),
            path.display()
        );
        Ok(properties)
    }

    /// Parses the `.properties` format: `key=value`, `key: value` or
    /// `key value`, `#`/`!` comments, backslash escapes and lines continued
    /// with a trailing `\`. Later keys override earlier ones.
    pub fn parse(content: &str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut inner = HashMap::new();

        for (line_num, line) in logical_lines(content) {
            let (key, value) = split_entry(&line);

            if key.is_empty() {
                warn!("Ignoring property with empty key at line {}", line_num);
                continue;
            }

            inner.insert(key, value);
        }

        Self { inner }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    /// Checks that every key is set, reporting all missing keys at once.
    pub fn require<'k, I>(&self, keys: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = &'k str>,
    {
        let missing: Vec<&str> = keys
            .into_iter()
            .filter(|key| !self.inner.contains_key(*key))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::incomplete(missing))
        }
    }

    pub fn require_one(&self, key: &str) -> Result<&str, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::incomplete([key]))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

const BLANK: [char; 3] = [' ', '\t', '\u{c}'];

/// Joins continued lines and drops blanks and comments. Each entry carries
/// the 1-based number of the line it starts on.
fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim_start_matches(BLANK);

        let (line_num, mut buf) = match pending.take() {
            Some(open) => open,
            None if line.is_empty() || line.starts_with(['#', '!']) => continue,
            None => (idx + 1, String::new()),
        };

        if is_continued(line) {
            buf.push_str(&line[..line.len() - 1]);
            pending = Some((line_num, buf));
        } else {
            buf.push_str(line);
            lines.push((line_num, buf));
        }
    }

    // A continuation on the last line just ends the entry.
    lines.extend(pending);
    lines
}

/// An odd number of trailing backslashes escapes the line break.
fn is_continued(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Splits at the first unescaped `=`, `:` or blank. A blank separator may be
/// followed by one `=` or `:`.
fn split_entry(line: &str) -> (String, String) {
    let mut key_end = line.len();
    let mut blank_separator = false;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                break;
            }
            ' ' | '\t' | '\u{c}' => {
                key_end = i;
                blank_separator = true;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = &line[key_end..];
    if blank_separator {
        rest = rest.trim_start_matches(BLANK);
        if let Some(after) = rest.strip_prefix(['=', ':']) {
            rest = after;
        }
    } else if !rest.is_empty() {
        rest = &rest[1..];
    }

    (unescape(key), unescape(rest.trim_start_matches(BLANK)))
}

/// Resolves `\t`, `\n`, `\r`, `\f`, `\uXXXX`; any other escaped character
/// stands for itself.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        debug!("Keeping malformed escape \\u{}", hex);
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}
