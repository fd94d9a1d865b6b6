use core::fmt::Display;

use percent_encoding::percent_decode_str;

use crate::prelude_internal::*;

/// Location of a value inside a document, as a sequence of keys and indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Plural)]
#[plural(len, is_empty, iter, into_iter, into_iter_ref, new)]
pub struct DocumentPath(Vec<PathSegment>);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Mapping key
    Key(String),
    /// Sequence element
    Index(usize),
}

impl DocumentPath {
    /// Create an empty path representing the document root
    pub fn root() -> Self {
        DocumentPath(Vec::new())
    }

    /// Check if this is the root path
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn join(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        DocumentPath(segments)
    }

    pub fn join_key(&self, key: impl Into<String>) -> Self {
        self.join(PathSegment::Key(key.into()))
    }

    pub fn join_index(&self, index: usize) -> Self {
        self.join(PathSegment::Index(index))
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    /// Parse the fragment part of a JSON pointer (without the leading `#`).
    ///
    /// The empty string is the root; otherwise every segment is introduced by
    /// `/` and may use the `~0` (`~`) and `~1` (`/`) escapes. Segments are
    /// percent-decoded first, as the fragment is part of a URI.
    pub fn from_pointer(pointer: &str) -> Result<Self, PointerError> {
        if pointer.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            return Err(PointerError::MissingLeadingSlash {
                pointer: pointer.to_string(),
            });
        };
        rest.split('/')
            .map(|raw| {
                let decoded = percent_decode_str(raw).decode_utf8().map_err(|_| {
                    PointerError::InvalidPercentEncoding {
                        pointer: pointer.to_string(),
                    }
                })?;
                unescape(&decoded)
                    .map(PathSegment::Key)
                    .ok_or_else(|| PointerError::InvalidEscape {
                        pointer: pointer.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(DocumentPath)
    }

    /// Render as a JSON pointer fragment without the leading `#`.
    pub fn to_pointer(&self) -> String {
        self.0
            .iter()
            .map(|segment| match segment {
                PathSegment::Key(key) => format!("/{}", escape(key)),
                PathSegment::Index(index) => format!("/{index}"),
            })
            .collect()
    }
}

fn escape(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

impl Display for DocumentPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "#/");
        }
        write!(f, "#{}", self.to_pointer())
    }
}

impl FromIterator<PathSegment> for DocumentPath {
    fn from_iter<T: IntoIterator<Item = PathSegment>>(iter: T) -> Self {
        DocumentPath(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_root() {
        assert_eq!(DocumentPath::root().to_string(), "#/");
    }

    #[test]
    fn test_display_escapes_slashes_and_tildes() {
        let path = DocumentPath::root()
            .join_key("paths")
            .join_key("/pets/{id}")
            .join_key("a~b");
        assert_eq!(path.to_string(), "#/paths/~1pets~1{id}/a~0b");
    }

    #[test]
    fn test_display_index() {
        let path = DocumentPath::root().join_key("tags").join_index(2);
        assert_eq!(path.to_string(), "#/tags/2");
    }

    #[test]
    fn test_from_pointer_unescapes() {
        let path = DocumentPath::from_pointer("/paths/~1pets/get").unwrap();
        assert_eq!(
            path,
            DocumentPath::from_iter([
                PathSegment::Key("paths".into()),
                PathSegment::Key("/pets".into()),
                PathSegment::Key("get".into()),
            ])
        );
    }

    #[test]
    fn test_from_pointer_percent_decodes() {
        let path = DocumentPath::from_pointer("/paths/~1pets~1%7Bid%7D").unwrap();
        assert_eq!(path.last(), Some(&PathSegment::Key("/pets/{id}".into())));

        let path = DocumentPath::from_pointer("/my%20schema").unwrap();
        assert_eq!(path.last(), Some(&PathSegment::Key("my schema".into())));
    }

    #[test]
    fn test_from_pointer_decodes_before_unescaping() {
        // `%7E1` is a literal `~1` escape, not a percent-encoded slash
        let path = DocumentPath::from_pointer("/a%7E1b").unwrap();
        assert_eq!(path.last(), Some(&PathSegment::Key("a/b".into())));
    }

    #[test]
    fn test_from_pointer_rejects_invalid_utf8() {
        assert!(matches!(
            DocumentPath::from_pointer("/%FF"),
            Err(PointerError::InvalidPercentEncoding { .. })
        ));
    }

    #[test]
    fn test_from_pointer_empty_is_root() {
        assert!(DocumentPath::from_pointer("").unwrap().is_root());
    }

    #[test]
    fn test_from_pointer_keeps_empty_segments() {
        let path = DocumentPath::from_pointer("/a/").unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.last(), Some(&PathSegment::Key(String::new())));
    }

    #[test]
    fn test_from_pointer_requires_leading_slash() {
        assert_eq!(
            DocumentPath::from_pointer("components/schemas"),
            Err(PointerError::MissingLeadingSlash {
                pointer: "components/schemas".to_string()
            })
        );
    }

    #[test]
    fn test_from_pointer_rejects_bad_escape() {
        assert!(matches!(
            DocumentPath::from_pointer("/a~2b"),
            Err(PointerError::InvalidEscape { .. })
        ));
        assert!(matches!(
            DocumentPath::from_pointer("/trailing~"),
            Err(PointerError::InvalidEscape { .. })
        ));
    }

    #[test]
    fn test_pointer_round_trip_of_awkward_key() {
        let path = DocumentPath::root().join_key("~/x");
        let parsed = DocumentPath::from_pointer(&path.to_pointer()).unwrap();
        assert_eq!(parsed, path);
    }
}
