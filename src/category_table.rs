/// Extension-based category table.
///
/// A `CategoryTable` is an ordered list of categories, each owning a set of
/// lowercase extensions (with the leading dot). Lookups scan the categories in
/// order and return the first one containing the extension. Construction
/// rejects tables where two categories share an extension, so the order only
/// matters for readability.
///
/// # Examples
///
/// ```
/// use foldersort::category_table::CategoryTable;
///
/// let table = CategoryTable::default();
/// assert_eq!(table.classify_extension(".jpg"), Some("Images"));
/// assert_eq!(table.classify_extension(".JPG"), Some("Images"));
/// assert_eq!(table.classify_extension(".unknownext"), None);
/// ```
use std::collections::HashSet;
use std::path::{Component, Path};

/// Name of the bucket that receives files whose extension matches no category.
pub const OTHERS: &str = "Others";

/// Built-in categories, in lookup order.
const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Images",
        &[
            ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp", ".ico", ".tiff",
        ],
    ),
    (
        "Videos",
        &[
            ".mp4", ".avi", ".mkv", ".mov", ".wmv", ".flv", ".webm", ".m4v", ".mpg", ".mpeg",
        ],
    ),
    (
        "Documents",
        &[".pdf", ".doc", ".docx", ".txt", ".odt", ".rtf", ".tex", ".wpd"],
    ),
    ("Spreadsheets", &[".xls", ".xlsx", ".csv", ".ods"]),
    ("Presentations", &[".ppt", ".pptx", ".odp"]),
    (
        "Music",
        &[".mp3", ".wav", ".flac", ".aac", ".ogg", ".wma", ".m4a", ".opus"],
    ),
    ("Archives", &[".zip", ".rar", ".7z", ".tar", ".gz", ".bz2", ".xz"]),
    (
        "Code",
        &[
            ".py", ".js", ".html", ".css", ".cpp", ".java", ".c", ".php", ".json", ".xml", ".yml",
            ".yaml",
        ],
    ),
    (
        "Software",
        &[".exe", ".msi", ".app", ".deb", ".rpm", ".dmg", ".pkg", ".appimage"],
    ),
    ("Installers", &[".iso", ".img", ".bin", ".run"]),
    ("Data", &[".sql", ".db", ".sqlite"]),
    ("Fonts", &[".ttf", ".otf", ".woff", ".woff2", ".eot"]),
    ("Ebooks", &[".epub", ".mobi", ".azw", ".azw3", ".fb2", ".lit"]),
];

/// Errors raised while building a category table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A category has an empty name.
    EmptyCategoryName,
    /// A category uses the name reserved for unmatched files.
    ReservedCategoryName(String),
    /// A category name is not a single directory name (contains a
    /// separator, is `.`/`..`, or is absolute).
    InvalidCategoryName(String),
    /// Two categories share a name.
    DuplicateCategory(String),
    /// A category lists an empty extension.
    EmptyExtension { category: String },
    /// An extension appears in more than one category.
    DuplicateExtension {
        extension: String,
        first: String,
        second: String,
    },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCategoryName => write!(f, "category name must not be empty"),
            Self::ReservedCategoryName(name) => {
                write!(f, "category name '{}' is reserved for unmatched files", name)
            }
            Self::InvalidCategoryName(name) => {
                write!(f, "category name '{}' must be a single folder name", name)
            }
            Self::DuplicateCategory(name) => write!(f, "category '{}' is defined twice", name),
            Self::EmptyExtension { category } => {
                write!(f, "category '{}' lists an empty extension", category)
            }
            Self::DuplicateExtension {
                extension,
                first,
                second,
            } => write!(
                f,
                "extension '{}' is listed in both '{}' and '{}'",
                extension, first, second
            ),
        }
    }
}

impl std::error::Error for TableError {}

/// A named category and the extensions routed to it.
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    extensions: HashSet<String>,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extensions(&self) -> &HashSet<String> {
        &self.extensions
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }
}

/// Ordered, validated mapping from category name to extension set.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    categories: Vec<Category>,
}

impl CategoryTable {
    /// Builds a table from `(name, extensions)` pairs, keeping their order.
    ///
    /// Extensions are lowercased and given a leading dot when missing.
    ///
    /// # Errors
    ///
    /// Fails when a name is empty, duplicated, equal to [`OTHERS`] or not a
    /// plain folder name, when an extension is empty, or when an extension is
    /// listed in two categories.
    pub fn new<N, E, I>(entries: I) -> Result<Self, TableError>
    where
        N: Into<String>,
        E: AsRef<str>,
        I: IntoIterator<Item = (N, Vec<E>)>,
    {
        let mut categories: Vec<Category> = Vec::new();

        for (name, extensions) in entries {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(TableError::EmptyCategoryName);
            }
            if !is_single_component(&name) {
                return Err(TableError::InvalidCategoryName(name));
            }
            if name.eq_ignore_ascii_case(OTHERS) {
                return Err(TableError::ReservedCategoryName(name));
            }
            if categories.iter().any(|c| c.name == name) {
                return Err(TableError::DuplicateCategory(name));
            }

            let mut set = HashSet::new();
            for ext in extensions {
                let ext = normalize_extension(ext.as_ref()).ok_or_else(|| {
                    TableError::EmptyExtension {
                        category: name.clone(),
                    }
                })?;
                if let Some(owner) = categories.iter().find(|c| c.contains(&ext)) {
                    return Err(TableError::DuplicateExtension {
                        extension: ext,
                        first: owner.name.clone(),
                        second: name,
                    });
                }
                set.insert(ext);
            }

            categories.push(Category {
                name,
                extensions: set,
            });
        }

        Ok(Self { categories })
    }

    /// Returns the first category containing `extension`.
    ///
    /// The lookup is case-insensitive and accepts the extension with or
    /// without its leading dot. An empty extension never matches.
    pub fn classify_extension(&self, extension: &str) -> Option<&str> {
        let ext = normalize_extension(extension)?;
        self.lookup(&ext)
    }

    /// Returns the first category containing `extension` exactly as given.
    /// The caller has already lowercased it and added the dot.
    pub fn lookup(&self, extension: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.contains(extension))
            .map(|c| c.name.as_str())
    }

    /// Categories in lookup order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category names in lookup order, without [`OTHERS`].
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        let categories = DEFAULT_CATEGORIES
            .iter()
            .map(|(name, exts)| Category {
                name: (*name).to_string(),
                extensions: exts.iter().map(|e| (*e).to_string()).collect(),
            })
            .collect();
        Self { categories }
    }
}

fn is_single_component(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Lowercases an extension and prefixes it with a dot, trimming surrounding
/// whitespace first. Meant for configured extensions. Returns `None` for an
/// empty extension.
pub fn normalize_extension(extension: &str) -> Option<String> {
    let trimmed = extension.trim();
    let bare = trimmed.strip_prefix('.').unwrap_or(trimmed);
    if bare.is_empty() {
        return None;
    }
    Some(format!(".{}", bare.to_lowercase()))
}
