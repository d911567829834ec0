/// Classification and relocation of the files in a single directory.
///
/// The organizer lists the direct children of a target directory once,
/// classifies every file by extension through a [`CategoryTable`] and moves it
/// into `target/<category>/`, or `target/Others/` when nothing matches.
/// Existing destinations are never overwritten: a numeric suffix is added
/// before the extension instead (`name_1.ext`, `name_2.ext`, ...).
use crate::category_table::{CategoryTable, OTHERS};
use crate::config::CompiledFilters;
use crate::mover::{FileMover, FsMover};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that abort an organization run.
#[derive(Debug)]
pub enum OrganizeError {
    /// The target does not exist or is not a directory.
    InvalidTarget {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The target directory could not be listed.
    ScanFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to create a category directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTarget { path, source } => {
                write!(f, "Invalid target {}: {}", path.display(), source)
            }
            Self::ScanFailed { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for OrganizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidTarget { source, .. }
            | Self::ScanFailed { source, .. }
            | Self::DirectoryCreationFailed { source, .. } => Some(source),
        }
    }
}

/// Result type for organization runs.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// A direct child of the target directory.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    /// Lowercased, with the leading dot. `None` when the name has no extension.
    pub extension: Option<String>,
    pub is_dir: bool,
    pub hidden: bool,
}

impl Entry {
    /// Describes the child at `path`. Symlinks are followed for the
    /// directory check.
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .and_then(|e| entry_extension(&e.to_string_lossy()));
        let is_dir = path.is_dir();
        let hidden = name.starts_with('.') && name != ".";

        Self {
            name,
            path,
            extension,
            is_dir,
            hidden,
        }
    }
}

/// Lowercases an on-disk extension and adds the dot. Whitespace is part of
/// the extension, so `photo. JPG` yields `. jpg` and matches no category.
fn entry_extension(extension: &str) -> Option<String> {
    if extension.is_empty() {
        return None;
    }
    Some(format!(".{}", extension.to_lowercase()))
}

/// Why a file was left in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The name starts with a dot.
    Hidden,
    /// The file matched a configured exclusion rule.
    Excluded,
}

/// What happened to one reported file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Moved {
        source: PathBuf,
        destination: PathBuf,
        category: String,
    },
    Failed {
        source: PathBuf,
        destination: PathBuf,
        category: String,
        reason: String,
    },
    Skipped {
        source: PathBuf,
        reason: SkipReason,
    },
}

impl FileOutcome {
    pub fn source(&self) -> &Path {
        match self {
            Self::Moved { source, .. }
            | Self::Failed { source, .. }
            | Self::Skipped { source, .. } => source,
        }
    }
}

/// Number of files moved into one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Summary of an organization run.
#[derive(Debug, Clone, Serialize)]
pub struct MoveResult {
    pub moved_count: usize,
    /// Hidden files left in place.
    pub skipped_count: usize,
    /// Files left in place by exclusion rules.
    pub excluded_count: usize,
    pub failed_count: usize,
    /// Every table category in order, then `Others`, zero counts included.
    pub per_category_count: Vec<CategoryCount>,
    /// Category directories created by this run, in table order.
    pub newly_created_categories: Vec<String>,
    pub outcomes: Vec<FileOutcome>,
    /// When set, nothing on disk was changed and every count is a prediction.
    pub dry_run: bool,
}

impl MoveResult {
    fn new(table: &CategoryTable, dry_run: bool) -> Self {
        let per_category_count = table
            .names()
            .chain(std::iter::once(OTHERS))
            .map(|name| CategoryCount {
                category: name.to_string(),
                count: 0,
            })
            .collect();

        Self {
            moved_count: 0,
            skipped_count: 0,
            excluded_count: 0,
            failed_count: 0,
            per_category_count,
            newly_created_categories: Vec::new(),
            outcomes: Vec::new(),
            dry_run,
        }
    }

    /// Files moved into `category` (or `Others`).
    pub fn count_for(&self, category: &str) -> usize {
        self.per_category_count
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.count)
    }

    /// Buckets that received at least one file, in table order.
    pub fn nonzero_counts(&self) -> impl Iterator<Item = &CategoryCount> {
        self.per_category_count.iter().filter(|c| c.count > 0)
    }

    fn record_move(&mut self, category: &str) {
        self.moved_count += 1;
        if let Some(bucket) = self
            .per_category_count
            .iter_mut()
            .find(|c| c.category == category)
        {
            bucket.count += 1;
        }
    }
}

/// Receives progress notifications during a run.
pub trait OrganizeProgress {
    /// Called once after listing, with the number of files that will produce
    /// an outcome.
    fn on_scan(&mut self, _candidates: usize) {}

    /// Called for every moved, failed or skipped file.
    fn on_outcome(&mut self, _outcome: &FileOutcome) {}
}

/// Progress observer that ignores everything.
pub struct NoProgress;

impl OrganizeProgress for NoProgress {}

/// Sorts the files of a directory into category subdirectories.
///
/// # Examples
///
/// ```no_run
/// use foldersort::category_table::CategoryTable;
/// use foldersort::organizer::Organizer;
/// use std::path::Path;
///
/// let organizer = Organizer::new(CategoryTable::default());
/// match organizer.organize(Path::new("/home/user/Downloads")) {
///     Ok(result) => println!("Moved {} files", result.moved_count),
///     Err(e) => eprintln!("Organization failed: {}", e),
/// }
/// ```
pub struct Organizer<M = FsMover> {
    table: CategoryTable,
    filters: CompiledFilters,
    mover: M,
    dry_run: bool,
}

impl Organizer<FsMover> {
    /// Creates an organizer that moves files on the local filesystem.
    pub fn new(table: CategoryTable) -> Self {
        Self::with_mover(table, FsMover)
    }
}

impl<M: FileMover> Organizer<M> {
    /// Creates an organizer using a custom move primitive.
    pub fn with_mover(table: CategoryTable, mover: M) -> Self {
        Self {
            table,
            filters: CompiledFilters::default(),
            mover,
            dry_run: false,
        }
    }

    /// Leaves files matched by `filters` in place.
    pub fn filters(mut self, filters: CompiledFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Plans the run without touching the filesystem.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Category of `entry`, or `None` when its extension matches nothing or
    /// it has no extension at all.
    pub fn classify(&self, entry: &Entry) -> Option<&str> {
        entry
            .extension
            .as_deref()
            .and_then(|ext| self.table.lookup(ext))
    }

    /// Organizes `target_dir` without progress reporting.
    pub fn organize(&self, target_dir: &Path) -> OrganizeResult<MoveResult> {
        self.organize_with_progress(target_dir, &mut NoProgress)
    }

    /// Organizes `target_dir`, reporting progress to `progress`.
    ///
    /// Fails before touching anything when the target is invalid or cannot
    /// be listed, and aborts when a category directory cannot be created.
    /// A failed file move is recorded in the result and the run continues.
    pub fn organize_with_progress<P: OrganizeProgress + ?Sized>(
        &self,
        target_dir: &Path,
        progress: &mut P,
    ) -> OrganizeResult<MoveResult> {
        validate_target(target_dir)?;
        let entries = scan_entries(target_dir)?;

        let mut result = MoveResult::new(&self.table, self.dry_run);
        result.newly_created_categories = if self.dry_run {
            missing_categories(target_dir, &self.table)
        } else {
            ensure_category_directories(target_dir, &self.table)?
        };

        progress.on_scan(entries.iter().filter(|e| self.is_reported(e)).count());

        let mut planned: HashSet<PathBuf> = HashSet::new();

        for entry in &entries {
            if entry.is_dir {
                continue;
            }

            if entry.hidden {
                debug!("skipping hidden file {}", entry.path.display());
                result.skipped_count += 1;
                self.report(
                    &mut result,
                    progress,
                    FileOutcome::Skipped {
                        source: entry.path.clone(),
                        reason: SkipReason::Hidden,
                    },
                );
                continue;
            }

            if self
                .filters
                .is_excluded(&entry.name, entry.extension.as_deref())
            {
                debug!("excluded by configuration: {}", entry.path.display());
                result.excluded_count += 1;
                self.report(
                    &mut result,
                    progress,
                    FileOutcome::Skipped {
                        source: entry.path.clone(),
                        reason: SkipReason::Excluded,
                    },
                );
                continue;
            }

            if entry.extension.is_none() {
                debug!("leaving {} in place: no extension", entry.path.display());
                continue;
            }

            let category = self.classify(entry).unwrap_or(OTHERS).to_string();
            let Some(file_name) = entry.path.file_name() else {
                continue;
            };
            let destination = resolve_collision(&target_dir.join(&category).join(file_name), |p| {
                p.exists() || planned.contains(p)
            });

            let outcome = if self.dry_run {
                planned.insert(destination.clone());
                result.record_move(&category);
                FileOutcome::Moved {
                    source: entry.path.clone(),
                    destination,
                    category,
                }
            } else {
                match self.mover.move_file(&entry.path, &destination) {
                    Ok(()) => {
                        info!(
                            "moved {} -> {}",
                            entry.path.display(),
                            destination.display()
                        );
                        result.record_move(&category);
                        FileOutcome::Moved {
                            source: entry.path.clone(),
                            destination,
                            category,
                        }
                    }
                    Err(e) => {
                        warn!(
                            "failed to move {} -> {}: {}",
                            entry.path.display(),
                            destination.display(),
                            e
                        );
                        result.failed_count += 1;
                        FileOutcome::Failed {
                            source: entry.path.clone(),
                            destination,
                            category,
                            reason: e.to_string(),
                        }
                    }
                }
            };

            self.report(&mut result, progress, outcome);
        }

        Ok(result)
    }

    /// Whether `entry` ends up in the outcomes. Directories and files
    /// without an extension are passed over silently.
    fn is_reported(&self, entry: &Entry) -> bool {
        !entry.is_dir
            && (entry.hidden
                || entry.extension.is_some()
                || self
                    .filters
                    .is_excluded(&entry.name, entry.extension.as_deref()))
    }

    fn report<P: OrganizeProgress + ?Sized>(
        &self,
        result: &mut MoveResult,
        progress: &mut P,
        outcome: FileOutcome,
    ) {
        progress.on_outcome(&outcome);
        result.outcomes.push(outcome);
    }
}

/// Checks that `target_dir` exists and is a directory.
pub fn validate_target(target_dir: &Path) -> OrganizeResult<()> {
    let metadata = fs::metadata(target_dir).map_err(|e| OrganizeError::InvalidTarget {
        path: target_dir.to_path_buf(),
        source: e,
    })?;

    if !metadata.is_dir() {
        return Err(OrganizeError::InvalidTarget {
            path: target_dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        });
    }

    Ok(())
}

/// Lists the direct children of `target_dir`, sorted by name.
pub fn scan_entries(target_dir: &Path) -> OrganizeResult<Vec<Entry>> {
    let read_dir = fs::read_dir(target_dir).map_err(|e| OrganizeError::ScanFailed {
        path: target_dir.to_path_buf(),
        source: e,
    })?;

    let mut entries: Vec<Entry> = read_dir
        .filter_map(|entry| match entry {
            Ok(entry) => Some(Entry::from_path(entry.path())),
            Err(e) => {
                warn!("skipping unreadable entry in {}: {}", target_dir.display(), e);
                None
            }
        })
        .collect();
    entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));

    Ok(entries)
}

/// Creates every missing category directory plus `Others`.
///
/// Returns the names of the table categories that were created, in table
/// order. `Others` is created when missing but never listed.
pub fn ensure_category_directories(
    target_dir: &Path,
    table: &CategoryTable,
) -> OrganizeResult<Vec<String>> {
    let mut created = Vec::new();

    for name in table.names() {
        if create_if_missing(&target_dir.join(name))? {
            created.push(name.to_string());
        }
    }
    create_if_missing(&target_dir.join(OTHERS))?;

    Ok(created)
}

/// Table categories whose directory does not exist yet.
fn missing_categories(target_dir: &Path, table: &CategoryTable) -> Vec<String> {
    table
        .names()
        .filter(|name| !target_dir.join(name).exists())
        .map(str::to_string)
        .collect()
}

fn create_if_missing(path: &Path) -> OrganizeResult<bool> {
    if path.exists() {
        return Ok(false);
    }

    match fs::create_dir(path) {
        Ok(()) => {
            debug!("created directory {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(OrganizeError::DirectoryCreationFailed {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Returns `destination` if it is free, otherwise the first free
/// `{stem}_{n}{ext}` sibling with `n >= 1`. The suffixed name carries the
/// lowercased extension (`Photo.JPG` becomes `Photo_1.jpg`).
///
/// `taken` decides whether a candidate path is occupied.
pub fn resolve_collision<F>(destination: &Path, taken: F) -> PathBuf
where
    F: Fn(&Path) -> bool,
{
    if !taken(destination) {
        return destination.to_path_buf();
    }

    let stem = destination.file_stem().unwrap_or_default();
    let extension = destination
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());

    let mut n: u64 = 1;
    loop {
        let mut name = OsString::from(stem);
        name.push(format!("_{}", n));
        if let Some(ext) = &extension {
            name.push(".");
            name.push(ext);
        }

        let candidate = destination.with_file_name(name);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    fn table() -> CategoryTable {
        CategoryTable::default()
    }

    #[test]
    fn test_entry_attributes() {
        let entry = Entry::from_path(PathBuf::from("/nowhere/Photo.JPG"));
        assert_eq!(entry.name, "Photo.JPG");
        assert_eq!(entry.extension.as_deref(), Some(".jpg"));
        assert!(!entry.hidden);
        assert!(!entry.is_dir);

        let hidden = Entry::from_path(PathBuf::from("/nowhere/.bashrc"));
        assert!(hidden.hidden);
        assert_eq!(hidden.extension, None);

        let bare = Entry::from_path(PathBuf::from("/nowhere/README"));
        assert_eq!(bare.extension, None);

        let trailing_dot = Entry::from_path(PathBuf::from("/nowhere/notes."));
        assert_eq!(trailing_dot.extension, None);

        let spaced = Entry::from_path(PathBuf::from("/nowhere/photo. JPG"));
        assert_eq!(spaced.extension.as_deref(), Some(". jpg"));

        let blank = Entry::from_path(PathBuf::from("/nowhere/memo. "));
        assert_eq!(blank.extension.as_deref(), Some(". "));
    }

    #[test]
    fn test_classify() {
        let organizer = Organizer::new(table());
        let classify = |name: &str| {
            organizer
                .classify(&Entry::from_path(PathBuf::from(name)))
                .map(str::to_string)
        };

        assert_eq!(classify("a.jpg"), Some("Images".to_string()));
        assert_eq!(classify("A.JPEG"), Some("Images".to_string()));
        assert_eq!(classify("notes.txt"), Some("Documents".to_string()));
        assert_eq!(classify("archive.unknownext"), None);
        assert_eq!(classify("README"), None);
        assert_eq!(classify("photo. JPG"), None);
        assert_eq!(classify("memo. "), None);
    }

    #[test]
    fn test_resolve_collision_free_destination() {
        let dest = Path::new("/x/Images/a.png");
        assert_eq!(resolve_collision(dest, |_| false), dest);
    }

    #[test]
    fn test_resolve_collision_picks_smallest_free_suffix() {
        let taken: HashSet<PathBuf> = [
            "/x/Images/a.png",
            "/x/Images/a_1.png",
            "/x/Images/a_3.png",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();

        let resolved = resolve_collision(Path::new("/x/Images/a.png"), |p| taken.contains(p));
        assert_eq!(resolved, PathBuf::from("/x/Images/a_2.png"));
    }

    #[test]
    fn test_resolve_collision_lowercases_extension() {
        let resolved = resolve_collision(Path::new("/x/Images/Photo.JPG"), |p| {
            p == Path::new("/x/Images/Photo.JPG")
        });
        assert_eq!(resolved, PathBuf::from("/x/Images/Photo_1.jpg"));

        let taken: HashSet<PathBuf> = ["/x/Images/Photo.JPG", "/x/Images/Photo_1.jpg"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let resolved = resolve_collision(Path::new("/x/Images/Photo.JPG"), |p| taken.contains(p));
        assert_eq!(resolved, PathBuf::from("/x/Images/Photo_2.jpg"));
    }

    #[test]
    fn test_resolve_collision_is_deterministic() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dest = temp_dir.path().join("a.png");
        fs::write(&dest, "x").unwrap();

        let first = resolve_collision(&dest, |p| p.exists());
        let second = resolve_collision(&dest, |p| p.exists());
        assert_eq!(first, second);
        assert_eq!(first, temp_dir.path().join("a_1.png"));

        fs::write(&first, "y").unwrap();
        assert_eq!(
            resolve_collision(&dest, |p| p.exists()),
            temp_dir.path().join("a_2.png")
        );
    }

    #[test]
    fn test_ensure_category_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("Images")).unwrap();

        let created = ensure_category_directories(base, &table()).unwrap();

        assert!(!created.contains(&"Images".to_string()));
        assert_eq!(created.first().map(String::as_str), Some("Videos"));
        assert_eq!(created.len(), table().len() - 1);
        assert!(!created.contains(&OTHERS.to_string()));
        assert!(base.join(OTHERS).is_dir());
        for name in table().names() {
            assert!(base.join(name).is_dir(), "{} missing", name);
        }

        let again = ensure_category_directories(base, &table()).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn test_ensure_category_directories_fails_without_parent() {
        let result = ensure_category_directories(Path::new("/non/existent/path"), &table());
        assert!(matches!(
            result,
            Err(OrganizeError::DirectoryCreationFailed { .. })
        ));
    }

    #[test]
    fn test_organize_invalid_target() {
        let organizer = Organizer::new(table());
        let result = organizer.organize(Path::new("/non/existent/path"));
        assert!(matches!(result, Err(OrganizeError::InvalidTarget { .. })));

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let result = organizer.organize(&file);
        assert!(matches!(result, Err(OrganizeError::InvalidTarget { .. })));
        assert!(file.exists());
    }

    #[test]
    fn test_organize_moves_and_counts() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("a.png"), "a").unwrap();
        fs::write(base.join("notes.txt"), "n").unwrap();
        fs::write(base.join("README"), "r").unwrap();
        fs::write(base.join(".hidden"), "h").unwrap();

        let result = Organizer::new(table()).organize(base).unwrap();

        assert_eq!(result.moved_count, 2);
        assert_eq!(result.skipped_count, 1);
        assert_eq!(result.failed_count, 0);
        assert_eq!(result.count_for("Images"), 1);
        assert_eq!(result.count_for("Documents"), 1);
        assert_eq!(result.count_for(OTHERS), 0);
        assert!(base.join("Images/a.png").exists());
        assert!(base.join("README").exists());
        assert!(base.join(".hidden").exists());
        assert_eq!(result.outcomes.len(), 3);
        assert!(
            !result
                .outcomes
                .iter()
                .any(|o| o.source().ends_with("README"))
        );
    }

    #[test]
    fn test_per_category_count_layout() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let result = Organizer::new(table()).organize(temp_dir.path()).unwrap();

        assert_eq!(result.per_category_count.len(), table().len() + 1);
        assert_eq!(
            result.per_category_count.last().map(|c| c.category.as_str()),
            Some(OTHERS)
        );
        assert_eq!(result.nonzero_counts().count(), 0);
    }

    struct Recorder {
        scanned: Option<usize>,
        seen: Vec<PathBuf>,
    }

    impl OrganizeProgress for Recorder {
        fn on_scan(&mut self, candidates: usize) {
            self.scanned = Some(candidates);
        }

        fn on_outcome(&mut self, outcome: &FileOutcome) {
            self.seen.push(outcome.source().to_path_buf());
        }
    }

    #[test]
    fn test_progress_observer() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("b.mp3"), "b").unwrap();
        fs::write(base.join("a.mp3"), "a").unwrap();
        fs::create_dir(base.join("sub")).unwrap();

        let mut recorder = Recorder {
            scanned: None,
            seen: Vec::new(),
        };
        Organizer::new(table())
            .organize_with_progress(base, &mut recorder)
            .unwrap();

        assert_eq!(recorder.scanned, Some(2));
        assert_eq!(recorder.seen, vec![base.join("a.mp3"), base.join("b.mp3")]);
    }

    struct RecordingMover {
        calls: RefCell<Vec<(PathBuf, PathBuf)>>,
    }

    impl FileMover for RecordingMover {
        fn move_file(&self, from: &Path, to: &Path) -> std::io::Result<()> {
            self.calls
                .borrow_mut()
                .push((from.to_path_buf(), to.to_path_buf()));
            fs::rename(from, to)
        }
    }

    #[test]
    fn test_custom_mover_receives_resolved_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("Images")).unwrap();
        fs::write(base.join("Images/a.png"), "old").unwrap();
        fs::write(base.join("a.png"), "new").unwrap();

        let mover = RecordingMover {
            calls: RefCell::new(Vec::new()),
        };
        let organizer = Organizer::with_mover(table(), mover);
        organizer.organize(base).unwrap();

        let calls = organizer.mover.calls.borrow();
        assert_eq!(
            *calls,
            vec![(base.join("a.png"), base.join("Images/a_1.png"))]
        );
    }

    #[test]
    fn test_dry_run_changes_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("a.png"), "a").unwrap();
        fs::write(base.join("A.png"), "b").unwrap();

        let result = Organizer::new(table()).dry_run(true).organize(base).unwrap();

        assert!(result.dry_run);
        assert_eq!(result.moved_count, 2);
        assert_eq!(result.newly_created_categories.len(), table().len());
        assert!(!base.join("Images").exists());
        assert!(!base.join(OTHERS).exists());
        assert!(base.join("a.png").exists());
    }

    #[test]
    fn test_dry_run_plans_distinct_destinations() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("Images")).unwrap();
        fs::write(base.join("Images/a.png"), "old").unwrap();
        fs::write(base.join("a.png"), "new").unwrap();
        fs::write(base.join("a_1.png"), "newer").unwrap();

        let result = Organizer::new(table()).dry_run(true).organize(base).unwrap();

        let destinations: Vec<_> = result
            .outcomes
            .iter()
            .filter_map(|o| match o {
                FileOutcome::Moved { destination, .. } => Some(destination.clone()),
                _ => None,
            })
            .collect();
        // a.png claims a_1.png, so the real a_1.png has to go one further.
        assert_eq!(
            destinations,
            vec![
                base.join("Images/a_1.png"),
                base.join("Images/a_1_1.png"),
            ]
        );
        assert!(!base.join("Images/a_1.png").exists());
    }

    #[test]
    fn test_organize_whitespace_extension_goes_to_others() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("photo. JPG"), "p").unwrap();
        fs::write(base.join("memo. "), "m").unwrap();

        let result = Organizer::new(table()).organize(base).unwrap();

        assert_eq!(result.moved_count, 2);
        assert_eq!(result.count_for(OTHERS), 2);
        assert_eq!(result.count_for("Images"), 0);
        assert!(base.join(OTHERS).join("photo. JPG").exists());
        assert!(base.join(OTHERS).join("memo. ").exists());
    }
}
