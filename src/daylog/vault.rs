use crate::error::{DaylogError, Result};
use crate::format::{candidate_paths, infer_format, DateFormat, DayMonthOrder, NOTE_EXTENSION};
use crate::section::Document;
use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Deep enough for `YYYY/MM/DD` layouts.
const SAMPLE_DEPTH: usize = 3;

/// A markdown vault and where its daily notes live.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    daily_notes_dir: String,
    date_format: DateFormat,
}

impl Vault {
    pub fn new(root: PathBuf, daily_notes_dir: impl Into<String>, date_format: DateFormat) -> Self {
        Self {
            root,
            daily_notes_dir: daily_notes_dir.into(),
            date_format,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn date_format(&self) -> DateFormat {
        self.date_format
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    pub fn daily_notes_path(&self) -> PathBuf {
        self.root.join(&self.daily_notes_dir)
    }

    /// Path of the note for `date` under the configured layout.
    pub fn note_path(&self, date: NaiveDate) -> PathBuf {
        let filename = format!("{}{}", self.date_format.render(date), NOTE_EXTENSION);
        self.daily_notes_path().join(filename)
    }

    /// Stems of every note under the daily notes directory, relative to it.
    pub fn sample_stems(&self) -> Result<Vec<String>> {
        let dir = self.daily_notes_path();
        if !dir.is_dir() {
            return Err(DaylogError::DailyNotesDirMissing(dir));
        }

        let mut stems = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(SAMPLE_DEPTH)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&dir) else {
                continue;
            };
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if let Some(stem) = relative.strip_suffix(NOTE_EXTENSION) {
                stems.push(stem.to_string());
            }
        }

        if stems.is_empty() {
            return Err(DaylogError::NoDailyNotes(dir));
        }
        debug!(count = stems.len(), dir = %dir.display(), "sampled daily notes");
        Ok(stems)
    }

    /// Infers the layout existing notes use.
    pub fn detect_format(&self, order: DayMonthOrder) -> Result<DateFormat> {
        let stems = self.sample_stems()?;
        let format = infer_format(&stems, order)?;
        debug!(%format, "detected daily note format");
        Ok(format)
    }

    /// Switches to the detected layout, keeping the configured one when detection fails.
    pub fn with_detected_format(mut self, order: DayMonthOrder) -> Self {
        match self.detect_format(order) {
            Ok(format) => self.date_format = format,
            Err(e) => debug!(error = %e, fallback = %self.date_format, "keeping configured date format"),
        }
        self
    }

    /// The existing note for `date`, whichever layout it was saved under.
    pub fn find_existing_note(&self, date: NaiveDate) -> Option<(PathBuf, DateFormat)> {
        find_existing_for_date(&self.daily_notes_path(), date)
    }

    /// Creates the note for `date` with a title heading and returns its path.
    pub fn create_daily_note(&self, date: NaiveDate) -> Result<PathBuf> {
        let path = self.note_path(date);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = format!("# {}\n\n", date.format("%A, %B %-d, %Y"));
        fs::write(&path, content)?;
        debug!(path = %path.display(), "created daily note");
        Ok(path)
    }
}

/// First note for `date` found under `dir`, trying every layout in catalog order.
pub fn find_existing_for_date(dir: &Path, date: NaiveDate) -> Option<(PathBuf, DateFormat)> {
    candidate_paths(dir, date)
        .into_iter()
        .find(|(path, _)| path.is_file())
}

pub fn read_document(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path)?;
    Ok(Document::from_text(&text))
}

/// Replaces the file at `path` with `doc` in one rename.
///
/// An existing file keeps its permissions.
pub fn write_document(path: &Path, doc: &Document) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(doc.to_text().as_bytes())?;
    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), meta.permissions())?;
    }
    tmp.persist(path).map_err(|e| DaylogError::Io(e.error))?;
    debug!(path = %path.display(), lines = doc.lines.len(), "wrote note");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn vault_in(temp: &TempDir) -> Vault {
        Vault::new(
            temp.path().to_path_buf(),
            "Daily Notes",
            DateFormat::IsoDashWeekday,
        )
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_note_path_uses_format() {
        let temp = TempDir::new().unwrap();
        let vault = vault_in(&temp);
        assert_eq!(
            vault.note_path(date(2025, 7, 19)),
            temp.path().join("Daily Notes").join("2025-07-19-Saturday.md")
        );
    }

    #[test]
    fn test_sample_missing_dir() {
        let temp = TempDir::new().unwrap();
        let vault = vault_in(&temp);
        assert!(matches!(
            vault.sample_stems(),
            Err(DaylogError::DailyNotesDirMissing(_))
        ));
    }

    #[test]
    fn test_sample_empty_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("Daily Notes")).unwrap();
        fs::write(temp.path().join("Daily Notes").join("todo.txt"), "").unwrap();
        let vault = vault_in(&temp);
        assert!(matches!(
            vault.sample_stems(),
            Err(DaylogError::NoDailyNotes(_))
        ));
    }

    #[test]
    fn test_sample_strips_extension_and_keeps_nesting() {
        let temp = TempDir::new().unwrap();
        let daily = temp.path().join("Daily Notes");
        touch(&daily.join("2025-07-19.md"));
        touch(&daily.join("2025").join("07").join("20.md"));
        touch(&daily.join("image.png"));

        let mut stems = vault_in(&temp).sample_stems().unwrap();
        stems.sort();
        assert_eq!(stems, vec!["2025-07-19", "2025/07/20"]);
    }

    #[test]
    fn test_detect_format() {
        let temp = TempDir::new().unwrap();
        let daily = temp.path().join("Daily Notes");
        touch(&daily.join("19-07-2025.md"));
        touch(&daily.join("20-07-2025.md"));
        touch(&daily.join("Weekly review.md"));

        let vault = vault_in(&temp);
        assert_eq!(
            vault.detect_format(DayMonthOrder::MonthFirst).unwrap(),
            DateFormat::DayMonthYear
        );
        let vault = vault.with_detected_format(DayMonthOrder::MonthFirst);
        assert_eq!(vault.date_format(), DateFormat::DayMonthYear);
    }

    #[test]
    fn test_detect_no_match_falls_back() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("Daily Notes").join("ideas.md"));

        let vault = vault_in(&temp);
        assert!(matches!(
            vault.detect_format(DayMonthOrder::MonthFirst),
            Err(DaylogError::NoDateFormat(_))
        ));
        let vault = vault.with_detected_format(DayMonthOrder::MonthFirst);
        assert_eq!(vault.date_format(), DateFormat::IsoDashWeekday);
    }

    #[test]
    fn test_find_existing_in_other_format() {
        let temp = TempDir::new().unwrap();
        let daily = temp.path().join("Daily Notes");
        touch(&daily.join("July 19, 2025.md"));

        let vault = vault_in(&temp);
        assert_eq!(
            vault.find_existing_note(date(2025, 7, 19)),
            Some((daily.join("July 19, 2025.md"), DateFormat::MonthNameDayYear))
        );
        assert_eq!(vault.find_existing_note(date(2025, 7, 20)), None);
    }

    #[test]
    fn test_find_existing_prefers_catalog_order() {
        let temp = TempDir::new().unwrap();
        let daily = temp.path().join("Daily Notes");
        touch(&daily.join("2025-07-19.md"));
        touch(&daily.join("2025-07-19-Saturday.md"));

        let found = find_existing_for_date(&daily, date(2025, 7, 19)).unwrap();
        assert_eq!(found.1, DateFormat::IsoDashWeekday);
    }

    #[test]
    fn test_create_daily_note() {
        let temp = TempDir::new().unwrap();
        let vault = Vault::new(temp.path().to_path_buf(), "Daily", DateFormat::IsoSlashed);
        let path = vault.create_daily_note(date(2025, 7, 4)).unwrap();

        assert_eq!(path, temp.path().join("Daily").join("2025/07/04.md"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Friday, July 4, 2025\n\n"
        );
    }

    #[test]
    fn test_write_document_replaces_whole_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("note.md");
        fs::write(&path, "# Old\nstuff\n").unwrap();

        let doc = read_document(&path)
            .unwrap()
            .merge_entry("Projects", "Foo", "body");
        write_document(&path, &doc).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Old\nstuff\n\n## Projects\n\n### Foo\nbody\n\n"
        );
        let leftovers: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_document_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("note.md");
        fs::write(&path, "# Old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let doc = read_document(&path)
            .unwrap()
            .merge_entry("Projects", "Foo", "body");
        write_document(&path, &doc).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
        assert!(fs::read_to_string(&path).unwrap().contains("### Foo"));
    }
}
