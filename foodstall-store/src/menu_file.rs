use foodstall_core::{CoreError, CoreResult, MenuRecord, MenuRepository, Money};
use std::borrow::Cow;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Menu stored as text, one `name,price` record per line.
///
/// The price is the number that starts after the last comma, so names may
/// contain commas and trailing text such as a currency code is ignored.
/// Lines without a comma or without a leading number are skipped. Bytes
/// that are not valid UTF-8 are replaced rather than failing the load.
pub struct FlatFileMenuRepository {
    path: PathBuf,
}

impl FlatFileMenuRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_error(&self, source: std::io::Error) -> CoreError {
        CoreError::FileOpen {
            path: self.location(),
            source,
        }
    }

    // Sibling file so the final rename stays on one filesystem
    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_all(&self, target: &Path, records: &[MenuRecord]) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(target)?);
        for record in records {
            writeln!(writer, "{}", format_line(record))?;
        }
        writer.flush()?;
        writer.get_ref().sync_all()
    }
}

impl MenuRepository for FlatFileMenuRepository {
    fn load(&self) -> CoreResult<Vec<MenuRecord>> {
        let bytes = fs::read(&self.path).map_err(|e| self.open_error(e))?;
        let contents = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = contents {
            tracing::warn!(path = %self.location(), "Menu file is not valid UTF-8; replacing undecodable bytes");
        }

        let mut records = Vec::new();
        for (number, line) in contents.lines().enumerate() {
            match parse_line(line) {
                Some(record) => records.push(record),
                None => tracing::debug!(line = number + 1, content = line, "Skipping malformed menu line"),
            }
        }

        if records.is_empty() {
            return Err(CoreError::EmptyCatalog(self.location()));
        }
        Ok(records)
    }

    /// Write to `<path>.tmp` and rename over the destination, so a failed
    /// save leaves the previous file intact.
    fn save(&self, records: &[MenuRecord]) -> CoreResult<()> {
        let temp = self.temp_path();

        if let Err(e) = self.write_all(&temp, records) {
            let _ = fs::remove_file(&temp);
            return Err(self.open_error(e));
        }

        fs::rename(&temp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp);
            self.open_error(e)
        })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse one `name,price` line
pub fn parse_line(line: &str) -> Option<MenuRecord> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let (name, price) = line.rsplit_once(',')?;
    let (price, _) = Money::parse_prefix(price).ok()?;
    Some(MenuRecord::new(name, price))
}

pub fn format_line(record: &MenuRecord) -> String {
    format!("{},{}", record.name, record.price)
}
