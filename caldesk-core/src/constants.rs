/// Files larger than this are set aside instead of parsed (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Where the document lives unless the config says otherwise.
pub const DEFAULT_DATA_FILE: &str = "~/calendar_data.json";

/// Date-key format used on disk and on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const TMP_SUFFIX: &str = "tmp";
pub const BACKUP_SUFFIX: &str = "backup";
pub const CORRUPTED_SUFFIX: &str = "corrupted";
