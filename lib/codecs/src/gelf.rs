//! Contains common definitions for GELF codec support

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// GELF Message fields. Definitions from <https://docs.graylog.org/docs/gelf>.
pub mod gelf_fields {

    /// (not a field) The latest version of the GELF specification.
    pub const GELF_VERSION: &str = "1.1";

    /// (required) GELF spec version
    pub const VERSION: &str = "version";

    /// (required) The name of the host, source or application that sent this message.
    pub const HOST: &str = "host";

    /// (required) A short descriptive message.
    pub const SHORT_MESSAGE: &str = "short_message";

    /// (optional) A long message that can i.e. contain a backtrace
    pub const FULL_MESSAGE: &str = "full_message";

    /// (optional) Seconds since UNIX epoch with optional decimal places for milliseconds.
    pub const TIMESTAMP: &str = "timestamp";

    /// (optional) The level equal to the standard syslog levels.
    pub const LEVEL: &str = "level";

    /// (additional) The configuration group the record was produced by.
    pub const CONFIG_NAME: &str = "_config-name";

    /// (additional) The file the record was read from.
    pub const FILE: &str = "_file";

    /// (additional) The byte offset within that file.
    pub const OFFSET: &str = "_offset";

    // < Every field with an underscore (_) prefix will be treated as an additional field. >
}

/// Record field names that carry a fixed meaning when encoded as GELF.
pub mod record_fields {
    /// The host the record originated on.
    pub const HOSTNAME: &str = "_hostname";

    /// The configuration group the record was produced by.
    pub const GROUP: &str = "_group";

    /// The file the record was read from.
    pub const FILE: &str = "_file";

    /// The time the record was observed.
    pub const TIME: &str = "_time";

    /// The byte offset within the source file.
    pub const OFFSET: &str = "_offset";

    /// The message text.
    pub const MESSAGE: &str = "message";
}

/// Regex for matching valid field names. Must contain only word chars, periods and dashes.
/// Additional field names must also be prefixed with an `_` , however that is intentionally
/// omitted from this regex to be checked separately.
#[allow(clippy::unwrap_used)]
pub static VALID_FIELD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w\.\-]*$").unwrap());

/// Regex for matching runs of characters not allowed in a field name.
#[allow(clippy::unwrap_used)]
pub static INVALID_FIELD_CHARS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\.\-]+").unwrap());

/// How strongly a record field claims the GELF field it maps to.
///
/// When two record fields map to the same GELF field, the higher rank wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldRank {
    /// An arbitrary field that was prefixed with `_`.
    Additional,
    /// A field that names a GELF field by a common alias (`message`).
    Alias,
    /// A field listed by name in the GELF mapping.
    Reserved,
}

/// Maps a record field name to the GELF field it is emitted as.
pub fn gelf_field_name(key: &str) -> (Cow<'_, str>, FieldRank) {
    use gelf_fields as gelf;

    let mapped = match key {
        record_fields::HOSTNAME => gelf::HOST,
        record_fields::GROUP => gelf::CONFIG_NAME,
        record_fields::FILE => gelf::FILE,
        record_fields::TIME => gelf::TIMESTAMP,
        record_fields::OFFSET => gelf::OFFSET,
        gelf::SHORT_MESSAGE => gelf::SHORT_MESSAGE,
        gelf::LEVEL => gelf::LEVEL,
        gelf::FULL_MESSAGE => gelf::FULL_MESSAGE,
        record_fields::MESSAGE => {
            return (Cow::Borrowed(gelf::SHORT_MESSAGE), FieldRank::Alias);
        }
        _ => return (Cow::Owned(format!("_{key}")), FieldRank::Additional),
    };
    (Cow::Borrowed(mapped), FieldRank::Reserved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_reserved_fields() {
        assert_eq!(gelf_field_name("_hostname").0, "host");
        assert_eq!(gelf_field_name("_group").0, "_config-name");
        assert_eq!(gelf_field_name("_time").0, "timestamp");
        assert_eq!(gelf_field_name("level"), (Cow::Borrowed("level"), FieldRank::Reserved));
        assert_eq!(gelf_field_name("message"), (Cow::Borrowed("short_message"), FieldRank::Alias));
    }

    #[test]
    fn prefixes_additional_fields() {
        assert_eq!(
            gelf_field_name("custom"),
            (Cow::Owned("_custom".to_owned()), FieldRank::Additional)
        );
        assert_eq!(gelf_field_name("version").0, "_version");
        assert_eq!(gelf_field_name("file").0, "_file");
    }

    #[test]
    fn field_regex() {
        assert!(VALID_FIELD_REGEX.is_match("an.add-field_int"));
        assert!(!VALID_FIELD_REGEX.is_match("has space"));
    }
}
